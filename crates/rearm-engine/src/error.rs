use rearm_command::CommandError;
use rearm_core::CoreError;
use rearm_score::ScoreError;
use thiserror::Error;

/// Engine construction and execution errors.
///
/// Evaluation itself never returns an error — denial is a routine outcome
/// expressed as [`Decision::Skip`][crate::Decision::Skip], and every
/// per-agent failure in the execution path is caught at that agent's
/// boundary, reported to the observer, and converted into a throttle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

pub type EngineResult<T> = Result<T, EngineError>;
