use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score configuration error: {0}")]
    Config(String),
}

pub type ScoreResult<T> = Result<T, ScoreError>;
