//! `rearm-validate` — item eligibility checking.
//!
//! Eligibility is a chain of independently testable predicate objects run in
//! cost order: cheap volatile checks (existence, region, forbidden,
//! ownership, denylist) run uncached on every call; the expensive stable
//! checks behind them (body size, faction policy, duplicate comparison) run
//! through a TTL'd, fingerprinted [`ValidationCache`].
//!
//! # Cache trust rule
//!
//! An entry is trusted only while `now < expiry` **and** its stored
//! [`Fingerprint`] of volatile item state still matches.  Either failing
//! means recompute — a forbidden/ownership flip must never hide behind a
//! long-TTL slot.
//!
//! # Side-effecting checks
//!
//! A check may request a denylist entry alongside its denial (structural
//! unusability).  The driver persists that side effect **before** writing
//! the cache entry, and the request is idempotent under repeated
//! invocation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                         |
//! |---------------|--------------------------------------------------|
//! | [`reason`]    | `DenialReason` — the fixed denial taxonomy       |
//! | [`check`]     | `EligibilityCheck` trait + the standard checks   |
//! | [`context`]   | `ValidationContext` — per-call read snapshot     |
//! | [`cache`]     | `ValidationCache`, `Fingerprint`, `CacheEntry`   |
//! | [`validator`] | `Validator` — the chain driver                   |

pub mod cache;
pub mod check;
pub mod context;
pub mod reason;
pub mod validator;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, Fingerprint, ValidationCache};
pub use check::{CacheClass, Denial, EligibilityCheck};
pub use context::ValidationContext;
pub use reason::DenialReason;
pub use validator::Validator;
