//! Pattern-matched `try`/`katch`/`finale`.
//!
//! Handlers are selected by matching the fault's code string against the
//! patterns they were registered with, not by error type. Patterns are
//! tried in registration order and the first match wins.

pub mod pattern;
pub mod worker;

pub use pattern::{CodePattern, IntoCodePattern};
pub use worker::{CodeBlockWorker, KatchBlock};
