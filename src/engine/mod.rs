//! Token application and event tracking.

/// Applies classified tokens to the in-progress record.
pub mod evaluator;
/// Contest and activation exchange state.
pub mod event;
