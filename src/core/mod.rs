//! Session state, finalized-record stack and worked-before index.

/// Worked-stations index.
pub mod indices;
/// Carry-over defaults shared by consecutive records.
pub mod session;
/// Finalized records awaiting persistence.
pub mod stack;
