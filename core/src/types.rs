//! Shared primitive types used across the entire engine.

/// A simulated month. One turn = one month.
pub type Month = u32;

/// An amount of money in rupees.
pub type Rupees = f64;

/// The canonical session identifier.
pub type SessionId = String;
