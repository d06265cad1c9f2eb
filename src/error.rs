//! Typed error taxonomy for the engine's external interfaces.
//!
//! Internal invariant violations (zobrist parity, material/psqt parity) are
//! not reported through this enum: in debug builds they `debug_assert!`
//! immediately, and in release builds they are logged via `tracing::warn!`
//! and best-effort-recovered, matching the existing `assert_hash` pattern.
//! `EngineError::InternalInvariant` exists for the rare case such a
//! violation must be surfaced to a caller instead of only logged.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A UCI command was malformed or used an unsupported keyword.
    ProtocolError(String),
    /// A FEN string failed to parse.
    BadFen(String),
    /// A UCI move string did not name a legal move in the current position.
    BadMove(String),
    /// An invariant that should always hold was found violated at runtime.
    InternalInvariant(String),
    /// A configured resource limit (time, memory, depth) was exhausted.
    ResourceLimit(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ProtocolError(msg) => write!(f, "protocol error: {msg}"),
            EngineError::BadFen(msg) => write!(f, "invalid FEN: {msg}"),
            EngineError::BadMove(msg) => write!(f, "invalid move: {msg}"),
            EngineError::InternalInvariant(msg) => write!(f, "internal invariant violated: {msg}"),
            EngineError::ResourceLimit(msg) => write!(f, "resource limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
