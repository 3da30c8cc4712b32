//! Studio Engine Error Definitions
//!
//! Defines error types used throughout the engine.

use thiserror::Error;

use super::{ClipId, TimeSec, TrackId};

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Timeline Errors
    // =========================================================================
    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Track is locked: {0}")]
    TrackLocked(TrackId),

    #[error("Invalid split point {split_at} for clip {clip_id} ({start}~{end} seconds)")]
    InvalidRange {
        clip_id: ClipId,
        split_at: TimeSec,
        start: TimeSec,
        end: TimeSec,
    },

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Returns true for errors caused by a stale clip/track reference.
    ///
    /// A drag gesture can race with a structural edit from the same caller,
    /// so these are recovered as no-ops by the editor session.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClipNotFound(_) | Self::TrackNotFound(_))
    }

    /// Convert to a user-facing notice for the host UI
    pub fn to_notice(&self) -> String {
        self.to_string()
    }
}
