//! Command Trait Definition
//!
//! Defines the trait that all edit commands must implement.

use serde::{Deserialize, Serialize};

use crate::core::{new_id, timeline::Timeline, CoreResult, OpId};

/// Command execution result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Generated Operation ID
    pub op_id: OpId,

    /// List of state changes
    pub changes: Vec<StateChange>,

    /// Newly created clip IDs
    pub created_ids: Vec<String>,

    /// Deleted clip IDs
    pub deleted_ids: Vec<String>,
}

impl CommandResult {
    /// Creates a new empty command result with a fresh operation ID
    pub fn new() -> Self {
        Self {
            op_id: new_id(),
            changes: vec![],
            created_ids: vec![],
            deleted_ids: vec![],
        }
    }

    /// Adds a state change
    pub fn with_change(mut self, change: StateChange) -> Self {
        self.changes.push(change);
        self
    }

    /// Adds a created ID
    pub fn with_created_id(mut self, id: &str) -> Self {
        self.created_ids.push(id.to_string());
        self
    }

    /// Adds a deleted ID
    pub fn with_deleted_id(mut self, id: &str) -> Self {
        self.deleted_ids.push(id.to_string());
        self
    }

    /// Returns true if the command left the timeline untouched
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

impl Default for CommandResult {
    fn default() -> Self {
        Self::new()
    }
}

/// State change types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StateChange {
    ClipCreated {
        clip_id: String,
    },
    ClipModified {
        clip_id: String,
    },
    ClipDeleted {
        clip_id: String,
    },
    ClipTransferred {
        clip_id: String,
        from_track_id: String,
        to_track_id: String,
    },
    ClipsReordered {
        track_id: String,
    },
    TrackModified {
        track_id: String,
    },
}

/// Trait that all edit commands must implement
///
/// # Core Principles
/// - All timeline changes go through Commands.
/// - A command validates everything before its first mutation, so a failed
///   command leaves the timeline unchanged.
/// - Commands are serializable so a host can log or replay them.
pub trait Command: Send + Sync {
    /// Execute the command against the timeline.
    ///
    /// On failure, the timeline must remain unchanged.
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult>;

    /// Command type name, used for logging.
    fn type_name(&self) -> &'static str;

    /// JSON form of the command parameters.
    fn to_json(&self) -> serde_json::Value;
}

/// Applies a command to a copy of the timeline.
///
/// This is the pure `(Timeline, params) -> Timeline` form of a command; an
/// undo stack or an autosave service can be layered on top of it by keeping
/// the returned snapshots.
pub fn apply(timeline: &Timeline, command: &dyn Command) -> CoreResult<(Timeline, CommandResult)> {
    let mut next = timeline.clone();
    let result = command.execute(&mut next)?;
    Ok((next, result))
}
