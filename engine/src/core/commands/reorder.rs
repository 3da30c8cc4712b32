//! Reorder Commands Module
//!
//! Drag-reordering of clips within a track's list, and transfer of a clip
//! from one track to another. Neither command touches clip times.

use serde::{Deserialize, Serialize};

use crate::core::{
    commands::{clip::locate_editable_clip, Command, CommandResult, StateChange},
    timeline::Timeline,
    ClipId, CoreError, CoreResult, TrackId,
};

/// Moves the element at `old_index` to `new_index`, shifting the elements
/// in between by one position. Out-of-range or equal indices are a no-op.
///
/// Returns true if the slice changed.
pub fn array_move<T>(items: &mut [T], old_index: usize, new_index: usize) -> bool {
    if old_index == new_index || old_index >= items.len() || new_index >= items.len() {
        return false;
    }
    if old_index < new_index {
        items[old_index..=new_index].rotate_left(1);
    } else {
        items[new_index..=old_index].rotate_right(1);
    }
    true
}

// =============================================================================
// ReorderClipCommand
// =============================================================================

/// Command to move a dragged clip to the list position of the drop target
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderClipCommand {
    pub track_id: TrackId,
    /// The dragged clip
    pub active_clip_id: ClipId,
    /// The clip it was dropped on
    pub over_clip_id: ClipId,
}

impl ReorderClipCommand {
    pub fn new(track_id: &str, active_clip_id: &str, over_clip_id: &str) -> Self {
        Self {
            track_id: track_id.to_string(),
            active_clip_id: active_clip_id.to_string(),
            over_clip_id: over_clip_id.to_string(),
        }
    }
}

impl Command for ReorderClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let track = timeline
            .get_track_mut(&self.track_id)
            .ok_or_else(|| CoreError::TrackNotFound(self.track_id.clone()))?;
        track.ensure_unlocked()?;

        let old_index = track
            .clip_index(&self.active_clip_id)
            .ok_or_else(|| CoreError::ClipNotFound(self.active_clip_id.clone()))?;
        let new_index = track
            .clip_index(&self.over_clip_id)
            .ok_or_else(|| CoreError::ClipNotFound(self.over_clip_id.clone()))?;

        if !array_move(&mut track.clips, old_index, new_index) {
            return Ok(CommandResult::new());
        }

        Ok(CommandResult::new().with_change(StateChange::ClipsReordered {
            track_id: self.track_id.clone(),
        }))
    }

    fn type_name(&self) -> &'static str {
        "ReorderClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// MoveClipToTrackCommand
// =============================================================================

/// Command to transfer a clip to another track.
///
/// The clip is removed from its source track and inserted into the
/// destination in one step, keeping its ID and times.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveClipToTrackCommand {
    pub clip_id: ClipId,
    pub dest_track_id: TrackId,
    /// List position in the destination (defaults to the end)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl MoveClipToTrackCommand {
    pub fn new(clip_id: &str, dest_track_id: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            dest_track_id: dest_track_id.to_string(),
            index: None,
        }
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl Command for MoveClipToTrackCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let (src_track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let dest_track_idx = timeline
            .track_index(&self.dest_track_id)
            .ok_or_else(|| CoreError::TrackNotFound(self.dest_track_id.clone()))?;
        timeline.tracks[dest_track_idx].ensure_unlocked()?;

        let from_track_id = timeline.tracks[src_track_idx].id.clone();

        if src_track_idx == dest_track_idx {
            let track = &mut timeline.tracks[src_track_idx];
            let target = self
                .index
                .unwrap_or(track.clips.len())
                .min(track.clips.len() - 1);
            if !array_move(&mut track.clips, clip_idx, target) {
                return Ok(CommandResult::new());
            }
            return Ok(CommandResult::new().with_change(StateChange::ClipsReordered {
                track_id: from_track_id,
            }));
        }

        // All checks passed; the transfer below cannot fail.
        let clip = timeline.tracks[src_track_idx].clips.remove(clip_idx);
        let dest = &mut timeline.tracks[dest_track_idx];
        let target = self.index.unwrap_or(dest.clips.len()).min(dest.clips.len());
        dest.clips.insert(target, clip);

        Ok(CommandResult::new().with_change(StateChange::ClipTransferred {
            clip_id: self.clip_id.clone(),
            from_track_id,
            to_track_id: self.dest_track_id.clone(),
        }))
    }

    fn type_name(&self) -> &'static str {
        "MoveClipToTrack"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// Tests
// =============================================================================
