//! Clip Commands Module
//!
//! Implements all clip-related editing commands.

use serde::{Deserialize, Serialize};

use crate::core::{
    commands::{Command, CommandResult, StateChange},
    is_valid_time_sec,
    timeline::{max_start_time, min_end_time, Clip, Timeline, MIN_CLIP_DURATION},
    AssetId, ClipId, Color, CoreError, CoreResult, TimeSec, TrackId,
};

/// Finds a clip and checks that its track accepts edits.
///
/// Returns `(track_index, clip_index)`.
pub(crate) fn locate_editable_clip(timeline: &Timeline, clip_id: &str) -> CoreResult<(usize, usize)> {
    let (track_idx, clip_idx) = timeline.require_clip(clip_id)?;
    timeline.tracks[track_idx].ensure_unlocked()?;
    Ok((track_idx, clip_idx))
}

// =============================================================================
// Trim
// =============================================================================

/// Which clip boundary a trim moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrimEdge {
    Start,
    End,
}

/// Computes the trimmed `(start, end)` of a clip.
///
/// The moved edge is clamped so the clip keeps `MIN_CLIP_DURATION` and
/// never starts before zero. Trimming past the limit pins the edge at the
/// closest time for which `end - start >= MIN_CLIP_DURATION` holds exactly.
pub fn trimmed_range(
    start: TimeSec,
    end: TimeSec,
    edge: TrimEdge,
    delta_sec: TimeSec,
) -> (TimeSec, TimeSec) {
    match edge {
        TrimEdge::Start => {
            let limit = max_start_time(end).max(0.0);
            let new_start = (start + delta_sec).max(0.0).min(limit);
            (new_start, end)
        }
        TrimEdge::End => {
            let new_end = (end + delta_sec).max(min_end_time(start));
            (start, new_end)
        }
    }
}

/// Command to trim one edge of a clip by a signed delta
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrimClipCommand {
    /// Clip ID to trim
    pub clip_id: ClipId,
    /// Edge being dragged
    pub edge: TrimEdge,
    /// Signed movement in seconds
    pub delta_sec: TimeSec,
}

impl TrimClipCommand {
    pub fn new(clip_id: &str, edge: TrimEdge, delta_sec: TimeSec) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            edge,
            delta_sec,
        }
    }
}

impl Command for TrimClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        if !self.delta_sec.is_finite() {
            return Err(CoreError::ValidationError(
                "deltaSec must be finite".to_string(),
            ));
        }

        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let clip = &mut timeline.tracks[track_idx].clips[clip_idx];

        let (new_start, new_end) =
            trimmed_range(clip.start_time, clip.end_time, self.edge, self.delta_sec);
        if new_start == clip.start_time && new_end == clip.end_time {
            return Ok(CommandResult::new());
        }

        clip.start_time = new_start;
        clip.end_time = new_end;

        Ok(CommandResult::new().with_change(StateChange::ClipModified {
            clip_id: self.clip_id.clone(),
        }))
    }

    fn type_name(&self) -> &'static str {
        "TrimClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// SplitClipCommand
// =============================================================================

/// Command to split a clip at a given time
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitClipCommand {
    /// Clip ID to split
    pub clip_id: ClipId,
    /// Time to split at (in timeline time)
    pub split_at: TimeSec,
}

impl SplitClipCommand {
    pub fn new(clip_id: &str, split_at: TimeSec) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            split_at,
        }
    }
}

impl Command for SplitClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let track = &mut timeline.tracks[track_idx];
        let original = &track.clips[clip_idx];

        let invalid = || CoreError::InvalidRange {
            clip_id: original.id.clone(),
            split_at: self.split_at,
            start: original.start_time,
            end: original.end_time,
        };

        if !self.split_at.is_finite() || !original.can_split_at(self.split_at) {
            return Err(invalid());
        }

        // Both halves must keep the duration floor.
        let first = original.derive(original.start_time, self.split_at);
        let second = original.derive(self.split_at, original.end_time);
        if !first.is_valid() || !second.is_valid() {
            return Err(invalid());
        }

        let first_id = first.id.clone();
        let second_id = second.id.clone();
        track.clips.splice(clip_idx..=clip_idx, [first, second]);

        tracing::debug!(
            clip_id = %self.clip_id,
            split_at = self.split_at,
            first_id = %first_id,
            second_id = %second_id,
            "Split clip"
        );

        Ok(CommandResult::new()
            .with_change(StateChange::ClipDeleted {
                clip_id: self.clip_id.clone(),
            })
            .with_change(StateChange::ClipCreated {
                clip_id: first_id.clone(),
            })
            .with_change(StateChange::ClipCreated {
                clip_id: second_id.clone(),
            })
            .with_deleted_id(&self.clip_id)
            .with_created_id(&first_id)
            .with_created_id(&second_id))
    }

    fn type_name(&self) -> &'static str {
        "SplitClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// DuplicateClipCommand
// =============================================================================

/// Where a duplicated clip is placed on the time axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePlacement {
    /// Immediately after the source clip
    #[default]
    AfterSource,
    /// Over the same range as the source clip
    SamePosition,
}

/// Command to duplicate a clip next to its source
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateClipCommand {
    /// Source clip ID
    pub clip_id: ClipId,
    /// Time placement of the copy
    #[serde(default)]
    pub placement: DuplicatePlacement,
}

impl DuplicateClipCommand {
    pub fn new(clip_id: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            placement: DuplicatePlacement::default(),
        }
    }

    pub fn with_placement(mut self, placement: DuplicatePlacement) -> Self {
        self.placement = placement;
        self
    }
}

impl Command for DuplicateClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let track = &mut timeline.tracks[track_idx];
        let source = &track.clips[clip_idx];

        let copy = match self.placement {
            DuplicatePlacement::AfterSource => {
                let start = source.end_time;
                let end = (start + source.duration()).max(min_end_time(start));
                source.derive(start, end)
            }
            DuplicatePlacement::SamePosition => source.derive(source.start_time, source.end_time),
        };
        let copy_id = copy.id.clone();
        track.clips.insert(clip_idx + 1, copy);

        Ok(CommandResult::new()
            .with_change(StateChange::ClipCreated {
                clip_id: copy_id.clone(),
            })
            .with_created_id(&copy_id))
    }

    fn type_name(&self) -> &'static str {
        "DuplicateClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// DeleteClipCommand
// =============================================================================

/// Command to remove a clip, leaving a gap
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteClipCommand {
    pub clip_id: ClipId,
}

impl DeleteClipCommand {
    pub fn new(clip_id: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
        }
    }
}

impl Command for DeleteClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        timeline.tracks[track_idx].clips.remove(clip_idx);

        Ok(CommandResult::new()
            .with_change(StateChange::ClipDeleted {
                clip_id: self.clip_id.clone(),
            })
            .with_deleted_id(&self.clip_id))
    }

    fn type_name(&self) -> &'static str {
        "DeleteClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// RippleDeleteClipCommand
// =============================================================================

/// Command to remove a clip and close the gap it leaves.
///
/// Clips on the same track starting at or after the deleted clip's end move
/// left by the deleted duration. Other tracks are untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RippleDeleteClipCommand {
    pub clip_id: ClipId,
}

impl RippleDeleteClipCommand {
    pub fn new(clip_id: &str) -> Self {
        Self {
            clip_id: clip_id.to_string(),
        }
    }
}

impl Command for RippleDeleteClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let track = &mut timeline.tracks[track_idx];
        let removed = track.clips.remove(clip_idx);
        let shift = removed.duration();

        let mut result = CommandResult::new()
            .with_change(StateChange::ClipDeleted {
                clip_id: removed.id.clone(),
            })
            .with_deleted_id(&removed.id);

        for clip in track
            .clips
            .iter_mut()
            .filter(|c| c.start_time >= removed.end_time)
        {
            let new_start = (clip.start_time - shift).max(0.0);
            clip.end_time = (clip.end_time - shift).max(min_end_time(new_start));
            clip.start_time = new_start;
            result = result.with_change(StateChange::ClipModified {
                clip_id: clip.id.clone(),
            });
        }

        Ok(result)
    }

    fn type_name(&self) -> &'static str {
        "RippleDeleteClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// InsertClipCommand
// =============================================================================

/// Command to place a new clip for an asset on a track
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertClipCommand {
    /// Target track ID
    pub track_id: TrackId,
    /// Source asset ID
    pub asset_id: AssetId,
    /// Timeline position to insert at
    pub start_time: TimeSec,
    /// Clip duration in seconds
    pub duration: TimeSec,
    /// Optional presentation color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl InsertClipCommand {
    pub fn new(track_id: &str, asset_id: &str, start_time: TimeSec, duration: TimeSec) -> Self {
        Self {
            track_id: track_id.to_string(),
            asset_id: asset_id.to_string(),
            start_time,
            duration,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Command for InsertClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        if !is_valid_time_sec(self.start_time) {
            return Err(CoreError::ValidationError(
                "startTime must be finite and non-negative".to_string(),
            ));
        }
        if !self.duration.is_finite() || self.duration < MIN_CLIP_DURATION {
            return Err(CoreError::ValidationError(format!(
                "duration must be finite and at least {MIN_CLIP_DURATION} seconds"
            )));
        }

        let track = timeline
            .get_track_mut(&self.track_id)
            .ok_or_else(|| CoreError::TrackNotFound(self.track_id.clone()))?;
        track.ensure_unlocked()?;

        let mut clip = Clip::new(&self.asset_id, self.start_time, self.duration);
        clip.end_time = clip.end_time.max(min_end_time(self.start_time));
        clip.color = self.color.clone();
        let clip_id = clip.id.clone();
        track.add_clip(clip);

        Ok(CommandResult::new()
            .with_change(StateChange::ClipCreated {
                clip_id: clip_id.clone(),
            })
            .with_created_id(&clip_id))
    }

    fn type_name(&self) -> &'static str {
        "InsertClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// MoveClipCommand
// =============================================================================

/// Command to reposition a clip in time on its own track
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveClipCommand {
    pub clip_id: ClipId,
    /// New timeline start; the duration is preserved
    pub new_start: TimeSec,
}

impl MoveClipCommand {
    pub fn new(clip_id: &str, new_start: TimeSec) -> Self {
        Self {
            clip_id: clip_id.to_string(),
            new_start,
        }
    }
}

impl Command for MoveClipCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        if !is_valid_time_sec(self.new_start) {
            return Err(CoreError::ValidationError(
                "newStart must be finite and non-negative".to_string(),
            ));
        }

        let (track_idx, clip_idx) = locate_editable_clip(timeline, &self.clip_id)?;
        let clip = &mut timeline.tracks[track_idx].clips[clip_idx];
        if clip.start_time == self.new_start {
            return Ok(CommandResult::new());
        }

        let duration = clip.duration();
        clip.start_time = self.new_start;
        clip.end_time = (self.new_start + duration).max(min_end_time(self.new_start));

        Ok(CommandResult::new().with_change(StateChange::ClipModified {
            clip_id: self.clip_id.clone(),
        }))
    }

    fn type_name(&self) -> &'static str {
        "MoveClip"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// Tests
// =============================================================================
