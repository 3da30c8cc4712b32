//! Track Commands Module
//!
//! Implements the per-track controls: lock, visibility and volume/mute.
//! These are not clip edits, so a locked track still accepts them.

use serde::{Deserialize, Serialize};

use crate::core::{
    commands::{Command, CommandResult, StateChange},
    timeline::{Timeline, Track},
    CoreError, CoreResult, TrackId,
};

/// Highest volume a track accepts (200%)
pub const MAX_TRACK_VOLUME: f32 = 2.0;

fn find_track_mut<'a>(timeline: &'a mut Timeline, track_id: &str) -> CoreResult<&'a mut Track> {
    timeline
        .get_track_mut(track_id)
        .ok_or_else(|| CoreError::TrackNotFound(track_id.to_string()))
}

fn track_modified(track_id: &str, changed: bool) -> CommandResult {
    if !changed {
        return CommandResult::new();
    }
    CommandResult::new().with_change(StateChange::TrackModified {
        track_id: track_id.to_string(),
    })
}

// =============================================================================
// SetTrackLockedCommand
// =============================================================================

/// Command to lock or unlock a track
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTrackLockedCommand {
    pub track_id: TrackId,
    pub locked: bool,
}

impl SetTrackLockedCommand {
    pub fn new(track_id: &str, locked: bool) -> Self {
        Self {
            track_id: track_id.to_string(),
            locked,
        }
    }
}

impl Command for SetTrackLockedCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let track = find_track_mut(timeline, &self.track_id)?;
        let changed = track.locked != self.locked;
        track.locked = self.locked;
        Ok(track_modified(&self.track_id, changed))
    }

    fn type_name(&self) -> &'static str {
        "SetTrackLocked"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// SetTrackVisibleCommand
// =============================================================================

/// Command to show or hide a track
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTrackVisibleCommand {
    pub track_id: TrackId,
    pub visible: bool,
}

impl SetTrackVisibleCommand {
    pub fn new(track_id: &str, visible: bool) -> Self {
        Self {
            track_id: track_id.to_string(),
            visible,
        }
    }
}

impl Command for SetTrackVisibleCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let track = find_track_mut(timeline, &self.track_id)?;
        let changed = track.visible != self.visible;
        track.visible = self.visible;
        Ok(track_modified(&self.track_id, changed))
    }

    fn type_name(&self) -> &'static str {
        "SetTrackVisible"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// SetTrackVolumeCommand
// =============================================================================

/// Command to set a track's volume (0.0 mutes)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTrackVolumeCommand {
    pub track_id: TrackId,
    pub volume: f32,
}

impl SetTrackVolumeCommand {
    pub fn new(track_id: &str, volume: f32) -> Self {
        Self {
            track_id: track_id.to_string(),
            volume,
        }
    }
}

impl Command for SetTrackVolumeCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        if !self.volume.is_finite() {
            return Err(CoreError::ValidationError(
                "volume must be a finite number".to_string(),
            ));
        }

        let track = find_track_mut(timeline, &self.track_id)?;
        let volume = self.volume.clamp(0.0, MAX_TRACK_VOLUME);
        let changed = track.volume != volume;
        track.volume = volume;
        if volume > 0.0 {
            track.volume_before_mute = None;
        }
        Ok(track_modified(&self.track_id, changed))
    }

    fn type_name(&self) -> &'static str {
        "SetTrackVolume"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// ToggleTrackMuteCommand
// =============================================================================

/// Command to mute or unmute an audio-capable track.
///
/// On a track without audio (image tracks) the toggle is a no-op. Muting stores the current volume and sets it to 0.0. Unmuting restores
/// the stored volume, or `restore_volume` when none was stored (for example
/// a project loaded with the track already muted).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTrackMuteCommand {
    pub track_id: TrackId,
    pub restore_volume: f32,
}

impl ToggleTrackMuteCommand {
    pub fn new(track_id: &str) -> Self {
        Self {
            track_id: track_id.to_string(),
            restore_volume: 1.0,
        }
    }

    pub fn with_restore_volume(mut self, volume: f32) -> Self {
        self.restore_volume = volume;
        self
    }
}

impl Command for ToggleTrackMuteCommand {
    fn execute(&self, timeline: &mut Timeline) -> CoreResult<CommandResult> {
        let track = find_track_mut(timeline, &self.track_id)?;
        if !track.is_audio_capable() {
            tracing::debug!(track_id = %self.track_id, "Track has no audio; mute ignored");
            return Ok(CommandResult::new());
        }

        if track.is_muted() {
            let fallback = if self.restore_volume.is_finite() && self.restore_volume > 0.0 {
                self.restore_volume.min(MAX_TRACK_VOLUME)
            } else {
                1.0
            };
            track.volume = track.volume_before_mute.take().unwrap_or(fallback);
        } else {
            track.volume_before_mute = Some(track.volume);
            track.volume = 0.0;
        }

        Ok(track_modified(&self.track_id, true))
    }

    fn type_name(&self) -> &'static str {
        "ToggleTrackMute"
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::json!({}))
    }
}

// =============================================================================
// Tests
// =============================================================================
