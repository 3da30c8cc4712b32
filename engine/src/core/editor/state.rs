//! Playhead and selection state.
//!
//! Engine-level state read by the UI and by split-at-playhead. It is not
//! part of the Timeline and is not persisted with it.

use serde::{Deserialize, Serialize};

use crate::core::{timeline::Timeline, ClipId, CoreError, CoreResult, TimeSec};

/// Current playback/edit time cursor
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playhead {
    current_time: TimeSec,
}

impl Playhead {
    pub fn current_time(&self) -> TimeSec {
        self.current_time
    }

    /// Moves the playhead. Negative times clamp to zero.
    pub fn seek(&mut self, time_sec: TimeSec) -> CoreResult<()> {
        if !time_sec.is_finite() {
            return Err(CoreError::ValidationError(
                "currentTime must be finite".to_string(),
            ));
        }
        self.current_time = time_sec.max(0.0);
        Ok(())
    }
}

/// Single-clip selection
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    clip_id: Option<ClipId>,
}

impl Selection {
    pub fn clip_id(&self) -> Option<&str> {
        self.clip_id.as_deref()
    }

    pub fn is_selected(&self, clip_id: &str) -> bool {
        self.clip_id.as_deref() == Some(clip_id)
    }

    /// Selects a clip, replacing any previous selection.
    pub fn select(&mut self, timeline: &Timeline, clip_id: &str) -> CoreResult<()> {
        if timeline.get_clip(clip_id).is_none() {
            return Err(CoreError::ClipNotFound(clip_id.to_string()));
        }
        self.clip_id = Some(clip_id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.clip_id = None;
    }

    /// Drops the selection if the clip no longer exists.
    ///
    /// Returns true if the selection was cleared.
    pub fn prune(&mut self, timeline: &Timeline) -> bool {
        match &self.clip_id {
            Some(id) if timeline.get_clip(id).is_none() => {
                self.clip_id = None;
                true
            }
            _ => false,
        }
    }
}

/// Plain-data view of the editor handed to the host UI, renderer or exporter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub timeline: Timeline,
    pub selected_clip_id: Option<ClipId>,
    pub current_time: TimeSec,
    pub zoom: f64,
}
