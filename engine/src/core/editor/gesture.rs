//! Drag gestures.
//!
//! A gesture is speculative: while the pointer moves it only computes a
//! preview from the state captured at `begin`. The timeline changes once,
//! when the gesture is committed. Cancelling discards it.

use crate::core::{
    commands::{
        array_move, locate_editable_clip, trimmed_range, ReorderClipCommand, TrimClipCommand,
        TrimEdge,
    },
    timeline::{geometry, Timeline, Zoom},
    ClipId, CoreError, CoreResult, Pixels, TimeSec, TrackId,
};

/// The one gesture an editor session may have in flight
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Trim(TrimGesture),
    Reorder(ReorderGesture),
}

// =============================================================================
// Trim
// =============================================================================

/// Edge drag on a clip
#[derive(Clone, Debug, PartialEq)]
pub struct TrimGesture {
    clip_id: ClipId,
    edge: TrimEdge,
    origin_x: Pixels,
    zoom: Zoom,
    original_start: TimeSec,
    original_end: TimeSec,
    delta_sec: TimeSec,
}

impl TrimGesture {
    /// Starts a trim at `pointer_x`. Fails if the clip is missing or locked.
    pub fn begin(
        timeline: &Timeline,
        clip_id: &str,
        edge: TrimEdge,
        pointer_x: Pixels,
        zoom: Zoom,
    ) -> CoreResult<Self> {
        if !pointer_x.is_finite() {
            return Err(CoreError::ValidationError(
                "pointer position must be finite".to_string(),
            ));
        }
        let (track_idx, clip_idx) = locate_editable_clip(timeline, clip_id)?;
        let clip = &timeline.tracks[track_idx].clips[clip_idx];

        Ok(Self {
            clip_id: clip.id.clone(),
            edge,
            origin_x: pointer_x,
            zoom,
            original_start: clip.start_time,
            original_end: clip.end_time,
            delta_sec: 0.0,
        })
    }

    pub fn clip_id(&self) -> &str {
        &self.clip_id
    }

    pub fn edge(&self) -> TrimEdge {
        self.edge
    }

    /// Recomputes the preview for a new pointer position.
    ///
    /// Non-finite positions are ignored.
    pub fn update(&mut self, pointer_x: Pixels) -> (TimeSec, TimeSec) {
        if pointer_x.is_finite() {
            self.delta_sec = geometry::delta_pixels_to_seconds(pointer_x - self.origin_x, self.zoom);
        }
        self.preview_range()
    }

    /// Clip range the timeline would have if the gesture were committed now
    pub fn preview_range(&self) -> (TimeSec, TimeSec) {
        trimmed_range(self.original_start, self.original_end, self.edge, self.delta_sec)
    }

    /// The single edit this gesture commits
    pub fn to_command(&self) -> TrimClipCommand {
        TrimClipCommand::new(&self.clip_id, self.edge, self.delta_sec)
    }
}

// =============================================================================
// Reorder
// =============================================================================

/// List drag of a clip within its track
#[derive(Clone, Debug, PartialEq)]
pub struct ReorderGesture {
    track_id: TrackId,
    active_clip_id: ClipId,
    over_clip_id: Option<ClipId>,
}

impl ReorderGesture {
    /// Starts dragging `active_clip_id`. Fails if it is not on an unlocked `track_id`.
    pub fn begin(timeline: &Timeline, track_id: &str, active_clip_id: &str) -> CoreResult<Self> {
        let track = timeline.require_track(track_id)?;
        track.ensure_unlocked()?;
        if track.clip_index(active_clip_id).is_none() {
            return Err(CoreError::ClipNotFound(active_clip_id.to_string()));
        }

        Ok(Self {
            track_id: track_id.to_string(),
            active_clip_id: active_clip_id.to_string(),
            over_clip_id: None,
        })
    }

    pub fn active_clip_id(&self) -> &str {
        &self.active_clip_id
    }

    pub fn over_clip_id(&self) -> Option<&str> {
        self.over_clip_id.as_deref()
    }

    /// Updates the drop target; `None` means the pointer is outside any clip.
    pub fn hover(&mut self, over_clip_id: Option<&str>) {
        self.over_clip_id = over_clip_id.map(str::to_string);
    }

    /// Clip order the track would have if dropped now
    pub fn preview_order(&self, timeline: &Timeline) -> Vec<ClipId> {
        let Some(track) = timeline.get_track(&self.track_id) else {
            return Vec::new();
        };
        let mut ids: Vec<ClipId> = track.clips.iter().map(|c| c.id.clone()).collect();
        if let Some(over) = &self.over_clip_id {
            let old_index = ids.iter().position(|id| id == &self.active_clip_id);
            let new_index = ids.iter().position(|id| id == over);
            if let (Some(old_index), Some(new_index)) = (old_index, new_index) {
                array_move(&mut ids, old_index, new_index);
            }
        }
        ids
    }

    /// The edit to commit, or `None` when there is no valid drop target
    pub fn to_command(&self) -> Option<ReorderClipCommand> {
        self.over_clip_id
            .as_ref()
            .map(|over| ReorderClipCommand::new(&self.track_id, &self.active_clip_id, over))
    }
}
