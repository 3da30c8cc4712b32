//! Editor Session
//!
//! Owns one Timeline together with its playhead, selection, zoom and the
//! in-flight drag gesture. All edits from the host UI go through here so
//! the selection stays consistent and stale references are recovered.

use tracing::{debug, warn};

use crate::core::{
    commands::{
        Command, CommandResult, DeleteClipCommand, DuplicateClipCommand, InsertClipCommand,
        MoveClipCommand, MoveClipToTrackCommand, ReorderClipCommand, RippleDeleteClipCommand,
        SetTrackLockedCommand, SetTrackVisibleCommand, SetTrackVolumeCommand, SplitClipCommand,
        ToggleTrackMuteCommand, TrimClipCommand, TrimEdge,
    },
    editor::{EditorSnapshot, Gesture, Playhead, ReorderGesture, Selection, TrimGesture},
    settings::EditorSettings,
    timeline::{geometry, Clip, ClipGeometry, ClipOverlap, Timeline, Zoom},
    ClipId, CoreError, CoreResult, Pixels, TimeSec,
};

/// Editing state for a single timeline
#[derive(Clone, Debug)]
pub struct EditorSession {
    timeline: Timeline,
    playhead: Playhead,
    selection: Selection,
    zoom: Zoom,
    settings: EditorSettings,
    gesture: Option<Gesture>,
}

impl EditorSession {
    /// Creates a session with default editor settings
    pub fn new(timeline: Timeline) -> Self {
        Self::with_settings(timeline, EditorSettings::default())
    }

    /// Creates a session; out-of-range settings are repaired first.
    pub fn with_settings(timeline: Timeline, mut settings: EditorSettings) -> Self {
        settings.normalize();
        Self {
            timeline,
            playhead: Playhead::default(),
            selection: Selection::default(),
            zoom: settings.initial_zoom(),
            settings,
            gesture: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn current_time(&self) -> TimeSec {
        self.playhead.current_time()
    }

    pub fn selected_clip_id(&self) -> Option<&str> {
        self.selection.clip_id()
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.selection
            .clip_id()
            .and_then(|id| self.timeline.get_clip(id))
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn active_gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Plain-data view for the host
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            timeline: self.timeline.clone(),
            selected_clip_id: self.selection.clip_id().map(str::to_string),
            current_time: self.playhead.current_time(),
            zoom: self.zoom.value(),
        }
    }

    /// Overlapping clip pairs, for host warnings
    pub fn overlaps(&self) -> Vec<ClipOverlap> {
        self.timeline.overlaps()
    }

    /// Grows the timeline duration to cover its content
    pub fn sync_duration(&mut self) {
        self.timeline.extend_duration_to_content();
    }

    // =========================================================================
    // Command execution
    // =========================================================================

    /// Executes a command against the timeline.
    ///
    /// A missing clip or track is logged and treated as a no-op. Every other
    /// error is returned with the timeline unchanged.
    pub fn execute(&mut self, command: &dyn Command) -> CoreResult<CommandResult> {
        match command.execute(&mut self.timeline) {
            Ok(result) => {
                debug!(
                    command = command.type_name(),
                    op_id = %result.op_id,
                    changes = result.changes.len(),
                    "Executed command"
                );
                if self.selection.prune(&self.timeline) {
                    debug!("Selected clip removed, selection cleared");
                }
                Ok(result)
            }
            Err(err) if err.is_not_found() => {
                warn!(
                    command = command.type_name(),
                    params = %command.to_json(),
                    error = %err,
                    "Ignoring edit on missing target"
                );
                Ok(CommandResult::new())
            }
            Err(err) => {
                warn!(
                    command = command.type_name(),
                    error = %err,
                    "Command rejected"
                );
                Err(err)
            }
        }
    }

    // =========================================================================
    // Clip operations
    // =========================================================================

    pub fn trim(&mut self, clip_id: &str, edge: TrimEdge, delta_sec: TimeSec) -> CoreResult<CommandResult> {
        self.execute(&TrimClipCommand::new(clip_id, edge, delta_sec))
    }

    pub fn split(&mut self, clip_id: &str, split_at: TimeSec) -> CoreResult<CommandResult> {
        self.execute(&SplitClipCommand::new(clip_id, split_at))
    }

    /// Splits the selected clip at the playhead
    pub fn split_at_playhead(&mut self) -> CoreResult<CommandResult> {
        let clip_id = self
            .selection
            .clip_id()
            .map(str::to_string)
            .ok_or_else(|| CoreError::ValidationError("no clip selected".to_string()))?;
        let at = self.playhead.current_time();
        self.split(&clip_id, at)
    }

    /// Duplicates a clip using the configured placement
    pub fn duplicate(&mut self, clip_id: &str) -> CoreResult<CommandResult> {
        let command =
            DuplicateClipCommand::new(clip_id).with_placement(self.settings.duplicate_placement);
        self.execute(&command)
    }

    pub fn delete(&mut self, clip_id: &str) -> CoreResult<CommandResult> {
        self.execute(&DeleteClipCommand::new(clip_id))
    }

    pub fn ripple_delete(&mut self, clip_id: &str) -> CoreResult<CommandResult> {
        self.execute(&RippleDeleteClipCommand::new(clip_id))
    }

    pub fn insert_clip(
        &mut self,
        track_id: &str,
        asset_id: &str,
        start_time: TimeSec,
        duration: TimeSec,
    ) -> CoreResult<CommandResult> {
        self.execute(&InsertClipCommand::new(track_id, asset_id, start_time, duration))
    }

    pub fn move_clip(&mut self, clip_id: &str, new_start: TimeSec) -> CoreResult<CommandResult> {
        self.execute(&MoveClipCommand::new(clip_id, new_start))
    }

    pub fn reorder(
        &mut self,
        track_id: &str,
        active_clip_id: &str,
        over_clip_id: &str,
    ) -> CoreResult<CommandResult> {
        self.execute(&ReorderClipCommand::new(track_id, active_clip_id, over_clip_id))
    }

    pub fn move_to_track(
        &mut self,
        clip_id: &str,
        dest_track_id: &str,
        index: Option<usize>,
    ) -> CoreResult<CommandResult> {
        let command = MoveClipToTrackCommand::new(clip_id, dest_track_id);
        let command = match index {
            Some(index) => command.at_index(index),
            None => command,
        };
        self.execute(&command)
    }

    // =========================================================================
    // Track controls
    // =========================================================================

    pub fn set_track_locked(&mut self, track_id: &str, locked: bool) -> CoreResult<CommandResult> {
        self.execute(&SetTrackLockedCommand::new(track_id, locked))
    }

    pub fn set_track_visible(&mut self, track_id: &str, visible: bool) -> CoreResult<CommandResult> {
        self.execute(&SetTrackVisibleCommand::new(track_id, visible))
    }

    pub fn set_track_volume(&mut self, track_id: &str, volume: f32) -> CoreResult<CommandResult> {
        self.execute(&SetTrackVolumeCommand::new(track_id, volume))
    }

    pub fn toggle_track_mute(&mut self, track_id: &str) -> CoreResult<CommandResult> {
        let command =
            ToggleTrackMuteCommand::new(track_id).with_restore_volume(self.settings.restore_volume);
        self.execute(&command)
    }

    // =========================================================================
    // Playhead & selection
    // =========================================================================

    pub fn set_current_time(&mut self, time_sec: TimeSec) -> CoreResult<()> {
        self.playhead.seek(time_sec)
    }

    /// Selects a clip. Returns false (and keeps the old selection) if it does not exist.
    pub fn select(&mut self, clip_id: &str) -> bool {
        match self.selection.select(&self.timeline, clip_id) {
            Ok(()) => true,
            Err(err) => {
                warn!(clip_id, error = %err, "Ignoring selection of missing clip");
                false
            }
        }
    }

    pub fn deselect(&mut self) {
        self.selection.clear();
    }

    /// Whether splitting `clip_id` at the playhead would succeed
    pub fn can_split(&self, clip_id: &str) -> bool {
        let Some((track_idx, clip_idx)) = self.timeline.locate_clip(clip_id) else {
            return false;
        };
        let track = &self.timeline.tracks[track_idx];
        let clip = &track.clips[clip_idx];
        let at = self.playhead.current_time();

        !track.locked
            && clip.can_split_at(at)
            && clip.derive(clip.start_time, at).is_valid()
            && clip.derive(at, clip.end_time).is_valid()
    }

    pub fn can_split_selected(&self) -> bool {
        self.selection
            .clip_id()
            .is_some_and(|id| self.can_split(id))
    }

    /// Clips on a track covering `time_sec`; empty if the track is missing
    pub fn clips_at(&self, track_id: &str, time_sec: TimeSec) -> Vec<&Clip> {
        self.timeline
            .get_track(track_id)
            .map(|t| t.clips_at(time_sec))
            .unwrap_or_default()
    }

    pub fn clips_at_playhead(&self, track_id: &str) -> Vec<&Clip> {
        self.clips_at(track_id, self.playhead.current_time())
    }

    // =========================================================================
    // Zoom & geometry
    // =========================================================================

    /// Sets the zoom, clamped into the configured bounds
    pub fn set_zoom(&mut self, value: f64) -> Zoom {
        self.zoom = self.settings.clamp_zoom(value);
        self.zoom
    }

    pub fn zoom_in(&mut self) -> Zoom {
        self.set_zoom(self.zoom.value() + self.settings.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Zoom {
        self.set_zoom(self.zoom.value() - self.settings.zoom_step)
    }

    pub fn clip_geometry(&self, clip_id: &str) -> Option<ClipGeometry> {
        self.timeline
            .get_clip(clip_id)
            .map(|clip| geometry::clip_geometry(clip, self.zoom))
    }

    /// Timeline time under a horizontal pixel position (never negative)
    pub fn time_at_pixel(&self, x: Pixels) -> TimeSec {
        geometry::pixels_to_time(x, self.zoom).max(0.0)
    }

    /// Moves the playhead to the time under a pixel position
    pub fn seek_to_pixel(&mut self, x: Pixels) -> CoreResult<()> {
        let time = self.time_at_pixel(x);
        self.playhead.seek(time)
    }

    // =========================================================================
    // Gestures
    // =========================================================================

    fn ensure_no_gesture(&self) -> CoreResult<()> {
        if self.gesture.is_some() {
            return Err(CoreError::ValidationError(
                "another drag gesture is already in progress".to_string(),
            ));
        }
        Ok(())
    }

    /// Starts an edge drag. Returns false if the clip no longer exists.
    pub fn begin_trim(&mut self, clip_id: &str, edge: TrimEdge, pointer_x: Pixels) -> CoreResult<bool> {
        self.ensure_no_gesture()?;
        match TrimGesture::begin(&self.timeline, clip_id, edge, pointer_x, self.zoom) {
            Ok(gesture) => {
                debug!(clip_id, ?edge, "Trim gesture started");
                self.gesture = Some(Gesture::Trim(gesture));
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                warn!(clip_id, error = %err, "Ignoring trim on missing clip");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Feeds a pointer move to the active trim and returns the preview range
    pub fn update_trim(&mut self, pointer_x: Pixels) -> Option<(TimeSec, TimeSec)> {
        match &mut self.gesture {
            Some(Gesture::Trim(gesture)) => Some(gesture.update(pointer_x)),
            _ => None,
        }
    }

    /// Starts a list drag. Returns false if the clip or track no longer exists.
    pub fn begin_reorder(&mut self, track_id: &str, clip_id: &str) -> CoreResult<bool> {
        self.ensure_no_gesture()?;
        match ReorderGesture::begin(&self.timeline, track_id, clip_id) {
            Ok(gesture) => {
                debug!(track_id, clip_id, "Reorder gesture started");
                self.gesture = Some(Gesture::Reorder(gesture));
                Ok(true)
            }
            Err(err) if err.is_not_found() => {
                warn!(track_id, clip_id, error = %err, "Ignoring drag of missing clip");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Updates the drop target of the active reorder and returns the preview order
    pub fn hover_reorder(&mut self, over_clip_id: Option<&str>) -> Option<Vec<ClipId>> {
        match &mut self.gesture {
            Some(Gesture::Reorder(gesture)) => {
                gesture.hover(over_clip_id);
                Some(gesture.preview_order(&self.timeline))
            }
            _ => None,
        }
    }

    /// Commits the active gesture as a single edit.
    ///
    /// A reorder dropped outside any clip commits nothing.
    pub fn commit_gesture(&mut self) -> CoreResult<CommandResult> {
        match self.gesture.take() {
            Some(Gesture::Trim(gesture)) => self.execute(&gesture.to_command()),
            Some(Gesture::Reorder(gesture)) => match gesture.to_command() {
                Some(command) => self.execute(&command),
                None => {
                    debug!("Reorder dropped outside a target, nothing committed");
                    Ok(CommandResult::new())
                }
            },
            None => Ok(CommandResult::new()),
        }
    }

    /// Abandons the active gesture; the timeline is left as it was.
    pub fn cancel_gesture(&mut self) {
        if self.gesture.take().is_some() {
            debug!("Gesture cancelled");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        commands::DuplicatePlacement,
        timeline::{Track, MIN_CLIP_DURATION},
    };

    fn create_session() -> EditorSession {
        let mut timeline = Timeline::new();
        let mut video = Track::new_video("Video 1").with_id("v1");
        video.add_clip(Clip::with_range("intro", 0.0, 10.0).with_id("c1"));
        video.add_clip(Clip::with_range("body", 10.0, 20.0).with_id("c2"));
        let mut music = Track::new_audio("Music").with_id("a1");
        music.add_clip(Clip::with_range("song", 0.0, 30.0).with_id("m1"));
        timeline.add_track(video);
        timeline.add_track(music);
        EditorSession::new(timeline)
    }

    #[test]
    fn test_split_at_playhead() {
        let mut session = create_session();
        session.select("c1");
        session.set_current_time(4.0).unwrap();
        assert!(session.can_split_selected());

        let result = session.split_at_playhead().unwrap();

        assert_eq!(result.created_ids.len(), 2);
        // The old id is stale, so the selection is gone.
        assert_eq!(session.selected_clip_id(), None);
        let track = session.timeline().get_track("v1").unwrap();
        assert_eq!(track.clips[0].end_time, 4.0);
        assert_eq!(track.clips[1].start_time, 4.0);
    }

    #[test]
    fn test_split_at_playhead_requires_selection() {
        let mut session = create_session();
        assert!(matches!(
            session.split_at_playhead(),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn test_can_split_tracks_playhead_and_lock() {
        let mut session = create_session();
        session.set_current_time(10.0).unwrap();
        assert!(!session.can_split("c1"));
        assert!(!session.can_split("c2"));

        session.set_current_time(12.0).unwrap();
        assert!(session.can_split("c2"));

        session.set_current_time(10.05).unwrap();
        assert!(!session.can_split("c2"));

        session.set_current_time(12.0).unwrap();
        session.set_track_locked("v1", true).unwrap();
        assert!(!session.can_split("c2"));
        assert!(!session.can_split("ghost"));
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut session = create_session();
        assert!(session.select("c2"));
        session.delete("c2").unwrap();
        assert_eq!(session.selected_clip_id(), None);
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut session = create_session();
        session.select("c2");
        session.delete("c1").unwrap();
        assert_eq!(session.selected_clip_id(), Some("c2"));
    }

    #[test]
    fn test_select_missing_clip_keeps_previous() {
        let mut session = create_session();
        session.select("c1");
        assert!(!session.select("ghost"));
        assert_eq!(session.selected_clip_id(), Some("c1"));
        session.deselect();
        assert!(session.selected_clip().is_none());
    }

    #[test]
    fn test_missing_target_is_recovered_as_noop() {
        let mut session = create_session();
        let before = session.timeline().clone();

        let result = session.trim("ghost", TrimEdge::End, 1.0).unwrap();
        assert!(result.is_noop());
        let result = session.reorder("nope", "c1", "c2").unwrap();
        assert!(result.is_noop());
        assert_eq!(session.timeline(), &before);
    }

    #[test]
    fn test_locked_delete_reports_error() {
        let mut session = create_session();
        session.set_track_locked("a1", true).unwrap();

        let result = session.delete("m1");

        assert!(matches!(result, Err(CoreError::TrackLocked(_))));
        assert_eq!(session.timeline().get_track("a1").unwrap().clips.len(), 1);
    }

    #[test]
    fn test_duplicate_uses_settings_placement() {
        let settings = EditorSettings {
            duplicate_placement: DuplicatePlacement::SamePosition,
            ..EditorSettings::default()
        };
        let mut session = EditorSession::with_settings(create_session().into_timeline(), settings);

        let result = session.duplicate("c2").unwrap();
        let copy = session.timeline().get_clip(&result.created_ids[0]).unwrap();
        assert_eq!((copy.start_time, copy.end_time), (10.0, 20.0));
    }

    #[test]
    fn test_toggle_mute_via_session() {
        let mut session = create_session();
        session.toggle_track_mute("a1").unwrap();
        assert!(session.timeline().get_track("a1").unwrap().is_muted());
        session.toggle_track_mute("a1").unwrap();
        assert_eq!(session.timeline().get_track("a1").unwrap().volume, 1.0);
    }

    #[test]
    fn test_inverted_zoom_settings_are_repaired() {
        let settings = EditorSettings {
            default_zoom: 5.0,
            min_zoom: 3.0,
            max_zoom: 1.0,
            ..EditorSettings::default()
        };
        let mut session = EditorSession::with_settings(Timeline::new(), settings);

        assert_eq!(session.settings().min_zoom, 1.0);
        assert_eq!(session.settings().max_zoom, 3.0);
        assert_eq!(session.zoom().value(), 3.0);
        assert_eq!(session.set_zoom(0.2).value(), 1.0);
    }

    #[test]
    fn test_non_positive_zoom_settings_are_repaired() {
        let settings = EditorSettings {
            min_zoom: -1.0,
            max_zoom: -0.5,
            ..EditorSettings::default()
        };
        let mut session = EditorSession::with_settings(Timeline::new(), settings);

        assert!(session.zoom().value() > 0.0);
        assert!(session.set_zoom(-10.0).value() > 0.0);
        assert!(session.time_at_pixel(100.0) > 0.0);
    }

    #[test]
    fn test_zoom_is_clamped_by_settings() {
        let mut session = create_session();
        assert_eq!(session.zoom().value(), 1.0);
        assert_eq!(session.set_zoom(9.0).value(), 2.0);
        assert_eq!(session.set_zoom(-3.0).value(), 0.5);

        session.set_zoom(1.0);
        assert!((session.zoom_in().value() - 1.1).abs() < 1e-12);
        session.zoom_out();
        assert!((session.zoom().value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_geometry_helpers_share_zoom() {
        let mut session = create_session();
        session.set_zoom(2.0);

        let geometry = session.clip_geometry("c2").unwrap();
        assert_eq!(geometry.left, 2000.0);
        assert_eq!(geometry.width, 2000.0);

        session.seek_to_pixel(500.0).unwrap();
        assert_eq!(session.current_time(), 2.5);
        assert_eq!(session.time_at_pixel(-40.0), 0.0);
    }

    #[test]
    fn test_trim_gesture_commits_once() {
        let mut session = create_session();
        assert!(session.begin_trim("c1", TrimEdge::End, 1000.0).unwrap());

        let before = session.timeline().clone();
        assert_eq!(session.update_trim(1200.0), Some((0.0, 12.0)));
        assert_eq!(session.update_trim(1100.0), Some((0.0, 11.0)));
        // Nothing is applied while dragging.
        assert_eq!(session.timeline(), &before);

        session.commit_gesture().unwrap();
        assert_eq!(session.timeline().get_clip("c1").unwrap().end_time, 11.0);
        assert!(session.active_gesture().is_none());
    }

    #[test]
    fn test_trim_gesture_cancel_restores_nothing_changed() {
        let mut session = create_session();
        let before = session.timeline().clone();

        session.begin_trim("c1", TrimEdge::Start, 0.0).unwrap();
        session.update_trim(-5000.0);
        session.update_trim(99_999.0);
        session.cancel_gesture();

        assert_eq!(session.timeline(), &before);
        assert!(session.commit_gesture().unwrap().is_noop());
    }

    #[test]
    fn test_trim_gesture_clamps_on_commit() {
        let mut session = create_session();
        session.begin_trim("c1", TrimEdge::Start, 0.0).unwrap();
        session.update_trim(50_000.0);
        session.commit_gesture().unwrap();

        let c1 = session.timeline().get_clip("c1").unwrap();
        assert!((c1.duration() - MIN_CLIP_DURATION).abs() < 1e-9);
    }

    #[test]
    fn test_only_one_gesture_at_a_time() {
        let mut session = create_session();
        session.begin_trim("c1", TrimEdge::End, 0.0).unwrap();
        assert!(session.begin_reorder("v1", "c2").is_err());
        session.cancel_gesture();
        assert!(session.begin_reorder("v1", "c2").unwrap());
    }

    #[test]
    fn test_gesture_on_locked_track_is_rejected() {
        let mut session = create_session();
        session.set_track_locked("v1", true).unwrap();
        assert!(matches!(
            session.begin_trim("c1", TrimEdge::End, 0.0),
            Err(CoreError::TrackLocked(_))
        ));
        assert!(session.active_gesture().is_none());
    }

    #[test]
    fn test_gesture_on_missing_clip_does_not_start() {
        let mut session = create_session();
        assert!(!session.begin_trim("ghost", TrimEdge::End, 0.0).unwrap());
        assert!(session.update_trim(10.0).is_none());
    }

    #[test]
    fn test_reorder_gesture_drop_and_cancel() {
        let mut session = create_session();

        session.begin_reorder("v1", "c1").unwrap();
        assert_eq!(
            session.hover_reorder(Some("c2")),
            Some(vec!["c2".to_string(), "c1".to_string()])
        );
        session.hover_reorder(None);
        assert!(session.commit_gesture().unwrap().is_noop());

        session.begin_reorder("v1", "c1").unwrap();
        session.hover_reorder(Some("c2"));
        session.commit_gesture().unwrap();
        let ids: Vec<&str> = session.timeline().tracks[0]
            .clips
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c2", "c1"]);
    }

    #[test]
    fn test_clip_deleted_mid_drag_commits_noop() {
        let mut session = create_session();
        session.begin_trim("c2", TrimEdge::End, 0.0).unwrap();
        session.update_trim(300.0);
        session.delete("c2").unwrap();

        let result = session.commit_gesture().unwrap();
        assert!(result.is_noop());
    }

    #[test]
    fn test_snapshot_is_plain_data() {
        let mut session = create_session();
        session.select("m1");
        session.set_current_time(3.5).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["selectedClipId"], "m1");
        assert_eq!(json["currentTime"], 3.5);
        assert_eq!(json["zoom"], 1.0);
        assert_eq!(json["timeline"]["tracks"][0]["clips"][1]["id"], "c2");
    }

    #[test]
    fn test_sync_duration_and_overlaps() {
        let mut session = create_session();
        session.sync_duration();
        assert_eq!(session.timeline().duration, 30.0);

        session.move_clip("c2", 5.0).unwrap();
        let overlaps = session.overlaps();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].track_id, "v1");
    }

    #[test]
    fn test_clips_at_playhead() {
        let mut session = create_session();
        session.set_current_time(15.0).unwrap();
        let hits = session.clips_at_playhead("v1");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "c2");
        assert!(session.clips_at_playhead("missing").is_empty());

        // Clip ranges are half-open.
        let hits = session.clips_at("v1", 10.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "c2");
        assert!(session.clips_at("v1", 20.0).is_empty());
    }
}
