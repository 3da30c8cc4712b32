//! Destructive and Edge Case Tests for the Timeline Engine
//!
//! These tests drive the commands with hostile inputs and sweeps of values
//! and check that the clip invariants and atomicity always hold.

use crate::core::commands::{
    apply, Command, DeleteClipCommand, DuplicateClipCommand, DuplicatePlacement,
    InsertClipCommand, MoveClipCommand, MoveClipToTrackCommand, ReorderClipCommand,
    RippleDeleteClipCommand, SplitClipCommand, TrimClipCommand, TrimEdge,
};
use crate::core::editor::EditorSession;
use crate::core::timeline::{
    geometry, min_end_time, Clip, Timeline, Track, Zoom, MIN_CLIP_DURATION,
};
use crate::core::CoreError;

const EPS: f64 = 1e-9;

fn create_test_timeline() -> Timeline {
    let mut timeline = Timeline::new();
    let mut video = Track::new_video("Video 1").with_id("v1");
    video.add_clip(Clip::with_range("a", 0.0, 10.0).with_id("c1"));
    video.add_clip(Clip::with_range("b", 10.0, 12.5).with_id("c2"));
    video.add_clip(Clip::with_range("c", 20.0, 20.1).with_id("c3"));
    let mut audio = Track::new_audio("Audio 1").with_id("a1");
    audio.add_clip(Clip::with_range("s", 1.0, 31.0).with_id("m1"));
    timeline.add_track(video);
    timeline.add_track(audio);
    timeline
}

fn assert_invariants(timeline: &Timeline) {
    for clip in timeline.clips() {
        assert!(clip.start_time >= 0.0, "negative start on {}", clip.id);
        assert!(
            clip.duration() >= MIN_CLIP_DURATION,
            "clip {} shorter than the floor: {}",
            clip.id,
            clip.duration()
        );
    }
}

fn sorted_ids(track: &Track) -> Vec<String> {
    let mut ids: Vec<String> = track.clips.iter().map(|c| c.id.clone()).collect();
    ids.sort();
    ids
}

#[test]
fn test_destructive_trim_sweep_keeps_invariants() {
    let deltas = [
        -1e9, -100.0, -10.0, -2.5, -0.11, -0.1, -0.05, 0.0, 0.05, 0.1, 9.85, 9.9, 10.0, 1e9,
    ];
    for id in ["c1", "c2", "c3", "m1"] {
        for edge in [TrimEdge::Start, TrimEdge::End] {
            for delta in deltas {
                let mut timeline = create_test_timeline();
                TrimClipCommand::new(id, edge, delta)
                    .execute(&mut timeline)
                    .unwrap();
                assert_invariants(&timeline);
            }
        }
    }
}

#[test]
fn test_destructive_trim_non_finite_delta() {
    for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut timeline = create_test_timeline();
        let before = timeline.clone();
        let result = TrimClipCommand::new("c1", TrimEdge::End, delta).execute(&mut timeline);
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert_eq!(timeline, before);
    }
}

#[test]
fn test_trim_left_edge_pins_at_floor() {
    for delta in [9.9, 9.95, 10.0, 50.0, 1e6] {
        let mut timeline = create_test_timeline();
        TrimClipCommand::new("c1", TrimEdge::Start, delta)
            .execute(&mut timeline)
            .unwrap();
        let clip = timeline.get_clip("c1").unwrap();
        assert_eq!(clip.end_time, 10.0);
        assert!((clip.duration() - MIN_CLIP_DURATION).abs() < EPS);
    }
}

#[test]
fn test_clamped_trims_hold_floor_without_tolerance() {
    let mut left_violations = Vec::new();
    let mut right_violations = Vec::new();

    for i in 0..20_000 {
        let t = 0.1 + i as f64 * 0.01;

        let mut timeline = Timeline::new();
        let mut track = Track::new_video("V").with_id("v");
        track.add_clip(Clip::with_range("a", 0.0, t).with_id("left"));
        track.add_clip(Clip::with_range("a", t, t + 5.0).with_id("right"));
        timeline.add_track(track);

        TrimClipCommand::new("left", TrimEdge::Start, 1e9)
            .execute(&mut timeline)
            .unwrap();
        TrimClipCommand::new("right", TrimEdge::End, -1e9)
            .execute(&mut timeline)
            .unwrap();

        let left = timeline.get_clip("left").unwrap();
        if left.duration() < MIN_CLIP_DURATION {
            left_violations.push((left.start_time, left.end_time));
        }
        let right = timeline.get_clip("right").unwrap();
        if right.duration() < MIN_CLIP_DURATION {
            right_violations.push((right.start_time, right.end_time));
        }
    }

    assert_eq!(left_violations, Vec::<(f64, f64)>::new());
    assert_eq!(right_violations, Vec::<(f64, f64)>::new());
}

#[test]
fn test_derived_ranges_hold_floor_without_tolerance() {
    for i in 0..2_000 {
        let start = 0.26 + i as f64 * 0.37;

        let mut timeline = Timeline::new();
        let mut track = Track::new_video("V").with_id("v");
        track.add_clip(Clip::with_range("a", 0.0, start).with_id("first"));
        track.add_clip(Clip::with_range("a", start, min_end_time(start)).with_id("min"));
        timeline.add_track(track);

        InsertClipCommand::new("v", "a", start, MIN_CLIP_DURATION)
            .execute(&mut timeline)
            .unwrap();
        DuplicateClipCommand::new("min").execute(&mut timeline).unwrap();
        MoveClipCommand::new("min", start * 1.5).execute(&mut timeline).unwrap();
        RippleDeleteClipCommand::new("first")
            .execute(&mut timeline)
            .unwrap();

        assert_invariants(&timeline);
    }
}

#[test]
fn test_trim_right_edge_short_clip_extends_normally() {
    let mut timeline = Timeline::new();
    let mut track = Track::new_video("V").with_id("v");
    track.add_clip(Clip::with_range("a", 2.0, 2.15).with_id("short"));
    timeline.add_track(track);

    TrimClipCommand::new("short", TrimEdge::End, 10.0)
        .execute(&mut timeline)
        .unwrap();

    let clip = timeline.get_clip("short").unwrap();
    assert_eq!(clip.start_time, 2.0);
    assert!((clip.end_time - 12.15).abs() < EPS);
}

#[test]
fn test_split_conservation_sweep() {
    let (s, e) = (0.0, 10.0);
    for t in [0.1, 0.5, 1.0, 3.3333, 4.0, 7.25, 9.8] {
        let mut timeline = create_test_timeline();
        let result = SplitClipCommand::new("c1", t).execute(&mut timeline).unwrap();

        let track = timeline.get_track("v1").unwrap();
        let a = &track.clips[0];
        let b = &track.clips[1];
        assert_eq!(a.start_time, s);
        assert_eq!(a.end_time, t);
        assert_eq!(b.start_time, t);
        assert_eq!(b.end_time, e);
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, "c1");
        assert_ne!(b.id, "c1");
        assert_eq!(result.deleted_ids, vec!["c1".to_string()]);
        assert_invariants(&timeline);
    }
}

#[test]
fn test_destructive_split_rejected_points() {
    // 10.0 - 9.9 is a hair under the floor.
    for t in [-1.0, 0.0, 0.05, 9.9, 9.95, 10.0, 10.5, f64::NAN, f64::INFINITY] {
        let mut timeline = create_test_timeline();
        let before = timeline.clone();
        let result = SplitClipCommand::new("c1", t).execute(&mut timeline);
        assert!(result.is_err(), "split at {t} should be rejected");
        assert_eq!(timeline, before);
    }
}

#[test]
fn test_split_of_minimum_clip_is_always_rejected() {
    let mut timeline = create_test_timeline();
    let result = SplitClipCommand::new("c3", 20.05).execute(&mut timeline);
    assert!(matches!(result, Err(CoreError::InvalidRange { .. })));
    assert_eq!(timeline.get_track("v1").unwrap().clips.len(), 3);
}

#[test]
fn test_lock_gating_is_byte_for_byte() {
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(TrimClipCommand::new("c2", TrimEdge::Start, 1.0)),
        Box::new(TrimClipCommand::new("c2", TrimEdge::End, -1.0)),
        Box::new(SplitClipCommand::new("c2", 11.0)),
        Box::new(DuplicateClipCommand::new("c2")),
        Box::new(DuplicateClipCommand::new("c2").with_placement(DuplicatePlacement::SamePosition)),
        Box::new(DeleteClipCommand::new("c2")),
        Box::new(RippleDeleteClipCommand::new("c1")),
        Box::new(ReorderClipCommand::new("v1", "c1", "c3")),
        Box::new(MoveClipToTrackCommand::new("c2", "a1")),
    ];

    for command in commands {
        let mut timeline = create_test_timeline();
        timeline.get_track_mut("v1").unwrap().locked = true;
        let before = serde_json::to_string(&timeline).unwrap();

        let result = command.execute(&mut timeline);

        assert!(
            matches!(result, Err(CoreError::TrackLocked(ref id)) if id == "v1"),
            "{} should be gated by the lock",
            command.type_name()
        );
        assert_eq!(serde_json::to_string(&timeline).unwrap(), before);
    }
}

#[test]
fn test_locked_destination_blocks_transfer() {
    let mut timeline = create_test_timeline();
    timeline.get_track_mut("a1").unwrap().locked = true;
    let before = timeline.clone();

    let result = MoveClipToTrackCommand::new("c1", "a1").execute(&mut timeline);

    assert!(matches!(result, Err(CoreError::TrackLocked(ref id)) if id == "a1"));
    assert_eq!(timeline, before);
}

#[test]
fn test_reorder_preserves_id_multiset() {
    let ids = ["c1", "c2", "c3"];
    for active in ids {
        for over in ids {
            let mut timeline = create_test_timeline();
            let before = sorted_ids(timeline.get_track("v1").unwrap());

            let result = ReorderClipCommand::new("v1", active, over)
                .execute(&mut timeline)
                .unwrap();

            let track = timeline.get_track("v1").unwrap();
            assert_eq!(sorted_ids(track), before);
            if active == over {
                assert!(result.is_noop());
            } else {
                let over_index = ids.iter().position(|id| *id == over);
                assert_eq!(track.clip_index(active), over_index);
            }
        }
    }
}

#[test]
fn test_reorder_does_not_touch_times() {
    let mut timeline = create_test_timeline();
    ReorderClipCommand::new("v1", "c3", "c1")
        .execute(&mut timeline)
        .unwrap();

    let c3 = timeline.get_clip("c3").unwrap();
    assert_eq!((c3.start_time, c3.end_time), (20.0, 20.1));
    assert_eq!(timeline.get_track("v1").unwrap().clips[0].id, "c3");
}

#[test]
fn test_geometry_round_trip_sweep() {
    for zoom in [0.01, 0.5, 0.75, 1.0, 1.3, 2.0, 37.5] {
        let zoom = Zoom::new(zoom).unwrap();
        for time in [0.0, 0.1, 1.0 / 3.0, 2.15, 12.15, 59.999, 3600.0] {
            let px = geometry::time_to_pixels(time, zoom);
            let back = geometry::pixels_to_time(px, zoom);
            assert!((back - time).abs() < 1e-9, "round trip failed at {time}@{zoom:?}");
        }
    }
}

#[test]
fn test_destructive_zoom_values() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(Zoom::new(bad).is_err());
    }
    assert!(serde_json::from_str::<Zoom>("0").is_err());
    assert_eq!(serde_json::from_str::<Zoom>("1.5").unwrap().value(), 1.5);
}

#[test]
fn test_pure_apply_leaves_input_untouched() {
    let timeline = create_test_timeline();
    let before = timeline.clone();

    let (next, result) = apply(&timeline, &SplitClipCommand::new("m1", 5.0)).unwrap();

    assert_eq!(timeline, before);
    assert_eq!(result.created_ids.len(), 2);
    assert_eq!(next.get_track("a1").unwrap().clips.len(), 2);
}

#[test]
fn test_session_survives_stale_references() {
    let mut session = EditorSession::new(create_test_timeline());
    session.select("c2");
    session.delete("c2").unwrap();

    // Every edit on the deleted clip is a silent no-op.
    assert!(session.trim("c2", TrimEdge::End, 1.0).unwrap().is_noop());
    assert!(session.split("c2", 11.0).unwrap().is_noop());
    assert!(session.duplicate("c2").unwrap().is_noop());
    assert!(session.delete("c2").unwrap().is_noop());
    assert!(session.reorder("v1", "c2", "c1").unwrap().is_noop());
    assert!(session.move_to_track("c2", "a1", None).unwrap().is_noop());
    assert!(session.set_track_volume("ghost", 0.3).unwrap().is_noop());
    assert_eq!(session.selected_clip_id(), None);
    assert_invariants(session.timeline());
}

#[test]
fn test_example_split_at_four() {
    let mut timeline = Timeline::new();
    let mut track = Track::new_video("V").with_id("v");
    track.add_clip(Clip::with_range("a", 0.0, 10.0).with_id("c1"));
    timeline.add_track(track);

    SplitClipCommand::new("c1", 4.0).execute(&mut timeline).unwrap();

    let clips = &timeline.tracks[0].clips;
    assert_eq!(clips.len(), 2);
    assert_eq!((clips[0].start_time, clips[0].end_time), (0.0, 4.0));
    assert_eq!((clips[1].start_time, clips[1].end_time), (4.0, 10.0));
    assert!(clips.iter().all(|c| c.id != "c1"));
}

#[test]
fn test_example_locked_delete() {
    let mut timeline = Timeline::new();
    let mut track = Track::new_video("V").with_id("v");
    track.add_clip(Clip::with_range("a", 0.0, 10.0).with_id("only"));
    track.locked = true;
    timeline.add_track(track);

    let result = DeleteClipCommand::new("only").execute(&mut timeline);

    assert!(matches!(result, Err(CoreError::TrackLocked(_))));
    assert_eq!(timeline.tracks[0].clips.len(), 1);
}

#[test]
fn test_destructive_deserialized_timeline_with_garbage_fields() {
    let json = r#"{
        "tracks": [{
            "id": "v",
            "name": "V",
            "type": "video",
            "clips": [{"id": "x", "assetId": "a", "startTime": 0, "endTime": 1, "extra": true}],
            "locked": false,
            "visible": true,
            "volume": 1.0,
            "unknown": [1, 2, 3]
        }]
    }"#;
    let timeline: Timeline = serde_json::from_str(json).unwrap();
    assert_eq!(timeline.duration, 0.0);
    assert_eq!(timeline.get_clip("x").unwrap().duration(), 1.0);
}
