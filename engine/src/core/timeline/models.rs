//! Timeline Model Definitions
//!
//! Defines Timeline, Track, Clip and related types for timeline editing.
//! Clips are stored directly inside their owning track so a Timeline
//! snapshot is plain data that can be handed to a renderer or exporter.

use serde::{Deserialize, Serialize};

use crate::core::{new_id, AssetId, ClipId, Color, CoreError, CoreResult, TimeSec, TrackId};

/// Shortest duration a clip may have, in seconds.
pub const MIN_CLIP_DURATION: TimeSec = 0.1;

/// Earliest end time that keeps a clip starting at `start_time` at the floor.
///
/// `start_time + MIN_CLIP_DURATION` can round so the difference falls short
/// of the floor; the end is then nudged up one ulp at a time until it holds.
pub fn min_end_time(start_time: TimeSec) -> TimeSec {
    let mut end_time = start_time + MIN_CLIP_DURATION;
    while end_time - start_time < MIN_CLIP_DURATION {
        end_time = next_up(end_time);
    }
    end_time
}

/// Latest start time that keeps a clip ending at `end_time` at the floor.
///
/// Mirror of [`min_end_time`]; may be negative when `end_time` is itself
/// shorter than the floor, callers clamp to zero.
pub fn max_start_time(end_time: TimeSec) -> TimeSec {
    let mut start_time = end_time - MIN_CLIP_DURATION;
    while end_time - start_time < MIN_CLIP_DURATION {
        start_time = -next_up(-start_time);
    }
    start_time
}

/// Smallest representable value greater than `x` (non-finite values pass through).
fn next_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

// =============================================================================
// Timeline
// =============================================================================

/// Timeline (multi-track arrangement)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Tracks stored directly, top to bottom
    pub tracks: Vec<Track>,
    /// Overall duration, maintained by the host
    #[serde(default)]
    pub duration: TimeSec,
}

impl Timeline {
    /// Creates an empty timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a track to the timeline
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Gets a track by ID
    pub fn get_track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Gets a mutable track by ID
    pub fn get_track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    /// Gets a track by ID or fails with `TrackNotFound`
    pub fn require_track(&self, track_id: &str) -> CoreResult<&Track> {
        self.get_track(track_id)
            .ok_or_else(|| CoreError::TrackNotFound(track_id.to_string()))
    }

    /// Returns the index of a track
    pub fn track_index(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// Locates a clip, returning `(track_index, clip_index)`
    pub fn locate_clip(&self, clip_id: &str) -> Option<(usize, usize)> {
        self.tracks.iter().enumerate().find_map(|(t_idx, track)| {
            track.clip_index(clip_id).map(|c_idx| (t_idx, c_idx))
        })
    }

    /// Locates a clip or fails with `ClipNotFound`
    pub fn require_clip(&self, clip_id: &str) -> CoreResult<(usize, usize)> {
        self.locate_clip(clip_id)
            .ok_or_else(|| CoreError::ClipNotFound(clip_id.to_string()))
    }

    /// Gets a clip by ID, searching all tracks
    pub fn get_clip(&self, clip_id: &str) -> Option<&Clip> {
        self.locate_clip(clip_id)
            .map(|(t_idx, c_idx)| &self.tracks[t_idx].clips[c_idx])
    }

    /// Returns the track owning the given clip
    pub fn track_of_clip(&self, clip_id: &str) -> Option<&Track> {
        self.locate_clip(clip_id).map(|(t_idx, _)| &self.tracks[t_idx])
    }

    /// Iterates over every clip on the timeline
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.tracks.iter().flat_map(|t| t.clips.iter())
    }

    /// Returns the latest clip end time across all tracks
    pub fn content_end(&self) -> TimeSec {
        self.clips().map(|c| c.end_time).fold(0.0, f64::max)
    }

    /// Sets the duration explicitly (negative or non-finite values become 0)
    pub fn set_duration(&mut self, duration: TimeSec) {
        self.duration = if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        };
    }

    /// Grows the duration so it covers all clip content.
    ///
    /// Never shrinks the duration; hosts shrink it explicitly after removals.
    pub fn extend_duration_to_content(&mut self) {
        self.duration = self.duration.max(self.content_end());
    }

    /// Returns every overlapping clip pair, grouped by track
    pub fn overlaps(&self) -> Vec<ClipOverlap> {
        self.tracks.iter().flat_map(|t| t.find_overlaps()).collect()
    }
}

// =============================================================================
// Track
// =============================================================================

/// Track type/kind enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackKind {
    Video,
    Audio,
    Image,
}

/// Track (contains clips directly)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TrackKind,
    /// Clips in presentation order (not necessarily time order)
    pub clips: Vec<Clip>,
    pub locked: bool,
    pub visible: bool,
    /// Volume for audio-capable tracks (0.0 = muted, 1.0 = 100%)
    pub volume: f32,
    /// Volume to restore when unmuting.
    ///
    /// Session-local: not persisted and ignored by equality, so a saved and
    /// reloaded track compares equal to the live one.
    #[serde(skip)]
    pub(crate) volume_before_mute: Option<f32>,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.kind == other.kind
            && self.clips == other.clips
            && self.locked == other.locked
            && self.visible == other.visible
            && self.volume == other.volume
    }
}

impl Track {
    /// Creates a new track with the given name and kind
    pub fn new(name: &str, kind: TrackKind) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            kind,
            clips: vec![],
            locked: false,
            visible: true,
            volume: 1.0,
            volume_before_mute: None,
        }
    }

    /// Creates a new video track
    pub fn new_video(name: &str) -> Self {
        Self::new(name, TrackKind::Video)
    }

    /// Creates a new audio track
    pub fn new_audio(name: &str) -> Self {
        Self::new(name, TrackKind::Audio)
    }

    /// Creates a new image track
    pub fn new_image(name: &str) -> Self {
        Self::new(name, TrackKind::Image)
    }

    /// Replaces the generated ID (used when loading host projects)
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Adds a clip at the end of the track
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Removes a clip by ID
    pub fn remove_clip(&mut self, clip_id: &str) -> Option<Clip> {
        self.clip_index(clip_id).map(|pos| self.clips.remove(pos))
    }

    /// Gets a clip by ID
    pub fn get_clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Gets a mutable clip by ID
    pub fn get_clip_mut(&mut self, clip_id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// Returns the list position of a clip
    pub fn clip_index(&self, clip_id: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.id == clip_id)
    }

    /// Fails with `TrackLocked` when the track rejects clip edits
    pub fn ensure_unlocked(&self) -> CoreResult<()> {
        if self.locked {
            return Err(CoreError::TrackLocked(self.id.clone()));
        }
        Ok(())
    }

    /// Returns true if the track carries sound (mute applies)
    pub fn is_audio_capable(&self) -> bool {
        matches!(self.kind, TrackKind::Video | TrackKind::Audio)
    }

    /// Returns true if the track is muted (`volume == 0` on audio-capable tracks)
    pub fn is_muted(&self) -> bool {
        self.is_audio_capable() && self.volume == 0.0
    }

    /// Clips whose half-open range contains the given time, in list order
    pub fn clips_at(&self, time_sec: TimeSec) -> Vec<&Clip> {
        self.clips.iter().filter(|c| c.contains_time(time_sec)).collect()
    }

    /// Returns every pair of clips on this track that overlap in time
    pub fn find_overlaps(&self) -> Vec<ClipOverlap> {
        let mut found = Vec::new();
        for (i, a) in self.clips.iter().enumerate() {
            for b in &self.clips[i + 1..] {
                if a.overlaps(b) {
                    found.push(ClipOverlap {
                        track_id: self.id.clone(),
                        first_clip_id: a.id.clone(),
                        second_clip_id: b.id.clone(),
                        start_time: a.start_time.max(b.start_time),
                        end_time: a.end_time.min(b.end_time),
                    });
                }
            }
        }
        found
    }
}

/// Two clips on the same track sharing part of their time range
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipOverlap {
    pub track_id: TrackId,
    pub first_clip_id: ClipId,
    pub second_clip_id: ClipId,
    /// Start of the shared range
    pub start_time: TimeSec,
    /// End of the shared range
    pub end_time: TimeSec,
}

// =============================================================================
// Clip
// =============================================================================

/// Clip (asset reference placed on the timeline)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub asset_id: AssetId,
    /// Absolute start on the timeline (seconds)
    pub start_time: TimeSec,
    /// Absolute end on the timeline (seconds)
    pub end_time: TimeSec,
    /// Optional color for UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Optional label for organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Clip {
    /// Creates a new clip covering `[start_time, start_time + duration)`
    pub fn new(asset_id: &str, start_time: TimeSec, duration: TimeSec) -> Self {
        Self {
            id: new_id(),
            asset_id: asset_id.to_string(),
            start_time,
            end_time: start_time + duration,
            color: None,
            label: None,
        }
    }

    /// Creates a new clip from absolute start and end times
    pub fn with_range(asset_id: &str, start_time: TimeSec, end_time: TimeSec) -> Self {
        Self {
            end_time,
            ..Self::new(asset_id, start_time, 0.0)
        }
    }

    /// Replaces the generated ID (used when loading host projects)
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the presentation color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Creates a sibling clip with a fresh ID over a new range.
    ///
    /// Asset, color and label are inherited.
    pub fn derive(&self, start_time: TimeSec, end_time: TimeSec) -> Self {
        Self {
            id: new_id(),
            asset_id: self.asset_id.clone(),
            start_time,
            end_time,
            color: self.color.clone(),
            label: self.label.clone(),
        }
    }

    /// Returns the clip duration
    pub fn duration(&self) -> TimeSec {
        self.end_time - self.start_time
    }

    /// Checks if a time point is within `[start_time, end_time)`
    pub fn contains_time(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start_time && time_sec < self.end_time
    }

    /// Checks if a time point lies strictly inside the clip (a valid cut)
    pub fn can_split_at(&self, time_sec: TimeSec) -> bool {
        time_sec > self.start_time && time_sec < self.end_time
    }

    /// Checks if this clip overlaps with another (touching is not overlap)
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    /// Returns true if the clip respects the start and duration floor
    pub fn is_valid(&self) -> bool {
        self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.start_time >= 0.0
            && self.duration() >= MIN_CLIP_DURATION
    }
}

// =============================================================================
// Tests
// =============================================================================
