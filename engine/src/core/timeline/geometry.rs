//! Timeline Geometry
//!
//! Converts between timeline seconds and horizontal pixels.
//! Clip rendering and drag/trim math must both go through this module so
//! that visuals and edits stay in sync at every zoom level.

use serde::{Deserialize, Serialize};

use crate::core::{timeline::Clip, CoreError, CoreResult, Pixels, TimeSec};

/// Pixels per second at zoom 1.0.
pub const BASE_PIXELS_PER_SECOND: f64 = 100.0;

/// Default lower zoom bound
pub const DEFAULT_MIN_ZOOM: f64 = 0.5;

/// Default upper zoom bound
pub const DEFAULT_MAX_ZOOM: f64 = 2.0;

/// Validated zoom factor (finite and strictly positive)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Zoom(f64);

impl Zoom {
    /// Creates a zoom factor, rejecting non-positive or non-finite values
    pub fn new(value: f64) -> CoreResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "zoom must be finite and > 0, got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a zoom factor clamped into `[min, max]`.
    ///
    /// Non-finite input falls back to `min`. Bounds that are not finite,
    /// not positive or inverted are replaced by the default bounds.
    pub fn clamped(value: f64, min: f64, max: f64) -> Self {
        let bounds_valid = min.is_finite() && max.is_finite() && min > 0.0 && min <= max;
        let (min, max) = if bounds_valid {
            (min, max)
        } else {
            (DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
        };
        let value = if value.is_finite() { value } else { min };
        Self(value.clamp(min, max))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for Zoom {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Zoom> for f64 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

pub fn pixels_per_second(zoom: Zoom) -> f64 {
    BASE_PIXELS_PER_SECOND * zoom.value()
}

pub fn time_to_pixels(time: TimeSec, zoom: Zoom) -> Pixels {
    time * pixels_per_second(zoom)
}

pub fn pixels_to_time(px: Pixels, zoom: Zoom) -> TimeSec {
    px / pixels_per_second(zoom)
}

/// Converts a pointer movement into a signed time delta
pub fn delta_pixels_to_seconds(dx: Pixels, zoom: Zoom) -> TimeSec {
    pixels_to_time(dx, zoom)
}

/// Horizontal placement of a clip in the track lane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipGeometry {
    pub left: Pixels,
    pub width: Pixels,
}

impl ClipGeometry {
    pub fn right(&self) -> Pixels {
        self.left + self.width
    }
}

pub fn clip_geometry(clip: &Clip, zoom: Zoom) -> ClipGeometry {
    ClipGeometry {
        left: time_to_pixels(clip.start_time, zoom),
        width: time_to_pixels(clip.duration(), zoom),
    }
}
