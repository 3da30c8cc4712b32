//! Studio Core Type Definitions
//!
//! Defines fundamental types used throughout the engine.

use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Asset unique identifier (opaque, resolved by the host)
pub type AssetId = String;

/// Clip unique identifier (ULID)
pub type ClipId = String;

/// Track unique identifier
pub type TrackId = String;

/// Operation unique identifier (ULID)
pub type OpId = String;

/// Generates a fresh ULID string.
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Horizontal position in pixels
pub type Pixels = f64;

/// Returns true if the value is usable as an absolute timeline position.
pub fn is_valid_time_sec(value: TimeSec) -> bool {
    value.is_finite() && value >= 0.0
}

// =============================================================================
// Color
// =============================================================================

/// Color (RGBA). Presentation hint only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red (0.0 ~ 1.0)
    pub r: f32,
    /// Green (0.0 ~ 1.0)
    pub g: f32,
    /// Blue (0.0 ~ 1.0)
    pub b: f32,
    /// Alpha (0.0 ~ 1.0, optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f32>,
}

impl Color {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: None,
        }
    }

    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            a: Some(a.clamp(0.0, 1.0)),
            ..Self::rgb(r, g, b)
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    pub fn try_from_hex(hex: &str) -> Result<Self, String> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return Err(format!("Invalid hex color length: {}", hex.len()));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<f32, String> {
            let part = hex
                .get(range)
                .ok_or_else(|| "Invalid hex color".to_string())?;
            u8::from_str_radix(part, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| e.to_string())
        };

        let r = channel(0..2)?;
        let g = channel(2..4)?;
        let b = channel(4..6)?;
        if hex.len() == 8 {
            Ok(Self::rgba(r, g, b, channel(6..8)?))
        } else {
            Ok(Self::rgb(r, g, b))
        }
    }

    /// Formats as `#RRGGBB`, appending alpha when present.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let mut out = format!("#{:02X}{:02X}{:02X}", to_u8(self.r), to_u8(self.g), to_u8(self.b));
        if let Some(a) = self.a {
            out.push_str(&format!("{:02X}", to_u8(a)));
        }
        out
    }
}
