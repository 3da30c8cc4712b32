//! Timeline Module
//!
//! Timeline data model and time/pixel geometry.

pub mod geometry;
mod models;

pub use geometry::{ClipGeometry, Zoom, BASE_PIXELS_PER_SECOND};
pub use models::*;
