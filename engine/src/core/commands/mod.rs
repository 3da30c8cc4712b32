//! Edit Command System
//!
//! Every timeline edit is a Command: it validates its parameters against the
//! current timeline and then mutates it, or fails leaving it untouched.

mod clip;
mod reorder;
mod track;
mod traits;

pub use clip::*;
pub(crate) use clip::locate_editable_clip;
pub use reorder::*;
pub use track::*;
pub use traits::*;
