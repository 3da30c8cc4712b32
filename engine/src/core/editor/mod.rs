//! Editor Module
//!
//! Playhead, selection, drag gestures and the session that applies
//! commands on behalf of the host UI.

mod gesture;
mod session;
mod state;

pub use gesture::*;
pub use session::*;
pub use state::*;
