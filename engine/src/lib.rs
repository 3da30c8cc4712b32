//! Video Studio Engine
//!
//! Non-linear timeline editing core: a multi-track Timeline of Clips,
//! the edit commands that mutate it (trim, split, duplicate, delete,
//! reorder, track controls), playhead and selection state, and the
//! time/pixel geometry shared by rendering and drag math.
//!
//! The engine is synchronous and holds no handles to the host. Every edit
//! is a [`core::commands::Command`] that either applies fully or leaves the
//! timeline untouched, and [`core::commands::apply`] offers the same edits
//! as a pure `(Timeline, command) -> Timeline` function for hosts that keep
//! their own history.

pub mod core;

pub use crate::core::{
    commands::{apply, Command, CommandResult, StateChange},
    editor::{EditorSession, EditorSnapshot},
    settings::{AppSettings, EditorSettings, SettingsManager},
    timeline::{Clip, Timeline, Track, TrackKind, Zoom, MIN_CLIP_DURATION},
    CoreError, CoreResult,
};
