//! Studio CLI - headless host for the timeline engine.
//!
//! Loads a timeline JSON document, applies one edit through an
//! [`EditorSession`] and writes the resulting timeline back out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use studio_engine::core::{
    commands::{CommandResult, TrimEdge},
    editor::EditorSession,
    settings::{EditorSettings, SettingsManager},
    timeline::{geometry, ClipGeometry, ClipOverlap, Timeline},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the studio host.
#[derive(Parser, Debug)]
#[command(name = "studio-cli")]
#[command(version)]
#[command(about = "Apply timeline edits to a timeline JSON document")]
struct Cli {
    /// Settings file (defaults are used when omitted or missing)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Timeline input and output paths.
#[derive(Args, Debug)]
struct Io {
    /// Timeline JSON to read
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the edited timeline (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the timeline snapshot
    Inspect {
        #[arg(short, long)]
        input: PathBuf,

        /// Playhead position reported in the snapshot
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        time: f64,
    },

    /// Print the pixel placement of every clip
    Geometry {
        #[arg(short, long)]
        input: PathBuf,

        /// Zoom factor, clamped to the configured bounds
        #[arg(long)]
        zoom: Option<f64>,
    },

    /// List clips sharing time on the same track
    Overlaps {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Move the start or end edge of a clip
    Trim {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        clip: String,
        #[arg(long, value_enum)]
        edge: EdgeArg,
        /// Edge offset in seconds
        #[arg(
            long,
            conflicts_with = "dx",
            required_unless_present = "dx",
            allow_negative_numbers = true
        )]
        delta: Option<f64>,
        /// Edge offset in pixels, converted at `--zoom`
        #[arg(long, allow_hyphen_values = true)]
        dx: Option<f64>,
        #[arg(long, requires = "dx")]
        zoom: Option<f64>,
    },

    /// Cut a clip in two at a time
    Split {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        clip: String,
        /// Cut position in seconds
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
    },

    /// Copy a clip next to itself
    Duplicate {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        clip: String,
    },

    /// Remove a clip
    Delete {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        clip: String,
        /// Close the gap by shifting later clips left
        #[arg(long)]
        ripple: bool,
    },

    /// Drop one clip onto another's list position
    Reorder {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        track: String,
        #[arg(long)]
        active: String,
        #[arg(long)]
        over: String,
    },

    /// Transfer a clip to another track
    Move {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        clip: String,
        #[arg(long = "to-track")]
        to_track: String,
        /// List position in the destination track
        #[arg(long)]
        index: Option<usize>,
    },

    /// Lock or unlock a track
    Lock {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        track: String,
        /// Unlock instead
        #[arg(long)]
        off: bool,
    },

    /// Show or hide a track
    Visible {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        track: String,
        /// Hide instead
        #[arg(long)]
        off: bool,
    },

    /// Set a track's volume
    Volume {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        track: String,
        #[arg(long, allow_negative_numbers = true)]
        value: f32,
    },

    /// Toggle mute on an audio-capable track
    Mute {
        #[command(flatten)]
        io: Io,
        #[arg(long)]
        track: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeArg {
    Start,
    End,
}

impl From<EdgeArg> for TrimEdge {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Start => TrimEdge::Start,
            EdgeArg::End => TrimEdge::End,
        }
    }
}

/// Result of an edit, printed when the timeline goes to a file.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditOutput<'a> {
    result: &'a CommandResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeline: Option<&'a Timeline>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClipPlacement<'a> {
    track_id: &'a str,
    clip_id: &'a str,
    #[serde(flatten)]
    geometry: ClipGeometry,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_settings(path: Option<&Path>) -> Result<EditorSettings> {
    let Some(path) = path else {
        return Ok(EditorSettings::default());
    };
    let settings = SettingsManager::load_from(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))?;
    Ok(settings.editor)
}

fn load_timeline(path: &Path) -> Result<Timeline> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline {}", path.display()))?;
    let timeline = serde_json::from_str(&json)
        .with_context(|| format!("invalid timeline JSON in {}", path.display()))?;
    debug!(path = %path.display(), "Loaded timeline");
    Ok(timeline)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_session(input: &Path, settings: &EditorSettings) -> Result<EditorSession> {
    Ok(EditorSession::with_settings(
        load_timeline(input)?,
        settings.clone(),
    ))
}

/// Writes the edited timeline and reports the command result.
fn finish_edit(session: &EditorSession, io: &Io, result: &CommandResult) -> Result<()> {
    if result.is_noop() {
        info!("Edit made no changes");
    }

    match &io.output {
        Some(path) => {
            let json = serde_json::to_string_pretty(session.timeline())?;
            fs::write(path, json)
                .with_context(|| format!("failed to write timeline {}", path.display()))?;
            info!(path = %path.display(), changes = result.changes.len(), "Wrote timeline");
            print_json(&EditOutput {
                result,
                timeline: None,
            })
        }
        None => print_json(&EditOutput {
            result,
            timeline: Some(session.timeline()),
        }),
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.settings.as_deref())?;

    let (session, io, result) = match cli.command {
        Command::Inspect { input, time } => {
            let mut session = open_session(&input, &settings)?;
            session.set_current_time(time)?;
            return print_json(&session.snapshot());
        }
        Command::Geometry { input, zoom } => {
            let mut session = open_session(&input, &settings)?;
            if let Some(zoom) = zoom {
                session.set_zoom(zoom);
            }
            let zoom = session.zoom();
            let placements: Vec<ClipPlacement> = session
                .timeline()
                .tracks
                .iter()
                .flat_map(|track| {
                    track.clips.iter().map(move |clip| ClipPlacement {
                        track_id: &track.id,
                        clip_id: &clip.id,
                        geometry: geometry::clip_geometry(clip, zoom),
                    })
                })
                .collect();
            return print_json(&placements);
        }
        Command::Overlaps { input } => {
            let session = open_session(&input, &settings)?;
            let overlaps: Vec<ClipOverlap> = session.overlaps();
            return print_json(&overlaps);
        }
        Command::Trim {
            io,
            clip,
            edge,
            delta,
            dx,
            zoom,
        } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = match (delta, dx) {
                (Some(delta), _) => session.trim(&clip, edge.into(), delta)?,
                (None, Some(dx)) => {
                    if let Some(zoom) = zoom {
                        session.set_zoom(zoom);
                    }
                    // Replays a pointer drag from x=0 to x=dx.
                    if !session.begin_trim(&clip, edge.into(), 0.0)? {
                        CommandResult::new()
                    } else {
                        session.update_trim(dx);
                        session.commit_gesture()?
                    }
                }
                (None, None) => bail!("either --delta or --dx is required"),
            };
            (session, io, result)
        }
        Command::Split { io, clip, at } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.split(&clip, at)?;
            (session, io, result)
        }
        Command::Duplicate { io, clip } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.duplicate(&clip)?;
            (session, io, result)
        }
        Command::Delete { io, clip, ripple } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = if ripple {
                session.ripple_delete(&clip)?
            } else {
                session.delete(&clip)?
            };
            (session, io, result)
        }
        Command::Reorder {
            io,
            track,
            active,
            over,
        } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.reorder(&track, &active, &over)?;
            (session, io, result)
        }
        Command::Move {
            io,
            clip,
            to_track,
            index,
        } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.move_to_track(&clip, &to_track, index)?;
            (session, io, result)
        }
        Command::Lock { io, track, off } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.set_track_locked(&track, !off)?;
            (session, io, result)
        }
        Command::Visible { io, track, off } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.set_track_visible(&track, !off)?;
            (session, io, result)
        }
        Command::Volume { io, track, value } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.set_track_volume(&track, value)?;
            (session, io, result)
        }
        Command::Mute { io, track } => {
            let mut session = open_session(&io.input, &settings)?;
            let result = session.toggle_track_mute(&track)?;
            (session, io, result)
        }
    };

    finish_edit(&session, &io, &result)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
