//! Headless replay of a recorded frame trace
//!
//! A trace is a `frames` array. Each entry lists the keys held that frame and
//! the host's resolved frame (hero body, spider bodies and contacts, overlaps):
//!
//! ```toml
//! [[frames]]
//! keys = ["Right"]
//! dt = 0.016
//! coin_overlaps = [2]
//! hero = { position = { x = 40.0, y = 525.0 }, velocity = { x = 200.0, y = 0.0 }, touching = { down = true } }
//! ```

use anyhow::{bail, Context, Result};
use ledge_core::{EntityId, LedgeError};
use ledge_level::load_level;
use ledge_policy::{GameState, Host, ResolvedFrame, Session, Tuning};
use ledge_runtime::{GameEvent, InputState, Key};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

pub struct ReplayArgs {
    pub level: String,
    pub trace: String,
    pub format: String,
    pub tuning: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraceFile {
    #[serde(default)]
    frames: Vec<TraceFrame>,
}

#[derive(Debug, Deserialize)]
struct TraceFrame {
    #[serde(default)]
    keys: Vec<Key>,
    #[serde(flatten)]
    frame: ResolvedFrame,
}

/// One printed event in JSON output
#[derive(Serialize)]
struct EventLine<'a> {
    frame: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound: Option<&'static str>,
    /// Entity the host should despawn
    #[serde(skip_serializing_if = "Option::is_none")]
    removes: Option<EntityId>,
    #[serde(flatten)]
    event: &'a GameEvent,
}

/// Host that plays frames back from a trace file and prints what the policy decides
struct TraceHost {
    frames: VecDeque<TraceFrame>,
    pending: Option<ResolvedFrame>,
    frame_index: u64,
    json: bool,
}

impl<'a> EventLine<'a> {
    fn new(frame: u64, event: &'a GameEvent) -> Self {
        Self {
            frame,
            sound: event.sound_cue(),
            removes: event.removed_entity(),
            event,
        }
    }

    fn to_text(&self) -> String {
        let mut line = format!("frame {:>5}: {:?}", self.frame, self.event);
        if let Some(sound) = self.sound {
            line.push_str(&format!(" [{}]", sound));
        }
        if let Some(id) = self.removes {
            line.push_str(&format!(" (despawn {})", id));
        }
        line
    }
}

impl TraceHost {
    fn new(trace: TraceFile, json: bool) -> Self {
        Self {
            frames: trace.frames.into(),
            pending: None,
            frame_index: 0,
            json,
        }
    }
}

impl Host for TraceHost {
    fn poll_input(&mut self, input: &mut InputState) -> ledge_core::Result<()> {
        if let Some(entry) = self.frames.pop_front() {
            input.set_keys_down(entry.keys);
            self.pending = Some(entry.frame);
        }
        Ok(())
    }

    fn resolve_frame(&mut self, _state: &GameState) -> ledge_core::Result<Option<ResolvedFrame>> {
        Ok(self.pending.take())
    }

    fn apply(&mut self, _state: &GameState, events: &[GameEvent]) -> ledge_core::Result<()> {
        self.frame_index += 1;
        for event in events {
            let line = EventLine::new(self.frame_index, event);
            if self.json {
                let text = serde_json::to_string(&line)
                    .map_err(|e| LedgeError::HostError(e.to_string()))?;
                println!("{}", text);
            } else {
                println!("{}", line.to_text());
            }
        }
        Ok(())
    }
}

fn load_trace(path: &Path) -> Result<TraceFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace: {}", path.display()))?;
    let trace = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => bail!(
            "Unsupported trace extension for {}; expected .json or .toml",
            path.display()
        ),
    };
    Ok(trace)
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let level =
        load_level(&args.level).with_context(|| format!("Invalid level: {}", args.level))?;
    let trace = load_trace(Path::new(&args.trace))?;
    let tuning = match &args.tuning {
        Some(path) => Tuning::load_from_file(Path::new(path))
            .with_context(|| format!("Invalid tuning file: {}", path))?,
        None => Tuning::load().context("Failed to load tuning")?,
    };

    let json = args.format == "json";
    let frame_count = trace.frames.len();
    tracing::info!(level = %args.level, frames = frame_count, "replaying trace");
    let mut host = TraceHost::new(trace, json);
    let mut session = Session::new(level, tuning);
    let summary = session.run(&mut host)?;
    let hud = session.hud();

    if json {
        println!(
            "{}",
            serde_json::json!({ "summary": summary, "hud": hud })
        );
        return Ok(());
    }

    println!();
    println!("Replayed {} of {} frame(s)", summary.frames, frame_count);
    println!("  score          : {} ({})", summary.score, hud.score_text);
    println!("  restarts       : {}", summary.restarts);
    println!("  coins remaining: {}", summary.coins_remaining);
    println!(
        "  level complete : {}",
        if summary.completed { "yes" } else { "no" }
    );

    Ok(())
}
