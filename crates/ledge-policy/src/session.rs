//! Session: owns the game state between frames and drives a host

use crate::frame::ResolvedFrame;
use crate::host::Host;
use crate::hud::HudState;
use crate::policy::step;
use crate::state::GameState;
use crate::tuning::Tuning;
use ledge_core::Result;
use ledge_level::Level;
use ledge_runtime::{GameEvent, InputState};
use serde::Serialize;

/// Totals reported when a run ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub score: u32,
    pub restarts: u32,
    pub coins_remaining: usize,
    pub completed: bool,
}

/// The single owner of the game state
pub struct Session {
    level: Level,
    tuning: Tuning,
    state: GameState,
    input: InputState,
    frames: u64,
    restarts: u32,
}

impl Session {
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let state = GameState::spawn(&level, &tuning);
        let mut input = InputState::new();
        tuning.apply_bindings(&mut input);
        Self {
            level,
            tuning,
            state,
            input,
            frames: 0,
            restarts: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn hud(&self) -> HudState {
        HudState::from_state(&self.state)
    }

    /// Run the policy for one frame using the currently held keys
    pub fn advance(&mut self, frame: &ResolvedFrame) -> Vec<GameEvent> {
        let input = self.input.frame_input();
        let state = std::mem::take(&mut self.state);
        let outcome = step(state, frame, input, &self.level, &self.tuning);

        if outcome.restarted() {
            self.restarts += 1;
        }
        self.state = outcome.state;
        self.frames += 1;
        self.input.end_frame();

        tracing::debug!(frame = self.frames, events = outcome.events.len(), "frame advanced");
        outcome.events
    }

    /// Drive the host until it stops producing frames or the level is complete
    pub fn run<H: Host>(&mut self, host: &mut H) -> Result<RunSummary> {
        while !self.state.is_complete() {
            host.poll_input(&mut self.input)?;
            let Some(frame) = host.resolve_frame(&self.state)? else {
                break;
            };
            let events = self.advance(&frame);
            host.apply(&self.state, &events)?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frames,
            score: self.state.score.value(),
            restarts: self.restarts,
            coins_remaining: self.state.active_coins().count(),
            completed: self.state.is_complete(),
        }
    }
}
