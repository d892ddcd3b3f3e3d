//! The seam between the policy and the engine that runs it

use crate::frame::ResolvedFrame;
use crate::state::GameState;
use ledge_core::Result;
use ledge_runtime::{GameEvent, InputState};

/// An engine driving a [`Session`](crate::Session).
///
/// Each frame the session asks the host for the held keys, then for the
/// physics result of applying the current state, runs the policy, and hands
/// the new state and its events back to be rendered, played and applied.
pub trait Host {
    /// Update the held keys for the coming frame
    fn poll_input(&mut self, input: &mut InputState) -> Result<()>;

    /// Integrate physics from `state` and report the outcome.
    /// Returning `None` ends the run.
    fn resolve_frame(&mut self, state: &GameState) -> Result<Option<ResolvedFrame>>;

    /// Apply the policy's decisions (sprite changes, removals, sounds, reloads)
    fn apply(&mut self, state: &GameState, events: &[GameEvent]) -> Result<()>;
}
