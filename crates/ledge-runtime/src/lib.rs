//! Ledge Runtime - Frame loop plumbing
//!
//! Provides the engine-agnostic pieces the frame loop is built from:
//! - `InputState` - held keys for this and the previous frame, action bindings
//! - `FrameInput` - the per-frame movement/jump decision handed to the policy
//! - `GameEvent` / `EventBus` - typed transitions for the host to apply

mod event;
mod event_bus;
mod input;

pub use event::GameEvent;
pub use event_bus::EventBus;
pub use input::{actions, FrameInput, Horizontal, InputState, Key};
