//! Ledge Policy - The per-frame game rules
//!
//! The host engine integrates physics and reports each frame's resolved
//! bodies and overlaps as a [`ResolvedFrame`]. [`step`] turns the previous
//! [`GameState`] plus that frame and the frame's [`FrameInput`] into the next
//! state and the [`GameEvent`]s the host has to apply:
//! - hero animation selection
//! - spider patrol turns at walls
//! - coin, key and door pickups, score
//! - stomping spiders or dying and restarting the level
//!
//! [`Session`] owns the state between frames and drives a [`Host`].
//!
//! [`FrameInput`]: ledge_runtime::FrameInput
//! [`GameEvent`]: ledge_runtime::GameEvent

pub mod animation;
pub mod frame;
pub mod host;
pub mod hud;
pub mod patrol;
pub mod policy;
pub mod session;
pub mod state;
pub mod tuning;

pub use frame::{BodyState, EnemyBody, ResolvedFrame, Touching};
pub use host::Host;
pub use hud::HudState;
pub use policy::{step, FrameOutcome};
pub use session::{RunSummary, Session};
pub use state::{Coin, Door, Enemy, GameState, Hero, KeyItem, Phase, Score};
pub use tuning::Tuning;
