//! HUD state: coin counter and key icon
//!
//! The host draws a coin icon followed by `score_text`, and a key icon whose
//! frame shows whether the key has been picked up.

use crate::state::GameState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudState {
    pub score_text: String,
    /// 0 = empty key slot, 1 = key held
    pub key_icon_frame: u32,
    /// Whether the level has a key at all (hide the icon otherwise)
    pub show_key_icon: bool,
}

impl HudState {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score_text: format!("x{}", state.score.value()),
            key_icon_frame: u32::from(state.hero.has_key),
            show_key_icon: state.key.is_some(),
        }
    }
}
