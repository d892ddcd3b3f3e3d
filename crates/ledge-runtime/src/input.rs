//! Input state management
//!
//! Edge detection compares the keys held this frame with the keys held the
//! previous frame, so it works with any host that can report which keys are
//! down without registering key callbacks.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Action names understood by the policy
pub mod actions {
    pub const MOVE_LEFT: &str = "move_left";
    pub const MOVE_RIGHT: &str = "move_right";
    pub const JUMP: &str = "jump";

    pub const ALL: [&str; 3] = [MOVE_LEFT, MOVE_RIGHT, JUMP];
}

/// Keys the game can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Space,
    R,
    Escape,
}

/// Horizontal movement decided for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    None,
}

impl Horizontal {
    /// -1, +1 or 0
    pub fn direction(self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Right => 1.0,
            Horizontal::None => 0.0,
        }
    }
}

/// What the policy needs to know about input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub horizontal: Horizontal,
    /// True only on the frame the jump action goes from released to held
    pub jump_pressed: bool,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(horizontal: Horizontal) -> Self {
        Self {
            horizontal,
            jump_pressed: false,
        }
    }

    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }
}

/// Tracks held keys across two consecutive frames
#[derive(Debug, Clone)]
pub struct InputState {
    /// Keys held this frame
    keys_down: HashSet<Key>,
    /// Keys held at the end of the previous frame
    keys_previous: HashSet<Key>,
    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<Key>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_previous: HashSet::new(),
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<Key>> {
        let mut map = HashMap::new();
        map.insert(actions::MOVE_LEFT.into(), vec![Key::Left, Key::A]);
        map.insert(actions::MOVE_RIGHT.into(), vec![Key::Right, Key::D]);
        map.insert(actions::JUMP.into(), vec![Key::Up, Key::W, Key::Space]);
        map
    }

    /// Bind an action to one or more keys, replacing its previous binding
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<Key>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Keys bound to an action
    pub fn bindings(&self, action: &str) -> &[Key] {
        self.action_map
            .get(action)
            .map(|keys| keys.as_slice())
            .unwrap_or(&[])
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    /// Replace the held set wholesale, for hosts that poll keyboard state
    pub fn set_keys_down(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys_down = keys.into_iter().collect();
    }

    /// Call at end of frame: this frame's keys become the previous frame's
    pub fn end_frame(&mut self) {
        self.keys_previous.clone_from(&self.keys_down);
    }

    // --- Query methods ---

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        Self::any_bound(self.bindings(action), &self.keys_down)
    }

    /// Did the action go from released to held this frame?
    ///
    /// Evaluated per action, so switching from one bound key to another while
    /// still holding the first does not count as a new press.
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        let keys = self.bindings(action);
        Self::any_bound(keys, &self.keys_down) && !Self::any_bound(keys, &self.keys_previous)
    }

    fn any_bound(keys: &[Key], held: &HashSet<Key>) -> bool {
        keys.iter().any(|k| held.contains(k))
    }

    /// Resolve this frame's movement and jump edge. Left wins over right.
    pub fn frame_input(&self) -> FrameInput {
        let horizontal = if self.is_action_pressed(actions::MOVE_LEFT) {
            Horizontal::Left
        } else if self.is_action_pressed(actions::MOVE_RIGHT) {
            Horizontal::Right
        } else {
            Horizontal::None
        };

        FrameInput {
            horizontal,
            jump_pressed: self.is_action_just_pressed(actions::JUMP),
        }
    }
}
