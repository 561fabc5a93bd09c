//! Input staging between the host's event callbacks and the simulation tick.
//!
//! Key state and look deltas are written here as events arrive and consumed
//! by the next `Simulation::tick`. Firing is not staged (see `Simulation::fire`).

use bevy::prelude::*;

/// Logical keys the simulation understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
    Jump,
}

/// Held keys plus the mouse movement accumulated since the last tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    look_delta: Vec2,
    look_locked: bool,
}

impl InputState {
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Forward => self.forward = pressed,
            Key::Backward => self.backward = pressed,
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Jump => self.jump = pressed,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Forward => self.forward,
            Key::Backward => self.backward,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Jump => self.jump,
        }
    }

    /// Release every key, e.g. when the window loses focus.
    pub fn clear_keys(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.jump = false;
    }

    /// Whether mouse look is captured (pointer lock).
    pub fn look_locked(&self) -> bool {
        self.look_locked
    }

    /// Engage or release look-lock. Releasing drops any pending delta.
    pub fn set_look_locked(&mut self, locked: bool) {
        self.look_locked = locked;
        if !locked {
            self.look_delta = Vec2::ZERO;
        }
    }

    /// Accumulate raw mouse movement (pixels). Ignored while look is unlocked.
    pub fn add_look_delta(&mut self, delta: Vec2) {
        if self.look_locked {
            self.look_delta += delta;
        }
    }

    /// Consume the accumulated look delta.
    pub fn take_look_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_delta_accumulates_only_while_locked() {
        let mut input = InputState::default();
        input.add_look_delta(Vec2::new(5.0, 1.0));
        assert_eq!(input.take_look_delta(), Vec2::ZERO);

        input.set_look_locked(true);
        input.add_look_delta(Vec2::new(5.0, 1.0));
        input.add_look_delta(Vec2::new(-2.0, 3.0));
        assert_eq!(input.take_look_delta(), Vec2::new(3.0, 4.0));
        // Consumed
        assert_eq!(input.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn unlocking_drops_pending_delta() {
        let mut input = InputState::default();
        input.set_look_locked(true);
        input.add_look_delta(Vec2::new(10.0, 0.0));
        input.set_look_locked(false);
        input.set_look_locked(true);
        assert_eq!(input.take_look_delta(), Vec2::ZERO);
    }

    #[test]
    fn keys_round_trip_through_set_and_clear() {
        let mut input = InputState::default();
        input.set_key(Key::Forward, true);
        input.set_key(Key::Jump, true);
        assert!(input.is_held(Key::Forward));
        assert!(input.is_held(Key::Jump));
        assert!(!input.is_held(Key::Left));

        input.clear_keys();
        assert!(!input.is_held(Key::Forward));
        assert!(!input.is_held(Key::Jump));
    }
}
