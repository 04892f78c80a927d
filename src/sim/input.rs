//! Input Sampler
//!
//! Platform event handlers write into `InputState` between frames; the frame
//! loop samples it once at the start of each update. Writes are single-field
//! assignments, so the sampler never observes a half-applied event.

use std::collections::HashSet;

use glam::Vec2;

/// Keys bound to each logical action (compared lowercased)
pub mod bindings {
    pub const UP: &[&str] = &["w", "arrowup"];
    pub const DOWN: &[&str] = &["s", "arrowdown"];
    pub const LEFT: &[&str] = &["a", "arrowleft"];
    pub const RIGHT: &[&str] = &["d", "arrowright"];
    pub const FIRE: &[&str] = &[" ", "space", "spacebar"];
    pub const PAUSE: &[&str] = &["escape", "esc"];
}

/// Input commands for a single update pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire key held (rate-limited by the simulator)
    pub fire_held: bool,
    /// Shots requested by the pointer this frame (press + hold)
    pub pointer_shots: u32,
    /// Last pointer position in surface coordinates
    pub pointer: Vec2,
}

impl TickInput {
    /// Convenience for tests and scripted runs
    pub fn moving(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self {
            up,
            down,
            left,
            right,
            ..Default::default()
        }
    }
}

/// Latest observed raw input
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<String>,
    pointer: Vec2,
    pointer_held: bool,
    /// Pointer presses since the last sample
    queued_shots: u32,
    pause_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Auto-repeat presses of a held key are ignored.
    pub fn key_down(&mut self, key: &str) {
        let key = key.to_lowercase();
        let newly_pressed = self.keys.insert(key.clone());
        if newly_pressed && bindings::PAUSE.contains(&key.as_str()) {
            self.pause_requested = true;
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Pointer pressed: one immediate shot, then continuous fire while held
    pub fn pointer_down(&mut self) {
        self.pointer_held = true;
        self.queued_shots = self.queued_shots.saturating_add(1);
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
    }

    /// True if any key bound to the action is held
    pub fn is_held(&self, binding: &[&str]) -> bool {
        binding.iter().any(|k| self.keys.contains(*k))
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Consume a pending pause toggle
    pub fn take_pause_request(&mut self) -> bool {
        std::mem::take(&mut self.pause_requested)
    }

    /// Snapshot the logical input for one update pass and consume one-shot presses
    pub fn sample(&mut self) -> TickInput {
        let pointer_shots = std::mem::take(&mut self.queued_shots) + u32::from(self.pointer_held);
        TickInput {
            up: self.is_held(bindings::UP),
            down: self.is_held(bindings::DOWN),
            left: self.is_held(bindings::LEFT),
            right: self.is_held(bindings::RIGHT),
            fire_held: self.is_held(bindings::FIRE),
            pointer_shots,
            pointer: self.pointer,
        }
    }

    /// Forget queued presses and held keys (on reset)
    pub fn clear(&mut self) {
        self.keys.clear();
        self.pointer_held = false;
        self.queued_shots = 0;
        self.pause_requested = false;
    }
}
