//! Keyboard-driven camera movement.
//!
//! The held-key set is an explicit [`InputState`] handed to
//! [`CameraController::update`] once per tick, so the controller works the
//! same with a real window or a test fixture.

use std::collections::HashSet;

use crate::camera::Camera;
use crate::math::Vec3;

/// Keys currently held down, stored as lowercase identifiers (`"w"`, `"arrowup"`).
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(key.to_lowercase());
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&key.to_lowercase());
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.held.contains(&key.to_lowercase())
    }

    /// Drop every held key (focus loss, window hidden).
    pub fn clear(&mut self) {
        self.held.clear();
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

/// Movement bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
        }
    }
}

/// Nudges the camera position by a fixed amount per tick for each held binding.
#[derive(Clone, Debug)]
pub struct CameraController {
    pub speed: f32,
    pub bindings: KeyBindings,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            speed: Self::DEFAULT_SPEED,
            bindings: KeyBindings::default(),
        }
    }
}

impl CameraController {
    pub const DEFAULT_SPEED: f32 = 0.03;

    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// forward: +z, backward: -z, left: -x, right: +x.
    ///
    /// Every held binding writes through the camera, so each one invalidates
    /// the view caches even when opposite keys cancel out.
    pub fn update(&self, camera: &mut Camera, input: &InputState) {
        let step = self.speed;
        let b = &self.bindings;
        if input.is_pressed(&b.forward) {
            camera.translate_by(Vec3::new(0.0, 0.0, step));
        }
        if input.is_pressed(&b.backward) {
            camera.translate_by(Vec3::new(0.0, 0.0, -step));
        }
        if input.is_pressed(&b.left) {
            camera.translate_by(Vec3::new(-step, 0.0, 0.0));
        }
        if input.is_pressed(&b.right) {
            camera.translate_by(Vec3::new(step, 0.0, 0.0));
        }
    }
}
