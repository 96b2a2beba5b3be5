//! Trackball-camera interaction: pointer input turned into camera motion
//!
//! Positions are in window pixels with y pointing down, as the windowing layer
//! reports them.

use crate::camera::Camera;

const DEFAULT_MOTION_FACTOR: f64 = 10.0;
const DOLLY_BASE: f64 = 1.1;
const WHEEL_STEP: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

/// Camera motion in progress while a button is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Rotate,
    Pan,
    Spin,
    Dolly,
}

#[derive(Debug, Clone)]
pub struct TrackballCamera {
    motion_factor: f64,
    motion: Option<(Motion, MouseButton)>,
    last_pos: [f64; 2],
}

impl Default for TrackballCamera {
    fn default() -> Self {
        TrackballCamera {
            motion_factor: DEFAULT_MOTION_FACTOR,
            motion: None,
            last_pos: [0.0, 0.0],
        }
    }
}

impl TrackballCamera {
    #[cfg(test)]
    pub fn motion(&self) -> Option<Motion> {
        self.motion.map(|(motion, _)| motion)
    }

    /// Starts a motion; returns `false` when one is already running
    pub fn button_down(&mut self, button: MouseButton, modifiers: Modifiers, pos: [f64; 2]) -> bool {
        if self.motion.is_some() {
            return false;
        }
        let motion = match button {
            MouseButton::Left => match (modifiers.shift, modifiers.ctrl) {
                (true, true) => Motion::Dolly,
                (true, false) => Motion::Pan,
                (false, true) => Motion::Spin,
                (false, false) => Motion::Rotate,
            },
            MouseButton::Middle => Motion::Pan,
            MouseButton::Right => Motion::Dolly,
        };
        tracing::debug!(?motion, ?button, "start camera motion");
        self.motion = Some((motion, button));
        self.last_pos = pos;
        true
    }

    /// Ends the motion started by `button`
    pub fn button_up(&mut self, button: MouseButton) -> bool {
        match self.motion {
            Some((_, started_by)) if started_by == button => {
                self.motion = None;
                true
            }
            _ => false,
        }
    }

    /// Applies the pointer movement to the camera; returns whether it changed
    pub fn mouse_move(&mut self, pos: [f64; 2], size: (f64, f64), camera: &mut Camera) -> bool {
        let Some((motion, _)) = self.motion else {
            return false;
        };
        let (width, height) = size;
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        let dx = pos[0] - self.last_pos[0];
        // Pointer y grows downwards, the camera's up axis grows upwards.
        let dy_up = self.last_pos[1] - pos[1];

        match motion {
            Motion::Rotate => {
                let delta_azimuth = -20.0 / width;
                let delta_elevation = -20.0 / height;
                camera.azimuth(dx * delta_azimuth * self.motion_factor);
                camera.elevation(dy_up * delta_elevation * self.motion_factor);
                camera.orthogonalize_view_up();
            }
            Motion::Pan => {
                camera.pan(dx, -dy_up, height);
            }
            Motion::Spin => {
                let center = [width / 2.0, height / 2.0];
                let angle = |p: [f64; 2]| (center[1] - p[1]).atan2(p[0] - center[0]).to_degrees();
                camera.roll(angle(pos) - angle(self.last_pos));
                camera.orthogonalize_view_up();
            }
            Motion::Dolly => {
                let factor = self.motion_factor * dy_up / (height / 2.0);
                camera.dolly(DOLLY_BASE.powf(factor));
            }
        }
        self.last_pos = pos;
        true
    }

    /// Dollies in for a forward (negative) wheel delta and out for a backward one
    pub fn wheel(&mut self, delta_y: f64, camera: &mut Camera) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let step = WHEEL_STEP * self.motion_factor;
        let exponent = if delta_y < 0.0 { step } else { -step };
        camera.dolly(DOLLY_BASE.powf(exponent));
        true
    }
}
