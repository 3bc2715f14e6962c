use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
};

use super::orbit_camera::OrbitCamera;

/// Drag-to-orbit and wheel-to-zoom controls with optional damping
///
/// Input only accumulates deltas; [`CameraController::update`] applies them
/// once per frame. With damping a fraction of the pending delta is applied
/// each frame and the remainder decays, giving the camera inertia.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    /// Fraction of the pending motion applied per frame; `None` applies it all.
    pub damping: Option<f32>,
    is_mouse_pressed: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            damping: None,
            is_mouse_pressed: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
        }
    }

    pub fn with_damping(mut self, factor: f32) -> Self {
        self.damping = Some(factor.clamp(f32::EPSILON, 1.0));
        self
    }

    pub fn process_events(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 * 0.1
                    }
                };
                self.pending_zoom += scroll_amount * self.zoom_speed;
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    self.rotate((delta.0 as f32, delta.1 as f32));
                }
            }
            _ => (),
        }
    }

    /// Queues an orbit by a pointer drag of `delta` pixels
    pub fn rotate(&mut self, delta: (f32, f32)) {
        self.pending_yaw -= delta.0 * self.rotate_speed;
        self.pending_pitch += delta.1 * self.rotate_speed;
    }

    /// Queues a zoom by `amount` world units
    pub fn zoom(&mut self, amount: f32) {
        self.pending_zoom += amount;
    }

    /// Applies pending motion to the camera; called first in every frame
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        let factor = self.damping.unwrap_or(1.0);

        if self.pending_yaw != 0.0 {
            camera.add_yaw(self.pending_yaw * factor);
        }
        if self.pending_pitch != 0.0 {
            camera.add_pitch(self.pending_pitch * factor);
        }
        if self.pending_zoom != 0.0 {
            camera.add_distance(self.pending_zoom * factor);
        }

        let decay = 1.0 - factor;
        self.pending_yaw = settle(self.pending_yaw * decay);
        self.pending_pitch = settle(self.pending_pitch * decay);
        self.pending_zoom = settle(self.pending_zoom * decay);
    }

    /// Returns true while the drag button is held
    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}

// Snap tiny residual motion to rest
fn settle(value: f32) -> f32 {
    if value.abs() < 1e-5 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn test_undamped_update_applies_everything_once() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 1.0);

        controller.zoom(2.0);
        controller.update(&mut camera);
        assert_eq!(camera.distance, 12.0);

        controller.update(&mut camera);
        assert_eq!(camera.distance, 12.0);
    }

    #[test]
    fn test_damped_update_spreads_motion_over_frames() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 1.0).with_damping(0.5);

        controller.zoom(4.0);
        controller.update(&mut camera);
        assert_eq!(camera.distance, 12.0);
        controller.update(&mut camera);
        assert_eq!(camera.distance, 13.0);
    }

    #[test]
    fn test_drag_rotates_only_while_button_held() {
        let mut camera = OrbitCamera::new(10.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let mut controller = CameraController::new(0.01, 1.0);
        let motion = DeviceEvent::MouseMotion { delta: (-10.0, 0.0) };

        controller.process_events(&motion);
        controller.update(&mut camera);
        assert!(!controller.is_rotating());
        assert_eq!(camera.yaw, 0.0);

        controller.process_events(&DeviceEvent::Button {
            button: 0,
            state: ElementState::Pressed,
        });
        assert!(controller.is_rotating());
        controller.process_events(&motion);
        controller.update(&mut camera);
        assert!((camera.yaw - 0.1).abs() < 1e-6);

        controller.process_events(&DeviceEvent::Button {
            button: 0,
            state: ElementState::Released,
        });
        assert!(!controller.is_rotating());
    }
}
