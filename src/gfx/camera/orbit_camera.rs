use cgmath::*;

use crate::config::CameraSetup;

/// Perspective camera orbiting a target point, y-up
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 1000.0,
        };
        camera.update();
        camera
    }

    /// Places the camera at `setup.position` looking at `setup.target` with
    /// the orbit limits of the setup.
    pub fn from_setup(setup: &CameraSetup, aspect: f32) -> Self {
        let offset = setup.position - setup.target;
        let distance = offset.magnitude();
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);

        // Polar angle is measured from +y, pitch from the horizon
        let half_pi = std::f32::consts::FRAC_PI_2;
        let bounds = OrbitCameraBounds {
            min_distance: Some(setup.min_distance),
            max_distance: Some(setup.max_distance),
            min_pitch: half_pi - setup.max_polar,
            max_pitch: (half_pi - setup.min_polar).min(half_pi - PITCH_EPSILON),
            min_yaw: Some(setup.min_azimuth),
            max_yaw: Some(setup.max_azimuth),
        };

        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: setup.position,
            target: setup.target,
            up: Vector3::unit_y(),
            bounds,
            aspect,
            fovy: Deg(setup.fov_deg).into(),
            znear: setup.znear,
            zfar: setup.zfar,
        };
        camera.set_distance(distance);
        camera.set_pitch(pitch);
        camera.set_yaw(yaw);
        camera
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj = perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        // A minimised window reports 0x0; keep the last usable aspect
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

const PITCH_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(100.0),
            min_pitch: -std::f32::consts::FRAC_PI_2 + PITCH_EPSILON,
            max_pitch: std::f32::consts::FRAC_PI_2 - PITCH_EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}
