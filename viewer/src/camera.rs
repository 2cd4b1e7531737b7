use cgmath::{vec3, InnerSpace, Matrix4, Point3};

// One damping step per frame, matching the feel of a damped orbit
// controller at display rate.
const DAMPING_FACTOR: f32 = 0.05;
const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.5;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 10.0;
const MIN_POLAR: f32 = std::f32::consts::PI / 6.0;
const MAX_POLAR: f32 = std::f32::consts::PI - std::f32::consts::PI / 6.0;

/// Damped orbit around a fixed focus point. Input adjusts the target
/// orientation; the rendered orientation eases toward it every frame.
pub struct OrbitCamera {
    focus: Point3<f32>,

    yaw: f32,
    pitch: f32,
    distance: f32,

    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,

    home_eye: Point3<f32>,
    home_focus: Point3<f32>,
}

impl OrbitCamera {
    pub fn new(eye: Point3<f32>, focus: Point3<f32>) -> OrbitCamera {
        let offset = eye - focus;
        let distance = offset.magnitude().clamp(MIN_DISTANCE, MAX_DISTANCE);

        // Polar angle measured from +Y, azimuth in the XZ plane
        let pitch = (offset.y / offset.magnitude()).clamp(-1.0, 1.0).acos();
        let yaw = offset.z.atan2(offset.x);

        OrbitCamera {
            focus,
            yaw,
            pitch: pitch.clamp(MIN_POLAR, MAX_POLAR),
            distance,
            target_yaw: yaw,
            target_pitch: pitch.clamp(MIN_POLAR, MAX_POLAR),
            target_distance: distance,
            home_eye: eye,
            home_focus: focus,
        }
    }

    /// Mouse drag, in pixels.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.target_yaw += delta_x * ROTATE_SPEED;
        self.target_pitch =
            (self.target_pitch - delta_y * ROTATE_SPEED).clamp(MIN_POLAR, MAX_POLAR);
    }

    /// Scroll wheel, positive toward the avatar.
    pub fn zoom(&mut self, scroll_y: f32) {
        self.target_distance =
            (self.target_distance - scroll_y * ZOOM_SPEED).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Snap back to the bootstrap eye/focus (double-click).
    pub fn reset(&mut self) {
        *self = OrbitCamera::new(self.home_eye, self.home_focus);
    }

    /// One damping step. Runs every frame regardless of avatar state.
    pub fn update(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * DAMPING_FACTOR;
        self.pitch += (self.target_pitch - self.pitch) * DAMPING_FACTOR;
        self.distance += (self.target_distance - self.distance) * DAMPING_FACTOR;
    }

    pub fn eye(&self) -> Point3<f32> {
        let x = self.distance * self.pitch.sin() * self.yaw.cos();
        let y = self.distance * self.pitch.cos();
        let z = self.distance * self.pitch.sin() * self.yaw.sin();
        self.focus + vec3(x, y, z)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(), self.focus, vec3(0.0, 1.0, 0.0))
    }
}
