use glam::Vec3;

/// Fixed world vertical axis.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Pitch clamp in degrees. Stays short of 90 so `front` never becomes
/// colinear with `WORLD_UP`.
pub const PITCH_LIMIT: f32 = 89.0;

/// Initial yaw in degrees; looks down -Z.
pub const DEFAULT_YAW: f32 = -90.0;

/// Mouse-capture mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CaptureMode {
    /// Cursor hidden and grabbed; motion rotates the camera and keys move it.
    Captured,
    /// Cursor visible and free; camera input is ignored.
    Free,
}

impl CaptureMode {
    pub fn toggled(self) -> Self {
        match self {
            CaptureMode::Captured => CaptureMode::Free,
            CaptureMode::Free => CaptureMode::Captured,
        }
    }
}

/// Computes the orthonormal `(front, right, up)` basis for angles in degrees.
pub fn basis_from_angles(yaw: f32, pitch: f32) -> (Vec3, Vec3, Vec3) {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());

    let front = Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize();
    let right = front.cross(WORLD_UP).normalize();
    let up = right.cross(front).normalize();

    (front, right, up)
}

/// Camera position, orientation and input mode.
///
/// Fields are only written through `CameraController`, which keeps the basis
/// orthonormal and the pitch clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub(super) position: Vec3,

    pub(super) front: Vec3,
    pub(super) right: Vec3,
    pub(super) up: Vec3,

    /// Degrees, unbounded.
    pub(super) yaw: f32,
    /// Degrees, within `[-PITCH_LIMIT, PITCH_LIMIT]`.
    pub(super) pitch: f32,

    pub(super) capture: CaptureMode,
    /// Next cursor sample only sets the baseline.
    pub(super) first_sample: bool,
    /// Last cursor sample; meaningless while `first_sample` is set.
    pub(super) last_cursor: (f64, f64),
}

impl CameraState {
    /// Creates a captured camera at `position` with the default orientation.
    pub fn new(position: Vec3) -> Self {
        Self::with_angles(position, DEFAULT_YAW, 0.0)
    }

    /// Creates a captured camera with an explicit orientation (degrees).
    pub fn with_angles(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        let (front, right, up) = basis_from_angles(yaw, pitch);
        Self {
            position,
            front,
            right,
            up,
            yaw,
            pitch,
            capture: CaptureMode::Captured,
            first_sample: true,
            last_cursor: (0.0, 0.0),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn capture(&self) -> CaptureMode {
        self.capture
    }

    pub fn is_captured(&self) -> bool {
        self.capture == CaptureMode::Captured
    }

    pub fn awaiting_first_sample(&self) -> bool {
        self.first_sample
    }

    /// Sets yaw/pitch and rebuilds the basis.
    pub(super) fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        (self.front, self.right, self.up) = basis_from_angles(self.yaw, self.pitch);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_orientation_looks_down_negative_z() {
        let cam = CameraState::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 1.0, 3.0));
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert!(cam.front().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
        assert!(cam.right().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn starts_captured_awaiting_baseline() {
        let cam = CameraState::default();
        assert_eq!(cam.capture(), CaptureMode::Captured);
        assert!(cam.awaiting_first_sample());
    }

    #[test]
    fn constructor_clamps_pitch() {
        let cam = CameraState::with_angles(Vec3::ZERO, 0.0, 120.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
    }

    #[test]
    fn basis_near_pole_is_still_orthonormal() {
        let (f, r, u) = basis_from_angles(37.0, PITCH_LIMIT);
        assert!((f.length() - 1.0).abs() < EPS);
        assert!((r.length() - 1.0).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(CaptureMode::Captured.toggled(), CaptureMode::Free);
        assert_eq!(CaptureMode::Free.toggled(), CaptureMode::Captured);
    }
}
