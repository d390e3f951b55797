use std::time::{Duration, Instant};

use glam::Vec3;

use crate::input::{InputFrame, InputState, Key};
use crate::time::FrameTime;

use super::state::{CameraState, CaptureMode, WORLD_UP};

/// How the movement speed relates to time.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MovementScale {
    /// `speed` world units per rendered frame. Frame-rate dependent.
    PerFrame,
    /// `speed` world units per second of frame time.
    PerSecond,
}

/// Tunables for `CameraController`.
#[derive(Debug, Clone)]
pub struct CameraControllerConfig {
    /// Degrees of rotation per pixel of cursor travel.
    pub sensitivity: f32,

    /// Translation step; unit depends on `movement`.
    pub speed: f32,

    pub movement: MovementScale,

    /// Minimum interval between two accepted capture toggles.
    pub toggle_debounce: Duration,

    /// Key that toggles mouse capture.
    pub toggle_key: Key,
}

impl Default for CameraControllerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            speed: 0.1,
            movement: MovementScale::PerFrame,
            toggle_debounce: Duration::from_millis(500),
            toggle_key: Key::Escape,
        }
    }
}

/// Converts input into `CameraState` updates and owns the capture state machine.
///
/// Bindings: `W`/`S` along front, `A`/`D` along right, `Space`/`Shift` along
/// the world up axis, `toggle_key` flips capture.
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    config: CameraControllerConfig,

    /// Time of the last accepted capture toggle.
    last_toggle: Option<Instant>,
}

impl CameraController {
    pub fn new(config: CameraControllerConfig) -> Self {
        Self {
            config,
            last_toggle: None,
        }
    }

    pub fn config(&self) -> &CameraControllerConfig {
        &self.config
    }

    /// Runs the per-frame input step: cursor samples, capture toggle, movement.
    ///
    /// Returns the new capture mode when it changed this frame; the caller is
    /// responsible for applying it to the window cursor.
    pub fn update(
        &mut self,
        camera: &mut CameraState,
        input: &InputState,
        frame: &InputFrame,
        time: FrameTime,
    ) -> Option<CaptureMode> {
        for (x, y) in frame.pointer_motion() {
            self.on_cursor_moved(camera, x, y);
        }

        let changed = self.poll_toggle(camera, input, time.now);
        self.apply_movement(camera, input, time.dt);
        changed
    }

    /// Applies one cursor sample (window pixels) to the camera orientation.
    ///
    /// Ignored while the cursor is free. The first sample after capture only
    /// records a baseline.
    pub fn on_cursor_moved(&self, camera: &mut CameraState, x: f64, y: f64) {
        if !camera.is_captured() {
            return;
        }

        if camera.first_sample {
            camera.last_cursor = (x, y);
            camera.first_sample = false;
            return;
        }

        let (last_x, last_y) = camera.last_cursor;
        // Screen y grows downwards; moving the cursor up pitches up.
        let dx = (x - last_x) as f32 * self.config.sensitivity;
        let dy = (last_y - y) as f32 * self.config.sensitivity;
        camera.last_cursor = (x, y);

        camera.set_angles(camera.yaw + dx, camera.pitch + dy);
    }

    /// Translates the camera along its basis for every held movement key.
    ///
    /// `dt` is only used with `MovementScale::PerSecond`.
    pub fn apply_movement(&self, camera: &mut CameraState, input: &InputState, dt: f32) {
        if !camera.is_captured() {
            return;
        }

        let bindings = [
            (Key::W, camera.front),
            (Key::S, -camera.front),
            (Key::D, camera.right),
            (Key::A, -camera.right),
            (Key::Space, WORLD_UP),
            (Key::Shift, -WORLD_UP),
        ];

        let direction: Vec3 = bindings
            .iter()
            .filter(|(key, _)| input.key_down(*key))
            .map(|(_, dir)| *dir)
            .sum();

        if direction == Vec3::ZERO {
            return;
        }

        let step = match self.config.movement {
            MovementScale::PerFrame => self.config.speed,
            MovementScale::PerSecond => self.config.speed * dt,
        };

        camera.position += direction * step;
    }

    /// Flips mouse capture unless the previous accepted toggle was at most
    /// `toggle_debounce` ago.
    ///
    /// Re-entering capture resets the cursor baseline so the next sample does
    /// not produce a jump.
    pub fn toggle_capture(&mut self, camera: &mut CameraState, now: Instant) -> Option<CaptureMode> {
        if let Some(last) = self.last_toggle {
            if now.saturating_duration_since(last) <= self.config.toggle_debounce {
                return None;
            }
        }

        self.last_toggle = Some(now);
        camera.capture = camera.capture.toggled();
        if camera.capture == CaptureMode::Captured {
            camera.first_sample = true;
        }

        log::info!("mouse capture: {:?}", camera.capture);
        Some(camera.capture)
    }

    /// Toggles capture while the toggle key is held (at most once per debounce window).
    pub fn poll_toggle(
        &mut self,
        camera: &mut CameraState,
        input: &InputState,
        now: Instant,
    ) -> Option<CaptureMode> {
        if input.key_down(self.config.toggle_key) {
            self.toggle_capture(camera, now)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use crate::camera::PITCH_LIMIT;
    use crate::input::{InputEvent, KeyState};

    const EPS: f32 = 1e-4;

    fn captured_at_baseline(x: f64, y: f64) -> (CameraController, CameraState) {
        let ctl = CameraController::default();
        let mut cam = CameraState::default();
        ctl.on_cursor_moved(&mut cam, x, y);
        (ctl, cam)
    }

    fn holding(keys: &[Key]) -> InputState {
        let mut input = InputState::default();
        input.keys_down.extend(keys.iter().copied());
        input
    }

    fn frame_time(now: Instant) -> FrameTime {
        FrameTime {
            dt: 0.016,
            elapsed: 0.0,
            now,
            frame_index: 0,
        }
    }

    fn press(input: &mut InputState, frame: &mut InputFrame, key: Key) {
        input.apply_event(frame, InputEvent::Key { key, state: KeyState::Pressed });
    }

    fn assert_orthonormal(cam: &CameraState) {
        let (f, r, u) = (cam.front(), cam.right(), cam.up());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!(f.dot(r).abs() < EPS);
        assert!(f.dot(u).abs() < EPS);
        assert!(r.dot(u).abs() < EPS);
    }

    // ── cursor ────────────────────────────────────────────────────────────

    #[test]
    fn first_sample_only_sets_baseline() {
        let (_, cam) = captured_at_baseline(400.0, 300.0);
        assert_eq!(cam.yaw(), -90.0);
        assert_eq!(cam.pitch(), 0.0);
        assert!(!cam.awaiting_first_sample());
    }

    #[test]
    fn ten_pixels_up_right_turns_one_degree_each() {
        let (ctl, mut cam) = captured_at_baseline(400.0, 300.0);
        let (yaw0, pitch0) = (cam.yaw(), cam.pitch());

        ctl.on_cursor_moved(&mut cam, 410.0, 290.0);

        assert!((cam.yaw() - (yaw0 + 1.0)).abs() < 1e-5);
        assert!((cam.pitch() - (pitch0 + 1.0)).abs() < 1e-5);
        assert_orthonormal(&cam);
    }

    #[test]
    fn cursor_is_ignored_while_free() {
        let (mut ctl, mut cam) = captured_at_baseline(0.0, 0.0);
        ctl.toggle_capture(&mut cam, Instant::now());
        assert_eq!(cam.capture(), CaptureMode::Free);

        let before = cam.clone();
        ctl.on_cursor_moved(&mut cam, 500.0, -500.0);
        assert_eq!(cam, before);
    }

    #[test]
    fn pitch_saturates_at_limit() {
        let (ctl, mut cam) = captured_at_baseline(0.0, 0.0);
        ctl.on_cursor_moved(&mut cam, 0.0, -5000.0);
        assert_eq!(cam.pitch(), PITCH_LIMIT);
        ctl.on_cursor_moved(&mut cam, 0.0, 5000.0);
        assert_eq!(cam.pitch(), -PITCH_LIMIT);
        assert_orthonormal(&cam);
    }

    #[test]
    fn recapture_treats_next_sample_as_baseline() {
        let (mut ctl, mut cam) = captured_at_baseline(100.0, 100.0);
        ctl.on_cursor_moved(&mut cam, 150.0, 80.0);

        let t0 = Instant::now();
        assert_eq!(ctl.toggle_capture(&mut cam, t0), Some(CaptureMode::Free));
        assert_eq!(
            ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(600)),
            Some(CaptureMode::Captured)
        );

        let (yaw, pitch) = (cam.yaw(), cam.pitch());
        ctl.on_cursor_moved(&mut cam, 9000.0, -9000.0);
        assert_eq!(cam.yaw(), yaw);
        assert_eq!(cam.pitch(), pitch);
    }

    // ── capture toggle ────────────────────────────────────────────────────

    #[test]
    fn toggles_within_debounce_flip_once() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::default();
        let t0 = Instant::now();

        assert_eq!(ctl.toggle_capture(&mut cam, t0), Some(CaptureMode::Free));
        assert_eq!(ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(300)), None);
        assert_eq!(cam.capture(), CaptureMode::Free);
    }

    #[test]
    fn toggle_at_exact_debounce_is_rejected() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::default();
        let t0 = Instant::now();

        ctl.toggle_capture(&mut cam, t0);
        assert_eq!(ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(500)), None);
        assert_eq!(cam.capture(), CaptureMode::Free);
    }

    #[test]
    fn toggle_fires_again_after_debounce() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::default();
        let t0 = Instant::now();

        ctl.toggle_capture(&mut cam, t0);
        assert_eq!(
            ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(501)),
            Some(CaptureMode::Captured)
        );
        assert!(cam.awaiting_first_sample());
    }

    #[test]
    fn rejected_toggle_does_not_extend_window() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::default();
        let t0 = Instant::now();

        ctl.toggle_capture(&mut cam, t0);
        ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(400));
        assert!(ctl.toggle_capture(&mut cam, t0 + Duration::from_millis(550)).is_some());
    }

    #[test]
    fn poll_toggle_requires_held_key() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::default();
        let now = Instant::now();

        assert_eq!(ctl.poll_toggle(&mut cam, &InputState::default(), now), None);
        assert_eq!(
            ctl.poll_toggle(&mut cam, &holding(&[Key::Escape]), now),
            Some(CaptureMode::Free)
        );
    }

    // ── movement ──────────────────────────────────────────────────────────

    #[test]
    fn forward_moves_along_front_per_frame() {
        let ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ZERO);

        ctl.apply_movement(&mut cam, &holding(&[Key::W]), 0.5);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), EPS));
    }

    #[test]
    fn strafe_and_vertical_use_right_and_world_up() {
        let ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ZERO);

        ctl.apply_movement(&mut cam, &holding(&[Key::D, Key::Space]), 0.016);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.1, 0.1, 0.0), EPS));

        ctl.apply_movement(&mut cam, &holding(&[Key::A, Key::Shift]), 0.016);
        assert!(cam.position.abs_diff_eq(Vec3::ZERO, EPS));
    }

    #[test]
    fn opposing_keys_cancel() {
        let ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ONE);

        ctl.apply_movement(&mut cam, &holding(&[Key::W, Key::S]), 0.016);
        assert_eq!(cam.position, Vec3::ONE);
    }

    #[test]
    fn per_second_scaling_uses_dt() {
        let ctl = CameraController::new(CameraControllerConfig {
            speed: 2.0,
            movement: MovementScale::PerSecond,
            ..Default::default()
        });
        let mut cam = CameraState::new(Vec3::ZERO);

        ctl.apply_movement(&mut cam, &holding(&[Key::W]), 0.25);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, -0.5), EPS));
    }

    #[test]
    fn no_movement_while_free() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ZERO);
        ctl.toggle_capture(&mut cam, Instant::now());

        ctl.apply_movement(&mut cam, &holding(&[Key::W, Key::D]), 0.016);
        assert_eq!(cam.position, Vec3::ZERO);
    }

    // ── per-frame update ──────────────────────────────────────────────────

    #[test]
    fn update_applies_motion_then_movement() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ZERO);
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        for (dx, dy) in [(0.0, 0.0), (10.0, -10.0)] {
            let ev = input.motion_event(dx, dy);
            input.apply_event(&mut frame, ev);
        }
        press(&mut input, &mut frame, Key::W);

        let changed = ctl.update(&mut cam, &input, &frame, frame_time(Instant::now()));

        assert_eq!(changed, None);
        assert!((cam.yaw() - -89.0).abs() < 1e-5);
        assert!((cam.pitch() - 1.0).abs() < 1e-5);
        // Movement uses the basis rotated earlier in the same frame.
        assert!(cam.position().abs_diff_eq(cam.front() * 0.1, EPS));
    }

    #[test]
    fn update_toggles_before_moving() {
        let mut ctl = CameraController::default();
        let mut cam = CameraState::new(Vec3::ZERO);
        let mut input = InputState::default();
        let mut frame = InputFrame::default();

        press(&mut input, &mut frame, Key::W);
        press(&mut input, &mut frame, Key::Escape);

        let t0 = Instant::now();
        let changed = ctl.update(&mut cam, &input, &frame, frame_time(t0));
        assert_eq!(changed, Some(CaptureMode::Free));
        assert_eq!(cam.position(), Vec3::ZERO);

        // Key still held on the next frame: debounced, camera stays free.
        frame.clear();
        let changed = ctl.update(
            &mut cam,
            &input,
            &frame,
            frame_time(t0 + Duration::from_millis(16)),
        );
        assert_eq!(changed, None);
        assert_eq!(cam.capture(), CaptureMode::Free);
    }

    // ── properties ────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn pitch_stays_clamped(samples in prop::collection::vec((-1e5f64..1e5, -1e5f64..1e5), 1..64)) {
            let ctl = CameraController::default();
            let mut cam = CameraState::default();
            for (x, y) in samples {
                ctl.on_cursor_moved(&mut cam, x, y);
                prop_assert!(cam.pitch() >= -PITCH_LIMIT && cam.pitch() <= PITCH_LIMIT);
            }
        }

        #[test]
        fn basis_stays_orthonormal(samples in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 2..64)) {
            let ctl = CameraController::default();
            let mut cam = CameraState::default();
            for (x, y) in samples {
                ctl.on_cursor_moved(&mut cam, x, y);
                let (f, r, u) = (cam.front(), cam.right(), cam.up());
                prop_assert!((f.length() - 1.0).abs() < EPS);
                prop_assert!((r.length() - 1.0).abs() < EPS);
                prop_assert!((u.length() - 1.0).abs() < EPS);
                prop_assert!(f.dot(r).abs() < EPS);
                prop_assert!(f.dot(u).abs() < EPS);
                prop_assert!(r.dot(u).abs() < EPS);
            }
        }
    }
}
