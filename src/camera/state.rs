//! Camera control state
//!
//! `ControlState` is the single owner of everything the input systems accumulate. Orbit and flight
//! are not separate modes in the data: flight wins while residual velocity is large enough, and
//! orbit smoothing resumes once the camera has coasted to a stop with no WASD key held.

use bevy::prelude::*;
use std::collections::HashSet;
use std::f32::consts::FRAC_PI_2;

/// Drag sensitivity, radians per pixel
pub const ROTATE_SENSITIVITY: f32 = 0.005;
/// Zoom change per wheel pixel
pub const ZOOM_SENSITIVITY: f32 = 0.5;
/// Pixels per wheel "line" when the platform reports line units
pub const PIXELS_PER_LINE: f32 = 100.0;
pub const MIN_ZOOM: f32 = 10.0;
pub const MAX_ZOOM: f32 = 2000.0;
pub const INITIAL_ZOOM: f32 = 400.0;

pub const ROTATION_SMOOTHING: f32 = 0.05;
pub const ZOOM_SMOOTHING: f32 = 0.1;
pub const VELOCITY_SMOOTHING: f32 = 0.1;
pub const VELOCITY_DECAY: f32 = 0.9;
/// Below this speed flight stops and velocity snaps to zero
pub const FLIGHT_THRESHOLD: f32 = 0.1;

pub const BASE_SPEED: f32 = 1.0;
pub const BOOSTED_SPEED: f32 = 10.0;

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACK_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const UP_KEYS: [KeyCode; 1] = [KeyCode::KeyE];
const DOWN_KEYS: [KeyCode; 1] = [KeyCode::KeyQ];
const BOOST_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];
/// Only these block orbit smoothing; arrow keys do not.
const WASD_KEYS: [KeyCode; 4] = [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD];

/// Marker for the camera driven by `ControlState`
#[derive(Component)]
pub struct MainCamera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Orbit,
    Flight,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Orbit => "Orbit",
            CameraMode::Flight => "Flight",
        }
    }
}

/// Camera-relative axes in world space
#[derive(Debug, Clone, Copy)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl CameraBasis {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            forward: *transform.forward(),
            right: *transform.right(),
            up: *transform.up(),
        }
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

/// What the camera should do this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMotion {
    /// Translate by the velocity
    Fly(Vec3),
    /// Sit at this position looking at the origin
    Orbit(Vec3),
    /// Leave the camera where it is
    Hold,
}

#[derive(Resource, Debug, Clone)]
pub struct ControlState {
    pub mouse_down: bool,
    pub last_cursor: Option<Vec2>,
    /// x = pitch, y = yaw (radians)
    pub target_rotation: Vec2,
    pub current_rotation: Vec2,
    pub target_zoom: f32,
    pub current_zoom: f32,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub base_speed: f32,
    pub boosted_speed: f32,
    pub accelerating: bool,
    pub keys: HashSet<KeyCode>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            mouse_down: false,
            last_cursor: None,
            target_rotation: Vec2::ZERO,
            current_rotation: Vec2::ZERO,
            target_zoom: INITIAL_ZOOM,
            current_zoom: INITIAL_ZOOM,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            base_speed: BASE_SPEED,
            boosted_speed: BOOSTED_SPEED,
            accelerating: false,
            keys: HashSet::new(),
        }
    }
}

/// Position on the orbit sphere for (pitch, yaw) at `zoom` distance from the origin.
pub fn orbit_position(rotation: Vec2, zoom: f32) -> Vec3 {
    let (pitch, yaw) = (rotation.x, rotation.y);
    Vec3::new(
        zoom * yaw.sin() * pitch.cos(),
        zoom * pitch.sin(),
        zoom * yaw.cos() * pitch.cos(),
    )
}

impl ControlState {
    /// Replace the held set with exactly `keys`.
    pub fn sync_keys(&mut self, keys: impl IntoIterator<Item = KeyCode>) {
        self.keys.clear();
        self.keys.extend(keys);
    }

    /// Drop all held input; flight momentum is kept and decays normally.
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.end_drag();
        self.accelerating = false;
        self.acceleration = Vec3::ZERO;
    }

    fn any_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|k| self.keys.contains(k))
    }

    /// Start a drag at `cursor`
    pub fn begin_drag(&mut self, cursor: Vec2) {
        self.mouse_down = true;
        self.last_cursor = Some(cursor);
    }

    pub fn end_drag(&mut self) {
        self.mouse_down = false;
        self.last_cursor = None;
    }

    /// Cursor moved while the button is held; rotates the orbit target.
    pub fn drag_to(&mut self, cursor: Vec2) {
        if !self.mouse_down {
            return;
        }
        if let Some(last) = self.last_cursor {
            let delta = cursor - last;
            self.target_rotation.y += delta.x * ROTATE_SENSITIVITY;
            self.target_rotation.x =
                (self.target_rotation.x + delta.y * ROTATE_SENSITIVITY).clamp(-FRAC_PI_2, FRAC_PI_2);
        }
        self.last_cursor = Some(cursor);
    }

    /// Wheel delta in pixels, positive zooms out.
    pub fn zoom_by(&mut self, delta_px: f32) {
        self.target_zoom = (self.target_zoom + delta_px * ZOOM_SENSITIVITY).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Speed for the current boost key state
    pub fn speed(&self) -> f32 {
        if self.any_held(&BOOST_KEYS) {
            self.boosted_speed
        } else {
            self.base_speed
        }
    }

    /// Camera-relative direction from held keys: x = right, y = up, z = forward.
    pub fn movement_input(&self) -> Vec3 {
        let axis = |pos: &[KeyCode], neg: &[KeyCode]| {
            (self.any_held(pos) as i8 - self.any_held(neg) as i8) as f32
        };
        Vec3::new(
            axis(&RIGHT_KEYS, &LEFT_KEYS),
            axis(&UP_KEYS, &DOWN_KEYS),
            axis(&FORWARD_KEYS, &BACK_KEYS),
        )
    }

    pub fn mode(&self) -> CameraMode {
        if self.velocity.length() >= FLIGHT_THRESHOLD {
            CameraMode::Flight
        } else {
            CameraMode::Orbit
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, basis: CameraBasis) -> CameraMotion {
        let input = self.movement_input();
        self.accelerating = input != Vec3::ZERO;

        if self.accelerating {
            let direction =
                (basis.right * input.x + basis.up * input.y + basis.forward * input.z).normalize_or_zero();
            self.acceleration = direction * self.speed();
            self.velocity = self.velocity.lerp(self.acceleration, VELOCITY_SMOOTHING);
        } else {
            self.acceleration = Vec3::ZERO;
            self.velocity *= VELOCITY_DECAY;
            if self.velocity.length() < FLIGHT_THRESHOLD {
                self.velocity = Vec3::ZERO;
            }
        }

        if self.velocity.length() >= FLIGHT_THRESHOLD {
            return CameraMotion::Fly(self.velocity);
        }
        if self.any_held(&WASD_KEYS) {
            return CameraMotion::Hold;
        }

        self.current_rotation += (self.target_rotation - self.current_rotation) * ROTATION_SMOOTHING;
        self.current_zoom += (self.target_zoom - self.current_zoom) * ZOOM_SMOOTHING;
        CameraMotion::Orbit(orbit_position(self.current_rotation, self.current_zoom))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl ControlState {
        fn press(&mut self, key: KeyCode) {
            self.keys.insert(key);
        }

        fn release(&mut self, key: KeyCode) {
            self.keys.remove(&key);
        }
    }

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_zoom_target_clamped() {
        let mut state = ControlState::default();
        for _ in 0..100 {
            state.zoom_by(1000.0);
        }
        assert_eq!(state.target_zoom, MAX_ZOOM);
        for _ in 0..100 {
            state.zoom_by(-1000.0);
        }
        assert_eq!(state.target_zoom, MIN_ZOOM);
        state.zoom_by(20.0);
        assert!((state.target_zoom - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_sync_keys_drops_released() {
        let mut state = ControlState::default();
        state.press(KeyCode::KeyW);
        state.press(KeyCode::ShiftLeft);
        state.sync_keys([KeyCode::KeyA]);
        assert_eq!(state.keys, HashSet::from([KeyCode::KeyA]));
        assert_eq!(state.movement_input(), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(state.speed(), BASE_SPEED);
    }

    #[test]
    fn test_release_all_clears_keys_and_drag() {
        let mut state = ControlState::default();
        state.press(KeyCode::KeyD);
        state.begin_drag(Vec2::new(5.0, 5.0));
        state.step(CameraBasis::default());
        assert!(state.accelerating);

        state.release_all();
        assert!(state.keys.is_empty());
        assert!(!state.mouse_down);
        assert!(!state.accelerating);
        assert_eq!(state.movement_input(), Vec3::ZERO);
    }

    #[test]
    fn test_drag_rotates_and_clamps_pitch() {
        let mut state = ControlState::default();
        state.drag_to(Vec2::new(50.0, 0.0));
        assert_eq!(state.target_rotation, Vec2::ZERO, "no drag without button");

        state.begin_drag(Vec2::ZERO);
        state.drag_to(Vec2::new(100.0, 0.0));
        assert!((state.target_rotation.y - 0.5).abs() < EPSILON);

        state.drag_to(Vec2::new(100.0, 10_000.0));
        assert!((state.target_rotation.x - FRAC_PI_2).abs() < EPSILON);
        state.drag_to(Vec2::new(100.0, -20_000.0));
        assert!((state.target_rotation.x + FRAC_PI_2).abs() < EPSILON);

        state.end_drag();
        assert!(!state.mouse_down);
        assert!(state.last_cursor.is_none());
    }

    #[test]
    fn test_velocity_decays_to_exact_zero() {
        let mut state = ControlState::default();
        state.press(KeyCode::ShiftLeft);
        state.press(KeyCode::KeyW);
        for _ in 0..200 {
            state.step(CameraBasis::default());
        }
        assert!((state.velocity.length() - BOOSTED_SPEED).abs() < 0.01);
        assert_eq!(state.mode(), CameraMode::Flight);

        state.release(KeyCode::KeyW);
        state.release(KeyCode::ShiftLeft);
        let mut frames = 0;
        while state.velocity != Vec3::ZERO {
            state.step(CameraBasis::default());
            frames += 1;
            assert!(frames < 100, "velocity never reached zero");
        }
        assert_eq!(state.velocity, Vec3::ZERO);
        assert_eq!(state.mode(), CameraMode::Orbit);
    }

    #[test]
    fn test_forward_moves_along_camera_forward() {
        let mut state = ControlState::default();
        state.press(KeyCode::KeyW);
        let mut motion = CameraMotion::Hold;
        for _ in 0..5 {
            motion = state.step(CameraBasis::default());
        }
        let CameraMotion::Fly(velocity) = motion else {
            panic!("expected flight, got {:?}", motion);
        };
        assert!(velocity.z < 0.0);
        assert!(velocity.x.abs() < EPSILON && velocity.y.abs() < EPSILON);
    }

    #[test]
    fn test_shift_selects_boosted_speed() {
        let mut state = ControlState::default();
        assert_eq!(state.speed(), BASE_SPEED);
        state.press(KeyCode::ShiftRight);
        assert_eq!(state.speed(), BOOSTED_SPEED);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = ControlState::default();
        state.press(KeyCode::KeyA);
        state.press(KeyCode::ArrowRight);
        state.press(KeyCode::KeyE);
        assert_eq!(state.movement_input(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_wasd_holds_orbit_but_arrows_do_not() {
        // Opposing keys: no net movement, so only the gating differs.
        let mut wasd = ControlState::default();
        wasd.press(KeyCode::KeyW);
        wasd.press(KeyCode::KeyS);
        wasd.target_zoom = 100.0;
        assert_eq!(wasd.step(CameraBasis::default()), CameraMotion::Hold);
        assert_eq!(wasd.current_zoom, INITIAL_ZOOM);

        let mut arrows = ControlState::default();
        arrows.press(KeyCode::ArrowUp);
        arrows.press(KeyCode::ArrowDown);
        arrows.target_zoom = 100.0;
        assert!(matches!(
            arrows.step(CameraBasis::default()),
            CameraMotion::Orbit(_)
        ));
        assert!(arrows.current_zoom < INITIAL_ZOOM);
    }

    #[test]
    fn test_orbit_converges_to_target() {
        let mut state = ControlState::default();
        state.target_rotation = Vec2::new(0.3, 1.2);
        state.target_zoom = 50.0;
        let mut motion = CameraMotion::Hold;
        for _ in 0..1000 {
            motion = state.step(CameraBasis::default());
        }
        let expected = orbit_position(Vec2::new(0.3, 1.2), 50.0);
        let CameraMotion::Orbit(position) = motion else {
            panic!("expected orbit, got {:?}", motion);
        };
        assert!(position.distance(expected) < 1e-2);
        assert!((position.length() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn test_orbit_position_axes() {
        let zero = orbit_position(Vec2::ZERO, 400.0);
        assert!(zero.distance(Vec3::new(0.0, 0.0, 400.0)) < EPSILON);
        let side = orbit_position(Vec2::new(0.0, FRAC_PI_2), 10.0);
        assert!(side.distance(Vec3::new(10.0, 0.0, 0.0)) < EPSILON);
        let top = orbit_position(Vec2::new(FRAC_PI_2, 0.0), 10.0);
        assert!(top.distance(Vec3::new(0.0, 10.0, 0.0)) < EPSILON);
    }
}
