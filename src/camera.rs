use glam::{Mat4, Vec3};

/// Degrees added to the orbital angle on every unpaused animation tick.
pub const ORBIT_STEP_DEG: f32 = 0.5;

/// Yaw/pitch change per pixel of mouse drag, in degrees.
pub const LOOK_SPEED_DEG: f32 = 0.5;

/// World units moved per key press in first-person mode.
pub const MOVE_STEP: f32 = 0.5;

/// Largest orbit radius that keeps the eye inside the room shell.
const MAX_ORBIT_RADIUS: f32 = 3.5;

const PITCH_LIMIT_DEG: f32 = 89.0;

/// Which of the two viewpoints is currently driving the view transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Orbital,
    FirstPerson,
}

impl Default for CameraMode {
    fn default() -> Self {
        CameraMode::Orbital
    }
}

/// Automatic camera circling the room center at fixed radius and height.
#[derive(Debug, Clone)]
pub struct OrbitalCamera {
    pub angle_deg: f32,
    pub radius: f32,
    pub eye_height: f32,
    pub target: Vec3,
}

impl Default for OrbitalCamera {
    fn default() -> Self {
        Self {
            angle_deg: 0.0,
            radius: 3.5,
            eye_height: 2.2,
            target: Vec3::new(0.0, 1.2, 0.0),
        }
    }
}

impl OrbitalCamera {
    /// Advances the orbit by `step` degrees, wrapping into [0, 360).
    pub fn advance(&mut self, step: f32) {
        self.angle_deg = (self.angle_deg + step).rem_euclid(360.0);
    }

    /// Eye position on the orbit circle.
    pub fn eye(&self) -> Vec3 {
        let angle = self.angle_deg.to_radians();
        let radius = self.radius.min(MAX_ORBIT_RADIUS);
        Vec3::new(radius * angle.sin(), self.eye_height, radius * angle.cos())
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}

/// User-steered camera with free position and yaw/pitch look direction.
#[derive(Debug, Clone)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 8.0),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
        }
    }
}

impl FirstPersonCamera {
    /// Applies a mouse drag of `dx`/`dy` pixels to yaw and pitch.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw_deg += dx * LOOK_SPEED_DEG;
        self.pitch_deg =
            (self.pitch_deg + dy * LOOK_SPEED_DEG).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Moves the eye along the world X/Z axes. Movement is intentionally not
    /// view-relative; yaw has no effect on the direction travelled.
    pub fn translate(&mut self, dx: f32, dz: f32) {
        self.position.x += dx;
        self.position.z += dz;
    }

    /// View transform: pitch about X, yaw about Y, then the negated eye
    /// translation, so the scene moves opposite to the camera.
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch_deg.to_radians())
            * Mat4::from_rotation_y(self.yaw_deg.to_radians())
            * Mat4::from_translation(-self.position)
    }
}

/// Owns both viewpoints and the active-mode switch.
///
/// Each mode keeps its own fields; toggling modes never resets either side,
/// so returning to a mode resumes exactly where it left off.
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    mode: CameraMode,
    pub orbital: OrbitalCamera,
    pub first_person: FirstPersonCamera,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Swaps Orbital and FirstPerson, preserving both modes' state.
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = match self.mode {
            CameraMode::Orbital => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::Orbital,
        };
        self.mode
    }

    /// Eye position of whichever mode is active.
    pub fn eye_position(&self) -> Vec3 {
        match self.mode {
            CameraMode::Orbital => self.orbital.eye(),
            CameraMode::FirstPerson => self.first_person.position,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self.mode {
            CameraMode::Orbital => self.orbital.view(),
            CameraMode::FirstPerson => self.first_person.view(),
        }
    }

    /// Combined perspective and view transform for the given aspect ratio.
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let projection =
            Mat4::perspective_rh(45.0_f32.to_radians(), aspect.max(0.01), 0.1, 100.0);
        projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_angle_wraps_past_full_turn() {
        let mut camera = OrbitalCamera::default();
        let steps = 800; // 800 * 0.5 = 400 degrees
        for _ in 0..steps {
            camera.advance(ORBIT_STEP_DEG);
        }
        let expected = (steps as f32 * ORBIT_STEP_DEG).rem_euclid(360.0);
        assert!((camera.angle_deg - expected).abs() < 1e-3);
    }

    #[test]
    fn pitch_pins_at_limit() {
        let mut camera = FirstPersonCamera::default();
        for _ in 0..500 {
            camera.look(0.0, 1.0);
        }
        assert_eq!(camera.pitch_deg, 89.0);
        camera.look(0.0, 10.0);
        assert_eq!(camera.pitch_deg, 89.0);
        camera.look(0.0, -10.0);
        assert!(camera.pitch_deg < 89.0);
    }

    #[test]
    fn eye_starts_on_positive_z() {
        let camera = OrbitalCamera::default();
        let eye = camera.eye();
        assert!((eye.x - 0.0).abs() < 1e-6);
        assert!((eye.y - camera.eye_height).abs() < 1e-6);
        assert!((eye.z - camera.radius).abs() < 1e-6);
    }

    #[test]
    fn orbit_radius_is_clamped_inside_the_room() {
        let camera = OrbitalCamera {
            radius: 50.0,
            ..OrbitalCamera::default()
        };
        let eye = camera.eye();
        assert!(eye.z <= MAX_ORBIT_RADIUS + 1e-6);
    }

    #[test]
    fn mode_toggle_round_trips() {
        let mut rig = CameraRig::new();
        assert_eq!(rig.mode(), CameraMode::Orbital);
        assert_eq!(rig.toggle_mode(), CameraMode::FirstPerson);
        assert_eq!(rig.toggle_mode(), CameraMode::Orbital);
    }

    #[test]
    fn movement_ignores_yaw() {
        let mut camera = FirstPersonCamera::default();
        camera.yaw_deg = 135.0;
        let before = camera.position;
        camera.translate(0.0, -MOVE_STEP);
        assert_eq!(camera.position.x, before.x);
        assert_eq!(camera.position.z, before.z - MOVE_STEP);
    }
}
