use crate::camera::{CameraRig, ORBIT_STEP_DEG};
use crate::lighting::LightingState;

/// Pause switch for the time-driven part of the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationClock {
    paused: bool,
}

impl AnimationClock {
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// All mutable scene state: camera rig, lighting switch and animation clock.
///
/// Owned by the app loop and passed by reference into the frame composer and
/// the input handlers, so nothing rendering-related lives in globals.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    pub camera: CameraRig,
    pub lighting: LightingState,
    pub clock: AnimationClock,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances time-derived state by one fixed tick. A no-op while paused.
    pub fn tick(&mut self) {
        if !self.clock.is_paused() {
            self.camera.orbital.advance(ORBIT_STEP_DEG);
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraMode;

    #[test]
    fn pause_freezes_orbit_and_unpause_resumes() {
        let mut state = SceneState::new();
        state.tick();
        state.tick();
        let advanced = state.camera.orbital.angle_deg;
        assert!(advanced > 0.0);

        state.clock.toggle_pause();
        for _ in 0..10 {
            state.tick();
        }
        assert_eq!(state.camera.orbital.angle_deg, advanced);

        state.clock.toggle_pause();
        state.tick();
        assert!((state.camera.orbital.angle_deg - (advanced + ORBIT_STEP_DEG)).abs() < 1e-6);
    }

    #[test]
    fn mode_switch_keeps_orbital_angle() {
        let mut state = SceneState::new();
        for _ in 0..5 {
            state.tick();
        }
        let frozen = state.camera.orbital.angle_deg;
        state.camera.toggle_mode();
        assert_eq!(state.camera.mode(), CameraMode::FirstPerson);
        state.camera.toggle_mode();
        assert_eq!(state.camera.orbital.angle_deg, frozen);
    }
}
