//! End-to-end checks of the scene's observable state machines: day/night
//! exclusivity, orbit arithmetic, pitch clamping, pause semantics and
//! texture degradation. None of these need a window or a GPU.

use glam::Vec3;
use workers_study::camera::{MOVE_STEP, ORBIT_STEP_DEG};
use workers_study::texture::{fallback_pattern, FALLBACK_SIZE};
use workers_study::{load_surface, CameraMode, SceneState, Surface};

#[test]
fn day_night_toggles_keep_exactly_one_source_active() {
    let mut state = SceneState::new();
    assert!(state.lighting.sun_active());
    assert!(!state.lighting.lamp_active());
    for _ in 0..25 {
        state.lighting.toggle();
        let sun = state.lighting.sun_active();
        let lamp = state.lighting.lamp_active();
        assert!(sun != lamp, "sun={sun} lamp={lamp}");
    }
}

#[test]
fn orbit_angle_wraps_modulo_full_turns() {
    let mut state = SceneState::new();
    // 1000 ticks x 0.5 degrees = 500 degrees of travel
    for _ in 0..1000 {
        state.tick();
    }
    let expected = (1000.0 * ORBIT_STEP_DEG) % 360.0;
    assert!((state.camera.orbital.angle_deg - expected).abs() < 1e-2);
    assert!(state.camera.orbital.angle_deg >= 0.0);
    assert!(state.camera.orbital.angle_deg < 360.0);
}

#[test]
fn cumulative_pitch_deltas_pin_at_the_clamp() {
    let mut state = SceneState::new();
    state.camera.toggle_mode();
    // drag far past the vertical in small increments
    for _ in 0..300 {
        state.camera.first_person.look(0.0, 1.0);
    }
    assert_eq!(state.camera.first_person.pitch_deg, 89.0);
    state.camera.first_person.look(0.0, 50.0);
    assert_eq!(state.camera.first_person.pitch_deg, 89.0);

    for _ in 0..600 {
        state.camera.first_person.look(0.0, -1.0);
    }
    assert_eq!(state.camera.first_person.pitch_deg, -89.0);
}

#[test]
fn pausing_freezes_the_orbit_until_resumed() {
    let mut state = SceneState::new();
    for _ in 0..8 {
        state.tick();
    }
    let frozen = state.camera.orbital.angle_deg;

    state.clock.toggle_pause();
    for _ in 0..100 {
        state.tick();
    }
    assert_eq!(state.camera.orbital.angle_deg, frozen);

    state.clock.toggle_pause();
    state.tick();
    assert!((state.camera.orbital.angle_deg - (frozen + ORBIT_STEP_DEG)).abs() < 1e-5);
}

#[test]
fn missing_texture_files_never_fail_the_load() {
    let dir = tempfile::tempdir().unwrap();
    for surface in Surface::ALL {
        let image = load_surface(dir.path(), surface);
        assert!(image.fell_back, "{surface} should have fallen back");
        assert_eq!(
            image.pixels,
            fallback_pattern(FALLBACK_SIZE, surface.fallback_bias())
        );
    }
}

#[test]
fn camera_mode_switch_preserves_both_modes() {
    let mut state = SceneState::new();
    for _ in 0..40 {
        state.tick();
    }
    let orbital_angle = state.camera.orbital.angle_deg;

    state.camera.toggle_mode();
    assert_eq!(state.camera.mode(), CameraMode::FirstPerson);
    state.camera.first_person.translate(MOVE_STEP, -MOVE_STEP);
    let position = state.camera.first_person.position;

    state.camera.toggle_mode();
    assert_eq!(state.camera.orbital.angle_deg, orbital_angle);

    state.camera.toggle_mode();
    assert_eq!(state.camera.first_person.position, position);
}

#[test]
fn startup_eye_position_matches_the_orbit_equation() {
    let mut state = SceneState::new();
    let radius = state.camera.orbital.radius;
    let height = state.camera.orbital.eye_height;

    // angle 0: sin = 0, cos = 1
    let eye = state.camera.eye_position();
    assert!((eye - Vec3::new(0.0, height, radius)).length() < 1e-6);

    state.tick();
    let angle = ORBIT_STEP_DEG.to_radians();
    let expected = Vec3::new(radius * angle.sin(), height, radius * angle.cos());
    assert!((state.camera.eye_position() - expected).length() < 1e-5);
}
