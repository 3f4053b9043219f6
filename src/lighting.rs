use glam::Vec3;

/// Ambient floor light applied in both day and night states.
pub const GLOBAL_AMBIENT: Vec3 = Vec3::new(0.35, 0.30, 0.25);

/// Direction the afternoon sun shines from (toward the scene).
pub const SUN_DIRECTION: Vec3 = Vec3::new(-1.0, 2.0, -1.0);

/// Fixed position of the desk lamp bulb.
pub const LAMP_POSITION: Vec3 = Vec3::new(0.0, 2.5, 0.0);

/// Parameters of the single active light, consumed by the renderer uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Direction toward the sun for the directional source, bulb position
    /// for the point source.
    pub vector: Vec3,
    /// True for the positional lamp, false for the directional sun.
    pub positional: bool,
    pub color: Vec3,
    pub ambient: Vec3,
    /// Constant, linear and quadratic attenuation terms. All ones and zeros
    /// for the sun, which does not attenuate.
    pub attenuation: Vec3,
}

/// Day/night switch deciding which of the two light sources is active.
///
/// The sun and the lamp are derived from the single `daytime` flag, so they
/// are complementary by construction: there is no state in which both or
/// neither would be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightingState {
    daytime: bool,
}

impl Default for LightingState {
    fn default() -> Self {
        Self { daytime: true }
    }
}

impl LightingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips between day and night instantly; no cross-fade.
    pub fn toggle(&mut self) -> bool {
        self.daytime = !self.daytime;
        self.daytime
    }

    pub fn is_daytime(&self) -> bool {
        self.daytime
    }

    pub fn sun_active(&self) -> bool {
        self.daytime
    }

    pub fn lamp_active(&self) -> bool {
        !self.daytime
    }

    /// Parameters of whichever source is active this frame.
    pub fn active_light(&self) -> LightParams {
        if self.daytime {
            LightParams {
                vector: SUN_DIRECTION,
                positional: false,
                color: Vec3::new(0.9, 0.75, 0.5),
                ambient: Vec3::new(0.4, 0.3, 0.2),
                attenuation: Vec3::new(1.0, 0.0, 0.0),
            }
        } else {
            LightParams {
                vector: LAMP_POSITION,
                positional: true,
                color: Vec3::new(1.0, 0.95, 0.8),
                ambient: Vec3::new(0.4, 0.4, 0.3),
                attenuation: Vec3::new(1.0, 0.05, 0.01),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_source_after_any_toggle_sequence() {
        let mut lighting = LightingState::new();
        assert!(lighting.sun_active() != lighting.lamp_active());
        for _ in 0..7 {
            lighting.toggle();
            assert!(lighting.sun_active() != lighting.lamp_active());
        }
    }

    #[test]
    fn toggle_swaps_active_source() {
        let mut lighting = LightingState::new();
        assert!(lighting.sun_active());
        lighting.toggle();
        assert!(lighting.lamp_active());
        lighting.toggle();
        assert!(lighting.sun_active());
    }

    #[test]
    fn sun_is_directional_and_lamp_attenuates() {
        let day = LightingState::new().active_light();
        assert!(!day.positional);
        assert_eq!(day.attenuation, Vec3::new(1.0, 0.0, 0.0));

        let mut lighting = LightingState::new();
        lighting.toggle();
        let night = lighting.active_light();
        assert!(night.positional);
        assert_eq!(night.vector, LAMP_POSITION);
        assert!(night.attenuation.y > 0.0 && night.attenuation.z > 0.0);
    }
}
