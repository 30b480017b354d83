//! Scene presets for each page section.

use std::f32::consts::PI;

use fastrand::Rng;
use vitrine_core::{Rgb, Section};

use crate::scene::{
    Blend, CoreDescriptor, LinkDescriptor, Motion, RingDescriptor, Sampling, SceneConfig,
};

/// Seed for the experience rings' tilts, so the preset is stable across runs.
const EXPERIENCE_TILT_SEED: u64 = 0x5eed;

/// Colors a theme hands to the scene presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneColors {
    /// Particle glow.
    pub particle: Rgb,
    /// Primary ring and link color.
    pub accent: Rgb,
    /// Deep secondary color.
    pub deep: Rgb,
    /// Core sphere color.
    pub core: Rgb,
}

/// Scene for a section, colored by the theme.
pub fn for_section(section: Section, colors: &SceneColors) -> SceneConfig {
    match section {
        Section::Home => hero(colors),
        Section::Skills => skills(colors),
        Section::About => about(colors),
        Section::Experience => experience(colors),
        Section::Contact => contact(colors),
    }
}

/// Spherical particle shell, three tilted rings and a pulsing core.
pub fn hero(colors: &SceneColors) -> SceneConfig {
    SceneConfig {
        particle_count: 100,
        sampling: Sampling::Sphere {
            min_radius: 3.0,
            max_radius: 8.0,
        },
        palette: vec![colors.particle],
        rings: vec![
            RingDescriptor {
                radius: 4.0,
                thickness: 0.05,
                color: colors.accent,
                tilt: [PI / 4.0, 0.0, 0.0],
                spin: 0.3,
            },
            RingDescriptor {
                radius: 3.0,
                thickness: 0.04,
                color: colors.particle,
                tilt: [0.0, PI / 3.0, 0.0],
                spin: 0.18,
            },
            RingDescriptor {
                radius: 5.0,
                thickness: 0.06,
                color: colors.deep,
                tilt: [0.0, 0.0, PI / 6.0],
                spin: 0.24,
            },
        ],
        core: Some(CoreDescriptor {
            radius: 1.0,
            color: colors.core,
            pulse_rate: 2.0,
            pulse_amplitude: 0.1,
            wireframe: Some(colors.particle),
        }),
        links: Some(LinkDescriptor {
            candidates: 50,
            probability: 0.3,
            color: colors.accent,
        }),
        opacity: 0.6,
        blend: Blend::Additive,
        motion: Motion {
            spin_x: 0.0,
            spin_y: 0.1,
            wobble_rate: 0.2,
            wobble_amplitude: 0.2,
            parallax: 0.1,
        },
        seed: None,
    }
}

/// Sparse box of particles with a single slow ring.
pub fn skills(colors: &SceneColors) -> SceneConfig {
    SceneConfig {
        particle_count: 80,
        sampling: Sampling::Box {
            extent: [20.0, 15.0, 8.0],
        },
        palette: vec![colors.particle],
        rings: vec![RingDescriptor {
            radius: 3.0,
            thickness: 0.02,
            color: colors.accent,
            tilt: [PI / 3.0, 0.0, 0.0],
            spin: 0.1,
        }],
        opacity: 0.4,
        motion: Motion {
            spin_y: 0.02,
            ..Motion::default()
        },
        ..SceneConfig::default()
    }
}

pub fn about(colors: &SceneColors) -> SceneConfig {
    SceneConfig {
        particle_count: 150,
        sampling: Sampling::Box {
            extent: [25.0, 20.0, 10.0],
        },
        palette: vec![colors.particle],
        rings: vec![RingDescriptor {
            radius: 3.5,
            thickness: 0.03,
            color: colors.accent,
            tilt: [PI / 4.0, 0.0, 0.0],
            spin: 0.15,
        }],
        opacity: 0.6,
        motion: Motion {
            spin_x: 0.02,
            spin_y: 0.04,
            ..Motion::default()
        },
        ..SceneConfig::default()
    }
}

/// Wide particle box with three nested rings spinning at increasing rates.
pub fn experience(colors: &SceneColors) -> SceneConfig {
    let mut rng = Rng::with_seed(EXPERIENCE_TILT_SEED);
    let rings = (0..3)
        .map(|i| RingDescriptor {
            radius: 1.5 + i as f32 * 0.5,
            thickness: 0.02,
            color: if i % 2 == 0 {
                colors.accent
            } else {
                colors.particle
            },
            tilt: [rng.f32() * PI, rng.f32() * PI, 0.0],
            spin: 0.1 + i as f32 * 0.05,
        })
        .collect();

    SceneConfig {
        particle_count: 150,
        sampling: Sampling::Box {
            extent: [30.0, 25.0, 15.0],
        },
        palette: vec![colors.particle],
        rings,
        opacity: 0.6,
        motion: Motion {
            spin_x: 0.01,
            spin_y: 0.02,
            ..Motion::default()
        },
        ..SceneConfig::default()
    }
}

/// Soft multi-colored glow behind the contact form.
pub fn contact(colors: &SceneColors) -> SceneConfig {
    SceneConfig {
        particle_count: 60,
        sampling: Sampling::Box {
            extent: [30.0, 20.0, 6.0],
        },
        palette: vec![colors.accent, colors.deep, colors.particle],
        opacity: 0.3,
        motion: Motion {
            spin_y: 0.01,
            wobble_rate: 0.3,
            wobble_amplitude: 0.05,
            ..Motion::default()
        },
        ..SceneConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> SceneColors {
        SceneColors {
            particle: Rgb::from_hex(0xF5D5E0),
            accent: Rgb::from_hex(0xA668C4),
            deep: Rgb::from_hex(0x7B337E),
            core: Rgb::WHITE,
        }
    }

    #[test]
    fn test_every_preset_is_valid() {
        for section in Section::ALL {
            let config = for_section(section, &colors());
            assert_eq!(config.validate(), Ok(()), "{section:?}");
        }
    }

    #[test]
    fn test_experience_tilts_are_stable() {
        assert_eq!(experience(&colors()), experience(&colors()));
        let rings = experience(&colors()).rings;
        assert_eq!(rings.len(), 3);
        assert_eq!(rings[1].color, colors().particle);
        assert!((rings[2].spin - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_only_hero_has_core_and_parallax() {
        for section in Section::ALL {
            let config = for_section(section, &colors());
            let is_hero = section == Section::Home;
            assert_eq!(config.core.is_some(), is_hero);
            assert_eq!(config.motion.parallax > 0.0, is_hero);
        }
    }
}
