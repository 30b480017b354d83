//! Scene description and time-driven transforms.
//!
//! A [`SceneConfig`] is built once per hosting section and never mutated
//! afterwards. Everything that moves is derived from elapsed time by
//! [`SceneTransform::at`], so a frame only needs the clock reading.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use vitrine_core::{AnimationSpeed, Rgb};

use crate::error::BackdropError;

/// Immutable description of one backdrop scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of particles in the field.
    pub particle_count: usize,
    /// How particle positions are sampled.
    pub sampling: Sampling,
    /// Particle colors; particle `i` takes `palette[i % len]`.
    pub palette: Vec<Rgb>,
    /// Torus rings drawn around the origin.
    pub rings: Vec<RingDescriptor>,
    /// Pulsing sphere at the origin.
    pub core: Option<CoreDescriptor>,
    /// Faint segments between consecutive particles.
    pub links: Option<LinkDescriptor>,
    /// Overall opacity against the section background.
    pub opacity: f32,
    pub blend: Blend,
    pub motion: Motion,
    /// Fixed seed for reproducible particle fields.
    pub seed: Option<u64>,
}

/// Particle placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sampling {
    /// Uniform inside a box centred on the origin with the given full extents.
    Box { extent: [f32; 3] },
    /// Random radius in `min_radius..max_radius` with uniform polar angles.
    Sphere { min_radius: f32, max_radius: f32 },
}

/// A thin torus around the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    pub radius: f32,
    pub thickness: f32,
    pub color: Rgb,
    /// Fixed XYZ Euler tilt in radians.
    #[serde(default)]
    pub tilt: [f32; 3],
    /// Spin about the ring axis in radians per second.
    #[serde(default)]
    pub spin: f32,
}

/// A pulsing sphere at the origin with an optional wireframe shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreDescriptor {
    pub radius: f32,
    pub color: Rgb,
    pub pulse_rate: f32,
    pub pulse_amplitude: f32,
    #[serde(default)]
    pub wireframe: Option<Rgb>,
}

/// Segments joining particle `i` to `i + 1` for the first `candidates` particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub candidates: usize,
    /// Chance that a candidate segment is kept.
    pub probability: f32,
    pub color: Rgb,
}

/// How overlapping glyphs combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Blend {
    /// Later glyphs replace earlier ones.
    Normal,
    /// Overlaps brighten, like additive light.
    #[default]
    Additive,
}

/// Angular rates of the particle field, in radians per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Motion {
    pub spin_x: f32,
    pub spin_y: f32,
    pub wobble_rate: f32,
    pub wobble_amplitude: f32,
    /// How far the pointer tilts the field.
    pub parallax: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            sampling: Sampling::Box {
                extent: [20.0, 15.0, 8.0],
            },
            palette: vec![Rgb::from_hex(0xF5D5E0)],
            rings: Vec::new(),
            core: None,
            links: None,
            opacity: 0.6,
            blend: Blend::Additive,
            motion: Motion {
                spin_y: 0.02,
                ..Motion::default()
            },
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Check that the scene can be built.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.particle_count == 0 {
            return Err(BackdropError::NoParticles);
        }
        if self.palette.is_empty() {
            return Err(BackdropError::EmptyPalette);
        }
        match self.sampling {
            Sampling::Box { extent } => {
                if extent.iter().any(|e| !e.is_finite() || *e < 0.0) {
                    return Err(BackdropError::InvalidBounds(format!(
                        "box extent {extent:?} must be finite and non-negative"
                    )));
                }
            }
            Sampling::Sphere {
                min_radius,
                max_radius,
            } => {
                if !min_radius.is_finite()
                    || !max_radius.is_finite()
                    || min_radius < 0.0
                    || min_radius > max_radius
                {
                    return Err(BackdropError::InvalidBounds(format!(
                        "sphere radii {min_radius}..{max_radius}"
                    )));
                }
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(BackdropError::InvalidOpacity(self.opacity));
        }
        for ring in &self.rings {
            if !(ring.radius.is_finite() && ring.radius > 0.0) || ring.thickness < 0.0 {
                return Err(BackdropError::InvalidShape(format!(
                    "ring radius {} thickness {}",
                    ring.radius, ring.thickness
                )));
            }
        }
        if let Some(core) = &self.core
            && !(core.radius.is_finite() && core.radius > 0.0)
        {
            return Err(BackdropError::InvalidShape(format!(
                "core radius {}",
                core.radius
            )));
        }
        if let Some(links) = &self.links
            && !(0.0..=1.0).contains(&links.probability)
        {
            return Err(BackdropError::InvalidShape(format!(
                "link probability {}",
                links.probability
            )));
        }
        Ok(())
    }

    /// Scale every angular rate by the animation speed.
    pub fn with_speed(mut self, speed: AnimationSpeed) -> Self {
        let k = speed.multiplier();
        self.motion.spin_x *= k;
        self.motion.spin_y *= k;
        self.motion.wobble_rate *= k;
        for ring in &mut self.rings {
            ring.spin *= k;
        }
        if let Some(core) = &mut self.core {
            core.pulse_rate *= k;
        }
        self
    }

    /// Scale the particle count, keeping at least one particle.
    pub fn with_density(mut self, density: f32) -> Self {
        let density = if density.is_finite() {
            density.max(0.0)
        } else {
            1.0
        };
        self.particle_count = ((self.particle_count as f32 * density).round() as usize).max(1);
        self
    }

    /// Color of particle `index`.
    pub fn particle_color(&self, index: usize) -> Rgb {
        if self.palette.is_empty() {
            return Rgb::WHITE;
        }
        self.palette[index % self.palette.len()]
    }
}

/// Transforms of every moving part of a scene at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTransform {
    /// Field rotation about X in radians.
    pub field_pitch: f32,
    /// Field rotation about Y in radians.
    pub field_yaw: f32,
    /// Spin of each ring about its own axis.
    pub ring_angles: Vec<f32>,
    /// Uniform scale of the core sphere.
    pub core_scale: f32,
}

impl SceneTransform {
    /// Compute the transform at `t` seconds after acquisition.
    ///
    /// Pure in `t`: the same reading always yields the same transform, no
    /// matter how many frames were drawn before it.
    pub fn at(config: &SceneConfig, t: f32) -> Self {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        let motion = &config.motion;
        let wobble = (t * motion.wobble_rate).sin() * motion.wobble_amplitude;

        Self {
            field_pitch: motion.spin_x * t + wobble,
            field_yaw: motion.spin_y * t,
            ring_angles: config.rings.iter().map(|r| r.spin * t).collect(),
            core_scale: config
                .core
                .map(|c| 1.0 + (t * c.pulse_rate).sin() * c.pulse_amplitude)
                .unwrap_or(1.0),
        }
    }

    /// Tilt the field toward a pointer position in `[-1, 1]²`.
    pub fn with_pointer(mut self, pointer: Vec2, parallax: f32) -> Self {
        self.field_yaw += pointer.x * parallax;
        self.field_pitch += pointer.y * parallax;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ringed() -> SceneConfig {
        SceneConfig {
            rings: vec![RingDescriptor {
                radius: 3.0,
                thickness: 0.02,
                color: Rgb::from_hex(0xA668C4),
                tilt: [std::f32::consts::FRAC_PI_3, 0.0, 0.0],
                spin: 0.1,
            }],
            core: Some(CoreDescriptor {
                radius: 1.0,
                color: Rgb::WHITE,
                pulse_rate: 2.0,
                pulse_amplitude: 0.1,
                wireframe: None,
            }),
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SceneConfig::default().validate(), Ok(()));
        assert_eq!(ringed().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let zero = SceneConfig {
            particle_count: 0,
            ..SceneConfig::default()
        };
        assert_eq!(zero.validate(), Err(BackdropError::NoParticles));

        let empty = SceneConfig {
            palette: Vec::new(),
            ..SceneConfig::default()
        };
        assert_eq!(empty.validate(), Err(BackdropError::EmptyPalette));

        let inverted = SceneConfig {
            sampling: Sampling::Sphere {
                min_radius: 5.0,
                max_radius: 3.0,
            },
            ..SceneConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(BackdropError::InvalidBounds(_))
        ));

        let nan = SceneConfig {
            sampling: Sampling::Box {
                extent: [f32::NAN, 1.0, 1.0],
            },
            ..SceneConfig::default()
        };
        assert!(nan.validate().is_err());

        let opaque = SceneConfig {
            opacity: 1.5,
            ..SceneConfig::default()
        };
        assert_eq!(opaque.validate(), Err(BackdropError::InvalidOpacity(1.5)));
    }

    #[test]
    fn test_transform_at_zero() {
        let xf = SceneTransform::at(&ringed(), 0.0);
        assert_eq!(xf.field_yaw, 0.0);
        assert_eq!(xf.ring_angles, vec![0.0]);
        assert_eq!(xf.core_scale, 1.0);
    }

    #[test]
    fn test_negative_and_nan_time_clamp_to_start() {
        let config = ringed();
        assert_eq!(
            SceneTransform::at(&config, -3.0),
            SceneTransform::at(&config, 0.0)
        );
        assert_eq!(
            SceneTransform::at(&config, f32::NAN),
            SceneTransform::at(&config, 0.0)
        );
    }

    #[test]
    fn test_core_pulse_stays_in_amplitude() {
        let config = ringed();
        for step in 0..200 {
            let scale = SceneTransform::at(&config, step as f32 * 0.05).core_scale;
            assert!((0.9..=1.1).contains(&scale), "scale {scale}");
        }
    }

    #[test]
    fn test_speed_scales_rates() {
        let fast = ringed().with_speed(AnimationSpeed::Fast);
        assert_eq!(fast.motion.spin_y, 0.04);
        assert_eq!(fast.rings[0].spin, 0.2);
        assert_eq!(fast.core.map(|c| c.pulse_rate), Some(4.0));
    }

    #[test]
    fn test_density_keeps_one_particle() {
        let config = SceneConfig::default();
        assert_eq!(config.clone().with_density(0.5).particle_count, 50);
        assert_eq!(config.with_density(0.0).particle_count, 1);
    }

    #[test]
    fn test_pointer_parallax() {
        let xf = SceneTransform::at(&ringed(), 0.0).with_pointer(Vec2::new(1.0, -0.5), 0.1);
        assert!((xf.field_yaw - 0.1).abs() < 1e-6);
        assert!((xf.field_pitch + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_config_from_toml() {
        let config: SceneConfig = toml::from_str(
            r##"
            particle_count = 12
            palette = ["#ff0000", "#00ff00"]
            opacity = 0.25
            blend = "normal"

            [sampling]
            kind = "sphere"
            min_radius = 1.0
            max_radius = 2.0

            [[rings]]
            radius = 2.0
            thickness = 0.05
            color = "#a668c4"
            spin = 0.3
            "##,
        )
        .unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.particle_color(3), Rgb(0, 255, 0));
        assert_eq!(config.blend, Blend::Normal);
        assert_eq!(config.rings[0].tilt, [0.0; 3]);
        assert_eq!(config.validate(), Ok(()));
    }
}
