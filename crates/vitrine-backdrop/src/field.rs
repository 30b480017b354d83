//! Fixed-size particle field.

use std::f32::consts::TAU;

use fastrand::Rng;
use glam::Vec3;

use crate::scene::Sampling;

/// Particle positions generated once at acquisition time.
///
/// The positions live in a boxed slice, so the field can never grow or
/// shrink after it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    positions: Box<[Vec3]>,
}

impl ParticleField {
    /// Sample `count` positions according to `sampling`.
    pub fn generate(count: usize, sampling: Sampling, rng: &mut Rng) -> Self {
        let positions = (0..count)
            .map(|_| match sampling {
                Sampling::Box { extent } => Vec3::new(
                    (rng.f32() - 0.5) * extent[0],
                    (rng.f32() - 0.5) * extent[1],
                    (rng.f32() - 0.5) * extent[2],
                ),
                Sampling::Sphere {
                    min_radius,
                    max_radius,
                } => {
                    let radius = min_radius + rng.f32() * (max_radius - min_radius);
                    let theta = rng.f32() * TAU;
                    let phi = rng.f32() * TAU;
                    Vec3::new(
                        radius * theta.sin() * phi.cos(),
                        radius * theta.sin() * phi.sin(),
                        radius * theta.cos(),
                    )
                }
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }
}
