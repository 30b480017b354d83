//! Drawable geometry built from a scene description.

use std::f32::consts::{PI, TAU};

use fastrand::Rng;
use glam::Vec3;

use crate::field::ParticleField;
use crate::ledger::{ResourceGuard, ResourceKind, ResourceLedger};
use crate::scene::SceneConfig;

/// Points sampled around each ring.
pub const RING_SEGMENTS: usize = 100;

const CORE_LATITUDES: usize = 6;
const CORE_LONGITUDES: usize = 12;
const SHELL_LATITUDES: usize = 8;
const SHELL_LONGITUDES: usize = 16;

/// Unit-sphere samples for the core and its wireframe shell.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreGeometry {
    pub solid: Box<[Vec3]>,
    pub shell: Box<[Vec3]>,
}

/// Everything a backdrop draws, in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGeometry {
    pub field: ParticleField,
    /// Index pairs into the field.
    pub links: Vec<(usize, usize)>,
    /// Unit circles in the XY plane, one per ring.
    pub rings: Vec<Box<[Vec3]>>,
    pub core: Option<CoreGeometry>,
}

impl SceneGeometry {
    /// Build geometry for a validated scene.
    pub fn build(config: &SceneConfig, rng: &mut Rng) -> Self {
        let field = ParticleField::generate(config.particle_count, config.sampling, rng);

        let links = config
            .links
            .map(|links| {
                let count = field.len();
                (0..links.candidates.min(count))
                    .filter(|_| rng.f32() < links.probability)
                    .map(|i| (i, (i + 1) % count))
                    .collect()
            })
            .unwrap_or_default();

        let rings = config.rings.iter().map(|_| unit_circle(RING_SEGMENTS)).collect();

        let core = config.core.map(|_| CoreGeometry {
            solid: unit_sphere(CORE_LATITUDES, CORE_LONGITUDES),
            shell: unit_sphere(SHELL_LATITUDES, SHELL_LONGITUDES),
        });

        Self {
            field,
            links,
            rings,
            core,
        }
    }

    /// Register one geometry and one material per drawable with the ledger.
    pub fn track(&self, ledger: &ResourceLedger) -> Vec<ResourceGuard> {
        let mut drawables = 1 + self.rings.len();
        if !self.links.is_empty() {
            drawables += 1;
        }
        if self.core.is_some() {
            drawables += 2;
        }
        (0..drawables)
            .flat_map(|_| {
                [
                    ledger.track(ResourceKind::Geometry),
                    ledger.track(ResourceKind::Material),
                ]
            })
            .collect()
    }
}

fn unit_circle(segments: usize) -> Box<[Vec3]> {
    (0..segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * TAU;
            Vec3::new(a.cos(), a.sin(), 0.0)
        })
        .collect()
}

fn unit_sphere(latitudes: usize, longitudes: usize) -> Box<[Vec3]> {
    (1..latitudes)
        .flat_map(|lat| {
            let polar = lat as f32 / latitudes as f32 * PI;
            (0..longitudes).map(move |lon| {
                let azimuth = lon as f32 / longitudes as f32 * TAU;
                Vec3::new(
                    polar.sin() * azimuth.cos(),
                    polar.cos(),
                    polar.sin() * azimuth.sin(),
                )
            })
        })
        .chain([Vec3::Y, Vec3::NEG_Y])
        .collect()
}
