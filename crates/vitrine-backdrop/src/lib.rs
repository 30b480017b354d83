//! Animated 3D particle backdrops for the vitrine portfolio.
//!
//! A backdrop owns an off-screen cell surface, advances a scene as a pure
//! function of elapsed time and composites behind a page section. Its
//! lifetime is scoped: [`acquire`] on mount, release on unmount (explicitly
//! or by dropping the handle), with every resource accounted for in a
//! [`ResourceLedger`].

mod backdrop;
mod chars;
mod clock;
mod color;
mod error;
mod field;
mod geometry;
mod ledger;
pub mod presets;
mod raster;
mod scene;
mod scheduler;
mod surface;

pub use backdrop::{BackdropHandle, BackdropHost, BackdropView, FrameOutcome, acquire};
pub use clock::FrameClock;
pub use color::{depth_shade, hsl_to_rgb, rgb_to_hsl};
pub use error::BackdropError;
pub use field::ParticleField;
pub use geometry::SceneGeometry;
pub use ledger::{ResourceGuard, ResourceKind, ResourceLedger};
pub use presets::SceneColors;
pub use scene::{
    Blend, CoreDescriptor, LinkDescriptor, Motion, RingDescriptor, Sampling, SceneConfig,
    SceneTransform,
};
pub use scheduler::{FrameBatch, FrameScheduler, FrameToken};
pub use surface::{CAMERA_Z, CELL_ASPECT, Projection, RenderSurface, ScreenPoint};
