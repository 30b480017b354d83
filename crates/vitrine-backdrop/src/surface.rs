//! Off-screen render surface and camera projection.

use glam::{Mat4, Vec3};
use ratatui::{buffer::Buffer, layout::Rect};
use tracing::debug;
use vitrine_core::Viewport;

/// Width-to-height ratio of one terminal cell.
pub const CELL_ASPECT: f32 = 0.5;

/// Distance of the camera from the origin along +Z.
pub const CAMERA_Z: f32 = 5.0;

const FOV_Y_DEGREES: f32 = 75.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 1000.0;
const MIN_ASPECT: f32 = 1e-3;

/// A world point mapped to a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
    /// Distance from the camera plane.
    pub depth: f32,
}

/// Perspective camera fitted to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    width: u16,
    height: u16,
    aspect: f32,
    view_proj: Mat4,
}

impl Projection {
    /// Build the projection for a viewport. Zero-area viewports are clamped
    /// so the matrices stay finite.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let w = viewport.width.max(1) as f32;
        let h = viewport.height.max(1) as f32;
        let aspect = (w / h * CELL_ASPECT).max(MIN_ASPECT);

        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, Z_NEAR, Z_FAR);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);

        Self {
            width: viewport.width,
            height: viewport.height,
            aspect,
            view_proj: proj * view,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_proj
    }

    /// True when no parameter is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.aspect.is_finite() && self.view_proj.is_finite()
    }

    /// Map a world point to a cell, or `None` when it falls outside the view.
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= Z_NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.x) || !(-1.0..=1.0).contains(&ndc.y) {
            return None;
        }

        let w = self.width as f32;
        let h = self.height as f32;
        let x = (((ndc.x + 1.0) * 0.5 * w) as u16).min(self.width - 1);
        let y = (((1.0 - ndc.y) * 0.5 * h) as u16).min(self.height - 1);

        Some(ScreenPoint {
            x,
            y,
            depth: clip.w,
        })
    }
}

/// The cell buffer a backdrop paints into.
///
/// Exclusively owned by one backdrop; not `Clone`.
#[derive(Debug)]
pub struct RenderSurface {
    buffer: Buffer,
    projection: Projection,
    disposed: bool,
}

impl RenderSurface {
    /// Create a surface sized to the viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, viewport.width, viewport.height)),
            projection: Projection::for_viewport(viewport),
            disposed: false,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.buffer.area.width, self.buffer.area.height)
    }

    /// Match the surface to a new viewport size. Ignored once disposed.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        self.buffer
            .resize(Rect::new(0, 0, viewport.width, viewport.height));
        self.buffer.reset();
        self.projection = Projection::for_viewport(viewport);
        debug!(
            width = viewport.width,
            height = viewport.height,
            aspect = self.projection.aspect(),
            "surface resized"
        );
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Free the cell storage. Returns false if already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.buffer = Buffer::empty(Rect::ZERO);
        self.disposed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_viewport_projection_is_finite() {
        let projection = Projection::for_viewport(Viewport::new(0, 0));
        assert!(projection.is_finite());
        assert!(projection.aspect() > 0.0);
        assert_eq!(projection.project(Vec3::ZERO), None);
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let projection = Projection::for_viewport(Viewport::new(80, 24));
        let p = projection.project(Vec3::ZERO).unwrap();
        assert_eq!((p.x, p.y), (40, 12));
        assert!((p.depth - CAMERA_Z).abs() < 1e-3);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let projection = Projection::for_viewport(Viewport::new(80, 24));
        assert_eq!(projection.project(Vec3::new(0.0, 0.0, 10.0)), None);
    }

    #[test]
    fn test_resize_tracks_viewport() {
        let mut surface = RenderSurface::new(Viewport::new(10, 5));
        surface.resize(Viewport::new(30, 12));
        assert_eq!(surface.viewport(), Viewport::new(30, 12));
        surface.resize(Viewport::new(0, 0));
        assert_eq!(surface.viewport(), Viewport::new(0, 0));
        assert!(surface.projection().is_finite());
    }

    #[test]
    fn test_dispose_once() {
        let mut surface = RenderSurface::new(Viewport::new(10, 5));
        assert!(surface.dispose());
        assert!(!surface.dispose());
        surface.resize(Viewport::new(20, 20));
        assert_eq!(surface.viewport(), Viewport::new(0, 0));
    }
}
