//! Rasterise scene geometry into a cell buffer.

use glam::{EulerRot, Mat4, Vec3};
use ratatui::{buffer::Buffer, style::Color};
use vitrine_core::Rgb;

use crate::chars::{CORE, GLOW_RAMP, LINK, RING_THICK, RING_THIN, WIREFRAME};
use crate::color::depth_shade;
use crate::geometry::SceneGeometry;
use crate::scene::{Blend, SceneConfig, SceneTransform};
use crate::surface::{CAMERA_Z, Projection, ScreenPoint};

/// Nearest and farthest depths used for shading.
const NEAR_DEPTH: f32 = 1.0;
const FAR_DEPTH: f32 = CAMERA_Z + 8.0;

/// Rings thicker than this use the heavy glyph.
const THICK_RING: f32 = 0.035;

const SHELL_SCALE: f32 = 1.1;

/// Draw one frame of the scene. The buffer is cleared first.
pub fn draw(
    geometry: &SceneGeometry,
    config: &SceneConfig,
    transform: &SceneTransform,
    projection: &Projection,
    buf: &mut Buffer,
) {
    buf.reset();
    let blend = config.blend;
    let field_model = Mat4::from_euler(
        EulerRot::XYZ,
        transform.field_pitch,
        transform.field_yaw,
        0.0,
    );
    let positions = geometry.field.positions();

    if let Some(links) = &config.links {
        let color = links.color.scale(0.5);
        for &(a, b) in &geometry.links {
            let (Some(pa), Some(pb)) = (positions.get(a), positions.get(b)) else {
                continue;
            };
            let (Some(sa), Some(sb)) = (
                projection.project(field_model.transform_point3(*pa)),
                projection.project(field_model.transform_point3(*pb)),
            ) else {
                continue;
            };
            for (x, y) in line_cells(sa, sb) {
                plot(buf, x, y, LINK, color, blend);
            }
        }
    }

    for (i, (ring, points)) in config.rings.iter().zip(&geometry.rings).enumerate() {
        let angle = transform.ring_angles.get(i).copied().unwrap_or(0.0);
        let model = Mat4::from_euler(EulerRot::XYZ, ring.tilt[0], ring.tilt[1], ring.tilt[2])
            * Mat4::from_rotation_z(angle)
            * Mat4::from_scale(Vec3::splat(ring.radius));
        let glyph = if ring.thickness > THICK_RING {
            RING_THICK
        } else {
            RING_THIN
        };
        for p in points.iter() {
            if let Some(sp) = projection.project(model.transform_point3(*p)) {
                plot(buf, sp.x, sp.y, glyph, shade(ring.color, sp), blend);
            }
        }
    }

    for (i, p) in positions.iter().enumerate() {
        if let Some(sp) = projection.project(field_model.transform_point3(*p)) {
            let depth = normalized_depth(sp.depth);
            let level = ((1.0 - depth) * (GLOW_RAMP.len() - 2) as f32).round() as usize;
            let glyph = GLOW_RAMP[level.min(GLOW_RAMP.len() - 2)];
            plot(buf, sp.x, sp.y, glyph, shade(config.particle_color(i), sp), blend);
        }
    }

    if let (Some(core), Some(shape)) = (&config.core, &geometry.core) {
        let radius = core.radius * transform.core_scale;
        let solid = Mat4::from_scale(Vec3::splat(radius));
        for p in shape.solid.iter() {
            if let Some(sp) = projection.project(solid.transform_point3(*p)) {
                plot(buf, sp.x, sp.y, CORE, shade(core.color, sp), blend);
            }
        }
        if let Some(wire) = core.wireframe {
            let shell = Mat4::from_scale(Vec3::splat(radius * SHELL_SCALE));
            for p in shape.shell.iter() {
                if let Some(sp) = projection.project(shell.transform_point3(*p)) {
                    plot(buf, sp.x, sp.y, WIREFRAME, shade(wire, sp), blend);
                }
            }
        }
    }
}

fn normalized_depth(depth: f32) -> f32 {
    ((depth - NEAR_DEPTH) / (FAR_DEPTH - NEAR_DEPTH)).clamp(0.0, 1.0)
}

fn shade(color: Rgb, point: ScreenPoint) -> Rgb {
    depth_shade(color, normalized_depth(point.depth))
}

/// Write a glyph, combining with whatever is already in the cell.
fn plot(buf: &mut Buffer, x: u16, y: u16, glyph: char, color: Rgb, blend: Blend) {
    let Some(cell) = buf.cell_mut((x, y)) else {
        return;
    };

    let (glyph, color) = match (blend, cell.symbol().chars().next(), cell.fg) {
        (Blend::Additive, Some(prev), Color::Rgb(r, g, b)) if prev != ' ' => (
            brighter(prev, glyph),
            Rgb(r, g, b).saturating_add(color.scale(0.5)),
        ),
        _ => (glyph, color),
    };
    cell.set_char(glyph).set_fg(color.into());
}

/// One step up the glow ramp from the brighter of two glyphs.
fn brighter(a: char, b: char) -> char {
    let rank = |c: char| GLOW_RAMP.iter().position(|g| *g == c);
    match (rank(a), rank(b)) {
        (Some(i), Some(j)) => GLOW_RAMP[(i.max(j) + 1).min(GLOW_RAMP.len() - 1)],
        _ => b,
    }
}

/// Cells on the segment between two points (Bresenham).
fn line_cells(a: ScreenPoint, b: ScreenPoint) -> Vec<(u16, u16)> {
    let (mut x0, mut y0) = (a.x as i32, a.y as i32);
    let (x1, y1) = (b.x as i32, b.y as i32);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        cells.push((x0 as u16, y0 as u16));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;
    use ratatui::layout::Rect;
    use vitrine_core::Viewport;

    use super::*;
    use crate::scene::{Motion, Sampling};

    fn point(x: u16, y: u16) -> ScreenPoint {
        ScreenPoint { x, y, depth: 5.0 }
    }

    fn lit_cells(buf: &Buffer) -> usize {
        buf.content.iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn test_line_cells_endpoints() {
        let cells = line_cells(point(0, 0), point(4, 2));
        assert_eq!(cells.first(), Some(&(0, 0)));
        assert_eq!(cells.last(), Some(&(4, 2)));
        assert_eq!(cells.len(), 5);
        assert_eq!(line_cells(point(3, 3), point(3, 3)), vec![(3, 3)]);
    }

    #[test]
    fn test_brighter_steps_up_ramp() {
        assert_eq!(brighter('.', '·'), '∙');
        assert_eq!(brighter('●', '●'), '●');
        assert_eq!(brighter('○', '·'), '·');
    }

    #[test]
    fn test_additive_overlap_brightens() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 1));
        plot(&mut buf, 0, 0, '·', Rgb(100, 0, 0), Blend::Additive);
        plot(&mut buf, 0, 0, '·', Rgb(100, 0, 0), Blend::Additive);
        assert_eq!(buf[(0, 0)].symbol(), "∙");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(150, 0, 0));

        plot(&mut buf, 1, 0, '·', Rgb(100, 0, 0), Blend::Normal);
        plot(&mut buf, 1, 0, '.', Rgb(0, 100, 0), Blend::Normal);
        assert_eq!(buf[(1, 0)].symbol(), ".");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(0, 100, 0));
    }

    #[test]
    fn test_out_of_bounds_plot_is_ignored() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 2, 2));
        plot(&mut buf, 5, 5, '●', Rgb::WHITE, Blend::Normal);
        assert_eq!(lit_cells(&buf), 0);
    }

    #[test]
    fn test_draw_lights_cells_and_clears_between_frames() {
        let config = SceneConfig {
            particle_count: 50,
            sampling: Sampling::Box {
                extent: [4.0, 4.0, 2.0],
            },
            motion: Motion {
                spin_y: 1.0,
                ..Motion::default()
            },
            ..SceneConfig::default()
        };
        let geometry = SceneGeometry::build(&config, &mut Rng::with_seed(9));
        let projection = Projection::for_viewport(Viewport::new(60, 20));
        let mut buf = Buffer::empty(Rect::new(0, 0, 60, 20));

        draw(
            &geometry,
            &config,
            &SceneTransform::at(&config, 0.0),
            &projection,
            &mut buf,
        );
        let first = lit_cells(&buf);
        assert!(first > 0);
        assert!(first <= 50);

        draw(
            &geometry,
            &config,
            &SceneTransform::at(&config, 1.0),
            &projection,
            &mut buf,
        );
        assert!(lit_cells(&buf) <= 50);
    }
}
