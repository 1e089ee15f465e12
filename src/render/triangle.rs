//! Scanline triangle fill for the software backend.
//!
//! Vertices are rounded to whole pixels and the edges are walked in `i64` fixed point
//! with a 32-bit fraction. Every covered pixel goes through an [`AlphaPen`], so the
//! blend amount and method apply uniformly.
//!
//! [`AlphaPen`]: crate::AlphaPen

use crate::foundation::core::{Affine, Point, Vec2};
use crate::primitive::data::Polygon;
use crate::primitive::mesh::Mesh;
use crate::surface::blend::BlendMethod;
use crate::surface::buffer::Surface;
use crate::surface::color::Color;

const FIXED_SHIFT: u32 = 32;

// Keeps `x << FIXED_SHIFT` and every slope product inside `i64`.
const MAX_COORD: f64 = (1u64 << 29) as f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct IntPoint {
    x: i64,
    y: i64,
}

fn round_point(p: Point) -> Option<IntPoint> {
    // Written so that NaN fails the test.
    if !(p.x.abs() <= MAX_COORD && p.y.abs() <= MAX_COORD) {
        return None;
    }
    Some(IntPoint {
        x: p.x.round() as i64,
        y: p.y.round() as i64,
    })
}

fn round_triangle(positions: [Point; 3]) -> Option<[IntPoint; 3]> {
    let ip = [
        round_point(positions[0])?,
        round_point(positions[1])?,
        round_point(positions[2])?,
    ];
    if ip[0] == ip[1] || ip[0] == ip[2] || ip[1] == ip[2] {
        return None;
    }
    Some(ip)
}

fn fixed(v: i64) -> i64 {
    v << FIXED_SHIFT
}

fn fixed_x_div_y(dx: i64, dy: i64) -> i64 {
    if dy == 0 { 0 } else { fixed(dx) / dy }
}

/// Straight edge walked downwards from scanline `y`.
#[derive(Clone, Copy, Debug)]
struct Edge {
    x: i64,
    y: i64,
    slope: i64,
}

impl Edge {
    fn new(from: IntPoint, slope: i64) -> Self {
        Self {
            x: fixed(from.x),
            y: from.y,
            slope,
        }
    }

    fn x_at(self, y: i64) -> i64 {
        self.slope.saturating_mul(y - self.y).saturating_add(self.x)
    }
}

fn emit_rows(
    left: Edge,
    right: Edge,
    rows: std::ops::Range<i64>,
    width: i64,
    span: &mut impl FnMut(i64, i64, i64),
) {
    for y in rows {
        let x0 = (left.x_at(y) >> FIXED_SHIFT).max(0);
        let x1 = (right.x_at(y) >> FIXED_SHIFT).min(width - 1);
        if x0 <= x1 {
            span(y, x0, x1);
        }
    }
}

/// Call `span(y, x0, x1)` for every scanline of the triangle inside `width × height`;
/// `x0..=x1` are the covered pixels.
fn walk_triangle(
    mut ip: [IntPoint; 3],
    width: i64,
    height: i64,
    mut span: impl FnMut(i64, i64, i64),
) {
    ip.sort_by_key(|p| p.y);
    let [p0, p1, p2] = ip;

    // All corners on one row: cover its full extent.
    if p0.y == p2.y {
        let x0 = p0.x.min(p1.x).min(p2.x).max(0);
        let x1 = p0.x.max(p1.x).max(p2.x).min(width - 1);
        if (0..height).contains(&p0.y) && x0 <= x1 {
            span(p0.y, x0, x1);
        }
        return;
    }

    let dx01 = fixed_x_div_y(p1.x - p0.x, p1.y - p0.y);
    let dx02 = fixed_x_div_y(p2.x - p0.x, p2.y - p0.y);
    let dx12 = fixed_x_div_y(p2.x - p1.x, p2.y - p1.y);

    // Upper part: both edges leave p0, the smaller slope is on the left.
    if p0.y < p1.y {
        let (l, r) = if dx01 < dx02 { (dx01, dx02) } else { (dx02, dx01) };
        let rows = p0.y.max(0)..p1.y.min(height);
        emit_rows(Edge::new(p0, l), Edge::new(p0, r), rows, width, &mut span);
    }

    // Lower part: p0->p2 against p1->p2, ordered by where they cross the middle row.
    let long = Edge::new(p0, dx02);
    let short = Edge::new(p1, dx12);
    let (left, right) = if long.x_at(p1.y) <= short.x {
        (long, short)
    } else {
        (short, long)
    };
    let rows = p1.y.max(0)..p2.y.saturating_add(1).min(height);
    emit_rows(left, right, rows, width, &mut span);
}

fn is_offscreen(ip: &[IntPoint; 3], width: i64, height: i64) -> bool {
    ip.iter().all(|p| p.x < 0)
        || ip.iter().all(|p| p.x >= width)
        || ip.iter().all(|p| p.y < 0)
        || ip.iter().all(|p| p.y >= height)
}

fn triangle_frame(p: [Point; 3]) -> Affine {
    Affine::new([
        p[1].x - p[0].x,
        p[1].y - p[0].y,
        p[2].x - p[0].x,
        p[2].y - p[0].y,
        p[0].x,
        p[0].y,
    ])
}

/// Map from target pixel space to texture space fixed by three vertex pairs.
fn target_to_texture(positions: [Point; 3], tex_coords: [Point; 3]) -> Option<Affine> {
    let target = triangle_frame(positions);
    let det = target.determinant();
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    Some(triangle_frame(tex_coords) * target.inverse())
}

fn in_texture(p: Point, width: f64, height: f64) -> bool {
    // NaN compares false and lands outside.
    p.x >= 0.0 && p.x < width && p.y >= 0.0 && p.y < height
}

/// Fill one triangle of `target` with bicubic samples of `texture`.
///
/// `positions` are in target pixel space and `tex_coords` in texture pixel space.
/// Pixels whose texture coordinate falls outside `[0, width) × [0, height)` are
/// written fully transparent; the texture is never wrapped or clamped. Returns
/// `false` when nothing was rasterized (coincident rounded corners, a singular corner
/// frame, or empty surfaces).
pub fn fill_textured_triangle(
    target: &mut Surface,
    positions: [Point; 3],
    texture: &Surface,
    tex_coords: [Point; 3],
    alpha: f32,
    blend_method: BlendMethod,
) -> bool {
    if !target.is_valid() || !texture.is_valid() {
        return false;
    }
    let Some(ip) = round_triangle(positions) else {
        return false;
    };
    let Some(matrix) = target_to_texture(positions, tex_coords) else {
        return false;
    };

    let coeffs = matrix.as_coeffs();
    let step = Vec2::new(coeffs[0], coeffs[1]);
    let (tw, th) = (f64::from(texture.width()), f64::from(texture.height()));
    let (w, h) = (i64::from(target.width()), i64::from(target.height()));

    walk_triangle(ip, w, h, |y, x0, x1| {
        let mut tex = matrix * Point::new(x0 as f64, y as f64);
        let mut pen = target.pen(x0 as i32, y as i32);
        pen.set_blend_method(blend_method);
        for _ in x0..=x1 {
            if in_texture(tex, tw, th) {
                pen.set_alpha(alpha);
                pen.put_value(texture.cubic_sample(tex.x, tex.y));
            } else {
                pen.set_alpha(0.0);
                pen.put_value(Color::alpha());
            }
            pen.inc_x();
            tex += step;
        }
    });
    true
}

/// Fill one triangle of `target` with a single color.
///
/// Same rounding, degeneracy rule and edge walk as [`fill_textured_triangle`].
pub fn fill_triangle(
    target: &mut Surface,
    positions: [Point; 3],
    color: Color,
    alpha: f32,
    blend_method: BlendMethod,
) -> bool {
    if !target.is_valid() {
        return false;
    }
    let Some(ip) = round_triangle(positions) else {
        return false;
    };
    let (w, h) = (i64::from(target.width()), i64::from(target.height()));

    walk_triangle(ip, w, h, |y, x0, x1| {
        let mut pen = target.pen(x0 as i32, y as i32);
        pen.set_alpha(alpha);
        pen.set_blend_method(blend_method);
        for _ in x0..=x1 {
            pen.put_value(color);
            pen.inc_x();
        }
    });
    true
}

fn culled(target: &Surface, positions: [Point; 3]) -> bool {
    let (w, h) = (i64::from(target.width()), i64::from(target.height()));
    let ip = [
        round_point(positions[0]),
        round_point(positions[1]),
        round_point(positions[2]),
    ];
    match ip {
        [Some(a), Some(b), Some(c)] => is_offscreen(&[a, b, c], w, h),
        _ => true,
    }
}

/// Draw every triangle of `mesh` with [`fill_textured_triangle`].
///
/// Vertex positions go through `transform`, texture coordinates through
/// `texture_transform`. With `cull` set, triangles lying entirely beyond one edge of
/// `target` are skipped up front; the output is the same either way. Returns the number
/// of triangles rasterized.
#[allow(clippy::too_many_arguments)]
pub fn render_mesh(
    target: &mut Surface,
    mesh: &Mesh,
    transform: Affine,
    texture: &Surface,
    texture_transform: Affine,
    alpha: f32,
    blend_method: BlendMethod,
    cull: bool,
) -> usize {
    let mut drawn = 0;
    for index in 0..mesh.triangles.len() {
        let Some((positions, tex_coords)) =
            mesh.transformed_triangle(index, transform, texture_transform)
        else {
            continue;
        };
        if cull && culled(target, positions) {
            continue;
        }
        if fill_textured_triangle(target, positions, texture, tex_coords, alpha, blend_method) {
            drawn += 1;
        }
    }
    drawn
}

/// Draw every triangle of `polygon` with [`fill_triangle`]. Returns the number of
/// triangles rasterized.
pub fn fill_polygon(
    target: &mut Surface,
    polygon: &Polygon,
    transform: Affine,
    color: Color,
    alpha: f32,
    blend_method: BlendMethod,
    cull: bool,
) -> usize {
    let mut drawn = 0;
    for positions in polygon.transformed_triangles(transform) {
        if cull && culled(target, positions) {
            continue;
        }
        if fill_triangle(target, positions, color, alpha, blend_method) {
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
#[path = "../../tests/unit/render/triangle.rs"]
mod tests;
