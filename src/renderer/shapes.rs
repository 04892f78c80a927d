//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in pixel coordinates and appended
//! to a caller-owned buffer.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Color;

/// Segments used for explosion rings
pub const RING_SEGMENTS: u32 = 32;

/// Concentric bands used to approximate the background gradient
pub const GRADIENT_BANDS: u32 = 24;

/// Segments per gradient band
pub const GRADIENT_SEGMENTS: u32 = 48;

/// Translucent layers that make up a glow halo
pub const GLOW_LAYERS: u32 = 4;

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Axis-aligned filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, color: Color) {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x0, y1, color));

    out.push(Vertex::new(x0, y1, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));
}

/// Soft halo around a rect: progressively larger, fainter copies
pub fn glow_rect(out: &mut Vec<Vertex>, pos: Vec2, size: Vec2, blur: f32, color: Color) {
    for layer in (1..=GLOW_LAYERS).rev() {
        let t = layer as f32 / GLOW_LAYERS as f32;
        let spread = Vec2::splat(blur * t);
        let alpha = color[3] * 0.35 * (1.0 - t * 0.75);
        rect(
            out,
            pos - spread,
            size + spread * 2.0,
            [color[0], color[1], color[2], alpha],
        );
    }
}

/// Ring band with a color that varies from the inner to the outer edge
pub fn gradient_ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: Color,
    outer_color: Color,
    segments: u32,
) {
    out.reserve((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = center + dir1 * inner_radius;
        let outer1 = center + dir1 * outer_radius;
        let inner2 = center + dir2 * inner_radius;
        let outer2 = center + dir2 * outer_radius;

        // Two triangles per segment
        out.push(Vertex::new(inner1.x, inner1.y, inner_color));
        out.push(Vertex::new(outer1.x, outer1.y, outer_color));
        out.push(Vertex::new(inner2.x, inner2.y, inner_color));

        out.push(Vertex::new(inner2.x, inner2.y, inner_color));
        out.push(Vertex::new(outer1.x, outer1.y, outer_color));
        out.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }
}

/// Ring (hollow circle) in a single color
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) {
    gradient_ring(out, center, inner_radius, outer_radius, color, color, segments);
}

/// Radial gradient covering the whole surface. Pixels beyond `radius` take
/// the outer color, like a canvas gradient's last stop.
pub fn radial_gradient(
    out: &mut Vec<Vertex>,
    surface: Vec2,
    center: Vec2,
    radius: f32,
    inner: Color,
    outer: Color,
) {
    rect(out, Vec2::ZERO, surface, outer);
    if radius <= 0.0 {
        return;
    }

    for band in 0..GRADIENT_BANDS {
        let t0 = band as f32 / GRADIENT_BANDS as f32;
        let t1 = (band + 1) as f32 / GRADIENT_BANDS as f32;
        gradient_ring(
            out,
            center,
            radius * t0,
            radius * t1,
            lerp_color(inner, outer, t0),
            lerp_color(inner, outer, t1),
            GRADIENT_SEGMENTS,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(10.0, 20.0), Vec2::new(5.0, 6.0), [1.0; 4]);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 26.0);
    }

    #[test]
    fn test_ring_radii() {
        let mut out = Vec::new();
        ring(&mut out, Vec2::ZERO, 4.0, 6.0, [1.0; 4], 8);
        assert_eq!(out.len(), 8 * 6);
        for v in &out {
            let r = Vec2::from(v.position).length();
            assert!((r - 4.0).abs() < 1e-4 || (r - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_glow_is_fainter_than_source() {
        let mut out = Vec::new();
        glow_rect(&mut out, Vec2::ZERO, Vec2::ONE, 10.0, [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(out.len(), (GLOW_LAYERS * 6) as usize);
        assert!(out.iter().all(|v| v.color[3] < 1.0));
    }

    #[test]
    fn test_gradient_runs_inner_to_outer() {
        let inner = [0.0, 0.0, 0.0, 1.0];
        let outer = [1.0, 1.0, 1.0, 1.0];
        let mut out = Vec::new();
        radial_gradient(&mut out, Vec2::new(8.0, 6.0), Vec2::new(4.0, 3.0), 8.0, inner, outer);
        // Backing rect first, then the first band starts at the inner color
        assert_eq!(out[0].color, outer);
        assert_eq!(out[6].color, inner);
    }
}
