//! The 2D drawing surface the scene is drawn against
//!
//! Mirrors the small subset of an immediate-mode canvas the game needs:
//! rectangles, a radial background gradient, glow halos, global alpha and
//! stroked circles. Coordinates are pixels, origin top-left, y down.

use glam::Vec2;

use crate::Color;

pub trait Canvas {
    /// Surface size in pixels
    fn size(&self) -> Vec2;

    /// Fill the whole surface with a radial gradient centered at `center`
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);

    /// Halo applied to subsequent fills; `blur <= 0` turns it off
    fn set_glow(&mut self, blur: f32, color: Color);

    /// Opacity multiplier for subsequent draws, clamped to `[0, 1]`
    fn set_alpha(&mut self, alpha: f32);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color);
}
