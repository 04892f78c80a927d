//! A recording canvas
//!
//! `DrawList` captures one frame as a flat list of commands with the current
//! alpha and glow baked in. The GPU backend tessellates it; tests inspect it.

use glam::Vec2;

use super::canvas::Canvas;
use super::shapes;
use super::vertex::Vertex;
use crate::Color;
use crate::colors::with_alpha;

/// Halo drawn around a filled rect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RadialGradient {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        glow: Option<Glow>,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
}

#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    commands: Vec<DrawCommand>,
    alpha: f32,
    glow: Option<Glow>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
            alpha: 1.0,
            glow: None,
        }
    }

    /// Drop recorded commands and reset draw state (keeps the allocation)
    pub fn clear(&mut self) {
        self.commands.clear();
        self.alpha = 1.0;
        self.glow = None;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled rects in draw order
    pub fn rects(&self) -> impl Iterator<Item = (Vec2, Vec2, Color, Option<Glow>)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect {
                pos,
                size,
                color,
                glow,
            } => Some((*pos, *size, *color, *glow)),
            _ => None,
        })
    }

    /// Triangles for the whole frame, in pixel coordinates
    pub fn tessellate(&self) -> Vec<Vertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);
        for command in &self.commands {
            match *command {
                DrawCommand::RadialGradient {
                    center,
                    radius,
                    inner,
                    outer,
                } => shapes::radial_gradient(
                    &mut vertices,
                    self.size,
                    center,
                    radius,
                    inner,
                    outer,
                ),
                DrawCommand::Rect {
                    pos,
                    size,
                    color,
                    glow,
                } => {
                    if let Some(glow) = glow {
                        shapes::glow_rect(&mut vertices, pos, size, glow.blur, glow.color);
                    }
                    shapes::rect(&mut vertices, pos, size, color);
                }
                DrawCommand::Ring {
                    center,
                    radius,
                    width,
                    color,
                } => shapes::ring(
                    &mut vertices,
                    center,
                    (radius - width / 2.0).max(0.0),
                    radius + width / 2.0,
                    color,
                    shapes::RING_SEGMENTS,
                ),
            }
        }
        vertices
    }
}

impl Canvas for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner: with_alpha(inner, inner[3] * self.alpha),
            outer: with_alpha(outer, outer[3] * self.alpha),
        });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        let glow = self.glow.map(|g| Glow {
            blur: g.blur,
            color: with_alpha(g.color, g.color[3] * self.alpha),
        });
        self.commands.push(DrawCommand::Rect {
            pos,
            size,
            color: with_alpha(color, color[3] * self.alpha),
            glow,
        });
    }

    fn set_glow(&mut self, blur: f32, color: Color) {
        self.glow = (blur > 0.0).then_some(Glow { blur, color });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            width: line_width,
            color: with_alpha(color, color[3] * self.alpha),
        });
    }
}
