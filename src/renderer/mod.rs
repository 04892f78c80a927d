//! Rendering module
//!
//! The scene is drawn against the `Canvas` trait. `DrawList` records a frame;
//! the WebGPU backend tessellates and presents it.

pub mod canvas;
pub mod draw_list;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use canvas::Canvas;
pub use draw_list::{DrawCommand, DrawList, Glow};
pub use pipeline::RenderState;
pub use scene::draw_world;
pub use vertex::Vertex;
