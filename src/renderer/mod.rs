//! WebGPU rendering module
//!
//! Painter calls are recorded into a `DrawList` of flat-colored triangles and
//! text items; `RenderState` uploads the triangles each frame.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawList, TextItem, TextSlot};
pub use pipeline::RenderState;
pub use vertex::Vertex;
