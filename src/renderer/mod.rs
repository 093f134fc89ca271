//! WebGPU rendering module
//!
//! A single solid-color triangle-list pipeline; the whole frame is rebuilt
//! as one vertex stream from the game state each frame.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::build_frame;
pub use pipeline::RenderState;
