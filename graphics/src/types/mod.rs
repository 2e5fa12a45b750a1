//! Descriptors, formats and usage flags for GPU resources.

mod buffer;
mod common;
mod texture;

pub use buffer::{BufferDescriptor, BufferUsage};
pub use common::Extent3d;
pub use texture::{TextureDescriptor, TextureFormat, TextureUsage};
