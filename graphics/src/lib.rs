//! # Whirligig Graphics
//!
//! GPU resource layer for Whirligig: devices, buffers, textures, a texture
//! cache keyed by source path, and render object recording.
//!
//! ## Overview
//!
//! - [`GraphicsInstance`] / [`GraphicsDevice`] own the backend and create
//!   resources
//! - [`ResourceCache`] deduplicates texture loads over the media resolver
//! - [`RenderObject`] pairs mesh buffers with material textures and draws
//!   in one call
//! - [`RenderPass`] records bind/draw commands as inspectable data
//!
//! Backends: wgpu (feature `wgpu-backend`) and a no-op dummy for headless
//! runs.
//!
//! ## Example
//!
//! ```ignore
//! use whirligig_graphics::{BackendKind, GraphicsInstance, RenderObject, RenderPass, ResourceCache};
//!
//! let instance = GraphicsInstance::new(BackendKind::Dummy)?;
//! let device = instance.create_device()?;
//! let cache = ResourceCache::new(resolver);
//!
//! let object = RenderObject::build(&device, &cache, &mesh, "diff.png", "normal.png")?;
//! let mut pass = RenderPass::new("opaque");
//! object.render(&mut pass);
//! ```

pub mod backend;
pub mod cache;
pub mod device;
pub mod error;
pub mod instance;
pub mod mesh;
pub mod pass;
pub mod render_object;
pub mod resources;
pub mod types;

// Re-export main types for convenience
pub use backend::BackendKind;
pub use cache::ResourceCache;
pub use device::{DeviceCapabilities, GraphicsDevice};
pub use error::GraphicsError;
pub use instance::{AdapterInfo, AdapterType, GraphicsInstance};
pub use mesh::{
    VertexAttribute, VertexAttributeFormat, VertexAttributeSemantic, VertexBufferLayout,
    VertexLayout,
};
pub use pass::{IndexFormat, RenderCommand, RenderPass};
pub use render_object::{MaterialSlot, RenderObject};
pub use resources::{Buffer, Texture};
pub use types::{
    BufferDescriptor, BufferUsage, Extent3d, TextureDescriptor, TextureFormat, TextureUsage,
};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the crate version once at startup.
pub fn init() {
    log::info!("Whirligig Graphics v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn dummy_instance_starts() {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        assert_eq!(instance.backend_kind(), BackendKind::Dummy);
    }
}
