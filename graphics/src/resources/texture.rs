//! GPU texture resource.

use std::sync::{Arc, Weak};

use crate::backend::GpuTexture;
use crate::device::GraphicsDevice;
use crate::types::{Extent3d, TextureDescriptor, TextureFormat};

/// A GPU texture, shared by `Arc` between the cache and every object
/// binding it.
///
/// Created through [`GraphicsDevice::create_texture`] or
/// [`GraphicsDevice::create_texture_with_data`]. Like [`Buffer`], a texture
/// holds only a weak pointer to its device; the underlying GPU memory lives
/// for as long as any `Arc<Texture>` does, including past a cache teardown.
///
/// [`Buffer`]: crate::resources::Buffer
pub struct Texture {
    device: Weak<GraphicsDevice>,
    descriptor: TextureDescriptor,
    gpu: GpuTexture,
}

impl Texture {
    pub(crate) fn new(
        device: Weak<GraphicsDevice>,
        descriptor: TextureDescriptor,
        gpu: GpuTexture,
    ) -> Self {
        Self {
            device,
            descriptor,
            gpu,
        }
    }

    /// The creating device, if it is still alive.
    pub fn device(&self) -> Option<Arc<GraphicsDevice>> {
        self.device.upgrade()
    }

    /// The descriptor the texture was created from.
    pub fn descriptor(&self) -> &TextureDescriptor {
        &self.descriptor
    }

    /// Extent in pixels.
    pub fn size(&self) -> Extent3d {
        self.descriptor.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.descriptor.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.descriptor.size.height
    }

    /// Pixel format.
    pub fn format(&self) -> TextureFormat {
        self.descriptor.format
    }

    /// Debug label, if one was set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }

    pub(crate) fn gpu_handle(&self) -> &GpuTexture {
        &self.gpu
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("label", &self.descriptor.label)
            .field("size", &self.descriptor.size)
            .field("format", &self.descriptor.format)
            .finish()
    }
}

// Ensure Texture is Send + Sync
static_assertions::assert_impl_all!(Texture: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TextureUsage;

    fn orphan_texture(width: u32, height: u32, format: TextureFormat) -> Texture {
        Texture::new(
            Weak::new(),
            TextureDescriptor::new_2d(width, height, format, TextureUsage::TEXTURE_BINDING),
            GpuTexture::Dummy,
        )
    }

    #[test]
    fn accessors_reflect_descriptor() {
        let texture = orphan_texture(800, 600, TextureFormat::Rgba8UnormSrgb);
        assert_eq!(texture.width(), 800);
        assert_eq!(texture.height(), 600);
        assert_eq!(texture.size(), Extent3d::new_2d(800, 600));
        assert!(texture.format().is_srgb());
    }

    #[test]
    fn survives_its_device() {
        let texture = orphan_texture(4, 4, TextureFormat::Rgba8Unorm);
        assert!(texture.device().is_none());
        assert_eq!(texture.width(), 4);
    }
}
