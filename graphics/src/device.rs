//! Graphics device.
//!
//! The [`GraphicsDevice`] validates resource descriptors, routes creation and
//! upload through the instance's backend, and keeps a weak-reference ledger
//! of everything it created so leaks show up in tests.

use std::sync::{Arc, RwLock, Weak};

use crate::error::GraphicsError;
use crate::instance::GraphicsInstance;
use crate::resources::{Buffer, Texture};
use crate::types::{BufferDescriptor, TextureDescriptor};

/// Resource limits enforced before a descriptor reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Largest allowed texture width, height or depth.
    pub max_texture_dimension: u32,
    /// Largest allowed buffer, in bytes.
    pub max_buffer_size: u64,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
            max_buffer_size: 1 << 30,
        }
    }
}

/// Weak-reference ledger of resources created by a device.
///
/// The ledger never keeps a resource alive; it exists so tests and teardown
/// diagnostics can count what is still referenced somewhere.
struct ResourceLedger<T> {
    entries: RwLock<Vec<Weak<T>>>,
}

impl<T> ResourceLedger<T> {
    fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    fn record(&self, resource: &Arc<T>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push(Arc::downgrade(resource));
        }
    }

    fn live_count(&self) -> usize {
        self.entries
            .read()
            .map(|e| e.iter().filter(|w| w.strong_count() > 0).count())
            .unwrap_or(0)
    }

    fn prune(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|w| w.strong_count() > 0);
        }
    }
}

/// Creates GPU buffers and textures on one adapter.
///
/// Obtained from [`GraphicsInstance::create_device`]. All creation methods
/// take `self: &Arc<Self>` because each resource keeps a weak pointer back
/// to its device.
///
/// `GraphicsDevice` is `Send + Sync`; creation may happen from any thread.
///
/// # Example
///
/// ```ignore
/// let instance = GraphicsInstance::new(BackendKind::Dummy)?;
/// let device = instance.create_device()?;
/// let vertices = device.create_buffer_with_data(&descriptor, bytes)?;
/// ```
pub struct GraphicsDevice {
    instance: Arc<GraphicsInstance>,
    name: String,
    capabilities: DeviceCapabilities,
    buffers: ResourceLedger<Buffer>,
    textures: ResourceLedger<Texture>,
}

impl GraphicsDevice {
    pub(crate) fn new(instance: Arc<GraphicsInstance>, name: String) -> Self {
        Self {
            instance,
            name,
            capabilities: DeviceCapabilities::default(),
            buffers: ResourceLedger::new(),
            textures: ResourceLedger::new(),
        }
    }

    /// The instance this device was created on.
    pub fn instance(&self) -> &Arc<GraphicsInstance> {
        &self.instance
    }

    /// Adapter name the device runs on.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Limits enforced by this device.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Create an uninitialized GPU buffer.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidParameter`] for a zero-size or over-limit
    /// descriptor; backend failures pass through unchanged.
    pub fn create_buffer(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
    ) -> Result<Arc<Buffer>, GraphicsError> {
        if descriptor.size == 0 {
            return Err(GraphicsError::InvalidParameter(
                "buffer size cannot be zero".to_string(),
            ));
        }
        if descriptor.size > self.capabilities.max_buffer_size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer size {} exceeds maximum {}",
                descriptor.size, self.capabilities.max_buffer_size
            )));
        }

        let gpu = self.instance.backend().create_buffer(descriptor)?;
        let buffer = Arc::new(Buffer::new(Arc::downgrade(self), descriptor.clone(), gpu));
        self.buffers.record(&buffer);

        log::trace!(
            "created buffer {:?}, {} bytes",
            descriptor.label,
            descriptor.size
        );
        Ok(buffer)
    }

    /// Create a GPU buffer holding `data`.
    ///
    /// # Errors
    ///
    /// `data` must be exactly `descriptor.size` bytes; anything else is an
    /// [`GraphicsError::InvalidParameter`].
    pub fn create_buffer_with_data(
        self: &Arc<Self>,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<Arc<Buffer>, GraphicsError> {
        if data.len() as u64 != descriptor.size {
            return Err(GraphicsError::InvalidParameter(format!(
                "buffer data is {} bytes but the descriptor says {}",
                data.len(),
                descriptor.size
            )));
        }

        let buffer = self.create_buffer(descriptor)?;
        self.instance
            .backend()
            .write_buffer(buffer.gpu_handle(), 0, data)?;
        Ok(buffer)
    }

    /// Create an uninitialized GPU texture.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::InvalidParameter`] for a zero-extent or over-limit
    /// descriptor; backend failures pass through unchanged.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> Result<Arc<Texture>, GraphicsError> {
        if descriptor.size.width == 0 || descriptor.size.height == 0 {
            return Err(GraphicsError::InvalidParameter(
                "texture extent cannot be zero".to_string(),
            ));
        }
        let max_dim = self.capabilities.max_texture_dimension;
        if descriptor.size.width > max_dim
            || descriptor.size.height > max_dim
            || descriptor.size.depth > max_dim
        {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture extent exceeds maximum dimension {max_dim}"
            )));
        }

        let gpu = self.instance.backend().create_texture(descriptor)?;
        let texture = Arc::new(Texture::new(Arc::downgrade(self), descriptor.clone(), gpu));
        self.textures.record(&texture);

        log::trace!(
            "created texture {:?}, {}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );
        Ok(texture)
    }

    /// Create a GPU texture holding tightly packed pixel `data`.
    ///
    /// # Errors
    ///
    /// `data` must cover the descriptor's extent at its format's pixel size;
    /// anything else is an [`GraphicsError::InvalidParameter`].
    pub fn create_texture_with_data(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<Arc<Texture>, GraphicsError> {
        let expected = descriptor.size.pixel_count() * u64::from(descriptor.format.block_size());
        if data.len() as u64 != expected {
            return Err(GraphicsError::InvalidParameter(format!(
                "texture data is {} bytes but the extent needs {expected}",
                data.len(),
            )));
        }

        let texture = self.create_texture(descriptor)?;
        self.instance
            .backend()
            .write_texture(texture.gpu_handle(), descriptor, data)?;
        Ok(texture)
    }

    /// Number of buffers created here that are still referenced somewhere.
    pub fn buffer_count(&self) -> usize {
        self.buffers.live_count()
    }

    /// Number of textures created here that are still referenced somewhere.
    pub fn texture_count(&self) -> usize {
        self.textures.live_count()
    }

    /// Drop ledger entries for resources that have been released.
    pub fn cleanup_dead_resources(&self) {
        self.buffers.prune();
        self.textures.prune();
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("live_buffers", &self.buffer_count())
            .field("live_textures", &self.texture_count())
            .finish()
    }
}

// Ensure GraphicsDevice is Send + Sync
static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::types::{BufferUsage, TextureFormat, TextureUsage};

    fn create_test_device() -> Arc<GraphicsDevice> {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        instance.create_device().unwrap()
    }

    #[test]
    fn device_is_named_after_adapter() {
        let device = create_test_device();
        assert_eq!(device.name(), "Dummy Adapter");
    }

    #[test]
    fn buffer_creation_is_tracked() {
        let device = create_test_device();
        let buffer = device
            .create_buffer(&BufferDescriptor::new(96, BufferUsage::VERTEX))
            .unwrap();
        assert_eq!(buffer.size(), 96);
        assert_eq!(device.buffer_count(), 1);
    }

    #[test]
    fn zero_size_buffer_rejected() {
        let device = create_test_device();
        let result = device.create_buffer(&BufferDescriptor::new(0, BufferUsage::VERTEX));
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn oversized_buffer_rejected() {
        let device = create_test_device();
        let too_big = device.capabilities().max_buffer_size + 1;
        let result = device.create_buffer(&BufferDescriptor::new(too_big, BufferUsage::VERTEX));
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn buffer_upload_checks_length() {
        let device = create_test_device();
        let descriptor = BufferDescriptor::new(64, BufferUsage::VERTEX | BufferUsage::COPY_DST);

        let buffer = device.create_buffer_with_data(&descriptor, &[7u8; 64]).unwrap();
        assert_eq!(buffer.size(), 64);

        let result = device.create_buffer_with_data(&descriptor, &[7u8; 32]);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
        // The failed call must not have created anything
        assert_eq!(device.buffer_count(), 1);
    }

    #[test]
    fn texture_creation_is_tracked() {
        let device = create_test_device();
        let texture = device
            .create_texture(&TextureDescriptor::new_2d(
                512,
                256,
                TextureFormat::Rgba8Unorm,
                TextureUsage::TEXTURE_BINDING,
            ))
            .unwrap();
        assert_eq!(texture.width(), 512);
        assert_eq!(texture.height(), 256);
        assert_eq!(device.texture_count(), 1);
    }

    #[test]
    fn zero_extent_texture_rejected() {
        let device = create_test_device();
        let result = device.create_texture(&TextureDescriptor::new_2d(
            0,
            512,
            TextureFormat::Rgba8Unorm,
            TextureUsage::TEXTURE_BINDING,
        ));
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn oversized_texture_rejected() {
        let device = create_test_device();
        let too_big = device.capabilities().max_texture_dimension + 1;
        let result = device.create_texture(&TextureDescriptor::new_2d(
            too_big,
            64,
            TextureFormat::Rgba8Unorm,
            TextureUsage::TEXTURE_BINDING,
        ));
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
    }

    #[test]
    fn texture_upload_checks_length() {
        let device = create_test_device();
        let descriptor = TextureDescriptor::new_2d(
            4,
            4,
            TextureFormat::Rgba8UnormSrgb,
            TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
        );

        let texture = device
            .create_texture_with_data(&descriptor, &vec![255u8; 4 * 4 * 4])
            .unwrap();
        assert!(texture.format().is_srgb());

        let result = device.create_texture_with_data(&descriptor, &[255u8; 3]);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
        assert_eq!(device.texture_count(), 1);
    }

    #[test]
    fn released_resources_leave_the_ledger() {
        let device = create_test_device();
        {
            let _buffer = device
                .create_buffer(&BufferDescriptor::new(128, BufferUsage::INDEX))
                .unwrap();
            assert_eq!(device.buffer_count(), 1);
        }
        device.cleanup_dead_resources();
        assert_eq!(device.buffer_count(), 0);
    }
}
