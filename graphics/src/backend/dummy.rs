//! No-op GPU backend.
//!
//! Every operation succeeds without touching hardware, so the whole asset
//! pipeline (cache lookups, descriptor validation, command recording) can
//! run in tests and on CI machines without a GPU.

use crate::error::GraphicsError;
use crate::instance::{AdapterInfo, AdapterType};
use crate::types::{BufferDescriptor, TextureDescriptor};

use super::{GpuBackend, GpuBuffer, GpuTexture};

/// Backend that allocates nothing and accepts everything.
#[derive(Debug, Default)]
pub struct DummyBackend;

impl DummyBackend {
    pub fn new() -> Self {
        Self
    }
}

impl GpuBackend for DummyBackend {
    fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "Dummy Adapter".to_string(),
            vendor: "Whirligig".to_string(),
            device_type: AdapterType::Software,
        }
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBuffer, GraphicsError> {
        log::trace!(
            "dummy create_buffer {:?}, {} bytes",
            descriptor.label,
            descriptor.size
        );
        Ok(GpuBuffer::Dummy)
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<GpuTexture, GraphicsError> {
        log::trace!(
            "dummy create_texture {:?}, {}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );
        Ok(GpuTexture::Dummy)
    }

    fn write_buffer(
        &self,
        _buffer: &GpuBuffer,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError> {
        log::trace!("dummy write_buffer offset={offset} len={}", data.len());
        Ok(())
    }

    fn write_texture(
        &self,
        _texture: &GpuTexture,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<(), GraphicsError> {
        log::trace!(
            "dummy write_texture {:?} len={}",
            descriptor.label,
            data.len()
        );
        Ok(())
    }
}
