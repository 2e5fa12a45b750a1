//! GPU backend seam.
//!
//! Everything the device needs from a GPU API fits in the [`GpuBackend`]
//! trait: create a buffer or texture, upload bytes into it, describe the
//! adapter. Two implementations exist: the always-available no-op
//! [`dummy::DummyBackend`] and, behind the `wgpu-backend` feature, a real
//! one in [`wgpu_backend`]. Frame submission and pipelines are out of
//! scope here.

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

pub mod dummy;

use std::sync::Arc;

use crate::error::GraphicsError;
use crate::instance::AdapterInfo;
use crate::types::{BufferDescriptor, TextureDescriptor};

/// Which GPU backend an instance should drive.
///
/// The backend is an explicit constructor argument; there is no global
/// auto-selection. Requesting a backend that is not compiled in is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// No-op backend, always available.
    #[default]
    Dummy,
    /// wgpu backend, requires the `wgpu-backend` cargo feature.
    Wgpu,
}

/// Backend-side handle to a buffer allocation.
pub enum GpuBuffer {
    /// No allocation behind it.
    Dummy,
    /// A wgpu buffer.
    #[cfg(feature = "wgpu-backend")]
    Wgpu(Arc<wgpu::Buffer>),
}

impl std::fmt::Debug for GpuBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuBuffer::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(buffer) => f.debug_tuple("GpuBuffer::Wgpu").field(buffer).finish(),
        }
    }
}

impl Clone for GpuBuffer {
    fn clone(&self) -> Self {
        match self {
            Self::Dummy => Self::Dummy,
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu(buffer) => Self::Wgpu(buffer.clone()),
        }
    }
}

/// Backend-side handle to a texture allocation.
///
/// The wgpu variant carries the sampled view alongside the texture so a
/// cached texture can be rebound without recreating views.
pub enum GpuTexture {
    /// No allocation behind it.
    Dummy,
    /// A wgpu texture plus its default view.
    #[cfg(feature = "wgpu-backend")]
    Wgpu {
        texture: Arc<wgpu::Texture>,
        view: Arc<wgpu::TextureView>,
    },
}

impl std::fmt::Debug for GpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dummy => write!(f, "GpuTexture::Dummy"),
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { texture, view } => f
                .debug_struct("GpuTexture::Wgpu")
                .field("texture", texture)
                .field("view", view)
                .finish(),
        }
    }
}

impl Clone for GpuTexture {
    fn clone(&self) -> Self {
        match self {
            Self::Dummy => Self::Dummy,
            #[cfg(feature = "wgpu-backend")]
            Self::Wgpu { texture, view } => Self::Wgpu {
                texture: texture.clone(),
                view: view.clone(),
            },
        }
    }
}

/// What a GPU API must provide: resource creation and uploads.
///
/// Descriptors arrive already validated by the device, so implementations
/// only translate them and report allocation failures.
pub trait GpuBackend: Send + Sync + 'static {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Describe the adapter this backend selected.
    fn adapter_info(&self) -> AdapterInfo;

    /// Allocate a buffer.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<GpuBuffer, GraphicsError>;

    /// Allocate a texture together with its sampled view.
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<GpuTexture, GraphicsError>;

    /// Copy bytes into a buffer at `offset`.
    fn write_buffer(
        &self,
        buffer: &GpuBuffer,
        offset: u64,
        data: &[u8],
    ) -> Result<(), GraphicsError>;

    /// Copy tightly packed pixels into a texture.
    fn write_texture(
        &self,
        texture: &GpuTexture,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<(), GraphicsError>;
}

/// Create the backend for the requested kind.
pub fn create_backend(kind: BackendKind) -> Result<Arc<dyn GpuBackend>, GraphicsError> {
    match kind {
        BackendKind::Dummy => {
            log::info!("Using dummy backend");
            Ok(Arc::new(dummy::DummyBackend::new()))
        }
        #[cfg(feature = "wgpu-backend")]
        BackendKind::Wgpu => {
            let backend = wgpu_backend::WgpuBackend::new()?;
            log::info!("Using wgpu backend");
            Ok(Arc::new(backend))
        }
        #[cfg(not(feature = "wgpu-backend"))]
        BackendKind::Wgpu => Err(GraphicsError::BackendUnavailable(
            "wgpu support is not compiled in (enable the `wgpu-backend` feature)".to_string(),
        )),
    }
}
