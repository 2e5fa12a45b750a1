//! Graphics instance.
//!
//! [`GraphicsInstance`] owns the GPU backend and hands out
//! [`GraphicsDevice`]s. There is no hidden global: whoever needs GPU
//! resources is given an instance (or a device created from one)
//! explicitly.

use std::sync::{Arc, RwLock, Weak};

use crate::backend::{self, BackendKind, GpuBackend};
use crate::device::GraphicsDevice;
use crate::error::GraphicsError;

/// Description of the adapter a backend selected.
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    /// Adapter name.
    pub name: String,
    /// Vendor or driver string.
    pub vendor: String,
    /// Hardware class of the adapter.
    pub device_type: AdapterType,
}

/// Hardware class of a graphics adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterType {
    /// Dedicated graphics card.
    Discrete,
    /// GPU sharing memory with the CPU.
    Integrated,
    /// Software rasterizer.
    Software,
    /// Anything the backend could not classify.
    Unknown,
}

/// Entry point of the graphics layer: one backend, any number of devices.
///
/// Construction picks the backend explicitly; a kind that is not compiled
/// in fails instead of silently substituting another one.
///
/// `GraphicsInstance` is `Send + Sync`.
pub struct GraphicsInstance {
    // Weak self-pointer so create_device can hand the device a strong Arc.
    self_ref: RwLock<Weak<GraphicsInstance>>,
    devices: RwLock<Vec<Arc<GraphicsDevice>>>,
    backend: Arc<dyn GpuBackend>,
    backend_kind: BackendKind,
}

impl GraphicsInstance {
    /// Start the given backend and wrap it in an instance.
    ///
    /// # Errors
    ///
    /// [`GraphicsError::BackendUnavailable`] if the kind is not compiled in
    /// or no adapter can be acquired.
    pub fn new(kind: BackendKind) -> Result<Arc<Self>, GraphicsError> {
        let backend = backend::create_backend(kind)?;
        log::info!("GraphicsInstance up, backend: {}", backend.name());

        let instance = Arc::new(Self {
            self_ref: RwLock::new(Weak::new()),
            devices: RwLock::new(Vec::new()),
            backend,
            backend_kind: kind,
        });

        if let Ok(mut self_ref) = instance.self_ref.write() {
            *self_ref = Arc::downgrade(&instance);
        }

        Ok(instance)
    }

    pub(crate) fn backend(&self) -> &Arc<dyn GpuBackend> {
        &self.backend
    }

    fn arc_self(&self) -> Option<Arc<GraphicsInstance>> {
        self.self_ref.read().ok().and_then(|r| r.upgrade())
    }

    /// The backend kind requested at construction.
    pub fn backend_kind(&self) -> BackendKind {
        self.backend_kind
    }

    /// Describe the adapter the backend runs on.
    pub fn adapter_info(&self) -> AdapterInfo {
        self.backend.adapter_info()
    }

    /// Create a device on this instance's adapter.
    ///
    /// The device is named after the adapter and holds a strong reference
    /// back to the instance.
    pub fn create_device(&self) -> Result<Arc<GraphicsDevice>, GraphicsError> {
        let adapter = self.adapter_info();
        log::info!("creating device on adapter '{}'", adapter.name);

        let instance = self.arc_self().ok_or_else(|| {
            GraphicsError::InitializationFailed("instance has been dropped".to_string())
        })?;
        let device = Arc::new(GraphicsDevice::new(instance, adapter.name));

        if let Ok(mut devices) = self.devices.write() {
            devices.push(device.clone());
        }

        Ok(device)
    }

    /// All devices created on this instance, in creation order.
    pub fn devices(&self) -> Vec<Arc<GraphicsDevice>> {
        self.devices
            .read()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    /// Number of devices created on this instance.
    pub fn device_count(&self) -> usize {
        self.devices.read().map(|d| d.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for GraphicsInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsInstance")
            .field("backend_kind", &self.backend_kind)
            .field("device_count", &self.device_count())
            .finish()
    }
}

// Ensure GraphicsInstance is Send + Sync
static_assertions::assert_impl_all!(GraphicsInstance: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_no_devices() {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        assert_eq!(instance.device_count(), 0);
        assert_eq!(instance.backend_kind(), BackendKind::Dummy);
    }

    #[test]
    fn dummy_adapter_is_software() {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        let adapter = instance.adapter_info();
        assert_eq!(adapter.name, "Dummy Adapter");
        assert_eq!(adapter.device_type, AdapterType::Software);
    }

    #[test]
    fn devices_are_tracked_in_creation_order() {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        let first = instance.create_device().unwrap();
        let second = instance.create_device().unwrap();
        assert_eq!(instance.device_count(), 2);

        let devices = instance.devices();
        assert!(Arc::ptr_eq(&devices[0], &first));
        assert!(Arc::ptr_eq(&devices[1], &second));
    }

    #[test]
    fn device_points_back_at_instance() {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        let device = instance.create_device().unwrap();
        assert!(Arc::ptr_eq(device.instance(), &instance));
        assert_eq!(device.name(), "Dummy Adapter");
    }

    #[cfg(not(feature = "wgpu-backend"))]
    #[test]
    fn missing_backend_is_an_error() {
        let result = GraphicsInstance::new(BackendKind::Wgpu);
        assert!(matches!(result, Err(GraphicsError::BackendUnavailable(_))));
    }
}
