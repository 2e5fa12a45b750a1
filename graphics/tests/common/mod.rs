//! Shared fixtures for the asset integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use whirligig_graphics::{BackendKind, GraphicsDevice, GraphicsInstance, ResourceCache};
use whirligig_media::MediaResolver;

/// Backends the integration suite runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Dummy,
    Wgpu,
}

impl Backend {
    /// Whether this backend can run in the current build.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Dummy => true,
            #[cfg(feature = "wgpu-backend")]
            Backend::Wgpu => true,
            #[cfg(not(feature = "wgpu-backend"))]
            Backend::Wgpu => false,
        }
    }

    /// Short name used in fixture directory names.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Dummy => "dummy",
            Backend::Wgpu => "wgpu",
        }
    }

    fn kind(self) -> BackendKind {
        match self {
            Backend::Dummy => BackendKind::Dummy,
            Backend::Wgpu => BackendKind::Wgpu,
        }
    }
}

/// An instance and device on one backend, for a single test.
pub struct TestContext {
    #[allow(dead_code)]
    pub backend: Backend,
    #[allow(dead_code)]
    instance: Arc<GraphicsInstance>,
    pub device: Arc<GraphicsDevice>,
}

impl TestContext {
    /// Set up a context, or `None` when the backend is compiled out (the
    /// test should skip, not fail).
    pub fn new(backend: Backend) -> Option<Self> {
        // Logging for test output; only the first caller wins
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Info)
            .is_test(true)
            .try_init();

        if !backend.is_available() {
            return None;
        }

        let instance = GraphicsInstance::new(backend.kind()).ok()?;
        let device = instance.create_device().ok()?;

        Some(Self {
            backend,
            instance,
            device,
        })
    }
}

/// A temp directory of generated PNGs that a resolver can find.
///
/// The directory is wiped on creation and again on drop, so interrupted
/// runs cannot poison later ones. `name` must be unique per test since
/// tests in one binary run concurrently.
pub struct MediaFixture {
    pub dir: PathBuf,
}

impl MediaFixture {
    pub fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("whirligig_graphics_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("Failed to create fixture directory");
        Self { dir }
    }

    /// Write a solid-color RGBA PNG into the fixture directory.
    pub fn write_png(&self, filename: &str, width: u32, height: u32, rgba: [u8; 4]) {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        image
            .save(self.dir.join(filename))
            .expect("Failed to write fixture image");
    }

    /// A resolver whose base directory is the fixture directory.
    pub fn resolver(&self) -> MediaResolver {
        MediaResolver::with_roots(&self.dir, self.dir.join("bin/whirligig_tests"))
    }

    /// A texture cache over this fixture's resolver.
    pub fn cache(&self) -> ResourceCache {
        ResourceCache::new(self.resolver())
    }
}

impl Drop for MediaFixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
