//! Texture cache keyed by source path and color space.
//!
//! The [`ResourceCache`] loads image files through a [`MediaResolver`] and
//! keeps one GPU texture per `(path, srgb)` key. Repeated requests for the
//! same key return the cached [`Texture`] handle instead of touching the
//! filesystem again.
//!
//! Keys are compared exactly as passed: no case folding, no path
//! normalization. The same file requested once with `srgb = true` and once
//! with `srgb = false` produces two distinct GPU textures.
//!
//! # Example
//!
//! ```ignore
//! let cache = ResourceCache::new(MediaResolver::new()?);
//! let diffuse = cache.get_or_load(&device, "WindMill_Diff.png", true)?;
//! let again = cache.get_or_load(&device, "WindMill_Diff.png", true)?;
//! assert!(Arc::ptr_eq(&diffuse, &again));
//! ```

use std::sync::{Arc, RwLock};

use whirligig_core::texture::CpuTexture;
use whirligig_media::MediaResolver;

use crate::device::GraphicsDevice;
use crate::error::GraphicsError;
use crate::resources::Texture;
use crate::types::{TextureDescriptor, TextureFormat, TextureUsage};

/// One cached texture and the key it was loaded under.
struct CacheEntry {
    source: String,
    srgb: bool,
    texture: Arc<Texture>,
}

/// A cache of GPU textures loaded from media files.
///
/// The cache holds one strong reference per entry. [`ResourceCache::release_all`]
/// drops those references; handles already returned to callers remain valid on
/// their own.
///
/// # Thread Safety
///
/// `ResourceCache` is `Send + Sync`. The entry list lock is held across the
/// whole load so concurrent requests for the same key load the file once.
pub struct ResourceCache {
    resolver: MediaResolver,
    entries: RwLock<Vec<CacheEntry>>,
}

impl ResourceCache {
    /// Create a new empty cache using the given resolver.
    pub fn new(resolver: MediaResolver) -> Self {
        Self {
            resolver,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Get the media resolver used for lookups.
    pub fn resolver(&self) -> &MediaResolver {
        &self.resolver
    }

    /// Get a cached texture, loading and uploading it on first request.
    ///
    /// `srgb` selects the texture format: [`TextureFormat::Rgba8UnormSrgb`]
    /// for color data, [`TextureFormat::Rgba8Unorm`] for normal maps and
    /// other linear data. The flag is part of the cache key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphicsError::InvalidParameter`] for an empty path,
    /// [`GraphicsError::MediaNotFound`] when the resolver cannot locate the
    /// file, and [`GraphicsError::ResourceCreationFailed`] when decoding or
    /// the GPU upload fails. Nothing is cached on failure.
    pub fn get_or_load(
        &self,
        device: &Arc<GraphicsDevice>,
        path: &str,
        srgb: bool,
    ) -> Result<Arc<Texture>, GraphicsError> {
        if path.is_empty() {
            return Err(GraphicsError::InvalidParameter(
                "texture path is empty".to_string(),
            ));
        }

        let mut entries = self.entries.write().map_err(|_| {
            GraphicsError::ResourceCreationFailed("texture cache lock poisoned".to_string())
        })?;

        if let Some(entry) = entries
            .iter()
            .find(|e| e.source == path && e.srgb == srgb)
        {
            log::trace!("ResourceCache: hit for '{path}' (srgb={srgb})");
            return Ok(entry.texture.clone());
        }

        let resolved = self.resolver.resolve(path)?;
        log::debug!(
            "ResourceCache: loading '{path}' (srgb={srgb}) from {}",
            resolved.display()
        );

        let image = CpuTexture::load(&resolved)?;
        let format = if srgb {
            TextureFormat::Rgba8UnormSrgb
        } else {
            TextureFormat::Rgba8Unorm
        };
        let descriptor = TextureDescriptor::new_2d(
            image.width(),
            image.height(),
            format,
            TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
        )
        .with_label(path);

        let texture = device.create_texture_with_data(&descriptor, image.pixels())?;

        entries.push(CacheEntry {
            source: path.to_string(),
            srgb,
            texture: texture.clone(),
        });

        Ok(texture)
    }

    /// Check whether a `(path, srgb)` key is cached.
    pub fn contains(&self, path: &str, srgb: bool) -> bool {
        self.entries
            .read()
            .map(|entries| {
                entries
                    .iter()
                    .any(|e| e.source == path && e.srgb == srgb)
            })
            .unwrap_or(false)
    }

    /// Get the number of cached textures.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached texture references.
    ///
    /// Handles previously returned by [`ResourceCache::get_or_load`] remain
    /// valid. Subsequent requests load from disk again.
    pub fn release_all(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let count = entries.len();
            entries.clear();
            entries.shrink_to_fit();
            log::info!("ResourceCache: released {count} cached textures");
        }
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entries", &self.len())
            .finish()
    }
}

// Ensure ResourceCache is Send + Sync
static_assertions::assert_impl_all!(ResourceCache: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::instance::GraphicsInstance;

    fn create_test_device() -> Arc<GraphicsDevice> {
        let instance = GraphicsInstance::new(BackendKind::Dummy).unwrap();
        instance.create_device().unwrap()
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let device = create_test_device();
        let cache = ResourceCache::new(MediaResolver::new().unwrap());
        let result = cache.get_or_load(&device, "", true);
        assert!(matches!(result, Err(GraphicsError::InvalidParameter(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_file_reports_original_name() {
        let device = create_test_device();
        let cache = ResourceCache::new(MediaResolver::new().unwrap());
        let result = cache.get_or_load(&device, "no_such_texture_a8d1f2.png", true);
        match result {
            Err(GraphicsError::MediaNotFound(name)) => {
                assert_eq!(name, "no_such_texture_a8d1f2.png");
            }
            other => panic!("expected MediaNotFound, got {other:?}"),
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn test_contains_on_empty_cache() {
        let cache = ResourceCache::new(MediaResolver::new().unwrap());
        assert!(!cache.contains("anything.png", true));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_release_all_on_empty_cache() {
        let cache = ResourceCache::new(MediaResolver::new().unwrap());
        cache.release_all();
        assert!(cache.is_empty());
    }
}
