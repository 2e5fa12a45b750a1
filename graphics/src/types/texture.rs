//! Texture descriptors, formats and usage flags.

use super::Extent3d;
use bitflags::bitflags;

/// Pixel format of a texture.
///
/// Only the two 8-bit RGBA encodings the asset pipeline produces are listed.
/// The color space is part of the format on purpose: the texture cache keys
/// on it, so the same file loaded as sRGB and as linear yields two separate
/// GPU textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum TextureFormat {
    /// 8-bit RGBA, linear.
    #[default]
    Rgba8Unorm,
    /// 8-bit RGBA, sRGB-encoded. Sampling converts to linear.
    Rgba8UnormSrgb,
}

impl TextureFormat {
    /// Whether sampling applies sRGB-to-linear conversion.
    pub fn is_srgb(&self) -> bool {
        matches!(self, Self::Rgba8UnormSrgb)
    }

    /// Bytes per pixel.
    pub fn block_size(&self) -> u32 {
        match self {
            Self::Rgba8Unorm | Self::Rgba8UnormSrgb => 4,
        }
    }
}

bitflags! {
    /// Declares how a texture may be bound or copied.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Destination of a copy operation (required for uploads).
        const COPY_DST = 1 << 0;
        /// Sampleable from a shader.
        const TEXTURE_BINDING = 1 << 1;
    }
}

impl Default for TextureUsage {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything needed to create a texture.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureDescriptor {
    /// Debug label, forwarded to the backend.
    pub label: Option<String>,
    /// Extent in pixels.
    pub size: Extent3d,
    /// Number of mip levels.
    pub mip_level_count: u32,
    /// Sample count, 1 unless multisampled.
    pub sample_count: u32,
    /// Pixel format.
    pub format: TextureFormat,
    /// Usage flags.
    pub usage: TextureUsage,
}

impl TextureDescriptor {
    /// Describe a single-mip 2D texture.
    pub fn new_2d(width: u32, height: u32, format: TextureFormat, usage: TextureUsage) -> Self {
        Self {
            label: None,
            size: Extent3d::new_2d(width, height),
            mip_level_count: 1,
            sample_count: 1,
            format,
            usage,
        }
    }

    /// Attach a debug label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
