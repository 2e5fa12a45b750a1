//! Decoded texture pixels.

use std::path::Path;

use crate::error::CoreError;

/// Decoded image pixels, tightly packed RGBA8.
///
/// Produced either by decoding an image file ([`CpuTexture::load`]) or from
/// raw pixels ([`CpuTexture::from_pixels`]). Row stride is always
/// `width * 4`; there is no padding.
pub struct CpuTexture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CpuTexture {
    /// Decode an image file into RGBA8 pixels.
    ///
    /// Formats are whatever the `image` crate has enabled (PNG, JPEG, TGA
    /// here). Non-RGBA sources are converted. I/O failures and decode
    /// failures are reported as distinct errors, both naming the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => CoreError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => CoreError::ImageDecode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("decoded {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Wrap raw RGBA8 pixels, validating dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidImageData(format!(
                "zero-sized image ({width}x{height})"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(CoreError::InvalidImageData(format!(
                "pixel buffer length {} does not match {width}x{height} RGBA8 ({expected} bytes)",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The pixel bytes, row-major RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Total pixel data size in bytes (`width * height * 4`).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len()
    }
}

impl std::fmt::Debug for CpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("size_bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("whirligig_core_test_{name}"));
        if dir.exists() {
            let _ = std::fs::remove_dir_all(&dir);
        }
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_from_pixels() {
        let tex = CpuTexture::from_pixels(2, 2, vec![0u8; 16]).unwrap();
        assert_eq!(tex.width(), 2);
        assert_eq!(tex.height(), 2);
        assert_eq!(tex.size_bytes(), 16);
    }

    #[test]
    fn test_from_pixels_wrong_length() {
        let result = CpuTexture::from_pixels(2, 2, vec![0u8; 15]);
        assert!(matches!(result, Err(CoreError::InvalidImageData(_))));
    }

    #[test]
    fn test_from_pixels_zero_size() {
        let result = CpuTexture::from_pixels(0, 4, vec![]);
        assert!(matches!(result, Err(CoreError::InvalidImageData(_))));
    }

    #[test]
    fn test_load_png() {
        let dir = temp_dir("load_png");
        let path = dir.join("red.png");
        let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let tex = CpuTexture::load(&path).unwrap();
        assert_eq!(tex.width(), 2);
        assert_eq!(tex.height(), 3);
        assert_eq!(&tex.pixels()[0..4], &[255, 0, 0, 255]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = temp_dir("load_missing");
        let result = CpuTexture::load(dir.join("nope.png"));
        assert!(matches!(result, Err(CoreError::Io { .. })));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = temp_dir("load_garbage");
        let path = dir.join("bad.png");
        std::fs::write(&path, b"this is not an image").unwrap();

        let result = CpuTexture::load(&path);
        assert!(matches!(result, Err(CoreError::ImageDecode { .. })));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
