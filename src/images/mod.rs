//! Image Pipeline
//!
//! Transcoding and on-disk storage for uploaded icon images. The transcoder
//! is a trait so the resize+re-encode step stays swappable (and stubbable in
//! tests); `WebpTranscoder` is the default implementation. `ImageStore` owns
//! filenames and file lifecycle; the attach sequencing itself lives in the
//! commands layer.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageFormat};

use crate::domain::{DomainError, DomainResult};

/// Smallest output dimension in pixels (3x of the 70px display size, so 4K
/// screens get a sharp bitmap)
pub const TARGET_SIZE: u32 = 210;

/// A resized, re-encoded image ready to store
#[derive(Debug, Clone)]
pub struct TranscodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The black-box resize+re-encode operation: bytes in, smaller bytes out
pub trait ImageTranscoder: Send + Sync {
    fn transcode(&self, bytes: &[u8]) -> DomainResult<TranscodedImage>;
}

/// Default transcoder: decode png/jpeg/gif/webp, scale so the smallest
/// dimension is `TARGET_SIZE` (aspect preserved), re-encode as WebP.
pub struct WebpTranscoder;

impl ImageTranscoder for WebpTranscoder {
    fn transcode(&self, bytes: &[u8]) -> DomainResult<TranscodedImage> {
        let format = image::guess_format(bytes)
            .map_err(|_| DomainError::Validation("unrecognized image format".to_string()))?;

        match format {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP => {}
            other => {
                return Err(DomainError::Validation(format!(
                    "unsupported image format: {:?}",
                    other
                )));
            }
        }

        let img = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| DomainError::Validation(format!("could not decode image: {}", e)))?;

        let (width, height) = (img.width(), img.height());
        let (new_width, new_height) = if width < height {
            let scaled = ((height as f64 / width as f64) * TARGET_SIZE as f64).round() as u32;
            (TARGET_SIZE, scaled)
        } else {
            let scaled = ((width as f64 / height as f64) * TARGET_SIZE as f64).round() as u32;
            (scaled, TARGET_SIZE)
        };

        let resized = img.resize_exact(new_width, new_height, FilterType::Lanczos3);
        let rgba = resized.to_rgba8();

        let mut data = Vec::new();
        WebPEncoder::new_lossless(Cursor::new(&mut data))
            .encode(rgba.as_raw(), new_width, new_height, ExtendedColorType::Rgba8)
            .map_err(|e| DomainError::Internal(format!("webp encoding failed: {}", e)))?;

        Ok(TranscodedImage {
            data,
            width: new_width,
            height: new_height,
        })
    }
}

/// On-disk store for transcoded images. Filenames are content hashes, so a
/// re-upload of identical bytes maps to the same file.
pub struct ImageStore {
    upload_dir: PathBuf,
}

impl ImageStore {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    pub fn ensure_dir(&self) -> DomainResult<()> {
        std::fs::create_dir_all(&self.upload_dir)
            .map_err(|e| DomainError::Internal(format!("could not create upload dir: {}", e)))
    }

    /// Write the image to disk; returns `(filename, byte size)`
    pub fn store(&self, image: &TranscodedImage) -> DomainResult<(String, i64)> {
        self.ensure_dir()?;

        let hex = blake3::hash(&image.data).to_hex();
        let filename = format!("{}.webp", &hex.as_str()[..16]);

        std::fs::write(self.path_of(&filename), &image.data)
            .map_err(|e| DomainError::Internal(format!("could not store image: {}", e)))?;

        Ok((filename, image.data.len() as i64))
    }

    /// Delete a stored file. Returns true if a file was removed.
    pub fn remove(&self, filename: &str) -> bool {
        let path = self.path_of(filename);
        path.exists() && std::fs::remove_file(&path).is_ok()
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.upload_dir.join(filename)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }
}
