// SPDX-License-Identifier: GPL-3.0-only

//! Async PNG encoding and saving
//!
//! Stills are always PNG: the captured artifact must be a lossless raster
//! of the filtered frame. Encoding runs in a blocking task to keep the
//! runtime responsive.

use crate::constants::PHOTO_FILE_NAME;
use crate::errors::{AppError, AppResult};
use image::{ImageEncoder, RgbaImage, codecs::png::PngEncoder};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encode an RGBA raster as PNG
pub async fn encode_png(img: RgbaImage) -> AppResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    info!(width, height, "Encoding PNG");

    tokio::task::spawn_blocking(move || -> AppResult<Vec<u8>> {
        let mut data = Vec::new();
        PngEncoder::new(&mut data).write_image(
            img.as_raw(),
            width,
            height,
            image::ExtendedColorType::Rgba8,
        )?;
        debug!(size = data.len(), "Encoding complete");
        Ok(data)
    })
    .await
    .map_err(|e| AppError::Storage(format!("Encoding task error: {}", e)))?
}

/// Save an encoded photo as `photo.png` in the output directory
///
/// A repeated capture overwrites the previous artifact, matching the fixed
/// download name of the original design.
pub async fn save_photo(data: Vec<u8>, output_dir: &Path) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(output_dir).await?;

    let path = output_dir.join(PHOTO_FILE_NAME);
    tokio::fs::write(&path, data).await?;

    info!(path = %path.display(), "Photo saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_produces_png_signature() {
        let img = RgbaImage::from_pixel(3, 3, image::Rgba([255, 0, 0, 255]));
        let data = encode_png(img).await.unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }

    #[tokio::test]
    async fn test_save_uses_fixed_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_photo(vec![1, 2, 3], dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), PHOTO_FILE_NAME);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_repeated_capture_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        save_photo(vec![1], dir.path()).await.unwrap();
        let path = save_photo(vec![2], dir.path()).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![2]);
    }
}
