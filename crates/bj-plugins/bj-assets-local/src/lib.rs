//! # bj-assets-local
//! brew-journal/crates/bj-plugins/bj-assets-local/src/lib.rs
//! Local filesystem implementation of `AssetStore`.
//!
//! One flat content directory of JPEG files, each named with a random
//! unique token. Every failure path degrades to `None`: a record that
//! references a missing or corrupt asset simply renders without it.

use std::path::PathBuf;

use async_trait::async_trait;
use bj_core::traits::AssetStore;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tokio::fs;
use uuid::Uuid;

/// JPEG quality factor used for every stored asset (0.8 in UIKit terms).
const JPEG_QUALITY: u8 = 80;

pub struct LocalAssetStore {
    /// Flat content directory for all assets (e.g., "./data/assets")
    root: PathBuf,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Decodes arbitrary picker bytes and re-encodes them as JPEG.
    fn transcode(bytes: &[u8]) -> Option<Vec<u8>> {
        let img = match image::load_from_memory(bytes) {
            Ok(img) => img,
            Err(err) => {
                log::warn!("asset bytes not decodable as an image: {err}");
                return None;
            }
        };

        // JPEG has no alpha channel; flatten whatever the picker handed us.
        let rgb = img.to_rgb8();
        let mut encoded = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
        if let Err(err) =
            encoder.write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        {
            log::warn!("JPEG encode failed: {err}");
            return None;
        }
        Some(encoded)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    /// Saves picker bytes as a quality-80 JPEG under `<uuid>.jpg`.
    ///
    /// Returns `None` ("no asset produced") on any encode or write failure;
    /// the caller treats that as "no image attached", never as fatal.
    async fn save(&self, bytes: &[u8]) -> Option<String> {
        let encoded = Self::transcode(bytes)?;

        let name = format!("{}.jpg", Uuid::new_v4());
        if let Err(err) = fs::create_dir_all(&self.root).await {
            log::warn!("cannot create asset dir {}: {err}", self.root.display());
            return None;
        }
        if let Err(err) = fs::write(self.path_for(&name), &encoded).await {
            log::warn!("asset write failed for {name}: {err}");
            return None;
        }

        log::debug!("stored asset {name} ({} bytes)", encoded.len());
        Some(name)
    }

    /// Loads the named asset, or `None` if it is missing or not a readable
    /// image. Missing files are the expected case for stale soft references
    /// and are not logged.
    async fn load(&self, name: &str) -> Option<Vec<u8>> {
        let bytes = fs::read(self.path_for(name)).await.ok()?;
        if let Err(err) = image::load_from_memory(&bytes) {
            log::warn!("stored asset {name} is corrupt: {err}");
            return None;
        }
        Some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny valid PNG, standing in for raw picker output.
    fn png_fixture(shade: u8) -> Vec<u8> {
        use std::io::Cursor;

        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([shade, shade / 2, 30]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("in-memory PNG encode");
        buf
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        let name = store.save(&png_fixture(200)).await.expect("asset saved");
        assert!(name.ends_with(".jpg"));

        let bytes = store.load(&name).await.expect("asset loads");
        // Stored form is the JPEG transcode, decodable on its own.
        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[tokio::test]
    async fn test_filenames_are_unique_per_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        let a = store.save(&png_fixture(10)).await.unwrap();
        let b = store.save(&png_fixture(10)).await.unwrap();
        // Identical input bytes still get distinct files: no two live
        // records may share a filename.
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_undecodable_bytes_produce_no_asset() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        assert!(store.save(b"definitely not an image").await.is_none());
        // Nothing should have been written.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_load_missing_asset_is_absent_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        assert!(store.load("ghost.jpg").await.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_asset_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path());

        let name = store.save(&png_fixture(90)).await.unwrap();
        std::fs::write(dir.path().join(&name), b"scribbled over").unwrap();

        assert!(store.load(&name).await.is_none());
    }
}
