use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use image::{RgbImage, RgbaImage, imageops};

use crate::foundation::error::FablepressResult;

/// Result type for asset loading.
pub type AssetResult<T> = Result<T, AssetError>;

/// Why a page asset could not be produced.
///
/// Callers are expected to match on this: the page composer substitutes a
/// default background for either case, while unexpected failures (IO
/// permission errors and the like) surface through the `Decode` source.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// The expected file does not exist.
    #[error("asset missing: {path}")]
    Missing {
        /// Path that was probed.
        path: PathBuf,
    },

    /// The file exists but its bytes could not be decoded as an image.
    #[error("asset unreadable: {path}: {source}")]
    Decode {
        /// Path that failed to decode.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },
}

/// Load an image as straight-alpha RGBA8, distinguishing a missing file
/// from corrupt bytes.
pub fn load_rgba(path: &Path) -> AssetResult<RgbaImage> {
    if !path.exists() {
        return Err(AssetError::Missing {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Scale an image up just enough to cover `target_w x target_h`, then
/// center-crop the overflow. Never letterboxes and never stretches.
pub fn cover_fit(img: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || target_w == 0 || target_h == 0 {
        return RgbaImage::new(target_w, target_h);
    }

    let scale = f64::max(
        f64::from(target_w) / f64::from(w),
        f64::from(target_h) / f64::from(h),
    );
    let new_w = ((f64::from(w) * scale).round() as u32).max(target_w);
    let new_h = ((f64::from(h) * scale).round() as u32).max(target_h);

    let resized = imageops::resize(img, new_w, new_h, imageops::FilterType::Lanczos3);
    let left = (new_w - target_w) / 2;
    let top = (new_h - target_h) / 2;
    imageops::crop_imm(&resized, left, top, target_w, target_h).to_image()
}

/// Write a finished page as an RGB8 PNG carrying physical-resolution
/// metadata, via a temporary file so a failed write never publishes a
/// truncated page.
pub fn save_png_with_dpi(img: &RgbImage, path: &Path, dpi: u32) -> FablepressResult<()> {
    let tmp_path = path.with_extension("png.tmp");
    let mut guard = TempFileGuard(Some(tmp_path.clone()));

    {
        let file = File::create(&tmp_path)
            .with_context(|| format!("create temp page '{}'", tmp_path.display()))?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), img.width(), img.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        // pHYs is specified in pixels per meter.
        let ppm = (f64::from(dpi) * 1000.0 / 25.4).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder
            .write_header()
            .with_context(|| format!("write png header '{}'", tmp_path.display()))?;
        writer
            .write_image_data(img.as_raw())
            .with_context(|| format!("write png data '{}'", tmp_path.display()))?;
        writer
            .finish()
            .with_context(|| format!("finish png '{}'", tmp_path.display()))?;
    }

    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("publish page '{}'", path.display()))?;
    guard.0 = None;
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/assets.rs"]
mod tests;
