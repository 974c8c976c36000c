use std::{collections::HashMap, path::Path};

use image::{RgbaImage, imageops};

use crate::assets;

/// Plain 8-bit RGB triple used for theming and text colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Largest channel value.
    pub fn max_channel(self) -> u8 {
        self.0.into_iter().max().unwrap_or(0)
    }

    /// Multiply each channel by its own factor, saturating at 255.
    pub fn scaled(self, factors: [f32; 3]) -> Rgb {
        let mut out = [0u8; 3];
        for i in 0..3 {
            out[i] = (f32::from(self.0[i]) * factors[i]).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }

    pub(crate) fn to_image_rgb(self) -> image::Rgb<u8> {
        image::Rgb(self.0)
    }
}

/// Fallback light shade when no usable color can be extracted.
pub const DEFAULT_LIGHT: Rgb = Rgb([255, 250, 245]);
/// Fallback dark shade when no usable color can be extracted.
pub const DEFAULT_DARK: Rgb = Rgb([0, 0, 0]);

// Extraction tuning. Saturation is weighted far above brightness so a
// small vivid region beats a large grey one.
const SAMPLE_SIZE: u32 = 100;
const QUANT_STEP: u8 = 8;
const TOP_COLORS: usize = 50;
const MIN_BRIGHTNESS: u8 = 60;
const MIN_SATURATION: f32 = 0.25;
const SATURATION_WEIGHT: f32 = 300.0;
const FALLBACK_MIN_BRIGHTNESS: u8 = 50;
const BRIGHT_BOOST_CAP: f32 = 3.0;

/// Dark, light, and bright shades derived from an illustration's dominant
/// vibrant color. Recomputed per render; never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColor {
    /// Shade for body text, darkened asymmetrically (blue retained most).
    pub dark: Rgb,
    /// Pastel shade for page backgrounds, blended toward white.
    pub light: Rgb,
    /// The same hue pushed toward full vibrancy, for cover titles.
    pub bright: Rgb,
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self {
            dark: DEFAULT_DARK,
            light: DEFAULT_LIGHT,
            bright: DEFAULT_LIGHT,
        }
    }
}

impl ThemeColor {
    /// Derive a theme from an image file. Never fails: a missing or
    /// unreadable asset produces the documented default theme.
    pub fn from_path(path: &Path) -> ThemeColor {
        match assets::load_rgba(path) {
            Ok(img) => Self::from_image(&img),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "theme extraction fell back to defaults");
                ThemeColor::default()
            }
        }
    }

    /// Derive a theme from decoded pixels. Pure: identical input bytes
    /// always produce the identical theme.
    pub fn from_image(img: &RgbaImage) -> ThemeColor {
        match dominant_vibrant(img) {
            Some(base) => Self::from_base(base),
            None => ThemeColor::default(),
        }
    }

    fn from_base(base: Rgb) -> ThemeColor {
        let dark = base.scaled([0.5, 0.6, 0.7]);
        let light = {
            let mut out = [0u8; 3];
            for (i, f) in [0.15f32, 0.12, 0.10].into_iter().enumerate() {
                let c = f32::from(base.0[i]);
                out[i] = (255.0 - (255.0 - c) * f).round().clamp(0.0, 255.0) as u8;
            }
            Rgb(out)
        };
        let bright = brighten(base);
        ThemeColor { dark, light, bright }
    }
}

/// Scale a color so its max channel reaches 255 while preserving hue,
/// capped at a fixed boost so near-black colors stay subdued.
fn brighten(base: Rgb) -> Rgb {
    let max = base.max_channel();
    if max == 0 {
        return DEFAULT_LIGHT;
    }
    let factor = (255.0 / f32::from(max)).min(BRIGHT_BOOST_CAP);
    base.scaled([factor; 3])
}

/// Pick the most vibrant frequent color, or `None` when the image has no
/// usable pixels at all.
fn dominant_vibrant(img: &RgbaImage) -> Option<Rgb> {
    if img.width() == 0 || img.height() == 0 {
        return None;
    }

    // Downsample to a fixed grid so cost is bounded by configuration, not
    // by source resolution.
    let small = imageops::resize(img, SAMPLE_SIZE, SAMPLE_SIZE, imageops::FilterType::Lanczos3);

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    for px in small.pixels() {
        let q = [
            (px[0] / QUANT_STEP) * QUANT_STEP,
            (px[1] / QUANT_STEP) * QUANT_STEP,
            (px[2] / QUANT_STEP) * QUANT_STEP,
        ];
        *counts.entry(q).or_insert(0) += 1;
    }

    // Sort by frequency, tie-broken on the color bytes so extraction stays
    // deterministic across hash orderings.
    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(TOP_COLORS);

    let mut best: Option<(Rgb, f32)> = None;
    for &(color, _) in &ranked {
        let max = color.into_iter().max().unwrap_or(0);
        let min = color.into_iter().min().unwrap_or(0);
        if max < MIN_BRIGHTNESS {
            continue;
        }
        let saturation = f32::from(max - min) / f32::from(max);
        if saturation < MIN_SATURATION {
            continue;
        }
        let score = saturation * SATURATION_WEIGHT + f32::from(max);
        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((Rgb(color), score));
        }
    }
    if let Some((color, _)) = best {
        return Some(color);
    }

    // No saturated candidate: take the brightest color that is not
    // essentially black.
    let mut brightest: Option<(Rgb, u8)> = None;
    for &(color, _) in &ranked {
        let max = color.into_iter().max().unwrap_or(0);
        if max > FALLBACK_MIN_BRIGHTNESS && brightest.map(|(_, m)| max > m).unwrap_or(true) {
            brightest = Some((Rgb(color), max));
        }
    }
    brightest.map(|(color, _)| color)
}

#[cfg(test)]
#[path = "../tests/unit/theme.rs"]
mod tests;
