use image::GrayImage;
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

/// Silhouette family cut into one edge of an illustration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Smooth sine wave.
    Wave,
    /// Row of semicircular cloud bumps.
    Scallop,
    /// Triangular zigzag teeth.
    Zigzag,
}

const WAVE_COUNT_RANGE: std::ops::RangeInclusive<u32> = 2..=10;
const SCALLOP_INSET: u32 = 10;

/// A decorative cut along one horizontal edge of a rectangular region.
///
/// Style and wave count for a page come from a generator seeded with the
/// page index, so re-rendering the same page always reproduces the same
/// silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecorativeEdge {
    /// Which silhouette family to cut.
    pub style: EdgeStyle,
    /// Whether the cut sits on the top edge (otherwise the bottom).
    pub at_top: bool,
    /// Peak depth of the cut in pixels.
    pub amplitude: u32,
    /// Number of full periods across the region width.
    pub wave_count: u32,
}

impl DecorativeEdge {
    /// Choose the edge for a page. A fresh generator is seeded from the
    /// page index; the style is drawn from `pool` and, for bottom cuts,
    /// the wave count from a fixed range. Top cuts use `fixed_wave_count`.
    pub fn for_page(
        index: u32,
        pool: &[EdgeStyle],
        at_top: bool,
        amplitude: u32,
        fixed_wave_count: u32,
    ) -> DecorativeEdge {
        let mut rng = StdRng::seed_from_u64(u64::from(index));
        let style = if pool.is_empty() {
            EdgeStyle::Wave
        } else {
            pool[rng.random_range(0..pool.len())]
        };
        let wave_count = if at_top {
            fixed_wave_count
        } else {
            rng.random_range(WAVE_COUNT_RANGE)
        };
        DecorativeEdge {
            style,
            at_top,
            amplitude,
            wave_count,
        }
    }

    /// Render this edge as an opacity mask (0 = cut away, 255 = kept)
    /// sized for the region it will be applied to.
    ///
    /// Degenerate geometry (zero dimensions, zero wave count, amplitude
    /// taller than the region) yields a fully opaque mask.
    pub fn mask(&self, width: u32, height: u32) -> GrayImage {
        let mut mask = GrayImage::from_pixel(width, height, image::Luma([255u8]));
        if width == 0
            || height == 0
            || self.wave_count == 0
            || self.amplitude == 0
            || self.amplitude >= height
        {
            return mask;
        }

        for x in 0..width {
            let cutoff = match self.style {
                EdgeStyle::Wave => self.wave_cutoff(x, width, height),
                EdgeStyle::Scallop => self.scallop_cutoff(x, width, height),
                EdgeStyle::Zigzag => self.zigzag_cutoff(x, width, height),
            };
            let cutoff = cutoff.clamp(0.0, f64::from(height)) as u32;
            if self.at_top {
                // Cut away everything above the silhouette.
                for y in 0..cutoff.min(height) {
                    mask.put_pixel(x, y, image::Luma([0]));
                }
            } else {
                for y in cutoff..height {
                    mask.put_pixel(x, y, image::Luma([0]));
                }
            }
        }
        mask
    }

    fn wave_cutoff(&self, x: u32, width: u32, height: u32) -> f64 {
        let amplitude = f64::from(self.amplitude);
        let progress =
            f64::from(x) / f64::from(width) * f64::from(self.wave_count) * 2.0 * std::f64::consts::PI;
        let offset = progress.sin() * amplitude;
        if self.at_top {
            amplitude - offset
        } else {
            f64::from(height) - amplitude + offset
        }
    }

    fn scallop_cutoff(&self, x: u32, width: u32, height: u32) -> f64 {
        let scallop_width = width / self.wave_count;
        let radius = scallop_width / 2;
        if scallop_width == 0 || radius == 0 {
            return if self.at_top { 0.0 } else { f64::from(height) };
        }
        let inset = SCALLOP_INSET.min(height / 4);
        let center_y = if self.at_top {
            f64::from(radius + inset)
        } else {
            f64::from(height) - f64::from(radius + inset)
        };

        let bump = x / scallop_width;
        let center_x = f64::from(bump * scallop_width + radius);
        let dx = (f64::from(x) - center_x).abs();
        let arc = if dx < f64::from(radius) {
            (f64::from(radius).powi(2) - dx.powi(2)).sqrt()
        } else {
            0.0
        };
        if self.at_top { center_y - arc } else { center_y + arc }
    }

    fn zigzag_cutoff(&self, x: u32, width: u32, height: u32) -> f64 {
        let teeth = self.wave_count * 2;
        let tooth_width = width / teeth;
        if tooth_width == 0 {
            return if self.at_top { 0.0 } else { f64::from(height) };
        }
        let amplitude = f64::from(self.amplitude);
        let tooth = (x / tooth_width).min(teeth - 1);
        let progress = f64::from(x - tooth * tooth_width) / f64::from(tooth_width);

        let (y1, y2) = if self.at_top {
            if tooth % 2 == 0 {
                (amplitude, 0.0)
            } else {
                (0.0, amplitude)
            }
        } else {
            let h = f64::from(height);
            if tooth % 2 == 0 {
                (h - amplitude, h)
            } else {
                (h, h - amplitude)
            }
        };
        y1 + (y2 - y1) * progress
    }
}

/// Build a vignette-style opacity mask: `center_opacity` at the rectangle
/// center, linearly approaching `edge_opacity` at the farthest corners.
/// Deterministic pure function.
pub fn radial_gradient(width: u32, height: u32, center_opacity: f32, edge_opacity: f32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return mask;
    }

    let cx = f64::from(width) / 2.0;
    let cy = f64::from(height) / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt();
    let center = f64::from(center_opacity.clamp(0.0, 1.0));
    let edge = f64::from(edge_opacity.clamp(0.0, 1.0));

    for (x, y, px) in mask.enumerate_pixels_mut() {
        let dx = f64::from(x) - cx;
        let dy = f64::from(y) - cy;
        let t = if max_dist > 0.0 {
            ((dx * dx + dy * dy).sqrt() / max_dist).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let opacity = center + (edge - center) * t;
        *px = image::Luma([(opacity * 255.0).round().clamp(0.0, 255.0) as u8]);
    }
    mask
}

#[cfg(test)]
#[path = "../tests/unit/mask.rs"]
mod tests;
