use std::path::Path;

use image::{GrayImage, RgbImage, RgbaImage, imageops};

use crate::{
    assets,
    foundation::{config::BookConfig, error::FablepressResult},
    mask::{DecorativeEdge, radial_gradient},
    story::StoryPage,
    text::{self, FontCatalog, MeasureText},
    theme::{DEFAULT_LIGHT, Rgb, ThemeColor},
};

/// Which role a rendered page plays in the finished book.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRole {
    /// Full-bleed artwork with the styled title.
    Cover,
    /// Alternating illustration/text page.
    Story,
    /// Closing page with the call-to-action bar.
    End,
}

/// Slot assignment for a story page, purely a function of page parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutSlot {
    /// Whether the illustration occupies the top half.
    pub illustration_top: bool,
}

impl LayoutSlot {
    /// Odd pages put the illustration on top, even pages invert.
    pub fn for_page(index: u32) -> LayoutSlot {
        LayoutSlot {
            illustration_top: index % 2 == 1,
        }
    }

    /// The decorative cut faces the text half.
    pub fn cut_at_top(self) -> bool {
        !self.illustration_top
    }

    /// The page number sits on the text-free page edge.
    pub fn number_at_bottom(self) -> bool {
        self.illustration_top
    }
}

const TITLE_LINE_SPACING: f32 = 1.2;
const END_BAR_RGB: Rgb = Rgb([28, 26, 32]);
const END_URL_SCALE: f32 = 0.6;

/// Composites finished page bitmaps from story content and on-disk
/// illustration assets. One composer can render pages in any order; it
/// holds no mutable state.
pub struct PageComposer {
    config: BookConfig,
    fonts: FontCatalog,
}

impl PageComposer {
    /// Validate the configuration and build a composer.
    pub fn new(config: BookConfig, fonts: FontCatalog) -> FablepressResult<PageComposer> {
        config.validate()?;
        Ok(PageComposer { config, fonts })
    }

    /// Render configuration in effect.
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Render one story page: themed background, cover-fit illustration
    /// with a decorative cut in one half, story text in the other, page
    /// number at the edge. A missing or corrupt illustration degrades to
    /// the default background; it never fails the page.
    pub fn render_story_page(
        &self,
        page: &StoryPage,
        illustration: &Path,
        wash: Option<&Path>,
    ) -> RgbImage {
        let cfg = &self.config;
        let slot = LayoutSlot::for_page(page.index);
        let theme = ThemeColor::from_path(illustration);

        let mut bitmap = self.background(wash, theme.light);

        match assets::load_rgba(illustration) {
            Ok(img) => {
                let half = cfg.half_height();
                let mut fitted = assets::cover_fit(&img, cfg.page_width, half);
                let edge = DecorativeEdge::for_page(
                    page.index,
                    &cfg.edge_styles,
                    slot.cut_at_top(),
                    cfg.wave_height_px,
                    cfg.default_wave_count,
                );
                apply_alpha_mask(&mut fitted, &edge.mask(cfg.page_width, half));
                let y0 = if slot.illustration_top { 0 } else { half };
                composite_over(&mut bitmap, &fitted, 0, y0);
            }
            Err(err) => {
                tracing::warn!(page = page.index, %err, "story page rendered without illustration");
            }
        }

        let text_top = if slot.illustration_top {
            cfg.half_height() as i32
        } else {
            0
        };
        text::draw_centered_block(
            &mut bitmap,
            &self.fonts.story_font(cfg.font_px),
            &page.text,
            text_top,
            cfg.half_height(),
            cfg.text_max_width(),
            cfg.line_spacing,
            theme.dark,
        );

        self.draw_page_number(&mut bitmap, page.index, slot.number_at_bottom(), theme.dark);
        bitmap
    }

    /// Render the cover: full-bleed cover-fit artwork with the styled
    /// title overlaid in the top third.
    pub fn render_cover(&self, title: &str, artwork: &Path) -> RgbImage {
        let cfg = &self.config;
        let theme = ThemeColor::from_path(artwork);

        let mut bitmap = RgbImage::from_pixel(
            cfg.page_width,
            cfg.page_height,
            theme.light.to_image_rgb(),
        );
        match assets::load_rgba(artwork) {
            Ok(img) => {
                let fitted = assets::cover_fit(&img, cfg.page_width, cfg.page_height);
                composite_over(&mut bitmap, &fitted, 0, 0);
            }
            Err(err) => {
                tracing::warn!(%err, "cover rendered without artwork");
            }
        }

        text::draw_title(
            &mut bitmap,
            &self.fonts.title_font(cfg.title_font_px),
            &cfg.title_style,
            title,
            0,
            cfg.page_height / 3,
            cfg.text_max_width(),
            TITLE_LINE_SPACING,
            theme.bright,
            theme.dark,
        );
        bitmap
    }

    /// Render the end page: washed background, dark bar across the bottom
    /// fraction holding the call-to-action line, the shop URL, and the
    /// scannable code bitmap when present.
    pub fn render_end(&self, wash: Option<&Path>, badge: Option<&Path>) -> RgbImage {
        let cfg = &self.config;
        let mut bitmap = self.background(wash, DEFAULT_LIGHT);

        let bar_h = ((cfg.page_height as f32) * cfg.end_bar_fraction).round() as u32;
        let bar_h = bar_h.clamp(1, cfg.page_height);
        let bar_top = cfg.page_height - bar_h;
        fill_rows(&mut bitmap, bar_top, bar_h, END_BAR_RGB);

        let caption_font = self.fonts.story_font(cfg.font_px);
        let url_font = self.fonts.story_font(cfg.font_px * END_URL_SCALE);

        let badge_img = badge.and_then(|path| match assets::load_rgba(path) {
            Ok(img) => Some(img),
            Err(err) => {
                tracing::warn!(%err, "end page rendered without scannable code");
                None
            }
        });

        let gap = cfg.font_px * 0.5;
        let badge_side = ((bar_h as f32) * 0.45).round() as u32;
        let mut total = caption_font.px() + gap + url_font.px();
        if badge_img.is_some() {
            total += gap + badge_side as f32;
        }
        let mut y = bar_top as f32 + ((bar_h as f32 - total) / 2.0).max(0.0);

        self.draw_line_centered(&mut bitmap, &caption_font, &cfg.end_caption, y, DEFAULT_LIGHT);
        y += caption_font.px() + gap;
        self.draw_line_centered(&mut bitmap, &url_font, &cfg.shop_url, y, DEFAULT_LIGHT);
        y += url_font.px() + gap;

        if let Some(img) = badge_img {
            let scaled = imageops::resize(
                &img,
                badge_side.max(1),
                badge_side.max(1),
                imageops::FilterType::Lanczos3,
            );
            let x0 = (cfg.page_width.saturating_sub(badge_side)) / 2;
            composite_over(&mut bitmap, &scaled, x0, y.round().max(0.0) as u32);
        }

        bitmap
    }

    /// Flat fill of the light shade, optionally washed with the radial
    /// gradient masked secondary image stretched over the full page.
    fn background(&self, wash: Option<&Path>, light: Rgb) -> RgbImage {
        let cfg = &self.config;
        let mut bitmap =
            RgbImage::from_pixel(cfg.page_width, cfg.page_height, light.to_image_rgb());

        let Some(path) = wash else {
            return bitmap;
        };
        match assets::load_rgba(path) {
            Ok(img) => {
                let mut stretched = imageops::resize(
                    &img,
                    cfg.page_width,
                    cfg.page_height,
                    imageops::FilterType::Lanczos3,
                );
                let gradient = radial_gradient(
                    cfg.page_width,
                    cfg.page_height,
                    cfg.bg_opacity_center,
                    cfg.bg_opacity_edge,
                );
                apply_alpha_mask(&mut stretched, &gradient);
                composite_over(&mut bitmap, &stretched, 0, 0);
            }
            Err(err) => {
                tracing::warn!(%err, "page background rendered without wash image");
            }
        }
        bitmap
    }

    fn draw_page_number(&self, img: &mut RgbImage, number: u32, at_bottom: bool, color: Rgb) {
        let cfg = &self.config;
        let font = self
            .fonts
            .story_font(cfg.font_px * cfg.page_number_scale);
        let label = number.to_string();
        let width = font.line_width(&label);
        let x = ((cfg.page_width as f32 - width) / 2.0).round() as i32;
        let y = if at_bottom {
            cfg.page_height as i32 - cfg.page_number_margin as i32 - font.px().round() as i32
        } else {
            cfg.page_number_margin as i32
        };
        font.draw_line(img, x, y, color, &label);
    }

    fn draw_line_centered(
        &self,
        img: &mut RgbImage,
        font: &text::BookFont,
        line: &str,
        y: f32,
        color: Rgb,
    ) {
        use crate::text::MeasureText as _;
        let width = font.line_width(line);
        let x = ((self.config.page_width as f32 - width) / 2.0).round() as i32;
        font.draw_line(img, x, y.round() as i32, color, line);
    }
}

/// Multiply the alpha channel by a single-channel opacity mask; both
/// buffers must share dimensions.
fn apply_alpha_mask(img: &mut RgbaImage, mask: &GrayImage) {
    debug_assert_eq!(img.dimensions(), mask.dimensions());
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px[3] = mul_div255(u16::from(px[3]), u16::from(m[0]));
    }
}

/// Alpha-composite a straight-alpha RGBA source over an opaque RGB page
/// at the given offset, clipping to the page bounds.
fn composite_over(page: &mut RgbImage, src: &RgbaImage, x0: u32, y0: u32) {
    let (pw, ph) = page.dimensions();
    for (sx, sy, sp) in src.enumerate_pixels() {
        let (dx, dy) = (x0 + sx, y0 + sy);
        if dx >= pw || dy >= ph {
            continue;
        }
        let a = u16::from(sp[3]);
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        let dp = page.get_pixel_mut(dx, dy);
        for i in 0..3 {
            dp[i] = mul_div255(u16::from(sp[i]), a).saturating_add(mul_div255(u16::from(dp[i]), inv));
        }
    }
}

fn fill_rows(page: &mut RgbImage, top: u32, rows: u32, color: Rgb) {
    let (w, h) = page.dimensions();
    for y in top..(top + rows).min(h) {
        for x in 0..w {
            page.put_pixel(x, y, color.to_image_rgb());
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../tests/unit/compose.rs"]
mod tests;
