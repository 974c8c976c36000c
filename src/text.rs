use std::path::Path;

use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont as _};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;

use crate::{
    foundation::error::{FablepressError, FablepressResult},
    theme::Rgb,
};

/// Pixel-width measurement seam, so wrapping logic can be exercised
/// without real font files.
pub trait MeasureText {
    /// Measured width of `text` laid out on a single line.
    fn line_width(&self, text: &str) -> f32;
}

/// One font face fixed at a pixel size.
#[derive(Clone)]
pub struct BookFont {
    font: FontArc,
    px: f32,
}

impl BookFont {
    /// Wrap a parsed face at the given pixel size.
    pub fn new(font: FontArc, px: f32) -> BookFont {
        BookFont { font, px }
    }

    /// Configured pixel size.
    pub fn px(&self) -> f32 {
        self.px
    }

    /// Draw a single line with its top-left corner at `(x, y)`.
    pub fn draw_line(&self, img: &mut RgbImage, x: i32, y: i32, color: Rgb, text: &str) {
        draw_text_mut(
            img,
            color.to_image_rgb(),
            x,
            y,
            PxScale::from(self.px),
            &self.font,
            text,
        );
    }

    /// Draw a single line character by character with a manual advance,
    /// supporting letter spacing plain string drawing does not offer.
    pub fn draw_line_spaced(
        &self,
        img: &mut RgbImage,
        x: f32,
        y: i32,
        color: Rgb,
        text: &str,
        letter_spacing: f32,
    ) {
        let scaled = self.font.as_scaled(PxScale::from(self.px));
        let mut caret = x;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            let glyph = scaled.glyph_id(ch);
            draw_text_mut(
                img,
                color.to_image_rgb(),
                caret.round() as i32,
                y,
                PxScale::from(self.px),
                &self.font,
                ch.encode_utf8(&mut buf),
            );
            caret += scaled.h_advance(glyph) + letter_spacing;
        }
    }

    /// Width of `text` with extra per-character spacing applied.
    pub fn spaced_width(&self, text: &str, letter_spacing: f32) -> f32 {
        let width = self.line_width(text);
        let gaps = text.chars().count().saturating_sub(1);
        width + letter_spacing * gaps as f32
    }
}

impl MeasureText for BookFont {
    fn line_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(self.px));
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            let glyph = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, glyph);
            }
            width += scaled.h_advance(glyph);
            prev = Some(glyph);
        }
        width
    }
}

/// Greedy word wrap: words are appended while the measured line still fits
/// `max_width`; a single word wider than `max_width` is emitted unsplit.
pub fn wrap_text(measure: &impl MeasureText, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure.line_width(&candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Top of a vertically centered block of `line_count` lines inside the
/// area starting at `area_top`.
pub fn block_top(area_top: i32, area_height: u32, line_count: usize, line_height: f32) -> i32 {
    let block = line_height * line_count as f32;
    area_top + ((area_height as f32 - block) / 2.0).round() as i32
}

/// Wrap `text` and draw it centered both ways inside the given area.
pub fn draw_centered_block(
    img: &mut RgbImage,
    font: &BookFont,
    text: &str,
    area_top: i32,
    area_height: u32,
    max_width: f32,
    line_spacing: f32,
    color: Rgb,
) {
    let lines = wrap_text(font, text, max_width);
    if lines.is_empty() {
        return;
    }
    let line_height = font.px() * line_spacing;
    let top = block_top(area_top, area_height, lines.len(), line_height);
    let page_width = img.width() as f32;

    for (i, line) in lines.iter().enumerate() {
        let width = font.line_width(line);
        let x = ((page_width - width) / 2.0).round() as i32;
        let y = top + (i as f32 * line_height).round() as i32;
        font.draw_line(img, x, y, color, line);
    }
}

/// Decorative styling applied to cover titles so they stay legible over a
/// busy illustration regardless of local contrast.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TitleStyle {
    /// Extra advance between characters in pixels.
    pub letter_spacing: f32,
    /// Number of stacked drop-shadow layers behind the fill.
    pub shadow_layers: u32,
    /// Diagonal step between consecutive shadow layers in pixels.
    pub shadow_step: i32,
    /// Outline thickness in pixels (drawn in 8 compass directions).
    pub outline_px: i32,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            letter_spacing: 4.0,
            shadow_layers: 6,
            shadow_step: 3,
            outline_px: 4,
        }
    }
}

struct SpacedMeasure<'a> {
    font: &'a BookFont,
    letter_spacing: f32,
}

impl MeasureText for SpacedMeasure<'_> {
    fn line_width(&self, text: &str) -> f32 {
        self.font.spaced_width(text, self.letter_spacing)
    }
}

/// Draw a styled title centered in the given area: layered 3D shadow, then
/// an 8-direction outline in a contrasting color, then the fill.
#[allow(clippy::too_many_arguments)]
pub fn draw_title(
    img: &mut RgbImage,
    font: &BookFont,
    style: &TitleStyle,
    text: &str,
    area_top: i32,
    area_height: u32,
    max_width: f32,
    line_spacing: f32,
    fill: Rgb,
    outline: Rgb,
) {
    let measure = SpacedMeasure {
        font,
        letter_spacing: style.letter_spacing,
    };
    let lines = wrap_text(&measure, text, max_width);
    if lines.is_empty() {
        return;
    }
    let line_height = font.px() * line_spacing;
    let top = block_top(area_top, area_height, lines.len(), line_height);
    let page_width = img.width() as f32;

    for (i, line) in lines.iter().enumerate() {
        let width = measure.line_width(line);
        let x = (page_width - width) / 2.0;
        let y = top + (i as f32 * line_height).round() as i32;

        // Back-to-front: deepest shadow layer first, darkest.
        for layer in (1..=style.shadow_layers).rev() {
            let depth = layer as f32 / (style.shadow_layers as f32 + 1.0);
            let shade = fill.scaled([0.6 * (1.0 - depth); 3]);
            let offset = layer as i32 * style.shadow_step;
            font.draw_line_spaced(
                img,
                x + offset as f32,
                y + offset,
                shade,
                line,
                style.letter_spacing,
            );
        }

        if style.outline_px > 0 {
            let o = style.outline_px;
            for (dx, dy) in [
                (-o, -o),
                (0, -o),
                (o, -o),
                (-o, 0),
                (o, 0),
                (-o, o),
                (0, o),
                (o, o),
            ] {
                font.draw_line_spaced(
                    img,
                    x + dx as f32,
                    y + dy,
                    outline,
                    line,
                    style.letter_spacing,
                );
            }
        }

        font.draw_line_spaced(img, x, y, fill, line, style.letter_spacing);
    }
}

// Preferred faces, most decorative first for titles and most readable
// first for story text.
const TITLE_FACES: [&str; 2] = ["Pacifico-Regular.ttf", "DynaPuff-Regular.ttf"];
const STORY_FACES: [&str; 2] = ["DynaPuff-Regular.ttf", "Pacifico-Regular.ttf"];

/// Parsed story and title faces shared by every page of a render.
#[derive(Clone)]
pub struct FontCatalog {
    story: FontArc,
    title: FontArc,
}

impl FontCatalog {
    /// Resolve faces from a fonts directory, trying the preferred names
    /// first and falling back to any TrueType/OpenType file found there.
    pub fn load(fonts_dir: &Path) -> FablepressResult<FontCatalog> {
        let story = resolve_face(fonts_dir, &STORY_FACES)?;
        let title = resolve_face(fonts_dir, &TITLE_FACES)?;
        Ok(FontCatalog { story, title })
    }

    /// Use one face for both roles (test and single-font setups).
    pub fn from_single(font: FontArc) -> FontCatalog {
        FontCatalog {
            story: font.clone(),
            title: font,
        }
    }

    /// Story face at the given pixel size.
    pub fn story_font(&self, px: f32) -> BookFont {
        BookFont::new(self.story.clone(), px)
    }

    /// Title face at the given pixel size.
    pub fn title_font(&self, px: f32) -> BookFont {
        BookFont::new(self.title.clone(), px)
    }
}

fn resolve_face(fonts_dir: &Path, preferred: &[&str]) -> FablepressResult<FontArc> {
    for name in preferred {
        let path = fonts_dir.join(name);
        if path.exists() {
            return parse_face(&path);
        }
    }

    // Any face is better than no text at all.
    let mut candidates: Vec<_> = std::fs::read_dir(fonts_dir)
        .map_err(|e| {
            FablepressError::validation(format!(
                "cannot read fonts dir '{}': {e}",
                fonts_dir.display()
            ))
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("ttf" | "otf" | "TTF" | "OTF")
            )
        })
        .collect();
    candidates.sort();

    match candidates.first() {
        Some(path) => parse_face(path),
        None => Err(FablepressError::validation(format!(
            "no usable font found under '{}'",
            fonts_dir.display()
        ))),
    }
}

fn parse_face(path: &Path) -> FablepressResult<FontArc> {
    let bytes = std::fs::read(path)
        .map_err(|e| FablepressError::validation(format!("read font '{}': {e}", path.display())))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| FablepressError::validation(format!("parse font '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../tests/unit/text.rs"]
mod tests;
