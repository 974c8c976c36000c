use crate::{
    foundation::error::{FablepressError, FablepressResult},
    mask::EdgeStyle,
    text::TitleStyle,
};

/// Immutable render configuration for one book.
///
/// Every knob the compositor reads lives here, so two composers with
/// different settings can render concurrently and tests can inject small
/// page sizes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Finished page width in pixels.
    pub page_width: u32,
    /// Finished page height in pixels.
    pub page_height: u32,
    /// Resolution recorded in the output PNG metadata.
    pub dpi: u32,

    /// Story text size in pixels.
    pub font_px: f32,
    /// Cover title size in pixels.
    pub title_font_px: f32,
    /// Line height multiplier applied to `font_px`.
    pub line_spacing: f32,
    /// Horizontal margin reserved on each side of a text block.
    pub text_margin: u32,

    /// Background wash opacity at the page center (0..=1).
    pub bg_opacity_center: f32,
    /// Background wash opacity at the page edges (0..=1).
    pub bg_opacity_edge: f32,

    /// Amplitude of the decorative edge cut in pixels.
    pub wave_height_px: u32,
    /// Wave count used when the cut sits on the top edge.
    pub default_wave_count: u32,
    /// Pool of edge styles a page's seed may pick from.
    pub edge_styles: Vec<EdgeStyle>,

    /// Distance of the page number from the page edge.
    pub page_number_margin: u32,
    /// Page number size as a multiple of `font_px`.
    pub page_number_scale: f32,

    /// Height of the end-page bar as a fraction of the page (0..1).
    pub end_bar_fraction: f32,
    /// Call-to-action line on the end page.
    pub end_caption: String,
    /// Shop URL printed (and encoded) on the end page.
    pub shop_url: String,

    /// Decorative styling for the cover title.
    pub title_style: TitleStyle,
}

impl Default for BookConfig {
    fn default() -> Self {
        // 6.25 x 9.25 inches at 300 DPI.
        Self {
            page_width: 1875,
            page_height: 2775,
            dpi: 300,
            font_px: 48.0,
            title_font_px: 96.0,
            line_spacing: 2.0,
            text_margin: 100,
            bg_opacity_center: 0.03,
            bg_opacity_edge: 0.15,
            wave_height_px: 25,
            default_wave_count: 8,
            edge_styles: vec![EdgeStyle::Wave, EdgeStyle::Scallop, EdgeStyle::Zigzag],
            page_number_margin: 80,
            page_number_scale: 2.0,
            end_bar_fraction: 0.22,
            end_caption: "Thank you for reading!".to_string(),
            shop_url: "https://www.etsy.com/shop/studiobadeshop".to_string(),
            title_style: TitleStyle::default(),
        }
    }
}

impl BookConfig {
    /// Check internal consistency before any rendering starts.
    pub fn validate(&self) -> FablepressResult<()> {
        if self.page_width == 0 || self.page_height < 2 {
            return Err(FablepressError::validation(
                "page dimensions must be at least 1x2",
            ));
        }
        if !(self.font_px > 0.0) || !(self.title_font_px > 0.0) {
            return Err(FablepressError::validation("font sizes must be > 0"));
        }
        if !(self.line_spacing > 0.0) {
            return Err(FablepressError::validation("line_spacing must be > 0"));
        }
        if 2 * self.text_margin >= self.page_width {
            return Err(FablepressError::validation(
                "text_margin leaves no room for text",
            ));
        }
        for (name, v) in [
            ("bg_opacity_center", self.bg_opacity_center),
            ("bg_opacity_edge", self.bg_opacity_edge),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(FablepressError::validation(format!(
                    "{name} must be within 0..=1"
                )));
            }
        }
        if self.edge_styles.is_empty() {
            return Err(FablepressError::validation(
                "edge_styles pool must not be empty",
            ));
        }
        if !(self.end_bar_fraction > 0.0 && self.end_bar_fraction < 1.0) {
            return Err(FablepressError::validation(
                "end_bar_fraction must be within (0, 1)",
            ));
        }
        if !(self.page_number_scale > 0.0) {
            return Err(FablepressError::validation("page_number_scale must be > 0"));
        }
        Ok(())
    }

    /// Height of one page half; illustration and text each own one half.
    pub fn half_height(&self) -> u32 {
        self.page_height / 2
    }

    /// Widest a wrapped text line may measure.
    pub fn text_max_width(&self) -> f32 {
        (self.page_width - 2 * self.text_margin) as f32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
