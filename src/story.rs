use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{FablepressError, FablepressResult};

const FALLBACK_TITLE: &str = "My Storybook";

/// One unit of story content; indices start at 1 and double as the seed
/// for that page's decorative edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryPage {
    /// 1-based page number.
    pub index: u32,
    /// Story text shown on the page.
    pub text: String,
}

/// A parsed story: title plus ordered pages. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryDocument {
    /// Book title for the cover.
    pub title: String,
    /// Story pages in reading order.
    pub pages: Vec<StoryPage>,
}

// Upstream generators emit either bare strings or `{"story": ...}`
// objects; accept both.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawPage {
    Entry { story: String },
    Text(String),
}

impl RawPage {
    fn into_text(self) -> String {
        match self {
            RawPage::Entry { story } => story,
            RawPage::Text(text) => text,
        }
    }
}

impl StoryDocument {
    /// Parse a story JSON array. A document with zero pages is fatal:
    /// there is nothing meaningful to render.
    pub fn from_json_str(json: &str, explicit_title: Option<&str>) -> FablepressResult<Self> {
        let raw: Vec<RawPage> = serde_json::from_str(json)
            .map_err(|e| FablepressError::story(format!("malformed story JSON: {e}")))?;
        if raw.is_empty() {
            return Err(FablepressError::story("story document has no pages"));
        }

        let pages: Vec<StoryPage> = raw
            .into_iter()
            .enumerate()
            .map(|(i, p)| StoryPage {
                index: (i + 1) as u32,
                text: p.into_text(),
            })
            .collect();

        let title = match explicit_title {
            Some(t) if !t.trim().is_empty() => t.trim().to_string(),
            _ => infer_title(&pages),
        };

        Ok(StoryDocument { title, pages })
    }

    /// Read and parse a story JSON file.
    pub fn from_path(path: &Path, explicit_title: Option<&str>) -> FablepressResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read story '{}'", path.display()))?;
        Self::from_json_str(&json, explicit_title)
    }
}

/// Promote the first page's text to the title when it looks like one:
/// short, and either shouted in uppercase or carrying an apostrophe.
fn infer_title(pages: &[StoryPage]) -> String {
    if let Some(first) = pages.first() {
        let candidate = first.text.trim();
        let short = !candidate.is_empty() && candidate.split_whitespace().count() <= 10;
        let title_cased = candidate == candidate.to_uppercase() || candidate.contains('\'');
        if short && title_cased {
            return candidate.to_string();
        }
    }
    FALLBACK_TITLE.to_string()
}

/// Output filename for the cover page.
pub fn cover_filename() -> String {
    "page_00_cover.png".to_string()
}

/// Input filename for the cover artwork.
pub fn cover_art_filename() -> String {
    "page_00_cover_bg.png".to_string()
}

/// Filename for a story page bitmap (input illustration and rendered
/// output share the convention).
pub fn story_page_filename(index: u32) -> String {
    format!("page_{index:02}.png")
}

/// Input filename for a story page's background wash.
pub fn wash_filename(index: u32) -> String {
    format!("page_{index:02}_bg.png")
}

/// Output filename for the end page.
pub fn end_filename(index: u32) -> String {
    format!("page_{index:02}_end.png")
}

/// Input filename for the end page's background wash.
pub fn end_wash_filename(index: u32) -> String {
    format!("page_{index:02}_end_bg.png")
}

/// Input filename for the end page's scannable code bitmap.
pub fn end_badge_filename(index: u32) -> String {
    format!("page_{index:02}_end_badge.png")
}

#[cfg(test)]
#[path = "../tests/unit/story.rs"]
mod tests;
