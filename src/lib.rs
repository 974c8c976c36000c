//! Fablepress composites illustrated storybook pages into print-ready
//! bitmaps.
//!
//! Given a parsed story ([`StoryDocument`]) and per-page illustration
//! assets on disk, the pipeline produces one finished RGB page per story
//! unit plus a cover and an end page:
//!
//! 1. **Theme**: extract the dominant vibrant color of the page's
//!    illustration and derive dark/light/bright shades ([`ThemeColor`]).
//! 2. **Decorate**: cut a seeded wave/scallop/zigzag silhouette into one
//!    edge of the illustration ([`DecorativeEdge`]) and blend an optional
//!    background wash through a radial gradient.
//! 3. **Compose**: cover-fit the illustration into its page half, lay out
//!    wrapped story text in the other, draw the page number
//!    ([`PageComposer`]).
//! 4. **Write**: publish each page atomically as an RGB8 PNG with DPI
//!    metadata ([`pipeline::render_book`]).
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: page index seeds all per-page
//!   randomness, so re-rendering an identical input set reproduces
//!   byte-identical pages.
//! - **Degrade, don't abort**: a missing or corrupt asset downgrades that
//!   page to its default background; only an empty story is fatal.
#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod foundation;
pub mod mask;
pub mod pipeline;
pub mod story;
pub mod text;
pub mod theme;

pub use assets::{AssetError, AssetResult, cover_fit, load_rgba, save_png_with_dpi};
pub use compose::{LayoutSlot, PageComposer, PageRole};
pub use foundation::config::BookConfig;
pub use foundation::error::{FablepressError, FablepressResult};
pub use mask::{DecorativeEdge, EdgeStyle, radial_gradient};
pub use pipeline::{RenderStats, RenderThreading, render_book};
pub use story::{StoryDocument, StoryPage};
pub use text::{BookFont, FontCatalog, MeasureText, TitleStyle, draw_centered_block, draw_title, wrap_text};
pub use theme::{Rgb, ThemeColor};
