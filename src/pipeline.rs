use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    assets,
    compose::{PageComposer, PageRole},
    foundation::error::{FablepressError, FablepressResult},
    story::{self, StoryDocument, StoryPage},
};

/// Threading policy for a batch render. Pages are independent and write
/// to pre-determined filenames, so parallelism needs no coordination.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render pages across a rayon pool instead of sequentially.
    pub parallel: bool,
    /// Override worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Summary of one batch render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Bitmaps the batch set out to produce (story pages + cover + end).
    pub pages_total: u64,
    /// Bitmaps actually written.
    pub pages_rendered: u64,
    /// Pages whose primary artwork was absent or unreadable.
    pub assets_missing: u64,
}

#[derive(Clone, Debug)]
struct PageJob {
    role: PageRole,
    page: Option<StoryPage>,
    end_index: u32,
    out_path: PathBuf,
}

/// Render every page of `doc` into `out_dir`, reading illustration assets
/// from `images_dir`. Produces exactly `pages + 2` bitmaps; individual
/// missing assets degrade per page, but an empty story is fatal before
/// any file is written.
#[tracing::instrument(skip_all, fields(pages = doc.pages.len(), out = %out_dir.display()))]
pub fn render_book(
    doc: &StoryDocument,
    composer: &PageComposer,
    images_dir: &Path,
    out_dir: &Path,
    threading: &RenderThreading,
) -> FablepressResult<RenderStats> {
    if doc.pages.is_empty() {
        return Err(FablepressError::story("story document has no pages"));
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let end_index = doc.pages.len() as u32 + 1;
    let mut jobs = Vec::with_capacity(doc.pages.len() + 2);
    jobs.push(PageJob {
        role: PageRole::Cover,
        page: None,
        end_index,
        out_path: out_dir.join(story::cover_filename()),
    });
    for page in &doc.pages {
        jobs.push(PageJob {
            role: PageRole::Story,
            page: Some(page.clone()),
            end_index,
            out_path: out_dir.join(story::story_page_filename(page.index)),
        });
    }
    jobs.push(PageJob {
        role: PageRole::End,
        page: None,
        end_index,
        out_path: out_dir.join(story::end_filename(end_index)),
    });

    let missing_counts: Vec<u64> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let results: Vec<FablepressResult<u64>> = pool.install(|| {
            jobs.par_iter()
                .map(|job| run_job(doc, composer, images_dir, job))
                .collect()
        });
        results.into_iter().collect::<FablepressResult<Vec<u64>>>()?
    } else {
        let mut out = Vec::with_capacity(jobs.len());
        for job in &jobs {
            out.push(run_job(doc, composer, images_dir, job)?);
        }
        out
    };

    let total = jobs.len() as u64;
    Ok(RenderStats {
        pages_total: total,
        pages_rendered: total,
        assets_missing: missing_counts.into_iter().sum(),
    })
}

fn run_job(
    doc: &StoryDocument,
    composer: &PageComposer,
    images_dir: &Path,
    job: &PageJob,
) -> FablepressResult<u64> {
    let (bitmap, missing) = match job.role {
        PageRole::Cover => {
            let art = images_dir.join(story::cover_art_filename());
            let missing = u64::from(!art.exists());
            (composer.render_cover(&doc.title, &art), missing)
        }
        PageRole::Story => {
            let page = job
                .page
                .as_ref()
                .ok_or_else(|| FablepressError::render("story job without page content"))?;
            let illustration = images_dir.join(story::story_page_filename(page.index));
            let wash = images_dir.join(story::wash_filename(page.index));
            let missing = u64::from(!illustration.exists());
            (
                composer.render_story_page(page, &illustration, Some(&wash)),
                missing,
            )
        }
        PageRole::End => {
            let wash = images_dir.join(story::end_wash_filename(job.end_index));
            let badge = images_dir.join(story::end_badge_filename(job.end_index));
            (
                composer.render_end(Some(&wash), Some(&badge)),
                0,
            )
        }
    };

    tracing::debug!(out = %job.out_path.display(), "writing page");
    assets::save_png_with_dpi(&bitmap, &job.out_path, composer.config().dpi)?;
    Ok(missing)
}

fn build_thread_pool(threads: Option<usize>) -> FablepressResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FablepressError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        FablepressError::render(format!("failed to build rayon thread pool: {e}"))
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
