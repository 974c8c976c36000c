use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use fablepress::{
    BookConfig, FontCatalog, PageComposer, RenderThreading, StoryDocument, render_book,
};

#[derive(Parser, Debug)]
#[command(name = "fablepress", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render all book pages from a story JSON and an images directory.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input story JSON (array of pages).
    #[arg(long)]
    story: PathBuf,

    /// Directory holding the generated illustration assets.
    #[arg(long, default_value = "images")]
    images: PathBuf,

    /// Output directory for the finished pages.
    #[arg(long, default_value = "pages")]
    out: PathBuf,

    /// Directory holding the book fonts.
    #[arg(long, default_value = "fonts")]
    fonts: PathBuf,

    /// Book title; inferred from the first page when omitted.
    #[arg(long)]
    title: Option<String>,

    /// Optional render configuration JSON; defaults are 6.25x9.25" at 300 DPI.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render pages in parallel.
    #[arg(long)]
    parallel: bool,

    /// Override worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            serde_json::from_str::<BookConfig>(&json)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => BookConfig::default(),
    };

    let doc = StoryDocument::from_path(&args.story, args.title.as_deref())?;
    let fonts = FontCatalog::load(&args.fonts)?;
    let composer = PageComposer::new(config, fonts)?;

    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let stats = render_book(&doc, &composer, &args.images, &args.out, &threading)?;

    eprintln!(
        "rendered {}/{} pages to {} ({} asset(s) missing)",
        stats.pages_rendered,
        stats.pages_total,
        args.out.display(),
        stats.assets_missing,
    );
    Ok(())
}
