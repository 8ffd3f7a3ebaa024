//! Sorts the photo cards of the static gallery page.
//!
//! The gallery is a hand-authored HTML file; its cards sit inside the
//! `<div class="grid">` between `PHOTO CARD START`/`END` comment markers.
//! This tool reorders those blocks by title or by date and leaves every
//! other byte of the document untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use catalog::{classify_title, CatalogCounts};
use clap::Parser;
use env_logger::Env;

mod cards;
mod dates;

use cards::{Order, SortBy};

#[derive(Parser)]
#[command(name = "gallery-sort")]
#[command(about = "Sort the static gallery's photo cards", long_about = None)]
#[command(version)]
struct Cli {
    /// HTML file containing the gallery grid
    #[arg(long, default_value = "index.html", value_hint = clap::ValueHint::FilePath)]
    input: PathBuf,

    /// Output file (defaults to rewriting the input, with a .bak backup)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Sort key
    #[arg(long, default_value = "name")]
    by: SortBy,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    order: Order,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default level overridden by RUST_LOG
    let env = Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let html = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let Some(grid) = cards::find_grid(&html) else {
        bail!("no gallery grid found in {}", cli.input.display());
    };
    let mut blocks = cards::extract_cards(grid);
    if blocks.is_empty() {
        bail!("no photo cards found between the card markers");
    }
    log_summary(&blocks);

    cards::sort_cards(&mut blocks, cli.by, cli.order);
    let sorted = cards::replace_grid(&html, &blocks);

    let out_path = cli.output.as_deref().unwrap_or(&cli.input);
    write_sorted(&cli.input, out_path, &html, &sorted)?;

    log::info!("wrote sorted gallery to {}", out_path.display());
    Ok(())
}

/// Write the sorted document. Whenever the output resolves to the input file
/// itself (no `--output`, or `--output` naming the same path), the original
/// content is kept next to it as `<input>.bak` first.
fn write_sorted(input: &Path, out_path: &Path, original: &str, sorted: &str) -> Result<()> {
    if out_path == input {
        let backup: PathBuf = {
            let mut name = input.to_path_buf().into_os_string();
            name.push(".bak");
            name.into()
        };
        fs::write(&backup, original)
            .with_context(|| format!("writing backup {}", backup.display()))?;
    }
    fs::write(out_path, sorted).with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

fn log_summary(blocks: &[cards::Card]) {
    let counts =
        CatalogCounts::from_catalogs(blocks.iter().map(|card| classify_title(&card.title)));
    log::info!(
        "{} cards ({} Messier, {} NGC, {} other)",
        counts.all,
        counts.messier,
        counts.ngc,
        counts.other
    );
}
