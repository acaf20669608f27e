//! Show how titles normalize and which image file they resolve to.
//! Usage: probe-title --images-dir media/movie/images "Amélie" "The Lord of the Rings"

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use poster_link::library::ImageIndex;
use poster_link::matcher::Matcher;
use poster_link::models::{MatchConfig, MatchTier};
use poster_link::normalize::to_filename_core;
use poster_link::scoring::DEFAULT_CUTOFF;
use poster_link::variants::variants_for_core;

#[derive(Parser)]
#[command(name = "probe-title")]
#[command(about = "Print filename core, variants and matched image for titles")]
struct Args {
    /// Titles to probe
    #[arg(required = true)]
    titles: Vec<String>,

    /// Folder to match against (variants only when omitted)
    #[arg(long)]
    images_dir: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_CUTOFF)]
    cutoff: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let index = match &args.images_dir {
        Some(dir) if !dir.is_dir() => bail!("Images folder '{}' not found.", dir.display()),
        Some(dir) => Some(ImageIndex::scan(dir)?),
        None => None,
    };
    if let Some(index) = &index {
        println!("Indexed {} image files", index.len());
    }

    let config = MatchConfig {
        fuzzy_cutoff: args.cutoff,
        ..MatchConfig::default()
    };

    for title in &args.titles {
        let core = to_filename_core(title);
        let variants = variants_for_core(&core);

        println!("\n{:-<60}", "");
        println!("Title:    {}", title);
        println!("Core:     {}", core);
        println!("Variants: {}", variants.join(", "));

        let Some(index) = &index else {
            continue;
        };
        let matcher = Matcher::with_config(index, config.clone());
        match matcher.find_with_variants(&variants) {
            Some(found) => match found.tier {
                MatchTier::Exact { variant, prefixed } => println!(
                    "Match:    {} (exact, variant '{}'{})",
                    found.file_name,
                    variant,
                    if prefixed { ", marker prefix" } else { "" }
                ),
                MatchTier::Fuzzy { reference, score } => println!(
                    "Match:    {} (fuzzy, '{}' scored {:.3})",
                    found.file_name, reference, score
                ),
            },
            None => println!("Match:    none"),
        }
    }

    Ok(())
}
