use crate::site::Site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_renderer::{render_document, RenderOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page path to render
    #[arg(default_value = "/")]
    pub page: String,

    /// Write the page to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Single-line output
    #[arg(long)]
    pub compact: bool,

    /// Outline zones the way the editor does
    #[arg(long)]
    pub editing: bool,
}

pub async fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let site = Site::open(cwd)?;
    let document = site.store.load(&args.page)?;

    for type_id in site.load_blocks(&document).await {
        eprintln!("  {} {} will render as a placeholder", "⚠️".yellow(), type_id);
    }

    let options = RenderOptions {
        pretty: !args.compact,
        editing: args.editing,
        ..RenderOptions::default()
    };
    let html = render_document(&document, &site.registry.snapshot(), options)?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            println!("  {} {} → {}", "✓".green(), args.page, path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
