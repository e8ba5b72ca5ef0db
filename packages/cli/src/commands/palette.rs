use crate::site::Site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_bridge::EmbeddedMessage;

#[derive(Debug, Args)]
pub struct PaletteArgs {
    /// Load every library block before listing
    #[arg(short, long)]
    pub load: bool,

    /// Print the READY payload sent to hosts instead of a listing
    #[arg(long)]
    pub json: bool,
}

pub async fn palette(args: PaletteArgs, cwd: &str) -> Result<()> {
    let site = Site::open(cwd)?;
    let library = site.loader.library();

    if args.json {
        let ready = EmbeddedMessage::Ready {
            categories: library.categories.clone(),
            components: library.components.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&ready)?);
        return Ok(());
    }

    if args.load {
        for type_id in library.components.keys() {
            site.loader.ensure_loaded(&site.registry, type_id).await;
        }
    }

    let snapshot = site.registry.snapshot();

    println!("{}", "🧱 Palette".bright_blue().bold());
    for category in snapshot.list_categories() {
        println!();
        println!("{} {}", category.title.bold(), format!("({})", category.id).dimmed());
        for type_id in &category.components {
            let label = snapshot
                .get_schema(type_id)
                .map(|s| s.label.as_str())
                .unwrap_or(type_id.as_str());
            println!("  {} {} {}", "✓".green(), label, type_id.dimmed());
        }
    }

    let pending: Vec<_> = library
        .components
        .keys()
        .filter(|id| !snapshot.is_renderable(id))
        .collect();
    if !pending.is_empty() {
        println!();
        println!("{}", "Library (not loaded)".bold());
        for type_id in pending {
            let label = library.get(type_id).map(|c| c.label.as_str()).unwrap_or("");
            println!("  {} {} {}", "○".yellow(), label, type_id.dimmed());
        }
    }

    Ok(())
}
