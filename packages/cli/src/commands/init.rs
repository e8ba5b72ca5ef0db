use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::store::PageStore;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_document::Document;
use pagewright_loader::module_path;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Template modules directory
    #[arg(short, long, default_value = "modules")]
    pub modules_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagewright site...".bright_blue().bold());

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        modules_dir: args.modules_dir.clone(),
        library_manifest: None,
    };

    let store = PageStore::new(config.get_pages_dir(cwd));
    if !store.exists("/") {
        let file = store.save("/", &Document::with_title("Home"))?;
        println!("  {} Created {}", "✓".green(), file.display());
    }

    let modules_dir = config.get_modules_dir(cwd);
    if !modules_dir.exists() {
        fs::create_dir_all(&modules_dir)?;
        println!("  {} Created {}/", "✓".green(), args.modules_dir);
    }

    // starter module for the built-in HeroBlock
    let hero = module_path(&modules_dir, "hero");
    if !hero.exists() {
        let module = json!({
            "template": "<section class=\"hero\"><h1>{{ title }}</h1><p>{{ subtitle }}</p><a href=\"{{ ctaHref }}\">{{ ctaText }}</a></section>"
        });
        fs::write(&hero, serde_json::to_string_pretty(&module)?)?;
        println!("  {} Created {}", "✓".green(), hero.display());
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagewright palette");
    println!("  2. Run: pagewright edit / < requests.jsonl");
    println!("  3. Run: pagewright render /");

    Ok(())
}
