mod commands;
mod config;
mod site;
mod store;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, palette, render, EditArgs, InitArgs, PaletteArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Pagewright CLI - block-based page building
#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagewright site
    Init(InitArgs),

    /// List the blocks available for insertion
    Palette(PaletteArgs),

    /// Render a page to static HTML
    Render(RenderArgs),

    /// Run the embedded editor over stdin/stdout
    Edit(EditArgs),
}

#[tokio::main]
async fn main() {
    // stdout carries editor messages in edit mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match std::env::current_dir() {
        Ok(dir) => {
            let cwd = dir.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Palette(args) => palette(args, &cwd).await,
                Command::Render(args) => render(args, &cwd).await,
                Command::Edit(args) => edit(args, &cwd).await,
            }
        }
        Err(err) => Err(anyhow::anyhow!("Cannot get current directory: {}", err)),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
