//! `pagewright edit`: run an embedded editor with stdin/stdout as the host
//! channel.
//!
//! Each stdin line is one JSON envelope from the host; each stdout line is
//! one envelope from the editor. Logs go to stderr.

use crate::site::Site;
use anyhow::Result;
use clap::Args;
use pagewright_bridge::{BridgeOptions, EditorBridge, EmbeddedMessage, HostConnection};
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Page path to edit
    #[arg(default_value = "/")]
    pub page: String,

    /// Save the page on every change, not only on publish and exit
    #[arg(long)]
    pub autosave: bool,

    /// Milliseconds to wait for in-flight loads after stdin closes
    #[arg(long, default_value_t = 500)]
    pub grace_ms: u64,
}

pub async fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let site = Site::open(cwd)?;
    let document = site.store.load(&args.page)?;

    let bridge = EditorBridge::new(
        document,
        site.registry.clone(),
        site.loader.clone(),
        BridgeOptions::new(&args.page),
    );
    let (messages, handle, sender) = HostConnection::spawn(bridge).into_parts();

    let grace = Duration::from_millis(args.grace_ms);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => match serde_json::from_str::<Value>(&line) {
                    Ok(envelope) => {
                        if sender.send_raw(envelope).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => tracing::warn!(%err, "skipping line that is not JSON"),
                },
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(%err, "failed to read stdin");
                    break;
                }
            }
        }
        tokio::time::sleep(grace).await;
        // dropping the sender closes the channel and stops the editor
    });

    tokio::pin!(messages);
    while let Some(message) = messages.next().await {
        println!("{}", serde_json::to_string(&message)?);

        match &message {
            EmbeddedMessage::Publish { data, page_path } => {
                let file = site.store.save(page_path, data)?;
                tracing::info!(page_path, file = %file.display(), "page published");
            }
            EmbeddedMessage::DataChanged { data, page_path } if args.autosave => {
                site.store.save(page_path, data)?;
            }
            _ => {}
        }
    }

    let document = handle.teardown().await?;
    reader.abort();

    let file = site.store.save(&args.page, &document)?;
    tracing::info!(page_path = %args.page, file = %file.display(), blocks = document.len(), "page saved");

    Ok(())
}
