//! # Pagewright Bridge
//!
//! Message bridge between a host page and an editor embedded in it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  ADD_COMPONENT   ┌──────────────────────────────┐
//! │ host         │ ───────────────▶ │ EditorBridge (tokio task)    │
//! │ (palette UI) │                  │  - owns the page Document    │
//! │              │ ◀─────────────── │  - loads blocks on demand    │
//! └──────────────┘  READY           │  - appends + notifies        │
//!                   COMPONENT_ADDED └──────────────────────────────┘
//!                   DATA_CHANGED                  │
//!                   PUBLISH                       ▼
//!                                        RegistryHandle (shared)
//! ```
//!
//! The host never sees a failure: a request that cannot be honoured is
//! dropped and reported through [`Diagnostic`]s and the log.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let bridge = EditorBridge::new(document, registry, loader, BridgeOptions::new("/"));
//! let mut host = HostConnection::spawn(bridge);
//!
//! host.add_component("HeadingBlock", "Heading", None).await?;
//! while let Some(message) = host.next_message().await {
//!     println!("{}", message.kind());
//! }
//! ```

mod channel;
mod diagnostics;
mod editor;
mod error;
mod host;
mod protocol;

pub use channel::{channel, EmbeddedEndpoint, HostEndpoint, DEFAULT_CAPACITY};
pub use diagnostics::{Diagnostic, DiagnosticSender};
pub use editor::{BridgeHandle, BridgeOptions, BridgeState, ChangeCallback, EditorBridge, SurfaceEvent};
pub use error::BridgeError;
pub use host::{HostConnection, HostSender};
pub use protocol::{EmbeddedMessage, HostMessage, Rejection};
