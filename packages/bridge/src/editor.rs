//! # Embedded Editor
//!
//! A single tokio task owns the page document and processes, in arrival
//! order:
//!
//! - host envelopes (`ADD_COMPONENT`, everything else is noise)
//! - editing-surface events (local edits, publish)
//! - completions of component loads it started
//!
//! ```text
//! Uninitialized ──mount / READY──▶ Ready ──teardown──▶ TornDown
//! ```
//!
//! Loads run in their own tasks so a slow module never holds up the queue.
//! After teardown the completion receiver is gone: a load that finishes
//! late may still upgrade the shared registry, but it cannot touch the
//! document.

use crate::channel::EmbeddedEndpoint;
use crate::diagnostics::{Diagnostic, DiagnosticSender};
use crate::protocol::{EmbeddedMessage, HostMessage};
use crate::BridgeError;
use pagewright_document::{BlockInstance, Document, Mutation};
use pagewright_loader::{DynamicLoader, LoadError, LoadStatus};
use pagewright_schema::{DefaultPropsTable, PropertyMap, RegistryHandle};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

pub type ChangeCallback = Arc<dyn Fn(&Document) + Send + Sync>;

/// Configuration for one embedded editor
#[derive(Clone)]
pub struct BridgeOptions {
    pub page_path: String,
    pub on_change: Option<ChangeCallback>,
    pub diagnostics: Option<DiagnosticSender>,
    pub defaults: DefaultPropsTable,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            page_path: "/".to_string(),
            on_change: None,
            diagnostics: None,
            defaults: DefaultPropsTable::standard(),
        }
    }
}

impl BridgeOptions {
    pub fn new(page_path: &str) -> Self {
        Self {
            page_path: page_path.to_string(),
            ..Self::default()
        }
    }

    pub fn on_change(mut self, callback: impl Fn(&Document) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn diagnostics(mut self, sender: DiagnosticSender) -> Self {
        self.diagnostics = Some(sender);
        self
    }

    pub fn defaults(mut self, defaults: DefaultPropsTable) -> Self {
        self.defaults = defaults;
        self
    }
}

impl std::fmt::Debug for BridgeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeOptions")
            .field("page_path", &self.page_path)
            .field("on_change", &self.on_change.is_some())
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Uninitialized,
    Ready,
    TornDown,
}

/// Events from the editing surface running inside the embedded context
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The user edited the page; the document supersedes the tracked copy
    Changed(Document),
    /// The user asked to publish this document
    Published(Document),
}

#[derive(Debug, Clone)]
struct AddRequest {
    component_type: String,
    component_label: String,
    default_props: Option<Value>,
}

struct Completion {
    request: AddRequest,
    result: Result<LoadStatus, LoadError>,
}

pub struct EditorBridge {
    state: BridgeState,
    document: Document,
    registry: RegistryHandle,
    loader: DynamicLoader,
    options: BridgeOptions,
}

impl EditorBridge {
    pub fn new(
        document: Document,
        registry: RegistryHandle,
        loader: DynamicLoader,
        options: BridgeOptions,
    ) -> Self {
        Self {
            state: BridgeState::Uninitialized,
            document: document.ensure_zones(),
            registry,
            loader,
            options,
        }
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Start the editor task on the current runtime
    pub fn spawn(self, endpoint: EmbeddedEndpoint) -> BridgeHandle {
        let (surface_tx, surface_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let registry = self.registry.clone();

        let task = tokio::spawn(self.run(endpoint, surface_rx, shutdown_rx));

        BridgeHandle {
            surface: surface_tx,
            shutdown: Some(shutdown_tx),
            task,
            registry,
        }
    }

    async fn run(
        mut self,
        endpoint: EmbeddedEndpoint,
        mut surface: mpsc::Receiver<SurfaceEvent>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Document {
        let EmbeddedEndpoint {
            mut inbound,
            outbound,
        } = endpoint;
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

        self.mount(&outbound).await;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,

                Some(completion) = done_rx.recv() => {
                    self.on_completion(completion, &outbound).await;
                }

                Some(event) = surface.recv() => {
                    self.on_surface(event, &outbound).await;
                }

                envelope = inbound.recv() => match envelope {
                    Some(envelope) => self.on_envelope(envelope, &outbound, &done_tx).await,
                    None => {
                        self.report(Diagnostic::ChannelClosed);
                        break;
                    }
                },
            }
        }

        self.state = BridgeState::TornDown;
        drop(done_rx);
        tracing::debug!(page_path = %self.options.page_path, "editor torn down");
        self.document
    }

    async fn mount(&mut self, outbound: &mpsc::Sender<Value>) {
        let library = self.loader.library();
        let ready = EmbeddedMessage::Ready {
            categories: library.categories.clone(),
            components: library.components.clone(),
        };
        self.send(outbound, ready).await;
        self.state = BridgeState::Ready;
        tracing::debug!(page_path = %self.options.page_path, "editor ready");
    }

    async fn on_envelope(
        &mut self,
        envelope: Value,
        outbound: &mpsc::Sender<Value>,
        done: &mpsc::UnboundedSender<Completion>,
    ) {
        let message = match HostMessage::parse(&envelope) {
            Ok(message) => message,
            Err(rejection) => {
                tracing::debug!(%rejection, "ignoring envelope");
                self.report(Diagnostic::IgnoredMessage {
                    reason: rejection.to_string(),
                });
                return;
            }
        };

        match message {
            HostMessage::AddComponent {
                component_type,
                component_label,
                default_props,
            } => {
                let request = AddRequest {
                    component_type,
                    component_label,
                    default_props,
                };

                // keep arrival order when nothing needs fetching
                if self.registry.snapshot().is_renderable(&request.component_type) {
                    self.add_block(request, outbound).await;
                    return;
                }

                let loader = self.loader.clone();
                let registry = self.registry.clone();
                let done = done.clone();
                tokio::spawn(async move {
                    let result = loader
                        .try_ensure_loaded(&registry, &request.component_type)
                        .await;
                    // receiver is gone after teardown
                    let _ = done.send(Completion { request, result });
                });
            }
        }
    }

    async fn on_completion(&mut self, completion: Completion, outbound: &mpsc::Sender<Value>) {
        if self.state != BridgeState::Ready {
            return;
        }

        match completion.result {
            Ok(_) => self.add_block(completion.request, outbound).await,
            Err(err) => {
                tracing::warn!(
                    component_type = %completion.request.component_type,
                    %err,
                    "dropping insertion"
                );
                self.report(Diagnostic::InsertSkipped {
                    component_type: completion.request.component_type,
                    kind: err.kind(),
                    reason: err.to_string(),
                });
            }
        }
    }

    async fn on_surface(&mut self, event: SurfaceEvent, outbound: &mpsc::Sender<Value>) {
        match event {
            SurfaceEvent::Changed(next) => {
                if next != self.document {
                    self.document = self.document.replace_document(next);
                    self.notify_changed(outbound).await;
                }
            }
            SurfaceEvent::Published(next) => {
                if next != self.document {
                    self.document = self.document.replace_document(next);
                    self.notify_changed(outbound).await;
                }
                let publish = EmbeddedMessage::Publish {
                    data: self.document.clone(),
                    page_path: self.options.page_path.clone(),
                };
                self.send(outbound, publish).await;
            }
        }
    }

    async fn add_block(&mut self, request: AddRequest, outbound: &mpsc::Sender<Value>) {
        let props = self.resolve_props(&request.component_type, request.default_props);
        let block = BlockInstance::new(request.component_type.clone(), props);

        if !self.append(block) {
            return;
        }

        let label = if request.component_label.is_empty() {
            self.registry
                .snapshot()
                .get_schema(&request.component_type)
                .map(|s| s.label.clone())
                .unwrap_or_else(|| request.component_type.clone())
        } else {
            request.component_label
        };
        tracing::debug!(component_type = %request.component_type, "block added");

        let added = EmbeddedMessage::ComponentAdded {
            component_type: request.component_type,
            component_label: label,
            page_path: self.options.page_path.clone(),
        };
        self.send(outbound, added).await;
        self.notify_changed(outbound).await;
    }

    /// Append to the tracked document. Returns false, reporting why, when
    /// the document refuses the block.
    fn append(&mut self, block: BlockInstance) -> bool {
        let component_type = block.block_type.clone();
        match (Mutation::AppendBlock { block }).apply(&self.document) {
            Ok(next) => {
                self.document = next.ensure_zones();
                true
            }
            Err(err) => {
                tracing::warn!(%component_type, %err, "insertion rejected");
                self.report(Diagnostic::InsertRejected {
                    component_type,
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    fn resolve_props(&self, component_type: &str, supplied: Option<Value>) -> PropertyMap {
        let document = &self.document;
        let resolved = self
            .options
            .defaults
            .resolve_insert_props(component_type, supplied, |id| document.contains_id(id));

        if let Some(adjustment) = resolved.adjustment {
            tracing::debug!(component_type, %adjustment, "adjusted supplied props");
            self.report(Diagnostic::PropsFallback {
                component_type: component_type.to_string(),
                reason: adjustment.to_string(),
            });
        }
        resolved.props
    }

    async fn notify_changed(&self, outbound: &mpsc::Sender<Value>) {
        if let Some(callback) = &self.options.on_change {
            callback(&self.document);
        }
        let changed = EmbeddedMessage::DataChanged {
            data: self.document.clone(),
            page_path: self.options.page_path.clone(),
        };
        self.send(outbound, changed).await;
    }

    async fn send(&self, outbound: &mpsc::Sender<Value>, message: EmbeddedMessage) {
        let kind = message.kind();
        let envelope = match serde_json::to_value(message) {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::error!(kind, %err, "failed to encode message");
                return;
            }
        };
        if outbound.send(envelope).await.is_err() {
            tracing::debug!(kind, "host is gone, message dropped");
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        if let Some(sender) = &self.options.diagnostics {
            let _ = sender.send(diagnostic);
        }
    }
}

/// Control handle for a running editor
pub struct BridgeHandle {
    surface: mpsc::Sender<SurfaceEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Document>,
    registry: RegistryHandle,
}

impl BridgeHandle {
    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// Report a local edit from the editing surface
    pub async fn edit(&self, document: Document) -> Result<(), BridgeError> {
        self.surface
            .send(SurfaceEvent::Changed(document))
            .await
            .map_err(|_| BridgeError::Closed)
    }

    pub async fn publish(&self, document: Document) -> Result<(), BridgeError> {
        self.surface
            .send(SurfaceEvent::Published(document))
            .await
            .map_err(|_| BridgeError::Closed)
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the editor and return its final document
    pub async fn teardown(mut self) -> Result<Document, BridgeError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task.await.map_err(|e| BridgeError::Join(e.to_string()))
    }
}

impl std::fmt::Debug for BridgeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeHandle")
            .field("running", &self.is_running())
            .finish()
    }
}
