//! Host-side helper for driving an embedded editor in-process.

use crate::channel::{self, HostEndpoint, DEFAULT_CAPACITY};
use crate::editor::{BridgeHandle, EditorBridge};
use crate::protocol::{EmbeddedMessage, HostMessage};
use crate::BridgeError;
use pagewright_document::Document;
use serde_json::Value;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

pub struct HostConnection {
    endpoint: HostEndpoint,
    handle: BridgeHandle,
}

impl HostConnection {
    /// Connect to a fresh editor over an in-process channel
    pub fn spawn(bridge: EditorBridge) -> Self {
        let (host, embedded) = channel::channel(DEFAULT_CAPACITY);
        let handle = bridge.spawn(embedded);
        Self {
            endpoint: host,
            handle,
        }
    }

    pub fn handle(&self) -> &BridgeHandle {
        &self.handle
    }

    pub async fn send(&self, message: &HostMessage) -> Result<(), BridgeError> {
        let envelope = serde_json::to_value(message)?;
        self.send_raw(envelope).await
    }

    /// Post an arbitrary envelope, as unrelated senders on a shared channel would
    pub async fn send_raw(&self, envelope: Value) -> Result<(), BridgeError> {
        self.endpoint
            .outbound
            .send(envelope)
            .await
            .map_err(|_| BridgeError::Closed)
    }

    pub async fn add_component(
        &self,
        component_type: &str,
        component_label: &str,
        default_props: Option<Value>,
    ) -> Result<(), BridgeError> {
        self.send(&HostMessage::AddComponent {
            component_type: component_type.to_string(),
            component_label: component_label.to_string(),
            default_props,
        })
        .await
    }

    /// Next recognised editor message; `None` once the editor is gone
    pub async fn next_message(&mut self) -> Option<EmbeddedMessage> {
        while let Some(envelope) = self.endpoint.inbound.recv().await {
            match EmbeddedMessage::parse(&envelope) {
                Some(message) => return Some(message),
                None => tracing::debug!(%envelope, "skipping unrecognised envelope"),
            }
        }
        None
    }

    /// Split into a stream of editor messages and the editor handle
    pub fn into_parts(self) -> (impl Stream<Item = EmbeddedMessage>, BridgeHandle, HostSender) {
        let HostEndpoint { outbound, inbound } = self.endpoint;
        let messages =
            ReceiverStream::new(inbound).filter_map(|envelope| EmbeddedMessage::parse(&envelope));
        (messages, self.handle, HostSender { outbound })
    }

    /// Stop the editor and return its final document
    pub async fn close(self) -> Result<Document, BridgeError> {
        self.handle.teardown().await
    }
}

/// Sending half left over after [`HostConnection::into_parts`]
#[derive(Debug, Clone)]
pub struct HostSender {
    outbound: tokio::sync::mpsc::Sender<Value>,
}

impl HostSender {
    pub async fn send(&self, message: &HostMessage) -> Result<(), BridgeError> {
        let envelope = serde_json::to_value(message)?;
        self.send_raw(envelope).await
    }

    pub async fn send_raw(&self, envelope: Value) -> Result<(), BridgeError> {
        self.outbound
            .send(envelope)
            .await
            .map_err(|_| BridgeError::Closed)
    }
}
