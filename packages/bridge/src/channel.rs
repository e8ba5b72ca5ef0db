//! In-process message channel between a host and one embedded editor.
//!
//! Both directions carry raw JSON envelopes so the embedded side sees the
//! same loosely-typed traffic it would get across a frame boundary.

use serde_json::Value;
use tokio::sync::mpsc;

pub const DEFAULT_CAPACITY: usize = 100;

/// Host side: sends requests, receives editor notifications
#[derive(Debug)]
pub struct HostEndpoint {
    pub outbound: mpsc::Sender<Value>,
    pub inbound: mpsc::Receiver<Value>,
}

/// Embedded side: receives host requests, sends notifications
#[derive(Debug)]
pub struct EmbeddedEndpoint {
    pub inbound: mpsc::Receiver<Value>,
    pub outbound: mpsc::Sender<Value>,
}

pub fn channel(capacity: usize) -> (HostEndpoint, EmbeddedEndpoint) {
    let (to_embedded, from_host) = mpsc::channel(capacity);
    let (to_host, from_embedded) = mpsc::channel(capacity);

    (
        HostEndpoint {
            outbound: to_embedded,
            inbound: from_embedded,
        },
        EmbeddedEndpoint {
            inbound: from_host,
            outbound: to_host,
        },
    )
}
