//! Operator-facing diagnostics.
//!
//! Failures inside the bridge never reach the host; they are logged and,
//! when a sender is configured, reported here.

use pagewright_loader::FailureKind;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// An `ADD_COMPONENT` request was dropped
    InsertSkipped {
        component_type: String,
        kind: FailureKind,
        reason: String,
    },
    /// The block was ready but the document refused it
    InsertRejected {
        component_type: String,
        reason: String,
    },
    /// An inbound envelope was not a host message
    IgnoredMessage { reason: String },
    /// Supplied `defaultProps` were unusable as given
    PropsFallback {
        component_type: String,
        reason: String,
    },
    /// The host side of the channel went away
    ChannelClosed,
}

pub type DiagnosticSender = mpsc::UnboundedSender<Diagnostic>;
