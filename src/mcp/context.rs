//! Per-exchange transport context
//!
//! The HTTP transport opens one context per request; the stdio transport opens one for
//! the lifetime of the pipe. A context is released exactly once, when it is dropped,
//! which also covers a request future cancelled by a client disconnect.

use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
    time::Instant,
};

use serde_json::Value;
use tracing::debug;

use crate::mcp::server::handle_json_rpc_value;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Stdio,
    Http,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => f.write_str("stdio"),
            Self::Http => f.write_str("http"),
        }
    }
}

/// Process-wide tally of opened and released contexts.
#[derive(Debug, Default)]
pub struct ContextStats {
    opened: AtomicUsize,
    released: AtomicUsize,
}

impl ContextStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::Relaxed)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }

    pub fn live(&self) -> usize {
        self.opened().saturating_sub(self.released())
    }
}

pub struct TransportContext {
    state: AppState,
    kind: TransportKind,
    opened_at: Instant,
    messages: usize,
}

impl TransportContext {
    pub fn open(state: AppState, kind: TransportKind) -> Self {
        debug!(transport = %kind, "transport context opened");
        state.contexts.opened.fetch_add(1, Ordering::Relaxed);
        Self {
            state,
            kind,
            opened_at: Instant::now(),
            messages: 0,
        }
    }

    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    pub fn messages(&self) -> usize {
        self.messages
    }

    /// Runs one decoded JSON-RPC message to completion. `None` means nothing should be
    /// written back (the message was a notification).
    pub async fn dispatch(&mut self, payload: Value) -> Option<Value> {
        self.messages += 1;
        handle_json_rpc_value(&self.state, payload).await
    }
}

impl Drop for TransportContext {
    fn drop(&mut self) {
        self.state.contexts.released.fetch_add(1, Ordering::Relaxed);
        debug!(
            transport = %self.kind,
            messages = self.messages,
            duration_ms = self.opened_at.elapsed().as_millis(),
            "transport context released"
        );
    }
}
