//! 一次性完成信号
//!
//! A producer/consumer handoff that lets a caller suspend until a surface
//! closes. The `Completer` half may be cloned and fired from any number of
//! close paths; only the first `complete` takes effect.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Returned when every `Completer` was dropped before resolving the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalAbandoned;

impl std::fmt::Display for SignalAbandoned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "completion signal dropped before it was resolved")
    }
}

impl std::error::Error for SignalAbandoned {}

pub struct Completer<T> {
    slot: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

pub struct CompletionSignal<T> {
    rx: oneshot::Receiver<T>,
}

pub fn completion_signal<T>() -> (Completer<T>, CompletionSignal<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Completer {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        CompletionSignal { rx },
    )
}

impl<T> Completer<T> {
    /// Resolves the signal. Returns `false` (and drops `value`) if it was
    /// already resolved.
    pub fn complete(&self, value: T) -> bool {
        let tx = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match tx {
            Some(tx) => {
                // The waiter may already be gone; the signal still counts as resolved.
                let _ = tx.send(value);
                true
            }
            None => {
                tracing::trace!("completion signal already resolved, ignoring");
                false
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl<T> CompletionSignal<T> {
    /// Non-blocking probe; `None` while pending.
    pub fn try_take(&mut self) -> Option<Result<T, SignalAbandoned>> {
        match self.rx.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(SignalAbandoned)),
        }
    }
}

impl<T> Future for CompletionSignal<T> {
    type Output = Result<T, SignalAbandoned>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|res| res.map_err(|_| SignalAbandoned))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/signal.rs"]
mod tests;
