//! Real window adapter for desktop lifetimes.

use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{completion_signal, Completer, CompletionSignal, EventSource, SignalAbandoned};
use crate::kernel::services::ports::{DesktopPlatform, NativeWindow, NativeWindowId};

/// The window that should own a new modal surface: the focused top-level
/// window if there is one, otherwise the main window.
pub fn top_window(platform: &dyn DesktopPlatform) -> Option<Arc<dyn NativeWindow>> {
    platform
        .windows()
        .into_iter()
        .find(|w| w.is_active())
        .or_else(|| platform.main_window())
}

#[derive(Clone)]
pub struct RealWindowAdapter {
    window: Arc<dyn NativeWindow>,
    /// Completer handed to the environment by the last show call.
    closed: Arc<Mutex<Option<Completer<()>>>>,
}

impl RealWindowAdapter {
    pub fn new(window: Arc<dyn NativeWindow>) -> Self {
        Self {
            window,
            closed: Arc::new(Mutex::new(None)),
        }
    }

    pub fn window(&self) -> &Arc<dyn NativeWindow> {
        &self.window
    }

    fn track(&self) -> (Completer<()>, CompletionSignal<()>) {
        let (completer, closed) = completion_signal();
        *self.closed.lock().unwrap_or_else(PoisonError::into_inner) = Some(completer.clone());
        (completer, closed)
    }

    /// True once the environment has reported the window closed.
    pub fn is_closed(&self) -> bool {
        reported_closed(&self.closed)
    }

    /// Shows the window; the signal resolves when the environment closes it.
    pub fn show_non_modal(&self) -> CompletionSignal<()> {
        let (completer, closed) = self.track();
        tracing::debug!(window = ?self.window.id(), title = %self.window.title(), "showing native window");
        self.window.show(completer);
        closed
    }

    /// Shows the window attached to `owner`. Input blocking of the owner is
    /// left to the environment.
    pub fn show_modal(&self, owner: Option<NativeWindowId>) -> CompletionSignal<()> {
        let (completer, closed) = self.track();
        tracing::debug!(
            window = ?self.window.id(),
            owner = ?owner,
            title = %self.window.title(),
            "showing native modal window"
        );
        self.window.show_modal(owner, completer);
        closed
    }

    pub fn close(&self) {
        self.window.close();
    }

    /// Waits for `closed`, closing the window on the content's first close
    /// request and returning the value it carried. A window closed by other
    /// means yields `dismissed`, and requests arriving after that are
    /// ignored. If this future is dropped early the window is closed.
    pub async fn await_result<T>(
        &self,
        closed: CompletionSignal<()>,
        requests: Option<&EventSource<T>>,
        dismissed: T,
    ) -> Result<T, SignalAbandoned>
    where
        T: Clone + Send + 'static,
    {
        let slot: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
        let subscription = requests.map(|events| {
            let slot = Arc::clone(&slot);
            let window = Arc::downgrade(&self.window);
            let tracked = Arc::clone(&self.closed);
            events.subscribe(move |value| {
                if reported_closed(&tracked) {
                    return;
                }
                {
                    let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
                    if slot.is_some() {
                        return;
                    }
                    *slot = Some(value);
                }
                if let Some(window) = window.upgrade() {
                    window.close();
                }
            })
        });

        let mut guard = CloseOnDrop {
            adapter: Some(self.clone()),
        };
        let outcome = closed.await;
        guard.disarm();
        drop(subscription);

        outcome?;
        let value = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        Ok(value.unwrap_or(dismissed))
    }
}

fn reported_closed(tracked: &Mutex<Option<Completer<()>>>) -> bool {
    tracked
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|c| c.is_completed())
}

struct CloseOnDrop {
    adapter: Option<RealWindowAdapter>,
}

impl CloseOnDrop {
    fn disarm(&mut self) {
        self.adapter = None;
    }
}

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        if let Some(adapter) = self.adapter.take() {
            tracing::warn!(window = ?adapter.window().id(), "native window abandoned by its caller");
            adapter.close();
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/native.rs"]
mod tests;
