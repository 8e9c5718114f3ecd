use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{EventSource, Result, WindowError};
use crate::kernel::content::{
    Dialog, InputBox, MessageBox, MessageBoxButtons, MessageBoxIcon, MessageBoxResult,
    SurfaceContent, SurfaceMode, SurfaceRequest,
};
use crate::kernel::services::ports::{
    BoxFuture, EnvironmentKind, FilePickerOpenOptions, FilePickerSaveOptions, ShellSettings,
};
use crate::kernel::surface::{CloseReason, SurfaceHost, VirtualWindow, WindowGuard};

use super::SurfaceStrategy;

/// Shows surfaces as virtual windows stacked in a `SurfaceHost`.
pub struct VirtualSurfaceStrategy {
    host: SurfaceHost,
    settings: ShellSettings,
}

impl VirtualSurfaceStrategy {
    pub fn new(host: SurfaceHost, settings: ShellSettings) -> Self {
        Self { host, settings }
    }

    pub fn host(&self) -> &SurfaceHost {
        &self.host
    }

    fn shields(&self, mode: SurfaceMode) -> bool {
        mode.is_modal() || self.settings.blocker_for_managed_windows
    }

    async fn present<T>(
        &self,
        operation: &'static str,
        request: SurfaceRequest,
        requests: Option<&EventSource<T>>,
        dismissed: T,
    ) -> Result<T>
    where
        T: Clone + Send + 'static,
    {
        let window = Arc::new(
            VirtualWindow::from_request(&request).centered(self.settings.center_windows),
        );
        let shield = self.shields(request.mode());
        self.await_window(operation, window, shield, requests, dismissed)
            .await
    }

    /// Shows `window`, routes the content's first close request to the
    /// window's close command, and waits for the window to close. The
    /// subscription and the window are released on every exit path.
    async fn await_window<T>(
        &self,
        operation: &'static str,
        window: Arc<VirtualWindow>,
        shield: bool,
        requests: Option<&EventSource<T>>,
        dismissed: T,
    ) -> Result<T>
    where
        T: Clone + Send + 'static,
    {
        let shown = self
            .host
            .show(Arc::clone(&window), shield)
            .ok_or(WindowError::AlreadyShown { operation })?;
        let guard = WindowGuard::new(Arc::clone(&window));

        let slot: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
        let subscription = requests.map(|events| {
            let slot = Arc::clone(&slot);
            let window = Arc::downgrade(&window);
            events.subscribe(move |value| {
                let Some(window) = window.upgrade() else {
                    return;
                };
                if window.is_closed() {
                    return;
                }
                *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
                window.close(CloseReason::ContentRequested);
            })
        });

        let outcome = shown.closed.await;
        drop(subscription);
        drop(guard);

        let reason = outcome.map_err(|_| WindowError::Abandoned { operation })?;
        let value = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        tracing::debug!(
            operation,
            reason = ?reason,
            has_result = value.is_some(),
            remaining = self.host.len(),
            "virtual surface finished"
        );
        Ok(value.unwrap_or(dismissed))
    }
}

impl SurfaceStrategy for VirtualSurfaceStrategy {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::SingleView
    }

    fn show_window<'a>(
        &'a self,
        dialog: Arc<dyn Dialog>,
        title: Option<String>,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let title = title.unwrap_or_else(|| dialog.title());
            let request = SurfaceRequest::new(
                SurfaceContent::Dialog(Arc::clone(&dialog)),
                title,
                SurfaceMode::Modeless,
            );
            self.present("show_window", request, Some(dialog.close_requested()), false)
                .await
                .map(|_| ())
        })
    }

    fn show_managed_window<'a>(
        &'a self,
        window: Arc<VirtualWindow>,
        mode: SurfaceMode,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let shield = self.shields(mode);
            self.await_window::<()>("show_managed_window", window, shield, None, ())
                .await
        })
    }

    fn show_dialog<'a>(&'a self, dialog: Arc<dyn Dialog>) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move {
            let request = SurfaceRequest::new(
                SurfaceContent::Dialog(Arc::clone(&dialog)),
                dialog.title(),
                SurfaceMode::Modal,
            );
            self.present("show_dialog", request, Some(dialog.close_requested()), false)
                .await
        })
    }

    fn input_box<'a>(
        &'a self,
        prompt: String,
        caption: String,
        default_text: String,
    ) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async move {
            let input = Arc::new(InputBox::new(prompt, default_text));
            let request = SurfaceRequest::new(
                SurfaceContent::InputBox(Arc::clone(&input)),
                caption,
                SurfaceMode::Modal,
            )
            .with_can_close(false);
            self.present("input_box", request, Some(input.text_requested()), None)
                .await
        })
    }

    fn message_box<'a>(
        &'a self,
        text: String,
        caption: String,
        buttons: MessageBoxButtons,
        icon: MessageBoxIcon,
    ) -> BoxFuture<'a, Result<MessageBoxResult>> {
        Box::pin(async move {
            let message = Arc::new(MessageBox::new(text, buttons, icon));
            let request = SurfaceRequest::new(
                SurfaceContent::MessageBox(Arc::clone(&message)),
                caption,
                SurfaceMode::Modal,
            )
            .with_can_close(false);
            self.present(
                "message_box",
                request,
                Some(message.accept_requested()),
                buttons.dismissed(),
            )
            .await
        })
    }

    fn open_file_picker<'a>(
        &'a self,
        _options: FilePickerOpenOptions,
    ) -> BoxFuture<'a, Result<Option<Vec<PathBuf>>>> {
        Box::pin(async move {
            Err(WindowError::unsupported(
                "open_file_picker",
                EnvironmentKind::SingleView,
            ))
        })
    }

    fn save_file_picker<'a>(
        &'a self,
        _options: FilePickerSaveOptions,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        Box::pin(async move {
            Err(WindowError::unsupported(
                "save_file_picker",
                EnvironmentKind::SingleView,
            ))
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/strategy/virtual_surface.rs"]
mod tests;
