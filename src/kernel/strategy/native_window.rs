use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{EventSource, Result, WindowError};
use crate::kernel::content::{
    Dialog, InputBox, MessageBox, MessageBoxButtons, MessageBoxIcon, MessageBoxResult,
    SurfaceContent, SurfaceMode, SurfaceRequest,
};
use crate::kernel::services::adapters::native::{top_window, RealWindowAdapter};
use crate::kernel::services::ports::{
    BoxFuture, DesktopPlatform, EnvironmentKind, FilePickerOpenOptions, FilePickerSaveOptions,
    NativeWindowId,
};
use crate::kernel::surface::VirtualWindow;

use super::SurfaceStrategy;

/// Shows surfaces as native top-level windows of a desktop platform.
pub struct NativeWindowStrategy {
    platform: Arc<dyn DesktopPlatform>,
}

impl NativeWindowStrategy {
    pub fn new(platform: Arc<dyn DesktopPlatform>) -> Self {
        Self { platform }
    }

    fn owner(&self) -> Option<NativeWindowId> {
        top_window(self.platform.as_ref()).map(|w| w.id())
    }

    async fn present<T>(
        &self,
        operation: &'static str,
        request: SurfaceRequest,
        requests: &EventSource<T>,
        dismissed: T,
    ) -> Result<T>
    where
        T: Clone + Send + 'static,
    {
        let adapter = RealWindowAdapter::new(self.platform.create_window(&request));
        let closed = match request.mode() {
            SurfaceMode::Modal => adapter.show_modal(self.owner()),
            SurfaceMode::Modeless => adapter.show_non_modal(),
        };
        let value = adapter
            .await_result(closed, Some(requests), dismissed)
            .await
            .map_err(|_| WindowError::Abandoned { operation })?;
        tracing::debug!(operation, window = ?adapter.window().id(), "native surface finished");
        Ok(value)
    }
}

impl SurfaceStrategy for NativeWindowStrategy {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::Desktop
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
            self.present("show_window", request, dialog.close_requested(), false)
                .await
                .map(|_| ())
        })
    }

    fn show_managed_window<'a>(
        &'a self,
        _window: Arc<VirtualWindow>,
        _mode: SurfaceMode,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            Err(WindowError::unsupported(
                "show_managed_window",
                EnvironmentKind::Desktop,
            ))
        })
    }

    fn show_dialog<'a>(&'a self, dialog: Arc<dyn Dialog>) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move {
            let request = SurfaceRequest::new(
                SurfaceContent::Dialog(Arc::clone(&dialog)),
                dialog.title(),
                SurfaceMode::Modal,
            );
            self.present("show_dialog", request, dialog.close_requested(), false)
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
            );
            self.present("input_box", request, input.text_requested(), None)
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
            );
            self.present(
                "message_box",
                request,
                message.accept_requested(),
                buttons.dismissed(),
            )
            .await
        })
    }

    fn open_file_picker<'a>(
        &'a self,
        options: FilePickerOpenOptions,
    ) -> BoxFuture<'a, Result<Option<Vec<PathBuf>>>> {
        Box::pin(async move {
            let items = self
                .platform
                .open_file_picker(self.owner(), &options)
                .await;
            Ok(items.map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.try_local_path())
                    .map(Path::to_path_buf)
                    .collect()
            }))
        })
    }

    fn save_file_picker<'a>(
        &'a self,
        options: FilePickerSaveOptions,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>> {
        Box::pin(async move {
            let item = self
                .platform
                .save_file_picker(self.owner(), &options)
                .await;
            Ok(item.and_then(|item| item.try_local_path().map(Path::to_path_buf)))
        })
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/strategy/native_window.rs"]
mod tests;
