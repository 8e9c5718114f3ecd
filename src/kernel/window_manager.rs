//! 窗口管理器
//!
//! Entry point for "show this and wait for a result". Each call reads the
//! current lifetime and routes to the matching strategy; callers never see
//! whether a real or a virtual window answered.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{Result, WindowError};
use crate::kernel::content::{
    Dialog, MessageBoxButtons, MessageBoxIcon, MessageBoxResult, SurfaceMode,
};
use crate::kernel::services::ports::{
    EnvironmentContext, EnvironmentKind, FilePickerOpenOptions, FilePickerSaveOptions, Lifetime,
    ShellSettings,
};
use crate::kernel::strategy::{NativeWindowStrategy, SurfaceStrategy, VirtualSurfaceStrategy};
use crate::kernel::surface::{SurfaceHost, VirtualWindow};

pub struct WindowManager {
    host: SurfaceHost,
    environment: EnvironmentContext,
    settings: ShellSettings,
}

impl WindowManager {
    pub fn new(host: SurfaceHost, environment: EnvironmentContext, settings: ShellSettings) -> Self {
        Self {
            host,
            environment,
            settings,
        }
    }

    pub fn host(&self) -> &SurfaceHost {
        &self.host
    }

    pub fn environment(&self) -> &EnvironmentContext {
        &self.environment
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    fn strategy(&self, operation: &'static str) -> Result<Box<dyn SurfaceStrategy>> {
        match self.environment.current() {
            Lifetime::SingleView => Ok(Box::new(VirtualSurfaceStrategy::new(
                self.host.clone(),
                self.settings.clone(),
            ))),
            Lifetime::Desktop(platform) => Ok(Box::new(NativeWindowStrategy::new(platform))),
            Lifetime::Unrecognized => {
                tracing::warn!(operation, "no window strategy for unrecognized lifetime");
                Err(WindowError::unsupported(
                    operation,
                    EnvironmentKind::Unrecognized,
                ))
            }
        }
    }

    fn caption(&self, caption: Option<&str>) -> String {
        self.settings.caption_or_default(caption).to_string()
    }

    /// Opens a persistent, non-modal window for `dialog` and resolves once it
    /// is closed. Dropping the future closes the window, so fire-and-forget
    /// callers spawn it.
    pub async fn show_window(&self, dialog: Arc<dyn Dialog>, title: Option<&str>) -> Result<()> {
        let strategy = self.strategy("show_window")?;
        strategy
            .show_window(dialog, title.map(str::to_string))
            .await
    }

    /// Single-view only: shows a window the caller built itself.
    pub async fn show_managed_window(
        &self,
        window: Arc<VirtualWindow>,
        mode: SurfaceMode,
    ) -> Result<()> {
        let strategy = self.strategy("show_managed_window")?;
        strategy.show_managed_window(window, mode).await
    }

    /// Modal dialog; `true` when accepted.
    pub async fn show_dialog(&self, dialog: Arc<dyn Dialog>) -> Result<bool> {
        let strategy = self.strategy("show_dialog")?;
        strategy.show_dialog(dialog).await
    }

    /// Same as [`show_dialog`](Self::show_dialog); kept for call sites that
    /// branch on acceptance.
    pub async fn show_dialog_blocking(&self, dialog: Arc<dyn Dialog>) -> Result<bool> {
        self.show_dialog(dialog).await
    }

    /// The entered text, or `None` if cancelled.
    pub async fn input_box(
        &self,
        prompt: &str,
        caption: Option<&str>,
        default_text: &str,
    ) -> Result<Option<String>> {
        let strategy = self.strategy("input_box")?;
        strategy
            .input_box(
                prompt.to_string(),
                self.caption(caption),
                default_text.to_string(),
            )
            .await
    }

    pub async fn message_box(
        &self,
        text: &str,
        caption: Option<&str>,
        buttons: MessageBoxButtons,
        icon: MessageBoxIcon,
    ) -> Result<MessageBoxResult> {
        let strategy = self.strategy("message_box")?;
        strategy
            .message_box(text.to_string(), self.caption(caption), buttons, icon)
            .await
    }

    /// Desktop only. Non-local picks are dropped from the result.
    pub async fn open_file_picker(
        &self,
        options: FilePickerOpenOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        let strategy = self.strategy("open_file_picker")?;
        strategy.open_file_picker(options).await
    }

    /// Desktop only.
    pub async fn save_file_picker(&self, options: FilePickerSaveOptions) -> Result<Option<PathBuf>> {
        let strategy = self.strategy("save_file_picker")?;
        strategy.save_file_picker(options).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/window_manager.rs"]
mod tests;
