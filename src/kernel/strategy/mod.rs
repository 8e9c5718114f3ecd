//! Presentation strategies.
//!
//! The window manager picks one per call from the current lifetime:
//! `VirtualSurfaceStrategy` for single-view hosts, `NativeWindowStrategy`
//! for desktop lifetimes. Both show a surface and wait for its result.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::Result;
use crate::kernel::content::{
    Dialog, MessageBoxButtons, MessageBoxIcon, MessageBoxResult, SurfaceMode,
};
use crate::kernel::services::ports::{
    BoxFuture, EnvironmentKind, FilePickerOpenOptions, FilePickerSaveOptions,
};
use crate::kernel::surface::VirtualWindow;

pub mod native_window;
pub mod virtual_surface;

pub use native_window::NativeWindowStrategy;
pub use virtual_surface::VirtualSurfaceStrategy;

pub trait SurfaceStrategy: Send + Sync {
    fn kind(&self) -> EnvironmentKind;

    /// Persistent surface; resolves once it has been closed.
    fn show_window<'a>(
        &'a self,
        dialog: Arc<dyn Dialog>,
        title: Option<String>,
    ) -> BoxFuture<'a, Result<()>>;

    /// A caller-built virtual window.
    fn show_managed_window<'a>(
        &'a self,
        window: Arc<VirtualWindow>,
        mode: SurfaceMode,
    ) -> BoxFuture<'a, Result<()>>;

    fn show_dialog<'a>(&'a self, dialog: Arc<dyn Dialog>) -> BoxFuture<'a, Result<bool>>;

    fn input_box<'a>(
        &'a self,
        prompt: String,
        caption: String,
        default_text: String,
    ) -> BoxFuture<'a, Result<Option<String>>>;

    fn message_box<'a>(
        &'a self,
        text: String,
        caption: String,
        buttons: MessageBoxButtons,
        icon: MessageBoxIcon,
    ) -> BoxFuture<'a, Result<MessageBoxResult>>;

    fn open_file_picker<'a>(
        &'a self,
        options: FilePickerOpenOptions,
    ) -> BoxFuture<'a, Result<Option<Vec<PathBuf>>>>;

    fn save_file_picker<'a>(
        &'a self,
        options: FilePickerSaveOptions,
    ) -> BoxFuture<'a, Result<Option<PathBuf>>>;
}
