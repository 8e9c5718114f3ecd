//! Desktop windowing contract supplied by the host environment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::Completer;
use crate::kernel::content::SurfaceRequest;

use super::runtime::BoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeWindowId(pub u64);

/// A native top-level window. The environment resolves `closed` once the
/// window is gone, however that happens.
pub trait NativeWindow: Send + Sync {
    fn id(&self) -> NativeWindowId;

    fn title(&self) -> String;

    /// Holds input focus among the application's top-level windows.
    fn is_active(&self) -> bool;

    fn show(&self, closed: Completer<()>);

    /// Shown attached to `owner`, which stops receiving input until closed.
    fn show_modal(&self, owner: Option<NativeWindowId>, closed: Completer<()>);

    /// Asks the environment to close the window.
    fn close(&self);
}

pub trait DesktopPlatform: Send + Sync {
    /// All open top-level windows.
    fn windows(&self) -> Vec<Arc<dyn NativeWindow>>;

    fn main_window(&self) -> Option<Arc<dyn NativeWindow>>;

    /// Builds (but does not show) a window hosting the request's content.
    fn create_window(&self, request: &SurfaceRequest) -> Arc<dyn NativeWindow>;

    /// `None` when the user cancels the picker.
    fn open_file_picker(
        &self,
        owner: Option<NativeWindowId>,
        options: &FilePickerOpenOptions,
    ) -> BoxFuture<'static, Option<Vec<StorageItem>>>;

    fn save_file_picker(
        &self,
        owner: Option<NativeWindowId>,
        options: &FilePickerSaveOptions,
    ) -> BoxFuture<'static, Option<StorageItem>>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePickerOpenOptions {
    pub title: Option<String>,
    pub allow_multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeFilter {
    pub name: String,
    /// Glob patterns such as `*.frm`.
    pub patterns: Vec<String>,
}

impl FileTypeFilter {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePickerSaveOptions {
    pub title: Option<String>,
    pub suggested_file_name: Option<String>,
    pub filters: Vec<FileTypeFilter>,
}

/// A picker result; only local items map to filesystem paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageItem {
    Local(PathBuf),
    Remote(String),
}

impl StorageItem {
    pub fn try_local_path(&self) -> Option<&Path> {
        match self {
            StorageItem::Local(path) => Some(path.as_path()),
            StorageItem::Remote(_) => None,
        }
    }
}
