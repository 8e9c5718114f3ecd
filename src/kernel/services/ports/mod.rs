//! Service ports: traits + data contracts.

pub mod environment;
pub mod platform;
pub mod runtime;
pub mod settings;

pub use environment::{EnvironmentContext, EnvironmentKind, Lifetime};
pub use platform::{
    DesktopPlatform, FilePickerOpenOptions, FilePickerSaveOptions, FileTypeFilter, NativeWindow,
    NativeWindowId, StorageItem,
};
pub use runtime::BoxFuture;
pub use settings::{ShellSettings, DEFAULT_CAPTION};
