//! Service adapters: environment specific implementations.

pub mod headless;
pub mod native;
pub mod paths;
pub mod settings;

pub use headless::{HeadlessPlatform, HeadlessWindow, PickerCall};
pub use native::{top_window, RealWindowAdapter};
pub use paths::{ensure_log_dir, get_log_dir, get_settings_path};
pub use settings::{ensure_settings_file, load_settings, load_settings_or_default, SettingsError};
