use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPTION: &str = "Visual Basic IDE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Caption for input and message boxes shown without one.
    pub default_caption: String,
    pub center_windows: bool,
    /// Shield persistent managed windows with a blocker too, not only dialogs.
    pub blocker_for_managed_windows: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            default_caption: DEFAULT_CAPTION.to_string(),
            center_windows: true,
            blocker_for_managed_windows: false,
        }
    }
}

impl ShellSettings {
    pub fn caption_or_default<'a>(&'a self, caption: Option<&'a str>) -> &'a str {
        caption.unwrap_or(&self.default_caption)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
