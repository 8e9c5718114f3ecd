//! Surface content contract.
//!
//! Anything shown through the window manager exposes a close-requested event
//! carrying its outcome. Dialogs carry a `bool` (accept/cancel), input boxes
//! an optional string, message boxes a [`MessageBoxResult`].

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::core::EventSource;

pub trait Dialog: Send + Sync + 'static {
    fn title(&self) -> String;

    fn close_requested(&self) -> &EventSource<bool>;
}

/// Stock OK/Cancel dialog with nothing but a title.
pub struct ConfirmDialog {
    title: String,
    close_requested: EventSource<bool>,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            close_requested: EventSource::new(),
        }
    }

    pub fn accept(&self) {
        self.close_requested.emit(true);
    }

    pub fn cancel(&self) {
        self.close_requested.emit(false);
    }
}

impl Dialog for ConfirmDialog {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn close_requested(&self) -> &EventSource<bool> {
        &self.close_requested
    }
}

pub struct InputBox {
    prompt: String,
    text: Mutex<String>,
    text_requested: EventSource<Option<String>>,
}

impl InputBox {
    pub fn new(prompt: impl Into<String>, default_text: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            text: Mutex::new(default_text.into()),
            text_requested: EventSource::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    pub fn text_requested(&self) -> &EventSource<Option<String>> {
        &self.text_requested
    }

    /// OK button: submits the current text.
    pub fn accept(&self) {
        self.text_requested.emit(Some(self.text()));
    }

    pub fn cancel(&self) {
        self.text_requested.emit(None);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageBoxButtons {
    Ok,
    OkCancel,
    AbortRetryIgnore,
    YesNoCancel,
    YesNo,
    RetryCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageBoxIcon {
    None,
    Critical,
    Question,
    Warning,
    Information,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageBoxResult {
    Ok,
    Cancel,
    Abort,
    Retry,
    Ignore,
    Yes,
    No,
}

impl MessageBoxButtons {
    pub fn results(self) -> &'static [MessageBoxResult] {
        use MessageBoxResult as R;
        match self {
            MessageBoxButtons::Ok => &[R::Ok],
            MessageBoxButtons::OkCancel => &[R::Ok, R::Cancel],
            MessageBoxButtons::AbortRetryIgnore => &[R::Abort, R::Retry, R::Ignore],
            MessageBoxButtons::YesNoCancel => &[R::Yes, R::No, R::Cancel],
            MessageBoxButtons::YesNo => &[R::Yes, R::No],
            MessageBoxButtons::RetryCancel => &[R::Retry, R::Cancel],
        }
    }

    /// Result reported when the box is closed without pressing a button.
    pub fn dismissed(self) -> MessageBoxResult {
        match self {
            MessageBoxButtons::Ok => MessageBoxResult::Ok,
            MessageBoxButtons::YesNo => MessageBoxResult::No,
            MessageBoxButtons::AbortRetryIgnore => MessageBoxResult::Abort,
            MessageBoxButtons::OkCancel
            | MessageBoxButtons::YesNoCancel
            | MessageBoxButtons::RetryCancel => MessageBoxResult::Cancel,
        }
    }
}

pub struct MessageBox {
    text: String,
    buttons: MessageBoxButtons,
    icon: MessageBoxIcon,
    accept_requested: EventSource<MessageBoxResult>,
}

impl MessageBox {
    pub fn new(text: impl Into<String>, buttons: MessageBoxButtons, icon: MessageBoxIcon) -> Self {
        Self {
            text: text.into(),
            buttons,
            icon,
            accept_requested: EventSource::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn buttons(&self) -> MessageBoxButtons {
        self.buttons
    }

    pub fn icon(&self) -> MessageBoxIcon {
        self.icon
    }

    pub fn accept_requested(&self) -> &EventSource<MessageBoxResult> {
        &self.accept_requested
    }

    pub fn press(&self, result: MessageBoxResult) {
        self.accept_requested.emit(result);
    }
}

#[derive(Clone)]
pub enum SurfaceContent {
    Empty,
    Dialog(Arc<dyn Dialog>),
    InputBox(Arc<InputBox>),
    MessageBox(Arc<MessageBox>),
}

impl SurfaceContent {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SurfaceContent::Empty => "empty",
            SurfaceContent::Dialog(_) => "dialog",
            SurfaceContent::InputBox(_) => "input_box",
            SurfaceContent::MessageBox(_) => "message_box",
        }
    }

    pub fn as_dialog(&self) -> Option<&Arc<dyn Dialog>> {
        match self {
            SurfaceContent::Dialog(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_input_box(&self) -> Option<&Arc<InputBox>> {
        match self {
            SurfaceContent::InputBox(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_message_box(&self) -> Option<&Arc<MessageBox>> {
        match self {
            SurfaceContent::MessageBox(b) => Some(b),
            _ => None,
        }
    }
}

impl std::fmt::Debug for SurfaceContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceContent::Empty => f.write_str("Empty"),
            SurfaceContent::Dialog(d) => f.debug_tuple("Dialog").field(&d.title()).finish(),
            SurfaceContent::InputBox(b) => f.debug_tuple("InputBox").field(&b.prompt()).finish(),
            SurfaceContent::MessageBox(b) => f.debug_tuple("MessageBox").field(&b.text()).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Shields everything beneath it until closed.
    Modal,
    Modeless,
}

impl SurfaceMode {
    pub fn is_modal(self) -> bool {
        matches!(self, SurfaceMode::Modal)
    }
}

/// What a caller asks the window manager to show.
#[derive(Debug, Clone)]
pub struct SurfaceRequest {
    content: SurfaceContent,
    title: String,
    can_close: bool,
    mode: SurfaceMode,
}

impl SurfaceRequest {
    pub fn new(content: SurfaceContent, title: impl Into<String>, mode: SurfaceMode) -> Self {
        Self {
            content,
            title: title.into(),
            can_close: true,
            mode,
        }
    }

    pub fn with_can_close(mut self, can_close: bool) -> Self {
        self.can_close = can_close;
        self
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn can_close(&self) -> bool {
        self.can_close
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/content.rs"]
mod tests;
