use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::core::Completer;
use crate::kernel::content::{SurfaceContent, SurfaceRequest};

use super::host::{SurfaceId, SurfaceStack};

/// Why a virtual window was closed. Passed as the close command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The content raised its close-requested event.
    ContentRequested,
    /// The window chrome's close button.
    CloseButton,
    /// The window was removed from its host directly.
    Removed,
    /// The host was torn down.
    Teardown,
    /// The awaiting caller went away.
    Abandoned,
}

/// Detaches a shown window (and its blocker) from the host, then resolves
/// the window's completion signal. Only the first execution has effect.
#[derive(Clone)]
pub struct CloseCommand {
    stack: Weak<Mutex<SurfaceStack>>,
    id: SurfaceId,
    completer: Completer<CloseReason>,
}

impl CloseCommand {
    pub(super) fn new(
        stack: Weak<Mutex<SurfaceStack>>,
        id: SurfaceId,
        completer: Completer<CloseReason>,
    ) -> Self {
        Self {
            stack,
            id,
            completer,
        }
    }

    pub fn can_execute(&self) -> bool {
        !self.completer.is_completed()
    }

    pub fn execute(&self, reason: CloseReason) -> bool {
        if !self.can_execute() {
            return false;
        }
        if let Some(stack) = self.stack.upgrade() {
            stack
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .detach(self.id);
        }
        let resolved = self.completer.complete(reason);
        if resolved {
            tracing::debug!(reason = ?reason, "virtual window closed");
        }
        resolved
    }
}

pub struct VirtualWindow {
    title: String,
    content: SurfaceContent,
    can_close: bool,
    centered: bool,
    close_command: Mutex<Option<CloseCommand>>,
}

impl VirtualWindow {
    pub fn new(title: impl Into<String>, content: SurfaceContent, can_close: bool) -> Self {
        Self {
            title: title.into(),
            content,
            can_close,
            centered: true,
            close_command: Mutex::new(None),
        }
    }

    pub fn from_request(request: &SurfaceRequest) -> Self {
        Self::new(
            request.title(),
            request.content().clone(),
            request.can_close(),
        )
    }

    pub fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn can_close(&self) -> bool {
        self.can_close
    }

    pub fn is_centered(&self) -> bool {
        self.centered
    }

    /// Installed by the host when the window is shown.
    pub fn close_command(&self) -> Option<CloseCommand> {
        self.close_command
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn close_command_parameter(&self) -> CloseReason {
        CloseReason::CloseButton
    }

    pub(super) fn install_close_command(&self, command: CloseCommand) -> bool {
        let mut slot = self
            .close_command
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some(command);
        true
    }

    pub fn is_shown(&self) -> bool {
        self.close_command()
            .map(|cmd| cmd.can_execute())
            .unwrap_or(false)
    }

    pub fn is_closed(&self) -> bool {
        self.close_command()
            .map(|cmd| !cmd.can_execute())
            .unwrap_or(false)
    }

    /// Runs the close command. Returns `false` if the window was never shown
    /// or has already closed.
    pub fn close(&self, reason: CloseReason) -> bool {
        // Clone out of the lock: executing touches the host.
        match self.close_command() {
            Some(cmd) => cmd.execute(reason),
            None => false,
        }
    }

    /// The chrome close button; inert when the window is not closable.
    pub fn press_close_button(&self) -> bool {
        if !self.can_close {
            return false;
        }
        self.close(self.close_command_parameter())
    }
}

impl std::fmt::Debug for VirtualWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualWindow")
            .field("title", &self.title)
            .field("content", &self.content)
            .field("can_close", &self.can_close)
            .field("shown", &self.is_shown())
            .finish()
    }
}

/// Closes the window when dropped unless it already closed. Held by whoever
/// awaits the window so an abandoned await never orphans it in the host.
pub struct WindowGuard {
    window: Arc<VirtualWindow>,
}

impl WindowGuard {
    pub fn new(window: Arc<VirtualWindow>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Arc<VirtualWindow> {
        &self.window
    }
}

impl Drop for WindowGuard {
    fn drop(&mut self) {
        if self.window.close(CloseReason::Abandoned) {
            tracing::warn!(title = %self.window.title(), "virtual window abandoned by its caller");
        }
    }
}
