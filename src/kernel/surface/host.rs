//! 虚拟窗口宿主
//!
//! An ordered stack of blockers and virtual windows rendered inside a single
//! view. Later elements sit on top. Elements are addressed by `SurfaceId`,
//! never by position, so unrelated surfaces can come and go in any order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slotmap::SlotMap;

use crate::core::{completion_signal, CompletionSignal};

use super::window::{CloseCommand, CloseReason, VirtualWindow};

slotmap::new_key_type! {
    pub struct SurfaceId;
}

#[derive(Clone, Debug)]
pub enum SurfaceElement {
    /// Modal shield directly beneath `owner`.
    Blocker { owner: SurfaceId },
    Window(Arc<VirtualWindow>),
}

impl SurfaceElement {
    pub fn is_blocker(&self) -> bool {
        matches!(self, SurfaceElement::Blocker { .. })
    }

    pub fn as_window(&self) -> Option<&Arc<VirtualWindow>> {
        match self {
            SurfaceElement::Window(w) => Some(w),
            SurfaceElement::Blocker { .. } => None,
        }
    }
}

struct Entry {
    element: SurfaceElement,
    /// Window <-> blocker pairing; both leave the stack together.
    partner: Option<SurfaceId>,
}

#[derive(Default)]
pub(crate) struct SurfaceStack {
    entries: SlotMap<SurfaceId, Entry>,
    order: Vec<SurfaceId>,
}

impl SurfaceStack {
    /// Removes `id` and its partner. No-op for unknown ids.
    pub(crate) fn detach(&mut self, id: SurfaceId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        if let Some(partner) = entry.partner {
            self.entries.remove(partner);
        }
        self.order
            .retain(|other| *other != id && Some(*other) != entry.partner);
        true
    }

    fn window_id(&self, id: SurfaceId) -> Option<SurfaceId> {
        match &self.entries.get(id)?.element {
            SurfaceElement::Window(_) => Some(id),
            SurfaceElement::Blocker { owner } => Some(*owner),
        }
    }
}

/// A window placed on the host, plus the signal that resolves when it closes.
pub struct ShownSurface {
    pub id: SurfaceId,
    pub closed: CompletionSignal<CloseReason>,
}

#[derive(Clone, Default)]
pub struct SurfaceHost {
    stack: Arc<Mutex<SurfaceStack>>,
}

impl SurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceStack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pushes `window` on top, preceded by a blocker when `shield` is set, and
    /// installs its close command. Returns `None` if the window was shown
    /// before; a virtual window lives through exactly one show/close cycle.
    pub fn show(&self, window: Arc<VirtualWindow>, shield: bool) -> Option<ShownSurface> {
        let (completer, closed) = completion_signal();
        let mut stack = self.lock();

        let id = stack.entries.insert(Entry {
            element: SurfaceElement::Window(Arc::clone(&window)),
            partner: None,
        });
        let command = CloseCommand::new(Arc::downgrade(&self.stack), id, completer);
        if !window.install_close_command(command) {
            stack.entries.remove(id);
            tracing::warn!(title = %window.title(), "virtual window already shown");
            return None;
        }

        if shield {
            let blocker = stack.entries.insert(Entry {
                element: SurfaceElement::Blocker { owner: id },
                partner: Some(id),
            });
            if let Some(entry) = stack.entries.get_mut(id) {
                entry.partner = Some(blocker);
            }
            stack.order.push(blocker);
        }
        stack.order.push(id);

        tracing::debug!(
            title = %window.title(),
            content = window.content().kind_name(),
            shield,
            centered = window.is_centered(),
            depth = stack.order.len(),
            "virtual window shown"
        );
        Some(ShownSurface { id, closed })
    }

    /// Removes an element wherever it sits in the stack. Removing either half
    /// of a window/blocker pair removes both, and a shown window is closed
    /// through its close command so its awaiter is released.
    pub fn remove(&self, id: SurfaceId) -> bool {
        let window = {
            let stack = self.lock();
            let Some(window_id) = stack.window_id(id) else {
                return false;
            };
            stack
                .entries
                .get(window_id)
                .and_then(|e| e.element.as_window().cloned())
        };

        if let Some(window) = window {
            if window.close(CloseReason::Removed) {
                return true;
            }
        }
        self.lock().detach(id)
    }

    /// Closes every window top-most first until the stack is empty, so a
    /// window shown while tearing down is closed as well. Returns the number
    /// of windows whose awaiters were released.
    pub fn teardown(&self) -> usize {
        let mut closed = 0;
        loop {
            let windows: Vec<(SurfaceId, Arc<VirtualWindow>)> = {
                let stack = self.lock();
                stack
                    .order
                    .iter()
                    .rev()
                    .filter_map(|id| {
                        let window = stack.entries.get(*id)?.element.as_window()?;
                        Some((*id, Arc::clone(window)))
                    })
                    .collect()
            };
            if windows.is_empty() {
                break;
            }
            for (id, window) in windows {
                if window.close(CloseReason::Teardown) {
                    closed += 1;
                } else {
                    self.lock().detach(id);
                }
            }
        }

        if closed > 0 {
            tracing::info!(closed, "surface host torn down");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().order.is_empty()
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.lock().entries.contains_key(id)
    }

    /// Index from the bottom of the stack.
    pub fn position(&self, id: SurfaceId) -> Option<usize> {
        self.lock().order.iter().position(|other| *other == id)
    }

    pub fn element(&self, id: SurfaceId) -> Option<SurfaceElement> {
        self.lock().entries.get(id).map(|e| e.element.clone())
    }

    pub fn blocker_of(&self, window: SurfaceId) -> Option<SurfaceId> {
        let stack = self.lock();
        let entry = stack.entries.get(window)?;
        match entry.element {
            SurfaceElement::Window(_) => entry.partner,
            SurfaceElement::Blocker { .. } => None,
        }
    }

    pub fn id_of(&self, window: &Arc<VirtualWindow>) -> Option<SurfaceId> {
        let stack = self.lock();
        stack.order.iter().copied().find(|id| {
            stack
                .entries
                .get(*id)
                .and_then(|e| e.element.as_window())
                .is_some_and(|w| Arc::ptr_eq(w, window))
        })
    }

    /// Bottom to top.
    pub fn layers(&self) -> Vec<(SurfaceId, SurfaceElement)> {
        let stack = self.lock();
        stack
            .order
            .iter()
            .filter_map(|id| stack.entries.get(*id).map(|e| (*id, e.element.clone())))
            .collect()
    }

    /// Bottom to top.
    pub fn windows(&self) -> Vec<Arc<VirtualWindow>> {
        self.layers()
            .into_iter()
            .filter_map(|(_, e)| e.as_window().cloned())
            .collect()
    }

    pub fn top_window(&self) -> Option<Arc<VirtualWindow>> {
        self.windows().pop()
    }

    /// True while any blocker is displayed.
    pub fn is_shielded(&self) -> bool {
        let stack = self.lock();
        stack.entries.values().any(|e| e.element.is_blocker())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/surface/host.rs"]
mod tests;
