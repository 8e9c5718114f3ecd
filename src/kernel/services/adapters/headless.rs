//! In-memory desktop platform.
//!
//! Behaves like a windowing system without drawing anything: windows take
//! focus when shown, closing a window resolves its closed signal, and file
//! pickers answer from queued responses. Used by tests and the demo binary.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::core::Completer;
use crate::kernel::content::{SurfaceContent, SurfaceRequest};
use crate::kernel::services::ports::{
    BoxFuture, DesktopPlatform, FilePickerOpenOptions, FilePickerSaveOptions, NativeWindow,
    NativeWindowId, StorageItem,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerCall {
    Open {
        owner: Option<NativeWindowId>,
        options: FilePickerOpenOptions,
    },
    Save {
        owner: Option<NativeWindowId>,
        options: FilePickerSaveOptions,
    },
}

#[derive(Default)]
struct PlatformState {
    next_id: u64,
    created: Vec<Arc<HeadlessWindow>>,
    main: Option<NativeWindowId>,
    open_responses: VecDeque<Option<Vec<StorageItem>>>,
    save_responses: VecDeque<Option<StorageItem>>,
    picker_calls: Vec<PickerCall>,
}

impl PlatformState {
    fn allocate_id(&mut self) -> NativeWindowId {
        self.next_id += 1;
        NativeWindowId(self.next_id)
    }

    fn focus(&self, id: Option<NativeWindowId>) {
        for window in &self.created {
            let mut state = window.lock();
            state.active = state.visible && Some(window.id) == id;
        }
    }
}

#[derive(Default)]
struct WindowState {
    visible: bool,
    active: bool,
    modal: bool,
    owner: Option<NativeWindowId>,
    closed: Option<Completer<()>>,
}

pub struct HeadlessWindow {
    id: NativeWindowId,
    title: String,
    content: SurfaceContent,
    state: Mutex<WindowState>,
    platform: Weak<Mutex<PlatformState>>,
}

impl HeadlessWindow {
    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn is_modal(&self) -> bool {
        self.lock().modal
    }

    pub fn owner(&self) -> Option<NativeWindowId> {
        self.lock().owner
    }

    fn open(&self, owner: Option<NativeWindowId>, modal: bool, closed: Completer<()>) {
        {
            let mut state = self.lock();
            state.visible = true;
            state.modal = modal;
            state.owner = owner;
            state.closed = Some(closed);
        }
        if let Some(platform) = self.platform.upgrade() {
            platform
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .focus(Some(self.id));
        }
    }
}

impl NativeWindow for HeadlessWindow {
    fn id(&self) -> NativeWindowId {
        self.id
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn is_active(&self) -> bool {
        self.lock().active
    }

    fn show(&self, closed: Completer<()>) {
        self.open(None, false, closed);
    }

    fn show_modal(&self, owner: Option<NativeWindowId>, closed: Completer<()>) {
        self.open(owner, true, closed);
    }

    fn close(&self) {
        let (completer, owner) = {
            let mut state = self.lock();
            if !state.visible {
                return;
            }
            state.visible = false;
            state.active = false;
            (state.closed.take(), state.owner)
        };
        if let Some(platform) = self.platform.upgrade() {
            let platform = platform.lock().unwrap_or_else(PoisonError::into_inner);
            // Focus returns to the owner, as window managers do.
            if owner.is_some() {
                platform.focus(owner);
            }
        }
        if let Some(completer) = completer {
            completer.complete(());
        }
    }
}

#[derive(Clone)]
pub struct HeadlessPlatform {
    state: Arc<Mutex<PlatformState>>,
}

impl HeadlessPlatform {
    /// Creates the platform with a visible, unfocused main window.
    pub fn new(main_title: &str) -> Self {
        let platform = Self {
            state: Arc::new(Mutex::new(PlatformState::default())),
        };
        let main = platform.build_window(main_title, SurfaceContent::Empty);
        main.lock().visible = true;
        platform.lock().main = Some(main.id);
        platform
    }

    fn lock(&self) -> MutexGuard<'_, PlatformState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build_window(&self, title: &str, content: SurfaceContent) -> Arc<HeadlessWindow> {
        let mut state = self.lock();
        let window = Arc::new(HeadlessWindow {
            id: state.allocate_id(),
            title: title.to_string(),
            content,
            state: Mutex::new(WindowState::default()),
            platform: Arc::downgrade(&self.state),
        });
        state.created.push(Arc::clone(&window));
        window
    }

    pub fn main_id(&self) -> Option<NativeWindowId> {
        self.lock().main
    }

    pub fn focus(&self, id: NativeWindowId) {
        self.lock().focus(Some(id));
    }

    pub fn clear_focus(&self) {
        self.lock().focus(None);
    }

    pub fn window(&self, id: NativeWindowId) -> Option<Arc<HeadlessWindow>> {
        self.lock().created.iter().find(|w| w.id == id).cloned()
    }

    /// Visible windows in creation order.
    pub fn open_windows(&self) -> Vec<Arc<HeadlessWindow>> {
        self.lock()
            .created
            .iter()
            .filter(|w| w.is_visible())
            .cloned()
            .collect()
    }

    /// Most recently created visible window with `title`.
    pub fn find_open(&self, title: &str) -> Option<Arc<HeadlessWindow>> {
        self.open_windows()
            .into_iter()
            .rev()
            .find(|w| w.title == title)
    }

    pub fn queue_open_result(&self, result: Option<Vec<StorageItem>>) {
        self.lock().open_responses.push_back(result);
    }

    pub fn queue_save_result(&self, result: Option<StorageItem>) {
        self.lock().save_responses.push_back(result);
    }

    pub fn picker_calls(&self) -> Vec<PickerCall> {
        self.lock().picker_calls.clone()
    }
}

impl DesktopPlatform for HeadlessPlatform {
    fn windows(&self) -> Vec<Arc<dyn NativeWindow>> {
        self.open_windows()
            .into_iter()
            .map(|w| w as Arc<dyn NativeWindow>)
            .collect()
    }

    fn main_window(&self) -> Option<Arc<dyn NativeWindow>> {
        let main = self.main_id()?;
        self.window(main).map(|w| w as Arc<dyn NativeWindow>)
    }

    fn create_window(&self, request: &SurfaceRequest) -> Arc<dyn NativeWindow> {
        self.build_window(request.title(), request.content().clone())
    }

    fn open_file_picker(
        &self,
        owner: Option<NativeWindowId>,
        options: &FilePickerOpenOptions,
    ) -> BoxFuture<'static, Option<Vec<StorageItem>>> {
        let response = {
            let mut state = self.lock();
            state.picker_calls.push(PickerCall::Open {
                owner,
                options: options.clone(),
            });
            state.open_responses.pop_front().flatten()
        };
        Box::pin(async move { response })
    }

    fn save_file_picker(
        &self,
        owner: Option<NativeWindowId>,
        options: &FilePickerSaveOptions,
    ) -> BoxFuture<'static, Option<StorageItem>> {
        let response = {
            let mut state = self.lock();
            state.picker_calls.push(PickerCall::Save {
                owner,
                options: options.clone(),
            });
            state.save_responses.pop_front().flatten()
        };
        Box::pin(async move { response })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/headless.rs"]
mod tests;
