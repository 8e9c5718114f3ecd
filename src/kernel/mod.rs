//! Window/dialog orchestration.

pub mod content;
pub mod services;
pub mod strategy;
pub mod surface;
pub mod window_manager;

pub use content::{
    ConfirmDialog, Dialog, InputBox, MessageBox, MessageBoxButtons, MessageBoxIcon, MessageBoxResult,
    SurfaceContent, SurfaceMode, SurfaceRequest,
};
pub use strategy::{NativeWindowStrategy, SurfaceStrategy, VirtualSurfaceStrategy};
pub use surface::{CloseReason, SurfaceHost, SurfaceId, VirtualWindow};
pub use window_manager::WindowManager;
