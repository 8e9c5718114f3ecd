//! Single-view surfaces: the host stack and the virtual windows drawn in it.

pub mod host;
pub mod window;

pub use host::{ShownSurface, SurfaceElement, SurfaceHost, SurfaceId};
pub use window::{CloseCommand, CloseReason, VirtualWindow, WindowGuard};
