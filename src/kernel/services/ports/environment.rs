//! Environment discriminator: which kind of application lifetime is running.

use std::sync::{Arc, PoisonError, RwLock};

use super::platform::DesktopPlatform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentKind {
    /// One host view, no native multi-window support.
    SingleView,
    Desktop,
    Unrecognized,
}

impl std::fmt::Display for EnvironmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EnvironmentKind::SingleView => "single-view",
            EnvironmentKind::Desktop => "desktop",
            EnvironmentKind::Unrecognized => "unrecognized",
        })
    }
}

#[derive(Clone)]
pub enum Lifetime {
    SingleView,
    Desktop(Arc<dyn DesktopPlatform>),
    Unrecognized,
}

impl Lifetime {
    pub fn kind(&self) -> EnvironmentKind {
        match self {
            Lifetime::SingleView => EnvironmentKind::SingleView,
            Lifetime::Desktop(_) => EnvironmentKind::Desktop,
            Lifetime::Unrecognized => EnvironmentKind::Unrecognized,
        }
    }
}

impl std::fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lifetime({})", self.kind())
    }
}

/// Shared handle to the current lifetime. Read on every window manager
/// operation, so a switch made through `set` is seen by the next call.
#[derive(Clone)]
pub struct EnvironmentContext {
    current: Arc<RwLock<Lifetime>>,
}

impl EnvironmentContext {
    pub fn new(lifetime: Lifetime) -> Self {
        Self {
            current: Arc::new(RwLock::new(lifetime)),
        }
    }

    pub fn single_view() -> Self {
        Self::new(Lifetime::SingleView)
    }

    pub fn desktop(platform: Arc<dyn DesktopPlatform>) -> Self {
        Self::new(Lifetime::Desktop(platform))
    }

    pub fn current(&self) -> Lifetime {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn kind(&self) -> EnvironmentKind {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .kind()
    }

    pub fn set(&self, lifetime: Lifetime) {
        tracing::info!(to = %lifetime.kind(), "application lifetime changed");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = lifetime;
    }
}
