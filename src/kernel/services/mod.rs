//! Services layer (ports + adapters).
//!
//! - `ports`: contracts the window manager consumes (environment, desktop
//!   platform, settings).
//! - `adapters`: implementations of those contracts.

pub mod adapters;
pub mod ports;
