//! Host adapters for flex-theme
//!
//! Every environment side effect (persistent storage, color-scheme media
//! queries, the root element's attributes/classes/styles, injected style
//! sheets) goes through the [`Host`] trait. Theme logic never checks for a
//! browser itself; it is handed a host:
//!
//! - [`NoopHost`]: non-browser execution; reads return defaults, writes do nothing
//! - [`MemoryHost`]: in-process host with controllable system preference,
//!   used by tests and command-line tooling
//! - `WebHost` (`wasm32` only): `localStorage`, `matchMedia` and
//!   `document.documentElement` via `web-sys`

pub mod device;
mod error;
mod host;
mod memory;
mod noop;
mod scheme;

#[cfg(target_arch = "wasm32")]
mod web;

pub use device::{apply_mobile_optimizations, DeviceType};
pub use error::{HostError, Result};
pub use host::{Host, SharedHost, StorageChange};
pub use memory::MemoryHost;
pub use noop::NoopHost;
pub use scheme::{ColorScheme, TextDirection};

#[cfg(target_arch = "wasm32")]
pub use web::WebHost;

/// Re-exported so host implementations outside this crate can build handles.
pub use flex_core::Subscription;
