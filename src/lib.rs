// src/lib.rs

//! Single-window X11 lifecycle shim for embedded application hosts.
//!
//! This crate owns exactly one concern: given a live display connection, a
//! visual id negotiated by the host's render backend, and target dimensions,
//! bootstrap a mapped, border-less, close-button-enabled top-level window and
//! manage its resize/destroy lifecycle. Everything around it (the event
//! loop, input translation, the rendering surface) belongs to the host and
//! is deliberately out of scope here.
//!
//! The lifecycle logic in [`window::NativeWindow`] is written against the
//! [`backend::DisplayBackend`] trait rather than Xlib directly, so it can be
//! exercised under test with a recording backend. The real Xlib binding
//! lives in [`backend::x11`], which also provides [`backend::x11::Connection`]
//! for hosts that do not already hold a display pointer of their own.

pub mod backend;
pub mod config;
pub mod window;

pub use backend::x11::Connection;
pub use backend::{
    ColormapHandle, DisplayBackend, EventInterest, VisualId, VisualInfo, WindowHandle,
};
pub use config::WindowConfig;
pub use window::NativeWindow;
