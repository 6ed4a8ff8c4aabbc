// src/config.rs

//! Configuration for window construction.
//!
//! Only one behavior is configurable today: whether a title is written to the
//! newly created window. The embedder this shim serves runs undecorated,
//! kiosk-style surfaces, so the title is deliberately *not* set by default;
//! surfacing the switch here keeps that choice explicit and testable instead
//! of leaving a dead code path behind.

use serde::{Deserialize, Serialize};

/// Title written to the window when [`WindowConfig::set_window_title`] is
/// enabled and no other title is configured.
pub const DEFAULT_WINDOW_TITLE: &str = "Embedded Shell";

/// Construction-time options for [`crate::window::NativeWindow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// When true, the window title is set during construction. Defaults to
    /// false: the stock behavior leaves the title property absent entirely.
    pub set_window_title: bool,
    /// The title to apply when `set_window_title` is true.
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            set_window_title: false,
            title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}
