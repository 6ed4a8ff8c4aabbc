// src/backend/mod.rs

//! Defines the [`DisplayBackend`] trait, the seam between the window
//! lifecycle logic and the native display layer, plus the opaque handle
//! types and the construction-time event subscription mask shared by its
//! implementations.
//!
//! Exactly one implementation talks to a real server: [`x11::Connection`].
//! The test build adds a recording implementation (`mock`) so the
//! lifecycle can be verified call-by-call without a display.

use bitflags::bitflags;
use libc::{c_int, c_long};
// Leading `::` disambiguates the crate from the submodule of the same name.
use ::x11::xlib;

pub mod x11;

#[cfg(test)]
pub mod mock;

/// Identifier selecting a pixel format / visual configuration. Chosen by the
/// host's render-backend negotiation logic; consumed during construction.
pub type VisualId = xlib::VisualID;

/// Native identifier for a created window. Zero means "no window".
pub type WindowHandle = xlib::Window;

/// Native identifier for an allocated colormap. Zero means "none held".
pub type ColormapHandle = xlib::Colormap;

/// Resolved visual data needed to create a window: the server-side visual
/// handle, the screen it belongs to, and its color depth.
#[derive(Debug, Clone, Copy)]
pub struct VisualInfo {
    /// Raw visual handle. Only dereferenced by the real Xlib backend; the
    /// mock backend carries a null pointer here.
    pub visual: *mut xlib::Visual,
    pub screen: c_int,
    pub depth: c_int,
}

bitflags! {
    /// Event categories a window subscribes to at creation time.
    ///
    /// Bit values are the Xlib mask constants, so the composed mask can be
    /// written straight into `XSetWindowAttributes.event_mask`. Whatever is
    /// omitted here is invisible to the host's event loop for the lifetime
    /// of the window; the subscription cannot be widened after creation by
    /// this shim.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventInterest: c_long {
        const EXPOSURE       = xlib::ExposureMask;
        const KEY_PRESS      = xlib::KeyPressMask;
        const KEY_RELEASE    = xlib::KeyReleaseMask;
        const BUTTON_PRESS   = xlib::ButtonPressMask;
        const BUTTON_RELEASE = xlib::ButtonReleaseMask;
        const POINTER_MOTION = xlib::PointerMotionMask;
        const ENTER_WINDOW   = xlib::EnterWindowMask;
        const LEAVE_WINDOW   = xlib::LeaveWindowMask;
        const FOCUS_CHANGE   = xlib::FocusChangeMask;
        const STRUCTURE      = xlib::StructureNotifyMask;
    }
}

/// Operations the window lifecycle needs from the native display layer.
///
/// The contract mirrors X11 semantics deliberately: creation-path operations
/// report failure through sentinel return values (a `None` visual, a zero
/// window handle), while the window-manager requests and teardown operations
/// are fire-and-forget: the underlying protocol offers no status to relay.
///
/// All operations are synchronous and must be invoked from the thread that
/// owns the underlying connection; implementations perform no internal
/// locking.
pub trait DisplayBackend {
    /// Resolves full visual information for `visual_id`, or `None` if the
    /// connection does not support such a visual.
    fn match_visual(&self, visual_id: VisualId) -> Option<VisualInfo>;

    /// Allocates a colormap for `visual` on its screen, with no
    /// pre-allocated color entries.
    fn create_colormap(&self, visual: &VisualInfo) -> ColormapHandle;

    /// Creates an InputOutput window at the root-window origin of the
    /// visual's screen, with zero border width, the visual's depth and
    /// handle, a zero border pixel, `colormap`, and `events` as the event
    /// subscription. Returns zero on failure.
    fn create_window(
        &self,
        visual: &VisualInfo,
        colormap: ColormapHandle,
        width: u32,
        height: u32,
        events: EventInterest,
    ) -> WindowHandle;

    /// Registers the `WM_DELETE_WINDOW` protocol on `window`, so the window
    /// manager sends a close *request* instead of destroying the window
    /// outright. Fire-and-forget.
    fn register_delete_protocol(&self, window: WindowHandle);

    /// Asks the window manager to omit all decorations (title bar, borders)
    /// for `window`. Advisory; a non-compliant window manager may ignore it.
    fn strip_decorations(&self, window: WindowHandle);

    /// Writes `title` as the window's name property. Fire-and-forget.
    fn store_title(&self, window: WindowHandle, title: &str);

    /// Requests that `window` become visible.
    fn map_window(&self, window: WindowHandle);

    /// Actively requests a new size for `window` from the server. This is
    /// the *active* resize path; passive size bookkeeping never reaches the
    /// backend.
    fn configure_size(&self, window: WindowHandle, width: u32, height: u32);

    /// Requests destruction of `window`. Fire-and-forget; appropriate for
    /// best-effort teardown at shutdown.
    fn destroy_window(&self, window: WindowHandle);

    /// Releases a colormap previously returned by
    /// [`DisplayBackend::create_colormap`].
    fn free_colormap(&self, colormap: ColormapHandle);
}
