// src/window.rs

//! Create/resize/destroy lifecycle of one top-level native window.
//!
//! [`NativeWindow`] performs the whole bootstrap sequence synchronously in
//! its constructor: resolve the visual, allocate a colormap, compose the
//! window attributes, create the window, register the close protocol, strip
//! window-manager decorations, and map it. Construction either fully
//! succeeds or leaves the object invalid; callers must check
//! [`NativeWindow::is_valid`] before handing the window to a render backend.
//! There is no error return; the only recovery signal is the flag plus a
//! logged diagnostic, which is the contract the embedder expects.

use crate::backend::{ColormapHandle, DisplayBackend, EventInterest, VisualId, WindowHandle};
use crate::config::WindowConfig;
use log::{debug, error, info};

/// Event categories subscribed at creation time. This is the complete set
/// the host's event loop can ever observe for the window: redraw, keyboard,
/// pointer button/motion/crossing, focus, and structural changes.
pub const WINDOW_EVENT_INTEREST: EventInterest = EventInterest::EXPOSURE
    .union(EventInterest::KEY_PRESS)
    .union(EventInterest::KEY_RELEASE)
    .union(EventInterest::BUTTON_PRESS)
    .union(EventInterest::BUTTON_RELEASE)
    .union(EventInterest::POINTER_MOTION)
    .union(EventInterest::ENTER_WINDOW)
    .union(EventInterest::LEAVE_WINDOW)
    .union(EventInterest::FOCUS_CHANGE)
    .union(EventInterest::STRUCTURE);

/// One on-screen window bound to a display connection and a chosen visual.
///
/// The window owns its window handle and colormap; it does *not* own the
/// connection, which the host must keep alive for as long as the window
/// exists. [`NativeWindow::destroy`] releases the owned handles exactly once
/// and leaves the object inert, so a second call is a no-op rather than a
/// stale-handle destroy.
#[derive(Debug)]
pub struct NativeWindow {
    handle: WindowHandle,
    colormap: ColormapHandle,
    width: u32,
    height: u32,
    valid: bool,
}

impl NativeWindow {
    /// Creates a window with the default configuration (no title set).
    ///
    /// See [`NativeWindow::with_config`] for the construction contract.
    pub fn new<B: DisplayBackend + ?Sized>(
        backend: &B,
        visual_id: VisualId,
        width: u32,
        height: u32,
    ) -> Self {
        Self::with_config(backend, visual_id, width, height, &WindowConfig::default())
    }

    /// Creates a mapped, border-less, close-button-enabled window of
    /// `width` x `height` pixels using the visual identified by `visual_id`.
    ///
    /// `width` and `height` must be greater than zero and `visual_id` must
    /// name a visual the connection supports. There are exactly two checked
    /// failure points, visual resolution and window creation, and both are
    /// terminal: the constructor logs an error and returns an invalid
    /// window, holding no native resources. Everything else (close-protocol
    /// registration, decoration stripping, the optional title) is a
    /// best-effort request with no observable failure.
    pub fn with_config<B: DisplayBackend + ?Sized>(
        backend: &B,
        visual_id: VisualId,
        width: u32,
        height: u32,
        config: &WindowConfig,
    ) -> Self {
        info!(
            "creating native window: {}x{}, visual id {}",
            width, height, visual_id
        );

        let visual = match backend.match_visual(visual_id) {
            Some(visual) => visual,
            None => {
                error!(
                    "no visual with id {} on this connection; window not created",
                    visual_id
                );
                return Self::invalid();
            }
        };

        let colormap = backend.create_colormap(&visual);

        let handle =
            backend.create_window(&visual, colormap, width, height, WINDOW_EVENT_INTEREST);
        if handle == 0 {
            error!("native window creation failed for visual id {}", visual_id);
            backend.free_colormap(colormap);
            return Self::invalid();
        }

        // The window manager sends a close *request* instead of destroying
        // the window when the user hits the close affordance.
        backend.register_delete_protocol(handle);
        backend.strip_decorations(handle);
        if config.set_window_title {
            backend.store_title(handle, &config.title);
        }
        backend.map_window(handle);

        debug!(
            "native window {} created and mapped at {}x{}",
            handle, width, height
        );
        Self {
            handle,
            colormap,
            width,
            height,
            valid: true,
        }
    }

    fn invalid() -> Self {
        Self {
            handle: 0,
            colormap: 0,
            width: 0,
            height: 0,
            valid: false,
        }
    }

    /// True only if construction fully succeeded. When false, no other
    /// accessor is meaningful and the window must not be used for rendering.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Native window handle, the render backend's drawable target. Zero
    /// until creation succeeds and again after [`NativeWindow::destroy`].
    #[inline]
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// Last-known logical width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Last-known logical height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Records externally-driven geometry: the platform already resized the
    /// native window (or decided its size), and this call updates the
    /// object's authoritative record of it. No native call is issued; to
    /// actively request a new size from the server, use
    /// [`NativeWindow::request_resize`] instead. Always succeeds, and is
    /// callable regardless of validity.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        debug!(
            "recording window geometry {}x{} (was {}x{})",
            width, height, self.width, self.height
        );
        self.width = width;
        self.height = height;
        true
    }

    /// Actively asks the server for a new window size. The stored dimensions
    /// are *not* updated here; the authoritative size is recorded via
    /// [`NativeWindow::resize`] once the platform reports the change back.
    /// No-op when no window is held.
    pub fn request_resize<B: DisplayBackend + ?Sized>(
        &self,
        backend: &B,
        width: u32,
        height: u32,
    ) {
        if self.handle == 0 {
            debug!("request_resize with no window handle; ignored");
            return;
        }
        backend.configure_size(self.handle, width, height);
    }

    /// Destroys the native window and frees its colormap, then clears both
    /// handles and the validity flag so the object is inert. Calling this
    /// again (or on a window that failed construction) issues no native
    /// calls. Best-effort: the underlying destroy has no observable failure.
    pub fn destroy<B: DisplayBackend + ?Sized>(&mut self, backend: &B) {
        if self.handle == 0 {
            debug!("destroy with no window handle; nothing to do");
            return;
        }
        backend.destroy_window(self.handle);
        if self.colormap != 0 {
            backend.free_colormap(self.colormap);
        }
        self.handle = 0;
        self.colormap = 0;
        self.valid = false;
    }
}
