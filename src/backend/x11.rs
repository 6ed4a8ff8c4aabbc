// src/backend/x11.rs

//! Xlib implementation of [`DisplayBackend`].
//!
//! [`Connection`] wraps the raw `*mut xlib::Display` and is the only place in
//! the crate that performs FFI. A connection opened with [`Connection::open`]
//! is closed on drop; one adopted with [`Connection::from_raw`] is not, since
//! the host owns it and must keep it alive for as long as any window built on
//! it exists.
//!
//! A display connection is not internally synchronized. All operations on a
//! `Connection`, and on every window created through it, must happen on the
//! thread that owns it.

use super::{ColormapHandle, DisplayBackend, EventInterest, VisualId, VisualInfo, WindowHandle};
use anyhow::{anyhow, Result};
use bitflags::bitflags;
use log::{debug, info, trace, warn};
use std::ffi::CString;
use std::mem;
use std::os::unix::io::RawFd;
use std::ptr;

use libc::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong, c_void};
use x11::xlib;

bitflags! {
    /// Flag bits for the `_MOTIF_WM_HINTS` property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MotifHintFlags: c_ulong {
        const FUNCTIONS   = 1 << 0;
        const DECORATIONS = 1 << 1;
    }
}

/// Layout of the `_MOTIF_WM_HINTS` property: five 32-format (long-sized)
/// fields read by the window manager.
#[repr(C)]
struct MotifWmHints {
    flags: c_ulong,
    functions: c_ulong,
    decorations: c_ulong,
    input_mode: c_long,
    status: c_ulong,
}

const MOTIF_WM_HINTS_FIELDS: c_int = 5;

/// An open connection to an X server.
///
/// Exposes the pieces of connection state the host needs around window
/// creation: the raw display pointer (for a render backend), the default
/// screen, and the connection's file descriptor (for the host's event loop
/// to poll). The [`DisplayBackend`] impl below carries everything the window
/// lifecycle itself requires.
#[derive(Debug)]
pub struct Connection {
    display: *mut xlib::Display,
    owns_display: bool,
}

impl Connection {
    /// Opens a connection to the X server named by the `DISPLAY` environment
    /// variable. The connection is closed when the `Connection` is dropped.
    pub fn open() -> Result<Self> {
        // SAFETY: XOpenDisplay accepts a null name and returns null on
        // failure, which is checked before use.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(anyhow!(
                "failed to open X display; check DISPLAY or X server status"
            ));
        }
        info!("X display connection opened: {:p}", display);
        Ok(Self {
            display,
            owns_display: true,
        })
    }

    /// Adopts a display pointer owned by the host. The returned `Connection`
    /// will not close it on drop.
    ///
    /// # Safety
    ///
    /// `display` must be a live Xlib display pointer, and it must outlive
    /// the returned `Connection` and every window created through it.
    pub unsafe fn from_raw(display: *mut xlib::Display) -> Self {
        debug!("adopting host-owned X display: {:p}", display);
        Self {
            display,
            owns_display: false,
        }
    }

    /// Raw display pointer, for collaborators (e.g. a render backend) that
    /// need to issue their own Xlib calls. Valid only while `self` lives.
    #[inline]
    pub fn display(&self) -> *mut xlib::Display {
        self.display
    }

    /// Default screen number of the connected display.
    #[inline]
    pub fn default_screen(&self) -> c_int {
        // SAFETY: display is non-null for the lifetime of self.
        unsafe { xlib::XDefaultScreen(self.display) }
    }

    /// File descriptor of the connection, for an external event loop to
    /// monitor for pending events.
    #[inline]
    pub fn event_fd(&self) -> RawFd {
        // SAFETY: display is non-null for the lifetime of self.
        unsafe { xlib::XConnectionNumber(self.display) }
    }

    /// Flushes the request buffer to the server.
    pub fn flush(&self) {
        // SAFETY: display is non-null for the lifetime of self.
        unsafe {
            xlib::XFlush(self.display);
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if self.owns_display && !self.display.is_null() {
            info!("closing X display connection: {:p}", self.display);
            // SAFETY: the pointer came from XOpenDisplay and is closed once.
            unsafe {
                xlib::XCloseDisplay(self.display);
            }
            self.display = ptr::null_mut();
        }
    }
}

impl DisplayBackend for Connection {
    fn match_visual(&self, visual_id: VisualId) -> Option<VisualInfo> {
        // SAFETY: template is fully initialized for the VisualIDMask query;
        // the returned list is freed exactly once after copying out of it.
        unsafe {
            let mut template: xlib::XVisualInfo = mem::zeroed();
            template.visualid = visual_id;
            let mut count: c_int = 0;
            let list = xlib::XGetVisualInfo(
                self.display,
                xlib::VisualIDMask,
                &mut template,
                &mut count,
            );
            if list.is_null() {
                return None;
            }
            let resolved = if count > 0 {
                let info = *list;
                Some(VisualInfo {
                    visual: info.visual,
                    screen: info.screen,
                    depth: info.depth,
                })
            } else {
                None
            };
            xlib::XFree(list as *mut c_void);
            if let Some(ref info) = resolved {
                trace!(
                    "visual {} resolved: screen {}, depth {}",
                    visual_id,
                    info.screen,
                    info.depth
                );
            }
            resolved
        }
    }

    fn create_colormap(&self, visual: &VisualInfo) -> ColormapHandle {
        // SAFETY: visual came from XGetVisualInfo on this display and its
        // screen index is valid for it.
        unsafe {
            let root = xlib::XRootWindow(self.display, visual.screen);
            xlib::XCreateColormap(self.display, root, visual.visual, xlib::AllocNone)
        }
    }

    fn create_window(
        &self,
        visual: &VisualInfo,
        colormap: ColormapHandle,
        width: u32,
        height: u32,
        events: EventInterest,
    ) -> WindowHandle {
        // SAFETY: visual and colormap belong to this display; attributes is
        // zeroed before the fields named in the value mask are written.
        unsafe {
            let root = xlib::XRootWindow(self.display, visual.screen);
            let mut attributes: xlib::XSetWindowAttributes = mem::zeroed();
            attributes.border_pixel = 0;
            attributes.colormap = colormap;
            attributes.event_mask = events.bits();

            xlib::XCreateWindow(
                self.display,
                root,
                0, // x, at the root-window origin
                0, // y
                width as c_uint,
                height as c_uint,
                0, // border width
                visual.depth,
                xlib::InputOutput as c_uint,
                visual.visual,
                xlib::CWBorderPixel | xlib::CWColormap | xlib::CWEventMask,
                &mut attributes,
            )
        }
    }

    fn register_delete_protocol(&self, window: WindowHandle) {
        // SAFETY: window is a live window on this display; the atom array
        // outlives the XSetWMProtocols call.
        unsafe {
            let mut wm_delete_window = xlib::XInternAtom(
                self.display,
                b"WM_DELETE_WINDOW\0".as_ptr() as *const c_char,
                xlib::False,
            );
            if wm_delete_window == 0 {
                // Without the atom the window manager will destroy the
                // window outright on close instead of sending a request.
                warn!("failed to intern WM_DELETE_WINDOW; close requests will not be delivered");
                return;
            }
            xlib::XSetWMProtocols(self.display, window, &mut wm_delete_window, 1);
            debug!("WM_DELETE_WINDOW protocol registered on window {}", window);
        }
    }

    fn strip_decorations(&self, window: WindowHandle) {
        let hints = MotifWmHints {
            flags: MotifHintFlags::DECORATIONS.bits(),
            functions: 0,
            decorations: 0, // no title bar, no borders
            input_mode: 0,
            status: 0,
        };
        // SAFETY: the hints struct is repr(C) with exactly the five
        // long-sized fields the property format declares.
        unsafe {
            let hints_atom = xlib::XInternAtom(
                self.display,
                b"_MOTIF_WM_HINTS\0".as_ptr() as *const c_char,
                xlib::False,
            );
            if hints_atom == 0 {
                warn!("failed to intern _MOTIF_WM_HINTS; window will keep WM decorations");
                return;
            }
            xlib::XChangeProperty(
                self.display,
                window,
                hints_atom,
                hints_atom,
                32,
                xlib::PropModeReplace,
                &hints as *const MotifWmHints as *const c_uchar,
                MOTIF_WM_HINTS_FIELDS,
            );
            debug!("decoration hints set on window {} (decorations=0)", window);
        }
    }

    fn store_title(&self, window: WindowHandle, title: &str) {
        let title_cstr = match CString::new(title) {
            Ok(cstr) => cstr,
            Err(_) => {
                warn!("window title contains interior NUL; title not set");
                return;
            }
        };
        // SAFETY: the text property points at title_cstr, which outlives
        // the XSetWMName call; XFlush pushes the request before return.
        unsafe {
            let mut property = xlib::XTextProperty {
                value: title_cstr.as_ptr() as *mut c_uchar,
                encoding: xlib::XA_STRING,
                format: 8,
                nitems: title_cstr.as_bytes().len() as c_ulong,
            };
            xlib::XSetWMName(self.display, window, &mut property);
            xlib::XFlush(self.display);
        }
        debug!("window {} title set to '{}'", window, title);
    }

    fn map_window(&self, window: WindowHandle) {
        // SAFETY: window is a live window on this display.
        unsafe {
            xlib::XMapWindow(self.display, window);
            xlib::XFlush(self.display);
        }
        debug!("window {} mapped", window);
    }

    fn configure_size(&self, window: WindowHandle, width: u32, height: u32) {
        // SAFETY: window is a live window on this display.
        unsafe {
            xlib::XResizeWindow(self.display, window, width as c_uint, height as c_uint);
            xlib::XFlush(self.display);
        }
        debug!("resize to {}x{} requested for window {}", width, height, window);
    }

    fn destroy_window(&self, window: WindowHandle) {
        info!("destroying window {}", window);
        // SAFETY: window is a window id on this display; destroy is
        // best-effort at teardown.
        unsafe {
            xlib::XDestroyWindow(self.display, window);
            xlib::XFlush(self.display);
        }
    }

    fn free_colormap(&self, colormap: ColormapHandle) {
        // SAFETY: colormap was created on this display.
        unsafe {
            xlib::XFreeColormap(self.display, colormap);
        }
    }
}
