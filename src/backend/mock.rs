// src/backend/mock.rs

//! Recording [`DisplayBackend`] for tests. Every trait call is appended to a
//! log so tests can assert exact call counts and ordering; no display server
//! is involved.

use super::{ColormapHandle, DisplayBackend, EventInterest, VisualId, VisualInfo, WindowHandle};
use libc::c_int;
use std::cell::{Cell, RefCell};
use std::ptr;

/// One recorded backend invocation, with the arguments that matter to the
/// lifecycle contracts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    MatchVisual(VisualId),
    CreateColormap {
        screen: c_int,
    },
    CreateWindow {
        width: u32,
        height: u32,
        events: EventInterest,
    },
    RegisterDeleteProtocol(WindowHandle),
    StripDecorations(WindowHandle),
    StoreTitle(WindowHandle, String),
    MapWindow(WindowHandle),
    ConfigureSize {
        window: WindowHandle,
        width: u32,
        height: u32,
    },
    DestroyWindow(WindowHandle),
    FreeColormap(ColormapHandle),
}

pub struct MockBackend {
    calls: RefCell<Vec<BackendCall>>,
    known_visuals: Vec<VisualId>,
    fail_window_creation: Cell<bool>,
}

impl MockBackend {
    /// Handle returned for every successfully "created" window.
    pub const WINDOW: WindowHandle = 0xC0FF_EE01;
    /// Handle returned for every allocated colormap.
    pub const COLORMAP: ColormapHandle = 0x0C01;
    /// Screen every known visual claims to live on.
    pub const SCREEN: c_int = 0;

    /// A backend that resolves exactly the given visual ids.
    pub fn new(known_visuals: &[VisualId]) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            known_visuals: known_visuals.to_vec(),
            fail_window_creation: Cell::new(false),
        }
    }

    /// Makes subsequent `create_window` calls return a zero handle,
    /// simulating a resource-constrained server.
    pub fn fail_window_creation(&self) {
        self.fail_window_creation.set(true);
    }

    /// Snapshot of all recorded calls, in invocation order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: BackendCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DisplayBackend for MockBackend {
    fn match_visual(&self, visual_id: VisualId) -> Option<VisualInfo> {
        self.record(BackendCall::MatchVisual(visual_id));
        if self.known_visuals.contains(&visual_id) {
            Some(VisualInfo {
                visual: ptr::null_mut(),
                screen: Self::SCREEN,
                depth: 24,
            })
        } else {
            None
        }
    }

    fn create_colormap(&self, visual: &VisualInfo) -> ColormapHandle {
        self.record(BackendCall::CreateColormap {
            screen: visual.screen,
        });
        Self::COLORMAP
    }

    fn create_window(
        &self,
        _visual: &VisualInfo,
        _colormap: ColormapHandle,
        width: u32,
        height: u32,
        events: EventInterest,
    ) -> WindowHandle {
        self.record(BackendCall::CreateWindow {
            width,
            height,
            events,
        });
        if self.fail_window_creation.get() {
            0
        } else {
            Self::WINDOW
        }
    }

    fn register_delete_protocol(&self, window: WindowHandle) {
        self.record(BackendCall::RegisterDeleteProtocol(window));
    }

    fn strip_decorations(&self, window: WindowHandle) {
        self.record(BackendCall::StripDecorations(window));
    }

    fn store_title(&self, window: WindowHandle, title: &str) {
        self.record(BackendCall::StoreTitle(window, title.to_string()));
    }

    fn map_window(&self, window: WindowHandle) {
        self.record(BackendCall::MapWindow(window));
    }

    fn configure_size(&self, window: WindowHandle, width: u32, height: u32) {
        self.record(BackendCall::ConfigureSize {
            window,
            width,
            height,
        });
    }

    fn destroy_window(&self, window: WindowHandle) {
        self.record(BackendCall::DestroyWindow(window));
    }

    fn free_colormap(&self, colormap: ColormapHandle) {
        self.record(BackendCall::FreeColormap(colormap));
    }
}
