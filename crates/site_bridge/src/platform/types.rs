//! Platform handle and event types

use std::fmt;

use bitflags::bitflags;

use crate::foundation::math::{Extent, Point};

/// Native window identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// Handle to a site attachment (child site or popup site)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentId(pub u64);

/// Handle to a content island
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{:x}", self.0)
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attachment#{:x}", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content#{:x}", self.0)
    }
}

bitflags! {
    /// How a popup window is presented
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PresenterFlags: u32 {
        /// Block input to the owner window while visible
        const MODAL = 1 << 0;
        /// Draw a window border
        const BORDER = 1 << 1;
        /// Draw a title bar with the system close button
        const TITLE_BAR = 1 << 2;
    }
}

/// Description of the visual a content island hosts
///
/// Only the size matters to the lifecycle; what gets drawn is up to the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceContent {
    /// Visual size in pixels
    pub size: Extent,
}

impl SurfaceContent {
    /// Create a content description
    pub const fn new(size: Extent) -> Self {
        Self { size }
    }
}

/// A connected popup site and the window the platform created for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupSite {
    /// Popup attachment handle
    pub attachment: AttachmentId,
    /// Window identity owned by the popup
    pub window: WindowId,
}

/// Commands exposed by the host window's buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// "Show Modal" button
    ShowModal,
    /// "Close Modal" button
    CloseModal,
}

impl CommandId {
    /// Native control identifier
    pub const fn raw(self) -> u16 {
        match self {
            Self::ShowModal => 1,
            Self::CloseModal => 2,
        }
    }

    /// Map a native control identifier back to a command
    pub const fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            1 => Some(Self::ShowModal),
            2 => Some(Self::CloseModal),
            _ => None,
        }
    }
}

/// Events delivered by the platform's message loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    /// A host button was pressed
    Command(CommandId),
    /// The user asked to close a window (title bar close, Alt+F4)
    ///
    /// Only delivered for windows with close interception enabled or for
    /// top-level windows; the host decides whether the default close runs.
    CloseRequested(WindowId),
    /// A window became visible or hidden
    VisibilityChanged {
        /// Affected window
        window: WindowId,
        /// New visibility
        visible: bool,
    },
    /// Primary pointer pressed inside a window's client area
    PointerPressed {
        /// Window that received the press
        window: WindowId,
        /// Client coordinates
        position: Point,
    },
    /// A window was destroyed
    WindowDestroyed(WindowId),
}
