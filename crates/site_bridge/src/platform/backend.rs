//! Backend-agnostic windowing contract
//!
//! This module defines the trait every windowing backend implements. It covers
//! exactly what the modal lifecycle needs from the platform and nothing more.
//!
//! # Design Philosophy
//! - **Handles only**: backends hand out opaque ids, never native objects
//! - **Synchronous**: every call completes before it returns; events raised by
//!   a call are queued and come back through [`WindowingBackend::poll_events`]
//! - **No policy**: ordering, rollback and retry belong to the caller
//!
//! # Thread Safety
//! Not `Send`. Window operations happen on the UI thread that owns the
//! message loop.

use thiserror::Error;

use super::types::{
    AttachmentId, ContentId, NativeEvent, PopupSite, PresenterFlags, SurfaceContent, WindowId,
};
use crate::foundation::math::{Extent, Point, Rect};

/// Windowing backend errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The windowing subsystem is not initialized or not present
    #[error("windowing subsystem unavailable")]
    Unavailable,

    /// Window id does not name a live window
    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),

    /// Attachment id does not name a live attachment
    #[error("unknown attachment: {0}")]
    UnknownAttachment(AttachmentId),

    /// Content id does not name a live content island
    #[error("unknown content: {0}")]
    UnknownContent(ContentId),

    /// A native call reported failure
    #[error("{operation} failed: {reason}")]
    NativeCallFailed {
        /// Name of the failing operation
        operation: &'static str,
        /// Platform-provided detail
        reason: String,
    },
}

/// Result type for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// Windowing operations the modal lifecycle depends on
pub trait WindowingBackend {
    /// Check whether the windowing subsystem can be used
    fn is_available(&self) -> bool;

    /// Create a top-level window (the host window)
    fn create_window(&mut self, title: &str, size: Extent) -> BackendResult<WindowId>;

    /// Destroy a window (the platform default close action)
    fn destroy_window(&mut self, window: WindowId) -> BackendResult<()>;

    /// Check whether a window id is still live
    fn window_exists(&self, window: WindowId) -> bool;

    /// Create a content island hosting a visual of the given size
    fn create_content(&mut self, content: &SurfaceContent) -> BackendResult<ContentId>;

    /// Close a content island
    fn close_content(&mut self, content: ContentId) -> BackendResult<()>;

    /// Bridge a content island into an existing window
    fn create_child_site(&mut self, window: WindowId, content: ContentId) -> BackendResult<AttachmentId>;

    /// Create a popup site parented to `parent` and connect `content` to it
    ///
    /// The platform creates a new (hidden) window identity for the popup.
    fn create_popup_site(&mut self, parent: AttachmentId, content: ContentId) -> BackendResult<PopupSite>;

    /// Close an attachment; a popup attachment destroys its window
    fn close_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()>;

    /// Make an attachment visible
    fn show_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()>;

    /// Hide an attachment
    fn hide_attachment(&mut self, attachment: AttachmentId) -> BackendResult<()>;

    /// Apply presenter flags (modal, border, title bar) to a window
    fn configure_presenter(&mut self, window: WindowId, flags: PresenterFlags) -> BackendResult<()>;

    /// Set the title bar text
    fn set_title(&mut self, window: WindowId, title: &str) -> BackendResult<()>;

    /// Resize the client area
    fn resize_client(&mut self, window: WindowId, size: Extent) -> BackendResult<()>;

    /// Move a window's top-left corner to a screen position
    fn move_window(&mut self, window: WindowId, position: Point) -> BackendResult<()>;

    /// Outer bounds of a window in screen coordinates
    fn window_rect(&self, window: WindowId) -> BackendResult<Rect>;

    /// Route close requests for `window` to the event queue instead of
    /// destroying it
    fn set_close_interception(&mut self, window: WindowId, intercept: bool) -> BackendResult<()>;

    /// Enable or disable pointer and keyboard input to a window
    fn set_input_enabled(&mut self, window: WindowId, enabled: bool) -> BackendResult<()>;

    /// Bring a window to the foreground and give it keyboard focus
    fn set_foreground(&mut self, window: WindowId) -> BackendResult<()>;

    /// Take the events raised since the last poll
    fn poll_events(&mut self) -> Vec<NativeEvent>;
}
