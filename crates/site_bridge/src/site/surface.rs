//! Surface records held by the registry

use crate::platform::{AttachmentId, ContentId, WindowId};

slotmap::new_key_type! {
    /// Registry key for a modal surface record
    ///
    /// Keys are generational: once a record is released its key never
    /// resolves again, even after the slot is reused.
    pub struct SurfaceKey;
}

/// The host window's attached surface
///
/// Created once at startup and kept for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSurface {
    /// Native window identity
    pub window: WindowId,
    /// Child-site attachment bridging the content into the window
    pub attachment: AttachmentId,
    /// Content island connected to the window
    pub content: ContentId,
    /// Whether the window accepts pointer and keyboard input
    pub input_enabled: bool,
}

/// The modal popup's attached surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSurface {
    /// Popup-site attachment
    pub attachment: AttachmentId,
    /// Content island shown in the popup
    pub content: ContentId,
    /// Window identity the platform created for the popup
    pub window: WindowId,
    /// Whether the popup is currently visible
    pub visible: bool,
    /// Whether the popup was presented as modal (blocking its parent)
    pub modal: bool,
}
