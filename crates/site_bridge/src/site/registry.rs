//! Site registry implementation

use thiserror::Error;

use super::surface::{ModalSurface, ParentSurface, SurfaceKey};
use crate::foundation::collections::HandleMap;
use crate::platform::{BackendError, PresenterFlags, SurfaceContent, WindowId, WindowingBackend};

/// Site registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// The windowing subsystem cannot be used at all
    #[error("windowing subsystem unavailable")]
    WindowingUnavailable,

    /// `attach_parent` was called a second time
    #[error("parent surface is already attached")]
    ParentAlreadyAttached,

    /// An operation needs the parent surface but none is attached
    #[error("parent surface is not attached")]
    ParentNotAttached,

    /// Creating or connecting an attachment failed
    #[error("attachment failed: {0}")]
    AttachmentFailed(#[source] BackendError),

    /// Key does not name a live modal surface
    #[error("unknown modal surface {0:?}")]
    UnknownSurface(SurfaceKey),

    /// Releasing native resources failed; the record was dropped anyway
    #[error("release failed: {0}")]
    ReleaseFailed(#[source] BackendError),

    /// Any other native call failed
    #[error("native call failed: {0}")]
    Native(#[source] BackendError),
}

impl SiteError {
    /// Whether this error means a new attachment could not be made
    pub fn is_attachment_failure(&self) -> bool {
        matches!(self, Self::ParentNotAttached | Self::AttachmentFailed(_))
    }
}

/// Owner of the parent and modal surface records
///
/// # Invariants
///
/// - At most one parent surface, attached once.
/// - Every modal record maps to live native resources until
///   [`SiteRegistry::detach_modal`] releases it; released keys never resolve
///   again.
/// - The registry does not limit the number of modal records. Keeping it at
///   one is the caller's job, and [`SiteRegistry::live_modal_count`] lets
///   tests check that.
#[derive(Debug, Default)]
pub struct SiteRegistry {
    parent: Option<ParentSurface>,
    modals: HandleMap<SurfaceKey, ModalSurface>,
}

impl SiteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the parent surface to the host window
    ///
    /// Creates the parent's content island and bridges it into `window`
    /// through a child site. If the bridge fails the content is closed again.
    pub fn attach_parent(
        &mut self,
        backend: &mut dyn WindowingBackend,
        window: WindowId,
        content: &SurfaceContent,
    ) -> Result<&ParentSurface, SiteError> {
        if self.parent.is_some() {
            return Err(SiteError::ParentAlreadyAttached);
        }
        if !backend.is_available() {
            return Err(SiteError::WindowingUnavailable);
        }

        let content_id = backend.create_content(content).map_err(attach_error)?;
        let attachment = match backend.create_child_site(window, content_id) {
            Ok(attachment) => attachment,
            Err(e) => {
                release_content(backend, content_id);
                return Err(attach_error(e));
            }
        };

        log::info!("Parent surface attached to {} via {}", window, attachment);
        Ok(self.parent.insert(ParentSurface {
            window,
            attachment,
            content: content_id,
            input_enabled: true,
        }))
    }

    /// The parent surface, if attached
    pub fn parent(&self) -> Option<&ParentSurface> {
        self.parent.as_ref()
    }

    /// Whether the parent surface is attached
    pub fn is_parent_attached(&self) -> bool {
        self.parent.is_some()
    }

    /// Create a popup attachment under the parent and connect `content` to it
    ///
    /// The popup starts hidden and unconfigured. On failure nothing is left
    /// behind.
    pub fn attach_modal(
        &mut self,
        backend: &mut dyn WindowingBackend,
        content: &SurfaceContent,
    ) -> Result<SurfaceKey, SiteError> {
        let parent_attachment = self
            .parent
            .as_ref()
            .map(|parent| parent.attachment)
            .ok_or(SiteError::ParentNotAttached)?;

        let content_id = backend.create_content(content).map_err(SiteError::AttachmentFailed)?;
        let popup = match backend.create_popup_site(parent_attachment, content_id) {
            Ok(popup) => popup,
            Err(e) => {
                release_content(backend, content_id);
                return Err(SiteError::AttachmentFailed(e));
            }
        };

        let key = self.modals.insert(ModalSurface {
            attachment: popup.attachment,
            content: content_id,
            window: popup.window,
            visible: false,
            modal: false,
        });
        log::debug!("Modal surface {:?} attached: {} in {}", key, popup.attachment, popup.window);
        Ok(key)
    }

    /// Apply presenter flags to a modal's window and record whether it is modal
    pub fn configure_modal(
        &mut self,
        backend: &mut dyn WindowingBackend,
        key: SurfaceKey,
        flags: PresenterFlags,
    ) -> Result<(), SiteError> {
        let surface = self.modals.get_mut(key).ok_or(SiteError::UnknownSurface(key))?;
        backend
            .configure_presenter(surface.window, flags)
            .map_err(SiteError::Native)?;
        surface.modal = flags.contains(PresenterFlags::MODAL);
        Ok(())
    }

    /// Make a modal's attachment visible
    pub fn show_modal(&mut self, backend: &mut dyn WindowingBackend, key: SurfaceKey) -> Result<(), SiteError> {
        let surface = self.modals.get_mut(key).ok_or(SiteError::UnknownSurface(key))?;
        backend.show_attachment(surface.attachment).map_err(SiteError::Native)?;
        surface.visible = true;
        Ok(())
    }

    /// Hide a modal's attachment so it stops taking input
    pub fn hide_modal(&mut self, backend: &mut dyn WindowingBackend, key: SurfaceKey) -> Result<(), SiteError> {
        let surface = self.modals.get_mut(key).ok_or(SiteError::UnknownSurface(key))?;
        backend.hide_attachment(surface.attachment).map_err(SiteError::Native)?;
        surface.visible = false;
        Ok(())
    }

    /// Release a modal's attachment, window and content, then drop its record
    ///
    /// Returns `Ok(None)` for a key that is already released. The record is
    /// removed even when a native release fails; the first failure is
    /// returned. An attachment the platform already destroyed on its own
    /// counts as released.
    pub fn detach_modal(
        &mut self,
        backend: &mut dyn WindowingBackend,
        key: SurfaceKey,
    ) -> Result<Option<ModalSurface>, SiteError> {
        let Some(surface) = self.modals.remove(key) else {
            log::debug!("Modal surface {:?} already detached", key);
            return Ok(None);
        };

        let mut first_error = None;
        match backend.close_attachment(surface.attachment) {
            Ok(()) => {}
            Err(BackendError::UnknownAttachment(_)) => {
                log::debug!("{} was already destroyed by the platform", surface.attachment);
            }
            Err(e) => first_error = Some(e),
        }
        if let Err(e) = backend.close_content(surface.content) {
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(SiteError::ReleaseFailed(e)),
            None => {
                log::debug!("Modal surface {:?} detached", key);
                Ok(Some(surface))
            }
        }
    }

    /// Enable or disable input to the parent window
    ///
    /// The recorded flag only changes when the native call succeeds.
    pub fn set_parent_input_enabled(
        &mut self,
        backend: &mut dyn WindowingBackend,
        enabled: bool,
    ) -> Result<(), SiteError> {
        let parent = self.parent.as_mut().ok_or(SiteError::ParentNotAttached)?;
        backend
            .set_input_enabled(parent.window, enabled)
            .map_err(SiteError::Native)?;
        parent.input_enabled = enabled;
        Ok(())
    }

    /// Record a visibility change reported by the platform
    pub fn record_modal_visibility(&mut self, key: SurfaceKey, visible: bool) {
        if let Some(surface) = self.modals.get_mut(key) {
            surface.visible = visible;
        }
    }

    /// A modal surface record
    pub fn modal(&self, key: SurfaceKey) -> Option<&ModalSurface> {
        self.modals.get(key)
    }

    /// Find the modal record owning a window
    pub fn modal_for_window(&self, window: WindowId) -> Option<SurfaceKey> {
        self.modals
            .iter()
            .find(|(_, surface)| surface.window == window)
            .map(|(key, _)| key)
    }

    /// Number of live modal records
    pub fn live_modal_count(&self) -> usize {
        self.modals.len()
    }
}

fn attach_error(error: BackendError) -> SiteError {
    match error {
        BackendError::Unavailable => SiteError::WindowingUnavailable,
        other => SiteError::AttachmentFailed(other),
    }
}

fn release_content(backend: &mut dyn WindowingBackend, content: crate::platform::ContentId) {
    if let Err(e) = backend.close_content(content) {
        log::warn!("Failed to release {} after a failed attachment: {}", content, e);
    }
}
