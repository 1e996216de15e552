//! Modal lifecycle controller
//!
//! Sequences creation, presentation, close interception and teardown of the
//! single modal popup, on top of the [`SiteRegistry`].
//!
//! # Invariants
//!
//! - At most one modal surface exists at any time.
//! - While `Shown`, the parent window is disabled for input.
//! - After any close the parent is enabled again and has foreground focus.
//! - A show attempt ends either fully `Shown` or fully `Absent`.
//!
//! # Teardown order
//!
//! 1. hide the popup so it stops taking input
//! 2. release its attachment, window and content
//! 3. drop the surface record (`Destroyed`)
//! 4. re-enable the parent
//! 5. give the parent foreground focus
//!
//! Native resources are gone before the parent becomes interactive again, so
//! the parent never takes input while a half-destroyed popup still holds the
//! input grab. Failures in any step are logged and the sequence carries on.

use super::error::{LifecycleStatus, ModalError};
use super::handler::ModalEventHandler;
use super::state::{ModalLifecycle, ModalLifecycleState};
use crate::config::ModalWindowConfig;
use crate::platform::{SurfaceContent, WindowId, WindowingBackend};
use crate::site::{ModalSurface, ParentSurface, SiteError, SiteRegistry, SurfaceKey};

/// Drives the modal popup through its lifecycle
///
/// Owns the backend, the site registry and the lifecycle state. The host
/// constructs one at startup and hands `&mut` access to its event handlers.
pub struct ModalLifecycleController<B: WindowingBackend> {
    backend: B,
    registry: SiteRegistry,
    lifecycle: ModalLifecycle,
    modal_config: ModalWindowConfig,
}

impl<B: WindowingBackend> ModalLifecycleController<B> {
    /// Create a controller with no parent attached yet
    pub fn new(backend: B, modal_config: ModalWindowConfig) -> Self {
        Self {
            backend,
            registry: SiteRegistry::new(),
            lifecycle: ModalLifecycle::new(),
            modal_config,
        }
    }

    /// Attach the parent surface to the host window
    ///
    /// Called once at startup. Until it succeeds, [`Self::request_show`]
    /// reports [`ModalError::NotReady`].
    pub fn attach_parent(
        &mut self,
        window: WindowId,
        content: &SurfaceContent,
    ) -> Result<&ParentSurface, ModalError> {
        self.registry
            .attach_parent(&mut self.backend, window, content)
            .map_err(ModalError::Site)
    }

    /// Show the modal, creating it if needed
    ///
    /// Returns [`LifecycleStatus::AlreadyInState`] when a modal already
    /// exists. Fails with [`ModalError::NotReady`] before the parent is
    /// attached, without touching any native resource.
    pub fn request_show(&mut self) -> Result<LifecycleStatus, ModalError> {
        let state = self.lifecycle.state();
        if state.has_surface() {
            log::debug!("Show requested while modal is {:?}; nothing to do", state);
            return Ok(LifecycleStatus::AlreadyInState(state));
        }
        if !self.registry.is_parent_attached() {
            log::warn!("Show requested before the parent surface is attached");
            return Err(ModalError::NotReady);
        }

        let content = SurfaceContent::new(self.modal_config.size());
        let key = self.registry.attach_modal(&mut self.backend, &content).map_err(|e| {
            log::error!("Modal attachment failed: {}", e);
            ModalError::from(e)
        })?;
        let Some(window) = self.registry.modal(key).map(|surface| surface.window) else {
            return Err(ModalError::Site(SiteError::UnknownSurface(key)));
        };

        if let Err(e) = self.lifecycle.begin_create(key, window) {
            log::error!("Modal lifecycle refused creation: {}", e);
            self.release_surface(key);
            return Err(e);
        }

        if let Err(e) = self.present(key, window) {
            log::error!("Presenting modal failed, rolling back: {}", e);
            self.rollback(key);
            return Err(e);
        }

        self.lifecycle.mark_shown()?;
        log::info!("Modal shown in {}", window);
        Ok(LifecycleStatus::Transitioned(ModalLifecycleState::Shown))
    }

    /// Close the modal if one exists
    ///
    /// Safe to call at any time, including from the close-intercept path and
    /// at shutdown. Never fails: teardown errors are logged and the parent is
    /// restored regardless.
    pub fn request_close(&mut self) -> LifecycleStatus {
        let Some(key) = self.lifecycle.begin_close() else {
            let state = self.lifecycle.state();
            log::debug!("Close requested while modal is {:?}; nothing to do", state);
            return LifecycleStatus::AlreadyInState(state);
        };

        log::info!("Tearing down modal");

        log::debug!("Step 1: hiding modal");
        if let Err(e) = self.registry.hide_modal(&mut self.backend, key) {
            log::warn!("Hiding modal failed: {}", e);
        }

        log::debug!("Step 2: releasing attachment, window and content");
        self.release_surface(key);

        log::debug!("Step 3: dropping modal record");
        self.lifecycle.finish_destroy();

        log::debug!("Step 4-5: re-enabling parent and restoring focus");
        self.restore_parent();

        self.lifecycle.collapse();
        log::info!("Modal fully destroyed");
        LifecycleStatus::Transitioned(self.lifecycle.state())
    }

    /// Tear down any modal before the host goes away
    pub fn shutdown(&mut self) -> LifecycleStatus {
        log::debug!("Controller shutdown");
        self.request_close()
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModalLifecycleState {
        self.lifecycle.state()
    }

    /// Lifecycle details (handles and counters)
    pub fn lifecycle(&self) -> &ModalLifecycle {
        &self.lifecycle
    }

    /// The parent surface, once attached
    pub fn parent(&self) -> Option<&ParentSurface> {
        self.registry.parent()
    }

    /// The current modal surface, if any
    pub fn modal_surface(&self) -> Option<&ModalSurface> {
        self.lifecycle.surface().and_then(|key| self.registry.modal(key))
    }

    /// Whether `window` is the current modal's window
    pub fn owns_window(&self, window: WindowId) -> bool {
        self.lifecycle.window() == Some(window)
    }

    /// The site registry
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// The windowing backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the windowing backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Configure, position and show a freshly created modal
    fn present(&mut self, key: SurfaceKey, window: WindowId) -> Result<(), ModalError> {
        let parent_window = self.registry.parent().map(|p| p.window).ok_or(ModalError::NotReady)?;

        self.registry
            .configure_modal(&mut self.backend, key, self.modal_config.presenter_flags())?;
        self.backend
            .set_title(window, &self.modal_config.title)
            .map_err(ModalError::native("set_title"))?;
        self.backend
            .set_close_interception(window, true)
            .map_err(ModalError::native("set_close_interception"))?;

        let size = self.modal_config.size();
        self.backend
            .resize_client(window, size)
            .map_err(ModalError::native("resize_client"))?;
        let parent_rect = self
            .backend
            .window_rect(parent_window)
            .map_err(ModalError::native("window_rect"))?;
        let origin = parent_rect.centered_origin(size);
        self.backend
            .move_window(window, origin)
            .map_err(ModalError::native("move_window"))?;
        log::debug!("Modal {} created and positioned at ({}, {})", window, origin.x, origin.y);

        self.registry.set_parent_input_enabled(&mut self.backend, false)?;
        self.registry.show_modal(&mut self.backend, key)?;

        // Attaching to the parent's site does not move focus by itself
        self.backend
            .set_foreground(window)
            .map_err(ModalError::native("set_foreground"))?;
        Ok(())
    }

    /// Undo a partially presented modal and return to `Absent`
    fn rollback(&mut self, key: SurfaceKey) {
        self.release_surface(key);
        self.lifecycle.finish_destroy();
        self.lifecycle.collapse();
        self.restore_parent();
    }

    fn release_surface(&mut self, key: SurfaceKey) {
        match self.registry.detach_modal(&mut self.backend, key) {
            Ok(Some(surface)) => log::debug!("Released {} and {}", surface.attachment, surface.window),
            Ok(None) => log::debug!("Modal surface {:?} was already released", key),
            Err(e) => log::error!("Releasing modal surface failed: {}", e),
        }
    }

    fn restore_parent(&mut self) {
        if let Err(e) = self.registry.set_parent_input_enabled(&mut self.backend, true) {
            log::error!("Re-enabling parent window failed: {}", e);
        }
        if let Some(window) = self.registry.parent().map(|p| p.window) {
            match self.backend.set_foreground(window) {
                Ok(()) => log::debug!("Parent window {} re-enabled and focused", window),
                Err(e) => log::error!("Restoring focus to parent failed: {}", e),
            }
        }
    }
}

impl<B: WindowingBackend> ModalEventHandler for ModalLifecycleController<B> {
    fn on_close_requested(&mut self, window: WindowId) -> bool {
        if !self.owns_window(window) {
            return false;
        }
        if self.lifecycle.state() == ModalLifecycleState::Closing {
            log::debug!("Close request for {} during teardown suppressed", window);
            return true;
        }

        log::info!("Modal close button pressed; suppressing default close");
        self.request_close();
        true
    }

    fn on_visibility_changed(&mut self, window: WindowId, is_visible: bool) {
        if !self.owns_window(window) {
            log::trace!("Visibility change for stale window {} ignored", window);
            return;
        }
        if let Some(key) = self.lifecycle.surface() {
            self.registry.record_modal_visibility(key, is_visible);
        }
        if !is_visible && self.lifecycle.state() == ModalLifecycleState::Shown {
            log::info!("Modal window became invisible");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::logging;
    use crate::foundation::math::{Extent, Point};
    use crate::platform::{BackendCall, HeadlessBackend, PresenterFlags};

    fn controller() -> ModalLifecycleController<HeadlessBackend> {
        logging::init_for_tests();
        let mut backend = HeadlessBackend::new();
        let window = backend.create_window("host", Extent::new(600, 400)).unwrap();
        let mut controller = ModalLifecycleController::new(backend, ModalWindowConfig::default());
        controller
            .attach_parent(window, &SurfaceContent::new(Extent::new(800, 600)))
            .unwrap();
        controller
    }

    fn parent_window(controller: &ModalLifecycleController<HeadlessBackend>) -> WindowId {
        controller.parent().unwrap().window
    }

    #[test]
    fn test_show_configures_and_centers_modal() {
        let mut controller = controller();

        let status = controller.request_show().unwrap();
        assert_eq!(status, LifecycleStatus::Transitioned(ModalLifecycleState::Shown));

        let window = controller.modal_surface().unwrap().window;
        let backend = controller.backend();
        assert_eq!(
            backend.presenter(window),
            Some(PresenterFlags::MODAL | PresenterFlags::BORDER | PresenterFlags::TITLE_BAR)
        );
        assert_eq!(backend.title(window), Some("Modal Test Window - Hello from Modal!"));
        assert!(backend.intercepts_close(window));
        // Host window sits at (100, 100) with size 600x400
        assert_eq!(
            backend.window_rect(window).unwrap().origin,
            Point::new(100 + (600 - 400) / 2, 100 + (400 - 300) / 2)
        );
        assert_eq!(backend.foreground(), Some(window));
        assert!(!backend.is_input_enabled(parent_window(&controller)));
        assert!(!controller.parent().unwrap().input_enabled);
    }

    #[test]
    fn test_parent_disabled_before_modal_becomes_visible() {
        let mut controller = controller();
        let parent = parent_window(&controller);
        controller.backend_mut().clear_calls();

        controller.request_show().unwrap();

        let calls = controller.backend().calls();
        let disable = calls
            .iter()
            .position(|c| *c == BackendCall::SetInputEnabled(parent, false))
            .unwrap();
        let show = calls
            .iter()
            .position(|c| matches!(c, BackendCall::ShowAttachment(_)))
            .unwrap();
        let focus = calls
            .iter()
            .position(|c| matches!(c, BackendCall::SetForeground(w) if *w != parent))
            .unwrap();
        assert!(disable < show);
        assert!(show < focus);
    }

    #[test]
    fn test_teardown_order() {
        let mut controller = controller();
        let parent = parent_window(&controller);
        controller.request_show().unwrap();
        let surface = controller.modal_surface().unwrap().clone();
        controller.backend_mut().clear_calls();

        controller.request_close();

        assert_eq!(
            controller.backend().calls(),
            &[
                BackendCall::HideAttachment(surface.attachment),
                BackendCall::CloseAttachment(surface.attachment),
                BackendCall::CloseContent(surface.content),
                BackendCall::SetInputEnabled(parent, true),
                BackendCall::SetForeground(parent),
            ]
        );
    }

    #[test]
    fn test_close_request_for_modal_is_suppressed_and_tears_down() {
        let mut controller = controller();
        controller.request_show().unwrap();
        let window = controller.modal_surface().unwrap().window;

        assert!(controller.on_close_requested(window));

        assert_eq!(controller.state(), ModalLifecycleState::Absent);
        assert!(!controller.backend().window_exists(window));
        assert_eq!(controller.backend().foreground(), Some(parent_window(&controller)));
    }

    #[test]
    fn test_close_request_for_other_window_not_suppressed() {
        let mut controller = controller();
        controller.request_show().unwrap();
        let parent = parent_window(&controller);

        assert!(!controller.on_close_requested(parent));
        assert!(!controller.on_close_requested(WindowId(u64::MAX)));
        assert_eq!(controller.state(), ModalLifecycleState::Shown);
    }

    #[test]
    fn test_close_request_during_teardown_runs_nothing() {
        let mut controller = controller();
        controller.request_show().unwrap();
        let window = controller.modal_surface().unwrap().window;

        // Re-entry from inside a teardown: the lifecycle is already Closing
        assert!(controller.lifecycle.begin_close().is_some());
        controller.backend_mut().clear_calls();

        assert!(controller.on_close_requested(window));
        assert!(controller.backend().calls().is_empty());
        assert_eq!(controller.state(), ModalLifecycleState::Closing);
        assert_eq!(controller.request_close(), LifecycleStatus::AlreadyInState(ModalLifecycleState::Closing));
    }

    #[test]
    fn test_visibility_changes_are_recorded() {
        let mut controller = controller();
        controller.request_show().unwrap();
        let window = controller.modal_surface().unwrap().window;

        controller.on_visibility_changed(window, false);
        assert!(!controller.modal_surface().unwrap().visible);
        assert_eq!(controller.state(), ModalLifecycleState::Shown);

        controller.on_visibility_changed(window, true);
        assert!(controller.modal_surface().unwrap().visible);

        // Stale windows are ignored
        controller.on_visibility_changed(WindowId(u64::MAX), false);
        assert!(controller.modal_surface().unwrap().visible);
    }

    #[test]
    fn test_presenter_failure_rolls_back() {
        let mut controller = controller();
        controller.backend_mut().faults_mut().fail_presenter = true;

        let result = controller.request_show();

        assert!(matches!(result, Err(ModalError::Site(SiteError::Native(_)))));
        assert_eq!(controller.state(), ModalLifecycleState::Absent);
        assert_eq!(controller.registry().live_modal_count(), 0);
        assert_eq!(controller.backend().live_popup_count(), 0);
        assert!(controller.parent().unwrap().input_enabled);

        controller.backend_mut().faults_mut().fail_presenter = false;
        assert!(controller.request_show().is_ok());
    }

    #[test]
    fn test_focus_failure_rolls_back_and_reenables_parent() {
        let mut controller = controller();
        let parent = parent_window(&controller);
        controller.backend_mut().faults_mut().fail_set_foreground = true;

        let result = controller.request_show();

        assert!(matches!(result, Err(ModalError::Native { operation: "set_foreground", .. })));
        assert_eq!(controller.state(), ModalLifecycleState::Absent);
        assert!(controller.backend().is_input_enabled(parent));
        assert_eq!(controller.backend().live_popup_count(), 0);
    }

    #[test]
    fn test_teardown_failure_still_restores_parent() {
        let mut controller = controller();
        let parent = parent_window(&controller);
        controller.request_show().unwrap();
        controller.backend_mut().faults_mut().fail_close_attachment = true;

        let status = controller.request_close();

        assert_eq!(status, LifecycleStatus::Transitioned(ModalLifecycleState::Absent));
        assert_eq!(controller.registry().live_modal_count(), 0);
        assert!(controller.parent().unwrap().input_enabled);
        assert!(controller.backend().is_input_enabled(parent));
        assert_eq!(controller.backend().foreground(), Some(parent));
    }

    #[test]
    fn test_untitled_modal_presenter() {
        logging::init_for_tests();
        let mut backend = HeadlessBackend::new();
        let host = backend.create_window("host", Extent::new(600, 400)).unwrap();
        let config = ModalWindowConfig {
            bordered: false,
            titled: false,
            ..ModalWindowConfig::default()
        };
        let mut controller = ModalLifecycleController::new(backend, config);
        controller
            .attach_parent(host, &SurfaceContent::new(Extent::new(800, 600)))
            .unwrap();

        controller.request_show().unwrap();

        let window = controller.modal_surface().unwrap().window;
        assert_eq!(controller.backend().presenter(window), Some(PresenterFlags::MODAL));
        assert!(controller.modal_surface().unwrap().modal);
    }
}
