//! Host dispatch loop
//!
//! Owns the modal controller and routes native events to it: the two UI
//! buttons, close requests, visibility changes, pointer presses on the parent
//! and destruction of the parent window.
//!
//! ```text
//! backend.poll_events() --> EventQueue --> dispatch --> ModalLifecycleController
//!                               ^                              |
//!                      send/post (scripts)                     v
//!                                                      SiteRegistry / backend
//! ```

use thiserror::Error;

use crate::config::{ConfigError, ModalTestConfig};
use crate::events::EventQueue;
use crate::modal::{ModalError, ModalEventHandler, ModalLifecycleController, ModalLifecycleState};
use crate::platform::{BackendError, CommandId, NativeEvent, SurfaceContent, WindowId, WindowingBackend};

/// Host startup errors
#[derive(Error, Debug)]
pub enum HostError {
    /// Configuration did not validate
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The parent window could not be created
    #[error("failed to create parent window: {0}")]
    Window(#[from] BackendError),

    /// The parent surface could not be attached
    #[error("failed to attach parent surface: {0}")]
    Startup(#[from] ModalError),
}

/// Counters collected by the dispatch loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    /// Show requests that produced a new modal
    pub shows: u32,
    /// Teardowns run, from either close path
    pub closes: u32,
    /// Show requests that were a no-op or failed
    pub rejected_shows: u32,
    /// Pointer presses the parent received
    pub responsive_clicks: u32,
}

/// Parent window, modal controller and dispatch queue
pub struct ModalTestHost<B: WindowingBackend> {
    controller: ModalLifecycleController<B>,
    queue: EventQueue<NativeEvent>,
    parent_window: WindowId,
    running: bool,
    stats: HostStats,
}

impl<B: WindowingBackend> ModalTestHost<B> {
    /// Create the parent window and attach its surface
    pub fn startup(mut backend: B, config: &ModalTestConfig) -> Result<Self, HostError> {
        config.validate()?;
        log::info!("Starting modal test host...");

        let parent_window = backend.create_window(&config.parent.title, config.parent.size())?;
        let mut controller = ModalLifecycleController::new(backend, config.modal.clone());
        controller.attach_parent(parent_window, &SurfaceContent::new(config.parent.content_size()))?;

        log::info!("Parent window {} ready", parent_window);
        Ok(Self {
            controller,
            queue: EventQueue::new(),
            parent_window,
            running: true,
            stats: HostStats::default(),
        })
    }

    /// The modal controller
    pub fn controller(&self) -> &ModalLifecycleController<B> {
        &self.controller
    }

    /// Mutable access to the modal controller
    pub fn controller_mut(&mut self) -> &mut ModalLifecycleController<B> {
        &mut self.controller
    }

    /// The windowing backend
    pub fn backend(&self) -> &B {
        self.controller.backend()
    }

    /// Mutable access to the windowing backend
    pub fn backend_mut(&mut self) -> &mut B {
        self.controller.backend_mut()
    }

    /// The parent window
    pub fn parent_window(&self) -> WindowId {
        self.parent_window
    }

    /// Current dispatch tick
    pub fn tick(&self) -> u64 {
        self.queue.tick()
    }

    /// Whether the loop should keep pumping
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Dispatch counters so far
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Queue an event for the next pump
    pub fn send(&mut self, event: NativeEvent) {
        self.queue.send(event);
    }

    /// Queue an event for delivery at `tick`
    pub fn post(&mut self, tick: u64, event: NativeEvent) {
        self.queue.post(tick, event);
    }

    /// Run one iteration of the dispatch loop
    ///
    /// Collects pending native events, advances the tick and dispatches
    /// everything due. Returns whether the host is still running.
    pub fn pump(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let native = self.controller.backend_mut().poll_events();
        self.queue.extend(native);
        self.queue.advance(self.queue.tick() + 1);

        for event in self.queue.drain_due() {
            if !self.running {
                log::trace!("Dropping {:?} after shutdown", event);
                continue;
            }
            self.dispatch(event);
        }
        self.running
    }

    /// Close any modal and stop the loop
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.controller.state().has_surface() {
            self.stats.closes += 1;
        }
        self.controller.shutdown();
        self.queue.clear();
        if self.running {
            log::info!("Modal test host stopped");
        }
        self.running = false;
    }

    fn dispatch(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::Command(CommandId::ShowModal) => self.show_modal(),
            NativeEvent::Command(CommandId::CloseModal) => {
                log::info!("Close Modal button clicked");
                self.close_modal();
            }
            NativeEvent::CloseRequested(window) => self.close_requested(window),
            NativeEvent::VisibilityChanged { window, visible } => {
                self.controller.on_visibility_changed(window, visible);
            }
            NativeEvent::PointerPressed { window, position } => {
                if window == self.parent_window {
                    self.stats.responsive_clicks += 1;
                    log::info!(
                        "Parent window is responsive (click at {}, {})",
                        position.x,
                        position.y
                    );
                }
            }
            NativeEvent::WindowDestroyed(window) => self.window_destroyed(window),
        }
    }

    fn show_modal(&mut self) {
        log::info!("Show Modal button clicked");
        match self.controller.request_show() {
            Ok(status) if status.is_noop() => {
                self.stats.rejected_shows += 1;
                log::warn!("Modal already open ({:?})", status.state());
            }
            Ok(_) => self.stats.shows += 1,
            Err(e) if e.is_recoverable() => {
                self.stats.rejected_shows += 1;
                log::warn!("Cannot show modal yet: {}", e);
            }
            Err(e) => {
                self.stats.rejected_shows += 1;
                log::error!("Failed to show modal: {}", e);
            }
        }
    }

    fn close_modal(&mut self) {
        if !self.controller.request_close().is_noop() {
            self.stats.closes += 1;
        }
    }

    fn close_requested(&mut self, window: WindowId) {
        let had_modal = self.controller.state().has_surface();
        if self.controller.on_close_requested(window) {
            if had_modal && self.controller.state() == ModalLifecycleState::Absent {
                self.stats.closes += 1;
            }
            return;
        }

        if window == self.parent_window {
            // Tear the modal down while the parent can still take focus back
            log::info!("Parent window close requested");
            self.close_modal();
        }
        if let Err(e) = self.controller.backend_mut().destroy_window(window) {
            log::warn!("Default close of {} failed: {}", window, e);
        }
    }

    fn window_destroyed(&mut self, window: WindowId) {
        if window == self.parent_window {
            log::info!("Parent window destroyed");
            self.close_modal();
            self.running = false;
            self.queue.clear();
        } else if self.controller.owns_window(window) {
            log::warn!("Modal window {} destroyed by the platform", window);
            self.close_modal();
        } else {
            log::trace!("Ignoring destruction of {}", window);
        }
    }
}
