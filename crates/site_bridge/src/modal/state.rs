//! Modal lifecycle state machine
//!
//! ```text
//! Absent --create--> Created --show--> Shown --close--> Closing --> Destroyed --> Absent
//!                       |                                              ^
//!                       +------------------ rollback ------------------+
//! ```
//!
//! `Destroyed` is transient: the controller collapses it back to `Absent` at
//! the end of every teardown, so callers only ever observe it mid-sequence.

use super::error::ModalError;
use crate::platform::WindowId;
use crate::site::SurfaceKey;

/// Where the modal is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalLifecycleState {
    /// No modal surface exists
    Absent,
    /// Surface allocated and attached, not yet visible
    Created,
    /// Visible and blocking input to the parent
    Shown,
    /// Teardown in progress
    Closing,
    /// Resources released; collapses to `Absent`
    Destroyed,
}

impl ModalLifecycleState {
    /// Check whether moving to `next` is a legal transition
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Absent, Self::Created)
                | (Self::Created, Self::Shown)
                | (Self::Created, Self::Destroyed)
                | (Self::Shown, Self::Closing)
                | (Self::Created, Self::Closing)
                | (Self::Closing, Self::Destroyed)
                | (Self::Destroyed, Self::Absent)
        )
    }

    /// Whether a modal surface exists in this state
    pub const fn has_surface(self) -> bool {
        matches!(self, Self::Created | Self::Shown | Self::Closing)
    }
}

/// State plus the handles of the modal that state refers to
///
/// # Invariants
///
/// - `surface` and `window` are `Some` exactly when the state has a surface.
/// - A teardown can only be started once per surface: [`ModalLifecycle::begin_close`]
///   returns the key the first time and `None` afterwards.
#[derive(Debug, Clone)]
pub struct ModalLifecycle {
    state: ModalLifecycleState,
    surface: Option<SurfaceKey>,
    window: Option<WindowId>,
    created_total: u64,
    destroyed_total: u64,
}

impl ModalLifecycle {
    /// Start in `Absent`
    pub const fn new() -> Self {
        Self {
            state: ModalLifecycleState::Absent,
            surface: None,
            window: None,
            created_total: 0,
            destroyed_total: 0,
        }
    }

    /// Current state
    pub const fn state(&self) -> ModalLifecycleState {
        self.state
    }

    /// Registry key of the current modal surface
    pub const fn surface(&self) -> Option<SurfaceKey> {
        self.surface
    }

    /// Window of the current modal surface
    pub const fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Number of modal surfaces created so far
    pub const fn created_total(&self) -> u64 {
        self.created_total
    }

    /// Number of modal surfaces destroyed so far
    pub const fn destroyed_total(&self) -> u64 {
        self.destroyed_total
    }

    /// Record a freshly attached surface: `Absent -> Created`
    pub fn begin_create(&mut self, surface: SurfaceKey, window: WindowId) -> Result<(), ModalError> {
        self.transition(ModalLifecycleState::Created)?;
        self.surface = Some(surface);
        self.window = Some(window);
        self.created_total += 1;
        Ok(())
    }

    /// `Created -> Shown`
    pub fn mark_shown(&mut self) -> Result<(), ModalError> {
        self.transition(ModalLifecycleState::Shown)
    }

    /// Enter `Closing` and hand out the surface to tear down
    ///
    /// Returns `None` when there is nothing to close or a teardown is already
    /// running, which makes nested close requests no-ops.
    pub fn begin_close(&mut self) -> Option<SurfaceKey> {
        if self.state == ModalLifecycleState::Closing {
            return None;
        }
        self.transition(ModalLifecycleState::Closing).ok()?;
        self.surface
    }

    /// Drop the surface handles: `Closing | Created -> Destroyed`
    ///
    /// Returns the released key, or `None` if there was nothing to release.
    pub fn finish_destroy(&mut self) -> Option<SurfaceKey> {
        self.transition(ModalLifecycleState::Destroyed).ok()?;
        self.window = None;
        self.destroyed_total += 1;
        self.surface.take()
    }

    /// `Destroyed -> Absent`; no effect in any other state
    pub fn collapse(&mut self) {
        if self.state == ModalLifecycleState::Destroyed {
            self.state = ModalLifecycleState::Absent;
            log::debug!("Modal lifecycle: Destroyed -> Absent");
        }
    }

    fn transition(&mut self, next: ModalLifecycleState) -> Result<(), ModalError> {
        if !self.state.can_transition_to(next) {
            return Err(ModalError::InvalidTransition { from: self.state, to: next });
        }
        log::debug!("Modal lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }
}

impl Default for ModalLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
