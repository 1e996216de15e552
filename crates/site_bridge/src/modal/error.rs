//! Modal lifecycle errors and statuses

use thiserror::Error;

use super::state::ModalLifecycleState;
use crate::platform::BackendError;
use crate::site::SiteError;

/// Errors reported by the modal lifecycle controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModalError {
    /// The parent surface is not attached yet; retry once it is
    #[error("parent surface is not attached yet")]
    NotReady,

    /// The modal's attachment could not be created
    #[error("modal attachment failed: {0}")]
    AttachmentFailed(#[source] SiteError),

    /// A registry operation failed
    #[error("site registry error: {0}")]
    Site(#[source] SiteError),

    /// A direct backend call failed
    #[error("{operation} failed: {source}")]
    Native {
        /// Backend operation that failed
        operation: &'static str,
        /// Backend error
        #[source]
        source: BackendError,
    },

    /// The state machine refused a transition
    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition {
        /// State before the attempted transition
        from: ModalLifecycleState,
        /// Requested state
        to: ModalLifecycleState,
    },
}

impl ModalError {
    /// Whether the caller can simply retry later
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotReady)
    }

    /// Adapter for `map_err` on direct backend calls
    pub(crate) fn native(operation: &'static str) -> impl FnOnce(BackendError) -> Self {
        move |source| Self::Native { operation, source }
    }
}

impl From<SiteError> for ModalError {
    fn from(error: SiteError) -> Self {
        match error {
            SiteError::ParentNotAttached => Self::NotReady,
            error if error.is_attachment_failure() => Self::AttachmentFailed(error),
            error => Self::Site(error),
        }
    }
}

/// Non-error outcome of a lifecycle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    /// The request moved the lifecycle; carries the resulting state
    Transitioned(ModalLifecycleState),
    /// Nothing to do; carries the state the lifecycle was already in
    AlreadyInState(ModalLifecycleState),
}

impl LifecycleStatus {
    /// State after the request
    pub const fn state(self) -> ModalLifecycleState {
        match self {
            Self::Transitioned(state) | Self::AlreadyInState(state) => state,
        }
    }

    /// Whether the request was a no-op
    pub const fn is_noop(self) -> bool {
        matches!(self, Self::AlreadyInState(_))
    }
}
