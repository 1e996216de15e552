//! Modal popup lifecycle
//!
//! The controller owns the single modal popup and everything that happens to
//! it: creation through the site registry, presenter configuration, input
//! blocking on the parent, close interception and ordered teardown.
//!
//! Requests come from two directions:
//! - the host UI (`request_show`, `request_close`)
//! - the platform, through [`ModalEventHandler`] (close button, visibility)
//!
//! Both paths converge on the same teardown, and the `Closing` state makes a
//! nested close request a no-op.

mod controller;
mod error;
mod handler;
mod state;

#[cfg(test)]
mod tests;

pub use controller::ModalLifecycleController;
pub use error::{LifecycleStatus, ModalError};
pub use handler::ModalEventHandler;
pub use state::{ModalLifecycle, ModalLifecycleState};
