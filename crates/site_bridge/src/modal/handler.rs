//! Platform callback contract for the modal window

use crate::platform::WindowId;

/// Receives platform notifications about windows the host dispatches
///
/// The host's dispatch loop calls these for every close request and
/// visibility change it pumps. Implementations decide whether the window is
/// theirs.
pub trait ModalEventHandler {
    /// The user asked to close `window`
    ///
    /// Return `true` to suppress the platform's default close. An
    /// implementation that suppresses it owns the teardown and must run it
    /// before returning.
    fn on_close_requested(&mut self, window: WindowId) -> bool;

    /// `window` was shown or hidden
    fn on_visibility_changed(&mut self, window: WindowId, is_visible: bool);
}
