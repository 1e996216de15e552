//! # Site Bridge
//!
//! Modal popup lifecycle on top of a window-site bridging layer.
//!
//! A parent window gets a child-site attachment at startup. A modal popup is
//! attached to that site on demand, blocks input to the parent while shown,
//! and is torn down in a fixed order when the user closes it, either through
//! the host UI or through the platform's close button on the popup itself.
//!
//! ## Features
//!
//! - **Lifecycle State Machine**: `Absent -> Created -> Shown -> Closing -> Destroyed -> Absent`
//! - **Close Interception**: platform close on the modal runs the same ordered teardown
//! - **Backend Agnostic**: native windowing is behind [`platform::WindowingBackend`]
//! - **Headless Backend**: in-memory windowing for tests and scripted sessions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use site_bridge::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ModalTestConfig::default();
//!     let mut host = ModalTestHost::startup(HeadlessBackend::new(), &config)?;
//!
//!     host.controller_mut().request_show()?;
//!     host.controller_mut().request_close();
//!     host.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod platform;
pub mod site;
pub mod modal;
pub mod host;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ModalTestConfig, ModalWindowConfig, ParentWindowConfig},
        events::EventQueue,
        foundation::math::{Extent, Point, Rect},
        host::{HostError, HostStats, ModalTestHost},
        modal::{
            LifecycleStatus, ModalError, ModalEventHandler, ModalLifecycleController,
            ModalLifecycleState,
        },
        platform::{
            BackendError, CommandId, HeadlessBackend, NativeEvent, PresenterFlags,
            WindowId, WindowingBackend,
        },
        site::{ModalSurface, ParentSurface, SiteError, SiteRegistry, SurfaceKey},
    };
}
