//! Windowing platform abstraction
//!
//! Everything native lives behind [`WindowingBackend`]: window identities,
//! content islands, site attachments, presenter configuration, focus and the
//! platform event queue. The lifecycle code above it never sees a native type.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │ ModalTestHost (dispatch loop)    │
//! └───────────────┬──────────────────┘
//!                 │ owns
//!   ┌─────────────▼──────────────┐
//!   │ ModalLifecycleController   │ ← ordering policy
//!   └─────┬───────────────┬──────┘
//!         │ lifetime      │ presenter / focus
//!   ┌─────▼──────┐        │
//!   │ SiteRegistry│       │
//!   └─────┬──────┘        │
//!         │               │
//!   ┌─────▼───────────────▼──────┐
//!   │ WindowingBackend trait     │ ← this module
//!   └─────────────┬──────────────┘
//!                 │ implemented by
//!         ┌───────▼─────────┐
//!         │ HeadlessBackend │ ← in-memory platform
//!         └─────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - **`types`**: handles, presenter flags, native events
//! - **`backend`**: the backend contract and its error type
//! - **`headless`**: in-memory implementation with fault injection

pub mod types;
pub mod backend;
pub mod headless;

pub use backend::{BackendError, BackendResult, WindowingBackend};
pub use headless::{BackendCall, FaultPlan, HeadlessBackend};
pub use types::{
    AttachmentId, CommandId, ContentId, NativeEvent, PopupSite, PresenterFlags, SurfaceContent,
    WindowId,
};
