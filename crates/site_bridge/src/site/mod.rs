//! Site registry
//!
//! Thin ownership layer between logical surfaces and the platform's site
//! attachments. The registry is the only code that creates or releases native
//! surface resources (content islands, attachments, popup windows). It holds
//! no lifecycle policy: no retries, no ordering decisions, and it never reads
//! or writes the modal lifecycle state.

mod registry;
mod surface;

pub use registry::{SiteError, SiteRegistry};
pub use surface::{ModalSurface, ParentSurface, SurfaceKey};
