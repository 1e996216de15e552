//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Integer window geometry
//! - Generational handle maps
//! - Logging setup

pub mod math;
pub mod collections;
pub mod logging;
