//! Prelude module for common re-exports.
//!
//! ```rust
//! use overlay_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Overlay description ────────────────────────────────────────────
pub use crate::ip::config::{IpEntry, OverlayConfig};
pub use crate::ip::consts::{BASE_MEMBERS, DEFAULT_DRIVER_NAME};
pub use crate::ip::descriptor::{DeviceDescriptor, IpDict};

// ─── Drivers ────────────────────────────────────────────────────────
pub use crate::ip::driver::{BindsTo, DriverFactory, IpDriver, OverlayError};
