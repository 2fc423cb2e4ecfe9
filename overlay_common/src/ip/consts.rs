//! Overlay constants.

/// Driver name reported by the fallback driver used for unregistered device types.
pub const DEFAULT_DRIVER_NAME: &str = "default_ip";

/// Members every overlay provides itself.
///
/// Descriptor entries may not use these names, and member enumeration
/// always lists them.
pub const BASE_MEMBERS: &[&str] = &["ip_dict", "name"];

/// Default overlay description file name.
pub const DEFAULT_OVERLAY_FILE: &str = "overlay.toml";
