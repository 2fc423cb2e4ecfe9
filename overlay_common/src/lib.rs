//! Overlay Common Library
//!
//! Shared types for binding IP drivers to the members of an overlay:
//! device descriptors, the driver trait, error types and configuration
//! loading.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`ip`] - Device descriptors, IP driver trait and overlay description
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use overlay_common::prelude::*;
//!
//! let mut ip_dict = IpDict::new();
//! ip_dict.insert("gpio_btns", "axi_gpio:2.0");
//! assert!(ip_dict.contains("gpio_btns"));
//! ```

pub mod config;
pub mod ip;
pub mod prelude;
