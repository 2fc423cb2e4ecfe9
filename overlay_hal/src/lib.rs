//! # Overlay HAL Library
//!
//! Overlays expose IP drivers as named members. Each member is described by
//! a device type; the driver registry maps device types to driver
//! factories, falling back to a default driver for types nobody registered.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Device type -> driver factory registration
//! - [`drivers`] - Built-in IP driver implementations
//! - [`container`] - `IpContainer` trait shared by all overlay strategies
//! - [`overlay`] - Lazily resolved overlay
//! - [`eager`] - Eagerly resolved overlay with instance binding
//! - [`declare`] - `declare_overlay!` fixed-shape overlays
//! - [`report`] - Member snapshots for tooling
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     overlay_hal (single crate)                 │
//! │  ┌─────────────┐    ┌──────────────┐    ┌──────────────────┐   │
//! │  │   IpDict    │───►│ IpContainer  │◄──►│  DriverRegistry  │   │
//! │  │ (descriptor │    │ lazy / eager │    │  device type ->  │   │
//! │  │    set)     │    │  / declared  │    │  factory         │   │
//! │  └─────────────┘    └──────┬───────┘    └──────────────────┘   │
//! │                            │                                   │
//! │                            ▼                                   │
//! │                   ┌────────────────┐                           │
//! │                   │   IpDriver     │ (Arc<dyn IpDriver>)       │
//! │                   │   trait        │                           │
//! │                   └────────────────┘                           │
//! └────────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod container;
pub mod declare;
pub mod driver_registry;
pub mod drivers;
pub mod eager;
pub mod overlay;
pub mod report;

#[doc(hidden)]
pub use overlay_common;

// Re-export key types for convenience
pub use crate::container::{IpContainer, SlotState};
pub use crate::driver_registry::{
    DriverRegistry, global_registry, register_driver, register_driver_type, resolve_driver,
};
pub use crate::drivers::{DefaultIp, GpioDriver};
pub use crate::eager::EagerOverlay;
pub use crate::overlay::Overlay;
pub use crate::report::OverlayReport;
