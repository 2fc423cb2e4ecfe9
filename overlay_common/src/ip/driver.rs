//! IP driver trait and error types.
//!
//! This module defines:
//! - `IpDriver` trait - Base contract every driver instance satisfies
//! - `BindsTo` trait - Declares which device types a driver type supports
//! - `OverlayError` enum - Error types for registry and container operations
//! - `DriverFactory` type alias - Shared constructor for driver instances

use crate::config::ConfigError;
use crate::ip::descriptor::DeviceDescriptor;
use std::any::Any;
use std::sync::Arc;
use thiserror::Error;

/// Error types for registry and overlay operations.
///
/// An unknown device type is deliberately absent: it resolves to the
/// default driver instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// Requested member is not part of the descriptor set.
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// Strict registration found an existing factory for the device type.
    #[error("Driver already registered for device type: {0}")]
    DuplicateRegistration(String),

    /// Descriptor name collides with a member the overlay provides itself.
    #[error("Member name is reserved by the overlay: {0}")]
    ReservedName(String),

    /// Descriptor has a blank name or device type.
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// Overlay description could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Factory producing a driver instance for one descriptor.
///
/// Reference counted so the registry can hand the same factory to every
/// container that resolves through it.
pub type DriverFactory = Arc<dyn Fn(&DeviceDescriptor) -> Box<dyn IpDriver> + Send + Sync>;

/// Base contract for IP drivers.
///
/// Containers only rely on this trait; type-specific behavior is reached
/// by downcasting a `dyn IpDriver` with `downcast_ref`.
pub trait IpDriver: Send + Sync + Any {
    /// Driver identifier (e.g., "default_ip", "axi_gpio").
    fn name(&self) -> &'static str;

    /// Descriptor this instance was constructed for.
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Upcast for downcasting to the concrete driver type.
    fn as_any(&self) -> &dyn Any;

    /// Member name the instance is exposed under.
    fn member_name(&self) -> &str {
        &self.descriptor().name
    }

    /// Device type the instance was resolved for.
    fn device_type(&self) -> &str {
        &self.descriptor().device_type
    }
}

impl dyn IpDriver {
    /// Borrow the concrete driver if it is a `T`.
    pub fn downcast_ref<T: IpDriver>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Whether the concrete driver is a `T`.
    pub fn is<T: IpDriver>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl std::fmt::Debug for dyn IpDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpDriver")
            .field("name", &self.name())
            .field("member", &self.member_name())
            .field("device_type", &self.device_type())
            .finish()
    }
}

/// Declarative binding of a driver type to device-type identifiers.
///
/// The supported identifiers are a property of the type, so they can be
/// inspected (`GpioDriver::BINDS_TO`) without touching a registry.
/// `DriverRegistry::register_type` collects them.
pub trait BindsTo: IpDriver + Sized {
    /// Device-type identifiers this driver handles.
    const BINDS_TO: &'static [&'static str];

    /// Build an instance for one descriptor.
    fn from_descriptor(descriptor: &DeviceDescriptor) -> Self;
}
