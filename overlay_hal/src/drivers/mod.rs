//! Built-in IP driver implementations.
//!
//! - [`default_ip`] - Fallback driver for device types without a binding
//! - [`gpio`] - AXI GPIO driver
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement `IpDriver` and `BindsTo` from `overlay_common::ip::driver`
//! 3. Add a `register_type` call to `register_builtin_drivers()`

mod default_ip;
mod gpio;

pub use default_ip::DefaultIp;
pub use gpio::GpioDriver;

use crate::driver_registry::DriverRegistry;

/// Register every built-in driver type.
///
/// Run once per registry; the process-wide registry runs it on first use.
pub fn register_builtin_drivers(registry: &mut DriverRegistry) {
    registry.register_type::<GpioDriver>();
}
