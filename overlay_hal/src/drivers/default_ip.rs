//! Fallback driver.
//!
//! Built for any member whose device type has no registered driver. It
//! carries the descriptor and nothing else.

use overlay_common::ip::consts::DEFAULT_DRIVER_NAME;
use overlay_common::ip::descriptor::DeviceDescriptor;
use overlay_common::ip::driver::IpDriver;
use std::any::Any;

/// Driver with no type-specific behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultIp {
    descriptor: DeviceDescriptor,
}

impl DefaultIp {
    /// Create a fallback driver for `descriptor`.
    pub fn new(descriptor: &DeviceDescriptor) -> Self {
        Self {
            descriptor: descriptor.clone(),
        }
    }
}

impl IpDriver for DefaultIp {
    fn name(&self) -> &'static str {
        DEFAULT_DRIVER_NAME
    }

    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
