//! AXI GPIO driver.

use overlay_common::ip::descriptor::DeviceDescriptor;
use overlay_common::ip::driver::{BindsTo, IpDriver};
use std::any::Any;

/// Driver for the AXI GPIO core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpioDriver {
    descriptor: DeviceDescriptor,
}

impl IpDriver for GpioDriver {
    fn name(&self) -> &'static str {
        "axi_gpio"
    }

    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BindsTo for GpioDriver {
    const BINDS_TO: &'static [&'static str] = &["axi_gpio:2.0", "xilinx.com:ip:axi_gpio:2.0"];

    fn from_descriptor(descriptor: &DeviceDescriptor) -> Self {
        Self {
            descriptor: descriptor.clone(),
        }
    }
}
