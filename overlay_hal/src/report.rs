//! Member report for the `overlay_hal` tool.
//!
//! A snapshot of an overlay's members taken without resolving anything.

use crate::container::{IpContainer, SlotState};
use serde::Serialize;
use std::fmt;

/// One driver member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    /// Member name.
    pub member: String,
    /// Device type of the resolved driver, or from the descriptor set
    /// while unresolved.
    pub device_type: Option<String>,
    /// Slot state at the time of the snapshot.
    pub state: SlotState,
    /// Driver name, once resolved.
    pub driver: Option<&'static str>,
}

/// Snapshot of an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayReport {
    /// Overlay name.
    pub overlay: String,
    /// Every member, base members included.
    pub members: Vec<String>,
    /// Driver members in name order.
    pub drivers: Vec<MemberReport>,
}

impl OverlayReport {
    /// Take a snapshot of `container`.
    pub fn from_container(container: &dyn IpContainer) -> Self {
        let drivers = container
            .driver_members()
            .into_iter()
            .map(|member| {
                let driver = container.peek(member);
                MemberReport {
                    member: member.to_string(),
                    device_type: driver
                        .map(|driver| driver.device_type().to_string())
                        .or_else(|| {
                            container
                                .ip_dict()
                                .get(member)
                                .map(|descriptor| descriptor.device_type.clone())
                        }),
                    state: if driver.is_some() {
                        SlotState::Resolved
                    } else {
                        SlotState::Unresolved
                    },
                    driver: driver.map(|driver| driver.name()),
                }
            })
            .collect();

        Self {
            overlay: container.name().to_string(),
            members: container.members().into_iter().map(String::from).collect(),
            drivers,
        }
    }

    /// Number of resolved driver members.
    pub fn resolved(&self) -> usize {
        self.drivers
            .iter()
            .filter(|member| member.state == SlotState::Resolved)
            .count()
    }
}

impl fmt::Display for OverlayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "overlay '{}': {} drivers, {} resolved",
            self.overlay,
            self.drivers.len(),
            self.resolved()
        )?;
        for member in &self.drivers {
            writeln!(
                f,
                "  {:<24} {:<28} {}",
                member.member,
                member.device_type.as_deref().unwrap_or("-"),
                member.driver.unwrap_or("(unresolved)")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver_registry::DriverRegistry;
    use crate::drivers::GpioDriver;
    use crate::eager::EagerOverlay;
    use crate::overlay::Overlay;
    use overlay_common::ip::consts::DEFAULT_DRIVER_NAME;
    use overlay_common::ip::descriptor::{DeviceDescriptor, IpDict};
    use overlay_common::ip::driver::{BindsTo, IpDriver};
    use std::sync::Arc;

    fn overlay() -> Overlay {
        let ip_dict: IpDict = [
            ("gpio_btns", "axi_gpio:2.0"),
            ("my_custom_ip", "hls:my_ip:1.0"),
        ]
        .into_iter()
        .collect();
        Overlay::new("base", ip_dict, Arc::new(DriverRegistry::with_builtin_drivers())).unwrap()
    }

    #[test]
    fn test_report_does_not_resolve() {
        let overlay = overlay();
        let report = OverlayReport::from_container(&overlay);

        assert_eq!(report.resolved(), 0);
        assert_eq!(overlay.resolved_count(), 0);
        assert_eq!(report.members, vec!["ip_dict", "name", "gpio_btns", "my_custom_ip"]);
    }

    #[test]
    fn test_report_lists_resolved_drivers() {
        let overlay = overlay();
        overlay.get("my_custom_ip").unwrap();

        let report = OverlayReport::from_container(&overlay);
        assert_eq!(
            report.drivers[1],
            MemberReport {
                member: "my_custom_ip".to_string(),
                device_type: Some("hls:my_ip:1.0".to_string()),
                state: SlotState::Resolved,
                driver: Some(DEFAULT_DRIVER_NAME),
            }
        );
        assert_eq!(report.drivers[0].state, SlotState::Unresolved);

        let text = report.to_string();
        assert!(text.contains("1 resolved"));
        assert!(text.contains("(unresolved)"));
    }

    #[test]
    fn test_report_uses_bound_driver_type() {
        let mut overlay = EagerOverlay::new(
            "base",
            [("my_custom_ip", "hls:my_ip:1.0")].into_iter().collect(),
            &DriverRegistry::with_builtin_drivers(),
        )
        .unwrap();
        let gpio: Arc<dyn IpDriver> = Arc::new(GpioDriver::from_descriptor(
            &DeviceDescriptor::new("my_custom_ip", "axi_gpio:2.0"),
        ));
        overlay.bind("my_custom_ip", gpio).unwrap();

        let report = OverlayReport::from_container(&overlay);
        assert_eq!(report.drivers[0].device_type.as_deref(), Some("axi_gpio:2.0"));
        assert_eq!(report.drivers[0].driver, Some("axi_gpio"));
    }
}
