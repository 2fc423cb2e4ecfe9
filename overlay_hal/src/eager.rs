//! Eagerly resolved overlay with instance-level member binding.
//!
//! Every descriptor is resolved when the overlay is built. Further members
//! can be bound onto the instance afterwards, which lets callers extend or
//! override what the descriptor set provides. Bound members exist only on
//! that instance; nothing about them is visible from the type.

use crate::container::IpContainer;
use crate::driver_registry::DriverRegistry;
use overlay_common::ip::config::OverlayConfig;
use overlay_common::ip::consts::BASE_MEMBERS;
use overlay_common::ip::descriptor::IpDict;
use overlay_common::ip::driver::{IpDriver, OverlayError};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Overlay whose members are all constructed up front.
#[derive(Debug)]
pub struct EagerOverlay {
    name: String,
    ip_dict: IpDict,
    members: BTreeMap<String, Arc<dyn IpDriver>>,
}

impl EagerOverlay {
    /// Build an overlay, constructing one driver per descriptor.
    ///
    /// # Errors
    /// Returns `OverlayError::InvalidDescriptor` or
    /// `OverlayError::ReservedName` if `ip_dict` fails validation.
    pub fn new(
        name: impl Into<String>,
        ip_dict: IpDict,
        registry: &DriverRegistry,
    ) -> Result<Self, OverlayError> {
        ip_dict.validate()?;

        let members = ip_dict
            .iter()
            .map(|descriptor| {
                let driver: Arc<dyn IpDriver> = Arc::from(registry.create_driver(descriptor));
                (descriptor.name.clone(), driver)
            })
            .collect();

        let name = name.into();
        debug!("Eager overlay '{}' built with {} members", name, ip_dict.len());

        Ok(Self {
            name,
            ip_dict,
            members,
        })
    }

    /// Build an overlay from a loaded overlay description.
    pub fn from_config(
        config: &OverlayConfig,
        registry: &DriverRegistry,
    ) -> Result<Self, OverlayError> {
        Self::new(config.name(), config.ip_dict(), registry)
    }

    /// Bind `driver` as member `name`, returning the driver it replaced.
    ///
    /// # Errors
    /// Returns `OverlayError::InvalidDescriptor` if `name` is blank and
    /// `OverlayError::ReservedName` if `name` is a base member.
    pub fn bind(
        &mut self,
        name: impl Into<String>,
        driver: Arc<dyn IpDriver>,
    ) -> Result<Option<Arc<dyn IpDriver>>, OverlayError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(OverlayError::InvalidDescriptor(format!(
                "empty member name for driver '{}'",
                driver.name()
            )));
        }
        if BASE_MEMBERS.contains(&name.as_str()) {
            return Err(OverlayError::ReservedName(name));
        }
        debug!("Bound member '{}' with driver '{}'", name, driver.name());
        Ok(self.members.insert(name, driver))
    }
}

impl IpContainer for EagerOverlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn ip_dict(&self) -> &IpDict {
        &self.ip_dict
    }

    fn get(&self, name: &str) -> Result<&Arc<dyn IpDriver>, OverlayError> {
        self.members
            .get(name)
            .ok_or_else(|| OverlayError::MemberNotFound(name.to_string()))
    }

    fn peek(&self, name: &str) -> Option<&Arc<dyn IpDriver>> {
        self.members.get(name)
    }

    fn driver_members(&self) -> Vec<&str> {
        self.members.keys().map(String::as_str).collect()
    }
}
