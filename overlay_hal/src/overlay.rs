//! Lazily resolved overlay.
//!
//! Each member starts unresolved and is built through the driver registry
//! on first access. The constructed driver is cached in the member's slot,
//! so every later access returns the same instance without consulting the
//! registry again.

use crate::container::IpContainer;
use crate::driver_registry::DriverRegistry;
use overlay_common::ip::config::OverlayConfig;
use overlay_common::ip::descriptor::{DeviceDescriptor, IpDict};
use overlay_common::ip::driver::{IpDriver, OverlayError};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// One member: its descriptor and, once resolved, its driver.
#[derive(Debug)]
struct Slot {
    descriptor: DeviceDescriptor,
    driver: OnceLock<Arc<dyn IpDriver>>,
}

/// Overlay that constructs member drivers on first access.
///
/// The slot set is fixed at construction. `get` on a known member fills its
/// slot at most once, even when several threads race on the first access.
/// `get` on an unknown member fails without touching any slot.
pub struct Overlay {
    name: String,
    ip_dict: IpDict,
    registry: Arc<DriverRegistry>,
    slots: BTreeMap<String, Slot>,
}

impl Overlay {
    /// Create an overlay from a descriptor set.
    ///
    /// # Errors
    /// Returns `OverlayError::InvalidDescriptor` or
    /// `OverlayError::ReservedName` if `ip_dict` fails validation.
    pub fn new(
        name: impl Into<String>,
        ip_dict: IpDict,
        registry: Arc<DriverRegistry>,
    ) -> Result<Self, OverlayError> {
        ip_dict.validate()?;

        let slots = ip_dict
            .iter()
            .map(|descriptor| {
                let slot = Slot {
                    descriptor: descriptor.clone(),
                    driver: OnceLock::new(),
                };
                (descriptor.name.clone(), slot)
            })
            .collect();

        let name = name.into();
        debug!("Overlay '{}' created with {} members", name, ip_dict.len());

        Ok(Self {
            name,
            ip_dict,
            registry,
            slots,
        })
    }

    /// Create an overlay from a loaded overlay description.
    pub fn from_config(
        config: &OverlayConfig,
        registry: Arc<DriverRegistry>,
    ) -> Result<Self, OverlayError> {
        Self::new(config.name(), config.ip_dict(), registry)
    }

    /// Registry members are resolved through.
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Number of members whose driver has been constructed.
    pub fn resolved_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.driver.get().is_some())
            .count()
    }

    /// Resolve every member. Already resolved members are left as they are.
    pub fn resolve_all(&self) {
        for slot in self.slots.values() {
            self.resolve_slot(slot);
        }
    }

    fn resolve_slot<'a>(&'a self, slot: &'a Slot) -> &'a Arc<dyn IpDriver> {
        slot.driver.get_or_init(|| {
            let driver: Arc<dyn IpDriver> = Arc::from(self.registry.create_driver(&slot.descriptor));
            debug!(
                "Resolved member '{}' ({}) with driver '{}'",
                slot.descriptor.name,
                slot.descriptor.device_type,
                driver.name()
            );
            driver
        })
    }
}

impl IpContainer for Overlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn ip_dict(&self) -> &IpDict {
        &self.ip_dict
    }

    fn get(&self, name: &str) -> Result<&Arc<dyn IpDriver>, OverlayError> {
        let slot = self
            .slots
            .get(name)
            .ok_or_else(|| OverlayError::MemberNotFound(name.to_string()))?;
        Ok(self.resolve_slot(slot))
    }

    fn peek(&self, name: &str) -> Option<&Arc<dyn IpDriver>> {
        self.slots.get(name).and_then(|slot| slot.driver.get())
    }

    fn driver_members(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("name", &self.name)
            .field("members", &self.slots.len())
            .field("resolved", &self.resolved_count())
            .finish_non_exhaustive()
    }
}
