//! Device descriptors and the descriptor set (IP dict).
//!
//! A [`DeviceDescriptor`] names one addressable sub-component of an overlay
//! and the device type it implements. An [`IpDict`] is the full set of
//! descriptors a container exposes, keyed by member name.

use crate::ip::consts::BASE_MEMBERS;
use crate::ip::driver::OverlayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// One addressable sub-component of an overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Member name under which the container exposes the driver.
    pub name: String,
    /// Device-type identifier, e.g. `axi_gpio:2.0`.
    pub device_type: String,
}

impl DeviceDescriptor {
    /// Create a descriptor.
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
        }
    }

    /// Check that neither field is blank.
    pub fn validate(&self) -> Result<(), OverlayError> {
        if self.name.trim().is_empty() {
            return Err(OverlayError::InvalidDescriptor(format!(
                "empty member name for device type '{}'",
                self.device_type
            )));
        }
        if self.device_type.trim().is_empty() {
            return Err(OverlayError::InvalidDescriptor(format!(
                "member '{}' has an empty device type",
                self.name
            )));
        }
        Ok(())
    }
}

/// Descriptor set: member name -> [`DeviceDescriptor`].
///
/// Ordered by member name so enumeration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IpDict {
    entries: BTreeMap<String, DeviceDescriptor>,
}

impl IpDict {
    /// Create an empty descriptor set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the descriptor for `name`, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        device_type: impl Into<String>,
    ) -> Option<DeviceDescriptor> {
        let descriptor = DeviceDescriptor::new(name, device_type);
        self.entries.insert(descriptor.name.clone(), descriptor)
    }

    /// Look up a descriptor by member name.
    pub fn get(&self, name: &str) -> Option<&DeviceDescriptor> {
        self.entries.get(name)
    }

    /// Whether `name` is a member of this set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Member names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Descriptors in member-name order.
    pub fn iter(&self) -> btree_map::Values<'_, String, DeviceDescriptor> {
        self.entries.values()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate every descriptor and reject names that shadow a base
    /// overlay member.
    ///
    /// Returns the first error encountered.
    pub fn validate(&self) -> Result<(), OverlayError> {
        self.entries.values().try_for_each(DeviceDescriptor::validate)?;
        match self.names().find(|name| BASE_MEMBERS.contains(name)) {
            Some(name) => Err(OverlayError::ReservedName(name.to_string())),
            None => Ok(()),
        }
    }
}

impl<N, T> FromIterator<(N, T)> for IpDict
where
    N: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (name, device_type) in iter {
            dict.insert(name, device_type);
        }
        dict
    }
}

impl IntoIterator for IpDict {
    type Item = DeviceDescriptor;
    type IntoIter = btree_map::IntoValues<String, DeviceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a> IntoIterator for &'a IpDict {
    type Item = &'a DeviceDescriptor;
    type IntoIter = btree_map::Values<'a, String, DeviceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
