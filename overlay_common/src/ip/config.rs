//! Overlay description loaded from TOML.
//!
//! The description is produced by an external metadata tool; this module
//! only reads the member name -> device type table out of it.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! service_name = "base"
//!
//! [ip.gpio_btns]
//! type = "axi_gpio:2.0"
//!
//! [ip.my_custom_ip]
//! type = "hls:my_ip:1.0"
//! ```

use crate::config::{ConfigError, ConfigLoader, SharedConfig};
use crate::ip::descriptor::IpDict;
use crate::ip::driver::OverlayError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One `[ip.<name>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IpEntry {
    /// Device-type identifier.
    #[serde(rename = "type")]
    pub device_type: String,
}

/// Overlay description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    /// Common fields; `service_name` doubles as the overlay name.
    pub shared: SharedConfig,

    /// Member name -> IP entry.
    #[serde(default)]
    pub ip: BTreeMap<String, IpEntry>,
}

impl OverlayConfig {
    /// Load and validate an overlay description.
    pub fn load_validated(path: &Path) -> Result<Self, OverlayError> {
        let config = Self::load(path)?;
        config.validate()?;
        debug!(
            "Loaded overlay '{}' with {} IP entries from {}",
            config.shared.service_name,
            config.ip.len(),
            path.display()
        );
        Ok(config)
    }

    /// Validate the description.
    ///
    /// # Validation Rules
    /// 1. `shared.service_name` is not blank
    /// 2. No member name or device type is blank
    /// 3. No member name shadows a base overlay member
    pub fn validate(&self) -> Result<(), OverlayError> {
        self.shared.validate()?;
        self.ip_dict().validate()
    }

    /// Descriptor set built from the `[ip]` tables.
    pub fn ip_dict(&self) -> IpDict {
        self.ip
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.device_type.as_str()))
            .collect()
    }

    /// Overlay name.
    pub fn name(&self) -> &str {
        &self.shared.service_name
    }
}

impl TryFrom<&str> for OverlayConfig {
    type Error = ConfigError;

    fn try_from(content: &str) -> Result<Self, Self::Error> {
        Self::from_toml_str(content)
    }
}
