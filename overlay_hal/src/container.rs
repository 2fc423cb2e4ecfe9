//! Common interface of the overlay containers.
//!
//! The lazy [`Overlay`](crate::Overlay), the eager
//! [`EagerOverlay`](crate::EagerOverlay) and structs generated by
//! [`declare_overlay!`](crate::declare_overlay) all expose their members
//! through `IpContainer`, so callers can swap strategies freely.

use overlay_common::ip::consts::BASE_MEMBERS;
use overlay_common::ip::descriptor::IpDict;
use overlay_common::ip::driver::{IpDriver, OverlayError};
use serde::Serialize;
use std::sync::Arc;

/// Resolution state of one member slot.
///
/// Transitions only from `Unresolved` to `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotState {
    /// Driver not constructed yet.
    Unresolved,
    /// Driver constructed and cached.
    Resolved,
}

/// Container exposing IP drivers as named members.
pub trait IpContainer {
    /// Overlay name. Base member `name`.
    fn name(&self) -> &str;

    /// Descriptor set the container was built from. Base member `ip_dict`.
    fn ip_dict(&self) -> &IpDict;

    /// Driver for member `name`, constructing it if the strategy defers
    /// construction.
    ///
    /// Base members are not drivers: `get("name")` and `get("ip_dict")`
    /// return `MemberNotFound` even though [`contains`](Self::contains)
    /// reports them. Read them through [`name`](Self::name) and
    /// [`ip_dict`](Self::ip_dict).
    ///
    /// # Errors
    /// Returns `OverlayError::MemberNotFound` if `name` is not a driver
    /// member. State is left untouched.
    fn get(&self, name: &str) -> Result<&Arc<dyn IpDriver>, OverlayError>;

    /// Driver for member `name` if it is already constructed.
    fn peek(&self, name: &str) -> Option<&Arc<dyn IpDriver>>;

    /// Driver member names, without base members.
    fn driver_members(&self) -> Vec<&str> {
        self.ip_dict().names().collect()
    }

    /// Base members followed by driver members.
    ///
    /// Never constructs a driver.
    fn members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = BASE_MEMBERS.to_vec();
        members.extend(self.driver_members());
        members
    }

    /// Whether `name` is a base or driver member. Only driver members are
    /// served by [`get`](Self::get).
    fn contains(&self, name: &str) -> bool {
        BASE_MEMBERS.contains(&name) || self.driver_members().contains(&name)
    }

    /// Slot state of a driver member, `None` if `name` is not one.
    fn state(&self, name: &str) -> Option<SlotState> {
        if self.peek(name).is_some() {
            Some(SlotState::Resolved)
        } else if self.driver_members().contains(&name) {
            Some(SlotState::Unresolved)
        } else {
            None
        }
    }
}
