//! Driver registry for IP drivers.
//!
//! Maps device-type identifiers to driver factories. A `DriverRegistry` can
//! be built and passed around explicitly, or the process-wide registry can
//! be used through the free functions at the bottom of this module.
//!
//! Lookups never fail: a device type without a registered factory resolves
//! to the default factory, which builds a [`DefaultIp`].

use crate::drivers::{DefaultIp, register_builtin_drivers};
use overlay_common::ip::descriptor::DeviceDescriptor;
use overlay_common::ip::driver::{BindsTo, DriverFactory, IpDriver, OverlayError};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};
use tracing::{debug, warn};

/// Registry of available IP drivers, keyed by device type.
///
/// At most one factory per device type. [`register`](Self::register)
/// replaces an existing entry; [`try_register`](Self::try_register)
/// refuses to.
#[derive(Clone)]
pub struct DriverRegistry {
    factories: HashMap<String, DriverFactory>,
    default_factory: DriverFactory,
}

impl DriverRegistry {
    /// Create a registry with no bindings and `DefaultIp` as fallback.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            default_factory: Arc::new(|descriptor: &DeviceDescriptor| {
                Box::new(DefaultIp::new(descriptor)) as Box<dyn IpDriver>
            }),
        }
    }

    /// Create a registry populated with the built-in drivers.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        register_builtin_drivers(&mut registry);
        registry
    }

    /// Replace the fallback factory used for unregistered device types.
    pub fn with_default<F>(mut self, factory: F) -> Self
    where
        F: Fn(&DeviceDescriptor) -> Box<dyn IpDriver> + Send + Sync + 'static,
    {
        self.default_factory = Arc::new(factory);
        self
    }

    /// Register a driver factory, replacing any previous binding.
    pub fn register<F>(&mut self, device_type: impl Into<String>, factory: F)
    where
        F: Fn(&DeviceDescriptor) -> Box<dyn IpDriver> + Send + Sync + 'static,
    {
        self.register_factory(device_type, Arc::new(factory));
    }

    /// Register an already shared factory, returning the one it replaced.
    pub fn register_factory(
        &mut self,
        device_type: impl Into<String>,
        factory: DriverFactory,
    ) -> Option<DriverFactory> {
        let device_type = device_type.into();
        let previous = self.factories.insert(device_type.clone(), factory);
        if previous.is_some() {
            warn!("Driver for '{device_type}' replaced by a later registration");
        } else {
            debug!("Registered driver for '{device_type}'");
        }
        previous
    }

    /// Register a driver factory unless the device type is already bound.
    ///
    /// # Errors
    /// Returns `OverlayError::DuplicateRegistration` and leaves the registry
    /// unchanged if a factory exists for `device_type`.
    pub fn try_register<F>(
        &mut self,
        device_type: impl Into<String>,
        factory: F,
    ) -> Result<(), OverlayError>
    where
        F: Fn(&DeviceDescriptor) -> Box<dyn IpDriver> + Send + Sync + 'static,
    {
        match self.factories.entry(device_type.into()) {
            Entry::Occupied(entry) => Err(OverlayError::DuplicateRegistration(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!("Registered driver for '{}'", entry.key());
                entry.insert(Arc::new(factory));
                Ok(())
            }
        }
    }

    /// Register `D` against every device type in `D::BINDS_TO`.
    pub fn register_type<D: BindsTo>(&mut self) {
        let factory: DriverFactory = Arc::new(|descriptor: &DeviceDescriptor| {
            Box::new(D::from_descriptor(descriptor)) as Box<dyn IpDriver>
        });
        for device_type in D::BINDS_TO {
            self.register_factory(*device_type, Arc::clone(&factory));
        }
    }

    /// Factory for `device_type`, or the default factory if none is bound.
    pub fn resolve(&self, device_type: &str) -> DriverFactory {
        match self.factories.get(device_type) {
            Some(factory) => Arc::clone(factory),
            None => {
                debug!("No driver for '{device_type}', using default");
                Arc::clone(&self.default_factory)
            }
        }
    }

    /// The fallback factory.
    pub fn default_factory(&self) -> DriverFactory {
        Arc::clone(&self.default_factory)
    }

    /// Build a driver instance for `descriptor`.
    pub fn create_driver(&self, descriptor: &DeviceDescriptor) -> Box<dyn IpDriver> {
        (self.resolve(&descriptor.device_type))(descriptor)
    }

    /// Whether a specific factory is bound to `device_type`.
    pub fn is_registered(&self, device_type: &str) -> bool {
        self.factories.contains_key(device_type)
    }

    /// All bound device types, sorted.
    pub fn device_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Number of bound device types.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether no device type is bound.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("device_types", &self.device_types())
            .finish_non_exhaustive()
    }
}

// ─── Process-wide registry ──────────────────────────────────────────
//
// Seeded with the built-in drivers on first use. Driver code outside this
// crate adds itself with `register_driver()`; containers take a snapshot
// with `global_registry()`.

static GLOBAL_REGISTRY: LazyLock<RwLock<DriverRegistry>> =
    LazyLock::new(|| RwLock::new(DriverRegistry::with_builtin_drivers()));

/// Register a driver factory in the process-wide registry.
pub fn register_driver<F>(device_type: impl Into<String>, factory: F)
where
    F: Fn(&DeviceDescriptor) -> Box<dyn IpDriver> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register(device_type, factory);
}

/// Register a `BindsTo` driver type in the process-wide registry.
pub fn register_driver_type<D: BindsTo>() {
    GLOBAL_REGISTRY
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .register_type::<D>();
}

/// Resolve a factory from the process-wide registry.
pub fn resolve_driver(device_type: &str) -> DriverFactory {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .resolve(device_type)
}

/// Snapshot of the process-wide registry.
pub fn global_registry() -> DriverRegistry {
    GLOBAL_REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::GpioDriver;
    use overlay_common::ip::consts::DEFAULT_DRIVER_NAME;
    use std::any::Any;

    struct TestDriver {
        descriptor: DeviceDescriptor,
    }

    impl IpDriver for TestDriver {
        fn name(&self) -> &'static str {
            "test"
        }

        fn descriptor(&self) -> &DeviceDescriptor {
            &self.descriptor
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl BindsTo for TestDriver {
        const BINDS_TO: &'static [&'static str] = &["test:1.0", "test:1.1"];

        fn from_descriptor(descriptor: &DeviceDescriptor) -> Self {
            Self {
                descriptor: descriptor.clone(),
            }
        }
    }

    fn create_test_driver(descriptor: &DeviceDescriptor) -> Box<dyn IpDriver> {
        Box::new(TestDriver::from_descriptor(descriptor))
    }

    #[test]
    fn registry_unregistered_type_resolves_to_default() {
        let reg = DriverRegistry::new();
        let factory = reg.resolve("hls:my_ip:1.0");
        assert!(Arc::ptr_eq(&factory, &reg.default_factory()));

        let driver = factory(&DeviceDescriptor::new("my_custom_ip", "hls:my_ip:1.0"));
        assert_eq!(driver.name(), DEFAULT_DRIVER_NAME);
    }

    #[test]
    fn registry_resolve_returns_registered_factory() {
        let mut reg = DriverRegistry::new();
        let factory: DriverFactory = Arc::new(create_test_driver);
        reg.register_factory("test:1.0", Arc::clone(&factory));

        assert!(Arc::ptr_eq(&reg.resolve("test:1.0"), &factory));
        assert!(reg.is_registered("test:1.0"));
        assert!(!reg.is_registered("test:2.0"));
    }

    #[test]
    fn registry_last_registration_wins() {
        let mut reg = DriverRegistry::new();
        let first: DriverFactory = Arc::new(create_test_driver);
        let second: DriverFactory = Arc::new(|d: &DeviceDescriptor| {
            Box::new(GpioDriver::from_descriptor(d)) as Box<dyn IpDriver>
        });

        assert!(reg.register_factory("test:1.0", Arc::clone(&first)).is_none());
        let replaced = reg.register_factory("test:1.0", Arc::clone(&second)).unwrap();

        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(&reg.resolve("test:1.0"), &second));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn registry_try_register_rejects_duplicate() {
        let mut reg = DriverRegistry::new();
        reg.try_register("test:1.0", create_test_driver).unwrap();

        let result = reg.try_register("test:1.0", |d: &DeviceDescriptor| {
            Box::new(GpioDriver::from_descriptor(d)) as Box<dyn IpDriver>
        });
        assert_eq!(
            result,
            Err(OverlayError::DuplicateRegistration("test:1.0".to_string()))
        );

        let driver = reg.create_driver(&DeviceDescriptor::new("ip", "test:1.0"));
        assert_eq!(driver.name(), "test");
    }

    #[test]
    fn registry_register_type_binds_every_identifier() {
        let mut reg = DriverRegistry::new();
        reg.register_type::<TestDriver>();

        assert_eq!(reg.device_types(), vec!["test:1.0", "test:1.1"]);
        for device_type in TestDriver::BINDS_TO {
            let driver = reg.create_driver(&DeviceDescriptor::new("ip", *device_type));
            assert!(driver.is::<TestDriver>());
        }
    }

    #[test]
    fn registry_custom_default() {
        let reg = DriverRegistry::new().with_default(create_test_driver);
        let driver = reg.create_driver(&DeviceDescriptor::new("ip", "unknown:0.1"));
        assert_eq!(driver.name(), "test");
    }

    #[test]
    fn registry_builtin_drivers() {
        let reg = DriverRegistry::with_builtin_drivers();
        for device_type in GpioDriver::BINDS_TO {
            assert!(reg.is_registered(device_type));
        }
    }

    #[test]
    fn global_registry_register_and_resolve() {
        register_driver("global_test:1.0", create_test_driver);

        let driver = resolve_driver("global_test:1.0")(&DeviceDescriptor::new("ip", "global_test:1.0"));
        assert_eq!(driver.name(), "test");
        assert!(global_registry().is_registered("global_test:1.0"));
        assert!(global_registry().is_registered("axi_gpio:2.0"));
    }

    #[test]
    fn global_registry_register_type() {
        register_driver_type::<TestDriver>();
        assert!(global_registry().is_registered("test:1.1"));
    }
}
