//! Overlay integration tests.
//!
//! Runs the board scenario (one GPIO core, one custom HLS core, one name
//! that does not exist) against every container strategy, checks
//! single construction under concurrent first access, and loads an overlay
//! from a description file.

use overlay_common::ip::config::OverlayConfig;
use overlay_common::ip::consts::DEFAULT_DRIVER_NAME;
use overlay_common::ip::descriptor::{DeviceDescriptor, IpDict};
use overlay_common::ip::driver::{BindsTo, IpDriver, OverlayError};
use overlay_hal::{
    DefaultIp, DriverRegistry, EagerOverlay, GpioDriver, IpContainer, Overlay, SlotState,
    declare_overlay,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;

// ─── Helpers ────────────────────────────────────────────────────────

declare_overlay! {
    struct BoardOverlay {
        gpio_btns => "axi_gpio:2.0",
        my_custom_ip => "hls:my_ip:1.0",
    }
}

fn board_ip_dict() -> IpDict {
    [
        ("gpio_btns", "axi_gpio:2.0"),
        ("my_custom_ip", "hls:my_ip:1.0"),
    ]
    .into_iter()
    .collect()
}

/// Registry holding only the GPIO binding.
fn gpio_only_registry() -> DriverRegistry {
    let mut registry = DriverRegistry::new();
    registry.register("axi_gpio:2.0", |descriptor: &DeviceDescriptor| {
        Box::new(GpioDriver::from_descriptor(descriptor)) as Box<dyn IpDriver>
    });
    registry
}

fn check_board_scenario(container: &dyn IpContainer) {
    let gpio = container.get("gpio_btns").expect("gpio_btns");
    assert!(gpio.is::<GpioDriver>());
    assert_eq!(gpio.member_name(), "gpio_btns");

    let custom = container.get("my_custom_ip").expect("my_custom_ip");
    assert!(custom.is::<DefaultIp>());
    assert_eq!(custom.name(), DEFAULT_DRIVER_NAME);
    assert_eq!(custom.device_type(), "hls:my_ip:1.0");

    let err = container.get("missing_ip").unwrap_err();
    assert_eq!(err, OverlayError::MemberNotFound("missing_ip".to_string()));
    assert!(err.to_string().contains("missing_ip"));

    assert_eq!(
        container.members(),
        vec!["ip_dict", "name", "gpio_btns", "my_custom_ip"]
    );
}

// ─── Board scenario per strategy ────────────────────────────────────

#[test]
fn test_board_scenario_lazy() {
    let overlay = Overlay::new("board", board_ip_dict(), Arc::new(gpio_only_registry())).unwrap();
    check_board_scenario(&overlay);
}

#[test]
fn test_board_scenario_eager() {
    let overlay = EagerOverlay::new("board", board_ip_dict(), &gpio_only_registry()).unwrap();
    check_board_scenario(&overlay);
}

#[test]
fn test_board_scenario_declared() {
    let overlay = BoardOverlay::build("board", &gpio_only_registry()).unwrap();
    check_board_scenario(&overlay);
    assert_eq!(BoardOverlay::descriptors(), board_ip_dict());
    assert_eq!(BoardOverlay::MEMBERS, &["gpio_btns", "my_custom_ip"]);
}

// ─── Lazy resolution ────────────────────────────────────────────────

#[test]
fn test_concurrent_first_access_builds_once() {
    static BUILT: AtomicUsize = AtomicUsize::new(0);

    let mut registry = DriverRegistry::new();
    registry.register("axi_gpio:2.0", |descriptor: &DeviceDescriptor| {
        BUILT.fetch_add(1, Ordering::SeqCst);
        Box::new(GpioDriver::from_descriptor(descriptor)) as Box<dyn IpDriver>
    });
    let overlay = Overlay::new("board", board_ip_dict(), Arc::new(registry)).unwrap();

    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let drivers: Vec<Arc<dyn IpDriver>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    Arc::clone(overlay.get("gpio_btns").expect("gpio_btns"))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    assert!(drivers.iter().all(|driver| Arc::ptr_eq(driver, &drivers[0])));
    assert_eq!(overlay.state("my_custom_ip"), Some(SlotState::Unresolved));
}

#[test]
fn test_resolved_slot_is_stable() {
    let overlay = Overlay::new("board", board_ip_dict(), Arc::new(DriverRegistry::new())).unwrap();
    assert!(overlay.get("gpio_btns").unwrap().is::<DefaultIp>());

    // A resolved slot keeps its driver for the life of the overlay.
    let again = overlay.get("gpio_btns").unwrap();
    assert!(again.is::<DefaultIp>());
    assert_eq!(overlay.resolved_count(), 1);
}

// ─── Overlay description files ──────────────────────────────────────

#[test]
fn test_overlay_from_description_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("base.toml");
    fs::write(
        &path,
        r#"
[shared]
service_name = "base"
log_level = "debug"

[ip.gpio_btns]
type = "axi_gpio:2.0"

[ip.my_custom_ip]
type = "hls:my_ip:1.0"
"#,
    )
    .unwrap();

    let config = OverlayConfig::load_validated(&path).unwrap();
    let lazy = Overlay::from_config(&config, Arc::new(gpio_only_registry())).unwrap();
    assert_eq!(lazy.name(), "base");
    check_board_scenario(&lazy);

    let eager = EagerOverlay::from_config(&config, &gpio_only_registry()).unwrap();
    assert_eq!(eager.ip_dict(), lazy.ip_dict());
}

#[test]
fn test_reserved_member_in_description_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        r#"
[shared]
service_name = "bad"

[ip.name]
type = "axi_gpio:2.0"
"#,
    )
    .unwrap();

    assert_eq!(
        OverlayConfig::load_validated(&path).unwrap_err(),
        OverlayError::ReservedName("name".to_string())
    );
}
