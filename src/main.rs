//! GreenHaus Firmware — Main Entry Point
//!
//! Hexagonal architecture with three independent periodic tasks.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │  EnvSensorHub      RelayDriver ×3     MqttBroker           │
//! │  (SensorPort)      (ActuatorPort)     (BrokerPort)         │
//! │  NvsConfigStore    WiFi station                            │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ─────────────────    │
//! │                                                            │
//! │  acquisition ──▶ SnapshotStore ◀── control / publication   │
//! │        (three async loops on one LocalExecutor)            │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::cell::RefCell;

use anyhow::{anyhow, Result};
use edge_executor::LocalExecutor;
use embassy_time::Duration;
use log::{info, warn};

use esp_idf_hal::delay::Delay;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

use greenhaus::adapters::mqtt::MqttBroker;
use greenhaus::adapters::nvs::NvsConfigStore;
use greenhaus::adapters::wifi::{connect_station, WifiCredentials};
use greenhaus::app::ports::ConfigPort;
use greenhaus::app::snapshot::SnapshotStore;
use greenhaus::config::GreenhouseConfig;
use greenhaus::drivers::i2c_bus::SharedI2c;
use greenhaus::drivers::relay::RelayDriver;
use greenhaus::drivers::hw_init;
use greenhaus::pins;
use greenhaus::sensors::EnvSensorHub;
use greenhaus::tasks::{self, Shutdown};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("GreenHaus v{} starting", env!("CARGO_PKG_VERSION"));

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs_partition = EspDefaultNvsPartition::take()?;

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config_store = NvsConfigStore::new(nvs_partition.clone());
    let config = match config_store.load() {
        Ok(cfg) => {
            info!("config loaded from NVS");
            cfg
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            GreenhouseConfig::default()
        }
    };

    // ── 3. WiFi station ───────────────────────────────────────
    let credentials = WifiCredentials::new(&config.wifi_ssid, &config.wifi_password)
        .map_err(|e| anyhow!("wifi credentials: {}", e))?;
    let mut esp_wifi = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs_partition))?;
    let mut wifi = BlockingWifi::wrap(&mut esp_wifi, sysloop)?;
    connect_station(&mut wifi, &credentials).map_err(|e| anyhow!("wifi: {}", e))?;

    // ── 4. Relay outputs ──────────────────────────────────────
    hw_init::init_outputs(&[config.fan_gpio, config.pump_gpio, config.grow_light_gpio])
        .map_err(|e| anyhow!("hw_init: {}", e))?;
    let fan = RelayDriver::new("fan", config.fan_gpio);
    let pump = RelayDriver::new("pump", config.pump_gpio);
    let grow_light = RelayDriver::new("grow-light", config.grow_light_gpio);

    // ── 5. I²C sensors ────────────────────────────────────────
    // SDA/SCL per pins.rs (GP21/GP22).
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
    )?;
    let i2c_bus: &'static RefCell<I2cDriver<'static>> = Box::leak(Box::new(RefCell::new(i2c)));

    let mut sensor_hub = EnvSensorHub::new(
        SharedI2c::new(i2c_bus),
        config.bme280_addr,
        Delay::new_default(),
        SharedI2c::new(i2c_bus),
        config.bh1750_addr,
    );
    if let Err(e) = sensor_hub.init() {
        // Not fatal: read_all keeps failing and the acquisition task keeps
        // the zero snapshot until the bus recovers.
        warn!("sensor init failed ({}); acquisition will retry", e);
    }

    // ── 6. Broker client ──────────────────────────────────────
    let broker = MqttBroker::new(&config.broker_host, config.broker_port, &config.client_id);

    // ── 7. Task loops ─────────────────────────────────────────
    static STORE: SnapshotStore = SnapshotStore::new();
    static SHUTDOWN: Shutdown = Shutdown::new();

    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    let acquisition = executor.spawn(tasks::acquire::acquisition_loop(
        sensor_hub,
        &STORE,
        Duration::from_millis(config.sensor_interval_ms.into()),
        &SHUTDOWN,
    ));
    let control = executor.spawn(tasks::control::control_loop(
        &STORE,
        config.thresholds,
        Some(fan),
        Some(pump),
        Some(grow_light),
        Duration::from_millis(config.control_interval_ms.into()),
        &SHUTDOWN,
    ));
    let publication = executor.spawn(tasks::publish::publication_loop(
        broker,
        &STORE,
        config.sensor_topic(),
        config.control_topic(),
        Duration::from_millis(config.publish_interval_ms.into()),
        &SHUTDOWN,
    ));

    info!(
        "system ready: acquire {} ms / control {} ms / publish {} ms",
        config.sensor_interval_ms, config.control_interval_ms, config.publish_interval_ms
    );

    // Runs until an external shutdown request stops all three loops (the
    // publication task may end earlier on a broker failure). Each loop
    // observes the request at its next sleep boundary.
    futures_lite::future::block_on(executor.run(async {
        acquisition.await;
        control.await;
        publication.await;
    }));

    info!("all tasks stopped, exiting");
    Ok(())
}
