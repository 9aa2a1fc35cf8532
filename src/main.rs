//! Sauna Controller Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter        LogEventSink   NvsAdapter  Esp32Time │
//! │  (Probe + Heater)       (EventSink)    (Config)    (Clock)   │
//! │  STATUS_BOARD ◀── protocol task ──▶ COMMANDS                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)                 │      │
//! │  │  Acquisition · Thermostat · Safety                 │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use log::{info, warn};

use sauna::adapters::hardware::HardwareAdapter;
use sauna::adapters::log_sink::LogEventSink;
use sauna::adapters::nvs::NvsAdapter;
use sauna::adapters::status::STATUS_BOARD;
use sauna::adapters::time::Esp32TimeAdapter;
use sauna::app::commands::COMMANDS;
use sauna::app::ports::{ClockPort, ConfigPort, EventSink};
use sauna::app::service::AppService;
use sauna::config::SystemConfig;
use sauna::drivers::onewire::BitBangBus;
use sauna::drivers::relay::Relay;
use sauna::drivers::watchdog::Watchdog;
use sauna::pins;
use sauna::sensors::ds18b20::Ds18b20;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Sauna controller v{}", env!("CARGO_PKG_VERSION"));

    let watchdog = Watchdog::default();

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new() {
        Ok(nvs) => nvs.load().unwrap_or_else(|e| {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            SystemConfig::default()
        }
    };
    info!(
        "Accessory '{}' | default target {:.1}\u{00b0}C | sample {} ms",
        config.accessory_name, config.default_target_c, config.sample_interval_ms
    );

    // ── 3. Construct adapters ─────────────────────────────────
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let (relay_pin, led_pin, probe_pin) = unsafe {
        (
            AnyOutputPin::new(pins::RELAY_GPIO),
            AnyOutputPin::new(pins::STATUS_LED_GPIO),
            AnyIOPin::new(pins::TEMP_SENSOR_GPIO),
        )
    };
    let relay = Relay::new(PinDriver::output(relay_pin)?, pins::RELAY_ACTIVE_LOW)?;
    let led = Relay::new(PinDriver::output(led_pin)?, false)?;

    let mut one_wire = PinDriver::input_output_od(probe_pin)?;
    one_wire.set_pull(Pull::Up)?;
    one_wire.set_high()?;
    let probe = Ds18b20::new(BitBangBus::new(one_wire, Ets));

    let mut hw = HardwareAdapter::new(probe, relay, led);

    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();
    let mut status = &STATUS_BOARD;

    // ── 4. Application service ────────────────────────────────
    let mut service = AppService::new(&config);
    service.start(clock.now_ms(), &mut hw, &mut status, &mut sink);

    let telemetry_ms = config.telemetry_interval_secs * 1000;
    let mut last_telemetry_ms = clock.now_ms();

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        service.drain_commands(&COMMANDS, &mut sink);

        let now = clock.now_ms();
        service.tick(now, &mut hw, &mut status, &mut sink);

        if now.wrapping_sub(last_telemetry_ms) >= telemetry_ms {
            sink.emit(&service.build_telemetry());
            if let Some(json) = STATUS_BOARD.latest_json() {
                info!("STATUS | {}", json);
            }
            last_telemetry_ms = now;
        }

        watchdog.feed();
        FreeRtos::delay_ms(config.control_loop_interval_ms);
    }
}
