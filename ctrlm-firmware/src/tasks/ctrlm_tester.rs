// CtrlM Tester Task - prüft den CtrlM am I2C-Bus und spielt eine Farb-Demo ab
use defmt::{Debug2Format, error, info, warn};
use embassy_time::{Duration, Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use esp_hal::delay::Delay;

use ctrlm_core::{CtrlM, CtrlMError, PollTimeout};

use crate::config::*;
use crate::hal::{CtrlMBus, CtrlMPower};

/// Loggt alle Adressen, die beim Scan mit ACK antworten
///
/// Gibt die Anzahl gefundener Geräte zurück.
fn log_bus_scan<I2C: I2c, D: DelayNs>(ctrlm: &mut CtrlM<I2C, D>) -> usize {
    info!("CtrlM: Scanning I2C bus 0x{:02x}..=0x{:02x}", SCAN_FROM, SCAN_TO);
    let mut found = 0;
    for result in ctrlm
        .scan_bus(SCAN_FROM, SCAN_TO)
        .filter(|r| r.status.is_ack())
    {
        info!("CtrlM: Device at 0x{:02x}", result.address);
        found += 1;
    }
    info!("CtrlM: Scan done, {} device(s)", found);
    found
}

/// Ermittelt die Adresse des CtrlM
///
/// Nimmt CTRLM_ADDRESS aus der Build-Konfiguration, sonst das erste
/// Gerät am Bus. Wartet, bis ein Gerät auftaucht.
async fn resolve_address<I2C: I2c, D: DelayNs>(ctrlm: &mut CtrlM<I2C, D>) -> u8 {
    if let Some(address) = configured_address() {
        info!("CtrlM: Using configured address 0x{:02x}", address);
        return address;
    }
    if let Some(raw) = CTRLM_ADDRESS {
        warn!("CtrlM: Invalid CTRLM_ADDRESS \"{}\", falling back to auto-detect", raw);
    }

    loop {
        if let Some(address) = ctrlm.find_first_device() {
            info!("CtrlM: Auto-detected address 0x{:02x}", address);
            return address;
        }
        warn!("CtrlM: No device found, retrying in {}s...", RETRY_DELAY_SECS);
        Timer::after(Duration::from_secs(RETRY_DELAY_SECS)).await;
    }
}

/// Tester Logic - Testbare Logik ohne ESP-spezifische Typen
///
/// 1. Bus-Scan mit Log-Ausgabe
/// 2. Adresse ermitteln und prüfen
/// 3. Firmware-Version lesen
/// 4. Endlos: Farben anfahren, Farbe zurücklesen, Eingänge lesen
///
/// Fehler werden geloggt, der Tester läuft weiter.
pub async fn ctrlm_tester_logic<I2C: I2c, D: DelayNs>(mut ctrlm: CtrlM<I2C, D>) {
    log_bus_scan(&mut ctrlm);

    let address = resolve_address(&mut ctrlm).await;

    match ctrlm.check_address(address) {
        Ok(()) => info!("CtrlM: Address 0x{:02x} verified", address),
        Err(CtrlMError::AddressMismatch { expected, found }) => warn!(
            "CtrlM: Address mismatch, expected 0x{:02x}, device reports 0x{:02x}",
            expected, found
        ),
        Err(e) => error!("CtrlM: Address check failed: {}", Debug2Format(&e)),
    }

    match ctrlm.get_version(address) {
        Ok(version) => info!(
            "CtrlM: Firmware version {}.{} (0x{:04x})",
            version.major,
            version.minor,
            version.as_u16()
        ),
        Err(e) => error!("CtrlM: Version query failed: {}", Debug2Format(&e)),
    }

    // Script stoppen, sonst überschreibt es die Demo-Farben
    if let Err(e) = ctrlm.stop_script(address) {
        error!("CtrlM: Failed to stop script: {}", Debug2Format(&e));
    }
    if let Err(e) = ctrlm.set_fade_speed(address, DEMO_FADE_SPEED) {
        error!("CtrlM: Failed to set fade speed: {}", Debug2Format(&e));
    }

    let poll = PollTimeout::new(INPUT_TIMEOUT_MS, INPUT_POLL_INTERVAL_MS);

    for color in DEMO_COLORS.iter().cycle() {
        match ctrlm.fade_to_rgb(address, *color) {
            Ok(()) => info!("CtrlM: Fade to ({}, {}, {})", color.r, color.g, color.b),
            Err(e) => error!("CtrlM: Fade failed: {}", Debug2Format(&e)),
        }

        Timer::after(Duration::from_secs(DEMO_STEP_SECS)).await;

        match ctrlm.get_rgb_color(address) {
            Ok(current) => info!(
                "CtrlM: Current color ({}, {}, {})",
                current.r, current.g, current.b
            ),
            Err(e) => warn!("CtrlM: Color query failed: {}", Debug2Format(&e)),
        }

        match ctrlm.get_inputs(address, poll) {
            Ok(inputs) => info!("CtrlM: Inputs {=[u8]:02x}", &inputs.0[..]),
            Err(CtrlMError::Timeout) => warn!("CtrlM: Inputs timed out"),
            Err(e) => warn!("CtrlM: Input query failed: {}", Debug2Format(&e)),
        }
    }
}

/// CtrlM Tester Task - Embassy Task
///
/// Schaltet die Versorgung ein, übernimmt den Bus und ruft dann die
/// testbare `ctrlm_tester_logic()` auf.
///
/// # Parameter
/// - `bus`: initialisierter I2C-Bus
/// - `power`: Power-Pins des CtrlM (bleiben im Task, damit sie nicht gedroppt werden)
#[embassy_executor::task]
pub async fn ctrlm_tester_task(bus: CtrlMBus, mut power: CtrlMPower) {
    let Ok(ctrlm) = CtrlM::begin_with_power(bus, Delay::new(), &mut power);
    info!("CtrlM: Powered up");

    ctrlm_tester_logic(ctrlm).await;
}
