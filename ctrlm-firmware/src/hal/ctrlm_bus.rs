// I2C-Bus und Power-Pins für den CtrlM
//
// esp-hal implementiert die embedded-hal 1.0 Traits direkt,
// daher braucht es hier keine Wrapper, nur die Initialisierung.

use esp_hal::Blocking;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, ConfigError, I2c};
use esp_hal::time::Rate;

use ctrlm_core::PowerPins;

/// Blocking I2C-Bus, an dem der CtrlM hängt
pub type CtrlMBus = I2c<'static, Blocking>;

/// Power- und Ground-Pin des CtrlM
pub type CtrlMPower = PowerPins<Output<'static>, Output<'static>>;

/// Initialisiert I2C0 auf GPIO6 (SDA) und GPIO7 (SCL)
///
/// # Parameter
/// - `i2c0`: I2C0 Peripheral
/// - `sda`, `scl`: Daten- und Taktleitung
/// - `frequency_khz`: Bustakt in kHz (z.B. 100)
pub fn init_bus(
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO6<'static>,
    scl: esp_hal::peripherals::GPIO7<'static>,
    frequency_khz: u32,
) -> Result<CtrlMBus, ConfigError> {
    let config = I2cConfig::default().with_frequency(Rate::from_khz(frequency_khz));
    Ok(I2c::new(i2c0, config)?.with_sda(sda).with_scl(scl))
}

/// Power-Pins auf GPIO2 (VCC) und GPIO3 (GND), beide starten auf Low
pub fn init_power(
    power: esp_hal::peripherals::GPIO2<'static>,
    ground: esp_hal::peripherals::GPIO3<'static>,
) -> CtrlMPower {
    PowerPins::new(
        Output::new(power, Level::Low, OutputConfig::default()),
        Output::new(ground, Level::Low, OutputConfig::default()),
    )
}
