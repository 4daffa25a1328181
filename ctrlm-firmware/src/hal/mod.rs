// Hardware Abstraction Layer (HAL) Module
//
// Baut aus den ESP32-C6 Peripherals die embedded-hal Objekte,
// die der CtrlM-Treiber erwartet.

pub mod ctrlm_bus;

pub use ctrlm_bus::{CtrlMBus, CtrlMPower, init_bus, init_power};
