//! CtrlM Core - I2C-Treiber für den CtrlM LED-Controller
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Der Bus, die Power-Pins und das Delay kommen über `embedded-hal` Traits
//! von außen, daher läuft alles auch gegen Mocks auf dem Host.

#![no_std]

pub mod command;
pub mod config;
pub mod ctrlm;
pub mod error;
pub mod power;
pub mod scan;
pub mod types;

// Re-exports für einfachen Zugriff
pub use command::{Command, Frame, checksum, freem_payload};
pub use ctrlm::CtrlM;
pub use error::{CtrlMError, Result};
pub use power::PowerPins;
pub use scan::BusScan;
pub use types::{Hsb, Inputs, IrCode, PollTimeout, ProbeStatus, ScanResult, StartupParams, Version};

pub use rgb::RGB8;
