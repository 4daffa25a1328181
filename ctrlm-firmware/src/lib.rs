// Library-Root: Tester-Logik und Hardware-Setup
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von ctrlm-core
pub use ctrlm_core::{CtrlM, CtrlMError, PollTimeout, PowerPins};
