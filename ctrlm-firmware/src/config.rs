// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use rgb::RGB8;

// ============================================================================
// I2C Konfiguration
// ============================================================================

/// I2C Taktfrequenz in kHz
/// Der CtrlM läuft mit Standard-Mode (100 kHz)
pub const I2C_FREQUENCY_KHZ: u32 = 100;

/// CtrlM-Adresse aus der Environment Variable CTRLM_ADDRESS (z.B. "0x09")
/// Nicht gesetzt: der Tester nimmt das erste Gerät am Bus
/// Setze diese in .env file
pub const CTRLM_ADDRESS: Option<&str> = option_env!("CTRLM_ADDRESS");

/// Scan-Bereich für die Bus-Übersicht beim Start
pub const SCAN_FROM: u8 = 0x01;
pub const SCAN_TO: u8 = 0x7F;

// ============================================================================
// Tester Konfiguration
// ============================================================================

/// Fade-Geschwindigkeit für die Farb-Demo (0 = langsam, 255 = sofort)
pub const DEMO_FADE_SPEED: u8 = 16;

/// Farben der Demo, werden zyklisch angefahren
pub const DEMO_COLORS: [RGB8; 3] = [
    RGB8 { r: 0xFF, g: 0x00, b: 0x00 },
    RGB8 { r: 0x00, g: 0xFF, b: 0x00 },
    RGB8 { r: 0x00, g: 0x00, b: 0xFF },
];

/// Pause zwischen zwei Demo-Schritten in Sekunden
pub const DEMO_STEP_SECS: u64 = 2;

/// Timeout für das Lesen der Eingänge in Millisekunden
pub const INPUT_TIMEOUT_MS: u32 = 50;

/// Pollintervall beim Lesen der Eingänge in Millisekunden
pub const INPUT_POLL_INTERVAL_MS: u32 = 2;

/// Wartezeit bis zum nächsten Versuch, wenn kein CtrlM gefunden wurde
pub const RETRY_DELAY_SECS: u64 = 5;

/// Parst die CtrlM-Adresse aus der Build-Konfiguration
///
/// Akzeptiert dezimal ("9") und hex ("0x09").
pub fn configured_address() -> Option<u8> {
    CTRLM_ADDRESS.and_then(ctrlm_core::config::parse_address)
}
