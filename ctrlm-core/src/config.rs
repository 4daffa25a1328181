//! Protokoll-Konstanten für den CtrlM
//!
//! Adressen, Wartezeiten und Scan-Bereiche, die fest im Protokoll stecken.

// ============================================================================
// Adressen
// ============================================================================

/// General-Call Adresse (Broadcast, wird von allen Geräten empfangen)
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;

/// Höchste gültige 7-Bit I2C-Adresse
pub const MAX_ADDRESS: u8 = 0x7F;

/// Erste Adresse für `find_first_device()` (0 ist Broadcast)
pub const SCAN_FIRST_ADDRESS: u8 = 1;

/// Letzte Adresse für `find_first_device()` (inklusive)
pub const SCAN_LAST_ADDRESS: u8 = 119;

// ============================================================================
// Wartezeiten
// ============================================================================

/// Wartezeit nach dem Einschalten der Power-Pins in Millisekunden
pub const POWER_SETTLE_MS: u32 = 100;

/// Wartezeit nach `set_address()` in Millisekunden
/// Der CtrlM schreibt die neue Adresse ins EEPROM
pub const SET_ADDRESS_SETTLE_MS: u32 = 50;

/// Standard-Timeout für `get_inputs()` in Millisekunden
pub const DEFAULT_INPUT_TIMEOUT_MS: u32 = 100;

/// Standard-Pollintervall für `get_inputs()` in Millisekunden
pub const DEFAULT_INPUT_POLL_INTERVAL_MS: u32 = 5;

// ============================================================================
// FreeM
// ============================================================================

/// Startbyte des FreeM-Adress-Payloads
pub const FREEM_START_BYTE: u8 = 0x55;


/// Parst eine Adresse aus Text, dezimal ("9") oder hex ("0x09")
///
/// `None` bei ungültigem Text oder Adressen über `MAX_ADDRESS`.
///
/// ```
/// use ctrlm_core::config::parse_address;
///
/// assert_eq!(parse_address("0x09"), Some(9));
/// assert_eq!(parse_address("200"), None);
/// ```
pub fn parse_address(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => raw.parse::<u8>(),
    };
    parsed.ok().filter(|&address| address <= MAX_ADDRESS)
}
