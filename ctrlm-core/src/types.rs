//! Core Types für das CtrlM-Protokoll
//!
//! Datenstrukturen ohne Hardware-Dependencies. Alles hier lebt nur für
//! die Dauer eines Kommandos.

use crate::config::{DEFAULT_INPUT_POLL_INTERVAL_MS, DEFAULT_INPUT_TIMEOUT_MS};

/// HSB-Farbe (Hue, Saturation, Brightness), jeweils 8 Bit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsb {
    pub hue: u8,
    pub saturation: u8,
    pub brightness: u8,
}

impl Hsb {
    pub const fn new(hue: u8, saturation: u8, brightness: u8) -> Self {
        Self {
            hue,
            saturation,
            brightness,
        }
    }
}

/// IR-Code mit Typ-Tag
///
/// Der 32-Bit Code wird Big-Endian (MSB zuerst) übertragen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrCode {
    pub code_type: u8,
    pub code: u32,
}

impl IrCode {
    pub const fn new(code_type: u8, code: u32) -> Self {
        Self { code_type, code }
    }
}

/// Firmware-Version des CtrlM
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    /// Packt die Version als `(major << 8) | minor`
    ///
    /// ```
    /// # use ctrlm_core::Version;
    /// let v = Version { major: 3, minor: 10 };
    /// assert_eq!(v.as_u16(), 0x030A);
    /// ```
    pub const fn as_u16(self) -> u16 {
        u16::from_be_bytes([self.major, self.minor])
    }
}

impl From<[u8; 2]> for Version {
    fn from(bytes: [u8; 2]) -> Self {
        Self {
            major: bytes[0],
            minor: bytes[1],
        }
    }
}

/// Digitale Eingänge (4-Byte Antwort auf `'i'`)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Inputs(pub [u8; 4]);

impl Inputs {
    /// Erstes Byte, entspricht der kompakten 1-Byte Abfrage
    pub const fn bits(&self) -> u8 {
        self.0[0]
    }
}

/// Startup-Parameter, die der CtrlM dauerhaft speichert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartupParams {
    /// 0x01 == Script abspielen
    pub mode: u8,
    pub script_id: u8,
    /// 0 == endlos wiederholen
    pub repetitions: u8,
    pub fade_speed: u8,
    pub time_adjust: i8,
}

impl Default for StartupParams {
    /// Werkseinstellungen des CtrlM
    fn default() -> Self {
        Self {
            mode: 0x01,
            script_id: 0x00,
            repetitions: 0x00,
            fade_speed: 0x08,
            time_adjust: 0,
        }
    }
}

/// Begrenzte Wartezeit für `get_inputs()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollTimeout {
    pub timeout_ms: u32,
    pub interval_ms: u32,
}

impl PollTimeout {
    pub const fn new(timeout_ms: u32, interval_ms: u32) -> Self {
        Self {
            timeout_ms,
            interval_ms,
        }
    }
}

impl Default for PollTimeout {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_TIMEOUT_MS, DEFAULT_INPUT_POLL_INTERVAL_MS)
    }
}

/// Ergebnis eines einzelnen Probe-Writes beim Bus-Scan
///
/// Die Codes entsprechen den Rückgabewerten von `twi_writeTo()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeStatus {
    /// Gerät hat die Adresse bestätigt
    Ack,
    /// Kein ACK auf die Adresse (kein Gerät)
    AddressNack,
    /// Kein ACK auf ein Datenbyte
    DataNack,
    /// Sonstiger Busfehler
    Other,
}

impl ProbeStatus {
    /// Numerischer Result-Code: 0 = ACK, 2 = Address-NACK, 3 = Data-NACK, 4 = Sonstiges
    pub const fn code(self) -> u8 {
        match self {
            ProbeStatus::Ack => 0,
            ProbeStatus::AddressNack => 2,
            ProbeStatus::DataNack => 3,
            ProbeStatus::Other => 4,
        }
    }

    pub const fn is_ack(self) -> bool {
        matches!(self, ProbeStatus::Ack)
    }
}

/// Ein Eintrag des Bus-Scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult {
    pub address: u8,
    pub status: ProbeStatus,
}
