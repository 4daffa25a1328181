//! Fehler-Typ für CtrlM-Operationen
//!
//! Alle Operationen liefern `Result<T, CtrlMError<E>>`, wobei `E` der
//! Fehler-Typ des darunterliegenden I2C-Busses ist.

use embedded_hal::i2c::{Error as _, ErrorKind, NoAcknowledgeSource};
use thiserror::Error;

/// Fehler-Typ für CtrlM-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CtrlMError<E> {
    /// Sonstiger Busfehler beim Schreiben oder Lesen
    #[error("I2C bus error: {0:?}")]
    Bus(E),
    /// Gerät hat die Adresse nicht bestätigt
    #[error("no response from device")]
    NoResponse,
    /// Gerät meldet eine andere Adresse als angefragt
    #[error("address mismatch: expected 0x{expected:02x}, device reports 0x{found:02x}")]
    AddressMismatch { expected: u8, found: u8 },
    /// Begrenztes Polling ist abgelaufen
    #[error("timed out waiting for device data")]
    Timeout,
    /// Adresse liegt außerhalb des 7-Bit Bereichs
    #[error("invalid I2C address 0x{0:02x}")]
    InvalidAddress(u8),
}

/// Result-Alias für CtrlM-Operationen
pub type Result<T, E> = core::result::Result<T, CtrlMError<E>>;

impl<E: embedded_hal::i2c::Error> CtrlMError<E> {
    /// Ordnet einen Busfehler ein: NACK auf die Adresse heißt "keine Antwort"
    pub(crate) fn from_bus(err: E) -> Self {
        match err.kind() {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
            | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => CtrlMError::NoResponse,
            _ => CtrlMError::Bus(err),
        }
    }
}
