//! Bus-Scan
//!
//! Jede Adresse wird mit einem Write ohne Daten angesprochen. Antwortet ein
//! Gerät mit ACK, ist dort etwas angeschlossen.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

use crate::config::MAX_ADDRESS;
use crate::types::{ProbeStatus, ScanResult};

impl From<ErrorKind> for ProbeStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => ProbeStatus::DataNack,
            ErrorKind::NoAcknowledge(_) => ProbeStatus::AddressNack,
            _ => ProbeStatus::Other,
        }
    }
}

/// Probe-Write ohne Daten an `address`
pub(crate) fn probe<I2C: I2c>(i2c: &mut I2C, address: u8) -> ProbeStatus {
    match i2c.write(address, &[]) {
        Ok(()) => ProbeStatus::Ack,
        Err(e) => ProbeStatus::from(e.kind()),
    }
}

/// Lazy Scan über einen Adressbereich (inklusive, aufsteigend)
///
/// Jeder Aufruf von `next()` führt genau einen Probe-Write aus.
pub struct BusScan<'a, I2C> {
    i2c: &'a mut I2C,
    next: u8,
    last: u8,
    done: bool,
}

impl<'a, I2C: I2c> BusScan<'a, I2C> {
    pub(crate) fn new(i2c: &'a mut I2C, from: u8, to: u8) -> Self {
        let last = to.min(MAX_ADDRESS);
        Self {
            i2c,
            next: from,
            last,
            done: from > last,
        }
    }
}

impl<I2C: I2c> Iterator for BusScan<'_, I2C> {
    type Item = ScanResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let address = self.next;
        let status = probe(&mut *self.i2c, address);

        #[cfg(feature = "defmt")]
        if status.is_ack() {
            defmt::debug!("ctrlm: device found at 0x{=u8:02x}", address);
        }

        if address == self.last {
            self.done = true;
        } else {
            self.next = address + 1;
        }

        Some(ScanResult { address, status })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.done {
            0
        } else {
            usize::from(self.last - self.next) + 1
        };
        (remaining, Some(remaining))
    }
}
