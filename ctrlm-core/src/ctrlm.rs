//! CtrlM Protokoll-Adapter
//!
//! Jede Operation ist genau eine Bus-Transaktion (Write) oder ein
//! Write gefolgt von einem Read. Es gibt keinen internen Zustand und
//! keine automatischen Wiederholungen.
//!
//! # Beispiel
//!
//! ```ignore
//! let mut ctrlm = CtrlM::begin(i2c, delay);
//! if let Some(addr) = ctrlm.find_first_device() {
//!     ctrlm.check_address(addr)?;
//!     ctrlm.fade_to_rgb(addr, RGB8::new(0xFF, 0x00, 0x80))?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use rgb::RGB8;

use crate::command::Command;
use crate::config::{
    GENERAL_CALL_ADDRESS, MAX_ADDRESS, POWER_SETTLE_MS, SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS,
    SET_ADDRESS_SETTLE_MS,
};
use crate::error::{CtrlMError, Result};
use crate::power::PowerPins;
use crate::scan::{self, BusScan};
use crate::types::{Hsb, Inputs, IrCode, PollTimeout, StartupParams, Version};

/// CtrlM Treiber
///
/// Besitzt den I2C-Bus und eine Delay-Quelle. Ein Treiber kann mehrere
/// CtrlM auf demselben Bus ansprechen, deshalb bekommt jede Operation
/// die Zieladresse als Parameter.
///
/// # Implementierungen
/// - **Production:** esp-hal `I2c<Blocking>` + `Delay`
/// - **Testing:** `MockBus` + `MockDelay` (ctrlm-tests)
pub struct CtrlM<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> CtrlM<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    // ========================================================================
    // Initialisierung
    // ========================================================================

    /// Übernimmt einen bereits konfigurierten Bus (CtrlM hat eigene Versorgung)
    pub fn begin(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    /// Versorgt den CtrlM über zwei GPIOs, wartet bis er stabil läuft
    /// und übernimmt dann den Bus
    pub fn begin_with_power<P, G>(
        i2c: I2C,
        mut delay: D,
        power: &mut PowerPins<P, G>,
    ) -> core::result::Result<Self, P::Error>
    where
        P: OutputPin,
        G: OutputPin<Error = P::Error>,
    {
        power.start()?;
        delay.delay_ms(POWER_SETTLE_MS);
        Ok(Self::begin(i2c, delay))
    }

    /// Gibt Bus und Delay zurück
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // ========================================================================
    // Bus-Scan
    // ========================================================================

    /// Scannt `from..=to` aufsteigend, ein Ergebnis pro Adresse
    pub fn scan_bus(&mut self, from: u8, to: u8) -> BusScan<'_, I2C> {
        BusScan::new(&mut self.i2c, from, to)
    }

    /// Erste Adresse in 1..=119, die mit ACK antwortet
    pub fn find_first_device(&mut self) -> Option<u8> {
        let found = (SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS)
            .find(|&address| scan::probe(&mut self.i2c, address).is_ack());

        #[cfg(feature = "defmt")]
        if found.is_none() {
            defmt::warn!("ctrlm: no device on bus");
        }

        found
    }

    // ========================================================================
    // Generischer Transport
    // ========================================================================

    /// Schreibt beliebige Bytes als eine Transaktion
    pub fn send_command(&mut self, address: u8, bytes: &[u8]) -> Result<(), I2C::Error> {
        let address = Self::valid_address(address)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("ctrlm: 0x{=u8:02x} <- {=[u8]:02x}", address, bytes);
        self.i2c.write(address, bytes).map_err(CtrlMError::from_bus)
    }

    /// Kodiert und sendet ein Kommando
    pub fn send(&mut self, address: u8, command: &Command) -> Result<(), I2C::Error> {
        self.send_command(address, command.encode().as_bytes())
    }

    /// Liest genau `buf.len()` Bytes
    ///
    /// Der Aufrufer muss die Antwortlänge kennen, das Protokoll hat kein Längenbyte.
    pub fn receive_bytes(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2C::Error> {
        let address = Self::valid_address(address)?;
        self.i2c.read(address, buf).map_err(CtrlMError::from_bus)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("ctrlm: 0x{=u8:02x} -> {=[u8]:02x}", address, &*buf);
        Ok(())
    }

    fn valid_address(address: u8) -> Result<u8, I2C::Error> {
        if address > MAX_ADDRESS {
            return Err(CtrlMError::InvalidAddress(address));
        }
        Ok(address)
    }

    /// Sendet ein Kommando und liest eine Antwort fester Länge
    fn query<const N: usize>(
        &mut self,
        address: u8,
        command: &Command,
    ) -> Result<[u8; N], I2C::Error> {
        debug_assert!(N <= command.response_len());
        self.send(address, command)?;
        let mut response = [0u8; N];
        self.receive_bytes(address, &mut response)?;
        Ok(response)
    }

    // ========================================================================
    // Adressierung
    // ========================================================================

    /// Programmiert die Bus-Adresse über General-Call um
    ///
    /// Betrifft **alle** CtrlM am Bus. Wartet danach 50 ms, bis die neue
    /// Adresse gespeichert ist.
    pub fn set_address(&mut self, new_address: u8) -> Result<(), I2C::Error> {
        let new_address = Self::valid_address(new_address)?;
        self.send(GENERAL_CALL_ADDRESS, &Command::SetAddress { new_address })?;
        self.delay.delay_ms(SET_ADDRESS_SETTLE_MS);
        #[cfg(feature = "defmt")]
        defmt::info!("ctrlm: address set to 0x{=u8:02x}", new_address);
        Ok(())
    }

    /// Adresse, die der CtrlM selbst meldet
    pub fn get_address(&mut self, address: u8) -> Result<u8, I2C::Error> {
        let [reported] = self.query::<1>(address, &Command::GetAddress)?;
        Ok(reported)
    }

    /// Prüft, ob unter `address` wirklich ein CtrlM mit dieser Adresse antwortet
    ///
    /// - `Ok(())`: Adresse stimmt
    /// - `Err(NoResponse)`: keine Antwort
    /// - `Err(AddressMismatch)`: Gerät meldet eine andere Adresse
    pub fn check_address(&mut self, address: u8) -> Result<(), I2C::Error> {
        let found = self.get_address(address)?;
        if found != address {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "ctrlm: address mismatch, expected 0x{=u8:02x}, got 0x{=u8:02x}",
                address,
                found
            );
            return Err(CtrlMError::AddressMismatch {
                expected: address,
                found,
            });
        }
        Ok(())
    }

    pub fn set_send_address(
        &mut self,
        address: u8,
        freem_address: u8,
        target_address: u8,
    ) -> Result<(), I2C::Error> {
        self.send(
            address,
            &Command::SetSendAddress {
                freem_address,
                target_address,
            },
        )
    }

    /// Schreibt eine neue FreeM-Adresse (Payload mit Checksumme)
    pub fn write_freem_address(&mut self, address: u8, freem_address: u8) -> Result<(), I2C::Error> {
        self.send(address, &Command::WriteFreeMAddress { freem_address })
    }

    pub fn get_version(&mut self, address: u8) -> Result<Version, I2C::Error> {
        self.query::<2>(address, &Command::GetVersion)
            .map(Version::from)
    }

    // ========================================================================
    // IR
    // ========================================================================

    pub fn set_ir_frequency(
        &mut self,
        address: u8,
        frequency_hz: u16,
        duty_percent: u8,
    ) -> Result<(), I2C::Error> {
        self.send(
            address,
            &Command::SetIrFrequency {
                frequency_hz,
                duty_percent,
            },
        )
    }

    pub fn set_ir_led(&mut self, address: u8, on: bool) -> Result<(), I2C::Error> {
        self.send(address, &Command::SetIrLed { on })
    }

    pub fn send_ir_code(&mut self, address: u8, code: IrCode) -> Result<(), I2C::Error> {
        self.send(address, &Command::SendIrCode(code))
    }

    // ========================================================================
    // Farben
    // ========================================================================

    pub fn fade_to_rgb(&mut self, address: u8, color: RGB8) -> Result<(), I2C::Error> {
        self.send(address, &Command::FadeToRgb(color))
    }

    pub fn fade_to_hsb(&mut self, address: u8, color: Hsb) -> Result<(), I2C::Error> {
        self.send(address, &Command::FadeToHsb(color))
    }

    /// Setzt die Farbe sofort, ohne Fade
    pub fn set_rgb(&mut self, address: u8, color: RGB8) -> Result<(), I2C::Error> {
        self.send(address, &Command::SetRgb(color))
    }

    /// Fade zu einer Zufallsfarbe, `max_delta` begrenzt die Abweichung je Kanal
    pub fn fade_to_random_rgb(&mut self, address: u8, max_delta: RGB8) -> Result<(), I2C::Error> {
        self.send(address, &Command::FadeToRandomRgb(max_delta))
    }

    pub fn fade_to_random_hsb(&mut self, address: u8, max_delta: Hsb) -> Result<(), I2C::Error> {
        self.send(address, &Command::FadeToRandomHsb(max_delta))
    }

    /// 0 = langsamster Fade, 255 = sofort
    pub fn set_fade_speed(&mut self, address: u8, speed: u8) -> Result<(), I2C::Error> {
        self.send(address, &Command::SetFadeSpeed(speed))
    }

    pub fn set_time_adjust(&mut self, address: u8, adjust: i8) -> Result<(), I2C::Error> {
        self.send(address, &Command::SetTimeAdjust(adjust))
    }

    pub fn get_rgb_color(&mut self, address: u8) -> Result<RGB8, I2C::Error> {
        let [r, g, b] = self.query::<3>(address, &Command::GetRgbColor)?;
        Ok(RGB8 { r, g, b })
    }

    // ========================================================================
    // Light Scripts
    // ========================================================================

    pub fn stop_script(&mut self, address: u8) -> Result<(), I2C::Error> {
        self.send(address, &Command::StopScript)
    }

    pub fn play_script(
        &mut self,
        address: u8,
        script_id: u8,
        repetitions: u8,
        position: u8,
    ) -> Result<(), I2C::Error> {
        self.send(
            address,
            &Command::PlayScript {
                script_id,
                repetitions,
                position,
            },
        )
    }

    pub fn stop_extended_script(&mut self, address: u8) -> Result<(), I2C::Error> {
        self.send(address, &Command::StopExtendedScript)
    }

    pub fn play_extended_script(
        &mut self,
        address: u8,
        repetitions: u8,
        position: u8,
    ) -> Result<(), I2C::Error> {
        self.send(
            address,
            &Command::PlayExtendedScript {
                repetitions,
                position,
            },
        )
    }

    /// Verhalten nach dem Einschalten, wird im CtrlM dauerhaft gespeichert
    pub fn set_startup_params(
        &mut self,
        address: u8,
        params: StartupParams,
    ) -> Result<(), I2C::Error> {
        self.send(address, &Command::SetStartupParams(params))
    }

    // ========================================================================
    // Digitale Eingänge
    // ========================================================================

    /// Eingänge als 1-Byte Bitfeld
    pub fn get_inputs_compact(&mut self, address: u8) -> Result<u8, I2C::Error> {
        let [bits] = self.query::<1>(address, &Command::GetInputs)?;
        Ok(bits)
    }

    /// Alle 4 Eingangs-Bytes
    ///
    /// Liest so lange im Abstand von `poll.interval_ms`, bis der CtrlM
    /// antwortet oder `poll.timeout_ms` verstrichen ist. Andere Busfehler
    /// als ein NACK brechen sofort ab.
    pub fn get_inputs(&mut self, address: u8, poll: PollTimeout) -> Result<Inputs, I2C::Error> {
        self.send(address, &Command::GetInputs)?;

        let interval_ms = poll.interval_ms.max(1);
        let mut waited_ms: u32 = 0;
        let mut buf = [0u8; 4];
        loop {
            match self.receive_bytes(address, &mut buf) {
                Ok(()) => return Ok(Inputs(buf)),
                Err(CtrlMError::NoResponse) => {}
                Err(e) => return Err(e),
            }

            if waited_ms >= poll.timeout_ms {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "ctrlm: inputs of 0x{=u8:02x} timed out after {=u32} ms",
                    address,
                    waited_ms
                );
                return Err(CtrlMError::Timeout);
            }

            self.delay.delay_ms(interval_ms);
            waited_ms = waited_ms.saturating_add(interval_ms);
        }
    }
}
