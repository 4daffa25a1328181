//! Stromversorgung des CtrlM über zwei GPIO-Pins
//!
//! Steckt der CtrlM direkt auf dem Controller, wird er über einen Pin
//! (High = VCC) und einen zweiten Pin (Low = GND) versorgt.

use embedded_hal::digital::OutputPin;

/// Power- und Ground-Pin des CtrlM
///
/// Beide Pins müssen denselben Fehler-Typ haben (bei den meisten HALs
/// `Infallible`).
pub struct PowerPins<P, G> {
    power: P,
    ground: G,
}

impl<P, G> PowerPins<P, G>
where
    P: OutputPin,
    G: OutputPin<Error = P::Error>,
{
    pub fn new(power: P, ground: G) -> Self {
        Self { power, ground }
    }

    /// Schaltet die Versorgung ein: Ground zuerst auf Low, dann Power auf High
    pub fn start(&mut self) -> Result<(), P::Error> {
        self.ground.set_low()?;
        self.power.set_high()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("ctrlm: power on");
        Ok(())
    }

    /// Schaltet die Versorgung ab (beide Pins auf Low)
    ///
    /// Nützlich um den CtrlM per Power-Cycle zurückzusetzen.
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.power.set_low()?;
        self.ground.set_low()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("ctrlm: power off");
        Ok(())
    }

    /// Gibt die Pins zurück
    pub fn release(self) -> (P, G) {
        (self.power, self.ground)
    }
}
