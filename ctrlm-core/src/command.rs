//! CtrlM Kommandos und Frame-Encoding
//!
//! Jedes Kommando ist ein ASCII-Opcode gefolgt von einer festen Anzahl
//! Argument-Bytes. Es gibt kein Längenbyte und keine Framing-Bytes,
//! Multi-Byte Werte sind Big-Endian.
//!
//! Die Funktionen hier sind pure (kein Bus-Zugriff) und daher direkt testbar.

use core::fmt;

use rgb::RGB8;

use crate::config::FREEM_START_BYTE;
use crate::types::{Hsb, IrCode, StartupParams};

/// Maximale Frame-Länge: Opcode + 8 Bytes (FreeM-Payload inkl. Checksumme)
pub const MAX_FRAME_LEN: usize = 9;

/// Opcodes des CtrlM
pub mod opcode {
    pub const SET_ADDRESS: u8 = b'A';
    pub const GET_ADDRESS: u8 = b'a';
    pub const SET_SEND_ADDRESS: u8 = b'@';
    pub const WRITE_FREEM_ADDRESS: u8 = b'!';
    pub const GET_VERSION: u8 = b'Z';
    pub const SET_IR_FREQUENCY: u8 = b'#';
    pub const SET_IR_LED: u8 = b'%';
    pub const SEND_IR_CODE: u8 = b'$';
    pub const FADE_TO_RGB: u8 = b'c';
    pub const FADE_TO_HSB: u8 = b'h';
    pub const SET_RGB: u8 = b'n';
    pub const FADE_TO_RANDOM_RGB: u8 = b'C';
    pub const FADE_TO_RANDOM_HSB: u8 = b'H';
    pub const SET_FADE_SPEED: u8 = b'f';
    pub const SET_TIME_ADJUST: u8 = b't';
    pub const GET_RGB_COLOR: u8 = b'g';
    pub const STOP_SCRIPT: u8 = b'o';
    pub const PLAY_SCRIPT: u8 = b'p';
    pub const STOP_EXTENDED_SCRIPT: u8 = b'O';
    pub const PLAY_EXTENDED_SCRIPT: u8 = b'P';
    pub const SET_STARTUP_PARAMS: u8 = b'B';
    pub const GET_INPUTS: u8 = b'i';
}

/// Bestätigungsmuster von `SetAddress` (zwischen den beiden Adress-Bytes)
const SET_ADDRESS_MAGIC: [u8; 2] = [0xD0, 0x0D];

/// Berechnet die 8-Bit Checksumme (Summe modulo 256)
///
/// ```
/// # use ctrlm_core::checksum;
/// assert_eq!(checksum(&[0x55, 0x20, 0xFF, 0xFF]), 0x73);
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Baut den 8-Byte FreeM-Payload: Startbyte, neue Adresse, Platzhalter, Checksumme
pub fn freem_payload(freem_address: u8) -> [u8; 8] {
    let mut payload = [
        FREEM_START_BYTE,
        freem_address,
        0xFF, // Ziel-Adresse (Platzhalter)
        0xFF, // Ziel-Kommando (Platzhalter)
        0x00,
        0x00,
        0x00,
        0x00,
    ];
    payload[7] = checksum(&payload[..7]);
    payload
}

/// Ein fertig kodierter Kommando-Frame
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Frame {
    fn new(opcode: u8, args: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_FRAME_LEN];
        bytes[0] = opcode;
        bytes[1..=args.len()].copy_from_slice(args);
        Self {
            bytes,
            len: args.len() + 1,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Ein Frame enthält immer mindestens den Opcode
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Frame").field(&self.as_bytes()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Frame({=[u8]:02x})", self.as_bytes())
    }
}

/// Alle Kommandos des CtrlM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Neue Bus-Adresse setzen (nur über General-Call sinnvoll)
    SetAddress { new_address: u8 },
    GetAddress,
    /// Weiterleitung an `target_address` über den FreeM-Kanal `freem_address`
    SetSendAddress {
        freem_address: u8,
        target_address: u8,
    },
    WriteFreeMAddress { freem_address: u8 },
    GetVersion,
    SetIrFrequency { frequency_hz: u16, duty_percent: u8 },
    SetIrLed { on: bool },
    SendIrCode(IrCode),
    FadeToRgb(RGB8),
    FadeToHsb(Hsb),
    SetRgb(RGB8),
    /// Maximale Abweichung pro Kanal
    FadeToRandomRgb(RGB8),
    /// Maximale Abweichung pro Kanal
    FadeToRandomHsb(Hsb),
    /// 0 = langsamster Fade, 255 = sofort
    SetFadeSpeed(u8),
    /// Additiver Offset auf alle Script-Dauern, 0 = aus
    SetTimeAdjust(i8),
    GetRgbColor,
    StopScript,
    PlayScript {
        script_id: u8,
        repetitions: u8,
        position: u8,
    },
    StopExtendedScript,
    PlayExtendedScript { repetitions: u8, position: u8 },
    SetStartupParams(StartupParams),
    GetInputs,
}

impl Command {
    pub fn opcode(&self) -> u8 {
        match self {
            Command::SetAddress { .. } => opcode::SET_ADDRESS,
            Command::GetAddress => opcode::GET_ADDRESS,
            Command::SetSendAddress { .. } => opcode::SET_SEND_ADDRESS,
            Command::WriteFreeMAddress { .. } => opcode::WRITE_FREEM_ADDRESS,
            Command::GetVersion => opcode::GET_VERSION,
            Command::SetIrFrequency { .. } => opcode::SET_IR_FREQUENCY,
            Command::SetIrLed { .. } => opcode::SET_IR_LED,
            Command::SendIrCode(_) => opcode::SEND_IR_CODE,
            Command::FadeToRgb(_) => opcode::FADE_TO_RGB,
            Command::FadeToHsb(_) => opcode::FADE_TO_HSB,
            Command::SetRgb(_) => opcode::SET_RGB,
            Command::FadeToRandomRgb(_) => opcode::FADE_TO_RANDOM_RGB,
            Command::FadeToRandomHsb(_) => opcode::FADE_TO_RANDOM_HSB,
            Command::SetFadeSpeed(_) => opcode::SET_FADE_SPEED,
            Command::SetTimeAdjust(_) => opcode::SET_TIME_ADJUST,
            Command::GetRgbColor => opcode::GET_RGB_COLOR,
            Command::StopScript => opcode::STOP_SCRIPT,
            Command::PlayScript { .. } => opcode::PLAY_SCRIPT,
            Command::StopExtendedScript => opcode::STOP_EXTENDED_SCRIPT,
            Command::PlayExtendedScript { .. } => opcode::PLAY_EXTENDED_SCRIPT,
            Command::SetStartupParams(_) => opcode::SET_STARTUP_PARAMS,
            Command::GetInputs => opcode::GET_INPUTS,
        }
    }

    /// Anzahl Bytes, die der CtrlM auf dieses Kommando zurückschickt
    ///
    /// `GetInputs` liefert 4 Bytes; die kompakte Abfrage liest davon nur das erste.
    pub fn response_len(&self) -> usize {
        match self {
            Command::GetAddress => 1,
            Command::GetVersion => 2,
            Command::GetRgbColor => 3,
            Command::GetInputs => 4,
            _ => 0,
        }
    }

    /// Kodiert das Kommando in einen Frame
    pub fn encode(&self) -> Frame {
        let op = self.opcode();
        match *self {
            Command::SetAddress { new_address } => Frame::new(
                op,
                &[
                    new_address,
                    SET_ADDRESS_MAGIC[0],
                    SET_ADDRESS_MAGIC[1],
                    new_address,
                ],
            ),
            Command::SetSendAddress {
                freem_address,
                target_address,
            } => Frame::new(op, &[freem_address, target_address, 0]),
            Command::WriteFreeMAddress { freem_address } => {
                Frame::new(op, &freem_payload(freem_address))
            }
            Command::SetIrFrequency {
                frequency_hz,
                duty_percent,
            } => {
                let [hi, lo] = frequency_hz.to_be_bytes();
                Frame::new(op, &[hi, lo, duty_percent])
            }
            Command::SetIrLed { on } => Frame::new(op, &[u8::from(on), 0, 0]),
            Command::SendIrCode(ir) => {
                let [b3, b2, b1, b0] = ir.code.to_be_bytes();
                Frame::new(op, &[ir.code_type, b3, b2, b1, b0])
            }
            Command::FadeToRgb(c) | Command::SetRgb(c) | Command::FadeToRandomRgb(c) => {
                Frame::new(op, &[c.r, c.g, c.b])
            }
            Command::FadeToHsb(c) | Command::FadeToRandomHsb(c) => {
                Frame::new(op, &[c.hue, c.saturation, c.brightness])
            }
            Command::SetFadeSpeed(speed) => Frame::new(op, &[speed]),
            Command::SetTimeAdjust(adjust) => Frame::new(op, &adjust.to_be_bytes()),
            Command::PlayScript {
                script_id,
                repetitions,
                position,
            } => Frame::new(op, &[script_id, repetitions, position]),
            Command::PlayExtendedScript {
                repetitions,
                position,
            } => Frame::new(op, &[0, repetitions, position]),
            Command::SetStartupParams(p) => Frame::new(
                op,
                &[
                    p.mode,
                    p.script_id,
                    p.repetitions,
                    p.fade_speed,
                    p.time_adjust.to_be_bytes()[0],
                ],
            ),
            Command::GetAddress
            | Command::GetVersion
            | Command::GetRgbColor
            | Command::StopScript
            | Command::StopExtendedScript
            | Command::GetInputs => Frame::new(op, &[]),
        }
    }
}

// RGB8 hat kein defmt::Format, daher über den kodierten Frame
#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Command({})", self.encode())
    }
}
