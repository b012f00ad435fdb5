//! Command opcodes and transaction framing.
//!
//! Control, calibration and data-read commands are single opcode bytes.
//! `RREG` and `WREG` carry a two-byte header: the opcode OR'd with the start
//! address, then the register count minus one.

use crate::registers::Address;

/// Maximum number of registers a single `RREG`/`WREG` may span.
pub const MAX_REGISTER_COUNT: u8 = 18;
/// One past the highest register address (`GPIOCON`, 0x11).
pub const REGISTER_SPAN_END: u8 = 0x12;
/// Largest `WREG` frame: two header bytes plus every register.
pub const MAX_WREG_FRAME: usize = 2 + MAX_REGISTER_COUNT as usize;

const RREG_OPCODE: u8 = 0x20;
const WREG_OPCODE: u8 = 0x40;

/// Single-byte commands understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// No operation; clocked out while reading.
    Nop = 0x00,
    /// Exit power-down mode.
    Wakeup = 0x02,
    /// Enter power-down mode.
    PowerDown = 0x04,
    /// Reset the device.
    Reset = 0x06,
    /// Start or restart conversions.
    Start = 0x08,
    /// Stop conversions.
    Stop = 0x0A,
    /// Read conversion data.
    RData = 0x12,
    /// System offset calibration (`SYOCAL`).
    SystemOffsetCalibration = 0x16,
    /// System gain calibration (`SYGCAL`).
    SystemGainCalibration = 0x17,
    /// Self offset calibration (`SFOCAL`).
    SelfOffsetCalibration = 0x19,
}

impl Command {
    /// Opcode byte sent on DIN.
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the three calibration commands.
    pub const fn is_calibration(self) -> bool {
        matches!(
            self,
            Self::SystemOffsetCalibration
                | Self::SystemGainCalibration
                | Self::SelfOffsetCalibration
        )
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

/// Checks that `count` registers starting at `start` fit in the register map.
///
/// The span must satisfy `1 <= count <= 18` and `start + count <= 0x12`.
pub const fn validate_range(start: Address, count: u8) -> bool {
    if count < 1 || count > MAX_REGISTER_COUNT {
        return false;
    }
    (start as u8) + count <= REGISTER_SPAN_END
}

/// Header for reading `count` registers starting at `start`.
///
/// Returns `None` when the span fails [`validate_range`].
pub const fn rreg_header(start: Address, count: u8) -> Option<[u8; 2]> {
    if !validate_range(start, count) {
        return None;
    }
    Some([RREG_OPCODE | start as u8, count - 1])
}

/// Header for writing `count` registers starting at `start`.
///
/// Returns `None` when the span fails [`validate_range`].
pub const fn wreg_header(start: Address, count: u8) -> Option<[u8; 2]> {
    if !validate_range(start, count) {
        return None;
    }
    Some([WREG_OPCODE | start as u8, count - 1])
}

/// Fills `frame` with a complete `WREG` transaction and returns its length.
///
/// `payload` must hold exactly the registers being written; the span is
/// validated against the payload length.
pub fn wreg_frame(
    start: Address,
    payload: &[u8],
    frame: &mut [u8; MAX_WREG_FRAME],
) -> Option<usize> {
    let count = u8::try_from(payload.len()).ok()?;
    let header = wreg_header(start, count)?;
    let len = 2 + payload.len();
    frame[..2].copy_from_slice(&header);
    frame[2..len].copy_from_slice(payload);
    Some(len)
}
