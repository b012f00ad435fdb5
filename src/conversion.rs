//! Conversion data decoding.

use crate::params::Gain;
use crate::registers::{Status, Sys};

/// Bytes of conversion data in every frame.
pub const DATA_BYTES: usize = 3;
/// Largest conversion frame: STATUS, three data bytes, CRC.
pub const MAX_FRAME_BYTES: usize = DATA_BYTES + 2;

// 2^23, full scale of the 24-bit two's-complement code.
const FULL_SCALE: f32 = 8_388_608.0;

/// Layout of a conversion data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameFormat {
    /// STATUS byte precedes the data.
    pub status: bool,
    /// CRC byte follows the data.
    pub crc: bool,
}

impl FrameFormat {
    /// Creates a frame layout from explicit flags.
    pub const fn new(status: bool, crc: bool) -> Self {
        Self { status, crc }
    }

    /// Derives the layout from `SYS`, letting each override replace the
    /// corresponding register bit.
    pub fn resolve(sys: Sys, status: Option<bool>, crc: Option<bool>) -> Self {
        Self {
            status: status.unwrap_or(sys.status_enabled()),
            crc: crc.unwrap_or(sys.crc_enabled()),
        }
    }

    /// Total number of bytes in the frame, between 3 and 5.
    pub const fn len(self) -> usize {
        DATA_BYTES + self.status as usize + self.crc as usize
    }
}

impl From<Sys> for FrameFormat {
    fn from(sys: Sys) -> Self {
        Self::resolve(sys, None, None)
    }
}

/// One conversion result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conversion {
    /// STATUS byte, when the frame carried one.
    pub status: Option<u8>,
    /// Conversion code sign-extended from 24 bits.
    pub data: i32,
    /// CRC byte, when the frame carried one.
    pub crc: Option<u8>,
}

impl Conversion {
    /// Decodes a frame laid out as `format`.
    ///
    /// Returns `None` if `frame` is not exactly `format.len()` bytes long.
    pub fn decode(format: FrameFormat, frame: &[u8]) -> Option<Self> {
        if frame.len() != format.len() {
            return None;
        }

        let (status, rest) = if format.status {
            let (first, rest) = frame.split_first()?;
            (Some(*first), rest)
        } else {
            (None, frame)
        };

        let (data, rest) = rest.split_at(DATA_BYTES);
        let raw = u32::from_be_bytes([0, data[0], data[1], data[2]]);
        let crc = if format.crc { rest.first().copied() } else { None };

        Some(Self {
            status,
            data: sign_extend_24(raw),
            crc,
        })
    }

    /// The 24-bit code exactly as transmitted.
    pub const fn raw(&self) -> u32 {
        (self.data as u32) & 0x00FF_FFFF
    }

    /// Decoded STATUS flags, when the frame carried them.
    pub fn status_flags(&self) -> Option<Status> {
        self.status.map(Status::from)
    }

    /// Converts the code to volts for the given reference voltage and gain.
    pub fn to_voltage(&self, reference_volts: f32, gain: f32) -> f32 {
        (self.data as f32 / FULL_SCALE) * (reference_volts / gain)
    }

    /// Same as [`Conversion::to_voltage`] with the gain taken from a [`Gain`] setting.
    pub fn to_voltage_with_gain(&self, reference_volts: f32, gain: Gain) -> f32 {
        self.to_voltage(reference_volts, f32::from(gain.multiplier()))
    }
}

/// Sign-extends a 24-bit two's-complement value.
pub const fn sign_extend_24(raw: u32) -> i32 {
    ((raw << 8) as i32) >> 8
}

/// Combines three calibration bytes, lowest address first, into the signed
/// offset calibration word.
pub fn offset_from_bytes(bytes: [u8; 3]) -> i32 {
    sign_extend_24(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]))
}

/// Splits a signed offset calibration word into `OFCAL0..=OFCAL2`.
pub fn offset_to_bytes(offset: i32) -> [u8; 3] {
    let [b0, b1, b2, _] = offset.to_le_bytes();
    [b0, b1, b2]
}

/// Combines three calibration bytes, lowest address first, into the gain
/// calibration word (0x400000 is unity).
pub fn gain_from_bytes(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// Splits a gain calibration word into `FSCAL0..=FSCAL2`.
pub fn gain_to_bytes(gain: u32) -> [u8; 3] {
    let [b0, b1, b2, _] = gain.to_le_bytes();
    [b0, b1, b2]
}
