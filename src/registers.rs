//! Register map definitions for the ADS124S08 ADC.
//!
//! Every register address has exactly one value type. Each type is a one-byte
//! bitfield with explicit bit positions, can be built from any raw byte, and
//! packs back into the byte written by `WREG`. Read-only bits are cleared by
//! [`Register::pack`].
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    BiasLevel, CalibrationSamples, ClockSource, ConversionDelay, ConversionMode, DeviceVariant,
    DigitalFilter, Gain, GlobalChop, GpioDirection, GpioPin, IdacMagnitude, IdacOutput,
    InputChannel, InternalReference, OutputRate, PgaMode, PorFlag, RailFlag, ReadyFlag,
    ReferenceBuffer, ReferenceInput, ReferenceLevel, ReferenceMonitor, SystemMonitor,
};

/// Register addresses, `ID` (0x00) through `GPIOCON` (0x11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// Device identification.
    Id = 0x00,
    /// Device status flags.
    Status = 0x01,
    /// Input multiplexer.
    InpMux = 0x02,
    /// Gain and conversion delay.
    Pga = 0x03,
    /// Data rate, filter, clock and conversion mode.
    DataRate = 0x04,
    /// Reference control.
    Ref = 0x05,
    /// Excitation current magnitude.
    IdacMag = 0x06,
    /// Excitation current routing.
    IdacMux = 0x07,
    /// Sensor bias.
    VBias = 0x08,
    /// System control.
    Sys = 0x09,
    /// Offset calibration, low byte.
    OfCal0 = 0x0A,
    /// Offset calibration, middle byte.
    OfCal1 = 0x0B,
    /// Offset calibration, high byte.
    OfCal2 = 0x0C,
    /// Gain calibration, low byte.
    FsCal0 = 0x0D,
    /// Gain calibration, middle byte.
    FsCal1 = 0x0E,
    /// Gain calibration, high byte.
    FsCal2 = 0x0F,
    /// GPIO data and direction.
    GpioDat = 0x10,
    /// GPIO pin function.
    GpioCon = 0x11,
}

impl Address {
    /// Every register address in ascending order.
    pub const ALL: [Address; 18] = [
        Self::Id,
        Self::Status,
        Self::InpMux,
        Self::Pga,
        Self::DataRate,
        Self::Ref,
        Self::IdacMag,
        Self::IdacMux,
        Self::VBias,
        Self::Sys,
        Self::OfCal0,
        Self::OfCal1,
        Self::OfCal2,
        Self::FsCal0,
        Self::FsCal1,
        Self::FsCal2,
        Self::GpioDat,
        Self::GpioCon,
    ];

    /// Power-on reset value of the register at this address.
    pub const fn reset_value(self) -> u8 {
        match self {
            Self::Status => 0x80,
            Self::InpMux => 0x01,
            Self::DataRate => 0x14,
            Self::Ref => 0x10,
            Self::IdacMux => 0xFF,
            Self::Sys => 0x10,
            Self::FsCal2 => 0x40,
            _ => 0x00,
        }
    }
}

impl From<Address> for u8 {
    fn from(address: Address) -> Self {
        address as u8
    }
}

impl TryFrom<u8> for Address {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(value)
    }
}

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAccess {
    /// Read-only register; packs to zero.
    ReadOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata and serialization exposed by every register value type.
pub trait Register: Copy + From<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: Address;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Power-on reset value.
    const RESET_VALUE: u8;
    /// Bits carried by [`Register::pack`].
    const WRITE_MASK: u8;

    /// Raw byte as decoded, including read-only bits.
    fn raw(self) -> u8;

    /// Serializes the writable fields; read-only bits are zero.
    fn pack(self) -> u8 {
        self.raw() & Self::WRITE_MASK
    }

    /// Returns the register in its power-on state.
    fn reset() -> Self {
        Self::from(Self::RESET_VALUE)
    }
}

macro_rules! register {
    ($ty:ident, $address:ident, $access:ident, $mask:expr) => {
        impl From<u8> for $ty {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value.pack()
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                <Self as Register>::reset()
            }
        }

        impl Register for $ty {
            const ADDRESS: Address = Address::$address;
            const ACCESS: RegisterAccess = RegisterAccess::$access;
            const RESET_VALUE: u8 = Address::$address.reset_value();
            const WRITE_MASK: u8 = $mask;

            fn raw(self) -> u8 {
                self.into_bytes()[0]
            }
        }
    };
}

// Writes `value` into `width` bits of `raw` starting at `shift`.
const fn replace_bits(raw: u8, shift: u8, width: u8, value: u8) -> u8 {
    let mask = ((1u16 << width) - 1) as u8;
    (raw & !(mask << shift)) | ((value & mask) << shift)
}

/// Bitfield representation of the `ID` register (address `0x00`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id {
    // Device identifier (bits 2:0).
    #[skip(setters)]
    pub dev_id: DeviceVariant,
    #[skip]
    __: B5,
}

impl Id {
    /// Decoded device variant, or `None` for a reserved identifier.
    pub fn variant(&self) -> Option<DeviceVariant> {
        self.dev_id_or_err().ok()
    }
}

/// Bitfield representation of the `STATUS` register (address `0x01`).
///
/// Every flag is read-only here; [`Register::pack`] always yields zero.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // Reference monitor level 0 (bit 0).
    #[skip(setters)]
    pub fl_ref_l0: ReferenceLevel,
    // Reference monitor level 1 (bit 1).
    #[skip(setters)]
    pub fl_ref_l1: ReferenceLevel,
    // Negative PGA output near AVSS (bit 2).
    #[skip(setters)]
    pub fl_n_railn: RailFlag,
    // Negative PGA output near AVDD (bit 3).
    #[skip(setters)]
    pub fl_n_railp: RailFlag,
    // Positive PGA output near AVSS (bit 4).
    #[skip(setters)]
    pub fl_p_railn: RailFlag,
    // Positive PGA output near AVDD (bit 5).
    #[skip(setters)]
    pub fl_p_railp: RailFlag,
    // Device ready (bit 6).
    #[skip(setters)]
    pub rdy: ReadyFlag,
    // Power-on reset (bit 7).
    #[skip(setters)]
    pub fl_por: PorFlag,
}

impl Status {
    /// Returns `true` once the device accepts commands.
    pub fn is_ready(&self) -> bool {
        self.rdy() == ReadyFlag::Ready
    }

    /// Returns `true` when any PGA output is near a supply rail.
    pub fn any_rail_error(&self) -> bool {
        [
            self.fl_p_railp(),
            self.fl_p_railn(),
            self.fl_n_railp(),
            self.fl_n_railn(),
        ]
        .contains(&RailFlag::Error)
    }
}

/// Bitfield representation of the `INPMUX` register (address `0x02`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InpMux {
    // Negative input (bits 3:0).
    pub muxn: InputChannel,
    // Positive input (bits 7:4).
    pub muxp: InputChannel,
}

impl InpMux {
    /// Builds a multiplexer setting for the given input pair.
    pub fn pair(positive: InputChannel, negative: InputChannel) -> Self {
        Self::new().with_muxp(positive).with_muxn(negative)
    }

    /// Selects the positive input.
    pub fn set_positive(&mut self, channel: InputChannel) -> &mut Self {
        self.set_muxp(channel);
        self
    }

    /// Selects the negative input.
    pub fn set_negative(&mut self, channel: InputChannel) -> &mut Self {
        self.set_muxn(channel);
        self
    }
}

/// Bitfield representation of the `PGA` register (address `0x03`).
///
/// Gain and enable are coupled: the PGA must be enabled for any gain above 1
/// and a bypassed PGA requires unity gain. The setters keep the two
/// consistent unless told otherwise.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pga {
    // Gain selection (bits 2:0).
    #[skip(setters)]
    pub gain: Gain,
    // PGA enable (bits 4:3).
    #[skip(setters)]
    pub mode: PgaMode,
    // Conversion start delay (bits 7:5).
    pub delay: ConversionDelay,
}

impl Pga {
    const GAIN_SHIFT: u8 = 0;
    const MODE_SHIFT: u8 = 3;

    fn write_gain(&mut self, gain: Gain) {
        let raw = replace_bits(self.raw(), Self::GAIN_SHIFT, 3, gain as u8);
        *self = Self::from(raw);
    }

    fn write_mode(&mut self, mode: PgaMode) {
        let raw = replace_bits(self.raw(), Self::MODE_SHIFT, 2, mode as u8);
        *self = Self::from(raw);
    }

    /// Enables or bypasses the PGA; bypassing also forces unity gain.
    pub fn set_mode(&mut self, mode: PgaMode) -> &mut Self {
        self.set_mode_with(mode, true)
    }

    /// Enables or bypasses the PGA, forcing unity gain on bypass only if
    /// `unity_gain_if_bypassed` is set.
    pub fn set_mode_with(&mut self, mode: PgaMode, unity_gain_if_bypassed: bool) -> &mut Self {
        self.write_mode(mode);
        if mode == PgaMode::Bypassed && unity_gain_if_bypassed {
            self.write_gain(Gain::X1);
        }
        self
    }

    /// Selects the gain; any gain above 1 also enables the PGA.
    pub fn set_gain(&mut self, gain: Gain) -> &mut Self {
        self.set_gain_with(gain, true)
    }

    /// Selects the gain, enabling the PGA for non-unity gain only if
    /// `enable_if_not_unity` is set.
    pub fn set_gain_with(&mut self, gain: Gain, enable_if_not_unity: bool) -> &mut Self {
        self.write_gain(gain);
        if gain != Gain::X1 && enable_if_not_unity {
            self.write_mode(PgaMode::Enabled);
        }
        self
    }

    /// Consuming form of [`Pga::set_mode`].
    pub fn with_mode(mut self, mode: PgaMode) -> Self {
        self.set_mode(mode);
        self
    }

    /// Consuming form of [`Pga::set_gain`].
    pub fn with_gain(mut self, gain: Gain) -> Self {
        self.set_gain(gain);
        self
    }
}

/// Bitfield representation of the `DATARATE` register (address `0x04`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRate {
    // Output data rate (bits 3:0).
    pub dr: OutputRate,
    // Digital filter (bit 4).
    pub filter: DigitalFilter,
    // Conversion mode (bit 5).
    pub mode: ConversionMode,
    // Clock source (bit 6).
    pub clk: ClockSource,
    // Global chop (bit 7).
    pub g_chop: GlobalChop,
}

/// Bitfield representation of the `REF` register (address `0x05`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ref {
    // Internal reference configuration (bits 1:0).
    pub refcon: InternalReference,
    // Reference input selection (bits 3:2).
    #[skip(setters)]
    pub refsel: ReferenceInput,
    // Negative reference buffer (bit 4).
    pub refn_buf: ReferenceBuffer,
    // Positive reference buffer (bit 5).
    pub refp_buf: ReferenceBuffer,
    // Reference monitor (bits 7:6).
    pub fl_ref_en: ReferenceMonitor,
}

impl Ref {
    const REFSEL_SHIFT: u8 = 2;

    /// Selects the reference input; the internal reference also disables both
    /// reference buffers.
    pub fn select_reference(&mut self, input: ReferenceInput) -> &mut Self {
        self.select_reference_with(input, true)
    }

    /// Selects the reference input, disabling the buffers for the internal
    /// reference only if `disable_buffers_if_internal` is set.
    pub fn select_reference_with(
        &mut self,
        input: ReferenceInput,
        disable_buffers_if_internal: bool,
    ) -> &mut Self {
        let raw = replace_bits(self.raw(), Self::REFSEL_SHIFT, 2, input as u8);
        *self = Self::from(raw);
        if input == ReferenceInput::Internal && disable_buffers_if_internal {
            self.set_refp_buf(ReferenceBuffer::Disabled);
            self.set_refn_buf(ReferenceBuffer::Disabled);
        }
        self
    }

    /// Consuming form of [`Ref::select_reference`].
    pub fn with_reference(mut self, input: ReferenceInput) -> Self {
        self.select_reference(input);
        self
    }
}

/// Bitfield representation of the `IDACMAG` register (address `0x06`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdacMag {
    // Excitation current magnitude (bits 3:0).
    pub imag: IdacMagnitude,
    #[skip]
    __: B2,
    // Low-side power switch (bit 6).
    pub psw: bool,
    // PGA rail flag monitor (bit 7).
    pub fl_rail_en: bool,
}

/// Bitfield representation of the `IDACMUX` register (address `0x07`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdacMux {
    // IDAC1 output (bits 3:0).
    pub i1mux: IdacOutput,
    // IDAC2 output (bits 7:4).
    pub i2mux: IdacOutput,
}

/// Bitfield representation of the `VBIAS` register (address `0x08`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VBias {
    pub vb_ain0: bool,
    pub vb_ain1: bool,
    pub vb_ain2: bool,
    pub vb_ain3: bool,
    pub vb_ain4: bool,
    pub vb_ain5: bool,
    // Bias on AINCOM (bit 6).
    pub vb_ainc: bool,
    // Bias level (bit 7).
    pub vb_level: BiasLevel,
}

impl VBias {
    // Bit carrying the bias enable for `channel`; only AIN0..AIN5 and AINCOM
    // can be biased.
    const fn bias_bit(channel: InputChannel) -> Option<u8> {
        match channel {
            InputChannel::Ain0 => Some(0),
            InputChannel::Ain1 => Some(1),
            InputChannel::Ain2 => Some(2),
            InputChannel::Ain3 => Some(3),
            InputChannel::Ain4 => Some(4),
            InputChannel::Ain5 => Some(5),
            InputChannel::AinCom => Some(6),
            _ => None,
        }
    }

    /// Returns `true` when the bias voltage is applied to `channel`.
    pub fn is_biased(&self, channel: InputChannel) -> bool {
        match Self::bias_bit(channel) {
            Some(bit) => self.raw() & (1 << bit) != 0,
            None => false,
        }
    }

    /// Applies or removes the bias voltage on `channel`.
    ///
    /// Inputs without a bias switch (AIN6 to AIN11) are left unchanged.
    pub fn set_bias(&mut self, channel: InputChannel, enabled: bool) -> &mut Self {
        if let Some(bit) = Self::bias_bit(channel) {
            let raw = replace_bits(self.raw(), bit, 1, enabled as u8);
            *self = Self::from(raw);
        }
        self
    }
}

/// Bitfield representation of the `SYS` register (address `0x09`).
///
/// `SENDSTAT` and `CRC` decide how many bytes an `RDATA` frame carries.
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sys {
    // Prepend the STATUS byte to conversion data (bit 0).
    pub sendstat: bool,
    // Append a CRC byte to conversion data (bit 1).
    pub crc: bool,
    // SPI timeout (bit 2).
    pub timeout: bool,
    // Calibration sample count (bits 4:3).
    pub cal_samp: CalibrationSamples,
    // System monitor (bits 7:5).
    pub sys_mon: SystemMonitor,
}

impl Sys {
    /// Returns `true` when conversion frames start with a STATUS byte.
    pub fn status_enabled(&self) -> bool {
        self.sendstat()
    }

    /// Returns `true` when conversion frames end with a CRC byte.
    pub fn crc_enabled(&self) -> bool {
        self.crc()
    }
}

macro_rules! calibration_byte {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[bitfield]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $ty {
            pub value: u8,
        }

        register!($ty, $ty, ReadWrite, 0xFF);
    };
}

calibration_byte!(
    /// Offset calibration bits 7:0 (`OFCAL0`, address `0x0A`).
    OfCal0
);
calibration_byte!(
    /// Offset calibration bits 15:8 (`OFCAL1`, address `0x0B`).
    OfCal1
);
calibration_byte!(
    /// Offset calibration bits 23:16 (`OFCAL2`, address `0x0C`).
    OfCal2
);
calibration_byte!(
    /// Gain calibration bits 7:0 (`FSCAL0`, address `0x0D`).
    FsCal0
);
calibration_byte!(
    /// Gain calibration bits 15:8 (`FSCAL1`, address `0x0E`).
    FsCal1
);
calibration_byte!(
    /// Gain calibration bits 23:16 (`FSCAL2`, address `0x0F`).
    FsCal2
);

/// Bitfield representation of the `GPIODAT` register (address `0x10`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioDat {
    // Pin levels, GPIO0 in bit 0 (bits 3:0).
    pub dat: B4,
    // Pin directions, 1 = input (bits 7:4).
    pub dir: B4,
}

impl GpioDat {
    /// Direction of a single pin.
    pub fn direction(&self, pin: GpioPin) -> GpioDirection {
        if self.dir() & pin.mask() != 0 {
            GpioDirection::Input
        } else {
            GpioDirection::Output
        }
    }

    /// Sets the direction of a single pin.
    pub fn set_direction(&mut self, pin: GpioPin, direction: GpioDirection) -> &mut Self {
        let dir = match direction {
            GpioDirection::Input => self.dir() | pin.mask(),
            GpioDirection::Output => self.dir() & !pin.mask(),
        };
        self.set_dir(dir);
        self
    }

    /// Level of a single pin.
    pub fn level(&self, pin: GpioPin) -> bool {
        self.dat() & pin.mask() != 0
    }

    /// Drives a single output pin.
    pub fn set_level(&mut self, pin: GpioPin, high: bool) -> &mut Self {
        let dat = if high {
            self.dat() | pin.mask()
        } else {
            self.dat() & !pin.mask()
        };
        self.set_dat(dat);
        self
    }
}

/// Bitfield representation of the `GPIOCON` register (address `0x11`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioCon {
    // Pin function, 1 = GPIO (bits 3:0).
    pub con: B4,
    #[skip]
    __: B4,
}

impl GpioCon {
    /// Returns `true` when the pin works as GPIO rather than an analog input.
    pub fn is_gpio(&self, pin: GpioPin) -> bool {
        self.con() & pin.mask() != 0
    }

    /// Switches a pin between GPIO and analog input.
    pub fn set_gpio(&mut self, pin: GpioPin, enabled: bool) -> &mut Self {
        let con = if enabled {
            self.con() | pin.mask()
        } else {
            self.con() & !pin.mask()
        };
        self.set_con(con);
        self
    }
}

register!(Id, Id, ReadOnly, 0x00);
register!(Status, Status, ReadOnly, 0x00);
register!(InpMux, InpMux, ReadWrite, 0xFF);
register!(Pga, Pga, ReadWrite, 0xFF);
register!(DataRate, DataRate, ReadWrite, 0xFF);
register!(Ref, Ref, ReadWrite, 0xFF);
register!(IdacMag, IdacMag, ReadWrite, 0xFF);
register!(IdacMux, IdacMux, ReadWrite, 0xFF);
register!(VBias, VBias, ReadWrite, 0xFF);
register!(Sys, Sys, ReadWrite, 0xFF);
register!(GpioDat, GpioDat, ReadWrite, 0xFF);
register!(GpioCon, GpioCon, ReadWrite, 0xFF);
