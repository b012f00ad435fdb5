//! Strongly typed parameter enumerations for the ADS124S08 driver.
//!
//! These enums map directly to datasheet field encodings and are used by the
//! register types in [`registers`](crate::registers) and by
//! [`Config`](crate::config::Config). Fields that have reserved encodings only
//! list the named values, so a setter can never produce a reserved pattern.
//!
//! # Examples
//!
//! ```rust
//! use ads124s08::params::{Gain, InputChannel, OutputRate};
//!
//! let gain = Gain::X16;
//! let rate = OutputRate::Sps400;
//! let channel = InputChannel::Ain3;
//! assert_eq!(gain.multiplier(), 16);
//! assert_eq!(rate.millihertz(), 400_000);
//! assert_eq!(channel as u8, 3);
//! ```

use modular_bitfield::prelude::Specifier;

/// Device variant reported in `ID.DEV_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum DeviceVariant {
    /// 12-channel ADS124S08.
    Ads124s08 = 0b000,
    /// 6-channel ADS124S06.
    Ads124s06 = 0b001,
}

/// Power-on reset flag (`STATUS.FL_POR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum PorFlag {
    /// No power-on reset since the flag was last cleared.
    Cleared = 0,
    /// A power-on reset occurred since the flag was last cleared.
    NotCleared = 1,
}

/// Device ready flag (`STATUS.RDY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ReadyFlag {
    /// Ready for communication.
    Ready = 0,
    /// Still starting up.
    NotReady = 1,
}

/// PGA output rail flag (`STATUS.FL_x_RAILy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum RailFlag {
    /// PGA output inside the linear range.
    NoError = 0,
    /// PGA output within 150 mV of AVDD or AVSS.
    Error = 1,
}

/// Reference voltage monitor flag (`STATUS.FL_REF_L0` / `STATUS.FL_REF_L1`).
///
/// Level 0 trips at 0.3 V, level 1 at 1/3 (AVDD - AVSS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ReferenceLevel {
    /// Differential reference above the threshold.
    Exceeded = 0,
    /// Differential reference below the threshold.
    NotExceeded = 1,
}

/// Analog input selection for `INPMUX.MUXP` / `INPMUX.MUXN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum InputChannel {
    /// AIN0.
    Ain0 = 0b0000,
    /// AIN1.
    Ain1 = 0b0001,
    /// AIN2.
    Ain2 = 0b0010,
    /// AIN3.
    Ain3 = 0b0011,
    /// AIN4.
    Ain4 = 0b0100,
    /// AIN5.
    Ain5 = 0b0101,
    /// AIN6 (ADS124S08 only).
    Ain6 = 0b0110,
    /// AIN7 (ADS124S08 only).
    Ain7 = 0b0111,
    /// AIN8 (ADS124S08 only).
    Ain8 = 0b1000,
    /// AIN9 (ADS124S08 only).
    Ain9 = 0b1001,
    /// AIN10 (ADS124S08 only).
    Ain10 = 0b1010,
    /// AIN11 (ADS124S08 only).
    Ain11 = 0b1011,
    /// AINCOM.
    AinCom = 0b1100,
}

/// Conversion start delay after a filter reset (`PGA.DELAY`), in modulator periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum ConversionDelay {
    /// 14 · t_MOD (default).
    Tmod14 = 0b000,
    /// 25 · t_MOD.
    Tmod25 = 0b001,
    /// 64 · t_MOD.
    Tmod64 = 0b010,
    /// 256 · t_MOD.
    Tmod256 = 0b011,
    /// 1024 · t_MOD.
    Tmod1024 = 0b100,
    /// 2048 · t_MOD.
    Tmod2048 = 0b101,
    /// 4096 · t_MOD.
    Tmod4096 = 0b110,
    /// 1 · t_MOD.
    Tmod1 = 0b111,
}

impl ConversionDelay {
    /// Returns the delay in modulator clock periods.
    pub const fn modulator_periods(self) -> u16 {
        match self {
            Self::Tmod14 => 14,
            Self::Tmod25 => 25,
            Self::Tmod64 => 64,
            Self::Tmod256 => 256,
            Self::Tmod1024 => 1_024,
            Self::Tmod2048 => 2_048,
            Self::Tmod4096 => 4_096,
            Self::Tmod1 => 1,
        }
    }
}

/// PGA enable selection (`PGA.PGA_EN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum PgaMode {
    /// PGA powered down and bypassed; gain must be 1.
    Bypassed = 0b00,
    /// PGA enabled.
    Enabled = 0b01,
}

/// PGA gain selection (`PGA.GAIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Gain {
    /// Gain of 1 (default).
    X1 = 0b000,
    /// Gain of 2.
    X2 = 0b001,
    /// Gain of 4.
    X4 = 0b010,
    /// Gain of 8.
    X8 = 0b011,
    /// Gain of 16.
    X16 = 0b100,
    /// Gain of 32.
    X32 = 0b101,
    /// Gain of 64.
    X64 = 0b110,
    /// Gain of 128.
    X128 = 0b111,
}

impl Gain {
    /// Returns the gain factor as an integer.
    pub const fn multiplier(self) -> u8 {
        1 << (self as u8)
    }
}

/// Global chop enable (`DATARATE.G_CHOP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum GlobalChop {
    /// Chopping disabled (default).
    Disabled = 0,
    /// Chopping enabled.
    Enabled = 1,
}

/// Clock source (`DATARATE.CLK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ClockSource {
    /// Internal 4.096 MHz oscillator (default).
    Internal = 0,
    /// External clock on the CLK pin.
    External = 1,
}

/// Conversion mode (`DATARATE.MODE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ConversionMode {
    /// Continuous conversion (default).
    Continuous = 0,
    /// Single-shot conversion.
    SingleShot = 1,
}

/// Digital filter selection (`DATARATE.FILTER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum DigitalFilter {
    /// Sinc3 filter.
    Sinc3 = 0,
    /// Low-latency filter (default).
    LowLatency = 1,
}

/// Output data rate selection (`DATARATE.DR`).
///
/// `0b1110` is a second encoding of 4000 SPS; `0b1111` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputRate {
    /// 2.5 SPS.
    Sps2_5 = 0b0000,
    /// 5 SPS.
    Sps5 = 0b0001,
    /// 10 SPS.
    Sps10 = 0b0010,
    /// 16.6 SPS.
    Sps16_6 = 0b0011,
    /// 20 SPS (default).
    Sps20 = 0b0100,
    /// 50 SPS.
    Sps50 = 0b0101,
    /// 60 SPS.
    Sps60 = 0b0110,
    /// 100 SPS.
    Sps100 = 0b0111,
    /// 200 SPS.
    Sps200 = 0b1000,
    /// 400 SPS.
    Sps400 = 0b1001,
    /// 800 SPS.
    Sps800 = 0b1010,
    /// 1000 SPS.
    Sps1000 = 0b1011,
    /// 2000 SPS.
    Sps2000 = 0b1100,
    /// 4000 SPS.
    Sps4000 = 0b1101,
    /// 4000 SPS, alternate encoding.
    Sps4000Alt = 0b1110,
}

impl OutputRate {
    /// Returns the nominal data rate in millihertz.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Sps2_5 => 2_500,
            Self::Sps5 => 5_000,
            Self::Sps10 => 10_000,
            Self::Sps16_6 => 16_600,
            Self::Sps20 => 20_000,
            Self::Sps50 => 50_000,
            Self::Sps60 => 60_000,
            Self::Sps100 => 100_000,
            Self::Sps200 => 200_000,
            Self::Sps400 => 400_000,
            Self::Sps800 => 800_000,
            Self::Sps1000 => 1_000_000,
            Self::Sps2000 => 2_000_000,
            Self::Sps4000 | Self::Sps4000Alt => 4_000_000,
        }
    }
}

/// Reference monitor configuration (`REF.FL_REF_EN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ReferenceMonitor {
    /// Monitor disabled (default).
    Disabled = 0b00,
    /// Level 0 monitor (0.3 V) enabled.
    Level0 = 0b01,
    /// Level 0 and level 1 (1/3 of the supply) monitors enabled.
    Level0And1 = 0b10,
    /// Level 0 monitor with the 10 MΩ pull-together enabled.
    Level0PullTogether = 0b11,
}

/// Reference buffer state (`REF.NOT_REFP_BUF` / `REF.NOT_REFN_BUF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum ReferenceBuffer {
    /// Buffer enabled.
    Enabled = 0,
    /// Buffer disabled (bypassed).
    Disabled = 1,
}

/// Reference input selection (`REF.REFSEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ReferenceInput {
    /// REFP0 / REFN0 (default).
    Ref0 = 0b00,
    /// REFP1 / REFN1.
    Ref1 = 0b01,
    /// Internal 2.5 V reference.
    Internal = 0b10,
}

/// Internal reference configuration (`REF.REFCON`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum InternalReference {
    /// Internal reference off (default).
    Off = 0b00,
    /// On, but powers down in power-down mode.
    OnExceptPowerDown = 0b01,
    /// Always on, even in power-down mode.
    AlwaysOn = 0b10,
}

/// Excitation current magnitude (`IDACMAG.IMAG`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum IdacMagnitude {
    /// IDACs off (default).
    Off = 0b0000,
    /// 10 µA.
    Ua10 = 0b0001,
    /// 50 µA.
    Ua50 = 0b0010,
    /// 100 µA.
    Ua100 = 0b0011,
    /// 250 µA.
    Ua250 = 0b0100,
    /// 500 µA.
    Ua500 = 0b0101,
    /// 750 µA.
    Ua750 = 0b0110,
    /// 1000 µA.
    Ua1000 = 0b0111,
    /// 1500 µA.
    Ua1500 = 0b1000,
    /// 2000 µA.
    Ua2000 = 0b1001,
}

impl IdacMagnitude {
    /// Returns the excitation current in microamps.
    pub const fn microamps(self) -> u16 {
        match self {
            Self::Off => 0,
            Self::Ua10 => 10,
            Self::Ua50 => 50,
            Self::Ua100 => 100,
            Self::Ua250 => 250,
            Self::Ua500 => 500,
            Self::Ua750 => 750,
            Self::Ua1000 => 1_000,
            Self::Ua1500 => 1_500,
            Self::Ua2000 => 2_000,
        }
    }
}

/// Excitation current output routing (`IDACMUX.I1MUX` / `IDACMUX.I2MUX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum IdacOutput {
    /// AIN0.
    Ain0 = 0b0000,
    /// AIN1.
    Ain1 = 0b0001,
    /// AIN2.
    Ain2 = 0b0010,
    /// AIN3.
    Ain3 = 0b0011,
    /// AIN4.
    Ain4 = 0b0100,
    /// AIN5.
    Ain5 = 0b0101,
    /// AIN6.
    Ain6 = 0b0110,
    /// AIN7.
    Ain7 = 0b0111,
    /// AIN8.
    Ain8 = 0b1000,
    /// AIN9.
    Ain9 = 0b1001,
    /// AIN10.
    Ain10 = 0b1010,
    /// AIN11.
    Ain11 = 0b1011,
    /// AINCOM.
    AinCom = 0b1100,
    /// Disconnected (default).
    Disconnected = 0b1111,
}

/// Bias voltage level (`VBIAS.VB_LEVEL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum BiasLevel {
    /// (AVDD + AVSS) / 2 (default).
    Half = 0,
    /// (AVDD + AVSS) / 12.
    Twelfth = 1,
}

/// System monitor configuration (`SYS.SYS_MON`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum SystemMonitor {
    /// System monitor disabled (default).
    Disabled = 0b000,
    /// PGA inputs shorted to (AVDD + AVSS) / 2.
    PgaShort = 0b001,
    /// Internal temperature sensor.
    Temperature = 0b010,
    /// (AVDD - AVSS) / 4.
    AnalogSupply = 0b011,
    /// DVDD / 4.
    DigitalSupply = 0b100,
    /// 0.2 µA burn-out current sources.
    Burnout0p2 = 0b101,
    /// 1 µA burn-out current sources.
    Burnout1 = 0b110,
    /// 10 µA burn-out current sources.
    Burnout10 = 0b111,
}

/// Number of samples averaged during calibration (`SYS.CAL_SAMP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum CalibrationSamples {
    /// 1 sample.
    One = 0b00,
    /// 4 samples.
    Four = 0b01,
    /// 8 samples (default).
    Eight = 0b10,
    /// 16 samples.
    Sixteen = 0b11,
}

/// GPIO pin direction (`GPIODAT.DIR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioDirection {
    /// Output (default).
    Output,
    /// Input.
    Input,
}

/// GPIO pin index; GPIO0..GPIO3 share AIN8..AIN11 and REFN1 on AINCOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GpioPin {
    /// GPIO0 on AIN8.
    Gpio0 = 0,
    /// GPIO1 on AIN9.
    Gpio1 = 1,
    /// GPIO2 on AIN10.
    Gpio2 = 2,
    /// GPIO3 on AIN11.
    Gpio3 = 3,
}

impl GpioPin {
    pub(crate) const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}
