//! Configuration primitives for the ADS124S08 driver.
//!
//! A [`Config`] bundles the registers on the conversion path: input
//! selection, gain, data rate, reference and system control. The first four
//! sit at consecutive addresses and are written as a single block.

use crate::params::{
    CalibrationSamples, ClockSource, ConversionDelay, ConversionMode, DigitalFilter, Gain,
    GlobalChop, InputChannel, InternalReference, OutputRate, PgaMode, ReferenceBuffer,
    ReferenceInput, SystemMonitor,
};
use crate::registers::{DataRate, InpMux, Pga, Ref, Register, Sys};

/// User-facing configuration for the ADS124S08 conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Input multiplexer selection.
    pub input_mux: InpMux,
    /// Gain, PGA enable and conversion delay.
    pub pga: Pga,
    /// Data rate, filter, clock and conversion mode.
    pub data_rate: DataRate,
    /// Reference selection and buffers.
    pub reference: Ref,
    /// System monitor, calibration averaging and data framing.
    pub system: Sys,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        self.check_reserved()?;

        if self.pga.mode() == PgaMode::Bypassed && self.pga.gain() != Gain::X1 {
            return Err(ConfigError::PgaBypassedWithGain);
        }

        if self.reference.refsel() == ReferenceInput::Internal {
            if self.reference.refcon() == InternalReference::Off {
                return Err(ConfigError::InternalReferenceOff);
            }
            if self.reference.refp_buf() == ReferenceBuffer::Enabled
                || self.reference.refn_buf() == ReferenceBuffer::Enabled
            {
                return Err(ConfigError::InternalReferenceBuffered);
            }
        }

        Ok(())
    }

    fn check_reserved(&self) -> core::result::Result<(), ConfigError> {
        let reserved = self.input_mux.muxp_or_err().is_err()
            || self.input_mux.muxn_or_err().is_err()
            || self.pga.mode_or_err().is_err()
            || self.data_rate.dr_or_err().is_err()
            || self.reference.refsel_or_err().is_err()
            || self.reference.refcon_or_err().is_err();

        if reserved {
            Err(ConfigError::ReservedPattern)
        } else {
            Ok(())
        }
    }

    /// Packed `INPMUX`, `PGA`, `DATARATE` and `REF` bytes in address order.
    pub fn conversion_block(&self) -> [u8; 4] {
        [
            self.input_mux.pack(),
            self.pga.pack(),
            self.data_rate.pack(),
            self.reference.pack(),
        ]
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Selects the differential input pair.
    pub fn input(mut self, positive: InputChannel, negative: InputChannel) -> Self {
        self.config.input_mux = InpMux::pair(positive, negative);
        self
    }

    /// Selects the gain, enabling the PGA for any gain above 1.
    pub fn gain(mut self, gain: Gain) -> Self {
        self.config.pga.set_gain(gain);
        self
    }

    /// Enables or bypasses the PGA; bypassing forces unity gain.
    pub fn pga_mode(mut self, mode: PgaMode) -> Self {
        self.config.pga.set_mode(mode);
        self
    }

    /// Sets the conversion start delay.
    pub fn delay(mut self, delay: ConversionDelay) -> Self {
        self.config.pga.set_delay(delay);
        self
    }

    /// Overrides the output data rate.
    pub fn output_rate(mut self, rate: OutputRate) -> Self {
        self.config.data_rate.set_dr(rate);
        self
    }

    /// Selects the digital filter.
    pub fn filter(mut self, filter: DigitalFilter) -> Self {
        self.config.data_rate.set_filter(filter);
        self
    }

    /// Selects continuous or single-shot conversions.
    pub fn conversion_mode(mut self, mode: ConversionMode) -> Self {
        self.config.data_rate.set_mode(mode);
        self
    }

    /// Selects the modulator clock source.
    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.config.data_rate.set_clk(clock);
        self
    }

    /// Enables or disables global chop.
    pub fn global_chop(mut self, chop: GlobalChop) -> Self {
        self.config.data_rate.set_g_chop(chop);
        self
    }

    /// Selects the reference input; the internal reference disables both buffers.
    pub fn reference(mut self, input: ReferenceInput) -> Self {
        self.config.reference.select_reference(input);
        self
    }

    /// Configures the positive and negative reference buffers.
    pub fn reference_buffers(mut self, positive: ReferenceBuffer, negative: ReferenceBuffer) -> Self {
        self.config.reference.set_refp_buf(positive);
        self.config.reference.set_refn_buf(negative);
        self
    }

    /// Configures the internal voltage reference.
    pub fn internal_reference(mut self, mode: InternalReference) -> Self {
        self.config.reference.set_refcon(mode);
        self
    }

    /// Prepends the STATUS byte to conversion data.
    pub fn send_status(mut self, enabled: bool) -> Self {
        self.config.system.set_sendstat(enabled);
        self
    }

    /// Appends a CRC byte to conversion data.
    pub fn crc(mut self, enabled: bool) -> Self {
        self.config.system.set_crc(enabled);
        self
    }

    /// Enables the SPI timeout.
    pub fn spi_timeout(mut self, enabled: bool) -> Self {
        self.config.system.set_timeout(enabled);
        self
    }

    /// Sets the number of samples averaged by the calibration commands.
    pub fn calibration_samples(mut self, samples: CalibrationSamples) -> Self {
        self.config.system.set_cal_samp(samples);
        self
    }

    /// Routes a system monitor to the ADC.
    pub fn system_monitor(mut self, monitor: SystemMonitor) -> Self {
        self.config.system.set_sys_mon(monitor);
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_mux: InpMux::reset(),
            pga: Pga::reset(),
            data_rate: DataRate::reset(),
            reference: Ref::reset(),
            system: Sys::reset(),
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The PGA is bypassed while a gain above 1 is selected.
    PgaBypassedWithGain,
    /// The internal reference is selected with a reference buffer enabled.
    InternalReferenceBuffered,
    /// The internal reference is selected but powered off.
    InternalReferenceOff,
    /// A field holds a reserved bit pattern.
    ReservedPattern,
}
