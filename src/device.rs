//! High-level ADS124S08 device driver implementation.

use crate::commands::{Command, MAX_WREG_FRAME, rreg_header, validate_range, wreg_frame};
use crate::config::Config;
use crate::conversion::{
    Conversion, FrameFormat, MAX_FRAME_BYTES, gain_from_bytes, gain_to_bytes, offset_from_bytes,
    offset_to_bytes,
};
use crate::error::{Error, Result};
use crate::interface::Ads124s08Interface;
use crate::interface::spi::SpiInterface;
use crate::registers::{Address, Id, Register, Status, Sys};
use embedded_hal::spi::SpiBus;

// Calibration words span three registers.
const CALIBRATION_BYTES: u8 = 3;
// Signed range of the 24-bit offset calibration word.
const OFFSET_MIN: i32 = -0x80_0000;
const OFFSET_MAX: i32 = 0x7F_FFFF;
const GAIN_MAX: u32 = 0xFF_FFFF;

/// High-level synchronous driver for the ADS124S08 ADC.
///
/// The driver caches the `SYS` register, whose `SENDSTAT` and `CRC` bits
/// decide the length of every conversion frame. The cache changes only
/// through [`Ads124s08::refresh_system_control`] and
/// [`Ads124s08::configure`]; writing `SYS` by other means, or resetting the
/// device, leaves it stale until the next refresh.
pub struct Ads124s08<IFACE> {
    interface: IFACE,
    sys: Sys,
}

impl<IFACE> Ads124s08<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a driver without touching the bus, seeding the cached `SYS`
    /// value with `sys`.
    pub fn with_system_control(interface: IFACE, sys: Sys) -> Self {
        Self { interface, sys }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Cached `SYS` register used to frame conversion reads.
    pub fn system_control(&self) -> Sys {
        self.sys
    }
}

impl<SPI> Ads124s08<SpiInterface<SPI>>
where
    SPI: SpiBus,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI) -> Result<Self, SPI::Error> {
        Self::new(SpiInterface::new(spi))
    }

    /// Releases the driver, returning the SPI bus.
    pub fn release_spi(self) -> SPI {
        self.release().release()
    }
}

impl<IFACE, CommE> Ads124s08<IFACE>
where
    IFACE: Ads124s08Interface<Error = CommE>,
{
    /// Creates a driver and reads `SYS` to initialize the cache.
    pub fn new(interface: IFACE) -> Result<Self, CommE> {
        let mut device = Self::with_system_control(interface, Sys::reset());
        device.refresh_system_control()?;
        Ok(device)
    }

    // ==================================================================
    // == Control Commands ==============================================
    // ==================================================================
    /// Leaves power-down mode. Returns the opcode sent.
    pub fn wakeup(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::Wakeup)
    }

    /// Enters power-down mode. Returns the opcode sent.
    pub fn power_down(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::PowerDown)
    }

    /// Resets the device. Returns the opcode sent.
    ///
    /// Every register returns to its reset value; call
    /// [`Ads124s08::refresh_system_control`] once the device is ready again.
    pub fn reset(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::Reset)
    }

    /// Starts or restarts conversions. Returns the opcode sent.
    pub fn start(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::Start)
    }

    /// Stops conversions. Returns the opcode sent.
    pub fn stop(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::Stop)
    }

    /// Starts a system offset calibration. Returns the opcode sent.
    pub fn system_offset_calibration(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::SystemOffsetCalibration)
    }

    /// Starts a system gain calibration. Returns the opcode sent.
    pub fn system_gain_calibration(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::SystemGainCalibration)
    }

    /// Starts a self offset calibration. Returns the opcode sent.
    pub fn self_offset_calibration(&mut self) -> Result<u8, CommE> {
        self.send_command(Command::SelfOffsetCalibration)
    }

    // ==================================================================
    // == Register Access ===============================================
    // ==================================================================
    /// Reads `count` consecutive registers starting at `start`.
    ///
    /// The registers land in the first `count` bytes of `buffer`, which may
    /// be omitted when a single register is read. Returns the first byte
    /// read.
    ///
    /// All arguments are checked before the bus is touched. If the transport
    /// fails after the header went out, the device is left mid-command; reset
    /// it, toggle chip select or wait for the SPI timeout before continuing.
    pub fn rreg(&mut self, start: Address, count: u8, buffer: Option<&mut [u8]>) -> Result<u8, CommE> {
        let header = rreg_header(start, count).ok_or_else(|| {
            warn!("rreg rejected: start {=u8:#x} count {=u8}", u8::from(start), count);
            Error::InvalidRange
        })?;

        let mut scratch = [0u8; 1];
        let target = match buffer {
            Some(buf) => buf
                .get_mut(..usize::from(count))
                .ok_or(Error::BufferTooSmall)?,
            None if count == 1 => &mut scratch[..],
            None => return Err(Error::MissingBuffer),
        };

        trace!("rreg start {=u8:#x} count {=u8}", u8::from(start), count);
        self.write_all(&header)?;
        self.read_exact(target)?;
        Ok(target[0])
    }

    /// Writes the first `count` bytes of `buffer` to consecutive registers
    /// starting at `start`. Returns the first byte written.
    ///
    /// All arguments are checked before the bus is touched. A failed write
    /// leaves the device state unknown; see [`Ads124s08::rreg`].
    pub fn wreg(&mut self, start: Address, count: u8, buffer: Option<&[u8]>) -> Result<u8, CommE> {
        if !validate_range(start, count) {
            warn!("wreg rejected: start {=u8:#x} count {=u8}", u8::from(start), count);
            return Err(Error::InvalidRange);
        }

        let payload = buffer
            .ok_or(Error::MissingBuffer)?
            .get(..usize::from(count))
            .ok_or(Error::BufferTooSmall)?;

        let mut frame = [0u8; MAX_WREG_FRAME];
        let len = wreg_frame(start, payload, &mut frame).ok_or(Error::InvalidRange)?;

        trace!("wreg start {=u8:#x} count {=u8}", u8::from(start), count);
        self.write_all(&frame[..len])?;
        Ok(payload[0])
    }

    /// Reads a single register.
    pub fn read_register(&mut self, address: Address) -> Result<u8, CommE> {
        self.rreg(address, 1, None)
    }

    /// Writes a single register. Returns the value written.
    pub fn write_register(&mut self, address: Address, value: u8) -> Result<u8, CommE> {
        self.wreg(address, 1, Some(core::slice::from_ref(&value)))
    }

    /// Reads a register and decodes it into its value type.
    pub fn read_register_as<R: Register>(&mut self) -> Result<R, CommE> {
        self.read_register(R::ADDRESS).map(R::from)
    }

    /// Packs `register` and writes it to its own address. Returns the packed byte.
    pub fn set_register<R: Register>(&mut self, register: R) -> Result<u8, CommE> {
        self.write_register(R::ADDRESS, register.pack())
    }

    /// Read-modify-write of a single register.
    ///
    /// The register is written back only when `mutate` changed the packed
    /// value. Returns the updated register.
    pub fn update_register<R, F>(&mut self, mutate: F) -> Result<R, CommE>
    where
        R: Register,
        F: FnOnce(&mut R),
    {
        let current = self.read_register(R::ADDRESS)?;

        let mut register = R::from(current);
        let original = register.pack();
        mutate(&mut register);

        let updated = register.pack();
        if updated != original {
            self.write_register(R::ADDRESS, updated)?;
        }

        Ok(register)
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the `ID` register.
    pub fn read_id(&mut self) -> Result<Id, CommE> {
        self.read_register_as()
    }

    /// Reads the `STATUS` register.
    pub fn read_status(&mut self) -> Result<Status, CommE> {
        self.read_register_as()
    }

    /// Reads `SYS` and replaces the cached value.
    ///
    /// On failure the cache keeps its previous value.
    pub fn refresh_system_control(&mut self) -> Result<Sys, CommE> {
        let sys: Sys = self.read_register_as()?;
        debug!("cached SYS {=u8:#x}", sys.raw());
        self.sys = sys;
        Ok(sys)
    }

    // ==================================================================
    // == Conversion Data ===============================================
    // ==================================================================
    /// Reads the latest conversion with the `RDATA` command.
    ///
    /// `status` and `crc` override whether the frame carries a STATUS or CRC
    /// byte; `None` follows the cached `SYS` register. A stale cache yields a
    /// frame of the wrong length, so refresh it after changing `SYS`
    /// directly.
    pub fn rdata(&mut self, status: Option<bool>, crc: Option<bool>) -> Result<Conversion, CommE> {
        let format = FrameFormat::resolve(self.sys, status, crc);
        let mut buf = [0u8; MAX_FRAME_BYTES];
        let frame = &mut buf[..format.len()];

        trace!("rdata status {=bool} crc {=bool}", format.status, format.crc);
        self.write_all(&[Command::RData.opcode()])?;
        self.read_exact(frame)?;

        Conversion::decode(format, frame).ok_or(Error::ShortTransfer)
    }

    /// Reads the latest conversion directly, without a command.
    ///
    /// The frame is clocked out in one full-duplex transfer with NOPs on DIN.
    /// Framing follows the same rules as [`Ads124s08::rdata`].
    pub fn read_data_direct(
        &mut self,
        status: Option<bool>,
        crc: Option<bool>,
    ) -> Result<Conversion, CommE> {
        let format = FrameFormat::resolve(self.sys, status, crc);
        let len = format.len();
        let tx = [Command::Nop.opcode(); MAX_FRAME_BYTES];
        let mut rx = [0u8; MAX_FRAME_BYTES];

        trace!("direct read status {=bool} crc {=bool}", format.status, format.crc);
        let (read, written) = self
            .interface
            .read_write(&tx[..len], &mut rx[..len])
            .map_err(|error| {
                warn!("transport read/write failed");
                Error::Interface(error)
            })?;
        if written < len || read < len {
            warn!("short direct read: {=usize} of {=usize}", read, len);
            return Err(Error::ShortTransfer);
        }

        Conversion::decode(format, &rx[..len]).ok_or(Error::ShortTransfer)
    }

    // ==================================================================
    // == Calibration Words =============================================
    // ==================================================================
    /// Reads the signed offset calibration word from `OFCAL0..=OFCAL2`.
    pub fn read_offset_calibration(&mut self) -> Result<i32, CommE> {
        self.read_calibration(Address::OfCal0).map(offset_from_bytes)
    }

    /// Writes the offset calibration word; it must fit in 24 signed bits.
    pub fn write_offset_calibration(&mut self, offset: i32) -> Result<(), CommE> {
        if !(OFFSET_MIN..=OFFSET_MAX).contains(&offset) {
            return Err(Error::InvalidConfig);
        }
        self.write_calibration(Address::OfCal0, offset_to_bytes(offset))
    }

    /// Reads the gain calibration word from `FSCAL0..=FSCAL2`.
    pub fn read_gain_calibration(&mut self) -> Result<u32, CommE> {
        self.read_calibration(Address::FsCal0).map(gain_from_bytes)
    }

    /// Writes the gain calibration word; it must fit in 24 bits.
    pub fn write_gain_calibration(&mut self, gain: u32) -> Result<(), CommE> {
        if gain > GAIN_MAX {
            return Err(Error::InvalidConfig);
        }
        self.write_calibration(Address::FsCal0, gain_to_bytes(gain))
    }

    // ==================================================================
    // == Configuration =================================================
    // ==================================================================
    /// Validates and applies `config`, then refreshes the cached `SYS`.
    ///
    /// `INPMUX` through `REF` go out in one block write, followed by `SYS`.
    pub fn configure(&mut self, config: &Config) -> Result<(), CommE> {
        config.validate().map_err(|_| {
            warn!("configuration rejected");
            Error::InvalidConfig
        })?;

        let block = config.conversion_block();
        self.wreg(Address::InpMux, block.len() as u8, Some(&block))?;
        self.set_register(config.system)?;
        self.refresh_system_control()?;
        Ok(())
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn send_command(&mut self, command: Command) -> Result<u8, CommE> {
        debug!("command {=u8:#x}", command.opcode());
        self.write_all(&[command.opcode()])?;
        Ok(command.opcode())
    }

    fn read_calibration(&mut self, start: Address) -> Result<[u8; 3], CommE> {
        let mut bytes = [0u8; CALIBRATION_BYTES as usize];
        self.rreg(start, CALIBRATION_BYTES, Some(&mut bytes))?;
        Ok(bytes)
    }

    fn write_calibration(&mut self, start: Address, bytes: [u8; 3]) -> Result<(), CommE> {
        self.wreg(start, CALIBRATION_BYTES, Some(&bytes))?;
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), CommE> {
        let written = self.interface.write(data).map_err(|error| {
            warn!("transport write failed");
            Error::Interface(error)
        })?;
        if written < data.len() {
            warn!("short write: {=usize} of {=usize}", written, data.len());
            return Err(Error::ShortTransfer);
        }
        Ok(())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), CommE> {
        let read = self.interface.read(buf).map_err(|error| {
            warn!("transport read failed");
            Error::Interface(error)
        })?;
        if read < buf.len() {
            warn!("short read: {=usize} of {=usize}", read, buf.len());
            return Err(Error::ShortTransfer);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Gain, InputChannel, OutputRate, PgaMode, ReferenceInput};
    use crate::registers::{DataRate, Pga, Ref};
    use std::collections::VecDeque;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    #[derive(Default)]
    struct FakeBus {
        writes: Vec<Vec<u8>>,
        exchanges: Vec<Vec<u8>>,
        reads: usize,
        responses: VecDeque<Vec<u8>>,
        fail_write: bool,
        fail_read: bool,
        short_read: bool,
        // Index of the single write call that fails.
        fail_on_write: Option<usize>,
    }

    impl FakeBus {
        fn replying(responses: &[&[u8]]) -> Self {
            Self {
                responses: responses.iter().map(|r| r.to_vec()).collect(),
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.writes.len() + self.exchanges.len() + self.reads
        }

        fn respond(&mut self, buf: &mut [u8]) -> usize {
            let response = self.responses.pop_front().expect("unexpected read");
            assert_eq!(response.len(), buf.len(), "read length mismatch");
            buf.copy_from_slice(&response);
            if self.short_read { buf.len() - 1 } else { buf.len() }
        }
    }

    impl Ads124s08Interface for FakeBus {
        type Error = BusFault;

        fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
            self.reads += 1;
            if self.fail_read {
                return Err(BusFault);
            }
            Ok(self.respond(buf))
        }

        fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error> {
            self.writes.push(data.to_vec());
            if self.fail_write || self.fail_on_write == Some(self.writes.len() - 1) {
                return Err(BusFault);
            }
            Ok(data.len())
        }

        fn read_write(
            &mut self,
            tx: &[u8],
            rx: &mut [u8],
        ) -> core::result::Result<(usize, usize), Self::Error> {
            self.exchanges.push(tx.to_vec());
            if self.fail_read {
                return Err(BusFault);
            }
            let read = self.respond(rx);
            Ok((read, tx.len()))
        }
    }

    fn device(bus: FakeBus) -> Ads124s08<FakeBus> {
        Ads124s08::with_system_control(bus, Sys::reset())
    }

    #[test]
    fn new_reads_system_control() {
        let mut bus = FakeBus::replying(&[&[0x13]]);
        let adc = Ads124s08::new(&mut bus).unwrap();
        assert!(adc.system_control().status_enabled());
        assert!(adc.system_control().crc_enabled());
        drop(adc);

        assert_eq!(bus.writes, [vec![0x29, 0x00]]);
        assert_eq!(bus.reads, 1);
    }

    #[test]
    fn new_propagates_transport_failure() {
        let bus = FakeBus {
            fail_write: true,
            ..FakeBus::default()
        };
        assert!(matches!(Ads124s08::new(bus), Err(Error::Interface(BusFault))));
    }

    #[test]
    fn commands_send_single_opcode() {
        let mut adc = device(FakeBus::default());
        assert_eq!(adc.wakeup(), Ok(0x02));
        assert_eq!(adc.power_down(), Ok(0x04));
        assert_eq!(adc.reset(), Ok(0x06));
        assert_eq!(adc.start(), Ok(0x08));
        assert_eq!(adc.stop(), Ok(0x0A));
        assert_eq!(adc.system_offset_calibration(), Ok(0x16));
        assert_eq!(adc.system_gain_calibration(), Ok(0x17));
        assert_eq!(adc.self_offset_calibration(), Ok(0x19));

        let bus = adc.release();
        let sent: Vec<u8> = bus.writes.iter().map(|w| {
            assert_eq!(w.len(), 1);
            w[0]
        }).collect();
        assert_eq!(sent, [0x02, 0x04, 0x06, 0x08, 0x0A, 0x16, 0x17, 0x19]);
        assert_eq!(bus.reads, 0);
    }

    #[test]
    fn wakeup_reports_failed_write() {
        let mut adc = device(FakeBus {
            fail_write: true,
            ..FakeBus::default()
        });
        assert_eq!(adc.wakeup(), Err(Error::Interface(BusFault)));
    }

    #[test]
    fn rreg_reads_status_register() {
        let mut adc = device(FakeBus::replying(&[&[0x80]]));
        assert_eq!(adc.rreg(Address::Status, 1, None), Ok(0x80));

        let bus = adc.release();
        assert_eq!(bus.writes, [vec![0x21, 0x00]]);
        assert_eq!(bus.reads, 1);
    }

    #[test]
    fn rreg_fills_caller_buffer() {
        let mut adc = device(FakeBus::replying(&[&[0x01, 0x14, 0x10]]));
        let mut buffer = [0u8; 4];
        assert_eq!(adc.rreg(Address::InpMux, 3, Some(&mut buffer)), Ok(0x01));
        assert_eq!(buffer, [0x01, 0x14, 0x10, 0x00]);
        assert_eq!(adc.interface_mut().writes, [vec![0x22, 0x02]]);
    }

    #[test]
    fn rreg_rejects_bad_arguments_before_touching_the_bus() {
        let mut adc = device(FakeBus::default());
        let mut short = [0u8; 2];

        assert_eq!(adc.rreg(Address::Id, 0, None), Err(Error::InvalidRange));
        assert_eq!(adc.rreg(Address::Id, 19, None), Err(Error::InvalidRange));
        assert_eq!(adc.rreg(Address::GpioCon, 2, None), Err(Error::InvalidRange));
        assert_eq!(adc.rreg(Address::Pga, 2, None), Err(Error::MissingBuffer));
        assert_eq!(
            adc.rreg(Address::Pga, 3, Some(&mut short)),
            Err(Error::BufferTooSmall)
        );
        assert_eq!(adc.interface_mut().calls(), 0);
    }

    #[test]
    fn rreg_propagates_read_failure() {
        let mut adc = device(FakeBus {
            fail_read: true,
            ..FakeBus::default()
        });
        let mut buffer = [0xEEu8; 2];
        assert_eq!(
            adc.rreg(Address::Pga, 2, Some(&mut buffer)),
            Err(Error::Interface(BusFault))
        );
        assert_eq!(adc.interface_mut().writes.len(), 1);
    }

    #[test]
    fn short_read_fails_the_transaction() {
        let mut adc = device(FakeBus {
            short_read: true,
            ..FakeBus::replying(&[&[0x00, 0x00]])
        });
        let mut buffer = [0u8; 2];
        assert_eq!(
            adc.rreg(Address::OfCal0, 2, Some(&mut buffer)),
            Err(Error::ShortTransfer)
        );
    }

    #[test]
    fn write_register_frames_header_and_value() {
        let mut adc = device(FakeBus::default());
        assert_eq!(adc.write_register(Address::InpMux, 0xA5), Ok(0xA5));
        assert_eq!(adc.release().writes, [vec![0x42, 0x00, 0xA5]]);
    }

    #[test]
    fn wreg_writes_only_count_bytes() {
        let mut adc = device(FakeBus::default());
        assert_eq!(adc.wreg(Address::InpMux, 2, Some(&[0x12, 0x0B, 0xFF])), Ok(0x12));
        assert_eq!(adc.release().writes, [vec![0x42, 0x01, 0x12, 0x0B]]);
    }

    #[test]
    fn wreg_propagates_write_failure() {
        let mut adc = device(FakeBus {
            fail_write: true,
            ..FakeBus::default()
        });
        assert_eq!(
            adc.wreg(Address::Sys, 1, Some(&[0x13])),
            Err(Error::Interface(BusFault))
        );

        let bus = adc.release();
        assert_eq!(bus.writes, [vec![0x49, 0x00, 0x13]]);
        assert_eq!(bus.reads, 0);
    }

    #[test]
    fn wreg_rejects_bad_arguments_before_touching_the_bus() {
        let mut adc = device(FakeBus::default());

        assert_eq!(adc.wreg(Address::InpMux, 1, None), Err(Error::MissingBuffer));
        assert_eq!(adc.wreg(Address::InpMux, 2, Some(&[0x01])), Err(Error::BufferTooSmall));
        assert_eq!(adc.wreg(Address::FsCal2, 4, Some(&[0; 4])), Err(Error::InvalidRange));
        assert_eq!(adc.wreg(Address::Id, 0, Some(&[0; 1])), Err(Error::InvalidRange));
        assert_eq!(adc.interface_mut().calls(), 0);
    }

    #[test]
    fn typed_register_helpers_use_register_address() {
        let mut adc = device(FakeBus::replying(&[&[0x01], &[0x80]]));

        let reference = Ref::reset().with_reference(ReferenceInput::Internal);
        assert_eq!(adc.set_register(reference), Ok(0x38));

        let id = adc.read_id().unwrap();
        assert_eq!(id.variant(), Some(crate::params::DeviceVariant::Ads124s06));
        assert!(adc.read_status().unwrap().is_ready());

        assert_eq!(
            adc.release().writes,
            [vec![0x45, 0x00, 0x38], vec![0x20, 0x00], vec![0x21, 0x00]]
        );
    }

    #[test]
    fn update_register_writes_only_on_change() {
        let mut adc = device(FakeBus::replying(&[&[0x00], &[0x0B]]));

        let pga = adc.update_register(|pga: &mut Pga| {
            pga.set_gain(Gain::X8);
        });
        assert_eq!(pga.map(|p| p.mode()), Ok(PgaMode::Enabled));

        let pga = adc.update_register(|pga: &mut Pga| {
            pga.set_gain(Gain::X8);
        });
        assert_eq!(pga.map(Register::pack), Ok(0x0B));

        assert_eq!(
            adc.release().writes,
            [vec![0x23, 0x00], vec![0x43, 0x00, 0x0B], vec![0x23, 0x00]]
        );
    }

    #[test]
    fn update_register_propagates_write_failure() {
        let mut adc = device(FakeBus {
            fail_on_write: Some(1),
            ..FakeBus::replying(&[&[0x00]])
        });

        let result = adc.update_register(|pga: &mut Pga| {
            pga.set_gain(Gain::X8);
        });
        assert_eq!(result, Err(Error::Interface(BusFault)));
        assert_eq!(
            adc.release().writes,
            [vec![0x23, 0x00], vec![0x43, 0x00, 0x0B]]
        );
    }

    #[test]
    fn update_register_skips_write_for_read_only_register() {
        let mut adc = device(FakeBus::replying(&[&[0x80]]));

        let status = adc.update_register(|_: &mut Status| {}).unwrap();
        assert!(status.is_ready());
        assert_eq!(adc.release().writes, [vec![0x21, 0x00]]);
    }

    #[test]
    fn data_rate_alternate_encoding_reads_back() {
        let mut adc = device(FakeBus::replying(&[&[0x1E]]));
        let rate: DataRate = adc.read_register_as().unwrap();
        assert_eq!(rate.dr(), OutputRate::Sps4000Alt);
    }

    #[test]
    fn rdata_without_status_or_crc_reads_three_bytes() {
        let mut adc = device(FakeBus::replying(&[&[0x12, 0x34, 0x56]]));
        let conversion = adc.rdata(None, None).unwrap();
        assert_eq!(conversion.data, 0x123456);
        assert_eq!(conversion.status, None);
        assert_eq!(conversion.crc, None);
        assert_eq!(adc.release().writes, [vec![0x12]]);
    }

    #[test]
    fn rdata_follows_cached_system_control() {
        let sys = Sys::reset().with_sendstat(true).with_crc(true);
        let bus = FakeBus::replying(&[&[0x80, 0xFF, 0xFF, 0xFE, 0x5A]]);
        let mut adc = Ads124s08::with_system_control(bus, sys);

        let conversion = adc.rdata(None, None).unwrap();
        assert_eq!(conversion.status, Some(0x80));
        assert_eq!(conversion.data, -2);
        assert_eq!(conversion.crc, Some(0x5A));
    }

    #[test]
    fn rdata_overrides_take_precedence() {
        let sys = Sys::reset().with_sendstat(true);
        let bus = FakeBus::replying(&[&[0x12, 0x34, 0x56], &[0x00, 0x00, 0x01, 0xC3]]);
        let mut adc = Ads124s08::with_system_control(bus, sys);

        let conversion = adc.rdata(Some(false), None).unwrap();
        assert_eq!(conversion.data, 0x123456);

        let conversion = adc.rdata(Some(false), Some(true)).unwrap();
        assert_eq!(conversion.data, 1);
        assert_eq!(conversion.crc, Some(0xC3));
    }

    #[test]
    fn rdata_propagates_failures_without_partial_data() {
        let mut adc = device(FakeBus {
            fail_write: true,
            ..FakeBus::default()
        });
        assert_eq!(adc.rdata(None, None), Err(Error::Interface(BusFault)));
        assert_eq!(adc.interface_mut().reads, 0);

        let mut adc = device(FakeBus {
            fail_read: true,
            ..FakeBus::default()
        });
        assert_eq!(adc.rdata(None, None), Err(Error::Interface(BusFault)));
    }

    #[test]
    fn read_data_direct_clocks_nops() {
        let bus = FakeBus::replying(&[&[0x80, 0x7F, 0xFF, 0xFF]]);
        let mut adc = device(bus);

        let conversion = adc.read_data_direct(Some(true), None).unwrap();
        assert_eq!(conversion.status, Some(0x80));
        assert_eq!(conversion.data, 0x7F_FFFF);

        let bus = adc.release();
        assert_eq!(bus.exchanges, [vec![0x00; 4]]);
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn read_data_direct_propagates_transport_failure() {
        let mut adc = device(FakeBus {
            fail_read: true,
            ..FakeBus::default()
        });
        assert_eq!(adc.read_data_direct(None, None), Err(Error::Interface(BusFault)));

        let bus = adc.release();
        assert_eq!(bus.exchanges.len(), 1);
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn read_data_direct_rejects_short_transfer() {
        let mut adc = device(FakeBus {
            short_read: true,
            ..FakeBus::replying(&[&[0x00, 0x00, 0x00]])
        });
        assert_eq!(adc.read_data_direct(None, None), Err(Error::ShortTransfer));
    }

    #[test]
    fn refresh_updates_cache_only_on_success() {
        let mut adc = device(FakeBus::replying(&[&[0x11]]));
        let sys = adc.refresh_system_control().unwrap();
        assert!(sys.status_enabled());
        assert_eq!(adc.system_control().raw(), 0x11);

        adc.interface_mut().fail_read = true;
        assert_eq!(adc.refresh_system_control(), Err(Error::Interface(BusFault)));
        assert_eq!(adc.system_control().raw(), 0x11);
    }

    #[test]
    fn calibration_words_span_three_registers() {
        let mut adc = device(FakeBus::replying(&[&[0xFE, 0xFF, 0xFF], &[0x00, 0x00, 0x40]]));

        assert_eq!(adc.read_offset_calibration(), Ok(-2));
        assert_eq!(adc.read_gain_calibration(), Ok(0x40_0000));
        assert_eq!(adc.write_offset_calibration(-0x80_0000), Ok(()));
        assert_eq!(adc.write_gain_calibration(0x12_3456), Ok(()));

        assert_eq!(
            adc.release().writes,
            [
                vec![0x2A, 0x02],
                vec![0x2D, 0x02],
                vec![0x4A, 0x02, 0x00, 0x00, 0x80],
                vec![0x4D, 0x02, 0x56, 0x34, 0x12],
            ]
        );
    }

    #[test]
    fn calibration_words_outside_24_bits_are_rejected() {
        let mut adc = device(FakeBus::default());
        assert_eq!(adc.write_offset_calibration(0x80_0000), Err(Error::InvalidConfig));
        assert_eq!(adc.write_offset_calibration(-0x80_0001), Err(Error::InvalidConfig));
        assert_eq!(adc.write_gain_calibration(0x100_0000), Err(Error::InvalidConfig));
        assert_eq!(adc.interface_mut().calls(), 0);
    }

    #[test]
    fn configure_writes_block_then_system_control() {
        let config = Config::new()
            .input(InputChannel::Ain2, InputChannel::AinCom)
            .gain(Gain::X4)
            .output_rate(OutputRate::Sps50)
            .send_status(true)
            .build();
        let block = config.conversion_block();
        let sys = config.system.pack();

        let mut adc = device(FakeBus::replying(&[&[sys]]));
        adc.configure(&config).unwrap();
        assert!(adc.system_control().status_enabled());

        assert_eq!(
            adc.release().writes,
            [
                vec![0x42, 0x03, block[0], block[1], block[2], block[3]],
                vec![0x49, 0x00, sys],
                vec![0x29, 0x00],
            ]
        );
        assert_eq!(block[0], 0x2C);
    }

    #[test]
    fn configure_rejects_invalid_config_before_touching_the_bus() {
        let mut config = Config::default();
        config.pga.set_gain_with(Gain::X2, false);

        let mut adc = device(FakeBus::default());
        assert_eq!(adc.configure(&config), Err(Error::InvalidConfig));
        assert_eq!(adc.interface_mut().calls(), 0);
    }

    #[test]
    fn spi_constructor_reads_system_control() {
        use embedded_hal_mock::eh1::spi::{Mock, Transaction};

        let expectations = [
            Transaction::write_vec(vec![0x29, 0x00]),
            Transaction::transfer_in_place(vec![0x00], vec![0x12]),
        ];
        let spi = Mock::new(&expectations);
        let adc = Ads124s08::new_spi(spi).unwrap();
        assert!(adc.system_control().crc_enabled());

        let mut spi = adc.release_spi();
        spi.done();
    }
}
