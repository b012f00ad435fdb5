//! SPI interface implementation built on top of `embedded-hal` `SpiBus`.
//!
//! `RREG` and `RDATA` send a command and then read the reply as two
//! transfers, and the device aborts the exchange if chip select rises in
//! between. The adapter therefore works on a bare bus: the caller asserts CS
//! (or ties it low) around each driver call and flushes the bus through
//! [`SpiInterface::spi_mut`] before releasing it.

use embedded_hal::spi::SpiBus;

use super::Ads124s08Interface;
use crate::commands::Command;

/// SPI-based interface implementation for the ADS124S08 driver.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI bus.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI bus.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Ads124s08Interface for SpiInterface<SPI>
where
    SPI: SpiBus,
{
    type Error = SPI::Error;

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        // DIN must carry NOPs while the device shifts data out.
        buf.fill(Command::Nop.opcode());
        self.spi.transfer_in_place(buf)?;
        Ok(buf.len())
    }

    fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error> {
        if data.is_empty() {
            return Ok(0);
        }

        self.spi.write(data)?;
        Ok(data.len())
    }

    fn read_write(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
    ) -> core::result::Result<(usize, usize), Self::Error> {
        if tx.is_empty() && rx.is_empty() {
            return Ok((0, 0));
        }

        self.spi.transfer(rx, tx)?;
        Ok((rx.len(), tx.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::SpiInterface;
    use crate::interface::Ads124s08Interface;
    use embedded_hal_mock::eh1::spi::{Mock, Transaction};

    #[test]
    fn write_sends_frame_unchanged() {
        let expectations = [Transaction::write_vec(vec![0x42, 0x00, 0xA5])];
        let mut spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let written = interface.write(&[0x42, 0x00, 0xA5]).unwrap();
        assert_eq!(written, 3);
        spi.done();
    }

    #[test]
    fn read_clocks_out_nops() {
        let expectations = [Transaction::transfer_in_place(
            vec![0x00, 0x00, 0x00],
            vec![0x12, 0x34, 0x56],
        )];
        let mut spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut buffer = [0xFFu8; 3];
        let read = interface.read(&mut buffer).unwrap();
        assert_eq!(read, 3);
        assert_eq!(buffer, [0x12, 0x34, 0x56]);
        spi.done();
    }

    #[test]
    fn read_write_transfers_both_directions() {
        let expectations = [Transaction::transfer(
            vec![0x00, 0x00, 0x00, 0x00],
            vec![0x80, 0x7F, 0xFF, 0xFF],
        )];
        let mut spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut buffer = [0u8; 4];
        let counts = interface.read_write(&[0u8; 4], &mut buffer).unwrap();
        assert_eq!(counts, (4, 4));
        assert_eq!(buffer, [0x80, 0x7F, 0xFF, 0xFF]);
        spi.done();
    }

    #[test]
    fn read_write_reports_read_count_first() {
        let expectations = [Transaction::transfer(vec![0x12], vec![0x80, 0x01, 0x02])];
        let mut spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut buffer = [0u8; 3];
        let counts = interface.read_write(&[0x12], &mut buffer).unwrap();
        assert_eq!(counts, (3, 1));
        assert_eq!(buffer, [0x80, 0x01, 0x02]);
        spi.done();
    }

    #[test]
    fn empty_transfers_skip_the_bus() {
        let expectations: [Transaction<u8>; 0] = [];
        let mut spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        assert_eq!(interface.read(&mut []).unwrap(), 0);
        assert_eq!(interface.write(&[]).unwrap(), 0);
        assert_eq!(interface.read_write(&[], &mut []).unwrap(), (0, 0));
        spi.done();
    }

    #[test]
    fn release_returns_bus() {
        let expectations = [Transaction::write_vec(vec![0x06])];
        let spi = Mock::new(&expectations);
        let mut interface = SpiInterface::new(spi);

        interface.write(&[0x06]).unwrap();
        let mut spi = interface.release();
        spi.done();
    }
}
