//! Transport abstraction for the ADS124S08 driver.

pub mod spi;

/// Byte-oriented transport used by the driver.
///
/// Each call is one transfer on the serial bus. Implementations report how
/// many bytes actually moved; the driver treats a count smaller than the
/// request as a failed transaction.
pub trait Ads124s08Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Clocks `buf.len()` bytes out of the device into `buf`.
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error>;

    /// Sends `data` to the device.
    fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error>;

    /// Sends `tx` while simultaneously receiving into `rx`.
    ///
    /// Returns the number of bytes read, then the number written.
    fn read_write(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
    ) -> core::result::Result<(usize, usize), Self::Error>;
}

impl<T> Ads124s08Interface for &mut T
where
    T: Ads124s08Interface + ?Sized,
{
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        T::read(self, buf)
    }

    fn write(&mut self, data: &[u8]) -> core::result::Result<usize, Self::Error> {
        T::write(self, data)
    }

    fn read_write(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
    ) -> core::result::Result<(usize, usize), Self::Error> {
        T::read_write(self, tx, rx)
    }
}
