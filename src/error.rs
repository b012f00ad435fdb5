//! Error handling primitives for the ADS124S08 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
///
/// Every variant except [`Error::Interface`] and [`Error::ShortTransfer`] is
/// raised before the transport is touched, so the device state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The transport moved fewer bytes than the transaction required.
    ShortTransfer,
    /// Register count outside `1..=18` or the span runs past `GPIOCON`.
    InvalidRange,
    /// A multi-register transfer was requested without a buffer.
    MissingBuffer,
    /// The provided buffer cannot hold the requested register count.
    BufferTooSmall,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
