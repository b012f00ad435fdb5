//! Logging shims.
//!
//! With the `defmt` feature the macros forward to `defmt`; otherwise the
//! arguments are evaluated for type checking and dropped.

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)+) => { ::defmt::trace!($($arg)+) };
}

#[cfg(feature = "defmt")]
macro_rules! debug {
    ($($arg:tt)+) => { ::defmt::debug!($($arg)+) };
}

#[cfg(feature = "defmt")]
macro_rules! warn {
    ($($arg:tt)+) => { ::defmt::warn!($($arg)+) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($($arg:tt)+) => {{ let _ = ($($arg)+,); }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($($arg:tt)+) => {{ let _ = ($($arg)+,); }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($($arg:tt)+) => {{ let _ = ($($arg)+,); }};
}
