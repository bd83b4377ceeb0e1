//! Logging shims forwarding to `log` or `defmt`, whichever feature is enabled.
//!
//! With neither feature the macros expand to nothing, so the arguments are not evaluated.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

pub(crate) use {debug, trace, warn_log};
