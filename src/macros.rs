//! Logging shims over `tracing`.
//!
//! The `tracing` dependency is optional. These macros forward to it when the
//! `tracing` feature is enabled and expand to nothing otherwise, so call sites
//! stay free of `cfg` attributes. Arguments are plain format arguments; with the
//! feature off they are still type-checked but never formatted.

#[cfg(feature = "tracing")]
macro_rules! bca_debug {
    ($($arg:tt)*) => { ::tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! bca_debug {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[cfg(feature = "tracing")]
macro_rules! bca_trace {
    ($($arg:tt)*) => { ::tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! bca_trace {
    ($($arg:tt)*) => {{
        let _ = ::core::format_args!($($arg)*);
    }};
}

pub(crate) use bca_debug;
pub(crate) use bca_trace;
