//! `trace!`/`warning!` that forward to the `log` facade when the `log` feature
//! is enabled and expand to nothing otherwise.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)+) => { ::log::trace!(target: "zenbmp", $($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

#[cfg(feature = "log")]
macro_rules! warning {
    ($($arg:tt)+) => { ::log::warn!(target: "zenbmp", $($arg)+) };
}

#[cfg(not(feature = "log"))]
macro_rules! warning {
    ($($arg:tt)+) => {{
        if false {
            let _ = ::core::format_args!($($arg)+);
        }
    }};
}

pub(crate) use {trace, warning};
