//! Logging shims
//!
//! Forward to the `log` facade when the `log` feature is enabled and compile
//! to nothing otherwise, so call sites never need their own `cfg`.

#![macro_use]
#![allow(unused_macros)]

macro_rules! log_trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "log")]
            ::log::trace!($s $(, $x)*);

            #[cfg(not(feature = "log"))]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! log_debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "log")]
            ::log::debug!($s $(, $x)*);

            #[cfg(not(feature = "log"))]
            {
                $( let _ = &$x; )*
            }
        }
    };
}
