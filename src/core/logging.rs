//! Logging abstraction
//!
//! Unified logging macros for every target the crate builds for:
//! - Firmware (`pico2_w`): defmt over RTT, filtered by `DEFMT_LOG`
//! - Host tests: one line per message on stdout (stderr for errors),
//!   tagged with level and module path
//! - Host library builds (e.g. `mock` feature): no-op
//!
//! Format strings must stay within the subset both defmt and `core::fmt`
//! understand: plain `{}` placeholders, no width or precision. Arguments
//! need `defmt::Format` on target and `core::fmt::Display` on host.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[INFO  {}] {}", module_path!(), format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[WARN  {}] {}", module_path!(), format!($($arg)*));
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        eprintln!("[ERROR {}] {}", module_path!(), format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[DEBUG {}] {}", module_path!(), format!($($arg)*));
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2_w")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "pico2_w"), test))]
        println!("[TRACE {}] {}", module_path!(), format!($($arg)*));
    }};
}
