//! Core infrastructure
//!
//! Currently just the logging macros shared by every module.

pub mod logging;
