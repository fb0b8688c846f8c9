//! Application Parameters
//!
//! Parameters are fixed at build time. `build.rs` reads optional environment
//! variables and re-exports them to the compiler; this module parses them
//! with per-field fallbacks.
//!
//! ```text
//! IMU_* environment ──► build.rs (cargo:rustc-env) ──► env!() ──► AppParams
//! ```

pub mod app;

pub use app::{AppParams, SamplingMode};
