//! Subsystems
//!
//! - `relay`: latest-value sample hand-off between capture and reporting
//! - `status`: tri-color status LED

pub mod relay;
pub mod status;
