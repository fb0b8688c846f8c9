//! LSM6DSL Register Definitions
//!
//! Based on the LSM6DSL datasheet (DocID028475 Rev 7).

#![allow(dead_code)]

// ============================================================================
// I2C Address
// ============================================================================

/// I2C address when SA0 is low
pub const LSM6DSL_ADDR: u8 = 0x6A;

/// I2C address when SA0 is high
pub const LSM6DSL_ADDR_ALT: u8 = 0x6B;

// ============================================================================
// Registers
// ============================================================================

/// INT1 pin routing
pub const INT1_CTRL: u8 = 0x0D;

/// Device identification
pub const WHO_AM_I: u8 = 0x0F;

/// Expected WHO_AM_I value
pub const WHO_AM_I_VALUE: u8 = 0x6A;

/// Accelerometer control (ODR_XL[7:4], FS_XL[3:2], BW[1:0])
pub const CTRL1_XL: u8 = 0x10;

/// Gyroscope control (ODR_G[7:4], FS_G[3:1])
pub const CTRL2_G: u8 = 0x11;

/// Common control (BDU, IF_INC, SW_RESET)
pub const CTRL3_C: u8 = 0x12;

/// Status (XLDA, GDA, TDA)
pub const STATUS_REG: u8 = 0x1E;

/// Gyroscope output, X low byte (Y, Z follow)
pub const OUTX_L_G: u8 = 0x22;

/// Accelerometer output, X low byte (Y, Z follow)
pub const OUTX_L_XL: u8 = 0x28;

// ============================================================================
// Bit fields
// ============================================================================

/// INT1_CTRL: accelerometer data ready on INT1
pub const INT1_DRDY_XL: u8 = 1 << 0;

/// INT1_CTRL: gyroscope data ready on INT1
pub const INT1_DRDY_G: u8 = 1 << 1;

/// CTRL3_C: block data update
pub const CTRL3_C_BDU: u8 = 1 << 6;

/// CTRL3_C: register address auto-increment
pub const CTRL3_C_IF_INC: u8 = 1 << 2;

/// ODR field mask in CTRL1_XL / CTRL2_G
pub const ODR_MASK: u8 = 0xF0;

/// ODR field shift in CTRL1_XL / CTRL2_G
pub const ODR_SHIFT: u8 = 4;

// ============================================================================
// Scaling (power-on full scale: ±2 g, ±250 dps)
// ============================================================================

/// Accelerometer sensitivity at ±2 g (µg/LSB)
pub const ACCEL_SENSITIVITY_UG: i64 = 61;

/// Gyroscope sensitivity at ±250 dps (µdps/LSB)
pub const GYRO_SENSITIVITY_UDPS: i64 = 8750;

/// Standard gravity in units of 10 µm/s² (9.80665 m/s²)
pub const GRAVITY_10UM_S2: i64 = 980_665;

/// Supported output data rates in tenths of Hz with their ODR codes
pub const ODR_TABLE: [(u32, u8); 10] = [
    (125, 1),
    (260, 2),
    (520, 3),
    (1_040, 4),
    (2_080, 5),
    (4_160, 6),
    (8_330, 7),
    (16_600, 8),
    (33_300, 9),
    (66_600, 10),
];
