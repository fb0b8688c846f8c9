//! Device traits
//!
//! This module contains hardware-independent trait definitions for device drivers.
//! These traits enable:
//! - Unit testing with mock implementations
//! - Sensor independence for the relay and startup sequence

pub mod sensor;

pub use sensor::{
    Channel, ChannelGroup, SensorAttribute, SensorDevice, SensorError, SensorValue,
    TriggerHandler, TriggerKind, TriggerSpec,
};
