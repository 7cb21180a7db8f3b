//! # Sensor compare
//!
//! Compares accelerometer, gyroscope and magnetometer recordings made at the
//! same time by a smartphone and a microcontroller board.
//!
//! For every modality both CSV exports are reduced to:
//!
//! - mean and sample standard deviation per axis
//! - average sampling interval and frequency
//!
//! Microcontroller acceleration is converted from g to m/s^2 before the
//! devices are compared. Charts (time series, Z-axis histogram, std bars) are
//! written as PNG files.
//!
//! Devices are compared in aggregate only, timestamps of the two devices are
//! never aligned.

mod chart;
pub mod config;
mod error;
pub mod histogram;
pub mod logger;
pub mod modality;
pub mod pipeline;
mod report;
mod stats;
pub mod summary;
mod table;

pub use self::chart::*;
pub use self::config::Config;
pub use self::error::*;
pub use self::stats::*;
pub use self::table::*;

pub use channel_stats::ChannelStats;
pub use sampling::SamplingDescriptor;
pub use units::{G_CONST, UnitConversion};
