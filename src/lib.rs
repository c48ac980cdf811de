/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/
#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! Control driver for the Sony IMX586 image sensor
//! This imaging sensor has multiple interfaces:
//! - Two-wire i2c for configuration registers (i2c)
//! - MIPI CSI-2 pixel data out
//! - XCLR reset, input clock and supplies
//! This driver is concerned only with the i2c interface: it picks the readout
//! mode for a requested format, keeps exposure, gain and blanking consistent,
//! and sequences the register writes that start and stop streaming.
//! Power sequencing is left to the caller, who brackets register access with
//! `power_on` / `power_off`.

use core::fmt;

pub mod config;
pub mod controls;
pub mod driver;
pub mod format;
pub mod gain;
pub mod modes;
pub mod registers;
pub mod sequencer;
#[cfg(feature = "std")]
pub mod shared;
pub mod tables;
pub mod timing;
pub mod transport;

pub use config::{Config, DEFAULT_I2C_ADDRESS};
pub use controls::{Control, ControlId, ControlRange};
pub use driver::{Format, FormatRequest, Imx586, MetadataFormat, SelectionTarget, Which};
pub use format::{Flip, PixelCode, SensorVariant, TransferFunction, UnsupportedFormat};
pub use gain::GainStage;
pub use modes::{Mode, ModeTable, Rect, Reg};
pub use sequencer::StreamState;
#[cfg(feature = "std")]
pub use shared::SharedImx586;
pub use transport::{I2cTransport, RegisterAccess, RegisterTransport};

/// Errors in this crate
#[derive(Debug)]
pub enum Error<CommE> {
    /// Sensor communication error
    Transport(CommE),

    /// Pixel code not offered by this sensor variant
    UnsupportedFormat(u32),

    /// Control value outside its currently derived range
    OutOfRange { control: ControlId, value: i64 },

    /// Register access attempted while the sensor is unpowered
    PowerPrecondition,

    /// Not allowed while streaming
    Busy,

    /// Unknown control id
    InvalidControl(u32),

    /// Input clock the register tables were not made for
    UnsupportedClock(u32),

    /// Register reads are at most 4 bytes wide
    InvalidLength(usize),
}

impl<CommE> From<UnsupportedFormat> for Error<CommE> {
    fn from(e: UnsupportedFormat) -> Self {
        Error::UnsupportedFormat(e.0)
    }
}

impl<CommE: fmt::Debug> fmt::Display for Error<CommE> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "register transport error: {:?}", e),
            Error::UnsupportedFormat(code) => write!(f, "unsupported format code {:#x}", code),
            Error::OutOfRange { control, value } => {
                write!(f, "{:?} value {} out of range", control, value)
            }
            Error::PowerPrecondition => write!(f, "sensor is not powered"),
            Error::Busy => write!(f, "not allowed while streaming"),
            Error::InvalidControl(id) => write!(f, "unknown control id {:#x}", id),
            Error::UnsupportedClock(hz) => write!(f, "unsupported input clock {} Hz", hz),
            Error::InvalidLength(len) => write!(f, "invalid register read length {}", len),
        }
    }
}

#[cfg(feature = "std")]
impl<CommE: fmt::Debug> std::error::Error for Error<CommE> {}
