/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register addresses and fixed register values of the IMX586

/// Addresses the driver programs outside of the static mode tables
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    /// Standby (1) or streaming (0)
    ModeSelect = 0x3000,
    /// Holds register updates until released
    RegHold = 0x3001,
    /// Horizontal flip (WINMODEH)
    FlipH = 0x3020,
    /// Vertical flip (WINMODEV)
    FlipV = 0x3021,
    /// Frame length in lines, 20 bits
    Vmax = 0x3028,
    /// Line length in register clock ticks, 16 bits
    Hmax = 0x302C,
    /// Conversion gain stage select: 0 LCG, 1 HCG
    FdgSel0 = 0x3030,
    /// Integration hold (SHR0)
    Shr = 0x3050,
    /// Analog gain word
    AnalogGain = 0x306C,
    /// Chip id on read, black level on write
    ChipId = 0x30DC,
    DigitalClamp = 0x3458,
    /// HDR exposure threshold, high
    ExpThHigh = 0x36D0,
    /// HDR exposure threshold, low
    ExpThLow = 0x36D4,
    /// HDR blend
    ExpBlend = 0x36E2,
    /// Gradation compression knee 2
    Ccmp2Exp = 0x36E4,
    /// Gradation compression knee 1
    Ccmp1Exp = 0x36E8,
    /// Gradation compression slope 2
    Acmp2Exp = 0x36EC,
    /// Gradation compression slope 1
    Acmp1Exp = 0x36EE,
}

impl Register {
    pub const fn addr(self) -> u16 {
        self as u16
    }
}

/// Black level is written through the same address the chip id is read from
pub const REG_BLACK_LEVEL: u16 = Register::ChipId as u16;

pub const CHIP_ID: u8 = 0x32;

pub const MODE_STANDBY: u8 = 0x01;
pub const MODE_STREAMING: u8 = 0x00;

/// Settle time after leaving standby
pub const STREAM_DELAY_US: u32 = 25_000;

/// The only supported input clock
pub const XCLK_FREQ: u32 = 24_000_000;

/// Reference pixel rate the line length is expressed against
pub const PIXEL_RATE: u64 = 74_250_000;

pub const VMAX_MAX: u32 = 0xF_FFFF;
pub const HMAX_MAX: u32 = 0xFFFF;
pub const SHR_MAX: u32 = 0xFFFF;

/// Lines between SHR and the end of frame that can never integrate
pub const SHR_TAIL: u32 = 4;
/// Sub-frame ratio (SVR); only single sub-frame readout is used
pub const SVR: u32 = 0;
/// Fixed readout offset in register ticks
pub const EXPOSURE_OFFSET: u32 = 209;

pub const EXPOSURE_DEFAULT: u32 = 1000;

pub const BLACK_LEVEL_DEFAULT: u16 = 0;

pub const ANA_GAIN_MIN: u32 = 0;
/// 72 dB in 0.3 dB steps
pub const ANA_GAIN_MAX: u32 = 240;
pub const ANA_GAIN_DEFAULT: u32 = 0;
/// Gain contributed by the HCG stage itself, 15.3 dB
pub const ANA_GAIN_HCG_LEVEL: u32 = 51;
pub const ANA_GAIN_HCG_THRESHOLD: u32 = ANA_GAIN_HCG_LEVEL + 29;
pub const ANA_GAIN_HCG_MIN: u32 = 34;

/// Gradation compression calibration: knee thresholds and slope codes
pub const CCMP1_EXP: u32 = 500;
pub const ACMP1_EXP: u8 = 0x2;
pub const CCMP2_EXP: u32 = 11_500;
pub const ACMP2_EXP: u8 = 0x6;

/// Built-in HDR combination calibration
pub const EXP_TH_HIGH: u16 = 4095;
pub const EXP_TH_LOW: u16 = 512;
pub const EXP_BLEND: u8 = 0;

// Pixel array: native 3856 x 2180, active 3840 x 2160 at (8, 8)
pub const NATIVE_WIDTH: u32 = 3856;
pub const NATIVE_HEIGHT: u32 = 2180;
pub const PIXEL_ARRAY_LEFT: u32 = 8;
pub const PIXEL_ARRAY_TOP: u32 = 8;
pub const PIXEL_ARRAY_WIDTH: u32 = 3840;
pub const PIXEL_ARRAY_HEIGHT: u32 = 2160;

/// Embedded metadata stream structure
pub const EMBEDDED_LINE_WIDTH: u32 = 16384;
pub const NUM_EMBEDDED_LINES: u32 = 1;
