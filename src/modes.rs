/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Mode catalog: the fixed sensor readout configurations

use crate::registers::*;
use crate::tables::*;

/// A single 8-bit register write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reg {
    pub address: u16,
    pub value: u8,
}

pub const fn reg(address: u16, value: u8) -> Reg {
    Reg { address, value }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The active pixel array, used as the analog crop of every mode
pub const PIXEL_ARRAY: Rect = Rect::new(
    PIXEL_ARRAY_LEFT,
    PIXEL_ARRAY_TOP,
    PIXEL_ARRAY_WIDTH,
    PIXEL_ARRAY_HEIGHT,
);

pub const NATIVE_SIZE: Rect = Rect::new(0, 0, NATIVE_WIDTH, NATIVE_HEIGHT);

/// One physical readout configuration.
///
/// Line lengths are in register clock ticks (HMAX), frame lengths in lines (VMAX).
#[derive(Debug, PartialEq, Eq)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    /// Clear HDR combining is active
    pub hdr: bool,
    /// Output is linear; false means gradation compression is active
    pub linear: bool,
    pub min_line_length: u32,
    pub default_line_length: u32,
    pub min_frame_length: u32,
    pub default_frame_length: u32,
    /// Minimum SHR
    pub min_integration_hold: u32,
    pub crop: Rect,
    pub registers: &'static [Reg],
}

/// The disjoint mode partitions. Which one applies depends only on the
/// requested bit depth and transfer function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeTable {
    /// 12-bit, linear
    Linear12,
    /// 12-bit, Clear HDR with gradation compression
    Compressed12,
    /// 16-bit, Clear HDR linear
    HdrLinear16,
}

impl ModeTable {
    pub fn modes(self) -> &'static [Mode] {
        match self {
            ModeTable::Linear12 => MODES_12BIT,
            ModeTable::Compressed12 => MODES_12BIT_COMPRESSED,
            ModeTable::HdrLinear16 => MODES_16BIT,
        }
    }
}

pub static MODES_12BIT: &[Mode] = &[
    // 4K60 all pixel
    Mode {
        width: 3856,
        height: 2180,
        hdr: false,
        linear: true,
        min_line_length: 550,
        default_line_length: 550,
        min_frame_length: 2250,
        default_frame_length: 2250,
        min_integration_hold: 20,
        crop: PIXEL_ARRAY,
        registers: MODE_4K_REGISTERS,
    },
    // 1080p90 2x2 binning
    Mode {
        width: 1928,
        height: 1090,
        hdr: false,
        linear: true,
        min_line_length: 366,
        default_line_length: 366,
        min_frame_length: 2250,
        default_frame_length: 2250,
        min_integration_hold: 20,
        crop: PIXEL_ARRAY,
        registers: MODE_1080_REGISTERS,
    },
];

pub static MODES_12BIT_COMPRESSED: &[Mode] = &[
    // 4K30 all pixel
    Mode {
        width: 3856,
        height: 2180,
        hdr: true,
        linear: false,
        min_line_length: 550,
        default_line_length: 550,
        min_frame_length: 4500,
        default_frame_length: 4500,
        min_integration_hold: 20,
        crop: PIXEL_ARRAY,
        registers: MODE_4K_COMPRESSED_REGISTERS,
    },
];

pub static MODES_16BIT: &[Mode] = &[
    // 1080p30 2x2 binning
    Mode {
        width: 1928,
        height: 1090,
        hdr: true,
        linear: true,
        min_line_length: 550,
        default_line_length: 550,
        min_frame_length: 4500,
        default_frame_length: 4500,
        min_integration_hold: 20,
        crop: PIXEL_ARRAY,
        registers: MODE_1080_16BIT_REGISTERS,
    },
    // 4K30 all pixel
    Mode {
        width: 3856,
        height: 2180,
        hdr: true,
        linear: true,
        min_line_length: 550,
        default_line_length: 550,
        min_frame_length: 4500,
        default_frame_length: 4500,
        min_integration_hold: 20,
        crop: PIXEL_ARRAY,
        registers: MODE_4K_16BIT_REGISTERS,
    },
];

/// Mode selected at attach: the largest 12-bit linear readout
pub fn default_mode() -> &'static Mode {
    &MODES_12BIT[0]
}

/// Every mode in the catalog, in table order
pub fn all_modes() -> impl Iterator<Item = &'static Mode> {
    MODES_12BIT
        .iter()
        .chain(MODES_12BIT_COMPRESSED.iter())
        .chain(MODES_16BIT.iter())
}
