/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Exposure, frame length and line length arithmetic.
//!
//! Integration time is
//! `((VMAX * (SVR + 1) - SHR) * HMAX + offset) / pixel clock`, so expressed in
//! lines of `HMAX` ticks the exposure is `VMAX * (SVR + 1) - SHR` plus the
//! offset's share of a line. All products are taken in 64 bits.

use crate::modes::Mode;
use crate::registers::{PIXEL_RATE, SHR_MAX, SHR_TAIL};

/// Timing parameters that stay fixed for a given readout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadoutParams {
    /// Sub-frame ratio (SVR)
    pub sub_frame_ratio: u32,
    /// Readout offset in register ticks
    pub fixed_offset: u32,
}

impl Default for ReadoutParams {
    fn default() -> Self {
        Self {
            sub_frame_ratio: crate::registers::SVR,
            fixed_offset: crate::registers::EXPOSURE_OFFSET,
        }
    }
}

impl ReadoutParams {
    fn frame_lines(&self, frame_length: u32) -> u64 {
        frame_length as u64 * (self.sub_frame_ratio as u64 + 1)
    }

    /// Exposure in lines produced by integration hold `shr`
    pub fn exposure(&self, line_length: u32, frame_length: u32, shr: u32) -> u32 {
        let line_length = line_length.max(1) as u64;
        let lines = self.frame_lines(frame_length).saturating_sub(shr as u64);
        let ticks = lines * line_length + self.fixed_offset as u64;
        (ticks / line_length).min(u32::MAX as u64) as u32
    }

    /// Integration hold (SHR) that produces `exposure` lines
    pub fn integration_hold(&self, exposure: u32, line_length: u32, frame_length: u32) -> u32 {
        let line_length = line_length.max(1) as u64;
        let ticks = (exposure as u64 * line_length).saturating_sub(self.fixed_offset as u64);
        let lines = ticks / line_length;
        self.frame_lines(frame_length)
            .saturating_sub(lines)
            .min(u32::MAX as u64) as u32
    }

    /// Largest usable SHR for a frame length
    pub fn max_integration_hold(&self, frame_length: u32) -> u32 {
        self.frame_lines(frame_length)
            .saturating_sub(SHR_TAIL as u64)
            .min(SHR_MAX as u64) as u32
    }

    /// Valid exposure range `(min, max)` in lines for the given timing
    pub fn exposure_range(&self, line_length: u32, frame_length: u32, min_shr: u32) -> (u32, u32) {
        let max_shr = self.max_integration_hold(frame_length);
        let min_exposure = self.exposure(line_length, frame_length, max_shr);
        let max_exposure = self.exposure(line_length, frame_length, min_shr.min(max_shr));
        (min_exposure, max_exposure)
    }
}

fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator.max(1)
}

/// Pixel rate reported for a mode; constant across blanking changes
pub fn pixel_rate(mode: &Mode) -> u64 {
    mode.width as u64 * PIXEL_RATE / mode.min_line_length.max(1) as u64
}

/// HMAX that realises `hblank` pixels of horizontal blanking in `mode`
pub fn line_length_for_hblank(mode: &Mode, hblank: u32) -> u32 {
    let line_pixels = mode.width as u64 + hblank as u64;
    div_round(line_pixels * PIXEL_RATE, pixel_rate(mode)).min(u32::MAX as u64) as u32
}

/// Horizontal blanking in pixels corresponding to `line_length` ticks
pub fn hblank_for_line_length(mode: &Mode, line_length: u32) -> u32 {
    let line_pixels = div_round(line_length as u64 * pixel_rate(mode), PIXEL_RATE);
    line_pixels.saturating_sub(mode.width as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{MODES_12BIT, MODES_12BIT_COMPRESSED};

    #[test]
    fn exposure_is_frame_lines_minus_hold() {
        let p = ReadoutParams::default();
        // offset is smaller than one line, so it never contributes a full line
        assert_eq!(p.exposure(550, 2250, 20), 2230);
        assert_eq!(p.exposure(550, 2250, 2246), 4);
    }

    #[test]
    fn hold_inverse_rounds_toward_shorter_exposure() {
        let p = ReadoutParams::default();
        assert_eq!(p.integration_hold(2230, 550, 2250), 21);
        assert_eq!(p.integration_hold(1000, 550, 2250), 1251);
    }

    #[test]
    fn range_for_default_4k() {
        let p = ReadoutParams::default();
        let mode = &MODES_12BIT[0];
        assert_eq!(
            p.exposure_range(550, mode.default_frame_length, mode.min_integration_hold),
            (4, 2230)
        );
    }

    #[test]
    fn hold_is_capped_to_16_bits() {
        let p = ReadoutParams::default();
        assert_eq!(p.max_integration_hold(0x2_0000), 0xFFFF);
        let (min, max) = p.exposure_range(550, 0x2_0000, 20);
        assert_eq!(min, 0x2_0000 - 0xFFFF);
        assert_eq!(max, 0x2_0000 - 20);
    }

    #[test]
    fn zero_hblank_gives_minimum_line_length() {
        for mode in MODES_12BIT.iter().chain(MODES_12BIT_COMPRESSED.iter()) {
            assert_eq!(line_length_for_hblank(mode, 0), mode.min_line_length);
            assert_eq!(hblank_for_line_length(mode, mode.default_line_length), 0);
        }
    }

    #[test]
    fn blanking_scales_line_length() {
        let mode = &MODES_12BIT[0];
        assert_eq!(pixel_rate(mode), 520_560_000);
        // doubling the line doubles HMAX
        assert_eq!(line_length_for_hblank(mode, mode.width), 1100);
    }
}
