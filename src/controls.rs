/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Control values, their derived ranges, and the register write path of each

use core::convert::TryFrom;

use crate::format::Flip;
use crate::gain::{self, GainStage};
use crate::modes::Mode;
use crate::registers::*;
use crate::timing::{self, ReadoutParams};
use crate::transport::RegisterAccess;
use crate::Error;

/// Controls exposed toward the client, keyed by their V4L2 control id
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlId {
    /// Exposure in lines
    Exposure = 0x0098_0911,
    HorizontalFlip = 0x0098_0914,
    VerticalFlip = 0x0098_0915,
    /// Vertical blanking in lines
    VerticalBlanking = 0x009E_0901,
    /// Horizontal blanking in pixels
    HorizontalBlanking = 0x009E_0902,
    /// Analog gain in 0.3 dB steps
    AnalogueGain = 0x009E_0903,
    /// Read-only
    PixelRate = 0x009F_0902,
}

impl ControlId {
    /// Order in which stream start re-applies the writable controls
    pub const APPLY_ORDER: [ControlId; 6] = [
        ControlId::Exposure,
        ControlId::AnalogueGain,
        ControlId::VerticalBlanking,
        ControlId::HorizontalBlanking,
        ControlId::HorizontalFlip,
        ControlId::VerticalFlip,
    ];

    pub fn is_flip(self) -> bool {
        matches!(self, ControlId::HorizontalFlip | ControlId::VerticalFlip)
    }
}

impl TryFrom<u32> for ControlId {
    type Error = u32;

    fn try_from(raw: u32) -> Result<Self, u32> {
        let id = match raw {
            0x0098_0911 => ControlId::Exposure,
            0x0098_0914 => ControlId::HorizontalFlip,
            0x0098_0915 => ControlId::VerticalFlip,
            0x009E_0901 => ControlId::VerticalBlanking,
            0x009E_0902 => ControlId::HorizontalBlanking,
            0x009E_0903 => ControlId::AnalogueGain,
            0x009F_0902 => ControlId::PixelRate,
            _ => return Err(raw),
        };
        Ok(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    pub default: i64,
}

impl ControlRange {
    pub const fn new(min: i64, max: i64, default: i64) -> Self {
        Self {
            min,
            max,
            step: 1,
            default,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.max(self.min).min(self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Control {
    pub value: i64,
    pub range: ControlRange,
}

impl Control {
    const fn new(range: ControlRange) -> Self {
        Self {
            value: range.default,
            range,
        }
    }
}

/// Current mode, timing and control values of one sensor.
///
/// Exposure is kept inside the range derived from the current frame and line
/// length at all times.
#[derive(Debug)]
pub struct ControlState {
    mode: &'static Mode,
    params: ReadoutParams,
    /// HMAX
    line_length: u32,
    /// VMAX
    frame_length: u32,
    exposure: Control,
    gain: Control,
    vblank: Control,
    hblank: Control,
    hflip: Control,
    vflip: Control,
    pixel_rate: Control,
}

impl ControlState {
    pub fn new(mode: &'static Mode) -> Self {
        let mut state = Self {
            mode,
            params: ReadoutParams::default(),
            line_length: mode.default_line_length,
            frame_length: mode.default_frame_length,
            exposure: Control::new(ControlRange::new(0, 0, EXPOSURE_DEFAULT as i64)),
            gain: Control::new(ControlRange::new(
                ANA_GAIN_MIN as i64,
                ANA_GAIN_MAX as i64,
                ANA_GAIN_DEFAULT as i64,
            )),
            vblank: Control::new(ControlRange::new(0, 0, 0)),
            hblank: Control::new(ControlRange::new(0, 0, 0)),
            hflip: Control::new(ControlRange::new(0, 1, 0)),
            vflip: Control::new(ControlRange::new(0, 1, 0)),
            pixel_rate: Control::new(ControlRange::new(0, 0, 0)),
        };
        state.set_mode(mode);
        state
    }

    pub fn mode(&self) -> &'static Mode {
        self.mode
    }

    pub fn line_length(&self) -> u32 {
        self.line_length
    }

    pub fn frame_length(&self) -> u32 {
        self.frame_length
    }

    pub fn flip(&self) -> Flip {
        Flip {
            horizontal: self.hflip.value != 0,
            vertical: self.vflip.value != 0,
        }
    }

    pub fn control(&self, id: ControlId) -> &Control {
        match id {
            ControlId::Exposure => &self.exposure,
            ControlId::AnalogueGain => &self.gain,
            ControlId::VerticalBlanking => &self.vblank,
            ControlId::HorizontalBlanking => &self.hblank,
            ControlId::HorizontalFlip => &self.hflip,
            ControlId::VerticalFlip => &self.vflip,
            ControlId::PixelRate => &self.pixel_rate,
        }
    }

    fn control_mut(&mut self, id: ControlId) -> &mut Control {
        match id {
            ControlId::Exposure => &mut self.exposure,
            ControlId::AnalogueGain => &mut self.gain,
            ControlId::VerticalBlanking => &mut self.vblank,
            ControlId::HorizontalBlanking => &mut self.hblank,
            ControlId::HorizontalFlip => &mut self.hflip,
            ControlId::VerticalFlip => &mut self.vflip,
            ControlId::PixelRate => &mut self.pixel_rate,
        }
    }

    /// Commit `mode` and reset framing to its defaults.
    ///
    /// Blanking ranges, the pixel rate and the exposure range are republished.
    /// Exposure and gain keep their values, clamped into the new ranges.
    pub fn set_mode(&mut self, mode: &'static Mode) {
        self.mode = mode;

        let rate = timing::pixel_rate(mode) as i64;
        self.pixel_rate = Control::new(ControlRange::new(rate, rate, rate));

        let def_hblank = timing::hblank_for_line_length(mode, mode.default_line_length) as i64;
        self.hblank = Control::new(ControlRange::new(0, HMAX_MAX as i64, def_hblank));

        let height = mode.height as i64;
        self.vblank = Control::new(ControlRange::new(
            mode.min_frame_length as i64 - height,
            VMAX_MAX as i64 - height,
            mode.default_frame_length as i64 - height,
        ));

        self.line_length = timing::line_length_for_hblank(mode, def_hblank as u32);
        self.frame_length = mode.default_frame_length;
        self.update_exposure_range();
    }

    /// Store a validated value and propagate dependent timing.
    ///
    /// Returns true if the exposure value was moved by the range update.
    pub fn store(&mut self, id: ControlId, value: i64) -> Result<bool, i64> {
        let control = self.control_mut(id);
        if !control.range.contains(value) {
            return Err(value);
        }
        control.value = value;

        match id {
            ControlId::VerticalBlanking => {
                self.frame_length = (self.mode.height as i64 + value) as u32;
                Ok(self.update_exposure_range())
            }
            ControlId::HorizontalBlanking => {
                self.line_length = timing::line_length_for_hblank(self.mode, value as u32);
                Ok(self.update_exposure_range())
            }
            _ => Ok(false),
        }
    }

    /// Re-derive the exposure range and clamp the live exposure into it
    fn update_exposure_range(&mut self) -> bool {
        let (min, max) = self.params.exposure_range(
            self.line_length,
            self.frame_length,
            self.mode.min_integration_hold,
        );
        let (min, max) = (min as i64, max as i64);
        let default = (EXPOSURE_DEFAULT as i64).max(min).min(max);
        self.exposure.range = ControlRange::new(min, max, default);

        let clamped = self.exposure.range.clamp(self.exposure.value);
        let moved = clamped != self.exposure.value;
        self.exposure.value = clamped;

        log::debug!(
            "exposure range [{}, {}], exposure {} (VMAX {}, HMAX {})",
            min,
            max,
            clamped,
            self.frame_length,
            self.line_length
        );
        moved
    }

    /// SHR realising the current exposure, kept within the usable hold range
    pub fn integration_hold(&self) -> u32 {
        let shr = self.params.integration_hold(
            self.exposure.value as u32,
            self.line_length,
            self.frame_length,
        );
        let max_shr = self.params.max_integration_hold(self.frame_length);
        shr.max(self.mode.min_integration_hold).min(max_shr)
    }

    pub fn gain_stage(&self) -> (u32, GainStage) {
        gain::select(self.gain.value as u32, self.mode.hdr)
    }

    /// Program the hardware register(s) backing control `id`
    pub fn write<T>(&self, bus: &mut T, id: ControlId) -> Result<(), Error<T::Error>>
    where
        T: RegisterAccess + ?Sized,
    {
        match id {
            ControlId::Exposure => {
                let shr = self.integration_hold();
                log::debug!("exposure {} -> SHR {}", self.exposure.value, shr);
                bus.write_reg_u16(Register::Shr.addr(), shr as u16)
            }
            ControlId::AnalogueGain => {
                let (gain, stage) = self.gain_stage();
                log::debug!("analog gain {} -> {} {:?}", self.gain.value, gain, stage);
                bus.write_reg_u8(Register::RegHold.addr(), 1)?;
                let result = bus
                    .write_reg_u16(Register::AnalogGain.addr(), gain as u16)
                    .and_then(|_| bus.write_reg_u8(Register::FdgSel0.addr(), stage.fdg_sel()));
                let released = bus.write_reg_u8(Register::RegHold.addr(), 0);
                result.and(released)
            }
            ControlId::VerticalBlanking => {
                log::debug!("vblank {} -> VMAX {}", self.vblank.value, self.frame_length);
                bus.write_reg_u24(Register::Vmax.addr(), self.frame_length)
            }
            ControlId::HorizontalBlanking => {
                log::debug!("hblank {} -> HMAX {}", self.hblank.value, self.line_length);
                bus.write_reg_u16(Register::Hmax.addr(), self.line_length as u16)
            }
            ControlId::HorizontalFlip => {
                bus.write_reg_u8(Register::FlipH.addr(), self.hflip.value as u8)
            }
            ControlId::VerticalFlip => {
                bus.write_reg_u8(Register::FlipV.addr(), self.vflip.value as u8)
            }
            ControlId::PixelRate => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::{MODES_12BIT, MODES_12BIT_COMPRESSED};

    #[test]
    fn defaults_for_4k_linear() {
        let state = ControlState::new(&MODES_12BIT[0]);
        assert_eq!(state.line_length(), 550);
        assert_eq!(state.frame_length(), 2250);
        assert_eq!(state.control(ControlId::HorizontalBlanking).value, 0);
        assert_eq!(state.control(ControlId::VerticalBlanking).value, 70);
        assert_eq!(state.control(ControlId::VerticalBlanking).range.min, 70);
        assert_eq!(state.control(ControlId::PixelRate).value, 520_560_000);
        let exposure = state.control(ControlId::Exposure);
        assert_eq!(exposure.value, 1000);
        assert_eq!((exposure.range.min, exposure.range.max), (4, 2230));
    }

    #[test]
    fn vblank_rederives_exposure_range_and_clamps() {
        let mut state = ControlState::new(&MODES_12BIT_COMPRESSED[0]);
        assert_eq!(state.store(ControlId::Exposure, 4000), Ok(false));
        // shrink the frame to its minimum: 4500 lines
        let min = state.control(ControlId::VerticalBlanking).range.min;
        assert_eq!(state.store(ControlId::VerticalBlanking, min), Ok(false));
        assert_eq!(state.frame_length(), 4500);

        // grow then shrink so the clamp has to move the exposure
        state.store(ControlId::VerticalBlanking, min + 10_000).unwrap();
        state.store(ControlId::Exposure, 14_000).unwrap();
        assert_eq!(state.store(ControlId::VerticalBlanking, min), Ok(true));
        assert_eq!(state.control(ControlId::Exposure).value, 4480);
    }

    #[test]
    fn out_of_range_leaves_state_untouched() {
        let mut state = ControlState::new(&MODES_12BIT[0]);
        assert_eq!(state.store(ControlId::VerticalBlanking, 69), Err(69));
        assert_eq!(state.frame_length(), 2250);
        assert_eq!(state.store(ControlId::AnalogueGain, 241), Err(241));
        assert_eq!(state.store(ControlId::HorizontalFlip, -1), Err(-1));
    }

    #[test]
    fn hold_stays_in_usable_range() {
        let mut state = ControlState::new(&MODES_12BIT[0]);
        state.store(ControlId::Exposure, 4).unwrap();
        assert_eq!(state.integration_hold(), 2246);
        state.store(ControlId::Exposure, 2230).unwrap();
        assert_eq!(state.integration_hold(), 21);
    }

    #[test]
    fn raw_ids() {
        assert_eq!(ControlId::try_from(0x0098_0911), Ok(ControlId::Exposure));
        assert_eq!(ControlId::try_from(0x009E_0903), Ok(ControlId::AnalogueGain));
        assert_eq!(ControlId::try_from(0x1234), Err(0x1234));
    }
}
