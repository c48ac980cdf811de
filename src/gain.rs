/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Analog gain to amplifier word and conversion-gain stage

use crate::registers::{ANA_GAIN_HCG_LEVEL, ANA_GAIN_HCG_MIN, ANA_GAIN_HCG_THRESHOLD};

/// Conversion gain amplifier stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainStage {
    Low = 0x00,
    High = 0x01,
}

impl GainStage {
    /// Value of the FDG_SEL0 register selecting this stage
    pub const fn fdg_sel(self) -> u8 {
        self as u8
    }
}

/// Split `requested` gain (0.3 dB units) into the analog gain word and stage.
///
/// HCG is not available while HDR combining is active.
pub fn select(requested: u32, hdr_active: bool) -> (u32, GainStage) {
    if !hdr_active && requested >= ANA_GAIN_HCG_THRESHOLD {
        let gain = requested
            .saturating_sub(ANA_GAIN_HCG_LEVEL)
            .max(ANA_GAIN_HCG_MIN);
        (gain, GainStage::High)
    } else {
        (requested, GainStage::Low)
    }
}
