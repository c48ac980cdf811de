/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Format resolution: wire pixel codes to mode tables and bayer phase

use crate::modes::{Mode, ModeTable};

/// Media bus codes the sensor can emit
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelCode {
    Y12 = 0x2013,
    Y16 = 0x202E,
    Sbggr12 = 0x3008,
    Sgbrg12 = 0x3010,
    Sgrbg12 = 0x3011,
    Srggb12 = 0x3012,
    Sbggr16 = 0x301D,
    Sgbrg16 = 0x301E,
    Sgrbg16 = 0x301F,
    Srggb16 = 0x3020,
}

/// Code of the embedded metadata pad
pub const SENSOR_DATA: u32 = 0x7002;

/// Colour codes in flip quadruplets: no flip, h-flip, v-flip, both
const COLOR_CODES: [PixelCode; 8] = [
    PixelCode::Srggb16,
    PixelCode::Sgrbg16,
    PixelCode::Sgbrg16,
    PixelCode::Sbggr16,
    PixelCode::Srggb12,
    PixelCode::Sgrbg12,
    PixelCode::Sgbrg12,
    PixelCode::Sbggr12,
];

const MONO_CODES: [PixelCode; 2] = [PixelCode::Y16, PixelCode::Y12];

impl PixelCode {
    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        COLOR_CODES
            .iter()
            .chain(MONO_CODES.iter())
            .copied()
            .find(|c| c.raw() == raw)
    }

    pub fn bit_depth(self) -> u8 {
        match self {
            PixelCode::Y16
            | PixelCode::Sbggr16
            | PixelCode::Sgbrg16
            | PixelCode::Sgrbg16
            | PixelCode::Srggb16 => 16,
            _ => 12,
        }
    }
}

/// Which colour filter the sensor carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorVariant {
    Color,
    Mono,
}

impl SensorVariant {
    fn codes(self) -> &'static [PixelCode] {
        match self {
            SensorVariant::Color => &COLOR_CODES,
            SensorVariant::Mono => &MONO_CODES,
        }
    }

    /// Codes of the power-on default format
    pub fn default_code(self) -> PixelCode {
        match self {
            SensorVariant::Color => PixelCode::Srggb12,
            SensorVariant::Mono => PixelCode::Y12,
        }
    }
}

/// Transfer function of a format, as signalled by the client
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferFunction {
    Default,
    /// Linear, no transfer function applied
    None,
    /// In-sensor highlight compression
    GradationCompression,
}

impl TransferFunction {
    pub const fn raw(self) -> u32 {
        match self {
            TransferFunction::Default => 0,
            TransferFunction::None => 5,
            TransferFunction::GradationCompression => 10,
        }
    }

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            5 => TransferFunction::None,
            10 => TransferFunction::GradationCompression,
            _ => TransferFunction::Default,
        }
    }

    /// Transfer function reported for a committed mode
    pub fn of_mode(mode: &Mode) -> Self {
        if mode.linear {
            TransferFunction::None
        } else {
            TransferFunction::GradationCompression
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    /// Offset of the matching code within a quadruplet
    fn phase(self) -> usize {
        self.horizontal as usize | (self.vertical as usize) << 1
    }
}

/// The requested code is not offered by this sensor variant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnsupportedFormat(pub u32);

/// Re-derive the bayer phase of `code` from the current flip state
pub fn canonical_code(
    variant: SensorVariant,
    code: PixelCode,
    flip: Flip,
) -> Result<PixelCode, UnsupportedFormat> {
    let codes = variant.codes();
    let index = codes
        .iter()
        .position(|c| *c == code)
        .ok_or(UnsupportedFormat(code.raw()))?;
    match variant {
        SensorVariant::Mono => Ok(code),
        SensorVariant::Color => Ok(codes[(index & !3) + flip.phase()]),
    }
}

/// Pick the mode partition and flip-canonical code for a request
pub fn resolve(
    variant: SensorVariant,
    requested: u32,
    transfer: TransferFunction,
    flip: Flip,
) -> Result<(ModeTable, PixelCode), UnsupportedFormat> {
    let code = PixelCode::from_raw(requested).ok_or(UnsupportedFormat(requested))?;
    let code = canonical_code(variant, code, flip)?;
    let table = match (code.bit_depth(), transfer) {
        (16, _) => ModeTable::HdrLinear16,
        (_, TransferFunction::GradationCompression) => ModeTable::Compressed12,
        _ => ModeTable::Linear12,
    };
    Ok((table, code))
}

/// Mode nearest to the requested size; the first of equally near modes wins
pub fn resolve_size(modes: &'static [Mode], width: u32, height: u32) -> Option<&'static Mode> {
    let mut best: Option<(&'static Mode, u64)> = None;
    for mode in modes {
        let error = (mode.width as i64 - width as i64).abs() as u64
            + (mode.height as i64 - height as i64).abs() as u64;
        match best {
            Some((_, best_error)) if best_error <= error => {}
            _ => best = Some((mode, error)),
        }
    }
    best.map(|(mode, _)| mode)
}

/// Enumerate the image pad codes, one per logical format
pub fn enum_code(variant: SensorVariant, index: usize, flip: Flip) -> Option<PixelCode> {
    let first = match variant {
        SensorVariant::Color => *COLOR_CODES.get(index * 4)?,
        SensorVariant::Mono => *MONO_CODES.get(index)?,
    };
    canonical_code(variant, first, flip).ok()
}

/// Enumerate the frame sizes available for `code` with a linear transfer function.
///
/// Only the flip-canonical variant of a colour code is accepted.
pub fn enum_frame_size(
    variant: SensorVariant,
    code: PixelCode,
    index: usize,
    flip: Flip,
) -> Option<(u32, u32)> {
    let (table, canonical) = resolve(variant, code.raw(), TransferFunction::Default, flip).ok()?;
    if canonical != code {
        return None;
    }
    table.modes().get(index).map(|m| (m.width, m.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_FLIP: Flip = Flip {
        horizontal: false,
        vertical: false,
    };

    #[test]
    fn phase_follows_flip_state() {
        let flips = [
            (false, false, PixelCode::Srggb12),
            (true, false, PixelCode::Sgrbg12),
            (false, true, PixelCode::Sgbrg12),
            (true, true, PixelCode::Sbggr12),
        ];
        for (h, v, expected) in flips.iter() {
            let flip = Flip {
                horizontal: *h,
                vertical: *v,
            };
            // any phase of the same filter collapses to the flip-matched one
            let code = canonical_code(SensorVariant::Color, PixelCode::Sgbrg12, flip).unwrap();
            assert_eq!(code, *expected);
        }
    }

    #[test]
    fn capability_is_enforced() {
        assert_eq!(
            resolve(SensorVariant::Mono, PixelCode::Srggb12.raw(), TransferFunction::Default, NO_FLIP),
            Err(UnsupportedFormat(0x3012))
        );
        assert_eq!(
            resolve(SensorVariant::Color, PixelCode::Y16.raw(), TransferFunction::Default, NO_FLIP),
            Err(UnsupportedFormat(0x202E))
        );
        assert_eq!(
            resolve(SensorVariant::Color, 0x1234, TransferFunction::Default, NO_FLIP),
            Err(UnsupportedFormat(0x1234))
        );
    }

    #[test]
    fn hint_selects_partition_for_12_bit_only() {
        let gc = TransferFunction::GradationCompression;
        assert_eq!(
            resolve(SensorVariant::Color, 0x3012, gc, NO_FLIP).unwrap().0,
            ModeTable::Compressed12
        );
        assert_eq!(
            resolve(SensorVariant::Mono, 0x2013, TransferFunction::None, NO_FLIP).unwrap().0,
            ModeTable::Linear12
        );
        assert_eq!(
            resolve(SensorVariant::Color, 0x3020, gc, NO_FLIP).unwrap().0,
            ModeTable::HdrLinear16
        );
        assert_eq!(
            resolve(SensorVariant::Mono, 0x202E, gc, NO_FLIP).unwrap().0,
            ModeTable::HdrLinear16
        );
    }

    #[test]
    fn nearest_size_prefers_catalog_order_on_ties() {
        let modes = ModeTable::HdrLinear16.modes();
        assert_eq!(resolve_size(modes, 1920, 1080).unwrap().width, 1928);
        assert_eq!(resolve_size(modes, 4000, 3000).unwrap().width, 3856);
        // equidistant from both: the first entry wins
        assert_eq!(resolve_size(modes, 2892, 1635).unwrap().width, 1928);
    }

    #[test]
    fn enumeration() {
        let hflip = Flip {
            horizontal: true,
            vertical: false,
        };
        assert_eq!(enum_code(SensorVariant::Color, 0, hflip), Some(PixelCode::Sgrbg16));
        assert_eq!(enum_code(SensorVariant::Color, 1, hflip), Some(PixelCode::Sgrbg12));
        assert_eq!(enum_code(SensorVariant::Color, 2, hflip), None);
        assert_eq!(enum_code(SensorVariant::Mono, 1, hflip), Some(PixelCode::Y12));
        assert_eq!(
            enum_frame_size(SensorVariant::Color, PixelCode::Srggb12, 1, NO_FLIP),
            Some((1928, 1090))
        );
        assert_eq!(enum_frame_size(SensorVariant::Color, PixelCode::Srggb12, 2, NO_FLIP), None);
        assert_eq!(enum_frame_size(SensorVariant::Color, PixelCode::Sbggr12, 0, NO_FLIP), None);
    }
}
