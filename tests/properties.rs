use imx586_i2c::controls::ControlState;
use imx586_i2c::format::{self, Flip, SensorVariant, TransferFunction};
use imx586_i2c::gain::{self, GainStage};
use imx586_i2c::modes::{self, ModeTable};
use imx586_i2c::registers::{ANA_GAIN_MAX, EXPOSURE_OFFSET, HMAX_MAX, VMAX_MAX};
use imx586_i2c::timing::ReadoutParams;
use imx586_i2c::ControlId;
use proptest::prelude::*;

const COLOR_12: [u32; 4] = [0x3012, 0x3011, 0x3010, 0x3008];
const COLOR_16: [u32; 4] = [0x3020, 0x301F, 0x301E, 0x301D];

fn mode_index() -> impl Strategy<Value = usize> {
    0..modes::all_modes().count()
}

proptest! {
    /// INVARIANT: hold -> exposure -> hold returns the hold, or one line more
    /// when the readout offset is lost to the floor
    #[test]
    fn hold_round_trips_through_exposure(
        line_length in (EXPOSURE_OFFSET + 1)..=HMAX_MAX,
        frame_length in 1100u32..=VMAX_MAX,
        shr_fraction in 0.0f64..1.0,
    ) {
        let p = ReadoutParams::default();
        let max_shr = p.max_integration_hold(frame_length);
        let min_shr = 20u32;
        prop_assume!(max_shr > min_shr);
        let shr = min_shr + ((max_shr - min_shr) as f64 * shr_fraction) as u32;

        let exposure = p.exposure(line_length, frame_length, shr);
        let back = p.integration_hold(exposure, line_length, frame_length);
        prop_assert!(back == shr || back == shr + 1, "shr {} -> {} -> {}", shr, exposure, back);
    }

    /// INVARIANT: the exposure range never inverts after a blanking change,
    /// and the live exposure is always inside it
    #[test]
    fn exposure_range_stays_ordered(
        index in mode_index(),
        vblank_fraction in 0.0f64..1.0,
        hblank in 0u32..=HMAX_MAX,
        exposure in 0i64..200_000,
    ) {
        let mode = modes::all_modes().nth(index).unwrap();
        let mut state = ControlState::new(mode);
        let _ = state.store(ControlId::Exposure, exposure.max(4).min(state.control(ControlId::Exposure).range.max));

        let range = state.control(ControlId::VerticalBlanking).range;
        let vblank = range.min + ((range.max - range.min) as f64 * vblank_fraction) as i64;
        state.store(ControlId::VerticalBlanking, vblank).unwrap();
        state.store(ControlId::HorizontalBlanking, hblank as i64).unwrap();

        let control = state.control(ControlId::Exposure);
        prop_assert!(control.range.min <= control.range.max);
        prop_assert!(control.range.contains(control.value));
        prop_assert!(state.frame_length() >= mode.height);
    }

    /// INVARIANT: gain selection is deterministic and monotonic within a stage
    #[test]
    fn gain_is_monotonic_within_stage(
        a in 0u32..=ANA_GAIN_MAX,
        b in 0u32..=ANA_GAIN_MAX,
        hdr in any::<bool>(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (gain_lo, stage_lo) = gain::select(lo, hdr);
        let (gain_hi, stage_hi) = gain::select(hi, hdr);
        prop_assert_eq!(gain::select(lo, hdr), (gain_lo, stage_lo));
        if stage_lo == stage_hi {
            prop_assert!(gain_lo <= gain_hi);
        } else {
            prop_assert_eq!(stage_lo, GainStage::Low);
            prop_assert_eq!(stage_hi, GainStage::High);
        }
    }

    /// INVARIANT: 12-bit codes follow the hint, 16-bit codes always land in
    /// the HDR linear partition
    #[test]
    fn resolver_honours_transfer_hint(
        phase in 0usize..4,
        sixteen in any::<bool>(),
        compressed in any::<bool>(),
        hflip in any::<bool>(),
        vflip in any::<bool>(),
        width in 0u32..5000,
        height in 0u32..3000,
    ) {
        let code = if sixteen { COLOR_16[phase] } else { COLOR_12[phase] };
        let hint = if compressed {
            TransferFunction::GradationCompression
        } else {
            TransferFunction::None
        };
        let flip = Flip { horizontal: hflip, vertical: vflip };
        let (table, canonical) = format::resolve(SensorVariant::Color, code, hint, flip).unwrap();
        let mode = format::resolve_size(table.modes(), width, height).unwrap();

        if sixteen {
            prop_assert_eq!(table, ModeTable::HdrLinear16);
            prop_assert!(mode.hdr && mode.linear);
        } else {
            prop_assert_eq!(mode.linear, !compressed);
        }
        prop_assert_eq!(canonical.bit_depth(), if sixteen { 16 } else { 12 });
        // re-resolving the canonical code is stable
        let again = format::resolve(SensorVariant::Color, canonical.raw(), hint, flip).unwrap();
        prop_assert_eq!(again, (table, canonical));
    }
}

#[test]
fn high_conversion_gain_boundary_is_crossed_once() {
    let switches = (1..=ANA_GAIN_MAX)
        .filter(|g| gain::select(g - 1, false).1 != gain::select(*g, false).1)
        .count();
    assert_eq!(switches, 1);
    assert!((0..=ANA_GAIN_MAX).all(|g| gain::select(g, true).1 == GainStage::Low));
}
