/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register sequences that move the sensor between standby and streaming

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

use embedded_hal::blocking::delay::DelayUs;

use crate::controls::{ControlId, ControlState};
use crate::registers::*;
use crate::tables::COMMON_REGISTERS;
use crate::transport::RegisterAccess;
use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamState {
    Standby,
    Streaming,
}

/// Program everything needed to stream the current mode, then leave standby.
///
/// `common_written` is set once the power-on register list has gone out and
/// stays set until the caller clears it on power loss. Nothing is rolled back
/// on failure; every write in the sequence can be repeated.
pub fn start<T, D>(
    bus: &mut T,
    delay: &mut D,
    state: &ControlState,
    common_written: &mut bool,
) -> Result<(), Error<T::Error>>
where
    T: RegisterAccess + ?Sized,
    D: DelayUs<u32>,
{
    #[cfg(feature = "rttdebug")]
    rprintln!("imx586 start streaming");

    let mode = state.mode();
    log::info!("start streaming {}x{}", mode.width, mode.height);

    if !*common_written {
        bus.write_regs(COMMON_REGISTERS).map_err(|e| {
            log::error!("failed to set common settings");
            e
        })?;
        bus.write_reg_u16(REG_BLACK_LEVEL, BLACK_LEVEL_DEFAULT)?;
        *common_written = true;
        log::debug!("common registers written");
    }

    bus.write_regs(mode.registers).map_err(|e| {
        log::error!("failed to set mode");
        e
    })?;

    if mode.linear {
        bus.write_reg_u24(Register::Ccmp1Exp.addr(), 0)?;
        bus.write_reg_u8(Register::Acmp1Exp.addr(), 0)?;
        bus.write_reg_u24(Register::Ccmp2Exp.addr(), 0)?;
        bus.write_reg_u8(Register::Acmp2Exp.addr(), 0)?;
    } else {
        bus.write_reg_u24(Register::Ccmp1Exp.addr(), CCMP1_EXP)?;
        bus.write_reg_u8(Register::Acmp1Exp.addr(), ACMP1_EXP)?;
        bus.write_reg_u24(Register::Ccmp2Exp.addr(), CCMP2_EXP)?;
        bus.write_reg_u8(Register::Acmp2Exp.addr(), ACMP2_EXP)?;
    }

    if mode.hdr {
        bus.write_reg_u16(Register::ExpThHigh.addr(), EXP_TH_HIGH)?;
        bus.write_reg_u16(Register::ExpThLow.addr(), EXP_TH_LOW)?;
        bus.write_reg_u8(Register::ExpBlend.addr(), EXP_BLEND)?;
    }

    bus.write_reg_u8(Register::DigitalClamp.addr(), 0)?;

    // registers may be at factory defaults after power-up
    for id in ControlId::APPLY_ORDER.iter() {
        state.write(bus, *id).map_err(|e| {
            log::error!("failed to apply {:?}", id);
            e
        })?;
    }

    bus.write_reg_u8(Register::ModeSelect.addr(), MODE_STREAMING)?;
    delay.delay_us(STREAM_DELAY_US);

    #[cfg(feature = "rttdebug")]
    rprintln!("imx586 streaming");
    Ok(())
}

/// Put the sensor back into standby. Failures are logged, never returned.
pub fn stop<T>(bus: &mut T)
where
    T: RegisterAccess + ?Sized,
{
    log::info!("stop streaming");
    if bus
        .write_reg_u8(Register::ModeSelect.addr(), MODE_STANDBY)
        .is_err()
    {
        log::warn!("failed to stop stream");
    }

    #[cfg(feature = "rttdebug")]
    rprintln!("imx586 standby");
}
