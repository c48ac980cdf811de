/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

use core::convert::TryFrom;

use embedded_hal::blocking::delay::DelayUs;

use crate::config::Config;
use crate::controls::{Control, ControlId, ControlState};
use crate::format::{self, Flip, PixelCode, SensorVariant, TransferFunction, UnsupportedFormat};
use crate::modes::{self, Mode, Rect, NATIVE_SIZE, PIXEL_ARRAY};
use crate::registers::{Register, CHIP_ID, EMBEDDED_LINE_WIDTH, NUM_EMBEDDED_LINES};
use crate::sequencer::{self, StreamState};
use crate::transport::{I2cTransport, RegisterAccess, RegisterTransport};
use crate::Error;

/// Format snapshot addressed by a request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Which {
    /// Speculative negotiation; never touches the device
    Proposed,
    /// The format the device streams with
    Committed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatRequest {
    /// Raw media bus code
    pub code: u32,
    pub width: u32,
    pub height: u32,
    pub transfer: TransferFunction,
}

/// Image pad format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    pub code: PixelCode,
    pub width: u32,
    pub height: u32,
    pub transfer: TransferFunction,
}

impl Format {
    fn of_mode(mode: &Mode, code: PixelCode) -> Self {
        Self {
            code,
            width: mode.width,
            height: mode.height,
            transfer: TransferFunction::of_mode(mode),
        }
    }
}

/// Embedded metadata pad format; fixed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetadataFormat {
    pub code: u32,
    pub width: u32,
    pub height: u32,
}

pub const METADATA_FORMAT: MetadataFormat = MetadataFormat {
    code: format::SENSOR_DATA,
    width: EMBEDDED_LINE_WIDTH,
    height: NUM_EMBEDDED_LINES,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionTarget {
    Crop,
    NativeSize,
    CropDefault,
    CropBounds,
}

#[derive(Clone, Copy, Debug)]
struct Snapshot {
    format: Format,
    crop: Rect,
}

impl Snapshot {
    fn initial(variant: SensorVariant) -> Self {
        Self {
            format: Format::of_mode(modes::default_mode(), variant.default_code()),
            crop: PIXEL_ARRAY,
        }
    }
}

/// Main driver struct.
///
/// Owns the control state of one sensor. Every operation takes `&mut self`,
/// so format negotiation, control changes and stream transitions are
/// serialized by construction; see `SharedImx586` for a locked handle.
pub struct Imx586<T, D> {
    bus: T,
    delay: D,
    variant: SensorVariant,
    state: ControlState,
    /// Committed code as requested; its bayer phase is re-derived on read
    code: PixelCode,
    proposed: Snapshot,
    stream: StreamState,
    powered: bool,
    /// Sticky until power loss
    common_written: bool,
}

impl<I2C, CommE, D> Imx586<I2cTransport<I2C>, D>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::WriteRead<Error = CommE>,
    D: DelayUs<u32>,
{
    /// Create a driver talking to the sensor over I2C at `config.address`
    pub fn with_i2c(i2c: I2C, delay: D, config: Config) -> Result<Self, Error<CommE>> {
        Self::new(I2cTransport::new(i2c, config.address), delay, config)
    }
}

impl<T, D> Imx586<T, D>
where
    T: RegisterTransport,
    D: DelayUs<u32>,
{
    /// Attach to a sensor. The device starts unpowered, in standby, with the
    /// largest 12-bit linear mode committed.
    pub fn new(bus: T, delay: D, config: Config) -> Result<Self, Error<T::Error>> {
        config.validate()?;
        let variant = config.variant;
        let mode = modes::default_mode();
        log::info!("imx586 attached, variant {:?}", variant);
        Ok(Self {
            bus,
            delay,
            variant,
            state: ControlState::new(mode),
            code: variant.default_code(),
            proposed: Snapshot::initial(variant),
            stream: StreamState::Standby,
            powered: false,
            common_written: false,
        })
    }

    /// Give back the transport and delay
    pub fn release(self) -> (T, D) {
        (self.bus, self.delay)
    }

    /// Access to the transport, e.g. for inspection
    pub fn bus(&mut self) -> &mut T {
        &mut self.bus
    }

    pub fn variant(&self) -> SensorVariant {
        self.variant
    }

    pub fn stream_state(&self) -> StreamState {
        self.stream
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn mode(&self) -> &'static Mode {
        self.state.mode()
    }

    /// Current HMAX and VMAX
    pub fn timing(&self) -> (u32, u32) {
        (self.state.line_length(), self.state.frame_length())
    }

    /// Register access is allowed from here until `power_off`
    pub fn power_on(&mut self) {
        self.powered = true;
    }

    /// The sensor loses all register contents
    pub fn power_off(&mut self) {
        self.powered = false;
        self.common_written = false;
    }

    fn require_power(&self) -> Result<(), Error<T::Error>> {
        if self.powered {
            Ok(())
        } else {
            Err(Error::PowerPrecondition)
        }
    }

    /// Control writes reach the hardware only while streaming
    fn live(&self) -> bool {
        self.powered && self.stream == StreamState::Streaming
    }

    /// Read the chip id register
    pub fn identify(&mut self) -> Result<u8, Error<T::Error>> {
        self.require_power()?;
        let id = self.bus.read_reg(Register::ChipId.addr(), 1)? as u8;
        if id != CHIP_ID {
            log::warn!("unexpected chip id {:#x}", id);
        } else {
            log::info!("device found, id {:#x}", id);
        }
        Ok(id)
    }

    fn flip(&self) -> Flip {
        self.state.flip()
    }

    fn canonical(&self, code: PixelCode) -> PixelCode {
        format::canonical_code(self.variant, code, self.flip()).unwrap_or(code)
    }

    /// Negotiate an image format.
    ///
    /// A committed request replaces the mode only if the resolved mode differs,
    /// resetting blanking to the new mode's defaults. A mode change while
    /// streaming is refused with `Error::Busy`.
    pub fn set_format(
        &mut self,
        which: Which,
        request: FormatRequest,
    ) -> Result<Format, Error<T::Error>> {
        let (table, code) =
            format::resolve(self.variant, request.code, request.transfer, self.flip())?;
        let mode = format::resolve_size(table.modes(), request.width, request.height)
            .ok_or(UnsupportedFormat(request.code))?;
        let resolved = Format::of_mode(mode, code);

        match which {
            Which::Proposed => {
                self.proposed.format = resolved;
                Ok(resolved)
            }
            Which::Committed => {
                if !core::ptr::eq(mode, self.state.mode()) {
                    if self.stream == StreamState::Streaming {
                        return Err(Error::Busy);
                    }
                    log::info!(
                        "mode {}x{} hdr={} linear={} code {:#x}",
                        mode.width,
                        mode.height,
                        mode.hdr,
                        mode.linear,
                        code.raw()
                    );
                    self.state.set_mode(mode);
                    self.code = code;
                }
                Ok(self.format(Which::Committed))
            }
        }
    }

    /// Current image pad format; the code tracks the flip state
    pub fn format(&self, which: Which) -> Format {
        match which {
            Which::Proposed => {
                let mut format = self.proposed.format;
                format.code = self.canonical(format.code);
                format
            }
            Which::Committed => Format::of_mode(self.state.mode(), self.canonical(self.code)),
        }
    }

    pub fn metadata_format(&self) -> MetadataFormat {
        METADATA_FORMAT
    }

    /// Reset the proposed snapshot to the attach-time default
    pub fn reset_proposed(&mut self) {
        self.proposed = Snapshot::initial(self.variant);
    }

    pub fn selection(&self, target: SelectionTarget, which: Which) -> Rect {
        match target {
            SelectionTarget::Crop => match which {
                Which::Proposed => self.proposed.crop,
                Which::Committed => self.state.mode().crop,
            },
            SelectionTarget::NativeSize => NATIVE_SIZE,
            SelectionTarget::CropDefault | SelectionTarget::CropBounds => PIXEL_ARRAY,
        }
    }

    pub fn enum_code(&self, index: usize) -> Option<PixelCode> {
        format::enum_code(self.variant, index, self.flip())
    }

    pub fn enum_frame_size(&self, code: PixelCode, index: usize) -> Option<(u32, u32)> {
        format::enum_frame_size(self.variant, code, index, self.flip())
    }

    pub fn control(&self, id: ControlId) -> Control {
        *self.state.control(id)
    }

    /// Set a control by raw V4L2 id
    pub fn set_control_raw(&mut self, id: u32, value: i64) -> Result<(), Error<T::Error>> {
        let id = ControlId::try_from(id).map_err(Error::InvalidControl)?;
        self.set_control(id, value)
    }

    /// Validate and store a control value.
    ///
    /// Blanking changes re-derive the exposure range and clamp exposure into
    /// it. While not streaming the value is only stored; stream start applies it.
    pub fn set_control(&mut self, id: ControlId, value: i64) -> Result<(), Error<T::Error>> {
        if id.is_flip() && self.stream == StreamState::Streaming {
            return Err(Error::Busy);
        }
        self.state
            .store(id, value)
            .map_err(|value| Error::OutOfRange { control: id, value })?;

        if !self.live() {
            log::debug!("{:?} = {} deferred", id, value);
            return Ok(());
        }

        self.state.write(&mut self.bus, id)?;
        if matches!(
            id,
            ControlId::VerticalBlanking | ControlId::HorizontalBlanking
        ) {
            // SHR is relative to the frame length
            self.state.write(&mut self.bus, ControlId::Exposure)?;
        }
        Ok(())
    }

    /// Start or stop streaming; repeating the current state is a no-op.
    ///
    /// Flip controls are frozen while streaming. Stopping an unpowered sensor
    /// only updates the logical state.
    pub fn set_stream(&mut self, enable: bool) -> Result<(), Error<T::Error>> {
        let target = if enable {
            StreamState::Streaming
        } else {
            StreamState::Standby
        };
        if self.stream == target {
            return Ok(());
        }

        if enable {
            self.require_power()?;
            sequencer::start(
                &mut self.bus,
                &mut self.delay,
                &self.state,
                &mut self.common_written,
            )?;
        } else if self.powered {
            sequencer::stop(&mut self.bus);
        }
        self.stream = target;
        Ok(())
    }

    /// System sleep: quiesce the sensor but remember that it was streaming
    pub fn suspend(&mut self) {
        if self.stream == StreamState::Streaming && self.powered {
            sequencer::stop(&mut self.bus);
        }
    }

    /// Wake from system sleep, replaying the start sequence if streaming
    pub fn resume(&mut self) -> Result<(), Error<T::Error>> {
        if self.stream != StreamState::Streaming {
            return Ok(());
        }
        let result = self.require_power().and_then(|_| {
            sequencer::start(
                &mut self.bus,
                &mut self.delay,
                &self.state,
                &mut self.common_written,
            )
        });
        if let Err(e) = result {
            log::warn!("failed to resume streaming");
            if self.powered {
                sequencer::stop(&mut self.bus);
            }
            self.stream = StreamState::Standby;
            return Err(e);
        }
        Ok(())
    }
}
