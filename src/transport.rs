/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Byte-level register access over the two-wire bus

use crate::modes::Reg;
use crate::Error;

/// Moves raw register bytes to and from a 16-bit register address space
pub trait RegisterTransport {
    type Error;

    /// Fill `buf` with the bytes starting at `address`
    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write `data` starting at `address`
    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: RegisterTransport + ?Sized> RegisterTransport for &mut T {
    type Error = T::Error;

    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }
}

/// Sensor register transport on an embedded-hal I2C bus.
///
/// Addresses go out big-endian ahead of the payload.
pub struct I2cTransport<I2C> {
    address: u8,
    i2c: I2C,
}

impl<I2C, CommE> I2cTransport<I2C>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::WriteRead<Error = CommE>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { address, i2c }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Longest payload a single register write carries
pub const MAX_WRITE_LEN: usize = 3;

impl<I2C, CommE> RegisterTransport for I2cTransport<I2C>
where
    I2C: embedded_hal::blocking::i2c::Write<Error = CommE>
        + embedded_hal::blocking::i2c::WriteRead<Error = CommE>,
{
    type Error = CommE;

    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), CommE> {
        let cmd_buf = address.to_be_bytes();
        self.i2c.write_read(self.address, &cmd_buf, buf)
    }

    /// Payloads longer than `MAX_WRITE_LEN` go out as consecutive
    /// transactions, relying on the sensor's address auto-increment
    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), CommE> {
        let mut write_buf = [0u8; 2 + MAX_WRITE_LEN];
        for (i, chunk) in data.chunks(MAX_WRITE_LEN).enumerate() {
            let chunk_address = address.wrapping_add((i * MAX_WRITE_LEN) as u16);
            write_buf[..2].copy_from_slice(&chunk_address.to_be_bytes());
            write_buf[2..2 + chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &write_buf[..2 + chunk.len()])?;
        }
        Ok(())
    }
}

/// Register-width helpers layered on any [`RegisterTransport`].
///
/// Reads return big-endian values, multi-byte writes are little-endian.
pub trait RegisterAccess: RegisterTransport {
    /// Read up to 4 bytes starting at `reg`
    fn read_reg(&mut self, reg: u16, len: usize) -> Result<u32, Error<Self::Error>> {
        if len == 0 || len > 4 {
            return Err(Error::InvalidLength(len));
        }
        let mut data_buf = [0u8; 4];
        self.read(reg, &mut data_buf[4 - len..])
            .map_err(Error::Transport)?;
        Ok(u32::from_be_bytes(data_buf))
    }

    /// Write one register of 1 to 3 bytes, payload already little-endian
    fn write_reg_bytes(&mut self, reg: u16, data: &[u8]) -> Result<(), Error<Self::Error>> {
        if data.is_empty() || data.len() > MAX_WRITE_LEN {
            return Err(Error::InvalidLength(data.len()));
        }
        self.write(reg, data).map_err(Error::Transport)
    }

    fn write_reg_u8(&mut self, reg: u16, val: u8) -> Result<(), Error<Self::Error>> {
        self.write_reg_bytes(reg, &[val])
    }

    fn write_reg_u16(&mut self, reg: u16, val: u16) -> Result<(), Error<Self::Error>> {
        self.write_reg_bytes(reg, &val.to_le_bytes())
    }

    /// Write the low 24 bits of `val`
    fn write_reg_u24(&mut self, reg: u16, val: u32) -> Result<(), Error<Self::Error>> {
        let bytes = val.to_le_bytes();
        self.write_reg_bytes(reg, &bytes[..3])
    }

    /// Write a register list in order, stopping at the first failure
    fn write_regs(&mut self, regs: &[Reg]) -> Result<(), Error<Self::Error>> {
        for r in regs {
            if let Err(e) = self.write_reg_u8(r.address, r.value) {
                log::error!("failed to write reg 0x{:04x}", r.address);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<T: RegisterTransport + ?Sized> RegisterAccess for T {}
