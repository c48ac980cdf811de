/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Attach-time configuration

use crate::format::SensorVariant;
use crate::registers::XCLK_FREQ;
use crate::Error;

/// 7-bit bus address the sensor answers on
pub const DEFAULT_I2C_ADDRESS: u8 = 0x1A;

/// Board facts the driver cannot discover on its own
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub address: u8,
    pub variant: SensorVariant,
    /// Frequency of the input clock fed to the sensor
    pub xclk_hz: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_I2C_ADDRESS,
            variant: SensorVariant::Color,
            xclk_hz: XCLK_FREQ,
        }
    }
}

impl Config {
    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Select the monochrome sensor variant
    pub fn mono(mut self, mono: bool) -> Self {
        self.variant = if mono {
            SensorVariant::Mono
        } else {
            SensorVariant::Color
        };
        self
    }

    pub fn xclk_hz(mut self, xclk_hz: u32) -> Self {
        self.xclk_hz = xclk_hz;
        self
    }

    /// The register tables assume a 24 MHz input clock
    pub fn validate<E>(&self) -> Result<(), Error<E>> {
        if self.xclk_hz != XCLK_FREQ {
            log::error!("xclk frequency not supported: {} Hz", self.xclk_hz);
            return Err(Error::UnsupportedClock(self.xclk_hz));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = Config::default().mono(true).address(0x10);
        assert_eq!(config.variant, SensorVariant::Mono);
        assert_eq!(config.address, 0x10);
        assert!(config.validate::<()>().is_ok());
    }

    #[test]
    fn rejects_other_clocks() {
        let config = Config::default().xclk_hz(27_000_000);
        assert!(matches!(
            config.validate::<()>(),
            Err(Error::UnsupportedClock(27_000_000))
        ));
    }
}
