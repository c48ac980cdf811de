#![allow(dead_code)]

use std::collections::HashMap;

use embedded_hal::blocking::delay::DelayUs;
use imx586_i2c::{Config, Imx586, RegisterTransport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusError;

/// Records every register write; optionally fails the n-th one
#[derive(Default)]
pub struct RecordingBus {
    pub writes: Vec<(u16, Vec<u8>)>,
    pub read_values: HashMap<u16, Vec<u8>>,
    pub fail_at: Option<usize>,
    attempts: usize,
}

impl RecordingBus {
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Default::default()
        }
    }

    /// Position of the first write to `address`
    pub fn position(&self, address: u16) -> Option<usize> {
        self.writes.iter().position(|(a, _)| *a == address)
    }

    /// Payload of the last write to `address`
    pub fn last(&self, address: u16) -> Option<&[u8]> {
        self.writes
            .iter()
            .rev()
            .find(|(a, _)| *a == address)
            .map(|(_, d)| d.as_slice())
    }

    pub fn addresses(&self) -> Vec<u16> {
        self.writes.iter().map(|(a, _)| *a).collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }
}

impl RegisterTransport for RecordingBus {
    type Error = BusError;

    fn read(&mut self, address: u16, buf: &mut [u8]) -> Result<(), BusError> {
        let value = self.read_values.get(&address).ok_or(BusError)?;
        buf.copy_from_slice(&value[..buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u16, data: &[u8]) -> Result<(), BusError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_at == Some(attempt) {
            return Err(BusError);
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }
}

/// Sums the requested delays
#[derive(Default)]
pub struct RecordingDelay {
    pub total_us: u64,
}

impl DelayUs<u32> for RecordingDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += us as u64;
    }
}

pub type TestDriver = Imx586<RecordingBus, RecordingDelay>;

pub fn driver() -> TestDriver {
    driver_with(Config::default(), RecordingBus::default())
}

pub fn mono_driver() -> TestDriver {
    driver_with(Config::default().mono(true), RecordingBus::default())
}

pub fn driver_with(config: Config, bus: RecordingBus) -> TestDriver {
    Imx586::new(bus, RecordingDelay::default(), config).expect("valid config")
}

pub fn le16(v: u16) -> Vec<u8> {
    v.to_le_bytes().to_vec()
}

pub fn le24(v: u32) -> Vec<u8> {
    v.to_le_bytes()[..3].to_vec()
}
