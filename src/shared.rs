/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! A driver handle that can be shared between threads

use std::sync::{Mutex, MutexGuard};

use embedded_hal::blocking::delay::DelayUs;

use crate::controls::{Control, ControlId};
use crate::driver::{Format, FormatRequest, Imx586, Which};
use crate::transport::RegisterTransport;
use crate::Error;

/// Wraps [`Imx586`] in one device-scoped lock.
///
/// Each operation holds the lock for its full duration, including bus I/O
/// and the settle delay after stream start.
pub struct SharedImx586<T, D> {
    inner: Mutex<Imx586<T, D>>,
}

impl<T, D> SharedImx586<T, D>
where
    T: RegisterTransport,
    D: DelayUs<u32>,
{
    pub fn new(driver: Imx586<T, D>) -> Self {
        Self {
            inner: Mutex::new(driver),
        }
    }

    /// Take the device lock. A panic in another holder does not poison the
    /// driver state, which stays consistent between operations.
    pub fn lock(&self) -> MutexGuard<'_, Imx586<T, D>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn into_inner(self) -> Imx586<T, D> {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    pub fn power_on(&self) {
        self.lock().power_on()
    }

    pub fn power_off(&self) {
        self.lock().power_off()
    }

    pub fn suspend(&self) {
        self.lock().suspend()
    }

    pub fn resume(&self) -> Result<(), Error<T::Error>> {
        self.lock().resume()
    }

    pub fn set_format(&self, which: Which, request: FormatRequest) -> Result<Format, Error<T::Error>> {
        self.lock().set_format(which, request)
    }

    pub fn format(&self, which: Which) -> Format {
        self.lock().format(which)
    }

    pub fn set_control(&self, id: ControlId, value: i64) -> Result<(), Error<T::Error>> {
        self.lock().set_control(id, value)
    }

    pub fn control(&self, id: ControlId) -> Control {
        self.lock().control(id)
    }

    pub fn set_stream(&self, enable: bool) -> Result<(), Error<T::Error>> {
        self.lock().set_stream(enable)
    }
}
