//! Register-level driver for HDC2010.
//! Blocking I2C helpers; the async mirror of every operation lives behind the `async` feature.
//!
//! Every write to CONFIG or MEASUREMENT_CONFIG goes through [`Hdc2010Driver::update_config`],
//! which holds the shared [`ConfigLock`] across its read and its write.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::data_types::{Config, Humidity, MeasurementMode, RefreshRate, Resolution, Temperature};
use crate::error::Error;
use crate::lock::ConfigLock;
use crate::registers::{
    addr, raw_to_celsius, raw_to_relative_humidity, word_from_bus, word_to_bus, ConfigUpdate, DEFAULT_I2C_ADDRESS,
    HEATER_OFF, HEATER_ON, SOFT_RESET, TRIGGER_MEASUREMENT,
};

/// HDC2010 register driver: one bus handle, one device address.
pub struct Hdc2010Driver<'a, I2C, M: RawMutex> {
    i2c: I2C,
    address: u8,
    lock: &'a ConfigLock<M>,
}

impl<'a, I2C, M: RawMutex> Hdc2010Driver<'a, I2C, M> {
    /// Create a driver for the default I2C address (0x40).
    pub fn new(i2c: I2C, lock: &'a ConfigLock<M>) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS, lock)
    }

    /// Create a driver for a custom I2C address.
    pub fn with_address(i2c: I2C, address: u8, lock: &'a ConfigLock<M>) -> Self {
        Self { i2c, address, lock }
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, M> Hdc2010Driver<'_, I2C, M>
where
    I2C: embedded_hal::i2c::I2c,
    M: RawMutex,
{
    /// Write a single register.
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)
    }

    /// Read a single register.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Read a 16-bit register pair, returned in host order.
    pub fn read_word(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(word_from_bus(buf))
    }

    /// Write a 16-bit register pair given in host order.
    pub fn write_word(&mut self, reg: u8, word: u16) -> Result<(), Error<I2C::Error>> {
        let [lo, hi] = word_to_bus(word);
        self.i2c
            .write(self.address, &[reg, lo, hi])
            .map_err(Error::I2c)
    }

    /// Read-modify-write a configuration register: clear `reset`, set `set`.
    ///
    /// Holds the shared configuration lock from the read until the write
    /// completes. A failed read or write is returned as is; the register keeps
    /// whatever the last successful write left in it.
    pub fn update_config(&mut self, register: u8, set: u8, reset: u8) -> Result<(), Error<I2C::Error>> {
        self.apply(ConfigUpdate::new(register, set, reset))
    }

    /// Apply a prepared [`ConfigUpdate`].
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), Error<I2C::Error>> {
        let lock = self.lock;
        lock.run_blocking(|| {
            let current = self.read_reg(update.register)?;
            let new = update.apply(current);
            debug!("config {=u8:#x}: {=u8:#x} -> {=u8:#x}", update.register, current, new);
            self.write_reg(update.register, new)
        })
    }

    /// Software reset. The device clears the bit by itself.
    pub fn soft_reset(&mut self) -> Result<(), Error<I2C::Error>> {
        self.apply(SOFT_RESET)
    }

    /// Switch the integrated heater on or off.
    pub fn heater(&mut self, on: bool) -> Result<(), Error<I2C::Error>> {
        self.apply(if on { HEATER_ON } else { HEATER_OFF })
    }

    pub fn set_temperature_resolution(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        self.apply(resolution.temperature_update())
    }

    pub fn set_humidity_resolution(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        self.apply(resolution.humidity_update())
    }

    pub fn set_refresh_rate(&mut self, rate: RefreshRate) -> Result<(), Error<I2C::Error>> {
        self.apply(rate.update())
    }

    pub fn set_mode(&mut self, mode: MeasurementMode) -> Result<(), Error<I2C::Error>> {
        self.apply(mode.update())
    }

    /// Start one measurement cycle (needed before each read in manual mode).
    pub fn trigger_measurement(&mut self) -> Result<(), Error<I2C::Error>> {
        self.apply(TRIGGER_MEASUREMENT)
    }

    pub fn manufacturer_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_word(addr::MANUFACTURER_ID)
    }

    pub fn device_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_word(addr::DEVICE_ID)
    }

    pub fn read_temperature(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        let raw = self.read_word(addr::TEMP)?;
        Ok(Temperature { celsius: raw_to_celsius(raw), raw })
    }

    pub fn read_humidity(&mut self) -> Result<Humidity, Error<I2C::Error>> {
        let raw = self.read_word(addr::HUMID)?;
        Ok(Humidity { rh: raw_to_relative_humidity(raw), raw })
    }

    /// Decode the current contents of both configuration registers.
    pub fn read_config(&mut self) -> Result<Config, Error<I2C::Error>> {
        let config = self.read_reg(addr::CONFIG)?;
        let meas_config = self.read_reg(addr::MEASUREMENT_CONFIG)?;
        Ok(Config::decode(config, meas_config))
    }
}

#[cfg(feature = "async")]
impl<I2C, M> Hdc2010Driver<'_, I2C, M>
where
    I2C: embedded_hal_async::i2c::I2c,
    M: RawMutex,
{
    pub async fn write_reg_async(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .await
            .map_err(Error::I2c)
    }

    pub async fn read_reg_async(&mut self, reg: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    pub async fn read_word_async(&mut self, reg: u8) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(word_from_bus(buf))
    }

    pub async fn write_word_async(&mut self, reg: u8, word: u16) -> Result<(), Error<I2C::Error>> {
        let [lo, hi] = word_to_bus(word);
        self.i2c
            .write(self.address, &[reg, lo, hi])
            .await
            .map_err(Error::I2c)
    }

    /// Async version of [`update_config`](Self::update_config). Waits for the
    /// shared lock instead of failing when it is taken.
    pub async fn update_config_async(&mut self, register: u8, set: u8, reset: u8) -> Result<(), Error<I2C::Error>> {
        self.apply_async(ConfigUpdate::new(register, set, reset)).await
    }

    pub async fn apply_async(&mut self, update: ConfigUpdate) -> Result<(), Error<I2C::Error>> {
        let lock = self.lock;
        let _guard = lock.acquire().await;
        let current = self.read_reg_async(update.register).await?;
        let new = update.apply(current);
        debug!("config {=u8:#x}: {=u8:#x} -> {=u8:#x}", update.register, current, new);
        self.write_reg_async(update.register, new).await
    }

    pub async fn soft_reset_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.apply_async(SOFT_RESET).await
    }

    pub async fn heater_async(&mut self, on: bool) -> Result<(), Error<I2C::Error>> {
        self.apply_async(if on { HEATER_ON } else { HEATER_OFF }).await
    }

    pub async fn set_temperature_resolution_async(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        self.apply_async(resolution.temperature_update()).await
    }

    pub async fn set_humidity_resolution_async(&mut self, resolution: Resolution) -> Result<(), Error<I2C::Error>> {
        self.apply_async(resolution.humidity_update()).await
    }

    pub async fn set_refresh_rate_async(&mut self, rate: RefreshRate) -> Result<(), Error<I2C::Error>> {
        self.apply_async(rate.update()).await
    }

    pub async fn set_mode_async(&mut self, mode: MeasurementMode) -> Result<(), Error<I2C::Error>> {
        self.apply_async(mode.update()).await
    }

    pub async fn trigger_measurement_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.apply_async(TRIGGER_MEASUREMENT).await
    }

    pub async fn manufacturer_id_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_word_async(addr::MANUFACTURER_ID).await
    }

    pub async fn device_id_async(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.read_word_async(addr::DEVICE_ID).await
    }

    pub async fn read_temperature_async(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        let raw = self.read_word_async(addr::TEMP).await?;
        Ok(Temperature { celsius: raw_to_celsius(raw), raw })
    }

    pub async fn read_humidity_async(&mut self) -> Result<Humidity, Error<I2C::Error>> {
        let raw = self.read_word_async(addr::HUMID).await?;
        Ok(Humidity { rh: raw_to_relative_humidity(raw), raw })
    }

    pub async fn read_config_async(&mut self) -> Result<Config, Error<I2C::Error>> {
        let config = self.read_reg_async(addr::CONFIG).await?;
        let meas_config = self.read_reg_async(addr::MEASUREMENT_CONFIG).await?;
        Ok(Config::decode(config, meas_config))
    }
}
