//! Device façade: opens and identifies the sensor, then serves samples.

use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::i2c::ErrorType;

use crate::data_types::{Config, Humidity, I2cAddress, Temperature};
use crate::driver::Hdc2010Driver;
use crate::error::Error;
use crate::lock::ConfigLock;
use crate::options::{validate, OpenOptions, RawOpenOptions};
use crate::registers::{DEVICE_ID, MANUFACTURER_ID};

/// Source of bus handles, e.g. `/dev/i2c-N` on Linux or a board's I2C peripheral.
pub trait Transport {
    type Bus: ErrorType;

    /// Open bus `bus_number` for exclusive use.
    fn open(&mut self, bus_number: u32) -> Result<Self::Bus, <Self::Bus as ErrorType>::Error>;

    /// Close a bus handed out by [`open`](Self::open). Dropping is enough for most buses.
    fn close(&mut self, bus: Self::Bus) -> Result<(), <Self::Bus as ErrorType>::Error> {
        drop(bus);
        Ok(())
    }
}

/// Failed [`Hdc2010::open`]. Holds the bus when it was already acquired so
/// the caller can close it.
pub struct OpenError<Bus, E> {
    pub error: Error<E>,
    pub bus: Option<Bus>,
}

impl<Bus, E> OpenError<Bus, E> {
    fn before_bus(error: Error<E>) -> Self {
        Self { error, bus: None }
    }

    pub fn into_parts(self) -> (Error<E>, Option<Bus>) {
        (self.error, self.bus)
    }
}

impl<Bus, E: fmt::Debug> fmt::Debug for OpenError<Bus, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenError")
            .field("error", &self.error)
            .field("bus_acquired", &self.bus.is_some())
            .finish()
    }
}

impl<Bus, E: fmt::Debug> fmt::Display for OpenError<Bus, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HDC2010 initialization failed: {}", self.error)
    }
}

/// HDC2010 temperature/humidity sensor.
pub struct Hdc2010<'a, I2C, M: RawMutex> {
    driver: Hdc2010Driver<'a, I2C, M>,
}

impl<'a, I2C, M: RawMutex> Hdc2010<'a, I2C, M> {
    /// Wrap an already opened bus. Call [`init`](Self::init) before sampling.
    pub fn new(i2c: I2C, address: I2cAddress, lock: &'a ConfigLock<M>) -> Self {
        Self {
            driver: Hdc2010Driver::with_address(i2c, address.value(), lock),
        }
    }

    /// Register-level access.
    pub fn driver(&mut self) -> &mut Hdc2010Driver<'a, I2C, M> {
        &mut self.driver
    }

    /// Give the bus handle back without closing it.
    pub fn release(self) -> I2C {
        self.driver.release()
    }
}

impl<I2C, M> Hdc2010<'_, I2C, M>
where
    I2C: ErrorType,
    M: RawMutex,
{
    /// Hand the bus back to `transport` for closing.
    pub fn close<T>(self, transport: &mut T) -> Result<(), Error<I2C::Error>>
    where
        T: Transport<Bus = I2C>,
    {
        transport.close(self.release()).map_err(Error::I2c)
    }
}

impl<'a, I2C, M> Hdc2010<'a, I2C, M>
where
    I2C: embedded_hal::i2c::I2c,
    M: RawMutex,
{
    /// Acquire a bus from `transport`, check the part and apply `options`.
    pub fn open<T>(
        transport: &mut T,
        lock: &'a ConfigLock<M>,
        options: &OpenOptions,
    ) -> Result<Self, OpenError<I2C, I2C::Error>>
    where
        T: Transport<Bus = I2C>,
    {
        debug!("opening bus {=u32} address {=u8:#x}", options.i2c_bus_number, options.i2c_address.value());
        let bus = transport
            .open(options.i2c_bus_number)
            .map_err(|e| OpenError::before_bus(Error::I2c(e)))?;
        let mut sensor = Self::new(bus, options.i2c_address, lock);
        match sensor.init(options) {
            Ok(()) => Ok(sensor),
            Err(error) => Err(OpenError {
                error,
                bus: Some(sensor.release()),
            }),
        }
    }

    /// Validate untyped options, then [`open`](Self::open). Invalid options
    /// never reach the transport.
    pub fn open_raw<T>(
        transport: &mut T,
        lock: &'a ConfigLock<M>,
        raw: &RawOpenOptions<'_>,
    ) -> Result<Self, OpenError<I2C, I2C::Error>>
    where
        T: Transport<Bus = I2C>,
    {
        let options = validate(raw).map_err(|e| OpenError::before_bus(e.into()))?;
        Self::open(transport, lock, &options)
    }

    /// Identity check, soft reset, then the requested settings in a fixed
    /// order: mode, temperature resolution, humidity resolution, refresh rate.
    /// Any automatic refresh rate is followed by one trigger so a first sample
    /// is available right away.
    pub fn init(&mut self, options: &OpenOptions) -> Result<(), Error<I2C::Error>> {
        let manufacturer = self.driver.manufacturer_id()?;
        check_manufacturer(manufacturer)?;
        let device = self.driver.device_id()?;
        check_device(device)?;

        self.driver.soft_reset()?;
        if let Some(mode) = options.mode {
            self.driver.set_mode(mode)?;
        }
        if let Some(resolution) = options.temp_resolution {
            self.driver.set_temperature_resolution(resolution)?;
        }
        if let Some(resolution) = options.humid_resolution {
            self.driver.set_humidity_resolution(resolution)?;
        }
        if let Some(rate) = options.refresh_rate {
            self.driver.set_refresh_rate(rate)?;
            if !rate.is_manual() {
                self.driver.trigger_measurement()?;
            }
        }
        debug!("HDC2010 ready");
        Ok(())
    }

    pub fn temperature(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.driver.read_temperature()
    }

    pub fn humidity(&mut self) -> Result<Humidity, Error<I2C::Error>> {
        self.driver.read_humidity()
    }

    /// Trigger a conversion; required before each read in manual refresh mode.
    pub fn measure(&mut self) -> Result<(), Error<I2C::Error>> {
        self.driver.trigger_measurement()
    }

    pub fn heater(&mut self, on: bool) -> Result<(), Error<I2C::Error>> {
        self.driver.heater(on)
    }

    pub fn config(&mut self) -> Result<Config, Error<I2C::Error>> {
        self.driver.read_config()
    }
}

#[cfg(feature = "async")]
impl<'a, I2C, M> Hdc2010<'a, I2C, M>
where
    I2C: embedded_hal_async::i2c::I2c,
    M: RawMutex,
{
    /// Async version of [`open`](Self::open).
    pub async fn open_async<T>(
        transport: &mut T,
        lock: &'a ConfigLock<M>,
        options: &OpenOptions,
    ) -> Result<Self, OpenError<I2C, I2C::Error>>
    where
        T: Transport<Bus = I2C>,
    {
        debug!("opening bus {=u32} address {=u8:#x}", options.i2c_bus_number, options.i2c_address.value());
        let bus = transport
            .open(options.i2c_bus_number)
            .map_err(|e| OpenError::before_bus(Error::I2c(e)))?;
        let mut sensor = Self::new(bus, options.i2c_address, lock);
        match sensor.init_async(options).await {
            Ok(()) => Ok(sensor),
            Err(error) => Err(OpenError {
                error,
                bus: Some(sensor.release()),
            }),
        }
    }

    pub async fn open_raw_async<T>(
        transport: &mut T,
        lock: &'a ConfigLock<M>,
        raw: &RawOpenOptions<'_>,
    ) -> Result<Self, OpenError<I2C, I2C::Error>>
    where
        T: Transport<Bus = I2C>,
    {
        let options = validate(raw).map_err(|e| OpenError::before_bus(e.into()))?;
        Self::open_async(transport, lock, &options).await
    }

    pub async fn init_async(&mut self, options: &OpenOptions) -> Result<(), Error<I2C::Error>> {
        let manufacturer = self.driver.manufacturer_id_async().await?;
        check_manufacturer(manufacturer)?;
        let device = self.driver.device_id_async().await?;
        check_device(device)?;

        self.driver.soft_reset_async().await?;
        if let Some(mode) = options.mode {
            self.driver.set_mode_async(mode).await?;
        }
        if let Some(resolution) = options.temp_resolution {
            self.driver.set_temperature_resolution_async(resolution).await?;
        }
        if let Some(resolution) = options.humid_resolution {
            self.driver.set_humidity_resolution_async(resolution).await?;
        }
        if let Some(rate) = options.refresh_rate {
            self.driver.set_refresh_rate_async(rate).await?;
            if !rate.is_manual() {
                self.driver.trigger_measurement_async().await?;
            }
        }
        debug!("HDC2010 ready");
        Ok(())
    }

    pub async fn temperature_async(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.driver.read_temperature_async().await
    }

    pub async fn humidity_async(&mut self) -> Result<Humidity, Error<I2C::Error>> {
        self.driver.read_humidity_async().await
    }

    pub async fn measure_async(&mut self) -> Result<(), Error<I2C::Error>> {
        self.driver.trigger_measurement_async().await
    }

    pub async fn heater_async(&mut self, on: bool) -> Result<(), Error<I2C::Error>> {
        self.driver.heater_async(on).await
    }

    pub async fn config_async(&mut self) -> Result<Config, Error<I2C::Error>> {
        self.driver.read_config_async().await
    }
}

fn check_manufacturer<E>(found: u16) -> Result<(), Error<E>> {
    if found != MANUFACTURER_ID {
        warn!("manufacturer ID {=u16:#x}, HDC2010 not found", found);
        return Err(Error::ManufacturerIdMismatch { found });
    }
    Ok(())
}

fn check_device<E>(found: u16) -> Result<(), Error<E>> {
    if found != DEVICE_ID {
        warn!("device ID {=u16:#x}, HDC2010 not found", found);
        return Err(Error::DeviceIdMismatch { found });
    }
    Ok(())
}
