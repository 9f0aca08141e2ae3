//! Open options and their validation.

use core::fmt;

use crate::data_types::{I2cAddress, MeasurementMode, RefreshRate, Resolution};
use crate::registers::DEFAULT_I2C_BUS;

/// Untyped open options as a host or config layer hands them over.
/// `None` means "keep the device default".
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RawOpenOptions<'a> {
    pub i2c_bus_number: Option<i64>,
    pub i2c_address: Option<u16>,
    pub refresh_rate: Option<&'a str>,
    pub temp_resolution: Option<u8>,
    pub humid_resolution: Option<u8>,
    pub mode: Option<&'a str>,
}

/// Validated open options.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OpenOptions {
    pub i2c_bus_number: u32,
    pub i2c_address: I2cAddress,
    pub mode: Option<MeasurementMode>,
    pub temp_resolution: Option<Resolution>,
    pub humid_resolution: Option<Resolution>,
    pub refresh_rate: Option<RefreshRate>,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            i2c_bus_number: DEFAULT_I2C_BUS,
            i2c_address: I2cAddress::default(),
            mode: None,
            temp_resolution: None,
            humid_resolution: None,
            refresh_rate: None,
        }
    }
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(mut self, bus_number: u32) -> Self {
        self.i2c_bus_number = bus_number;
        self
    }

    pub fn address(mut self, address: I2cAddress) -> Self {
        self.i2c_address = address;
        self
    }

    pub fn mode(mut self, mode: MeasurementMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn temperature_resolution(mut self, resolution: Resolution) -> Self {
        self.temp_resolution = Some(resolution);
        self
    }

    pub fn humidity_resolution(mut self, resolution: Resolution) -> Self {
        self.humid_resolution = Some(resolution);
        self
    }

    pub fn refresh_rate(mut self, rate: RefreshRate) -> Self {
        self.refresh_rate = Some(rate);
        self
    }
}

/// Rejected open option. `Display` gives the message meant for the user.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationError {
    BusNumber(i64),
    Address(u16),
    RefreshRate,
    TempResolution(u8),
    HumidResolution(u8),
    Mode,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BusNumber(n) => {
                write!(f, "Expected i2c_bus_number to be an integer from 0 to {}. Got \"{}\".", u32::MAX, n)
            }
            ValidationError::Address(a) => {
                write!(f, "Expected i2c_address to be 0x40 or 0x41. Got \"{:#04x}\".", a)
            }
            ValidationError::RefreshRate => {
                f.write_str("Expected refresh_rate to be one of the following strings: ")?;
                write_list(f, RefreshRate::ALL.iter().map(|r| r.symbol()))
            }
            ValidationError::TempResolution(bits) => {
                write!(f, "Expected temp_resolution to be one of 14, 11, 9. Got \"{}\".", bits)
            }
            ValidationError::HumidResolution(bits) => {
                write!(f, "Expected humid_resolution to be one of 14, 11, 9. Got \"{}\".", bits)
            }
            ValidationError::Mode => {
                f.write_str("Expected mode to be one of the following strings: ")?;
                write_list(f, MeasurementMode::ALL.iter().map(|m| m.symbol()))
            }
        }
    }
}

fn write_list<'s>(f: &mut fmt::Formatter<'_>, items: impl Iterator<Item = &'s str>) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "'{}'", item)?;
    }
    f.write_str(".")
}

/// Check raw options and turn them into [`OpenOptions`]. Pure; touches no hardware.
pub fn validate(raw: &RawOpenOptions<'_>) -> Result<OpenOptions, ValidationError> {
    let mut options = OpenOptions::default();

    if let Some(bus) = raw.i2c_bus_number {
        options.i2c_bus_number = u32::try_from(bus).map_err(|_| ValidationError::BusNumber(bus))?;
    }
    if let Some(address) = raw.i2c_address {
        options.i2c_address = I2cAddress::try_from(address).map_err(|_| ValidationError::Address(address))?;
    }
    if let Some(rate) = raw.refresh_rate {
        options.refresh_rate = Some(rate.parse().map_err(|_| ValidationError::RefreshRate)?);
    }
    if let Some(bits) = raw.temp_resolution {
        options.temp_resolution = Some(Resolution::try_from(bits).map_err(|_| ValidationError::TempResolution(bits))?);
    }
    if let Some(bits) = raw.humid_resolution {
        options.humid_resolution = Some(Resolution::try_from(bits).map_err(|_| ValidationError::HumidResolution(bits))?);
    }
    if let Some(mode) = raw.mode {
        options.mode = Some(mode.parse().map_err(|_| ValidationError::Mode)?);
    }

    Ok(options)
}
