//! Error definitions for HDC2010 driver.

use crate::options::ValidationError;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// Open options were rejected before any bus access.
    InvalidOptions(ValidationError),
    /// Manufacturer ID register did not read 0x5449.
    ManufacturerIdMismatch { found: u16 },
    /// Device ID register did not read 0x07D0.
    DeviceIdMismatch { found: u16 },
    /// A blocking configuration update found an async update in flight.
    ConfigBusy,
}

impl<I2cError> Error<I2cError> {
    /// True when the part at the address is absent or not an HDC2010.
    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, Error::ManufacturerIdMismatch { .. } | Error::DeviceIdMismatch { .. })
    }
}

impl<I2cError> From<ValidationError> for Error<I2cError> {
    fn from(err: ValidationError) -> Self {
        Error::InvalidOptions(err)
    }
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::InvalidOptions(e) => write!(f, "invalid open options: {}", e),
            Error::ManufacturerIdMismatch { found } => write!(
                f,
                "expected manufacturer ID {:#06x}, got {:#06x}; HDC2010 sensor not found",
                crate::registers::MANUFACTURER_ID,
                found
            ),
            Error::DeviceIdMismatch { found } => write!(
                f,
                "expected device ID {:#06x}, got {:#06x}; HDC2010 sensor not found",
                crate::registers::DEVICE_ID,
                found
            ),
            Error::ConfigBusy => write!(f, "configuration register update already in progress"),
        }
    }
}
