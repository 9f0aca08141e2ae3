//! HDC2010 Rust Driver
//!
//! Register-level driver for the TI HDC2010 temperature/humidity sensor over I2C.
//! no-std, optional async (`async` feature) and defmt support (`defmt` feature).
//!
//! Two layers:
//! - [`Hdc2010Driver`]: raw register access, the bit-safe configuration update and
//!   the device command set.
//! - [`Hdc2010`]: the open/identify/configure sequence and the sampling operations.
//!
//! ```
//! # use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
//! # use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use hdc2010_rs::{ConfigLock, Hdc2010, I2cAddress};
//! # let expectations = [I2cTrans::write_read(0x40, vec![0x00], vec![0x00, 0x80])];
//! # let i2c = I2cMock::new(&expectations);
//! let lock = ConfigLock::<NoopRawMutex>::new();
//! let mut sensor = Hdc2010::new(i2c, I2cAddress::Addr0x40, &lock);
//! let t = sensor.temperature().unwrap();
//! assert!((t.celsius - 42.5).abs() < 1e-3);
//! # sensor.release().done();
//! ```

#![no_std]

#[macro_use]
mod fmt;

pub mod data_types;
pub mod device;
pub mod driver;
pub mod error;
pub mod lock;
pub mod options;
pub mod registers;

pub use data_types::{Config, Humidity, I2cAddress, MeasurementMode, RefreshRate, Resolution, Temperature};
pub use device::{Hdc2010, OpenError, Transport};
pub use driver::Hdc2010Driver;
pub use error::Error;
pub use lock::ConfigLock;
pub use options::{validate, OpenOptions, RawOpenOptions, ValidationError};
pub use registers::{ALT_I2C_ADDRESS, DEFAULT_I2C_ADDRESS};
