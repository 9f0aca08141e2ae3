//! Setting and sample types for the HDC2010 driver.
//!
//! Every setting has a strict conversion (`FromStr` / `TryFrom`) used when
//! validating user input, and a lossy `*_or_default` conversion that maps any
//! unrecognised value to the device default instead of failing.

use core::str::FromStr;

use crate::registers::{
    addr, ConfigBits, ConfigUpdate, MeasConfigBits, AMM_MASK, ALT_I2C_ADDRESS, DEFAULT_I2C_ADDRESS,
    HRES_MASK, MEAS_CONF_MASK, TRES_MASK,
};

/// Returned by the strict conversions when a value names no known setting.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UnknownSetting;

/// I2C slave addresses selectable via the ADDR pin.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum I2cAddress {
    #[default]
    Addr0x40,
    Addr0x41,
}

impl I2cAddress {
    pub const fn value(self) -> u8 {
        match self {
            I2cAddress::Addr0x40 => DEFAULT_I2C_ADDRESS,
            I2cAddress::Addr0x41 => ALT_I2C_ADDRESS,
        }
    }
}

impl TryFrom<u16> for I2cAddress {
    type Error = UnknownSetting;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x40 => Ok(I2cAddress::Addr0x40),
            0x41 => Ok(I2cAddress::Addr0x41),
            _ => Err(UnknownSetting),
        }
    }
}

/// Temperature or humidity conversion resolution.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Resolution {
    #[default]
    Bits14,
    Bits11,
    Bits9,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Bits14, Resolution::Bits11, Resolution::Bits9];

    /// Bit depth as a number (14, 11 or 9).
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits14 => 14,
            Resolution::Bits11 => 11,
            Resolution::Bits9 => 9,
        }
    }

    /// Unknown bit depths select 14-bit.
    pub fn from_bits_or_default(bits: u8) -> Self {
        Self::try_from(bits).unwrap_or_default()
    }

    /// MEASUREMENT_CONFIG update selecting this temperature resolution.
    pub const fn temperature_update(self) -> ConfigUpdate {
        let (set, reset) = match self {
            Resolution::Bits14 => (0x00, 0xC0),
            Resolution::Bits11 => (0x40, 0x80),
            Resolution::Bits9 => (0x80, 0x40),
        };
        ConfigUpdate::new(addr::MEASUREMENT_CONFIG, set, reset)
    }

    /// MEASUREMENT_CONFIG update selecting this humidity resolution.
    pub const fn humidity_update(self) -> ConfigUpdate {
        let (set, reset) = match self {
            Resolution::Bits14 => (0x00, 0x30),
            Resolution::Bits11 => (0x10, 0x20),
            Resolution::Bits9 => (0x20, 0x10),
        };
        ConfigUpdate::new(addr::MEASUREMENT_CONFIG, set, reset)
    }

    // Two-bit field value; 0b11 is reserved and reads back as 14-bit.
    fn from_field(field: u8) -> Self {
        match field & 0b11 {
            0b01 => Resolution::Bits11,
            0b10 => Resolution::Bits9,
            _ => Resolution::Bits14,
        }
    }
}

impl TryFrom<u8> for Resolution {
    type Error = UnknownSetting;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            14 => Ok(Resolution::Bits14),
            11 => Ok(Resolution::Bits11),
            9 => Ok(Resolution::Bits9),
            _ => Err(UnknownSetting),
        }
    }
}

/// Which quantities a measurement cycle converts.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MeasurementMode {
    #[default]
    TemperatureAndHumidity,
    TemperatureOnly,
}

impl MeasurementMode {
    pub const ALL: [MeasurementMode; 2] = [MeasurementMode::TemperatureAndHumidity, MeasurementMode::TemperatureOnly];

    pub const fn symbol(self) -> &'static str {
        match self {
            MeasurementMode::TemperatureAndHumidity => "temp_humid",
            MeasurementMode::TemperatureOnly => "temp",
        }
    }

    /// Unknown symbols select temperature + humidity.
    pub fn from_symbol_or_default(symbol: &str) -> Self {
        symbol.parse().unwrap_or_default()
    }

    pub const fn update(self) -> ConfigUpdate {
        let (set, reset) = match self {
            MeasurementMode::TemperatureAndHumidity => (0x00, 0x06),
            MeasurementMode::TemperatureOnly => (0x02, 0x04),
        };
        ConfigUpdate::new(addr::MEASUREMENT_CONFIG, set, reset)
    }
}

impl FromStr for MeasurementMode {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.symbol() == s)
            .ok_or(UnknownSetting)
    }
}

/// Auto-measurement rate (CONFIG AMM[2:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RefreshRate {
    /// No autonomous sampling; every sample needs a trigger.
    #[default]
    Manual,
    Every120s,
    Every60s,
    Every10s,
    Every5s,
    Hz1,
    Hz2,
    Hz5,
}

impl RefreshRate {
    pub const ALL: [RefreshRate; 8] = [
        RefreshRate::Manual,
        RefreshRate::Every120s,
        RefreshRate::Every60s,
        RefreshRate::Every10s,
        RefreshRate::Every5s,
        RefreshRate::Hz1,
        RefreshRate::Hz2,
        RefreshRate::Hz5,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            RefreshRate::Manual => "manual",
            RefreshRate::Every120s => "120sec",
            RefreshRate::Every60s => "60sec",
            RefreshRate::Every10s => "10sec",
            RefreshRate::Every5s => "5sec",
            RefreshRate::Hz1 => "1hz",
            RefreshRate::Hz2 => "2hz",
            RefreshRate::Hz5 => "5hz",
        }
    }

    /// Unknown symbols select manual mode.
    pub fn from_symbol_or_default(symbol: &str) -> Self {
        symbol.parse().unwrap_or_default()
    }

    pub const fn is_manual(self) -> bool {
        matches!(self, RefreshRate::Manual)
    }

    pub const fn update(self) -> ConfigUpdate {
        let (set, reset) = match self {
            RefreshRate::Manual => (0x00, 0x70),
            RefreshRate::Hz5 => (0x70, 0x00),
            RefreshRate::Hz2 => (0x60, 0x10),
            RefreshRate::Hz1 => (0x50, 0x20),
            RefreshRate::Every5s => (0x40, 0x30),
            RefreshRate::Every10s => (0x30, 0x40),
            RefreshRate::Every60s => (0x20, 0x50),
            RefreshRate::Every120s => (0x10, 0x60),
        };
        ConfigUpdate::new(addr::CONFIG, set, reset)
    }

    fn from_field(field: u8) -> Self {
        match field & 0b111 {
            0b001 => RefreshRate::Every120s,
            0b010 => RefreshRate::Every60s,
            0b011 => RefreshRate::Every10s,
            0b100 => RefreshRate::Every5s,
            0b101 => RefreshRate::Hz1,
            0b110 => RefreshRate::Hz2,
            0b111 => RefreshRate::Hz5,
            _ => RefreshRate::Manual,
        }
    }
}

impl FromStr for RefreshRate {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rate| rate.symbol() == s)
            .ok_or(UnknownSetting)
    }
}

/// Temperature sample.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Temperature {
    pub celsius: f32,
    pub raw: u16,
}

/// Relative humidity sample.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Humidity {
    pub rh: f32,
    pub raw: u16,
}

/// Settings decoded from CONFIG and MEASUREMENT_CONFIG.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    pub refresh_rate: RefreshRate,
    pub heater: bool,
    pub mode: MeasurementMode,
    pub temperature_resolution: Resolution,
    pub humidity_resolution: Resolution,
}

impl Config {
    pub fn decode(config: u8, meas_config: u8) -> Self {
        let heater = ConfigBits::from_bits_truncate(config).contains(ConfigBits::HEAT_EN);
        let mode = if meas_config & MEAS_CONF_MASK == MeasConfigBits::MEAS_CONF0.bits() {
            MeasurementMode::TemperatureOnly
        } else {
            MeasurementMode::TemperatureAndHumidity
        };
        Self {
            refresh_rate: RefreshRate::from_field((config & AMM_MASK) >> 4),
            heater,
            mode,
            temperature_resolution: Resolution::from_field((meas_config & TRES_MASK) >> 6),
            humidity_resolution: Resolution::from_field((meas_config & HRES_MASK) >> 4),
        }
    }
}
