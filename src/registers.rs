//! Register map and constants for HDC2010.
//! Addresses, identity values and bit positions are taken from the datasheet.

/// Default I2C address (ADDR pin tied to GND).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x40;
/// Alternate I2C address (ADDR pin tied to VDD).
pub const ALT_I2C_ADDRESS: u8 = 0x41;
/// Bus number used when the caller does not pick one.
pub const DEFAULT_I2C_BUS: u32 = 1;

/// Expected content of the manufacturer ID register ("TI").
pub const MANUFACTURER_ID: u16 = 0x5449;
/// Expected content of the device ID register.
pub const DEVICE_ID: u16 = 0x07D0;

/// Register addresses.
pub mod addr {
    /// Temperature data, 16-bit word (LOW at 0x00, HIGH at 0x01).
    pub const TEMP: u8 = 0x00;
    /// Humidity data, 16-bit word (LOW at 0x02, HIGH at 0x03).
    pub const HUMID: u8 = 0x02;
    /// Reset / DRDY / heater / auto-measurement rate.
    pub const CONFIG: u8 = 0x0E;
    /// Resolution, measurement mode and trigger.
    pub const MEASUREMENT_CONFIG: u8 = 0x0F;
    /// Manufacturer ID word.
    pub const MANUFACTURER_ID: u8 = 0xFC;
    /// Device ID word.
    pub const DEVICE_ID: u8 = 0xFE;
}

bitflags::bitflags! {
    /// CONFIG register bits (0x0E).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ConfigBits: u8 {
        /// Bit 7: soft reset, self-clearing.
        const SOFT_RES = 1 << 7;
        /// Bits 6-4: auto measurement mode (refresh rate).
        const AMM2     = 1 << 6;
        const AMM1     = 1 << 5;
        const AMM0     = 1 << 4;
        /// Bit 3: heater enable.
        const HEAT_EN  = 1 << 3;
        /// Bit 2: DRDY/INT pin enable. Never touched by this driver.
        const DRDY_EN  = 1 << 2;
        /// Bit 1: interrupt polarity.
        const INT_POL  = 1 << 1;
        /// Bit 0: interrupt mode (level / comparator).
        const INT_MODE = 1 << 0;
    }

    /// MEASUREMENT_CONFIG register bits (0x0F).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct MeasConfigBits: u8 {
        /// Bits 7-6: temperature resolution.
        const TRES1      = 1 << 7;
        const TRES0      = 1 << 6;
        /// Bits 5-4: humidity resolution.
        const HRES1      = 1 << 5;
        const HRES0      = 1 << 4;
        // Bit 3 reserved.
        /// Bits 2-1: measurement configuration (temp+humidity / temp only).
        const MEAS_CONF1 = 1 << 2;
        const MEAS_CONF0 = 1 << 1;
        /// Bit 0: start measurement, self-clearing.
        const MEAS_TRIG  = 1 << 0;
    }
}

/// Mask covering the refresh-rate field of CONFIG.
pub const AMM_MASK: u8 = ConfigBits::AMM2.bits() | ConfigBits::AMM1.bits() | ConfigBits::AMM0.bits();
/// Mask covering the temperature-resolution field of MEASUREMENT_CONFIG.
pub const TRES_MASK: u8 = MeasConfigBits::TRES1.bits() | MeasConfigBits::TRES0.bits();
/// Mask covering the humidity-resolution field of MEASUREMENT_CONFIG.
pub const HRES_MASK: u8 = MeasConfigBits::HRES1.bits() | MeasConfigBits::HRES0.bits();
/// Mask covering the measurement-mode field of MEASUREMENT_CONFIG.
pub const MEAS_CONF_MASK: u8 = MeasConfigBits::MEAS_CONF1.bits() | MeasConfigBits::MEAS_CONF0.bits();

/// One bit-safe change to a configuration register: clear `reset`, then set `set`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConfigUpdate {
    pub register: u8,
    pub set: u8,
    pub reset: u8,
}

impl ConfigUpdate {
    pub const fn new(register: u8, set: u8, reset: u8) -> Self {
        Self { register, set, reset }
    }

    /// New register value after applying this update to `current`.
    pub const fn apply(&self, current: u8) -> u8 {
        (current & !self.reset) | self.set
    }
}

pub const SOFT_RESET: ConfigUpdate = ConfigUpdate::new(addr::CONFIG, ConfigBits::SOFT_RES.bits(), 0x00);
pub const HEATER_ON: ConfigUpdate = ConfigUpdate::new(addr::CONFIG, ConfigBits::HEAT_EN.bits(), 0x00);
pub const HEATER_OFF: ConfigUpdate = ConfigUpdate::new(addr::CONFIG, 0x00, ConfigBits::HEAT_EN.bits());
pub const TRIGGER_MEASUREMENT: ConfigUpdate =
    ConfigUpdate::new(addr::MEASUREMENT_CONFIG, MeasConfigBits::MEAS_TRIG.bits(), 0x00);

/// Convert a raw TEMP word to degrees Celsius.
pub fn raw_to_celsius(raw: u16) -> f32 {
    raw as f32 * 165.0 / 65536.0 - 40.0
}

/// Convert a raw HUMID word to percent relative humidity.
pub fn raw_to_relative_humidity(raw: u16) -> f32 {
    raw as f32 / 65536.0 * 100.0
}

/// Host word from the two bytes as they came off the bus (low byte first).
pub const fn word_from_bus(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Bytes to put on the bus for a host word (low byte first).
pub const fn word_to_bus(word: u16) -> [u8; 2] {
    word.to_le_bytes()
}
