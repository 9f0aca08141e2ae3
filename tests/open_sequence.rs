use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use hdc2010_rs::data_types::{I2cAddress, MeasurementMode, RefreshRate, Resolution};
use hdc2010_rs::{ConfigLock, Error, Hdc2010, OpenOptions, RawOpenOptions, Transport, ValidationError};

/// Hands out one prepared mock bus and records every open/close.
struct MockTransport {
    bus: Option<I2cMock>,
    opened: Vec<u32>,
    closed: usize,
}

impl MockTransport {
    fn new(expectations: &[I2cTrans]) -> Self {
        Self {
            bus: Some(I2cMock::new(expectations)),
            opened: Vec::new(),
            closed: 0,
        }
    }

    fn unused() -> Self {
        Self { bus: None, opened: Vec::new(), closed: 0 }
    }
}

impl Transport for MockTransport {
    type Bus = I2cMock;

    fn open(&mut self, bus_number: u32) -> Result<I2cMock, ErrorKind> {
        self.opened.push(bus_number);
        self.bus.take().ok_or(ErrorKind::Other)
    }

    fn close(&mut self, mut bus: I2cMock) -> Result<(), ErrorKind> {
        bus.done();
        self.closed += 1;
        Ok(())
    }
}

fn identity(address: u8) -> Vec<I2cTrans> {
    vec![
        I2cTrans::write_read(address, vec![0xFC], vec![0x49, 0x54]),
        I2cTrans::write_read(address, vec![0xFE], vec![0xD0, 0x07]),
    ]
}

fn rmw(address: u8, reg: u8, before: u8, after: u8) -> Vec<I2cTrans> {
    vec![
        I2cTrans::write_read(address, vec![reg], vec![before]),
        I2cTrans::write(address, vec![reg, after]),
    ]
}

#[test]
fn open_with_defaults_resets_only() {
    let mut expectations = identity(0x40);
    expectations.extend(rmw(0x40, 0x0E, 0x00, 0x80));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let sensor = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()).unwrap();
    assert_eq!(transport.opened, vec![1]);
    sensor.close(&mut transport).unwrap();
    assert_eq!(transport.closed, 1);
}

#[test]
fn open_applies_options_in_order() {
    let mut expectations = identity(0x41);
    expectations.extend(rmw(0x41, 0x0E, 0x00, 0x80));
    // mode, temperature resolution, humidity resolution on MEASUREMENT_CONFIG
    expectations.extend(rmw(0x41, 0x0F, 0x00, 0x02));
    expectations.extend(rmw(0x41, 0x0F, 0x02, 0x82));
    expectations.extend(rmw(0x41, 0x0F, 0x82, 0x92));
    // 5 Hz, then one trigger
    expectations.extend(rmw(0x41, 0x0E, 0x00, 0x70));
    expectations.extend(rmw(0x41, 0x0F, 0x92, 0x93));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let options = OpenOptions::new()
        .bus(3)
        .address(I2cAddress::Addr0x41)
        .mode(MeasurementMode::TemperatureOnly)
        .temperature_resolution(Resolution::Bits9)
        .humidity_resolution(Resolution::Bits11)
        .refresh_rate(RefreshRate::Hz5);
    let sensor = Hdc2010::open(&mut transport, &lock, &options).unwrap();
    assert_eq!(transport.opened, vec![3]);
    sensor.close(&mut transport).unwrap();
}

#[test]
fn manual_refresh_does_not_trigger() {
    let mut expectations = identity(0x40);
    expectations.extend(rmw(0x40, 0x0E, 0x00, 0x80));
    expectations.extend(rmw(0x40, 0x0E, 0x50, 0x00));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let raw = RawOpenOptions { refresh_rate: Some("manual"), ..Default::default() };
    let sensor = Hdc2010::open_raw(&mut transport, &lock, &raw).unwrap();
    sensor.close(&mut transport).unwrap();
}

#[test]
fn automatic_refresh_triggers_once() {
    let mut expectations = identity(0x40);
    expectations.extend(rmw(0x40, 0x0E, 0x00, 0x80));
    expectations.extend(rmw(0x40, 0x0E, 0x00, 0x70));
    expectations.extend(rmw(0x40, 0x0F, 0x00, 0x01));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let raw = RawOpenOptions { refresh_rate: Some("5hz"), ..Default::default() };
    let sensor = Hdc2010::open_raw(&mut transport, &lock, &raw).unwrap();
    sensor.close(&mut transport).unwrap();
}

#[test]
fn manufacturer_mismatch_stops_before_reset() {
    let expectations = [I2cTrans::write_read(0x40, vec![0xFC], vec![0x00, 0x00])];
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let Err(err) = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()) else {
        panic!("open succeeded without an HDC2010");
    };
    let (error, bus) = err.into_parts();
    assert!(matches!(error, Error::ManufacturerIdMismatch { found: 0x0000 }));
    assert!(error.is_identity_mismatch());
    // the bus comes back unclosed; closing it is up to the caller
    assert_eq!(transport.closed, 0);
    transport.close(bus.unwrap()).unwrap();
}

#[test]
fn device_mismatch_stops_before_reset() {
    let expectations = [
        I2cTrans::write_read(0x40, vec![0xFC], vec![0x49, 0x54]),
        I2cTrans::write_read(0x40, vec![0xFE], vec![0x10, 0x00]),
    ];
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let Err(err) = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()) else {
        panic!("open succeeded with the wrong device ID");
    };
    assert!(matches!(err.error, Error::DeviceIdMismatch { found: 0x0010 }));
    transport.close(err.bus.unwrap()).unwrap();
}

#[test]
fn invalid_address_never_touches_transport() {
    let mut transport = MockTransport::unused();
    let lock = ConfigLock::<NoopRawMutex>::new();

    let raw = RawOpenOptions { i2c_address: Some(0x42), ..Default::default() };
    let Err(err) = Hdc2010::open_raw(&mut transport, &lock, &raw) else {
        panic!("0x42 accepted");
    };
    assert!(matches!(err.error, Error::InvalidOptions(ValidationError::Address(0x42))));
    assert!(err.bus.is_none());
    assert!(transport.opened.is_empty());
}

#[test]
fn transport_open_failure_is_surfaced() {
    let mut transport = MockTransport::unused();
    let lock = ConfigLock::<NoopRawMutex>::new();

    let Err(err) = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()) else {
        panic!("open succeeded without a bus");
    };
    assert!(matches!(err.error, Error::I2c(ErrorKind::Other)));
    assert!(err.bus.is_none());
    assert_eq!(transport.opened, vec![1]);
}

#[test]
fn reset_failure_hands_bus_back() {
    let mut expectations = identity(0x40);
    expectations.push(I2cTrans::write_read(0x40, vec![0x0E], vec![0x00]).with_error(ErrorKind::Other));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let Err(err) = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()) else {
        panic!("reset failure ignored");
    };
    assert!(matches!(err.error, Error::I2c(ErrorKind::Other)));
    assert!(!lock.is_locked());
    transport.close(err.bus.unwrap()).unwrap();
}

#[test]
fn manual_measure_then_sample() {
    let mut expectations = identity(0x40);
    expectations.extend(rmw(0x40, 0x0E, 0x00, 0x80));
    expectations.extend(rmw(0x40, 0x0F, 0x00, 0x01));
    expectations.push(I2cTrans::write_read(0x40, vec![0x00], vec![0x00, 0x80]));
    expectations.push(I2cTrans::write_read(0x40, vec![0x02], vec![0x00, 0x80]));
    let mut transport = MockTransport::new(&expectations);
    let lock = ConfigLock::<NoopRawMutex>::new();

    let mut sensor = Hdc2010::open(&mut transport, &lock, &OpenOptions::default()).unwrap();
    sensor.measure().unwrap();
    let t = sensor.temperature().unwrap();
    assert!((t.celsius - 42.5).abs() < 1e-4);
    let h = sensor.humidity().unwrap();
    assert_eq!(h.raw, 0x8000);
    assert!((h.rh - 50.0).abs() < 1e-4);
    sensor.close(&mut transport).unwrap();
}

#[test]
fn validation_message_is_readable() {
    let raw = RawOpenOptions { refresh_rate: Some("3hz"), ..Default::default() };
    let err = hdc2010_rs::validate(&raw).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Expected refresh_rate"));
    assert!(message.contains("'10sec'"));
    assert!(message.contains("'2hz'"));

    let raw = RawOpenOptions { i2c_address: Some(0x42), ..Default::default() };
    let message = hdc2010_rs::validate(&raw).unwrap_err().to_string();
    assert_eq!(message, "Expected i2c_address to be 0x40 or 0x41. Got \"0x42\".");

    let raw = RawOpenOptions { i2c_bus_number: Some(1 << 32), ..Default::default() };
    let message = hdc2010_rs::validate(&raw).unwrap_err().to_string();
    assert_eq!(message, "Expected i2c_bus_number to be an integer from 0 to 4294967295. Got \"4294967296\".");
}
