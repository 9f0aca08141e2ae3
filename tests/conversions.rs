use hdc2010_rs::registers::{raw_to_celsius, raw_to_relative_humidity, word_from_bus, word_to_bus};

#[test]
fn celsius_matches_formula_over_full_range() {
    for raw in 0..=u16::MAX {
        assert_eq!(raw_to_celsius(raw), raw as f32 * 165.0 / 65536.0 - 40.0);
    }
}

#[test]
fn humidity_matches_formula_over_full_range() {
    for raw in 0..=u16::MAX {
        assert_eq!(raw_to_relative_humidity(raw), raw as f32 / 65536.0 * 100.0);
    }
}

#[test]
fn conversions_are_monotonic() {
    for raw in 1..=u16::MAX {
        assert!(raw_to_celsius(raw) >= raw_to_celsius(raw - 1));
        assert!(raw_to_relative_humidity(raw) >= raw_to_relative_humidity(raw - 1));
    }
}

#[test]
fn conversion_edges() {
    assert_eq!(raw_to_celsius(0), -40.0);
    assert!((raw_to_celsius(u16::MAX) - 124.997).abs() < 1e-3);
    assert_eq!(raw_to_relative_humidity(0), 0.0);
    assert!((raw_to_relative_humidity(u16::MAX) - 99.998).abs() < 1e-3);
}

#[test]
fn words_travel_low_byte_first() {
    assert_eq!(word_from_bus([0x00, 0x80]), 0x8000);
    assert_eq!(word_from_bus([0x49, 0x54]), 0x5449);
    assert_eq!(word_to_bus(0x07D0), [0xD0, 0x07]);
    // 0x8000 is half scale: 165 / 2 - 40
    assert!((raw_to_celsius(word_from_bus([0x00, 0x80])) - 42.5).abs() < 1e-4);
}
