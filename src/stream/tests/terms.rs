use crate::{
    FixMode,
    tests::support::{GGA, close, feed, parser, sentence},
};

const LONG_LATITUDE: &str =
    "$GPRMC,045200.000,A,3014.19840000000000,N,09749.2872,W,1.50,90.00,030913,,,D*41\r\n";

#[test]
fn test_long_term_is_truncated() {
    let mut gps = parser();
    let text = sentence("GPRMC,045200.000,A,3014.19840000000000,N,09749.2872,W,1.50,90.00,030913,,,D");
    assert_eq!(text, LONG_LATITUDE);

    assert_eq!(feed(&mut gps, LONG_LATITUDE), 1);
    assert_eq!(gps.terms_truncated(), 1);
    assert!(close(gps.location.lat(), 30.23664));
    assert!(close(gps.speed.knots(), 1.5));
    assert!(close(gps.course.deg(), 90.0));
    assert_eq!(gps.location.fix_mode(), Some(FixMode::Differential));
    assert_eq!(gps.time.minute(), 52);
}

#[test]
fn test_extra_fractional_digits_are_dropped() {
    let mut gps = parser();
    feed(&mut gps, GGA);
    // "0.98" and "1113.0" both fit in hundredths
    assert_eq!(gps.hdop.value().0, 98);
    assert_eq!(gps.altitude.value().0, 111_300);

    let text = sentence("GPGGA,001044.123,4404.14036,N,12118.85961,W,1,12,0.987,1113.049,M,-21.3,M,,");
    feed(&mut gps, &text);
    assert_eq!(gps.time.centisecond(), 12);
    assert_eq!(gps.hdop.value().0, 98);
    assert_eq!(gps.altitude.value().0, 111_304);
}

#[test]
fn test_empty_terms_leave_staged_values() {
    let mut gps = parser();
    feed(&mut gps, GGA);
    gps.altitude.value();

    // empty altitude with a fix: the previous staged altitude is committed again
    let text = sentence("GPGGA,001045.00,4404.14036,N,12118.85961,W,1,12,0.98,,M,-21.3,M,,");
    assert_eq!(feed(&mut gps, &text), 1);
    assert!(gps.altitude.is_updated());
    assert!(close(gps.altitude.meters(), 1113.0));
}

#[test]
fn test_hemisphere_resets_per_sentence() {
    let mut gps = parser();
    feed(
        &mut gps,
        &sentence("GPGGA,123519,4807.038,S,01131.000,W,2,08,0.9,-15.2,M,46.9,M,,"),
    );
    assert!(gps.location.lat() < 0.0);

    feed(
        &mut gps,
        &sentence("GPGGA,123520,4807.038,N,01131.000,E,2,08,0.9,-15.2,M,46.9,M,,"),
    );
    assert!(close(gps.location.lat(), 48.1173));
    assert!(close(gps.location.lng(), 11.516666667));
}

#[test]
fn test_invalid_utf8_in_term() {
    let mut gps = parser();
    let mut bytes = b"$GPTXT,01,01,02,OK\xFFX".to_vec();
    let checksum = bytes[1..].iter().fold(0u8, |acc, b| acc ^ b);
    bytes.extend_from_slice(format!("*{checksum:02X}\r\n").as_bytes());

    let id = gps.register_custom("GPTXT", 4).unwrap();
    assert_eq!(gps.encode_slice(&bytes), 1);
    assert_eq!(gps.custom_mut(id).value(), "OK");
}

#[test]
fn test_many_terms_do_not_overflow_index() {
    let mut gps = parser();
    let body = format!("GPXXX{}", ",1".repeat(300));

    assert_eq!(feed(&mut gps, &sentence(&body)), 1);
    assert_eq!(feed(&mut gps, GGA), 1);
    assert_eq!(gps.satellites.value(), 12);
}
