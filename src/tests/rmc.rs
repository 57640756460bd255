use crate::{
    FixMode, Location, RawDegrees,
    tests::support::{RMC, RMC_NO_FIX, close, feed, parser, sentence},
};

#[test]
fn test_rmc_with_fix() {
    let mut gps = parser();
    assert_eq!(feed(&mut gps, RMC), 1);

    assert!(gps.location.is_valid());
    assert!(close(gps.location.lat(), 30.236640));
    assert!(close(gps.location.lng(), -97.821453));
    assert_eq!(gps.location.fix_mode(), Some(FixMode::Autonomous));
    assert_eq!(gps.location.fix_quality(), None);

    assert_eq!(gps.date.year(), 2013);
    assert_eq!(gps.date.month(), 9);
    assert_eq!(gps.date.day(), 3);

    assert_eq!(gps.time.hour(), 4);
    assert_eq!(gps.time.minute(), 51);
    assert_eq!(gps.time.second(), 3);
    assert_eq!(gps.time.centisecond(), 0);

    assert!(close(gps.speed.knots(), 0.67));
    assert!(close(gps.course.deg(), 161.46));

    // GGA-only values stay untouched
    assert!(!gps.altitude.is_valid());
    assert!(!gps.satellites.is_valid());
    assert!(!gps.hdop.is_valid());

    assert_eq!(gps.passed_checksum(), 1);
    assert_eq!(gps.failed_checksum(), 0);
    assert_eq!(gps.sentences_with_fix(), 1);
    assert_eq!(gps.chars_processed(), RMC.len() as u32);
}

#[test]
fn test_rmc_raw_coordinates() {
    let mut gps = parser();
    feed(&mut gps, RMC);

    assert_eq!(
        gps.location.value(),
        Location {
            lat: RawDegrees {
                deg: 30,
                billionths: 236_640_000,
                negative: false,
            },
            lng: RawDegrees {
                deg: 97,
                billionths: 821_453_333,
                negative: true,
            },
            quality: None,
            mode: Some(FixMode::Autonomous),
        }
    );
}

#[test]
fn test_rmc_without_fix_commits_date_and_time_only() {
    let mut gps = parser();
    assert_eq!(feed(&mut gps, RMC_NO_FIX), 1);

    assert!(gps.date.is_valid());
    assert!(gps.time.is_valid());
    assert!(!gps.location.is_valid());
    assert!(!gps.speed.is_valid());
    assert!(!gps.course.is_valid());
    assert_eq!(gps.sentences_with_fix(), 0);
    assert_eq!(gps.passed_checksum(), 1);
}

#[test]
fn test_rmc_without_fix_keeps_previous_location() {
    let mut gps = parser();
    feed(&mut gps, RMC);
    let before = gps.location.value();

    feed(&mut gps, RMC_NO_FIX);
    assert!(!gps.location.is_updated());
    assert_eq!(gps.location.value(), before);
    assert!(gps.date.is_updated());
}

#[test]
fn test_multi_constellation_talker() {
    let mut gps = parser();
    let text = sentence("GNRMC,001031.00,A,4404.13993,N,12118.86023,W,0.146,,100117,,,A");
    assert_eq!(feed(&mut gps, &text), 1);

    assert!(gps.location.is_updated());
    assert_eq!(gps.date.year(), 2017);
    assert_eq!(gps.date.month(), 1);
    assert_eq!(gps.date.day(), 10);
    assert!(close(gps.speed.knots(), 0.14));
}

#[test]
fn test_terminator_returns_true() {
    let mut gps = parser();
    let bytes = RMC.as_bytes();
    let (last, head) = bytes.split_last().unwrap();
    let (cr, head) = head.split_last().unwrap();

    assert!(head.iter().all(|&b| !gps.encode(b)));
    assert!(gps.encode(*cr));
    assert!(!gps.encode(*last));
}
