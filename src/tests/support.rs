use crate::{Clock, ManualClock, StreamParser};

pub const RMC: &str =
    "$GPRMC,045103.000,A,3014.1984,N,09749.2872,W,0.67,161.46,030913,,,A*7C\r\n";
pub const RMC_NO_FIX: &str = "$GPRMC,045103.000,V,,,,,,,030913,,,N*46\r\n";
pub const GGA: &str =
    "$GPGGA,001043.00,4404.14036,N,12118.85961,W,1,12,0.98,1113.0,M,-21.3,M,,*59\r\n";
pub const GGA_NO_FIX: &str = "$GPGGA,045105.000,,,,,0,00,99.9,,M,,M,,0000*6A\r\n";
pub const GSA: &str = "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39\r\n";

/// Frames `body` as a sentence with a correct checksum.
pub fn sentence(body: &str) -> String {
    let checksum = body.bytes().fold(0u8, |acc, b| acc ^ b);
    format!("${body}*{checksum:02X}\r\n")
}

/// Feeds `text` and returns the number of completed sentences.
pub fn feed<C: Clock, const N: usize>(parser: &mut StreamParser<C, N>, text: &str) -> usize {
    parser.encode_slice(text.as_bytes())
}

pub fn parser() -> StreamParser<ManualClock> {
    StreamParser::new(ManualClock::new(0))
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn test_sentence_framing() {
    assert_eq!(
        sentence("GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,"),
        "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n"
    );
    assert_eq!(sentence(&RMC[1..RMC.len() - 5]), RMC);
}
