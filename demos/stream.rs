use std::io::{self, Read};

use nmea0183_stream::{StdClock, StreamParser};

fn main() -> io::Result<()> {
    let mut gps = StreamParser::new(StdClock::new());
    let pdop = gps
        .register_custom("GPGSA", 15)
        .map_err(io::Error::other)?;

    let mut buf = [0u8; 256];
    let mut stdin = io::stdin().lock();
    loop {
        let n = stdin.read(&mut buf)?;
        if n == 0 {
            break;
        }

        for &byte in &buf[..n] {
            if !gps.encode(byte) {
                continue;
            }

            if gps.location.is_updated() {
                let age = gps.location.age(gps.clock());
                println!(
                    "position {:.6}, {:.6} ({} ms old)",
                    gps.location.lat(),
                    gps.location.lng(),
                    age
                );
            }
            if gps.time.is_updated() {
                println!(
                    "time {:02}:{:02}:{:02}.{:02}",
                    gps.time.hour(),
                    gps.time.minute(),
                    gps.time.second(),
                    gps.time.centisecond()
                );
            }
            if gps.altitude.is_updated() {
                println!("altitude {:.2} m", gps.altitude.meters());
            }
            if gps.custom(pdop).is_updated() {
                println!("pdop {}", gps.custom_mut(pdop).value());
            }
        }
    }

    println!(
        "{} bytes, {} passed, {} failed, {} with fix",
        gps.chars_processed(),
        gps.passed_checksum(),
        gps.failed_checksum(),
        gps.sentences_with_fix()
    );

    Ok(())
}
