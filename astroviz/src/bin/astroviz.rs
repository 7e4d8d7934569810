use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::warn;

use astroviz_lib::ephemeris::{self, DEFAULT_STEP_SECS};
use tle_protocol::{parse_elements, parse_tle_set};

/// Print a two-body ECI ephemeris over one orbit for every satellite in
/// a TLE set
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Time step between ephemeris samples, in seconds
    #[arg(short = 't', long, default_value_t = DEFAULT_STEP_SECS)]
    step: f64,

    /// TLE set file (name line plus two element lines per satellite).
    ///
    /// Read from stdin when not provided.
    tle_set: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let text = match &opts.tle_set {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let (rest, tle_set) = parse_tle_set(&text).map_err(|e| format!("Malformed TLE set: {e}"))?;
    if !rest.trim().is_empty() {
        warn!(
            bytes = rest.len(),
            "Ignoring trailing content after the last complete TLE entry"
        );
    }
    if tle_set.is_empty() {
        return Err("No TLE entries found".into());
    }

    let mut entries: Vec<_> = tle_set.iter().collect();
    entries.sort();

    for tle in entries {
        let elements = match parse_elements(tle) {
            Ok(o) => o,
            Err(e) => {
                warn!(satellite = %tle.satellite_name, error = %e, "Skipping TLE entry");
                continue;
            }
        };

        println!("# {} (satcat {})", tle.satellite_name, elements.satcat_id);
        match elements.epoch_datetime() {
            Some(epoch) => println!("# epoch {} (JD {:.8})", epoch, elements.epoch_jd),
            None => println!("# epoch JD {:.8}", elements.epoch_jd),
        }

        for sample in ephemeris::generate(&elements, opts.step)? {
            let km = sample.pos_eci / 1000.0;
            println!(
                "{:8.0} s : {:10.1} km  {:10.1} km  {:10.1} km",
                sample.elapsed, km.x, km.y, km.z
            );
        }
    }

    Ok(())
}
