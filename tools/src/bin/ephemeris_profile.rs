// cargo run --bin ephemeris-profile --release -- --satcat-id 25544 --dt 60.0 stations.txt /tmp/iss_orbit.txt

use clap::Parser;
use std::fs::{self, File};
use std::io::prelude::*;
use std::path::PathBuf;

use astro_types::prelude::*;
use astroviz_lib::ephemeris;
use tle_protocol::{parse_elements, parse_tle_set};

/// Write a `t x y z` ephemeris table (seconds and meters, ECI) for one
/// satellite out of a TLE set, for plotting
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Satcat ID
    #[arg(short = 'i', long)]
    satcat_id: SatcatId,

    /// Time step (dt)
    #[arg(short = 't', long)]
    dt: f64,

    /// Duration in seconds, one orbital period when not provided
    #[arg(short = 'd', long)]
    duration: Option<f64>,

    /// TLE set file to read
    tle_set: PathBuf,

    /// Output file path to write
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let text = fs::read_to_string(&opts.tle_set)?;
    let (_, tle_set) = parse_tle_set(&text).map_err(|e| format!("Malformed TLE set: {e}"))?;

    let elements = tle_set
        .iter()
        .filter_map(|tle| parse_elements(tle).ok())
        .find(|o| o.satcat_id == opts.satcat_id)
        .expect("Satellite with provided satcat_id doesn't exist");

    let duration = opts.duration.unwrap_or_else(|| elements.period());
    let samples = ephemeris::generate_for(&elements, opts.dt, duration)?;

    let mut out = File::create(&opts.output)?;
    for s in &samples {
        writeln!(
            out,
            "{} {} {} {}",
            s.elapsed, s.pos_eci.x, s.pos_eci.y, s.pos_eci.z
        )?;
    }

    println!(
        "Wrote {} samples for satcat {} to {}",
        samples.len(),
        opts.satcat_id,
        opts.output.display()
    );

    Ok(())
}
