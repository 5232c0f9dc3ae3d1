use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use deliveries::{
    geocode::{self, GoogleMaps, Throttle, DEFAULT_INTERVAL},
    kml, sheet,
    utils::default_output_path,
};

/// Reads addresses from a spreadsheet, geocodes each address, and puts all the
/// addresses into a KML file for viewing in Google Earth.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the spreadsheet (.xlsx, .xls or .ods)
    excel_file: PathBuf,
    /// Name of the sheet to use
    sheet_name: String,
    /// Max number of rows to use, header row included
    n_rows_max: usize,
    /// Google Maps API key
    #[arg(env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    gm_key: String,
    /// Output KML file, defaults to the spreadsheet path with a .kml extension
    #[arg(long)]
    kml_file: Option<PathBuf>,
    /// Minimum time between geocoding requests, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    interval_ms: u64,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let output = cli
        .kml_file
        .unwrap_or_else(|| default_output_path(&cli.excel_file));

    let mut contacts = sheet::load(&cli.excel_file, &cli.sheet_name, cli.n_rows_max)?;

    let geocoder = GoogleMaps::new(cli.gm_key);
    let mut throttle = Throttle::new(Duration::from_millis(cli.interval_ms));
    geocode::resolve(&mut contacts, &geocoder, &mut throttle)?;

    let written = kml::write(&contacts, &output)?;
    if written.skipped > 0 {
        log::warn!(
            "Left {} deliveries off the map for lack of a valid location",
            written.skipped
        );
    }
    log::info!(
        "Wrote {} placemarks to {}",
        written.placemarks,
        output.display()
    );

    Ok(())
}
