// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;
mod render;
mod snapshot;

use std::path::PathBuf;

use aircraft_list::{AircraftListProcessor, Coordinate, FilterCriteria, SortKey};
use clap::Parser;
use config::AppConfig;
use log::{info, warn};

/// Aircraft list, statistics and altitude chart for a tracking snapshot.
#[derive(Debug, Parser)]
#[command(version, about)]
#[allow(clippy::struct_excessive_bools, reason = "command line flags")]
struct Args {
    /// Snapshot file (.json or .csv); "-" reads JSON from stdin
    #[arg(short, long, required_unless_present = "show_config_path")]
    snapshot: Option<PathBuf>,

    /// Sort order: altitude, speed, recency or callsign
    #[arg(long)]
    sort: Option<SortKey>,

    /// Hide aircraft squawking an emergency
    #[arg(long)]
    hide_emergency: bool,

    /// Hide non-emergency aircraft
    #[arg(long)]
    hide_normal: bool,

    /// Lowest altitude shown, in feet
    #[arg(long)]
    min_alt: Option<i32>,

    /// Highest altitude shown, in feet
    #[arg(long)]
    max_alt: Option<i32>,

    /// Observer latitude for the nearby count
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude for the nearby count
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Maximum rows printed, 0 for all
    #[arg(long)]
    limit: Option<usize>,

    /// Print the processed view as JSON
    #[arg(long)]
    json: bool,

    /// Store the effective list settings as the new defaults
    #[arg(long)]
    save_defaults: bool,

    /// Print the configuration file location and exit
    #[arg(long)]
    show_config_path: bool,
}

impl Args {
    /// Fold command line overrides into the stored configuration.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(sort) = self.sort {
            config.default_sort = sort;
        }
        if self.hide_emergency {
            config.show_emergency = false;
        }
        if self.hide_normal {
            config.show_normal = false;
        }
        if let Some(min) = self.min_alt {
            config.min_altitude = min;
        }
        if let Some(max) = self.max_alt {
            config.max_altitude = max;
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            config.override_gps_latitude = Some(lat);
            config.override_gps_longitude = Some(lon);
        }
        if let Some(limit) = self.limit {
            config.list_limit = limit;
        }
    }
}

fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {e}");
            AppConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    if args.show_config_path {
        println!("{}", AppConfig::get_config_path()?.display());
        return Ok(());
    }

    let mut config = load_config();
    args.apply_to(&mut config);

    if args.save_defaults {
        config.save()?;
        info!(
            "Saved list settings to {}",
            AppConfig::get_config_path()?.display()
        );
    }

    let criteria: FilterCriteria = config.filter_criteria();
    let location: Option<Coordinate> = config.location_override();
    match location {
        Some(c) => info!(
            "Using observer location {:.4}, {:.4}",
            c.latitude, c.longitude
        ),
        None => info!("No observer location configured; nearby count disabled"),
    }

    let aircraft = match args.snapshot.as_deref() {
        Some(path) if path.as_os_str() == "-" => {
            snapshot::from_json_reader(std::io::stdin().lock())?
        }
        Some(path) => snapshot::load(path)?,
        None => Vec::new(),
    };

    let processor = AircraftListProcessor::new()
        .with_criteria(criteria)
        .with_sort_key(config.default_sort);
    let view = processor.process(&aircraft, &location);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!(
            "{}",
            render::render_view(&view, processor.sort_key(), config.list_limit)
        );
    }

    Ok(())
}
