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

//! Aircraft snapshot loading.
//!
//! A snapshot is what the tracking store hands over: either a JSON array of
//! aircraft records or a CSV export with one aircraft per row.
//!
//! CSV columns: `hex,display_name,altitude_feet,speed_knots,track,seen,
//! is_emergency,is_stale,latitude,longitude,signal_quality,source`.
//! Empty cells are treated as missing values.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use aircraft_list::{Aircraft, Coordinate, FeedSource, ParseKeyError, SignalQuality};
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid CSV snapshot: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid value in CSV row {row}: {source}")]
    InvalidValue { row: usize, source: ParseKeyError },

    #[error("unsupported snapshot format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// Flat CSV row; coordinates are split into two columns.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    hex: String,
    #[serde(default)]
    display_name: String,
    altitude_feet: Option<i32>,
    speed_knots: Option<i32>,
    track: Option<f64>,
    seen: Option<i64>,
    is_emergency: Option<bool>,
    is_stale: Option<bool>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    signal_quality: String,
    #[serde(default)]
    source: String,
}

impl CsvRecord {
    fn into_aircraft(self, row: usize) -> Result<Aircraft, SnapshotError> {
        let signal_quality = self
            .signal_quality
            .parse::<SignalQuality>()
            .map_err(|source| SnapshotError::InvalidValue { row, source })?;

        let source = if self.source.trim().is_empty() {
            None
        } else {
            Some(
                self.source
                    .parse::<FeedSource>()
                    .map_err(|source| SnapshotError::InvalidValue { row, source })?,
            )
        };

        let coordinate = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };

        let mut aircraft = Aircraft::new(self.hex)
            .with_callsign(&self.display_name)
            .with_emergency(self.is_emergency.unwrap_or(false))
            .with_stale(self.is_stale.unwrap_or(false))
            .with_signal_quality(signal_quality);
        aircraft.altitude_feet = self.altitude_feet;
        aircraft.speed_knots = self.speed_knots;
        aircraft.track = self.track;
        aircraft.seen = self.seen.map(Aircraft::clamp_seen);
        aircraft.coordinate = coordinate;
        aircraft.source = source;
        Ok(aircraft)
    }
}

/// Parse a JSON array of aircraft records.
pub fn from_json_reader<R: Read>(reader: R) -> Result<Vec<Aircraft>, SnapshotError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parse a CSV export with a header row.
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<Aircraft>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut aircraft = Vec::new();
    for (index, record) in csv_reader.deserialize::<CsvRecord>().enumerate() {
        // Header is line 1
        aircraft.push(record?.into_aircraft(index + 2)?);
    }

    Ok(aircraft)
}

/// Load a snapshot file, choosing the format by extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Aircraft>, SnapshotError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let reader = BufReader::new(File::open(path)?);
    let aircraft = match extension.as_str() {
        "json" => from_json_reader(reader)?,
        "csv" => from_csv_reader(reader)?,
        other => return Err(SnapshotError::UnsupportedFormat(other.to_string())),
    };

    if aircraft.is_empty() {
        warn!("Snapshot {} contains no aircraft", path.display());
    } else {
        info!("Loaded {} aircraft from {}", aircraft.len(), path.display());
    }

    Ok(aircraft)
}
