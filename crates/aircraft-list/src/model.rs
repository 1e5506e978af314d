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

//! Aircraft records as handed over by the tracking store.
//!
//! Everything here is read-only from the point of view of this crate. The
//! tracking store owns the records and decides freshness (`is_stale`) and
//! signal quality; the list processor only reads them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseKeyError;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Length of an ICAO 24-bit address rendered as hex.
const ICAO_HEX_LEN: usize = 6;

/// Great-circle distance between two lat/lon points using the Haversine formula (in meters).
#[must_use]
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// A point on the earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Distance in meters to another coordinate.
    #[must_use]
    pub fn distance_to_m(&self, other: &Coordinate) -> f64 {
        haversine_distance_m(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Coarse confidence rating attached to a track by the ingestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    Excellent,
    Good,
    Fair,
    Poor,
    #[default]
    Unknown,
}

impl SignalQuality {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for SignalQuality {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            "unknown" | "" => Ok(Self::Unknown),
            _ => Err(ParseKeyError::unknown(
                "signal quality",
                s,
                "excellent, good, fair, poor, unknown",
            )),
        }
    }
}

/// Feed an aircraft record was received from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    /// Locally received ADS-B telemetry.
    Adsb,
    /// The OpenSky network.
    OpenSky,
}

impl FeedSource {
    /// Infer the feed from the identifier length.
    ///
    /// Legacy compatibility only: records without an explicit source tag are
    /// classified as ADS-B when the identifier is a 6 character ICAO address
    /// and as OpenSky otherwise.
    #[must_use]
    pub fn from_hex_legacy(hex: &str) -> Self {
        if hex.chars().count() == ICAO_HEX_LEN {
            Self::Adsb
        } else {
            Self::OpenSky
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Adsb => "adsb",
            Self::OpenSky => "opensky",
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for FeedSource {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adsb" | "ads-b" => Ok(Self::Adsb),
            "opensky" => Ok(Self::OpenSky),
            _ => Err(ParseKeyError::unknown("feed source", s, "adsb, opensky")),
        }
    }
}

/// A single tracked aircraft.
///
/// Deserialized records are normalized on load: a blank `display_name` falls
/// back to `hex`, and a negative `seen` (clock skew upstream) loads as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AircraftRecord")]
pub struct Aircraft {
    /// Identifier (ICAO hex address for ADS-B tracks).
    pub hex: String,
    /// Callsign, or the hex identifier when no callsign is known.
    pub display_name: String,
    /// Altitude in feet.
    pub altitude_feet: Option<i32>,
    /// Ground speed in knots.
    pub speed_knots: Option<i32>,
    /// Track angle in degrees (0-360, north = 0).
    pub track: Option<f64>,
    /// Seconds since the last update.
    pub seen: Option<u32>,
    pub is_emergency: bool,
    pub is_stale: bool,
    pub coordinate: Option<Coordinate>,
    pub signal_quality: SignalQuality,
    /// Explicit feed tag. When absent, [`Aircraft::feed_source`] falls back
    /// to [`FeedSource::from_hex_legacy`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<FeedSource>,
}

/// Wire shape of an aircraft record, before normalization.
#[derive(Deserialize)]
struct AircraftRecord {
    hex: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    altitude_feet: Option<i32>,
    #[serde(default)]
    speed_knots: Option<i32>,
    #[serde(default)]
    track: Option<f64>,
    #[serde(default)]
    seen: Option<i64>,
    #[serde(default)]
    is_emergency: bool,
    #[serde(default)]
    is_stale: bool,
    #[serde(default)]
    coordinate: Option<Coordinate>,
    #[serde(default)]
    signal_quality: SignalQuality,
    #[serde(default)]
    source: Option<FeedSource>,
}

impl From<AircraftRecord> for Aircraft {
    fn from(record: AircraftRecord) -> Self {
        let mut aircraft = Aircraft::new(record.hex).with_callsign(&record.display_name);
        aircraft.altitude_feet = record.altitude_feet;
        aircraft.speed_knots = record.speed_knots;
        aircraft.track = record.track;
        aircraft.seen = record.seen.map(Aircraft::clamp_seen);
        aircraft.is_emergency = record.is_emergency;
        aircraft.is_stale = record.is_stale;
        aircraft.coordinate = record.coordinate;
        aircraft.signal_quality = record.signal_quality;
        aircraft.source = record.source;
        aircraft
    }
}

impl Aircraft {
    /// Create a record with only an identifier; the display name falls back to it.
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        let hex = hex.into();
        Self {
            display_name: hex.clone(),
            hex,
            altitude_feet: None,
            speed_knots: None,
            track: None,
            seen: None,
            is_emergency: false,
            is_stale: false,
            coordinate: None,
            signal_quality: SignalQuality::Unknown,
            source: None,
        }
    }

    /// Set the callsign. Blank callsigns keep the hex fallback.
    #[must_use]
    pub fn with_callsign(mut self, callsign: &str) -> Self {
        let callsign = callsign.trim();
        self.display_name = if callsign.is_empty() {
            self.hex.clone()
        } else {
            callsign.to_string()
        };
        self
    }

    #[must_use]
    pub fn with_altitude(mut self, feet: i32) -> Self {
        self.altitude_feet = Some(feet);
        self
    }

    #[must_use]
    pub fn with_speed(mut self, knots: i32) -> Self {
        self.speed_knots = Some(knots);
        self
    }

    #[must_use]
    pub fn with_track(mut self, degrees: f64) -> Self {
        self.track = Some(degrees);
        self
    }

    #[must_use]
    pub fn with_seen(mut self, seconds: u32) -> Self {
        self.seen = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    #[must_use]
    pub fn with_emergency(mut self, is_emergency: bool) -> Self {
        self.is_emergency = is_emergency;
        self
    }

    #[must_use]
    pub fn with_stale(mut self, is_stale: bool) -> Self {
        self.is_stale = is_stale;
        self
    }

    #[must_use]
    pub fn with_signal_quality(mut self, quality: SignalQuality) -> Self {
        self.signal_quality = quality;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: FeedSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Feed this record came from: the explicit tag if present, otherwise
    /// the legacy identifier-length heuristic.
    #[must_use]
    pub fn feed_source(&self) -> FeedSource {
        self.source
            .unwrap_or_else(|| FeedSource::from_hex_legacy(&self.hex))
    }

    /// Distance in meters from a given point to this aircraft.
    #[must_use]
    pub fn distance_to_m(&self, from: &Coordinate) -> Option<f64> {
        self.coordinate.map(|c| from.distance_to_m(&c))
    }

    /// Seconds elapsed between `last_seen` and `now`, clamped at zero.
    #[must_use]
    pub fn seen_from(last_seen: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
        Self::clamp_seen((now - last_seen).num_seconds())
    }

    /// Clamp a signed age in seconds into the `seen` range.
    #[must_use]
    pub fn clamp_seen(seconds: i64) -> u32 {
        u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_haversine_distance() {
        // LAX to JFK is approximately 3,983 km
        let distance = haversine_distance_m(33.9425, -118.4081, 40.6413, -73.7781);
        assert!((distance - 3_983_000.0).abs() < 20_000.0);
    }

    #[test]
    fn test_haversine_same_point() {
        assert!(haversine_distance_m(51.47, -0.4543, 51.47, -0.4543).abs() < f64::EPSILON);
    }

    #[test]
    fn test_feed_source_legacy_heuristic() {
        assert_eq!(FeedSource::from_hex_legacy("A1B2C3"), FeedSource::Adsb);
        assert_eq!(FeedSource::from_hex_legacy("ABCDE12"), FeedSource::OpenSky);
        assert_eq!(FeedSource::from_hex_legacy("ABC"), FeedSource::OpenSky);
    }

    #[test]
    fn test_explicit_source_wins_over_heuristic() {
        let aircraft = Aircraft::new("A1B2C3").with_source(FeedSource::OpenSky);
        assert_eq!(aircraft.feed_source(), FeedSource::OpenSky);

        let untagged = Aircraft::new("A1B2C3");
        assert_eq!(untagged.feed_source(), FeedSource::Adsb);
    }

    #[test]
    fn test_display_name_falls_back_to_hex() {
        assert_eq!(Aircraft::new("A1B2C3").display_name, "A1B2C3");
        assert_eq!(
            Aircraft::new("A1B2C3").with_callsign("  ").display_name,
            "A1B2C3"
        );
        assert_eq!(
            Aircraft::new("A1B2C3").with_callsign("UAL123 ").display_name,
            "UAL123"
        );
    }

    #[test]
    fn test_distance_requires_coordinate() {
        let home = Coordinate::new(33.9425, -118.4081);
        assert!(Aircraft::new("A1B2C3").distance_to_m(&home).is_none());
        let near = Aircraft::new("A1B2C3").with_position(33.9425, -118.4081);
        assert!(near.distance_to_m(&home).unwrap() < 1.0);
    }

    #[test]
    fn test_seen_from_timestamps() {
        let now = Utc::now();
        assert_eq!(Aircraft::seen_from(now - Duration::seconds(42), now), 42);
        // Clock skew never yields a negative age
        assert_eq!(Aircraft::seen_from(now + Duration::seconds(5), now), 0);
    }

    #[test]
    fn test_parse_signal_quality() {
        assert_eq!("Good".parse::<SignalQuality>().unwrap(), SignalQuality::Good);
        assert_eq!("".parse::<SignalQuality>().unwrap(), SignalQuality::Unknown);
        assert!("great".parse::<SignalQuality>().is_err());
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"hex":"A1B2C3","altitude_feet":35000,"signal_quality":"fair"}"#;
        let aircraft: Aircraft = serde_json::from_str(json).unwrap();
        assert_eq!(aircraft.altitude_feet, Some(35000));
        assert_eq!(aircraft.speed_knots, None);
        assert_eq!(aircraft.signal_quality, SignalQuality::Fair);
        assert!(!aircraft.is_emergency);
        assert!(aircraft.source.is_none());
    }

    #[test]
    fn test_deserialize_missing_name_uses_hex() {
        let json = r#"[
            {"hex": "AAAAAA", "display_name": "ZZZ"},
            {"hex": "ZZZZZZ"},
            {"hex": "BBBBBB", "display_name": "  "}
        ]"#;
        let aircraft: Vec<Aircraft> = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = aircraft.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["ZZZ", "ZZZZZZ", "BBBBBB"]);
    }

    #[test]
    fn test_deserialize_negative_seen_clamps_to_zero() {
        let json = r#"[{"hex":"A1B2C3","seen":-3},{"hex":"C0FFEE","seen":12}]"#;
        let aircraft: Vec<Aircraft> = serde_json::from_str(json).unwrap();
        assert_eq!(aircraft[0].seen, Some(0));
        assert_eq!(aircraft[1].seen, Some(12));
        assert_eq!(Aircraft::clamp_seen(i64::MAX), u32::MAX);
    }
}
