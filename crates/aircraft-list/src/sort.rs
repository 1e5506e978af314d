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

//! List ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseKeyError;
use crate::model::Aircraft;

/// Recency used for aircraft that never reported `seen`; sorts them as oldest.
pub const UNKNOWN_SEEN_SECONDS: u32 = 999;

/// Column the aircraft list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Highest first.
    #[default]
    Altitude,
    /// Fastest first.
    Speed,
    /// Most recently seen first.
    Recency,
    /// Display name, ascending and case-sensitive.
    Callsign,
}

impl SortKey {
    /// Cycle to the next key, for a single "change sort" control.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Altitude => Self::Speed,
            Self::Speed => Self::Recency,
            Self::Recency => Self::Callsign,
            Self::Callsign => Self::Altitude,
        }
    }

    /// Short column label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Altitude => "ALT",
            Self::Speed => "SPD",
            Self::Recency => "SEEN",
            Self::Callsign => "CALL",
        }
    }

    /// Compare two aircraft under this key.
    #[must_use]
    pub fn compare(self, a: &Aircraft, b: &Aircraft) -> Ordering {
        match self {
            Self::Altitude => b.altitude_feet.unwrap_or(0).cmp(&a.altitude_feet.unwrap_or(0)),
            Self::Speed => b.speed_knots.unwrap_or(0).cmp(&a.speed_knots.unwrap_or(0)),
            Self::Recency => a
                .seen
                .unwrap_or(UNKNOWN_SEEN_SECONDS)
                .cmp(&b.seen.unwrap_or(UNKNOWN_SEEN_SECONDS)),
            Self::Callsign => a.display_name.cmp(&b.display_name),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Altitude => "altitude",
            Self::Speed => "speed",
            Self::Recency => "recency",
            Self::Callsign => "callsign",
        };
        f.pad(name)
    }
}

impl FromStr for SortKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "altitude" | "alt" => Ok(Self::Altitude),
            "speed" | "spd" => Ok(Self::Speed),
            "recency" | "seen" => Ok(Self::Recency),
            "callsign" | "call" | "name" => Ok(Self::Callsign),
            _ => Err(ParseKeyError::unknown(
                "sort key",
                s,
                "altitude, speed, recency, callsign",
            )),
        }
    }
}

/// Order aircraft by `key`. The sort is stable: ties keep their input order.
#[must_use]
pub fn sort(mut aircraft: Vec<&Aircraft>, key: SortKey) -> Vec<&Aircraft> {
    aircraft.sort_by(|a, b| key.compare(a, b));
    aircraft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(sorted: &[&Aircraft]) -> Vec<String> {
        sorted.iter().map(|a| a.hex.clone()).collect()
    }

    fn sample() -> Vec<Aircraft> {
        vec![
            Aircraft::new("A1B2C3")
                .with_callsign("UAL123")
                .with_altitude(5000)
                .with_speed(250)
                .with_seen(4),
            Aircraft::new("ABCDEFG").with_callsign("DLH400").with_altitude(25000).with_speed(480),
            Aircraft::new("C0FFEE").with_callsign("aal9").with_speed(120).with_seen(1),
            Aircraft::new("D00D00").with_callsign("BAW1").with_altitude(5000).with_seen(30),
        ]
    }

    #[test]
    fn test_sort_altitude_descending() {
        let aircraft = sample();
        let sorted = sort(aircraft.iter().collect(), SortKey::Altitude);
        // Equal altitudes keep input order; missing altitude sinks as 0
        assert_eq!(hexes(&sorted), vec!["ABCDEFG", "A1B2C3", "D00D00", "C0FFEE"]);
    }

    #[test]
    fn test_sort_speed_descending() {
        let aircraft = sample();
        let sorted = sort(aircraft.iter().collect(), SortKey::Speed);
        assert_eq!(hexes(&sorted), vec!["ABCDEFG", "A1B2C3", "C0FFEE", "D00D00"]);
    }

    #[test]
    fn test_sort_recency_unknown_is_oldest() {
        let aircraft = sample();
        let sorted = sort(aircraft.iter().collect(), SortKey::Recency);
        assert_eq!(hexes(&sorted), vec!["C0FFEE", "A1B2C3", "D00D00", "ABCDEFG"]);
    }

    #[test]
    fn test_unknown_seen_ties_with_999() {
        let aircraft = vec![
            Aircraft::new("NOSEEN"),
            Aircraft::new("OLD999").with_seen(999),
            Aircraft::new("FRESH1").with_seen(998),
        ];
        let sorted = sort(aircraft.iter().collect(), SortKey::Recency);
        assert_eq!(hexes(&sorted), vec!["FRESH1", "NOSEEN", "OLD999"]);
    }

    #[test]
    fn test_sort_callsign_is_case_sensitive() {
        let aircraft = sample();
        let sorted = sort(aircraft.iter().collect(), SortKey::Callsign);
        // Uppercase sorts before lowercase
        let names: Vec<&str> = sorted.iter().map(|a| a.display_name.as_str()).collect();
        assert_eq!(names, vec!["BAW1", "DLH400", "UAL123", "aal9"]);
    }

    #[test]
    fn test_sort_callsign_unnamed_records_use_hex() {
        let json = r#"[{"hex":"AAAAAA","display_name":"ZZZ"},{"hex":"ZZZZZZ"}]"#;
        let aircraft: Vec<Aircraft> = serde_json::from_str(json).unwrap();
        let sorted = sort(aircraft.iter().collect(), SortKey::Callsign);
        assert_eq!(hexes(&sorted), vec!["AAAAAA", "ZZZZZZ"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let aircraft = sample();
        for key in [SortKey::Altitude, SortKey::Speed, SortKey::Recency, SortKey::Callsign] {
            let once = sort(aircraft.iter().collect(), key);
            let twice = sort(once.clone(), key);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_sort_key_cycle_visits_every_key() {
        let mut key = SortKey::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(key);
            key = key.next();
        }
        assert_eq!(key, SortKey::Altitude);
        assert_eq!(
            seen,
            vec![SortKey::Altitude, SortKey::Speed, SortKey::Recency, SortKey::Callsign]
        );
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Altitude".parse::<SortKey>().unwrap(), SortKey::Altitude);
        assert_eq!("seen".parse::<SortKey>().unwrap(), SortKey::Recency);
        assert_eq!(
            SortKey::Callsign.to_string().parse::<SortKey>().unwrap(),
            SortKey::Callsign
        );
        assert!(matches!(
            "heading".parse::<SortKey>(),
            Err(ParseKeyError::Unknown { kind: "sort key", .. })
        ));
    }
}
