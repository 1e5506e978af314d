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

//! Altitude distribution chart data.

use serde::Serialize;

use crate::model::Aircraft;

/// Fixed altitude bands: label and exclusive upper bound in feet.
/// The last band is open-ended.
const ALTITUDE_BANDS: [(&str, Option<i32>); 5] = [
    ("0-2k", Some(2_000)),
    ("2k-5k", Some(5_000)),
    ("5k-10k", Some(10_000)),
    ("10k-20k", Some(20_000)),
    ("20k+", None),
];

/// Number of aircraft in one altitude band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AltitudeBucket {
    pub label: &'static str,
    pub count: usize,
}

fn band_index(altitude: i32) -> usize {
    // Negative (below sea level) altitudes land in the lowest band
    ALTITUDE_BANDS
        .iter()
        .position(|(_, upper)| upper.is_none_or(|upper| altitude < upper))
        .unwrap_or(ALTITUDE_BANDS.len() - 1)
}

/// Count aircraft with a reported altitude into the fixed bands.
///
/// Empty bands are omitted; the remaining ones are in ascending altitude order.
/// An empty result means no aircraft reported altitude.
#[must_use]
pub fn histogram(aircraft: &[Aircraft]) -> Vec<AltitudeBucket> {
    let mut counts = [0usize; ALTITUDE_BANDS.len()];
    for altitude in aircraft.iter().filter_map(|a| a.altitude_feet) {
        counts[band_index(altitude)] += 1;
    }

    ALTITUDE_BANDS
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&(label, _), count)| AltitudeBucket { label, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(band_index(0), 0);
        assert_eq!(band_index(1_999), 0);
        assert_eq!(band_index(2_000), 1);
        assert_eq!(band_index(9_999), 2);
        assert_eq!(band_index(10_000), 3);
        assert_eq!(band_index(20_000), 4);
        assert_eq!(band_index(45_000), 4);
        assert_eq!(band_index(-200), 0);
    }

    #[test]
    fn test_empty_bands_are_omitted() {
        let aircraft = vec![
            Aircraft::new("A1B2C3").with_altitude(5000),
            Aircraft::new("ABCDEFG").with_altitude(25000).with_emergency(true),
        ];
        assert_eq!(
            histogram(&aircraft),
            vec![
                AltitudeBucket { label: "5k-10k", count: 1 },
                AltitudeBucket { label: "20k+", count: 1 },
            ]
        );
    }

    #[test]
    fn test_bucket_total_matches_reporting_aircraft() {
        let aircraft = vec![
            Aircraft::new("A00001").with_altitude(500),
            Aircraft::new("A00002").with_altitude(1500),
            Aircraft::new("A00003"),
            Aircraft::new("A00004").with_altitude(12000),
            Aircraft::new("A00005").with_altitude(38000),
            Aircraft::new("A00006"),
        ];
        let buckets = histogram(&aircraft);
        let total: usize = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["0-2k", "10k-20k", "20k+"]);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_no_altitudes_gives_no_histogram() {
        let aircraft = vec![Aircraft::new("A00001")];
        assert!(histogram(&aircraft).is_empty());
        assert!(histogram(&[]).is_empty());
    }
}
