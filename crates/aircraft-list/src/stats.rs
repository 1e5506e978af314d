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

//! Summary statistics over an aircraft snapshot.
//!
//! Statistics are always computed over the full, unfiltered collection.
//! Optional fields that are missing are left out of the aggregates rather
//! than counted as zero.

use serde::Serialize;

use crate::model::{Aircraft, Coordinate, FeedSource};

/// Radius around the user location that counts as "nearby" (inclusive).
pub const NEARBY_RADIUS_METERS: f64 = 10_000.0;

/// Derived counts and altitude/speed summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Statistics {
    pub total: usize,
    /// Aircraft not marked stale by the tracking store.
    pub active: usize,
    pub emergency: usize,
    pub max_altitude: Option<i32>,
    /// Floor of the mean over aircraft reporting altitude.
    pub mean_altitude: Option<i32>,
    pub max_speed: Option<i32>,
    /// Floor of the mean over aircraft reporting speed.
    pub mean_speed: Option<i32>,
    pub with_position: usize,
    /// Aircraft within [`NEARBY_RADIUS_METERS`] of the user; 0 without a location.
    pub nearby: usize,
    pub adsb: usize,
    pub opensky: usize,
}

/// Whether a distance falls inside the nearby radius. The boundary is included.
#[must_use]
pub fn is_within_nearby_radius(distance_m: f64) -> bool {
    distance_m <= NEARBY_RADIUS_METERS
}

/// Mean of the values using integer floor division, `None` when there are none.
/// `[1000, 1001]` gives 1000.
fn floor_mean(values: impl Iterator<Item = i32>) -> Option<i32> {
    let (sum, count) = values.fold((0i64, 0i64), |(sum, count), v| {
        (sum + i64::from(v), count + 1)
    });
    if count == 0 {
        return None;
    }
    i32::try_from(sum.div_euclid(count)).ok()
}

/// Compute [`Statistics`] for a snapshot.
///
/// `user_location` is the observer position; without one the nearby count is 0.
#[must_use]
pub fn aggregate_statistics(
    aircraft: &[Aircraft],
    user_location: Option<Coordinate>,
) -> Statistics {
    let altitudes = || aircraft.iter().filter_map(|a| a.altitude_feet);
    let speeds = || aircraft.iter().filter_map(|a| a.speed_knots);

    let nearby = user_location.map_or(0, |home| {
        aircraft
            .iter()
            .filter_map(|a| a.distance_to_m(&home))
            .filter(|&d| is_within_nearby_radius(d))
            .count()
    });

    let adsb = aircraft
        .iter()
        .filter(|a| a.feed_source() == FeedSource::Adsb)
        .count();

    Statistics {
        total: aircraft.len(),
        active: aircraft.iter().filter(|a| !a.is_stale).count(),
        emergency: aircraft.iter().filter(|a| a.is_emergency).count(),
        max_altitude: altitudes().max(),
        mean_altitude: floor_mean(altitudes()),
        max_speed: speeds().max(),
        mean_speed: floor_mean(speeds()),
        with_position: aircraft.iter().filter(|a| a.coordinate.is_some()).count(),
        nearby,
        adsb,
        opensky: aircraft.len() - adsb,
    }
}
