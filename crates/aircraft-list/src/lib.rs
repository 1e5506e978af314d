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

//! Aircraft list processing for ADS-B and OpenSky track snapshots.
//!
//! This library turns a snapshot of tracked aircraft into what an aircraft
//! list screen displays. It never talks to a feed and never mutates the
//! records it is given; every result is recomputed from the snapshot on each
//! call.
//!
//! - **Filtering**: emergency/normal categories and an inclusive altitude band
//! - **Sorting**: stable ordering by altitude, speed, recency or callsign
//! - **Statistics**: counts, altitude/speed maxima and floor means, nearby count
//! - **Histogram**: aircraft per fixed altitude band
//!
//! # Quick Start
//!
//! Use [`AircraftListProcessor`] to run all four steps at once:
//!
//! ```
//! use aircraft_list::{Aircraft, AircraftListProcessor, Coordinate, SortKey};
//!
//! let snapshot = vec![
//!     Aircraft::new("A1B2C3").with_callsign("UAL123").with_altitude(5000),
//!     Aircraft::new("ABCDEFG").with_altitude(25000).with_emergency(true),
//! ];
//!
//! let processor = AircraftListProcessor::new().with_sort_key(SortKey::Altitude);
//! let view = processor.process(&snapshot, &Coordinate::new(33.9425, -118.4081));
//!
//! assert_eq!(view.rows[0].hex, "ABCDEFG");
//! assert_eq!(view.statistics.unwrap().emergency, 1);
//! assert_eq!(view.histogram.len(), 2);
//! ```
//!
//! # Using Individual Operations
//!
//! Each step is a plain function over a borrowed snapshot:
//!
//! ```
//! use aircraft_list::{filter, histogram, sort, Aircraft, FilterCriteria, SortKey};
//!
//! let snapshot = vec![
//!     Aircraft::new("A1B2C3").with_altitude(5000),
//!     Aircraft::new("ABCDEFG").with_altitude(25000).with_emergency(true),
//! ];
//!
//! let criteria = FilterCriteria { show_emergency: false, ..Default::default() };
//! let rows = sort(filter(&snapshot, &criteria), SortKey::Altitude);
//! assert_eq!(rows.len(), 1);
//!
//! let buckets = histogram(&snapshot);
//! assert_eq!(buckets[0].label, "5k-10k");
//! assert_eq!(buckets[1].label, "20k+");
//! ```

pub mod error;
pub mod filter;
pub mod histogram;
pub mod location;
pub mod model;
pub mod sort;
pub mod stats;

use log::debug;
use serde::Serialize;

pub use error::ParseKeyError;
pub use filter::{filter, FilterCriteria};
pub use histogram::{histogram, AltitudeBucket};
pub use location::{LocationProvider, NoLocation};
pub use model::{haversine_distance_m, Aircraft, Coordinate, FeedSource, SignalQuality};
pub use sort::{sort, SortKey};
pub use stats::{aggregate_statistics, Statistics, NEARBY_RADIUS_METERS};

/// Everything an aircraft list screen shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView<'a> {
    /// Filtered aircraft in display order.
    pub rows: Vec<&'a Aircraft>,
    /// Statistics over the whole snapshot; `None` when the snapshot is empty.
    pub statistics: Option<Statistics>,
    /// Non-empty altitude bands; empty when no aircraft reports altitude.
    pub histogram: Vec<AltitudeBucket>,
}

/// Filter, sort and summarize aircraft snapshots with a fixed set of list settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AircraftListProcessor {
    criteria: FilterCriteria,
    sort_key: SortKey,
}

impl AircraftListProcessor {
    /// Create a processor with default criteria and altitude ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    #[must_use]
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Filtered rows in display order.
    #[must_use]
    pub fn rows<'a>(&self, aircraft: &'a [Aircraft]) -> Vec<&'a Aircraft> {
        sort(filter(aircraft, &self.criteria), self.sort_key)
    }

    /// Statistics over the whole snapshot, or `None` if it is empty.
    #[must_use]
    pub fn statistics(
        &self,
        aircraft: &[Aircraft],
        location: &dyn LocationProvider,
    ) -> Option<Statistics> {
        if aircraft.is_empty() {
            return None;
        }
        Some(aggregate_statistics(aircraft, location.current_location()))
    }

    /// Run filtering, sorting, statistics and histogram for one snapshot.
    #[must_use]
    pub fn process<'a>(
        &self,
        aircraft: &'a [Aircraft],
        location: &dyn LocationProvider,
    ) -> ListView<'a> {
        let rows = self.rows(aircraft);
        debug!(
            "Aircraft list: {} of {} shown, sorted by {}",
            rows.len(),
            aircraft.len(),
            self.sort_key
        );

        ListView {
            rows,
            statistics: self.statistics(aircraft, location),
            histogram: histogram(aircraft),
        }
    }
}
