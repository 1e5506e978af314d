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

//! Category and altitude-band filtering.

use serde::{Deserialize, Serialize};

use crate::model::Aircraft;

pub const DEFAULT_MIN_ALTITUDE_FEET: i32 = 0;
pub const DEFAULT_MAX_ALTITUDE_FEET: i32 = 50_000;

/// Which aircraft the list should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools, reason = "one toggle per list category")]
pub struct FilterCriteria {
    pub show_emergency: bool,
    pub show_normal: bool,
    /// Inclusive lower altitude bound in feet.
    pub min_altitude: i32,
    /// Inclusive upper altitude bound in feet.
    pub max_altitude: i32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            show_emergency: true,
            show_normal: true,
            min_altitude: DEFAULT_MIN_ALTITUDE_FEET,
            max_altitude: DEFAULT_MAX_ALTITUDE_FEET,
        }
    }
}

impl FilterCriteria {
    /// Whether a single aircraft passes the filter.
    ///
    /// Aircraft without a reported altitude always pass the altitude test.
    #[must_use]
    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        let category_shown = if aircraft.is_emergency {
            self.show_emergency
        } else {
            self.show_normal
        };

        category_shown
            && aircraft
                .altitude_feet
                .is_none_or(|alt| (self.min_altitude..=self.max_altitude).contains(&alt))
    }
}

/// Keep the aircraft matching `criteria`, preserving input order.
pub fn filter<'a, I>(aircraft: I, criteria: &FilterCriteria) -> Vec<&'a Aircraft>
where
    I: IntoIterator<Item = &'a Aircraft>,
{
    aircraft
        .into_iter()
        .filter(|a| criteria.matches(a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Aircraft> {
        vec![
            Aircraft::new("A1B2C3").with_altitude(5000),
            Aircraft::new("ABCDEFG").with_altitude(25000).with_emergency(true),
            Aircraft::new("C0FFEE"),
            Aircraft::new("D00D00").with_altitude(52000),
            Aircraft::new("BEEF01").with_altitude(0),
        ]
    }

    #[test]
    fn test_default_criteria_keeps_in_band_aircraft() {
        let aircraft = sample();
        let kept: Vec<&str> = filter(&aircraft, &FilterCriteria::default())
            .iter()
            .map(|a| a.hex.as_str())
            .collect();
        assert_eq!(kept, vec!["A1B2C3", "ABCDEFG", "C0FFEE", "BEEF01"]);
    }

    #[test]
    fn test_hide_emergency() {
        let aircraft = sample();
        let criteria = FilterCriteria {
            show_emergency: false,
            ..Default::default()
        };
        let kept = filter(&aircraft, &criteria);
        assert!(kept.iter().all(|a| !a.is_emergency));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_hide_normal() {
        let aircraft = sample();
        let criteria = FilterCriteria {
            show_normal: false,
            ..Default::default()
        };
        let kept = filter(&aircraft, &criteria);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].hex, "ABCDEFG");
    }

    #[test]
    fn test_altitude_bounds_are_inclusive() {
        let aircraft = vec![
            Aircraft::new("LOW001").with_altitude(999),
            Aircraft::new("EDGE01").with_altitude(1000),
            Aircraft::new("EDGE02").with_altitude(2000),
            Aircraft::new("HIGH01").with_altitude(2001),
        ];
        let criteria = FilterCriteria {
            min_altitude: 1000,
            max_altitude: 2000,
            ..Default::default()
        };
        let kept: Vec<&str> = filter(&aircraft, &criteria)
            .iter()
            .map(|a| a.hex.as_str())
            .collect();
        assert_eq!(kept, vec!["EDGE01", "EDGE02"]);
    }

    #[test]
    fn test_missing_altitude_always_passes_band() {
        let aircraft = vec![Aircraft::new("C0FFEE")];
        let criteria = FilterCriteria {
            min_altitude: 30000,
            max_altitude: 31000,
            ..Default::default()
        };
        assert_eq!(filter(&aircraft, &criteria).len(), 1);
    }

    #[test]
    fn test_output_is_exactly_the_matching_set() {
        let aircraft = sample();
        let variants = [
            FilterCriteria::default(),
            FilterCriteria {
                show_emergency: false,
                ..Default::default()
            },
            FilterCriteria {
                show_normal: false,
                ..Default::default()
            },
            FilterCriteria {
                min_altitude: 4000,
                max_altitude: 6000,
                ..Default::default()
            },
            FilterCriteria {
                show_emergency: false,
                show_normal: false,
                ..Default::default()
            },
        ];

        for criteria in variants {
            let kept = filter(&aircraft, &criteria);
            assert!(kept.iter().all(|a| criteria.matches(a)));
            let expected = aircraft.iter().filter(|a| criteria.matches(a)).count();
            assert_eq!(kept.len(), expected);
        }
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<Aircraft> = Vec::new();
        assert!(filter(&empty, &FilterCriteria::default()).is_empty());
    }
}
