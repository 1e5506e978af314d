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

//! Application configuration management.
//!
//! This module handles persistent list preferences using TOML format: the
//! default sort order, filter toggles and altitude band, and a GPS location
//! override for machines without a location source.

use aircraft_list::filter::{DEFAULT_MAX_ALTITUDE_FEET, DEFAULT_MIN_ALTITUDE_FEET};
use aircraft_list::{Coordinate, FilterCriteria, SortKey};
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "skylist";
const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools, reason = "flat TOML preferences")]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Sort order applied when none is given on the command line
    #[serde(default)]
    pub default_sort: SortKey,

    /// Show aircraft squawking an emergency
    #[serde(default = "default_true")]
    pub show_emergency: bool,

    /// Show all other aircraft
    #[serde(default = "default_true")]
    pub show_normal: bool,

    /// Lowest altitude shown, in feet (inclusive)
    #[serde(default = "default_min_altitude")]
    pub min_altitude: i32,

    /// Highest altitude shown, in feet (inclusive)
    #[serde(default = "default_max_altitude")]
    pub max_altitude: i32,

    /// Override GPS latitude (for devices without GPS)
    #[serde(default)]
    pub override_gps_latitude: Option<f64>,

    /// Override GPS longitude (for devices without GPS)
    #[serde(default)]
    pub override_gps_longitude: Option<f64>,

    /// Maximum number of rows printed, 0 for all
    #[serde(default)]
    pub list_limit: usize,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_min_altitude() -> i32 {
    DEFAULT_MIN_ALTITUDE_FEET
}

fn default_max_altitude() -> i32 {
    DEFAULT_MAX_ALTITUDE_FEET
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            default_sort: SortKey::default(),
            show_emergency: true,
            show_normal: true,
            min_altitude: default_min_altitude(),
            max_altitude: default_max_altitude(),
            override_gps_latitude: None,
            override_gps_longitude: None,
            list_limit: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Filter criteria described by this configuration
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            show_emergency: self.show_emergency,
            show_normal: self.show_normal,
            min_altitude: self.min_altitude,
            max_altitude: self.max_altitude,
        }
    }

    /// Configured location override, only when both coordinates are set
    pub fn location_override(&self) -> Option<Coordinate> {
        match (self.override_gps_latitude, self.override_gps_longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }
}
