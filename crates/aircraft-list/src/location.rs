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

//! User location source for the "nearby" statistic.
//!
//! The location is passed into statistics computation explicitly instead of
//! being read from a process-wide singleton, so callers (and tests) decide
//! where the observer is.

use crate::model::Coordinate;

/// Something that can report the observer's current position.
pub trait LocationProvider {
    /// Current location, or `None` when it is not known.
    fn current_location(&self) -> Option<Coordinate>;
}

/// Provider for callers without any location; the nearby count is always 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn current_location(&self) -> Option<Coordinate> {
        None
    }
}

/// A fixed coordinate, e.g. a configured receiver position.
impl LocationProvider for Coordinate {
    fn current_location(&self) -> Option<Coordinate> {
        Some(*self)
    }
}

impl LocationProvider for Option<Coordinate> {
    fn current_location(&self) -> Option<Coordinate> {
        *self
    }
}

impl<T: LocationProvider + ?Sized> LocationProvider for &T {
    fn current_location(&self) -> Option<Coordinate> {
        (**self).current_location()
    }
}
