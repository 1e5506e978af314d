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

//! Plain-text rendering of a processed aircraft list.

use aircraft_list::{Aircraft, AltitudeBucket, ListView, SortKey, Statistics};

const BAR_WIDTH: usize = 40;

fn opt_or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn format_row(aircraft: &Aircraft) -> String {
    let flag = if aircraft.is_emergency {
        "!"
    } else if aircraft.is_stale {
        "~"
    } else {
        " "
    };
    let track = aircraft
        .track
        .map_or_else(|| "-".to_string(), |t| format!("{t:.0}"));

    format!(
        "{flag} {:<8} {:<7} {:>6} {:>4} {:>4} {:>5} {:<9} {:<7}",
        aircraft.display_name,
        aircraft.hex,
        opt_or_dash(aircraft.altitude_feet),
        opt_or_dash(aircraft.speed_knots),
        track,
        opt_or_dash(aircraft.seen),
        aircraft.signal_quality,
        aircraft.feed_source(),
    )
}

/// Aircraft table with a header naming the active sort column.
pub fn render_table(rows: &[&Aircraft], sort_key: SortKey, limit: usize) -> String {
    let mut out = format!(
        "  {:<8} {:<7} {:>6} {:>4} {:>4} {:>5} {:<9} {:<7}   sorted by {}\n",
        "CALL",
        "HEX",
        "ALT",
        "SPD",
        "TRK",
        "SEEN",
        "SIGNAL",
        "FEED",
        sort_key.label()
    );

    let shown = if limit == 0 {
        rows.len()
    } else {
        limit.min(rows.len())
    };
    for aircraft in &rows[..shown] {
        out.push_str(&format_row(aircraft));
        out.push('\n');
    }
    if shown < rows.len() {
        out.push_str(&format!("  ... {} more\n", rows.len() - shown));
    }
    out
}

/// Statistics block; a single line when there is nothing to summarize.
pub fn render_statistics(statistics: Option<&Statistics>) -> String {
    let Some(s) = statistics else {
        return "No aircraft tracked\n".to_string();
    };

    format!(
        "Tracked: {}  Active: {}  Emergency: {}  With position: {}  Nearby: {}\n\
         Altitude max/mean: {} / {} ft  Speed max/mean: {} / {} kt\n\
         Feeds: ADS-B {}  OpenSky {}\n",
        s.total,
        s.active,
        s.emergency,
        s.with_position,
        s.nearby,
        opt_or_dash(s.max_altitude),
        opt_or_dash(s.mean_altitude),
        opt_or_dash(s.max_speed),
        opt_or_dash(s.mean_speed),
        s.adsb,
        s.opensky
    )
}

/// Horizontal bar chart of the altitude histogram.
pub fn render_histogram(buckets: &[AltitudeBucket]) -> String {
    let Some(max) = buckets.iter().map(|b| b.count).max() else {
        return "No altitude data\n".to_string();
    };

    buckets
        .iter()
        .map(|bucket| {
            // Every non-empty band gets at least one block
            let len = (bucket.count * BAR_WIDTH).div_ceil(max);
            format!(
                "{:>8} | {:<width$} {}\n",
                bucket.label,
                "#".repeat(len),
                bucket.count,
                width = BAR_WIDTH
            )
        })
        .collect()
}

/// Full text report for a list view.
pub fn render_view(view: &ListView<'_>, sort_key: SortKey, limit: usize) -> String {
    let mut out = render_table(&view.rows, sort_key, limit);
    out.push('\n');
    out.push_str(&render_statistics(view.statistics.as_ref()));
    out.push('\n');
    out.push_str(&render_histogram(&view.histogram));
    out
}
