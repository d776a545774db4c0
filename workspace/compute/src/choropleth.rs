//! Choropleth styling for the per-date neighbourhood map.
//!
//! Produces one fully styled region per loaded neighbourhood polygon. Counts
//! come from the per-neighbourhood daily aggregation; styling is a linear
//! color ramp between a low and a high endpoint, scaled against the selected
//! date's maximum count.

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{ChoroplethMap, MapCenter, MapRegion, TooltipLabels};
use model::records::neighbourhood::Neighbourhood;
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use crate::availability::neighbourhood_rows;
use crate::error::Result;

/// Map center over Munich.
pub const MAP_CENTER_LAT: f64 = 48.1351;
pub const MAP_CENTER_LON: f64 = 11.5820;

/// Initial zoom level of the rendered map.
pub const MAP_ZOOM: u8 = 11;

/// Tooltip text shown for a neighbourhood without a row on the selected date.
pub const NO_DATA_LABEL: &str = "No data";

const BORDER_COLOR: &str = "black";
const LINE_WEIGHT: f64 = 1.0;
const FILL_OPACITY: f64 = 0.6;

/// Interpolates between the low endpoint `rgb(255, 0, 0)` and the high
/// endpoint `rgb(0, 0, 255)`.
///
/// A non-positive maximum (a date where every count is zero) pins the ratio
/// to zero instead of dividing by zero, so every region renders at the low
/// endpoint.
pub fn fill_color(available: i64, max_available: i64) -> String {
    let ratio = if max_available > 0 {
        available as f64 / max_available as f64
    } else {
        0.0
    };
    let red = (255.0 * (1.0 - ratio)) as u8;
    let blue = (255.0 * ratio) as u8;
    format!("rgb({red}, 0, {blue})")
}

/// Builds the styled map for one selected date.
///
/// Every loaded neighbourhood polygon gets a region, in load order. Counts
/// are looked up by neighbourhood name; a polygon without a matching row
/// scales as zero and displays the [`NO_DATA_LABEL`] sentinel. The color
/// ramp is normalized against the selected date's own maximum, so each date
/// uses the full range.
#[instrument(skip(neighbourhood_daily, neighbourhoods), fields(date = %date))]
pub fn render_map(
    neighbourhood_daily: &DataFrame,
    neighbourhoods: &[Neighbourhood],
    date: NaiveDate,
) -> Result<ChoroplethMap> {
    let rows = neighbourhood_rows(neighbourhood_daily)?;

    let counts: HashMap<&str, i64> = rows
        .iter()
        .filter(|row| row.date == date)
        .map(|row| (row.neighbourhood.as_str(), row.available))
        .collect();
    let max_available = counts.values().copied().max().unwrap_or(0);

    debug!(
        "Rendering {} regions for {} with max count {}",
        neighbourhoods.len(),
        date,
        max_available
    );

    let regions = neighbourhoods
        .iter()
        .map(|feature| {
            let available = counts.get(feature.name.as_str()).copied();
            let scaled = available.unwrap_or(0);
            MapRegion {
                id: feature.id,
                neighbourhood: feature.name.clone(),
                available,
                available_display: available
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| NO_DATA_LABEL.to_string()),
                fill_color: fill_color(scaled, max_available),
                border_color: BORDER_COLOR.to_string(),
                line_weight: LINE_WEIGHT,
                fill_opacity: FILL_OPACITY,
                geometry: feature.geometry.clone(),
            }
        })
        .collect();

    Ok(ChoroplethMap {
        date,
        center: MapCenter {
            lat: MAP_CENTER_LAT,
            lon: MAP_CENTER_LON,
        },
        zoom: MAP_ZOOM,
        tooltip: TooltipLabels {
            neighbourhood: "Neighbourhood".to_string(),
            available: "Available Apartments".to_string(),
        },
        regions,
    })
}
