//! Common transport-layer types shared between the availability service and
//! its clients. These structs mirror the handlers' response payloads so a
//! consumer can deserialize API responses without duplicating shapes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use geojson::Geometry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in stayscope/src/schemas.rs with
/// the same field names. We mirror it here for clients to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

// ===================== Views =====================

/// The closed set of user-selectable views.
///
/// Every place that dispatches on a view matches this enum exhaustively, so
/// adding a view forces every dispatch site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Global daily availability line chart.
    Trend,
    /// Per-neighbourhood ranking bar chart.
    Neighbourhoods,
    /// Seasonal forecast chart with confidence band.
    Forecast,
    /// Choropleth map for one selected date.
    Map,
}

impl ViewKind {
    /// All view kinds in display order.
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Trend,
        ViewKind::Neighbourhoods,
        ViewKind::Forecast,
        ViewKind::Map,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Trend => "trend",
            ViewKind::Neighbourhoods => "neighbourhoods",
            ViewKind::Forecast => "forecast",
            ViewKind::Map => "map",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trend" => Ok(ViewKind::Trend),
            "neighbourhoods" => Ok(ViewKind::Neighbourhoods),
            "forecast" => Ok(ViewKind::Forecast),
            "map" => Ok(ViewKind::Map),
            other => Err(format!(
                "unknown view '{other}', expected one of: trend, neighbourhoods, forecast, map"
            )),
        }
    }
}

// ===================== Availability =====================

/// One point of the global daily availability series.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AvailabilityPoint {
    /// Calendar date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Number of available listings on that date.
    pub available: i64,
}

/// The global daily availability series, sorted by date ascending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AvailabilityTrend {
    pub points: Vec<AvailabilityPoint>,
}

impl AvailabilityTrend {
    pub fn new(points: Vec<AvailabilityPoint>) -> Self {
        Self { points }
    }
}

/// Total availability for one neighbourhood summed over every date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NeighbourhoodTotal {
    pub neighbourhood: String,
    pub total: i64,
}

/// Neighbourhoods ordered by total availability, highest first.
/// Equal totals order by neighbourhood name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NeighbourhoodRanking {
    pub entries: Vec<NeighbourhoodTotal>,
}

impl NeighbourhoodRanking {
    pub fn new(entries: Vec<NeighbourhoodTotal>) -> Self {
        Self { entries }
    }
}

// ===================== Forecast =====================

/// One forecast row, covering a historical or future date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastPoint {
    /// Calendar date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Predicted availability.
    pub predicted: f64,
    /// Lower confidence bound (never above `predicted`).
    pub lower: f64,
    /// Upper confidence bound (never below `predicted`).
    pub upper: f64,
}

/// Forecast over the full history plus a fixed future horizon, sorted by
/// date ascending.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastSeries {
    /// Days projected past the last observed date.
    pub horizon_days: u32,
    pub points: Vec<ForecastPoint>,
}

// ===================== Map =====================

/// Default map viewport.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// Labels for the two tooltip fields shown on hover.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TooltipLabels {
    /// Label for the neighbourhood name field.
    pub neighbourhood: String,
    /// Label for the availability display field.
    pub available: String,
}

/// Style directive for one neighbourhood polygon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MapRegion {
    /// Stable feature id assigned at load time.
    pub id: i64,
    /// Neighbourhood name, the join key to the aggregated counts.
    pub neighbourhood: String,
    /// Available count for the selected date. None when the date's
    /// aggregation has no row for this neighbourhood.
    pub available: Option<i64>,
    /// Tooltip value: the count, or "No data" when `available` is None.
    pub available_display: String,
    /// Fill color as a CSS `rgb(...)` string.
    pub fill_color: String,
    /// Polygon border color.
    pub border_color: String,
    /// Polygon border line weight.
    pub line_weight: f64,
    /// Polygon fill opacity.
    pub fill_opacity: f64,
    /// GeoJSON geometry to draw.
    #[schema(value_type = Object)]
    pub geometry: Geometry,
}

/// Choropleth view of availability for one selected date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChoroplethMap {
    /// The selected date the counts refer to.
    pub date: NaiveDate,
    /// Default map center.
    pub center: MapCenter,
    /// Default zoom level.
    pub zoom: u8,
    /// Tooltip field labels, shared by all regions.
    pub tooltip: TooltipLabels,
    /// One style directive per boundary feature.
    pub regions: Vec<MapRegion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value;

    #[test]
    fn test_view_kind_round_trip() {
        for kind in ViewKind::ALL {
            let parsed: ViewKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_view_kind_rejects_unknown() {
        let err = "heatmap".parse::<ViewKind>().unwrap_err();
        assert!(err.contains("heatmap"));
    }

    #[test]
    fn test_view_kind_serde_uses_lowercase() {
        let json = serde_json::to_string(&ViewKind::Neighbourhoods).unwrap();
        assert_eq!(json, "\"neighbourhoods\"");
    }

    #[test]
    fn test_map_region_serde_round_trip() {
        let region = MapRegion {
            id: 3,
            neighbourhood: "Maxvorstadt".to_string(),
            available: Some(12),
            available_display: "12".to_string(),
            fill_color: "rgb(127, 0, 127)".to_string(),
            border_color: "black".to_string(),
            line_weight: 1.0,
            fill_opacity: 0.6,
            geometry: Geometry::new(Value::Point(vec![11.5820, 48.1351])),
        };

        let json = serde_json::to_string(&region).unwrap();
        let back: MapRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, region);
    }

    #[test]
    fn test_forecast_point_serializes_date_as_string() {
        let point = ForecastPoint {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            predicted: 10.0,
            lower: 8.0,
            upper: 12.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2024-01-01");
    }
}
