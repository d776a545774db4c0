pub mod availability;
pub mod choropleth;
pub mod error;
pub mod forecast;
pub mod records;

use forecast::{SeasonalComponent, SeasonalTrendForecaster};

/// Returns the pre-configured forecaster used by every forecast view.
///
/// Yearly and weekly seasonality are enabled, daily seasonality is not, and
/// a custom monthly component (30.5-day period, 5 harmonics) is added on
/// top. The changepoint flexibility of 0.1 keeps trend bends smoother than a
/// looser default would.
pub fn default_forecaster() -> SeasonalTrendForecaster {
    SeasonalTrendForecaster::new(
        vec![
            SeasonalComponent::new("yearly", 365.25, 10),
            SeasonalComponent::new("weekly", 7.0, 3),
            SeasonalComponent::new("monthly", 30.5, 5),
        ],
        25,  // potential changepoints
        0.8, // share of history carrying changepoints
        0.1, // changepoint flexibility
    )
}
