//! Seasonal trend forecasting over the daily availability series.
//!
//! The model is an additive regression: a piecewise-linear trend with evenly
//! spaced changepoints plus Fourier seasonal terms, fit by ridge-penalized
//! least squares where each penalty is the precision of a Gaussian prior.
//! The solve is a deterministic closed form, so repeated fits over the same
//! series produce identical forecasts. Uncertainty bands are a constant-width
//! interval from the in-sample residual spread rather than the sampled bands
//! a full Bayesian fit would give.

mod design;
mod solver;

use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::availability::{column_dates, column_i64};
use crate::error::{ComputeError, Result};

pub use design::SeasonalComponent;

/// Days projected past the last observed date.
pub const HORIZON_DAYS: u32 = 180;

/// Minimum number of observations required to fit.
pub const MIN_OBSERVATIONS: usize = 2;

/// Two-sided 80% normal quantile, the width of the uncertainty band in
/// residual standard deviations.
const INTERVAL_Z: f64 = 1.2815515655446004;

/// Prior scale on the trend intercept and slope.
const TREND_SCALE: f64 = 5.0;

/// Prior scale on the seasonal Fourier coefficients.
const SEASONALITY_SCALE: f64 = 10.0;

/// Additive seasonal-trend forecaster over a daily series.
#[derive(Debug, Clone)]
pub struct SeasonalTrendForecaster {
    seasonalities: Vec<SeasonalComponent>,
    n_changepoints: usize,
    changepoint_range: f64,
    changepoint_scale: f64,
}

impl SeasonalTrendForecaster {
    /// Creates a forecaster with the given seasonal components, number of
    /// potential trend changepoints, the share of history they cover and the
    /// changepoint flexibility (prior scale on trend bends).
    pub fn new(
        seasonalities: Vec<SeasonalComponent>,
        n_changepoints: usize,
        changepoint_range: f64,
        changepoint_scale: f64,
    ) -> Self {
        Self {
            seasonalities,
            n_changepoints,
            changepoint_range,
            changepoint_scale,
        }
    }

    /// Fits the model to `series` (columns `ds` and `y`) and projects
    /// [`HORIZON_DAYS`] past the last observation.
    ///
    /// The output holds one row per historical date followed by the future
    /// dates, ascending, with columns `ds`, `yhat`, `yhat_lower` and
    /// `yhat_upper`.
    #[instrument(skip(self, series), fields(num_rows = series.height()))]
    pub fn forecast(&self, series: &DataFrame) -> Result<DataFrame> {
        let dates = column_dates(series, "ds")?;
        let values = column_i64(series, "y")?;

        if dates.len() < MIN_OBSERVATIONS {
            return Err(ComputeError::InsufficientHistory {
                needed: MIN_OBSERVATIONS,
                got: dates.len(),
            });
        }

        let y: Vec<f64> = values.into_iter().map(|value| value as f64).collect();
        let fitted = self.fit(&dates, &y)?;

        info!(
            "Fitted seasonal trend model on {} observations, projecting {} days ahead",
            dates.len(),
            HORIZON_DAYS
        );

        let last = dates[dates.len() - 1];
        let mut all_dates = dates;
        for offset in 1..=i64::from(HORIZON_DAYS) {
            let next = last
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(|| {
                    ComputeError::Date(format!(
                        "forecast date overflowed {offset} days past {last}"
                    ))
                })?;
            all_dates.push(next);
        }

        let yhat: Vec<f64> = all_dates.iter().map(|date| fitted.predict(*date)).collect();
        let band = INTERVAL_Z * fitted.sigma;
        let lower: Vec<f64> = yhat.iter().map(|value| value - band).collect();
        let upper: Vec<f64> = yhat.iter().map(|value| value + band).collect();

        let df = DataFrame::new(vec![
            Series::new("ds".into(), all_dates).into(),
            Series::new("yhat".into(), yhat).into(),
            Series::new("yhat_lower".into(), lower).into(),
            Series::new("yhat_upper".into(), upper).into(),
        ])?;

        Ok(df)
    }

    fn fit(&self, dates: &[NaiveDate], y: &[f64]) -> Result<FittedModel> {
        let origin = dates[0];
        let span = (dates[dates.len() - 1] - origin).num_days();
        if span <= 0 {
            return Err(ComputeError::ForecastComputation(
                "series must span at least two distinct dates".to_string(),
            ));
        }
        let span = span as f64;

        // Scale observations to roughly unit magnitude so one set of priors
        // fits series of any size.
        let y_scale = y.iter().fold(1.0_f64, |acc, value| acc.max(value.abs()));
        let scaled: Vec<f64> = y.iter().map(|value| value / y_scale).collect();

        let n_changepoints = self.n_changepoints.min(dates.len().saturating_sub(2));
        let changepoints = design::changepoint_grid(n_changepoints, self.changepoint_range);

        let rows: Vec<Vec<f64>> = dates
            .iter()
            .map(|date| {
                let day = (*date - origin).num_days() as f64;
                design::design_row(day / span, day, &changepoints, &self.seasonalities)
            })
            .collect();

        let penalties = design::penalty_vector(
            changepoints.len(),
            &self.seasonalities,
            TREND_SCALE,
            self.changepoint_scale,
            SEASONALITY_SCALE,
        );

        let coefficients = solver::solve_ridge(&rows, &scaled, &penalties)?;

        // In-sample residual spread on the original scale drives the band
        // width.
        let mut squared_error = 0.0;
        for (row, &observed) in rows.iter().zip(y) {
            let predicted = dot(row, &coefficients) * y_scale;
            let residual = observed - predicted;
            squared_error += residual * residual;
        }
        let sigma = (squared_error / y.len() as f64).sqrt();

        debug!(
            "Solved for {} coefficients ({} changepoints), residual sigma {:.3}",
            coefficients.len(),
            changepoints.len(),
            sigma
        );

        Ok(FittedModel {
            origin,
            span,
            y_scale,
            changepoints,
            seasonalities: self.seasonalities.clone(),
            coefficients,
            sigma,
        })
    }
}

/// A fitted model ready to evaluate at arbitrary dates.
struct FittedModel {
    origin: NaiveDate,
    span: f64,
    y_scale: f64,
    changepoints: Vec<f64>,
    seasonalities: Vec<SeasonalComponent>,
    coefficients: Vec<f64>,
    sigma: f64,
}

impl FittedModel {
    fn predict(&self, date: NaiveDate) -> f64 {
        let day = (date - self.origin).num_days() as f64;
        let row = design::design_row(
            day / self.span,
            day,
            &self.changepoints,
            &self.seasonalities,
        );
        dot(&row, &self.coefficients) * self.y_scale
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
