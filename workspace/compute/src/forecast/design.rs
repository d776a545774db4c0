//! Feature construction for the seasonal trend model.

use std::f64::consts::PI;

/// One seasonal component modeled with a Fourier expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalComponent {
    /// Label used in logs.
    pub name: String,
    /// Period length in days.
    pub period: f64,
    /// Number of Fourier harmonics.
    pub order: usize,
}

impl SeasonalComponent {
    pub fn new(name: impl Into<String>, period: f64, order: usize) -> Self {
        Self {
            name: name.into(),
            period,
            order,
        }
    }

    /// Number of design-matrix columns the component contributes.
    pub(crate) fn width(&self) -> usize {
        2 * self.order
    }
}

/// Builds one design-matrix row.
///
/// Layout: intercept, normalized time, one hinge per changepoint, then a
/// sin/cos pair per Fourier harmonic of every seasonal component. `t` is the
/// normalized position within the fitted span; `day` is the absolute day
/// offset from the first observation and drives the seasonal phase.
pub(crate) fn design_row(
    t: f64,
    day: f64,
    changepoints: &[f64],
    seasonalities: &[SeasonalComponent],
) -> Vec<f64> {
    let width = 2
        + changepoints.len()
        + seasonalities
            .iter()
            .map(SeasonalComponent::width)
            .sum::<usize>();

    let mut row = Vec::with_capacity(width);
    row.push(1.0);
    row.push(t);
    for &changepoint in changepoints {
        row.push((t - changepoint).max(0.0));
    }
    for component in seasonalities {
        for harmonic in 1..=component.order {
            let arg = 2.0 * PI * harmonic as f64 * day / component.period;
            row.push(arg.sin());
            row.push(arg.cos());
        }
    }
    row
}

/// Ridge penalties matching the row layout of [`design_row`].
///
/// Each penalty is `1 / scale^2`, the precision of the Gaussian prior on
/// that coefficient group.
pub(crate) fn penalty_vector(
    n_changepoints: usize,
    seasonalities: &[SeasonalComponent],
    trend_scale: f64,
    changepoint_scale: f64,
    seasonality_scale: f64,
) -> Vec<f64> {
    let trend_penalty = (trend_scale * trend_scale).recip();
    let changepoint_penalty = (changepoint_scale * changepoint_scale).recip();
    let seasonal_penalty = (seasonality_scale * seasonality_scale).recip();

    let mut penalties = vec![trend_penalty; 2];
    penalties.extend(std::iter::repeat(changepoint_penalty).take(n_changepoints));
    for component in seasonalities {
        penalties.extend(std::iter::repeat(seasonal_penalty).take(component.width()));
    }
    penalties
}

/// Evenly spaced changepoint positions over the first `range` share of the
/// normalized time axis. The last changepoint sits exactly at `range`.
pub(crate) fn changepoint_grid(count: usize, range: f64) -> Vec<f64> {
    (1..=count)
        .map(|index| range * index as f64 / count as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout_matches_penalties() {
        let seasonalities = vec![
            SeasonalComponent::new("weekly", 7.0, 3),
            SeasonalComponent::new("monthly", 30.5, 5),
        ];
        let changepoints = changepoint_grid(10, 0.8);

        let row = design_row(0.5, 40.0, &changepoints, &seasonalities);
        let penalties = penalty_vector(changepoints.len(), &seasonalities, 5.0, 0.1, 10.0);

        // 2 trend columns + 10 hinges + 2 * (3 + 5) Fourier columns.
        assert_eq!(row.len(), 28);
        assert_eq!(row.len(), penalties.len());
        assert!(penalties.iter().all(|penalty| *penalty > 0.0));
    }

    #[test]
    fn test_hinge_activates_after_changepoint() {
        let changepoints = vec![0.5];
        let before = design_row(0.25, 0.0, &changepoints, &[]);
        let after = design_row(0.75, 0.0, &changepoints, &[]);

        assert_eq!(before[2], 0.0);
        assert!((after[2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_fourier_terms_bounded() {
        let seasonalities = vec![SeasonalComponent::new("yearly", 365.25, 10)];
        for day in 0..400 {
            let row = design_row(0.0, day as f64, &[], &seasonalities);
            assert!(row[2..].iter().all(|value| value.abs() <= 1.0 + 1e-12));
        }
    }

    #[test]
    fn test_changepoint_grid_spacing() {
        let grid = changepoint_grid(4, 0.8);
        let expected = [0.2, 0.4, 0.6, 0.8];
        assert_eq!(grid.len(), expected.len());
        for (actual, wanted) in grid.iter().zip(expected) {
            assert!((actual - wanted).abs() < 1e-12);
        }

        assert!(changepoint_grid(0, 0.8).is_empty());

        let single = changepoint_grid(1, 0.8);
        assert_eq!(single.len(), 1);
        assert!((single[0] - 0.8).abs() < 1e-12);
    }
}
