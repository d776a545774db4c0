use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use common::{NeighbourhoodRanking, ViewKind};
use tracing::{debug, info};

use compute::availability::{daily_series, distinct_dates, neighbourhood_daily, neighbourhood_ranking};
use compute::choropleth::render_map;
use compute::default_forecaster;
use model::Dataset;

use crate::helpers::converters::{convert_dataframe_to_forecast, convert_dataframe_to_trend};

/// Renders one dashboard view as pretty-printed JSON on stdout.
pub fn render(view: &str, date: Option<NaiveDate>, data_dir: &Path) -> Result<()> {
    let view = ViewKind::from_str(view).map_err(|e| anyhow::anyhow!(e))?;

    info!("Rendering {} view", view);
    let dataset = Dataset::load(data_dir).context("failed to load dataset")?;
    debug!("Loaded {}", dataset.summary());

    let json = match view {
        ViewKind::Trend => {
            let series = daily_series(&dataset.calendar)?;
            let trend = convert_dataframe_to_trend(series).map_err(anyhow::Error::msg)?;
            serde_json::to_string_pretty(&trend)?
        }
        ViewKind::Neighbourhoods => {
            let by_neighbourhood = neighbourhood_daily(&dataset.calendar, &dataset.listings)?;
            let ranking = NeighbourhoodRanking::new(neighbourhood_ranking(&by_neighbourhood)?);
            serde_json::to_string_pretty(&ranking)?
        }
        ViewKind::Forecast => {
            let series = daily_series(&dataset.calendar)?;
            let forecast_df = default_forecaster().forecast(&series)?;
            let forecast = convert_dataframe_to_forecast(forecast_df).map_err(anyhow::Error::msg)?;
            serde_json::to_string_pretty(&forecast)?
        }
        ViewKind::Map => {
            let date = match date {
                Some(date) => date,
                None => bail!("the map view requires --date (YYYY-MM-DD)"),
            };
            let by_neighbourhood = neighbourhood_daily(&dataset.calendar, &dataset.listings)?;
            let dates = distinct_dates(&by_neighbourhood)?;
            if !dates.contains(&date) {
                bail!("no availability data for {}", date);
            }
            let map = render_map(&by_neighbourhood, &dataset.neighbourhoods, date)?;
            serde_json::to_string_pretty(&map)?
        }
    };

    println!("{}", json);
    Ok(())
}
