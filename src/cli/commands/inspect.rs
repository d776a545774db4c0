use std::path::Path;

use anyhow::Result;
use tracing::info;

use compute::records::{CalendarPolars, ListingPolars};
use model::Dataset;

/// Loads the dataset and prints shape summaries plus table previews.
pub fn inspect(data_dir: &Path) -> Result<()> {
    info!("Inspecting dataset in: {}", data_dir.display());
    let dataset = Dataset::load(data_dir)?;

    println!("{}", dataset.summary());
    if let Some((first, last)) = dataset.date_range() {
        println!("Calendar covers {} to {}", first, last);
    }

    let calendar = dataset.calendar.to_df()?;
    println!("\nCalendar:\n{}", calendar.head(Some(5)));

    let listings = dataset.listings.to_df()?;
    println!("\nListings:\n{}", listings.head(Some(5)));

    println!("\nNeighbourhood boundaries:");
    for neighbourhood in &dataset.neighbourhoods {
        println!("{:>4}  {}", neighbourhood.id, neighbourhood.name);
    }

    Ok(())
}
