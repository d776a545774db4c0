use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use geojson::GeoJson;
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::records::calendar::{self, CalendarRecord};
use crate::records::listing::Listing;
use crate::records::neighbourhood::Neighbourhood;

/// Compressed calendar table, preferred when present.
pub const CALENDAR_FILE_GZ: &str = "calendar.csv.gz";
/// Plain calendar table, used when the compressed file is absent.
pub const CALENDAR_FILE: &str = "calendar.csv";
/// Listing-to-neighbourhood table.
pub const LISTINGS_FILE: &str = "listings.csv";
/// Neighbourhood boundary collection.
pub const NEIGHBOURHOODS_FILE: &str = "neighbourhoods.geojson";

/// The three base tables, loaded once at startup and read-only afterwards.
///
/// Loading is all-or-nothing: any unreadable file or malformed cell fails
/// the whole load. Nothing here is ever written back to disk.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub calendar: Vec<CalendarRecord>,
    pub listings: Vec<Listing>,
    pub neighbourhoods: Vec<Neighbourhood>,
}

impl Dataset {
    /// Loads all three base tables from a data directory.
    ///
    /// Expects `calendar.csv.gz` (or `calendar.csv`), `listings.csv` and
    /// `neighbourhoods.geojson` inside `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let calendar_path = calendar_table_path(dir);
        info!("Loading calendar table from {}", calendar_path.display());
        let calendar = load_calendar(&calendar_path)?;
        debug!("Loaded {} calendar records", calendar.len());

        let listings_path = dir.join(LISTINGS_FILE);
        info!("Loading listings table from {}", listings_path.display());
        let listings = load_listings(&listings_path)?;
        debug!("Loaded {} listings", listings.len());

        let neighbourhoods_path = dir.join(NEIGHBOURHOODS_FILE);
        info!(
            "Loading neighbourhood boundaries from {}",
            neighbourhoods_path.display()
        );
        let neighbourhoods = load_neighbourhoods(&neighbourhoods_path)?;
        debug!("Loaded {} neighbourhood features", neighbourhoods.len());

        Ok(Self {
            calendar,
            listings,
            neighbourhoods,
        })
    }

    /// First and last calendar date present, or None for an empty table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.calendar.iter().map(|r| r.date).min()?;
        let last = self.calendar.iter().map(|r| r.date).max()?;
        Some((first, last))
    }

    /// One-line description of the loaded tables, for health and inspection
    /// output.
    pub fn summary(&self) -> String {
        format!(
            "{} calendar records, {} listings, {} neighbourhoods",
            self.calendar.len(),
            self.listings.len(),
            self.neighbourhoods.len()
        )
    }
}

/// Picks the compressed calendar table when it exists, otherwise the plain
/// one.
fn calendar_table_path(dir: &Path) -> PathBuf {
    let gz = dir.join(CALENDAR_FILE_GZ);
    if gz.exists() { gz } else { dir.join(CALENDAR_FILE) }
}

/// Opens a tabular file, transparently decompressing `.gz` inputs.
fn open_table(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Finds a required column in the header row.
///
/// Columns are located by name rather than position so the loader tolerates
/// the extra columns the raw exports carry.
fn column_index(
    headers: &csv::StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Reads the calendar table: one row per (listing, date) observation.
pub fn load_calendar(path: &Path) -> Result<Vec<CalendarRecord>> {
    let mut reader = csv::Reader::from_reader(BufReader::new(open_table(path)?));
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let listing_id_idx = column_index(&headers, "listing_id", path)?;
    let date_idx = column_index(&headers, "date", path)?;
    let available_idx = column_index(&headers, "available", path)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        // Row numbers are 1-based file lines; the header occupies line 1.
        let row = i + 2;
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let listing_id_raw = record.get(listing_id_idx).unwrap_or("");
        let listing_id =
            listing_id_raw
                .parse::<i64>()
                .map_err(|_| LoadError::InvalidListingId {
                    path: path.to_path_buf(),
                    row,
                    value: listing_id_raw.to_string(),
                })?;

        let date_raw = record.get(date_idx).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_raw, calendar::DATE_FORMAT).map_err(|_| {
            LoadError::InvalidDate {
                path: path.to_path_buf(),
                row,
                value: date_raw.to_string(),
            }
        })?;

        let available_raw = record.get(available_idx).unwrap_or("");
        let available = calendar::parse_availability(available_raw).ok_or_else(|| {
            LoadError::InvalidAvailability {
                path: path.to_path_buf(),
                row,
                value: available_raw.to_string(),
            }
        })?;

        records.push(CalendarRecord::new(listing_id, date, available));
    }

    Ok(records)
}

/// Reads the listings table: listing id and neighbourhood name.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    let mut reader = csv::Reader::from_reader(BufReader::new(open_table(path)?));
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let id_idx = column_index(&headers, "id", path)?;
    let neighbourhood_idx = column_index(&headers, "neighbourhood", path)?;

    let mut listings = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let id_raw = record.get(id_idx).unwrap_or("");
        let id = id_raw
            .parse::<i64>()
            .map_err(|_| LoadError::InvalidListingId {
                path: path.to_path_buf(),
                row,
                value: id_raw.to_string(),
            })?;

        let neighbourhood = record.get(neighbourhood_idx).unwrap_or("").to_string();
        listings.push(Listing::new(id, neighbourhood));
    }

    Ok(listings)
}

/// Reads the neighbourhood boundary collection.
///
/// Features get sequential ids by position. A feature without a
/// `neighbourhood` property gets an empty name (such rows simply never match
/// any aggregated count); a feature without geometry is unrenderable and
/// fails the load.
pub fn load_neighbourhoods(path: &Path) -> Result<Vec<Neighbourhood>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let geojson = content
        .parse::<GeoJson>()
        .map_err(|source| LoadError::GeoJson {
            path: path.to_path_buf(),
            source,
        })?;

    let collection = match geojson {
        GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(LoadError::NotAFeatureCollection {
                path: path.to_path_buf(),
            });
        }
    };

    let mut neighbourhoods = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let name = feature
            .properties
            .as_ref()
            .and_then(|properties| properties.get("neighbourhood"))
            .and_then(|value| value.as_str())
            .unwrap_or("")
            .to_string();

        let geometry = feature.geometry.ok_or(LoadError::MissingGeometry {
            path: path.to_path_buf(),
            feature: index,
        })?;

        neighbourhoods.push(Neighbourhood::new(index as i64, name, geometry));
    }

    Ok(neighbourhoods)
}
