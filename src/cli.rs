use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{inspect, render, serve};

#[derive(Parser)]
#[command(name = "stayscope")]
#[command(about = "StayScope availability dashboard with CLI tools and web server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Directory holding the dataset files
        ///
        /// Expected contents:
        ///   - calendar.csv.gz (or calendar.csv)
        ///   - listings.csv
        ///   - neighbourhoods.geojson
        #[arg(short, long, env = "DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,
    },
    /// Render one dashboard view as JSON on stdout
    ///
    /// Views: trend, neighbourhoods, forecast, map.
    /// The map view additionally needs --date.
    Render {
        /// View to render
        #[arg(short, long)]
        view: String,

        /// Date for the map view (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Directory holding the dataset files
        #[arg(short, long, env = "DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,
    },
    /// Load the dataset and print shape summaries and table previews
    Inspect {
        /// Directory holding the dataset files
        #[arg(short, long, env = "DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                data_dir,
                bind_address,
            } => {
                serve(&data_dir, &bind_address).await?;
            }
            Commands::Render {
                view,
                date,
                data_dir,
            } => {
                render(&view, date, &data_dir)?;
            }
            Commands::Inspect { data_dir } => {
                inspect(&data_dir)?;
            }
        }
        Ok(())
    }
}
