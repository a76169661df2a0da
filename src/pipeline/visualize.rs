//! Visualization stage: movie table to PNG charts

use crate::charts::{
    budget_vs_revenue, budget_vs_revenue_chart, ensure_font, genre_popularity,
    genre_popularity_chart, production_popularity, production_popularity_chart, ChartKind,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::CloudDestination;
use crate::table::{MovieTable, REQUIRED_COLUMNS};
use std::path::PathBuf;
use tracing::{debug, info};

const PNG: &str = "image/png";

/// Summary of a successful visualization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizeReport {
    /// Rows read from the table
    pub rows: usize,
    /// Rows dropped as duplicate titles
    pub duplicate_titles: usize,
    /// Locations of the uploaded charts, in rendering order
    pub charts: Vec<String>,
}

/// Loads the movie table and publishes the summary charts
#[derive(Debug)]
pub struct Visualizer {
    table: CloudDestination,
    table_key: String,
    charts: CloudDestination,
    font_path: Option<PathBuf>,
}

impl Visualizer {
    /// Assemble a visualizer from its collaborators
    pub fn new(
        table: CloudDestination,
        table_key: impl Into<String>,
        charts: CloudDestination,
        font_path: Option<PathBuf>,
    ) -> Self {
        Self {
            table,
            table_key: table_key.into(),
            charts,
            font_path,
        }
    }

    /// Build both storage destinations from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate_storage()?;
        Ok(Self::new(
            CloudDestination::parse(&config.storage.table_url)?,
            &config.storage.table_key,
            CloudDestination::parse(&config.storage.charts_url)?,
            config.charts.font_path.clone(),
        ))
    }

    /// Run one visualization
    ///
    /// Charts are uploaded one at a time; a failure part-way leaves the
    /// earlier charts in place.
    pub async fn run(&self) -> Result<VisualizeReport> {
        let data = self.table.read(&self.table_key).await?;
        let mut table = MovieTable::from_csv(&data)?;
        table.require_columns(&REQUIRED_COLUMNS)?;

        let rows = table.len();
        let duplicate_titles = table.dedup_by("Title")?;
        debug!("Loaded {rows} rows, {duplicate_titles} duplicate titles dropped");
        let records = table.summary_records()?;

        let font = ensure_font(self.font_path.as_deref())?;
        debug!("Rendering with font {}", font.display());

        let mut charts = Vec::with_capacity(ChartKind::ALL.len());
        for kind in ChartKind::ALL {
            let png = match kind {
                ChartKind::BudgetVsRevenue => budget_vs_revenue_chart(&budget_vs_revenue(&records))?,
                ChartKind::GenrePopularity => genre_popularity_chart(&genre_popularity(&records))?,
                ChartKind::ProductionPopularity => {
                    production_popularity_chart(&production_popularity(&records))?
                }
            };
            let location = self
                .charts
                .write_with_type(kind.file_name(), png, Some(PNG))
                .await?;
            info!("Uploaded {kind} chart to {location}");
            charts.push(location);
        }

        Ok(VisualizeReport {
            rows,
            duplicate_titles,
            charts,
        })
    }

    /// Trigger entry point: run and report
    pub async fn handle(&self) -> super::RunOutcome {
        super::RunOutcome::from_result(self.run().await, |_| {
            "Visualizations created and uploaded successfully.".to_string()
        })
    }
}
