//! Charts module
//!
//! Aggregations over the movie table and their PNG renderings.
//!
//! # Overview
//!
//! Each chart pairs an aggregation with a renderer:
//!
//! | Chart | Aggregation | Object key |
//! |-------|-------------|------------|
//! | Budget vs revenue | [`budget_vs_revenue`] | `budget_vs_revenue_vertical_bar.png` |
//! | Genre popularity | [`genre_popularity`] | `genre_vs_avg_popularity.png` |
//! | Production popularity | [`production_popularity`] | `popularity_vs_production_houses.png` |
//!
//! Rendering needs a registered font, see [`ensure_font`].

mod aggregate;
mod font;
mod render;

pub use aggregate::{
    budget_vs_revenue, format_currency, genre_popularity, production_popularity, BudgetRevenue,
    CategoryMean, TOP_N,
};
pub use font::{ensure_font, locate_font, FONT_FAMILY};
pub use render::{budget_vs_revenue_chart, genre_popularity_chart, production_popularity_chart};

/// The charts produced by one visualization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    BudgetVsRevenue,
    GenrePopularity,
    ProductionPopularity,
}

impl ChartKind {
    /// Every chart, in rendering order
    pub const ALL: [ChartKind; 3] = [
        ChartKind::BudgetVsRevenue,
        ChartKind::GenrePopularity,
        ChartKind::ProductionPopularity,
    ];

    /// Object key the chart is stored under
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::BudgetVsRevenue => "budget_vs_revenue_vertical_bar.png",
            ChartKind::GenrePopularity => "genre_vs_avg_popularity.png",
            ChartKind::ProductionPopularity => "popularity_vs_production_houses.png",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartKind::BudgetVsRevenue => "budget_vs_revenue",
            ChartKind::GenrePopularity => "genre_popularity",
            ChartKind::ProductionPopularity => "production_popularity",
        };
        write!(f, "{name}")
    }
}
