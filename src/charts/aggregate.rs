//! Aggregate views computed from the movie table

use crate::table::SummaryRecord;
use std::collections::BTreeMap;

/// Number of entries kept by the top-N views
pub const TOP_N: usize = 10;

/// One title of the budget vs revenue view
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetRevenue {
    pub title: String,
    pub budget: f64,
    pub revenue: f64,
}

/// A category with its mean popularity
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMean {
    pub label: String,
    pub mean: f64,
}

/// Top titles by budget, among rows with positive budget and known revenue
pub fn budget_vs_revenue(records: &[SummaryRecord]) -> Vec<BudgetRevenue> {
    let mut rows: Vec<BudgetRevenue> = records
        .iter()
        .filter_map(|r| {
            Some(BudgetRevenue {
                title: r.title.clone()?,
                budget: r.budget.filter(|b| *b > 0.0)?,
                revenue: r.revenue?,
            })
        })
        .collect();

    // Stable, so equal budgets keep table order
    rows.sort_by(|a, b| b.budget.total_cmp(&a.budget));
    rows.truncate(TOP_N);
    rows
}

/// Mean of the values per key; keys come back in name order
fn group_means<'a, I>(pairs: I) -> Vec<CategoryMean>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in pairs {
        let entry = groups.entry(key).or_default();
        entry.0 += value;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(label, (sum, count))| CategoryMean {
            label: label.to_string(),
            mean: sum / count as f64,
        })
        .collect()
}

/// Mean popularity per genre, ascending
pub fn genre_popularity(records: &[SummaryRecord]) -> Vec<CategoryMean> {
    let mut means = group_means(
        records
            .iter()
            .filter_map(|r| Some((r.genre.as_deref()?, r.popularity?))),
    );
    means.sort_by(|a, b| a.mean.total_cmp(&b.mean));
    means
}

/// Top production company groups by mean popularity, descending
///
/// Groups are keyed by the full company string of a row, not by individual
/// companies.
pub fn production_popularity(records: &[SummaryRecord]) -> Vec<CategoryMean> {
    let mut means = group_means(
        records
            .iter()
            .filter_map(|r| Some((r.production_companies.as_deref()?, r.popularity?))),
    );
    means.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    means.truncate(TOP_N);
    means
}

/// Format an amount as whole dollars with thousands separators
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}
