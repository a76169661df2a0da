//! PNG rendering of the aggregate views

use super::aggregate::{format_currency, BudgetRevenue, CategoryMean};
use super::font::FONT_FAMILY;
use crate::error::{Error, Result};
use bytes::Bytes;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

const BUDGET_COLOR: RGBColor = RGBColor(173, 216, 230);
const REVENUE_COLOR: RGBColor = RGBColor(0, 0, 139);
const GENRE_COLOR: RGBColor = RGBColor(0, 0, 255);

/// Cut a label to `max` characters, marking the cut
fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Label for a category axis value, empty between categories
fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Blue shade for rank `rank` of `count`, darkest first
fn blues_reversed(rank: usize, count: usize) -> RGBColor {
    let t = if count <= 1 {
        0.0
    } else {
        rank as f64 / (count - 1) as f64
    };
    let lerp = |from: f64, to: f64| (from + (to - from) * t).round() as u8;
    RGBColor(lerp(8.0, 198.0), lerp(48.0, 219.0), lerp(107.0, 239.0))
}

fn axis_top(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.15
    } else {
        1.0
    }
}

/// Draw into an RGB buffer and encode it as PNG
fn render_png<F>(width: u32, height: u32, draw: F) -> Result<Bytes>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> DrawResult,
{
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| Error::chart(e.to_string()))?;
        draw(&root).map_err(|e| Error::chart(e.to_string()))?;
        root.present().map_err(|e| Error::chart(e.to_string()))?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| Error::chart("pixel buffer does not match image size"))?;
    let mut out = std::io::Cursor::new(Vec::new());
    image.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(Bytes::from(out.into_inner()))
}

/// Grouped bars of budget and revenue per title, with value labels
pub fn budget_vs_revenue_chart(data: &[BudgetRevenue]) -> Result<Bytes> {
    render_png(1400, 800, |root| {
        let n = data.len().max(1) as i32;
        let max = data
            .iter()
            .map(|d| d.budget.max(d.revenue))
            .fold(0.0, f64::max);
        let top = axis_top(max);

        let mut chart = ChartBuilder::on(root)
            .caption("Budget vs Revenue (Top 10 Movies)", (FONT_FAMILY, 32).into_font())
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(150)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

        let titles: Vec<String> = data.iter().map(|d| truncate_label(&d.title, 18)).collect();
        let x_fmt = |v: &SegmentValue<i32>| segment_label(&titles, v);
        let y_fmt = |v: &f64| format_currency(*v);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len().max(1))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_desc("Movies")
            .y_desc("Amount (in USD)")
            .label_style((FONT_FAMILY, 13))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()?;

        chart
            .draw_series(data.iter().enumerate().map(|(i, d)| {
                let x = i as i32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(x), 0.0), (SegmentValue::CenterOf(x), d.budget)],
                    BUDGET_COLOR.mix(0.8).filled(),
                );
                bar.set_margin(0, 0, 8, 1);
                bar
            }))?
            .label("Budget")
            .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], BUDGET_COLOR.filled()));

        chart
            .draw_series(data.iter().enumerate().map(|(i, d)| {
                let x = i as i32;
                let mut bar = Rectangle::new(
                    [(SegmentValue::CenterOf(x), 0.0), (SegmentValue::Exact(x + 1), d.revenue)],
                    REVENUE_COLOR.mix(0.8).filled(),
                );
                bar.set_margin(0, 0, 1, 8);
                bar
            }))?
            .label("Revenue")
            .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], REVENUE_COLOR.filled()));

        let value_font = (FONT_FAMILY, 11).into_font();
        let left = TextStyle::from(value_font.clone()).pos(Pos::new(HPos::Right, VPos::Bottom));
        let right = TextStyle::from(value_font).pos(Pos::new(HPos::Left, VPos::Bottom));
        let lift = top * 0.01;

        chart.draw_series(data.iter().enumerate().map(|(i, d)| {
            Text::new(
                format_currency(d.budget),
                (SegmentValue::CenterOf(i as i32), d.budget + lift),
                left.clone(),
            )
        }))?;
        chart.draw_series(data.iter().enumerate().map(|(i, d)| {
            Text::new(
                format_currency(d.revenue),
                (SegmentValue::CenterOf(i as i32), d.revenue + lift),
                right.clone(),
            )
        }))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .label_font((FONT_FAMILY, 14))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        Ok(())
    })
}

/// Bars of mean popularity per genre, widened to fit every category
pub fn genre_popularity_chart(data: &[CategoryMean]) -> Result<Bytes> {
    let width = (data.len() as u32 * 90 + 240).clamp(1400, 6000);

    render_png(width, 1000, |root| {
        let n = data.len().max(1) as i32;
        let top = axis_top(data.iter().map(|d| d.mean).fold(0.0, f64::max));

        let mut chart = ChartBuilder::on(root)
            .caption("Genre vs Average Popularity", (FONT_FAMILY, 32).into_font())
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(90)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

        let genres: Vec<String> = data.iter().map(|d| truncate_label(&d.label, 14)).collect();
        let x_fmt = |v: &SegmentValue<i32>| segment_label(&genres, v);
        let y_fmt = |v: &f64| format!("{v:.0}");

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len().max(1))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_desc("Genre")
            .y_desc("Average Popularity")
            .label_style((FONT_FAMILY, 13))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(i, d)| {
            let x = i as i32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(x), 0.0), (SegmentValue::Exact(x + 1), d.mean)],
                GENRE_COLOR.mix(0.7).filled(),
            );
            bar.set_margin(0, 0, 10, 10);
            bar
        }))?;

        Ok(())
    })
}

/// Horizontal bars of mean popularity per production company group
pub fn production_popularity_chart(data: &[CategoryMean]) -> Result<Bytes> {
    render_png(1400, 1000, |root| {
        let count = data.len();
        let n = count.max(1) as i32;
        let top = axis_top(data.iter().map(|d| d.mean).fold(0.0, f64::max));

        let mut chart = ChartBuilder::on(root)
            .caption("Popularity vs Production Houses (Top 10)", (FONT_FAMILY, 32).into_font())
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(340)
            .build_cartesian_2d(0f64..top, (0..n).into_segmented())?;

        // Rank 0 is drawn in the top segment
        let labels: Vec<String> = data
            .iter()
            .rev()
            .map(|d| truncate_label(&d.label, 42))
            .collect();
        let x_fmt = |v: &f64| format!("{v:.1}");
        let y_fmt = |v: &SegmentValue<i32>| segment_label(&labels, v);

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(count.max(1))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_desc("Average Popularity")
            .y_desc("Production Houses")
            .label_style((FONT_FAMILY, 13))
            .axis_desc_style((FONT_FAMILY, 16))
            .draw()?;

        chart.draw_series(data.iter().enumerate().map(|(rank, d)| {
            let y = (count - 1 - rank) as i32;
            let mut bar = Rectangle::new(
                [(0.0, SegmentValue::Exact(y)), (d.mean, SegmentValue::Exact(y + 1))],
                blues_reversed(rank, count).filled(),
            );
            bar.set_margin(6, 6, 0, 0);
            bar
        }))?;

        Ok(())
    })
}
