use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use plotters::prelude::*;
use tracing::info;

use crate::chart::PriceTicks;
use crate::config::{IMAGE_HEIGHT, IMAGE_WIDTH, PRICE_TICK_STEP};
use crate::currency::format_currency;
use crate::error::{AppError, Result};
use crate::types::{ChartMeta, HistoryPoint};

const PRICE_COLOR: RGBColor = RGBColor(31, 119, 180);
const VOLUME_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Writes the dual-axis price/volume chart as a PNG.
pub fn render_png(points: &[HistoryPoint], meta: &ChartMeta, path: &Path) -> Result<()> {
    let ticks = PriceTicks::from_points(points, PRICE_TICK_STEP).ok_or_else(|| AppError::NoData {
        item: meta.item_name.clone(),
        window_days: meta.window_days,
    })?;

    draw(points, meta, &ticks, path).map_err(|e| AppError::Render(format!("{}: {e}", path.display())))?;

    info!(
        path = %path.display(),
        buckets = points.len(),
        ticks = ticks.values.len(),
        "Wrote chart image"
    );
    Ok(())
}

fn draw(
    points: &[HistoryPoint],
    meta: &ChartMeta,
    ticks: &PriceTicks,
    path: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (IMAGE_WIDTH, IMAGE_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_start, x_end) = time_span(points, meta.bucket_secs);
    let (y_lo, y_hi) = ticks.axis_range();
    let volume_max = points.iter().map(|p| p.total_quantity).max().unwrap_or(0);
    let volume_top = (volume_max + volume_max / 10).max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} ({})", meta.title(), meta.subtitle()),
            ("sans-serif", 36),
        )
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(150)
        .right_y_label_area_size(110)
        .build_cartesian_2d(x_start..x_end, (y_lo..y_hi).with_key_points(ticks.values.clone()))?
        .set_secondary_coord(x_start..x_end, 0u64..volume_top);

    chart
        .configure_mesh()
        .x_labels(14)
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%a %Y-%m-%d %H:%M").to_string())
        .y_label_formatter(&|v: &u64| format_currency(*v))
        .x_desc("Date")
        .y_desc("Minimum Buyout Price")
        .label_style(("sans-serif", 16))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Volume")
        .label_style(("sans-serif", 16))
        .draw()?;

    // Bars fill most of their bucket, leaving a gap between neighbours.
    let bar_width = Duration::seconds((meta.bucket_secs * 4 / 5).max(1));
    chart
        .draw_secondary_series(points.iter().map(|p| {
            Rectangle::new(
                [(p.bucket, 0u64), (p.bucket + bar_width, p.total_quantity)],
                VOLUME_COLOR.mix(0.5).filled(),
            )
        }))?
        .label("Volume")
        .legend(|(x, y)| Rectangle::new([(x, y - 6), (x + 18, y + 6)], VOLUME_COLOR.mix(0.5).filled()));

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.bucket, p.min_buyout)),
            PRICE_COLOR.stroke_width(2),
        ))?
        .label("Price history")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], PRICE_COLOR.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Time axis from the first bucket to the end of the last one.
fn time_span(points: &[HistoryPoint], bucket_secs: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = points.first().map(|p| p.bucket).unwrap_or_else(Utc::now);
    let last = points.last().map(|p| p.bucket).unwrap_or(first);
    (first, last + Duration::seconds(bucket_secs.max(1)))
}
