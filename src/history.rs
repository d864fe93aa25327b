use chrono::NaiveDateTime;
use sqlx::SqliteConnection;
use tracing::info;

use crate::currency::format_currency;
use crate::db::models::HourlyAggregateRow;
use crate::db::query::HistoryQuery;
use crate::error::{AppError, Result};
use crate::types::HistoryPoint;

const BUCKET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runs the aggregation and enriches every row, preserving bucket order.
pub async fn load_history(
    conn: &mut SqliteConnection,
    query: &HistoryQuery,
) -> Result<Vec<HistoryPoint>> {
    let rows = query.fetch(conn).await?;
    info!(
        item_id = query.filter.item_id,
        faction_id = query.filter.faction_id,
        realm_id = query.filter.realm_id,
        buckets = rows.len(),
        "Loaded auction history"
    );
    rows.iter().map(enrich).collect()
}

pub fn enrich(row: &HourlyAggregateRow) -> Result<HistoryPoint> {
    let bucket = NaiveDateTime::parse_from_str(&row.date_hour, BUCKET_FORMAT)
        .map_err(|source| AppError::BucketParse {
            value: row.date_hour.clone(),
            source,
        })?
        .and_utc();

    let min_buyout = non_negative("min_buyout", row.min_buyout)?;
    let total_quantity = non_negative("total_quantity", row.total_quantity)?;

    let weekday = bucket.format("%A").to_string();
    let formatted_min_buyout = format_currency(min_buyout);
    let hover_text = format!(
        "{weekday}, {}<br>Price: {formatted_min_buyout}<br>Volume: {total_quantity}",
        bucket.format("%Y-%m-%d %H:%M"),
    );

    Ok(HistoryPoint {
        bucket,
        weekday,
        min_buyout,
        formatted_min_buyout,
        total_quantity,
        hover_text,
    })
}

fn non_negative(column: &str, value: i64) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| AppError::InvalidData(format!("{column} is negative: {value}")))
}
