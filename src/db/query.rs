use chrono::{DateTime, Duration, Utc};
use sqlx::SqliteConnection;

use crate::db::models::HourlyAggregateRow;
use crate::error::Result;
use crate::types::SeriesFilter;

/// Bucketed min-buyout / summed-quantity series for one item, faction and realm.
///
/// Parameters (numbered so the bucket width can be reused):
/// `?1` bucket width in seconds, `?2` item, `?3` faction, `?4` realm,
/// `?5` earliest timestamp in the window (epoch seconds, inclusive).
const HISTORY_SQL: &str = r#"
SELECT
    strftime('%Y-%m-%d %H:%M:%S', (timestamp / ?1) * ?1, 'unixepoch') AS date_hour,
    MIN(buyout) AS min_buyout,
    SUM(quantity) AS total_quantity
FROM Auctions
WHERE item_id = ?2
  AND faction_id = ?3
  AND connected_realm_id = ?4
  AND timestamp >= ?5
  AND buyout > 0
GROUP BY date_hour
ORDER BY date_hour
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub filter: SeriesFilter,
    /// Inclusive lower bound, epoch seconds.
    pub since: i64,
    pub bucket_secs: i64,
}

impl HistoryQuery {
    /// Covers the `window` ending at `now`.
    pub fn new(filter: SeriesFilter, window: Duration, bucket_secs: i64, now: DateTime<Utc>) -> Self {
        Self {
            filter,
            since: (now - window).timestamp(),
            bucket_secs,
        }
    }

    pub fn sql(&self) -> &'static str {
        HISTORY_SQL
    }

    pub async fn fetch(&self, conn: &mut SqliteConnection) -> Result<Vec<HourlyAggregateRow>> {
        let rows = sqlx::query_as::<_, HourlyAggregateRow>(self.sql())
            .bind(self.bucket_secs)
            .bind(self.filter.item_id)
            .bind(self.filter.faction_id)
            .bind(self.filter.realm_id)
            .bind(self.since)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }
}
