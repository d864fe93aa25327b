use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::types::{ChartMeta, HistoryPoint};

#[derive(Serialize)]
struct HistoryExport<'a> {
    #[serde(flatten)]
    meta: &'a ChartMeta,
    points: &'a [HistoryPoint],
}

/// Writes the enriched series next to the chart as pretty-printed JSON.
pub fn write_json(points: &[HistoryPoint], meta: &ChartMeta, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &HistoryExport { meta, points })?;
    writer.flush()?;
    info!(path = %path.display(), buckets = points.len(), "Wrote JSON export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn export_contains_meta_and_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let meta = ChartMeta {
            item_name: "Test Ore".to_string(),
            realm_name: "realm 1".to_string(),
            faction: "Horde".to_string(),
            window_days: 7,
            bucket_secs: 3_600,
        };
        let point = HistoryPoint {
            bucket: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            weekday: "Monday".to_string(),
            min_buyout: 12345,
            formatted_min_buyout: "1g 23s 45c".to_string(),
            total_quantity: 7,
            hover_text: "Monday, 2024-01-01 09:00<br>Price: 1g 23s 45c<br>Volume: 7".to_string(),
        };

        write_json(&[point], &meta, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["item_name"], "Test Ore");
        assert_eq!(value["faction"], "Horde");
        assert_eq!(value["points"][0]["min_buyout"], 12345);
        assert_eq!(value["points"][0]["formatted_min_buyout"], "1g 23s 45c");
        assert_eq!(value["points"][0]["bucket"], "2024-01-01T09:00:00Z");
    }
}
