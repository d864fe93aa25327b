use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use sqlx::Connection;
use tracing::info;

use crate::chart::render_png;
use crate::config::Config;
use crate::db::{self, lookup, query::HistoryQuery};
use crate::error::{AppError, Result};
use crate::export::write_json;
use crate::history::load_history;
use crate::types::{ChartMeta, HistoryPoint, SeriesFilter};
use crate::view;

/// What a completed run produced.
#[derive(Debug)]
pub struct HistoryReport {
    pub meta: ChartMeta,
    pub points: Vec<HistoryPoint>,
    pub image_path: PathBuf,
}

/// Full run: load, render the image, then open the interactive view.
pub async fn run(cfg: &Config) -> Result<HistoryReport> {
    let report = build_report(cfg, Utc::now()).await?;

    match view_skip_reason(cfg.interactive, std::io::stdout().is_terminal()) {
        Some(reason) => info!("Skipping interactive view: {reason}"),
        None => view::show(&report.points, &report.meta)?,
    }

    Ok(report)
}

fn view_skip_reason(interactive: bool, is_terminal: bool) -> Option<&'static str> {
    if !interactive {
        Some("disabled by INTERACTIVE")
    } else if !is_terminal {
        Some("stdout is not a terminal")
    } else {
        None
    }
}

/// Everything up to and including the written artifacts. The connection is
/// released before returning, on success and on error alike.
pub async fn build_report(cfg: &Config, now: DateTime<Utc>) -> Result<HistoryReport> {
    let mut conn = db::open(&cfg.db_path).await?;

    let item_name = lookup::item_name(&mut conn, cfg.item_id).await?;
    let realm_name = lookup::realm_name(&mut conn, cfg.realm_id).await;
    let faction = lookup::faction_name(&mut conn, cfg.faction_id).await;
    let meta = ChartMeta {
        item_name,
        realm_name,
        faction,
        window_days: cfg.window_days,
        bucket_secs: cfg.bucket_secs,
    };
    info!(
        item_id = cfg.item_id,
        item = %meta.item_name,
        realm = %meta.realm_name,
        faction = %meta.faction,
        "Building price history"
    );

    let filter = SeriesFilter {
        item_id: cfg.item_id,
        faction_id: cfg.faction_id,
        realm_id: cfg.realm_id,
    };
    let query = HistoryQuery::new(filter, Duration::days(cfg.window_days), cfg.bucket_secs, now);
    let points = load_history(&mut conn, &query).await?;

    conn.close().await?;

    if points.is_empty() {
        return Err(AppError::NoData {
            item: meta.item_name,
            window_days: meta.window_days,
        });
    }

    let image_path = cfg.image_path(&meta.item_name);
    render_png(&points, &meta, &image_path)?;

    if let Some(path) = &cfg.export_json {
        write_json(&points, &meta, path)?;
    }

    Ok(HistoryReport {
        meta,
        points,
        image_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::format_currency;
    use crate::db::fixtures::{create_schema, insert_auction, insert_item};
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::{ConnectOptions, SqliteConnection};
    use std::path::Path;

    async fn seeded_db(path: &Path) -> SqliteConnection {
        let mut conn = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();
        create_schema(&mut conn).await;
        insert_item(&mut conn, 1, "Test Ore").await;
        conn
    }

    fn test_config(dir: &Path, db_path: &Path) -> Config {
        Config {
            db_path: db_path.to_str().unwrap().to_string(),
            log_level: "info".to_string(),
            item_id: 1,
            faction_id: 0,
            realm_id: 1,
            window_days: 7,
            bucket_secs: 3_600,
            output_dir: dir.to_path_buf(),
            interactive: false,
            export_json: None,
        }
    }

    #[test]
    fn view_opens_only_on_an_interactive_terminal() {
        assert_eq!(view_skip_reason(true, true), None);
        assert_eq!(view_skip_reason(false, true), Some("disabled by INTERACTIVE"));
        assert_eq!(view_skip_reason(true, false), Some("stdout is not a terminal"));
    }

    #[tokio::test]
    async fn seeded_database_produces_chart() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("blackwater.db");
        let now = Utc::now();

        let mut conn = seeded_db(&db_path).await;
        for (hours_ago, buyout, quantity) in [(3, 100, 5), (2, 200, 3), (1, 150, 2)] {
            let ts = (now - Duration::hours(hours_ago)).timestamp();
            insert_auction(&mut conn, 1, 0, 1, ts, buyout, quantity).await;
        }
        conn.close().await.unwrap();

        let report = build_report(&test_config(dir.path(), &db_path), now)
            .await
            .unwrap();

        assert_eq!(report.points.len(), 3);
        let buyouts: Vec<u64> = report.points.iter().map(|p| p.min_buyout).collect();
        assert_eq!(buyouts, vec![100, 200, 150]);
        for p in &report.points {
            assert_eq!(p.formatted_min_buyout, format_currency(p.min_buyout));
        }
        let quantities: Vec<u64> = report.points.iter().map(|p| p.total_quantity).collect();
        assert_eq!(quantities, vec![5, 3, 2]);
        assert_eq!(report.meta.faction, "Alliance");
        assert_eq!(report.meta.realm_name, "realm 1");

        assert_eq!(
            report.image_path,
            dir.path().join("Test Ore_7_day_history.png")
        );
        assert!(report.image_path.exists());
    }

    #[tokio::test]
    async fn empty_window_is_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("blackwater.db");
        let now = Utc::now();

        let mut conn = seeded_db(&db_path).await;
        let stale = (now - Duration::days(8)).timestamp();
        insert_auction(&mut conn, 1, 0, 1, stale, 100, 1).await;
        conn.close().await.unwrap();

        let err = build_report(&test_config(dir.path(), &db_path), now)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoData { .. }));
        assert!(!dir.path().join("Test Ore_7_day_history.png").exists());
    }

    #[tokio::test]
    async fn unknown_item_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("blackwater.db");
        seeded_db(&db_path).await.close().await.unwrap();

        let mut cfg = test_config(dir.path(), &db_path);
        cfg.item_id = 99;
        let err = build_report(&cfg, Utc::now()).await.unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound(99)));
    }
}
