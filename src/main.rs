mod chart;
mod config;
mod currency;
mod db;
mod error;
mod export;
mod history;
mod pipeline;
mod types;
mod view;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    match pipeline::run(&cfg).await {
        Ok(report) => info!(
            image = %report.image_path.display(),
            buckets = report.points.len(),
            "Done"
        ),
        Err(e) => {
            error!("Fatal error: {e}");
            std::process::exit(1);
        }
    }
}
