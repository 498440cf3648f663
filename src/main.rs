// src/main.rs

use std::process;
use std::sync::Arc;
use tracing::{error, info};

use coinfeed::config::{self, Config};
use coinfeed::{CoinManagerPool, SnapshotReport, XSearchSession};

const OUTPUT_PATH: &str = "feed.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // A missing or unreadable credential aborts before any coin is touched.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "configuration error");
            process::exit(1);
        }
    };

    let session = Arc::new(XSearchSession::new(config.bearer_token.clone()));
    let pool = CoinManagerPool::new(config::default_coins(), session, config.window_days);
    let coins = pool.process_data_sequentially().await;

    let report = SnapshotReport::assemble(config.window_days, coins);
    if let Err(err) = report.write_to_file(OUTPUT_PATH) {
        error!(error = %err, "failed to write {}", OUTPUT_PATH);
        process::exit(1);
    }

    info!("Wrote {} with {} coins", OUTPUT_PATH, report.coins.len());
}
