// src/coin_manager.rs

use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use std::sync::Arc;
use tracing::info;

use crate::aggregator::MetricsAggregator;
use crate::coin_info::CoinInfo;
use crate::config::{MAX_POSTS_PER_COIN, PAGE_SIZE};
use crate::error::{FeedError, Result};
use crate::paginator::SearchPaginator;
use crate::query_builder::QueryBuilder;
use crate::report::CoinReport;
use crate::session::SearchSource;

/// Runs the whole pipeline for one coin: query, paginate, aggregate.
pub struct CoinManager<S> {
    coin: CoinInfo,
    source: Arc<S>,
    window_days: i64,
}

impl<S> CoinManager<S>
where
    S: SearchSource + Send + Sync,
{
    pub fn new(coin: CoinInfo, source: Arc<S>, window_days: i64) -> Self {
        CoinManager {
            coin,
            source,
            window_days,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.coin.symbol
    }

    pub async fn process_data(&self) -> Result<CoinReport> {
        if self.coin.aliases.is_empty() {
            return Err(FeedError::Config(format!(
                "Coin {} has no aliases",
                self.coin.symbol
            )));
        }

        // 1. Build the filtered query and the trailing window start
        let query = QueryBuilder::build(&self.coin.aliases);
        let window_start = window_start_iso(self.window_days);

        // 2. Page through matches, bounded by the per-coin cap
        let paginator = SearchPaginator::new(
            Arc::clone(&self.source),
            query.clone(),
            window_start.clone(),
            PAGE_SIZE,
        );
        let aggregator = MetricsAggregator::collect(paginator.pages(), MAX_POSTS_PER_COIN).await?;

        // 3. Fold the collected rows into the per-coin report
        let report = aggregator.finalize(&self.coin.symbol, &query, &window_start);
        info!(
            symbol = %report.symbol,
            mentions = report.mentions,
            total_engagements = report.total_engagements,
            "collected coin mentions"
        );
        Ok(report)
    }
}

pub fn window_start_iso(window_days: i64) -> String {
    (Utc::now() - ChronoDuration::days(window_days)).to_rfc3339_opts(SecondsFormat::Millis, true)
}
