// src/coin_manager_pool.rs

use std::sync::Arc;
use tracing::error;

use crate::coin_info::CoinInfo;
use crate::coin_manager::CoinManager;
use crate::report::CoinResult;
use crate::session::SearchSource;

pub struct CoinManagerPool<S> {
    coin_managers: Vec<CoinManager<S>>,
}

impl<S> CoinManagerPool<S>
where
    S: SearchSource + Send + Sync,
{
    pub fn new(coins: Vec<CoinInfo>, source: Arc<S>, window_days: i64) -> Self {
        let coin_managers = coins
            .into_iter()
            .map(|coin| CoinManager::new(coin, Arc::clone(&source), window_days))
            .collect();
        CoinManagerPool { coin_managers }
    }

    /// Processes coins strictly one at a time; the search API's rate limits
    /// leave no room for concurrent fan-out. A fault in one coin is recorded
    /// as its error variant and the run moves on, so every configured coin
    /// yields exactly one result in configuration order.
    pub async fn process_data_sequentially(&self) -> Vec<CoinResult> {
        let mut results = Vec::with_capacity(self.coin_managers.len());
        for manager in &self.coin_managers {
            match manager.process_data().await {
                Ok(report) => results.push(CoinResult::Report(report)),
                Err(err) => {
                    error!(symbol = %manager.symbol(), error = %err, "coin processing failed");
                    results.push(CoinResult::Failed {
                        symbol: manager.symbol().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }
        results
    }
}
