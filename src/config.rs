// src/config.rs

use lazy_static::lazy_static;
use std::env;

use crate::coin_info::CoinInfo;
use crate::error::{FeedError, Result};

pub const SEARCH_ENDPOINT: &str = "https://api.twitter.com/2/tweets/search/recent";

pub const REQUESTS_PER_SECOND: u32 = 1;
pub const MAX_BURST_REQUESTS: u32 = 5;

pub const PAGE_SIZE: u32 = 100;
/// Per-coin pull cap; keeps each coin's processing bounded regardless of match volume.
pub const MAX_POSTS_PER_COIN: usize = 300;
pub const TOP_TWEETS_LIMIT: usize = 15;
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

pub const TWEET_FIELDS: &str = "created_at,lang,public_metrics,possibly_sensitive";
pub const USER_FIELDS: &str = "username,name,verified,public_metrics";
pub const EXPANSIONS: &str = "author_id";

#[derive(Debug, Clone)]
pub struct Config {
    pub bearer_token: String,
    pub window_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let bearer_token = env::var("X_BEARER_TOKEN")
            .map_err(|_| FeedError::Config("Missing X_BEARER_TOKEN env var".to_string()))?;

        let window_days = match env::var("WINDOW_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| FeedError::Config(format!("Invalid WINDOW_DAYS value: {}", raw)))?,
            Err(_) => DEFAULT_WINDOW_DAYS,
        };
        if window_days <= 0 {
            return Err(FeedError::Config("WINDOW_DAYS must be positive".to_string()));
        }

        Ok(Config {
            bearer_token,
            window_days,
        })
    }
}

lazy_static! {
    static ref DEFAULT_COINS: Vec<CoinInfo> = vec![
        CoinInfo::new("HYPE", &["Hyperliquid", "$HYPE", "#HYPE"]),
        CoinInfo::new("LINK", &["Chainlink", "$LINK", "#LINK"]),
        CoinInfo::new("JUP", &["Jupiter", "$JUP", "#JUP", "JLP"]),
        CoinInfo::new("KMNO", &["Kamino", "$KMNO", "#KMNO"]),
        CoinInfo::new("TOWNS", &["Towns", "$TOWNS", "#TOWNS"]),
        CoinInfo::new("IP", &["Story Protocol", "Story", "$IP", "#IP"]),
        CoinInfo::new("BTC", &["Bitcoin", "$BTC", "#BTC"]),
        CoinInfo::new("ETH", &["Ethereum", "$ETH", "#ETH"]),
    ];
}

/// The coin alias map shipped with the crate. Extend or replace it by
/// passing your own list to `CoinManagerPool`.
pub fn default_coins() -> Vec<CoinInfo> {
    DEFAULT_COINS.clone()
}
