// src/session.rs

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::api::SearchResponse;
use crate::config::{
    EXPANSIONS, MAX_BURST_REQUESTS, REQUESTS_PER_SECOND, SEARCH_ENDPOINT, TWEET_FIELDS, USER_FIELDS,
};
use crate::error::{FeedError, Result};

/// One page fetch against the recent-search endpoint. The session implements
/// this against the live API; tests script it.
#[async_trait]
pub trait SearchSource {
    async fn search_page(
        &self,
        query: &str,
        start_time: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> Result<SearchResponse>;
}

#[async_trait]
impl<S> SearchSource for Arc<S>
where
    S: SearchSource + Send + Sync,
{
    async fn search_page(
        &self,
        query: &str,
        start_time: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> Result<SearchResponse> {
        self.as_ref()
            .search_page(query, start_time, page_size, next_token)
            .await
    }
}

/// An authenticated search session. All requests share one connection pool
/// and one client-side rate limiter.
pub struct XSearchSession {
    client: Client,
    bearer_token: String,
    rate_limiter: Arc<Mutex<SearchRateLimiter>>,
}

impl XSearchSession {
    pub fn new(bearer_token: String) -> Self {
        XSearchSession {
            client: Client::new(),
            bearer_token,
            rate_limiter: Arc::new(Mutex::new(SearchRateLimiter::new(REQUESTS_PER_SECOND))),
        }
    }
}

#[async_trait]
impl SearchSource for XSearchSession {
    async fn search_page(
        &self,
        query: &str,
        start_time: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> Result<SearchResponse> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("query", query),
            ("start_time", start_time),
            ("max_results", page_size.as_str()),
            ("tweet.fields", TWEET_FIELDS),
            ("user.fields", USER_FIELDS),
            ("expansions", EXPANSIONS),
        ];
        if let Some(token) = next_token {
            params.push(("next_token", token));
        }

        self.rate_limiter.lock().await.acquire().await;

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .bearer_auth(&self.bearer_token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<SearchResponse>().await?)
    }
}

struct SearchRateLimiter {
    available: u32,
    last_refill: Instant,
    interval: Duration,
}

impl SearchRateLimiter {
    fn new(requests_per_second: u32) -> Self {
        SearchRateLimiter {
            available: MAX_BURST_REQUESTS,
            last_refill: Instant::now(),
            interval: Duration::from_secs(1) / requests_per_second,
        }
    }

    async fn acquire(&mut self) {
        loop {
            if self.available > 0 {
                self.available -= 1;
                return;
            }

            let elapsed = self.last_refill.elapsed();
            if elapsed >= self.interval {
                let refilled = (elapsed.as_secs_f32() / self.interval.as_secs_f32()) as u32;
                self.available = std::cmp::min(self.available + refilled, MAX_BURST_REQUESTS);
                self.last_refill = Instant::now();
            } else {
                sleep(self.interval - elapsed).await;
            }
        }
    }
}
