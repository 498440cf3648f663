// src/aggregator.rs

use futures::{pin_mut, Stream, StreamExt};
use std::collections::HashSet;

use crate::api::Tweet;
use crate::author_index::AuthorIndex;
use crate::config::TOP_TWEETS_LIMIT;
use crate::error::Result;
use crate::paginator::Page;
use crate::report::{CoinReport, TopTweetView};

/// A tweet joined with whatever author metadata was known at collection time.
#[derive(Debug, Clone)]
pub struct EnrichedRow {
    pub id: String,
    pub created_at: Option<String>,
    pub text: String,
    pub like_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    pub quote_count: u64,
    pub author_id: String,
    pub author_username: Option<String>,
    pub author_verified: bool,
    pub author_followers: u64,
}

impl EnrichedRow {
    fn from_tweet(tweet: Tweet, authors: &AuthorIndex) -> Self {
        let author_id = tweet.author_id.unwrap_or_default();
        let author = authors.lookup(&author_id);
        EnrichedRow {
            id: tweet.id,
            created_at: tweet.created_at,
            text: tweet.text,
            like_count: tweet.public_metrics.like_count,
            retweet_count: tweet.public_metrics.retweet_count,
            reply_count: tweet.public_metrics.reply_count,
            quote_count: tweet.public_metrics.quote_count,
            author_username: author.map(|user| user.username.clone()),
            author_verified: author.map(|user| user.verified).unwrap_or(false),
            author_followers: author.map(|user| user.followers_count()).unwrap_or(0),
            author_id,
        }
    }

    /// The single engagement definition shared by the totals and the top-N
    /// ranking.
    pub fn engagement(&self) -> u64 {
        self.like_count + self.retweet_count + self.reply_count + self.quote_count
    }
}

/// Folds one coin's bounded page stream into a per-coin report.
pub struct MetricsAggregator {
    rows: Vec<EnrichedRow>,
}

impl MetricsAggregator {
    /// Drains pages in delivery order until `cap` rows are held or the stream
    /// ends. Each page's author batch is indexed before any of that page's
    /// tweets are resolved; a stream fault aborts the whole collection.
    pub async fn collect<St>(pages: St, cap: usize) -> Result<Self>
    where
        St: Stream<Item = Result<Page>>,
    {
        let mut authors = AuthorIndex::new();
        let mut rows = Vec::new();

        pin_mut!(pages);
        'pages: while let Some(page) = pages.next().await {
            let page = page?;
            authors.ingest(&page.users);
            for tweet in page.tweets {
                rows.push(EnrichedRow::from_tweet(tweet, &authors));
                if rows.len() >= cap {
                    break 'pages;
                }
            }
        }

        Ok(MetricsAggregator { rows })
    }

    pub fn rows(&self) -> &[EnrichedRow] {
        &self.rows
    }

    pub fn finalize(self, symbol: &str, query: &str, window_start: &str) -> CoinReport {
        let mentions = self.rows.len();

        // Unique accounts are counted by author id, not by row: one prolific
        // author counts once.
        let unique_verified: HashSet<&str> = self
            .rows
            .iter()
            .filter(|row| row.author_verified)
            .map(|row| row.author_id.as_str())
            .collect();
        let unique_100kplus: HashSet<&str> = self
            .rows
            .iter()
            .filter(|row| row.author_followers >= 100_000)
            .map(|row| row.author_id.as_str())
            .collect();
        let total_engagements: u64 = self.rows.iter().map(|row| row.engagement()).sum();

        let unique_verified_accounts = unique_verified.len();
        let unique_100kplus_accounts = unique_100kplus.len();

        // Stable sort: equal engagement keeps arrival order.
        let mut ranked = self.rows;
        ranked.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
        let top_tweets = ranked
            .into_iter()
            .take(TOP_TWEETS_LIMIT)
            .map(TopTweetView::from_row)
            .collect();

        CoinReport {
            symbol: symbol.to_string(),
            query: query.to_string(),
            window_start: window_start.to_string(),
            mentions,
            unique_verified_accounts,
            unique_100kplus_accounts,
            total_engagements,
            top_tweets,
        }
    }
}
