// src/report.rs

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::aggregator::EnrichedRow;
use crate::error::Result;

/// Read-only projection of a top-ranked row for downstream display.
#[derive(Debug, Clone, Serialize)]
pub struct TopTweetView {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_username: Option<String>,
    pub verified: bool,
    pub followers: u64,
    pub engagement: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TopTweetView {
    pub fn from_row(row: EnrichedRow) -> Self {
        // Canonical permalink when the author is known, generic status
        // lookup otherwise.
        let url = match &row.author_username {
            Some(username) => format!("https://twitter.com/{}/status/{}", username, row.id),
            None => format!("https://twitter.com/i/web/status/{}", row.id),
        };
        TopTweetView {
            engagement: row.engagement(),
            url,
            id: row.id,
            author_username: row.author_username,
            verified: row.author_verified,
            followers: row.author_followers,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinReport {
    pub symbol: String,
    pub query: String,
    pub window_start: String,
    pub mentions: usize,
    pub unique_verified_accounts: usize,
    pub unique_100kplus_accounts: usize,
    pub total_engagements: u64,
    pub top_tweets: Vec<TopTweetView>,
}

/// Per-coin outcome. Serializes untagged so a failed coin appears as
/// `{"symbol": ..., "error": ...}` next to full reports.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CoinResult {
    Report(CoinReport),
    Failed { symbol: String, error: String },
}

impl CoinResult {
    pub fn symbol(&self) -> &str {
        match self {
            CoinResult::Report(report) => &report.symbol,
            CoinResult::Failed { symbol, .. } => symbol,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CoinResult::Failed { .. })
    }
}

/// The single output artifact of one run; never mutated after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotReport {
    pub generated_at: String,
    pub window_days: i64,
    pub coins: Vec<CoinResult>,
}

impl SnapshotReport {
    pub fn assemble(window_days: i64, coins: Vec<CoinResult>) -> Self {
        SnapshotReport {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            window_days,
            coins,
        }
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        Ok(())
    }
}
