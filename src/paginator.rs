// src/paginator.rs

use futures::stream::{self, Stream};

use crate::api::{Tweet, User};
use crate::error::Result;
use crate::session::SearchSource;

/// One page of search results together with the author batch attached to it.
#[derive(Debug, Default)]
pub struct Page {
    pub tweets: Vec<Tweet>,
    pub users: Vec<User>,
}

/// Walks the `next_token` cursor chain for one query. The paginator never
/// caps volume itself; the consumer enforces its own cap.
pub struct SearchPaginator<S> {
    source: S,
    query: String,
    start_time: String,
    page_size: u32,
    next_token: Option<String>,
    exhausted: bool,
}

impl<S: SearchSource> SearchPaginator<S> {
    pub fn new(source: S, query: String, start_time: String, page_size: u32) -> Self {
        SearchPaginator {
            source,
            query,
            start_time,
            page_size,
            next_token: None,
            exhausted: false,
        }
    }

    /// Fetches the next page, or `None` once the cursor chain ends.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        if self.exhausted {
            return Ok(None);
        }

        let response = self
            .source
            .search_page(
                &self.query,
                &self.start_time,
                self.page_size,
                self.next_token.as_deref(),
            )
            .await?;

        self.next_token = response
            .meta
            .as_ref()
            .and_then(|meta| meta.next_token.clone());
        if self.next_token.is_none() {
            self.exhausted = true;
        }

        let tweets = response.data;
        let users = response
            .includes
            .map(|includes| includes.users)
            .unwrap_or_default();

        if tweets.is_empty() && self.exhausted {
            return Ok(None);
        }

        Ok(Some(Page { tweets, users }))
    }

    /// The page sequence as a lazy stream; each item suspends on one fetch.
    pub fn pages(self) -> impl Stream<Item = Result<Page>> {
        stream::try_unfold(self, |mut paginator| async move {
            match paginator.next_page().await? {
                Some(page) => Ok(Some((page, paginator))),
                None => Ok(None),
            }
        })
    }
}
