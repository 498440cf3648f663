// tests/paginator_tests.rs

use async_trait::async_trait;
use futures::{pin_mut, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use coinfeed::api::{Includes, Meta, PublicMetrics, SearchResponse, Tweet, User};
use coinfeed::paginator::SearchPaginator;
use coinfeed::{FeedError, SearchSource};

struct ScriptedSource {
    responses: Mutex<VecDeque<Result<SearchResponse, FeedError>>>,
    seen_tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    fn new(responses: Vec<Result<SearchResponse, FeedError>>) -> Self {
        ScriptedSource {
            responses: Mutex::new(responses.into()),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    fn seen_tokens(&self) -> Vec<Option<String>> {
        self.seen_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchSource for ScriptedSource {
    async fn search_page(
        &self,
        _query: &str,
        _start_time: &str,
        _page_size: u32,
        next_token: Option<&str>,
    ) -> Result<SearchResponse, FeedError> {
        self.seen_tokens
            .lock()
            .unwrap()
            .push(next_token.map(|token| token.to_string()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SearchResponse::default()))
    }
}

fn tweet(id: &str) -> Tweet {
    Tweet {
        id: id.to_string(),
        text: format!("tweet {}", id),
        created_at: None,
        lang: None,
        possibly_sensitive: false,
        author_id: Some("a1".to_string()),
        public_metrics: PublicMetrics::default(),
    }
}

fn response(ids: &[&str], users: Vec<User>, next_token: Option<&str>) -> SearchResponse {
    SearchResponse {
        data: ids.iter().map(|id| tweet(id)).collect(),
        includes: Some(Includes { users }),
        meta: Some(Meta {
            next_token: next_token.map(String::from),
            result_count: ids.len() as i64,
        }),
    }
}

fn paginator(source: Arc<ScriptedSource>) -> SearchPaginator<Arc<ScriptedSource>> {
    SearchPaginator::new(
        source,
        "query".to_string(),
        "2026-07-31T00:00:00.000Z".to_string(),
        100,
    )
}

#[tokio::test]
async fn test_follows_next_token_chain() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(response(&["1", "2"], vec![], Some("t1"))),
        Ok(response(&["3"], vec![], None)),
    ]));
    let mut paginator = paginator(Arc::clone(&source));

    let first = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(first.tweets.len(), 2);
    let second = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(second.tweets.len(), 1);
    assert!(paginator.next_page().await.unwrap().is_none());

    // Two fetches only; the cursor from the first page fed the second.
    assert_eq!(
        source.seen_tokens(),
        vec![None, Some("t1".to_string())]
    );
}

#[tokio::test]
async fn test_empty_terminal_page_yields_none() {
    let source = Arc::new(ScriptedSource::new(vec![Ok(response(&[], vec![], None))]));
    let mut paginator = paginator(source);

    assert!(paginator.next_page().await.unwrap().is_none());
    assert!(paginator.next_page().await.unwrap().is_none());
}

#[tokio::test]
async fn test_page_carries_author_batch() {
    let users = vec![User {
        id: "a1".to_string(),
        username: "alice".to_string(),
        name: None,
        verified: true,
        public_metrics: None,
    }];
    let source = Arc::new(ScriptedSource::new(vec![Ok(response(&["1"], users, None))]));
    let mut paginator = paginator(source);

    let page = paginator.next_page().await.unwrap().unwrap();
    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].username, "alice");
}

#[tokio::test]
async fn test_fault_propagates() {
    let source = Arc::new(ScriptedSource::new(vec![Err(FeedError::Api {
        status: 401,
        body: "unauthorized".to_string(),
    })]));
    let mut paginator = paginator(source);

    let result = paginator.next_page().await;
    match result {
        Err(FeedError::Api { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pages_stream_walks_whole_chain() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(response(&["1"], vec![], Some("t1"))),
        Ok(response(&["2"], vec![], Some("t2"))),
        Ok(response(&["3"], vec![], None)),
    ]));
    let stream = paginator(Arc::clone(&source)).pages();
    pin_mut!(stream);

    let mut total_tweets = 0;
    while let Some(page) = stream.next().await {
        total_tweets += page.unwrap().tweets.len();
    }

    assert_eq!(total_tweets, 3);
    assert_eq!(
        source.seen_tokens(),
        vec![None, Some("t1".to_string()), Some("t2".to_string())]
    );
}
