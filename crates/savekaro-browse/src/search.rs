//! Header search box: debounced free-text product search.

use crate::debounce::Debouncer;
use savekaro_catalog::catalog::Product;
use savekaro_data::ProductSearch;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What the search dropdown shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text as typed.
    pub query: String,
    pub results: Vec<Product>,
    /// A request is in flight.
    pub loading: bool,
}

/// Search input that queries the backend after typing pauses.
///
/// State is published on a watch channel; see [`SearchBox::subscribe`].
pub struct SearchBox<S: ?Sized> {
    source: Arc<S>,
    debouncer: Debouncer,
    state: Arc<watch::Sender<SearchState>>,
}

impl<S: ProductSearch + ?Sized + 'static> SearchBox<S> {
    pub fn new(source: Arc<S>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            source,
            debouncer: Debouncer::new(delay),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Handle a change of the input text.
    ///
    /// A blank query clears the results at once. Anything else is searched
    /// after the debounce delay, unless more input arrives first.
    pub fn input(&mut self, query: &str) {
        self.debouncer.cancel();

        if query.trim().is_empty() {
            self.state.send_modify(|s| {
                s.query = query.to_string();
                s.results.clear();
                s.loading = false;
            });
            return;
        }

        self.state.send_modify(|s| s.query = query.to_string());

        let source = self.source.clone();
        let state = self.state.clone();
        let query = query.to_string();
        self.debouncer.schedule(async move {
            state.send_modify(|s| s.loading = true);
            let results = match source.search(&query).await {
                Ok(results) => {
                    debug!(query = %query, count = results.len(), "Search completed");
                    results
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "Search failed");
                    Vec::new()
                }
            };
            state.send_modify(|s| {
                s.results = results;
                s.loading = false;
            });
        });
    }

    /// Close the search box: cancel anything pending and reset.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.state.send_replace(SearchState::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use savekaro_data::FetchError;
    use std::sync::Mutex;
    use tokio::time::sleep;

    #[derive(Default)]
    struct RecordingSearch {
        queries: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ProductSearch for RecordingSearch {
        async fn search(&self, query: &str) -> Result<Vec<Product>, FetchError> {
            self.queries.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(FetchError::HttpError {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(vec![Product::new("p1", format!("{} result", query), "Khaadi")])
        }
    }

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_typing_sends_one_request() {
        let source = Arc::new(RecordingSearch::default());
        let mut search = SearchBox::new(source.clone(), DELAY);

        for query in ["l", "la", "law", "lawn"] {
            search.input(query);
            sleep(Duration::from_millis(100)).await;
        }
        assert!(source.queries.lock().unwrap().is_empty());

        sleep(Duration::from_millis(300)).await;
        assert_eq!(*source.queries.lock().unwrap(), vec!["lawn"]);

        let state = search.snapshot();
        assert_eq!(state.query, "lawn");
        assert_eq!(state.results.len(), 1);
        assert!(!state.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_request() {
        let source = Arc::new(RecordingSearch::default());
        let mut search = SearchBox::new(source.clone(), DELAY);

        search.input("kurta");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(search.snapshot().results.len(), 1);

        search.input("   ");
        assert!(search.snapshot().results.is_empty());
        sleep(Duration::from_millis(400)).await;
        assert_eq!(source.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_publishes_empty_results() {
        let source = Arc::new(RecordingSearch {
            fail: true,
            ..Default::default()
        });
        let mut search = SearchBox::new(source, DELAY);
        let mut rx = search.subscribe();

        search.input("jeans");
        sleep(Duration::from_millis(400)).await;
        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }
}
