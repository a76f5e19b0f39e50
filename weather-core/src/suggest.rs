//! Debounced place-name suggestions.
//!
//! Every keystroke calls [`SuggestionFetcher::fetch`]. Each call takes a new
//! sequence number and waits out the debounce window; only a call that is
//! still the newest when its window closes reaches the provider. In-flight
//! requests are never aborted, so results carry their sequence number and
//! the session drops any that arrive after a newer one was applied.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use tracing::{debug, warn};

use crate::{
    model::PlaceSuggestion,
    provider::{SUGGESTION_LIMIT, WeatherProvider},
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// What a single [`SuggestionFetcher::fetch`] call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionUpdate {
    /// Query was empty: clear the list, no request was made.
    Cleared { seq: u64 },
    /// A newer keystroke arrived inside the debounce window.
    Superseded,
    /// The request failed; keep whatever is currently shown.
    Failed,
    Ready { seq: u64, suggestions: Vec<PlaceSuggestion> },
}

#[derive(Debug)]
pub struct SuggestionFetcher {
    debounce: Duration,
    generation: AtomicU64,
}

impl Default for SuggestionFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SuggestionFetcher {
    pub fn new(debounce: Duration) -> Self {
        Self { debounce, generation: AtomicU64::new(0) }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub async fn fetch<P>(&self, provider: &P, query: &str) -> SuggestionUpdate
    where
        P: WeatherProvider + ?Sized,
    {
        let seq = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.is_empty() {
            return SuggestionUpdate::Cleared { seq };
        }

        tokio::time::sleep(self.debounce).await;

        if self.generation.load(Ordering::SeqCst) != seq {
            debug!(seq, query, "suggestion request superseded");
            return SuggestionUpdate::Superseded;
        }

        match provider.suggest_places(query).await {
            Ok(places) => {
                let suggestions: Vec<_> = places
                    .into_iter()
                    .filter(|p| !p.name.trim().is_empty())
                    .take(SUGGESTION_LIMIT)
                    .collect();
                debug!(seq, query, count = suggestions.len(), "suggestions received");
                SuggestionUpdate::Ready { seq, suggestions }
            }
            Err(err) => {
                warn!(error = %err, query, "suggestion lookup failed");
                SuggestionUpdate::Failed
            }
        }
    }
}
