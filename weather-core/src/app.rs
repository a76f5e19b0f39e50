//! Ties a provider, a session and the suggestion fetcher together.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tracing::debug;

use crate::{
    Config,
    error::Result,
    forecast::normalize_forecast,
    model::{PlaceSuggestion, WeatherReport},
    pointer::{PointerHub, Subscription},
    provider::WeatherProvider,
    render::RenderModel,
    session::WeatherSession,
    suggest::SuggestionFetcher,
};

pub const DEFAULT_SELECTION_DELAY: Duration = Duration::from_millis(100);

/// Fetch current conditions and forecast concurrently and combine them.
/// Fails as soon as either request fails.
pub async fn lookup<P>(provider: &P, query: &str) -> Result<WeatherReport>
where
    P: WeatherProvider + ?Sized,
{
    let (current, records) =
        tokio::try_join!(provider.current_conditions(query), provider.forecast(query))?;

    Ok(WeatherReport { current, forecast: normalize_forecast(records) })
}

#[derive(Debug)]
pub struct WeatherApp<P> {
    provider: Arc<P>,
    session: Arc<Mutex<WeatherSession>>,
    fetcher: SuggestionFetcher,
    selection_delay: Duration,
}

impl<P: WeatherProvider> WeatherApp<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        Self::with_timings(provider, config.debounce(), config.selection_delay())
    }

    pub fn with_timings(provider: P, debounce: Duration, selection_delay: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            session: Arc::new(Mutex::new(WeatherSession::new())),
            fetcher: SuggestionFetcher::new(debounce),
            selection_delay,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Copy of the current session state.
    pub fn session(&self) -> WeatherSession {
        self.session.lock().clone()
    }

    pub fn render(&self) -> RenderModel {
        RenderModel::from_session(&self.session.lock())
    }

    /// Set the query without asking for suggestions.
    pub fn set_query(&self, query: &str) {
        self.session.lock().set_query(query);
    }

    /// Handle a keystroke: update the query, then fetch suggestions once the
    /// debounce window has passed. Returns whether the suggestion list changed.
    pub async fn query_changed(&self, query: &str) -> bool {
        self.session.lock().set_query(query);

        let update = self.fetcher.fetch(&*self.provider, query).await;
        self.session.lock().apply_suggestions(update)
    }

    pub fn focus(&self) {
        self.session.lock().focus();
    }

    /// Run a full lookup for the current query. Returns `false` when nothing
    /// was looked up or a newer lookup finished first.
    pub async fn submit(&self) -> bool {
        let begun = self.session.lock().begin_lookup();
        let Some((ticket, query)) = begun else {
            debug!("empty query, lookup skipped");
            return false;
        };

        let result = lookup(&*self.provider, &query).await;
        self.session.lock().finish_lookup(ticket, result)
    }

    /// Pick a suggestion, then look it up after the selection delay.
    pub async fn select_suggestion(&self, suggestion: &PlaceSuggestion) -> bool {
        let query = self.session.lock().select_suggestion(suggestion);
        debug!(%query, "suggestion selected");

        tokio::time::sleep(self.selection_delay).await;
        self.submit().await
    }

    /// Attach the outside-click detector for the suggestion panel. The
    /// listener stays attached for as long as the returned subscription lives.
    pub fn mount_outside_click(&self, hub: &PointerHub) -> Subscription {
        let session = Arc::downgrade(&self.session);
        hub.subscribe(move |event| {
            if !event.is_outside() {
                return;
            }
            if let Some(session) = session.upgrade() {
                session.lock().outside_click();
            }
        })
    }
}
