//! Search-box state and the transitions that change it.
//!
//! A [`WeatherReport`] carries current conditions and forecast together, so a
//! failed lookup can only ever clear both.

use tracing::{debug, info, warn};

use crate::{
    error::{LOOKUP_FAILED_MESSAGE, WeatherError},
    forecast::ForecastSeries,
    model::{CurrentConditions, PlaceSuggestion, WeatherReport},
    suggest::SuggestionUpdate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Loaded(WeatherReport),
    Failed(String),
}

/// Identifies one lookup; only the newest ticket may finish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct WeatherSession {
    query: String,
    suggestions: Vec<PlaceSuggestion>,
    panel: PanelVisibility,
    status: LookupStatus,
    last_suggestion_seq: u64,
    lookup_generation: u64,
}

impl WeatherSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[PlaceSuggestion] {
        &self.suggestions
    }

    pub fn panel(&self) -> PanelVisibility {
        self.panel
    }

    /// The panel is drawn only when it is open and has something to show.
    pub fn suggestions_visible(&self) -> bool {
        self.panel == PanelVisibility::Visible && !self.suggestions.is_empty()
    }

    pub fn status(&self) -> &LookupStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LookupStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LookupStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.status {
            LookupStatus::Loaded(report) => Some(report),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.report().map(|r| &r.current)
    }

    pub fn forecast(&self) -> Option<&ForecastSeries> {
        self.report().map(|r| &r.forecast)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Apply the outcome of a suggestion fetch. Returns whether the visible
    /// list changed hands; results older than the last applied one are dropped.
    pub fn apply_suggestions(&mut self, update: SuggestionUpdate) -> bool {
        match update {
            SuggestionUpdate::Cleared { seq } => {
                if seq < self.last_suggestion_seq {
                    return false;
                }
                self.last_suggestion_seq = seq;
                self.suggestions.clear();
                true
            }
            SuggestionUpdate::Ready { seq, suggestions } => {
                if seq < self.last_suggestion_seq {
                    debug!(seq, latest = self.last_suggestion_seq, "dropping stale suggestions");
                    return false;
                }
                self.last_suggestion_seq = seq;
                if !suggestions.is_empty() {
                    self.panel = PanelVisibility::Visible;
                }
                self.suggestions = suggestions;
                true
            }
            SuggestionUpdate::Superseded | SuggestionUpdate::Failed => false,
        }
    }

    /// Focusing the search box reopens the panel when there is a query.
    pub fn focus(&mut self) {
        if !self.query.is_empty() {
            self.panel = PanelVisibility::Visible;
        }
    }

    pub fn outside_click(&mut self) {
        self.panel = PanelVisibility::Hidden;
    }

    /// Put the suggestion into the search box and close the panel. Returns
    /// the new query.
    pub fn select_suggestion(&mut self, suggestion: &PlaceSuggestion) -> String {
        self.query = suggestion.query();
        self.panel = PanelVisibility::Hidden;
        self.query.clone()
    }

    /// Start a lookup for the current query. `None` when the query is empty.
    pub fn begin_lookup(&mut self) -> Option<(LookupTicket, String)> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.lookup_generation += 1;
        self.panel = PanelVisibility::Hidden;
        self.status = LookupStatus::Loading;

        Some((LookupTicket(self.lookup_generation), self.query.clone()))
    }

    /// Finish a lookup. Any error becomes the single user-facing message.
    /// Returns `false` if a newer lookup has started since `ticket` was issued.
    pub fn finish_lookup(
        &mut self,
        ticket: LookupTicket,
        result: Result<WeatherReport, WeatherError>,
    ) -> bool {
        if ticket.0 != self.lookup_generation {
            debug!(ticket = ticket.0, latest = self.lookup_generation, "dropping stale lookup");
            return false;
        }

        self.status = match result {
            Ok(report) => {
                info!(
                    location = %report.current.location_name,
                    days = report.forecast.len(),
                    "lookup succeeded"
                );
                LookupStatus::Loaded(report)
            }
            Err(err) => {
                warn!(error = %err, query = %self.query, "lookup failed");
                LookupStatus::Failed(LOOKUP_FAILED_MESSAGE.to_string())
            }
        };
        true
    }
}
