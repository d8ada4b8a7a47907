//! Search request lifecycle: `Idle -> Loading -> Success | Error`.
//!
//! Each call to [`SearchLifecycle::search`] bumps a generation counter and hands
//! back a [`PendingSearch`] carrying that generation. The caller drives the
//! pending request wherever it likes and feeds the [`Resolution`] back through
//! [`SearchLifecycle::apply`]; resolutions from superseded generations are dropped.

use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::ClassifiedError,
    group::group,
    model::{ForecastEntry, ForecastResult, GroupedDay},
    provider::ForecastProvider,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot of the search session exposed to presentation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub phase: SearchPhase,
    /// City of the last successful search.
    pub city: String,
    /// City of the most recent request, successful or not.
    pub requested_city: String,
    pub entries: Vec<ForecastEntry>,
    pub error: Option<ClassifiedError>,
}

impl SearchState {
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Day-grouped view of the current entries, computed on demand.
    pub fn grouped(&self) -> Vec<GroupedDay> {
        group(&self.entries)
    }
}

/// Identity of one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub city: String,
}

/// A search that has been issued but not yet resolved.
#[derive(Debug)]
pub struct PendingSearch {
    ticket: SearchTicket,
    provider: Arc<dyn ForecastProvider>,
}

impl PendingSearch {
    pub fn ticket(&self) -> &SearchTicket {
        &self.ticket
    }

    /// Perform the request. Does not touch any lifecycle state.
    pub async fn resolve(self) -> Resolution {
        let outcome = self.provider.fetch_forecast(&self.ticket.city).await;
        Resolution { ticket: self.ticket, outcome }
    }
}

/// The finished outcome of a [`PendingSearch`].
#[derive(Debug, Clone)]
pub struct Resolution {
    pub ticket: SearchTicket,
    pub outcome: Result<ForecastResult, ClassifiedError>,
}

#[derive(Debug)]
pub struct SearchLifecycle {
    provider: Arc<dyn ForecastProvider>,
    state: SearchState,
    generation: u64,
}

impl SearchLifecycle {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider, state: SearchState::default(), generation: 0 }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Generation of the most recently issued search (0 before any search).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter `Loading` for `city`, superseding whatever was in flight.
    ///
    /// Previously shown entries stay visible while loading; a prior error is cleared.
    /// Surrounding whitespace in `city` is dropped.
    pub fn search(&mut self, city: &str) -> PendingSearch {
        let city = city.trim();
        self.generation += 1;

        self.state.phase = SearchPhase::Loading;
        self.state.requested_city = city.to_string();
        self.state.error = None;

        tracing::debug!(generation = self.generation, city, "search issued");

        PendingSearch {
            ticket: SearchTicket { generation: self.generation, city: city.to_string() },
            provider: Arc::clone(&self.provider),
        }
    }

    /// Apply a resolution. Returns `false` when it belonged to a superseded search.
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        let Resolution { ticket, outcome } = resolution;

        if ticket.generation != self.generation || self.state.phase != SearchPhase::Loading {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                city = %ticket.city,
                "discarding superseded search result"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::debug!(city = %ticket.city, entries = result.entries.len(), "search succeeded");
                self.state.phase = SearchPhase::Success;
                self.state.city = ticket.city;
                self.state.entries = result.entries;
                self.state.error = None;
            }
            Err(err) => {
                tracing::debug!(city = %ticket.city, category = %err.category, "search failed");
                self.state.phase = SearchPhase::Error;
                self.state.entries.clear();
                self.state.error = Some(err);
            }
        }

        true
    }

    /// Issue a search and wait for it, applying the result.
    pub async fn run(&mut self, city: &str) -> &SearchState {
        let pending = self.search(city);
        let resolution = pending.resolve().await;
        self.apply(resolution);
        &self.state
    }

    /// Clear a displayed error and go back to an idle, empty state.
    ///
    /// Has no effect outside the `Error` phase.
    pub fn dismiss_error(&mut self) -> bool {
        if self.state.phase != SearchPhase::Error {
            return false;
        }

        self.state.phase = SearchPhase::Idle;
        self.state.error = None;
        self.state.entries.clear();
        self.state.requested_city.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCategory, Failure, classify};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Answers from a fixed table; unknown cities are "not found".
    #[derive(Debug, Default)]
    struct FakeProvider {
        answers: HashMap<String, Vec<ForecastEntry>>,
    }

    impl FakeProvider {
        fn with(mut self, city: &str, timestamps: &[&str]) -> Self {
            let entries = timestamps.iter().copied().map(entry).collect();
            self.answers.insert(city.to_string(), entries);
            self
        }
    }

    #[async_trait]
    impl ForecastProvider for FakeProvider {
        async fn fetch_forecast(&self, city: &str) -> Result<ForecastResult, ClassifiedError> {
            match self.answers.get(city) {
                Some(entries) => Ok(ForecastResult { success: true, entries: entries.clone(), message: None }),
                None => Err(classify(&Failure::Http { status: 404, server_message: None }, city)),
            }
        }
    }

    fn entry(ts: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: ts.to_string(),
            temperature: 10.0,
            feels_like: 9.0,
            temp_min: 8.0,
            temp_max: 11.0,
            humidity: 60,
            wind_speed: 2.0,
            pressure: 1012.0,
            condition_code: "01d".to_string(),
            condition_description: "clear".to_string(),
            predictions: vec![],
        }
    }

    fn lifecycle(provider: FakeProvider) -> SearchLifecycle {
        SearchLifecycle::new(Arc::new(provider))
    }

    #[test]
    fn starts_idle() {
        let lc = lifecycle(FakeProvider::default());
        assert_eq!(lc.state(), &SearchState::default());
        assert_eq!(lc.state().phase, SearchPhase::Idle);
        assert_eq!(lc.generation(), 0);
    }

    #[test]
    fn search_enters_loading_and_records_city() {
        let mut lc = lifecycle(FakeProvider::default());
        let pending = lc.search("Paris");

        assert_eq!(pending.ticket().generation, 1);
        assert_eq!(lc.state().phase, SearchPhase::Loading);
        assert_eq!(lc.state().requested_city, "Paris");
    }

    #[tokio::test]
    async fn city_is_trimmed_once_on_search() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);

        let pending = lc.search("  Paris ");
        assert_eq!(pending.ticket().city, "Paris");
        assert_eq!(lc.state().requested_city, "Paris");

        assert!(lc.apply(pending.resolve().await));
        assert_eq!(lc.state().phase, SearchPhase::Success);
        assert_eq!(lc.state().city, "Paris");
    }

    #[tokio::test]
    async fn success_stores_entries_and_city() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00", "2024-01-02 09:00:00"]);
        let mut lc = lifecycle(provider);

        let state = lc.run("Paris").await;

        assert_eq!(state.phase, SearchPhase::Success);
        assert_eq!(state.city, "Paris");
        assert_eq!(state.entries.len(), 2);
        assert!(state.error.is_none());
        assert_eq!(state.grouped().len(), 2);
    }

    #[tokio::test]
    async fn failure_clears_entries_and_stores_message() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);
        lc.run("Paris").await;

        let state = lc.run("Atlantis").await;

        assert_eq!(state.phase, SearchPhase::Error);
        assert!(state.entries.is_empty());
        assert_eq!(state.requested_city, "Atlantis");
        assert_eq!(state.error_message(), Some("No forecast found for Atlantis."));
        assert_eq!(state.error.as_ref().map(|e| e.category), Some(ErrorCategory::NotFound));
    }

    #[tokio::test]
    async fn new_search_clears_previous_error() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);
        lc.run("Atlantis").await;

        let _pending = lc.search("Paris");
        assert_eq!(lc.state().phase, SearchPhase::Loading);
        assert!(lc.state().error.is_none());
    }

    #[tokio::test]
    async fn superseded_result_is_discarded() {
        let provider = FakeProvider::default()
            .with("Paris", &["2024-01-01 09:00:00"])
            .with("Tokyo", &["2024-01-01 18:00:00", "2024-01-01 21:00:00"]);
        let mut lc = lifecycle(provider);

        let paris = lc.search("Paris");
        let tokyo = lc.search("Tokyo");

        let paris_done = paris.resolve().await;
        assert!(!lc.apply(paris_done));
        assert_eq!(lc.state().phase, SearchPhase::Loading);
        assert_eq!(lc.state().requested_city, "Tokyo");
        assert!(lc.state().entries.is_empty());

        let tokyo_done = tokyo.resolve().await;
        assert!(lc.apply(tokyo_done));
        assert_eq!(lc.state().phase, SearchPhase::Success);
        assert_eq!(lc.state().city, "Tokyo");
        assert_eq!(lc.state().entries.len(), 2);
    }

    #[tokio::test]
    async fn stale_result_after_newer_one_is_discarded() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);

        let paris = lc.search("Paris");
        let atlantis = lc.search("Atlantis");

        let (paris_done, atlantis_done) = tokio::join!(paris.resolve(), atlantis.resolve());
        assert!(lc.apply(atlantis_done));
        assert!(!lc.apply(paris_done));

        assert_eq!(lc.state().phase, SearchPhase::Error);
        assert!(lc.state().entries.is_empty());
    }

    #[tokio::test]
    async fn resolution_is_applied_only_once() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);

        let done = lc.search("Paris").resolve().await;
        assert!(lc.apply(done.clone()));
        assert!(!lc.apply(done));
    }

    #[tokio::test]
    async fn dismiss_error_returns_to_idle() {
        let mut lc = lifecycle(FakeProvider::default());
        lc.run("Atlantis").await;

        assert!(lc.dismiss_error());
        let state = lc.state();
        assert_eq!(state.phase, SearchPhase::Idle);
        assert!(state.error.is_none());
        assert!(state.entries.is_empty());
        assert!(state.requested_city.is_empty());
    }

    #[tokio::test]
    async fn dismiss_outside_error_is_a_no_op() {
        let provider = FakeProvider::default().with("Paris", &["2024-01-01 09:00:00"]);
        let mut lc = lifecycle(provider);
        lc.run("Paris").await;

        assert!(!lc.dismiss_error());
        assert_eq!(lc.state().phase, SearchPhase::Success);
        assert_eq!(lc.state().entries.len(), 1);
    }
}
