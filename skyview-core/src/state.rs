//! Presentation state of the dashboard and its transitions.
//!
//! Every transition says what happens to every field. Fetch results carry
//! the [`FetchTicket`] they were issued with and are dropped unless that
//! ticket is still the most recent one.

use crate::{
    error::DashboardError,
    model::{LocationCandidate, WeatherSnapshot},
};

/// Theme used when no snapshot is displayed.
pub const IDLE_THEME: &str = "home";

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct DashboardState {
    input: String,
    candidates: Vec<LocationCandidate>,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
    latest_request: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        &self.candidates
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when several candidates are listed and the user must choose.
    pub fn needs_selection(&self) -> bool {
        self.candidates.len() > 1
    }

    /// Condition category of the displayed snapshot, or [`IDLE_THEME`].
    pub fn theme(&self) -> &str {
        self.snapshot
            .as_ref()
            .map(|s| s.current.condition_category.as_str())
            .unwrap_or(IDLE_THEME)
    }

    /// Back to the initial screen. Fetches still in flight will be ignored.
    pub fn reset(&mut self) {
        self.input.clear();
        self.candidates.clear();
        self.snapshot = None;
        self.error = None;
        self.latest_request += 1;
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// New candidate list. The displayed snapshot stays until a fetch replaces it.
    pub fn on_resolve_success(&mut self, candidates: Vec<LocationCandidate>) {
        self.candidates = candidates;
        self.error = None;
    }

    /// Clears candidates and any displayed weather.
    pub fn on_resolve_failure(&mut self, error: &DashboardError) {
        self.candidates.clear();
        self.snapshot = None;
        self.error = Some(error.user_message().to_string());
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_request += 1;
        FetchTicket(self.latest_request)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest_request
    }

    /// Returns false, changing nothing, if `ticket` has been superseded.
    pub fn on_fetch_success(&mut self, ticket: FetchTicket, snapshot: WeatherSnapshot) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.snapshot = Some(snapshot);
        self.error = None;
        true
    }

    /// Returns false, changing nothing, if `ticket` has been superseded.
    /// Otherwise drops the snapshot but keeps the candidates so another one can be picked.
    pub fn on_fetch_failure(&mut self, ticket: FetchTicket, error: &DashboardError) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        self.snapshot = None;
        self.error = Some(error.user_message().to_string());
        true
    }

    fn accept(&self, ticket: FetchTicket) -> bool {
        let current = self.is_current(ticket);
        if !current {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest_request,
                "dropping stale fetch result"
            );
        }
        current
    }
}
