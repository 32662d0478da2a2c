use crate::{
    aggregator,
    error::DashboardError,
    provider::WeatherApi,
    resolver,
    state::DashboardState,
    units::UnitSystem,
};

/// What a submitted search led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing happened.
    Ignored,
    /// A single location matched and its weather is now displayed.
    Loaded,
    /// Several locations matched; call [`Dashboard::select`] with one of them.
    Choose(usize),
}

/// Drives resolve and fetch actions against a [`DashboardState`].
#[derive(Debug)]
pub struct Dashboard<A> {
    api: A,
    units: UnitSystem,
    state: DashboardState,
}

impl<A: WeatherApi> Dashboard<A> {
    pub fn new(api: A, units: UnitSystem) -> Self {
        Self {
            api,
            units,
            state: DashboardState::new(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Resolve `input`; fetch straight away when exactly one location matches.
    pub async fn submit(&mut self, input: &str) -> Result<Submission, DashboardError> {
        self.state.set_input(input);
        if input.trim().is_empty() {
            return Ok(Submission::Ignored);
        }

        let candidates = match resolver::resolve(&self.api, input).await {
            Ok(candidates) => candidates,
            Err(e) => {
                let err = DashboardError::from(e);
                self.state.on_resolve_failure(&err);
                return Err(err);
            }
        };

        let count = candidates.len();
        self.state.on_resolve_success(candidates);

        if count == 1 {
            self.select(0).await?;
            Ok(Submission::Loaded)
        } else {
            Ok(Submission::Choose(count))
        }
    }

    /// Fetch weather for the candidate at `index` in the current list.
    pub async fn select(&mut self, index: usize) -> Result<(), DashboardError> {
        let candidates = self.state.candidates();
        let location = candidates
            .get(index)
            .cloned()
            .ok_or(DashboardError::InvalidSelection {
                index,
                available: candidates.len(),
            })?;

        let ticket = self.state.begin_fetch();
        match aggregator::fetch(&self.api, &location, self.units).await {
            Ok(snapshot) => {
                self.state.on_fetch_success(ticket, snapshot);
                Ok(())
            }
            Err(e) => {
                let err = DashboardError::from(e);
                self.state.on_fetch_failure(ticket, &err);
                Err(err)
            }
        }
    }
}
