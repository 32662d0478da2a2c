//! Free-text location input to geocoded candidates.

use crate::{
    error::{ApiError, LookupKind, ResolutionError},
    model::LocationCandidate,
    provider::WeatherApi,
};

/// Upper bound on candidates returned by a name search.
pub const MAX_CANDIDATES: usize = 5;
const MAX_INPUT_LEN: usize = 100;

/// How an input string will be looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationQuery<'a> {
    /// Numeric input, looked up as a ZIP/postal code.
    Code(&'a str),
    Name(&'a str),
}

impl<'a> LocationQuery<'a> {
    /// Numeric input takes the code path, everything else the name path.
    pub fn classify(input: &'a str) -> Result<Self, ResolutionError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(ResolutionError::InvalidInput("input is empty".into()));
        }
        if trimmed.chars().count() > MAX_INPUT_LEN {
            return Err(ResolutionError::InvalidInput(format!(
                "input is longer than {MAX_INPUT_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ResolutionError::InvalidInput(
                "input contains control characters".into(),
            ));
        }

        let numeric = trimmed.parse::<f64>().is_ok_and(f64::is_finite);
        Ok(if numeric {
            LocationQuery::Code(trimmed)
        } else {
            LocationQuery::Name(trimmed)
        })
    }

    pub fn kind(&self) -> LookupKind {
        match self {
            LocationQuery::Code(_) => LookupKind::Code,
            LocationQuery::Name(_) => LookupKind::Name,
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            LocationQuery::Code(s) | LocationQuery::Name(s) => s,
        }
    }
}

/// Resolve `input` into candidates. Never picks among several matches.
pub async fn resolve<A>(api: &A, input: &str) -> Result<Vec<LocationCandidate>, ResolutionError>
where
    A: WeatherApi + ?Sized,
{
    let query = LocationQuery::classify(input)?;
    let kind = query.kind();

    let candidates = match query {
        LocationQuery::Code(code) => match api.geocode_by_code(code).await {
            Ok(candidate) => vec![candidate],
            Err(ApiError::NotFound { .. }) => Vec::new(),
            Err(source) => return Err(ResolutionError::Upstream { kind, source }),
        },
        LocationQuery::Name(name) => {
            let mut found = api
                .geocode_by_name(name, MAX_CANDIDATES)
                .await
                .map_err(|source| ResolutionError::Upstream { kind, source })?;
            found.truncate(MAX_CANDIDATES);
            found
        }
    };

    if candidates.is_empty() {
        tracing::info!(query = query.as_str(), ?kind, "no location found");
        return Err(ResolutionError::NotFound {
            query: query.as_str().to_string(),
            kind,
        });
    }

    tracing::info!(
        query = query.as_str(),
        ?kind,
        count = candidates.len(),
        "resolved location"
    );
    Ok(candidates)
}
