use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the upstream weather API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} has no match for the query")]
    NotFound { endpoint: &'static str },
}

/// Which geocoding path a lookup took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Code,
    Name,
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no location matches '{query}'")]
    NotFound { query: String, kind: LookupKind },

    #[error("invalid location input: {0}")]
    InvalidInput(String),

    #[error("location lookup failed: {source}")]
    Upstream {
        kind: LookupKind,
        #[source]
        source: ApiError,
    },
}

impl ResolutionError {
    pub fn kind(&self) -> Option<LookupKind> {
        match self {
            ResolutionError::NotFound { kind, .. } | ResolutionError::Upstream { kind, .. } => {
                Some(*kind)
            }
            ResolutionError::InvalidInput(_) => None,
        }
    }
}

/// Sub-fetch of the aggregator that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherPart {
    Current,
    Forecast,
    UvIndex,
}

impl std::fmt::Display for WeatherPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WeatherPart::Current => "current conditions",
            WeatherPart::Forecast => "forecast",
            WeatherPart::UvIndex => "UV index",
        })
    }
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("failed to fetch {part}: {source}")]
    Fetch {
        part: WeatherPart,
        #[source]
        source: ApiError,
    },

    #[error("malformed {part} payload: {reason}")]
    Malformed { part: WeatherPart, reason: String },
}

impl AggregationError {
    pub fn part(&self) -> WeatherPart {
        match self {
            AggregationError::Fetch { part, .. } | AggregationError::Malformed { part, .. } => *part,
        }
    }
}

/// Anything a single dashboard action can fail with.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Resolve(#[from] ResolutionError),

    #[error(transparent)]
    Aggregate(#[from] AggregationError),

    #[error("no location at index {index}; {available} to choose from")]
    InvalidSelection { index: usize, available: usize },
}

impl DashboardError {
    /// The one line shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            DashboardError::Resolve(ResolutionError::NotFound {
                kind: LookupKind::Name,
                ..
            }) => "No locations found.",
            DashboardError::Resolve(ResolutionError::InvalidInput(_)) => {
                "Please enter a city name or ZIP code."
            }
            DashboardError::Resolve(e) if e.kind() == Some(LookupKind::Code) => {
                "Invalid ZIP code. Please try again."
            }
            DashboardError::Resolve(_) => "Couldn't find the city. Please check the spelling.",
            DashboardError::Aggregate(_) => "Error fetching weather data.",
            DashboardError::InvalidSelection { .. } => "Please choose one of the listed locations.",
        }
    }
}
