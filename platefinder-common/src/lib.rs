pub mod config;
pub mod logging;
pub use config::{
    ApiConfig, Config, CorruptPolicy, DisplayConfig, LocationConfig, LocationProvider,
    LoggingConfig, StorageConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateFinderError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("no restaurants found")]
    NoResultsFound,
    #[error("restaurant {0} not found")]
    RestaurantNotFound(u64),
    #[error("stored session is malformed: {0}")]
    MalformedStoredState(String),
    #[error("page {0} is out of range")]
    InvalidPage(u32),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

impl PlateFinderError {
    /// Errors that are rendered inline and leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LocationUnavailable(_)
                | Self::NoResultsFound
                | Self::RestaurantNotFound(_)
                | Self::MalformedStoredState(_)
                | Self::InvalidPage(_)
        )
    }

    /// Short message shown to the user in place of the failed view.
    pub fn user_message(&self) -> String {
        match self {
            Self::LocationUnavailable(_) => "Your location is disabled".into(),
            Self::NoResultsFound => "No restaurants found".into(),
            Self::RestaurantNotFound(_) => "This restaurant does not exist".into(),
            Self::MalformedStoredState(_) => "Saved session could not be read".into(),
            Self::InvalidPage(p) => format!("Page {p} does not exist"),
            other => format!("Something went wrong: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlateFinderError>;
