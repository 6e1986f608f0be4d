use thiserror::Error;

/// Message shown when a search is submitted without any ingredient selected
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one ingredient.";

/// Errors that can occur while loading ingredients or searching for recipes
#[derive(Error, Debug)]
pub enum FinderError {
    /// Transport failure, non-success status or undecodable response body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// One of the fan-out requests of a recipe search failed
    #[error("Recipe search failed: {0}")]
    Search(#[source] Box<FinderError>),

    /// Invalid form input; nothing was sent over the network
    #[error("{0}")]
    Validation(String),

    /// Reading or writing the result store failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The result store holds something that is not a recipe list
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    Builder(String),
}

impl FinderError {
    /// Wrap an error raised inside a search fan-out
    pub fn search(source: FinderError) -> Self {
        match source {
            already @ FinderError::Search(_) => already,
            other => FinderError::Search(Box::new(other)),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FinderError::Validation(_))
    }
}
