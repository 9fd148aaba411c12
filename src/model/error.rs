//! Error taxonomy for the suggestion flow

use thiserror::Error;

/// Failures talking to the AI service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("service returned no content")]
    EmptyResponse,
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            ServiceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Parse(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Add at least one ingredient or a photo first.")]
    NoInput,
    #[error("Could not get dish suggestions: {0}")]
    SuggestionFetch(#[source] ServiceError),
    #[error("Could not get the recipe: {0}")]
    DetailFetch(#[source] ServiceError),
    #[error("Could not load more suggestions: {0}")]
    PaginationFetch(#[source] ServiceError),
}

impl RecipeError {
    /// Re-tag a suggestion failure that happened while paginating
    pub fn into_pagination(self) -> Self {
        match self {
            RecipeError::SuggestionFetch(e) => RecipeError::PaginationFetch(e),
            other => other,
        }
    }

    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            RecipeError::NoInput => None,
            RecipeError::SuggestionFetch(e)
            | RecipeError::DetailFetch(e)
            | RecipeError::PaginationFetch(e) => Some(e),
        }
    }
}
