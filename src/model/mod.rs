//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Screen and view-only UI state
//! - `recipe`: Ingredients, dish suggestions and recipe details
//! - `error`: Error taxonomy for the suggestion flow
//! - `session`: The screen state machine and pagination flags
//! - `schema`: Prompts and response schemas for the AI service
//! - `recipe_client`: AI service client
//! - `app_model`: Main application model with state management methods

mod types;
mod recipe;
mod error;
mod session;
mod schema;
mod recipe_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{InputFocus, Screen, UiState};

pub use recipe::{CapturedImage, RecipeDetail};

#[cfg(test)]
pub use recipe::{Alternative, Difficulty, DishSuggestion, Substitution};

pub use error::{RecipeError, ServiceError};

pub use session::{Outcome, Session};

pub use recipe_client::GeminiRecipeClient;

#[cfg(test)]
pub use recipe_client::RecipeClient;

pub use app_model::AppModel;
