//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and drives the AI requests.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Submit, dish selection, back and reset
//! - `pagination`: Incremental suggestion loading

mod input;
mod navigation;
mod pagination;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AppModel, RecipeError, ServiceError};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_error(error: &RecipeError) -> String {
        let service_error = error.service_error();

        // Handle common AI service errors
        match service_error.and_then(ServiceError::status) {
            Some(401) | Some(403) => {
                "The AI service rejected the API key. Check GEMINI_API_KEY.".to_string()
            }
            Some(400)
                if matches!(service_error, Some(ServiceError::Status { body, .. }) if body.contains("API key not valid")) =>
            {
                "The AI service rejected the API key. Check GEMINI_API_KEY.".to_string()
            }
            Some(429) => "Rate limited by the AI service. Please wait a moment.".to_string(),
            Some(status) if status >= 500 => {
                "The AI service is unavailable right now. Please try again.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::model::{
        Alternative, CapturedImage, Difficulty, DishSuggestion, RecipeClient, RecipeDetail,
        Screen, Substitution,
    };

    /// Scripted client. Each call pops the next queued response; a gate, when
    /// set, holds the call until the test releases it.
    #[derive(Default)]
    pub(crate) struct FakeClient {
        suggestions: std::sync::Mutex<VecDeque<Result<Vec<DishSuggestion>, RecipeError>>>,
        details: std::sync::Mutex<VecDeque<Result<RecipeDetail, RecipeError>>>,
        excludes: std::sync::Mutex<Vec<Vec<String>>>,
        suggest_calls: AtomicUsize,
        detail_calls: AtomicUsize,
        suggest_gate: Option<Arc<Notify>>,
        detail_gate: Option<Arc<Notify>>,
    }

    impl FakeClient {
        pub(crate) fn with_suggest_gate(mut self, gate: Arc<Notify>) -> Self {
            self.suggest_gate = Some(gate);
            self
        }

        pub(crate) fn with_detail_gate(mut self, gate: Arc<Notify>) -> Self {
            self.detail_gate = Some(gate);
            self
        }

        pub(crate) fn push_suggestions(&self, result: Result<Vec<DishSuggestion>, RecipeError>) {
            self.suggestions.lock().unwrap().push_back(result);
        }

        pub(crate) fn push_detail(&self, result: Result<RecipeDetail, RecipeError>) {
            self.details.lock().unwrap().push_back(result);
        }

        pub(crate) fn suggest_calls(&self) -> usize {
            self.suggest_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn detail_calls(&self) -> usize {
            self.detail_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn excludes(&self) -> Vec<Vec<String>> {
            self.excludes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecipeClient for FakeClient {
        async fn suggest_dishes(
            &self,
            _ingredients: &[String],
            _image: Option<&CapturedImage>,
            exclude: &[String],
        ) -> Result<Vec<DishSuggestion>, RecipeError> {
            self.suggest_calls.fetch_add(1, Ordering::SeqCst);
            self.excludes.lock().unwrap().push(exclude.to_vec());
            if let Some(gate) = &self.suggest_gate {
                gate.notified().await;
            }
            let next = self.suggestions.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn fetch_recipe_detail(
            &self,
            _dish: &DishSuggestion,
            _ingredients: &[String],
        ) -> Result<RecipeDetail, RecipeError> {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.detail_gate {
                gate.notified().await;
            }
            let next = self.details.lock().unwrap().pop_front();
            next.unwrap_or(Err(RecipeError::DetailFetch(ServiceError::EmptyResponse)))
        }
    }

    pub(crate) fn dishes(names: &[&str]) -> Vec<DishSuggestion> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| DishSuggestion {
                id: (i + 1).to_string(),
                name: name.to_string(),
                description: format!("{} description", name),
                prep_time: "30 minutes".to_string(),
                difficulty: Difficulty::Easy,
            })
            .collect()
    }

    pub(crate) fn recipe(name: &str) -> RecipeDetail {
        RecipeDetail {
            name: name.to_string(),
            ingredients: vec!["2 chicken breasts".to_string(), "200g spinach".to_string()],
            instructions: vec![
                "Dice the chicken".to_string(),
                "Brown it in oil".to_string(),
                "Stir in the spinach".to_string(),
            ],
            tips: vec!["Season at the end".to_string()],
            substitutions: vec![
                Substitution {
                    original: "chicken".to_string(),
                    alternatives: vec![Alternative {
                        name: "chickpeas".to_string(),
                        effect: "vegetarian, firmer bite".to_string(),
                    }],
                },
                Substitution {
                    original: "spinach".to_string(),
                    alternatives: vec![Alternative {
                        name: "chard".to_string(),
                        effect: "earthier".to_string(),
                    }],
                },
            ],
            youtube_search_url: None,
            sources: None,
        }
    }

    pub(crate) fn controller_with(client: Arc<FakeClient>) -> AppController {
        let mut model = AppModel::new();
        model.set_client(client);
        AppController::new(Arc::new(Mutex::new(model)))
    }

    pub(crate) async fn add_ingredients(controller: &AppController, names: &[&str]) {
        let model = controller.model.lock().await;
        let mut session = model.session.lock().await;
        for name in names {
            session.add_ingredient(name);
        }
    }

    pub(crate) async fn session_screen(controller: &AppController) -> Screen {
        controller.model.lock().await.screen().await
    }

    /// Yield until the fake has seen `calls` requests
    pub(crate) async fn wait_for_calls(count: impl Fn() -> usize, calls: usize) {
        for _ in 0..1000 {
            if count() >= calls {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("fake client never reached {} calls", calls);
    }

    #[test]
    fn format_error_maps_status_codes() {
        let unavailable = RecipeError::SuggestionFetch(ServiceError::Status {
            status: 503,
            body: "overloaded".to_string(),
        });
        assert!(AppController::format_error(&unavailable).contains("unavailable"));

        let limited = RecipeError::DetailFetch(ServiceError::Status {
            status: 429,
            body: String::new(),
        });
        assert!(AppController::format_error(&limited).contains("Rate limited"));

        let bad_key = RecipeError::SuggestionFetch(ServiceError::Status {
            status: 400,
            body: "API key not valid. Please pass a valid API key.".to_string(),
        });
        assert!(AppController::format_error(&bad_key).contains("GEMINI_API_KEY"));
    }

    #[test]
    fn format_error_falls_back_to_the_error_text() {
        let parse = RecipeError::DetailFetch(ServiceError::Parse("missing field `tips`".to_string()));
        let message = AppController::format_error(&parse);
        assert!(message.starts_with("Could not get the recipe"));
        assert!(message.contains("tips"));
        assert_eq!(
            AppController::format_error(&RecipeError::NoInput),
            RecipeError::NoInput.to_string()
        );
    }
}
