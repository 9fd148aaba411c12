//! Screen transitions: submit, dish selection, back and reset

use crate::image;
use crate::model::{Outcome, Screen};
use super::AppController;

impl AppController {
    /// input -> suggesting -> results (or back to input on failure)
    pub async fn submit(&self) {
        let model = self.model.lock().await;
        let Some(client) = model.get_client() else {
            tracing::error!("Submit without an AI client");
            return;
        };
        let session = model.session.clone();

        let request = match session.lock().await.begin_search() {
            Ok(Some(request)) => request,
            Ok(None) => return,
            Err(e) => {
                tracing::debug!(error = %e, "Submit blocked");
                return;
            }
        };
        model.reset_view_for(Screen::Suggesting).await;
        drop(model);

        tracing::info!(
            generation = request.generation,
            ingredients = request.ingredients.len(),
            has_image = request.image.is_some(),
            "Requesting dish suggestions"
        );

        let result = client
            .suggest_dishes(&request.ingredients, request.image.as_deref(), &request.exclude)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Suggestion request failed");
                Self::format_error(&e)
            });
        let count = result.as_ref().map(Vec::len).ok();

        match session.lock().await.finish_search(request.generation, result) {
            Outcome::Applied => tracing::info!(suggestions = ?count, "Suggestions received"),
            Outcome::Stale => {
                tracing::debug!(generation = request.generation, "Discarded stale suggestions")
            }
        }
    }

    /// results -> loading_recipe -> recipe (or back to results on failure)
    pub async fn select_dish(&self, index: usize) {
        let model = self.model.lock().await;
        let Some(client) = model.get_client() else {
            tracing::error!("Dish selected without an AI client");
            return;
        };
        let session = model.session.clone();
        let Some(request) = session.lock().await.begin_detail(index) else {
            return;
        };
        drop(model);

        tracing::info!(dish = %request.dish.name, "Requesting recipe detail");

        let result = client
            .fetch_recipe_detail(&request.dish, &request.ingredients)
            .await
            .map_err(|e| {
                tracing::error!(dish = %request.dish.name, error = %e, "Recipe request failed");
                Self::format_error(&e)
            });

        let outcome = session.lock().await.finish_detail(request.generation, result);
        match outcome {
            Outcome::Applied => {
                let model = self.model.lock().await;
                model.reset_view_for(model.screen().await).await;
            }
            Outcome::Stale => {
                tracing::debug!(dish = %request.dish.name, "Discarded stale recipe detail")
            }
        }
    }

    pub async fn navigate_back(&self) {
        let model = self.model.lock().await;
        let moved = model.session.lock().await.back();
        if moved {
            let screen = model.screen().await;
            tracing::debug!(?screen, "Navigated back");
            model.reset_view_for(screen).await;
        }
    }

    pub async fn reset(&self) {
        let model = self.model.lock().await;
        let generation = {
            let mut session = model.session.lock().await;
            session.reset();
            session.generation()
        };
        model.close_photo_prompt().await;
        model.reset_view_for(Screen::Input).await;
        tracing::info!(generation, "Session reset");
    }

    /// Load the photo at `path` and attach it to the session
    pub async fn attach_photo(&self, path: String) {
        match image::load_photo(&path).await {
            Ok(photo) => {
                let name = photo.file_name.clone();
                if self.model.lock().await.attach_image(photo).await {
                    tracing::info!(file = %name, "Photo attached");
                }
            }
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Could not attach photo");
                self.model.lock().await.set_error(e.to_string()).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::super::tests::{
        FakeClient, add_ingredients, controller_with, dishes, recipe, session_screen, wait_for_calls,
    };
    use crate::model::{RecipeError, Screen, ServiceError};

    #[tokio::test]
    async fn submit_without_input_sets_error_and_makes_no_request() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_with(client.clone());

        controller.submit().await;

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Input);
        assert!(session.error_message.is_some());
        assert_eq!(client.suggest_calls(), 0);
    }

    #[tokio::test]
    async fn submit_shows_results_in_arrival_order() {
        let client = Arc::new(FakeClient::default());
        client.push_suggestions(Ok(dishes(&["Curry", "Saag", "Salad", "Pie"])));
        let controller = controller_with(client.clone());
        add_ingredients(&controller, &["Chicken", "Spinach"]).await;

        controller.submit().await;

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Results);
        let names: Vec<_> = session.suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Curry", "Saag", "Salad", "Pie"]);
        assert_eq!(client.excludes(), vec![Vec::<String>::new()]);
    }

    #[tokio::test]
    async fn failed_submit_returns_to_input_with_friendly_error() {
        let client = Arc::new(FakeClient::default());
        client.push_suggestions(Err(RecipeError::SuggestionFetch(ServiceError::Status {
            status: 500,
            body: "internal".to_string(),
        })));
        let controller = controller_with(client);
        add_ingredients(&controller, &["Chicken"]).await;

        controller.submit().await;

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Input);
        assert!(session.suggestions.is_empty());
        assert!(session.error_message.unwrap().contains("unavailable"));
    }

    #[tokio::test]
    async fn screen_is_suggesting_while_the_request_is_in_flight() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(FakeClient::default().with_suggest_gate(gate.clone()));
        client.push_suggestions(Ok(dishes(&["Curry"])));
        let controller = controller_with(client.clone());
        add_ingredients(&controller, &["Chicken"]).await;

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_for_calls(|| client.suggest_calls(), 1).await;
        assert_eq!(session_screen(&controller).await, Screen::Suggesting);

        gate.notify_one();
        task.await.unwrap();
        assert_eq!(session_screen(&controller).await, Screen::Results);
    }

    #[tokio::test]
    async fn chicken_and_spinach_end_to_end() {
        let client = Arc::new(FakeClient::default());
        client.push_suggestions(Ok(dishes(&["Curry", "Saag Chicken", "Salad", "Pie"])));
        client.push_detail(Ok(recipe("Saag Chicken")));
        let controller = controller_with(client.clone());
        add_ingredients(&controller, &["Chicken", "Spinach"]).await;

        controller.submit().await;
        controller.select_dish(1).await;

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Recipe);
        let detail = session.selected_recipe.unwrap();
        assert_eq!(detail.name, "Saag Chicken");
        assert_eq!(detail.instructions.len(), 3);
        assert_eq!(detail.substitutions.len(), 2);
        assert_eq!(client.detail_calls(), 1);
    }

    #[tokio::test]
    async fn failed_detail_returns_to_results() {
        let client = Arc::new(FakeClient::default());
        client.push_suggestions(Ok(dishes(&["Curry"])));
        client.push_detail(Err(RecipeError::DetailFetch(ServiceError::Parse(
            "missing field `instructions`".to_string(),
        ))));
        let controller = controller_with(client);
        add_ingredients(&controller, &["Chicken"]).await;

        controller.submit().await;
        controller.select_dish(0).await;

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Results);
        assert!(session.selected_recipe.is_none());
        assert!(session.error_message.unwrap().contains("instructions"));
    }

    #[tokio::test]
    async fn recipe_arriving_after_reset_is_ignored() {
        let gate = Arc::new(Notify::new());
        let client = Arc::new(FakeClient::default().with_detail_gate(gate.clone()));
        client.push_suggestions(Ok(dishes(&["Curry"])));
        client.push_detail(Ok(recipe("Curry")));
        let controller = controller_with(client.clone());
        add_ingredients(&controller, &["Chicken"]).await;
        controller.submit().await;

        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.select_dish(0).await })
        };
        wait_for_calls(|| client.detail_calls(), 1).await;
        controller.reset().await;
        gate.notify_one();
        task.await.unwrap();

        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Input);
        assert!(session.selected_recipe.is_none());
        assert!(session.ingredients.is_empty());
    }

    #[tokio::test]
    async fn back_and_reset_follow_the_transition_table() {
        let client = Arc::new(FakeClient::default());
        client.push_suggestions(Ok(dishes(&["Curry", "Pie"])));
        client.push_detail(Ok(recipe("Pie")));
        let controller = controller_with(client);
        add_ingredients(&controller, &["Apple"]).await;
        controller.submit().await;
        controller.select_dish(1).await;

        controller.navigate_back().await;
        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Results);
        assert!(session.selected_recipe.is_none());
        assert_eq!(session.suggestions.len(), 2);

        controller.navigate_back().await;
        let session = controller.model.lock().await.get_session().await;
        assert_eq!(session.screen, Screen::Input);
        assert!(session.suggestions.is_empty());
        assert_eq!(session.ingredients.len(), 1);

        controller.reset().await;
        let session = controller.model.lock().await.get_session().await;
        assert!(session.ingredients.is_empty());
    }

    #[tokio::test]
    async fn attach_photo_loads_the_given_path() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"jpeg bytes").unwrap();
        let controller = controller_with(Arc::new(FakeClient::default()));

        controller
            .attach_photo(file.path().to_string_lossy().into_owned())
            .await;

        let session = controller.model.lock().await.get_session().await;
        let image = session.image.expect("photo attached");
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(session.input_buffer.is_empty());
        assert!(session.error_message.is_none());
    }

    #[tokio::test]
    async fn attach_photo_with_bad_path_sets_error() {
        let controller = controller_with(Arc::new(FakeClient::default()));

        controller.attach_photo("/definitely/not/here.png".to_string()).await;

        let session = controller.model.lock().await.get_session().await;
        assert!(session.image.is_none());
        assert!(session.error_message.is_some());
    }
}
