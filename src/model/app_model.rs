//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::recipe::CapturedImage;
use super::recipe_client::RecipeClient;
use super::session::Session;
use super::types::{InputFocus, Screen, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub client: Option<Arc<dyn RecipeClient>>,
    pub session: Arc<Mutex<Session>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            client: None,
            session: Arc::new(Mutex::new(Session::new())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_client(&mut self, client: Arc<dyn RecipeClient>) {
        self.client = Some(client);
    }

    pub fn get_client(&self) -> Option<Arc<dyn RecipeClient>> {
        self.client.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn screen(&self) -> Screen {
        self.session.lock().await.screen
    }

    pub async fn tick(&self) {
        let mut state = self.ui_state.lock().await;
        state.tick = state.tick.wrapping_add(1);
    }

    // Errors

    pub async fn set_error(&self, message: String) {
        self.session.lock().await.set_error(message);
    }

    pub async fn clear_error(&self) {
        self.session.lock().await.dismiss_error();
    }

    pub async fn has_error(&self) -> bool {
        self.session.lock().await.error_message.is_some()
    }

    // Input screen

    pub async fn input_focus(&self) -> InputFocus {
        self.ui_state.lock().await.input_focus
    }

    // Lock order is always session before ui_state.

    pub async fn append_input(&self, c: char) {
        let mut session = self.session.lock().await;
        let mut state = self.ui_state.lock().await;
        match state.input_focus {
            InputFocus::Ingredient => session.push_input(c),
            InputFocus::PhotoPath => state.photo_path.push(c),
        }
    }

    pub async fn backspace_input(&self) {
        let mut session = self.session.lock().await;
        let mut state = self.ui_state.lock().await;
        match state.input_focus {
            InputFocus::Ingredient => session.pop_input(),
            InputFocus::PhotoPath => {
                state.photo_path.pop();
            }
        }
    }

    pub async fn input_buffer_is_empty(&self) -> bool {
        self.session.lock().await.input_buffer.trim().is_empty()
    }

    /// Add the typed ingredient and select it
    pub async fn commit_ingredient(&self) -> bool {
        let mut session = self.session.lock().await;
        if session.commit_input().is_none() {
            return false;
        }
        let mut state = self.ui_state.lock().await;
        state.ingredient_selected = session.ingredients.len() - 1;
        true
    }

    pub async fn remove_selected_ingredient(&self) -> bool {
        let mut session = self.session.lock().await;
        let mut state = self.ui_state.lock().await;
        let Some(id) = session.ingredients.get(state.ingredient_selected).map(|i| i.id) else {
            return false;
        };
        let removed = session.remove_ingredient(id);
        state.ingredient_selected = state
            .ingredient_selected
            .min(session.ingredients.len().saturating_sub(1));
        removed
    }

    pub async fn open_photo_prompt(&self) {
        let mut state = self.ui_state.lock().await;
        state.input_focus = InputFocus::PhotoPath;
        state.photo_path.clear();
    }

    pub async fn close_photo_prompt(&self) {
        let mut state = self.ui_state.lock().await;
        state.input_focus = InputFocus::Ingredient;
        state.photo_path.clear();
    }

    pub async fn take_photo_path(&self) -> String {
        let mut state = self.ui_state.lock().await;
        state.input_focus = InputFocus::Ingredient;
        std::mem::take(&mut state.photo_path)
    }

    pub async fn attach_image(&self, image: CapturedImage) -> bool {
        self.session.lock().await.attach_image(image)
    }

    pub async fn clear_image(&self) {
        self.session.lock().await.clear_image();
    }

    // Selection

    pub async fn move_selection_up(&self) {
        let screen = self.screen().await;
        let mut state = self.ui_state.lock().await;
        match screen {
            Screen::Input => state.ingredient_selected = state.ingredient_selected.saturating_sub(1),
            Screen::Results => state.suggestion_selected = state.suggestion_selected.saturating_sub(1),
            Screen::Recipe => state.recipe_scroll = state.recipe_scroll.saturating_sub(1),
            Screen::Suggesting | Screen::LoadingRecipe => {}
        }
    }

    pub async fn move_selection_down(&self) {
        let session = self.session.lock().await;
        let mut state = self.ui_state.lock().await;
        match session.screen {
            Screen::Input => {
                if state.ingredient_selected < session.ingredients.len().saturating_sub(1) {
                    state.ingredient_selected += 1;
                }
            }
            Screen::Results => {
                if state.suggestion_selected < session.suggestions.len().saturating_sub(1) {
                    state.suggestion_selected += 1;
                }
            }
            Screen::Recipe => {
                state.recipe_scroll = state
                    .recipe_scroll
                    .saturating_add(1)
                    .min(state.recipe_scroll_limit);
            }
            Screen::Suggesting | Screen::LoadingRecipe => {}
        }
    }

    const RECIPE_PAGE: u16 = 10;

    /// Record how far the drawn recipe can scroll and pull the offset back inside it
    pub async fn set_recipe_scroll_limit(&self, limit: u16) {
        let mut state = self.ui_state.lock().await;
        state.recipe_scroll_limit = limit;
        state.recipe_scroll = state.recipe_scroll.min(limit);
    }

    pub async fn page_recipe(&self, down: bool) {
        let mut state = self.ui_state.lock().await;
        state.recipe_scroll = if down {
            state
                .recipe_scroll
                .saturating_add(Self::RECIPE_PAGE)
                .min(state.recipe_scroll_limit)
        } else {
            state.recipe_scroll.saturating_sub(Self::RECIPE_PAGE)
        };
    }

    pub async fn selected_suggestion(&self) -> usize {
        self.ui_state.lock().await.suggestion_selected
    }

    const LOAD_MORE_THRESHOLD: usize = 1;

    /// Whether the selection is close enough to the end of the list to fetch more
    pub async fn should_load_more_suggestions(&self) -> bool {
        let session = self.session.lock().await;
        if session.screen != Screen::Results || session.is_fetching_more || session.has_reached_end {
            return false;
        }
        let selected = self.ui_state.lock().await.suggestion_selected;
        selected + Self::LOAD_MORE_THRESHOLD >= session.suggestions.len()
    }

    /// Reset view positions when the screen content changes
    pub async fn reset_view_for(&self, screen: Screen) {
        let mut state = self.ui_state.lock().await;
        match screen {
            Screen::Input => {
                state.ingredient_selected = 0;
                state.suggestion_selected = 0;
            }
            Screen::Results | Screen::Recipe => state.recipe_scroll = 0,
            Screen::Suggesting => state.suggestion_selected = 0,
            Screen::LoadingRecipe => {}
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
