//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists, spinner)
//! - `layout`: Main layout structure (status bar, key hints)
//! - `content`: Per-screen content rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod overlays;

use std::rc::Rc;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::model::{Session, UiState};

pub struct AppView;

impl AppView {
    fn split(area: Rect) -> Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Screen title + photo
                Constraint::Min(0),    // Screen content
                Constraint::Length(3), // Key hints
            ])
            .split(area)
    }

    /// How far the recipe screen can scroll when drawn into `area`
    pub fn recipe_scroll_limit(area: Rect, session: &Session) -> u16 {
        match &session.selected_recipe {
            Some(recipe) => content::recipe_scroll_limit(recipe, Self::split(area)[1]),
            None => 0,
        }
    }

    pub fn render(frame: &mut Frame, session: &Session, ui_state: &UiState) {
        let chunks = Self::split(frame.area());

        layout::render_top_bar(frame, chunks[0], session);
        content::render_main_content(frame, chunks[1], session, ui_state);
        layout::render_key_hints(frame, chunks[2], session.screen, ui_state);

        // Error notification overlay (if there's an error)
        if let Some(error_msg) = &session.error_message {
            overlays::render_error_notification(frame, error_msg);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::model::{AppModel, Difficulty, DishSuggestion, RecipeDetail, Screen};

    fn draw(session: &Session, ui_state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|f| AppView::render(f, session, ui_state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn dish(name: &str) -> DishSuggestion {
        DishSuggestion {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: format!("A quick {}", name.to_lowercase()),
            prep_time: "25 minutes".to_string(),
            difficulty: Difficulty::Medium,
        }
    }

    fn results_session(names: &[&str]) -> Session {
        let mut session = Session::new();
        session.add_ingredient("Chicken");
        let request = session.begin_search().unwrap().unwrap();
        session.finish_search(request.generation, Ok(names.iter().map(|n| dish(n)).collect()));
        session
    }

    fn recipe() -> RecipeDetail {
        serde_json::from_value(serde_json::json!({
            "name": "Saag Chicken",
            "ingredients": ["2 chicken thighs", "300g spinach"],
            "instructions": ["Brown the chicken", "Wilt the spinach", "Simmer together"],
            "tips": ["Finish with lemon"],
            "substitutions": [
                {"original": "spinach", "alternatives": [
                    {"name": "kale", "effect": "chewier"},
                    {"name": "chard", "effect": "earthier"}
                ]}
            ],
            "sources": [{"title": "Example", "uri": "https://example.com/saag"}]
        }))
        .unwrap()
    }

    #[test]
    fn input_screen_lists_ingredients() {
        let mut session = Session::new();
        session.add_ingredient("Chicken");
        session.add_ingredient("Spinach");
        let screen = draw(&session, &UiState::default());
        assert!(screen.contains("Ingredients (2)"));
        assert!(screen.contains("Spinach"));
    }

    #[test]
    fn results_screen_shows_pagination_state() {
        let mut session = results_session(&["Curry", "Saag"]);
        assert!(draw(&session, &UiState::default()).contains("M for more ideas"));

        session.begin_load_more().unwrap();
        assert!(draw(&session, &UiState::default()).contains("Loading more"));

        let generation = session.generation();
        session.finish_load_more(generation, Ok(vec![]));
        let screen = draw(&session, &UiState::default());
        assert!(screen.contains("No more suggestions"));
        assert!(screen.contains("Curry"));
        assert!(screen.contains("25 minutes"));
    }

    #[test]
    fn every_settled_screen_hints_how_to_quit() {
        let input = Session::new();
        assert!(draw(&input, &UiState::default()).contains("Ctrl+Q quit"));

        let mut session = results_session(&["Curry", "Saag"]);
        assert!(draw(&session, &UiState::default()).contains("Q quit"));

        let request = session.begin_detail(0).unwrap();
        session.finish_detail(request.generation, Ok(recipe()));
        assert!(draw(&session, &UiState::default()).contains("Q quit"));
    }

    #[test]
    fn recipe_screen_shows_sections_and_video_link() {
        let mut session = results_session(&["Saag Chicken"]);
        let request = session.begin_detail(0).unwrap();
        session.finish_detail(request.generation, Ok(recipe()));
        assert_eq!(session.screen, Screen::Recipe);

        let screen = draw(&session, &UiState::default());
        assert!(screen.contains("Saag Chicken"));
        assert!(screen.contains("Instructions"));
        assert!(screen.contains("kale"));
        assert!(screen.contains("youtube.com/results"));
    }

    #[tokio::test]
    async fn end_of_a_wrapped_recipe_is_reachable() {
        let mut detail = recipe();
        detail.instructions = (1..=20)
            .map(|i| format!("Step {} {}", i, "stir the pot gently and keep the heat low ".repeat(5)))
            .collect();
        let mut session = results_session(&["Saag Chicken"]);
        let request = session.begin_detail(0).unwrap();
        session.finish_detail(request.generation, Ok(detail));

        let model = AppModel::new();
        *model.session.lock().await = session.clone();
        let area = Rect::new(0, 0, 80, 40);
        let limit = AppView::recipe_scroll_limit(area, &session);
        // Wrapped steps need far more rows than there are logical lines
        assert!(limit > 20);
        model.set_recipe_scroll_limit(limit).await;
        for _ in 0..50 {
            model.page_recipe(true).await;
        }
        let ui_state = model.get_ui_state().await;
        assert_eq!(ui_state.recipe_scroll, limit);

        let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
        terminal
            .draw(|f| AppView::render(f, &session, &ui_state))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("youtube.com"));
        assert!(screen.contains("example.com/saag"));
    }

    #[test]
    fn oversized_scroll_still_shows_the_recipe_tail() {
        let mut session = results_session(&["Saag Chicken"]);
        let request = session.begin_detail(0).unwrap();
        session.finish_detail(request.generation, Ok(recipe()));
        let ui_state = UiState {
            recipe_scroll: u16::MAX,
            ..UiState::default()
        };
        assert!(draw(&session, &ui_state).contains("youtube.com"));
    }

    #[test]
    fn error_overlay_is_drawn_over_content() {
        let mut session = Session::new();
        session.set_error("Rate limited by the AI service".to_string());
        let screen = draw(&session, &UiState::default());
        assert!(screen.contains("Esc to dismiss"));
        assert!(screen.contains("Rate limited"));
    }
}
