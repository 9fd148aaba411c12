//! Core type definitions for the application

/// The screen currently shown. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Input,
    Suggesting,
    Results,
    LoadingRecipe,
    Recipe,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Input => " Ingredients ",
            Screen::Suggesting => " Finding dishes ",
            Screen::Results => " Suggestions ",
            Screen::LoadingRecipe => " Preparing recipe ",
            Screen::Recipe => " Recipe ",
        }
    }

    /// Screens waiting on the AI service
    pub fn is_busy(self) -> bool {
        matches!(self, Screen::Suggesting | Screen::LoadingRecipe)
    }
}

/// Which text field receives typed characters on the input screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    Ingredient,
    PhotoPath,
}

/// View-only state that is not part of the suggestion flow
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub input_focus: InputFocus,
    pub photo_path: String,
    pub ingredient_selected: usize,
    pub suggestion_selected: usize,
    pub recipe_scroll: u16,
    /// Largest useful recipe scroll for the last drawn frame, in wrapped rows
    pub recipe_scroll_limit: u16,
    pub show_help_popup: bool,
    /// Ticks since start, drives the loading spinner
    pub tick: usize,
}
