//! Session state machine for the suggestion flow
//!
//! The session owns every piece of flow state (screen, ingredients, photo,
//! suggestions, selected recipe, pagination flags, error) and only changes it
//! through the transitions below. Network work happens outside: a `begin_*`
//! call hands out a request tagged with the current generation, and the
//! matching `finish_*` call applies the response only if that generation is
//! still current and the screen still expects it.

use uuid::Uuid;

use super::error::RecipeError;
use super::recipe::{CapturedImage, DishSuggestion, Ingredient, RecipeDetail, SharedImage};
use super::types::Screen;

/// A suggestion request issued by the session
#[derive(Clone, Debug)]
pub struct SuggestionRequest {
    pub generation: u64,
    pub ingredients: Vec<String>,
    pub image: Option<SharedImage>,
    pub exclude: Vec<String>,
}

/// A recipe detail request issued by the session
#[derive(Clone, Debug)]
pub struct DetailRequest {
    pub generation: u64,
    pub dish: DishSuggestion,
    pub ingredients: Vec<String>,
}

/// Whether a finished request changed the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    pub screen: Screen,
    pub ingredients: Vec<Ingredient>,
    pub input_buffer: String,
    pub suggestions: Vec<DishSuggestion>,
    pub selected_recipe: Option<RecipeDetail>,
    pub pending_dish: Option<DishSuggestion>,
    pub error_message: Option<String>,
    pub image: Option<SharedImage>,
    pub is_fetching_more: bool,
    pub has_reached_end: bool,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.name.clone()).collect()
    }

    pub fn push_input(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input_buffer.pop();
    }

    /// Move the input buffer into the ingredient list
    pub fn commit_input(&mut self) -> Option<Uuid> {
        let buffer = std::mem::take(&mut self.input_buffer);
        self.add_ingredient(&buffer)
    }

    pub fn add_ingredient(&mut self, name: &str) -> Option<Uuid> {
        if self.screen != Screen::Input {
            return None;
        }
        let ingredient = Ingredient::new(name)?;
        let id = ingredient.id;
        self.ingredients.push(ingredient);
        Some(id)
    }

    pub fn remove_ingredient(&mut self, id: Uuid) -> bool {
        if self.screen != Screen::Input {
            return false;
        }
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i.id != id);
        self.ingredients.len() != before
    }

    pub fn attach_image(&mut self, image: CapturedImage) -> bool {
        if self.screen != Screen::Input {
            return false;
        }
        self.image = Some(SharedImage::new(image));
        true
    }

    pub fn clear_image(&mut self) {
        if self.screen == Screen::Input {
            self.image = None;
        }
    }

    pub fn has_input(&self) -> bool {
        !self.ingredients.is_empty() || self.image.is_some()
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// input -> suggesting. `Ok(None)` when not on the input screen.
    pub fn begin_search(&mut self) -> Result<Option<SuggestionRequest>, RecipeError> {
        if self.screen != Screen::Input {
            return Ok(None);
        }
        if !self.has_input() {
            let err = RecipeError::NoInput;
            self.error_message = Some(err.to_string());
            return Err(err);
        }

        self.generation += 1;
        self.screen = Screen::Suggesting;
        self.error_message = None;
        self.suggestions.clear();
        self.is_fetching_more = false;
        self.has_reached_end = false;

        Ok(Some(SuggestionRequest {
            generation: self.generation,
            ingredients: self.ingredient_names(),
            image: self.image.clone(),
            exclude: Vec::new(),
        }))
    }

    /// suggesting -> results on success, suggesting -> input on failure
    pub fn finish_search(
        &mut self,
        generation: u64,
        result: Result<Vec<DishSuggestion>, String>,
    ) -> Outcome {
        if generation != self.generation || self.screen != Screen::Suggesting {
            return Outcome::Stale;
        }
        match result {
            Ok(suggestions) => {
                self.suggestions = suggestions;
                self.screen = Screen::Results;
            }
            Err(message) => {
                self.suggestions.clear();
                self.error_message = Some(message);
                self.screen = Screen::Input;
            }
        }
        Outcome::Applied
    }

    /// Start a pagination fetch. `None` when one is in flight, the list is
    /// exhausted, or the results screen is not showing.
    pub fn begin_load_more(&mut self) -> Option<SuggestionRequest> {
        if self.screen != Screen::Results || self.is_fetching_more || self.has_reached_end {
            return None;
        }
        self.is_fetching_more = true;

        Some(SuggestionRequest {
            generation: self.generation,
            ingredients: self.ingredient_names(),
            image: self.image.clone(),
            exclude: self.suggestions.iter().map(|s| s.name.clone()).collect(),
        })
    }

    /// Apply a pagination result. Failures only clear the in-flight flag.
    pub fn finish_load_more(
        &mut self,
        generation: u64,
        result: Result<Vec<DishSuggestion>, String>,
    ) -> Outcome {
        if generation != self.generation || !self.is_fetching_more {
            return Outcome::Stale;
        }
        self.is_fetching_more = false;
        match result {
            Ok(more) if more.is_empty() => self.has_reached_end = true,
            Ok(mut more) => self.suggestions.append(&mut more),
            Err(_) => {}
        }
        Outcome::Applied
    }

    /// results -> loading_recipe
    pub fn begin_detail(&mut self, index: usize) -> Option<DetailRequest> {
        if self.screen != Screen::Results {
            return None;
        }
        let dish = self.suggestions.get(index)?.clone();

        self.screen = Screen::LoadingRecipe;
        self.error_message = None;
        self.pending_dish = Some(dish.clone());

        Some(DetailRequest {
            generation: self.generation,
            dish,
            ingredients: self.ingredient_names(),
        })
    }

    /// loading_recipe -> recipe on success, loading_recipe -> results on failure
    pub fn finish_detail(&mut self, generation: u64, result: Result<RecipeDetail, String>) -> Outcome {
        if generation != self.generation || self.screen != Screen::LoadingRecipe {
            return Outcome::Stale;
        }
        self.pending_dish = None;
        match result {
            Ok(detail) => {
                self.selected_recipe = Some(detail);
                self.screen = Screen::Recipe;
            }
            Err(message) => {
                self.error_message = Some(message);
                self.screen = Screen::Results;
            }
        }
        Outcome::Applied
    }

    /// results -> input, recipe -> results. Returns false when there is no back transition.
    pub fn back(&mut self) -> bool {
        match self.screen {
            Screen::Results => {
                self.generation += 1;
                self.suggestions.clear();
                self.is_fetching_more = false;
                self.has_reached_end = false;
                self.screen = Screen::Input;
                true
            }
            Screen::Recipe => {
                self.selected_recipe = None;
                self.screen = Screen::Results;
                true
            }
            Screen::Input | Screen::Suggesting | Screen::LoadingRecipe => false,
        }
    }

    /// Start over from an empty input screen
    pub fn reset(&mut self) {
        *self = Session {
            generation: self.generation + 1,
            ..Session::default()
        };
    }
}
