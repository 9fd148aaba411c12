//! Recipe domain data: ingredients, dish suggestions and recipe details

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

/// An ingredient entered by the user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
}

impl Ingredient {
    /// Build an ingredient from user input. Returns `None` for blank names.
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// A candidate dish returned by the suggestion request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishSuggestion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub prep_time: String,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub effect: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub original: String,
    pub alternatives: Vec<Alternative>,
}

/// A web citation attached to a recipe
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// The fully expanded recipe for one dish
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub name: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tips: Vec<String>,
    pub substitutions: Vec<Substitution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_search_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<Source>>,
}

impl RecipeDetail {
    /// The video search link to show, falling back to a YouTube search for the dish name
    pub fn video_link(&self) -> String {
        match self.youtube_search_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => format!(
                "{}{}",
                YOUTUBE_SEARCH_URL,
                urlencoding::encode(&format!("{} recipe", self.name))
            ),
        }
    }

    /// Merge citations into `sources`, skipping URIs already present
    pub fn merge_sources(&mut self, extra: Vec<Source>) {
        if extra.is_empty() {
            return;
        }
        let sources = self.sources.get_or_insert_with(Vec::new);
        for source in extra {
            if !sources.iter().any(|s| s.uri == source.uri) {
                sources.push(source);
            }
        }
    }
}

/// A photo attached to the search, already encoded for transmission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedImage {
    pub file_name: String,
    pub mime_type: String,
    pub data_base64: String,
}

/// Images are shared between the session snapshot and in-flight requests
pub type SharedImage = Arc<CapturedImage>;
