//! Prompts and response schemas for the AI service

use serde_json::json;

/// How many dishes each suggestion request asks for
pub const SUGGESTIONS_PER_REQUEST: usize = 4;

/// Returns the JSON schema for dish suggestion responses
pub fn dish_suggestions_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" },
                "description": { "type": "string" },
                "prepTime": { "type": "string" },
                "difficulty": {
                    "type": "string",
                    "enum": ["Easy", "Medium", "Hard"]
                }
            },
            "required": ["id", "name", "description", "prepTime", "difficulty"]
        }
    })
}

pub fn suggestion_prompt(ingredients: &[String], has_image: bool, exclude: &[String]) -> String {
    let mut prompt = String::from("You are a helpful home cook. ");

    match (ingredients.is_empty(), has_image) {
        (false, true) => prompt.push_str(&format!(
            "I have these ingredients: {}. The attached photo shows more of what I have, use those too. ",
            ingredients.join(", ")
        )),
        (false, false) => prompt.push_str(&format!(
            "I have these ingredients: {}. ",
            ingredients.join(", ")
        )),
        (true, _) => prompt.push_str("Identify the ingredients in the attached photo. "),
    }

    prompt.push_str(&format!(
        "Suggest exactly {} distinct dishes I could cook with them. ",
        SUGGESTIONS_PER_REQUEST
    ));

    if !exclude.is_empty() {
        prompt.push_str(&format!(
            "Do not suggest any of these dishes again: {}. ",
            exclude.join(", ")
        ));
    }

    prompt.push_str(
        "For each dish give a short unique id, the name, a one sentence description, \
         an estimated preparation time such as \"30 minutes\" and a difficulty of Easy, Medium or Hard.",
    );
    prompt
}

pub fn recipe_detail_prompt(dish_name: &str, dish_description: &str, ingredients: &[String]) -> String {
    let available = if ingredients.is_empty() {
        "whatever is shown in my photo".to_string()
    } else {
        ingredients.join(", ")
    };

    format!(
        "Write a detailed recipe for \"{dish_name}\" ({dish_description}). I have: {available}. \
         Search the web for reliable recipes to ground your answer. \
         Include at least 2-3 ingredient substitutions, each with alternatives and how they change the dish. \
         Respond with a single JSON object and nothing else, using exactly these keys: \
         \"name\" (string), \"ingredients\" (array of strings with quantities), \
         \"instructions\" (array of strings, one per step, in order), \"tips\" (array of strings), \
         \"substitutions\" (array of objects with \"original\" (string) and \"alternatives\" \
         (array of objects with \"name\" and \"effect\" strings)), \
         \"youtubeSearchUrl\" (string, a YouTube search URL for this dish) and \
         \"sources\" (array of objects with \"title\" and \"uri\" strings for the pages you used)."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suggestion_prompt_lists_ingredients_and_count() {
        let prompt = suggestion_prompt(&names(&["Chicken", "Spinach"]), false, &[]);
        assert!(prompt.contains("Chicken, Spinach"));
        assert!(prompt.contains("exactly 4"));
        assert!(!prompt.contains("Do not suggest"));
    }

    #[test]
    fn suggestion_prompt_excludes_seen_dishes() {
        let prompt = suggestion_prompt(&names(&["Rice"]), false, &names(&["Fried Rice", "Risotto"]));
        assert!(prompt.contains("Do not suggest any of these dishes again: Fried Rice, Risotto."));
    }

    #[test]
    fn suggestion_prompt_handles_photo_only() {
        let prompt = suggestion_prompt(&[], true, &[]);
        assert!(prompt.contains("Identify the ingredients in the attached photo"));
    }

    #[test]
    fn schema_requires_every_suggestion_field() {
        let schema = dish_suggestions_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 5);
        assert_eq!(schema["items"]["properties"]["difficulty"]["enum"][2], "Hard");
    }

    #[test]
    fn detail_prompt_asks_for_substitutions_and_json() {
        let prompt = recipe_detail_prompt("Saag Chicken", "Spiced spinach curry", &names(&["Chicken"]));
        assert!(prompt.contains("\"Saag Chicken\""));
        assert!(prompt.contains("at least 2-3 ingredient substitutions"));
        assert!(prompt.contains("single JSON object"));
    }
}
