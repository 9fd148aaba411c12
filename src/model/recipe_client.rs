//! AI service client: dish suggestions and recipe details

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::{log_api_request, log_api_result};
use super::error::{RecipeError, ServiceError};
use super::recipe::{CapturedImage, DishSuggestion, RecipeDetail, Source};
use super::schema;

/// The two requests the app makes against the AI service
#[async_trait]
pub trait RecipeClient: Send + Sync {
    async fn suggest_dishes(
        &self,
        ingredients: &[String],
        image: Option<&CapturedImage>,
        exclude: &[String],
    ) -> Result<Vec<DishSuggestion>, RecipeError>;

    async fn fetch_recipe_detail(
        &self,
        dish: &DishSuggestion,
        ingredients: &[String],
    ) -> Result<RecipeDetail, RecipeError>;
}

/// Gemini `generateContent` backed client
#[derive(Debug, Clone)]
pub struct GeminiRecipeClient {
    api_key: String,
    model_name: String,
    api_base: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

impl GeminiRecipeClient {
    pub fn new(config: &AiConfig) -> Result<Self, ServiceError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    async fn call_gemini_api(&self, request: &GeminiRequest) -> Result<GeminiResponse, ServiceError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model_name);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecipeClient for GeminiRecipeClient {
    async fn suggest_dishes(
        &self,
        ingredients: &[String],
        image: Option<&CapturedImage>,
        exclude: &[String],
    ) -> Result<Vec<DishSuggestion>, RecipeError> {
        log_api_request!(
            "suggest_dishes",
            ingredients = ingredients.len(),
            has_image = image.is_some(),
            exclude = exclude.len()
        );

        let request = suggestion_request(ingredients, image, exclude);
        let started = Instant::now();
        let result = match self.call_gemini_api(&request).await {
            Ok(response) => response_text(&response).and_then(|text| parse_suggestions(&text)),
            Err(e) => Err(e),
        };

        log_api_result!("suggest_dishes", result, started);
        result.map_err(RecipeError::SuggestionFetch)
    }

    async fn fetch_recipe_detail(
        &self,
        dish: &DishSuggestion,
        ingredients: &[String],
    ) -> Result<RecipeDetail, RecipeError> {
        log_api_request!("fetch_recipe_detail", dish = %dish.name);

        let request = detail_request(dish, ingredients);
        let started = Instant::now();
        let result = match self.call_gemini_api(&request).await {
            Ok(response) => response_text(&response).and_then(|text| {
                let mut detail = parse_recipe_detail(&text)?;
                detail.merge_sources(grounding_sources(&response));
                Ok(detail)
            }),
            Err(e) => Err(e),
        };

        log_api_result!("fetch_recipe_detail", result, started);
        result.map_err(RecipeError::DetailFetch)
    }
}

fn suggestion_request(
    ingredients: &[String],
    image: Option<&CapturedImage>,
    exclude: &[String],
) -> GeminiRequest {
    let mut parts = vec![Part::Text {
        text: schema::suggestion_prompt(ingredients, image.is_some(), exclude),
    }];
    if let Some(image) = image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data_base64.clone(),
            },
        });
    }

    GeminiRequest {
        contents: vec![Content { parts }],
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: schema::dish_suggestions_schema(),
        }),
        tools: Vec::new(),
    }
}

// Search grounding cannot be combined with a response schema, so the detail
// request relies on the prompt for its JSON shape.
fn detail_request(dish: &DishSuggestion, ingredients: &[String]) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part::Text {
                text: schema::recipe_detail_prompt(&dish.name, &dish.description, ingredients),
            }],
        }],
        generation_config: None,
        tools: vec![Tool {
            google_search: GoogleSearch {},
        }],
    }
}

fn response_text(response: &GeminiResponse) -> Result<String, ServiceError> {
    let text: String = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ServiceError::EmptyResponse);
    }
    Ok(text)
}

fn grounding_sources(response: &GeminiResponse) -> Vec<Source> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.grounding_metadata.as_ref())
        .flat_map(|m| m.grounding_chunks.iter())
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.clone()?;
            let title = web.title.clone().unwrap_or_else(|| uri.clone());
            Some(Source { title, uri })
        })
        .collect()
}

/// Drop a surrounding Markdown code fence if the model added one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse_suggestions(text: &str) -> Result<Vec<DishSuggestion>, ServiceError> {
    Ok(serde_json::from_str(strip_code_fence(text))?)
}

fn parse_recipe_detail(text: &str) -> Result<RecipeDetail, ServiceError> {
    let body = strip_code_fence(text);
    let json = match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => return Err(ServiceError::Parse("no JSON object in response".to_string())),
    };
    Ok(serde_json::from_str(json)?)
}
