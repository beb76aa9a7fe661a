//! Optional external recipe search.
//!
//! Best-effort fallback when the built-in engine has nothing to offer.
//! One bounded request, no retries; any failure is reported as an error
//! for the caller to log and absorb.

use crate::config::SearchSettings;
use crate::error::SageError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// How many extracted ingredients go into the search query.
const QUERY_INGREDIENT_LIMIT: usize = 3;

/// A recipe found by the external service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecipe {
    pub title: String,
    pub href: String,
    pub ingredients: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawRecipe>,
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    title: String,
    #[serde(default)]
    href: String,
    #[serde(default)]
    ingredients: String,
}

/// Recipe search abstraction; tests substitute their own.
pub trait RecipeSearch {
    fn search(&self, ingredients: &[String]) -> Result<Vec<ExternalRecipe>, SageError>;
}

/// Real search client over HTTP.
pub struct HttpRecipeSearch {
    endpoint: String,
    max_results: usize,
    client: reqwest::blocking::Client,
}

impl HttpRecipeSearch {
    pub fn new(settings: &SearchSettings) -> Result<Self, SageError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| SageError::Search(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: settings.endpoint.clone(),
            max_results: settings.max_results,
            client,
        })
    }
}

impl RecipeSearch for HttpRecipeSearch {
    fn search(&self, ingredients: &[String]) -> Result<Vec<ExternalRecipe>, SageError> {
        let query = ingredients
            .iter()
            .take(QUERY_INGREDIENT_LIMIT)
            .cloned()
            .collect::<Vec<_>>()
            .join(",");

        debug!("External recipe search for: {query}");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("i", query.as_str()), ("p", "1")])
            .send()
            .map_err(|e| SageError::Search(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SageError::Search(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let payload: SearchResponse = response
            .json()
            .map_err(|e| SageError::Search(format!("bad payload: {e}")))?;

        let recipes = payload
            .results
            .into_iter()
            .filter(|r| !r.title.trim().is_empty() && !r.href.trim().is_empty())
            .take(self.max_results)
            .map(|r| ExternalRecipe {
                title: r.title.trim().to_string(),
                href: r.href.trim().to_string(),
                ingredients: r.ingredients.trim().to_string(),
            })
            .collect();

        Ok(recipes)
    }
}

/// No-op client used when the search is disabled by config.
pub struct DisabledSearch;

impl RecipeSearch for DisabledSearch {
    fn search(&self, _ingredients: &[String]) -> Result<Vec<ExternalRecipe>, SageError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_filtering() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{"results": [
                {"title": "Tomato Soup ", "href": "http://example.com/1", "ingredients": "tomato, broth"},
                {"title": "", "href": "http://example.com/2", "ingredients": "bread"},
                {"title": "Grilled Cheese", "href": "", "ingredients": "bread, cheese"},
                {"title": "Bruschetta", "href": "http://example.com/3", "ingredients": "bread, tomato"}
            ]}"#,
        )
        .unwrap();

        let valid: Vec<_> = payload
            .results
            .into_iter()
            .filter(|r| !r.title.trim().is_empty() && !r.href.trim().is_empty())
            .collect();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].title.trim(), "Tomato Soup");
    }

    #[test]
    fn test_missing_fields_default() {
        let payload: SearchResponse = serde_json::from_str(r#"{"results": [{"title": "X"}]}"#).unwrap();
        assert_eq!(payload.results[0].href, "");

        let payload: SearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(payload.results.is_empty());
    }

    #[test]
    fn test_disabled_search_returns_nothing() {
        let client = DisabledSearch;
        let result = client.search(&["tomato".to_string()]).unwrap();
        assert!(result.is_empty());
    }
}
