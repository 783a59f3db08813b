use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Default request timeout so a dead network surfaces an error instead of
/// hanging the single-threaded loop
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Production base URL for TheMealDB's free-tier API
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // null or absent when the search has no results
    meals: Option<Vec<RecipeSummary>>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    meals: Option<Vec<RecipeDetail>>,
}

/// Blocking client for TheMealDB's search and lookup endpoints
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new() -> Result<Self, FinderError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Points the client at a different base URL, used by tests and proxies
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FinderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Searches for recipes whose main ingredient matches `ingredient`.
    /// An empty result list means the API answered `meals: null`.
    pub fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        let url = format!("{}/filter.php", self.base_url);
        debug!("GET {url}?i={ingredient}");

        let response = self
            .client
            .get(&url)
            .query(&[("i", ingredient)])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FinderError::Status {
                code: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json()?;
        Ok(body.meals.unwrap_or_default())
    }

    /// Fetches the full record for one recipe id, `None` if unknown
    pub fn lookup_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, FinderError> {
        let url = format!("{}/lookup.php", self.base_url);
        debug!("GET {url}?i={id}");

        let response = self.client.get(&url).query(&[("i", id)]).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FinderError::Status {
                code: status.as_u16(),
            });
        }

        let body: LookupResponse = response.json()?;
        Ok(body.meals.and_then(|mut meals| {
            if meals.is_empty() {
                None
            } else {
                Some(meals.remove(0))
            }
        }))
    }
}
