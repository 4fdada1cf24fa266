use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use business::domain::recipe::errors::RecipeSourceError;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared Spoonacular HTTP client configuration.
pub struct SpoonacularClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl SpoonacularClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Points the client at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.trim().to_string(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn recipe_information_url(&self, id: u64) -> String {
        format!("{}/recipes/{}/information", self.base_url, id)
    }

    pub fn complex_search_url(&self) -> String {
        format!("{}/recipes/complexSearch", self.base_url)
    }

    pub fn find_by_ingredients_url(&self) -> String {
        format!("{}/recipes/findByIngredients", self.base_url)
    }

    /// Issues an authenticated GET and decodes the JSON body.
    ///
    /// A 404 yields `Ok(None)`; every other non-success status is classified
    /// into a [`RecipeSourceError`].
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, RecipeSourceError> {
        let response = self
            .client
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| transport_error(&err))?;
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|_| RecipeSourceError::InvalidResponse)
    }
}

/// Maps a non-success upstream status to the failure class it signals.
pub fn classify_status(status: StatusCode) -> RecipeSourceError {
    match status.as_u16() {
        401 | 403 => RecipeSourceError::AuthInvalid,
        402 | 429 => RecipeSourceError::QuotaExceeded,
        _ => RecipeSourceError::Unavailable,
    }
}

fn transport_error(err: &reqwest::Error) -> RecipeSourceError {
    if err.is_timeout() {
        RecipeSourceError::Timeout
    } else {
        RecipeSourceError::Unavailable
    }
}
