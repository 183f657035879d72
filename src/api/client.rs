//! PokeAPI HTTP client
//!
//! Fetches JSON resources and routes every request through the response
//! cache: a hit is decoded without touching the network, a miss is fetched,
//! decoded, and only then stored.

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationAreaDetail, LocationAreaPage, Pokemon};
use crate::cache::Cache;

/// Base URL for the public PokeAPI
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Errors that can occur when fetching from the PokeAPI
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    /// Response body (fresh or cached) did not match the expected shape
    #[error("Failed to parse API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the PokeAPI endpoints the Pokedex uses
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http_client: Client,
    /// Always ends with `/`
    base_url: String,
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApiClient {
    /// Creates a client for the public PokeAPI
    pub fn new() -> Self {
        Self::with_base_url(POKEAPI_BASE_URL)
    }

    /// Creates a client against a custom base URL (mirrors, mock servers)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            http_client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the first page of the location-area listing
    pub fn location_areas_url(&self, page_size: u32) -> String {
        format!("{}location-area/?offset=0&limit={}", self.base_url, page_size)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}pokemon/{}", self.base_url, name)
    }

    /// Fetches a page of location areas from a listing URL
    pub async fn location_areas(
        &self,
        cache: &Cache,
        url: &str,
    ) -> Result<LocationAreaPage, ApiError> {
        self.get_json(cache, url).await
    }

    pub async fn location_area(
        &self,
        cache: &Cache,
        name: &str,
    ) -> Result<LocationAreaDetail, ApiError> {
        self.get_json(cache, &self.location_area_url(name)).await
    }

    pub async fn pokemon(&self, cache: &Cache, name: &str) -> Result<Pokemon, ApiError> {
        self.get_json(cache, &self.pokemon_url(name)).await
    }

    /// Fetches and decodes `url`, consulting `cache` first
    ///
    /// # Returns
    /// * `Ok(T)` decoded from the cached body, or from a fresh response which
    ///   is then cached under `url`
    /// * `Err(ApiError)` if the request, status, or decode fails; nothing is
    ///   cached in that case
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        cache: &Cache,
        url: &str,
    ) -> Result<T, ApiError> {
        if let Some(body) = cache.get(url) {
            debug!(url, "cache hit");
            return Ok(serde_json::from_slice(&body)?);
        }

        debug!(url, "cache miss; fetching");
        let body = self.fetch_bytes(url).await?;
        let parsed = serde_json::from_slice(&body)?;
        cache.add(url, body);

        Ok(parsed)
    }

    /// Performs the GET and returns the raw body
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const PIDGEY: &str = r#"{"name": "pidgey", "height": 3, "weight": 18, "base_experience": 50}"#;

    fn test_cache() -> Cache {
        Cache::new(Duration::from_secs(60))
    }

    #[test]
    fn test_with_base_url_appends_trailing_slash() {
        let client = PokeApiClient::with_base_url("http://localhost:1234/api/v2");
        assert_eq!(client.base_url(), "http://localhost:1234/api/v2/");
        assert_eq!(client.pokemon_url("pidgey"), "http://localhost:1234/api/v2/pokemon/pidgey");
    }

    #[test]
    fn test_location_areas_url_matches_public_api() {
        let client = PokeApiClient::new();
        assert_eq!(
            client.location_areas_url(20),
            "https://pokeapi.co/api/v2/location-area/?offset=0&limit=20"
        );
        assert_eq!(
            client.location_area_url("canalave-city-area"),
            "https://pokeapi.co/api/v2/location-area/canalave-city-area"
        );
    }

    #[tokio::test]
    async fn test_get_json_caches_raw_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/pokemon/pidgey")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PIDGEY)
            .expect(1)
            .create_async()
            .await;

        let client = PokeApiClient::with_base_url(server.url());
        let cache = test_cache();

        let first = client.pokemon(&cache, "pidgey").await.expect("First fetch should succeed");
        let second = client.pokemon(&cache, "pidgey").await.expect("Cached fetch should succeed");

        assert_eq!(first, second);
        assert_eq!(first.base_experience, 50);
        assert_eq!(cache.get(&client.pokemon_url("pidgey")), Some(PIDGEY.as_bytes().to_vec()));
        // Only one request reached the server
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_does_not_cache_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon/missingno")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let client = PokeApiClient::with_base_url(server.url());
        let cache = test_cache();

        let result = client.pokemon(&cache, "missingno").await;

        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_get_json_does_not_cache_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/pokemon/pidgey")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = PokeApiClient::with_base_url(server.url());
        let cache = test_cache();

        let result = client.pokemon(&cache, "pidgey").await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_get_json_serves_hit_without_network() {
        // Nothing listens on this address; a network call would fail
        let client = PokeApiClient::with_base_url("http://127.0.0.1:9/");
        let cache = test_cache();
        cache.add(&client.pokemon_url("pidgey"), PIDGEY.as_bytes().to_vec());

        let pokemon = client.pokemon(&cache, "pidgey").await.expect("Cache hit should succeed");

        assert_eq!(pokemon.name, "pidgey");
    }

    #[tokio::test]
    async fn test_get_json_surfaces_corrupt_cache_entry_as_decode_error() {
        let client = PokeApiClient::with_base_url("http://127.0.0.1:9/");
        let cache = test_cache();
        cache.add(&client.pokemon_url("pidgey"), b"not json".to_vec());

        let result = client.pokemon(&cache, "pidgey").await;

        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
