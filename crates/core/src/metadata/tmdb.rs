//! TMDB (The Movie Database) metadata client.
//!
//! Uses the `/find` endpoint to look up entries by IMDb id directly,
//! which avoids a fuzzy title search round-trip.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{parse_year, MetadataError, MetadataResolver, ResolvedTitle};
use crate::candidate::ContentType;
use crate::config::TmdbConfig;

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> Result<TmdbFindResponse, MetadataError> {
        let url = format!("{}/find/{}", self.base_url, imdb_id);

        debug!(imdb_id = imdb_id, "TMDB find");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("external_source", "imdb_id"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(MetadataError::NotConfigured(
                "Invalid TMDB API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse find response: {}", e))
        })
    }
}

#[async_trait]
impl MetadataResolver for TmdbClient {
    async fn resolve(
        &self,
        media_id: &str,
        content_type: ContentType,
    ) -> Result<Option<ResolvedTitle>, MetadataError> {
        let found = self.find_by_imdb_id(media_id).await?;

        let resolved = match content_type {
            ContentType::Movie => found.movie_results.into_iter().next().map(|m| ResolvedTitle {
                title: m.title,
                year: m.release_date.as_deref().and_then(parse_year),
            }),
            ContentType::Series => found.tv_results.into_iter().next().map(|t| ResolvedTitle {
                title: t.name,
                year: t.first_air_date.as_deref().and_then(parse_year),
            }),
        };

        Ok(resolved)
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbFindResponse {
    #[serde(default)]
    movie_results: Vec<TmdbMovieResult>,
    #[serde(default)]
    tv_results: Vec<TmdbTvResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    title: String,
    release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvResult {
    name: String,
    first_air_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = TmdbClient::new(TmdbConfig {
            api_key: String::new(),
            base_url: None,
        });
        assert!(matches!(result, Err(MetadataError::NotConfigured(_))));
    }

    #[test]
    fn test_find_response_parsing() {
        let json = r#"{
            "movie_results": [
                {"id": 603, "title": "The Matrix", "release_date": "1999-03-30"}
            ],
            "tv_results": []
        }"#;
        let parsed: TmdbFindResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.movie_results.len(), 1);
        assert_eq!(parsed.movie_results[0].title, "The Matrix");
        assert!(parsed.tv_results.is_empty());
    }

    #[test]
    fn test_find_response_missing_sections() {
        let parsed: TmdbFindResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.movie_results.is_empty());
        assert!(parsed.tv_results.is_empty());
    }
}
