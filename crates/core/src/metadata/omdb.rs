//! OMDb metadata client.
//!
//! Secondary title/year source. OMDb reports errors inside a 200 response
//! (`"Response": "False"`), which maps to "id unknown" here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{parse_year, MetadataError, MetadataResolver, ResolvedTitle};
use crate::candidate::ContentType;
use crate::config::OmdbConfig;

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: OmdbConfig) -> Result<Self, MetadataError> {
        if config.api_key.is_empty() {
            return Err(MetadataError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://www.omdbapi.com".to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl MetadataResolver for OmdbClient {
    async fn resolve(
        &self,
        media_id: &str,
        _content_type: ContentType,
    ) -> Result<Option<ResolvedTitle>, MetadataError> {
        debug!(imdb_id = media_id, "OMDb lookup");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("i", media_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MetadataError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: OmdbResponse = response.json().await.map_err(|e| {
            MetadataError::ParseError(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !body.response.eq_ignore_ascii_case("true") {
            return Ok(None);
        }

        Ok(body.title.map(|title| ResolvedTitle {
            title,
            year: body.year.as_deref().and_then(parse_year),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = OmdbClient::new(OmdbConfig {
            api_key: String::new(),
            base_url: None,
        });
        assert!(matches!(result, Err(MetadataError::NotConfigured(_))));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{"Title": "The Matrix", "Year": "1999", "Response": "True"}"#;
        let parsed: OmdbResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("The Matrix"));
        assert_eq!(parsed.year.as_deref(), Some("1999"));
        assert_eq!(parsed.response, "True");
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let parsed: OmdbResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.title.is_none());
        assert!(!parsed.response.eq_ignore_ascii_case("true"));
    }
}
