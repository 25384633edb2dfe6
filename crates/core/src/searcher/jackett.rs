//! Jackett search backend implementation.
//!
//! Queries the aggregate "all" indexer endpoint and converts Jackett
//! results into [`Candidate`]s, recovering video attributes from the
//! release name and the info hash from either the dedicated field or the
//! magnet URI.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::candidate::{Candidate, TorrentInfo};
use crate::config::JackettConfig;

use super::release::parse_release_attributes;
use super::{CandidateSearch, SearchError, SearchQuery};

/// Jackett search backend.
pub struct JackettSearcher {
    client: Client,
    config: JackettConfig,
}

impl JackettSearcher {
    /// Create a new JackettSearcher with the given configuration.
    pub fn new(config: JackettConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the Jackett API URL for a search.
    fn build_search_url(&self, query: &SearchQuery) -> String {
        let mut url = format!(
            "{}/api/v2.0/indexers/all/results?apikey={}&Query={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&query.query)
        );

        for cat_id in content_type_to_jackett_ids(query.content_type) {
            url.push_str(&format!("&Category[]={}", cat_id));
        }

        url
    }
}

#[async_trait]
impl CandidateSearch for JackettSearcher {
    fn name(&self) -> &str {
        "jackett"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError> {
        let url = self.build_search_url(query);
        debug!(query = %query.query, "Searching Jackett");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else if e.is_connect() {
                SearchError::ConnectionFailed(e.to_string())
            } else {
                SearchError::ApiError(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let jackett_response: JackettResponse = response
            .json()
            .await
            .map_err(|e| SearchError::ApiError(format!("Failed to parse response: {}", e)))?;

        debug!(
            query = %query.query,
            results = jackett_response.Results.len(),
            "Jackett search complete"
        );

        let limit = query.limit.unwrap_or(u32::MAX) as usize;
        Ok(jackett_response
            .Results
            .into_iter()
            .take(limit)
            .map(|r| convert_result(r, query))
            .collect())
    }
}

/// Convert one Jackett listing into a candidate.
fn convert_result(r: JackettResult, query: &SearchQuery) -> Candidate {
    let info_hash = r
        .InfoHash
        .filter(|h| !h.is_empty())
        .or_else(|| r.MagnetUri.as_deref().and_then(magnet_info_hash))
        .map(|h| h.to_lowercase())
        .unwrap_or_default();

    Candidate {
        info_hash,
        content_type: query.content_type,
        title: r.Title.clone(),
        languages: vec![],
        episodes: vec![],
        video: parse_release_attributes(&r.Title),
        torrent: TorrentInfo {
            name: r.Title,
            size_bytes: r.Size.unwrap_or(0).max(0) as u64,
            file_type: None,
            tag_names: r.CategoryDesc.into_iter().collect(),
            magnet_uri: r.MagnetUri,
        },
        seeders: r.Seeders.unwrap_or(0).max(0) as u32,
        leechers: r
            .Peers
            .unwrap_or(0)
            .saturating_sub(r.Seeders.unwrap_or(0))
            .max(0) as u32,
        published_at: r.PublishDate.and_then(|d| parse_jackett_date(&d)),
    }
}

/// Pull the info hash out of a magnet's `xt=urn:btih:` parameter.
fn magnet_info_hash(magnet: &str) -> Option<String> {
    let (_, query) = magnet.split_once('?')?;
    query.split('&').find_map(|pair| {
        let hash = pair.strip_prefix("xt=urn:btih:")?;
        (!hash.is_empty()).then(|| hash.to_string())
    })
}

/// Map a content type to Jackett/Torznab category ids.
fn content_type_to_jackett_ids(content_type: crate::candidate::ContentType) -> &'static [u32] {
    match content_type {
        crate::candidate::ContentType::Movie => &[2000],
        crate::candidate::ContentType::Series => &[5000],
    }
}

/// Jackett dates come in RFC 3339 with varying precision.
fn parse_jackett_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
struct JackettResponse {
    #[serde(default)]
    Results: Vec<JackettResult>,
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
struct JackettResult {
    Title: String,
    InfoHash: Option<String>,
    MagnetUri: Option<String>,
    Size: Option<i64>,
    Seeders: Option<i64>,
    Peers: Option<i64>,
    CategoryDesc: Option<String>,
    PublishDate: Option<String>,
}
