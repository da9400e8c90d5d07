//! Proxy for the external book catalog (Google Books volumes API).
//!
//! Results are reduced to `{title, author}`. Volumes listing several authors
//! keep only the first; volumes with no authors get an empty author.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::CatalogConfig;
use crate::database::models::BookInfo;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog responded with status {0}")]
    Upstream(u16),

    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Debug, Default, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Default, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
    max_results: u32,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            max_results: config.max_results,
        })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<BookInfo>, CatalogError> {
        let url = self.search_url(query);
        debug!(query, "searching catalog");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream(status.as_u16()));
        }

        let body = response.bytes().await?;
        let volumes: VolumesResponse =
            serde_json::from_slice(&body).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(reshape(volumes))
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", query)
                .append_pair("printType", "books")
                .append_pair("maxResults", &self.max_results.to_string());
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        url
    }
}

fn reshape(volumes: VolumesResponse) -> Vec<BookInfo> {
    volumes
        .items
        .into_iter()
        .map(|volume| {
            let VolumeInfo { title, authors } = volume.volume_info;
            BookInfo {
                title,
                author: authors.into_iter().next().unwrap_or_default(),
            }
        })
        .collect()
}
