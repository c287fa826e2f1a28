use crate::domain::model::VersionCatalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, UploadError};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// `{game}` is replaced by the configured game name.
pub const DEFAULT_CATALOG_URL: &str = "http://{game}.curseforge.com/game-versions.json";

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
}

/// Fetches `game-versions.json` and inverts it into label -> internal id.
#[derive(Debug, Clone)]
pub struct VersionCatalogClient {
    client: Client,
    url_template: String,
}

impl VersionCatalogClient {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url_template: url_template.into(),
        }
    }

    pub fn catalog_url(&self, game_name: &str) -> String {
        catalog_url(&self.url_template, game_name)
    }

    /// Parses `{"<id>": {"name": "<label>", ...}, ...}`.
    pub fn parse_catalog(body: &str) -> Result<VersionCatalog> {
        let entries: HashMap<String, CatalogEntry> =
            serde_json::from_str(body).map_err(|e| UploadError::CatalogFetchError {
                message: format!("invalid catalog document: {}", e),
            })?;

        let mut catalog = VersionCatalog::with_capacity(entries.len());
        for (id, entry) in entries {
            if let Some(previous) = catalog.insert(entry.name.clone(), id.clone()) {
                tracing::warn!(
                    "Catalog label '{}' is listed under both {} and {}, keeping {}",
                    entry.name,
                    previous,
                    id,
                    id
                );
            }
        }
        Ok(catalog)
    }
}

impl Default for VersionCatalogClient {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

pub fn catalog_url(url_template: &str, game_name: &str) -> String {
    url_template.replace("{game}", game_name)
}

#[async_trait::async_trait]
impl CatalogSource for VersionCatalogClient {
    async fn fetch_catalog(&self, game_name: &str) -> Result<VersionCatalog> {
        let url = self.catalog_url(game_name);
        tracing::debug!("Fetching game versions from: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UploadError::CatalogFetchError {
                message: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("Catalog response status: {}", status);
        if !status.is_success() {
            return Err(UploadError::CatalogFetchError {
                message: format!("HTTP {} from {}", status, url),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UploadError::CatalogFetchError {
                message: e.to_string(),
            })?;

        let catalog = Self::parse_catalog(&body)?;
        tracing::debug!("{} remote versions found.", catalog.len());
        Ok(catalog)
    }
}
