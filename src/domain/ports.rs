use crate::config::UploadConfig;
use crate::domain::model::VersionCatalog;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the remote game version catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self, game_name: &str) -> Result<VersionCatalog>;
}

/// The build tool invoking an upload: supplies configuration and receives log lines.
pub trait BuildContext: Send + Sync {
    fn configuration(&self) -> Result<UploadConfig>;
    fn log(&self, level: tracing::Level, message: &str);
}
