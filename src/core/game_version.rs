use crate::core::local_version::LocalVersionResolver;
use crate::domain::model::DependencyDescriptor;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{Result, UploadError};

pub const BUKKIT_GROUP: &str = "org.bukkit";
pub const BUKKIT_ARTIFACT: &str = "bukkit";
/// Catalog labels for CraftBukkit builds are `CB <bukkit version>`.
pub const CATALOG_LABEL_PREFIX: &str = "CB ";

pub struct GameVersionResolver<C: CatalogSource> {
    catalog: C,
    local: LocalVersionResolver,
}

impl<C: CatalogSource> GameVersionResolver<C> {
    pub fn new(catalog: C, local: LocalVersionResolver) -> Self {
        Self { catalog, local }
    }

    /// Returns the catalog's internal id for the bukkit version the project builds against.
    pub async fn resolve(
        &self,
        game_name: &str,
        dependencies: &[DependencyDescriptor],
    ) -> Result<String> {
        let remote_versions = self.catalog.fetch_catalog(game_name).await?;
        let local_version =
            self.local
                .resolve_dependency_version(dependencies, BUKKIT_GROUP, BUKKIT_ARTIFACT)?;

        let label = format!("{}{}", CATALOG_LABEL_PREFIX, local_version);
        let game_version = remote_versions
            .get(&label)
            .cloned()
            .ok_or(UploadError::GameVersionNotFoundError { label })?;

        tracing::debug!("Internal game version id: {}", game_version);
        Ok(game_version)
    }
}
