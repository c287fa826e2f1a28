pub mod cli;
pub mod toml_config;

use crate::adapters::pom::PomDocument;
use crate::core::catalog::{catalog_url, DEFAULT_CATALOG_URL};
use crate::core::local_version::MatchPolicy;
use crate::domain::model::{DependencyDescriptor, FileType, UploadMetadata, UploadTarget};
use crate::utils::error::{Result, UploadError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path_segment, validate_required_field, validate_url,
    Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_GAME: &str = "minecraft";
pub const DEFAULT_CHANGE_LOG: &str = "Uploaded using curse-upload. CHANGELOG pending.";
pub const DEFAULT_KNOWN_CAVEATS: &str = "None";
pub const DEFAULT_MARKUP_TYPE: &str = "markdown";
pub const DEFAULT_PROJECT_TYPE: &str = "server-mods";
pub const DEFAULT_UPLOAD_URL: &str = "http://dev.bukkit.org";

/// Fully resolved settings for one upload run.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub game: String,
    pub api_key: String,
    pub change_log: String,
    pub known_caveats: String,
    pub markup_type: String,
    pub project_type: String,
    pub slug: String,
    pub release: bool,
    pub dependencies: Vec<DependencyDescriptor>,
    pub artifact: Option<PathBuf>,
    pub artifact_version: String,
    pub upload_url: String,
    pub catalog_url: String,
    pub match_policy: MatchPolicy,
}

impl UploadConfig {
    /// Resolves file/CLI settings, filling gaps from the POM (if one is
    /// configured) and from the built-in defaults.
    pub fn from_layers(config: TomlConfig) -> Result<Self> {
        let pom = match &config.project.pom {
            Some(path) => {
                tracing::debug!("Reading project metadata from {}", path.display());
                Some((PomDocument::from_file(path)?, pom_dir(path)))
            }
            None => None,
        };

        let mut dependencies = pom
            .as_ref()
            .map(|(pom, _)| pom.dependency_descriptors())
            .unwrap_or_default();
        dependencies.extend(config.dependencies);

        let artifact_version = config
            .project
            .version
            .or_else(|| pom.as_ref().and_then(|(pom, _)| pom.project_version()));
        let artifact_version =
            validate_required_field("project.version", &artifact_version)?.clone();

        let slug = config
            .project
            .slug
            .or_else(|| pom.as_ref().and_then(|(pom, _)| pom.display_name()));
        let slug = validate_required_field("project.slug", &slug)?.clone();

        let api_key = validate_required_field("upload.api_key", &config.upload.api_key)?.clone();

        let artifact = config
            .project
            .artifact
            .or_else(|| pom.as_ref().and_then(|(pom, dir)| pom.default_artifact_path(dir)));

        let release = config
            .project
            .release
            .unwrap_or_else(|| !is_snapshot_version(&artifact_version));

        Ok(UploadConfig {
            game: config.game.name.unwrap_or_else(|| DEFAULT_GAME.to_string()),
            api_key,
            change_log: config
                .upload
                .change_log
                .unwrap_or_else(|| DEFAULT_CHANGE_LOG.to_string()),
            known_caveats: config
                .upload
                .known_caveats
                .unwrap_or_else(|| DEFAULT_KNOWN_CAVEATS.to_string()),
            markup_type: config
                .upload
                .markup_type
                .unwrap_or_else(|| DEFAULT_MARKUP_TYPE.to_string()),
            project_type: config
                .project
                .project_type
                .unwrap_or_else(|| DEFAULT_PROJECT_TYPE.to_string()),
            slug,
            release,
            dependencies,
            artifact,
            artifact_version,
            upload_url: config
                .upload
                .url
                .unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string()),
            catalog_url: config
                .game
                .catalog_url
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            match_policy: config.game.on_ambiguous_dependency.unwrap_or_default(),
        })
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_release_flag(self.release)
    }

    pub fn target(&self) -> Result<UploadTarget> {
        let url = validate_url("upload.url", &self.upload_url)?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(UploadError::InvalidConfigValueError {
                    field: "upload.url".to_string(),
                    value: self.upload_url.clone(),
                    reason: "URL has no host".to_string(),
                })
            }
        };

        Ok(UploadTarget {
            scheme: url.scheme().to_string(),
            host,
            project_type: self.project_type.clone(),
            slug: self.slug.clone(),
        })
    }

    pub fn metadata(&self, game_version_id: String) -> UploadMetadata {
        UploadMetadata {
            file_type: self.file_type(),
            artifact_version: self.artifact_version.clone(),
            game_version_id,
            change_log: self.change_log.clone(),
            known_caveats: self.known_caveats.clone(),
            markup_type: self.markup_type.clone(),
        }
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("upload.api_key", &self.api_key)?;
        if self.api_key.contains("${") {
            return Err(UploadError::InvalidConfigValueError {
                field: "upload.api_key".to_string(),
                value: self.api_key.clone(),
                reason: "references an environment variable that is not set".to_string(),
            });
        }

        validate_path_segment("game.name", &self.game)?;
        validate_path_segment("project.slug", &self.slug)?;
        validate_path_segment("project.type", &self.project_type)?;
        validate_non_empty_string("project.version", &self.artifact_version)?;
        validate_non_empty_string("upload.markup_type", &self.markup_type)?;
        validate_url("upload.url", &self.upload_url)?;
        validate_url("game.catalog_url", &catalog_url(&self.catalog_url, &self.game))?;
        Ok(())
    }
}

fn pom_dir(pom_path: &Path) -> PathBuf {
    match pom_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Maven snapshot versions: `1.0-SNAPSHOT` or the deployed form `1.0-20240101.120000-3`.
pub fn is_snapshot_version(version: &str) -> bool {
    if version.to_ascii_uppercase().ends_with("SNAPSHOT") {
        return true;
    }

    let mut parts = version.rsplitn(3, '-');
    let (Some(build), Some(stamp), Some(base)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    !base.is_empty()
        && all_digits(build)
        && stamp.len() == 15
        && stamp.as_bytes()[8] == b'.'
        && all_digits(&stamp[..8])
        && all_digits(&stamp[9..])
}
