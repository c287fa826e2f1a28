use crate::core::local_version::MatchPolicy;
use crate::domain::model::DependencyDescriptor;
use crate::utils::error::{Result, UploadError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "curse-upload.toml";

/// On-disk configuration. Every key is optional; missing values fall back to
/// the POM and then to built-in defaults when the final [`super::UploadConfig`]
/// is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub project: ProjectConfig,
    pub game: GameConfig,
    pub upload: UploadSection,
    pub dependencies: Vec<DependencyDescriptor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub artifact: Option<PathBuf>,
    pub version: Option<String>,
    pub release: Option<bool>,
    pub pom: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub name: Option<String>,
    pub catalog_url: Option<String>,
    pub on_ambiguous_dependency: Option<MatchPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSection {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub change_log: Option<String>,
    pub known_caveats: Option<String>,
    pub markup_type: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UploadError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UploadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CURSEFORGE_API_KEY})
    ///
    /// Unset variables are left in place so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UploadError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Layers `top` over `self`: values set in `top` win, dependency lists are
    /// concatenated with `top`'s entries last.
    pub fn overlay(self, top: TomlConfig) -> TomlConfig {
        let mut dependencies = self.dependencies;
        dependencies.extend(top.dependencies);

        TomlConfig {
            project: ProjectConfig {
                slug: top.project.slug.or(self.project.slug),
                project_type: top.project.project_type.or(self.project.project_type),
                artifact: top.project.artifact.or(self.project.artifact),
                version: top.project.version.or(self.project.version),
                release: top.project.release.or(self.project.release),
                pom: top.project.pom.or(self.project.pom),
            },
            game: GameConfig {
                name: top.game.name.or(self.game.name),
                catalog_url: top.game.catalog_url.or(self.game.catalog_url),
                on_ambiguous_dependency: top
                    .game
                    .on_ambiguous_dependency
                    .or(self.game.on_ambiguous_dependency),
            },
            upload: UploadSection {
                url: top.upload.url.or(self.upload.url),
                api_key: top.upload.api_key.or(self.upload.api_key),
                change_log: top.upload.change_log.or(self.upload.change_log),
                known_caveats: top.upload.known_caveats.or(self.upload.known_caveats),
                markup_type: top.upload.markup_type.or(self.upload.markup_type),
            },
            dependencies,
        }
    }
}
