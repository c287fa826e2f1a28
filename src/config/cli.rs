use crate::config::toml_config::{TomlConfig, DEFAULT_CONFIG_FILE};
use crate::config::UploadConfig;
use crate::domain::ports::BuildContext;
use crate::utils::error::{Result, UploadError};
use std::path::Path;
use tracing::Level;

#[cfg(feature = "cli")]
use crate::domain::model::DependencyDescriptor;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "curse-upload")]
#[command(about = "Upload a built plugin to BukkitDev, tagged with the game version it was built against")]
pub struct CliArgs {
    /// Path to TOML configuration file (defaults to ./curse-upload.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maven POM to read the version, name, artifact and dependencies from
    #[arg(long)]
    pub pom: Option<PathBuf>,

    #[arg(long)]
    pub api_key: Option<String>,

    /// Game whose version catalog is consulted
    #[arg(long)]
    pub game: Option<String>,

    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub project_type: Option<String>,

    /// File to upload
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Name shown for the uploaded file
    #[arg(long)]
    pub artifact_version: Option<String>,

    /// Additional dependency as group:artifact:version (repeatable)
    #[arg(long = "dependency", value_name = "GROUP:ARTIFACT:VERSION")]
    pub dependencies: Vec<DependencyDescriptor>,

    #[arg(long, conflicts_with = "beta")]
    pub release: bool,

    #[arg(long)]
    pub beta: bool,

    #[arg(long)]
    pub change_log: Option<String>,

    #[arg(long)]
    pub known_caveats: Option<String>,

    #[arg(long)]
    pub markup_type: Option<String>,

    #[arg(long)]
    pub upload_url: Option<String>,

    /// Catalog URL template; `{game}` is replaced by the game name
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Resolve the game version and build the request without uploading
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// Command line values as a config layer to put over the file.
    pub fn overrides(&self) -> TomlConfig {
        let mut config = TomlConfig::default();
        config.project.slug = self.slug.clone();
        config.project.project_type = self.project_type.clone();
        config.project.artifact = self.artifact.clone();
        config.project.version = self.artifact_version.clone();
        config.project.pom = self.pom.clone();
        config.project.release = match (self.release, self.beta) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        config.game.name = self.game.clone();
        config.game.catalog_url = self.catalog_url.clone();
        config.upload.url = self.upload_url.clone();
        config.upload.api_key = self.api_key.clone();
        config.upload.change_log = self.change_log.clone();
        config.upload.known_caveats = self.known_caveats.clone();
        config.upload.markup_type = self.markup_type.clone();
        config.dependencies = self.dependencies.clone();
        config
    }
}

/// [`BuildContext`] for command line runs: configuration from file + flags,
/// log lines to `tracing`.
#[derive(Debug, Clone)]
pub struct CliContext {
    config: TomlConfig,
}

impl CliContext {
    pub fn new(config: TomlConfig) -> Self {
        Self { config }
    }

    #[cfg(feature = "cli")]
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let file = load_config_file(args.config.as_deref())?;
        Ok(Self::new(file.overlay(args.overrides())))
    }
}

/// An explicitly requested file must exist; the default file is optional.
pub fn load_config_file(path: Option<&Path>) -> Result<TomlConfig> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path).map_err(|e| match e {
                UploadError::IoError(io) => UploadError::ConfigValidationError {
                    field: "config".to_string(),
                    message: format!("cannot read {}: {}", path.display(), io),
                },
                other => other,
            })
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
            TomlConfig::from_file(DEFAULT_CONFIG_FILE)
        }
        None => Ok(TomlConfig::default()),
    }
}

impl BuildContext for CliContext {
    fn configuration(&self) -> Result<UploadConfig> {
        UploadConfig::from_layers(self.config.clone())
    }

    fn log(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!("{}", message);
        } else if level == Level::WARN {
            tracing::warn!("{}", message);
        } else if level == Level::INFO {
            tracing::info!("{}", message);
        } else if level == Level::DEBUG {
            tracing::debug!("{}", message);
        } else {
            tracing::trace!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_explicit_missing_config_file_fails() {
        let err = load_config_file(Some(Path::new("/no/such/curse-upload.toml"))).unwrap_err();
        assert!(matches!(err, UploadError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_context_resolves_configuration() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[project]\nslug = \"banhammer\"\nversion = \"1.0\"\n[upload]\napi_key = \"k\"\n",
        )
        .unwrap();

        let context = CliContext::new(load_config_file(Some(file.path())).unwrap());
        let config = context.configuration().unwrap();
        assert_eq!(config.slug, "banhammer");
        assert_eq!(config.api_key, "k");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[project]\nslug = \"from-file\"\nversion = \"1.0\"\n[upload]\napi_key = \"file-key\"\n",
        )
        .unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let args = CliArgs::parse_from([
            "curse-upload",
            "--config",
            config_path.as_str(),
            "--slug",
            "from-cli",
            "--beta",
            "--dependency",
            "org.bukkit:bukkit:1.7.2-R0.3",
        ]);

        let config = CliContext::from_args(&args)
            .unwrap()
            .configuration()
            .unwrap();
        assert_eq!(config.slug, "from-cli");
        assert_eq!(config.api_key, "file-key");
        assert!(!config.release);
        assert_eq!(
            config.dependencies,
            vec![DependencyDescriptor::new("org.bukkit", "bukkit", "1.7.2-R0.3")]
        );
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_release_and_beta_conflict() {
        let result = CliArgs::try_parse_from(["curse-upload", "--release", "--beta"]);
        assert!(result.is_err());
    }
}
