use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to fetch game version catalog: {message}")]
    CatalogFetchError { message: String },

    #[error("Project is not built against {artifact} (no dependency in group '{group}')")]
    DependencyNotFoundError { group: String, artifact: String },

    #[error("Dependency {artifact} is declared with conflicting versions: {}", .versions.join(", "))]
    AmbiguousDependency {
        artifact: String,
        versions: Vec<String>,
    },

    #[error("Unable to determine game version: '{label}' is not in the remote catalog")]
    GameVersionNotFoundError { label: String },

    #[error("No artifact to upload{}", .path.as_ref().map(|p| format!(": {}", p.display())).unwrap_or_default())]
    MissingArtifactError { path: Option<PathBuf> },

    #[error("Failed to encode request field '{field}': {message}")]
    EncodingError { field: String, message: String },

    #[error("Upload request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("POM error in {path}: {message}")]
    PomError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl UploadError {
    /// Process exit status reported by the binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UploadError::ConfigValidationError { .. }
            | UploadError::InvalidConfigValueError { .. }
            | UploadError::MissingConfigError { .. } => 2,
            UploadError::CatalogFetchError { .. } => 3,
            UploadError::DependencyNotFoundError { .. } | UploadError::AmbiguousDependency { .. } => 4,
            UploadError::GameVersionNotFoundError { .. } => 5,
            UploadError::MissingArtifactError { .. } => 6,
            UploadError::EncodingError { .. } => 7,
            UploadError::TransportError(_) => 8,
            UploadError::PomError { .. } => 9,
            UploadError::IoError(_) => 10,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UploadError::ConfigValidationError { .. }
            | UploadError::InvalidConfigValueError { .. }
            | UploadError::MissingConfigError { .. } => {
                "Check the configuration file and command line flags"
            }
            UploadError::CatalogFetchError { .. } => {
                "Check the game name and that the catalog URL is reachable"
            }
            UploadError::DependencyNotFoundError { .. } => {
                "Declare the org.bukkit:bukkit dependency in the POM or with --dependency"
            }
            UploadError::AmbiguousDependency { .. } => {
                "Declare a single bukkit version or set game.on_ambiguous_dependency = \"last\""
            }
            UploadError::GameVersionNotFoundError { .. } => {
                "Build against a bukkit version that the remote catalog lists"
            }
            UploadError::MissingArtifactError { .. } => {
                "Build the project first or point --artifact at the packaged file"
            }
            UploadError::EncodingError { .. } => {
                "Remove control characters from the API key and artifact file name"
            }
            UploadError::TransportError(_) => "Check network connectivity and the upload URL",
            UploadError::PomError { .. } => "Make sure the POM exists and is well-formed XML",
            UploadError::IoError(_) => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
