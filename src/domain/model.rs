use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A declared project dependency, as found in build metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDescriptor {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl DependencyDescriptor {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }
}

impl std::str::FromStr for DependencyDescriptor {
    type Err = String;

    /// Parses `group:artifact:version` coordinates.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [group, artifact, version]
                if !group.is_empty() && !artifact.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *artifact, *version))
            }
            _ => Err(format!(
                "expected group:artifact:version coordinates, got '{}'",
                s
            )),
        }
    }
}

/// Game version labels (e.g. `CB 1.7.2-R0.3`) mapped to the catalog's internal ids.
pub type VersionCatalog = HashMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Release,
    Beta,
}

impl FileType {
    pub fn from_release_flag(release: bool) -> Self {
        if release {
            FileType::Release
        } else {
            FileType::Beta
        }
    }

    /// Value of the `file_type` multipart field.
    pub fn code(self) -> &'static str {
        match self {
            FileType::Release => "r",
            FileType::Beta => "b",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadata {
    pub file_type: FileType,
    pub artifact_version: String,
    pub game_version_id: String,
    pub change_log: String,
    pub known_caveats: String,
    pub markup_type: String,
}

/// Destination of an upload; `host` may include a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub scheme: String,
    pub host: String,
    pub project_type: String,
    pub slug: String,
}

impl UploadTarget {
    pub fn path(&self) -> String {
        format!(
            "/{}/{}/upload-file.json",
            self.project_type,
            self.slug.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    InvalidCredentialsOrPermission,
    ProjectNotFound,
    ValidationError(String),
    UnexpectedStatus(u16),
}

impl UploadOutcome {
    /// Classifies an upload response; `body` is kept only for 422 responses.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            201 => UploadOutcome::Success,
            403 => UploadOutcome::InvalidCredentialsOrPermission,
            404 => UploadOutcome::ProjectNotFound,
            422 => UploadOutcome::ValidationError(body),
            other => UploadOutcome::UnexpectedStatus(other),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success)
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            UploadOutcome::Success => 0,
            UploadOutcome::InvalidCredentialsOrPermission => 20,
            UploadOutcome::ProjectNotFound => 21,
            UploadOutcome::ValidationError(_) => 22,
            UploadOutcome::UnexpectedStatus(_) => 23,
        }
    }
}

impl std::fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadOutcome::Success => write!(f, "File uploaded successfully."),
            UploadOutcome::InvalidCredentialsOrPermission => write!(
                f,
                "You have not specified your API key correctly or do not have permission to upload to that project."
            ),
            UploadOutcome::ProjectNotFound => write!(
                f,
                "Project was not found. Either it is specified wrong or been renamed."
            ),
            UploadOutcome::ValidationError(body) => {
                write!(f, "The upload was rejected by the server: {}", body)
            }
            UploadOutcome::UnexpectedStatus(code) => {
                write!(f, "Unexpected response code: {}", code)
            }
        }
    }
}
