use crate::domain::model::{UploadMetadata, UploadTarget};
use crate::utils::error::{Result, UploadError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tokio::io::AsyncReadExt;
use url::Url;

pub const APP_USER_AGENT: &str = concat!("curse-upload/", env!("CARGO_PKG_VERSION"));
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
const ARTIFACT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct ArtifactAttachment {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// A fully assembled upload, ready for [`crate::core::executor::UploadExecutor`].
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub fields: Vec<(&'static str, String)>,
    pub attachment: ArtifactAttachment,
}

impl PreparedRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        let part = Part::bytes(self.attachment.content)
            .file_name(self.attachment.file_name)
            .mime_str(ARTIFACT_CONTENT_TYPE)
            .map_err(|e| UploadError::EncodingError {
                field: "file".to_string(),
                message: e.to_string(),
            })?;

        Ok(form.part("file", part))
    }
}

#[derive(Debug, Clone)]
pub struct UploadRequestBuilder {
    user_agent: String,
}

impl UploadRequestBuilder {
    pub fn new() -> Self {
        Self {
            user_agent: APP_USER_AGENT.to_string(),
        }
    }

    pub async fn build(
        &self,
        target: &UploadTarget,
        metadata: &UploadMetadata,
        artifact: Option<&Path>,
        api_key: &str,
    ) -> Result<PreparedRequest> {
        let path = match artifact {
            Some(path) if path.is_file() => path,
            other => {
                return Err(UploadError::MissingArtifactError {
                    path: other.map(Path::to_path_buf),
                })
            }
        };

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| UploadError::EncodingError {
                field: "file".to_string(),
                message: format!("artifact file name is not valid UTF-8: {}", path.display()),
            })?
            .to_string();

        let url = self.upload_url(target)?;
        let headers = self.headers(api_key)?;

        let fields = vec![
            ("file_type", metadata.file_type.code().to_string()),
            ("name", metadata.artifact_version.clone()),
            ("game_versions", metadata.game_version_id.clone()),
            ("change_log", metadata.change_log.clone()),
            ("known_caveats", metadata.known_caveats.clone()),
            ("change_markup_type", metadata.markup_type.clone()),
            ("caveats_markup_type", metadata.markup_type.clone()),
        ];

        let content = read_artifact(path).await?;
        tracing::debug!(
            "Prepared upload of {} ({} bytes) to {}",
            file_name,
            content.len(),
            url
        );

        Ok(PreparedRequest {
            url,
            headers,
            fields,
            attachment: ArtifactAttachment { file_name, content },
        })
    }

    fn upload_url(&self, target: &UploadTarget) -> Result<Url> {
        let base = format!("{}://{}", target.scheme, target.host);
        let mut url = Url::parse(&base).map_err(|e| UploadError::InvalidConfigValueError {
            field: "upload.url".to_string(),
            value: base.clone(),
            reason: e.to_string(),
        })?;
        url.set_path(&target.path());
        Ok(url)
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let user_agent =
            HeaderValue::from_str(&self.user_agent).map_err(|e| UploadError::EncodingError {
                field: USER_AGENT.to_string(),
                message: e.to_string(),
            })?;
        let mut key = HeaderValue::from_str(api_key).map_err(|e| UploadError::EncodingError {
            field: API_KEY_HEADER.to_string(),
            message: e.to_string(),
        })?;
        key.set_sensitive(true);

        headers.insert(USER_AGENT, user_agent);
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }
}

impl Default for UploadRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The file handle is dropped before returning, on success and on error.
async fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut content = Vec::new();
    file.read_to_end(&mut content).await?;
    Ok(content)
}
