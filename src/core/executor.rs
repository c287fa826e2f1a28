use crate::core::request::PreparedRequest;
use crate::domain::model::UploadOutcome;
use crate::utils::error::Result;
use reqwest::Client;

/// Sends a prepared upload once and classifies the response.
#[derive(Debug, Clone, Default)]
pub struct UploadExecutor {
    client: Client,
}

impl UploadExecutor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn execute(&self, request: PreparedRequest) -> Result<UploadOutcome> {
        let url = request.url.clone();
        let headers = request.headers.clone();
        let form = request.into_form()?;

        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        tracing::debug!("Upload response status: {}", status);

        let body = if status == 422 {
            let body = response.text().await?;
            tracing::debug!("Upload response body: {}", body);
            body
        } else {
            String::new()
        };

        Ok(UploadOutcome::from_status(status, body))
    }
}
