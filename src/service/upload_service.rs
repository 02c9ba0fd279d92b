use crate::config::CloudinaryConfig;
use crate::dto::upload_dto::{CloudinaryUploadResponse, UploadFile};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{error, info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The media host answered with `{error: {message}}` or a non-2xx code.
    #[error("Upload failed: {0}")]
    Rejected(String),

    #[error("Upload response carried no file URL")]
    MissingUrl,

    #[error("Upload request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[async_trait]
pub trait UploadService: Send + Sync {
    /// Uploads one file and returns its public URL.
    async fn upload(&self, file: UploadFile) -> Result<String, UploadError>;
}

pub struct CloudinaryUploader {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryUploader {
    /// Builds its own client; `timeout` bounds each upload request.
    pub fn new(config: CloudinaryConfig, timeout: Duration) -> Result<Self, UploadError> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn with_client(client: Client, config: CloudinaryConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl UploadService for CloudinaryUploader {
    #[instrument(skip(self, file), fields(filename = %file.filename, size = file.size()))]
    async fn upload(&self, file: UploadFile) -> Result<String, UploadError> {
        info!("Uploading file to media host");
        let part = Part::bytes(file.content)
            .file_name(file.filename)
            .mime_str(&file.content_type)
            .map_err(|_| {
                error!(content_type = %file.content_type, "Unsupported content type");
                UploadError::Rejected(format!("invalid content type '{}'", file.content_type))
            })?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: Option<CloudinaryUploadResponse> = serde_json::from_str(&body).ok();

        if let Some(message) = parsed.as_ref().and_then(|p| p.error.as_ref()).map(|e| e.message.clone()) {
            error!("Media host rejected upload: {}", message);
            return Err(UploadError::Rejected(message));
        }
        if !status.is_success() {
            error!("Media host answered {}", status);
            return Err(UploadError::Rejected(format!("status {}", status.as_u16())));
        }

        match parsed.and_then(|p| p.secure_url) {
            Some(url) => {
                info!(url = %url, "File uploaded");
                Ok(url)
            }
            None => {
                error!("Upload response carried no secure_url");
                Err(UploadError::MissingUrl)
            }
        }
    }
}
