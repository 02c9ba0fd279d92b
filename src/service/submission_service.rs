use crate::config::ApiConfig;
use crate::dto::enquiry_dto::{NewEnquiryRequest, SubmissionPayload, SubmissionResponse, SubmittedDocument};
use crate::dto::upload_dto::UploadFile;
use crate::model::schema::{EnquiryKind, EnquirySchema, ALL};
use crate::repository::repository_error::RepositoryError;
use crate::service::upload_service::{UploadError, UploadService};
use crate::util::http::{build_client, failure_message};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::Validate;

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Rejected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[async_trait]
pub trait SubmissionService: Send + Sync {
    async fn submit(
        &self,
        kind: EnquiryKind,
        request: NewEnquiryRequest,
        files: Vec<UploadFile>,
    ) -> Result<SubmissionResponse, SubmissionError>;
}

pub struct SubmissionServiceImpl {
    client: Client,
    config: ApiConfig,
    uploader: Arc<dyn UploadService>,
}

impl SubmissionServiceImpl {
    pub fn new(config: ApiConfig, uploader: Arc<dyn UploadService>) -> Result<Self, SubmissionError> {
        let client = build_client(&config).map_err(RepositoryError::from)?;
        Ok(Self {
            client,
            config,
            uploader,
        })
    }
}

/// Checks the contact fields, the kind's required classification fields and
/// the hierarchy before anything is sent.
pub fn validate_submission(
    schema: &EnquirySchema,
    request: &NewEnquiryRequest,
    files: &[UploadFile],
) -> Result<(), SubmissionError> {
    if let Err(errors) = request.validate() {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|key| key.to_string()).collect();
        fields.sort();
        return Err(SubmissionError::Validation(format!(
            "Please check the following fields: {}",
            fields.join(", ")
        )));
    }

    // Only classification keys may reach the flattened body.
    if let Some(key) = request
        .fields
        .keys()
        .find(|key| !schema.fields.iter().any(|field| field.key == key.as_str()))
    {
        return Err(SubmissionError::Validation(format!(
            "'{}' is not a field of {} enquiries",
            key, schema.kind
        )));
    }

    for key in schema.required {
        let value = request.fields.get(*key).map(|v| v.trim()).unwrap_or_default();
        if value.is_empty() || is_placeholder(schema, key, value) {
            return Err(SubmissionError::Validation(format!(
                "Please select {}",
                schema.label(key)
            )));
        }
    }

    for link in schema.hierarchies {
        let (Some(parent), Some(child)) = (request.fields.get(link.parent), request.fields.get(link.child)) else {
            continue;
        };
        if !link.children(parent).contains(&child.as_str()) {
            return Err(SubmissionError::Validation(format!(
                "{} '{}' does not belong to {} '{}'",
                schema.label(link.child),
                child,
                schema.label(link.parent),
                parent
            )));
        }
    }

    if files.len() > request.no_of_documents as usize {
        return Err(SubmissionError::Validation(format!(
            "{} files attached but only {} documents declared",
            files.len(),
            request.no_of_documents
        )));
    }
    Ok(())
}

fn is_placeholder(schema: &EnquirySchema, key: &str, value: &str) -> bool {
    value == ALL
        || schema.filter(key).is_some_and(|field| field.is_sentinel(value))
        || schema.exact(key).is_some_and(|field| field.is_sentinel(value))
}

/// Renames classification keys to their wire names. The document count has
/// its own top-level field.
fn wire_fields(schema: &EnquirySchema, request: &NewEnquiryRequest) -> std::collections::BTreeMap<String, String> {
    request
        .fields
        .iter()
        .filter(|(key, _)| key.as_str() != "noOfDocuments")
        .map(|(key, value)| {
            let api_key = schema
                .fields
                .iter()
                .find(|field| field.key == key.as_str())
                .map(|field| field.api_key.to_string())
                .unwrap_or_else(|| key.clone());
            (api_key, value.trim().to_string())
        })
        .collect()
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    #[instrument(skip(self, request, files), fields(kind = %kind, email = %request.email, files = files.len()))]
    async fn submit(
        &self,
        kind: EnquiryKind,
        request: NewEnquiryRequest,
        files: Vec<UploadFile>,
    ) -> Result<SubmissionResponse, SubmissionError> {
        let schema = kind.schema();
        if let Err(e) = validate_submission(&schema, &request, &files) {
            warn!("Submission rejected: {}", e);
            return Err(e);
        }

        let mut documents = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let original_name = file.filename.clone();
            let mime_type = file.content_type.clone();
            let size = file.size();
            let url = self.uploader.upload(file).await?;
            documents.push(SubmittedDocument {
                index: index as u32,
                original_name,
                mime_type,
                size,
                url,
            });
        }
        info!("Uploaded {} documents", documents.len());

        let payload = SubmissionPayload {
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            fields: wire_fields(&schema, &request),
            no_of_documents: request.no_of_documents,
            documents,
        };

        let url = self.config.endpoint(&schema.collection_path());
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(RepositoryError::from)?;
        if !response.status().is_success() {
            let (status, message) = failure_message(response).await;
            error!("Enquiry submission failed: {}", message);
            return Err(RepositoryError::http(status, message).into());
        }

        let body = response.text().await.map_err(RepositoryError::from)?;
        let parsed = if body.trim().is_empty() {
            SubmissionResponse {
                message: None,
                item: None,
            }
        } else {
            serde_json::from_str(&body).map_err(RepositoryError::from)?
        };
        info!("Enquiry submitted");
        Ok(parsed)
    }
}
