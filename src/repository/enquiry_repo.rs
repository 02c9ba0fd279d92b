use crate::config::ApiConfig;
use crate::dto::enquiry_dto::{ApiList, FieldUpdate};
use crate::model::enquiry::EnquiryRecord;
use crate::model::schema::EnquirySchema;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::util::credentials::CredentialProvider;
use crate::util::http::{build_client, failure_message, with_bearer};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Data source behind one enquiry table.
#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    fn schema(&self) -> &EnquirySchema;
    async fn fetch_all(&self) -> RepositoryResult<Vec<EnquiryRecord>>;
    async fn update_field(&self, id: &str, update: FieldUpdate) -> RepositoryResult<()>;
    async fn remove(&self, id: &str) -> RepositoryResult<()>;
}

#[async_trait]
impl<T: EnquiryRepository + ?Sized> EnquiryRepository for Box<T> {
    fn schema(&self) -> &EnquirySchema {
        (**self).schema()
    }

    async fn fetch_all(&self) -> RepositoryResult<Vec<EnquiryRecord>> {
        (**self).fetch_all().await
    }

    async fn update_field(&self, id: &str, update: FieldUpdate) -> RepositoryResult<()> {
        (**self).update_field(id, update).await
    }

    async fn remove(&self, id: &str) -> RepositoryResult<()> {
        (**self).remove(id).await
    }
}

#[async_trait]
impl<T: EnquiryRepository + ?Sized> EnquiryRepository for Arc<T> {
    fn schema(&self) -> &EnquirySchema {
        (**self).schema()
    }

    async fn fetch_all(&self) -> RepositoryResult<Vec<EnquiryRecord>> {
        (**self).fetch_all().await
    }

    async fn update_field(&self, id: &str, update: FieldUpdate) -> RepositoryResult<()> {
        (**self).update_field(id, update).await
    }

    async fn remove(&self, id: &str) -> RepositoryResult<()> {
        (**self).remove(id).await
    }
}

pub struct RestEnquiryRepository {
    client: Client,
    config: ApiConfig,
    schema: EnquirySchema,
    credentials: Arc<dyn CredentialProvider>,
}

impl RestEnquiryRepository {
    pub fn new(
        config: ApiConfig,
        schema: EnquirySchema,
        credentials: Arc<dyn CredentialProvider>,
    ) -> RepositoryResult<Self> {
        let client = build_client(&config).map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            RepositoryError::generic(e)
        })?;
        Ok(Self {
            client,
            config,
            schema,
            credentials,
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        with_bearer(builder, self.credentials.as_ref())
    }

    /// Turns a non-2xx response into an error. A 401 also drops the stored
    /// token so the next run starts from a clean login.
    async fn ensure_success(&self, response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let (code, message) = failure_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            warn!("Token rejected by the API, clearing it");
            self.credentials.clear();
            return Err(RepositoryError::unauthorized(message));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::not_found(message));
        }
        Err(RepositoryError::http(code, message))
    }
}

#[async_trait]
impl EnquiryRepository for RestEnquiryRepository {
    fn schema(&self) -> &EnquirySchema {
        &self.schema
    }

    #[instrument(skip(self), fields(kind = %self.schema.kind))]
    async fn fetch_all(&self) -> RepositoryResult<Vec<EnquiryRecord>> {
        let url = self.config.endpoint(&self.schema.collection_path());
        info!(url = %url, "Fetching enquiries");

        let response = self.request(self.client.get(&url)).send().await.map_err(|e| {
            error!("Failed to fetch enquiries: {}", e);
            RepositoryError::from(e)
        })?;
        let response = self.ensure_success(response).await?;

        let body = response.text().await?;
        let list: ApiList = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse enquiry list: {}", e);
            RepositoryError::from(e)
        })?;

        let records: Vec<EnquiryRecord> = list
            .into_items()
            .into_iter()
            .map(|item| item.into_record(&self.schema))
            .collect();
        info!("Fetched {} enquiries", records.len());
        Ok(records)
    }

    #[instrument(skip(self), fields(kind = %self.schema.kind, id = %id))]
    async fn update_field(&self, id: &str, update: FieldUpdate) -> RepositoryResult<()> {
        info!(update = ?update, "Updating enquiry");
        let url = self.config.endpoint(&self.schema.item_path(id));
        let response = self
            .request(self.client.patch(&url).json(&update))
            .send()
            .await?;
        match self.ensure_success(response).await {
            Ok(_) => {
                info!("Enquiry updated successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to update enquiry: {}", e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self), fields(kind = %self.schema.kind, id = %id))]
    async fn remove(&self, id: &str) -> RepositoryResult<()> {
        info!("Deleting enquiry");
        let url = self.config.endpoint(&self.schema.item_path(id));
        let response = self.request(self.client.delete(&url)).send().await?;
        match self.ensure_success(response).await {
            Ok(_) => {
                info!("Enquiry deleted successfully");
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete enquiry: {}", e);
                Err(e)
            }
        }
    }
}
