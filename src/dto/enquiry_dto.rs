use crate::model::enquiry::{DocFile, EnquiryRecord, Payment, Status};
use crate::model::schema::EnquirySchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;
use validator::Validate;

/// Collection responses come either wrapped as `{count, items}` or as a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiList {
    Envelope {
        #[serde(default)]
        count: Option<u64>,
        items: Vec<ApiItem>,
    },
    Bare(Vec<ApiItem>),
}

impl ApiList {
    pub fn into_items(self) -> Vec<ApiItem> {
        match self {
            ApiList::Envelope { items, .. } => items,
            ApiList::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiDocument {
    Detailed {
        #[serde(default)]
        index: Option<u32>,
        #[serde(default, rename = "originalName")]
        original_name: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default, rename = "mimeType", alias = "type")]
        mime_type: Option<String>,
        #[serde(default)]
        size: Option<u64>,
        #[serde(alias = "secure_url")]
        url: String,
    },
    Url(String),
}

impl ApiDocument {
    pub fn into_doc_file(self) -> DocFile {
        match self {
            ApiDocument::Detailed {
                original_name,
                name,
                mime_type,
                size,
                url,
                ..
            } => {
                let name = original_name
                    .or(name)
                    .unwrap_or_else(|| file_name_from_url(&url));
                DocFile::new(name, url, mime_type, size)
            }
            ApiDocument::Url(url) => DocFile::new(file_name_from_url(&url), url, None, None),
        }
    }
}

fn file_name_from_url(url: &str) -> String {
    url.split(&['?', '#'][..])
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("document")
        .to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub documents: Option<Vec<ApiDocument>>,
    #[serde(default)]
    pub files: Option<Vec<ApiDocument>>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment: Option<String>,
    /// Kind-specific classification values (country, visaType, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiItem {
    /// Maps the server payload into the local row shape of `schema`.
    pub fn into_record(mut self, schema: &EnquirySchema) -> EnquiryRecord {
        let status = parse_or_pending::<Status>(self.status.as_deref(), "status", &self.id);
        let payment = parse_or_pending::<Payment>(self.payment.as_deref(), "payment", &self.id);

        let mut fields = BTreeMap::new();
        for field in schema.fields {
            if let Some(value) = self.extra.remove(field.api_key).and_then(stringify) {
                fields.insert(field.key.to_string(), value);
            }
        }

        let files = self
            .documents
            .or(self.files)
            .unwrap_or_default()
            .into_iter()
            .map(ApiDocument::into_doc_file)
            .collect();

        EnquiryRecord {
            id: self.id,
            email: self.email.unwrap_or_default(),
            contact: self.phone.or(self.contact).or(self.mobile).unwrap_or_default(),
            fields,
            status,
            payment,
            files,
            created_at: self
                .created_at
                .as_deref()
                .map(format_created_at)
                .unwrap_or_default(),
        }
    }
}

fn parse_or_pending<T>(raw: Option<&str>, what: &str, id: &str) -> T
where
    T: std::str::FromStr + Default,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => T::default(),
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(enquiry_id = %id, value = %value, "Unknown {} value, defaulting to Pending", what);
            T::default()
        }),
    }
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Renders RFC 3339 timestamps as `16 Oct 2026, 09:30`; anything else
/// ("2 hours ago") is shown as received.
pub fn format_created_at(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(timestamp) => timestamp.format("%d %b %Y, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// PATCH body for a single-field update: `{"status": ...}` or `{"payment": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldUpdate {
    Status(Status),
    Payment(Payment),
}

impl FieldUpdate {
    pub fn apply_to(&self, record: &mut EnquiryRecord) {
        match *self {
            FieldUpdate::Status(status) => record.status = status,
            FieldUpdate::Payment(payment) => record.payment = payment,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FieldUpdate::Status(status) => format!("Status updated to {status}"),
            FieldUpdate::Payment(payment) => format!("Payment updated to {payment}"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// --- Public submission ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEnquiryRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 20))]
    pub phone: String,

    #[validate(range(min = 1, max = 50))]
    pub no_of_documents: u32,

    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedDocument {
    pub index: u32,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub email: String,
    pub phone: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub no_of_documents: u32,
    pub documents: Vec<SubmittedDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub item: Option<ApiItem>,
}
