use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
    Dispatched,
    Received,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::Approved,
        Status::Rejected,
        Status::Dispatched,
        Status::Received,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
            Status::Dispatched => "Dispatched",
            Status::Received => "Received",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Payment {
    #[default]
    Pending,
    Paid,
}

impl Payment {
    pub const ALL: [Payment; 2] = [Payment::Pending, Payment::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Payment::Pending => "Pending",
            Payment::Paid => "Paid",
        }
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Payment {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Payment::ALL
            .into_iter()
            .find(|payment| payment.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownValue(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownValue(pub String);

/// Attachment category used to pick the icon in the attachment viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Pdf,
    Image,
    Other,
}

const IMAGE_SUFFIXES: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg"];

impl DocKind {
    /// Infers the kind from the MIME type first, then from the URL suffix.
    pub fn infer(mime_type: Option<&str>, url: &str) -> Self {
        if let Some(mime) = mime_type.map(|m| m.trim().to_ascii_lowercase()) {
            if mime == "application/pdf" || mime.ends_with("/pdf") {
                return DocKind::Pdf;
            }
            if mime.starts_with("image/") {
                return DocKind::Image;
            }
        }

        // Query strings and fragments would hide the extension.
        let path = url
            .split(&['?', '#'][..])
            .next()
            .unwrap_or(url)
            .to_ascii_lowercase();
        if path.ends_with(".pdf") {
            DocKind::Pdf
        } else if IMAGE_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
            DocKind::Image
        } else {
            DocKind::Other
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocKind::Pdf => "[PDF]",
            DocKind::Image => "[IMG]",
            DocKind::Other => "[FILE]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocFile {
    pub name: String,
    pub url: String,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
    pub kind: DocKind,
}

impl DocFile {
    pub fn new(name: impl Into<String>, url: impl Into<String>, mime_type: Option<String>, size: Option<u64>) -> Self {
        let url = url.into();
        let kind = DocKind::infer(mime_type.as_deref(), &url);
        DocFile {
            name: name.into(),
            url,
            mime_type,
            size,
            kind,
        }
    }
}

/// One row of an admin enquiry table.
///
/// `fields` holds the classification values (country, category, visa type, ...)
/// keyed by the schema's field keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnquiryRecord {
    pub id: String,
    pub email: String,
    pub contact: String,
    pub fields: BTreeMap<String, String>,
    pub status: Status,
    pub payment: Payment,
    pub files: Vec<DocFile>,
    pub created_at: String,
}

impl EnquiryRecord {
    pub fn new(id: impl Into<String>, email: impl Into<String>, contact: impl Into<String>) -> Self {
        EnquiryRecord {
            id: id.into(),
            email: email.into(),
            contact: contact.into(),
            fields: BTreeMap::new(),
            status: Status::Pending,
            payment: Payment::Pending,
            files: Vec::new(),
            created_at: String::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = payment;
        self
    }

    pub fn with_file(mut self, file: DocFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Looks up a filterable value by key. Built-in keys are `id`, `email`,
    /// `contact`, `status` and `payment`; anything else is a classification field.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "id" => Some(&self.id),
            "email" => Some(&self.email),
            "contact" => Some(&self.contact),
            "status" => Some(self.status.as_str()),
            "payment" => Some(self.payment.as_str()),
            other => self.fields.get(other).map(String::as_str),
        }
    }
}
