pub mod app;
pub mod config;
pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;
pub mod service;
pub mod util;

pub use model::enquiry::{DocFile, DocKind, EnquiryRecord, Payment, Status};
pub use model::schema::{EnquiryKind, EnquirySchema};
pub use repository::enquiry_repo::{EnquiryRepository, RestEnquiryRepository};
pub use repository::static_repo::StaticEnquiryRepository;
pub use service::enquiry_table::{ActionOutcome, EnquiryTable, RowAction};
pub use util::credentials::CredentialProvider;
pub use util::notifier::Notifier;
