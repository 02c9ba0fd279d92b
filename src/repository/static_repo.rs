use crate::dto::enquiry_dto::FieldUpdate;
use crate::model::enquiry::{DocFile, EnquiryRecord, Payment, Status};
use crate::model::schema::{EnquiryKind, EnquirySchema};
use crate::repository::enquiry_repo::EnquiryRepository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use tracing::{info, instrument};

pub const DEMO_MODE_NOTICE: &str = "Demo data: changes are not saved.";

/// Fixed in-memory rows for tables without a backend. Nothing is persisted.
pub struct StaticEnquiryRepository {
    schema: EnquirySchema,
    records: Vec<EnquiryRecord>,
}

impl StaticEnquiryRepository {
    pub fn new(schema: EnquirySchema, records: Vec<EnquiryRecord>) -> Self {
        Self { schema, records }
    }

    pub fn demo(kind: EnquiryKind) -> Self {
        Self::new(kind.schema(), demo_records(kind))
    }
}

#[async_trait]
impl EnquiryRepository for StaticEnquiryRepository {
    fn schema(&self) -> &EnquirySchema {
        &self.schema
    }

    #[instrument(skip(self), fields(kind = %self.schema.kind))]
    async fn fetch_all(&self) -> RepositoryResult<Vec<EnquiryRecord>> {
        info!("Serving {} demo enquiries", self.records.len());
        Ok(self.records.clone())
    }

    async fn update_field(&self, _id: &str, _update: FieldUpdate) -> RepositoryResult<()> {
        Err(RepositoryError::read_only(DEMO_MODE_NOTICE))
    }

    async fn remove(&self, _id: &str) -> RepositoryResult<()> {
        Err(RepositoryError::read_only(DEMO_MODE_NOTICE))
    }
}

fn local_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn row(email: &str, contact: &str, fields: &[(&str, &str)]) -> EnquiryRecord {
    fields.iter().fold(
        EnquiryRecord::new(local_id(), email, contact),
        |record, (key, value)| record.with_field(*key, *value),
    )
}

fn demo_records(kind: EnquiryKind) -> Vec<EnquiryRecord> {
    match kind {
        EnquiryKind::Pcc => vec![
            row("user1@example.com", "+971500000001", &[("country", "Russia"), ("companyName", "Volga Trading"), ("noOfDocuments", "2")])
                .with_file(DocFile::new("pcc.pdf", "https://res.cloudinary.com/demo/pcc.pdf", Some("application/pdf".into()), Some(120_400)))
                .with_created_at("2 hours ago"),
            row("user2@example.com", "+971500000002", &[("country", "Serbia"), ("companyName", "Danube Logistics"), ("noOfDocuments", "1")])
                .with_status(Status::Approved)
                .with_payment(Payment::Paid)
                .with_created_at("Yesterday"),
            row("user3@example.com", "+971500000003", &[("country", "Russia"), ("companyName", "Ural Metals"), ("noOfDocuments", "3")])
                .with_status(Status::Rejected)
                .with_created_at("3 days ago"),
        ],
        EnquiryKind::Translation => vec![
            row("anna@example.com", "+971501110001", &[("sourceLanguage", "Russian"), ("targetLanguage", "English"), ("documentType", "Personal")]),
            row("omar@example.com", "+971501110002", &[("sourceLanguage", "Arabic"), ("targetLanguage", "English"), ("documentType", "Legal")])
                .with_status(Status::Dispatched)
                .with_payment(Payment::Paid),
        ],
        EnquiryKind::Insurance => vec![
            row("li@example.com", "+971502220001", &[("insuranceType", "Travel Insurance"), ("duration", "30 Days"), ("fullName", "Li Wei")]),
            row("sara@example.com", "+971502220002", &[("insuranceType", "Visit Visa Medical"), ("duration", "90 Days"), ("fullName", "Sara Khan")])
                .with_payment(Payment::Paid),
        ],
        EnquiryKind::DummyTicket => vec![
            row("john@example.com", "+971503330001", &[("tripType", "Round Trip"), ("purpose", "Visa Application"), ("from", "DXB"), ("to", "LHR")]),
            row("maria@example.com", "+971503330002", &[("tripType", "One Way"), ("purpose", "Proof of Return"), ("from", "AUH"), ("to", "MNL")]),
        ],
        EnquiryKind::StickerVisa => vec![
            row("raj@example.com", "+971504440001", &[("country", "UAE"), ("visaType", "Tourist 30 Days"), ("nationality", "Indian")])
                .with_file(DocFile::new("passport.jpg", "https://res.cloudinary.com/demo/passport.jpg", Some("image/jpeg".into()), Some(88_000))),
            row("fatima@example.com", "+971504440002", &[("country", "Saudi Arabia"), ("visaType", "Umrah"), ("nationality", "Pakistani")])
                .with_status(Status::Received),
        ],
        EnquiryKind::HrdAttestation => vec![
            row("arun@example.com", "+971505550001", &[("category", "Educational Documents"), ("group", "University"), ("docType", "Degree Certificate"), ("state", "Kerala"), ("noOfDocuments", "2")]),
            row("priya@example.com", "+971505550002", &[("category", "Personal Documents"), ("group", "Civil Records"), ("docType", "Birth Certificate"), ("state", "Tamil Nadu"), ("noOfDocuments", "1")])
                .with_status(Status::Dispatched)
                .with_payment(Payment::Paid),
        ],
        EnquiryKind::Assistant => vec![
            row("noor@example.com", "+971506660001", &[("service", "Appointment Booking"), ("country", "UAE"), ("appointmentDate", "2026-11-02")]),
            row("ken@example.com", "+971506660002", &[("service", "Form Filling"), ("country", "India"), ("appointmentDate", "2026-11-05")]),
        ],
    }
}
