mod common;

use common::{api_config, init_tracing};
use egs_admin::config::CloudinaryConfig;
use egs_admin::dto::enquiry_dto::NewEnquiryRequest;
use egs_admin::dto::upload_dto::UploadFile;
use egs_admin::service::submission_service::{SubmissionError, SubmissionService, SubmissionServiceImpl};
use egs_admin::service::upload_service::CloudinaryUploader;
use egs_admin::EnquiryKind;
use serde_json::json;
use std::time::Duration;
use std::collections::BTreeMap;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(server: &MockServer) -> SubmissionServiceImpl {
    let config = CloudinaryConfig {
        cloud_name: "egs".to_string(),
        upload_preset: "enquiries".to_string(),
        api_base: server.uri(),
    };
    let uploader = CloudinaryUploader::new(config, Duration::from_secs(30)).unwrap();
    SubmissionServiceImpl::new(api_config(&server.uri()), Arc::new(uploader)).unwrap()
}

fn hrd_request(doc_type: &str) -> NewEnquiryRequest {
    let fields: BTreeMap<String, String> = [
        ("category", "Educational Documents"),
        ("group", "University"),
        ("docType", doc_type),
        ("state", "Kerala"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    NewEnquiryRequest {
        email: "arun@example.com".to_string(),
        phone: "+971505550001".to_string(),
        no_of_documents: 1,
        fields,
    }
}

#[tokio::test]
async fn test_submission_uploads_then_posts() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/egs/auto/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cloudinary.com/egs/raw/upload/v1/degree.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/hrd/hrd-attestation/enquiry"))
        .and(body_partial_json(json!({
            "email": "arun@example.com",
            "phone": "+971505550001",
            "category": "Educational Documents",
            "docType": "Degree Certificate",
            "noOfDocuments": 1,
            "documents": [{
                "index": 0,
                "originalName": "degree.pdf",
                "mimeType": "application/pdf",
                "url": "https://res.cloudinary.com/egs/raw/upload/v1/degree.pdf"
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "Enquiry submitted successfully",
            "item": {"_id": "new-1", "email": "arun@example.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let files = vec![UploadFile::new("degree.pdf", "application/pdf", b"%PDF".to_vec())];
    let response = service(&server)
        .submit(EnquiryKind::HrdAttestation, hrd_request("Degree Certificate"), files)
        .await
        .unwrap();

    assert_eq!(response.message.as_deref(), Some("Enquiry submitted successfully"));
    assert_eq!(response.item.map(|item| item.id).as_deref(), Some("new-1"));
}

#[tokio::test]
async fn test_invalid_submission_makes_no_request() {
    let server = MockServer::start().await;

    let err = service(&server)
        .submit(EnquiryKind::HrdAttestation, hrd_request("Select Document Type"), Vec::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmissionError::Validation(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_rejection_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/hrd/hrd-attestation/enquiry"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "Duplicate enquiry"})))
        .mount(&server)
        .await;

    let err = service(&server)
        .submit(EnquiryKind::HrdAttestation, hrd_request("Transcript"), Vec::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 422: Duplicate enquiry");
}
