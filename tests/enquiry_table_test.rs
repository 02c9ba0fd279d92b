mod common;

use common::{api_config, init_tracing, pcc_list_body, RecordingNotifier};
use egs_admin::config::LayoutConfig;
use egs_admin::dto::enquiry_dto::FieldUpdate;
use egs_admin::repository::static_repo::DEMO_MODE_NOTICE;
use egs_admin::util::credentials::StaticCredentials;
use egs_admin::{
    ActionOutcome, EnquiryKind, EnquiryTable, Payment, RestEnquiryRepository, RowAction, StaticEnquiryRepository,
    Status,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PCC_PATH: &str = "/api/pcc/pcc-legalization/enquiry";

async fn pcc_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PCC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(pcc_list_body()))
        .mount(&server)
        .await;
    server
}

async fn loaded_table(
    server: &MockServer,
    notifier: Arc<RecordingNotifier>,
) -> EnquiryTable<RestEnquiryRepository, Arc<RecordingNotifier>> {
    let repo = RestEnquiryRepository::new(
        api_config(&server.uri()),
        EnquiryKind::Pcc.schema(),
        Arc::new(StaticCredentials::new(Some("t0k3n".to_string()))),
    )
    .unwrap();
    let mut table = EnquiryTable::new(repo, notifier, LayoutConfig::default());
    assert!(table.refresh().await);
    table
}

#[tokio::test]
async fn test_successful_status_update_touches_only_that_row() {
    init_tracing();
    let server = pcc_backend().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PCC_PATH}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::accepting();
    let mut table = loaded_table(&server, notifier.clone()).await;
    let before = table.records().to_vec();

    let outcome = table.dispatch("abc", RowAction::SetStatus(Status::Approved)).await;

    assert_eq!(outcome, ActionOutcome::Updated(FieldUpdate::Status(Status::Approved)));
    assert_eq!(table.records()[0].status, Status::Approved);
    assert_eq!(table.records()[1..], before[1..]);
    assert_eq!(notifier.notices(), vec!["Status updated to Approved".to_string()]);
}

#[tokio::test]
async fn test_failed_payment_update_leaves_rows_unchanged() {
    let server = pcc_backend().await;
    Mock::given(method("PATCH"))
        .and(path(format!("{PCC_PATH}/abc")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Database down"})))
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::accepting();
    let mut table = loaded_table(&server, notifier.clone()).await;
    let before = table.records().to_vec();

    let outcome = table.dispatch("abc", RowAction::SetPayment(Payment::Paid)).await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed("Failed to update enquiry: Database down".to_string())
    );
    assert_eq!(table.records(), &before[..]);
    assert_eq!(notifier.notices(), vec!["Failed to update enquiry: Database down".to_string()]);
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = pcc_backend().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::declining();
    let mut table = loaded_table(&server, notifier.clone()).await;

    let outcome = table.dispatch("def", RowAction::Delete).await;

    assert_eq!(outcome, ActionOutcome::Cancelled);
    assert_eq!(table.records().len(), 3);
    assert_eq!(notifier.prompts().len(), 1);
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_confirmed_delete_removes_row_and_closes_viewer() {
    let server = pcc_backend().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{PCC_PATH}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = RecordingNotifier::accepting();
    let mut table = loaded_table(&server, notifier.clone()).await;
    table.dispatch("abc", RowAction::ViewDocuments).await;
    assert!(table.viewer().is_open());

    let outcome = table.dispatch("abc", RowAction::Delete).await;

    assert_eq!(outcome, ActionOutcome::Deleted);
    assert!(table.records().iter().all(|record| record.id != "abc"));
    assert_eq!(table.records().len(), 2);
    assert!(!table.viewer().is_open());
}

#[tokio::test]
async fn test_fetch_failure_empties_table_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PCC_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "Maintenance"})))
        .mount(&server)
        .await;

    let repo = RestEnquiryRepository::new(
        api_config(&server.uri()),
        EnquiryKind::Pcc.schema(),
        Arc::new(StaticCredentials::new(None)),
    )
    .unwrap();
    let mut table = EnquiryTable::new(repo, RecordingNotifier::accepting(), LayoutConfig::default());

    assert!(table.refresh().await);
    assert!(table.records().is_empty());
    assert_eq!(table.error(), Some("Maintenance"));
    assert_eq!(table.total_pages(), 1);
}

#[tokio::test]
async fn test_stale_fetch_is_discarded() {
    let mut table = EnquiryTable::new(
        StaticEnquiryRepository::demo(EnquiryKind::Pcc),
        RecordingNotifier::accepting(),
        LayoutConfig::default(),
    );

    let first = table.load().await;
    let second = table.load().await;
    assert!(table.is_loading());

    assert!(!table.apply(first));
    assert!(table.records().is_empty());
    assert!(table.is_loading());

    assert!(table.apply(second));
    assert_eq!(table.records().len(), 3);
    assert!(!table.is_loading());
}

#[tokio::test]
async fn test_demo_source_refuses_mutations_with_notice() {
    let notifier = RecordingNotifier::accepting();
    let mut table = EnquiryTable::new(
        StaticEnquiryRepository::demo(EnquiryKind::StickerVisa),
        notifier.clone(),
        LayoutConfig::default(),
    );
    table.refresh().await;
    let id = table.records()[0].id.clone();
    let before = table.records().to_vec();

    assert_eq!(table.dispatch(&id, RowAction::Delete).await, ActionOutcome::Stubbed);
    assert_eq!(
        table.dispatch(&id, RowAction::SetStatus(Status::Approved)).await,
        ActionOutcome::Stubbed
    );
    assert_eq!(table.records(), &before[..]);
    assert_eq!(notifier.notices(), vec![DEMO_MODE_NOTICE.to_string(), DEMO_MODE_NOTICE.to_string()]);
}

#[tokio::test]
async fn test_edit_is_a_notice_only() {
    let notifier = RecordingNotifier::accepting();
    let mut table = EnquiryTable::new(
        StaticEnquiryRepository::demo(EnquiryKind::Translation),
        notifier.clone(),
        LayoutConfig::default(),
    );
    table.refresh().await;
    let id = table.records()[0].id.clone();

    assert_eq!(table.dispatch(&id, RowAction::Edit).await, ActionOutcome::Stubbed);
    assert_eq!(notifier.notices().len(), 1);
}

#[tokio::test]
async fn test_hrd_cascade_through_table() {
    let mut table = EnquiryTable::new(
        StaticEnquiryRepository::demo(EnquiryKind::HrdAttestation),
        RecordingNotifier::accepting(),
        LayoutConfig::default(),
    );
    table.refresh().await;

    table.set_filter("category", "Personal Documents").unwrap();
    table.set_filter("group", "Civil Records").unwrap();
    table.set_filter("docType", "Birth Certificate").unwrap();
    assert_eq!(table.filtered().len(), 1);

    table.set_filter("category", "Educational Documents").unwrap();
    assert_eq!(table.filters().primary.get("docType"), Some("Select Document Type"));
    assert_eq!(table.filters().primary.get("group"), Some("Select Group"));
    assert_eq!(table.filtered().len(), 1);
    assert!(table.filter_options("docType").is_empty());
}

#[tokio::test]
async fn test_page_resets_when_filters_change() {
    let records: Vec<_> = (0..23)
        .map(|i| {
            egs_admin::EnquiryRecord::new(format!("id-{i}"), format!("user{i}@example.com"), "050")
                .with_field("country", if i % 2 == 0 { "Russia" } else { "Serbia" })
        })
        .collect();
    let mut table = EnquiryTable::new(
        StaticEnquiryRepository::new(EnquiryKind::Pcc.schema(), records),
        RecordingNotifier::accepting(),
        LayoutConfig::default(),
    );
    table.refresh().await;

    assert_eq!(table.page_size(), 10);
    assert_eq!(table.total_pages(), 3);
    table.go_to_page(3);
    assert_eq!(table.page_rows().len(), 3);

    table.set_search("user1");
    assert_eq!(table.page(), 1);

    table.next_page();
    table.set_filter("country", "Serbia").unwrap();
    assert_eq!(table.page(), 1);
}
