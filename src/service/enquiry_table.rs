use crate::config::LayoutConfig;
use crate::dto::enquiry_dto::FieldUpdate;
use crate::model::enquiry::{DocFile, EnquiryRecord, Payment, Status};
use crate::model::schema::EnquirySchema;
use crate::repository::enquiry_repo::EnquiryRepository;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::service::attachment_viewer::AttachmentViewer;
use crate::service::cascade::FilterError;
use crate::service::filter::{FilterState, Stats};
use crate::service::pagination::{page_size_for, Paginator};
use crate::util::notifier::Notifier;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, instrument, warn};

/// Per-row intents offered by every enquiry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
    SetStatus(Status),
    SetPayment(Payment),
    ViewDocuments,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// No persistent effect: edit, or a mutation refused by a demo source.
    Stubbed,
    /// Delete declined at the confirmation prompt.
    Cancelled,
    Updated(FieldUpdate),
    Deleted,
    ViewerOpened { files: Vec<DocFile> },
    Failed(String),
    UnknownRecord,
}

/// Result of one fetch, tagged with the ticket it was issued under.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: u64,
    pub result: RepositoryResult<Vec<EnquiryRecord>>,
}

/// One admin table: records, filters, pager and attachment viewer over a
/// single data source.
pub struct EnquiryTable<R: EnquiryRepository, N: Notifier> {
    repo: R,
    notifier: N,
    layout: LayoutConfig,
    records: Vec<EnquiryRecord>,
    filters: FilterState,
    paginator: Paginator,
    viewer: AttachmentViewer,
    error: Option<String>,
    issued: AtomicU64,
    settled: u64,
}

impl<R: EnquiryRepository, N: Notifier> EnquiryTable<R, N> {
    pub fn new(repo: R, notifier: N, layout: LayoutConfig) -> Self {
        let filters = FilterState::new(repo.schema());
        let paginator = Paginator::new(page_size_for(layout.viewport_height, &layout));
        Self {
            repo,
            notifier,
            layout,
            records: Vec::new(),
            filters,
            paginator,
            viewer: AttachmentViewer::Closed,
            error: None,
            issued: AtomicU64::new(0),
            settled: 0,
        }
    }

    pub fn schema(&self) -> &EnquirySchema {
        self.repo.schema()
    }

    pub fn records(&self) -> &[EnquiryRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn viewer(&self) -> &AttachmentViewer {
        &self.viewer
    }

    pub fn close_viewer(&mut self) {
        self.viewer.close();
    }

    /// True while a fetch issued after the last applied one is outstanding.
    pub fn is_loading(&self) -> bool {
        self.issued.load(Ordering::SeqCst) > self.settled
    }

    // --- Fetching ---

    /// Fetches every record without touching table state. Several loads may
    /// be in flight; only the latest one is accepted by `apply`.
    #[instrument(skip(self), fields(kind = %self.repo.schema().kind))]
    pub async fn load(&self) -> FetchOutcome {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, "Fetch issued");
        let result = self.repo.fetch_all().await;
        FetchOutcome { ticket, result }
    }

    /// Installs a fetch result. Returns false when a newer fetch has been
    /// issued since, in which case the outcome is dropped.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let latest = self.issued.load(Ordering::SeqCst);
        if outcome.ticket != latest {
            warn!(ticket = outcome.ticket, latest, "Discarding stale fetch result");
            return false;
        }

        self.settled = outcome.ticket;
        match outcome.result {
            Ok(records) => {
                info!("Loaded {} enquiries", records.len());
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load enquiries: {}", e);
                self.records.clear();
                self.error = Some(e.user_message());
            }
        }
        self.clamp_page();
        true
    }

    pub async fn refresh(&mut self) -> bool {
        let outcome = self.load().await;
        self.apply(outcome)
    }

    // --- Filtering ---

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filters.search_text = text.into();
        self.paginator.reset();
    }

    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        self.filters.set_primary(self.repo.schema(), key, value)?;
        self.paginator.reset();
        Ok(())
    }

    pub fn set_exact(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        self.filters.set_exact(self.repo.schema(), key, value)?;
        self.paginator.reset();
        Ok(())
    }

    pub fn arm_exact(&mut self) {
        self.filters.arm_exact();
        self.paginator.reset();
    }

    pub fn clear_exact(&mut self) {
        self.filters.clear_exact();
        self.paginator.reset();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.paginator.reset();
    }

    /// Options currently offered for a primary filter.
    pub fn filter_options(&self, key: &str) -> Vec<&'static str> {
        self.filters.primary.options(self.repo.schema(), key)
    }

    pub fn exact_options(&self, key: &str) -> Vec<&'static str> {
        self.filters.exact.options(self.repo.schema(), key)
    }

    pub fn filtered(&self) -> Vec<&EnquiryRecord> {
        self.filters.apply(self.repo.schema(), &self.records)
    }

    pub fn stats(&self) -> Stats {
        self.filters.stats(self.repo.schema(), &self.records)
    }

    // --- Paging ---

    /// Recomputes the page size for a new viewport height.
    pub fn resize(&mut self, viewport_height: i64) {
        let size = page_size_for(viewport_height, &self.layout);
        debug!(viewport_height, size, "Page size recomputed");
        self.paginator.set_page_size(size);
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered().len())
    }

    pub fn page_rows(&self) -> Vec<&EnquiryRecord> {
        let filtered = self.filtered();
        self.paginator.window(&filtered).to_vec()
    }

    pub fn next_page(&mut self) -> bool {
        let len = self.filtered().len();
        self.paginator.next(len)
    }

    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev()
    }

    pub fn go_to_page(&mut self, page: usize) {
        let len = self.filtered().len();
        self.paginator.go_to(page, len);
    }

    fn clamp_page(&mut self) {
        let len = self.filtered().len();
        self.paginator.clamp(len);
    }

    // --- Row actions ---

    #[instrument(skip(self), fields(kind = %self.repo.schema().kind, id = %id))]
    pub async fn dispatch(&mut self, id: &str, action: RowAction) -> ActionOutcome {
        let Some(record) = self.records.iter().find(|record| record.id == id) else {
            warn!("Row action on unknown enquiry");
            self.notifier.notify(&format!("Enquiry {id} not found"));
            return ActionOutcome::UnknownRecord;
        };

        match action {
            RowAction::Edit => {
                self.notifier
                    .notify(&format!("Editing is not available yet (enquiry {id})"));
                ActionOutcome::Stubbed
            }
            RowAction::ViewDocuments => {
                self.viewer.open(record);
                ActionOutcome::ViewerOpened {
                    files: record.files.clone(),
                }
            }
            RowAction::Delete => self.delete(id).await,
            RowAction::SetStatus(status) => {
                if !self.repo.schema().statuses.contains(&status) {
                    let message = format!("Status {status} is not available for this enquiry type");
                    self.notifier.notify(&message);
                    return ActionOutcome::Failed(message);
                }
                self.update(id, FieldUpdate::Status(status)).await
            }
            RowAction::SetPayment(payment) => self.update(id, FieldUpdate::Payment(payment)).await,
        }
    }

    async fn update(&mut self, id: &str, update: FieldUpdate) -> ActionOutcome {
        match self.repo.update_field(id, update).await {
            Ok(()) => {
                if let Some(record) = self.records.iter_mut().find(|record| record.id == id) {
                    update.apply_to(record);
                }
                info!(update = ?update, "Enquiry row updated");
                self.notifier.notify(&update.describe());
                ActionOutcome::Updated(update)
            }
            Err(e) => self.refused_or_failed(e, "Failed to update enquiry"),
        }
    }

    async fn delete(&mut self, id: &str) -> ActionOutcome {
        if !self
            .notifier
            .confirm("Are you sure you want to delete this enquiry?")
        {
            debug!("Delete declined");
            return ActionOutcome::Cancelled;
        }

        match self.repo.remove(id).await {
            Ok(()) => {
                self.records.retain(|record| record.id != id);
                if self.viewer.record_id() == Some(id) {
                    self.viewer.close();
                }
                self.clamp_page();
                info!("Enquiry row removed");
                self.notifier.notify("Enquiry deleted");
                ActionOutcome::Deleted
            }
            Err(e) => self.refused_or_failed(e, "Failed to delete enquiry"),
        }
    }

    fn refused_or_failed(&self, err: RepositoryError, context: &str) -> ActionOutcome {
        if let RepositoryError::ReadOnly(notice) = &err {
            self.notifier.notify(notice);
            return ActionOutcome::Stubbed;
        }
        let message = format!("{context}: {}", err.user_message());
        error!("{}", message);
        self.notifier.notify(&message);
        ActionOutcome::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::static_repo::StaticEnquiryRepository;
    use crate::model::schema::EnquiryKind;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Silent {
        notices: Mutex<Vec<String>>,
    }

    impl Notifier for Silent {
        fn confirm(&self, _message: &str) -> bool {
            true
        }

        fn notify(&self, message: &str) {
            self.notices.lock().unwrap().push(message.to_string());
        }
    }

    fn demo_table(kind: EnquiryKind) -> EnquiryTable<StaticEnquiryRepository, Silent> {
        EnquiryTable::new(
            StaticEnquiryRepository::demo(kind),
            Silent::default(),
            LayoutConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_refresh_loads_demo_rows() {
        let mut table = demo_table(EnquiryKind::Pcc);
        assert!(table.records().is_empty());
        assert!(table.refresh().await);
        assert_eq!(table.records().len(), 3);
        assert!(!table.is_loading());
        assert_eq!(table.error(), None);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let mut table = demo_table(EnquiryKind::Pcc);
        table.refresh().await;
        table.resize(2000);
        assert_eq!(table.page_size(), 15);

        table.set_filter("country", "Russia").unwrap();
        assert_eq!(table.page(), 1);
        assert_eq!(table.page_rows().len(), 2);
        assert!(table.set_filter("country", "Atlantis").is_err());
    }

    #[tokio::test]
    async fn test_demo_mutation_is_stubbed() {
        let mut table = demo_table(EnquiryKind::Pcc);
        table.refresh().await;
        let id = table.records()[0].id.clone();

        let outcome = table.dispatch(&id, RowAction::SetPayment(Payment::Paid)).await;
        assert_eq!(outcome, ActionOutcome::Stubbed);
        assert_eq!(table.records()[0].payment, Payment::Pending);

        let outcome = table.dispatch(&id, RowAction::Delete).await;
        assert_eq!(outcome, ActionOutcome::Stubbed);
        assert_eq!(table.records().len(), 3);
    }

    #[tokio::test]
    async fn test_status_outside_kind_is_rejected() {
        let mut table = demo_table(EnquiryKind::Pcc);
        table.refresh().await;
        let id = table.records()[0].id.clone();
        let outcome = table.dispatch(&id, RowAction::SetStatus(Status::Dispatched)).await;
        assert!(matches!(outcome, ActionOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_view_documents_opens_viewer() {
        let mut table = demo_table(EnquiryKind::Pcc);
        table.refresh().await;
        let id = table.records()[0].id.clone();
        let outcome = table.dispatch(&id, RowAction::ViewDocuments).await;
        assert!(matches!(outcome, ActionOutcome::ViewerOpened { ref files } if files.len() == 1));
        assert_eq!(table.viewer().record_id(), Some(id.as_str()));

        table.close_viewer();
        assert!(!table.viewer().is_open());
        assert_eq!(table.dispatch("missing", RowAction::Edit).await, ActionOutcome::UnknownRecord);
    }
}
