use crate::app::cli::{FilterArgs, TableCommand};
use crate::model::enquiry::EnquiryRecord;
use crate::model::schema::EnquirySchema;
use crate::repository::enquiry_repo::EnquiryRepository;
use crate::service::enquiry_table::{ActionOutcome, EnquiryTable, RowAction};
use crate::service::filter::Stats;
use crate::util::error::ServiceError;
use crate::util::notifier::Notifier;
use tracing::{debug, info};

pub async fn handle<R, N>(table: &mut EnquiryTable<R, N>, command: TableCommand) -> Result<(), ServiceError>
where
    R: EnquiryRepository,
    N: Notifier,
{
    info!(kind = %table.schema().kind, command = ?command, "Running table command");
    load(table).await?;

    match command {
        TableCommand::List {
            filters,
            page,
            viewport,
            json,
        } => {
            if let Some(height) = viewport {
                table.resize(height);
            }
            apply_filters(table, &filters)?;
            table.go_to_page(page);
            if json {
                let rows = table.page_rows();
                let body = serde_json::to_string_pretty(&rows)
                    .map_err(|e| ServiceError::InternalError(e.to_string()))?;
                println!("{body}");
            } else {
                print_page(table);
            }
            Ok(())
        }
        TableCommand::Stats { filters } => {
            apply_filters(table, &filters)?;
            print_stats(&table.stats());
            Ok(())
        }
        TableCommand::Options { key, filters } => {
            apply_filters(table, &filters)?;
            let options = if table.schema().filter(&key).is_some() {
                table.filter_options(&key)
            } else if table.schema().exact(&key).is_some() {
                table.exact_options(&key)
            } else {
                return Err(ServiceError::InvalidInput(format!("unknown filter field: {key}")));
            };
            if options.is_empty() {
                println!("No options until the parent field is selected.");
            }
            for option in options {
                println!("{option}");
            }
            Ok(())
        }
        TableCommand::SetStatus { id, status } => finish(table.dispatch(&id, RowAction::SetStatus(status)).await),
        TableCommand::SetPayment { id, payment } => {
            finish(table.dispatch(&id, RowAction::SetPayment(payment)).await)
        }
        TableCommand::Delete { id } => finish(table.dispatch(&id, RowAction::Delete).await),
        TableCommand::Edit { id } => finish(table.dispatch(&id, RowAction::Edit).await),
        TableCommand::Docs { id } => {
            let outcome = table.dispatch(&id, RowAction::ViewDocuments).await;
            if let ActionOutcome::ViewerOpened { .. } = outcome {
                print_attachments(table);
                table.close_viewer();
            }
            finish(outcome)
        }
    }
}

async fn load<R: EnquiryRepository, N: Notifier>(table: &mut EnquiryTable<R, N>) -> Result<(), ServiceError> {
    table.refresh().await;
    match table.error() {
        Some(message) => Err(ServiceError::InternalError(format!("Failed to load enquiries: {message}"))),
        None => Ok(()),
    }
}

fn finish(outcome: ActionOutcome) -> Result<(), ServiceError> {
    match outcome {
        ActionOutcome::Failed(message) => Err(ServiceError::InternalError(message)),
        ActionOutcome::UnknownRecord => Err(ServiceError::NotFound("No enquiry with that id".to_string())),
        _ => Ok(()),
    }
}

/// Parents are set before children so a hierarchy reset never wipes a value
/// given on the same command line.
pub fn apply_filters<R: EnquiryRepository, N: Notifier>(
    table: &mut EnquiryTable<R, N>,
    args: &FilterArgs,
) -> Result<(), ServiceError> {
    if let Some(search) = &args.search {
        table.set_search(search.as_str());
    }

    let mut primary = args.filters.clone();
    primary.sort_by_key(|(key, _)| depth(table.schema(), key));
    for (key, value) in &primary {
        table.set_filter(key, value)?;
    }

    if !args.exact.is_empty() {
        let mut exact = args.exact.clone();
        exact.sort_by_key(|(key, _)| depth(table.schema(), key));
        for (key, value) in &exact {
            table.set_exact(key, value)?;
        }
        table.arm_exact();
    }
    debug!(filtered = table.filtered().len(), "Filters applied");
    Ok(())
}

fn depth(schema: &EnquirySchema, key: &str) -> usize {
    let mut depth = 0;
    let mut current = key;
    while let Some(link) = schema.parent_link(current) {
        depth += 1;
        current = link.parent;
    }
    depth
}

fn print_page<R: EnquiryRepository, N: Notifier>(table: &EnquiryTable<R, N>) {
    let schema = table.schema();
    let filtered = table.filtered().len();
    let rows = table.page_rows();

    println!("{} ({} of {} enquiries)", schema.title, filtered, table.records().len());
    if rows.is_empty() {
        println!("No enquiries match the current filters.");
    }
    for record in rows {
        println!("{}", render_row(schema, record));
    }
    println!("Page {} of {}", table.page(), table.total_pages());
}

pub fn render_row(schema: &EnquirySchema, record: &EnquiryRecord) -> String {
    let fields: Vec<String> = schema
        .fields
        .iter()
        .filter_map(|field| record.field(field.key).map(|value| format!("{}: {}", field.label, value)))
        .collect();
    let mut line = format!(
        "{}  {}  {}  [{}]  status={}  payment={}",
        record.id,
        record.email,
        record.contact,
        fields.join(", "),
        record.status,
        record.payment
    );
    if !record.files.is_empty() {
        line.push_str(&format!("  files={}", record.files.len()));
    }
    if !record.created_at.is_empty() {
        line.push_str(&format!("  {}", record.created_at));
    }
    line
}

fn print_stats(stats: &Stats) {
    println!("Total: {}", stats.total);
    for dimension in &stats.dimensions {
        let selected = dimension.selected.as_deref().unwrap_or("All");
        println!("{} ({}): {}", dimension.label, selected, dimension.count);
    }
}

fn print_attachments<R: EnquiryRepository, N: Notifier>(table: &EnquiryTable<R, N>) {
    let entries = table.viewer().entries();
    if entries.is_empty() {
        println!("No documents attached.");
    }
    for entry in entries {
        let size = entry.size.map(|s| format!(" ({s})")).unwrap_or_default();
        println!("{} {}{}", entry.icon, entry.name, size);
        println!("    open:     {}", entry.url);
        if entry.download_url != entry.url {
            println!("    download: {}", entry.download_url);
        }
    }
}
