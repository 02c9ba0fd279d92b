use crate::app::cli::SubmitArgs;
use crate::dto::enquiry_dto::NewEnquiryRequest;
use crate::dto::upload_dto::UploadFile;
use crate::service::submission_service::SubmissionService;
use crate::service::upload_service::UploadService;
use crate::util::error::ServiceError;
use std::path::Path;
use tracing::{error, info};

pub async fn read_upload(path: &Path) -> Result<UploadFile, ServiceError> {
    let content = tokio::fs::read(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        ServiceError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = UploadFile::content_type_for(&filename);
    Ok(UploadFile::new(filename, content_type, content))
}

pub async fn upload(uploader: &dyn UploadService, path: &Path) -> Result<(), ServiceError> {
    let file = read_upload(path).await?;
    info!(file = %file.filename, "Uploading");
    let url = uploader.upload(file).await?;
    println!("{url}");
    Ok(())
}

pub async fn submit(service: &dyn SubmissionService, args: SubmitArgs) -> Result<(), ServiceError> {
    let mut files = Vec::with_capacity(args.files.len());
    for path in &args.files {
        files.push(read_upload(path).await?);
    }

    let request = NewEnquiryRequest {
        email: args.email,
        phone: args.phone,
        no_of_documents: args.documents.unwrap_or(files.len() as u32),
        fields: args.fields.into_iter().collect(),
    };

    let response = service.submit(args.kind, request, files).await?;
    let id = response.item.map(|item| item.id);
    match (response.message, id) {
        (Some(message), Some(id)) => println!("{message} (id {id})"),
        (Some(message), None) => println!("{message}"),
        (None, Some(id)) => println!("Enquiry submitted (id {id})"),
        (None, None) => println!("Enquiry submitted"),
    }
    Ok(())
}
