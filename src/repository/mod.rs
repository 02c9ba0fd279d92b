pub mod enquiry_repo;
pub mod repository_error;
pub mod static_repo;
