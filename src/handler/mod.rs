pub mod auth_handler;
pub mod enquiry_handler;
pub mod upload_handler;
