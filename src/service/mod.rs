pub mod attachment_viewer;
pub mod auth_service;
pub mod cascade;
pub mod enquiry_table;
pub mod filter;
pub mod otp;
pub mod pagination;
pub mod submission_service;
pub mod upload_service;
