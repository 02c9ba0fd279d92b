pub mod auth_dto;
pub mod enquiry_dto;
pub mod upload_dto;
