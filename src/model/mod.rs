pub mod enquiry;
pub mod schema;
