pub mod credentials;
pub mod error;
pub mod http;
pub mod logger;
pub mod notifier;
