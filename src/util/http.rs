use crate::config::ApiConfig;
use crate::dto::enquiry_dto::ApiErrorBody;
use crate::util::credentials::CredentialProvider;
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use std::time::Duration;

/// Client shared by every call against the enquiry API. The cookie store
/// keeps server session cookies alongside the bearer token.
pub fn build_client(config: &ApiConfig) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}

/// Attaches `Authorization: Bearer <token>` when a token is available.
pub fn with_bearer(builder: RequestBuilder, credentials: &dyn CredentialProvider) -> RequestBuilder {
    match credentials.token() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Consumes a failed response and returns its status with the best
/// user-facing message: the body's `message`, else a generic line.
pub async fn failure_message(response: Response) -> (u16, String) {
    let status = response.status().as_u16();
    let fallback = format!("Request failed with status {status}");
    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback),
        Err(_) => fallback,
    };
    (status, message)
}
