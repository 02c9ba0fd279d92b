use crate::config::ApiConfig;
use crate::dto::auth_dto::{MeResponse, SendOtpRequest, TokenResponse, UserProfile, VerifyOtpRequest};
use crate::service::otp::OTP_LENGTH;
use crate::util::credentials::CredentialProvider;
use crate::util::http::{build_client, failure_message, with_bearer};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use validator::ValidateEmail;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter the 6-digit code")]
    IncompleteCode,

    #[error("Not signed in")]
    NotSignedIn,

    /// The server rejected the token, which has been cleared.
    #[error("Session expired: {0}")]
    Unauthorized(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to store token: {0}")]
    Storage(#[from] std::io::Error),
}

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn send_otp(&self, email: &str) -> Result<(), AuthError>;
    async fn verify_otp(&self, email: &str, code: &str) -> Result<(), AuthError>;
    async fn current_user(&self) -> Result<UserProfile, AuthError>;
    fn logout(&self);
}

pub struct AuthServiceImpl {
    client: Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl AuthServiceImpl {
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self, AuthError> {
        let client = build_client(&config)?;
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    async fn ensure_success(response: Response) -> Result<Response, AuthError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let (status, message) = failure_message(response).await;
        Err(AuthError::Api { status, message })
    }
}

fn check_email(email: &str) -> Result<(), AuthError> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    #[instrument(skip(self), fields(email = %email))]
    async fn send_otp(&self, email: &str) -> Result<(), AuthError> {
        check_email(email)?;
        info!("Requesting login code");
        let body = SendOtpRequest {
            email: email.trim().to_string(),
        };
        let response = self
            .client
            .post(self.config.endpoint("user/send-otp"))
            .json(&body)
            .send()
            .await?;
        match Self::ensure_success(response).await {
            Ok(_) => {
                info!("Login code sent");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send login code: {}", e);
                Err(e)
            }
        }
    }

    #[instrument(skip(self, code), fields(email = %email))]
    async fn verify_otp(&self, email: &str, code: &str) -> Result<(), AuthError> {
        check_email(email)?;
        let code = code.trim();
        if code.len() != OTP_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AuthError::IncompleteCode);
        }

        let body = VerifyOtpRequest {
            email: email.trim().to_string(),
            otp: code.to_string(),
        };
        let response = self
            .client
            .post(self.config.endpoint("user/verify-otp"))
            .json(&body)
            .send()
            .await?;
        let response = Self::ensure_success(response).await.map_err(|e| {
            error!("Login code rejected: {}", e);
            e
        })?;

        let tokens: TokenResponse = response.json().await?;
        self.credentials.store(&tokens.token)?;
        info!("Signed in");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<UserProfile, AuthError> {
        if self.credentials.token().is_none() {
            return Err(AuthError::NotSignedIn);
        }

        let request = self.client.get(self.config.endpoint("user/me"));
        let response = with_bearer(request, self.credentials.as_ref()).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            let (_, message) = failure_message(response).await;
            warn!("Stored token rejected, clearing it");
            self.credentials.clear();
            return Err(AuthError::Unauthorized(message));
        }

        let response = Self::ensure_success(response).await?;
        let me: MeResponse = response.json().await?;
        let profile = me.into_profile();
        info!(user = ?profile.email, "Session is valid");
        Ok(profile)
    }

    fn logout(&self) {
        self.credentials.clear();
        info!("Signed out");
    }
}
