use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// `/user/me` answers either `{user: {...}}` or the profile itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MeResponse {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl MeResponse {
    pub fn into_profile(self) -> UserProfile {
        match self {
            MeResponse::Wrapped { user } => user,
            MeResponse::Bare(profile) => profile,
        }
    }
}
