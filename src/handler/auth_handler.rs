use crate::service::auth_service::AuthService;
use crate::service::otp::OtpInput;
use crate::util::error::ServiceError;
use std::io::{self, BufRead, Write};
use tracing::info;

pub async fn login(auth: &dyn AuthService, email: &str, code: Option<&str>) -> Result<(), ServiceError> {
    let code = match code {
        Some(code) => code.to_string(),
        None => {
            auth.send_otp(email).await?;
            println!("A 6-digit code was sent to {email}.");
            prompt_code()?
        }
    };

    auth.verify_otp(email, &code).await?;
    println!("Signed in as {email}");
    Ok(())
}

/// Reads the code the way the login screen takes it: digits are spread over
/// the six slots and anything else is ignored.
fn prompt_code() -> Result<String, ServiceError> {
    print!("Code: ");
    io::stdout()
        .flush()
        .map_err(|e| ServiceError::InternalError(e.to_string()))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| ServiceError::InternalError(e.to_string()))?;

    let mut input = OtpInput::new();
    input.paste(&line);
    input
        .code()
        .ok_or_else(|| ServiceError::InvalidInput("Please enter the 6-digit code".to_string()))
}

pub async fn whoami(auth: &dyn AuthService) -> Result<(), ServiceError> {
    let profile = auth.current_user().await?;
    info!("Session checked");
    println!("Email: {}", profile.email.as_deref().unwrap_or("-"));
    if let Some(name) = &profile.name {
        println!("Name:  {name}");
    }
    if let Some(role) = &profile.role {
        println!("Role:  {role}");
    }
    Ok(())
}

pub fn logout(auth: &dyn AuthService) {
    auth.logout();
    println!("Signed out");
}
