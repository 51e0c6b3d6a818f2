//! Multi-factor login flow: CREDENTIALS -> MFA_SETUP | MFA_CODE ->
//! AUTHENTICATED. The flow drives which step a shell should present; the
//! gateway itself only consumes the final token pair via `login_finalize`.

use serde::Deserialize;
use serde_json::json;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::session::AdminProfile;

/// `POST /auth/login` response: a short-lived temp token plus the flags
/// selecting the second factor step.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginChallenge {
    pub temp_token: String,
    pub mfa_setup_required: bool,
    pub mfa_code_required: bool,
}

/// `POST /auth/mfa/setup` response for first-time enrollment.
#[derive(Debug, Clone, Deserialize)]
pub struct MfaEnrollment {
    pub secret: String,
    #[serde(rename = "qrCodeUrl")]
    pub qr_code_url: String,
    #[serde(rename = "otpauthUrl")]
    pub otpauth_url: String,
}

/// `POST /auth/mfa/verify` response: the final session material.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginComplete {
    pub admin: AdminProfile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginStep {
    Credentials,
    /// First-time enrollment: the user scans the QR and submits the code
    /// together with the secret.
    MfaSetup {
        temp_token: String,
        secret: String,
        qr_code_url: String,
        otpauth_url: String,
    },
    /// Returning user: just the 6-digit code.
    MfaCode { temp_token: String },
    Authenticated,
}

pub struct LoginFlow<'a> {
    gateway: &'a Gateway,
    step: LoginStep,
}

impl<'a> LoginFlow<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            step: LoginStep::Credentials,
        }
    }

    pub fn step(&self) -> &LoginStep {
        &self.step
    }

    /// Submit credentials. On success the flow advances to the MFA step the
    /// backend selected; enrollment immediately fetches the secret/QR using
    /// the temp token as bearer. A failure leaves the flow on the current
    /// step so the caller can retry.
    pub async fn begin(&mut self, email: &str, password: &str) -> Result<&LoginStep, GatewayError> {
        let challenge: LoginChallenge = self
            .gateway
            .post("/auth/login", json!({ "email": email, "password": password }))
            .await?;

        if challenge.mfa_setup_required {
            let enrollment: MfaEnrollment = self
                .gateway
                .post_with_bearer("/auth/mfa/setup", json!({}), &challenge.temp_token)
                .await?;
            self.step = LoginStep::MfaSetup {
                temp_token: challenge.temp_token,
                secret: enrollment.secret,
                qr_code_url: enrollment.qr_code_url,
                otpauth_url: enrollment.otpauth_url,
            };
        } else {
            // Neither flag set falls through to the code step as well; the
            // backend has never been observed returning both false
            self.step = LoginStep::MfaCode {
                temp_token: challenge.temp_token,
            };
        }

        Ok(&self.step)
    }

    /// Submit the 6-digit code against the verify endpoint. The enrollment
    /// variant includes the secret in the payload. Success hands the final
    /// session to the gateway and completes the flow.
    pub async fn verify(&mut self, code: &str) -> Result<AdminProfile, GatewayError> {
        let (temp_token, body) = match &self.step {
            LoginStep::MfaSetup { temp_token, secret, .. } => {
                (temp_token.clone(), json!({ "code": code, "secret": secret }))
            }
            LoginStep::MfaCode { temp_token } => (temp_token.clone(), json!({ "code": code })),
            LoginStep::Credentials | LoginStep::Authenticated => {
                return Err(GatewayError::Api {
                    status: 0,
                    code: None,
                    message: "no pending MFA challenge".to_string(),
                });
            }
        };

        let complete: LoginComplete = self
            .gateway
            .post_with_bearer("/auth/mfa/verify", body, &temp_token)
            .await?;

        self.gateway.login_finalize(
            complete.admin.clone(),
            complete.access_token,
            complete.refresh_token,
        )?;
        self.step = LoginStep::Authenticated;

        Ok(complete.admin)
    }
}
