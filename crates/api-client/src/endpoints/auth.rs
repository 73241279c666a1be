//! Login, logout and two-factor authentication

use crate::client::{read_response, PicnicClient, AUTH_HEADER};
use crate::error::{status_text, ApiError, ApiResult, ErrorEnvelope};
use crate::models::{LoginResponseBody, LoginResult, TwoFactorChannel};
use crate::route::{ResponseData, Route};
use md5::{Digest, Md5};
use reqwest::Response;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: PicnicClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: PicnicClient) -> Self {
        Self { client }
    }

    /// Log in and store the session token
    ///
    /// POST /user/login
    ///
    /// The token comes back in the `x-picnic-auth` response header, not in
    /// the body. Any failure, including transport errors, is reported as
    /// [`ApiError::Auth`]. A 2xx response with the header always logs in;
    /// a body that cannot be read only leaves `user_id` unset.
    #[instrument(skip_all)]
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResult> {
        let secret = legacy_secret(password);
        let request = Route::Login {
            username,
            secret: &secret,
        }
        .request();

        let response = self
            .client
            .send_raw(&request)
            .await
            .map_err(|e| ApiError::auth(format!("Login failed: {e}")))?;

        let status = response.status();
        let auth_key = token_header(&response);
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::auth(format!("Login failed: {e}")))?;

        if !status.is_success() {
            let message = ErrorEnvelope::from_body(&body).map_or_else(
                || format!("{} {}", status.as_u16(), status_text(status)),
                |envelope| envelope.message_or_status_text(status),
            );
            warn!(status = status.as_u16(), "Login rejected");
            return Err(ApiError::auth(format!("Login failed: {message}")));
        }

        let Some(auth_key) = auth_key else {
            warn!(status = status.as_u16(), "Login response carried no session token");
            return Err(ApiError::auth(format!(
                "Login failed: no {AUTH_HEADER} header in response"
            )));
        };

        self.client.session().set_auth_key(auth_key.clone());
        let details = login_details(&body);
        info!(
            second_factor = details.second_factor_authentication_required,
            "Logged in"
        );

        Ok(LoginResult {
            auth_key,
            user_id: details.user_id,
            second_factor_authentication_required: details.second_factor_authentication_required,
        })
    }

    /// Log out and forget the session token
    ///
    /// POST /user/logout
    ///
    /// The local token is cleared even when the vendor call fails.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.client.send_request(Route::Logout.request()).await;
        self.client.session().clear();
        debug!("Session token cleared");
        result.map(|_| ())
    }

    /// Ask the vendor to send a two-factor code
    ///
    /// POST /user/2fa/generate
    pub async fn generate_2fa_code(&self, channel: TwoFactorChannel) -> ApiResult<Value> {
        self.client.call(Route::Generate2faCode { channel }).await
    }

    /// Submit a two-factor code
    ///
    /// POST /user/2fa/verify
    ///
    /// If the vendor answers with a fresh `x-picnic-auth` header the session
    /// token is replaced with it.
    pub async fn verify_2fa_code(&self, otp: &str) -> ApiResult<Value> {
        let request = Route::Verify2faCode { otp }.request();
        let response = self.client.send_raw(&request).await?;
        let refreshed = token_header(&response);
        let data = read_response(&request, response).await?;
        if let Some(key) = refreshed {
            self.client.session().set_auth_key(key);
            debug!("Session token replaced after two-factor verification");
        }

        Ok(match data {
            ResponseData::Json(value) => value,
            ResponseData::Binary(_) => Value::Null,
        })
    }
}

/// MD5 hex digest of the password, as the login endpoint expects
///
/// MD5 is the vendor's legacy scheme and is kept only because the endpoint
/// requires it. It offers no protection for the password.
#[must_use]
pub fn legacy_secret(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

/// Decode the login body; the token header is what makes a login succeed
fn login_details(body: &[u8]) -> LoginResponseBody {
    if body.iter().all(u8::is_ascii_whitespace) {
        return LoginResponseBody::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        warn!(error = %e, "Login response body not understood, keeping session token");
        LoginResponseBody::default()
    })
}

fn token_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
