//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, CartApi, CatalogApi, DeliveriesApi, PaymentsApi, UserApi};
use crate::error::{status_text, ApiError, ApiResult, ErrorEnvelope};
use crate::known_routes::{KnownRoute, KNOWN_ROUTES};
use crate::models::LoginResult;
use crate::route::{ApiRequest, ResponseData, Route};
use crate::session::Session;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Session token header
pub const AUTH_HEADER: &str = "x-picnic-auth";

/// Client application header, sent only on endpoints that need it
pub const AGENT_HEADER: &str = "x-picnic-agent";

/// Device id header, sent only on endpoints that need it
pub const DEVICE_ID_HEADER: &str = "x-picnic-did";

/// User agent of the vendor's Android app
pub const CLIENT_USER_AGENT: &str = "okhttp/3.12.2";

/// Content type sent with every request
pub const CLIENT_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

#[derive(Clone)]
struct DeviceHeaderValues {
    agent: HeaderValue,
    device_id: HeaderValue,
}

/// Picnic storefront API client
///
/// Cloning is cheap; clones share the connection pool, the configuration and
/// the session, so a `login` through one clone authenticates all of them.
#[derive(Clone)]
pub struct PicnicClient {
    inner: Client,
    config: Arc<ClientConfig>,
    session: Arc<Session>,
    device: DeviceHeaderValues,
}

impl PicnicClient {
    /// Create a client for the Dutch storefront with default settings
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client configured from `PICNIC_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static(CLIENT_CONTENT_TYPE));

        let device = DeviceHeaderValues {
            agent: header_value(&config.device.agent, AGENT_HEADER)?,
            device_id: header_value(&config.device.device_id, DEVICE_ID_HEADER)?,
        };

        let mut builder = Client::builder().default_headers(default_headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let inner = builder.build().map_err(ApiError::Request)?;

        let session = Arc::new(Session::new(config.auth_key.clone()));

        debug!(
            base_url = %config.base_url(),
            authenticated = session.is_authenticated(),
            "Picnic client created"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
            session,
            device,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the API base URL
    #[must_use]
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Host part of the base URL, where static images are served from
    #[must_use]
    pub fn static_base_url(&self) -> String {
        let base = self.config.base_url();
        match base.split_once("/api/") {
            Some((host, _)) => host.to_string(),
            None => base,
        }
    }

    /// Shared session state
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session token
    #[must_use]
    pub fn auth_key(&self) -> Option<String> {
        self.session.auth_key()
    }

    /// Use an existing session token
    pub fn set_auth_key(&self, key: impl Into<String>) {
        self.session.set_auth_key(key);
    }

    /// Forget the session token without contacting the vendor
    pub fn clear_auth_key(&self) {
        self.session.clear();
    }

    /// Whether a session token is present; it is never validated locally
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Routes seen in the vendor's Android app, including unwrapped ones
    #[must_use]
    pub fn known_api_routes(&self) -> &'static [KnownRoute] {
        KNOWN_ROUTES
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access login, logout and two-factor endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access account, consent and message endpoints
    #[must_use]
    pub fn user(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    /// Access search, product, list and image endpoints
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    /// Access shopping cart endpoints
    #[must_use]
    pub fn cart(&self) -> CartApi {
        CartApi::new(self.clone())
    }

    /// Access delivery endpoints
    #[must_use]
    pub fn deliveries(&self) -> DeliveriesApi {
        DeliveriesApi::new(self.clone())
    }

    /// Access payment and wallet endpoints
    #[must_use]
    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(self.clone())
    }

    /// Log in and store the session token
    ///
    /// Shorthand for `client.auth().login(username, password)`.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResult> {
        self.auth().login(username, password).await
    }

    /// Log out and forget the session token
    pub async fn logout(&self) -> ApiResult<()> {
        self.auth().logout().await
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Send any request with the session's credentials
    ///
    /// Non-2xx responses become [`ApiError::Http`], using the vendor's error
    /// envelope when present. Also usable for endpoints this crate does not
    /// wrap, see [`PicnicClient::known_api_routes`].
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn send_request(&self, request: ApiRequest) -> ApiResult<ResponseData> {
        let response = self.send_raw(&request).await?;
        read_response(&request, response).await
    }

    /// Send a request and decode the JSON response into `T`
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        match self.send_request(request).await? {
            ResponseData::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseData::Binary(_) => Err(ApiError::parse(
                "binary response where JSON was expected",
            )),
        }
    }

    /// Send the request for a route and decode the JSON response into `T`
    pub(crate) async fn call<T: DeserializeOwned>(&self, route: Route<'_>) -> ApiResult<T> {
        self.send(route.request()).await
    }

    /// Send a request and hand back the undecoded response
    ///
    /// Used where response headers matter (login, two-factor verification).
    pub(crate) async fn send_raw(&self, request: &ApiRequest) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let url = request.url(&self.config.base_url());

        let mut builder = self.inner.request(request.method.clone(), &url);

        if let Some(key) = self.session.auth_key() {
            builder = builder.header(AUTH_HEADER, header_value(&key, AUTH_HEADER)?);
        }

        if request.device_headers {
            builder = builder
                .header(AGENT_HEADER, self.device.agent.clone())
                .header(DEVICE_ID_HEADER, self.device.device_id.clone());
        }

        if let Some(ref body) = request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        debug!(
            request_id = %request_id,
            method = %request.method,
            url = %url,
            device_headers = request.device_headers,
            "Sending request"
        );

        let start = Instant::now();
        let response = builder.send().await?;
        let elapsed = start.elapsed();

        let status = response.status();
        if status.is_success() {
            debug!(
                request_id = %request_id,
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request succeeded"
            );
        } else {
            warn!(
                request_id = %request_id,
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request failed"
            );
        }

        Ok(response)
    }
}

/// Turn a response into data, or into an error for non-2xx statuses
pub(crate) async fn read_response(
    request: &ApiRequest,
    response: Response,
) -> ApiResult<ResponseData> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        return Err(error_from_body(status, &body));
    }

    if request.binary {
        return Ok(ResponseData::Binary(body));
    }

    Ok(ResponseData::Json(decode_json(body)))
}

/// Build an [`ApiError::Http`] from a failure response body
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> ApiError {
    match ErrorEnvelope::from_body(body) {
        Some(envelope) => {
            let message = envelope.message_or_status_text(status);
            ApiError::http(status.as_u16(), envelope.error.code, message)
        }
        None => ApiError::http(status.as_u16(), None, status_text(status)),
    }
}

/// Decode a success body; empty bodies are `null`, non-JSON bodies are strings
fn decode_json(body: Bytes) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
}

fn header_value(value: &str, name: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ApiError::config(format!("{name} value is not a valid header value")))
}
