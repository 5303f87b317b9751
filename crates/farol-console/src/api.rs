//! # TechCar REST Client
//!
//! Thin client over the backend's `/api/v1` surface. Every response body is
//! an envelope:
//!
//! ```text
//! success                                   failure
//! ───────                                   ───────
//! {                                         {
//!   "success": true,                          "success": false,
//!   "message": "Cliente criado",              "message": "Erro de validação",
//!   "data": { "client": { ... } }             "error": "CPF já cadastrado",
//! }                                           "statusCode": 409
//!                                           }
//! ```
//!
//! Deletes answer `204 No Content`. The order PDF is the only non-JSON
//! response.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ConsoleConfig;
use crate::session::Session;

/// Prefix every backend route lives under.
pub const API_PREFIX: &str = "/api/v1/";

/// REST client errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ResponseParseFailed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Successful envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Payload of the envelope; a success without `data` is a protocol error.
    pub fn into_data(self) -> Result<T, ClientError> {
        self.data
            .ok_or_else(|| ClientError::ResponseParseFailed("missing data".to_string()))
    }
}

/// Failure envelope. `error` is either a string or a validation object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    status_code: Option<u16>,
}

impl ErrorBody {
    /// The most specific human message in the body.
    fn user_message(&self) -> Option<String> {
        match &self.error {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => self
                .message
                .as_ref()
                .filter(|m| !m.trim().is_empty())
                .cloned(),
        }
    }
}

/// Client for the TechCar backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for server actions from the console configuration.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url: config.server_api_url().clone(),
        })
    }

    /// Builds a client against an explicit base URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(ApiClient {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a backend route.
    ///
    /// ```rust
    /// use farol_console::api::ApiClient;
    ///
    /// let api = ApiClient::with_base_url("http://localhost:3333").unwrap();
    /// assert_eq!(
    ///     api.endpoint("orders/42/pdf").unwrap().as_str(),
    ///     "http://localhost:3333/api/v1/orders/42/pdf"
    /// );
    /// ```
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        let route = format!("{API_PREFIX}{}", path.trim_start_matches('/'));
        self.base_url
            .join(&route)
            .map_err(|e| ClientError::InvalidUrl(format!("{route}: {e}")))
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, authenticated = session.is_authenticated(), "backend request");

        let mut builder = self.http.request(method, url);
        if let Some(bearer) = session.bearer() {
            builder = builder.header(reqwest::header::AUTHORIZATION, bearer);
        }
        Ok(builder)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        builder
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))
    }

    /// GET a route and unwrap its envelope.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &Session,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = Self::send(self.request(Method::GET, path, session)?).await?;
        read_envelope(response).await
    }

    /// POST a JSON body.
    pub async fn post<B, T>(
        &self,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path, session)?.json(body);
        read_envelope(Self::send(builder).await?).await
    }

    /// PATCH a JSON body.
    pub async fn patch<B, T>(
        &self,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<ApiResponse<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PATCH, path, session)?.json(body);
        read_envelope(Self::send(builder).await?).await
    }

    /// DELETE a route. Accepts `204` or a success envelope.
    pub async fn delete(&self, path: &str, session: &Session) -> Result<(), ClientError> {
        let response = Self::send(self.request(Method::DELETE, path, session)?).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        read_envelope::<serde_json::Value>(response).await.map(|_| ())
    }

    /// GET a binary route (order PDF).
    pub async fn get_bytes(&self, path: &str, session: &Session) -> Result<Vec<u8>, ClientError> {
        let response = Self::send(self.request(Method::GET, path, session)?).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(read_failure(status, response).await);
        }
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(read_failure(status, response).await);
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))?;

    let envelope: ApiResponse<T> = serde_json::from_str(&body)
        .map_err(|e| ClientError::ResponseParseFailed(e.to_string()))?;

    if !envelope.success {
        // 2xx with success: false; trust the body over the status line
        let failure: Option<ErrorBody> = serde_json::from_str(&body).ok();
        let status = failure
            .as_ref()
            .and_then(|f| f.status_code)
            .unwrap_or(status.as_u16());
        let message = failure
            .and_then(|f| f.user_message())
            .unwrap_or(envelope.message);
        return Err(ClientError::Api { status, message });
    }

    Ok(envelope)
}

async fn read_failure(status: StatusCode, response: Response) -> ClientError {
    if status == StatusCode::UNAUTHORIZED {
        warn!("backend rejected the session");
        return ClientError::Unauthorized;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|f| f.user_message())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Erro desconhecido")
                    .to_string()
            } else {
                body
            }
        });

    warn!(status = status.as_u16(), %message, "backend request failed");
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}
