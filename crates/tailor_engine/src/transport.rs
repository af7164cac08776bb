use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tailor_logging::{tailor_debug, tailor_error, tailor_info, tailor_warn};

use crate::{
    HealthStatus, TailorRequest, TailorResult, TailorSettings, TransportError,
    TransportFailureKind,
};

/// Shown when an error response carries no usable description.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[async_trait::async_trait]
pub trait TailorClient: Send + Sync {
    /// One attempt, no retries. Every failure is classified.
    async fn submit_tailor_request(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailorResult, TransportError>;

    async fn check_health(&self) -> Result<HealthStatus, TransportError>;
}

/// HTTP client for the tailoring service. A fresh `reqwest::Client` is built
/// per call, so nothing is retained between requests.
#[derive(Debug, Clone)]
pub struct ReqwestTailorClient {
    settings: TailorSettings,
}

impl ReqwestTailorClient {
    pub fn new(settings: TailorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| TransportError::client(err.to_string()))
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, TransportError> {
        let raw = self.settings.endpoint(path);
        reqwest::Url::parse(&raw).map_err(|err| TransportError::client(format!("{raw}: {err}")))
    }

    fn network_error(&self) -> TransportError {
        TransportError::new(
            TransportFailureKind::NetworkError,
            format!(
                "Unable to connect to the server. Make sure the backend is running on {}",
                self.settings.base_url
            ),
        )
    }

    /// Response first, then "request went out", then everything else.
    fn classify(&self, err: reqwest::Error) -> TransportError {
        if let Some(status) = err.status() {
            return server_error(status.as_u16(), &[]);
        }
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            tailor_warn!("No response from tailoring service: {}", err);
            return self.network_error();
        }
        TransportError::client(err.to_string())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = request.send().await.map_err(|err| self.classify(err))?;
        let status = response.status();
        let body = response.bytes().await;

        if !status.is_success() {
            let body = body.unwrap_or_default();
            return Err(server_error(status.as_u16(), &body));
        }

        let body = body.map_err(|err| self.classify(err))?;
        serde_json::from_slice(&body)
            .map_err(|err| TransportError::client(format!("invalid response payload: {err}")))
    }
}

#[async_trait::async_trait]
impl TailorClient for ReqwestTailorClient {
    async fn submit_tailor_request(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<TailorResult, TransportError> {
        let url = self.endpoint("tailor")?;
        let body = serde_json::to_vec(&TailorRequest {
            resume_text,
            job_description,
        })
        .map_err(|err| TransportError::client(err.to_string()))?;
        let client = self.build_client()?;

        tailor_info!("POST {} body_len={}", url, body.len());
        let request = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let result = self.send::<TailorResult>(request).await;
        match &result {
            Ok(tailored) => tailor_info!(
                "Tailor response: {} matched, {} missing skills",
                tailored.matched_skills.len(),
                tailored.missing_skills.len()
            ),
            Err(err) => tailor_error!("Tailor request failed ({:?}): {}", err.kind, err.message),
        }
        result
    }

    async fn check_health(&self) -> Result<HealthStatus, TransportError> {
        let url = self.endpoint("health")?;
        let client = self.build_client()?;
        tailor_debug!("GET {}", url);
        self.send::<HealthStatus>(client.get(url)).await
    }
}

fn server_error(status: u16, body: &[u8]) -> TransportError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| error_description(&value))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    TransportError::new(TransportFailureKind::ServerError { status }, message)
}

/// Picks `detail`, then `error`, from an error body. A `detail` list (as
/// produced by request validation) contributes its `msg` entries.
fn error_description(body: &Value) -> Option<String> {
    ["detail", "error"].iter().find_map(|key| match body.get(key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    })
}
