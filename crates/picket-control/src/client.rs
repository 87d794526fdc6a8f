use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::warn;

use crate::config::ControlConfig;
use crate::errors::ControlError;

/// HTTP exchange with the controller.
///
/// One `reqwest::Client` (connection pool plus the `token` default header)
/// is built at startup and reused for every exchange the process makes.
pub struct ControlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ControlClient {
    pub fn new(config: &ControlConfig) -> Result<Self, ControlError> {
        let mut token =
            HeaderValue::from_str(&config.token).map_err(|_| ControlError::BadToken)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("token", token);

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// POST `body` to the controller and return the response bytes.
    ///
    /// Transport failures, non-200 statuses, and unreadable bodies all
    /// degrade to an empty response: the cycle treats `len() == 0` as "no
    /// task" and backs off on its own schedule. Nothing here retries, and
    /// the caller cannot tell the failure modes apart on purpose.
    pub async fn exchange(&self, body: String) -> Vec<u8> {
        let response = match self.http.post(&self.endpoint).body(body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(target: "picket.control", "request failed: {e}");
                return Vec::new();
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(target: "picket.control", %status, "controller refused the exchange");
            return Vec::new();
        }

        match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                warn!(target: "picket.control", "response body unreadable: {e}");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
