//! Read-only client for the model catalog REST API.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::models::{ModelId, ModelRecord, PerformanceRecord};

/// Default API location when `MODELCAT_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Anything that can serve catalog data to the page controllers.
pub trait CatalogSource {
    /// `GET /api/models`, passing `filters` through as query parameters.
    fn list_models(&self, filters: &[(String, String)]) -> Result<Vec<ModelRecord>, ClientError>;

    /// `GET /api/models/{id}`.
    fn get_model(&self, id: ModelId) -> Result<ModelRecord, ClientError>;

    /// `GET /api/models/{id}/performance`.
    fn get_model_performance(&self, id: ModelId) -> Result<Vec<PerformanceRecord>, ClientError>;

    /// `GET /api/compare?model_ids=a&model_ids=b`.
    ///
    /// The server is not required to preserve request order.
    fn compare_models(&self, ids: [ModelId; 2]) -> Result<Vec<ModelRecord>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("MODELCAT_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct CatalogClient {
    config: ClientConfig,
    agent: ureq::Agent,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Build the full API URL for a given endpoint path.
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url(), path)
    }

    /// Absolute URL of a provider logo, if the record names one.
    pub fn logo_url(&self, fragment: Option<&str>) -> Option<String> {
        crate::format::logo_path(fragment).map(|path| format!("{}/{}", self.base_url(), path))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.api_url(path);
        let mut request = self.agent.get(&url);
        for (key, value) in query {
            request = request.query(key, value);
        }
        tracing::debug!(url = %url, params = query.len(), "GET");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let reason = response.status_text().to_string();
                tracing::debug!(url = %url, code, reason = %reason, "catalog request rejected");
                return Err(ClientError::Status { url, code, reason });
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(url = %url, error = %transport, "catalog request failed");
                return Err(ClientError::Transport {
                    url,
                    message: transport.to_string(),
                });
            }
        };

        response.into_json::<T>().map_err(|e| {
            tracing::debug!(url = %url, error = %e, "malformed catalog response");
            ClientError::Decode {
                url,
                message: e.to_string(),
            }
        })
    }
}

impl CatalogSource for CatalogClient {
    fn list_models(&self, filters: &[(String, String)]) -> Result<Vec<ModelRecord>, ClientError> {
        let query: Vec<(&str, &str)> = filters
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.get_json("models", &query)
    }

    fn get_model(&self, id: ModelId) -> Result<ModelRecord, ClientError> {
        self.get_json(&format!("models/{}", id), &[])
    }

    fn get_model_performance(&self, id: ModelId) -> Result<Vec<PerformanceRecord>, ClientError> {
        self.get_json(&format!("models/{}/performance", id), &[])
    }

    fn compare_models(&self, ids: [ModelId; 2]) -> Result<Vec<ModelRecord>, ClientError> {
        let first = ids[0].to_string();
        let second = ids[1].to_string();
        self.get_json("compare", &[("model_ids", &first), ("model_ids", &second)])
    }
}
