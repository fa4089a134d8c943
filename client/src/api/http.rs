//! HTTP implementation of [`ThemeApi`] over reqwest.

use super::errors::{ApiError, ApiResult};
use super::{ThemeApi, TokenProvider};
use crate::models::{
    CustomizeThemeRequest, DeviceClass, SetActiveThemeRequest, ThemeCustomization, ThemeScope,
    ThemeTemplate, UserActiveTheme,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for [`HttpThemeApi`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the theme backend, e.g. `https://api.usenebula.io/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Theme backend client speaking JSON over HTTPS.
///
/// Every method acquires a fresh bearer token from the injected
/// [`TokenProvider`] and performs exactly one round trip; there is no retry
/// logic here. Callers decide how failures degrade.
pub struct HttpThemeApi {
    client: reqwest::Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpThemeApi {
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenProvider>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::ClientCreation {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Build against an existing client, e.g. one shared with the host app.
    pub fn with_client(
        client: reqwest::Client,
        config: ApiConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            client,
            config,
            tokens,
        }
    }

    fn request_error(&self, url: &str, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
                seconds: self.config.timeout_secs,
            }
        } else {
            ApiError::RequestFailed {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// One scope of the active-theme lookup. Without `device_type` the
    /// backend answers with the global assignment, with it the assignment
    /// for that device class. A 404 means no assignment exists at that
    /// scope and is not an error.
    async fn get_active_theme(
        &self,
        device_type: Option<DeviceClass>,
    ) -> ApiResult<Option<UserActiveTheme>> {
        let url = match device_type {
            Some(device) => format!(
                "{}?deviceType={}",
                self.config.endpoint("user/active-theme"),
                device.as_str()
            ),
            None => self.config.endpoint("user/active-theme"),
        };

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "get_active_theme").await);
        }

        let assignment: UserActiveTheme =
            response.json().await.map_err(|e| ApiError::InvalidResponse {
                expected: "UserActiveTheme".to_string(),
                actual: e.to_string(),
            })?;

        Ok(Some(assignment))
    }
}

#[async_trait]
impl ThemeApi for HttpThemeApi {
    async fn list_templates(&self) -> ApiResult<Vec<ThemeTemplate>> {
        let url = self.config.endpoint("templates");

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "list_templates").await);
        }

        let templates: Vec<ThemeTemplate> =
            response.json().await.map_err(|e| ApiError::InvalidResponse {
                expected: "Vec<ThemeTemplate>".to_string(),
                actual: e.to_string(),
            })?;

        Ok(templates)
    }

    async fn fetch_active_assignments(
        &self,
        device: DeviceClass,
    ) -> ApiResult<Vec<UserActiveTheme>> {
        let mut assignments = Vec::with_capacity(2);

        // Scope queries must answer strictly for their own scope; anything
        // else coming back would make the same assignment count twice.
        if let Some(global) = self.get_active_theme(None).await? {
            if global.scope == ThemeScope::Global {
                assignments.push(global);
            } else {
                log::warn!(
                    "Global active-theme query returned a {} assignment, ignoring",
                    global.scope
                );
            }
        }
        if let Some(scoped) = self.get_active_theme(Some(device)).await? {
            if scoped.applies_to_device(device) {
                assignments.push(scoped);
            } else {
                log::warn!(
                    "Device active-theme query for {} returned a non-matching assignment, ignoring",
                    device
                );
            }
        }

        Ok(assignments)
    }

    async fn list_customizations(&self) -> ApiResult<Vec<ThemeCustomization>> {
        let url = self.config.endpoint("user/customizations");

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "list_customizations").await);
        }

        let customizations: Vec<ThemeCustomization> =
            response.json().await.map_err(|e| ApiError::InvalidResponse {
                expected: "Vec<ThemeCustomization>".to_string(),
                actual: e.to_string(),
            })?;

        Ok(customizations)
    }

    async fn set_active_theme(
        &self,
        request: SetActiveThemeRequest,
    ) -> ApiResult<UserActiveTheme> {
        let url = self.config.endpoint("user/set-active-theme");

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "set_active_theme").await);
        }

        let assignment: UserActiveTheme =
            response.json().await.map_err(|e| ApiError::InvalidResponse {
                expected: "UserActiveTheme".to_string(),
                actual: e.to_string(),
            })?;

        Ok(assignment)
    }

    async fn customize_theme(
        &self,
        request: CustomizeThemeRequest,
    ) -> ApiResult<ThemeCustomization> {
        let url = self.config.endpoint("user/customize-theme");

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "customize_theme").await);
        }

        let customization: ThemeCustomization =
            response.json().await.map_err(|e| ApiError::InvalidResponse {
                expected: "ThemeCustomization".to_string(),
                actual: e.to_string(),
            })?;

        Ok(customization)
    }

    async fn delete_customization(&self, customization_id: &str) -> ApiResult<()> {
        let url = self
            .config
            .endpoint(&format!("user/customizations/{}", customization_id));

        let token = self.tokens.bearer_token().await?;
        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;

        // Deleting something already gone is fine; the end state is the same.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(ApiError::from_error_response(response, "delete_customization").await);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_matches;

    /// Token provider that always fails, for short-circuit tests.
    struct FailingTokens;

    #[async_trait]
    impl TokenProvider for FailingTokens {
        async fn bearer_token(&self) -> ApiResult<String> {
            Err(ApiError::Unauthorized {
                operation: "token refresh".to_string(),
            })
        }
    }

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let config = ApiConfig::new("https://api.usenebula.io/v1");
        assert_eq!(
            config.endpoint("templates"),
            "https://api.usenebula.io/v1/templates"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = ApiConfig::new("https://api.usenebula.io/v1/");
        assert_eq!(
            config.endpoint("user/customizations"),
            "https://api.usenebula.io/v1/user/customizations"
        );
    }

    #[test]
    fn config_defaults_and_builder() {
        let config = ApiConfig::new("http://localhost:3000").with_timeout_secs(3);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(ApiConfig::new("x").timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn token_failure_short_circuits_before_any_request() {
        let api = HttpThemeApi::new(ApiConfig::new("http://localhost:9"), Arc::new(FailingTokens))
            .expect("client creation");

        let error = api.list_templates().await.unwrap_err();
        assert_matches!(error, ApiError::Unauthorized { .. });

        let error = api.delete_customization("cust-1").await.unwrap_err();
        assert_matches!(error, ApiError::Unauthorized { .. });
    }
}
