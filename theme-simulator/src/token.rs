use async_trait::async_trait;
use client::api::{ApiResult, TokenProvider};
use std::env;

const TOKEN_VAR: &str = "SIMULATOR_BEARER_TOKEN";

/// Token provider backed by a single long-lived token from the environment.
///
/// Real deployments plug the host app's auth stack into [`TokenProvider`];
/// for simulation a pre-issued token from `.env` is enough.
pub struct EnvTokenProvider {
    token: String,
}

impl EnvTokenProvider {
    pub fn from_env() -> Result<Self, String> {
        match env::var(TOKEN_VAR) {
            Ok(token) if !token.trim().is_empty() => Ok(Self {
                token: token.trim().to_string(),
            }),
            _ => Err(format!(
                "No bearer token found. Please set {TOKEN_VAR} in your environment or .env file."
            )),
        }
    }
}

#[async_trait]
impl TokenProvider for EnvTokenProvider {
    async fn bearer_token(&self) -> ApiResult<String> {
        Ok(self.token.clone())
    }
}
