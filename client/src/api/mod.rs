//! Remote theme API surface.
//!
//! [`ThemeApi`] is the seam the theming engine talks through: production code
//! wires in [`HttpThemeApi`], tests substitute fakes. Token acquisition stays
//! behind [`TokenProvider`] because the authentication flow (sign-in, refresh)
//! belongs to the host application, not this library.

use crate::models::{
    CustomizeThemeRequest, DeviceClass, SetActiveThemeRequest, ThemeCustomization, ThemeTemplate,
    UserActiveTheme,
};
use async_trait::async_trait;

pub mod errors;
pub mod http;

pub use errors::{ApiError, ApiResult};
pub use http::{ApiConfig, HttpThemeApi};

/// Supplies bearer tokens for authenticated requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a token valid for the next request.
    ///
    /// Implementations are expected to refresh expired tokens themselves;
    /// this library never retries on auth failures.
    async fn bearer_token(&self) -> ApiResult<String>;
}

/// Operations the theming engine performs against the remote backend.
#[async_trait]
pub trait ThemeApi: Send + Sync {
    /// Fetch the full template catalog.
    async fn list_templates(&self) -> ApiResult<Vec<ThemeTemplate>>;

    /// Fetch the user's active-theme assignments relevant to `device`:
    /// the global assignment plus the device-scoped one for that class.
    /// Absent assignments are simply omitted from the result.
    async fn fetch_active_assignments(
        &self,
        device: DeviceClass,
    ) -> ApiResult<Vec<UserActiveTheme>>;

    /// Fetch the user's stored customizations.
    async fn list_customizations(&self) -> ApiResult<Vec<ThemeCustomization>>;

    /// Create or replace the active-theme assignment for the request's scope.
    async fn set_active_theme(&self, request: SetActiveThemeRequest)
    -> ApiResult<UserActiveTheme>;

    /// Create or replace the stored customization for a template.
    async fn customize_theme(
        &self,
        request: CustomizeThemeRequest,
    ) -> ApiResult<ThemeCustomization>;

    /// Delete a stored customization (the explicit "reset" path).
    async fn delete_customization(&self, customization_id: &str) -> ApiResult<()>;
}
