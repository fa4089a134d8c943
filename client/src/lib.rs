//! # Nebula Theme Client Library
//!
//! Wire-level client for the Nebula theme backend. This library defines the
//! theme data model shared with the server (templates, assignments,
//! customizations) and the [`api::ThemeApi`] trait the theming engine uses to
//! reach it, together with the reqwest-backed implementation.
//!
//! ## Modules
//!
//! - [`api`] - The `ThemeApi` trait, its HTTP implementation, and API errors
//! - [`models`] - Serde models for everything the backend sends and receives

pub mod api;
pub mod models;

pub use api::{ApiConfig, ApiError, ApiResult, HttpThemeApi, ThemeApi, TokenProvider};
pub use models::{
    ButtonColors, ButtonSet, CustomizeThemeRequest, DeviceClass, GradientColors,
    SetActiveThemeRequest, StatusColors, TextColors, ThemeColors, ThemeColorsPatch,
    ThemeCustomization, ThemeScope, ThemeTemplate, UserActiveTheme,
};
