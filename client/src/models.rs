use serde::{Deserialize, Serialize};

/// Full color schema for a Nebula theme.
///
/// Every leaf slot is a color string (hex like `#7c3aed` or functional like
/// `rgba(124, 58, 237, 0.35)`). Templates always carry a value for every
/// slot; sparse user overrides are expressed with [`ThemeColorsPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    // === Surface Gradients ===
    pub background_gradient: GradientColors,
    pub card_background: GradientColors,
    pub card_glow: GradientColors,
    pub card_border: String,

    // === Text ===
    pub text: TextColors,

    // === Interactive Elements ===
    pub buttons: ButtonSet,

    // === Status ===
    pub status: StatusColors,
}

/// Three-stop gradient used for backgrounds, card fills and glows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientColors {
    pub from: String,
    pub via: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub muted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSet {
    pub primary: ButtonColors,
    pub secondary: ButtonColors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonColors {
    pub background: String,
    pub hover: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusColors {
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
}

/// Sparse override of [`ThemeColors`].
///
/// Mirrors the full schema with every group and leaf optional so a
/// customization can target any subset of slots at any depth. Unknown keys
/// in incoming JSON are dropped during deserialization rather than merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<GradientColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_background: Option<GradientColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_glow: Option<GradientColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonSetPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusColorsPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<ButtonColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<ButtonColorsPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusColorsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ThemeColorsPatch {
    /// Returns true when the patch overrides no slot at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A named, server-defined color palette. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeTemplate {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    pub colors: ThemeColors,
}

/// A user-specific sparse override of one template's color slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCustomization {
    pub id: String,
    pub theme_id: String,
    pub custom_colors: ThemeColorsPatch,
}

/// Whether a theme assignment applies to every device or one device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeScope {
    Global,
    Device,
}

impl std::fmt::Display for ThemeScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeScope::Global => write!(f, "global"),
            ThemeScope::Device => write!(f, "device"),
        }
    }
}

/// Device class as reported by the host shell's classification heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Phone,
    Tablet,
}

impl DeviceClass {
    /// Wire value used as the `deviceType` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Phone => "phone",
            DeviceClass::Tablet => "tablet",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An active-theme assignment for the current user.
///
/// At most one assignment exists per (scope, device type) pair. A
/// device-scoped assignment for the current device class takes precedence
/// over a global one; selection lives in the theming engine, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserActiveTheme {
    pub theme_id: String,
    pub scope: ThemeScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<ThemeColorsPatch>,
}

impl UserActiveTheme {
    /// True when this assignment is device-scoped for the given class.
    pub fn applies_to_device(&self, device: DeviceClass) -> bool {
        self.scope == ThemeScope::Device && self.device_type == Some(device)
    }
}

/// Body of `POST user/set-active-theme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActiveThemeRequest {
    pub theme_id: String,
    pub scope: ThemeScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceClass>,
}

/// Body of `POST user/customize-theme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeThemeRequest {
    pub theme_id: String,
    pub custom_colors: ThemeColorsPatch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_ok, assert_some};

    fn sample_colors() -> ThemeColors {
        ThemeColors {
            background_gradient: GradientColors {
                from: "#0f172a".to_string(),
                via: "#1e1b4b".to_string(),
                to: "#312e81".to_string(),
            },
            card_background: GradientColors {
                from: "rgba(30, 27, 75, 0.8)".to_string(),
                via: "rgba(49, 46, 129, 0.6)".to_string(),
                to: "rgba(30, 27, 75, 0.8)".to_string(),
            },
            card_glow: GradientColors {
                from: "rgba(124, 58, 237, 0.25)".to_string(),
                via: "rgba(167, 139, 250, 0.15)".to_string(),
                to: "rgba(124, 58, 237, 0.25)".to_string(),
            },
            card_border: "rgba(148, 163, 184, 0.2)".to_string(),
            text: TextColors {
                primary: "#f1f5f9".to_string(),
                secondary: "#cbd5e1".to_string(),
                accent: "#a78bfa".to_string(),
                muted: "#64748b".to_string(),
            },
            buttons: ButtonSet {
                primary: ButtonColors {
                    background: "#7c3aed".to_string(),
                    hover: "#6d28d9".to_string(),
                    text: "#f8fafc".to_string(),
                },
                secondary: ButtonColors {
                    background: "#1e293b".to_string(),
                    hover: "#334155".to_string(),
                    text: "#e2e8f0".to_string(),
                },
            },
            status: StatusColors {
                success: "#34d399".to_string(),
                warning: "#fbbf24".to_string(),
                error: "#f87171".to_string(),
                info: "#38bdf8".to_string(),
            },
        }
    }

    #[test]
    fn test_theme_colors_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample_colors()).expect("serialize");
        assert_some!(json.get("backgroundGradient"));
        assert_some!(json.get("cardBorder"));
        assert_some!(
            json.get("buttons")
                .and_then(|b| b.get("primary"))
                .and_then(|p| p.get("background"))
        );
        assert_none!(json.get("background_gradient"));
    }

    #[test]
    fn test_sparse_patch_round_trip_stays_sparse() {
        let patch: ThemeColorsPatch = serde_json::from_str(
            r##"{"text": {"primary": "#ff0000"}, "status": {"error": "#b91c1c"}}"##,
        )
        .expect("deserialize");

        let text = patch.text.as_ref().expect("text group present");
        assert_eq!(text.primary.as_deref(), Some("#ff0000"));
        assert_none!(&text.secondary);
        assert_none!(&patch.background_gradient);

        let json = serde_json::to_value(&patch).expect("serialize");
        assert_none!(json.get("buttons"));
        assert_none!(json.get("backgroundGradient"));
    }

    #[test]
    fn test_patch_ignores_unknown_keys() {
        let result: Result<ThemeColorsPatch, _> = serde_json::from_str(
            r##"{"text": {"primary": "#ff0000", "tertiary": "#000"}, "sparkles": true}"##,
        );
        let patch = assert_ok!(result);
        assert_eq!(
            patch.text.and_then(|t| t.primary).as_deref(),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_empty_patch_is_empty() {
        assert!(ThemeColorsPatch::default().is_empty());

        let patch = ThemeColorsPatch {
            card_border: Some("#000000".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_assignment_device_match() {
        let assignment = UserActiveTheme {
            theme_id: "moon".to_string(),
            scope: ThemeScope::Device,
            device_type: Some(DeviceClass::Tablet),
            custom_colors: None,
        };
        assert!(assignment.applies_to_device(DeviceClass::Tablet));
        assert!(!assignment.applies_to_device(DeviceClass::Phone));

        let global = UserActiveTheme {
            theme_id: "sun".to_string(),
            scope: ThemeScope::Global,
            device_type: None,
            custom_colors: None,
        };
        assert!(!global.applies_to_device(DeviceClass::Tablet));
    }

    #[test]
    fn test_scope_and_device_wire_values() {
        assert_eq!(
            serde_json::to_string(&ThemeScope::Global).expect("serialize"),
            "\"global\""
        );
        assert_eq!(
            serde_json::to_string(&DeviceClass::Tablet).expect("serialize"),
            "\"tablet\""
        );
        let scope: ThemeScope = serde_json::from_str("\"device\"").expect("deserialize");
        assert_eq!(scope, ThemeScope::Device);
    }
}
