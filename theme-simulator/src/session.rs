use crate::config::SessionConfig;
use client::models::{TextColorsPatch, ThemeColorsPatch, ThemeScope};
use std::sync::Arc;
use theme::context::{ThemeContext, ThemeSource};

/// Accent colors the simulated user cycles through.
const ACCENT_CHOICES: &[&str] = &[
    "#ff0000", "#f97316", "#facc15", "#22c55e", "#38bdf8", "#a855f7",
];

#[derive(Debug)]
pub enum ActionOutcome {
    Refreshed(ThemeSource),
    Switched(String),
    Customized { theme_id: String, accent: String },
    Reset(String),
    Failed { action: &'static str, reason: String },
}

/// Plays a user fiddling with their theme settings.
pub struct SessionDriver {
    context: Arc<ThemeContext>,
    config: SessionConfig,
}

impl SessionDriver {
    pub fn new(context: Arc<ThemeContext>, config: SessionConfig) -> Self {
        Self { context, config }
    }

    pub fn next_delay_secs(&self) -> u64 {
        fastrand::u64(
            self.config.min_action_interval_secs..=self.config.max_action_interval_secs,
        )
    }

    pub async fn perform_random_action(&self) -> ActionOutcome {
        let config = &self.config;
        let total = (config.switch_weight
            + config.customize_weight
            + config.reset_weight
            + config.refresh_weight)
            .max(1);
        let roll = fastrand::u32(0..total);

        if roll < config.switch_weight {
            self.switch_theme().await
        } else if roll < config.switch_weight + config.customize_weight {
            self.customize_accent().await
        } else if roll < config.switch_weight + config.customize_weight + config.reset_weight {
            self.reset_customization().await
        } else {
            self.refresh().await
        }
    }

    async fn refresh(&self) -> ActionOutcome {
        let snapshot = self.context.refresh().await;
        ActionOutcome::Refreshed(snapshot.source)
    }

    async fn switch_theme(&self) -> ActionOutcome {
        let templates = self.context.templates().await;
        let pick = &templates[fastrand::usize(0..templates.len())];
        // Mix scopes so device-over-global precedence gets real traffic
        let scope = if fastrand::bool() {
            ThemeScope::Device
        } else {
            ThemeScope::Global
        };

        match self.context.set_theme(&pick.id, scope).await {
            Ok(snapshot) => ActionOutcome::Switched(snapshot.theme_id),
            Err(e) => ActionOutcome::Failed {
                action: "Theme switch",
                reason: e.to_string(),
            },
        }
    }

    async fn customize_accent(&self) -> ActionOutcome {
        let current = self.context.current().await;
        let accent = ACCENT_CHOICES[fastrand::usize(0..ACCENT_CHOICES.len())];
        let patch = ThemeColorsPatch {
            text: Some(TextColorsPatch {
                accent: Some(accent.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        match self.context.customize_theme(&current.theme_id, patch).await {
            Ok(snapshot) => ActionOutcome::Customized {
                theme_id: snapshot.theme_id,
                accent: accent.to_string(),
            },
            Err(e) => ActionOutcome::Failed {
                action: "Customization",
                reason: e.to_string(),
            },
        }
    }

    async fn reset_customization(&self) -> ActionOutcome {
        let current = self.context.current().await;
        match self.context.reset_customization(&current.theme_id).await {
            Ok(_) => ActionOutcome::Reset(current.theme_id),
            Err(e) => ActionOutcome::Failed {
                action: "Customization reset",
                reason: e.to_string(),
            },
        }
    }
}
