mod config;
mod session;
mod token;

use chrono::Utc;
use client::api::HttpThemeApi;
use client::models::DeviceClass;
use config::Config;
use session::{ActionOutcome, SessionDriver};
use std::{env, sync::Arc, time::Duration};
use theme::config::EngineConfig;
use theme::context::ThemeContext;
use theme::persistence::FileThemeCache;
use theme::scope::FixedClassifier;
use token::EnvTokenProvider;
use tokio::signal;

#[derive(Debug)]
struct SessionStats {
    refreshes: u32,
    switches: u32,
    customizations: u32,
    resets: u32,
    failures: u32,
    start_time: chrono::DateTime<Utc>,
}

impl SessionStats {
    fn new() -> Self {
        Self {
            refreshes: 0,
            switches: 0,
            customizations: 0,
            resets: 0,
            failures: 0,
            start_time: Utc::now(),
        }
    }

    fn record(&mut self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Refreshed(_) => self.refreshes += 1,
            ActionOutcome::Switched(_) => self.switches += 1,
            ActionOutcome::Customized { .. } => self.customizations += 1,
            ActionOutcome::Reset(_) => self.resets += 1,
            ActionOutcome::Failed { .. } => self.failures += 1,
        }
    }

    fn display(&self) {
        let elapsed = Utc::now().signed_duration_since(self.start_time);
        let elapsed_mins =
            elapsed.num_minutes() as f64 + (elapsed.num_seconds() % 60) as f64 / 60.0;
        let total = self.refreshes + self.switches + self.customizations + self.resets;
        let rate = if elapsed_mins > 0.0 {
            f64::from(total) / elapsed_mins
        } else {
            0.0
        };

        println!(
            "📊 Session Statistics (Running for {:.1} minutes)",
            elapsed_mins
        );
        println!("   🔄 Refreshes: {}", self.refreshes);
        println!("   🎨 Theme switches: {}", self.switches);
        println!("   🖌️  Customizations: {}", self.customizations);
        println!("   🧽 Resets: {}", self.resets);
        println!("   ❌ Failures: {}", self.failures);
        println!("   🎯 Action rate: {:.1}/min", rate);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <phone|tablet>", args[0]);
        std::process::exit(1);
    }

    let device = match args[1].as_str() {
        "phone" => DeviceClass::Phone,
        "tablet" => DeviceClass::Tablet,
        other => {
            eprintln!("❌ Unknown device class '{other}', expected 'phone' or 'tablet'");
            std::process::exit(1);
        }
    };

    dotenv::dotenv().ok();

    println!("✅ Loading simulator configuration...");
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config.toml: {}", e);
            std::process::exit(1);
        }
    };

    println!("✅ Loading engine configuration...");
    let engine_config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = theme::logger::setup_logger(&engine_config.logging()) {
        eprintln!("❌ Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    let tokens = match EnvTokenProvider::from_env() {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    println!("🚀 Starting Theme Session Simulator");
    println!("📋 Configuration:");
    println!(
        "   Backend: {}",
        engine_config.base_url().unwrap_or("<unset>")
    );
    println!("   Device class: {}", device);
    println!(
        "   Action interval: {}-{}s",
        config.session.min_action_interval_secs, config.session.max_action_interval_secs
    );
    println!(
        "   Background refresh: every {}s",
        engine_config.refresh_interval_secs()
    );
    println!();

    println!("🔌 Connecting to theme backend...");
    let api = match HttpThemeApi::new(engine_config.api_config()?, tokens) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("❌ Failed to create API client: {}", e);
            std::process::exit(1);
        }
    };

    let mut builder = ThemeContext::builder()
        .api(api)
        .classifier(Arc::new(FixedClassifier(device)))
        .refresh_interval(Duration::from_secs(engine_config.refresh_interval_secs()));
    if let Some(dir) = engine_config.cache_dir() {
        builder = builder.cache(Arc::new(FileThemeCache::new(dir.clone())));
    }
    let context = match builder.build() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("❌ Failed to build theme context: {}", e);
            std::process::exit(1);
        }
    };

    let snapshot = context.initialize().await;
    println!(
        "✅ Initialized with '{}' (source: {:?})",
        snapshot.display_name, snapshot.source
    );
    context.start_background_refresh().await;

    let driver = SessionDriver::new(Arc::clone(&context), config.session.clone());

    println!("🎯 Simulating user theming actions... (Press Ctrl+C to stop)");
    println!();

    let mut stats = SessionStats::new();
    let mut last_stats_display = std::time::Instant::now();

    // Main session loop
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                println!("\n🛑 Shutting down gracefully...");
                break;
            }
            _ = tokio::time::sleep(Duration::from_secs(driver.next_delay_secs())) => {
                let outcome = driver.perform_random_action().await;
                stats.record(&outcome);

                match &outcome {
                    ActionOutcome::Refreshed(source) => {
                        println!("🔄 Refreshed (source: {source:?})");
                    }
                    ActionOutcome::Switched(theme_id) => {
                        println!("🎨 Switched active theme to '{theme_id}'");
                    }
                    ActionOutcome::Customized { theme_id, accent } => {
                        println!("🖌️  Customized '{theme_id}' accent to {accent}");
                    }
                    ActionOutcome::Reset(theme_id) => {
                        println!("🧽 Reset customization for '{theme_id}'");
                    }
                    ActionOutcome::Failed { action, reason } => {
                        eprintln!("❌ {action} failed: {reason}");
                    }
                }

                if config.display.show_snapshot_details {
                    let current = context.current().await;
                    match serde_json::to_string(&current.colors) {
                        Ok(colors) => println!("   Rendering '{}' [{}]: {}", current.theme_id, current.scope, colors),
                        Err(e) => eprintln!("Warning: could not render snapshot colors: {}", e),
                    }
                }

                // Display stats periodically
                if last_stats_display.elapsed() >= Duration::from_secs(config.display.stats_update_interval_secs) {
                    stats.display();
                    println!();
                    last_stats_display = std::time::Instant::now();
                }
            }
        }
    }

    context.shutdown().await;

    println!("📊 Final Statistics:");
    stats.display();
    println!("✅ Theme simulator stopped.");

    Ok(())
}
