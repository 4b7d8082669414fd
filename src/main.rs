//! GitLingo
//!
//! A GUI application that charts the programming languages of a GitHub account.
//!
//! ```bash
//! gitlingo                       # Start on the search screen
//! gitlingo /github/octocat       # Open straight into a search
//! gitlingo --api-base-url https://api.gitlingo.app --dev
//! ```

use anyhow::Context as _;
use clap::Parser;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use gitlingo::app::{App, AppWrapper};
use gitlingo::Config;

#[derive(Parser)]
#[command(name = "gitlingo")]
#[command(about = "Chart the programming languages of a GitHub account", long_about = None)]
#[command(version)]
struct Cli {
    /// Route to open, e.g. /github/octocat
    #[arg(value_name = "PATH")]
    path: Option<String>,

    /// Backend origin (overrides GITLINGO_API_BASE_URL)
    #[arg(long)]
    api_base_url: Option<String>,

    /// Log API requests and responses
    #[arg(long)]
    dev: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_base_url {
        config = config.with_api_base_url(url);
    }
    config.dev_mode |= cli.dev;

    let default_filter = if config.dev_mode { "gitlingo=debug" } else { "gitlingo=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
    tracing::info!(api = %config.api_base_url, "starting GitLingo");

    // Initialize the Tokio runtime
    let rt = Runtime::new().context("Failed to start async runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([800.0, 600.0])
                .with_title("GitLingo"),
            ..Default::default()
        };

        let mut app = App::new(config);
        if let Some(path) = cli.path.as_deref() {
            app.open_path(path);
        }
        let app = Arc::new(Mutex::new(app));

        eframe::run_native(
            "GitLingo",
            options,
            Box::new(move |cc| {
                // Configure default fonts and style
                let fonts = egui::FontDefinitions::default();
                cc.egui_ctx.set_fonts(fonts);

                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| anyhow::anyhow!("Error running application: {}", e))
    })
}
