use eframe::App as EApp;
use egui::TextureHandle;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::error_state::RetryCountdown;
use super::leaderboard::{Leaderboard, LEADERBOARD_LIMIT};
use super::location::Location;
use super::search::{SearchRequest, SearchState};
use super::toast::ToastQueue;
use crate::api::{ApiClient, GitLingoApi};
use crate::config::Config;
use crate::error::ExportResult;
use crate::export::{export_chart_image, export_to_csv, ExportFormat, ImageExportOptions};
use crate::plotting::{render_chart_async, ChartRequest, RenderedChart};
use crate::types::{ChartType, ErrorCode, LanguageDatum, SearchFailure, SearchOutcome, TopNMode};
use crate::utils::{aggregate_top_n, coverage_percent, normalize_series, NormalizeOptions};

/// Main application state
pub struct App {
    pub config: Config,
    api: Option<GitLingoApi>,
    pub search: SearchState,
    pub chart_type: ChartType,
    pub top_n: TopNMode,
    pub export_format: ExportFormat,
    pub leaderboard: Leaderboard,
    pub toasts: ToastQueue,
    pub countdown: RetryCountdown,
    pub rendered: Option<RenderedChart>,
    pub plot_texture: Option<TextureHandle>,
    pub texture_dirty: bool,
    pub update_needed: bool,
    pub is_rendering: bool,
    /// Set when the last chart render failed
    pub render_error: Option<String>,
    /// Message of a panic caught while drawing the last frame
    pub crash: Option<String>,
    queued_searches: Vec<SearchRequest>,
    render_generation: u64,
    applied_title: String,
}

impl App {
    pub fn new(config: Config) -> Self {
        let api = match ApiClient::from_config(&config) {
            Ok(client) => Some(GitLingoApi::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "failed to build HTTP client");
                None
            }
        };

        Self {
            config,
            api,
            search: SearchState::default(),
            chart_type: ChartType::default(),
            top_n: TopNMode::default(),
            export_format: ExportFormat::default(),
            leaderboard: Leaderboard::default(),
            toasts: ToastQueue::default(),
            countdown: RetryCountdown::default(),
            rendered: None,
            plot_texture: None,
            texture_dirty: false,
            update_needed: false,
            is_rendering: false,
            render_error: None,
            crash: None,
            queued_searches: Vec::new(),
            render_generation: 0,
            applied_title: String::new(),
        }
    }

    /// Start from a route such as `/github/octocat`.
    pub fn open_path(&mut self, path: &str) {
        self.search.location_mut().replace(path);
        if let Some(request) = self.search.init_from_location() {
            self.queue_search(request);
        }
    }

    pub fn submit_search(&mut self) {
        if let Some(request) = self.search.submit() {
            self.queue_search(request);
        }
    }

    pub fn search_for(&mut self, username: &str) {
        if let Some(request) = self.search.search_for(username) {
            self.queue_search(request);
        }
    }

    pub fn retry_search(&mut self) {
        if !self.countdown.can_retry() {
            return;
        }
        if let Some(request) = self.search.retry() {
            self.queue_search(request);
        }
    }

    fn queue_search(&mut self, request: SearchRequest) {
        self.clear_chart();
        self.queued_searches.push(request);
    }

    pub fn set_username(&mut self, username: String) {
        self.search.set_username(username);
        self.clear_chart();
    }

    /// Back to a blank form
    pub fn reset(&mut self) {
        self.search.reset();
        self.chart_type = ChartType::default();
        self.top_n = TopNMode::default();
        self.countdown = RetryCountdown::default();
        self.queued_searches.clear();
        self.clear_chart();
    }

    fn clear_chart(&mut self) {
        self.rendered = None;
        self.plot_texture = None;
        self.texture_dirty = false;
        self.update_needed = false;
        self.is_rendering = false;
        self.render_error = None;
        self.render_generation += 1;
    }

    /// Take searches waiting to be sent
    pub fn drain_queued_searches(&mut self) -> Vec<SearchRequest> {
        std::mem::take(&mut self.queued_searches)
    }

    /// Apply a finished search
    pub fn finish_search(&mut self, request_id: u64, outcome: SearchOutcome) {
        let retry_after = outcome.as_ref().err().and_then(|f| f.retry_after_seconds);
        if self.search.complete(request_id, outcome) {
            // Every applied failure starts its own countdown
            self.countdown = RetryCountdown::new(retry_after, Instant::now());
            self.update_needed = self.search.result().is_some();
        }
    }

    /// Series after the search filters and Top-N aggregation
    pub fn display_data(&self) -> Option<Vec<LanguageDatum>> {
        self.search
            .filtered_data()
            .map(|data| aggregate_top_n(&data, self.top_n))
    }

    /// Share of all repositories covered by the chart
    pub fn coverage(&self) -> Option<f64> {
        let all = &self.search.result()?.data;
        let displayed = self.search.filtered_data()?;
        Some(coverage_percent(all, &displayed))
    }

    pub fn chart_request(&self) -> Option<ChartRequest> {
        let result = self.search.result()?;
        let data = self.display_data()?;
        let view = normalize_series(
            &data,
            NormalizeOptions {
                exclude_forks: !self.search.include_forks(),
                max_items: None,
            },
        );
        Some(ChartRequest::new(
            self.chart_type,
            view,
            format!("{} languages", result.profile.display_name()),
        ))
    }

    /// Record a finished render if it is still the newest one.
    /// `None` means the render failed.
    pub fn finish_render(&mut self, generation: u64, chart: Option<RenderedChart>) {
        if generation != self.render_generation {
            return;
        }
        self.is_rendering = false;
        if chart.is_none() {
            self.render_error = Some("The chart could not be drawn.".to_string());
            self.toasts.error("Failed to draw chart");
        }
        self.rendered = chart;
        self.texture_dirty = true;
    }

    pub fn export_image(&mut self) -> ExportResult<PathBuf> {
        let username = self.result_username().unwrap_or_default();
        let options = ImageExportOptions {
            username,
            chart_type: self.chart_type,
            format: self.export_format,
        };
        export_chart_image(self.rendered.as_ref(), &options, &self.config.export_dir)
    }

    pub fn export_csv(&mut self) -> ExportResult<PathBuf> {
        let username = self.result_username().unwrap_or_default();
        let data = self.display_data().unwrap_or_default();
        export_to_csv(&data, &username, &self.config.export_dir)
    }

    pub fn share_url(&self) -> Option<String> {
        self.result_username()
            .map(|username| share_url(&self.config.share_base_url, &username))
    }

    fn result_username(&self) -> Option<String> {
        self.search.result().map(|r| r.profile.username.clone())
    }

    /// Window title, when it changed since the last call
    pub fn take_title_change(&mut self) -> Option<String> {
        let title = self.search.location().title();
        if title == self.applied_title {
            return None;
        }
        self.applied_title = title.to_string();
        Some(self.applied_title.clone())
    }

    /// Redraw after a chart option or filter changed. The current image stays
    /// on screen until the new one arrives.
    pub fn invalidate_chart(&mut self) {
        if self.search.result().is_none() {
            return;
        }
        self.update_needed = true;
        self.is_rendering = false;
        self.render_error = None;
        self.render_generation += 1;
    }

    pub fn render_generation(&self) -> u64 {
        self.render_generation
    }

    /// Kick off network work queued during this frame
    pub fn dispatch_pending(&mut self, app_arc: &Arc<Mutex<App>>, ctx: &egui::Context) {
        for request in self.drain_queued_searches() {
            spawn_search(self.api.clone(), request, Arc::clone(app_arc), ctx.clone());
        }

        if self.leaderboard == Leaderboard::NotRequested {
            self.leaderboard = Leaderboard::Loading;
            spawn_leaderboard(self.api.clone(), Arc::clone(app_arc), ctx.clone());
        }

        if self.update_needed && !self.is_rendering {
            self.update_needed = false;
            if let Some(request) = self.chart_request() {
                self.is_rendering = true;
                spawn_render(request, self.render_generation, Arc::clone(app_arc), ctx.clone());
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

pub fn share_url(base: &str, username: &str) -> String {
    format!("{}/github/{}", base.trim_end_matches('/'), username)
}

fn spawn_search(
    api: Option<GitLingoApi>,
    request: SearchRequest,
    app_arc: Arc<Mutex<App>>,
    ctx: egui::Context,
) {
    tokio::spawn(async move {
        let outcome = match api {
            Some(api) => api.search(&request.username).await,
            None => Err(SearchFailure::new(
                ErrorCode::NetworkError,
                "HTTP client is unavailable",
            )),
        };
        if let Ok(mut app) = app_arc.lock() {
            app.finish_search(request.id, outcome);
        }
        ctx.request_repaint();
    });
}

fn spawn_leaderboard(api: Option<GitLingoApi>, app_arc: Arc<Mutex<App>>, ctx: egui::Context) {
    tokio::spawn(async move {
        let items = match api {
            Some(api) => api.top_searches(LEADERBOARD_LIMIT).await,
            None => None,
        };
        if let Ok(mut app) = app_arc.lock() {
            app.leaderboard.apply(items);
        }
        ctx.request_repaint();
    });
}

fn spawn_render(request: ChartRequest, generation: u64, app_arc: Arc<Mutex<App>>, ctx: egui::Context) {
    tokio::spawn(async move {
        let chart = match render_chart_async(request).await {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::error!(error = %e, "plotting failed");
                None
            }
        };
        if let Ok(mut app) = app_arc.lock() {
            app.finish_render(generation, chart);
        }
        ctx.request_repaint();
    });
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Ok(mut app) = self.app.lock() else {
            tracing::error!("Failed to acquire app lock in update");
            return;
        };

        if app.crash.is_some() {
            super::ui::draw_crash(&mut app, ctx);
            return;
        }

        let app_arc = Arc::clone(&self.app);
        let frame = std::panic::catch_unwind(AssertUnwindSafe(|| {
            super::ui::draw_ui(&mut app, ctx, &app_arc);
        }));
        if let Err(panic) = frame {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(%message, "UI panicked, showing recovery screen");
            app.crash = Some(message);
            ctx.request_repaint();
            return;
        }

        if let Some(title) = app.take_title_change() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }
}
