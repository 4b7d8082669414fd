use chrono::Utc;
use egui::{Color32, ComboBox, Context, RichText};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::error_state::present;
use super::toast::{ToastAction, ToastKind};
use super::App;
use crate::export::ExportFormat;
use crate::types::{AccountType, ChartType, SearchFailure, SearchSuccess, TopNMode};
use crate::utils::time::{format_duration, format_expires_in, format_relative_time};

const ERROR_COLOR: Color32 = Color32::from_rgb(248, 113, 113);
const MUTED_COLOR: Color32 = Color32::from_rgb(148, 163, 184);

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context, app_arc: &Arc<Mutex<App>>) {
    let now = Instant::now();
    app.toasts.dispatch(ToastAction::Expire(now));
    app.countdown.tick(now);

    egui::TopBottomPanel::top("search_panel").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.heading("GitLingo");
        ui.label("See which programming languages a GitHub account uses.");
        ui.separator();
        draw_search_bar(app, ui);
        ui.add_space(8.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            if app.search.is_pending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Fetching language statistics...");
                });
            } else if let Some(failure) = app.search.error().cloned() {
                draw_error(app, ui, &failure);
            } else if let Some(result) = app.search.result().cloned() {
                draw_result(app, ui, &result);
            } else {
                ui.label(
                    RichText::new("Search for a GitHub user or organization to get started.")
                        .color(MUTED_COLOR),
                );
                ui.add_space(16.0);
                draw_leaderboard(app, ui);
            }
        });
    });

    draw_toasts(app, ctx);

    if app.texture_dirty {
        load_plot_texture(app, ctx);
        app.texture_dirty = false;
    }

    app.dispatch_pending(app_arc, ctx);

    if !app.countdown.can_retry() {
        ctx.request_repaint_after(Duration::from_secs(1));
    }
    if let Some(deadline) = app.toasts.next_expiry() {
        ctx.request_repaint_after(deadline.saturating_duration_since(now));
    }
}

fn draw_search_bar(app: &mut App, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let mut username = app.search.username().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut username)
                .hint_text("GitHub username")
                .desired_width(260.0),
        );
        if response.changed() {
            app.set_username(username);
        }
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let searching = app.search.is_pending();
        if ui.add_enabled(!searching, egui::Button::new("Search")).clicked() || (entered && !searching) {
            app.submit_search();
        }
        if ui.button("Reset").clicked() {
            app.reset();
        }
    });

    ui.horizontal(|ui| {
        let mut include_forks = app.search.include_forks();
        if ui.checkbox(&mut include_forks, "Include forks").changed() {
            app.search.set_include_forks(include_forks);
            app.invalidate_chart();
        }
        let mut include_unknown = app.search.include_unknown();
        if ui.checkbox(&mut include_unknown, "Include unknown language").changed() {
            app.search.set_include_unknown(include_unknown);
            app.invalidate_chart();
        }
    });

    if let Some(message) = app.search.validation_error() {
        ui.colored_label(ERROR_COLOR, message);
    }
}

fn draw_error(app: &mut App, ui: &mut egui::Ui, failure: &SearchFailure) {
    let presentation = present(failure.code);
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(RichText::new(presentation.icon).size(40.0));
        ui.label(RichText::new(presentation.title).size(20.0).strong());
        ui.label(presentation.description);
        if !failure.message.is_empty() {
            ui.label(RichText::new(&failure.message).small().color(MUTED_COLOR));
        }
        ui.add_space(12.0);

        let remaining = app.countdown.remaining();
        let label = if remaining > 0 {
            format!("Retry in {}", format_duration(remaining))
        } else {
            "Try again".to_string()
        };
        if ui.add_enabled(app.countdown.can_retry(), egui::Button::new(label)).clicked() {
            app.retry_search();
        }
    });
}

fn draw_result(app: &mut App, ui: &mut egui::Ui, result: &SearchSuccess) {
    draw_profile(ui, result);
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        // Segmented chart type control
        let previous = app.chart_type;
        for chart_type in ChartType::ALL {
            ui.selectable_value(&mut app.chart_type, chart_type, chart_type.label());
        }
        if previous != app.chart_type {
            app.invalidate_chart();
        }

        ui.separator();

        let previous = app.top_n;
        ComboBox::new("top_n_selector", "")
            .selected_text(app.top_n.label())
            .show_ui(ui, |ui| {
                for mode in TopNMode::ALL {
                    ui.selectable_value(&mut app.top_n, mode, mode.label());
                }
            });
        if previous != app.top_n {
            app.invalidate_chart();
        }
    });

    ui.add_space(8.0);
    if let Some(texture) = &app.plot_texture {
        ui.add(egui::Image::new(texture).max_width(ui.available_width()));
    } else if let Some(message) = app.render_error.clone() {
        ui.horizontal(|ui| {
            ui.colored_label(ERROR_COLOR, message);
            if ui.button("Redraw").clicked() {
                app.invalidate_chart();
            }
        });
    } else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Drawing chart...");
        });
    }

    if let Some(coverage) = app.coverage() {
        ui.label(
            RichText::new(format!("Chart covers {:.1}% of repositories", coverage))
                .color(MUTED_COLOR),
        );
    }

    ui.add_space(8.0);
    ui.horizontal_wrapped(|ui| {
        ComboBox::new("export_format", "")
            .selected_text(app.export_format.extension().to_uppercase())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut app.export_format, ExportFormat::Png, "PNG");
                ui.selectable_value(&mut app.export_format, ExportFormat::Jpg, "JPG");
            });
        if ui.button("Export image").clicked() {
            match app.export_image() {
                Ok(path) => app.toasts.success(format!("Saved {}", path.display())),
                Err(e) => {
                    tracing::warn!(error = %e, "chart export failed");
                    app.toasts.error(format!("Export failed: {}", e));
                }
            }
        }
        if ui.button("Export CSV").clicked() {
            match app.export_csv() {
                Ok(path) => app.toasts.success(format!("Saved {}", path.display())),
                Err(e) => {
                    tracing::warn!(error = %e, "CSV export failed");
                    app.toasts.error(format!("Export failed: {}", e));
                }
            }
        }
        if ui.button("Copy share link").clicked() {
            match app.share_url() {
                Some(url) => {
                    ui.output_mut(|o| o.copied_text = url);
                    app.toasts.success("Link copied to clipboard");
                }
                None => app.toasts.error("Nothing to share yet"),
            }
        }
    });

    ui.add_space(8.0);
    let now = Utc::now();
    let mut footer = format!(
        "Updated {}",
        format_relative_time(result.metadata.generated_at, now)
    );
    if let Some(expires) = result
        .metadata
        .cached_until
        .and_then(|until| format_expires_in(until, now))
    {
        footer.push_str(&format!(" · refreshes in {}", expires));
    }
    ui.label(RichText::new(footer).small().color(MUTED_COLOR));
}

fn draw_profile(ui: &mut egui::Ui, result: &SearchSuccess) {
    let profile = &result.profile;
    ui.horizontal(|ui| {
        ui.label(RichText::new(profile.display_name()).size(20.0).strong());
        ui.label(RichText::new(format!("@{}", profile.username)).color(MUTED_COLOR));
        if profile.is_verified {
            ui.label("✔ verified");
        }
        if profile.account_type == AccountType::Organization {
            ui.label("organization");
        }
    });

    ui.horizontal_wrapped(|ui| {
        if let Some(location) = &profile.location {
            ui.label(format!("📍 {}", location));
        }
        if let Some(stats) = &profile.statistics {
            if let Some(repos) = stats.public_repos {
                ui.label(format!("{} public repos", repos));
            }
            if let Some(followers) = stats.followers {
                ui.label(format!("{} followers", followers));
            }
            if let Some(following) = stats.following {
                ui.label(format!("{} following", following));
            }
        }
        if let Some(url) = profile.website_url.as_deref().or(profile.profile_url.as_deref()) {
            ui.hyperlink(url);
        }
    });
}

fn draw_leaderboard(app: &mut App, ui: &mut egui::Ui) {
    let Some((top, bottom)) = app.leaderboard.rows() else {
        return;
    };

    let mut clicked: Option<String> = None;
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("Most searched").strong());
        for row in [top, bottom] {
            if row.is_empty() {
                continue;
            }
            ui.horizontal(|ui| {
                for item in row {
                    let chip = format!("{} · {}", item.username, item.hit);
                    if ui.button(chip).clicked() {
                        clicked = Some(item.username.clone());
                    }
                }
            });
        }
    });

    if let Some(username) = clicked {
        app.search_for(&username);
    }
}

fn draw_toasts(app: &mut App, ctx: &Context) {
    if app.toasts.is_empty() {
        return;
    }

    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            for toast in app.toasts.iter() {
                let fill = match toast.kind {
                    ToastKind::Success => Color32::from_rgb(22, 101, 52),
                    ToastKind::Error => Color32::from_rgb(153, 27, 27),
                    ToastKind::Info => Color32::from_rgb(30, 64, 175),
                };
                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&toast.message).color(Color32::WHITE));
                        if ui.small_button("✕").clicked() {
                            dismissed.push(toast.id);
                        }
                    });
                });
                ui.add_space(4.0);
            }
        });

    for id in dismissed {
        app.toasts.dispatch(ToastAction::Dismiss(id));
    }
}

/// Shown after a panic while drawing a frame
pub fn draw_crash(app: &mut App, ctx: &Context) {
    let mut reload = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.label(RichText::new("Something went wrong").size(22.0).strong());
            if let Some(message) = &app.crash {
                ui.label(RichText::new(message).color(MUTED_COLOR));
            }
            ui.add_space(12.0);
            reload = ui.button("Reload").clicked();
        });
    });

    if reload {
        tracing::info!("reloading after crash");
        *app = App::new(app.config.clone());
        ctx.request_repaint();
    }
}

fn load_plot_texture(app: &mut App, ctx: &Context) {
    let Some(chart) = &app.rendered else {
        app.plot_texture = None;
        return;
    };

    let size = [chart.width as usize, chart.height as usize];
    let texture = ctx.load_texture(
        "plot_texture",
        egui::ColorImage::from_rgba_unmultiplied(size, &chart.to_rgba()),
        egui::TextureOptions::LINEAR,
    );
    app.plot_texture = Some(texture);
}
