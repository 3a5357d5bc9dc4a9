use anyhow::{Context, Result};
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use tracing::{error, info, warn};

use super::theme::PAGE_BG;
use super::views;
use crate::api::{Schedule, ScheduleClient};
use crate::config::Settings;
use crate::grid::GridLayout;
use crate::rename::{RenameControl, RenameRequest};
use crate::view::{self, ScheduleView};

pub struct JadwalApp {
    settings: Settings,
    view: ScheduleView,

    // Present only once a schedule we may edit has loaded
    rename: Option<RenameControl>,

    window_title: String,
    status_message: Option<(String, bool)>, // (message, is_error)

    // Async communication
    ctx: egui::Context,
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

enum AsyncResult {
    ScheduleLoaded(Schedule),
    ScheduleFailed(String),
    Renamed(String),
    RenameFailed(String),
}

impl JadwalApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, schedule_id: String) -> Result<Self> {
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (result_tx, result_rx) = channel();

        let view = ScheduleView::new(schedule_id);
        let window_title = view.title();

        let mut app = Self {
            settings,
            view,
            rename: None,
            window_title,
            status_message: None,
            ctx: cc.egui_ctx.clone(),
            runtime,
            result_rx,
            result_tx,
        };

        app.load_schedule();
        Ok(app)
    }

    fn load_schedule(&mut self) {
        if self.view.is_loading() {
            return;
        }
        self.view.begin_loading();
        self.status_message = None;

        let client_config = self.settings.config().client_config();
        let schedule_id = self.view.schedule_id().to_string();
        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();

        info!(%schedule_id, "Fetching schedule");
        self.runtime.spawn(async move {
            let result = match ScheduleClient::new(&client_config) {
                Ok(client) => view::load_schedule(&client, &schedule_id).await,
                Err(e) => Err(e),
            };

            let message = match result {
                Ok(schedule) => AsyncResult::ScheduleLoaded(schedule),
                Err(e) => {
                    error!(%schedule_id, "Failed to load schedule: {}", e);
                    if e.is_offline() {
                        AsyncResult::ScheduleFailed("Server tidak dapat dihubungi".to_string())
                    } else {
                        AsyncResult::ScheduleFailed(format!("Error: {}", e))
                    }
                }
            };

            // The window may already be gone; nothing left to update then
            let _ = tx.send(message);
            ctx.request_repaint();
        });
    }

    fn submit_rename(&mut self, request: RenameRequest) {
        let client_config = self.settings.config().client_config();
        let viewer = self.settings.config().viewer();
        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();

        self.runtime.spawn(async move {
            let result = match ScheduleClient::new(&client_config) {
                Ok(client) => {
                    view::rename_schedule(&client, viewer.as_ref(), &request.schedule_id, &request.name)
                        .await
                }
                Err(e) => Err(e),
            };

            let message = match result {
                Ok(Some(name)) => AsyncResult::Renamed(name),
                Ok(None) => return,
                Err(e) => {
                    warn!(schedule_id = %request.schedule_id, "Rename failed: {}", e);
                    AsyncResult::RenameFailed(format!("Gagal mengganti nama: {}", e))
                }
            };

            let _ = tx.send(message);
            ctx.request_repaint();
        });
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                AsyncResult::ScheduleLoaded(schedule) => {
                    self.rename = schedule.has_edit_access.then(|| {
                        RenameControl::new(self.view.schedule_id(), schedule.editable_name())
                    });
                    self.view.finish_loading(schedule);
                    self.status_message = None;
                }
                AsyncResult::ScheduleFailed(msg) => {
                    // No retry; the screen keeps showing the loading state
                    self.status_message = Some((msg, true));
                }
                AsyncResult::Renamed(name) => {
                    self.view.apply_rename(name);
                }
                AsyncResult::RenameFailed(msg) => {
                    self.status_message = Some((msg, true));
                }
            }
        }
    }

    fn sync_window_title(&mut self, ctx: &egui::Context) {
        let title = self.view.title();
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }

    fn toggle_layout(&mut self) {
        if let Err(e) = self.settings.toggle_mobile() {
            warn!("Failed to save config: {:#}", e);
        }
    }

    fn render_title_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.view.is_loading() {
                ui.spinner();
                ui.label(RichText::new("Memuat jadwal ...").size(16.0).color(Color32::WHITE));
            } else if let Some(control) = self.rename.as_mut() {
                if let Some(request) = views::render_rename_control(ui, control) {
                    self.submit_rename(request);
                }
            } else if let Some(schedule) = self.view.schedule() {
                views::render_schedule_name(ui, &schedule.editable_name());
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (icon, hint) = if self.settings.config().mobile {
                    (egui_phosphor::regular::DESKTOP, "Tampilan desktop")
                } else {
                    (egui_phosphor::regular::DEVICE_MOBILE, "Tampilan ringkas")
                };
                let toggle = ui
                    .add(egui::Button::new(RichText::new(icon).size(20.0)).frame(false))
                    .on_hover_text(hint);
                if toggle.clicked() {
                    self.toggle_layout();
                }
            });
        });

        if let Some((msg, is_error)) = &self.status_message {
            let color = if *is_error {
                Color32::from_rgb(0xe5, 0x4d, 0x42)
            } else {
                Color32::from_rgb(176, 176, 168)
            };
            ui.label(RichText::new(msg).size(14.0).color(color));
        }
    }
}

impl eframe::App for JadwalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom or Ctrl+scroll scales the whole UI
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            let scale = (self.settings.config().font_scale * zoom_delta).clamp(0.75, 2.5);
            self.settings.change(|config| config.font_scale = scale);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.settings.save() {
                    warn!("Failed to save config: {:#}", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.settings.config().font_scale);

        self.check_async_results();
        self.sync_window_title(ctx);

        if self.view.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("title_bar")
            .frame(
                egui::Frame::none()
                    .fill(PAGE_BG)
                    .inner_margin(egui::Margin {
                        left: 48.0,
                        right: 48.0,
                        top: 32.0,
                        bottom: 16.0,
                    }),
            )
            .show_separator_line(false)
            .show(ctx, |ui| {
                self.render_title_bar(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PAGE_BG))
            .show(ctx, |ui| {
                let items = self
                    .view
                    .schedule()
                    .map(|s| s.schedule_items.as_slice())
                    .unwrap_or_default();
                let layout = GridLayout::build(items, self.settings.config().grid_options());
                views::render_schedule_grid(ui, &layout);
            });
    }
}
