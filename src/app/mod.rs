//! App module - the host window that checks for releases and owns the update dialog

mod updates;
mod views;

pub use updates::{evaluate_release, fetch_manifest, version_newer, CheckKind, CheckOutcome};

use crate::config::UpdateConfig;
use crate::dialog::{DialogServices, UpdateDialog};
use crate::error::Result;
use crate::launcher::SystemLauncher;
use crate::presence::DialogPresence;
use crate::settings::{self, SettingsStore, SharedSettings};
use crate::theme;
use crate::transfer::HttpTransport;
use crate::types::ReleaseInfo;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) config: UpdateConfig,
    pub(crate) settings: SharedSettings,
    pub(crate) presence: DialogPresence,
    pub(crate) services: DialogServices,
    pub(crate) dialog: Option<UpdateDialog>,
    // Release check
    pub(crate) update_check_done: bool,
    pub(crate) update_check: Option<Receiver<CheckOutcome>>,
    pub(crate) status: Option<String>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<Instant>,
    // Window geometry, saved on exit
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, store: SettingsStore, config: UpdateConfig) -> Result<Self> {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let settings = settings::shared(store);
        let services = DialogServices {
            launcher: Arc::new(SystemLauncher),
            transport: Arc::new(HttpTransport::new(cc.egui_ctx.clone())?),
            settings: settings.clone(),
        };

        Ok(Self {
            config,
            settings,
            presence: DialogPresence::new(),
            services,
            dialog: None,
            update_check_done: false,
            update_check: None,
            status: None,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
        })
    }

    /// Construct and show the dialog. Callers check `presence` first.
    pub(crate) fn open_update_dialog(&mut self, release: ReleaseInfo) {
        let mut dialog = UpdateDialog::new(
            release,
            self.config.build.clone(),
            self.presence.clone(),
            self.services.clone(),
        );
        dialog.open();
        self.dialog = Some(dialog);
    }

    /// Draw the dialog if one exists and collect its result once it closes.
    pub(crate) fn render_update_dialog(&mut self, ctx: &egui::Context) {
        let mut finished: Option<Option<PathBuf>> = None;
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.show(ctx);
            if !dialog.is_open() {
                finished = Some(dialog.take_artifact());
            }
        }

        if let Some(artifact) = finished {
            self.dialog = None;
            if let Some(path) = artifact {
                info!(path = %path.display(), "Update downloaded, ready for installer");
                self.status = Some(format!("Update saved to {}", path.display()));
                self.show_toast(format!("Update downloaded to {}", path.display()));
            }
        }
    }

    pub(crate) fn show_toast(&mut self, msg: String) {
        self.toast_message = Some(msg);
        self.toast_start = Some(Instant::now());
    }

    /// Render toast notification (bottom-right, 4s visible then fade, pause on hover)
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let visible_duration = 4.0;
        let fade_duration = 0.5;
        let total_duration = visible_duration + fade_duration;
        let margin = 12.0;

        let screen = ctx.screen_rect();
        let toast_pos = egui::pos2(screen.right() - margin, screen.bottom() - margin);
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > visible_duration {
            ((total_duration - elapsed) / fade_duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("update_toast"))
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1c, 0x19, 0x17, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(
                            theme::ACCENT.r(),
                            theme::ACCENT.g(),
                            theme::ACCENT.b(),
                            (100.0 * alpha) as u8,
                        ),
                    ))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&msg).color(egui::Color32::from_rgba_unmultiplied(
                            255,
                            255,
                            255,
                            (255.0 * alpha) as u8,
                        )));
                    });
            });

        // Pause timer while hovering
        if response.response.hovered() {
            self.toast_start = Some(Instant::now());
        }

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }

    pub fn save_settings(&self) {
        let mut store = settings::lock(&self.settings);
        store.set_window_geometry(
            self.window_pos.map(|p| (p.x, p.y)),
            self.window_size.map(|s| (s.x, s.y)),
        );
        store.save();
    }
}
