//! Host window rendering and the eframe update loop

use super::{App, CheckKind};
use crate::constants::{APP_NAME, APP_VERSION};
use crate::theme;
use eframe::egui;
use tracing::{debug, info};

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window geometry for the next launch
        ctx.input(|i| {
            let viewport = i.viewport();
            if let Some(rect) = viewport.outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = viewport.inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        if !self.update_check_done {
            self.update_check_done = true;
            self.check_for_updates(ctx, CheckKind::Automatic);
        }
        self.poll_update_check();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(theme::SPACING_XL);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(APP_NAME).size(28.0).strong().color(theme::ACCENT));
                ui.label(
                    egui::RichText::new(format!("v{}  ·  {}", APP_VERSION, self.config.build.release))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(theme::SPACING_XL);

                let checking = self.update_check.is_some();
                let label = format!("{}  Check for updates", egui_phosphor::regular::ARROW_CLOCKWISE);
                if ui
                    .add_enabled(!checking && !self.presence.is_open(), theme::button_accent(label))
                    .clicked()
                {
                    debug!("Manual update check requested");
                    self.check_for_updates(ctx, CheckKind::Manual);
                }

                if let Some(status) = &self.status {
                    ui.add_space(theme::SPACING_MD);
                    ui.horizontal(|ui| {
                        if checking {
                            ui.spinner();
                        }
                        ui.label(egui::RichText::new(status).color(theme::TEXT_MUTED));
                    });
                }
            });
        });

        self.render_update_dialog(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application shutting down");
        self.save_settings();
    }
}
