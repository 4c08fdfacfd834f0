//! egui rendering for the update dialog

use super::UpdateDialog;
use crate::constants::APP_NAME;
use crate::theme;
use crate::types::ActionRole;
use crate::ui::components::{format_bytes, render_release_notes};
use eframe::egui;

impl UpdateDialog {
    /// Drain transfer events and draw the dialog. Call once per frame.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.poll_transfer();
        if !self.is_open() {
            return;
        }
        if self.is_downloading() {
            // Keep the progress bar moving between transfer wake-ups
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        // Built-in Modal with backdrop, escape-to-close, click-outside handling
        let modal_area = egui::Modal::default_area(egui::Id::new("update_dialog"))
            .default_width(theme::DIALOG_WIDTH + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("update_dialog"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| self.render_contents(ui));

        let error_open = self.error.is_some();
        let enter = !error_open && ctx.input(|i| i.key_pressed(egui::Key::Enter));
        let default_role = self
            .buttons
            .iter()
            .find(|b| b.is_default && b.enabled)
            .map(|b| b.role);

        if let Some(role) = response.inner {
            self.on_action_selected(role);
        } else if let (true, Some(role)) = (enter, default_role) {
            self.on_action_selected(role);
        } else if response.should_close() && !error_open {
            self.close();
        }

        if self.error.is_some() {
            self.render_error(ctx);
        }
    }

    fn render_contents(&self, ui: &mut egui::Ui) -> Option<ActionRole> {
        ui.set_min_width(theme::DIALOG_WIDTH);
        ui.set_max_width(theme::DIALOG_WIDTH);

        // Header
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_SM);
            ui.label(egui::RichText::new(egui_phosphor::regular::ARROW_CIRCLE_UP).size(32.0).color(theme::ACCENT));
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(format!("A new version of {} is available", APP_NAME))
                    .size(theme::FONT_TITLE)
                    .strong(),
            );
            ui.label(
                egui::RichText::new(self.release.version_label())
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
            );
        });

        // Release notes
        if !self.notes.is_empty() {
            ui.add_space(theme::SPACING_LG);
            theme::notes_frame().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                egui::ScrollArea::vertical()
                    .max_height(theme::NOTES_MAX_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| render_release_notes(ui, &self.notes));
            });
        }

        // Progress
        if self.progress.visible {
            ui.add_space(theme::SPACING_LG);
            let bar = if self.progress.bound > 0 {
                let fraction = self.progress.value as f32 / self.progress.bound as f32;
                egui::ProgressBar::new(fraction.clamp(0.0, 1.0)).text(format!(
                    "{} / {}",
                    format_bytes(self.progress.value),
                    format_bytes(self.progress.bound)
                ))
            } else {
                egui::ProgressBar::new(0.0)
                    .animate(true)
                    .text(format!("Downloading... {}", format_bytes(self.progress.value)))
            };
            ui.add(bar.fill(theme::ACCENT));
        }

        ui.add_space(theme::SPACING_XL);

        // Button area
        let mut clicked = None;
        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // right_to_left: lay out last button first so the row reads left to right
                for button in self.buttons.iter().rev() {
                    let text = format!("{}  {}", button.icon, button.label);
                    let widget = if button.is_default {
                        theme::button_accent(text)
                    } else {
                        theme::button(text)
                    };
                    if ui.add_enabled(button.enabled, widget).clicked() {
                        clicked = Some(button.role);
                    }
                }
            });
        });
        clicked
    }

    fn render_error(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.error.clone() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("update_dialog_error"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_max_width(theme::DIALOG_WIDTH - 60.0);
            ui.label(
                egui::RichText::new(format!("{}  {}", egui_phosphor::regular::WARNING, notice.title))
                    .size(theme::FONT_HEADING)
                    .strong(),
            );
            ui.add_space(theme::SPACING_MD);
            theme::error_frame().show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.add(egui::Label::new(egui::RichText::new(&notice.message).color(theme::ERROR_TEXT)).wrap());
            });
            ui.add_space(theme::SPACING_LG);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(theme::button_accent(format!("{}  OK", egui_phosphor::regular::CHECK))).clicked()
            })
            .inner
        });

        if response.inner || response.should_close() {
            self.dismiss_error();
        }
    }
}
