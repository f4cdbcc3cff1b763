//! Import dialogs for edge lists and node tables.

use super::commands::AppCommand;
use super::state::{ImportDialog, NetworkApp};
use crate::mapping::ColumnTypeTag;
use eframe::egui;

impl NetworkApp {
    /// Draws the open import dialog, if any.
    pub fn draw_import_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.import_dialog else {
            return;
        };
        let mut commands = Vec::new();
        // Blocks all other input until Import or Cancel.
        egui::Modal::new(egui::Id::new("import_dialog")).show(ctx, |ui| {
            ui.set_min_width(480.0);
            ui.heading(dialog.mode().title());
            draw_dialog_body(ui, dialog, &mut commands);
        });
        self.commands.extend(commands);
    }
}

fn draw_dialog_body(ui: &mut egui::Ui, dialog: &ImportDialog, commands: &mut Vec<AppCommand>) {
    let loading = dialog.is_loading();
    ui.label(format!("{} ({} rows)", dialog.file.file_name, dialog.file.row_count()));
    ui.separator();

    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
        ui.add_enabled_ui(!loading, |ui| {
            egui::Grid::new("import_columns")
                .num_columns(4)
                .striped(true)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("Column");
                    ui.strong("Role");
                    ui.strong("Data Type");
                    ui.strong("Delimiter");
                    ui.end_row();

                    for (index, setting) in dialog.settings.columns().iter().enumerate() {
                        ui.label(dialog.file.header(index));

                        egui::ComboBox::from_id_salt(("import_role", index))
                            .selected_text(setting.role.label())
                            .show_ui(ui, |ui| {
                                for role in dialog.mode().available_roles() {
                                    if ui.selectable_label(setting.role == *role, role.label()).clicked()
                                        && setting.role != *role
                                    {
                                        commands.push(AppCommand::SetColumnRole { index, role: *role });
                                    }
                                }
                            });

                        if setting.shows_type_controls() {
                            egui::ComboBox::from_id_salt(("import_type", index))
                                .selected_text(setting.data_type.label())
                                .show_ui(ui, |ui| {
                                    for tag in ColumnTypeTag::ALL {
                                        if ui.selectable_label(setting.data_type == tag, tag.label()).clicked() {
                                            commands.push(AppCommand::SetColumnType { index, data_type: tag });
                                        }
                                    }
                                });

                            let mut delimiter = setting.delimiter.clone();
                            let edit = egui::TextEdit::singleline(&mut delimiter).desired_width(40.0);
                            if ui.add(edit).changed() {
                                commands.push(AppCommand::SetColumnDelimiter { index, delimiter });
                            }
                        } else {
                            ui.label("");
                            ui.label("");
                        }
                        ui.end_row();
                    }
                });
        });
    });

    ui.separator();
    ui.horizontal(|ui| {
        if loading {
            ui.spinner();
            ui.label("Importing...");
        }
        if ui.add_enabled(!loading, egui::Button::new("Import")).clicked() {
            commands.push(AppCommand::ConfirmImport);
        }
        if ui.add_enabled(!loading, egui::Button::new("Cancel")).clicked() {
            commands.push(AppCommand::CancelImport);
        }
    });
}
