//! User interface for the network viewer.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main `NetworkApp`
//! - `commands` - `AppCommand` and the dispatcher that applies them
//! - `file_ops` - Picking, opening and saving files on native and web
//! - `canvas` - Drawing the network, navigation and hit testing
//! - `import_dialog` - Column mapping dialogs for tabular imports
//! - `style_panel` - Node and edge style panels
//! - `data_table_panel` - Docked and pop-out data tables

mod canvas;
mod commands;
mod data_table_panel;
mod file_ops;
mod import_dialog;
mod state;
mod style_panel;

pub use commands::{AppCommand, CanvasHit};
pub use state::NetworkApp;

use state::PendingConfirmAction;

use eframe::egui;

impl eframe::App for NetworkApp {
    /// Persists UI preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string("app_state", json),
            Err(err) => log::error!("Failed to serialize app state: {err}"),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);
        self.now = ctx.input(|i| i.time);

        self.handle_pending_operations(ctx);
        self.poll_import();
        self.poll_filters();
        self.handle_escape(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let status = self.status_text();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(status);
        });

        let max_height = (ctx.input(|i| i.content_rect().height()) * 0.7).max(120.0);
        egui::TopBottomPanel::bottom("data_table_panel")
            .resizable(true)
            .default_height(self.table_panel_height.clamp(120.0, max_height))
            .height_range(80.0..=max_height)
            .show(ctx, |ui| {
                self.table_panel_height = ui.available_height();
                self.draw_docked_table(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });

        self.draw_style_panels(ctx);
        self.draw_table_window(ctx);
        self.draw_import_dialog(ctx);
        self.draw_confirm_dialog(ctx);
        self.draw_alert(ctx);

        self.drain_commands();

        if self.import_dialog.as_ref().is_some_and(|d| d.is_loading()) {
            ctx.request_repaint();
        }
    }
}

impl NetworkApp {
    /// Escape closes an import dialog that is not loading, unless an alert
    /// or confirmation sits on top of it.
    fn handle_escape(&mut self, ctx: &egui::Context) {
        let dialog_on_top = self.alert.is_none() && self.pending_confirm.is_none();
        if self.import_dialog.is_some() && dialog_on_top && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.push_command(AppCommand::CancelImport);
        }
    }

    fn status_text(&self) -> String {
        match &self.network {
            Some(network) => {
                let stats = network.stats();
                let mut text = format!("Nodes: {} | Edges: {}", stats.node_count, stats.edge_count);
                if let Some(path) = &self.file.current_path {
                    text.push_str(&format!(" | {}", path));
                }
                text
            }
            None => "No network loaded".to_string(),
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.modal_open();
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| self.draw_toolbar_items(ui));
        });
    }

    fn draw_toolbar_items(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("File", |ui| {
            let items = [
                ("Network File...", true, AppCommand::MenuNetworkFile),
                ("Table File...", self.can_import_table(), AppCommand::MenuTableFile),
                ("Open...", true, AppCommand::MenuOpen),
                ("Save", self.can_save(), AppCommand::MenuSave),
                ("Save As...", self.can_save_as(), AppCommand::MenuSaveAs),
                ("Close", self.can_close(), AppCommand::MenuClose),
            ];
            for (label, enabled, command) in items {
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    self.push_command(command);
                    ui.close();
                }
            }
        });

        ui.separator();
        if ui.selectable_label(self.show_node_style, "Node Style").clicked() {
            self.push_command(AppCommand::ToggleNodeStylePanel);
        }
        if ui.selectable_label(self.show_edge_style, "Edge Style").clicked() {
            self.push_command(AppCommand::ToggleEdgeStylePanel);
        }
        if ui.selectable_label(self.table_window.open, "Data Table").clicked() {
            let command = if self.table_window.open {
                AppCommand::CloseDataTableWindow
            } else {
                AppCommand::OpenDataTableWindow
            };
            self.push_command(command);
        }
        if ui
            .add_enabled(self.network.is_some(), egui::Button::new("Fit"))
            .clicked()
        {
            self.push_command(AppCommand::FitView);
        }

        ui.separator();
        let mut dark_mode = self.dark_mode;
        if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
            self.push_command(AppCommand::SetDarkMode(dark_mode));
        }
    }

    fn draw_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending_confirm else {
            return;
        };
        let confirm_label = match action {
            PendingConfirmAction::NetworkFile => "Import New Network",
            PendingConfirmAction::Open => "Open File",
        };
        let mut command = None;
        egui::Modal::new(egui::Id::new("confirm_replace")).show(ctx, |ui| {
            ui.heading("Replace current network?");
            ui.label("The current network will be lost.");
            ui.horizontal(|ui| {
                if ui.button(confirm_label).clicked() {
                    command = Some(AppCommand::ConfirmPending);
                }
                if ui.button("Cancel").clicked() {
                    command = Some(AppCommand::CancelPending);
                }
            });
        });
        if let Some(command) = command {
            self.push_command(command);
        }
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.alert else {
            return;
        };
        let mut dismissed = false;
        egui::Modal::new(egui::Id::new("alert")).show(ctx, |ui| {
            ui.heading("Cynet Viewer");
            ui.label(message.as_str());
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
        if dismissed {
            self.push_command(AppCommand::DismissAlert);
        }
    }
}
