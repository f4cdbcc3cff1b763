//! Docked data-table panel and the pop-out data-table window.

use super::commands::AppCommand;
use super::state::NetworkApp;
use crate::data_table::{
    all_columns, build_table, DataTableMessage, DataTableWindow, SortOrder, TableKind, TableModel, TableView,
};
use crate::types::Network;
use eframe::egui;

const TABS: [TableKind; 2] = [TableKind::Node, TableKind::Edge];

impl NetworkApp {
    /// Draws the docked table: selected elements if any, otherwise all.
    pub fn draw_docked_table(&mut self, ui: &mut egui::Ui) {
        let mut commands = Vec::new();
        let tab = self.docked_table.tab;
        let view = self.docked_table.view(tab);

        ui.horizontal(|ui| {
            for kind in TABS {
                if ui.selectable_label(tab == kind, kind.title()).clicked() {
                    commands.push(AppCommand::SetDockedTab(kind));
                }
            }
            ui.separator();
            if let Some(network) = &self.network {
                column_menu(ui, network, tab, view, &mut |column, visible| {
                    commands.push(AppCommand::SetDockedColumnVisible { tab, column, visible });
                });
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⧉ Pop out").on_hover_text("Open the data table in a window").clicked() {
                    commands.push(AppCommand::OpenDataTableWindow);
                }
            });
        });
        ui.separator();

        let table = self
            .network
            .as_ref()
            .map(|network| build_table(network, tab, view))
            .unwrap_or_default();
        let additive = ui.input(|i| i.modifiers.command);
        table_grid(ui, "docked_table", &table, None, &mut |row_id| {
            commands.push(AppCommand::SelectRow { tab, id: row_id, additive });
        });

        self.commands.extend(commands);
    }

    /// Shows the pop-out window in its own viewport, or embedded where
    /// the backend cannot open another window.
    pub fn draw_table_window(&mut self, ctx: &egui::Context) {
        if !self.table_window.open {
            return;
        }
        let mut commands = Vec::new();
        let window = &self.table_window;
        let network = self.network.as_ref();

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of("data_table_window"),
            egui::ViewportBuilder::default()
                .with_title("Data Table")
                .with_inner_size([900.0, 600.0]),
            |ctx, class| {
                if class == egui::ViewportClass::Embedded {
                    let mut open = true;
                    egui::Window::new("Data Table")
                        .open(&mut open)
                        .default_size([820.0, 480.0])
                        .show(ctx, |ui| table_window_body(ui, window, network, &mut commands));
                    if !open {
                        commands.push(AppCommand::CloseDataTableWindow);
                    }
                } else {
                    egui::CentralPanel::default().show(ctx, |ui| {
                        table_window_body(ui, window, network, &mut commands);
                    });
                    if ctx.input(|i| i.viewport().close_requested()) {
                        commands.push(AppCommand::CloseDataTableWindow);
                    }
                }
            },
        );

        if self.table_window.has_pending_filters() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
        self.commands.extend(commands);
    }
}

fn table_window_body(
    ui: &mut egui::Ui,
    window: &DataTableWindow,
    network: Option<&Network>,
    commands: &mut Vec<AppCommand>,
) {
    let tab = window.current_tab;
    let view = window.view(tab);
    let mut messages = Vec::new();

    ui.horizontal(|ui| {
        for kind in TABS {
            if ui.selectable_label(tab == kind, kind.title()).clicked() && kind != tab {
                messages.push(DataTableMessage::TabChanged(kind));
            }
        }
        ui.separator();
        if let Some(network) = network {
            column_menu(ui, network, tab, view, &mut |column, visible| {
                messages.push(DataTableMessage::ToggleColumn { tab, column, visible });
            });
        }
        let mut show_all = !view.show_selected_only;
        if ui.checkbox(&mut show_all, "Show All").changed() {
            messages.push(DataTableMessage::ToggleShowAll { tab, show_all });
        }
        if ui.button("Clear Filter").clicked() {
            messages.push(DataTableMessage::ClearFilter(tab));
        }
        if ui.button("Apply to Network").clicked() {
            messages.push(DataTableMessage::ApplyFilterToNetwork(tab));
        }
    });
    ui.separator();

    egui::TopBottomPanel::bottom(egui::Id::new("data_table_status"))
        .show_inside(ui, |ui| ui.label(window.status(network)));

    let table = network.map(|n| build_table(n, tab, view)).unwrap_or_default();
    let additive = ui.input(|i| i.modifiers.command);
    let mut header_events = Vec::new();
    table_grid(
        ui,
        "popout_table",
        &table,
        Some(HeaderControls { window, tab, view, events: &mut header_events }),
        &mut |id| messages.push(DataTableMessage::RowClicked { tab, id, additive }),
    );

    for event in header_events {
        match event {
            HeaderEvent::Sort(column) => messages.push(DataTableMessage::SortChanged { tab, column }),
            HeaderEvent::Filter(column, value) => commands.push(AppCommand::EditFilter { tab, column, value }),
        }
    }
    commands.extend(messages.into_iter().map(AppCommand::DataTable));
}

enum HeaderEvent {
    Sort(String),
    Filter(String, String),
}

/// Sort buttons and filter inputs above the pop-out table.
struct HeaderControls<'a> {
    window: &'a DataTableWindow,
    tab: TableKind,
    view: &'a TableView,
    events: &'a mut Vec<HeaderEvent>,
}

fn column_menu(
    ui: &mut egui::Ui,
    network: &Network,
    tab: TableKind,
    view: &TableView,
    on_toggle: &mut dyn FnMut(String, bool),
) {
    ui.menu_button("Columns", |ui| {
        for column in all_columns(network, tab) {
            let mut visible = !view.hidden_columns.contains(&column);
            if ui.checkbox(&mut visible, column.as_str()).changed() {
                on_toggle(column, visible);
            }
        }
    });
}

fn table_grid(
    ui: &mut egui::Ui,
    id: &str,
    table: &TableModel,
    mut header: Option<HeaderControls<'_>>,
    on_row_click: &mut dyn FnMut(String),
) {
    if table.columns.is_empty() {
        ui.label("No data available");
        return;
    }
    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        egui::Grid::new(id)
            .num_columns(table.columns.len())
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                match header.as_mut() {
                    Some(controls) => {
                        for column in &table.columns {
                            let arrow = match &controls.view.sort {
                                Some(sort) if &sort.column == column => match sort.order {
                                    SortOrder::Asc => " ▲",
                                    SortOrder::Desc => " ▼",
                                },
                                _ => "",
                            };
                            if ui.button(egui::RichText::new(format!("{column}{arrow}")).strong()).clicked() {
                                controls.events.push(HeaderEvent::Sort(column.clone()));
                            }
                        }
                        ui.end_row();
                        for column in &table.columns {
                            let mut text = controls.window.filter_input(controls.tab, column);
                            let edit = egui::TextEdit::singleline(&mut text)
                                .hint_text("Filter...")
                                .desired_width(90.0);
                            if ui.add(edit).changed() {
                                controls.events.push(HeaderEvent::Filter(column.clone(), text));
                            }
                        }
                        ui.end_row();
                    }
                    None => {
                        for column in &table.columns {
                            ui.strong(column);
                        }
                        ui.end_row();
                    }
                }

                for row in &table.rows {
                    let mut clicked = false;
                    for cell in &row.cells {
                        clicked |= ui.selectable_label(row.selected, cell).clicked();
                    }
                    if clicked {
                        on_row_click(row.id.clone());
                    }
                    ui.end_row();
                }
            });
    });
}
