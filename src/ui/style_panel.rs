//! Node and edge style panels. Every edit is applied to the network at once.

use super::commands::AppCommand;
use super::state::NetworkApp;
use crate::constants::{EDGE_WIDTH_RANGE, NODE_FONT_SIZE_RANGE, NODE_SIZE_RANGE};
use crate::style::{ArrowShape, EdgeStyleParams, LineStyle, NodeShape, NodeStyleParams};
use eframe::egui;

impl NetworkApp {
    /// Draws whichever style panels are open.
    pub fn draw_style_panels(&mut self, ctx: &egui::Context) {
        if self.show_node_style {
            let mut open = true;
            let mut params = self.node_style.clone();
            egui::Window::new("Node Style")
                .open(&mut open)
                .resizable(false)
                .default_pos(egui::pos2(40.0, 80.0))
                .show(ctx, |ui| node_style_form(ui, &mut params));
            if params != self.node_style {
                self.push_command(AppCommand::SetNodeStyle(params));
            }
            if !open {
                self.push_command(AppCommand::ToggleNodeStylePanel);
            }
        }

        if self.show_edge_style {
            let mut open = true;
            let mut params = self.edge_style.clone();
            egui::Window::new("Edge Style")
                .open(&mut open)
                .resizable(false)
                .default_pos(egui::pos2(40.0, 340.0))
                .show(ctx, |ui| edge_style_form(ui, &mut params));
            if params != self.edge_style {
                self.push_command(AppCommand::SetEdgeStyle(params));
            }
            if !open {
                self.push_command(AppCommand::ToggleEdgeStylePanel);
            }
        }
    }
}

fn node_style_form(ui: &mut egui::Ui, params: &mut NodeStyleParams) {
    egui::Grid::new("node_style_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
        ui.label("Font size");
        ui.add(
            egui::DragValue::new(&mut params.font_size)
                .range(NODE_FONT_SIZE_RANGE)
                .suffix(" px"),
        );
        ui.end_row();

        ui.label("Label color");
        ui.color_edit_button_srgb(&mut params.label_color.0);
        ui.end_row();

        ui.label("Fill color");
        ui.color_edit_button_srgb(&mut params.fill_color.0);
        ui.end_row();

        ui.label("Shape");
        egui::ComboBox::from_id_salt("node_shape")
            .selected_text(params.shape.label())
            .show_ui(ui, |ui| {
                for shape in NodeShape::ALL {
                    ui.selectable_value(&mut params.shape, shape, shape.label());
                }
            });
        ui.end_row();

        ui.label("Size");
        ui.add(egui::Slider::new(&mut params.size, NODE_SIZE_RANGE).suffix(" px"));
        ui.end_row();
    });
}

fn edge_style_form(ui: &mut egui::Ui, params: &mut EdgeStyleParams) {
    egui::Grid::new("edge_style_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
        ui.label("Line style");
        ui.horizontal(|ui| {
            ui.radio_value(&mut params.line_style, LineStyle::Solid, "Solid");
            ui.radio_value(&mut params.line_style, LineStyle::Dashed, "Dashed");
        });
        ui.end_row();

        ui.label("Arrow");
        ui.horizontal(|ui| {
            ui.radio_value(&mut params.arrow_shape, ArrowShape::Triangle, "Triangle");
            ui.radio_value(&mut params.arrow_shape, ArrowShape::None, "None");
        });
        ui.end_row();

        ui.label("Width");
        ui.add(egui::Slider::new(&mut params.width, EDGE_WIDTH_RANGE).suffix(" px"));
        ui.end_row();
    });
}
