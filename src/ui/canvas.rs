//! Network canvas: navigation, hit testing and drawing.
//!
//! World coordinates are node positions as stored in the network; the canvas
//! maps them to the screen with a pan offset and a zoom factor.

use super::commands::{AppCommand, CanvasHit};
use super::state::NetworkApp;
use crate::constants::{FIT_MARGIN, MAX_ZOOM, MIN_ZOOM};
use crate::style::{ArrowShape, LineStyle, NodeShape, Rgb};
use crate::types::{Network, NetworkEdge, NetworkNode};
use eframe::egui::{self, StrokeKind};

const SELECTION_COLOR: egui::Color32 = egui::Color32::from_rgb(0xf5, 0x9e, 0x0b);
const OUTLINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1e, 0x29, 0x3b);
const ZOOM_STEP: f32 = 0.025;
const SELF_LOOP_SEGMENTS: usize = 32;
const SELF_LOOP_ARROW_ANGLE: f32 = 0.9;

fn color(rgb: Rgb) -> egui::Color32 {
    let [r, g, b] = rgb.components();
    egui::Color32::from_rgb(r, g, b)
}

fn draw_arrow_head(painter: &egui::Painter, tip: egui::Pos2, direction: egui::Vec2, len: f32, fill: egui::Color32) {
    let perpendicular = egui::vec2(-direction.y, direction.x);
    let half_width = len * 0.5;
    let base = tip - direction * len;
    painter.add(egui::Shape::convex_polygon(
        vec![tip, base + perpendicular * half_width, base - perpendicular * half_width],
        fill,
        egui::Stroke::NONE,
    ));
}

fn node_pos(node: &NetworkNode) -> egui::Pos2 {
    egui::pos2(node.position.0, node.position.1)
}

/// World-space rectangle covered by every node, including its size.
pub fn world_bounds(network: &Network) -> Option<egui::Rect> {
    network
        .nodes()
        .iter()
        .map(|n| egui::Rect::from_center_size(node_pos(n), egui::vec2(n.visual.width, n.visual.height)))
        .reduce(|a, b| a.union(b))
}

/// Offset and zoom that fit `world` into `viewport` with a margin.
pub fn fit_transform(world: egui::Rect, viewport: egui::Rect) -> (egui::Vec2, f32) {
    let available = (viewport.size() - egui::vec2(2.0 * FIT_MARGIN, 2.0 * FIT_MARGIN)).max(egui::vec2(1.0, 1.0));
    let size = world.size().max(egui::vec2(1.0, 1.0));
    let zoom = (available.x / size.x).min(available.y / size.y).clamp(MIN_ZOOM, MAX_ZOOM);
    let offset = viewport.center().to_vec2() - world.center().to_vec2() * zoom;
    (offset, zoom)
}

/// Distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: egui::Pos2, a: egui::Pos2, b: egui::Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - (a + ab * t)).length()
}

fn node_contains(node: &NetworkNode, world_pos: egui::Pos2) -> bool {
    let half = egui::vec2(node.visual.width, node.visual.height) * 0.5;
    let d = world_pos - node_pos(node);
    match node.visual.shape {
        NodeShape::Ellipse => {
            let (nx, ny) = (d.x / half.x.max(1.0), d.y / half.y.max(1.0));
            nx * nx + ny * ny <= 1.0
        }
        NodeShape::Diamond => d.x.abs() / half.x.max(1.0) + d.y.abs() / half.y.max(1.0) <= 1.0,
        NodeShape::Rectangle | NodeShape::Triangle => d.x.abs() <= half.x && d.y.abs() <= half.y,
    }
}

/// Topmost node under `world_pos`.
pub fn node_at(network: &Network, world_pos: egui::Pos2) -> Option<&NetworkNode> {
    network.nodes().iter().rev().find(|n| node_contains(n, world_pos))
}

/// World-space circle drawn for an edge from `node` to itself: centre and radius.
/// It sits on top of the node, overlapping its upper outline.
pub fn self_loop(node: &NetworkNode) -> (egui::Pos2, f32) {
    let radius = node.visual.height * 0.3 + 8.0;
    let center = node_pos(node) - egui::vec2(0.0, node.visual.height * 0.5 + radius * 0.4);
    (center, radius)
}

/// Topmost edge within `tolerance` world units of `world_pos`.
pub fn edge_at(network: &Network, world_pos: egui::Pos2, tolerance: f32) -> Option<&NetworkEdge> {
    network.edges().iter().rev().find(|e| {
        let (Some(source), Some(target)) = (network.node(&e.source), network.node(&e.target)) else {
            return false;
        };
        let reach = e.visual.width * 0.5 + tolerance;
        if e.is_self_loop() {
            let (center, radius) = self_loop(source);
            return ((world_pos - center).length() - radius).abs() <= reach;
        }
        distance_to_segment(world_pos, node_pos(source), node_pos(target)) <= reach
    })
}

impl NetworkApp {
    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.canvas.offset) / self.canvas.zoom_factor
    }

    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.canvas.zoom_factor + self.canvas.offset
    }

    /// Element under a screen position.
    pub fn hit_test(&self, screen_pos: egui::Pos2) -> Option<CanvasHit> {
        let network = self.network.as_ref()?;
        let world_pos = self.screen_to_world(screen_pos);
        if let Some(node) = node_at(network, world_pos) {
            return Some(CanvasHit::Node(node.id.clone()));
        }
        edge_at(network, world_pos, 4.0 / self.canvas.zoom_factor).map(|e| CanvasHit::Edge(e.id.clone()))
    }

    /// Draws the canvas and queues commands for clicks on it.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        self.apply_pending_view_changes(rect);
        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let additive = ui.input(|i| i.modifiers.command);
                let hit = self.hit_test(pos);
                self.push_command(AppCommand::CanvasClick { hit, additive });
            }
        }

        let painter = painter.with_clip_rect(rect);
        match &self.network {
            Some(network) => {
                for edge in network.edges() {
                    self.draw_edge(&painter, network, edge);
                }
                for node in network.nodes() {
                    self.draw_node(&painter, node);
                }
            }
            None => {
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Import a network with File > Network File...",
                    egui::FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
            }
        }
    }

    fn apply_pending_view_changes(&mut self, rect: egui::Rect) {
        if self.canvas.fit_requested {
            self.canvas.fit_requested = false;
            match self.network.as_ref().and_then(world_bounds) {
                Some(bounds) => {
                    let (offset, zoom) = fit_transform(bounds, rect);
                    self.canvas.offset = offset;
                    self.canvas.zoom_factor = zoom;
                }
                None => {
                    self.canvas.offset = rect.center().to_vec2();
                    self.canvas.zoom_factor = 1.0;
                }
            }
        }
        if let Some(id) = self.canvas.focus_node.take() {
            if let Some(node) = self.network.as_ref().and_then(|n| n.node(&id)) {
                self.canvas.offset = rect.center().to_vec2() - node_pos(node).to_vec2() * self.canvas.zoom_factor;
            }
        }
    }

    /// Middle-drag or Cmd/Ctrl+drag pans the canvas.
    fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let should_pan = ui.input(|i| i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command));

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.canvas.is_panning {
                    self.canvas.is_panning = true;
                    self.canvas.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.canvas.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.canvas.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.canvas.is_panning = false;
            self.canvas.last_pan_pos = None;
        }
    }

    /// Scroll zooms around the cursor.
    fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let world_before = self.screen_to_world(mouse_pos);
        let step = if scroll_delta > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = (old_zoom + step).clamp(MIN_ZOOM, MAX_ZOOM);
        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            self.canvas.offset += mouse_pos - self.world_to_screen(world_before);
        }
    }

    fn draw_edge(&self, painter: &egui::Painter, network: &Network, edge: &NetworkEdge) {
        let (Some(source), Some(target)) = (network.node(&edge.source), network.node(&edge.target)) else {
            return;
        };
        let zoom = self.canvas.zoom_factor;
        let line_color = if edge.selected { SELECTION_COLOR } else { color(edge.visual.color) };
        let stroke = egui::Stroke::new(edge.visual.width * zoom, line_color);
        let arrow_len = (edge.visual.width * 3.0 + 6.0) * zoom;

        if edge.is_self_loop() {
            self.draw_self_loop(painter, source, edge, stroke, arrow_len);
            return;
        }

        let start = self.world_to_screen(node_pos(source));
        let center = self.world_to_screen(node_pos(target));
        let delta = center - start;
        if delta.length() <= f32::EPSILON {
            return;
        }
        let direction = delta.normalized();
        // Stop at the target's outline so the arrow head stays visible.
        let end = center - direction * (target.visual.width * 0.5 * zoom);

        let line_end = match edge.visual.arrow_shape {
            ArrowShape::Triangle => end - direction * arrow_len,
            ArrowShape::None => end,
        };
        match edge.visual.line_style {
            LineStyle::Solid => {
                painter.line_segment([start, line_end], stroke);
            }
            LineStyle::Dashed => {
                painter.extend(egui::Shape::dashed_line(&[start, line_end], stroke, 8.0 * zoom, 5.0 * zoom));
            }
        }
        if edge.visual.arrow_shape == ArrowShape::Triangle {
            draw_arrow_head(painter, end, direction, arrow_len, line_color);
        }
    }

    fn draw_self_loop(
        &self,
        painter: &egui::Painter,
        node: &NetworkNode,
        edge: &NetworkEdge,
        stroke: egui::Stroke,
        arrow_len: f32,
    ) {
        let zoom = self.canvas.zoom_factor;
        let (center, radius) = self_loop(node);
        let center = self.world_to_screen(center);
        let radius = radius * zoom;
        let points: Vec<egui::Pos2> = (0..=SELF_LOOP_SEGMENTS)
            .map(|i| {
                let angle = i as f32 / SELF_LOOP_SEGMENTS as f32 * std::f32::consts::TAU;
                center + egui::vec2(angle.cos(), angle.sin()) * radius
            })
            .collect();
        match edge.visual.line_style {
            LineStyle::Solid => {
                painter.add(egui::Shape::line(points, stroke));
            }
            LineStyle::Dashed => {
                painter.extend(egui::Shape::dashed_line(&points, stroke, 8.0 * zoom, 5.0 * zoom));
            }
        }
        if edge.visual.arrow_shape == ArrowShape::Triangle {
            // Head where the loop comes back down into the node, lower right.
            let angle = SELF_LOOP_ARROW_ANGLE;
            let tip = center + egui::vec2(angle.cos(), angle.sin()) * radius;
            let direction = egui::vec2(-angle.sin(), angle.cos());
            draw_arrow_head(painter, tip, direction, arrow_len, stroke.color);
        }
    }

    fn draw_node(&self, painter: &egui::Painter, node: &NetworkNode) {
        let zoom = self.canvas.zoom_factor;
        let center = self.world_to_screen(node_pos(node));
        let size = egui::vec2(node.visual.width, node.visual.height) * zoom;
        let rect = egui::Rect::from_center_size(center, size);
        let fill = color(node.visual.fill_color);
        let stroke = if node.selected {
            egui::Stroke::new(3.0, SELECTION_COLOR)
        } else {
            egui::Stroke::new(1.0, OUTLINE_COLOR)
        };

        match node.visual.shape {
            NodeShape::Ellipse => {
                painter.add(egui::Shape::ellipse_filled(center, size * 0.5, fill));
                painter.add(egui::Shape::ellipse_stroke(center, size * 0.5, stroke));
            }
            NodeShape::Rectangle => {
                painter.rect_filled(rect, 0.0, fill);
                painter.rect_stroke(rect, 0.0, stroke, StrokeKind::Outside);
            }
            NodeShape::Diamond => {
                painter.add(egui::Shape::convex_polygon(
                    vec![rect.center_top(), rect.right_center(), rect.center_bottom(), rect.left_center()],
                    fill,
                    stroke,
                ));
            }
            NodeShape::Triangle => {
                painter.add(egui::Shape::convex_polygon(
                    vec![rect.center_top(), rect.right_bottom(), rect.left_bottom()],
                    fill,
                    stroke,
                ));
            }
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            node.label(),
            egui::FontId::proportional((node.visual.font_size * zoom).max(1.0)),
            color(node.visual.label_color),
        );
    }
}
