//! # Cynet Viewer
//!
//! A desktop and browser network viewer. Networks are imported from
//! delimited text files (one edge per row), enriched with node attribute
//! tables, styled, browsed in a data table, and saved as `.cynet` JSON
//! documents.
//!
//! ## Features
//! - Column mapping dialogs with type inference and exclusive roles
//! - Typed attribute conversion, including delimited arrays
//! - Live node and edge style panels
//! - Docked and pop-out data tables with filtering, sorting and selection sync
//! - Canvas panning, zooming and click selection

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod data_table;
mod mapping;
mod style;
mod types;
mod ui;

// Re-export public types and functions
pub use data_table::*;
pub use mapping::*;
pub use style::*;
pub use types::*;
pub use ui::{AppCommand, CanvasHit, NetworkApp};

/// Runs the viewer in a native window.
///
/// File dialogs are spawned on the ambient tokio runtime, so the caller must
/// have entered one.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     let runtime = tokio::runtime::Runtime::new().expect("runtime");
///     let _guard = runtime.enter();
///     cynet_viewer::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Cynet Viewer")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cynet Viewer",
        options,
        Box::new(|cc| Ok(Box::new(NetworkApp::new(cc)))),
    )
}

/// Starts the viewer on an HTML canvas.
///
/// Meant to be called from a `wasm-bindgen` entry point in the host page.
#[cfg(target_arch = "wasm32")]
pub async fn start_web(canvas: web_sys::HtmlCanvasElement) -> Result<(), eframe::wasm_bindgen::JsValue> {
    eframe::WebRunner::new()
        .start(
            canvas,
            eframe::WebOptions::default(),
            Box::new(|cc| Ok(Box::new(NetworkApp::new(cc)))),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_network_has_no_stats() {
        let network = Network::default();
        assert!(network.is_empty());
        assert_eq!(network.stats(), NetworkStats::default());
    }

    #[test]
    fn style_defaults_match_panel_defaults() {
        let node = NodeStyleParams::default();
        assert_eq!(node.font_size, 12.0);
        assert_eq!(node.label_color.to_string(), "#1e293b");
        assert_eq!(node.fill_color.to_string(), "#2563eb");
        assert_eq!(node.shape, NodeShape::Ellipse);
        assert_eq!(node.size, 40.0);

        let edge = EdgeStyleParams::default();
        assert_eq!(edge.line_style, LineStyle::Solid);
        assert_eq!(edge.arrow_shape, ArrowShape::Triangle);
        assert_eq!(edge.width, 2.0);
    }
}
