//! Shared application-wide constants.
//! Centralizes tweakable values used across importing, styling and rendering.

// Import
/// Delay between entering the loading state and applying an import, so the
/// loading indicator gets a frame to render first.
pub const LOADING_DELAY_SECS: f64 = 0.05;
/// Delimiter used for array-typed attribute columns when the user leaves it blank.
pub const DEFAULT_ARRAY_DELIMITER: &str = ",";
/// Extensions offered by the tabular file pickers.
pub const TABULAR_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

// Persisted network files
/// Suggested file name for "Save As".
pub const DEFAULT_NETWORK_FILE_NAME: &str = "network.cynet";
/// Extension of persisted network files.
pub const NETWORK_FILE_EXTENSION: &str = "cynet";
/// Human-readable description used in file dialogs.
pub const NETWORK_FILE_DESCRIPTION: &str = "Cytoscape Network File";
/// Format tag written into every persisted document.
pub const NETWORK_FORMAT_TAG: &str = "cynet";
/// Version written into every persisted document.
pub const NETWORK_FORMAT_VERSION: u32 = 1;

// Node style defaults and limits
/// Default label font size in pixels.
pub const DEFAULT_NODE_FONT_SIZE: f32 = 12.0;
/// Allowed label font size range in pixels.
pub const NODE_FONT_SIZE_RANGE: std::ops::RangeInclusive<f32> = 8.0..=32.0;
/// Default label color.
pub const DEFAULT_NODE_LABEL_COLOR: [u8; 3] = [0x1e, 0x29, 0x3b];
/// Default node fill color.
pub const DEFAULT_NODE_FILL_COLOR: [u8; 3] = [0x25, 0x63, 0xeb];
/// Default node size (width and height) in pixels.
pub const DEFAULT_NODE_SIZE: f32 = 40.0;
/// Allowed node size range in pixels.
pub const NODE_SIZE_RANGE: std::ops::RangeInclusive<f32> = 10.0..=200.0;

// Edge style defaults and limits
/// Default edge width in pixels.
pub const DEFAULT_EDGE_WIDTH: f32 = 2.0;
/// Allowed edge width range in pixels.
pub const EDGE_WIDTH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=20.0;
/// Default edge line color.
pub const DEFAULT_EDGE_COLOR: [u8; 3] = [0x94, 0xa3, 0xb8];

// Layout
/// Horizontal and vertical distance between grid cells for freshly imported nodes.
pub const LAYOUT_CELL_SIZE: f32 = 120.0;

// Data table
/// Debounce for pop-out filter inputs, in seconds.
pub const FILTER_DEBOUNCE_SECS: f64 = 0.3;
/// Columns shown first in the node table, when present.
pub const NODE_PRIORITY_COLUMNS: &[&str] = &["id", "label", "group"];
/// Columns shown first in the edge table, when present.
pub const EDGE_PRIORITY_COLUMNS: &[&str] = &["id", "source", "target"];

// Canvas interactions
/// Minimum zoom factor.
pub const MIN_ZOOM: f32 = 0.25;
/// Maximum zoom factor.
pub const MAX_ZOOM: f32 = 5.0;
/// Margin kept around the graph when fitting it into the canvas, in screen pixels.
pub const FIT_MARGIN: f32 = 60.0;
