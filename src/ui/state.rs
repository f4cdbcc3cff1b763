//! Application state structures.
//!
//! Holds the loaded network, the pending import dialog, canvas navigation,
//! style panel parameters, data-table views and file operation plumbing.

use super::commands::AppCommand;
use crate::data_table::{DataTableWindow, TableKind, TableView};
use crate::mapping::{ColumnSettings, ImportMapping, ImportMode, TabularFile};
use crate::style::{EdgeStyleParams, NodeStyleParams};
use crate::types::Network;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Canvas navigation state.
pub struct CanvasState {
    /// Screen position of the world origin
    pub offset: egui::Vec2,
    /// Zoom level (1.0 = 100%)
    pub zoom_factor: f32,
    /// Fit the whole graph into view on the next frame
    pub fit_requested: bool,
    /// Centre this node on the next frame
    pub focus_node: Option<String>,
    /// Whether the user is currently panning
    pub is_panning: bool,
    /// Last pointer position while panning
    pub last_pan_pos: Option<egui::Pos2>,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            fit_requested: false,
            focus_node: None,
            is_panning: false,
            last_pan_pos: None,
        }
    }
}

/// File handle and async file operation plumbing.
pub struct FileState {
    /// Path of the `.cynet` file the network was opened from or saved to.
    /// `None` on the web, where there is no writable handle.
    pub current_path: Option<String>,
    /// Save operation to start on the next frame
    pub pending_save_operation: Option<PendingSaveOperation>,
    /// File picker to open on the next frame
    pub pending_load_operation: Option<PendingLoadOperation>,
    /// Channel for results from async contexts
    pub file_operation_sender: Option<Sender<FileOperationResult>>,
    /// Receiving end, drained once per frame
    pub file_operation_receiver: Option<Receiver<FileOperationResult>>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            current_path: None,
            pending_save_operation: None,
            pending_load_operation: None,
            file_operation_sender: Some(sender),
            file_operation_receiver: Some(receiver),
        }
    }
}

/// Pending save operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSaveOperation {
    /// Ask for a location (download on the web)
    SaveAs,
    /// Write to the current path
    Save,
}

/// Which file picker to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingLoadOperation {
    /// Delimited text file for an import dialog
    Tabular(ImportMode),
    /// `.cynet` network file
    Network,
}

/// Messages sent from async file operations back to the app.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Network written; carries the path, or `None` when downloaded
    SaveCompleted(Option<String>),
    /// A tabular file was picked and read
    TabularLoaded {
        /// Dialog the file is for
        mode: ImportMode,
        /// File name shown in the dialog
        file_name: String,
        /// Raw file contents
        bytes: Vec<u8>,
    },
    /// A `.cynet` file was picked and read
    NetworkLoaded {
        /// Writable path, native only
        path: Option<String>,
        /// File contents
        content: String,
    },
    /// Operation failed with an error message
    OperationFailed(String),
}

/// Actions waiting for the user to confirm discarding the current network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirmAction {
    /// Import a new network from a tabular file
    NetworkFile,
    /// Open a `.cynet` file
    Open,
}

/// An open import dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDialog {
    /// The file being imported
    pub file: TabularFile,
    /// Role, type and delimiter per column
    pub settings: ColumnSettings,
    /// Time the loading state was entered; `None` while editing
    pub loading_since: Option<f64>,
    /// Mapping resolved when the user confirmed
    pub mapping: Option<ImportMapping>,
}

impl ImportDialog {
    /// A dialog for `file` with default column settings.
    pub fn new(mode: ImportMode, file: TabularFile) -> Self {
        let settings = ColumnSettings::with_defaults(mode, &file);
        Self {
            file,
            settings,
            loading_since: None,
            mapping: None,
        }
    }

    /// Import mode of this dialog.
    pub fn mode(&self) -> ImportMode {
        self.settings.mode()
    }

    /// Whether the import is running; buttons are disabled meanwhile.
    pub fn is_loading(&self) -> bool {
        self.loading_since.is_some()
    }
}

/// Settings of the docked data-table panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DockedTable {
    /// Tab currently shown
    pub tab: TableKind,
    /// Node tab: only hidden columns are used
    pub node_view: TableView,
    /// Edge tab: only hidden columns are used
    pub edge_view: TableView,
}

impl DockedTable {
    /// Settings of `tab`.
    pub fn view(&self, tab: TableKind) -> &TableView {
        match tab {
            TableKind::Node => &self.node_view,
            TableKind::Edge => &self.edge_view,
        }
    }

    /// Mutable settings of `tab`.
    pub fn view_mut(&mut self, tab: TableKind) -> &mut TableView {
        match tab {
            TableKind::Node => &mut self.node_view,
            TableKind::Edge => &mut self.edge_view,
        }
    }
}

/// The main application structure.
///
/// Only UI preferences are persisted; the network, dialogs and styles
/// start fresh every session.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkApp {
    /// The loaded network, if any
    #[serde(skip)]
    pub network: Option<Network>,
    /// File handle and async plumbing
    #[serde(skip)]
    pub file: FileState,
    /// Open import dialog
    #[serde(skip)]
    pub import_dialog: Option<ImportDialog>,
    /// Canvas navigation
    #[serde(skip)]
    pub canvas: CanvasState,
    /// Node style panel parameters
    #[serde(skip)]
    pub node_style: NodeStyleParams,
    /// Edge style panel parameters
    #[serde(skip)]
    pub edge_style: EdgeStyleParams,
    /// Whether the node style panel is open
    #[serde(skip)]
    pub show_node_style: bool,
    /// Whether the edge style panel is open
    #[serde(skip)]
    pub show_edge_style: bool,
    /// Docked data table
    #[serde(skip)]
    pub docked_table: DockedTable,
    /// Pop-out data table
    #[serde(skip)]
    pub table_window: DataTableWindow,
    /// Message of the blocking alert window
    #[serde(skip)]
    pub alert: Option<String>,
    /// Action waiting for confirmation
    #[serde(skip)]
    pub pending_confirm: Option<PendingConfirmAction>,
    /// Commands queued by widgets during the current frame
    #[serde(skip)]
    pub commands: Vec<AppCommand>,
    /// Input time of the current frame, in seconds
    #[serde(skip)]
    pub now: f64,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Remembered height of the docked data-table panel
    pub table_panel_height: f32,
}

impl Default for NetworkApp {
    fn default() -> Self {
        Self {
            network: None,
            file: FileState::default(),
            import_dialog: None,
            canvas: CanvasState::default(),
            node_style: NodeStyleParams::default(),
            edge_style: EdgeStyleParams::default(),
            show_node_style: false,
            show_edge_style: false,
            docked_table: DockedTable::default(),
            table_window: DataTableWindow::default(),
            alert: None,
            pending_confirm: None,
            commands: Vec::new(),
            now: 0.0,
            dark_mode: false,
            table_panel_height: 220.0,
        }
    }
}

impl NetworkApp {
    /// Restores persisted preferences from eframe storage, falling back to defaults.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.storage
            .and_then(|storage| storage.get_string("app_state"))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("Ignoring stored app state: {err}");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Serializes the persisted preferences to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes persisted preferences from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether an import dialog, confirmation or alert is waiting for the user.
    pub fn modal_open(&self) -> bool {
        self.import_dialog.is_some() || self.pending_confirm.is_some() || self.alert.is_some()
    }

    /// Table File needs a network to attach attributes to.
    pub fn can_import_table(&self) -> bool {
        self.network.is_some()
    }

    /// Save needs a network and a writable path.
    pub fn can_save(&self) -> bool {
        self.network.is_some() && self.file.current_path.is_some()
    }

    /// Save As needs a network.
    pub fn can_save_as(&self) -> bool {
        self.network.is_some()
    }

    /// Close needs a network or a pending import.
    pub fn can_close(&self) -> bool {
        self.network.is_some() || self.import_dialog.is_some()
    }
}
