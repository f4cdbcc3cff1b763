//! User intents and the single place that applies them.
//!
//! Widgets never mutate application state directly: they push an
//! [`AppCommand`] onto [`NetworkApp::commands`], and the frame loop drains
//! the queue through [`NetworkApp::dispatch`].

use super::state::{ImportDialog, NetworkApp, PendingConfirmAction, PendingLoadOperation, PendingSaveOperation};
use crate::constants::LOADING_DELAY_SECS;
use crate::data_table::{DataTableMessage, TableKind};
use crate::mapping::{resolve_mapping, ColumnRole, ColumnTypeTag, ImportMapping, ImportMode, TabularFile};
use crate::style::{apply_edge_style, apply_node_style, EdgeStyleParams, NodeStyleParams};
use crate::types::Network;

/// Element under the pointer on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasHit {
    /// A node id
    Node(String),
    /// An edge id
    Edge(String),
}

/// Every user intent the application reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// File > Network File...
    MenuNetworkFile,
    /// File > Table File...
    MenuTableFile,
    /// File > Open...
    MenuOpen,
    /// File > Save
    MenuSave,
    /// File > Save As...
    MenuSaveAs,
    /// File > Close
    MenuClose,
    /// Confirm the pending "network will be lost" action
    ConfirmPending,
    /// Cancel the pending confirmation
    CancelPending,
    /// Close the alert window
    DismissAlert,
    /// A tabular file was read for an import dialog
    TabularFileLoaded {
        /// Dialog to open
        mode: ImportMode,
        /// File name
        file_name: String,
        /// Raw contents
        bytes: Vec<u8>,
    },
    /// A `.cynet` file was read
    NetworkFileLoaded {
        /// Writable path, if any
        path: Option<String>,
        /// File contents
        content: String,
    },
    /// A save finished; `None` path means downloaded
    SaveCompleted(Option<String>),
    /// An async file operation failed
    FileOperationFailed(String),
    /// Import dialog: role dropdown changed
    SetColumnRole {
        /// Column index
        index: usize,
        /// New role
        role: ColumnRole,
    },
    /// Import dialog: data-type dropdown changed
    SetColumnType {
        /// Column index
        index: usize,
        /// New type
        data_type: ColumnTypeTag,
    },
    /// Import dialog: delimiter input changed
    SetColumnDelimiter {
        /// Column index
        index: usize,
        /// New delimiter text
        delimiter: String,
    },
    /// Import dialog: Import button
    ConfirmImport,
    /// Apply the confirmed import once the loading state has rendered
    FinishImport,
    /// Import dialog: Cancel button or Escape
    CancelImport,
    /// Show or hide the node style panel
    ToggleNodeStylePanel,
    /// Show or hide the edge style panel
    ToggleEdgeStylePanel,
    /// Node style panel edited
    SetNodeStyle(NodeStyleParams),
    /// Edge style panel edited
    SetEdgeStyle(EdgeStyleParams),
    /// Docked table tab changed
    SetDockedTab(TableKind),
    /// Docked table column shown or hidden
    SetDockedColumnVisible {
        /// Tab of the column
        tab: TableKind,
        /// Column name
        column: String,
        /// New visibility
        visible: bool,
    },
    /// Docked table row clicked
    SelectRow {
        /// Tab of the row
        tab: TableKind,
        /// Element id
        id: String,
        /// Ctrl/Cmd held
        additive: bool,
    },
    /// Open the pop-out data table
    OpenDataTableWindow,
    /// Close the pop-out data table
    CloseDataTableWindow,
    /// Pop-out filter input edited (debounced before it applies)
    EditFilter {
        /// Tab of the filter
        tab: TableKind,
        /// Column name
        column: String,
        /// Filter text
        value: String,
    },
    /// Message from the pop-out data table
    DataTable(DataTableMessage),
    /// Click on the canvas
    CanvasClick {
        /// Element under the pointer
        hit: Option<CanvasHit>,
        /// Ctrl/Cmd held
        additive: bool,
    },
    /// Fit the graph into the canvas
    FitView,
    /// Toggle dark mode
    SetDarkMode(bool),
}

impl AppCommand {
    /// Commands that change the network behind an open modal dialog or alert.
    fn blocked_by_modal(&self) -> bool {
        matches!(
            self,
            AppCommand::MenuNetworkFile
                | AppCommand::MenuTableFile
                | AppCommand::MenuOpen
                | AppCommand::MenuSave
                | AppCommand::MenuSaveAs
                | AppCommand::MenuClose
                | AppCommand::CanvasClick { .. }
                | AppCommand::SelectRow { .. }
                | AppCommand::DataTable(
                    DataTableMessage::RowClicked { .. } | DataTableMessage::ApplyFilterToNetwork(_)
                )
        )
    }
}

impl NetworkApp {
    /// Queues `command` for the end of the frame.
    pub fn push_command(&mut self, command: AppCommand) {
        self.commands.push(command);
    }

    /// Dispatches every queued command in order.
    pub fn drain_commands(&mut self) {
        let commands = std::mem::take(&mut self.commands);
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Applies one command to the application state.
    pub fn dispatch(&mut self, command: AppCommand) {
        if self.modal_open() && command.blocked_by_modal() {
            log::debug!("Ignoring command while a modal is open");
            return;
        }
        match command {
            AppCommand::MenuNetworkFile => {
                if self.network.is_some() {
                    self.pending_confirm = Some(PendingConfirmAction::NetworkFile);
                } else {
                    self.request_tabular_file(ImportMode::EdgeList);
                }
            }
            AppCommand::MenuTableFile => {
                if self.can_import_table() {
                    self.request_tabular_file(ImportMode::NodeTable);
                } else {
                    log::warn!("Table import requested without a network");
                }
            }
            AppCommand::MenuOpen => {
                if self.network.is_some() {
                    self.pending_confirm = Some(PendingConfirmAction::Open);
                } else {
                    self.file.pending_load_operation = Some(PendingLoadOperation::Network);
                }
            }
            AppCommand::MenuSave => {
                if self.can_save() {
                    self.file.pending_save_operation = Some(PendingSaveOperation::Save);
                } else {
                    log::warn!("Save requested without a network or file handle");
                }
            }
            AppCommand::MenuSaveAs => {
                if self.can_save_as() {
                    self.file.pending_save_operation = Some(PendingSaveOperation::SaveAs);
                } else {
                    log::warn!("Save As requested without a network");
                }
            }
            AppCommand::MenuClose => self.close_network(),
            AppCommand::ConfirmPending => match self.pending_confirm.take() {
                Some(PendingConfirmAction::NetworkFile) => self.request_tabular_file(ImportMode::EdgeList),
                Some(PendingConfirmAction::Open) => {
                    self.file.pending_load_operation = Some(PendingLoadOperation::Network);
                }
                None => {}
            },
            AppCommand::CancelPending => self.pending_confirm = None,
            AppCommand::DismissAlert => self.alert = None,
            AppCommand::TabularFileLoaded { mode, file_name, bytes } => {
                self.open_import_dialog(mode, &file_name, &bytes);
            }
            AppCommand::NetworkFileLoaded { path, content } => self.open_network_file(path, &content),
            AppCommand::SaveCompleted(path) => {
                match &path {
                    Some(path) => log::info!("Network saved to {}", path),
                    None => log::info!("Network downloaded"),
                }
                self.file.current_path = path;
            }
            AppCommand::FileOperationFailed(message) => {
                log::error!("File operation failed: {}", message);
                self.alert = Some(message);
            }
            AppCommand::SetColumnRole { index, role } => {
                if let Some(dialog) = self.editable_dialog() {
                    for change in dialog.settings.set_role(index, role) {
                        log::debug!("Column {} role {:?} -> {:?}", change.index, change.from, change.to);
                    }
                }
            }
            AppCommand::SetColumnType { index, data_type } => {
                if let Some(dialog) = self.editable_dialog() {
                    dialog.settings.set_data_type(index, data_type);
                }
            }
            AppCommand::SetColumnDelimiter { index, delimiter } => {
                if let Some(dialog) = self.editable_dialog() {
                    dialog.settings.set_delimiter(index, delimiter);
                }
            }
            AppCommand::ConfirmImport => self.confirm_import(),
            AppCommand::FinishImport => self.finish_import(),
            AppCommand::CancelImport => {
                if self.import_dialog.as_ref().is_some_and(|d| !d.is_loading()) {
                    log::info!("Import cancelled");
                    self.import_dialog = None;
                }
            }
            AppCommand::ToggleNodeStylePanel => self.show_node_style = !self.show_node_style,
            AppCommand::ToggleEdgeStylePanel => self.show_edge_style = !self.show_edge_style,
            AppCommand::SetNodeStyle(params) => {
                apply_node_style(self.network.as_mut(), &params);
                self.node_style = params;
            }
            AppCommand::SetEdgeStyle(params) => {
                apply_edge_style(self.network.as_mut(), &params);
                self.edge_style = params;
            }
            AppCommand::SetDockedTab(tab) => self.docked_table.tab = tab,
            AppCommand::SetDockedColumnVisible { tab, column, visible } => {
                self.docked_table.view_mut(tab).set_column_visible(&column, visible);
            }
            AppCommand::SelectRow { tab, id, additive } => {
                let Some(network) = self.network.as_mut() else {
                    return;
                };
                match tab {
                    TableKind::Node => {
                        if network.select_node(&id, additive) {
                            self.canvas.focus_node = Some(id);
                        }
                    }
                    TableKind::Edge => {
                        network.select_edge(&id, additive);
                    }
                }
            }
            AppCommand::OpenDataTableWindow => self.table_window.open = true,
            AppCommand::CloseDataTableWindow => self.table_window.open = false,
            AppCommand::EditFilter { tab, column, value } => {
                self.table_window.edit_filter(tab, &column, value, self.now);
            }
            AppCommand::DataTable(message) => {
                if let Some(id) = self.table_window.handle_message(message, self.network.as_mut()) {
                    self.canvas.focus_node = Some(id);
                }
            }
            AppCommand::CanvasClick { hit, additive } => {
                let Some(network) = self.network.as_mut() else {
                    return;
                };
                match hit {
                    Some(CanvasHit::Node(id)) => {
                        network.select_node(&id, additive);
                    }
                    Some(CanvasHit::Edge(id)) => {
                        network.select_edge(&id, additive);
                    }
                    None if !additive => network.unselect_all(),
                    None => {}
                }
            }
            AppCommand::FitView => self.canvas.fit_requested = true,
            AppCommand::SetDarkMode(dark_mode) => self.dark_mode = dark_mode,
        }
    }

    /// Queues the loading-delay completion once the delay has elapsed.
    pub fn poll_import(&mut self) {
        let due = self
            .import_dialog
            .as_ref()
            .and_then(|d| d.loading_since)
            .is_some_and(|since| self.now - since >= LOADING_DELAY_SECS);
        if due {
            self.push_command(AppCommand::FinishImport);
        }
    }

    /// Queues the pop-out filter edits whose debounce interval has elapsed.
    pub fn poll_filters(&mut self) {
        for message in self.table_window.take_due_filters(self.now) {
            self.push_command(AppCommand::DataTable(message));
        }
    }

    fn request_tabular_file(&mut self, mode: ImportMode) {
        self.file.pending_load_operation = Some(PendingLoadOperation::Tabular(mode));
    }

    fn editable_dialog(&mut self) -> Option<&mut ImportDialog> {
        self.import_dialog.as_mut().filter(|d| !d.is_loading())
    }

    fn open_import_dialog(&mut self, mode: ImportMode, file_name: &str, bytes: &[u8]) {
        if mode == ImportMode::NodeTable && self.network.is_none() {
            log::warn!("Ignoring node table {}: no network loaded", file_name);
            return;
        }
        match TabularFile::parse(file_name, bytes) {
            Ok(file) => {
                log::info!(
                    "Read {}: {} columns, {} rows",
                    file.file_name,
                    file.column_count(),
                    file.row_count()
                );
                self.import_dialog = Some(ImportDialog::new(mode, file));
            }
            Err(err) => {
                log::error!("Failed to read {}: {}", file_name, err);
                self.alert = Some(format!("Failed to read the file.\n{}", err));
            }
        }
    }

    fn open_network_file(&mut self, path: Option<String>, content: &str) {
        match Network::import_from_json(content) {
            Ok(network) => {
                let stats = network.stats();
                log::info!("Opened network: {} nodes, {} edges", stats.node_count, stats.edge_count);
                self.install_network(network);
                self.file.current_path = path;
            }
            Err(err) => {
                log::error!("Failed to open network file: {}", err);
                self.alert = Some(format!("Failed to open the file.\n{}", err));
            }
        }
    }

    fn confirm_import(&mut self) {
        let now = self.now;
        let Some(dialog) = self.editable_dialog() else {
            return;
        };
        match resolve_mapping(&dialog.file, &dialog.settings) {
            Ok(mapping) => {
                log::info!("Import mapping resolved: {:?}", mapping);
                dialog.mapping = Some(mapping);
                dialog.loading_since = Some(now);
            }
            Err(err) => {
                log::warn!("Import mapping rejected: {}", err);
                self.alert = Some(err.to_string());
            }
        }
    }

    fn finish_import(&mut self) {
        let Some(dialog) = self.import_dialog.take_if(|d| d.mapping.is_some()) else {
            return;
        };
        match dialog.mapping {
            Some(ImportMapping::EdgeList(mapping)) => {
                let mut network = Network::new();
                network.import_network_data(&dialog.file.rows, &mapping);
                self.install_network(network);
                self.file.current_path = None;
            }
            Some(ImportMapping::NodeTable(mapping)) => match self.network.as_mut() {
                Some(network) => {
                    network.import_table_data(&dialog.file.rows, &mapping);
                }
                None => log::warn!("Node table import finished without a network"),
            },
            None => {}
        }
    }

    /// Makes `network` current, applying the style panels and fitting the view.
    fn install_network(&mut self, mut network: Network) {
        apply_node_style(Some(&mut network), &self.node_style);
        apply_edge_style(Some(&mut network), &self.edge_style);
        self.network = Some(network);
        self.pending_confirm = None;
        self.canvas.fit_requested = true;
        self.canvas.focus_node = None;
        self.table_window.reset();
    }

    fn close_network(&mut self) {
        if !self.can_close() {
            return;
        }
        self.network = None;
        self.import_dialog = None;
        self.file.current_path = None;
        self.canvas.focus_node = None;
        self.table_window.reset();
        log::info!("Network closed");
    }
}
