//! Data-table model shared by the docked panel and the pop-out window.
//!
//! Builds tabular views of node/edge data (column order, hidden columns,
//! filters, sort, selection sync) and implements the message protocol the
//! pop-out window uses to talk to the main window.

use crate::constants::{EDGE_PRIORITY_COLUMNS, FILTER_DEBOUNCE_SECS, NODE_PRIORITY_COLUMNS};
use crate::mapping::display_value;
use crate::types::{ElementData, Network};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Which element table is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TableKind {
    /// Node table
    #[default]
    Node,
    /// Edge table
    Edge,
}

impl TableKind {
    /// Tab caption.
    pub fn title(self) -> &'static str {
        match self {
            TableKind::Node => "Node Table",
            TableKind::Edge => "Edge Table",
        }
    }

    /// Singular noun used in status messages.
    pub fn noun(self) -> &'static str {
        match self {
            TableKind::Node => "node",
            TableKind::Edge => "edge",
        }
    }

    fn priority_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Node => NODE_PRIORITY_COLUMNS,
            TableKind::Edge => EDGE_PRIORITY_COLUMNS,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Active sort of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column being sorted
    pub column: String,
    /// Direction
    pub order: SortOrder,
}

/// Per-tab view settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Columns the user has hidden
    pub hidden_columns: BTreeSet<String>,
    /// Filter text per column; blank entries are inactive
    pub filters: BTreeMap<String, String>,
    /// Current sort, if any
    pub sort: Option<SortState>,
    /// Show only selected elements when anything of this kind is selected
    pub show_selected_only: bool,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            hidden_columns: BTreeSet::new(),
            filters: BTreeMap::new(),
            sort: None,
            show_selected_only: true,
        }
    }
}

impl TableView {
    /// Filters with non-blank text.
    pub fn active_filters(&self) -> impl Iterator<Item = (&String, &String)> {
        self.filters.iter().filter(|(_, v)| !v.trim().is_empty())
    }

    /// Number of active filters.
    pub fn active_filter_count(&self) -> usize {
        self.active_filters().count()
    }

    /// Sorts by `column` ascending, or flips the order if already sorted by it.
    pub fn toggle_sort(&mut self, column: &str) {
        match &mut self.sort {
            Some(sort) if sort.column == column => {
                sort.order = match sort.order {
                    SortOrder::Asc => SortOrder::Desc,
                    SortOrder::Desc => SortOrder::Asc,
                };
            }
            _ => {
                self.sort = Some(SortState {
                    column: column.to_string(),
                    order: SortOrder::Asc,
                });
            }
        }
    }

    /// Shows or hides `column`.
    pub fn set_column_visible(&mut self, column: &str, visible: bool) {
        if visible {
            self.hidden_columns.remove(column);
        } else {
            self.hidden_columns.insert(column.to_string());
        }
    }

    fn matches(&self, data: &ElementData) -> bool {
        self.active_filters().all(|(column, needle)| {
            cell_text(data, column)
                .to_lowercase()
                .contains(&needle.to_lowercase())
        })
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Element id
    pub id: String,
    /// Display text per visible column
    pub cells: Vec<String>,
    /// Whether the element is selected in the network
    pub selected: bool,
}

/// A fully computed table: visible columns plus rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableModel {
    /// Visible column names
    pub columns: Vec<String>,
    /// Rows after selection sync, filtering and sorting
    pub rows: Vec<TableRow>,
}

impl TableModel {
    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_text(data: &ElementData, column: &str) -> String {
    data.get(column).map(display_value).unwrap_or_default()
}

/// Union of data keys, priority columns first, then the rest alphabetically.
fn ordered_columns<'a>(kind: TableKind, data: impl Iterator<Item = &'a ElementData>) -> Vec<String> {
    let mut keys = BTreeSet::new();
    for d in data {
        keys.extend(d.keys().cloned());
    }
    let mut columns: Vec<String> = kind
        .priority_columns()
        .iter()
        .filter(|k| keys.contains(**k))
        .map(|k| k.to_string())
        .collect();
    for key in keys {
        if !columns.contains(&key) {
            columns.push(key);
        }
    }
    columns
}

/// Every column present on elements of `kind`, including hidden ones.
pub fn all_columns(network: &Network, kind: TableKind) -> Vec<String> {
    match kind {
        TableKind::Node => ordered_columns(kind, network.nodes().iter().map(|n| &n.data)),
        TableKind::Edge => ordered_columns(kind, network.edges().iter().map(|e| &e.data)),
    }
}

/// Numeric comparison when both cells are numbers, otherwise case-insensitive text.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) if !x.is_nan() && !y.is_nan() => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Builds the table of `kind` for `view`.
///
/// When `view.show_selected_only` is set and anything of this kind is
/// selected, only selected elements are shown; otherwise all of them.
pub fn build_table(network: &Network, kind: TableKind, view: &TableView) -> TableModel {
    let elements: Vec<(&str, &ElementData, bool)> = match kind {
        TableKind::Node => network
            .nodes()
            .iter()
            .map(|n| (n.id.as_str(), &n.data, n.selected))
            .collect(),
        TableKind::Edge => network
            .edges()
            .iter()
            .map(|e| (e.id.as_str(), &e.data, e.selected))
            .collect(),
    };
    let any_selected = elements.iter().any(|(_, _, selected)| *selected);
    let shown: Vec<_> = if view.show_selected_only && any_selected {
        elements.into_iter().filter(|(_, _, selected)| *selected).collect()
    } else {
        elements
    };
    if shown.is_empty() {
        return TableModel::default();
    }

    let columns: Vec<String> = ordered_columns(kind, shown.iter().map(|(_, d, _)| *d))
        .into_iter()
        .filter(|c| !view.hidden_columns.contains(c))
        .collect();

    let mut filtered: Vec<_> = shown.into_iter().filter(|(_, d, _)| view.matches(d)).collect();
    if let Some(sort) = &view.sort {
        filtered.sort_by(|(_, a, _), (_, b, _)| {
            let ordering = compare_cells(&cell_text(a, &sort.column), &cell_text(b, &sort.column));
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    let rows = filtered
        .into_iter()
        .map(|(id, data, selected)| TableRow {
            id: id.to_string(),
            cells: columns.iter().map(|c| cell_text(data, c)).collect(),
            selected,
        })
        .collect();
    TableModel { columns, rows }
}

/// Result of pushing the current filter back into the network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// No active filter; nothing was selected
    NoFilter,
    /// This many elements matched and are now selected
    Selected(usize),
}

impl FilterOutcome {
    /// Status bar text for this outcome.
    pub fn message(self, kind: TableKind) -> String {
        match self {
            FilterOutcome::NoFilter => "No filter applied. Enter filter values first.".to_string(),
            FilterOutcome::Selected(n) => {
                format!("Applied filter: {} {}s selected in network", n, kind.noun())
            }
        }
    }
}

/// Unselects everything, then selects the elements of `kind` matching the
/// filters of `view`.
pub fn apply_filter_to_network(network: &mut Network, kind: TableKind, view: &TableView) -> FilterOutcome {
    network.unselect_all();
    if view.active_filter_count() == 0 {
        return FilterOutcome::NoFilter;
    }
    let mut count = 0;
    match kind {
        TableKind::Node => {
            for node in network.nodes_mut().filter(|n| view.matches(&n.data)) {
                node.selected = true;
                count += 1;
            }
        }
        TableKind::Edge => {
            for edge in network.edges_mut().filter(|e| view.matches(&e.data)) {
                edge.selected = true;
                count += 1;
            }
        }
    }
    log::info!("Filter selected {} {}s", count, kind.noun());
    FilterOutcome::Selected(count)
}

/// Status bar summary of the network and the pop-out's filters.
pub fn status_line(network: &Network, node_view: &TableView, edge_view: &TableView) -> String {
    let stats = network.stats();
    let (selected_nodes, selected_edges) = network.selection_counts();
    let mut message = format!("Nodes: {} | Edges: {}", stats.node_count, stats.edge_count);
    if selected_nodes > 0 || selected_edges > 0 {
        message.push_str(&format!(
            " | Showing selected: {} nodes, {} edges",
            selected_nodes, selected_edges
        ));
    }
    let filters = node_view.active_filter_count() + edge_view.active_filter_count();
    if filters > 0 {
        message.push_str(&format!(" | Filters: {}", filters));
    }
    message
}

/// Messages sent from the pop-out data-table window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTableMessage {
    /// The user switched tabs
    TabChanged(TableKind),
    /// A column was shown or hidden
    ToggleColumn {
        /// Tab the column belongs to
        tab: TableKind,
        /// Column name
        column: String,
        /// New visibility
        visible: bool,
    },
    /// A (debounced) filter input changed
    FilterChanged {
        /// Tab the filter belongs to
        tab: TableKind,
        /// Column name
        column: String,
        /// New filter text
        value: String,
    },
    /// A column header was clicked
    SortChanged {
        /// Tab being sorted
        tab: TableKind,
        /// Column name
        column: String,
    },
    /// The Show All toggle changed
    ToggleShowAll {
        /// Tab affected
        tab: TableKind,
        /// true shows everything, false follows the network selection
        show_all: bool,
    },
    /// All filters of a tab were cleared
    ClearFilter(TableKind),
    /// Select the filtered elements in the network
    ApplyFilterToNetwork(TableKind),
    /// A row was clicked
    RowClicked {
        /// Tab of the row
        tab: TableKind,
        /// Element id
        id: String,
        /// Ctrl/Cmd held: add to the selection
        additive: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct PendingFilter {
    value: String,
    edited_at: f64,
}

/// State of the pop-out data-table window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTableWindow {
    /// Whether the window is open
    pub open: bool,
    /// Tab currently shown
    pub current_tab: TableKind,
    /// Node tab settings
    pub node_view: TableView,
    /// Edge tab settings
    pub edge_view: TableView,
    /// Whether the column visibility menu is showing
    pub column_menu_open: bool,
    status_override: Option<String>,
    pending_filters: BTreeMap<(TableKind, String), PendingFilter>,
}

impl DataTableWindow {
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

    /// Forgets filters, sort, hidden columns and pending edits, keeping the
    /// window's open state and tab.
    pub fn reset(&mut self) {
        *self = Self {
            open: self.open,
            current_tab: self.current_tab,
            ..Self::default()
        };
    }

    /// Text shown in a filter input: the pending edit if any, else the applied filter.
    pub fn filter_input(&self, tab: TableKind, column: &str) -> String {
        self.pending_filters
            .get(&(tab, column.to_string()))
            .map(|p| p.value.clone())
            .or_else(|| self.view(tab).filters.get(column).cloned())
            .unwrap_or_default()
    }

    /// Records a keystroke in a filter input; it takes effect once the input
    /// has been idle for the debounce interval.
    pub fn edit_filter(&mut self, tab: TableKind, column: &str, value: String, now: f64) {
        self.pending_filters
            .insert((tab, column.to_string()), PendingFilter { value, edited_at: now });
    }

    /// Whether any filter edit is still waiting for its debounce.
    pub fn has_pending_filters(&self) -> bool {
        !self.pending_filters.is_empty()
    }

    /// Filter edits whose debounce interval has elapsed, as messages.
    pub fn take_due_filters(&mut self, now: f64) -> Vec<DataTableMessage> {
        let due: Vec<(TableKind, String)> = self
            .pending_filters
            .iter()
            .filter(|(_, p)| now - p.edited_at >= FILTER_DEBOUNCE_SECS)
            .map(|(key, _)| key.clone())
            .collect();
        due.into_iter()
            .filter_map(|key| {
                let pending = self.pending_filters.remove(&key)?;
                Some(DataTableMessage::FilterChanged {
                    tab: key.0,
                    column: key.1,
                    value: pending.value,
                })
            })
            .collect()
    }

    /// Status bar text.
    pub fn status(&self, network: Option<&Network>) -> String {
        if let Some(message) = &self.status_override {
            return message.clone();
        }
        match network {
            Some(network) => status_line(network, &self.node_view, &self.edge_view),
            None => "No network loaded".to_string(),
        }
    }

    /// Table for `tab`.
    pub fn table(&self, network: &Network, tab: TableKind) -> TableModel {
        build_table(network, tab, self.view(tab))
    }

    /// Handles one message from the window.
    ///
    /// Returns the id of a node the canvas should center on, if any.
    pub fn handle_message(&mut self, message: DataTableMessage, network: Option<&mut Network>) -> Option<String> {
        self.status_override = None;
        match message {
            DataTableMessage::TabChanged(tab) => {
                self.current_tab = tab;
                self.column_menu_open = false;
            }
            DataTableMessage::ToggleColumn { tab, column, visible } => {
                self.view_mut(tab).set_column_visible(&column, visible);
            }
            DataTableMessage::FilterChanged { tab, column, value } => {
                self.view_mut(tab).filters.insert(column, value);
            }
            DataTableMessage::SortChanged { tab, column } => {
                self.view_mut(tab).toggle_sort(&column);
            }
            DataTableMessage::ToggleShowAll { tab, show_all } => {
                self.view_mut(tab).show_selected_only = !show_all;
            }
            DataTableMessage::ClearFilter(tab) => {
                self.view_mut(tab).filters.clear();
                self.pending_filters.retain(|(kind, _), _| *kind != tab);
            }
            DataTableMessage::ApplyFilterToNetwork(tab) => {
                let network = network?;
                let outcome = apply_filter_to_network(network, tab, self.view(tab));
                self.status_override = Some(outcome.message(tab));
            }
            DataTableMessage::RowClicked { tab, id, additive } => {
                let network = network?;
                match tab {
                    TableKind::Node => {
                        if network.select_node(&id, additive) {
                            return Some(id);
                        }
                    }
                    TableKind::Edge => {
                        network.select_edge(&id, additive);
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network() -> Network {
        let mut network = Network::new();
        let mut data = ElementData::new();
        data.insert("weight".into(), json!(10));
        network.add_edge("alpha", "beta", data.clone());
        data.insert("weight".into(), json!(9));
        network.add_edge("beta", "gamma", data.clone());
        data.insert("weight".into(), json!(100));
        network.add_edge("gamma", "Alphabet", data);
        if let Some(node) = network.node_mut("beta") {
            node.data.insert("group".into(), json!("g1"));
            node.data.insert("score".into(), json!(2.5));
        }
        network
    }

    #[test]
    fn columns_put_priority_keys_first_then_alphabetical() {
        let net = network();
        assert_eq!(all_columns(&net, TableKind::Node), vec!["id", "label", "group", "score"]);
        assert_eq!(all_columns(&net, TableKind::Edge), vec!["id", "source", "target", "weight"]);
    }

    #[test]
    fn table_shows_selection_when_present() {
        let mut net = network();
        let view = TableView::default();
        assert_eq!(build_table(&net, TableKind::Node, &view).rows.len(), 4);

        net.select_node("gamma", false);
        let table = build_table(&net, TableKind::Node, &view);
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].selected);
        // Columns come from the shown elements only
        assert_eq!(table.columns, vec!["id", "label"]);

        let show_all = TableView { show_selected_only: false, ..TableView::default() };
        assert_eq!(build_table(&net, TableKind::Node, &show_all).rows.len(), 4);
        // Edge table is unaffected by node selection
        assert_eq!(build_table(&net, TableKind::Edge, &view).rows.len(), 3);
    }

    #[test]
    fn hidden_columns_are_dropped() {
        let net = network();
        let mut view = TableView::default();
        view.set_column_visible("label", false);
        let table = build_table(&net, TableKind::Node, &view);
        assert_eq!(table.columns, vec!["id", "group", "score"]);
        view.set_column_visible("label", true);
        assert_eq!(build_table(&net, TableKind::Node, &view).columns.len(), 4);
    }

    #[test]
    fn filters_are_case_insensitive_substrings() {
        let net = network();
        let mut view = TableView::default();
        view.filters.insert("id".into(), "ALPHA".into());
        view.filters.insert("label".into(), "   ".into());
        let ids: Vec<String> = build_table(&net, TableKind::Node, &view)
            .rows
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["alpha", "Alphabet"]);
        assert_eq!(view.active_filter_count(), 1);
    }

    #[test]
    fn sort_is_numeric_when_possible_and_toggles() {
        let net = network();
        let mut view = TableView::default();
        view.toggle_sort("weight");
        let weights = |view: &TableView| -> Vec<String> {
            let table = build_table(&net, TableKind::Edge, view);
            let col = table.columns.iter().position(|c| c == "weight").unwrap();
            table.rows.iter().map(|r| r.cells[col].clone()).collect()
        };
        assert_eq!(weights(&view), vec!["9", "10", "100"]);
        view.toggle_sort("weight");
        assert_eq!(weights(&view), vec!["100", "10", "9"]);

        view.toggle_sort("target");
        assert_eq!(view.sort.as_ref().unwrap().order, SortOrder::Asc);
    }

    #[test]
    fn compare_cells_falls_back_to_text() {
        assert_eq!(compare_cells("2", "10"), Ordering::Less);
        assert_eq!(compare_cells("b", "A"), Ordering::Greater);
        assert_eq!(compare_cells("", "1"), Ordering::Less);
    }

    #[test]
    fn apply_filter_selects_matches_only() {
        let mut net = network();
        net.select_node("gamma", false);
        let mut view = TableView::default();
        assert_eq!(apply_filter_to_network(&mut net, TableKind::Node, &view), FilterOutcome::NoFilter);
        assert_eq!(net.selection_counts(), (0, 0));

        view.filters.insert("id".into(), "alpha".into());
        let outcome = apply_filter_to_network(&mut net, TableKind::Node, &view);
        assert_eq!(outcome, FilterOutcome::Selected(2));
        assert_eq!(outcome.message(TableKind::Node), "Applied filter: 2 nodes selected in network");
        assert!(!net.node("gamma").unwrap().selected);
    }

    #[test]
    fn status_line_reports_selection_and_filters() {
        let mut net = network();
        let mut node_view = TableView::default();
        let edge_view = TableView::default();
        assert_eq!(status_line(&net, &node_view, &edge_view), "Nodes: 4 | Edges: 3");

        net.select_node("beta", false);
        node_view.filters.insert("id".into(), "b".into());
        assert_eq!(
            status_line(&net, &node_view, &edge_view),
            "Nodes: 4 | Edges: 3 | Showing selected: 1 nodes, 0 edges | Filters: 1"
        );
    }

    #[test]
    fn window_messages_update_state() {
        let mut net = network();
        let mut window = DataTableWindow::default();

        window.handle_message(DataTableMessage::TabChanged(TableKind::Edge), Some(&mut net));
        assert_eq!(window.current_tab, TableKind::Edge);

        window.handle_message(
            DataTableMessage::ToggleShowAll { tab: TableKind::Edge, show_all: true },
            Some(&mut net),
        );
        assert!(!window.edge_view.show_selected_only);

        window.handle_message(
            DataTableMessage::FilterChanged {
                tab: TableKind::Node,
                column: "id".into(),
                value: "gam".into(),
            },
            Some(&mut net),
        );
        window.handle_message(DataTableMessage::ApplyFilterToNetwork(TableKind::Node), Some(&mut net));
        assert_eq!(window.status(Some(&net)), "Applied filter: 1 nodes selected in network");
        assert!(net.node("gamma").unwrap().selected);

        window.handle_message(DataTableMessage::ClearFilter(TableKind::Node), Some(&mut net));
        assert_eq!(
            window.status(Some(&net)),
            "Nodes: 4 | Edges: 3 | Showing selected: 1 nodes, 0 edges"
        );
    }

    #[test]
    fn row_click_selects_and_focuses_nodes() {
        let mut net = network();
        let mut window = DataTableWindow::default();
        let focus = window.handle_message(
            DataTableMessage::RowClicked { tab: TableKind::Node, id: "alpha".into(), additive: false },
            Some(&mut net),
        );
        assert_eq!(focus.as_deref(), Some("alpha"));
        window.handle_message(
            DataTableMessage::RowClicked { tab: TableKind::Node, id: "beta".into(), additive: true },
            Some(&mut net),
        );
        assert_eq!(net.selection_counts(), (2, 0));

        let edge_id = net.edges()[1].id.clone();
        let focus = window.handle_message(
            DataTableMessage::RowClicked { tab: TableKind::Edge, id: edge_id, additive: false },
            Some(&mut net),
        );
        assert_eq!(focus, None);
        assert_eq!(net.selection_counts(), (0, 1));
    }

    #[test]
    fn filter_edits_are_debounced() {
        let mut window = DataTableWindow::default();
        window.edit_filter(TableKind::Node, "id", "a".into(), 1.0);
        window.edit_filter(TableKind::Node, "id", "al".into(), 1.2);
        assert_eq!(window.filter_input(TableKind::Node, "id"), "al");
        assert!(window.take_due_filters(1.4).is_empty());

        let due = window.take_due_filters(1.6);
        assert_eq!(
            due,
            vec![DataTableMessage::FilterChanged {
                tab: TableKind::Node,
                column: "id".into(),
                value: "al".into(),
            }]
        );
        assert!(!window.has_pending_filters());
    }

    #[test]
    fn reset_keeps_window_placement_only() {
        let mut window = DataTableWindow {
            open: true,
            current_tab: TableKind::Edge,
            ..DataTableWindow::default()
        };
        window.view_mut(TableKind::Node).filters.insert("id".into(), "a".into());
        window.view_mut(TableKind::Edge).toggle_sort("weight");
        window.edit_filter(TableKind::Edge, "source", "b".into(), 1.0);
        window.handle_message(DataTableMessage::ApplyFilterToNetwork(TableKind::Node), None);

        window.reset();
        assert!(window.open);
        assert_eq!(window.current_tab, TableKind::Edge);
        assert_eq!(window.node_view, TableView::default());
        assert_eq!(window.edge_view, TableView::default());
        assert!(!window.has_pending_filters());
        assert_eq!(window, DataTableWindow { open: true, current_tab: TableKind::Edge, ..Default::default() });
    }
}
