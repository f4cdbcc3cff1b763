//! Core data types: the in-memory network and its `.cynet` file format.
//!
//! [`Network`] is the graph store the rest of the application talks to. It
//! owns nodes and edges, their selection state and per-element visuals, and
//! knows how to ingest resolved tabular imports and persisted documents.

use crate::constants::*;
use crate::mapping::{convert_cell, AttributeColumnSpec, EdgeListMapping, NodeTableMapping};
use crate::style::{ArrowShape, LineStyle, NodeShape, Rgb};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Attribute data carried by a node or edge.
pub type ElementData = Map<String, Value>;

/// Keys that identify an element and are never overwritten by attribute columns.
const RESERVED_KEYS: &[&str] = &["id", "source", "target"];

/// Node and edge counts of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkStats {
    /// Number of nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
}

/// Outcome of applying a tabular import to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Rows that produced an edge or updated a node
    pub applied_rows: usize,
    /// Rows skipped because of a blank or unknown id
    pub skipped_rows: usize,
}

/// Rendered appearance of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisual {
    /// Label font size in px
    pub font_size: f32,
    /// Label color
    pub label_color: Rgb,
    /// Fill color
    pub fill_color: Rgb,
    /// Outline
    pub shape: NodeShape,
    /// Width in px
    pub width: f32,
    /// Height in px
    pub height: f32,
}

impl Default for NodeVisual {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_NODE_FONT_SIZE,
            label_color: Rgb(DEFAULT_NODE_LABEL_COLOR),
            fill_color: Rgb(DEFAULT_NODE_FILL_COLOR),
            shape: NodeShape::Ellipse,
            width: DEFAULT_NODE_SIZE,
            height: DEFAULT_NODE_SIZE,
        }
    }
}

/// Rendered appearance of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVisual {
    /// Stroke width in px
    pub width: f32,
    /// Solid or dashed
    pub line_style: LineStyle,
    /// Target arrow head
    pub arrow_shape: ArrowShape,
    /// Stroke color
    pub color: Rgb,
}

impl Default for EdgeVisual {
    fn default() -> Self {
        Self {
            width: DEFAULT_EDGE_WIDTH,
            line_style: LineStyle::Solid,
            arrow_shape: ArrowShape::Triangle,
            color: Rgb(DEFAULT_EDGE_COLOR),
        }
    }
}

/// A node of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkNode {
    /// Unique id, also stored under `data["id"]`
    pub id: String,
    /// Attribute data, including `id` and `label`
    pub data: ElementData,
    /// Position in world coordinates
    pub position: (f32, f32),
    /// Whether the node is selected
    pub selected: bool,
    /// Current appearance
    pub visual: NodeVisual,
}

impl NetworkNode {
    fn new(id: &str) -> Self {
        let mut data = ElementData::new();
        data.insert("id".into(), Value::String(id.to_string()));
        data.insert("label".into(), Value::String(id.to_string()));
        Self {
            id: id.to_string(),
            data,
            position: (0.0, 0.0),
            selected: false,
            visual: NodeVisual::default(),
        }
    }

    /// Text drawn next to the node: its `label` attribute, or the id.
    pub fn label(&self) -> String {
        match self.data.get("label") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => self.id.clone(),
            Some(other) => crate::mapping::display_value(other),
        }
    }
}

/// An edge of the network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkEdge {
    /// Unique id, also stored under `data["id"]`
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Attribute data, including `id`, `source` and `target`
    pub data: ElementData,
    /// Whether the edge is selected
    pub selected: bool,
    /// Current appearance
    pub visual: EdgeVisual,
}

impl NetworkEdge {
    /// Whether the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Errors reading a `.cynet` document.
#[derive(Debug, Error)]
pub enum NetworkFileError {
    /// The text is not valid JSON for a network document.
    #[error("invalid network document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document declares a different format.
    #[error("unsupported format {0:?}")]
    UnsupportedFormat(String),

    /// The document was written by a newer version.
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u32),

    /// A node has no usable `id`.
    #[error("node #{0} has no id")]
    MissingNodeId(usize),

    /// Two nodes share an id.
    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),

    /// An edge lacks `source` or `target`.
    #[error("edge #{0} has no source or target")]
    MissingEndpoint(usize),

    /// An edge references a node that does not exist.
    #[error("edge {edge:?} references unknown node {node:?}")]
    DanglingEdge {
        /// Edge id
        edge: String,
        /// Missing node id
        node: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct NetworkDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    elements: DocumentElements,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DocumentElements {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct NodeRecord {
    data: ElementData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EdgeRecord {
    data: ElementData,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Position {
    x: f32,
    y: f32,
}

/// Reads an identifier attribute, accepting strings and numbers.
fn id_field(data: &ElementData, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("").trim()
}

fn merge_attributes(data: &mut ElementData, row: &[String], attributes: &[AttributeColumnSpec]) {
    for spec in attributes {
        if RESERVED_KEYS.contains(&spec.name.as_str()) {
            continue;
        }
        if let Some(value) = convert_cell(cell(row, spec.column_index), spec.data_type, &spec.delimiter) {
            data.insert(spec.name.clone(), value);
        }
    }
}

/// The network being viewed: nodes, edges, selection and visuals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    edges: Vec<NetworkEdge>,
    node_index: HashMap<String, usize>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node and edge counts.
    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
        }
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    /// Mutable access to all nodes.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut NetworkNode> {
        self.nodes.iter_mut()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    /// Mutable access to all edges.
    pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut NetworkEdge> {
        self.edges.iter_mut()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Looks up a node by id for mutation.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut NetworkNode> {
        let index = *self.node_index.get(id)?;
        self.nodes.get_mut(index)
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&NetworkEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Returns the index of node `id`, creating it if needed.
    pub fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(&index) = self.node_index.get(id) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(NetworkNode::new(id));
        self.node_index.insert(id.to_string(), index);
        index
    }

    /// Adds an edge between `source` and `target`, creating missing endpoints.
    /// Returns the new edge id.
    pub fn add_edge(&mut self, source: &str, target: &str, attributes: ElementData) -> String {
        self.ensure_node(source);
        self.ensure_node(target);
        let id = Uuid::new_v4().to_string();
        let mut data = attributes;
        data.insert("id".into(), Value::String(id.clone()));
        data.insert("source".into(), Value::String(source.to_string()));
        data.insert("target".into(), Value::String(target.to_string()));
        self.edges.push(NetworkEdge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            data,
            selected: false,
            visual: EdgeVisual::default(),
        });
        id
    }

    /// Replaces the whole network with the edges described by `rows`.
    ///
    /// Rows with a blank source or target are skipped. Nodes are created for
    /// every endpoint in order of first appearance and laid out on a grid.
    pub fn import_network_data(&mut self, rows: &[Vec<String>], mapping: &EdgeListMapping) -> ImportSummary {
        *self = Self::new();
        let mut summary = ImportSummary::default();
        for row in rows {
            let source = cell(row, mapping.source.index);
            let target = cell(row, mapping.target.index);
            if source.is_empty() || target.is_empty() {
                summary.skipped_rows += 1;
                continue;
            }
            let mut data = ElementData::new();
            merge_attributes(&mut data, row, &mapping.attributes);
            self.add_edge(source, target, data);
            summary.applied_rows += 1;
        }
        self.grid_layout();
        let stats = self.stats();
        log::info!(
            "Imported: {} nodes, {} edges ({} rows skipped)",
            stats.node_count,
            stats.edge_count,
            summary.skipped_rows
        );
        summary
    }

    /// Merges node attributes from `rows` into existing nodes.
    ///
    /// Rows whose id matches no node are skipped; no nodes are created.
    pub fn import_table_data(&mut self, rows: &[Vec<String>], mapping: &NodeTableMapping) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for row in rows {
            let id = cell(row, mapping.node.index);
            match self.node_mut(id) {
                Some(node) if !id.is_empty() => {
                    merge_attributes(&mut node.data, row, &mapping.attributes);
                    summary.applied_rows += 1;
                }
                _ => summary.skipped_rows += 1,
            }
        }
        let stats = self.stats();
        log::info!(
            "Updated: {} nodes, {} edges ({} rows matched, {} unmatched)",
            stats.node_count,
            stats.edge_count,
            summary.applied_rows,
            summary.skipped_rows
        );
        summary
    }

    /// Serializes the network as a pretty-printed `.cynet` document.
    ///
    /// Element data and node positions are written; styles and selection are not.
    pub fn export_to_json(&self) -> Result<String, serde_json::Error> {
        let document = NetworkDocument {
            format: Some(NETWORK_FORMAT_TAG.to_string()),
            version: Some(NETWORK_FORMAT_VERSION),
            elements: DocumentElements {
                nodes: self
                    .nodes
                    .iter()
                    .map(|n| NodeRecord {
                        data: n.data.clone(),
                        position: Some(Position {
                            x: n.position.0,
                            y: n.position.1,
                        }),
                    })
                    .collect(),
                edges: self
                    .edges
                    .iter()
                    .map(|e| EdgeRecord { data: e.data.clone() })
                    .collect(),
            },
        };
        serde_json::to_string_pretty(&document)
    }

    /// Builds a network from a `.cynet` document.
    ///
    /// Documents without `format`/`version` (plain element exports) are accepted.
    /// Edges without an id get a fresh one; nodes without positions are laid out.
    pub fn import_from_json(json: &str) -> Result<Self, NetworkFileError> {
        let document: NetworkDocument = serde_json::from_str(json)?;
        if let Some(format) = document.format.as_deref() {
            if format != NETWORK_FORMAT_TAG {
                return Err(NetworkFileError::UnsupportedFormat(format.to_string()));
            }
        }
        if let Some(version) = document.version {
            if version > NETWORK_FORMAT_VERSION {
                return Err(NetworkFileError::UnsupportedVersion(version));
            }
        }

        let mut network = Self::new();
        let mut needs_layout = false;
        for (i, record) in document.elements.nodes.into_iter().enumerate() {
            let id = id_field(&record.data, "id").ok_or(NetworkFileError::MissingNodeId(i))?;
            if network.node_index.contains_key(&id) {
                return Err(NetworkFileError::DuplicateNode(id));
            }
            let index = network.ensure_node(&id);
            let node = &mut network.nodes[index];
            node.data = record.data;
            node.data.insert("id".into(), Value::String(id));
            match record.position {
                Some(p) => node.position = (p.x, p.y),
                None => needs_layout = true,
            }
        }

        for (i, record) in document.elements.edges.into_iter().enumerate() {
            let source = id_field(&record.data, "source").ok_or(NetworkFileError::MissingEndpoint(i))?;
            let target = id_field(&record.data, "target").ok_or(NetworkFileError::MissingEndpoint(i))?;
            let id = id_field(&record.data, "id").unwrap_or_else(|| Uuid::new_v4().to_string());
            for endpoint in [&source, &target] {
                if !network.node_index.contains_key(endpoint) {
                    return Err(NetworkFileError::DanglingEdge {
                        edge: id,
                        node: endpoint.clone(),
                    });
                }
            }
            let mut data = record.data;
            data.insert("id".into(), Value::String(id.clone()));
            data.insert("source".into(), Value::String(source.clone()));
            data.insert("target".into(), Value::String(target.clone()));
            network.edges.push(NetworkEdge {
                id,
                source,
                target,
                data,
                selected: false,
                visual: EdgeVisual::default(),
            });
        }

        if needs_layout {
            network.grid_layout();
        }
        let stats = network.stats();
        log::info!("Opened: {} nodes, {} edges", stats.node_count, stats.edge_count);
        Ok(network)
    }

    /// Places every node on a square grid in snake order, so nodes added
    /// consecutively stay next to each other across row breaks.
    pub fn grid_layout(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }
        let cols = ((n as f32).sqrt().ceil() as usize).max(1);
        for (idx, node) in self.nodes.iter_mut().enumerate() {
            let r = idx / cols;
            let c = idx % cols;
            let c = if r % 2 == 1 { cols - 1 - c } else { c };
            node.position = (c as f32 * LAYOUT_CELL_SIZE, r as f32 * LAYOUT_CELL_SIZE);
        }
    }

    /// World-space bounding box of all node centers, as (min, max).
    pub fn bounds(&self) -> Option<((f32, f32), (f32, f32))> {
        let first = self.nodes.first()?.position;
        Some(self.nodes.iter().fold((first, first), |(min, max), n| {
            let (x, y) = n.position;
            ((min.0.min(x), min.1.min(y)), (max.0.max(x), max.1.max(y)))
        }))
    }

    /// Clears the selection of every node and edge.
    pub fn unselect_all(&mut self) {
        self.nodes.iter_mut().for_each(|n| n.selected = false);
        self.edges.iter_mut().for_each(|e| e.selected = false);
    }

    /// Selects node `id`. Unless `additive`, everything else is unselected
    /// first. Returns false if there is no such node.
    pub fn select_node(&mut self, id: &str, additive: bool) -> bool {
        if !self.node_index.contains_key(id) {
            return false;
        }
        if !additive {
            self.unselect_all();
        }
        if let Some(node) = self.node_mut(id) {
            node.selected = true;
        }
        true
    }

    /// Selects edge `id`. Unless `additive`, everything else is unselected
    /// first. Returns false if there is no such edge.
    pub fn select_edge(&mut self, id: &str, additive: bool) -> bool {
        let Some(index) = self.edges.iter().position(|e| e.id == id) else {
            return false;
        };
        if !additive {
            self.unselect_all();
        }
        self.edges[index].selected = true;
        true
    }

    /// Number of selected nodes and edges.
    pub fn selection_counts(&self) -> (usize, usize) {
        (
            self.nodes.iter().filter(|n| n.selected).count(),
            self.edges.iter().filter(|e| e.selected).count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{
        resolve_mapping, ColumnRole, ColumnSettings, ColumnTypeTag, ImportMapping, ImportMode, TabularFile,
    };
    use crate::style::{apply_node_style, NodeStyleParams};
    use serde_json::json;

    fn table(headers: &[&str], rows: &[&[&str]]) -> TabularFile {
        TabularFile::new(
            "test.csv",
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn edge_mapping(file: &TabularFile) -> EdgeListMapping {
        let settings = ColumnSettings::with_defaults(ImportMode::EdgeList, file);
        match resolve_mapping(file, &settings).unwrap() {
            ImportMapping::EdgeList(m) => m,
            other => panic!("unexpected mapping {other:?}"),
        }
    }

    fn sample_network() -> Network {
        let file = table(
            &["from", "to", "weight"],
            &[&["a", "b", "3"], &["b", "c", "4"], &["c", "a", ""], &["", "x", "1"]],
        );
        let mut network = Network::new();
        network.import_network_data(&file.rows, &edge_mapping(&file));
        network
    }

    #[test]
    fn edge_list_import_builds_nodes_and_edges() {
        let file = table(
            &["from", "to", "weight"],
            &[&["a", "b", "3"], &["b", "c", "4"], &["c", "a", ""], &["", "x", "1"]],
        );
        let mut network = Network::new();
        let summary = network.import_network_data(&file.rows, &edge_mapping(&file));

        assert_eq!(summary, ImportSummary { applied_rows: 3, skipped_rows: 1 });
        assert_eq!(network.stats(), NetworkStats { node_count: 3, edge_count: 3 });
        let ids: Vec<&str> = network.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(network.node("b").unwrap().data["label"], json!("b"));

        let first = &network.edges()[0];
        assert_eq!(first.data["weight"], json!(3));
        assert_eq!(first.data["source"], json!("a"));
        assert!(!network.edges()[2].data.contains_key("weight"));
    }

    #[test]
    fn edge_list_import_replaces_previous_network() {
        let mut network = sample_network();
        let file = table(&["s", "t"], &[&["p", "q"]]);
        network.import_network_data(&file.rows, &edge_mapping(&file));
        assert_eq!(network.stats(), NetworkStats { node_count: 2, edge_count: 1 });
        assert!(network.node("a").is_none());
    }

    #[test]
    fn table_import_updates_existing_nodes_only() {
        let mut network = sample_network();
        let file = table(
            &["id", "score", "tags"],
            &[&["a", "10", "x;y"], &["zzz", "1", ""], &["c", "", "z"]],
        );
        let mut settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &file);
        settings.set_data_type(2, ColumnTypeTag::StringArray);
        settings.set_delimiter(2, ";");
        let ImportMapping::NodeTable(mapping) = resolve_mapping(&file, &settings).unwrap() else {
            panic!("expected node-table mapping");
        };

        let summary = network.import_table_data(&file.rows, &mapping);

        assert_eq!(summary, ImportSummary { applied_rows: 2, skipped_rows: 1 });
        assert_eq!(network.stats().node_count, 3);
        let a = network.node("a").unwrap();
        assert_eq!(a.data["score"], json!(10));
        assert_eq!(a.data["tags"], json!(["x", "y"]));
        let c = network.node("c").unwrap();
        assert!(!c.data.contains_key("score"));
        assert_eq!(c.data["tags"], json!(["z"]));
    }

    #[test]
    fn attribute_columns_cannot_overwrite_identity() {
        let file = table(&["id", "source"], &[&["a", "spoof"]]);
        let mut network = sample_network();
        let mut settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &file);
        settings.set_role(0, ColumnRole::NodeId);
        let ImportMapping::NodeTable(mapping) = resolve_mapping(&file, &settings).unwrap() else {
            panic!("expected node-table mapping");
        };
        network.import_table_data(&file.rows, &mapping);
        assert!(!network.node("a").unwrap().data.contains_key("source"));
    }

    #[test]
    fn export_then_import_preserves_counts_and_data() {
        let mut original = sample_network();
        apply_node_style(Some(&mut original), &NodeStyleParams { size: 80.0, ..Default::default() });
        original.select_node("a", false);

        let json = original.export_to_json().unwrap();
        let restored = Network::import_from_json(&json).unwrap();

        assert_eq!(restored.stats(), original.stats());
        assert_eq!(restored.node("b").unwrap().position, original.node("b").unwrap().position);
        assert_eq!(restored.edges()[0].id, original.edges()[0].id);
        assert_eq!(restored.edges()[0].data["weight"], json!(3));
        // Styles and selection are session-only
        assert_eq!(restored.node("a").unwrap().visual, NodeVisual::default());
        assert_eq!(restored.selection_counts(), (0, 0));
    }

    #[test]
    fn import_accepts_plain_element_documents() {
        let json = r#"{"elements":{"nodes":[{"data":{"id":1}},{"data":{"id":"two"}}],
                       "edges":[{"data":{"source":1,"target":"two"}}]}}"#;
        let network = Network::import_from_json(json).unwrap();
        assert_eq!(network.stats(), NetworkStats { node_count: 2, edge_count: 1 });
        assert!(network.node("1").is_some());
        assert_eq!(network.edges()[0].source, "1");
        assert!(!network.edges()[0].id.is_empty());
    }

    #[test]
    fn import_rejects_broken_documents() {
        assert!(matches!(
            Network::import_from_json("not json"),
            Err(NetworkFileError::Json(_))
        ));
        assert!(matches!(
            Network::import_from_json(r#"{"format":"other","elements":{}}"#),
            Err(NetworkFileError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Network::import_from_json(r#"{"elements":{"nodes":[{"data":{}}]}}"#),
            Err(NetworkFileError::MissingNodeId(0))
        ));
        assert!(matches!(
            Network::import_from_json(r#"{"elements":{"nodes":[{"data":{"id":"a"}},{"data":{"id":"a"}}]}}"#),
            Err(NetworkFileError::DuplicateNode(_))
        ));
        assert!(matches!(
            Network::import_from_json(
                r#"{"elements":{"nodes":[{"data":{"id":"a"}}],"edges":[{"data":{"source":"a","target":"b"}}]}}"#
            ),
            Err(NetworkFileError::DanglingEdge { .. })
        ));
    }

    #[test]
    fn selection_is_exclusive_unless_additive() {
        let mut network = sample_network();
        assert!(network.select_node("a", false));
        assert!(network.select_node("b", true));
        assert_eq!(network.selection_counts(), (2, 0));
        let edge_id = network.edges()[0].id.clone();
        assert!(network.select_edge(&edge_id, false));
        assert_eq!(network.selection_counts(), (0, 1));
        assert!(!network.select_node("missing", false));
        assert_eq!(network.selection_counts(), (0, 1));
    }

    #[test]
    fn grid_layout_uses_snake_order() {
        let mut network = Network::new();
        for id in ["a", "b", "c", "d"] {
            network.ensure_node(id);
        }
        network.grid_layout();
        let positions: Vec<(f32, f32)> = network.nodes().iter().map(|n| n.position).collect();
        let cell = LAYOUT_CELL_SIZE;
        assert_eq!(positions, vec![(0.0, 0.0), (cell, 0.0), (cell, cell), (0.0, cell)]);
        assert_eq!(network.bounds(), Some(((0.0, 0.0), (cell, cell))));
    }
}
