//! Turning column settings into an import mapping for the graph store.

use super::inference::ColumnTypeTag;
use super::roles::{ColumnRole, ColumnSettings, ImportMode};
use super::tabular::TabularFile;
use crate::constants::DEFAULT_ARRAY_DELIMITER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a set of column settings cannot be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Edge-list import without both a source and a target column.
    #[error("Please select Source and Target columns.")]
    MissingSourceOrTarget,

    /// Node-table import without a node column.
    #[error("Please select a Node column.")]
    MissingNodeColumn,
}

/// Reference to a column by position and header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Column index in the file
    pub index: usize,
    /// Header name
    pub name: String,
}

/// An attribute column to import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeColumnSpec {
    /// Column index in the file
    pub column_index: usize,
    /// Header name, used as the attribute key
    pub name: String,
    /// Type each cell is converted to
    pub data_type: ColumnTypeTag,
    /// Separator for array types; never blank
    pub delimiter: String,
}

/// Column mapping for edge-list imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeListMapping {
    /// Column holding source node ids
    pub source: ColumnRef,
    /// Column holding target node ids
    pub target: ColumnRef,
    /// Edge attributes in column order
    pub attributes: Vec<AttributeColumnSpec>,
}

/// Column mapping for node-table imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTableMapping {
    /// Column holding node ids
    pub node: ColumnRef,
    /// Node attributes in column order
    pub attributes: Vec<AttributeColumnSpec>,
}

/// A resolved import mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportMapping {
    /// Mapping for an edge list
    EdgeList(EdgeListMapping),
    /// Mapping for a node table
    NodeTable(NodeTableMapping),
}

impl ImportMapping {
    /// Attribute columns of either kind of mapping.
    pub fn attributes(&self) -> &[AttributeColumnSpec] {
        match self {
            ImportMapping::EdgeList(m) => &m.attributes,
            ImportMapping::NodeTable(m) => &m.attributes,
        }
    }
}

/// Resolves `settings` against `file` into an import mapping.
///
/// Attributes keep the original column order; a blank delimiter becomes ",".
/// Ignored columns are left out.
pub fn resolve_mapping(
    file: &TabularFile,
    settings: &ColumnSettings,
) -> Result<ImportMapping, MappingError> {
    let column_ref = |index: usize| ColumnRef {
        index,
        name: file.header(index).to_string(),
    };

    let attributes: Vec<AttributeColumnSpec> = settings
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.role == ColumnRole::Attribute)
        .map(|(index, c)| AttributeColumnSpec {
            column_index: index,
            name: file.header(index).to_string(),
            data_type: c.data_type,
            delimiter: if c.delimiter.is_empty() {
                DEFAULT_ARRAY_DELIMITER.to_string()
            } else {
                c.delimiter.clone()
            },
        })
        .collect();

    match settings.mode() {
        ImportMode::EdgeList => {
            let source = settings.holder_of(ColumnRole::Source);
            let target = settings.holder_of(ColumnRole::Target);
            match (source, target) {
                (Some(source), Some(target)) => Ok(ImportMapping::EdgeList(EdgeListMapping {
                    source: column_ref(source),
                    target: column_ref(target),
                    attributes,
                })),
                _ => Err(MappingError::MissingSourceOrTarget),
            }
        }
        ImportMode::NodeTable => {
            let node = settings
                .holder_of(ColumnRole::NodeId)
                .ok_or(MappingError::MissingNodeColumn)?;
            Ok(ImportMapping::NodeTable(NodeTableMapping {
                node: column_ref(node),
                attributes,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(headers: &[&str], rows: &[&[&str]]) -> TabularFile {
        TabularFile::new(
            "test.csv",
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn edge_list_without_target_is_rejected() {
        let f = file(&["a", "b", "c"], &[&["1", "2", "3"]]);
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &f);
        settings.set_role(1, ColumnRole::Ignore);
        settings.set_data_type(2, ColumnTypeTag::FloatArray);
        assert_eq!(
            resolve_mapping(&f, &settings),
            Err(MappingError::MissingSourceOrTarget)
        );

        settings.set_role(2, ColumnRole::Attribute);
        assert_eq!(
            resolve_mapping(&f, &settings),
            Err(MappingError::MissingSourceOrTarget)
        );
    }

    #[test]
    fn edge_list_without_source_is_rejected() {
        let f = file(&["a", "b"], &[]);
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &f);
        settings.set_role(0, ColumnRole::Attribute);
        assert_eq!(
            resolve_mapping(&f, &settings),
            Err(MappingError::MissingSourceOrTarget)
        );
    }

    #[test]
    fn node_table_without_node_column_is_rejected() {
        let f = file(&["id", "name"], &[&["1", "x"]]);
        let mut settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &f);
        settings.set_role(0, ColumnRole::Ignore);
        assert_eq!(
            resolve_mapping(&f, &settings),
            Err(MappingError::MissingNodeColumn)
        );
    }

    #[test]
    fn node_table_attributes_keep_column_order() {
        let f = file(&["id", "weight", "name"], &[&["n1", "5", "alpha"], &["n2", "7", "beta"]]);
        let settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &f);
        let mapping = resolve_mapping(&f, &settings).unwrap();

        let ImportMapping::NodeTable(mapping) = mapping else {
            panic!("expected a node-table mapping");
        };
        assert_eq!(mapping.node, ColumnRef { index: 0, name: "id".into() });
        let names: Vec<(usize, &str)> = mapping
            .attributes
            .iter()
            .map(|a| (a.column_index, a.name.as_str()))
            .collect();
        assert_eq!(names, vec![(1, "weight"), (2, "name")]);
        assert_eq!(mapping.attributes[0].data_type, ColumnTypeTag::Integer);
        assert_eq!(mapping.attributes[1].data_type, ColumnTypeTag::String);
    }

    #[test]
    fn edge_list_mapping_skips_ignored_and_defaults_blank_delimiter() {
        let f = file(&["tags", "src", "dst", "skip"], &[&["a|b", "x", "y", "z"]]);
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &f);
        settings.set_role(1, ColumnRole::Source);
        settings.set_role(2, ColumnRole::Target);
        settings.set_role(3, ColumnRole::Ignore);
        settings.set_data_type(0, ColumnTypeTag::StringArray);
        settings.set_delimiter(0, "");

        let ImportMapping::EdgeList(mapping) = resolve_mapping(&f, &settings).unwrap() else {
            panic!("expected an edge-list mapping");
        };
        assert_eq!(mapping.source.name, "src");
        assert_eq!(mapping.target.name, "dst");
        assert_eq!(mapping.attributes.len(), 1);
        assert_eq!(mapping.attributes[0].name, "tags");
        assert_eq!(mapping.attributes[0].delimiter, ",");
        assert_eq!(mapping.attributes[0].data_type, ColumnTypeTag::StringArray);
    }

    #[test]
    fn error_messages_match_alert_text() {
        assert_eq!(
            MappingError::MissingSourceOrTarget.to_string(),
            "Please select Source and Target columns."
        );
        assert_eq!(MappingError::MissingNodeColumn.to_string(), "Please select a Node column.");
    }
}
