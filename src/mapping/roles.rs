//! Column roles and the per-column settings edited in the import dialogs.

use super::inference::{infer_column_type, ColumnTypeTag};
use super::tabular::TabularFile;
use crate::constants::DEFAULT_ARRAY_DELIMITER;
use serde::{Deserialize, Serialize};

/// Which kind of tabular file is being imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportMode {
    /// One edge per row, with source and target columns
    EdgeList,
    /// One node per row, adding attributes to existing nodes
    NodeTable,
}

impl ImportMode {
    /// Roles a column can take in this mode, in display order.
    pub fn available_roles(self) -> &'static [ColumnRole] {
        match self {
            ImportMode::EdgeList => &[
                ColumnRole::Source,
                ColumnRole::Target,
                ColumnRole::Attribute,
                ColumnRole::Ignore,
            ],
            ImportMode::NodeTable => &[ColumnRole::NodeId, ColumnRole::Attribute, ColumnRole::Ignore],
        }
    }

    /// Default role for the column at `index`.
    pub fn default_role(self, index: usize) -> ColumnRole {
        match (self, index) {
            (ImportMode::EdgeList, 0) => ColumnRole::Source,
            (ImportMode::EdgeList, 1) => ColumnRole::Target,
            (ImportMode::NodeTable, 0) => ColumnRole::NodeId,
            _ => ColumnRole::Attribute,
        }
    }

    /// Title of the import dialog.
    pub fn title(self) -> &'static str {
        match self {
            ImportMode::EdgeList => "Import Network File",
            ImportMode::NodeTable => "Import Table File",
        }
    }
}

/// What a column contributes to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    /// Edge source node id
    Source,
    /// Edge target node id
    Target,
    /// Node id to attach attributes to
    NodeId,
    /// Typed attribute stored on the element
    Attribute,
    /// Not imported
    Ignore,
}

impl ColumnRole {
    /// Whether at most one column may hold this role.
    pub fn is_exclusive(self) -> bool {
        matches!(self, ColumnRole::Source | ColumnRole::Target | ColumnRole::NodeId)
    }

    /// Label shown in the role selector.
    pub fn label(self) -> &'static str {
        match self {
            ColumnRole::Source => "Source",
            ColumnRole::Target => "Target",
            ColumnRole::NodeId => "Node",
            ColumnRole::Attribute => "Attribute",
            ColumnRole::Ignore => "Ignore",
        }
    }
}

/// Settings for one column of the import dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSetting {
    /// Assigned role
    pub role: ColumnRole,
    /// Chosen data type; only used when the role is `Attribute`
    pub data_type: ColumnTypeTag,
    /// Array delimiter as typed by the user; blank means the default
    pub delimiter: String,
}

impl ColumnSetting {
    /// Whether the data-type and delimiter controls are shown for this column.
    pub fn shows_type_controls(&self) -> bool {
        self.role == ColumnRole::Attribute
    }
}

/// A column whose role was changed as a consequence of another edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    /// Column index
    pub index: usize,
    /// Role before the change
    pub from: ColumnRole,
    /// Role after the change
    pub to: ColumnRole,
}

/// Role assignments for every column of a file.
///
/// Invariant: each exclusive role is held by at most one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSettings {
    mode: ImportMode,
    columns: Vec<ColumnSetting>,
}

impl ColumnSettings {
    /// Default settings for `file`: positional default roles, inferred types
    /// for attribute columns and `string` for the others.
    pub fn with_defaults(mode: ImportMode, file: &TabularFile) -> Self {
        let columns = (0..file.column_count())
            .map(|index| {
                let role = mode.default_role(index);
                let data_type = if role == ColumnRole::Attribute {
                    infer_column_type(&file.rows, index)
                } else {
                    ColumnTypeTag::String
                };
                ColumnSetting {
                    role,
                    data_type,
                    delimiter: DEFAULT_ARRAY_DELIMITER.to_string(),
                }
            })
            .collect();
        Self { mode, columns }
    }

    /// The import mode these settings belong to.
    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    /// All column settings in column order.
    pub fn columns(&self) -> &[ColumnSetting] {
        &self.columns
    }

    /// Settings for a single column.
    pub fn column(&self, index: usize) -> Option<&ColumnSetting> {
        self.columns.get(index)
    }

    /// Index of the column currently holding `role`, if any.
    pub fn holder_of(&self, role: ColumnRole) -> Option<usize> {
        self.columns.iter().position(|c| c.role == role)
    }

    /// Assigns `role` to the column at `index`.
    ///
    /// If `role` is exclusive and already held by another column, that column
    /// is demoted to `Attribute` in the same step. Returns every column whose
    /// role changed (the edited one first), so callers can refresh per-column
    /// controls for demoted columns as well. Roles not available in this
    /// mode and out-of-range indices are ignored.
    pub fn set_role(&mut self, index: usize, role: ColumnRole) -> Vec<RoleChange> {
        let mut changes = Vec::new();
        if !self.mode.available_roles().contains(&role) {
            log::warn!("Role {:?} is not available for {:?} imports", role, self.mode);
            return changes;
        }
        let Some(column) = self.columns.get_mut(index) else {
            return changes;
        };
        if column.role == role {
            return changes;
        }
        changes.push(RoleChange {
            index,
            from: column.role,
            to: role,
        });
        column.role = role;

        if role.is_exclusive() {
            for (other_index, other) in self.columns.iter_mut().enumerate() {
                if other_index != index && other.role == role {
                    other.role = ColumnRole::Attribute;
                    changes.push(RoleChange {
                        index: other_index,
                        from: role,
                        to: ColumnRole::Attribute,
                    });
                }
            }
        }
        changes
    }

    /// Sets the data type of the column at `index`.
    pub fn set_data_type(&mut self, index: usize, data_type: ColumnTypeTag) {
        if let Some(column) = self.columns.get_mut(index) {
            column.data_type = data_type;
        }
    }

    /// Sets the raw delimiter text of the column at `index`.
    pub fn set_delimiter(&mut self, index: usize, delimiter: impl Into<String>) {
        if let Some(column) = self.columns.get_mut(index) {
            column.delimiter = delimiter.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_file() -> TabularFile {
        TabularFile::new(
            "edges.csv",
            vec!["from".into(), "to".into(), "weight".into(), "note".into()],
            vec![
                vec!["a".into(), "b".into(), "1".into(), "x".into()],
                vec!["b".into(), "c".into(), "2".into(), "".into()],
            ],
        )
    }

    #[test]
    fn edge_list_defaults_are_positional() {
        let settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &edge_file());
        let roles: Vec<_> = settings.columns().iter().map(|c| c.role).collect();
        assert_eq!(
            roles,
            vec![ColumnRole::Source, ColumnRole::Target, ColumnRole::Attribute, ColumnRole::Attribute]
        );
        // Exclusive-role columns default to string regardless of content
        assert_eq!(settings.columns()[0].data_type, ColumnTypeTag::String);
        assert_eq!(settings.columns()[2].data_type, ColumnTypeTag::Integer);
        assert_eq!(settings.columns()[3].data_type, ColumnTypeTag::String);
        assert!(settings.columns().iter().all(|c| c.delimiter == ","));
    }

    #[test]
    fn node_table_defaults_first_column_to_node() {
        let settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &edge_file());
        assert_eq!(settings.holder_of(ColumnRole::NodeId), Some(0));
        assert!(settings.columns()[1..].iter().all(|c| c.role == ColumnRole::Attribute));
    }

    #[test]
    fn assigning_source_demotes_previous_holder() {
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &edge_file());
        let changes = settings.set_role(2, ColumnRole::Source);

        assert_eq!(settings.holder_of(ColumnRole::Source), Some(2));
        assert_eq!(settings.columns()[0].role, ColumnRole::Attribute);
        assert_eq!(
            settings.columns().iter().filter(|c| c.role == ColumnRole::Source).count(),
            1
        );
        assert_eq!(
            changes,
            vec![
                RoleChange { index: 2, from: ColumnRole::Attribute, to: ColumnRole::Source },
                RoleChange { index: 0, from: ColumnRole::Source, to: ColumnRole::Attribute },
            ]
        );
        // Demoted column now shows its type controls, the promoted one hides them
        assert!(settings.columns()[0].shows_type_controls());
        assert!(!settings.columns()[2].shows_type_controls());
    }

    #[test]
    fn moving_target_onto_source_column_demotes_only_target_holder() {
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &edge_file());
        settings.set_role(0, ColumnRole::Target);
        assert_eq!(settings.holder_of(ColumnRole::Target), Some(0));
        assert_eq!(settings.holder_of(ColumnRole::Source), None);
        assert_eq!(settings.columns()[1].role, ColumnRole::Attribute);
    }

    #[test]
    fn ignore_and_attribute_are_not_exclusive() {
        let mut settings = ColumnSettings::with_defaults(ImportMode::EdgeList, &edge_file());
        settings.set_role(2, ColumnRole::Ignore);
        let changes = settings.set_role(3, ColumnRole::Ignore);
        assert_eq!(changes.len(), 1);
        assert_eq!(settings.columns()[2].role, ColumnRole::Ignore);
        assert_eq!(settings.columns()[3].role, ColumnRole::Ignore);
    }

    #[test]
    fn unavailable_role_and_bad_index_are_ignored() {
        let mut settings = ColumnSettings::with_defaults(ImportMode::NodeTable, &edge_file());
        assert!(settings.set_role(1, ColumnRole::Source).is_empty());
        assert!(settings.set_role(99, ColumnRole::Attribute).is_empty());
        assert!(settings.set_role(0, ColumnRole::NodeId).is_empty());
        assert_eq!(settings.holder_of(ColumnRole::Source), None);
    }
}
