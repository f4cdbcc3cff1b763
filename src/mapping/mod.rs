//! Import configuration: reading tabular files, inferring column types,
//! assigning column roles and resolving them into an import mapping.
//!
//! Nothing in this module touches the UI; the import dialogs only hold a
//! [`TabularFile`] and its [`ColumnSettings`] and call [`resolve_mapping`]
//! when the user confirms.

mod convert;
mod inference;
mod resolve;
mod roles;
mod tabular;

pub use convert::{convert_cell, display_value};
pub use inference::{infer_column_type, is_integer_like, ColumnTypeTag};
pub use resolve::{
    resolve_mapping, AttributeColumnSpec, ColumnRef, EdgeListMapping, ImportMapping, MappingError,
    NodeTableMapping,
};
pub use roles::{ColumnRole, ColumnSetting, ColumnSettings, ImportMode, RoleChange};
pub use tabular::{TabularError, TabularFile};
