//! Column data-type inference for tabular imports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data type assigned to an attribute column.
///
/// Auto-detection only ever proposes [`ColumnTypeTag::String`] or
/// [`ColumnTypeTag::Integer`]; the remaining tags are user overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColumnTypeTag {
    /// Free text
    #[default]
    #[serde(rename = "string")]
    String,
    /// Whole numbers
    #[serde(rename = "integer")]
    Integer,
    /// Floating point numbers
    #[serde(rename = "float")]
    Float,
    /// Y/N style flags
    #[serde(rename = "boolean")]
    Boolean,
    /// Delimited list of text
    #[serde(rename = "string[]")]
    StringArray,
    /// Delimited list of whole numbers
    #[serde(rename = "integer[]")]
    IntegerArray,
    /// Delimited list of floating point numbers
    #[serde(rename = "float[]")]
    FloatArray,
    /// Delimited list of Y/N flags
    #[serde(rename = "boolean[]")]
    BooleanArray,
}

impl ColumnTypeTag {
    /// Every tag, in the order the mapping dialog lists them.
    pub const ALL: [ColumnTypeTag; 8] = [
        ColumnTypeTag::String,
        ColumnTypeTag::Integer,
        ColumnTypeTag::Float,
        ColumnTypeTag::Boolean,
        ColumnTypeTag::StringArray,
        ColumnTypeTag::IntegerArray,
        ColumnTypeTag::FloatArray,
        ColumnTypeTag::BooleanArray,
    ];

    /// Label shown in the data-type selector.
    pub fn label(self) -> &'static str {
        match self {
            ColumnTypeTag::String => "String",
            ColumnTypeTag::Integer => "Integer",
            ColumnTypeTag::Float => "Float",
            ColumnTypeTag::Boolean => "Y/N (Boolean)",
            ColumnTypeTag::StringArray => "String Array",
            ColumnTypeTag::IntegerArray => "Integer Array",
            ColumnTypeTag::FloatArray => "Float Array",
            ColumnTypeTag::BooleanArray => "Boolean Array",
        }
    }

    /// Whether cells of this type are split on a delimiter.
    pub fn is_array(self) -> bool {
        matches!(
            self,
            ColumnTypeTag::StringArray
                | ColumnTypeTag::IntegerArray
                | ColumnTypeTag::FloatArray
                | ColumnTypeTag::BooleanArray
        )
    }

    /// The scalar type of a single element; scalar tags map to themselves.
    pub fn element_type(self) -> ColumnTypeTag {
        match self {
            ColumnTypeTag::StringArray => ColumnTypeTag::String,
            ColumnTypeTag::IntegerArray => ColumnTypeTag::Integer,
            ColumnTypeTag::FloatArray => ColumnTypeTag::Float,
            ColumnTypeTag::BooleanArray => ColumnTypeTag::Boolean,
            scalar => scalar,
        }
    }
}

impl fmt::Display for ColumnTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns true when `text` is an optional `-` followed by one or more ASCII digits.
pub fn is_integer_like(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Infers the data type of the column at `column_index`.
///
/// Blank cells (missing, empty or whitespace-only) are skipped. The column is
/// `Integer` when every remaining cell is integer-like, otherwise `String`.
/// A column with no non-blank cell at all is `String`.
pub fn infer_column_type<R: AsRef<[String]>>(rows: &[R], column_index: usize) -> ColumnTypeTag {
    let mut saw_value = false;
    for row in rows {
        let Some(cell) = row.as_ref().get(column_index) else {
            continue;
        };
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !is_integer_like(trimmed) {
            return ColumnTypeTag::String;
        }
        saw_value = true;
    }
    if saw_value {
        ColumnTypeTag::Integer
    } else {
        ColumnTypeTag::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
        cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn integer_like_accepts_signed_digits_only() {
        assert!(is_integer_like("0"));
        assert!(is_integer_like("-42"));
        assert!(is_integer_like("007"));
        assert!(!is_integer_like("-"));
        assert!(!is_integer_like("+5"));
        assert!(!is_integer_like("1.5"));
        assert!(!is_integer_like("1e3"));
        assert!(!is_integer_like("--1"));
        assert!(!is_integer_like("١٢"));
    }

    #[test]
    fn all_integer_column_is_integer() {
        let data = rows(&[&["a", "1"], &["b", " -20 "], &["c", "300"]]);
        assert_eq!(infer_column_type(&data, 1), ColumnTypeTag::Integer);
    }

    #[test]
    fn single_non_integer_cell_makes_column_string() {
        let data = rows(&[&["1"], &["2"], &["3.5"], &["4"]]);
        assert_eq!(infer_column_type(&data, 0), ColumnTypeTag::String);
    }

    #[test]
    fn blank_cells_do_not_affect_verdict() {
        let data = rows(&[&["1"], &[""], &["   "], &["9"]]);
        assert_eq!(infer_column_type(&data, 0), ColumnTypeTag::Integer);
    }

    #[test]
    fn short_rows_count_as_blank() {
        let data = rows(&[&["x", "5"], &["y"], &["z", "6"]]);
        assert_eq!(infer_column_type(&data, 1), ColumnTypeTag::Integer);
    }

    #[test]
    fn column_of_only_blanks_defaults_to_string() {
        let data = rows(&[&["a", ""], &["b", "  "], &["c", "\t"]]);
        assert_eq!(infer_column_type(&data, 1), ColumnTypeTag::String);
    }

    #[test]
    fn no_rows_defaults_to_string() {
        let data: Vec<Vec<String>> = Vec::new();
        assert_eq!(infer_column_type(&data, 0), ColumnTypeTag::String);
    }

    #[test]
    fn array_tags_know_their_element_type() {
        assert!(ColumnTypeTag::FloatArray.is_array());
        assert!(!ColumnTypeTag::Float.is_array());
        assert_eq!(ColumnTypeTag::BooleanArray.element_type(), ColumnTypeTag::Boolean);
        assert_eq!(ColumnTypeTag::Integer.element_type(), ColumnTypeTag::Integer);
    }
}
