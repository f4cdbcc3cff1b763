//! Conversion of raw cell text into typed attribute values.

use super::inference::ColumnTypeTag;
use crate::constants::DEFAULT_ARRAY_DELIMITER;
use serde_json::Value;

/// Converts a cell into an attribute value of type `tag`.
///
/// Returns `None` for blank cells, which set no attribute. Scalars that fail
/// to parse as the requested type are kept as their text.
pub fn convert_cell(text: &str, tag: ColumnTypeTag, delimiter: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if tag.is_array() {
        let delimiter = if delimiter.is_empty() {
            DEFAULT_ARRAY_DELIMITER
        } else {
            delimiter
        };
        let element_type = tag.element_type();
        let items = trimmed
            .split(delimiter)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| convert_scalar(item, element_type))
            .collect();
        return Some(Value::Array(items));
    }
    Some(convert_scalar(trimmed, tag))
}

fn convert_scalar(text: &str, tag: ColumnTypeTag) -> Value {
    let parsed = match tag {
        ColumnTypeTag::Integer => text.parse::<i64>().ok().map(Value::from),
        ColumnTypeTag::Float => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        ColumnTypeTag::Boolean => parse_flag(text).map(Value::Bool),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::String(text.to_string()))
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Renders an attribute value the way the data table and filters display it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_cells_produce_no_value() {
        assert_eq!(convert_cell("", ColumnTypeTag::String, ","), None);
        assert_eq!(convert_cell("   ", ColumnTypeTag::IntegerArray, ","), None);
    }

    #[test]
    fn scalars_convert_to_their_type() {
        assert_eq!(convert_cell(" 42 ", ColumnTypeTag::Integer, ","), Some(json!(42)));
        assert_eq!(convert_cell("2.5", ColumnTypeTag::Float, ","), Some(json!(2.5)));
        assert_eq!(convert_cell("Y", ColumnTypeTag::Boolean, ","), Some(json!(true)));
        assert_eq!(convert_cell("no", ColumnTypeTag::Boolean, ","), Some(json!(false)));
        assert_eq!(convert_cell("007", ColumnTypeTag::String, ","), Some(json!("007")));
    }

    #[test]
    fn unparsable_scalars_keep_their_text() {
        assert_eq!(convert_cell("n/a", ColumnTypeTag::Integer, ","), Some(json!("n/a")));
        assert_eq!(convert_cell("maybe", ColumnTypeTag::Boolean, ","), Some(json!("maybe")));
        assert_eq!(convert_cell("NaN", ColumnTypeTag::Float, ","), Some(json!("NaN")));
    }

    #[test]
    fn arrays_split_on_delimiter_and_drop_empty_items() {
        assert_eq!(
            convert_cell("1| 2 ||3", ColumnTypeTag::IntegerArray, "|"),
            Some(json!([1, 2, 3]))
        );
        assert_eq!(
            convert_cell("a,b", ColumnTypeTag::StringArray, ""),
            Some(json!(["a", "b"]))
        );
        assert_eq!(
            convert_cell("y;n", ColumnTypeTag::BooleanArray, ";"),
            Some(json!([true, false]))
        );
    }

    #[test]
    fn display_joins_arrays_and_hides_null() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!([1, "b", true])), "1,b,true");
        assert_eq!(display_value(&json!(3.5)), "3.5");
    }
}
