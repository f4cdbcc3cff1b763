//! Reading delimited text files into header + row tables.

use csv::ReaderBuilder;
use thiserror::Error;

/// Errors produced while reading a tabular file.
#[derive(Debug, Error)]
pub enum TabularError {
    /// The file has no header line.
    #[error("the file is empty")]
    Empty,

    /// The delimited text could not be parsed.
    #[error("could not parse delimited text: {0}")]
    Csv(#[from] csv::Error),
}

/// A parsed tabular file: header names plus rows of cell text.
///
/// Rows are kept as read; they may be shorter or longer than the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularFile {
    /// Column names, in file order (not required to be unique)
    pub headers: Vec<String>,
    /// Data rows, each an ordered sequence of cells
    pub rows: Vec<Vec<String>>,
    /// Name of the file the table was read from
    pub file_name: String,
}

impl TabularFile {
    /// Builds a table from already-split headers and rows.
    pub fn new(file_name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            file_name: file_name.into(),
        }
    }

    /// Parses delimited text. The delimiter is picked from the file extension
    /// (`.tsv` is tab separated) or, failing that, from the header line.
    pub fn parse(file_name: &str, bytes: &[u8]) -> Result<Self, TabularError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let delimiter = detect_delimiter(file_name, bytes);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .has_headers(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(TabularError::Empty);
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Skip blank lines
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(String::from).collect());
        }

        log::debug!(
            "Read {}: {} columns, {} rows (delimiter {:?})",
            file_name,
            headers.len(),
            rows.len(),
            delimiter as char
        );

        Ok(Self {
            headers,
            rows,
            file_name: file_name.to_string(),
        })
    }

    /// Number of columns declared by the header.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header name at `index`, or an empty string past the end.
    pub fn header(&self, index: usize) -> &str {
        self.headers.get(index).map(String::as_str).unwrap_or("")
    }
}

fn detect_delimiter(file_name: &str, bytes: &[u8]) -> u8 {
    if file_name.to_ascii_lowercase().ends_with(".tsv") {
        return b'\t';
    }
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    let count = |needle: u8| first_line.iter().filter(|b| **b == needle).count();
    let (commas, tabs, semicolons) = (count(b','), count(b'\t'), count(b';'));
    if tabs > commas && tabs >= semicolons {
        b'\t'
    } else if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_file() {
        let text = "source,target,weight\nA,B,3\nB,C,5\n";
        let file = TabularFile::parse("edges.csv", text.as_bytes()).unwrap();
        assert_eq!(file.headers, vec!["source", "target", "weight"]);
        assert_eq!(file.row_count(), 2);
        assert_eq!(file.rows[1], vec!["B", "C", "5"]);
        assert_eq!(file.file_name, "edges.csv");
    }

    #[test]
    fn detects_tab_and_semicolon_delimiters() {
        let tsv = TabularFile::parse("data.txt", b"a\tb\n1\t2\n").unwrap();
        assert_eq!(tsv.headers, vec!["a", "b"]);
        assert_eq!(tsv.rows[0], vec!["1", "2"]);

        let semi = TabularFile::parse("data.csv", b"a;b;c\n1;2;3\n").unwrap();
        assert_eq!(semi.column_count(), 3);

        let by_extension = TabularFile::parse("data.tsv", b"x,y\tz\n1,2\t3\n").unwrap();
        assert_eq!(by_extension.headers, vec!["x,y", "z"]);
    }

    #[test]
    fn skips_blank_lines_and_keeps_ragged_rows() {
        let text = "id,name,score\n1,alpha,10\n,,\n2,beta\n";
        let file = TabularFile::parse("nodes.csv", text.as_bytes()).unwrap();
        assert_eq!(file.row_count(), 2);
        assert_eq!(file.rows[1], vec!["2", "beta"]);
    }

    #[test]
    fn strips_byte_order_mark() {
        let text = "\u{feff}id,label\n1,x\n";
        let file = TabularFile::parse("nodes.csv", text.as_bytes()).unwrap();
        assert_eq!(file.header(0), "id");
        assert_eq!(file.header(7), "");
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = TabularFile::parse("empty.csv", b"").unwrap_err();
        assert!(matches!(err, TabularError::Empty));
    }
}
