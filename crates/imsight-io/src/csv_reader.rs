//! Delimited text reader with type inference

use crate::reader::{DataReader, IoError, IoResult};
use crate::schema::{ColumnType, DataColumn};
use crate::table::Table;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Cell values treated as missing when no custom list is given
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null"];

/// Options controlling how delimited text is parsed
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,

    /// Whether the first record holds column names
    pub has_header: bool,

    /// Cell values (after trimming) that count as missing
    pub missing_tokens: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_header: true,
            missing_tokens: DEFAULT_MISSING_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether a header row is present
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Replace the missing-value tokens
    pub fn with_missing_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }
}

/// Delimited text file reader
pub struct CsvReader {
    path: String,
    options: CsvOptions,
    metadata: HashMap<String, String>,
}

impl CsvReader {
    /// Open a delimited file with the default `;` delimiter
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, CsvOptions::default())
    }

    /// Open a delimited file with options
    pub fn open_with_options(path: &str, options: CsvOptions) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let mut metadata = HashMap::new();
        metadata.insert("format".to_string(), "CSV".to_string());
        metadata.insert(
            "delimiter".to_string(),
            (options.delimiter as char).to_string(),
        );

        Ok(Self {
            path: path.to_string(),
            options,
            metadata,
        })
    }

    /// Parse delimited text held in memory
    pub fn parse_str(text: &str, options: &CsvOptions) -> IoResult<Table> {
        read_delimited(text.as_bytes(), options)
    }
}

impl DataReader for CsvReader {
    fn read_table(&self) -> IoResult<Table> {
        let file = File::open(&self.path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        read_delimited(BufReader::new(file), &self.options)
    }

    fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Load a delimited file into a table
pub fn load_table(path: &str, options: CsvOptions) -> IoResult<Table> {
    CsvReader::open_with_options(path, options)?.read_table()
}

fn read_delimited<R: Read>(source: R, options: &CsvOptions) -> IoResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .trim(csv::Trim::All)
        .from_reader(source);

    let header_names: Option<Vec<String>> = if options.has_header {
        let headers = reader.headers().map_err(csv_error)?;
        if headers.is_empty() {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }
        Some(headers.iter().map(|s| s.to_string()).collect())
    } else {
        None
    };

    let missing: HashSet<&str> = options.missing_tokens.iter().map(|s| s.as_str()).collect();

    let mut cells: Vec<Vec<Option<String>>> = header_names
        .as_ref()
        .map(|h| vec![Vec::new(); h.len()])
        .unwrap_or_default();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        if cells.is_empty() {
            cells = vec![Vec::new(); record.len()];
        }
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            if missing.contains(value) {
                column.push(None);
            } else {
                column.push(Some(value.to_string()));
            }
        }
    }

    let names = match header_names {
        Some(names) => dedupe_names(names),
        None => (0..cells.len()).map(|i| format!("col_{}", i)).collect(),
    };

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| {
            let dtype = infer_type(&values);
            (name, parse_column(values, dtype))
        })
        .collect();

    Table::new(columns)
}

fn csv_error(e: csv::Error) -> IoError {
    let record = e.position().map(|p| p.record()).unwrap_or(0);
    match e.kind() {
        csv::ErrorKind::Io(_) => IoError::OpenFailed(e.to_string()),
        _ => IoError::Parse {
            record,
            message: e.to_string(),
        },
    }
}

/// Disambiguate repeated header names as `name.1`, `name.2`, ...
fn dedupe_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

/// Infer column type from every present value
fn infer_type(values: &[Option<String>]) -> ColumnType {
    let present: Vec<&str> = values.iter().flatten().map(|s| s.as_str()).collect();

    // All-missing columns are read as floating point, all NaN
    if present.is_empty() {
        return ColumnType::Float64;
    }

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnType::Int64;
    }

    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    if present.iter().all(|s| parse_bool(s).is_some()) {
        return ColumnType::Bool;
    }

    ColumnType::String
}

/// Parse column values into a DataColumn
fn parse_column(values: Vec<Option<String>>, dtype: ColumnType) -> DataColumn {
    match dtype {
        ColumnType::Int64 => DataColumn::Int64(
            values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        ),
        // `inf` and `NaN` parse as floats but are stored as missing
        ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|v| {
                    v.as_deref()
                        .and_then(|s| s.parse::<f64>().ok())
                        .filter(|x| x.is_finite())
                })
                .collect(),
        ),
        ColumnType::Bool => DataColumn::Bool(
            values
                .iter()
                .map(|v| v.as_deref().and_then(parse_bool))
                .collect(),
        ),
        ColumnType::String => DataColumn::String(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_infer_type_int() {
        assert_eq!(infer_type(&strings(&["1", "2", "-3"])), ColumnType::Int64);
    }

    #[test]
    fn test_infer_type_float() {
        assert_eq!(
            infer_type(&strings(&["1.5", "2", "3.14"])),
            ColumnType::Float64
        );
    }

    #[test]
    fn test_infer_type_bool() {
        assert_eq!(
            infer_type(&strings(&["yes", "no", "True"])),
            ColumnType::Bool
        );
    }

    #[test]
    fn test_infer_type_string() {
        assert_eq!(
            infer_type(&strings(&["hello", "1", "world"])),
            ColumnType::String
        );
    }

    #[test]
    fn test_infer_type_ignores_missing() {
        let values = vec![Some("4".to_string()), None, Some("7".to_string())];
        assert_eq!(infer_type(&values), ColumnType::Int64);
        assert_eq!(infer_type(&[None, None]), ColumnType::Float64);
    }

    #[test]
    fn test_dedupe_names() {
        let names = vec!["a".into(), "b".into(), "a".into(), "a".into(), "a.1".into()];
        assert_eq!(dedupe_names(names), vec!["a", "b", "a.1", "a.2", "a.1.1"]);
    }

    #[test]
    fn test_parse_str_semicolon() {
        let text = "school;age;G3\nGP;18;6\nGP;17;NA\nMS;15;10\n";
        let table = CsvReader::parse_str(text, &CsvOptions::default()).unwrap();

        assert_eq!(table.shape(), (3, 3));
        assert_eq!(table.column("school").unwrap().dtype(), ColumnType::String);
        assert_eq!(
            table.column("G3").unwrap(),
            &DataColumn::Int64(vec![Some(6), None, Some(10)])
        );
    }

    #[test]
    fn test_parse_str_quoted_and_trimmed() {
        let text = "\"name\", value\n\"Smith, J\", 1.5\n\"Doe\",2.5\n";
        let options = CsvOptions::default().with_delimiter(b',');
        let table = CsvReader::parse_str(text, &options).unwrap();

        assert_eq!(table.column_names(), vec!["name", "value"]);
        assert_eq!(
            table.column("name").unwrap().display_cell(0).as_deref(),
            Some("Smith, J")
        );
        assert_eq!(table.column("value").unwrap().dtype(), ColumnType::Float64);
    }

    #[test]
    fn test_parse_str_without_header() {
        let options = CsvOptions::default().with_header(false);
        let table = CsvReader::parse_str("1;a\n2;b\n", &options).unwrap();
        assert_eq!(table.column_names(), vec!["col_0", "col_1"]);
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn test_non_finite_floats_are_missing() {
        let table = CsvReader::parse_str("x\n1\ninf\n3\n-Infinity\n", &CsvOptions::default()).unwrap();
        let x = table.column("x").unwrap();

        assert_eq!(x.dtype(), ColumnType::Float64);
        assert_eq!(x.missing_count(), 2);
        assert_eq!(x.present_f64().unwrap(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_parse_str_ragged_row_fails() {
        let err = CsvReader::parse_str("a;b\n1;2\n3\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Parse { .. }));
    }

    #[test]
    fn test_parse_str_empty_input_fails() {
        let err = CsvReader::parse_str("", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::InvalidFormat(_)));
    }

    #[test]
    fn test_custom_missing_tokens() {
        let options = CsvOptions::default().with_missing_tokens(["?"]);
        let table = CsvReader::parse_str("x\n1\n?\nNA\n", &options).unwrap();
        // NA is no longer missing, so the column falls back to text
        assert_eq!(table.column("x").unwrap().dtype(), ColumnType::String);
        assert_eq!(table.column("x").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = CsvReader::open("/definitely/not/here.csv").err().unwrap();
        assert!(matches!(err, IoError::FileNotFound(_)));
    }
}
