//! Column types, typed column storage and the table schema
//!
//! A loaded column is one of four storage types. Cells are `Option`s so
//! missing values survive type inference; only `Int64` and `Float64`
//! columns take part in the statistics. A non-finite float is missing
//! everywhere it is counted.

use serde::{Deserialize, Serialize};

/// Names, types and non-null counts of a table's columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors, in file order
    pub columns: Vec<ColumnDescriptor>,

    /// Row count shared by every column
    pub num_records: usize,
}

impl DataSchema {
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Descriptor of the column called `name`
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// One column as seen by the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,

    /// Number of non-missing cells
    pub non_null: usize,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            non_null: 0,
        }
    }

    /// Set the non-null count
    pub fn with_non_null(mut self, non_null: usize) -> Self {
        self.non_null = non_null;
        self
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    String,
}

impl ColumnType {
    /// `Int64` and `Float64` count as numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }

    /// Short lowercase name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A column of data. `None` cells are missing values.
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    String(Vec<Option<String>>),
}

impl DataColumn {
    /// Storage type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::String(_) => ColumnType::String,
        }
    }

    /// Number of cells, missing included
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Int64(v) => v.len(),
            DataColumn::Float64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count present cells; non-finite floats count as missing
    pub fn non_null_count(&self) -> usize {
        match self {
            DataColumn::Int64(v) => v.iter().flatten().count(),
            DataColumn::Float64(v) => v.iter().flatten().filter(|x| x.is_finite()).count(),
            DataColumn::Bool(v) => v.iter().flatten().count(),
            DataColumn::String(v) => v.iter().flatten().count(),
        }
    }

    /// Count missing cells
    pub fn missing_count(&self) -> usize {
        self.len() - self.non_null_count()
    }

    /// Convert to f64 (for numeric types), missing cells become NaN
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Int64(v) => Some(
                v.iter()
                    .map(|x| x.map_or(f64::NAN, |x| x as f64))
                    .collect(),
            ),
            DataColumn::Float64(v) => Some(v.iter().map(|x| x.unwrap_or(f64::NAN)).collect()),
            _ => None,
        }
    }

    /// Present numeric values only, in row order
    pub fn present_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Int64(v) => Some(v.iter().flatten().map(|&x| x as f64).collect()),
            DataColumn::Float64(v) => Some(
                v.iter()
                    .flatten()
                    .copied()
                    .filter(|x| x.is_finite())
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Render one cell for display; missing cells render as `NaN`
    pub fn display_cell(&self, row: usize) -> Option<String> {
        let cell = match self {
            DataColumn::Int64(v) => v.get(row)?.map(|x| x.to_string()),
            DataColumn::Float64(v) => v.get(row)?.map(|x| x.to_string()),
            DataColumn::Bool(v) => v.get(row)?.map(|x| x.to_string()),
            DataColumn::String(v) => v.get(row)?.clone(),
        };
        Some(cell.unwrap_or_else(|| "NaN".to_string()))
    }
}
