//! In-memory table
//!
//! A `Table` is an ordered set of named, typed columns that all share the
//! same row count. It is built once by a reader and only read afterwards.

use crate::reader::{IoError, IoResult};
use crate::schema::{ColumnDescriptor, DataColumn, DataSchema};

/// Immutable column-major table
#[derive(Debug, Clone)]
pub struct Table {
    schema: DataSchema,
    columns: Vec<DataColumn>,
}

impl Table {
    /// Build a table from named columns.
    ///
    /// Fails if any column's length differs from the first one, or if a
    /// name appears twice.
    pub fn new(columns: Vec<(String, DataColumn)>) -> IoResult<Self> {
        let num_records = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

        let mut descriptors = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());

        for (name, column) in columns {
            if column.len() != num_records {
                return Err(IoError::ShapeMismatch {
                    column: name,
                    expected: num_records,
                    actual: column.len(),
                });
            }
            if descriptors.iter().any(|d: &ColumnDescriptor| d.name == name) {
                return Err(IoError::DuplicateColumn(name));
            }
            descriptors.push(
                ColumnDescriptor::new(name, column.dtype()).with_non_null(column.non_null_count()),
            );
            data.push(column);
        }

        Ok(Self {
            schema: DataSchema::new(descriptors, num_records),
            columns: data,
        })
    }

    /// Schema of the table
    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows(), self.num_columns())
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.schema.num_records
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.schema.column_names()
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.schema
            .column_index(name)
            .and_then(|i| self.columns.get(i))
    }

    /// Iterate over (descriptor, column) pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&ColumnDescriptor, &DataColumn)> {
        self.schema.columns.iter().zip(self.columns.iter())
    }

    /// Missing-value count per column, in table order
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.iter()
            .map(|(desc, col)| (desc.name.clone(), col.missing_count()))
            .collect()
    }

    /// First `n` rows rendered as display strings
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..n.min(self.num_rows()))
            .map(|row| {
                self.columns
                    .iter()
                    .map(|col| col.display_cell(row).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}
