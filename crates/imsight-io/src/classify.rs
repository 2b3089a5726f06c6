//! Numeric column classification

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Ordered names of the numeric columns of a table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericColumnSet {
    names: Vec<String>,
}

impl NumericColumnSet {
    /// Classify the columns of `table`, keeping table order
    pub fn classify(table: &Table) -> Self {
        let names = table
            .iter()
            .filter(|(desc, _)| desc.dtype.is_numeric())
            .map(|(desc, _)| desc.name.clone())
            .collect();
        Self { names }
    }

    /// Column names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Project the numeric columns as f64 vectors, missing cells as NaN
    pub fn project(&self, table: &Table) -> Vec<(String, Vec<f64>)> {
        self.names
            .iter()
            .filter_map(|name| {
                let values = table.column(name)?.to_f64()?;
                Some((name.clone(), values))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataColumn;

    #[test]
    fn test_classify_keeps_table_order() {
        let table = Table::new(vec![
            ("g1".to_string(), DataColumn::Int64(vec![Some(1)])),
            ("sex".to_string(), DataColumn::String(vec![Some("F".into())])),
            ("paid".to_string(), DataColumn::Bool(vec![Some(true)])),
            ("ratio".to_string(), DataColumn::Float64(vec![None])),
        ])
        .unwrap();

        let numeric = NumericColumnSet::classify(&table);
        assert_eq!(numeric.names(), &["g1".to_string(), "ratio".to_string()]);
        assert!(numeric.contains("ratio"));
        assert!(!numeric.contains("sex"));
    }

    #[test]
    fn test_project() {
        let table = Table::new(vec![
            ("a".to_string(), DataColumn::Int64(vec![Some(2), None])),
            ("b".to_string(), DataColumn::String(vec![None, None])),
        ])
        .unwrap();

        let projected = NumericColumnSet::classify(&table).project(&table);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].0, "a");
        assert_eq!(projected[0].1[0], 2.0);
        assert!(projected[0].1[1].is_nan());
    }
}
