use super::FieldValue;
use crate::error::{ProcessingError, Result};
use std::collections::HashSet;

/// One catalog row; values are aligned with the owning table's columns
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    values: Vec<FieldValue>,
}

impl CatalogRow {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub(crate) fn set(&mut self, index: usize, value: FieldValue) {
        self.values[index] = value;
    }

    pub(crate) fn push(&mut self, value: FieldValue) {
        self.values.push(value);
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(FieldValue::is_missing)
    }
}

/// A named table of catalog rows sharing a fixed schema.
///
/// Tables handed out by the normalizer are immutable; the mutating
/// operations are only reachable while a table is being built.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<CatalogRow>,
}

impl CatalogTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<CatalogRow>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Index of a column the caller cannot proceed without
    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| ProcessingError::MissingColumn {
                source_name: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Field lookup by row position and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// All values of one column, in row order
    pub fn column_values<'a>(
        &'a self,
        column: &str,
    ) -> Option<impl Iterator<Item = &'a FieldValue>> {
        let index = self.column_index(column)?;
        Some(self.rows.iter().filter_map(move |row| row.get(index)))
    }

    /// Column names this table has in common with `other`, in this table's order
    pub fn shared_columns(&self, other: &CatalogTable) -> Vec<String> {
        let theirs: HashSet<&str> = other.columns.iter().map(String::as_str).collect();
        self.columns
            .iter()
            .filter(|c| theirs.contains(c.as_str()))
            .cloned()
            .collect()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [CatalogRow] {
        &mut self.rows
    }

    /// Rename columns; every source name must exist
    pub(crate) fn rename_columns(&mut self, renames: &[(&str, &str)]) -> Result<()> {
        for (from, to) in renames {
            let index = self.require_column(from)?;
            self.columns[index] = to.to_string();
        }
        Ok(())
    }

    /// Append a column computed from each row
    pub(crate) fn add_column<F>(&mut self, column: &str, mut compute: F)
    where
        F: FnMut(&CatalogRow) -> FieldValue,
    {
        for row in self.rows.iter_mut() {
            let value = compute(row);
            row.push(value);
        }
        self.columns.push(column.to_string());
    }

    /// Drop rows with a missing value in any of `subset` (all columns when `None`).
    /// Returns the original position of each dropped row and its first missing column.
    pub(crate) fn drop_missing(&mut self, subset: Option<&[&str]>) -> Result<Vec<(usize, String)>> {
        let indices: Vec<usize> = match subset {
            Some(columns) => columns
                .iter()
                .map(|c| self.require_column(c))
                .collect::<Result<_>>()?,
            None => (0..self.columns.len()).collect(),
        };

        let columns = &self.columns;
        let mut dropped = Vec::new();
        let mut position = 0;
        self.rows.retain(|row| {
            let missing = indices
                .iter()
                .copied()
                .find(|&i| row.get(i).map_or(true, FieldValue::is_missing));
            if let Some(index) = missing {
                dropped.push((position, columns[index].clone()));
            }
            position += 1;
            missing.is_none()
        });

        Ok(dropped)
    }

    /// Keep only `columns`, in the given order
    pub(crate) fn select(self, columns: &[&str]) -> Result<CatalogTable> {
        let indices = columns
            .iter()
            .map(|c| self.require_column(c))
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                let mut values = row.values;
                CatalogRow::new(
                    indices
                        .iter()
                        .map(|&i| std::mem::replace(&mut values[i], FieldValue::Missing))
                        .collect(),
                )
            })
            .collect();

        Ok(CatalogTable {
            name: self.name,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }
}
