// Copyright 2025 BlazeDB Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Schema mapping - the name-to-index layout of one operator's output

use rustc_hash::{FxHashMap, FxHashSet};

use super::error::{Error, Result};

/// An insertion-ordered mapping from fully qualified column name
/// (`Table.Column`) to zero-based field index.
///
/// Insertion order is significant: it defines the serialization order of
/// the tuples the owning operator emits. Invariants: names are unique and
/// the indexes are exactly `[0, len)`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from an ordered list of column names.
    ///
    /// Fails with `InvariantViolation` on a duplicate name.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Schema::new();
        for column in columns {
            schema.push(column.into())?;
        }
        Ok(schema)
    }

    /// Append a column at the next index
    pub fn push(&mut self, column: String) -> Result<()> {
        if self.index.contains_key(&column) {
            return Err(Error::invariant(format!(
                "duplicate column '{}' in schema",
                column
            )));
        }
        self.index.insert(column.clone(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    /// Get the number of columns
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no columns
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up the field index of a column name
    #[inline]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Check whether the schema contains a column
    #[inline]
    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// The column names in serialization order
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Merge this schema with the schema of a join's right side.
    ///
    /// Left indexes are kept; right indexes are shifted by the left width,
    /// matching the field layout of a merged join tuple.
    pub fn concat(&self, right: &Schema) -> Result<Schema> {
        let mut merged = self.clone();
        for column in &right.columns {
            merged.push(column.clone())?;
        }
        Ok(merged)
    }

    /// The distinct table names appearing as `Table.` prefixes
    pub fn tables(&self) -> FxHashSet<String> {
        self.columns
            .iter()
            .filter_map(|c| c.split_once('.').map(|(table, _)| table.to_string()))
            .collect()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_ordering() {
        let schema = Schema::from_columns(["R.A", "R.B", "S.C"]).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.index_of("R.A"), Some(0));
        assert_eq!(schema.index_of("R.B"), Some(1));
        assert_eq!(schema.index_of("S.C"), Some(2));
        assert_eq!(schema.index_of("S.D"), None);
        assert_eq!(schema.columns(), &["R.A", "R.B", "S.C"]);
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        assert!(Schema::from_columns(["R.A", "R.A"]).is_err());
    }

    #[test]
    fn test_schema_concat_offsets_right() {
        let left = Schema::from_columns(["R.A", "R.B"]).unwrap();
        let right = Schema::from_columns(["S.C", "S.D"]).unwrap();
        let merged = left.concat(&right).unwrap();
        assert_eq!(merged.index_of("R.A"), Some(0));
        assert_eq!(merged.index_of("S.C"), Some(2));
        assert_eq!(merged.index_of("S.D"), Some(3));
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_schema_tables() {
        let schema = Schema::from_columns(["R.A", "R.B", "S.C"]).unwrap();
        let tables = schema.tables();
        assert_eq!(tables.len(), 2);
        assert!(tables.contains("R"));
        assert!(tables.contains("S"));
    }

    #[test]
    fn test_schema_index_contiguity() {
        let schema = Schema::from_columns(["T.K", "T.N", "T.V"]).unwrap();
        let mut indexes: Vec<usize> = schema
            .columns()
            .iter()
            .map(|c| schema.index_of(c).unwrap())
            .collect();
        indexes.sort_unstable();
        assert_eq!(indexes, vec![0, 1, 2]);
    }
}
