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

//! Table catalog - resolves table names to CSV files and schemas
//!
//! The catalog is an explicit value threaded through the planner rather
//! than process-global state. It is loaded once per database directory
//! from `schema.txt`, which lists one table per line as
//! `TableName col1 col2 ... colN` (whitespace-separated). Data files live
//! at `<database_dir>/data/<TableName>.csv` without header rows.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{Error, Result, Schema};

/// Name of the schema description file inside a database directory
const SCHEMA_FILE: &str = "schema.txt";

/// Subdirectory holding the table CSV files
const DATA_DIR: &str = "data";

/// Central registry for table metadata.
///
/// Maps table names to their CSV file paths and to fully qualified
/// schemas (`Table.Column`) derived from the schema file.
#[derive(Debug, Clone)]
pub struct Catalog {
    data_dir: PathBuf,
    tables: FxHashMap<String, Vec<String>>,
}

impl Catalog {
    /// Load the catalog for a database directory.
    ///
    /// Reads `<database_dir>/schema.txt`; blank lines are skipped and a
    /// line without column names is an invariant violation.
    pub fn open(database_dir: impl AsRef<Path>) -> Result<Self> {
        let database_dir = database_dir.as_ref();
        let schema_path = database_dir.join(SCHEMA_FILE);
        let contents = fs::read_to_string(&schema_path).map_err(|e| {
            Error::io(format!(
                "cannot read schema file {}: {}",
                schema_path.display(),
                e
            ))
        })?;

        let mut tables = FxHashMap::default();
        for line in contents.lines() {
            let mut parts = line.split_whitespace();
            let Some(table) = parts.next() else {
                continue;
            };
            let columns: Vec<String> = parts.map(str::to_string).collect();
            if columns.is_empty() {
                return Err(Error::invariant(format!(
                    "table '{}' has no columns in {}",
                    table, SCHEMA_FILE
                )));
            }
            debug!(table, columns = columns.len(), "registered table");
            tables.insert(table.to_string(), columns);
        }

        Ok(Self {
            data_dir: database_dir.join(DATA_DIR),
            tables,
        })
    }

    /// Resolve the CSV file path for a table.
    ///
    /// The path is `<database_dir>/data/<table>.csv`; a missing file is
    /// reported as `TableNotFound`.
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        if table.is_empty() {
            return Err(Error::invariant("table name must not be empty"));
        }
        let path = self.data_dir.join(format!("{}.csv", table));
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::TableNotFound(table.to_string()))
        }
    }

    /// Build the fully qualified schema for a table from the schema file.
    pub fn schema(&self, table: &str) -> Result<Schema> {
        let columns = self
            .tables
            .get(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;
        Schema::from_columns(columns.iter().map(|c| format!("{}.{}", table, c)))
    }

    /// Check whether a table declares the given bare column name
    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.tables
            .get(table)
            .is_some_and(|columns| columns.iter().any(|c| c == column))
    }

    /// The names of all registered tables
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
