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

//! Scan operator - streams tuples from a CSV-backed relation

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::core::{Error, Result, Schema, Tuple};
use crate::executor::operator::Operator;

/// Sequential scan over one table's CSV file.
///
/// Fields are split on commas with surrounding whitespace trimmed. In
/// header mode the column names come from the file's first line, qualified
/// by the table name; in headerless mode the schema is supplied by the
/// catalog and the first line is data. The scan owns exactly one file
/// handle, replaced on `reset`.
pub struct ScanOperator {
    table: String,
    path: PathBuf,
    has_header: bool,
    schema: Schema,
    reader: Reader<File>,
    record: StringRecord,
    exhausted: bool,
}

impl ScanOperator {
    /// Create a scan over a headerless CSV file with a catalog-supplied
    /// schema.
    pub fn with_schema(
        table: impl Into<String>,
        path: impl AsRef<Path>,
        schema: Schema,
    ) -> Result<Self> {
        let table = table.into();
        let path = path.as_ref().to_path_buf();
        let reader = open_reader(&path, false)?;
        debug!(table = %table, path = %path.display(), "opened scan");
        Ok(Self {
            table,
            path,
            has_header: false,
            schema,
            reader,
            record: StringRecord::new(),
            exhausted: false,
        })
    }

    /// Create a scan over a CSV file whose first line names the columns.
    ///
    /// Header names are qualified as `Table.Column`.
    pub fn with_header(table: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let table = table.into();
        let path = path.as_ref().to_path_buf();
        let mut reader = open_reader(&path, true)?;
        let headers = reader
            .headers()
            .map_err(|e| Error::io(format!("cannot read header of '{}': {}", table, e)))?;
        let schema = Schema::from_columns(
            headers
                .iter()
                .map(|column| format!("{}.{}", table, column.trim())),
        )?;
        debug!(table = %table, path = %path.display(), "opened scan with header");
        Ok(Self {
            table,
            path,
            has_header: true,
            schema,
            reader,
            record: StringRecord::new(),
            exhausted: false,
        })
    }

    /// The name of the scanned table
    pub fn table(&self) -> &str {
        &self.table
    }
}

fn open_reader(path: &Path, has_header: bool) -> Result<Reader<File>> {
    ReaderBuilder::new()
        .has_headers(has_header)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| Error::io(format!("cannot open '{}': {}", path.display(), e)))
}

impl Operator for ScanOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.exhausted {
            return Ok(None);
        }
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Ok(Some(Tuple::from_fields(
                self.record.iter().map(str::to_string).collect(),
            ))),
            Ok(false) => {
                self.exhausted = true;
                Ok(None)
            }
            Err(e) => {
                // A read failure ends the stream; the error is surfaced
                // for the current pull.
                self.exhausted = true;
                Err(Error::io(format!(
                    "error reading table '{}': {}",
                    self.table, e
                )))
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.reader = open_reader(&self.path, self.has_header)?;
        self.exhausted = false;
        Ok(())
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "Scan"
    }
}
