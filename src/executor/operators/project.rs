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

//! Project operator - narrows tuples to a requested column list

use crate::core::{Result, Schema, Tuple};
use crate::executor::operator::Operator;

/// Copies the requested columns out of each child tuple.
///
/// Duplicate requested columns are removed while preserving order. When
/// the requested list is exactly the child's layout the child tuple is
/// forwarded unmodified. A requested column missing from the child schema
/// yields an empty field rather than failing mid-stream (tolerant
/// projection contract). The output schema re-numbers the kept columns
/// from 0 in the requested order.
pub struct ProjectOperator {
    child: Box<dyn Operator>,
    indexes: Vec<Option<usize>>,
    schema: Schema,
    identity: bool,
}

impl ProjectOperator {
    /// Create a projection of `requested` columns over the child's
    /// `input_schema`.
    pub fn new(
        child: Box<dyn Operator>,
        requested: &[String],
        input_schema: &Schema,
    ) -> Result<Self> {
        let mut columns: Vec<String> = Vec::with_capacity(requested.len());
        for column in requested {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
        let indexes: Vec<Option<usize>> =
            columns.iter().map(|c| input_schema.index_of(c)).collect();
        let identity = columns.as_slice() == input_schema.columns();
        let schema = Schema::from_columns(columns)?;
        Ok(Self {
            child,
            indexes,
            schema,
            identity,
        })
    }
}

impl Operator for ProjectOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        let Some(tuple) = self.child.next()? else {
            return Ok(None);
        };
        if self.identity {
            return Ok(Some(tuple));
        }
        let fields = self
            .indexes
            .iter()
            .map(|index| {
                index
                    .and_then(|i| tuple.get(i))
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        Ok(Some(Tuple::from_fields(fields)))
    }

    fn reset(&mut self) -> Result<()> {
        self.child.reset()
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "Project"
    }
}
