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

//! Sort operator - blocking multi-key integer sort

use std::cmp::Ordering;

use crate::core::{Error, Result, Schema, Tuple};
use crate::executor::operator::Operator;

/// One ORDER BY key: a column reference and a direction
#[derive(Debug, Clone)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Buffers the entire child stream on the first pull and emits it in
/// sorted order.
///
/// Each key column is compared as a signed 64-bit integer; later keys
/// break ties and input order breaks remaining ties (stable sort). Key
/// indexes are resolved against the supplied schema at construction.
pub struct SortOperator {
    child: Box<dyn Operator>,
    resolved: Vec<(usize, bool)>,
    schema: Schema,
    buffer: Option<Vec<Tuple>>,
    cursor: usize,
}

impl SortOperator {
    pub fn new(child: Box<dyn Operator>, keys: &[SortKey], schema: Schema) -> Result<Self> {
        let resolved = keys
            .iter()
            .map(|key| {
                schema
                    .index_of(&key.column)
                    .map(|index| (index, key.descending))
                    .ok_or_else(|| {
                        Error::invariant(format!(
                            "sort key '{}' not found in schema",
                            key.column
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            child,
            resolved,
            schema,
            buffer: None,
            cursor: 0,
        })
    }

    fn fill_buffer(&mut self) -> Result<()> {
        let mut decorated: Vec<(Vec<i64>, Tuple)> = Vec::new();
        while let Some(tuple) = self.child.next()? {
            let keys = self
                .resolved
                .iter()
                .map(|(index, _)| tuple.int_at(*index))
                .collect::<Result<Vec<i64>>>()?;
            decorated.push((keys, tuple));
        }
        // Vec::sort_by is stable, so ties after all keys keep input order.
        decorated.sort_by(|a, b| {
            for (position, (_, descending)) in self.resolved.iter().enumerate() {
                let ordering = a.0[position].cmp(&b.0[position]);
                let ordering = if *descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
        self.buffer = Some(decorated.into_iter().map(|(_, tuple)| tuple).collect());
        Ok(())
    }
}

impl Operator for SortOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.buffer.is_none() {
            self.fill_buffer()?;
        }
        let buffer = self.buffer.as_ref().expect("buffer filled above");
        if self.cursor < buffer.len() {
            let tuple = buffer[self.cursor].clone();
            self.cursor += 1;
            Ok(Some(tuple))
        } else {
            Ok(None)
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.buffer = None;
        self.cursor = 0;
        self.child.reset()
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "Sort"
    }
}
