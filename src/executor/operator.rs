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

//! Pull-based operator interface for streaming query execution.
//!
//! Operators form a tree in which each parent exclusively owns its
//! children and pulls tuples on demand:
//!
//! ```text
//! ┌──────────────┐
//! │ Driver       │ ← pulls tuples via next()
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ Join Op      │ ← resets and rescans the inner side per outer tuple
//! └──────┬───────┘
//!        │
//! ┌──────┴──────┐
//! │             │
//! ▼             ▼
//! ┌─────┐   ┌─────┐
//! │Scan │   │Scan │ ← stream rows from CSV files
//! └─────┘   └─────┘
//! ```
//!
//! Streaming operators hold O(1) state; the sort and aggregation
//! operators are blocking and buffer their whole input on the first pull.

use crate::core::{Result, Schema, Tuple};

/// Pull-protocol interface implemented by every relational operator.
///
/// A child is reset only by its parent; the root is driven by the query
/// driver. After `next` returns `Ok(None)` it keeps returning `Ok(None)`
/// until `reset` is called.
pub trait Operator {
    /// Produce the next tuple, or `Ok(None)` when the stream is exhausted.
    ///
    /// Errors abort the query.
    fn next(&mut self) -> Result<Option<Tuple>>;

    /// Restart the stream from the beginning.
    ///
    /// Subsequent `next` calls must replay the entire tuple sequence.
    fn reset(&mut self) -> Result<()>;

    /// The schema describing this operator's output layout.
    ///
    /// Every emitted tuple has exactly `schema().len()` fields.
    fn schema(&self) -> &Schema;

    /// A descriptive name for logs
    fn name(&self) -> &str;
}

/// An operator that yields tuples from a pre-materialized vector.
///
/// Used as the adapter for already-computed inputs and as the source
/// operator in unit tests.
pub struct MaterializedOperator {
    tuples: Vec<Tuple>,
    schema: Schema,
    cursor: usize,
}

impl MaterializedOperator {
    pub fn new(tuples: Vec<Tuple>, schema: Schema) -> Self {
        Self {
            tuples,
            schema,
            cursor: 0,
        }
    }
}

impl Operator for MaterializedOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.cursor >= self.tuples.len() {
            return Ok(None);
        }
        let tuple = self.tuples[self.cursor].clone();
        self.cursor += 1;
        Ok(Some(tuple))
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "Materialized"
    }
}
