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

//! Duplicate-elimination operator - hash-based DISTINCT

use rustc_hash::FxHashSet;

use crate::core::{Result, Schema, Tuple};
use crate::executor::operator::Operator;

/// Emits only the first occurrence of each distinct tuple, in child order.
///
/// Tuple identity is the serialized line (fields joined by `", "`).
pub struct DuplicateEliminationOperator {
    child: Box<dyn Operator>,
    seen: FxHashSet<String>,
}

impl DuplicateEliminationOperator {
    pub fn new(child: Box<dyn Operator>) -> Self {
        Self {
            child,
            seen: FxHashSet::default(),
        }
    }
}

impl Operator for DuplicateEliminationOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        while let Some(tuple) = self.child.next()? {
            if self.seen.insert(tuple.to_line()) {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<()> {
        self.child.reset()?;
        self.seen.clear();
        Ok(())
    }

    fn schema(&self) -> &Schema {
        self.child.schema()
    }

    fn name(&self) -> &str {
        "DuplicateElimination"
    }
}
