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

//! Nested-loop join operator
//!
//! The classic tuple-nested-loop inner join: for each tuple from the
//! outer (left) child the inner (right) child is reset and scanned fully,
//! and each merged pair that satisfies the join predicate is emitted.
//! Without a predicate every pair is emitted (cross product). Emission
//! order is outer-major, inner-minor.

use std::collections::VecDeque;

use tracing::warn;

use crate::core::{Error, Result, Schema, Tuple};
use crate::executor::evaluator::eval_bool;
use crate::executor::expression::Expr;
use crate::executor::operator::Operator;

/// Tuple-nested-loop inner join.
///
/// Matches for the current outer tuple are buffered so that consecutive
/// `next` calls drain them before the next outer tuple is pulled. The
/// combined schema lays out the outer columns first, then the inner
/// columns with shifted indices.
pub struct NestedLoopJoinOperator {
    outer: Box<dyn Operator>,
    inner: Box<dyn Operator>,
    predicate: Option<Expr>,
    schema: Schema,
    buffer: VecDeque<Tuple>,
}

impl NestedLoopJoinOperator {
    /// Create a join over the two children.
    ///
    /// `schema` must be the concatenation of the children's schemas;
    /// a width disagreement is an invariant violation.
    pub fn new(
        outer: Box<dyn Operator>,
        inner: Box<dyn Operator>,
        predicate: Option<Expr>,
        schema: Schema,
    ) -> Result<Self> {
        let expected = outer.schema().len() + inner.schema().len();
        if schema.len() != expected {
            return Err(Error::invariant(format!(
                "join schema width {} does not match combined child width {}",
                schema.len(),
                expected
            )));
        }
        Ok(Self {
            outer,
            inner,
            predicate,
            schema,
            buffer: VecDeque::new(),
        })
    }

    fn fill_buffer_for(&mut self, outer_tuple: &Tuple) -> Result<()> {
        self.inner.reset()?;
        while let Some(inner_tuple) = self.inner.next()? {
            let merged = Tuple::from_combined(outer_tuple, &inner_tuple);
            match &self.predicate {
                None => self.buffer.push_back(merged),
                Some(predicate) => match eval_bool(predicate, &merged, &self.schema) {
                    Ok(true) => self.buffer.push_back(merged),
                    Ok(false) => {}
                    Err(e) => {
                        warn!(tuple = %merged, error = %e, "join evaluation failed, pair skipped");
                    }
                },
            }
        }
        Ok(())
    }
}

impl Operator for NestedLoopJoinOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        if let Some(tuple) = self.buffer.pop_front() {
            return Ok(Some(tuple));
        }
        while let Some(outer_tuple) = self.outer.next()? {
            self.fill_buffer_for(&outer_tuple)?;
            if let Some(tuple) = self.buffer.pop_front() {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<()> {
        self.outer.reset()?;
        self.inner.reset()?;
        self.buffer.clear();
        Ok(())
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "NestedLoopJoin"
    }
}
