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

//! Aggregation operator - ungrouped and single-key grouped SUM
//!
//! Blocking: the entire child stream is consumed on the first pull.
//! Ungrouped aggregation emits one tuple whose fields are the accumulator
//! values; grouped aggregation emits one `(group_key, sum)` tuple per
//! distinct key, in hash order. A following sort restores determinism
//! when needed.

use rustc_hash::FxHashMap;

use crate::core::{Error, Result, Schema, Tuple};
use crate::executor::evaluator::{eval_int, eval_string};
use crate::executor::expression::Expr;
use crate::executor::operator::Operator;

/// Column name of the group key in grouped output
pub const GROUP_COLUMN: &str = "Group";

/// Column name of the sum in grouped output
pub const SUM_COLUMN: &str = "SUM";

/// Computes `SUM` aggregates over the child stream.
///
/// With an empty group-by list one accumulator per `SUM` expression is
/// kept and a single row emitted (schema `SUM_0 … SUM_{k-1}`). With a
/// group-by expression the rows are partitioned by the stringified key
/// and exactly one `SUM` expression is supported (schema `Group, SUM`).
/// Literal `SUM` arguments arrive rewritten as [`Expr::RowCount`] and
/// contribute their constant per input row.
///
/// `reset` rewinds only the emission cursor; the sums are not recomputed.
pub struct SumOperator {
    child: Box<dyn Operator>,
    group_expr: Option<Expr>,
    sum_exprs: Vec<Expr>,
    input_schema: Schema,
    output_schema: Schema,
    results: Option<Vec<Tuple>>,
    cursor: usize,
}

impl SumOperator {
    /// Create an aggregation over the child stream.
    ///
    /// `input_schema` must match the child's output layout.
    pub fn new(
        child: Box<dyn Operator>,
        group_exprs: Vec<Expr>,
        sum_exprs: Vec<Expr>,
        input_schema: Schema,
    ) -> Result<Self> {
        if sum_exprs.is_empty() {
            return Err(Error::invariant(
                "aggregation requires at least one SUM expression",
            ));
        }
        let mut group_iter = group_exprs.into_iter();
        let group_expr = group_iter.next();
        if group_iter.next().is_some() {
            return Err(Error::unsupported(
                "GROUP BY with more than one expression",
            ));
        }
        if group_expr.is_some() && sum_exprs.len() != 1 {
            return Err(Error::unsupported(
                "grouped aggregation with more than one SUM",
            ));
        }
        let output_schema = if group_expr.is_some() {
            Schema::from_columns([GROUP_COLUMN, SUM_COLUMN])?
        } else {
            Schema::from_columns((0..sum_exprs.len()).map(|i| format!("SUM_{}", i)))?
        };
        Ok(Self {
            child,
            group_expr,
            sum_exprs,
            input_schema,
            output_schema,
            results: None,
            cursor: 0,
        })
    }

    fn compute(&mut self) -> Result<Vec<Tuple>> {
        match &self.group_expr {
            None => {
                let mut sums = vec![0i64; self.sum_exprs.len()];
                while let Some(tuple) = self.child.next()? {
                    for (sum, expr) in sums.iter_mut().zip(&self.sum_exprs) {
                        *sum = sum.wrapping_add(eval_int(expr, &tuple, &self.input_schema)?);
                    }
                }
                let fields = sums.into_iter().map(|sum| sum.to_string()).collect();
                Ok(vec![Tuple::from_fields(fields)])
            }
            Some(group_expr) => {
                let sum_expr = &self.sum_exprs[0];
                let mut groups: FxHashMap<String, i64> = FxHashMap::default();
                while let Some(tuple) = self.child.next()? {
                    let key = eval_string(group_expr, &tuple, &self.input_schema)?;
                    let value = eval_int(sum_expr, &tuple, &self.input_schema)?;
                    let sum = groups.entry(key).or_insert(0);
                    *sum = sum.wrapping_add(value);
                }
                Ok(groups
                    .into_iter()
                    .map(|(key, sum)| Tuple::from_fields(vec![key, sum.to_string()]))
                    .collect())
            }
        }
    }
}

impl Operator for SumOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        if self.results.is_none() {
            let results = self.compute()?;
            self.results = Some(results);
        }
        let results = self.results.as_ref().expect("results computed above");
        if self.cursor < results.len() {
            let tuple = results[self.cursor].clone();
            self.cursor += 1;
            Ok(Some(tuple))
        } else {
            Ok(None)
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.cursor = 0;
        Ok(())
    }

    fn schema(&self) -> &Schema {
        &self.output_schema
    }

    fn name(&self) -> &str {
        "Sum"
    }
}
