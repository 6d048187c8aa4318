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

//! Expression evaluator - the inner loop of selections, joins and sums
//!
//! Evaluates a sealed [`Expr`] against one tuple and its schema mapping.
//! The evaluator is stateless across calls and never mutates the tuple.
//! Arithmetic is wrapping 64-bit; tests stay well inside `i64`.

use crate::core::{Error, Result, Schema, Tuple};

use super::expression::{ArithOp, CompareOp, Expr};

/// Intermediate result of evaluating one expression node.
///
/// Column fields that parse as integers are carried numerically; anything
/// else is carried as the raw string, which only the `=`/`<>` fallback may
/// touch.
#[derive(Debug)]
enum Field {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl Field {
    fn render(&self) -> String {
        match self {
            Field::Int(value) => value.to_string(),
            Field::Str(text) => text.clone(),
            Field::Bool(value) => value.to_string(),
        }
    }
}

/// Evaluate a predicate against a tuple.
///
/// Fails with `TypeMismatch` when the expression does not produce a
/// boolean.
pub fn eval_bool(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<bool> {
    match eval(expr, tuple, schema)? {
        Field::Bool(value) => Ok(value),
        other => Err(Error::type_mismatch(format!(
            "predicate '{}' evaluated to non-boolean '{}'",
            expr,
            other.render()
        ))),
    }
}

/// Evaluate an arithmetic expression, column reference or literal to an
/// integer.
pub fn eval_int(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<i64> {
    match eval(expr, tuple, schema)? {
        Field::Int(value) => Ok(value),
        other => Err(Error::type_mismatch(format!(
            "expression '{}' evaluated to non-integer '{}'",
            expr,
            other.render()
        ))),
    }
}

/// Evaluate an expression and render the result as a string.
///
/// Grouped aggregation uses this for group keys.
pub fn eval_string(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<String> {
    Ok(eval(expr, tuple, schema)?.render())
}

fn eval(expr: &Expr, tuple: &Tuple, schema: &Schema) -> Result<Field> {
    match expr {
        Expr::Column(name) => {
            let index = schema
                .index_of(name)
                .ok_or_else(|| Error::SchemaMiss(name.clone()))?;
            let value = tuple.get(index).ok_or_else(|| {
                Error::invariant(format!(
                    "tuple width {} does not cover index {} of column '{}'",
                    tuple.len(),
                    index,
                    name
                ))
            })?;
            Ok(match value.trim().parse::<i64>() {
                Ok(parsed) => Field::Int(parsed),
                Err(_) => Field::Str(value.to_string()),
            })
        }
        Expr::Literal(value) => Ok(Field::Int(*value)),
        Expr::RowCount(per_row) => Ok(Field::Int(*per_row)),
        Expr::Arith { op, left, right } => {
            let left = eval_int(left, tuple, schema)?;
            let right = eval_int(right, tuple, schema)?;
            Ok(Field::Int(match op {
                ArithOp::Add => left.wrapping_add(right),
                ArithOp::Mul => left.wrapping_mul(right),
            }))
        }
        Expr::Compare { op, left, right } => {
            let left = eval(left, tuple, schema)?;
            let right = eval(right, tuple, schema)?;
            eval_compare(*op, left, right)
        }
        Expr::And(left, right) => {
            let left = eval_bool(left, tuple, schema)?;
            let right = eval_bool(right, tuple, schema)?;
            Ok(Field::Bool(left && right))
        }
    }
}

fn eval_compare(op: CompareOp, left: Field, right: Field) -> Result<Field> {
    match (op, &left, &right) {
        (CompareOp::Eq, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l == r)),
        (CompareOp::Ne, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l != r)),
        // Equality falls back to string comparison for non-integer fields.
        (CompareOp::Eq, _, _) => Ok(Field::Bool(left.render() == right.render())),
        (CompareOp::Ne, _, _) => Ok(Field::Bool(left.render() != right.render())),
        (CompareOp::Lt, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l < r)),
        (CompareOp::Le, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l <= r)),
        (CompareOp::Gt, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l > r)),
        (CompareOp::Ge, Field::Int(l), Field::Int(r)) => Ok(Field::Bool(l >= r)),
        _ => Err(Error::type_mismatch(format!(
            "operands of an inequality must be integers, got '{}' and '{}'",
            left.render(),
            right.render()
        ))),
    }
}
