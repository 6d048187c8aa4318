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

//! Sealed expression tree for predicate and arithmetic evaluation
//!
//! The SQL parser hands the planner a `sqlparser::ast::Expr`, most of
//! whose node kinds the engine does not implement. Lowering converts the
//! supported shapes into [`Expr`] and rejects everything else at the
//! planner boundary, so the evaluator stays total over its domain.

use std::fmt;

use rustc_hash::FxHashSet;
use sqlparser::ast as sql;

use crate::catalog::Catalog;
use crate::core::{Error, Result};

/// Supported arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Mul,
}

/// Supported comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A parsed predicate or arithmetic expression over one tuple.
///
/// Column references are always fully qualified (`Table.Column`) after
/// lowering. `RowCount` is a synthetic leaf produced by the planner's
/// literal-`SUM` rewrite; it contributes its constant once per input row
/// and never appears in user predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Column(String),
    Literal(i64),
    RowCount(i64),
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    And(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Split a predicate into its top-level conjuncts.
    ///
    /// Recurses through `AND` nodes only; any other node is a single
    /// conjunct.
    pub fn into_conjuncts(self) -> Vec<Expr> {
        match self {
            Expr::And(left, right) => {
                let mut conjuncts = left.into_conjuncts();
                conjuncts.extend(right.into_conjuncts());
                conjuncts
            }
            other => vec![other],
        }
    }

    /// Combine conjuncts back into a single `AND` chain.
    ///
    /// Returns `None` for an empty list.
    pub fn combine(conjuncts: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        conjuncts
            .into_iter()
            .reduce(|acc, next| Expr::And(Box::new(acc), Box::new(next)))
    }

    /// Collect every qualified column name referenced by this expression
    pub fn referenced_columns(&self, into: &mut FxHashSet<String>) {
        match self {
            Expr::Column(name) => {
                into.insert(name.clone());
            }
            Expr::Literal(_) | Expr::RowCount(_) => {}
            Expr::Arith { left, right, .. } | Expr::Compare { left, right, .. } => {
                left.referenced_columns(into);
                right.referenced_columns(into);
            }
            Expr::And(left, right) => {
                left.referenced_columns(into);
                right.referenced_columns(into);
            }
        }
    }

    /// The distinct table names referenced by this expression
    pub fn referenced_tables(&self) -> FxHashSet<String> {
        let mut columns = FxHashSet::default();
        self.referenced_columns(&mut columns);
        columns
            .into_iter()
            .filter_map(|c| c.split_once('.').map(|(table, _)| table.to_string()))
            .collect()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(name) => f.write_str(name),
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::RowCount(value) => write!(f, "{}", value),
            Expr::Arith { op, left, right } => {
                let symbol = match op {
                    ArithOp::Add => "+",
                    ArithOp::Mul => "*",
                };
                write!(f, "{} {} {}", left, symbol, right)
            }
            Expr::Compare { op, left, right } => {
                let symbol = match op {
                    CompareOp::Eq => "=",
                    CompareOp::Ne => "<>",
                    CompareOp::Lt => "<",
                    CompareOp::Le => "<=",
                    CompareOp::Gt => ">",
                    CompareOp::Ge => ">=",
                };
                write!(f, "{} {} {}", left, symbol, right)
            }
            Expr::And(left, right) => write!(f, "{} AND {}", left, right),
        }
    }
}

/// Resolves bare column names against the tables of one query.
///
/// A bare name is qualified with the single table that declares it;
/// a name no table declares is a schema miss, and one that several
/// tables declare is ambiguous.
pub struct ColumnResolver<'a> {
    catalog: &'a Catalog,
    tables: &'a [String],
}

impl<'a> ColumnResolver<'a> {
    pub fn new(catalog: &'a Catalog, tables: &'a [String]) -> Self {
        Self { catalog, tables }
    }

    /// Qualify a bare column name as `Table.Column`
    pub fn resolve(&self, column: &str) -> Result<String> {
        let mut owners = self
            .tables
            .iter()
            .filter(|table| self.catalog.has_column(table, column));
        match (owners.next(), owners.next()) {
            (Some(table), None) => Ok(format!("{}.{}", table, column)),
            (Some(_), Some(_)) => Err(Error::unsupported(format!(
                "ambiguous column '{}' (qualify it with a table name)",
                column
            ))),
            (None, _) => Err(Error::SchemaMiss(column.to_string())),
        }
    }
}

/// Lower a parsed SQL expression into the sealed [`Expr`] type.
///
/// Supported shapes: bare and qualified column references, integer
/// literals, `+`, `*`, the six comparisons, `AND`, and parenthesization.
/// Every other node kind fails with `Unsupported`.
pub fn lower_expr(expr: &sql::Expr, resolver: &ColumnResolver<'_>) -> Result<Expr> {
    match expr {
        sql::Expr::Identifier(ident) => Ok(Expr::Column(resolver.resolve(&ident.value)?)),
        sql::Expr::CompoundIdentifier(idents) => {
            if idents.len() == 2 {
                Ok(Expr::Column(format!(
                    "{}.{}",
                    idents[0].value, idents[1].value
                )))
            } else {
                Err(Error::unsupported(format!(
                    "column reference '{}'",
                    expr
                )))
            }
        }
        sql::Expr::Value(sql::Value::Number(text, _)) => text
            .parse::<i64>()
            .map(Expr::Literal)
            .map_err(|_| Error::unsupported(format!("non-integer literal '{}'", text))),
        sql::Expr::Value(value) => Err(Error::unsupported(format!("literal '{}'", value))),
        sql::Expr::Nested(inner) => lower_expr(inner, resolver),
        sql::Expr::BinaryOp { left, op, right } => {
            let left = Box::new(lower_expr(left, resolver)?);
            let right = Box::new(lower_expr(right, resolver)?);
            match op {
                sql::BinaryOperator::Plus => Ok(Expr::Arith {
                    op: ArithOp::Add,
                    left,
                    right,
                }),
                sql::BinaryOperator::Multiply => Ok(Expr::Arith {
                    op: ArithOp::Mul,
                    left,
                    right,
                }),
                sql::BinaryOperator::Eq => Ok(compare(CompareOp::Eq, left, right)),
                sql::BinaryOperator::NotEq => Ok(compare(CompareOp::Ne, left, right)),
                sql::BinaryOperator::Lt => Ok(compare(CompareOp::Lt, left, right)),
                sql::BinaryOperator::LtEq => Ok(compare(CompareOp::Le, left, right)),
                sql::BinaryOperator::Gt => Ok(compare(CompareOp::Gt, left, right)),
                sql::BinaryOperator::GtEq => Ok(compare(CompareOp::Ge, left, right)),
                sql::BinaryOperator::And => Ok(Expr::And(left, right)),
                other => Err(Error::unsupported(format!("operator '{}'", other))),
            }
        }
        other => Err(Error::unsupported(format!("expression '{}'", other))),
    }
}

fn compare(op: CompareOp, left: Box<Expr>, right: Box<Expr>) -> Expr {
    Expr::Compare { op, left, right }
}
