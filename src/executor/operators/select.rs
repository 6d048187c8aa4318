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

//! Select operator - drops tuples that fail a predicate

use tracing::warn;

use crate::core::{Result, Schema, Tuple};
use crate::executor::evaluator::eval_bool;
use crate::executor::expression::Expr;
use crate::executor::operator::Operator;

/// Filters the child's stream through a predicate expression.
///
/// Evaluation failures on a single tuple are logged and the tuple is
/// treated as non-matching, so sparse malformed data does not abort the
/// query.
pub struct SelectOperator {
    child: Box<dyn Operator>,
    predicate: Expr,
    schema: Schema,
}

impl SelectOperator {
    pub fn new(child: Box<dyn Operator>, predicate: Expr, schema: Schema) -> Self {
        Self {
            child,
            predicate,
            schema,
        }
    }
}

impl Operator for SelectOperator {
    fn next(&mut self) -> Result<Option<Tuple>> {
        while let Some(tuple) = self.child.next()? {
            match eval_bool(&self.predicate, &tuple, &self.schema) {
                Ok(true) => return Ok(Some(tuple)),
                Ok(false) => {}
                Err(e) => {
                    warn!(tuple = %tuple, error = %e, "filter evaluation failed, tuple skipped");
                }
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> Result<()> {
        self.child.reset()
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn name(&self) -> &str {
        "Select"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::expression::CompareOp;
    use crate::executor::operator::MaterializedOperator;

    fn make_source(data: Vec<Vec<&str>>, columns: &[&str]) -> (Box<dyn Operator>, Schema) {
        let schema = Schema::from_columns(columns.iter().copied()).unwrap();
        let tuples = data.into_iter().map(Tuple::from).collect();
        (
            Box::new(MaterializedOperator::new(tuples, schema.clone())),
            schema,
        )
    }

    fn greater_than(column: &str, value: i64) -> Expr {
        Expr::Compare {
            op: CompareOp::Gt,
            left: Box::new(Expr::Column(column.to_string())),
            right: Box::new(Expr::Literal(value)),
        }
    }

    fn drain(op: &mut dyn Operator) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(tuple) = op.next().unwrap() {
            lines.push(tuple.to_line());
        }
        lines
    }

    #[test]
    fn test_select_filters() {
        let (source, schema) = make_source(
            vec![vec!["1", "10"], vec!["2", "20"], vec!["3", "30"]],
            &["R.A", "R.B"],
        );
        let mut select = SelectOperator::new(source, greater_than("R.B", 15), schema);
        assert_eq!(drain(&mut select), vec!["2, 20", "3, 30"]);
    }

    #[test]
    fn test_select_preserves_child_order() {
        let (source, schema) = make_source(
            vec![vec!["3"], vec!["1"], vec!["2"]],
            &["R.A"],
        );
        let mut select = SelectOperator::new(source, greater_than("R.A", 0), schema);
        assert_eq!(drain(&mut select), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_select_skips_malformed_tuples() {
        // The second tuple's field is not an integer; the inequality fails
        // to evaluate and the tuple is silently dropped.
        let (source, schema) = make_source(
            vec![vec!["1"], vec!["oops"], vec!["3"]],
            &["R.A"],
        );
        let mut select = SelectOperator::new(source, greater_than("R.A", 0), schema);
        assert_eq!(drain(&mut select), vec!["1", "3"]);
    }

    #[test]
    fn test_select_reset_replays() {
        let (source, schema) = make_source(
            vec![vec!["1", "10"], vec!["2", "20"]],
            &["R.A", "R.B"],
        );
        let mut select = SelectOperator::new(source, greater_than("R.B", 15), schema);
        let first = drain(&mut select);
        select.reset().unwrap();
        let second = drain(&mut select);
        assert_eq!(first, second);
        assert_eq!(first, vec!["2, 20"]);
    }

    #[test]
    fn test_stacked_selects_equal_conjunction() {
        let data = vec![vec!["1", "10"], vec!["2", "20"], vec!["3", "30"]];
        let columns = ["R.A", "R.B"];

        let (source, schema) = make_source(data.clone(), &columns);
        let inner = SelectOperator::new(source, greater_than("R.B", 15), schema.clone());
        let mut stacked =
            SelectOperator::new(Box::new(inner), greater_than("R.A", 2), schema.clone());

        let (source, schema2) = make_source(data, &columns);
        let combined = Expr::And(
            Box::new(greater_than("R.B", 15)),
            Box::new(greater_than("R.A", 2)),
        );
        let mut fused = SelectOperator::new(source, combined, schema2);

        assert_eq!(drain(&mut stacked), drain(&mut fused));
    }
}
