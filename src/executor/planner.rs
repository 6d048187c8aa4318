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

//! Query planner - translates a parsed SELECT into an operator tree
//!
//! The planner assembles the physical pipeline bottom-up:
//!
//! 1. Enumerate the tables of the FROM clause; this syntactic order is
//!    the join order (no cost model).
//! 2. Split the WHERE clause into conjuncts and classify each one as
//!    constant, local to one table, or a binary join predicate. A
//!    conjunct spanning three or more tables is rejected outright.
//! 3. Build a scan (plus local filter) per table and fold them into a
//!    left-deep tree of nested-loop joins, attaching each join predicate
//!    at the first step where both of its tables are available.
//! 4. Project, aggregate, deduplicate, sort and finally project onto the
//!    SELECT list, tracking the schema through every stage.
//!
//! The sort runs before the final projection so that ORDER BY may
//! reference columns outside the SELECT list.

use rustc_hash::{FxHashMap, FxHashSet};
use sqlparser::ast as sql;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;
use tracing::debug;

use crate::catalog::Catalog;
use crate::core::{Error, Result, Schema};
use crate::executor::expression::{lower_expr, ColumnResolver, Expr};
use crate::executor::operator::Operator;
use crate::executor::operators::{
    DuplicateEliminationOperator, NestedLoopJoinOperator, ProjectOperator, ScanOperator,
    SelectOperator, SortKey, SortOperator, SumOperator, GROUP_COLUMN, SUM_COLUMN,
};

/// The operator-tree root of a planned query together with its final
/// output schema. The schema lets a driver serialize a header if desired.
pub struct PhysicalPlan {
    pub root: Box<dyn Operator>,
    pub schema: Schema,
}

/// One item of the SELECT list after lowering
enum SelectEntry {
    /// A fully qualified column reference
    Column { name: String },
    /// A `SUM` aggregate; literal arguments are already rewritten to
    /// [`Expr::RowCount`]
    Sum { argument: Expr, display: String },
}

impl SelectEntry {
    fn display(&self) -> &str {
        match self {
            SelectEntry::Column { name } => name,
            SelectEntry::Sum { display, .. } => display,
        }
    }
}

/// One ORDER BY element after lowering
struct OrderKey {
    text: String,
    descending: bool,
    is_sum: bool,
}

/// WHERE conjuncts bucketed by the tables they reference
#[derive(Default)]
struct ConjunctBuckets {
    constant: Vec<Expr>,
    local: FxHashMap<String, Vec<Expr>>,
    joins: Vec<(Expr, FxHashSet<String>)>,
}

/// Builds physical operator trees for parsed SELECT statements.
pub struct QueryPlanner<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryPlanner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Parse a SQL string and plan the single statement it contains.
    pub fn plan_sql(&self, sql_text: &str) -> Result<PhysicalPlan> {
        let statements = Parser::parse_sql(&GenericDialect {}, sql_text)
            .map_err(|e| Error::parse(e.to_string()))?;
        match statements.as_slice() {
            [statement] => self.plan(statement),
            [] => Err(Error::parse("no statement found")),
            _ => Err(Error::unsupported("multiple statements")),
        }
    }

    /// Plan a parsed statement into an operator tree.
    pub fn plan(&self, statement: &sql::Statement) -> Result<PhysicalPlan> {
        let query = match statement {
            sql::Statement::Query(query) => query,
            other => {
                return Err(Error::unsupported(format!("statement '{}'", other)));
            }
        };
        if query.with.is_some() {
            return Err(Error::unsupported("WITH clauses"));
        }
        if query.limit.is_some() || query.offset.is_some() || query.fetch.is_some() {
            return Err(Error::unsupported("LIMIT, OFFSET and FETCH"));
        }
        let select = match query.body.as_ref() {
            sql::SetExpr::Select(select) => select,
            other => return Err(Error::unsupported(format!("query body '{}'", other))),
        };
        if select.having.is_some() {
            return Err(Error::unsupported("HAVING"));
        }
        if select.top.is_some() {
            return Err(Error::unsupported("TOP"));
        }

        let (tables, on_constraints) = enumerate_tables(select)?;
        debug!(?tables, "planning query");
        let resolver = ColumnResolver::new(self.catalog, &tables);

        // WHERE decomposition: explicit ON constraints join the same
        // conjunct pool as the WHERE clause.
        let mut conjuncts = Vec::new();
        if let Some(where_clause) = &select.selection {
            conjuncts.extend(lower_expr(where_clause, &resolver)?.into_conjuncts());
        }
        for constraint in &on_constraints {
            conjuncts.extend(lower_expr(constraint, &resolver)?.into_conjuncts());
        }
        let mut where_columns = FxHashSet::default();
        for conjunct in &conjuncts {
            conjunct.referenced_columns(&mut where_columns);
        }
        let buckets = classify_conjuncts(conjuncts, &tables)?;

        let (entries, star) = lower_select_items(select, &resolver)?;
        let has_aggregation = entries
            .iter()
            .any(|entry| matches!(entry, SelectEntry::Sum { .. }));
        let group_exprs = lower_group_by(select, &resolver)?;
        let order_keys = lower_order_by(&query.order_by, &resolver)?;
        let distinct = match &select.distinct {
            None => false,
            Some(sql::Distinct::Distinct) => true,
            Some(sql::Distinct::On(_)) => return Err(Error::unsupported("DISTINCT ON")),
        };

        let (root, schema) = self.build_join_tree(&tables, buckets)?;

        if has_aggregation {
            self.finish_aggregation(
                root,
                schema,
                entries,
                group_exprs,
                order_keys,
                where_columns,
            )
        } else {
            self.finish_projection(
                root,
                schema,
                entries,
                star,
                distinct,
                !group_exprs.is_empty(),
                order_keys,
            )
        }
    }

    /// Build the scan (plus local filter) for one base table.
    fn base_operator(
        &self,
        table: &str,
        local: Option<Expr>,
    ) -> Result<(Box<dyn Operator>, Schema)> {
        let schema = self.catalog.schema(table)?;
        let path = self.catalog.table_path(table)?;
        let mut op: Box<dyn Operator> =
            Box::new(ScanOperator::with_schema(table, path, schema.clone())?);
        if let Some(predicate) = local {
            debug!(table, predicate = %predicate, "pushed down local filter");
            op = Box::new(SelectOperator::new(op, predicate, schema.clone()));
        }
        Ok((op, schema))
    }

    /// Fold the filtered scans into a left-deep nested-loop join tree.
    fn build_join_tree(
        &self,
        tables: &[String],
        buckets: ConjunctBuckets,
    ) -> Result<(Box<dyn Operator>, Schema)> {
        let ConjunctBuckets {
            constant,
            mut local,
            joins,
        } = buckets;
        let mut local_predicate = |table: &str| {
            let mut parts = local.remove(table).unwrap_or_default();
            parts.extend(constant.iter().cloned());
            Expr::combine(parts)
        };

        let first = &tables[0];
        let (mut root, mut schema) = self.base_operator(first, local_predicate(first))?;
        let mut joined: FxHashSet<String> = FxHashSet::default();
        joined.insert(first.clone());

        let mut pending = joins;
        for table in &tables[1..] {
            let (right, right_schema) = self.base_operator(table, local_predicate(table))?;
            let (ready, rest): (Vec<_>, Vec<_>) = pending.into_iter().partition(|(_, refs)| {
                refs.contains(table.as_str())
                    && refs.iter().all(|t| t == table || joined.contains(t))
            });
            pending = rest;
            let predicate = Expr::combine(ready.into_iter().map(|(expr, _)| expr));
            let merged = schema.concat(&right_schema)?;
            root = Box::new(NestedLoopJoinOperator::new(
                root,
                right,
                predicate,
                merged.clone(),
            )?);
            schema = merged;
            joined.insert(table.clone());
        }
        if let Some((expr, _)) = pending.into_iter().next() {
            return Err(Error::invariant(format!(
                "join predicate '{}' was never applied",
                expr
            )));
        }
        Ok((root, schema))
    }

    /// The non-aggregation tail of the pipeline: projection, duplicate
    /// elimination, sort, final projection.
    #[allow(clippy::too_many_arguments)]
    fn finish_projection(
        &self,
        mut root: Box<dyn Operator>,
        schema: Schema,
        entries: Vec<SelectEntry>,
        star: bool,
        distinct: bool,
        grouped: bool,
        order_keys: Vec<OrderKey>,
    ) -> Result<PhysicalPlan> {
        for key in &order_keys {
            if key.is_sum {
                return Err(Error::unsupported(
                    "ORDER BY SUM(...) without aggregation in the SELECT list",
                ));
            }
        }
        let select_columns: Vec<String> = if star {
            schema.columns().to_vec()
        } else {
            entries
                .iter()
                .map(|entry| entry.display().to_string())
                .collect()
        };

        // Keep the SELECT columns plus any ORDER BY columns not already
        // included, so the sort keys stay resolvable.
        let mut working = select_columns.clone();
        for key in &order_keys {
            if !working.contains(&key.text) {
                working.push(key.text.clone());
            }
        }
        let mut current_schema = schema;
        if working.as_slice() != current_schema.columns() {
            let project = ProjectOperator::new(root, &working, &current_schema)?;
            current_schema = project.schema().clone();
            root = Box::new(project);
        }

        // DISTINCT, and GROUP BY without any SUM, deduplicate.
        if distinct || grouped {
            root = Box::new(DuplicateEliminationOperator::new(root));
        }

        if !order_keys.is_empty() {
            let keys: Vec<SortKey> = order_keys
                .iter()
                .map(|key| SortKey {
                    column: key.text.clone(),
                    descending: key.descending,
                })
                .collect();
            root = Box::new(SortOperator::new(root, &keys, current_schema.clone())?);
        }

        if select_columns.as_slice() != current_schema.columns() {
            let project = ProjectOperator::new(root, &select_columns, &current_schema)?;
            current_schema = project.schema().clone();
            root = Box::new(project);
        }
        Ok(PhysicalPlan {
            root,
            schema: current_schema,
        })
    }

    /// The aggregation tail: refined projection, SUM operator, final
    /// projection onto the SELECT list, sort.
    fn finish_aggregation(
        &self,
        mut root: Box<dyn Operator>,
        schema: Schema,
        entries: Vec<SelectEntry>,
        group_exprs: Vec<Expr>,
        order_keys: Vec<OrderKey>,
        where_columns: FxHashSet<String>,
    ) -> Result<PhysicalPlan> {
        let grouped = !group_exprs.is_empty();
        if !grouped {
            for entry in &entries {
                if matches!(entry, SelectEntry::Column { .. }) {
                    return Err(Error::unsupported(
                        "non-aggregated column in SELECT without GROUP BY",
                    ));
                }
            }
        }

        // Needed columns from SELECT, WHERE, GROUP BY and ORDER BY form
        // the refined schema fed into the aggregation.
        let mut needed = where_columns;
        for entry in &entries {
            match entry {
                SelectEntry::Column { name } => {
                    needed.insert(name.clone());
                }
                SelectEntry::Sum { argument, .. } => argument.referenced_columns(&mut needed),
            }
        }
        for expr in &group_exprs {
            expr.referenced_columns(&mut needed);
        }
        for key in &order_keys {
            if !key.is_sum {
                needed.insert(key.text.clone());
            }
        }

        let refined: Vec<String> = schema
            .columns()
            .iter()
            .filter(|column| needed.contains(*column))
            .cloned()
            .collect();
        let mut current_schema = schema;
        if refined.as_slice() != current_schema.columns() {
            let project = ProjectOperator::new(root, &refined, &current_schema)?;
            current_schema = project.schema().clone();
            root = Box::new(project);
        }

        let sum_exprs: Vec<Expr> = entries
            .iter()
            .filter_map(|entry| match entry {
                SelectEntry::Sum { argument, .. } => Some(argument.clone()),
                SelectEntry::Column { .. } => None,
            })
            .collect();
        let sum_op = SumOperator::new(root, group_exprs, sum_exprs, current_schema.clone())?;
        current_schema = sum_op.schema().clone();
        root = Box::new(sum_op);

        // Final projection maps each SELECT item onto the aggregation's
        // Group/SUM columns.
        if grouped {
            let requested: Vec<String> = entries
                .iter()
                .map(|entry| match entry {
                    SelectEntry::Sum { .. } => SUM_COLUMN.to_string(),
                    SelectEntry::Column { .. } => GROUP_COLUMN.to_string(),
                })
                .collect();
            if requested.as_slice() != current_schema.columns() {
                let project = ProjectOperator::new(root, &requested, &current_schema)?;
                current_schema = project.schema().clone();
                root = Box::new(project);
            }
        }

        // Rename the output columns to the canonical select-item texts so
        // ORDER BY expressions (including SUM(expr)) resolve against them.
        let display_schema =
            Schema::from_columns(entries.iter().map(|entry| entry.display().to_string()))?;
        if display_schema.len() != current_schema.len() {
            return Err(Error::invariant(format!(
                "aggregation output width {} does not match the SELECT list width {}",
                current_schema.len(),
                display_schema.len()
            )));
        }
        current_schema = display_schema;

        if !order_keys.is_empty() {
            let keys = order_keys
                .iter()
                .map(|key| resolve_output_order_key(key, &current_schema))
                .collect::<Result<Vec<_>>>()?;
            root = Box::new(SortOperator::new(root, &keys, current_schema.clone())?);
        }
        Ok(PhysicalPlan {
            root,
            schema: current_schema,
        })
    }
}

/// Match an ORDER BY key against the final output columns, falling back
/// to a case-insensitive comparison of the canonical rendering.
fn resolve_output_order_key(key: &OrderKey, schema: &Schema) -> Result<SortKey> {
    if schema.contains(&key.text) {
        return Ok(SortKey {
            column: key.text.clone(),
            descending: key.descending,
        });
    }
    schema
        .columns()
        .iter()
        .find(|column| column.eq_ignore_ascii_case(&key.text))
        .map(|column| SortKey {
            column: column.clone(),
            descending: key.descending,
        })
        .ok_or_else(|| {
            Error::invariant(format!(
                "ORDER BY key '{}' does not match any output column",
                key.text
            ))
        })
}

/// Collect the FROM tables in syntactic order and the ON constraints of
/// any explicit joins. Only inner and cross joins are supported.
fn enumerate_tables(select: &sql::Select) -> Result<(Vec<String>, Vec<sql::Expr>)> {
    if select.from.is_empty() {
        return Err(Error::unsupported("SELECT without a FROM clause"));
    }
    let mut tables = Vec::new();
    let mut constraints = Vec::new();
    for table_with_joins in &select.from {
        tables.push(table_factor_name(&table_with_joins.relation)?);
        for join in &table_with_joins.joins {
            tables.push(table_factor_name(&join.relation)?);
            match &join.join_operator {
                sql::JoinOperator::Inner(sql::JoinConstraint::On(expr)) => {
                    constraints.push(expr.clone());
                }
                sql::JoinOperator::Inner(sql::JoinConstraint::None)
                | sql::JoinOperator::CrossJoin => {}
                _ => {
                    return Err(Error::unsupported(
                        "only inner joins with ON or WHERE predicates",
                    ));
                }
            }
        }
    }
    let mut seen = FxHashSet::default();
    for table in &tables {
        if !seen.insert(table.as_str()) {
            return Err(Error::unsupported(format!(
                "table '{}' appears more than once in FROM",
                table
            )));
        }
    }
    Ok((tables, constraints))
}

fn table_factor_name(factor: &sql::TableFactor) -> Result<String> {
    match factor {
        sql::TableFactor::Table {
            name, alias: None, ..
        } if name.0.len() == 1 => Ok(name.0[0].value.clone()),
        sql::TableFactor::Table { alias: Some(_), .. } => {
            Err(Error::unsupported("table aliases"))
        }
        other => Err(Error::unsupported(format!("FROM item '{}'", other))),
    }
}

/// Bucket the WHERE conjuncts by the tables they reference.
///
/// A conjunct naming a table outside the query is a schema miss; one
/// spanning three or more tables is rejected rather than silently
/// dropped.
fn classify_conjuncts(conjuncts: Vec<Expr>, tables: &[String]) -> Result<ConjunctBuckets> {
    let table_set: FxHashSet<&str> = tables.iter().map(String::as_str).collect();
    let mut buckets = ConjunctBuckets::default();
    for conjunct in conjuncts {
        let mut columns = FxHashSet::default();
        conjunct.referenced_columns(&mut columns);
        for column in &columns {
            let table = column.split_once('.').map(|(table, _)| table).unwrap_or("");
            if !table_set.contains(table) {
                return Err(Error::SchemaMiss(column.clone()));
            }
        }
        let refs = conjunct.referenced_tables();
        match refs.len() {
            0 => buckets.constant.push(conjunct),
            1 => {
                let table = refs.into_iter().next().expect("one referenced table");
                buckets.local.entry(table).or_default().push(conjunct);
            }
            2 => buckets.joins.push((conjunct, refs)),
            _ => {
                return Err(Error::unsupported(
                    "WHERE predicates spanning three or more tables",
                ));
            }
        }
    }
    Ok(buckets)
}

fn lower_select_items(
    select: &sql::Select,
    resolver: &ColumnResolver<'_>,
) -> Result<(Vec<SelectEntry>, bool)> {
    let mut entries = Vec::new();
    let mut star = false;
    for item in &select.projection {
        match item {
            sql::SelectItem::Wildcard(_) => star = true,
            sql::SelectItem::QualifiedWildcard(..) => {
                return Err(Error::unsupported("qualified wildcards"));
            }
            sql::SelectItem::ExprWithAlias { .. } => {
                return Err(Error::unsupported("column aliases in SELECT"));
            }
            sql::SelectItem::UnnamedExpr(expr) => {
                entries.push(lower_select_expr(expr, resolver)?);
            }
        }
    }
    if star && !entries.is_empty() {
        return Err(Error::unsupported("mixing '*' with other select items"));
    }
    if !star && entries.is_empty() {
        return Err(Error::parse("empty SELECT list"));
    }
    Ok((entries, star))
}

fn lower_select_expr(expr: &sql::Expr, resolver: &ColumnResolver<'_>) -> Result<SelectEntry> {
    if let sql::Expr::Function(function) = expr {
        let (argument, display) = lower_sum(function, resolver)?;
        return Ok(SelectEntry::Sum { argument, display });
    }
    match lower_expr(expr, resolver)? {
        Expr::Column(name) => Ok(SelectEntry::Column { name }),
        other => Err(Error::unsupported(format!("select item '{}'", other))),
    }
}

/// Lower a `SUM(expr)` call, rewriting a literal argument into the
/// synthetic per-row counter.
fn lower_sum(
    function: &sql::Function,
    resolver: &ColumnResolver<'_>,
) -> Result<(Expr, String)> {
    let name = function.name.to_string();
    if !name.eq_ignore_ascii_case("SUM") {
        return Err(Error::unsupported(format!("function '{}'", name)));
    }
    if function.distinct {
        return Err(Error::unsupported("SUM(DISTINCT ...)"));
    }
    if function.over.is_some() {
        return Err(Error::unsupported("window functions"));
    }
    let argument = match function.args.as_slice() {
        [sql::FunctionArg::Unnamed(sql::FunctionArgExpr::Expr(inner))] => {
            lower_expr(inner, resolver)?
        }
        _ => {
            return Err(Error::unsupported(
                "SUM requires exactly one plain argument",
            ));
        }
    };
    let argument = match argument {
        Expr::Literal(value) => Expr::RowCount(value),
        other => other,
    };
    let display = format!("SUM({})", argument);
    Ok((argument, display))
}

fn lower_group_by(select: &sql::Select, resolver: &ColumnResolver<'_>) -> Result<Vec<Expr>> {
    match &select.group_by {
        sql::GroupByExpr::Expressions(exprs) => exprs
            .iter()
            .map(|expr| lower_expr(expr, resolver))
            .collect(),
        sql::GroupByExpr::All => Err(Error::unsupported("GROUP BY ALL")),
    }
}

fn lower_order_by(
    order_by: &[sql::OrderByExpr],
    resolver: &ColumnResolver<'_>,
) -> Result<Vec<OrderKey>> {
    let mut keys = Vec::new();
    for element in order_by {
        if element.nulls_first.is_some() {
            return Err(Error::unsupported("NULLS FIRST/LAST"));
        }
        let descending = !element.asc.unwrap_or(true);
        let (text, is_sum) = match &element.expr {
            sql::Expr::Function(function) => {
                let (_, display) = lower_sum(function, resolver)?;
                (display, true)
            }
            other => match lower_expr(other, resolver)? {
                Expr::Column(name) => (name, false),
                other => {
                    return Err(Error::unsupported(format!(
                        "ORDER BY expression '{}'",
                        other
                    )));
                }
            },
        };
        keys.push(OrderKey {
            text,
            descending,
            is_sum,
        });
    }
    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn sample_database() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("data")).unwrap();
        let mut schema = fs::File::create(dir.path().join("schema.txt")).unwrap();
        writeln!(schema, "R A B").unwrap();
        writeln!(schema, "S C D").unwrap();
        writeln!(schema, "T K N V").unwrap();
        fs::write(dir.path().join("data/R.csv"), "1, 10\n2, 20\n3, 30\n").unwrap();
        fs::write(dir.path().join("data/S.csv"), "1, 100\n2, 200\n4, 400\n").unwrap();
        fs::write(dir.path().join("data/T.csv"), "1, x, 5\n1, x, 7\n2, y, 3\n").unwrap();
        dir
    }

    fn run(catalog: &Catalog, sql_text: &str) -> Vec<String> {
        let planner = QueryPlanner::new(catalog);
        let mut plan = planner.plan_sql(sql_text).unwrap();
        let mut lines = Vec::new();
        while let Some(tuple) = plan.root.next().unwrap() {
            lines.push(tuple.to_line());
        }
        lines
    }

    #[test]
    fn test_plan_single_table_filter() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT R.A, R.B FROM R WHERE R.B > 15"),
            vec!["2, 20", "3, 30"]
        );
    }

    #[test]
    fn test_plan_join_in_outer_major_order() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT R.A, S.D FROM R, S WHERE R.A = S.C"),
            vec!["1, 100", "2, 200"]
        );
    }

    #[test]
    fn test_plan_explicit_join_on() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT R.A, S.D FROM R JOIN S ON R.A = S.C"),
            vec!["1, 100", "2, 200"]
        );
    }

    #[test]
    fn test_plan_select_star() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT * FROM R WHERE R.A = 2"),
            vec!["2, 20"]
        );
    }

    #[test]
    fn test_plan_order_by_unselected_column() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT R.A FROM R ORDER BY R.B DESC"),
            vec!["3", "2", "1"]
        );
    }

    #[test]
    fn test_plan_schema_matches_select_list() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        let planner = QueryPlanner::new(&catalog);
        let plan = planner
            .plan_sql("SELECT T.K, SUM(T.V) FROM T GROUP BY T.K")
            .unwrap();
        assert_eq!(plan.schema.columns(), &["T.K", "SUM(T.V)"]);
    }

    #[test]
    fn test_plan_rejects_unsupported_shapes() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        let planner = QueryPlanner::new(&catalog);

        for sql_text in [
            "INSERT INTO R VALUES (1, 2)",
            "SELECT R.A FROM R LIMIT 1",
            "SELECT R.A FROM R LEFT JOIN S ON R.A = S.C",
            "SELECT R.A FROM R HAVING R.A > 1",
            "SELECT COUNT(R.A) FROM R",
            "SELECT R.A AS x FROM R",
            "SELECT R.A FROM R WHERE R.A = 1 OR R.B = 2",
        ] {
            assert!(
                matches!(planner.plan_sql(sql_text), Err(Error::Unsupported(_))),
                "expected unsupported: {}",
                sql_text
            );
        }
    }

    #[test]
    fn test_plan_rejects_three_table_predicate() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        let planner = QueryPlanner::new(&catalog);
        let result = planner
            .plan_sql("SELECT R.A FROM R, S, T WHERE R.A + S.C = T.K");
        assert!(matches!(result, Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_plan_rejects_unknown_table_in_where() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        let planner = QueryPlanner::new(&catalog);
        let result = planner.plan_sql("SELECT R.A FROM R WHERE Z.Q = 1");
        assert!(matches!(result, Err(Error::SchemaMiss(_))));
    }

    #[test]
    fn test_plan_bare_columns_resolve() {
        let dir = sample_database();
        let catalog = Catalog::open(dir.path()).unwrap();
        assert_eq!(
            run(&catalog, "SELECT A FROM R WHERE B > 15 ORDER BY A DESC"),
            vec!["3", "2"]
        );
    }
}
