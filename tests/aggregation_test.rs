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

//! SUM aggregation tests
//!
//! Ungrouped and grouped aggregation, literal SUM arguments and ORDER BY
//! over aggregated output. Grouped output without a sort is compared as
//! a multiset of lines because its emission order is unspecified.

use std::fs;
use std::io::Write;

use blazedb::{Catalog, QueryPlanner};

fn sample_database() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("data")).expect("Failed to create data dir");
    let mut schema =
        fs::File::create(dir.path().join("schema.txt")).expect("Failed to create schema file");
    writeln!(schema, "R A B").unwrap();
    writeln!(schema, "T K N V").unwrap();
    fs::write(dir.path().join("data/R.csv"), "1, 10\n2, 20\n3, 30\n")
        .expect("Failed to write R");
    fs::write(dir.path().join("data/T.csv"), "1, x, 5\n1, x, 7\n2, y, 3\n")
        .expect("Failed to write T");
    dir
}

fn query(catalog: &Catalog, sql: &str) -> Vec<String> {
    let planner = QueryPlanner::new(catalog);
    let mut plan = planner.plan_sql(sql).expect("Failed to plan query");
    let mut lines = Vec::new();
    while let Some(tuple) = plan.root.next().expect("Failed to pull tuple") {
        lines.push(tuple.to_line());
    }
    lines
}

/// Order-insensitive comparison for grouped output
fn as_multiset(mut lines: Vec<String>) -> Vec<String> {
    lines.sort();
    lines
}

/// Test an ungrouped SUM over one column
#[test]
fn test_ungrouped_sum() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT SUM(R.B) FROM R");
    assert_eq!(results, vec!["60"]);
}

/// Test multiple ungrouped SUM expressions
#[test]
fn test_ungrouped_multiple_sums() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT SUM(R.A), SUM(R.A * R.B) FROM R");
    // 1+2+3 = 6; 10+40+90 = 140.
    assert_eq!(results, vec!["6, 140"]);
}

/// Test grouped SUM (hash order, compared as a multiset)
#[test]
fn test_grouped_sum() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT T.K, SUM(T.V) FROM T GROUP BY T.K");
    assert_eq!(as_multiset(results), vec!["1, 12", "2, 3"]);
}

/// Test grouped SUM with a deterministic ORDER BY on the group key
#[test]
fn test_grouped_sum_ordered() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(
        &catalog,
        "SELECT T.K, SUM(T.V) FROM T GROUP BY T.K ORDER BY T.K ASC",
    );
    assert_eq!(results, vec!["1, 12", "2, 3"]);
}

/// Test ORDER BY on the aggregated value
#[test]
fn test_order_by_sum() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(
        &catalog,
        "SELECT T.K, SUM(T.V) FROM T GROUP BY T.K ORDER BY SUM(T.V) DESC",
    );
    assert_eq!(results, vec!["1, 12", "2, 3"]);
}

/// Test a literal SUM argument acting as a per-group row counter
#[test]
fn test_sum_of_literal_counts_rows() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(
        &catalog,
        "SELECT T.K, SUM(1) FROM T GROUP BY T.K ORDER BY T.K ASC",
    );
    assert_eq!(results, vec!["1, 2", "2, 1"]);

    let results = query(&catalog, "SELECT SUM(1) FROM T");
    assert_eq!(results, vec!["3"]);
}

/// Test SUM over an arithmetic expression
#[test]
fn test_sum_of_expression() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT SUM(R.A * R.B) FROM R");
    assert_eq!(results, vec!["140"]);
}

/// Test aggregation after a WHERE filter
#[test]
fn test_sum_with_filter() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT SUM(R.B) FROM R WHERE R.A > 1");
    assert_eq!(results, vec!["50"]);
}

/// Test the SELECT list reordering grouped output columns
#[test]
fn test_grouped_sum_reordered_select() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(
        &catalog,
        "SELECT SUM(T.V), T.K FROM T GROUP BY T.K ORDER BY T.K ASC",
    );
    assert_eq!(results, vec!["12, 1", "3, 2"]);
}

/// Test that grouped aggregation with several SUMs is rejected
#[test]
fn test_grouped_multiple_sums_rejected() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");
    let planner = QueryPlanner::new(&catalog);

    let result = planner.plan_sql("SELECT T.K, SUM(T.V), SUM(1) FROM T GROUP BY T.K");
    assert!(matches!(result, Err(blazedb::Error::Unsupported(_))));
}
