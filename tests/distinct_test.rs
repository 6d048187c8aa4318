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

//! DISTINCT tests
//!
//! Duplicate elimination for SELECT DISTINCT and for GROUP BY without
//! aggregation.

use std::fs;
use std::io::Write;

use blazedb::{Catalog, QueryPlanner};

fn sample_database() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("data")).expect("Failed to create data dir");
    let mut schema =
        fs::File::create(dir.path().join("schema.txt")).expect("Failed to create schema file");
    writeln!(schema, "T K N V").unwrap();
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

/// Test DISTINCT on a single column
#[test]
fn test_distinct_single_column() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT DISTINCT T.K FROM T");
    assert_eq!(results, vec!["1", "2"]);
}

/// Test DISTINCT over multiple columns
#[test]
fn test_distinct_multiple_columns() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    // (1, x) repeats; (2, y) is unique.
    let results = query(&catalog, "SELECT DISTINCT T.K, T.N FROM T");
    assert_eq!(results, vec!["1, x", "2, y"]);
}

/// Test that DISTINCT keeps the first occurrence in child order
#[test]
fn test_distinct_preserves_first_occurrence_order() {
    let dir = sample_database();
    fs::write(dir.path().join("data/T.csv"), "2, y, 3\n1, x, 5\n2, y, 9\n")
        .expect("Failed to rewrite T");
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT DISTINCT T.K FROM T");
    assert_eq!(results, vec!["2", "1"]);
}

/// Test GROUP BY without aggregation, which acts as DISTINCT
#[test]
fn test_group_by_without_sum_deduplicates() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT T.K FROM T GROUP BY T.K");
    assert_eq!(results, vec!["1", "2"]);
}

/// Test DISTINCT without duplicates is a no-op
#[test]
fn test_distinct_no_duplicates() {
    let dir = sample_database();
    let catalog = Catalog::open(dir.path()).expect("Failed to open catalog");

    let results = query(&catalog, "SELECT DISTINCT T.V FROM T");
    assert_eq!(results, vec!["5", "7", "3"]);
}
