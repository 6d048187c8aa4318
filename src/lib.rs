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

//! # BlazeDB - a small SQL query engine over CSV-backed tables
//!
//! BlazeDB executes a constrained subset of `SELECT` statements against
//! CSV files: selections with `AND`-combined integer predicates,
//! left-deep nested-loop joins, projection, `SUM` aggregation (grouped
//! and ungrouped), `DISTINCT` and multi-key `ORDER BY`.
//!
//! ## Architecture
//!
//! The planner lowers a statement parsed by `sqlparser` into a tree of
//! pull-based operators. Selection predicates are pushed down to their
//! tables; join predicates are split out of the flat `WHERE` clause and
//! attached to the nested-loop joins.
//!
//! ```no_run
//! use blazedb::{Catalog, QueryPlanner};
//!
//! let catalog = Catalog::open("samples/db").unwrap();
//! let planner = QueryPlanner::new(&catalog);
//! let mut plan = planner
//!     .plan_sql("SELECT R.A, R.B FROM R WHERE R.B > 15")
//!     .unwrap();
//! while let Some(tuple) = plan.root.next().unwrap() {
//!     println!("{}", tuple);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`] - fundamental types ([`Tuple`], [`Schema`], [`Error`])
//! - [`catalog`] - table-to-file resolution and schema loading
//! - [`executor`] - expressions, physical operators and the planner

pub mod catalog;
pub mod core;
pub mod executor;

use std::fs;
use std::path::Path;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use core::{Error, Result, Schema, Tuple};
pub use executor::{Operator, PhysicalPlan, QueryPlanner};

/// Run the query in `query_file` against the database in `database_dir`
/// and write the result to `output_file`.
///
/// This is the full pipeline used by the command-line binary: load the
/// catalog, plan the statement, drain the operator tree into the output
/// file.
pub fn run_query(
    database_dir: impl AsRef<Path>,
    query_file: impl AsRef<Path>,
    output_file: impl AsRef<Path>,
) -> Result<()> {
    let catalog = Catalog::open(database_dir)?;
    let sql = fs::read_to_string(query_file.as_ref()).map_err(|e| {
        Error::io(format!(
            "cannot read query file {}: {}",
            query_file.as_ref().display(),
            e
        ))
    })?;
    let planner = QueryPlanner::new(&catalog);
    let mut plan = planner.plan_sql(&sql)?;
    executor::output::write_results_to_path(plan.root.as_mut(), output_file)?;
    Ok(())
}
