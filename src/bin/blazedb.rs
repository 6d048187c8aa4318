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

//! BlazeDB CLI - execute a SQL query file against a CSV database
//!

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// BlazeDB SQL query engine
#[derive(Parser, Debug)]
#[command(name = "blazedb")]
#[command(author = "BlazeDB Contributors")]
#[command(version)]
#[command(about = "Execute a SQL SELECT over CSV-backed tables")]
#[command(
    long_about = "BlazeDB executes a constrained subset of SQL SELECT statements over \
CSV-backed tables.\n\n\
The database directory must contain a schema.txt file (one table per line: \
'TableName col1 col2 ... colN') and a data/ subdirectory with one headerless \
CSV file per table.\n\n\
EXAMPLE:\n\
  blazedb samples/db samples/input/query1.sql samples/output/query1.csv"
)]
struct Args {
    /// Directory containing schema.txt and the data/ subdirectory
    database_dir: PathBuf,

    /// File containing a single SQL SELECT statement
    query_file: PathBuf,

    /// Destination file for the query result
    output_file: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match blazedb::run_query(&args.database_dir, &args.query_file, &args.output_file) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "query execution failed");
            ExitCode::FAILURE
        }
    }
}
