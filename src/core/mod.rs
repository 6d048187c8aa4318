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

//! Core types and definitions for BlazeDB
//!
//! This module contains the fundamental types used throughout the engine:
//!
//! - [`Tuple`] - a single row of string field values
//! - [`Schema`] - name-to-index mapping describing an operator's output
//! - [`Error`] - error types for all query processing operations

pub mod error;
pub mod schema;
pub mod tuple;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use schema::Schema;
pub use tuple::Tuple;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Integration test: tuple width matches its schema
    #[test]
    fn test_schema_tuple_integration() {
        let schema = Schema::from_columns(["R.A", "R.B"]).unwrap();
        let tuple = Tuple::from(vec!["1", "10"]);
        assert_eq!(tuple.len(), schema.len());
        assert_eq!(
            tuple.get(schema.index_of("R.B").unwrap()),
            Some("10")
        );
    }

    /// Integration test: join merge keeps schema and tuple layout in step
    #[test]
    fn test_concat_layout_integration() {
        let left_schema = Schema::from_columns(["R.A", "R.B"]).unwrap();
        let right_schema = Schema::from_columns(["S.C", "S.D"]).unwrap();
        let merged_schema = left_schema.concat(&right_schema).unwrap();

        let outer = Tuple::from(vec!["1", "10"]);
        let inner = Tuple::from(vec!["1", "100"]);
        let merged = Tuple::from_combined(&outer, &inner);

        assert_eq!(merged.len(), merged_schema.len());
        assert_eq!(
            merged.get(merged_schema.index_of("S.D").unwrap()),
            Some("100")
        );
    }
}
