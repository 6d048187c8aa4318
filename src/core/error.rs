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

//! Error types for BlazeDB
//!
//! This module defines all error types used throughout the query engine.

use thiserror::Error;

/// Result type alias for BlazeDB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for BlazeDB query processing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// File open/read/write failure. Fatal for scan initialization and
    /// output writing; per-tuple evaluation glitches are handled by the
    /// operators themselves (logged, tuple skipped).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Malformed SQL, reported at planner entry
    #[error("parse error: {0}")]
    Parse(String),

    /// AST node or query shape the engine does not implement
    #[error("not supported: {0}")]
    Unsupported(String),

    /// A referenced column is absent from the current schema mapping
    #[error("column '{0}' not found in schema")]
    SchemaMiss(String),

    /// Table not found in the catalog
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// Non-integer operand where arithmetic or an inequality demands one
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },

    /// Tuple width mismatch, missing sort key resolution, and similar
    /// internal inconsistencies
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },
}

impl Error {
    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Error::Io {
            message: message.into(),
        }
    }

    /// Create a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse(message.into())
    }

    /// Create a new Unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::Unsupported(message.into())
    }

    /// Create a new TypeMismatch error
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Error::TypeMismatch {
            message: message.into(),
        }
    }

    /// Create a new InvariantViolation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            message: message.into(),
        }
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SchemaMiss(_) | Error::TableNotFound(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::SchemaMiss("R.A".to_string()).to_string(),
            "column 'R.A' not found in schema"
        );
        assert_eq!(
            Error::TableNotFound("Student".to_string()).to_string(),
            "table 'Student' not found"
        );
        assert_eq!(
            Error::unsupported("subqueries").to_string(),
            "not supported: subqueries"
        );
        assert_eq!(
            Error::parse("unexpected token").to_string(),
            "parse error: unexpected token"
        );
        assert_eq!(
            Error::type_mismatch("operand of '<' must be an integer").to_string(),
            "type mismatch: operand of '<' must be an integer"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::SchemaMiss("R.A".to_string()).is_not_found());
        assert!(Error::TableNotFound("R".to_string()).is_not_found());
        assert!(!Error::io("boom").is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::SchemaMiss("a".to_string()),
            Error::SchemaMiss("a".to_string())
        );
        assert_ne!(Error::io("x"), Error::parse("x"));
    }
}
