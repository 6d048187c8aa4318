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

//! Tuple type for BlazeDB - a single row flowing through the pipeline

use std::fmt;

use super::error::{Error, Result};

/// A single record produced by an operator.
///
/// Field values are stored as strings and interpreted as signed 64-bit
/// integers when an arithmetic or comparison operator evaluates them.
/// A tuple is immutable once produced; joins build new tuples rather
/// than mutating their inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple {
    fields: Vec<String>,
}

impl Tuple {
    /// Create a tuple from a vector of field values
    #[inline]
    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Create a tuple by concatenating two tuples (for joins).
    ///
    /// The outer tuple's fields come first, preserving order on both sides.
    pub fn from_combined(outer: &Tuple, inner: &Tuple) -> Self {
        let mut fields = Vec::with_capacity(outer.len() + inner.len());
        fields.extend(outer.fields.iter().cloned());
        fields.extend(inner.fields.iter().cloned());
        Self { fields }
    }

    /// Get the number of fields in the tuple
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the tuple has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a field by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Iterate over the field values
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Parse the field at `index` as a signed 64-bit integer.
    ///
    /// Returns `InvariantViolation` for an out-of-range index and
    /// `TypeMismatch` when the field is not an integer.
    pub fn int_at(&self, index: usize) -> Result<i64> {
        let field = self.fields.get(index).ok_or_else(|| {
            Error::invariant(format!(
                "field index {} out of bounds for tuple of width {}",
                index,
                self.fields.len()
            ))
        })?;
        field.trim().parse::<i64>().map_err(|_| {
            Error::type_mismatch(format!("field '{}' is not an integer", field))
        })
    }

    /// Serialize the tuple as an output line.
    ///
    /// Fields are joined by a comma and a space. This rendering is also the
    /// identity used by duplicate elimination.
    pub fn to_line(&self) -> String {
        self.fields.join(", ")
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

impl From<Vec<&str>> for Tuple {
    fn from(fields: Vec<&str>) -> Self {
        Self::from_fields(fields.into_iter().map(str::to_string).collect())
    }
}
