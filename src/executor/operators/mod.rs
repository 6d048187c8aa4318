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

//! Physical operator implementations
//!
//! Each operator implements the pull protocol of
//! [`Operator`](crate::executor::operator::Operator). The scan is the only
//! leaf; select, project and duplicate elimination stream with O(1) state;
//! the nested-loop join buffers matches per outer tuple; sort and
//! aggregation are blocking.

pub mod aggregate;
pub mod distinct;
pub mod nested_loop_join;
pub mod project;
pub mod scan;
pub mod select;
pub mod sort;

pub use aggregate::{SumOperator, GROUP_COLUMN, SUM_COLUMN};
pub use distinct::DuplicateEliminationOperator;
pub use nested_loop_join::NestedLoopJoinOperator;
pub use project::ProjectOperator;
pub use scan::ScanOperator;
pub use select::SelectOperator;
pub use sort::{SortKey, SortOperator};
