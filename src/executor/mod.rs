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

//! Query execution: expressions, physical operators and the planner
//!
//! Execution is single-threaded and demand-driven. The planner lowers a
//! parsed SELECT into a tree of pull-based operators; a driver repeatedly
//! asks the root for the next tuple and hands each one to the output
//! writer.

pub mod evaluator;
pub mod expression;
pub mod operator;
pub mod operators;
pub mod output;
pub mod planner;

pub use expression::{ArithOp, CompareOp, Expr};
pub use operator::{MaterializedOperator, Operator};
pub use operators::{
    DuplicateEliminationOperator, NestedLoopJoinOperator, ProjectOperator, ScanOperator,
    SelectOperator, SortKey, SortOperator, SumOperator,
};
pub use planner::{PhysicalPlan, QueryPlanner};
