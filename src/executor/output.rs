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

//! Output writer - drives an operator tree and serializes its tuples

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::Result;
use crate::executor::operator::Operator;

/// Drain the operator tree into a writer, one tuple per line.
///
/// Fields are joined with `", "`; a trailing newline follows the last
/// tuple.
pub fn write_results<W: Write>(root: &mut dyn Operator, writer: &mut W) -> Result<()> {
    while let Some(tuple) = root.next()? {
        writeln!(writer, "{}", tuple.to_line())?;
    }
    Ok(())
}

/// Drain the operator tree into a file.
pub fn write_results_to_path(root: &mut dyn Operator, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_results(root, &mut writer)?;
    writer.flush()?;
    Ok(())
}
