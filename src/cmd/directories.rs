use std::io::{self, BufRead};

use crate::domain::directory::DirectorySet;
use crate::error::AppResult;

/// Derives directories from `paths`, or from stdin (one path per line) when
/// no paths are given.
pub fn run(paths: Vec<String>) -> AppResult<DirectorySet> {
    if !paths.is_empty() {
        return Ok(DirectorySet::from_paths(paths.iter().map(String::as_str)));
    }

    let stdin = io::stdin();
    from_reader(stdin.lock())
}

fn from_reader<R: BufRead>(reader: R) -> AppResult<DirectorySet> {
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(DirectorySet::from_paths(
        lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty()),
    ))
}
