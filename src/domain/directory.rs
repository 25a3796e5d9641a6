use std::collections::BTreeSet;

use crate::domain::change::ChangedFile;

/// Top-level directories touched by a change set, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet(BTreeSet<String>);

impl DirectorySet {
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self(
            paths
                .into_iter()
                .filter_map(top_level_directory)
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Directories that are not already present in `existing`.
    pub fn missing_from<'a, I>(&self, existing: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let existing: BTreeSet<&str> = existing.into_iter().collect();
        self.iter()
            .filter(|dir| !existing.contains(dir))
            .map(str::to_string)
            .collect()
    }

    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(",")
    }
}

pub fn derive_directories(files: &[ChangedFile]) -> DirectorySet {
    DirectorySet::from_paths(files.iter().map(|file| file.path.as_str()))
}

/// First path segment, or `None` for files at the repository root.
///
/// GitHub never reports absolute paths, but an empty leading segment would
/// become an unnamed label, so it is dropped as well.
pub fn top_level_directory(path: &str) -> Option<&str> {
    path.split_once('/')
        .map(|(head, _)| head)
        .filter(|head| !head.is_empty())
}
