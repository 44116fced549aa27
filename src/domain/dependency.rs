//! Dependency selection structures

use std::collections::BTreeMap;
use std::fmt;

/// Dependency names mapped to their declared version specifiers
///
/// Iteration order is the enumeration order used by the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    entries: BTreeMap<String, String>,
}

impl DependencySet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a dependency, replacing any previous version for the same name
    pub fn insert(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.entries.insert(name.into(), version.into());
    }

    /// Returns the version specifier declared for a dependency
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the number of dependencies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no dependencies
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, version)` pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, version)| (name.as_str(), version.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for DependencySet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, version) in iter {
            set.insert(name, version);
        }
        set
    }
}

/// Dependencies chosen for measurement plus what the flags excluded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySelection {
    /// Dependencies to measure
    pub dependencies: DependencySet,
    /// Number of devDependencies skipped by --production
    pub dev_skipped: usize,
    /// Number of optionalDependencies skipped by --no-optional
    pub optional_skipped: usize,
}

impl DependencySelection {
    /// Line printed before any install starts
    pub fn start_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DependencySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Analyzing {} dependencies", self.dependencies.len())?;

        let dev = plural(self.dev_skipped, "devDependency", "devDependencies");
        let optional = plural(
            self.optional_skipped,
            "optionalDependency",
            "optionalDependencies",
        );
        match (self.dev_skipped, self.optional_skipped) {
            (0, 0) => {}
            (_, 0) => write!(f, " (skipping {})", dev)?,
            (0, _) => write!(f, " (skipping {})", optional)?,
            _ => write!(f, " (skipping {} and {})", dev, optional)?,
        }

        write!(f, "...")
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
