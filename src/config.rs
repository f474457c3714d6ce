//! Region-to-source configuration.
//!
//! The mapping from region names to CSV files is an explicit value handed to
//! the loader rather than process-wide state, so each run is reproducible
//! and tests can point at synthetic datasets.

use std::path::{Path, PathBuf};

/// Canonical region keys and their backing file names.
pub const DEFAULT_REGIONS: [(&str, &str); 3] = [
    ("chicago", "chicago.csv"),
    ("new york city", "new_york_city.csv"),
    ("washington", "washington.csv"),
];

/// One region's backing CSV file.
#[derive(Debug, Clone)]
pub struct RegionSource {
    /// Lowercase canonical key, e.g. `"new york city"`.
    pub key: String,
    pub path: PathBuf,
}

/// Ordered mapping from region keys to backing CSV files.
///
/// Insertion order is display order, so the selection dialogue presents a
/// deterministic option list.
#[derive(Debug, Clone)]
pub struct DataSources {
    sources: Vec<RegionSource>,
}

impl DataSources {
    /// An empty mapping; register sources with [`DataSources::with_source`].
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// The three canonical regions, resolved against `data_dir`.
    pub fn from_dir(data_dir: &Path) -> Self {
        let sources = DEFAULT_REGIONS
            .iter()
            .map(|(key, file)| RegionSource {
                key: (*key).to_string(),
                path: data_dir.join(file),
            })
            .collect();
        Self { sources }
    }

    /// Register an additional region source.
    pub fn with_source(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.sources.push(RegionSource {
            key: key.into().to_lowercase(),
            path: path.into(),
        });
        self
    }

    /// Display names for the selection dialogue, derived from the backing
    /// file names: extension stripped, underscores replaced with spaces,
    /// title-cased.
    pub fn display_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| display_name(&s.path)).collect()
    }

    /// Resolve a region name to its backing file, case-insensitively.
    ///
    /// Accepts either the canonical key or the derived display name.
    pub fn resolve(&self, region: &str) -> Option<&Path> {
        let wanted = region.to_lowercase();
        self.sources
            .iter()
            .find(|s| s.key == wanted || display_name(&s.path).to_lowercase() == wanted)
            .map(|s| s.path.as_path())
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
