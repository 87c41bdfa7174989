use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BikeshareError, Result};

/// A single city's data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityEntry {
    /// Display name, e.g. `New York City`.
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Maps city keys to their trip data files.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": { "name": "Chicago", "path": "chicago.csv", "aliases": ["cc"] },
///   "washington": { "name": "Washington", "path": "data/washington.csv" }
/// }
/// ```
/// Relative paths resolve against the directory containing the file.
#[derive(Debug, Clone, Default)]
pub struct CityConfig {
    entries: BTreeMap<String, CityEntry>,
}

impl CityConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_json(&content, base)
    }

    /// Parses a JSON config, resolving relative paths against `base`.
    pub fn from_json(content: &str, base: &Path) -> Result<Self> {
        let raw: BTreeMap<String, CityEntry> = serde_json::from_str(content)?;
        let entries = raw
            .into_iter()
            .map(|(key, mut entry)| {
                if entry.path.is_relative() {
                    entry.path = base.join(&entry.path);
                }
                (key.to_lowercase(), entry)
            })
            .collect();
        Ok(Self { entries })
    }

    /// The three stock cities, with their files under `data_dir`.
    pub fn defaults(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        let entry = |name: &str, file: &str, aliases: &[&str]| CityEntry {
            name: name.to_string(),
            path: dir.join(file),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        };

        let entries = BTreeMap::from([
            ("chicago".to_string(), entry("Chicago", "chicago.csv", &["cc"])),
            (
                "new york city".to_string(),
                entry("New York City", "new_york_city.csv", &["nyc", "new york"]),
            ),
            ("washington".to_string(), entry("Washington", "washington.csv", &["dc"])),
        ]);
        Self { entries }
    }

    pub fn insert(&mut self, key: &str, entry: CityEntry) {
        self.entries.insert(key.to_lowercase(), entry);
    }

    /// Looks a city up by key, display name or alias, ignoring case.
    pub fn resolve(&self, city: &str) -> Result<&CityEntry> {
        let wanted = city.trim().to_lowercase();
        self.entries
            .get(&wanted)
            .or_else(|| {
                self.entries.values().find(|e| {
                    e.name.to_lowercase() == wanted
                        || e.aliases.iter().any(|a| a.to_lowercase() == wanted)
                })
            })
            .ok_or_else(|| BikeshareError::UnknownCity(city.to_string()))
    }

    /// Iterates over all `(key, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CityEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_keys_names_and_aliases() {
        let config = CityConfig::defaults("data");
        assert_eq!(config.resolve("Chicago").unwrap().path, Path::new("data/chicago.csv"));
        assert_eq!(config.resolve("NYC").unwrap().name, "New York City");
        assert_eq!(config.resolve(" dc ").unwrap().name, "Washington");
        assert_eq!(config.iter().count(), 3);
    }

    #[test]
    fn test_unknown_city() {
        let config = CityConfig::defaults(".");
        let err = config.resolve("boston").unwrap_err();
        assert!(matches!(err, BikeshareError::UnknownCity(c) if c == "boston"));
    }

    #[test]
    fn test_from_json_resolves_relative_paths() {
        let json = r#"{
            "Boston": { "name": "Boston", "path": "boston.csv", "aliases": ["bos"] },
            "austin": { "name": "Austin", "path": "/srv/austin.csv" }
        }"#;
        let config = CityConfig::from_json(json, Path::new("/data")).unwrap();
        assert_eq!(config.resolve("bos").unwrap().path, Path::new("/data/boston.csv"));
        assert_eq!(config.resolve("AUSTIN").unwrap().path, Path::new("/srv/austin.csv"));
    }

    #[test]
    fn test_from_json_rejects_invalid_document() {
        let err = CityConfig::from_json("[1, 2]", Path::new(".")).unwrap_err();
        assert!(matches!(err, BikeshareError::Config(_)));
    }
}
