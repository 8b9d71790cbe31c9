use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{error::ScaffoldError, options::WILDCARD};

pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_LOCK_JSON: &str = "package-lock.json";

/// Dependencies every scaffolded application starts from.
pub const BASE_DEPENDENCIES: &[&str] = &["react", "react-dom", "react-scripts"];

/// A JSON package manifest loaded from disk. Key order is kept on save.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub path: PathBuf,
    document: Map<String, Value>,
}

impl TryFrom<&Path> for Manifest {
    type Error = ScaffoldError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let contents = fs::read_to_string(path).map_err(|source| ScaffoldError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;

        let document = match serde_json::from_str(&contents) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                return Err(ScaffoldError::ManifestParse {
                    path: path.to_path_buf(),
                    reason: String::from("root is not a JSON object"),
                })
            }
            Err(e) => {
                return Err(ScaffoldError::ManifestParse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }
}

impl Manifest {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ScaffoldError> {
        Self::try_from(path.as_ref())
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    pub fn set_name(&mut self, name: &str) {
        self.document
            .insert(String::from("name"), Value::String(name.to_string()));
    }

    /// Replaces the dependency table with `packages`, all at the wildcard version.
    pub fn reset_dependencies(&mut self, packages: &[&str]) {
        let dependencies = packages
            .iter()
            .map(|p| (p.to_string(), Value::String(WILDCARD.to_string())))
            .collect();

        self.document
            .insert(String::from("dependencies"), Value::Object(dependencies));
    }

    pub fn add_dependency(&mut self, name: &str, version: &str) {
        let dependencies = self
            .document
            .entry("dependencies")
            .or_insert_with(|| Value::Object(Map::new()));

        if !dependencies.is_object() {
            *dependencies = Value::Object(Map::new());
        }

        if let Value::Object(dependencies) = dependencies {
            dependencies.insert(name.to_string(), Value::String(version.to_string()));
        }
    }

    /// Dependency names and version specs; non-string specs are skipped.
    pub fn dependencies(&self) -> Vec<(String, String)> {
        self.document
            .get("dependencies")
            .and_then(Value::as_object)
            .map(|deps| {
                deps.iter()
                    .filter_map(|(name, version)| {
                        version.as_str().map(|v| (name.clone(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.document
            .get("dependencies")
            .and_then(|deps| deps.get(name))
            .and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.document.get(key).and_then(Value::as_str)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut output = serde_json::to_string_pretty(&self.document)?;
        output.push('\n');
        Ok(output)
    }

    /// Writes the manifest back with 2-space indentation.
    pub fn save(&self) -> Result<(), ScaffoldError> {
        tracing::debug!(path = %self.path.display(), "writing manifest");

        let output = self.to_json().map_err(|e| ScaffoldError::ManifestParse {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        fs::write(&self.path, output).map_err(|source| ScaffoldError::ManifestIo {
            path: self.path.clone(),
            source,
        })
    }
}
