//! Replaces wildcard dependency versions with the versions actually installed.

use std::path::{Path, PathBuf};

use crate::{
    error::ScaffoldError,
    manifest::{Manifest, PACKAGE_JSON},
    options::WILDCARD,
};

pub const NODE_MODULES: &str = "node_modules";

fn installed_manifest_path(project: &Path, package: &str) -> PathBuf {
    // scoped names (`@scope/pkg`) map onto nested directories
    package
        .split('/')
        .fold(project.join(NODE_MODULES), |path, part| path.join(part))
        .join(PACKAGE_JSON)
}

pub fn installed_version(project: &Path, package: &str) -> Result<String, ScaffoldError> {
    let path = installed_manifest_path(project, package);
    let missing = || ScaffoldError::PackageMetadataMissing {
        package: package.to_string(),
        path: path.clone(),
    };

    let manifest = Manifest::read(&path).map_err(|e| {
        tracing::debug!(error = %e, "installed package manifest unreadable");
        missing()
    })?;

    manifest
        .field("version")
        .map(str::to_string)
        .ok_or_else(missing)
}

/// Pins every wildcard dependency of `project`'s manifest to its installed
/// version and rewrites the manifest.
///
/// All versions are resolved before the manifest is touched, so a single
/// missing package leaves the manifest on disk unchanged.
pub fn pin_versions(project: &Path) -> Result<Vec<(String, String)>, ScaffoldError> {
    let mut manifest = Manifest::read(project.join(PACKAGE_JSON))?;

    let pinned = manifest
        .dependencies()
        .into_iter()
        .filter(|(_, version)| version == WILDCARD)
        .map(|(name, _)| installed_version(project, &name).map(|version| (name, version)))
        .collect::<Result<Vec<_>, _>>()?;

    for (name, version) in &pinned {
        manifest.add_dependency(name, version);
    }

    if !pinned.is_empty() {
        manifest.save()?;
    }

    Ok(pinned)
}
