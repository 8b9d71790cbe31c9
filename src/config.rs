use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::{Table, Value};

use crate::{args::Cli, error::ScaffoldError, patch::BOOTSTRAP_IMPORT, template::TemplateSource};

/// Settings of one scaffolding run.
///
/// Built from defaults, then an optional TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory in which `<app name>/` is created.
    pub destination_root: PathBuf,
    pub template: TemplateSource,
    pub package_manager: String,
    pub install_args: Vec<String>,
    pub git: String,
    /// Source file receiving the stylesheet import, relative to the project root.
    pub patch_target: PathBuf,
    pub stylesheet_import: String,
    pub pin_versions: bool,
    pub skip_install: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            destination_root: PathBuf::from("."),
            template: TemplateSource::Embedded,
            package_manager: String::from("npm"),
            install_args: vec![String::from("install")],
            git: String::from("git"),
            patch_target: Path::new("src").join("index.js"),
            stylesheet_import: BOOTSTRAP_IMPORT.to_string(),
            pin_versions: false,
            skip_install: false,
        }
    }
}

impl Config {
    /// Reads overrides from a TOML file. Unknown keys are rejected.
    pub fn from_file(path: &Path) -> Result<Self, ScaffoldError> {
        let invalid = |reason: String| ScaffoldError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let contents = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let table: Table = toml::from_str(&contents).map_err(|e| invalid(e.to_string()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut config = Self::default();

        for (key, value) in &table {
            match key.as_str() {
                "package_manager" => config.package_manager = string(key, value).map_err(invalid)?,
                "git" => config.git = string(key, value).map_err(invalid)?,
                "stylesheet_import" => {
                    config.stylesheet_import = string(key, value).map_err(invalid)?
                }
                "patch_target" => {
                    config.patch_target = PathBuf::from(string(key, value).map_err(invalid)?)
                }
                "template" => {
                    config.template =
                        TemplateSource::Directory(base.join(string(key, value).map_err(invalid)?))
                }
                "install_args" => {
                    config.install_args = value
                        .as_array()
                        .and_then(|args| {
                            args.iter()
                                .map(|a| a.as_str().map(str::to_string))
                                .collect::<Option<Vec<_>>>()
                        })
                        .ok_or_else(|| invalid(format!("`{}` must be an array of strings", key)))?
                }
                "pin_versions" => {
                    config.pin_versions = value
                        .as_bool()
                        .ok_or_else(|| invalid(format!("`{}` must be a boolean", key)))?
                }
                other => return Err(invalid(format!("unknown key `{}`", other))),
            }
        }

        Ok(config)
    }

    pub fn load(cli: &Cli) -> Result<Self, ScaffoldError> {
        let config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(config.with_cli(cli))
    }

    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.dir {
            self.destination_root = dir.clone();
        }
        if let Some(template) = &cli.template {
            self.template = TemplateSource::Directory(template.clone());
        }
        if let Some(package_manager) = &cli.package_manager {
            self.package_manager = package_manager.clone();
        }
        self.pin_versions |= cli.pin_versions;
        self.skip_install |= cli.skip_install;
        self
    }
}

fn string(key: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("`{}` must be a string", key))
}
