use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures of a scaffolding run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Please provide an app name as an argument.")]
    MissingArgument,

    #[error("Failed to copy the template into `{}`", destination.display())]
    TemplateCopy {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to access manifest `{}`", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid manifest `{}`: {reason}", path.display())]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Failed to patch source file `{}`", path.display())]
    SourcePatch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to spawn `{command}`; is it installed?")]
    SubprocessSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {}", describe_exit(*code))]
    SubprocessFailure { command: String, code: Option<i32> },

    #[error("Missing metadata for installed package `{package}` at `{}`", path.display())]
    PackageMetadataMissing { package: String, path: PathBuf },

    #[error("Invalid configuration `{}`: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => String::from("no exit status (terminated by signal)"),
    }
}
