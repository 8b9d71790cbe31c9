//! Subprocess invocation for the package manager and version control.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::ScaffoldError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I, dir: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            dir: dir.to_path_buf(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs commands to completion and reports their exit code (`None` when
/// killed by a signal).
pub trait Runner {
    fn run(&mut self, command: &CommandLine) -> Result<Option<i32>, ScaffoldError>;
}

impl<R: Runner + ?Sized> Runner for &mut R {
    fn run(&mut self, command: &CommandLine) -> Result<Option<i32>, ScaffoldError> {
        (**self).run(command)
    }
}

/// Spawns real processes; stdio is inherited from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuctRunner;

impl Runner for DuctRunner {
    fn run(&mut self, command: &CommandLine) -> Result<Option<i32>, ScaffoldError> {
        tracing::debug!(command = %command, dir = %command.dir.display(), "spawning");

        let output = duct::cmd(command.program.as_str(), &command.args)
            .dir(&command.dir)
            .unchecked()
            .run()
            .map_err(|source| ScaffoldError::SubprocessSpawn {
                command: command.to_string(),
                source,
            })?;

        Ok(output.status.code())
    }
}

/// Runs `command` and turns any non-zero exit into a [`ScaffoldError::SubprocessFailure`].
pub fn run_checked<R: Runner + ?Sized>(
    runner: &mut R,
    command: &CommandLine,
) -> Result<(), ScaffoldError> {
    match runner.run(command)? {
        Some(0) => Ok(()),
        code => Err(ScaffoldError::SubprocessFailure {
            command: command.to_string(),
            code,
        }),
    }
}
