use std::path::PathBuf;

use clap::Parser;

use crate::{error::ScaffoldError, options::OptionToken};

/// Scaffold a React application from the bundled template.
///
/// Flags must precede the application name; every argument after it is an
/// option token (`-router`, `-bootstrap`, `-fer`, `-git`, or `package[@version]`).
#[derive(Debug, Parser)]
#[command(name = "react-scaffold", version)]
pub struct Cli {
    /// TOML file with configuration overrides.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Template directory to copy instead of the bundled template.
    #[arg(long, value_name = "DIR")]
    pub template: Option<PathBuf>,

    /// Directory in which the application directory is created; defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Package manager executable used to install dependencies.
    #[arg(long, value_name = "BIN")]
    pub package_manager: Option<String>,

    /// Replace wildcard versions with the installed versions after install.
    #[arg(long)]
    pub pin_versions: bool,

    /// Do not run the package manager.
    #[arg(long)]
    pub skip_install: bool,

    /// Silences output; repeat to silence errors too.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Enables debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Application name followed by feature flags and extra dependencies.
    #[arg(
        value_name = "APP_NAME [OPTION]...",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub app_name: String,
    pub options: Vec<OptionToken>,
}

impl Invocation {
    /// Takes the first argument as the application name and every later one
    /// as an option token, in order. A leading hyphenated token is an option,
    /// so it counts as a missing name.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ScaffoldError> {
        let (app_name, options) = match args.split_first() {
            Some((name, options)) => (name.as_ref(), options),
            None => return Err(ScaffoldError::MissingArgument),
        };

        if app_name.is_empty() || app_name.starts_with('-') {
            return Err(ScaffoldError::MissingArgument);
        }

        Ok(Self {
            app_name: app_name.to_string(),
            options: options.iter().map(|o| OptionToken::parse(o.as_ref())).collect(),
        })
    }
}

impl TryFrom<&Cli> for Invocation {
    type Error = ScaffoldError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        Self::from_args(&cli.args)
    }
}
