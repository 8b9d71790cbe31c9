//! Scaffolds React applications: copies a project template, customizes its
//! `package.json`, applies feature options and installs dependencies.

pub mod args;
pub mod config;
pub mod error;
pub mod interface;
pub mod manifest;
pub mod options;
pub mod patch;
pub mod resolver;
pub mod runner;
pub mod scaffold;
pub mod template;

pub use args::{Cli, Invocation};
pub use config::Config;
pub use error::ScaffoldError;
pub use interface::Interface;
pub use runner::{DuctRunner, Runner};
pub use scaffold::Scaffold;
