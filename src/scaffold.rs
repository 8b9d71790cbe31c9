//! The scaffolding pipeline: template, manifest, source patch, git, install,
//! version pinning. Steps run in order and the first failure aborts the run
//! without rolling back what was already written.

use std::path::{Path, PathBuf};

use crate::{
    args::Invocation,
    config::Config,
    error::ScaffoldError,
    interface::Interface,
    manifest::{Manifest, BASE_DEPENDENCIES, PACKAGE_JSON, PACKAGE_LOCK_JSON},
    options::Plan,
    patch, resolver,
    runner::{run_checked, CommandLine, Runner},
    template,
};

pub struct Scaffold<'a, R> {
    config: &'a Config,
    interface: &'a mut Interface,
    runner: R,
}

impl<'a, R: Runner> Scaffold<'a, R> {
    pub fn new(config: &'a Config, interface: &'a mut Interface, runner: R) -> Self {
        Self {
            config,
            interface,
            runner,
        }
    }

    /// Scaffolds the application and returns its directory.
    pub fn run(&mut self, invocation: &Invocation) -> Result<PathBuf, ScaffoldError> {
        let target = self.config.destination_root.join(&invocation.app_name);
        let plan = Plan::from_options(&invocation.options);

        tracing::debug!(target = %target.display(), ?plan, "scaffolding");

        self.interface.info(format!("Creating `{}`...", target.display()));
        template::materialize(&self.config.template, &target)?;

        write_manifests(&target, &invocation.app_name, &plan)?;

        let path = target.join(&self.config.patch_target);
        for _ in 0..plan.stylesheet_injections {
            self.interface
                .info(format!("Adding stylesheet import to `{}`...", path.display()));
            patch::inject_import_file(&path, &self.config.stylesheet_import)?;
        }

        if plan.init_git {
            let command = CommandLine::new(&self.config.git, ["init"], &target);
            self.interface.info("Initializing git repository...");
            self.execute(&command)?;
        }

        if self.config.skip_install {
            self.interface.info("Skipping dependency installation.");
        } else {
            let command = CommandLine::new(
                &self.config.package_manager,
                &self.config.install_args,
                &target,
            );
            self.interface.info("Installing dependencies...");
            self.execute(&command)?;

            if self.config.pin_versions {
                let pinned = resolver::pin_versions(&target)?;
                self.interface
                    .info(format!("Pinned {} dependency versions.", pinned.len()));
            }
        }

        self.interface.success(format!(
            "Successfully created the \"{}\" app!",
            invocation.app_name
        ));

        Ok(target)
    }

    fn execute(&mut self, command: &CommandLine) -> Result<(), ScaffoldError> {
        self.interface.command(command.to_string());
        run_checked(&mut self.runner, command)
    }
}

/// Names the project and seeds its dependencies; the lockfile only gets the name.
fn write_manifests(target: &Path, app_name: &str, plan: &Plan) -> Result<(), ScaffoldError> {
    let mut manifest = Manifest::read(target.join(PACKAGE_JSON))?;
    manifest.set_name(app_name);
    manifest.reset_dependencies(BASE_DEPENDENCIES);
    for (name, version) in &plan.dependencies {
        manifest.add_dependency(name, version);
    }
    manifest.save()?;

    let lock_path = target.join(PACKAGE_LOCK_JSON);
    if lock_path.is_file() {
        let mut lock = Manifest::read(&lock_path)?;
        lock.set_name(app_name);
        lock.save()?;
    }

    Ok(())
}
