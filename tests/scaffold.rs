use std::{collections::BTreeMap, fs, path::Path};

use react_scaffold::{
    manifest::{Manifest, PACKAGE_JSON},
    patch::BOOTSTRAP_IMPORT,
    runner::CommandLine,
    template::TemplateSource,
    Config, Interface, Invocation, Runner, Scaffold, ScaffoldError,
};
use tempfile::TempDir;

/// Pretends to install: writes `node_modules/<pkg>/package.json` for every
/// dependency and exits with `exit_code`.
struct FakeInstaller {
    exit_code: i32,
    installed_version: &'static str,
    commands: Vec<String>,
}

impl FakeInstaller {
    fn succeeding() -> Self {
        Self {
            exit_code: 0,
            installed_version: "1.2.3",
            commands: Vec::new(),
        }
    }

    fn failing() -> Self {
        Self {
            exit_code: 1,
            ..Self::succeeding()
        }
    }
}

impl Runner for FakeInstaller {
    fn run(&mut self, command: &CommandLine) -> Result<Option<i32>, ScaffoldError> {
        self.commands.push(command.to_string());

        if command.program == "npm" && self.exit_code == 0 {
            let manifest = Manifest::read(command.dir.join(PACKAGE_JSON))?;
            for (name, _) in manifest.dependencies() {
                let dir = command.dir.join("node_modules").join(&name);
                fs::create_dir_all(&dir).unwrap();
                fs::write(
                    dir.join(PACKAGE_JSON),
                    format!(
                        r#"{{"name":"{}","version":"{}"}}"#,
                        name, self.installed_version
                    ),
                )
                .unwrap();
            }
        }

        Ok(Some(self.exit_code))
    }
}

fn scaffold(
    config: &Config,
    runner: &mut FakeInstaller,
    options: &[&str],
) -> Result<std::path::PathBuf, ScaffoldError> {
    let args: Vec<&str> = std::iter::once("my-app").chain(options.iter().copied()).collect();
    let invocation = Invocation::from_args(&args)?;
    let mut interface = Interface::silent();

    Scaffold::new(config, &mut interface, runner).run(&invocation)
}

fn config(root: &Path) -> Config {
    Config {
        destination_root: root.to_path_buf(),
        ..Config::default()
    }
}

fn dependencies(target: &Path) -> Vec<(String, String)> {
    Manifest::read(target.join(PACKAGE_JSON))
        .unwrap()
        .dependencies()
}

fn dep(name: &str, version: &str) -> (String, String) {
    (name.to_string(), version.to_string())
}

fn base() -> Vec<(String, String)> {
    vec![
        dep("react", "*"),
        dep("react-dom", "*"),
        dep("react-scripts", "*"),
    ]
}

#[test]
fn no_options_yields_the_base_set_and_no_patch() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(&config(root.path()), &mut runner, &[]).unwrap();

    let manifest = Manifest::read(target.join(PACKAGE_JSON)).unwrap();
    assert_eq!(manifest.name(), Some("my-app"));
    assert_eq!(manifest.dependencies(), base());

    let index = fs::read_to_string(target.join("src").join("index.js")).unwrap();
    assert!(!index.contains(BOOTSTRAP_IMPORT));
    assert!(target.join(".gitignore").is_file());
    assert_eq!(runner.commands, ["npm install"]);
}

#[test]
fn options_extend_the_base_set() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(
        &config(root.path()),
        &mut runner,
        &["-router", "-bootstrap", "axios@1.6.0", "-unknown"],
    )
    .unwrap();

    let mut expected = base();
    expected.extend([
        dep("react-router-dom", "*"),
        dep("bootstrap", "*"),
        dep("react-bootstrap", "*"),
        dep("axios", "1.6.0"),
        dep("-unknown", "*"),
    ]);
    assert_eq!(dependencies(&target), expected);
}

#[test]
fn later_tokens_override_earlier_ones() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(
        &config(root.path()),
        &mut runner,
        &["react@17.0.2", "bootstrap@4.6.0", "-bootstrap"],
    )
    .unwrap();

    let mut expected = base();
    expected[0] = dep("react", "17.0.2");
    expected.extend([dep("bootstrap", "*"), dep("react-bootstrap", "*")]);
    assert_eq!(dependencies(&target), expected);
}

#[test]
fn dependency_set_does_not_depend_on_token_order() {
    let tokens = ["-router", "axios@1.6.0", "-bootstrap", "@types/node@20", "lodash"];
    let mut reversed = tokens;
    reversed.reverse();

    let mut sets = Vec::new();
    for order in [&tokens[..], &reversed[..]] {
        let root = TempDir::new().unwrap();
        let mut runner = FakeInstaller::succeeding();
        let target = scaffold(&config(root.path()), &mut runner, order).unwrap();
        sets.push(dependencies(&target).into_iter().collect::<BTreeMap<_, _>>());
    }

    assert_eq!(sets[0], sets[1]);
    assert_eq!(sets[0].len(), 9);
    assert_eq!(sets[0]["@types/node"], "20");
}

#[test]
fn bootstrap_patches_after_the_last_import() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(&config(root.path()), &mut runner, &["-bootstrap"]).unwrap();

    let index = fs::read_to_string(target.join("src").join("index.js")).unwrap();
    let lines: Vec<_> = index.lines().collect();
    assert_eq!(lines[3], "import App from './App';");
    assert_eq!(lines[4], BOOTSTRAP_IMPORT);
    assert_eq!(index.matches(BOOTSTRAP_IMPORT).count(), 1);
    assert_eq!(runner.commands, ["npm install"]);
}

#[test]
fn fer_patches_and_initializes_git() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(&config(root.path()), &mut runner, &["-fer"]).unwrap();

    let index = fs::read_to_string(target.join("src").join("index.js")).unwrap();
    assert!(index.contains(BOOTSTRAP_IMPORT));
    assert_eq!(runner.commands, ["git init", "npm install"]);
}

#[test]
fn install_failure_keeps_the_mutated_manifest() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::failing();

    let result = scaffold(&config(root.path()), &mut runner, &["-router"]);

    assert!(matches!(
        result,
        Err(ScaffoldError::SubprocessFailure { code: Some(1), .. })
    ));

    let target = root.path().join("my-app");
    let manifest = Manifest::read(target.join(PACKAGE_JSON)).unwrap();
    assert_eq!(manifest.name(), Some("my-app"));
    let mut expected = base();
    expected.push(dep("react-router-dom", "*"));
    assert_eq!(manifest.dependencies(), expected);
}

#[test]
fn pin_versions_replaces_wildcards_after_install() {
    let root = TempDir::new().unwrap();
    let mut runner = FakeInstaller::succeeding();
    let config = Config {
        pin_versions: true,
        ..config(root.path())
    };

    let target = scaffold(&config, &mut runner, &["axios@1.6.0"]).unwrap();

    let mut expected: Vec<_> = base()
        .into_iter()
        .map(|(name, _)| (name, "1.2.3".to_string()))
        .collect();
    expected.push(dep("axios", "1.6.0"));
    assert_eq!(dependencies(&target), expected);
}

#[test]
fn existing_destination_is_overwritten() {
    let root = TempDir::new().unwrap();
    let target = root.path().join("my-app");
    fs::create_dir_all(target.join("src")).unwrap();
    fs::write(target.join(PACKAGE_JSON), r#"{"name":"old"}"#).unwrap();
    fs::write(target.join("notes.md"), "keep me").unwrap();
    let mut runner = FakeInstaller::succeeding();

    scaffold(&config(root.path()), &mut runner, &[]).unwrap();

    assert_eq!(dependencies(&target), base());
    assert_eq!(fs::read_to_string(target.join("notes.md")).unwrap(), "keep me");
}

#[test]
fn custom_template_without_lockfile() {
    let root = TempDir::new().unwrap();
    let template = TempDir::new().unwrap();
    fs::create_dir_all(template.path().join("src")).unwrap();
    fs::write(
        template.path().join(PACKAGE_JSON),
        r#"{"name":"tpl","dependencies":{"vue":"3"}}"#,
    )
    .unwrap();
    fs::write(template.path().join("gitignore.txt"), "dist\n").unwrap();
    fs::write(template.path().join("src").join("index.js"), "render();\n").unwrap();

    let config = Config {
        template: TemplateSource::Directory(template.path().to_path_buf()),
        ..config(root.path())
    };
    let mut runner = FakeInstaller::succeeding();

    let target = scaffold(&config, &mut runner, &["-bootstrap"]).unwrap();

    assert!(!target.join("package-lock.json").exists());
    assert!(!dependencies(&target).iter().any(|(name, _)| name == "vue"));
    assert_eq!(
        fs::read_to_string(target.join("src").join("index.js")).unwrap(),
        format!("{}\nrender();\n", BOOTSTRAP_IMPORT)
    );
}

#[test]
fn invalid_template_manifest_is_a_parse_error() {
    let root = TempDir::new().unwrap();
    let template = TempDir::new().unwrap();
    fs::write(template.path().join(PACKAGE_JSON), "{").unwrap();
    fs::write(template.path().join("gitignore.txt"), "").unwrap();

    let config = Config {
        template: TemplateSource::Directory(template.path().to_path_buf()),
        ..config(root.path())
    };
    let mut runner = FakeInstaller::succeeding();

    assert!(matches!(
        scaffold(&config, &mut runner, &[]),
        Err(ScaffoldError::ManifestParse { .. })
    ));
    assert!(runner.commands.is_empty());
}
