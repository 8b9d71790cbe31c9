//! Option tokens and the table mapping feature flags to manifest mutations.

pub const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionToken {
    pub name: String,
    pub version: Option<String>,
}

impl OptionToken {
    /// Splits at the last `@` that is not the leading character, so scoped
    /// packages like `@types/node@20` keep their scope.
    pub fn parse(token: &str) -> Self {
        let split = token
            .char_indices()
            .skip(1)
            .filter(|&(_, c)| c == '@')
            .map(|(i, _)| i)
            .last();

        match split {
            Some(i) => {
                let version = &token[i + 1..];
                Self {
                    name: token[..i].to_string(),
                    version: (!version.is_empty()).then(|| version.to_string()),
                }
            }
            None => Self {
                name: token.to_string(),
                version: None,
            },
        }
    }

    pub fn version_or_wildcard(&self) -> &str {
        self.version.as_deref().unwrap_or(WILDCARD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub flag: &'static str,
    pub packages: &'static [&'static str],
    pub inject_stylesheet: bool,
    pub init_git: bool,
}

const BOOTSTRAP_PACKAGES: &[&str] = &["bootstrap", "react-bootstrap"];

pub const FEATURES: &[Feature] = &[
    Feature {
        flag: "-router",
        packages: &["react-router-dom"],
        inject_stylesheet: false,
        init_git: false,
    },
    Feature {
        flag: "-bootstrap",
        packages: BOOTSTRAP_PACKAGES,
        inject_stylesheet: true,
        init_git: false,
    },
    Feature {
        flag: "-fer",
        packages: BOOTSTRAP_PACKAGES,
        inject_stylesheet: true,
        init_git: true,
    },
    Feature {
        flag: "-git",
        packages: &[],
        inject_stylesheet: false,
        init_git: true,
    },
];

impl Feature {
    pub fn lookup(name: &str) -> Option<&'static Feature> {
        FEATURES.iter().find(|f| f.flag == name)
    }
}

/// Everything the option tokens ask for, folded in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Dependency additions in token order; later entries win on the same key.
    pub dependencies: Vec<(String, String)>,
    /// One per stylesheet-injecting token; repeats insert the import again.
    pub stylesheet_injections: usize,
    /// `git init` runs once however many tokens ask for it.
    pub init_git: bool,
}

impl Plan {
    pub fn from_options(options: &[OptionToken]) -> Self {
        let mut plan = Self::default();

        for option in options {
            match Feature::lookup(&option.name) {
                Some(feature) => {
                    if let Some(version) = &option.version {
                        tracing::warn!(
                            flag = feature.flag,
                            version = %version,
                            "version ignored on feature flag"
                        );
                    }

                    plan.dependencies.extend(
                        feature
                            .packages
                            .iter()
                            .map(|p| (p.to_string(), WILDCARD.to_string())),
                    );
                    if feature.inject_stylesheet {
                        plan.stylesheet_injections += 1;
                    }
                    plan.init_git |= feature.init_git;
                }
                None => plan.dependencies.push((
                    option.name.clone(),
                    option.version_or_wildcard().to_string(),
                )),
            }
        }

        plan
    }
}
