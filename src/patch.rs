//! Textual import injection.
//!
//! Import statements are found with a line-anchored pattern, not a parser:
//! `import` text inside comments or string literals at the start of a line is
//! matched as well. Injection is not idempotent; applying it twice inserts
//! the line twice.

use std::{fs, path::Path, sync::OnceLock};

use regex::Regex;

use crate::error::ScaffoldError;

/// Stylesheet import added by the CSS framework options.
pub const BOOTSTRAP_IMPORT: &str = "import 'bootstrap/dist/css/bootstrap.min.css';";

fn import_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^import\b[^\n]*;").expect("import pattern is a valid regex")
    })
}

/// Inserts `line` right after the last import statement of `source`, or
/// prepends it when there is none.
pub fn inject_import(source: &str, line: &str) -> String {
    match import_pattern().find_iter(source).last() {
        Some(last) => {
            let end = last.end();
            let mut output = String::with_capacity(source.len() + line.len() + 1);
            output.push_str(&source[..end]);
            output.push('\n');
            output.push_str(line);
            output.push_str(&source[end..]);
            output
        }
        None => format!("{}\n{}", line, source),
    }
}

/// Applies [`inject_import`] to a file, replacing its contents.
pub fn inject_import_file<P: AsRef<Path>>(path: P, line: &str) -> Result<(), ScaffoldError> {
    let path = path.as_ref();
    let patch_error = |source| ScaffoldError::SourcePatch {
        path: path.to_path_buf(),
        source,
    };

    let source = fs::read_to_string(path).map_err(patch_error)?;
    let patched = inject_import(&source, line);
    fs::write(path, patched).map_err(patch_error)?;

    tracing::debug!(path = %path.display(), line, "injected import");

    Ok(())
}
