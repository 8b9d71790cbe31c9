//! Copies the project template into the destination directory.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use include_dir::{include_dir, Dir, DirEntry};

use crate::error::ScaffoldError;

static EMBEDDED_TEMPLATE: Dir = include_dir!("$CARGO_MANIFEST_DIR/template");

/// Template file renamed to `.gitignore` after copying; a literal
/// `.gitignore` would be dropped when the template is packaged.
pub const GITIGNORE_SOURCE: &str = "gitignore.txt";
pub const GITIGNORE: &str = ".gitignore";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    #[default]
    Embedded,
    Directory(PathBuf),
}

/// Creates `destination` and copies the template into it, overwriting
/// existing files, then renames `gitignore.txt` to `.gitignore`.
pub fn materialize(source: &TemplateSource, destination: &Path) -> Result<(), ScaffoldError> {
    let copy_error = |source| ScaffoldError::TemplateCopy {
        destination: destination.to_path_buf(),
        source,
    };

    fs::create_dir_all(destination).map_err(copy_error)?;

    match source {
        TemplateSource::Embedded => {
            tracing::debug!(destination = %destination.display(), "extracting bundled template");
            write_embedded(&EMBEDDED_TEMPLATE, destination).map_err(copy_error)?;
        }
        TemplateSource::Directory(dir) => {
            tracing::debug!(
                template = %dir.display(),
                destination = %destination.display(),
                "copying template directory"
            );
            copy_dir_all(dir, destination).map_err(copy_error)?;
        }
    }

    fs::rename(
        destination.join(GITIGNORE_SOURCE),
        destination.join(GITIGNORE),
    )
    .map_err(copy_error)?;

    Ok(())
}

fn write_embedded(dir: &Dir<'_>, target: &Path) -> io::Result<()> {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => {
                fs::create_dir_all(target.join(sub.path()))?;
                write_embedded(sub, target)?;
            }
            DirEntry::File(file) => {
                let out_path = target.join(file.path());
                if let Some(parent) = out_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&out_path, file.contents())?;
            }
        }
    }
    Ok(())
}

fn copy_dir_all(from: &Path, to: &Path) -> io::Result<()> {
    if !from.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("template `{}` is not a directory", from.display()),
        ));
    }

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let from_path = entry.path();
        let to_path = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&to_path)?;
            copy_dir_all(&from_path, &to_path)?;
        } else {
            fs::copy(&from_path, &to_path)?;
        }
    }
    Ok(())
}
