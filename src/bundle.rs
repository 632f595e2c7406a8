//! Template root selection.
//! The project templates are compiled into the binary and staged on disk for a
//! run, unless a template directory is given on the command line.

use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use log::debug;
use tempfile::TempDir;

use crate::error::{Error, Result};

static BUNDLED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Where a run reads its templates from.
#[derive(Debug)]
pub enum TemplateRoot {
    /// A template directory supplied by the user.
    Directory(PathBuf),
    /// The bundled templates, extracted into a directory removed on drop.
    Bundled(TempDir),
}

impl TemplateRoot {
    /// Uses `dir` when given, the bundled templates otherwise.
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) => Self::directory(dir),
            None => Self::bundled(),
        }
    }

    /// # Errors
    /// * `Error::TemplateDoesNotExistsError` if `dir` is not a directory
    pub fn directory(dir: PathBuf) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: dir.display().to_string(),
            });
        }
        Ok(Self::Directory(dir))
    }

    /// Extracts the templates compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let staging = tempfile::Builder::new().prefix("kickoff-templates-").tempdir()?;
        BUNDLED_TEMPLATES.extract(staging.path())?;
        debug!("Bundled templates extracted to '{}'.", staging.path().display());
        Ok(Self::Bundled(staging))
    }

    pub fn path(&self) -> &Path {
        match self {
            TemplateRoot::Directory(dir) => dir,
            TemplateRoot::Bundled(staging) => staging.path(),
        }
    }
}
