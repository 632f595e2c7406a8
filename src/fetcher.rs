//! External boilerplate fetching.
//! Clones a client boilerplate at a pinned tag into the project, drops the files
//! the generator replaces, and strips the boilerplate's own git history.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use log::{debug, info, warn};

use crate::constants::{
    ANGULAR_STARTER_TAG, ANGULAR_STARTER_URL, CLIENT_DIR, REACT_BOILERPLATE_TAG,
    REACT_BOILERPLATE_URL, VCS_METADATA_DIR,
};
use crate::error::{Error, Result};

/// A third-party file tree pinned at an exact tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalSource {
    pub name: &'static str,
    pub repository: String,
    /// Tag checked out after cloning. Never a moving branch.
    pub reference: String,
    /// Directory, relative to the project root, receiving the clone.
    pub target: PathBuf,
    /// Files, relative to `target`, removed right after cloning.
    pub removals: Vec<PathBuf>,
}

impl ExternalSource {
    pub fn react_boilerplate() -> Self {
        Self {
            name: "react-boilerplate",
            repository: REACT_BOILERPLATE_URL.to_string(),
            reference: REACT_BOILERPLATE_TAG.to_string(),
            target: PathBuf::from(CLIENT_DIR),
            removals: vec![
                PathBuf::from("internals/webpack/webpack.base.babel.js"),
                PathBuf::from(".nginx.conf"),
            ],
        }
    }

    pub fn angular_starter() -> Self {
        Self {
            name: "angular-starter",
            repository: ANGULAR_STARTER_URL.to_string(),
            reference: ANGULAR_STARTER_TAG.to_string(),
            target: PathBuf::from(CLIENT_DIR),
            removals: Vec::new(),
        }
    }
}

/// Clones a repository and checks out a given reference.
pub trait Cloner {
    /// Clones `url` into `dest` and checks out `reference`.
    fn clone_at(&self, url: &str, reference: &str, dest: &Path) -> Result<()>;
}

/// Cloner backed by libgit2.
#[derive(Debug, Default)]
pub struct GitCloner;

impl GitCloner {
    pub fn new() -> Self {
        Self
    }
}

impl Cloner for GitCloner {
    fn clone_at(&self, url: &str, reference: &str, dest: &Path) -> Result<()> {
        debug!("Cloning '{}' to '{}'.", url, dest.display());
        let repo = RepoBuilder::new().clone(url, dest)?;

        let (object, _) = repo.revparse_ext(reference)?;
        let commit = object.peel_to_commit()?;
        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        repo.set_head_detached(commit.id())?;

        debug!("Checked out '{}' at {}.", reference, commit.id());
        Ok(())
    }
}

/// Removes a file, or a directory and everything below it.
pub fn remove_path(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn fetch_error(source: &ExternalSource, cause: impl ToString) -> Error {
    Error::FetchError {
        source_name: source.name.to_string(),
        reference: source.reference.clone(),
        cause: cause.to_string(),
    }
}

/// Populates client subtrees of the project rooted at `root`.
pub struct Fetcher<'a> {
    cloner: &'a dyn Cloner,
    root: &'a Path,
}

impl<'a> Fetcher<'a> {
    pub fn new(cloner: &'a dyn Cloner, root: &'a Path) -> Self {
        Self { cloner, root }
    }

    /// Clones `source` and removes the files it conflicts on.
    ///
    /// A listed file that is already absent only produces a warning.
    ///
    /// # Errors
    /// * `Error::FetchError` if the clone fails or a listed file cannot be removed
    pub fn fetch(&self, source: &ExternalSource) -> Result<()> {
        info!("Cloning {} {}", source.name, source.reference);
        let target = self.root.join(&source.target);

        self.cloner
            .clone_at(&source.repository, &source.reference, &target)
            .map_err(|e| fetch_error(source, e))?;

        for removal in &source.removals {
            debug!("Removing '{}' from {}.", removal.display(), source.name);
            match remove_path(&target.join(removal)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    warn!(
                        "'{}' is not part of {}, nothing to remove.",
                        removal.display(),
                        source.name
                    );
                }
                Err(e) => return Err(fetch_error(source, format!("{}: {e}", removal.display()))),
            }
        }
        Ok(())
    }

    /// Removes the boilerplate's git metadata so the project starts without its history.
    pub fn strip_history(&self, source: &ExternalSource) -> Result<()> {
        let metadata = self.root.join(&source.target).join(VCS_METADATA_DIR);
        if !metadata.exists() {
            return Ok(());
        }
        info!("Removing {} git history", source.name);
        remove_path(&metadata).map_err(|e| fetch_error(source, e))
    }
}
