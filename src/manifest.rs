//! Declared template groups.
//! Every file the generator writes is listed here, together with the group it
//! belongs to, so what gets written and from where is plain data.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// How a template entry is turned into its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Substitute configuration values into the file.
    Render,
    /// Copy a whole directory as-is.
    CopyDir,
}

/// One source→destination mapping, both relative to their roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: EntryKind,
}

impl TemplateEntry {
    /// Renders `path` to the same relative path in the destination.
    pub fn render<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self { source: path.clone(), destination: path, kind: EntryKind::Render }
    }

    /// Copies the directory `path` to the same relative path in the destination.
    pub fn copy_dir<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self { source: path.clone(), destination: path, kind: EntryKind::CopyDir }
    }
}

/// A named, ordered set of entries rendered together as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGroup {
    pub name: &'static str,
    pub entries: Vec<TemplateEntry>,
}

impl TemplateGroup {
    pub fn new(name: &'static str, entries: Vec<TemplateEntry>) -> Self {
        Self { name, entries }
    }

    fn from_paths(name: &'static str, paths: &[&str]) -> Self {
        Self::new(name, paths.iter().map(TemplateEntry::render).collect())
    }

    /// Returns a copy of the group with extra entries appended.
    pub fn with_entries<I: IntoIterator<Item = TemplateEntry>>(mut self, extra: I) -> Self {
        self.entries.extend(extra);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for TemplateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} entries)", self.name, self.entries.len())
    }
}

/// Installation guide shipped in `doc/`, one per client flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallationDoc {
    React,
    Angular,
    NoClient,
}

impl InstallationDoc {
    pub fn path(&self) -> &'static str {
        match self {
            InstallationDoc::React => "doc/installation-react.md",
            InstallationDoc::Angular => "doc/installation-angular.md",
            InstallationDoc::NoClient => "doc/installation-no-client.md",
        }
    }

    pub fn entry(&self) -> TemplateEntry {
        TemplateEntry::render(self.path())
    }
}

pub fn configuration_files() -> TemplateGroup {
    TemplateGroup::from_paths(
        "configuration files",
        &[
            "gitignore",
            ".yo-rc.json",
            ".editorconfig",
            ".eslintignore",
            "ansible.cfg",
            "database.json",
            "package.json",
            "yarn.lock",
            "pm2.yml",
            "README.md",
            "doc/deployment.md",
            "doc/provisioning.md",
            "doc/tests.md",
            "shipitfile.js",
            "Vagrantfile",
        ],
    )
}

pub fn server_files() -> TemplateGroup {
    TemplateGroup::from_paths(
        "server files",
        &[
            "server/.eslintrc",
            "server/component-config.json",
            "server/config.json",
            "server/datasources.json",
            "server/datasources.local.js",
            "server/middleware.development.json",
            "server/middleware.json",
            "server/model-config.json",
            "server/server.js",
            "server/models/user.js",
            "server/models/user.json",
            "server/boot/authentication.js",
            "server/boot/create-admin.js",
            "tests/test.js",
        ],
    )
}

pub fn provisioning_files() -> TemplateGroup {
    TemplateGroup::new(
        "provisioning files",
        vec![TemplateEntry::copy_dir("devops/provisioning/roles")],
    )
    .with_entries(
        [
            "devops/provisioning/group_vars/prod",
            "devops/provisioning/group_vars/staging",
            "devops/provisioning/group_vars/vagrant",
            "devops/provisioning/hosts/prod",
            "devops/provisioning/hosts/staging",
            "devops/provisioning/hosts/vagrant",
            "devops/provisioning/vars/main.yml",
            "devops/provisioning/playbook.yml",
        ]
        .iter()
        .map(TemplateEntry::render),
    )
}

pub fn migration_files() -> TemplateGroup {
    TemplateGroup::from_paths(
        "migration files",
        &[
            "migrations/20161206103004-create-user.js",
            "migrations/sqls/20161206103004-create-user-up.sql",
            "migrations/sqls/20161206103004-create-user-down.sql",
        ],
    )
}

/// Files rendered over the react boilerplate once it is cloned.
pub fn react_client_files() -> TemplateGroup {
    TemplateGroup::from_paths(
        "react client files",
        &["client/internals/webpack/webpack.base.babel.js"],
    )
}

/// Fails if two groups write the same destination.
///
/// Directory entries claim their whole subtree, so a file rendered inside a
/// copied directory is reported as well.
pub fn ensure_unique_destinations(groups: &[&TemplateGroup]) -> Result<()> {
    let mut seen: HashSet<&Path> = HashSet::new();
    let mut directories: Vec<&Path> = Vec::new();

    for entry in groups.iter().flat_map(|group| group.entries.iter()) {
        let destination = entry.destination.as_path();
        let overlaps_directory = directories.iter().any(|dir| destination.starts_with(dir))
            || (entry.kind == EntryKind::CopyDir
                && seen.iter().any(|path| path.starts_with(destination)));
        if overlaps_directory || !seen.insert(destination) {
            return Err(Error::DuplicateDestinationError {
                path: destination.display().to_string(),
            });
        }
        if entry.kind == EntryKind::CopyDir {
            directories.push(destination);
        }
    }
    Ok(())
}
