//! File-level rendering of template groups.
//! Reads templates from the template root, renders or copies them, and writes the
//! results under the output root.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::manifest::{EntryKind, TemplateEntry, TemplateGroup};
use crate::renderer::TemplateRenderer;

/// Ensures the output directory is safe to write to. It is created by the first write.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

fn render_error<P: AsRef<Path>>(path: P, reason: impl ToString) -> Error {
    Error::RenderError { path: path.as_ref().display().to_string(), reason: reason.to_string() }
}

fn write_file(content: &str, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(|e| render_error(dest_path, e))?;
    }
    fs::write(dest_path, content).map_err(|e| render_error(dest_path, e))
}

fn copy_file(source_path: &Path, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).map_err(|e| render_error(dest_path, e))?;
    }
    fs::copy(source_path, dest_path).map(|_| ()).map_err(|e| render_error(dest_path, e))
}

/// Renders template entries against one configuration context.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    context: &'a serde_json::Value,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        context: &'a serde_json::Value,
    ) -> Self {
        Self { engine, template_root, output_root, context }
    }

    /// Renders every entry of `group`.
    ///
    /// Entries write disjoint destinations, so they are processed on scoped
    /// threads. The call returns only once every entry has settled; the first
    /// failure in declaration order is returned.
    pub fn render_group(&self, group: &TemplateGroup) -> Result<()> {
        debug!("Rendering {group}.");

        let results: Vec<Result<()>> = std::thread::scope(|scope| {
            let handles: Vec<_> = group
                .entries
                .iter()
                .map(|entry| (entry, scope.spawn(move || self.process(entry))))
                .collect();

            handles
                .into_iter()
                .map(|(entry, handle)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(render_error(&entry.source, "rendering panicked")))
                })
                .collect()
        });

        results.into_iter().collect()
    }

    /// Renders or copies a single entry.
    pub fn process(&self, entry: &TemplateEntry) -> Result<()> {
        let source = self.template_root.join(&entry.source);
        let destination = self.output_root.join(&entry.destination);

        if !source.exists() {
            return Err(render_error(&entry.source, "template does not exist"));
        }

        match entry.kind {
            EntryKind::Render => self.render_file(&source, &destination),
            EntryKind::CopyDir => copy_dir(&source, &destination),
        }
    }

    fn render_file(&self, source: &Path, destination: &Path) -> Result<()> {
        debug!("Writing file: {}", destination.display());
        let content = fs::read_to_string(source).map_err(|e| render_error(source, e))?;
        let rendered = self
            .engine
            .render(&content, self.context)
            .map_err(|e| render_error(source, e))?;
        write_file(&rendered, destination)
    }
}

/// Copies `source` recursively into `destination` without substitution.
pub fn copy_dir(source: &Path, destination: &Path) -> Result<()> {
    debug!("Copying directory: {}", destination.display());
    for dir_entry in WalkDir::new(source).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(|e| render_error(source, e))?;
        let relative = dir_entry.path().strip_prefix(source).map_err(|e| render_error(source, e))?;
        let target = destination.join(relative);

        if dir_entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| render_error(&target, e))?;
        } else {
            copy_file(dir_entry.path(), &target)?;
        }
    }
    Ok(())
}
