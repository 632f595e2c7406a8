//! Post-generation housekeeping.
//! Runs once the pipeline reached `Done`: restores the `.gitignore` name and
//! builds the client inside its own directory. Nothing here can fail the run.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::commands::{CommandRunner, Invocation};
use crate::constants::{CLIENT_DIR, GITIGNORE_FILE, GITIGNORE_TEMPLATE};
use crate::error::Error;
use crate::pipeline::RunReport;

/// What post-processing did, including the steps that failed.
#[derive(Debug, Default)]
pub struct FinalizationReport {
    pub renamed_gitignore: bool,
    /// Directory the client commands ran in, if a client was selected.
    pub client_root: Option<PathBuf>,
    pub commands_run: Vec<Invocation>,
    /// `Error::FinalizationError` for every step that failed.
    pub failures: Vec<Error>,
}

impl FinalizationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn finalization_error(command: impl ToString, err: Error) -> Error {
    let reason = match err {
        Error::CommandError { reason, .. } => reason,
        other => other.to_string(),
    };
    Error::FinalizationError { command: command.to_string(), reason }
}

pub struct PostProcessor<'a> {
    commands: &'a dyn CommandRunner,
    root: &'a Path,
}

impl<'a> PostProcessor<'a> {
    /// `root` is the generated project; client commands run relative to it.
    pub fn new(commands: &'a dyn CommandRunner, root: &'a Path) -> Self {
        Self { commands, root }
    }

    /// Finalizes the project described by `report`.
    ///
    /// Client build steps run in order and stop at the first failure, since
    /// each one expects the previous to have succeeded.
    pub fn finalize(&self, report: &RunReport) -> FinalizationReport {
        let mut outcome = FinalizationReport::default();

        // A dot-prefixed ignore file inside templates/ would be picked up by packaging
        // and filter the template tree itself, so it ships without the dot.
        let from = self.root.join(GITIGNORE_TEMPLATE);
        let to = self.root.join(GITIGNORE_FILE);
        match fs::rename(&from, &to) {
            Ok(()) => outcome.renamed_gitignore = true,
            Err(e) => {
                let err = finalization_error(
                    format!("rename {GITIGNORE_TEMPLATE} to {GITIGNORE_FILE}"),
                    Error::IoError(e),
                );
                warn!("{err}");
                outcome.failures.push(err);
            }
        }

        if !report.composition.client.is_selected() {
            return outcome;
        }

        let client_root = self.root.join(CLIENT_DIR);
        info!("Building the {} client", report.composition.client);
        for step in &report.composition.build_steps {
            if let Err(e) = self.commands.run(step, &client_root) {
                let err = finalization_error(step, e);
                warn!("{err}");
                outcome.failures.push(err);
                break;
            }
            outcome.commands_run.push(step.clone());
        }
        outcome.client_root = Some(client_root);

        outcome
    }
}
