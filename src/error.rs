//! Error handling for the kickoff application.
//! Defines the error taxonomy of a scaffolding run and the result alias used
//! throughout the crate.

use thiserror::Error;

/// Custom error types for kickoff operations.
///
/// Fatal errors (`ConfigurationError`, `RenderError`, `FetchError`, `CommandError`)
/// abort the pipeline at the phase where they happen. `FinalizationError` is only
/// ever reported by post-processing and never aborts a run.
#[derive(Error, Debug)]
pub enum Error {
    /// An answer could not be turned into a valid configuration record.
    #[error("Configuration error: {0}.")]
    ConfigurationError(String),

    /// A template could not be read, rendered or written.
    #[error("Failed to render '{path}': {reason}.")]
    RenderError { path: String, reason: String },

    /// Two active template groups write the same destination.
    #[error("Destination '{path}' is written by more than one template group.")]
    DuplicateDestinationError { path: String },

    /// An external boilerplate source could not be fetched.
    #[error("Failed to fetch {source_name} at '{reference}': {cause}.")]
    FetchError { source_name: String, reference: String, cause: String },

    /// An external command required by the pipeline failed.
    #[error("Command '{command}' failed: {reason}.")]
    CommandError { command: String, reason: String },

    /// A post-processing step failed. The project is already generated.
    #[error("Finalization step '{command}' failed: {reason}.")]
    FinalizationError { command: String, reason: String },

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Template engine error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),
}

/// Convenience type alias for Results with kickoff's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
