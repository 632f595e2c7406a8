//! kickoff scaffolds a LoopBack API server with an optional React or Angular client,
//! provisioning, deployment and migration files. It renders a fixed set of bundled
//! templates against the user's answers, clones the client boilerplate at a pinned
//! tag, then installs dependencies and builds the client.

/// Command-line interface module for the kickoff application
pub mod cli;

/// Run-wide error taxonomy
pub mod error;

/// Common constants: defaults, pinned boilerplate sources, file names
pub mod constants;

/// Logger setup
pub mod logger;

/// Resolution of raw answers into the immutable configuration record
pub mod config;

/// Questions and interactive prompting
pub mod prompt;

/// Preloaded answers (stdin, answers file) and answer collection
pub mod parser;

/// Bundled templates and template root selection
pub mod bundle;

/// Declared template groups
pub mod manifest;

/// Template rendering engine
pub mod renderer;

/// File-level rendering and copying of template groups
pub mod processor;

/// Client framework composition
pub mod composer;

/// External boilerplate cloning and cleanup
pub mod fetcher;

/// External command execution
pub mod commands;

/// Ordered scaffolding phases and their state machine
pub mod pipeline;

/// Post-generation housekeeping
pub mod postprocess;
