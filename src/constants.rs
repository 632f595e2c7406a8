//! Common constants used throughout the kickoff application.

/// Default value of both database password answers.
pub const DEFAULT_DATABASE_PASSWORD: &str = "pleaseChangeMe";

/// Client framework proposed first by the prompt.
pub const DEFAULT_CLIENT: &str = "react";

/// Vagrant box proposed first by the prompt.
pub const DEFAULT_VAGRANT_OS: &str = "xenial";

/// Subdirectory of the generated project that receives the client boilerplate.
pub const CLIENT_DIR: &str = "client";

/// Packaging-safe name of the gitignore template output.
pub const GITIGNORE_TEMPLATE: &str = "gitignore";

/// Name version control tooling expects for the ignore file.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Version control metadata directory stripped from cloned boilerplates.
pub const VCS_METADATA_DIR: &str = ".git";

pub const REACT_BOILERPLATE_URL: &str =
    "https://github.com/react-boilerplate/react-boilerplate.git";
pub const REACT_BOILERPLATE_TAG: &str = "v3.4.0";

pub const ANGULAR_STARTER_URL: &str = "https://github.com/AngularClass/angular-starter.git";
pub const ANGULAR_STARTER_TAG: &str = "v5.2.0";

/// Message printed once the whole run went through.
pub const SUCCESS_MESSAGE: &str = "Everything went well, enjoy your new app!";
