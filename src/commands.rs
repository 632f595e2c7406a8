//! External command execution.
//! Package manager installs and builds are opaque to the generator: they run to
//! completion and only their exit status matters.

use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { program: program.to_string(), args: args.into_iter().map(Into::into).collect() }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Runs `invocation` with `cwd` as working directory and waits for it to exit.
    ///
    /// # Errors
    /// * `Error::CommandError` if the program cannot be started or exits unsuccessfully
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<()>;
}

/// Runs commands as child processes sharing the terminal of the generator.
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<()> {
        debug!("Running '{}' in '{}'.", invocation, cwd.display());

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::CommandError {
                command: invocation.to_string(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(Error::CommandError {
                command: invocation.to_string(),
                reason: format!("exited with {status}"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::new("npm", ["run", "build:prod"]);
        assert_eq!(invocation.to_string(), "npm run build:prod");
    }
}
