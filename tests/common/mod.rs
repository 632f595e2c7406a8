#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use kickoff::commands::{CommandRunner, Invocation};
use kickoff::config::Answers;
use kickoff::error::{Error, Result};
use kickoff::fetcher::Cloner;

pub const ORIGINAL_WEBPACK: &str = "// webpack config shipped by the boilerplate\n";

pub fn bundled_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn answers(value: serde_json::Value) -> Answers {
    serde_json::from_value(value).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCall {
    pub url: String,
    pub reference: String,
    pub dest: PathBuf,
}

/// Cloner laying out a tiny boilerplate instead of talking to a remote.
#[derive(Default)]
pub struct FakeCloner {
    pub calls: RefCell<Vec<CloneCall>>,
    pub fail: bool,
}

impl FakeCloner {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<CloneCall> {
        self.calls.borrow().clone()
    }
}

impl Cloner for FakeCloner {
    fn clone_at(&self, url: &str, reference: &str, dest: &Path) -> Result<()> {
        self.calls.borrow_mut().push(CloneCall {
            url: url.to_string(),
            reference: reference.to_string(),
            dest: dest.to_path_buf(),
        });
        if self.fail {
            return Err(Error::Git2Error(git2::Error::from_str("remote unreachable")));
        }

        fs::create_dir_all(dest.join(".git")).unwrap();
        fs::write(dest.join(".git/HEAD"), "ref: refs/heads/master\n").unwrap();
        fs::create_dir_all(dest.join("internals/webpack")).unwrap();
        fs::write(dest.join("internals/webpack/webpack.base.babel.js"), ORIGINAL_WEBPACK).unwrap();
        fs::write(dest.join(".nginx.conf"), "server {}\n").unwrap();
        fs::write(dest.join("package.json"), "{}\n").unwrap();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub command: String,
    pub cwd: PathBuf,
}

/// Command runner recording invocations, optionally failing one of them.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<CommandCall>>,
    pub fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn failing_on(command: &str) -> Self {
        Self { fail_on: Some(command.to_string()), ..Self::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|call| call.command.clone()).collect()
    }

    pub fn calls(&self) -> Vec<CommandCall> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, cwd: &Path) -> Result<()> {
        let command = invocation.to_string();
        self.calls.borrow_mut().push(CommandCall { command: command.clone(), cwd: cwd.to_path_buf() });
        if self.fail_on.as_deref() == Some(command.as_str()) {
            return Err(Error::CommandError { command, reason: "exited with exit status: 1".into() });
        }
        Ok(())
    }
}
