//! User input and interaction handling.
//! Declares the questions asked at the start of a run and the prompter that asks them.

use dialoguer::{Input, Select};

use crate::config::{
    Client, VagrantOs, APP_NAME, CLIENT, PROD_DATABASE_PASSWORD, PROD_IP_ADDRESS,
    REPOSITORY_URL, STAGING_DATABASE_PASSWORD, STAGING_IP_ADDRESS, VAGRANT_OS,
};
use crate::constants::{DEFAULT_CLIENT, DEFAULT_DATABASE_PASSWORD, DEFAULT_VAGRANT_OS};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    /// Free text with a default proposed to the user.
    Text { default: &'static str },
    /// One value out of a fixed list.
    SingleChoice { choices: &'static [&'static str], default: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub help: &'static str,
    pub kind: QuestionKind,
}

impl Question {
    fn text(key: &'static str, help: &'static str, default: &'static str) -> Self {
        Self { key, help, kind: QuestionKind::Text { default } }
    }

    fn choice(
        key: &'static str,
        help: &'static str,
        choices: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self { key, help, kind: QuestionKind::SingleChoice { choices, default } }
    }
}

/// Questions asked at the start of a run, in order.
pub fn questions() -> Vec<Question> {
    vec![
        Question::text(APP_NAME, "Your application name", ""),
        Question::choice(CLIENT, "Choose your client", &Client::CHOICES, DEFAULT_CLIENT),
        Question::text(
            STAGING_DATABASE_PASSWORD,
            "Your staging database password",
            DEFAULT_DATABASE_PASSWORD,
        ),
        Question::text(
            PROD_DATABASE_PASSWORD,
            "Your production database password",
            DEFAULT_DATABASE_PASSWORD,
        ),
        Question::text(
            REPOSITORY_URL,
            "Your git repository URL (used for deployment script)",
            "",
        ),
        Question::text(STAGING_IP_ADDRESS, "Your staging IP address", ""),
        Question::text(PROD_IP_ADDRESS, "[Optional] Your production IP address", ""),
        Question::choice(
            VAGRANT_OS,
            "Choose your Vagrant OS",
            &VagrantOs::CHOICES,
            DEFAULT_VAGRANT_OS,
        ),
    ]
}

/// Asks the user for answers.
pub trait Prompter {
    /// Asks for free text, proposing `default`.
    fn text(&self, help: &str, default: &str) -> Result<String>;

    /// Asks to pick one of `choices`, preselecting index `default`.
    fn select(&self, help: &str, choices: &[&str], default: usize) -> Result<String>;

    /// Asks `question` with the prompt matching its kind.
    fn answer(&self, question: &Question) -> Result<serde_json::Value> {
        let value = match &question.kind {
            QuestionKind::Text { default } => self.text(question.help, default)?,
            QuestionKind::SingleChoice { choices, default } => {
                let index = choices.iter().position(|choice| choice == default).unwrap_or(0);
                self.select(question.help, choices, index)?
            }
        };
        Ok(serde_json::Value::String(value))
    }
}

/// Terminal prompter built on dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, help: &str, default: &str) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(help).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, help: &str, choices: &[&str], default: usize) -> Result<String> {
        let selection = Select::new()
            .with_prompt(help)
            .items(choices)
            .default(default)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))?;

        Ok(choices[selection].to_string())
    }
}
