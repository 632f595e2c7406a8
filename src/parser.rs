//! Answer collection.
//! Answers may be preloaded from stdin or an answers file (JSON or YAML); any
//! question left unanswered is asked interactively.

use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Answers;
use crate::error::{Error, Result};
use crate::prompt::{questions, Prompter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    Stdin,
    File(PathBuf),
    None,
}

impl AnswerSource {
    pub fn new(take_from_stdin: bool, answers_file: Option<PathBuf>) -> Self {
        match (take_from_stdin, answers_file) {
            (true, _) => AnswerSource::Stdin,
            (false, Some(path)) => AnswerSource::File(path),
            (false, None) => AnswerSource::None,
        }
    }

    /// Whether questions without a preloaded answer are asked interactively.
    pub fn is_interactive(&self) -> bool {
        matches!(self, AnswerSource::None)
    }
}

/// Parses an answers document, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigurationError` if the document is neither, or not a mapping
pub fn parse_answers(content: &str) -> Result<Answers> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Answers::new());
    }
    match serde_json::from_str::<Answers>(content) {
        Ok(answers) => Ok(answers),
        Err(_) => serde_yaml::from_str::<Answers>(content)
            .map_err(|e| Error::ConfigurationError(format!("invalid answers: {e}"))),
    }
}

pub fn load_from_stdin() -> Result<Answers> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Answers> {
    let path = path.as_ref();
    debug!("Loading answers from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_answers(&content)
}

pub fn get_answers_from(source: &AnswerSource) -> Result<Answers> {
    match source {
        AnswerSource::Stdin => load_from_stdin(),
        AnswerSource::File(path) => load_from_file(path),
        AnswerSource::None => Ok(Answers::new()),
    }
}

/// Completes `preloaded` answers, prompting for the missing ones when `interactive`.
///
/// Preloaded answers are kept as given, so a non-interactive run leaves defaults
/// to the configuration resolver.
pub fn get_answers(
    prompt: &dyn Prompter,
    preloaded: Answers,
    interactive: bool,
) -> Result<Answers> {
    let mut answers = Answers::new();

    for question in questions() {
        if let Some(value) = preloaded.get(question.key) {
            answers.insert(question.key.to_string(), value.clone());
        } else if interactive {
            answers.insert(question.key.to_string(), prompt.answer(&question)?);
        }
    }

    for key in preloaded.keys().filter(|key| !answers.contains_key(*key)) {
        debug!("Ignoring unknown answer '{key}'.");
    }

    Ok(answers)
}
