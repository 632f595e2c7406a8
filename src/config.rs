//! Configuration resolution for a scaffolding run.
//! Turns the raw answer map produced by the prompt (or read from stdin / an answers
//! file) into the immutable [`ConfigurationRecord`] every later component reads.

use std::fmt;
use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Serialize;
use url::{Host, Url};

use crate::constants::{DEFAULT_CLIENT, DEFAULT_DATABASE_PASSWORD, DEFAULT_VAGRANT_OS};
use crate::error::{Error, Result};

/// Raw answers keyed by question name, in the order they were asked.
pub type Answers = IndexMap<String, serde_json::Value>;

pub const APP_NAME: &str = "appName";
pub const CLIENT: &str = "client";
pub const STAGING_DATABASE_PASSWORD: &str = "stagingDatabasePassword";
pub const PROD_DATABASE_PASSWORD: &str = "prodDatabasePassword";
pub const REPOSITORY_URL: &str = "repositoryUrl";
pub const STAGING_IP_ADDRESS: &str = "stagingIpAddress";
pub const PROD_IP_ADDRESS: &str = "prodIpAddress";
pub const VAGRANT_OS: &str = "vagrantOs";

/// Characters that would break the quoted strings the name is rendered into.
const APP_NAME_FORBIDDEN: &str = r#"["'\\\p{Cc}]"#;

/// Client framework bundled next to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Client {
    #[serde(rename = "react")]
    React,
    #[serde(rename = "angular4")]
    Angular4,
    #[serde(rename = "none")]
    None,
}

impl Client {
    pub const CHOICES: [&'static str; 3] = ["react", "angular4", "none"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Client::React => "react",
            Client::Angular4 => "angular4",
            Client::None => "none",
        }
    }

    /// Whether a client boilerplate gets installed at all.
    pub fn is_selected(&self) -> bool {
        !matches!(self, Client::None)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Client {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "react" => Ok(Client::React),
            "angular4" => Ok(Client::Angular4),
            "none" => Ok(Client::None),
            other => Err(Error::ConfigurationError(format!(
                "unknown client '{other}' (expected one of: {})",
                Client::CHOICES.join(", ")
            ))),
        }
    }
}

/// Ubuntu release used by the Vagrant box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VagrantOs {
    Xenial,
    Trusty,
}

impl VagrantOs {
    pub const CHOICES: [&'static str; 2] = ["xenial", "trusty"];

    pub fn as_str(&self) -> &'static str {
        match self {
            VagrantOs::Xenial => "xenial",
            VagrantOs::Trusty => "trusty",
        }
    }
}

impl fmt::Display for VagrantOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VagrantOs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xenial" => Ok(VagrantOs::Xenial),
            "trusty" => Ok(VagrantOs::Trusty),
            other => Err(Error::ConfigurationError(format!(
                "unknown vagrant OS '{other}' (expected one of: {})",
                VagrantOs::CHOICES.join(", ")
            ))),
        }
    }
}

/// Fully resolved configuration of one run.
///
/// Only [`resolve`] builds it, so the derived fields always agree with the
/// answers they are computed from. It serializes (camelCase) into the template
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRecord {
    app_name: String,
    client: Client,
    staging_database_password: String,
    prod_database_password: String,
    repository_url: String,
    staging_ip_address: String,
    prod_ip_address: String,
    vagrant_os: VagrantOs,
    client_public_directory: String,
    app_slug: String,
    database_name: String,
}

impl ConfigurationRecord {
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn client(&self) -> Client {
        self.client
    }

    pub fn staging_database_password(&self) -> &str {
        &self.staging_database_password
    }

    pub fn prod_database_password(&self) -> &str {
        &self.prod_database_password
    }

    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    pub fn staging_ip_address(&self) -> &str {
        &self.staging_ip_address
    }

    pub fn prod_ip_address(&self) -> &str {
        &self.prod_ip_address
    }

    pub fn vagrant_os(&self) -> VagrantOs {
        self.vagrant_os
    }

    /// Directory the server serves the built client from.
    pub fn client_public_directory(&self) -> &str {
        &self.client_public_directory
    }

    /// Kebab-case application name, used as the npm package name.
    pub fn app_slug(&self) -> &str {
        &self.app_slug
    }

    /// Snake-case application name, used as the PostgreSQL database name.
    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Template context handed to the renderer.
    pub fn to_context(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| Error::ConfigurationError(e.to_string()))
    }
}

/// Output directory of the client build for a given framework.
pub fn client_public_directory(client: Client) -> &'static str {
    match client {
        Client::React => "client/build",
        Client::Angular4 | Client::None => "client/dist",
    }
}

/// Returns the answer for `key`, treating absent, null and blank answers alike.
fn answer<'a>(answers: &'a Answers, key: &str) -> Result<Option<&'a str>> {
    match answers.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(Error::ConfigurationError(format!(
            "answer '{key}' must be a string, got {other}"
        ))),
    }
}

fn answer_or(answers: &Answers, key: &str, default: &str) -> Result<String> {
    Ok(answer(answers, key)?.unwrap_or(default).to_string())
}

fn validate_app_name(app_name: &str) -> Result<()> {
    let forbidden =
        Regex::new(APP_NAME_FORBIDDEN).map_err(|e| Error::ConfigurationError(e.to_string()))?;
    if forbidden.is_match(app_name) {
        return Err(Error::ConfigurationError(format!(
            "invalid application name '{app_name}' (quotes, backslashes and control characters are not allowed)"
        )));
    }
    if !app_name.chars().any(char::is_alphanumeric) {
        return Err(Error::ConfigurationError(format!(
            "invalid application name '{app_name}' (needs at least one letter or digit)"
        )));
    }
    Ok(())
}

/// Accepts the remote forms git understands: URLs, scp-like `user@host:path`
/// and local paths.
pub fn is_repository_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) if url.scheme() == "file" => return true,
        Ok(url) if matches!(url.scheme(), "https" | "http" | "ssh" | "git") => {
            return url.has_host()
        }
        Ok(_) if s.contains("://") => return false,
        _ => {}
    }
    if let Some((host, path)) = s.split_once(':') {
        if !host.is_empty() && !path.is_empty() && !host.contains('/') {
            return true;
        }
    }
    Path::new(s).is_absolute() || s.starts_with("./") || s.starts_with("../")
}

/// Accepts an IP address or a DNS host name.
pub fn is_deployment_host(s: &str) -> bool {
    s.parse::<IpAddr>().is_ok() || Host::parse(s).is_ok()
}

fn validate_deployment_host(key: &str, value: &str) -> Result<()> {
    if value.is_empty() || is_deployment_host(value) {
        Ok(())
    } else {
        Err(Error::ConfigurationError(format!(
            "answer '{key}' is not a host name or IP address: '{value}'"
        )))
    }
}

/// Resolves raw answers into a configuration record.
///
/// Defaults are substituted here and nowhere else. Unknown `client` or
/// `vagrantOs` values, a missing application name and malformed deployment
/// targets are rejected before anything touches the filesystem.
pub fn resolve(answers: &Answers) -> Result<ConfigurationRecord> {
    let app_name = answer(answers, APP_NAME)?
        .ok_or_else(|| Error::ConfigurationError("an application name is required".into()))?
        .trim()
        .to_string();
    validate_app_name(&app_name)?;

    let client: Client = answer(answers, CLIENT)?.unwrap_or(DEFAULT_CLIENT).parse()?;
    let vagrant_os: VagrantOs =
        answer(answers, VAGRANT_OS)?.unwrap_or(DEFAULT_VAGRANT_OS).parse()?;

    let repository_url = answer_or(answers, REPOSITORY_URL, "")?;
    if !repository_url.is_empty() && !is_repository_url(&repository_url) {
        return Err(Error::ConfigurationError(format!(
            "answer '{REPOSITORY_URL}' is not a git repository URL: '{repository_url}'"
        )));
    }

    let staging_ip_address = answer_or(answers, STAGING_IP_ADDRESS, "")?;
    validate_deployment_host(STAGING_IP_ADDRESS, &staging_ip_address)?;
    let prod_ip_address = answer_or(answers, PROD_IP_ADDRESS, "")?;
    validate_deployment_host(PROD_IP_ADDRESS, &prod_ip_address)?;

    let record = ConfigurationRecord {
        app_slug: app_name.to_kebab_case(),
        database_name: app_name.to_snake_case(),
        app_name,
        client,
        staging_database_password: answer_or(
            answers,
            STAGING_DATABASE_PASSWORD,
            DEFAULT_DATABASE_PASSWORD,
        )?,
        prod_database_password: answer_or(
            answers,
            PROD_DATABASE_PASSWORD,
            DEFAULT_DATABASE_PASSWORD,
        )?,
        repository_url,
        staging_ip_address,
        prod_ip_address,
        vagrant_os,
        client_public_directory: client_public_directory(client).to_string(),
    };

    debug!("Resolved configuration for '{}' (client: {}).", record.app_name, record.client);
    Ok(record)
}
