//! Client composition.
//! Maps the client framework choice to everything that depends on it: which
//! installation guides ship, which boilerplate is cloned and which files are
//! rendered over it, and how the client gets built at the end.

use crate::commands::Invocation;
use crate::config::Client;
use crate::fetcher::ExternalSource;
use crate::manifest::{self, InstallationDoc, TemplateGroup};

/// Everything a run does differently depending on the client framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientComposition {
    pub client: Client,
    /// Installation guides added to the configuration files group.
    pub docs: Vec<InstallationDoc>,
    /// Files rendered into the client tree after it is fetched.
    pub client_group: Option<TemplateGroup>,
    /// Boilerplate cloned into the client directory.
    pub external: Option<ExternalSource>,
    /// Commands run inside the client directory once the project is generated.
    pub build_steps: Vec<Invocation>,
}

impl ClientComposition {
    pub fn fetches_external(&self) -> bool {
        self.external.is_some()
    }
}

/// Installation guides shipped for a client.
///
/// Every client-specific guide comes with the guides of the "smaller" setups
/// after it: react also ships the angular and no-client guides, angular4 also
/// ships the no-client guide.
pub fn installation_docs(client: Client) -> Vec<InstallationDoc> {
    match client {
        Client::React => {
            vec![InstallationDoc::React, InstallationDoc::Angular, InstallationDoc::NoClient]
        }
        Client::Angular4 => vec![InstallationDoc::Angular, InstallationDoc::NoClient],
        Client::None => vec![InstallationDoc::NoClient],
    }
}

fn build_steps(client: Client) -> Vec<Invocation> {
    match client {
        Client::React => vec![
            Invocation::new("npm", ["uninstall", "image-webpack-loader", "--save-dev"]),
            Invocation::new("npm", ["run", "setup"]),
            Invocation::new("npm", ["run", "build"]),
        ],
        Client::Angular4 => vec![
            Invocation::new("npm", ["install"]),
            Invocation::new("npm", ["run", "build:prod"]),
        ],
        Client::None => Vec::new(),
    }
}

/// Computes the client composition of a run.
pub fn compose(client: Client) -> ClientComposition {
    let (client_group, external) = match client {
        Client::React => {
            (Some(manifest::react_client_files()), Some(ExternalSource::react_boilerplate()))
        }
        Client::Angular4 => (None, Some(ExternalSource::angular_starter())),
        Client::None => (None, None),
    };

    ClientComposition {
        client,
        docs: installation_docs(client),
        client_group,
        external,
        build_steps: build_steps(client),
    }
}
