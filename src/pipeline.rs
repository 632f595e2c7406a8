//! The scaffolding pipeline.
//! Resolves the answers, then runs the fixed sequence of phases that populate
//! the project: configuration, server, provisioning and migration files, the
//! client boilerplate, and dependency installation.

use std::fmt;
use std::path::Path;

use log::{debug, error, info};

use crate::commands::{CommandRunner, Invocation};
use crate::composer::{self, ClientComposition};
use crate::config::{self, Answers, Client, ConfigurationRecord};
use crate::error::{Error, Result};
use crate::fetcher::{Cloner, Fetcher};
use crate::manifest::{self, TemplateGroup};
use crate::processor::Processor;
use crate::renderer::TemplateRenderer;

/// Condition a phase needs to hold before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    Always,
    ClientSelected,
    InstallEnabled,
}

impl Precondition {
    pub fn holds(&self, client: Client, install_dependencies: bool) -> bool {
        match self {
            Precondition::Always => true,
            Precondition::ClientSelected => client.is_selected(),
            Precondition::InstallEnabled => install_dependencies,
        }
    }
}

/// Side effect a phase has on the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RenderGroup,
    /// Clone, remove conflicting files, render over the clone, strip history.
    FetchExternal,
    RunExternalCommand,
}

/// Phases in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    ConfigurationFiles,
    ServerFiles,
    ProvisioningFiles,
    MigrationFiles,
    Client,
    InstallDependencies,
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::ConfigurationFiles,
        Phase::ServerFiles,
        Phase::ProvisioningFiles,
        Phase::MigrationFiles,
        Phase::Client,
        Phase::InstallDependencies,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::ConfigurationFiles => "configuration files",
            Phase::ServerFiles => "server files",
            Phase::ProvisioningFiles => "provisioning files",
            Phase::MigrationFiles => "migration files",
            Phase::Client => "client",
            Phase::InstallDependencies => "dependency installation",
        }
    }

    pub fn precondition(&self) -> Precondition {
        match self {
            Phase::Client => Precondition::ClientSelected,
            Phase::InstallDependencies => Precondition::InstallEnabled,
            _ => Precondition::Always,
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            Phase::Client => Effect::FetchExternal,
            Phase::InstallDependencies => Effect::RunExternalCommand,
            _ => Effect::RenderGroup,
        }
    }

    /// Pipeline state the runner is in while this phase executes.
    pub fn state(&self) -> PipelineState {
        match self {
            Phase::Client => PipelineState::Fetching,
            Phase::InstallDependencies => PipelineState::Finalizing,
            _ => PipelineState::Populating,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Configuring,
    Populating,
    Fetching,
    Finalizing,
    Done,
    /// `phase` is `None` when resolving the configuration failed.
    Failed { phase: Option<Phase> },
}

impl PipelineState {
    fn rank(&self) -> u8 {
        match self {
            PipelineState::Idle => 0,
            PipelineState::Configuring => 1,
            PipelineState::Populating => 2,
            PipelineState::Fetching => 3,
            PipelineState::Finalizing => 4,
            PipelineState::Done | PipelineState::Failed { .. } => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed { .. })
    }
}

/// Invocation installing the server dependencies.
pub fn install_command() -> Invocation {
    Invocation::new("yarn", ["install"])
}

/// Everything a run writes, decided once before the first phase.
#[derive(Debug)]
struct Plan {
    config: ConfigurationRecord,
    context: serde_json::Value,
    composition: ClientComposition,
    configuration_files: TemplateGroup,
    server_files: TemplateGroup,
    provisioning_files: TemplateGroup,
    migration_files: TemplateGroup,
}

impl Plan {
    fn new(answers: &Answers) -> Result<Self> {
        let config = config::resolve(answers)?;
        let context = config.to_context()?;
        let composition = composer::compose(config.client());
        let configuration_files = manifest::configuration_files()
            .with_entries(composition.docs.iter().map(|doc| doc.entry()));

        let plan = Self {
            config,
            context,
            composition,
            configuration_files,
            server_files: manifest::server_files(),
            provisioning_files: manifest::provisioning_files(),
            migration_files: manifest::migration_files(),
        };
        manifest::ensure_unique_destinations(&plan.active_groups())?;
        Ok(plan)
    }

    fn active_groups(&self) -> Vec<&TemplateGroup> {
        let mut groups = vec![
            &self.configuration_files,
            &self.server_files,
            &self.provisioning_files,
            &self.migration_files,
        ];
        groups.extend(self.composition.client_group.as_ref());
        groups
    }
}

/// Outcome of a run that reached `Done`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub config: ConfigurationRecord,
    pub composition: ClientComposition,
    /// Phases that ran, in order. Phases whose precondition failed are absent.
    pub completed: Vec<Phase>,
}

/// Drives a single scaffolding run.
pub struct PipelineRunner<'a> {
    engine: &'a dyn TemplateRenderer,
    cloner: &'a dyn Cloner,
    commands: &'a dyn CommandRunner,
    template_root: &'a Path,
    output_root: &'a Path,
    install_dependencies: bool,
    state: PipelineState,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        cloner: &'a dyn Cloner,
        commands: &'a dyn CommandRunner,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self {
            engine,
            cloner,
            commands,
            template_root,
            output_root,
            install_dependencies: true,
            state: PipelineState::Idle,
        }
    }

    /// Enables or disables the dependency installation phase.
    pub fn install_dependencies(mut self, enabled: bool) -> Self {
        self.install_dependencies = enabled;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn transition(&mut self, next: PipelineState) {
        if next == self.state {
            return;
        }
        debug_assert!(
            !self.state.is_terminal() && next.rank() > self.state.rank(),
            "invalid pipeline transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!("Pipeline state: {:?} -> {:?}.", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, phase: Option<Phase>, err: Error) -> Error {
        match phase {
            Some(phase) => error!("Phase '{phase}' failed, skipping the remaining phases."),
            None => error!("Configuration failed, nothing was written."),
        }
        self.transition(PipelineState::Failed { phase });
        err
    }

    /// Runs every phase in order.
    ///
    /// Each phase settles completely before the next one starts. The first
    /// failure moves the runner to `Failed`, skips the remaining phases and is
    /// returned as is.
    pub fn run(&mut self, answers: &Answers) -> Result<RunReport> {
        self.state = PipelineState::Idle;
        self.transition(PipelineState::Configuring);

        let plan = match Plan::new(answers) {
            Ok(plan) => plan,
            Err(e) => return Err(self.fail(None, e)),
        };

        let mut completed = Vec::new();
        for phase in Phase::ALL {
            if !phase.precondition().holds(plan.config.client(), self.install_dependencies) {
                debug!("Skipping phase '{phase}'.");
                continue;
            }

            self.transition(phase.state());
            info!("Adding {phase}");
            if let Err(e) = self.execute(phase, &plan) {
                return Err(self.fail(Some(phase), e));
            }
            completed.push(phase);
        }

        self.transition(PipelineState::Done);
        Ok(RunReport { config: plan.config, composition: plan.composition, completed })
    }

    fn execute(&self, phase: Phase, plan: &Plan) -> Result<()> {
        let processor =
            Processor::new(self.engine, self.template_root, self.output_root, &plan.context);

        match phase {
            Phase::ConfigurationFiles => processor.render_group(&plan.configuration_files),
            Phase::ServerFiles => processor.render_group(&plan.server_files),
            Phase::ProvisioningFiles => processor.render_group(&plan.provisioning_files),
            Phase::MigrationFiles => processor.render_group(&plan.migration_files),
            Phase::Client => {
                let fetcher = Fetcher::new(self.cloner, self.output_root);
                if let Some(external) = &plan.composition.external {
                    fetcher.fetch(external)?;
                }
                if let Some(group) = &plan.composition.client_group {
                    processor.render_group(group)?;
                }
                if let Some(external) = &plan.composition.external {
                    fetcher.strip_history(external)?;
                }
                Ok(())
            }
            Phase::InstallDependencies => self.commands.run(&install_command(), self.output_root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order_is_declaration_order() {
        let mut sorted = Phase::ALL;
        sorted.sort();
        assert_eq!(sorted, Phase::ALL);
    }

    #[test]
    fn test_phase_states_never_go_backwards() {
        let ranks: Vec<u8> = Phase::ALL.iter().map(|p| p.state().rank()).collect();
        assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_client_phase_requires_a_client() {
        assert!(!Phase::Client.precondition().holds(Client::None, true));
        assert!(Phase::Client.precondition().holds(Client::Angular4, true));
        assert!(!Phase::InstallDependencies.precondition().holds(Client::React, false));
    }
}
