mod common;

use common::{answers, bundled_templates, FakeCloner, RecordingRunner};
use kickoff::error::Error;
use kickoff::pipeline::{PipelineRunner, RunReport};
use kickoff::postprocess::PostProcessor;
use kickoff::renderer::MiniJinjaRenderer;
use serde_json::json;
use tempfile::TempDir;

fn scaffold(root: &std::path::Path, client: &str) -> RunReport {
    let templates = bundled_templates();
    let (engine, cloner, commands) =
        (MiniJinjaRenderer::new(), FakeCloner::default(), RecordingRunner::default());
    PipelineRunner::new(&engine, &cloner, &commands, &templates, root)
        .install_dependencies(false)
        .run(&answers(json!({ "appName": "demo", "client": client, "vagrantOs": "trusty" })))
        .unwrap()
}

#[test]
fn test_no_client_only_renames_gitignore() {
    let output = TempDir::new().unwrap();
    let report = scaffold(output.path(), "none");
    let commands = RecordingRunner::default();

    let outcome = PostProcessor::new(&commands, output.path()).finalize(&report);

    assert!(outcome.is_clean());
    assert!(outcome.renamed_gitignore);
    assert!(outcome.client_root.is_none());
    assert!(outcome.commands_run.is_empty());
    assert!(commands.commands().is_empty());
    assert!(output.path().join(".gitignore").is_file());
    assert!(!output.path().join("gitignore").exists());
}

#[test]
fn test_react_client_is_built_in_client_directory() {
    let output = TempDir::new().unwrap();
    let report = scaffold(output.path(), "react");
    let commands = RecordingRunner::default();

    let outcome = PostProcessor::new(&commands, output.path()).finalize(&report);

    assert!(outcome.is_clean());
    assert_eq!(outcome.client_root, Some(output.path().join("client")));
    assert_eq!(
        commands.commands(),
        ["npm uninstall image-webpack-loader --save-dev", "npm run setup", "npm run build"]
    );
    assert!(commands.calls().iter().all(|call| call.cwd == output.path().join("client")));
    let gitignore = std::fs::read_to_string(output.path().join(".gitignore")).unwrap();
    assert!(gitignore.contains("client/build"));
}

#[test]
fn test_angular_client_build_steps() {
    let output = TempDir::new().unwrap();
    let report = scaffold(output.path(), "angular4");
    let commands = RecordingRunner::default();

    PostProcessor::new(&commands, output.path()).finalize(&report);

    assert_eq!(commands.commands(), ["npm install", "npm run build:prod"]);
}

#[test]
fn test_failed_build_step_is_reported_not_fatal() {
    let output = TempDir::new().unwrap();
    let report = scaffold(output.path(), "react");
    let commands = RecordingRunner::failing_on("npm run setup");

    let outcome = PostProcessor::new(&commands, output.path()).finalize(&report);

    assert!(!outcome.is_clean());
    assert!(outcome.renamed_gitignore);
    assert_eq!(outcome.commands_run.len(), 1);
    assert_eq!(
        commands.commands(),
        ["npm uninstall image-webpack-loader --save-dev", "npm run setup"]
    );
    match &outcome.failures[..] {
        [Error::FinalizationError { command, reason }] => {
            assert_eq!(command, "npm run setup");
            assert!(reason.contains("exit status"));
        }
        other => panic!("Expected one FinalizationError, got {other:?}"),
    }
}

#[test]
fn test_missing_gitignore_is_reported() {
    let output = TempDir::new().unwrap();
    let report = scaffold(output.path(), "none");
    std::fs::remove_file(output.path().join("gitignore")).unwrap();
    let commands = RecordingRunner::default();

    let outcome = PostProcessor::new(&commands, output.path()).finalize(&report);

    assert!(!outcome.renamed_gitignore);
    assert!(matches!(outcome.failures[..], [Error::FinalizationError { .. }]));
}
