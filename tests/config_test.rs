mod common;

use common::answers;
use kickoff::config::{client_public_directory, resolve, Client, VagrantOs};
use kickoff::error::Error;
use serde_json::json;

#[test]
fn test_client_public_directory_follows_client() {
    for (client, expected) in
        [("react", "client/build"), ("angular4", "client/dist"), ("none", "client/dist")]
    {
        let config = resolve(&answers(json!({ "appName": "demo", "client": client }))).unwrap();
        assert_eq!(config.client_public_directory(), expected);
        assert_eq!(client_public_directory(config.client()), expected);
    }
}

#[test]
fn test_defaults_are_applied() {
    let config = resolve(&answers(json!({ "appName": "demo" }))).unwrap();

    assert_eq!(config.client(), Client::React);
    assert_eq!(config.vagrant_os(), VagrantOs::Xenial);
    assert_eq!(config.staging_database_password(), "pleaseChangeMe");
    assert_eq!(config.prod_database_password(), "pleaseChangeMe");
    assert_eq!(config.repository_url(), "");
    assert_eq!(config.staging_ip_address(), "");
    assert_eq!(config.prod_ip_address(), "");
}

#[test]
fn test_blank_answers_equal_explicit_defaults() {
    let blank = resolve(&answers(json!({
        "appName": "demo",
        "stagingDatabasePassword": "",
        "prodDatabasePassword": null,
        "repositoryUrl": "  ",
    })))
    .unwrap();
    let explicit = resolve(&answers(json!({
        "appName": "demo",
        "client": "react",
        "stagingDatabasePassword": "pleaseChangeMe",
        "prodDatabasePassword": "pleaseChangeMe",
        "repositoryUrl": "",
        "vagrantOs": "xenial",
    })))
    .unwrap();

    assert_eq!(blank, explicit);
    assert_eq!(blank.to_context().unwrap(), explicit.to_context().unwrap());
}

#[test]
fn test_context_uses_camel_case_keys() {
    let config = resolve(&answers(json!({
        "appName": "My Shop",
        "client": "angular4",
        "vagrantOs": "trusty",
        "stagingIpAddress": "10.0.0.2",
    })))
    .unwrap();
    let context = config.to_context().unwrap();

    assert_eq!(context["appName"], "My Shop");
    assert_eq!(context["client"], "angular4");
    assert_eq!(context["vagrantOs"], "trusty");
    assert_eq!(context["stagingIpAddress"], "10.0.0.2");
    assert_eq!(context["clientPublicDirectory"], "client/dist");
    assert_eq!(context["appSlug"], "my-shop");
    assert_eq!(context["databaseName"], "my_shop");
}

#[test]
fn test_unknown_client_is_rejected() {
    let err = resolve(&answers(json!({ "appName": "demo", "client": "vue" }))).unwrap_err();
    assert!(matches!(err, Error::ConfigurationError(ref msg) if msg.contains("vue")));
}

#[test]
fn test_unknown_vagrant_os_is_rejected() {
    let err = resolve(&answers(json!({ "appName": "demo", "vagrantOs": "bionic" }))).unwrap_err();
    assert!(matches!(err, Error::ConfigurationError(_)));
}

#[test]
fn test_app_name_is_required() {
    assert!(matches!(resolve(&answers(json!({}))), Err(Error::ConfigurationError(_))));
    assert!(matches!(
        resolve(&answers(json!({ "appName": "   " }))),
        Err(Error::ConfigurationError(_))
    ));
}

#[test]
fn test_free_text_app_names_are_accepted() {
    for name in ["Café", "my_app", "Shop & Co", "rendez-vous 2.0"] {
        let config = resolve(&answers(json!({ "appName": name }))).unwrap();
        assert_eq!(config.app_name(), name);
        assert!(!config.app_slug().is_empty());
    }
}

#[test]
fn test_app_names_that_break_rendered_quotes_are_rejected() {
    for name in ["say \"hi\"", "o'clock", "back\\slash", "two\nlines", "---"] {
        let result = resolve(&answers(json!({ "appName": name })));
        assert!(matches!(result, Err(Error::ConfigurationError(_))), "{name:?} was accepted");
    }
}

#[test]
fn test_deployment_targets_accept_host_names() {
    let config = resolve(&answers(json!({
        "appName": "demo",
        "repositoryUrl": "/srv/git/demo.git",
        "stagingIpAddress": "staging.example.com",
        "prodIpAddress": "2001:db8::1",
    })))
    .unwrap();
    assert_eq!(config.repository_url(), "/srv/git/demo.git");
    assert_eq!(config.staging_ip_address(), "staging.example.com");
    assert_eq!(config.prod_ip_address(), "2001:db8::1");

    let remote = resolve(&answers(json!({
        "appName": "demo",
        "repositoryUrl": "git@github.com:acme/demo.git",
        "prodIpAddress": "10.0.0.3",
    })));
    assert!(remote.is_ok());

    let bad_url =
        resolve(&answers(json!({ "appName": "demo", "repositoryUrl": "github.com/acme" })));
    assert!(matches!(bad_url, Err(Error::ConfigurationError(_))));

    let bad_host =
        resolve(&answers(json!({ "appName": "demo", "stagingIpAddress": "staging host" })));
    assert!(matches!(bad_host, Err(Error::ConfigurationError(_))));
}

#[test]
fn test_non_string_answers_are_rejected() {
    let err = resolve(&answers(json!({ "appName": "demo", "client": 3 }))).unwrap_err();
    assert!(matches!(err, Error::ConfigurationError(_)));
}
