//! Unit tests for the `Terraform` command builder.
//!
//! Verifies option validation, flag assembly per action, success-phrase
//! checks, and working-directory scoping around `output()`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::PathBuf;

use dlab_cli::application::services::terraform::{
    TF_INIT_SUCCESS_MSG, TF_VALIDATE_SUCCESS_MSG, Terraform,
};
use dlab_cli::domain::error::{ParameterError, TerraformError};
use dlab_cli::domain::params::{ParamValue, TerraformAction, TerraformOptions};
use serde_json::json;
use serde_yaml::Mapping;

use crate::mocks::{Call, MockExecutor};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn overrides(yaml: &str) -> Mapping {
    serde_yaml::from_str(yaml).expect("valid yaml")
}

fn terraform(yaml: &str, executor: MockExecutor) -> Terraform<MockExecutor> {
    Terraform::new(executor, &overrides(yaml)).expect("valid overrides")
}

fn defaults(executor: MockExecutor) -> Terraform<MockExecutor> {
    Terraform::new(executor, &Mapping::new()).expect("defaults are valid")
}

// ─── Construction ────────────────────────────────────────────────────────────

#[test]
fn test_new_stores_supplied_values() {
    let tf = terraform(
        "no_color: false\nstate: prod.tfstate\nvariables: {x: '1'}\ntf_path: /srv/tf\n",
        MockExecutor::returning(""),
    );
    assert_eq!(tf.params().get("no_color"), Some(&ParamValue::Bool(false)));
    assert_eq!(
        tf.params().get("state"),
        Some(&ParamValue::Str("prod.tfstate".into()))
    );
    assert_eq!(tf.tf_path(), "/srv/tf");
}

#[test]
fn test_new_rejects_wrong_type_with_details() {
    let err = Terraform::new(MockExecutor::returning(""), &overrides("auto_approve: 1"))
        .err()
        .expect("type mismatch must fail");
    let ParameterError::InvalidParameterType {
        value,
        actual,
        expected,
    } = err
    else {
        panic!("expected a type error");
    };
    assert_eq!((value.as_str(), actual, expected), ("1", "number", "bool"));
}

#[test]
fn test_new_rejects_non_string_tf_path() {
    let result = Terraform::new(MockExecutor::returning(""), &overrides("tf_path: true"));
    assert!(result.is_err());
}

#[test]
fn test_new_rejects_tf_path_with_space() {
    let err = Terraform::new(MockExecutor::returning(""), &overrides("tf_path: my infra"))
        .err()
        .expect("a path with whitespace must fail");
    assert!(matches!(err, ParameterError::UnsafeValue { ref name, .. } if name == "tf_path"));
}

#[test]
fn test_new_rejects_quoted_variable_before_running() {
    let options = TerraformOptions {
        variables: vec![("x".into(), "1'; echo injected; echo '".into())],
        ..TerraformOptions::default()
    };
    let result = Terraform::new(MockExecutor::returning(""), &options.to_overrides());
    assert!(matches!(result, Err(ParameterError::UnsafeValue { .. })));
}

#[test]
fn test_new_ignores_unknown_keys() {
    let tf = terraform("parallelism: 4\n", MockExecutor::returning(""));
    assert_eq!(
        tf.command(TerraformAction::Apply),
        "terraform apply -no-color -auto-approve"
    );
}

#[test]
fn test_typed_options_go_through_same_validation() {
    let options = TerraformOptions {
        state: Some("s.tfstate".into()),
        tf_path: Some("infra".into()),
        ..TerraformOptions::default()
    };
    let tf = Terraform::new(MockExecutor::returning(""), &options.to_overrides()).unwrap();
    assert_eq!(
        tf.command(TerraformAction::Output),
        "terraform output -json -state=s.tfstate infra"
    );
}

// ─── Flag assembly ───────────────────────────────────────────────────────────

#[test]
fn test_init_and_validate_never_take_flags() {
    let tf = terraform(
        "state: s\nvariables: {x: '1'}\ntf_path: infra\n",
        MockExecutor::returning(""),
    );
    assert_eq!(tf.command(TerraformAction::Init), "terraform init");
    assert_eq!(tf.command(TerraformAction::Validate), "terraform validate");
}

#[test]
fn test_apply_flag_order_follows_table() {
    let tf = terraform(
        "variables: {x: '1', y: '2'}\nstate: s.tfstate\ntf_path: infra\n",
        MockExecutor::returning(""),
    );
    assert_eq!(
        tf.command(TerraformAction::Apply),
        "terraform apply -no-color -auto-approve -state=s.tfstate -var 'x=1' -var 'y=2' infra"
    );
}

#[test]
fn test_destroy_uses_same_flags_as_apply() {
    let tf = terraform("variables: {x: '1'}\n", MockExecutor::returning(""));
    assert_eq!(
        tf.options(TerraformAction::Destroy),
        tf.options(TerraformAction::Apply)
    );
}

#[test]
fn test_false_and_empty_values_are_omitted() {
    let tf = terraform(
        "no_color: false\nauto_approve: false\nstate: ''\nvariables: {}\n",
        MockExecutor::returning(""),
    );
    assert_eq!(tf.options(TerraformAction::Apply), "");
    assert_eq!(tf.command(TerraformAction::Apply), "terraform apply");
}

#[test]
fn test_output_excludes_apply_only_flags() {
    let tf = terraform(
        "variables: {x: '1'}\nno_color: true\n",
        MockExecutor::returning(""),
    );
    assert_eq!(tf.command(TerraformAction::Output), "terraform output -json");
}

#[test]
fn test_json_view_never_reaches_apply() {
    let tf = defaults(MockExecutor::returning(""));
    assert!(!tf.options(TerraformAction::Apply).contains("-json"));
}

#[test]
fn test_output_without_json_view() {
    let tf = terraform("json_view: false\n", MockExecutor::returning(""));
    assert_eq!(tf.command(TerraformAction::Output), "terraform output");
}

// ─── initialize / validate ───────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_returns_raw_output_on_success() {
    let stdout = "Initializing provider plugins...\n\nTerraform has been successfully initialized!\n";
    let tf = defaults(MockExecutor::returning(stdout));
    assert_eq!(tf.initialize().await.unwrap(), stdout);
    assert_eq!(tf.executor().commands(), vec!["terraform init"]);
}

#[tokio::test]
async fn test_initialize_without_phrase_is_provisioning_error() {
    let tf = defaults(MockExecutor::returning("Error: Failed to query available provider packages"));
    let err = tf.initialize().await.unwrap_err();
    match err.downcast_ref::<TerraformError>() {
        Some(TerraformError::Provisioning { command }) => assert_eq!(command, "terraform init"),
        other => panic!("expected provisioning error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Exception raised while terraform init");
}

#[tokio::test]
async fn test_validate_checks_success_phrase() {
    let ok = defaults(MockExecutor::returning(
        "Success! The configuration is valid.\n",
    ));
    assert!(ok.validate().await.is_ok());

    let bad = defaults(MockExecutor::returning("Error: Unsupported argument"));
    let err = bad.validate().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TerraformError>(),
        Some(TerraformError::Provisioning { command }) if command == "terraform validate"
    ));
}

#[tokio::test]
async fn test_success_phrases_are_literal() {
    assert_eq!(TF_INIT_SUCCESS_MSG, "Terraform has been successfully initialized!");
    assert_eq!(TF_VALIDATE_SUCCESS_MSG, "Success!");
    // Case differences are not success.
    let tf = defaults(MockExecutor::returning("success!"));
    assert!(tf.validate().await.is_err());
}

#[tokio::test]
async fn test_initialize_propagates_executor_error() {
    let tf = defaults(MockExecutor::failing("terraform: command not found"));
    let err = tf.initialize().await.unwrap_err();
    assert!(err.downcast_ref::<TerraformError>().is_none());
    assert!(format!("{err:#}").contains("command not found"));
}

// ─── apply / destroy ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_returns_output_without_checking_it() {
    let tf = terraform("tf_path: infra\n", MockExecutor::returning("Error: nothing good"));
    assert_eq!(tf.apply().await.unwrap(), "Error: nothing good");
    assert_eq!(
        tf.executor().commands(),
        vec!["terraform apply -no-color -auto-approve infra"]
    );
}

#[tokio::test]
async fn test_apply_does_not_change_directory() {
    let tf = terraform("tf_path: infra\n", MockExecutor::returning(""));
    tf.apply().await.unwrap();
    assert_eq!(tf.executor().calls()[0].cwd, None);
}

#[tokio::test]
async fn test_destroy_propagates_executor_error() {
    let tf = defaults(MockExecutor::failing("exit status 1"));
    let err = tf.destroy().await.unwrap_err();
    assert!(format!("{err:#}").contains("exit status 1"));
    assert!(err.to_string().contains("terraform destroy"));
}

// ─── output ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_output_runs_in_tf_path_and_parses_json() {
    let tf = terraform(
        "tf_path: /srv/infra\nstate: s.tfstate\n",
        MockExecutor::returning(r#"{"ip": {"sensitive": false, "type": "string", "value": "10.0.0.1"}}"#),
    );
    let value = tf.output().await.unwrap();
    assert_eq!(value["ip"]["value"], json!("10.0.0.1"));
    assert_eq!(
        tf.executor().calls(),
        vec![Call {
            command: "terraform output -json -state=s.tfstate /srv/infra".into(),
            cwd: Some(PathBuf::from("/srv/infra")),
        }]
    );
    assert_eq!(tf.executor().cwd(), None, "directory must be restored");
}

#[tokio::test]
async fn test_output_restores_directory_when_executor_fails() {
    let tf = terraform("tf_path: /srv/infra\n", MockExecutor::failing("boom"));
    assert!(tf.output().await.is_err());
    assert_eq!(tf.executor().calls()[0].cwd, Some(PathBuf::from("/srv/infra")));
    assert_eq!(tf.executor().cwd(), None);
}

#[tokio::test]
async fn test_output_malformed_json_is_parse_error() {
    let tf = defaults(MockExecutor::returning("Outputs:\n\nip = \"10.0.0.1\"\n"));
    let err = tf.output().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TerraformError>(),
        Some(TerraformError::OutputParse(_))
    ));
    assert_eq!(tf.executor().cwd(), None);
}

#[tokio::test]
async fn test_output_without_tf_path_keeps_directory() {
    let tf = defaults(MockExecutor::returning("{}"));
    assert_eq!(tf.output().await.unwrap(), json!({}));
    assert_eq!(tf.executor().calls()[0].cwd, None);
}

#[tokio::test]
async fn test_each_operation_issues_exactly_one_call() {
    let tf = defaults(MockExecutor::with(|cmd| {
        Ok(match cmd {
            "terraform init" => TF_INIT_SUCCESS_MSG.to_string(),
            "terraform validate" => TF_VALIDATE_SUCCESS_MSG.to_string(),
            c if c.starts_with("terraform output") => "{}".to_string(),
            _ => String::new(),
        })
    }));
    tf.initialize().await.unwrap();
    tf.validate().await.unwrap();
    tf.apply().await.unwrap();
    tf.destroy().await.unwrap();
    tf.output().await.unwrap();
    assert_eq!(
        tf.executor().commands(),
        vec![
            "terraform init",
            "terraform validate",
            "terraform apply -no-color -auto-approve",
            "terraform destroy -no-color -auto-approve",
            "terraform output -json",
        ]
    );
}
