use std::path::PathBuf;

use quickbar_core::runtime::{parse_cli_args, CliOptions};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn no_args_yields_defaults() {
    let options = parse_cli_args(&[]).unwrap();
    assert_eq!(options, CliOptions::default());
}

#[test]
fn parses_config_and_plugin_paths() {
    let options =
        parse_cli_args(&args(&["--config", "/tmp/q.toml", "--plugins", "/tmp/plugins"])).unwrap();
    assert_eq!(options.config_path, Some(PathBuf::from("/tmp/q.toml")));
    assert_eq!(options.plugin_dir, Some(PathBuf::from("/tmp/plugins")));
}

#[test]
fn parses_one_shot_query_and_run() {
    let options = parse_cli_args(&args(&["--query", ">wik"])).unwrap();
    assert_eq!(options.one_shot_query.as_deref(), Some(">wik"));

    let options = parse_cli_args(&args(&["--run", ">wiki"])).unwrap();
    assert_eq!(options.one_shot_run.as_deref(), Some(">wiki"));
}

#[test]
fn rejects_unknown_arguments() {
    let error = parse_cli_args(&args(&["--frobnicate"])).unwrap_err();
    assert!(error.contains("--frobnicate"));
}

#[test]
fn rejects_flag_without_value() {
    let error = parse_cli_args(&args(&["--query"])).unwrap_err();
    assert!(error.contains("--query requires a value"));
}
