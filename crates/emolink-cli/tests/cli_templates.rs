mod helpers;

use helpers::{args, TestDepsBuilder};
use emolink_cli::cli;

#[test]
fn templates_lists_catalog() {
    let (mut deps, stdout, _stderr) = TestDepsBuilder::new().build();
    let code = cli::run(&args(&["emolink", "templates"]), &mut deps);
    assert_eq!(code, 0);
    let out = stdout.to_string();
    for id in ["birthday", "proposal", "apology", "graduation", "anniversary"] {
        assert!(out.contains(id), "missing {}: {}", id, out);
    }
    assert!(out.contains("default"));
}

#[test]
fn templates_json() {
    let (mut deps, stdout, _stderr) = TestDepsBuilder::new().build();
    let code = cli::run(&args(&["emolink", "templates", "--json"]), &mut deps);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(stdout.to_string().trim()).unwrap();
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["id"], "birthday");
    assert_eq!(list[0]["music"], "happy");
    assert_eq!(list[1]["hearts"], true);
    assert_eq!(list[2]["hearts"], false);
}

#[test]
fn templates_help() {
    let (mut deps, _stdout, stderr) = TestDepsBuilder::new().build();
    let code = cli::run(&args(&["emolink", "help", "templates"]), &mut deps);
    assert_eq!(code, 0);
    assert!(stderr.to_string().contains("List card templates"));
}

#[test]
fn version_and_unknown_command() {
    let (mut deps, stdout, _stderr) = TestDepsBuilder::new().build();
    assert_eq!(cli::run(&args(&["emolink", "--version"]), &mut deps), 0);
    assert!(stdout.to_string().starts_with("emolink "));

    let (mut deps, _stdout, stderr) = TestDepsBuilder::new().build();
    assert_eq!(cli::run(&args(&["emolink", "bogus"]), &mut deps), 2);
    assert!(stderr.to_string().contains("unknown command"));
}

#[test]
fn completion_scripts() {
    for shell in ["bash", "zsh", "fish"] {
        let (mut deps, stdout, _stderr) = TestDepsBuilder::new().build();
        assert_eq!(cli::run(&args(&["emolink", "completion", shell]), &mut deps), 0);
        assert!(stdout.to_string().contains("emolink"), "shell {}", shell);
    }
    let (mut deps, _stdout, _stderr) = TestDepsBuilder::new().build();
    assert_eq!(cli::run(&args(&["emolink", "completion", "tcsh"]), &mut deps), 2);
}
