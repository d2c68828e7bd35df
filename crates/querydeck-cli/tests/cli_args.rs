use assert_cmd::Command;
use predicates::prelude::*;

fn querydeck() -> Command {
    let mut cmd = Command::cargo_bin("querydeck").expect("binary builds");
    // isolate from any real config file or ambient password
    let tmp = tempfile::TempDir::new().expect("temp dir");
    cmd.env("HOME", tmp.path());
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.env_remove("QUERYDECK_PASSWORD");
    // keep the temp dir alive for the duration of the process
    Box::leak(Box::new(tmp));
    cmd
}

#[test]
fn test_help_lists_all_subcommands() {
    querydeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("schema"))
        .stdout(predicate::str::contains("query"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("dash"));
}

#[test]
fn test_version_flag() {
    querydeck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("querydeck"));
}

#[test]
fn test_query_requires_a_question_argument() {
    querydeck().arg("query").assert().failure();
}

#[test]
fn test_query_without_any_connection_explains_what_to_do() {
    querydeck()
        .args(["query", "how many students are there?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no connection configured"));
}

#[test]
fn test_dash_refuses_non_interactive_stdout() {
    querydeck()
        .args(["dash", "--driver", "mysql", "--host", "localhost", "-d", "school"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    querydeck().arg("frobnicate").assert().failure();
}

#[test]
fn test_invalid_format_value_is_rejected() {
    querydeck()
        .args(["--format", "yaml", "query", "anything"])
        .assert()
        .failure();
}
