//! End-to-end tests driving the `tsdb-cli` binary over piped stdin.

mod common;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;

use common::{MockResponse, MockServer};

fn shell() -> Command {
    let mut cmd = Command::cargo_bin("tsdb-cli").expect("binary should build");
    for var in [
        "TSDB_HOST",
        "TSDB_PORT",
        "TSDB_USERNAME",
        "TSDB_PASSWORD",
        "TSDB_CLI_CONFIG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_then_exit() {
    shell()
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("use <db name>"));
}

#[test]
fn end_of_input_exits_cleanly() {
    shell().write_stdin("").assert().success();
}

#[test]
fn errors_do_not_end_the_session() {
    shell()
        .write_stdin("select * from cpu\nuse\nhelp\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unsupported command: select"))
        .stdout(predicate::str::contains("invalid argument: use <db name>"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn lines_after_exit_are_not_run() {
    shell()
        .write_stdin("\\q\nhelp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:").not());
}

#[test]
fn connection_refused_is_reported() {
    // Bind then drop to get a port nobody is listening on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .expect("should bind")
        .port();

    shell()
        .args(["--host", "127.0.0.1", "--port", &port.to_string()])
        .write_stdin("show databases\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("transport error:"));
}

#[test]
fn missing_config_file_fails_startup() {
    shell()
        .args(["--config", "/nonexistent/tsdb-cli.toml"])
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn query_renders_table_from_server() {
    let body = r#"{"results":[{"series":[{"name":"databases","columns":["name"],"values":[["_internal"],["telegraf"]]}]}]}"#;
    let server = MockServer::start(vec![MockResponse::json(body)]).await;
    let port = server.port().to_string();

    let output = tokio::task::spawn_blocking(move || {
        shell()
            .args(["--host", "127.0.0.1", "--port", &port])
            .write_stdin("show databases\nexit\n")
            .output()
    })
    .await
    .expect("command task")
    .expect("command should run");

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("name: databases"))
        .stdout(predicate::str::contains("| telegraf  |"))
        .stdout(predicate::str::contains("1 columns, 2 rows in set"));

    let requests = server.requests().await;
    assert_eq!(
        requests[0].form().get("q").map(String::as_str),
        Some("show databases")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_address_from_environment() {
    let server = MockServer::start(vec![MockResponse::status(204, "")]).await;
    let port = server.port().to_string();

    let output = tokio::task::spawn_blocking(move || {
        shell()
            .env("TSDB_HOST", "127.0.0.1")
            .env("TSDB_PORT", &port)
            .env("TSDB_USERNAME", "envuser")
            .env("TSDB_PASSWORD", "envpass")
            .write_stdin("use envdb\ninsert cpu value=1\nexit\n")
            .output()
    })
    .await
    .expect("command task")
    .expect("command should run");

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("error").not());

    let requests = server.requests().await;
    assert_eq!(requests[0].path(), "/write");
    assert_eq!(
        requests[0].query_params().get("db").map(String::as_str),
        Some("envdb")
    );
    // base64("envuser:envpass")
    assert_eq!(
        requests[0].header("authorization"),
        Some("Basic ZW52dXNlcjplbnZwYXNz")
    );
}
