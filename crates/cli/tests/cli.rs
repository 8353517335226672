use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(deprecated)]
fn levelcrawl() -> Command {
    let mut cmd = Command::cargo_bin("levelcrawl").expect("binary");
    cmd.env_remove("LEVELCRAWL_SERVICE_URL")
        .env_remove("LEVELCRAWL_MAX_WORKERS")
        .env_remove("LEVELCRAWL_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_arguments_exit_with_one() {
    levelcrawl().assert().code(1);
    levelcrawl().arg("A").assert().code(1);
}

#[test]
fn extra_argument_exits_with_one() {
    levelcrawl().args(["A", "1", "extra"]).assert().code(1);
}

#[test]
fn non_integer_depth_is_a_usage_error() {
    levelcrawl()
        .args(["A", "two"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Depth must be an integer"));

    levelcrawl().args(["A", "1.5"]).assert().code(1);
}

#[test]
fn negative_depth_reports_start_only() {
    levelcrawl()
        .args(["A", "-1", "--service-url", "http://127.0.0.1:1/neighbors/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "- A\n1 nodes at this level\nTime to crawl: ",
        ));
}

#[test]
fn help_exits_successfully() {
    levelcrawl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn depth_zero_prints_start_only() {
    // No lookup happens at depth 0, so the unreachable service is never contacted.
    levelcrawl()
        .args(["Kevin Bacon", "0", "--service-url", "http://127.0.0.1:1/neighbors/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "- Kevin Bacon\n1 nodes at this level\nTime to crawl: ",
        ));
}

#[test]
fn invalid_service_url_fails_before_crawling() {
    levelcrawl()
        .args(["A", "1", "--service-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize crawler"));
}

async fn diamond_service() -> MockServer {
    let server = MockServer::start().await;
    for (node, body) in [
        ("A", r#"{"neighbors":["B","C"]}"#),
        ("B", r#"{"neighbors":["D"]}"#),
        ("C", r#"{"neighbors":["D"]}"#),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/neighbors/{node}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }
    server
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn crawls_mock_service_and_reports_levels() {
    let server = diamond_service().await;
    let url = format!("{}/neighbors/", server.uri());

    let output = tokio::task::spawn_blocking(move || {
        levelcrawl()
            .args(["A", "2", "--workers", "2", "--service-url", url.as_str()])
            .output()
            .expect("command run")
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "- A");
    assert_eq!(lines[1], "1 nodes at this level");
    let mut level1 = vec![lines[2], lines[3]];
    level1.sort();
    assert_eq!(level1, vec!["- B", "- C"]);
    assert_eq!(lines[4], "2 nodes at this level");
    assert_eq!(lines[5], "- D");
    assert_eq!(lines[6], "1 nodes at this level");
    assert!(lines[7].starts_with("Time to crawl: "));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn json_output_is_machine_readable() {
    let server = diamond_service().await;
    let url = format!("{}/neighbors/", server.uri());

    let output = tokio::task::spawn_blocking(move || {
        levelcrawl()
            .env("LEVELCRAWL_SERVICE_URL", &url)
            .args(["A", "3", "--json"])
            .output()
            .expect("command run")
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let levels = body["levels"].as_array().unwrap();
    assert_eq!(levels.len(), 4);
    assert_eq!(levels[0], serde_json::json!(["A"]));
    assert_eq!(levels[2], serde_json::json!(["D"]));
    // D has no mock: the empty 404 body decodes to no neighbors, not a failed lookup.
    assert_eq!(body["failures"][2], serde_json::json!([]));
    assert_eq!(levels[3], serde_json::json!([]));
    assert!(body["elapsed"].as_f64().is_some());
}
