// ABOUTME: Integration tests for the companyscope CLI binary.
// ABOUTME: Covers offline HTML extraction, configuration errors and a full scrape-and-export run.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn companyscope_cmd() -> Command {
    let mut cmd = Command::cargo_bin("companyscope").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn profile_page(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head>
        <script type="application/ld+json">
          {{"@context": "https://schema.org", "@type": "Organization", "name": "{name}",
            "numberOfEmployees": 50, "sameAs": ["https://{name}.test"]}}
        </script></head><body><p>Profile</p></body></html>"#
    )
}

fn write_settings(dir: &Path, formats: &[&str]) -> std::path::PathBuf {
    let path = dir.join("settings.json");
    let settings = serde_json::json!({
        "request": {"timeout": 5, "concurrency": 2, "max_retries": 0},
        "output": {"directory": dir.join("out"), "formats": formats, "filename_prefix": "companies"},
        "logging": {"level": "WARNING"}
    });
    fs::write(&path, settings.to_string()).unwrap();
    path
}

#[test]
fn extract_html_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("acme.html");
    fs::write(&html_path, profile_page("acme")).unwrap();

    let output = companyscope_cmd()
        .current_dir(temp_dir.path())
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/company/123456")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let record: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(record["name"], "acme");
    assert_eq!(record["id"], "123456");
    assert_eq!(record["employees"], 50);
    assert_eq!(record["website"], "https://acme.test");
}

#[test]
fn html_requires_url() {
    companyscope_cmd()
        .arg("--html")
        .arg("page.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn binary_html_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("logo.png");
    fs::write(&path, [0x89, b'P', b'N', b'G', 0, 0, 0]).unwrap();

    companyscope_cmd()
        .current_dir(temp_dir.path())
        .arg("--html")
        .arg(&path)
        .arg("--url")
        .arg("https://example.com/company/1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not text"));
}

#[test]
fn missing_configuration_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    companyscope_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn default_config_path_is_used() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("config")).unwrap();
    fs::write(temp_dir.path().join("config/settings.example.json"), "{}").unwrap();

    // Config found, but data/input_urls.txt does not exist.
    companyscope_cmd()
        .current_dir(temp_dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no URLs to process"));
}

#[test]
fn scrapes_urls_and_exports_files() {
    let server = MockServer::start();
    let ok = server.mock(|when, then| {
        when.method(GET).path("/company/111");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(profile_page("acme"));
    });
    let missing = server.mock(|when, then| {
        when.method(GET).path("/company/222");
        then.status(404).body("gone");
    });

    let temp_dir = TempDir::new().unwrap();
    let config = write_settings(temp_dir.path(), &["json", "csv"]);
    let input = temp_dir.path().join("urls.txt");
    fs::write(
        &input,
        format!(
            "# targets\n{}\n\n{}\n",
            server.url("/company/111"),
            server.url("/company/222")
        ),
    )
    .unwrap();

    companyscope_cmd()
        .current_dir(temp_dir.path())
        .arg("-c")
        .arg(&config)
        .arg("-i")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Scraped 1 of 2 URLs (1 failed)"));

    ok.assert();
    missing.assert();

    let mut files: Vec<_> = fs::read_dir(temp_dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].extension().unwrap(), "csv");
    assert_eq!(files[1].extension().unwrap(), "json");

    let records: Vec<Value> = serde_json::from_str(&fs::read_to_string(&files[1]).unwrap()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "acme");
    assert_eq!(records[0]["id"], "111");
    assert!(records[0].get("error").is_none());
    assert_eq!(records[1]["id"], Value::Null);
    assert!(records[1]["error"].as_str().unwrap().contains("404"));
}

#[test]
fn all_failures_exit_nonzero_but_still_export() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/company/1");
        then.status(500);
    });

    let temp_dir = TempDir::new().unwrap();
    let config = write_settings(temp_dir.path(), &["json"]);
    let input = temp_dir.path().join("urls.txt");
    fs::write(&input, server.url("/company/1")).unwrap();

    companyscope_cmd()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Scraped 0 of 1 URLs (1 failed)"));

    let files: Vec<_> = fs::read_dir(temp_dir.path().join("out")).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn output_flags_override_settings() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/company/9");
        then.status(200)
            .header("content-type", "text/html")
            .body(profile_page("nine"));
    });

    let temp_dir = TempDir::new().unwrap();
    let config = write_settings(temp_dir.path(), &["json"]);
    let input = temp_dir.path().join("urls.txt");
    fs::write(&input, server.url("/company/9")).unwrap();
    let override_dir = temp_dir.path().join("elsewhere");

    companyscope_cmd()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&override_dir)
        .arg("--format")
        .arg("csv")
        .assert()
        .success();

    let files: Vec<_> = fs::read_dir(&override_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "csv");
    assert!(!temp_dir.path().join("out").exists());
}
