use assert_cmd::prelude::*;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

/// An address nothing listens on; commands that reach the network fail fast.
const DEAD_API: &str = "http://127.0.0.1:9/";

fn token(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.c2ln", header, payload)
}

fn admin_token() -> String {
    token(serde_json::json!({
        "userType": "ADMIN",
        "email": "coordinator@example.org",
        "exp": (Utc::now() + chrono::Duration::hours(2)).timestamp(),
    }))
}

fn write_session(dir: &Path, credential: &str) -> PathBuf {
    let path = dir.join("session.yaml");
    fs::write(&path, format!("token: {}\n", credential)).expect("failed to write session");
    path
}

/// A carectl command isolated from the user's home and environment.
fn carectl(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("carectl"));
    cmd.arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("--session")
        .arg(dir.path().join("session.yaml"))
        .env_remove("CARECTL_API_URL")
        .env_remove("CARECTL_FORMAT")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    Command::new(assert_cmd::cargo::cargo_bin!("carectl"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("patient"))
        .stdout(predicate::str::contains("rounds"));
}

#[test]
fn status_without_config_or_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    carectl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration not found"))
        .stdout(predicate::str::contains("Not signed in"));

    Ok(())
}

#[test]
fn status_reads_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");
    fs::write(
        &config_path,
        "api_url: https://care.example.org/api\npreferences:\n  page_size: 10\n",
    )?;
    write_session(temp.path(), &admin_token());

    carectl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://care.example.org/api/"))
        .stdout(predicate::str::contains("Page size 10"))
        .stdout(predicate::str::contains("Signed in as coordinator"));

    Ok(())
}

#[test]
fn whoami_without_session_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    carectl(&temp)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    Ok(())
}

#[test]
fn whoami_reports_stored_session() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), &admin_token());

    carectl(&temp)
        .args(["--format", "json", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"displayName\": \"coordinator\""))
        .stdout(predicate::str::contains("\"landing\": \"/admin\""));

    Ok(())
}

#[test]
fn logout_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let session = write_session(temp.path(), &admin_token());

    carectl(&temp).arg("logout").assert().success();
    carectl(&temp).arg("logout").assert().success();

    carectl(&temp).arg("whoami").assert().failure();
    assert!(!session.exists() || fs::read_to_string(&session)?.trim().is_empty());

    Ok(())
}

#[test]
fn admin_commands_require_login() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    carectl(&temp)
        .args(["--api-url", DEAD_API, "patient", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"))
        .stderr(predicate::str::contains("Run 'carectl login' to sign in"));

    Ok(())
}

#[test]
fn admin_cannot_open_volunteer_rounds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), &admin_token());

    carectl(&temp)
        .args(["--api-url", DEAD_API, "rounds", "today"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/volunteer/todays-visits"))
        .stderr(predicate::str::contains("requires a different role"));

    Ok(())
}

#[test]
fn expired_session_is_cleared_on_startup() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let expired = token(serde_json::json!({
        "userType": "ADMIN",
        "email": "coordinator@example.org",
        "exp": (Utc::now() - chrono::Duration::minutes(5)).timestamp(),
    }));
    write_session(temp.path(), &expired);

    carectl(&temp)
        .args(["--api-url", DEAD_API, "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    carectl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    Ok(())
}

#[test]
fn invalid_patient_is_rejected_before_sending() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    write_session(temp.path(), &admin_token());

    carectl(&temp)
        .args([
            "--api-url",
            DEAD_API,
            "patient",
            "add",
            "--name",
            "Asha Menon",
            "--mobile",
            "12345",
            "--age",
            "72",
            "--gender",
            "Female",
            "--address",
            "12 Beach Road",
            "--condition",
            "COPD",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a valid 10-digit mobile number"))
        .stderr(predicate::str::contains("Network error").not());

    Ok(())
}

#[test]
fn completion_generates_script() {
    Command::new(assert_cmd::cargo::cargo_bin!("carectl"))
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("carectl"));
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_stores_credential_and_lands_on_role_home() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let credential = admin_token();

    let _auth = server
        .mock("POST", "/auth/authenticate")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "email": "coordinator@example.org"
        })))
        .with_status(200)
        .with_body(serde_json::json!({ "token": credential }).to_string())
        .create();

    let temp = tempdir()?;
    carectl(&temp)
        .args([
            "--api-url",
            &server.url(),
            "login",
            "--email",
            "coordinator@example.org",
            "--password",
            "secret1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as"))
        .stdout(predicate::str::contains("/admin"));

    let stored = fs::read_to_string(temp.path().join("session.yaml"))?;
    assert!(stored.contains(&credential));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_with_unknown_role_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let credential = token(serde_json::json!({ "userType": "DOCTOR" }));

    let _auth = server
        .mock("POST", "/auth/authenticate")
        .with_status(200)
        .with_body(serde_json::json!({ "token": credential }).to_string())
        .create();

    let temp = tempdir()?;
    carectl(&temp)
        .args([
            "--api-url",
            &server.url(),
            "login",
            "--email",
            "someone@example.org",
            "--password",
            "secret1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DOCTOR"));

    assert!(!temp.path().join("session.yaml").exists());

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_with_expired_credential_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let credential = token(serde_json::json!({ "userType": "ADMIN", "exp": 1 }));

    let _auth = server
        .mock("POST", "/auth/authenticate")
        .with_status(200)
        .with_body(serde_json::json!({ "token": credential }).to_string())
        .create();

    let temp = tempdir()?;
    carectl(&temp)
        .args([
            "--api-url",
            &server.url(),
            "login",
            "--email",
            "coordinator@example.org",
            "--password",
            "secret1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already expired"))
        .stdout(predicate::str::contains("Signed in as").not());

    carectl(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn patient_list_prints_page() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _patients = server
        .mock("GET", "/admin/list-patients")
        .match_query(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("page".into(), "0".into()),
            mockito::Matcher::UrlEncoded("size".into(), "6".into()),
        ]))
        .match_header("authorization", mockito::Matcher::Regex("^Bearer ".into()))
        .with_status(200)
        .with_body(
            r#"{
                "content": [{ "id": 1, "name": "Asha Menon", "age": 72 }],
                "number": 0,
                "totalPages": 1,
                "totalElements": 1
            }"#,
        )
        .create();

    let temp = tempdir()?;
    write_session(temp.path(), &admin_token());

    carectl(&temp)
        .args(["--api-url", &server.url(), "--format", "json", "patient", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha Menon"))
        .stdout(predicate::str::contains("\"totalPages\": 1"));

    Ok(())
}
