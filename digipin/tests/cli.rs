use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Throwaway config directory; every command runs against it.
struct DigipinTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl DigipinTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    fn with_settings(yaml: &str) -> Result<Self> {
        let env = Self::new()?;
        std::fs::write(env.root.join("digipin.yaml"), yaml)?;
        Ok(env)
    }

    fn audit_log(&self) -> PathBuf {
        self.root.join("digipin_audit.jsonl")
    }

    fn digipin(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("digipin"));
        cmd.current_dir(&self.root).arg("--config-dir").arg(&self.root);
        for key in [
            "DIGIPIN_API_BASE_URL",
            "DIGIPIN_MODE",
            "DIGIPIN_DEMO_MODE",
            "DIGIPIN_TIMEOUT_SECS",
            "DIGIPIN_AUDIT_LOG",
            "DIGIPIN_USER_ID",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    fn offline(&self) -> Command {
        let mut cmd = self.digipin();
        cmd.arg("--offline");
        cmd
    }
}

fn closed_port() -> Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

fn read(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

#[test]
fn test_encode_offline() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["encode", "--lat", "0", "--lon", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DIGIPIN: DPDBBA01B7740"))
        .stdout(predicate::str::contains("Source: offline engine"));

    let audit = read(&env.audit_log())?;
    assert_eq!(audit.lines().count(), 1);
    assert!(audit.contains("\"generate_digipin\""));
    assert!(audit.contains("\"demo-user\""));
    Ok(())
}

#[test]
fn test_encode_rejects_out_of_range_coordinate() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["encode", "--lat", "91", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid coordinate"));

    assert!(!env.audit_log().exists());
    Ok(())
}

#[test]
fn test_unreachable_backend_falls_back() -> Result<()> {
    let port = closed_port()?;
    let env = DigipinTestEnv::with_settings(&format!(
        "api_base_url: http://127.0.0.1:{port}\ntimeout_secs: 2\n"
    ))?;

    env.digipin()
        .args(["encode", "--lat", "28.6139", "--lon", "77.2090", "--user", "field-agent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend unreachable"));

    let audit = read(&env.audit_log())?;
    assert!(audit.contains("\"fallback\""));
    assert!(audit.contains("\"field-agent\""));
    Ok(())
}

#[test]
fn test_revoke_is_not_faked_when_backend_unreachable() -> Result<()> {
    let port = closed_port()?;
    let env = DigipinTestEnv::with_settings(&format!(
        "api_base_url: http://127.0.0.1:{port}\ntimeout_secs: 2\n"
    ))?;

    env.digipin()
        .args(["revoke", "--consent-id", "consent-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unreachable"));
    Ok(())
}

#[test]
fn test_validate_requests_consent_and_passes() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args([
            "validate",
            "--lat",
            "28.6139",
            "--lon",
            "77.2090",
            "--street",
            "Main Street",
            "--area",
            "Sector 15",
            "--district",
            "New Delhi",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consent: consent-"))
        .stdout(predicate::str::contains("coordinate_validity"))
        .stdout(predicate::str::contains("Main Street, Sector 15, New Delhi"))
        .stdout(predicate::str::contains("Confidence: 92%"))
        .stdout(predicate::str::contains("VALID address"));

    let audit = read(&env.audit_log())?;
    assert_eq!(audit.lines().count(), 2);
    assert!(audit.contains("\"request_consent\""));
    assert!(audit.contains("\"validate_address\""));
    Ok(())
}

#[test]
fn test_validate_reports_mismatching_digipin() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args([
            "validate",
            "--lat",
            "28.6139",
            "--lon",
            "77.2090",
            "--street",
            "Main Street",
            "--area",
            "Sector 15",
            "--district",
            "New Delhi",
            "--digipin",
            "DPBAD",
            "--consent-id",
            "consent-existing",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not match"))
        .stderr(predicate::str::contains("INVALID address"));
    Ok(())
}

#[test]
fn test_validate_refuses_sparse_address() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["validate", "--lat", "28.6", "--lon", "77.2", "--house-no", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("too sparse"));

    assert!(!env.audit_log().exists());
    Ok(())
}

#[test]
fn test_suggest_predicts_known_address() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["suggest", "--district", "New Delhi", "--pincode", "110001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted address: India Gate, New Delhi"))
        .stdout(predicate::str::contains("Connaught Place, New Delhi"));
    Ok(())
}

#[test]
fn test_suggest_keeps_unknown_address_as_typed() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["suggest", "--street", "Baker Street", "--district", "London"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Predicted address: Baker Street, London"))
        .stdout(predicate::str::contains("No similar known address"));
    Ok(())
}

#[test]
fn test_status_is_not_tracked_offline() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["status", "--request-id", "req-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("req-123"))
        .stdout(predicate::str::contains("not tracked in offline mode"));
    Ok(())
}

#[test]
fn test_status_reports_unreachable_backend() -> Result<()> {
    let port = closed_port()?;
    let env = DigipinTestEnv::with_settings(&format!(
        "api_base_url: http://127.0.0.1:{port}\ntimeout_secs: 2\n"
    ))?;

    env.digipin()
        .args(["status", "--request-id", "req-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend unreachable"))
        .stdout(predicate::str::contains("Backend: unreachable"));
    Ok(())
}

#[test]
fn test_status_rejects_dot_request_id() -> Result<()> {
    let port = closed_port()?;
    let env = DigipinTestEnv::with_settings(&format!(
        "api_base_url: http://127.0.0.1:{port}\ntimeout_secs: 2\n"
    ))?;

    env.digipin()
        .args(["status", "--request-id", ".."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid identifier"));
    Ok(())
}

#[test]
fn test_settings_file_selects_offline_mode() -> Result<()> {
    let env = DigipinTestEnv::with_settings("mode: offline\ndefault_user_id: clerk-9\n")?;

    env.digipin()
        .args(["consent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consent granted"))
        .stdout(predicate::str::contains("User: clerk-9 (address_validation)"));
    Ok(())
}

#[test]
fn test_demo_mode_variable_forces_offline() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.digipin()
        .env("DIGIPIN_DEMO_MODE", "true")
        .args(["revoke", "--consent-id", "consent-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("revoked"));
    Ok(())
}

#[test]
fn test_audit_list_and_export() -> Result<()> {
    let env = DigipinTestEnv::new()?;

    env.offline()
        .args(["encode", "--lat", "18.922", "--lon", "72.8347", "--user", "alice"])
        .assert()
        .success();
    env.offline()
        .args(["consent", "--user", "alice"])
        .assert()
        .success();

    env.offline()
        .args(["audit", "--user", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generate_digipin"))
        .stdout(predicate::str::contains("request_consent"));

    env.offline()
        .args(["audit", "--user", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No audit entries"));

    let export = env.root.join("alice.json");
    env.offline()
        .args(["audit", "--user", "alice", "--export"])
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 audit entries"));

    let exported: serde_json::Value = serde_json::from_str(&read(&export)?)?;
    assert_eq!(exported.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn test_invalid_settings_are_reported() -> Result<()> {
    let env = DigipinTestEnv::with_settings("timeout_secs: 0\n")?;

    env.digipin()
        .args(["encode", "--lat", "0", "--lon", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
    Ok(())
}
