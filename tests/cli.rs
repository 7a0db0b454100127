use assert_cmd::Command;
use predicates::prelude::*;

fn campaign_sim() -> Command {
    let mut cmd = Command::cargo_bin("campaign-sim").unwrap();
    for var in ["STUDIO_URL", "STORE_URL", "COMPOSABLE_KEY", "PROJECT_ID"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_lists_commands() {
    campaign_sim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("read"));
}

#[test]
fn schema_prints_config_by_default() {
    campaign_sim()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connection\""))
        .stdout(predicate::str::contains("\"guides\""));
}

#[test]
fn schema_prints_plan_shape() {
    campaign_sim()
        .args(["schema", "plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sessionNumber"))
        .stdout(predicate::str::contains("campaignId"));
}

#[test]
fn simulate_without_connection_settings_fails() {
    let dir = tempfile::tempdir().unwrap();
    campaign_sim()
        .current_dir(dir.path())
        .args(["simulate", "camp-1", "--turns", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("studio_url"));
}

#[test]
fn read_requires_campaign_id() {
    campaign_sim()
        .arg("read")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<CAMPAIGN_ID>"));
}

#[test]
fn unreadable_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("campaign-sim.yaml");
    std::fs::write(&config, "party: [not, a, map]").unwrap();

    campaign_sim()
        .args(["read", "camp-1", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn dotenv_file_supplies_connection_settings() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        "STUDIO_URL=http://127.0.0.1:9\nSTORE_URL=http://127.0.0.1:9\n",
    )
    .unwrap();

    // Passes validation, then fails reaching the unreachable studio
    campaign_sim()
        .current_dir(dir.path())
        .args(["simulate", "camp-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("resolving record types"))
        .stderr(predicate::str::contains("Missing required connection").not());
}
