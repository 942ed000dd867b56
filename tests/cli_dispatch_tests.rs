use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_risk_odds")
}

fn risk_odds() -> Command {
    let mut command = Command::new(bin());
    command
        .env_remove("RISK_ODDS_TRIALS")
        .env_remove("RISK_ODDS_MAX_TRIALS")
        .env_remove("RISK_ODDS_SEED")
        .env_remove("RISK_ODDS_WORKERS");
    command
}

#[test]
fn simulate_command_prints_result_block() {
    let output = risk_odds()
        .args(["simulate", "5", "3", "2000", "--seed", "7"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("2,000 simulations"), "stdout: {stdout}");
    assert!(stdout.contains("Armies (A/D): 5 / 3"));
    assert!(stdout.contains("Attacker win chance: "));
    assert!(stdout.contains("Avg. remaining if A wins: "));
    assert!(stdout.contains("Avg. remaining if D wins: "));
}

#[test]
fn simulate_command_emits_json_with_equal_length_series() {
    let output = risk_odds()
        .args(["simulate", "8", "4", "500", "--seed", "3", "--json"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("simulate should emit json");
    assert_eq!(payload["seed"].as_u64(), Some(3));
    assert_eq!(payload["result"]["trials"].as_u64(), Some(500));
    let attacker = payload["result"]["attacker_avg_losses"]
        .as_array()
        .expect("attacker series");
    let defender = payload["result"]["defender_avg_losses"]
        .as_array()
        .expect("defender series");
    assert_eq!(attacker.len(), defender.len());
    assert_eq!(payload["chart"]["labels"][0].as_u64(), Some(1));
    assert_eq!(
        payload["chart"]["labels"].as_array().map(Vec::len),
        Some(attacker.len())
    );
}

#[test]
fn seeded_simulate_is_reproducible_across_processes() {
    let run = || {
        risk_odds()
            .args(["simulate", "6", "6", "1000", "--seed", "42", "--table"])
            .output()
            .expect("simulate should run")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn parallel_simulate_ignores_worker_count_for_results() {
    let run = |workers: &str| {
        risk_odds()
            .args(["simulate", "6", "4", "3000", "--seed", "5", "--json", "--workers", workers])
            .output()
            .expect("simulate should run")
            .stdout
    };
    let one: serde_json::Value = serde_json::from_slice(&run("1")).expect("json");
    let four: serde_json::Value = serde_json::from_slice(&run("4")).expect("json");
    assert_eq!(one["result"], four["result"]);
    assert_eq!(one["parallel"], serde_json::Value::Bool(true));
}

#[test]
fn simulate_rejects_non_positive_values() {
    let output = risk_odds()
        .args(["simulate", "0", "3"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Values must be positive."), "stderr: {stderr}");
}

#[test]
fn simulate_without_counts_prints_usage() {
    let output = risk_odds()
        .arg("simulate")
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: risk_odds simulate"));
}

#[test]
fn default_trial_count_comes_from_environment() {
    let output = risk_odds()
        .env("RISK_ODDS_TRIALS", "1234")
        .env("RISK_ODDS_SEED", "1")
        .args(["simulate", "3", "2"])
        .output()
        .expect("simulate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1,234 simulations"), "stdout: {stdout}");
}

#[test]
fn battle_command_emits_trace() {
    let output = risk_odds()
        .args(["battle", "4", "3", "--seed", "11"])
        .output()
        .expect("battle should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("battle should emit json");
    let rounds = payload["rounds"].as_array().expect("rounds array");
    assert_eq!(
        rounds.len() as u64,
        payload["result"]["confrontations"].as_u64().expect("count")
    );
    assert_eq!(rounds[0]["round"].as_u64(), Some(1));
    assert!(matches!(
        payload["result"]["winner"].as_str(),
        Some("attacker") | Some("defender")
    ));
}

#[test]
fn unknown_command_returns_usage() {
    let output = risk_odds()
        .arg("serve")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: risk_odds"));
}
