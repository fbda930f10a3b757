use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn wsbound() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wsbound"))
}

#[test]
fn solve_command_reports_the_deuteron_like_ground_state() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("state.json");

    let output = wsbound()
        .args([
            "solve",
            "--depth",
            "50.0",
            "--radius",
            "1.5",
            "--diffuseness",
            "0.6",
            "--pair",
            "np",
            "--json",
        ])
        .arg(&report_path)
        .output()
        .expect("binary should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1s (nodes=0)"), "stdout: {}", stdout);
    assert!(stdout.contains("converged"), "stdout: {}", stdout);

    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report should exist"))
            .expect("report JSON should parse");
    assert_eq!(parsed["converged"], Value::Bool(true));
    assert_eq!(parsed["node_count"], Value::from(0));
    let energy = parsed["energy_mev"].as_f64().expect("energy field");
    assert!(
        (energy + 2.2).abs() < 0.5,
        "reported energy {} MeV should sit near -2.2 MeV",
        energy
    );
    assert!(
        parsed["wavefunction"]
            .as_array()
            .expect("wavefunction samples")
            .len()
            > 1_000
    );
}

#[test]
fn solve_command_exits_one_when_the_state_does_not_converge() {
    let output = wsbound()
        .args(["solve", "--depth", "10.0", "--nodes", "5"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("requested 5 node(s)"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn solve_command_rejects_non_physical_wells() {
    let output = wsbound()
        .args(["solve", "--depth", "-3.0"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Error:"),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn spectrum_command_lists_states_in_energy_order() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("spectrum.json");

    let output = wsbound()
        .args([
            "spectrum",
            "--depth",
            "100.0",
            "--radius",
            "3.2",
            "--pair",
            "alpha-n",
            "--json",
        ])
        .arg(&report_path)
        .output()
        .expect("binary should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report should exist"))
            .expect("report JSON should parse");
    let states = parsed.as_array().expect("spectrum array");
    assert!(states.len() >= 2, "expected at least two s states");

    let energies: Vec<f64> = states
        .iter()
        .map(|state| state["energy_mev"].as_f64().expect("energy field"))
        .collect();
    for pair in energies.windows(2) {
        assert!(pair[0] < pair[1], "energies out of order: {:?}", energies);
    }
    for (nodes, state) in states.iter().enumerate() {
        assert_eq!(state["node_count"], Value::from(nodes));
    }
}

#[test]
fn help_is_printed_without_an_error_exit() {
    let output = wsbound().arg("--help").output().expect("binary should run");
    assert!(output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stdout).contains("solve"),
        "help should list the solve subcommand"
    );
}
