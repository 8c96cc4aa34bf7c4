use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert!(v["rounds"].as_u64().unwrap() >= 1);
    let loser_life = if v["winner"] == "player" {
        &v["bot"]["life"]
    } else {
        &v["player"]["life"]
    };
    assert_eq!(loser_life.as_u64(), Some(0));
}

#[test]
fn sim_binary_is_reproducible() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_sim"))
            .args(["42", "12"])
            .output()
            .expect("failed to run sim binary")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn sim_binary_rejects_bad_board() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "3"])
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
