use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2", "--difficulty", "hard"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let winner = v["winner"].as_str().expect("winner is a string");
    assert!(winner == "player" || winner == "computer");
    assert_eq!(v["difficulty"], "Hard");
    assert!(v["player"]["shots"].as_u64().unwrap() >= 17 || winner == "computer");
}
