use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

const TREE: &str = "click 532 330";
const GROUND: &str = "click 270 694";
const PLAIN_WALL: &str = "click 919 257";
const LETTER: &str = "click 774 235";

fn config_file(name: &str, correct_place: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "gift-hunt-{name}-{}.toml",
        std::process::id()
    ));
    let contents = format!(
        "seed = 11\n\n[[catalog]]\n\
         asset = \"images/letter.png\"\n\
         correct_place = \"{correct_place}\"\n"
    );
    fs::write(&path, contents).expect("write config");
    path
}

fn run(config: &Path, script: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gift-hunt"))
        .arg("--config")
        .arg(config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to launch gift-hunt");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.join("\n").as_bytes())
        .expect("failed to write script");
    child.wait_with_output().expect("gift-hunt did not finish")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "gift-hunt failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "gift-hunt"])
        .status()
        .expect("failed to invoke cargo check for gift-hunt CLI binary");

    assert!(status.success(), "cargo check --bin gift-hunt should succeed");
}

#[test]
fn scripted_win_replays_deterministically() {
    let config = config_file("win", "tree");
    let script = [
        "load room",
        "load gift",
        LETTER,
        "dismiss",
        TREE,
        "accept",
        "wait 7000",
    ];

    let first = stdout_of(&run(&config, &script));
    let second = stdout_of(&run(&config, &script));
    assert_eq!(first, second);
    assert!(first.contains("letter: images/letter.png"), "{first}");
    assert!(first.contains("attempts: 1"), "{first}");
    assert!(first.contains("outcome: won"), "{first}");
    assert!(first.contains("gifts in scene: 1"), "{first}");
}

#[test]
fn four_misses_lose_the_playthrough() {
    let config = config_file("lose", "window");
    let mut script = vec!["load room", "load gift"];
    for _ in 0..4 {
        script.extend([GROUND, "accept", "wait 7000"]);
    }
    script.extend([GROUND, "accept"]);

    let stdout = stdout_of(&run(&config, &script));
    assert!(stdout.contains("attempts: 4"), "{stdout}");
    assert!(stdout.contains("outcome: lost-final"), "{stdout}");
}

#[test]
fn declines_and_plain_walls_leave_attempts_untouched() {
    let config = config_file("decline", "tree");
    let script = [
        "load room",
        PLAIN_WALL,
        TREE,
        "resize 1024 768",
        "decline",
        "accept",
    ];

    let stdout = stdout_of(&run(&config, &script));
    assert!(stdout.contains("attempts: 0"), "{stdout}");
    assert!(stdout.contains("outcome: pending"), "{stdout}");
}

#[test]
fn clicks_before_the_room_loads_do_nothing() {
    let config = config_file("pending", "tree");
    let stdout = stdout_of(&run(&config, &[TREE, "accept"]));
    assert!(stdout.contains("attempts: 0"), "{stdout}");
}

#[test]
fn empty_catalog_exits_with_error() {
    let path = std::env::temp_dir().join(format!(
        "gift-hunt-empty-{}.toml",
        std::process::id()
    ));
    fs::write(&path, "catalog = []\n").expect("write config");

    let output = run(&path, &["load room"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start the playthrough"), "{stderr}");
}

#[test]
fn malformed_script_exits_with_error() {
    let config = config_file("malformed", "tree");
    let output = run(&config, &["load room", "click here"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script line 2"), "{stderr}");
}
