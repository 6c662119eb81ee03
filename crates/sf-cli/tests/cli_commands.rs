//! Integration tests for the sf CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sf() -> Command {
    let mut cmd = Command::cargo_bin("sf").unwrap();
    cmd.env_remove("STORY_FORGE_DATA")
        .env_remove("STORY_FORGE_SEED")
        .env_remove("RUST_LOG");
    cmd
}

fn story(dir: &TempDir) -> Command {
    let mut cmd = sf();
    cmd.arg("story").arg("--data-dir").arg(dir.path());
    cmd
}

// ---------------------------------------------------------------------------
// scenes
// ---------------------------------------------------------------------------

#[test]
fn scenes_prints_table() {
    sf().arg("scenes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aboard the Aurora"))
        .stdout(predicate::str::contains("Critical Mass"))
        .stdout(predicate::str::contains("7 scenes, start: start"));
}

#[test]
fn scenes_json() {
    let output = sf().args(["scenes", "--json"]).output().unwrap();
    assert!(output.status.success());
    let scenes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let scenes = scenes.as_array().unwrap();
    assert_eq!(scenes.len(), 7);
    assert_eq!(scenes[0]["id"], "start");
    assert_eq!(scenes[1]["choices"][1]["target"], "distress");
}

// ---------------------------------------------------------------------------
// chat
// ---------------------------------------------------------------------------

#[test]
fn chat_conversation() {
    sf().args(["chat", "--seed", "3", "--delay-ms", "0"])
        .write_stdin(
            "character Lyra | A wandering bard | cheerful\n\
             select lyra\n\
             Hello there\n\
             log\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Character created: Lyra"))
        .stdout(predicate::str::contains("Chatting with Lyra"))
        .stdout(predicate::str::contains("Lyra is typing..."))
        .stdout(predicate::str::contains("you: Hello there"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn chat_reply_is_delivered_before_exit() {
    sf().args(["chat", "--seed", "3", "--delay-ms", "50"])
        .write_stdin("character Nova | A pilot\nselect Nova\nping\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nova: "));
}

#[test]
fn chat_requires_selection() {
    sf().args(["chat", "--delay-ms", "0"])
        .write_stdin("say hello\ndance\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("select a character first"))
        .stdout(predicate::str::contains("unknown command: dance"));
}

#[test]
fn chat_incomplete_character() {
    sf().args(["chat", "--delay-ms", "0"])
        .write_stdin("character Lyra\ncharacters\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("usage: character"))
        .stdout(predicate::str::contains("No characters yet"));
}

#[test]
fn chat_worlds() {
    sf().args(["chat", "--delay-ms", "0"])
        .write_stdin("world Aurelia | Floating islands | fantasy\nworlds\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("World created: Aurelia"))
        .stdout(predicate::str::contains("Aurelia [fantasy] - Floating islands"));
}

// ---------------------------------------------------------------------------
// story
// ---------------------------------------------------------------------------

#[test]
fn story_starts_at_start() {
    let dir = TempDir::new().unwrap();
    story(&dir)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Aboard the Aurora =="))
        .stdout(predicate::str::contains("1. Head to the bridge"));
}

#[test]
fn story_progress_persists() {
    let dir = TempDir::new().unwrap();
    story(&dir)
        .write_stdin("1\n2\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== The Derelict =="));

    assert!(dir.path().join("gameProgress.json").exists());
    let saved = fs::read_to_string(dir.path().join("gameProgress.json")).unwrap();
    assert!(saved.contains("\"version\": 1"));
    assert!(saved.contains("\"currentScene\": \"distress\""));

    story(&dir)
        .write_stdin("profile\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resuming at 'The Derelict'"))
        .stdout(predicate::str::contains("Scenes visited: 2"));
}

#[test]
fn story_reset_keeps_crew() {
    let dir = TempDir::new().unwrap();
    story(&dir)
        .write_stdin("crew add Vega | Pilot | *\n1\nreset\ncrew\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vega joined the crew."))
        .stdout(predicate::str::contains("Story restarted."))
        .stdout(predicate::str::contains("1. * Vega - Pilot"));

    story(&dir)
        .write_stdin("crew clear\ncrew\nprofile\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crew cleared."))
        .stdout(predicate::str::contains("No crew yet"))
        .stdout(predicate::str::contains("Scenes visited: 0"));
}

#[test]
fn story_memory_mode_saves_nothing() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    sf().arg("story")
        .arg("--memory")
        .arg("--data-dir")
        .arg(&data)
        .write_stdin("1\ncrew add Ito | Engineer\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== The Bridge =="));
    assert!(!data.exists());
}

#[test]
fn story_data_dir_from_env() {
    let dir = TempDir::new().unwrap();
    sf().arg("story")
        .env("STORY_FORGE_DATA", dir.path())
        .write_stdin("2\n")
        .assert()
        .success();
    assert!(dir.path().join("gameProgress.json").exists());
}

#[test]
fn story_corrupt_progress_falls_back() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gameProgress.json"), "{not json").unwrap();
    story(&dir)
        .write_stdin("look\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Aboard the Aurora =="))
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn story_legacy_progress_is_migrated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("gameProgress.json"),
        r#"{"currentScene":"engineering","history":["old"]}"#,
    )
    .unwrap();
    story(&dir)
        .write_stdin("look\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Engineering =="));
}

#[test]
fn story_legacy_crew_is_migrated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("characters.json"),
        r#"[{"id":"1712345678901","name":"Vega","description":"Pilot","emoji":"*"}]"#,
    )
    .unwrap();
    story(&dir)
        .write_stdin("crew
goto rescue
")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. * Vega - Pilot"))
        .stdout(predicate::str::contains("== Survivors =="));
}

#[test]
fn story_bad_choice_is_reported() {
    let dir = TempDir::new().unwrap();
    story(&dir)
        .write_stdin("9\nwarp\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid choice"))
        .stdout(predicate::str::contains("unknown command: warp"));
}

// ---------------------------------------------------------------------------
// tui
// ---------------------------------------------------------------------------

#[test]
fn tui_rejects_unknown_tab() {
    let dir = TempDir::new().unwrap();
    sf().args(["tui", "--tab", "dice", "--data-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tab: dice"));
}

#[test]
fn help_lists_commands() {
    sf().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("story"))
        .stdout(predicate::str::contains("scenes"))
        .stdout(predicate::str::contains("tui"));
}
