#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn callsheet(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("callsheet").unwrap();
    cmd.current_dir(dir.path()).env("CALLSHEET_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    callsheet(dir)
        .args(["init", "--project", "eagles"])
        .assert()
        .success();
}

fn create_matchup(dir: &TempDir) {
    callsheet(dir)
        .args(["team", "create", "varsity", "--name", "Varsity"])
        .assert()
        .success();
    callsheet(dir)
        .args(["opponent", "create", "central", "--name", "Central", "--team", "varsity"])
        .assert()
        .success();
}

fn save_scouting(dir: &TempDir) {
    callsheet(dir)
        .args([
            "scouting",
            "set",
            "--team",
            "varsity",
            "--opponent",
            "central",
            "--front",
            "4-3=60",
            "--front",
            "3-4=40",
            "--coverage",
            "Cover 3=70",
            "--blitz-pct",
            "25",
        ])
        .assert()
        .success();
}

// ---------------------------------------------------------------------------
// callsheet init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    assert!(dir.path().join(".callsheet").is_dir());
    assert!(dir.path().join(".callsheet/config.yaml").exists());
    assert!(dir.path().join(".callsheet/help-videos.yaml").exists());
    assert!(dir.path().join(".callsheet/teams/default/manifest.yaml").exists());
    assert!(dir.path().join(".callsheet/teams/default/terminology.yaml").exists());
    assert!(dir.path().join(".callsheet/teams/default/master-pool.yaml").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    // Run twice — should succeed both times without error
    init_project(&dir);
    callsheet(&dir).arg("init").assert().success();
}

#[test]
fn commands_fail_before_init() {
    let dir = TempDir::new().unwrap();
    callsheet(&dir).args(["team", "list"]).assert().failure();
}

// ---------------------------------------------------------------------------
// callsheet team
// ---------------------------------------------------------------------------

#[test]
fn team_create_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["team", "create", "varsity", "--name", "Varsity Offense"])
        .assert()
        .success();

    callsheet(&dir)
        .args(["team", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("varsity"));
}

#[test]
fn team_create_invalid_slug_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["team", "create", "INVALID SLUG"])
        .assert()
        .failure();
}

#[test]
fn team_create_duplicate_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["team", "create", "varsity"])
        .assert()
        .success();
    callsheet(&dir)
        .args(["team", "create", "varsity"])
        .assert()
        .failure();
}

#[test]
fn template_team_cannot_be_deleted() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["team", "delete", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template team"));
}

#[test]
fn removing_last_coach_deletes_team() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args([
            "team",
            "create",
            "varsity",
            "--coach-email",
            "hc@example.com",
            "--coach-name",
            "Head Coach",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["team", "remove-coach", "varsity", "--email", "hc@example.com"])
        .assert()
        .success();

    assert!(!dir.path().join(".callsheet/teams/varsity").exists());
}

#[test]
fn removing_last_coach_never_deletes_template_team() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args([
            "team",
            "add-coach",
            "default",
            "--email",
            "hc@example.com",
            "--name",
            "Head Coach",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["team", "remove-coach", "default", "--email", "hc@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("template team"));

    assert!(dir
        .path()
        .join(".callsheet/teams/default/master-pool.yaml")
        .exists());
}

// ---------------------------------------------------------------------------
// callsheet opponent
// ---------------------------------------------------------------------------

#[test]
fn opponent_create_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args(["opponent", "list", "--team", "varsity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("central"));
}

#[test]
fn opponent_commands_need_a_team() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    // No --team and nothing selected in the session
    callsheet(&dir)
        .args(["opponent", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--team"));
}

// ---------------------------------------------------------------------------
// callsheet scouting
// ---------------------------------------------------------------------------

#[test]
fn scouting_set_and_show() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);
    save_scouting(&dir);

    callsheet(&dir)
        .args(["scouting", "show", "--team", "varsity", "--opponent", "central"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4-3 60%"))
        .stdout(predicate::str::contains("Cover 3 70%"));
}

#[test]
fn scouting_show_without_report() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args(["scouting", "show", "--team", "varsity", "--opponent", "central"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No scouting report"));
}

#[test]
fn scouting_set_rejects_malformed_look() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args([
            "scouting",
            "set",
            "--team",
            "varsity",
            "--opponent",
            "central",
            "--front",
            "4-3",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// callsheet pool
// ---------------------------------------------------------------------------

#[test]
fn pool_regenerate_fills_from_master() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);
    save_scouting(&dir);

    callsheet(&dir)
        .args([
            "pool",
            "regenerate",
            "--team",
            "varsity",
            "--opponent",
            "central",
            "--target",
            "run_game=4",
            "--target",
            "quick_game=2",
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("revision 1"));

    let output = callsheet(&dir)
        .args(["pool", "show", "--team", "varsity", "--opponent", "central", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["revision"], 1);
    assert_eq!(json["categories"]["run_game"].as_array().unwrap().len(), 4);
    assert_eq!(json["categories"]["quick_game"].as_array().unwrap().len(), 2);
}

#[test]
fn pool_regenerate_requires_scouting() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args(["pool", "regenerate", "--team", "varsity", "--opponent", "central"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scouting"));
}

#[test]
fn locked_play_survives_regeneration() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);
    save_scouting(&dir);

    callsheet(&dir)
        .args([
            "pool", "regenerate", "--team", "varsity", "--opponent", "central",
            "--target", "run_game=3", "--seed", "1",
        ])
        .assert()
        .success();

    let output = callsheet(&dir)
        .args(["pool", "show", "--team", "varsity", "--opponent", "central", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let id = json["categories"]["run_game"][0]["id"].as_str().unwrap().to_string();

    callsheet(&dir)
        .args(["pool", "lock", &id, "--team", "varsity", "--opponent", "central"])
        .assert()
        .success();

    callsheet(&dir)
        .args([
            "pool", "regenerate", "--team", "varsity", "--opponent", "central",
            "--target", "run_game=3", "--seed", "2",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["pool", "show", "--team", "varsity", "--opponent", "central", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&id));
}

#[test]
fn pool_edit_sets_custom_call() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);
    save_scouting(&dir);

    callsheet(&dir)
        .args([
            "pool", "regenerate", "--team", "varsity", "--opponent", "central",
            "--target", "run_game=2", "--seed", "3",
        ])
        .assert()
        .success();

    let output = callsheet(&dir)
        .args(["pool", "show", "--team", "varsity", "--opponent", "central", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let id = json["categories"]["run_game"][0]["id"].as_str().unwrap().to_string();

    callsheet(&dir)
        .args([
            "pool", "edit", &id, "--call", "Thunder Rt 36 Power",
            "--team", "varsity", "--opponent", "central",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["pool", "show", "--team", "varsity", "--opponent", "central"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thunder Rt 36 Power"));
}

#[test]
fn pool_mutation_on_unknown_play_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args([
            "pool",
            "lock",
            "00000000-0000-0000-0000-000000000000",
            "--team",
            "varsity",
            "--opponent",
            "central",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// callsheet terminology
// ---------------------------------------------------------------------------

#[test]
fn terminology_falls_back_to_template() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args(["terminology", "list", "run_game", "--team", "varsity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inside_zone"))
        .stdout(predicate::str::contains("Zone"));
}

#[test]
fn terminology_save_and_restore() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args([
            "terminology",
            "save",
            "run_game",
            "--team",
            "varsity",
            "--select",
            "inside_zone",
            "--select",
            "power",
            "--rename",
            "power=Dallas",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["terminology", "list", "run_game", "--team", "varsity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dallas"))
        .stdout(predicate::str::contains("yes"));

    callsheet(&dir)
        .args(["terminology", "restore", "--team", "varsity"])
        .assert()
        .success();

    callsheet(&dir)
        .args(["terminology", "list", "run_game", "--team", "varsity"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Power"))
        .stdout(predicate::str::contains("Dallas").not());
}

#[test]
fn terminology_save_rejects_unknown_concept() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args([
            "terminology",
            "save",
            "run_game",
            "--team",
            "varsity",
            "--select",
            "flea-flicker",
        ])
        .assert()
        .failure();
}

#[test]
fn terminology_save_on_template_team_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args([
            "terminology",
            "save",
            "run_game",
            "--team",
            "default",
            "--select",
            "inside_zone",
        ])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// callsheet session
// ---------------------------------------------------------------------------

#[test]
fn session_context_feeds_other_commands() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args(["session", "set", "--team", "varsity", "--opponent", "central"])
        .assert()
        .success();

    // No --team/--opponent flags needed once the session is set
    callsheet(&dir)
        .args(["scouting", "show"])
        .assert()
        .success();

    callsheet(&dir)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("varsity"))
        .stdout(predicate::str::contains("central"));
}

#[test]
fn session_set_rejects_unknown_team() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["session", "set", "--team", "nobody"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// callsheet journal
// ---------------------------------------------------------------------------

#[test]
fn journal_records_terminology_save() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    create_matchup(&dir);

    callsheet(&dir)
        .args([
            "terminology",
            "save",
            "run_game",
            "--team",
            "varsity",
            "--select",
            "inside_zone",
        ])
        .assert()
        .success();

    callsheet(&dir)
        .args(["journal", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("terminology_save"))
        .stdout(predicate::str::contains("finished"));
}

// ---------------------------------------------------------------------------
// callsheet config / videos
// ---------------------------------------------------------------------------

#[test]
fn config_show_prints_project() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("eagles"));
}

#[test]
fn config_check_passes_on_fresh_project() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir).args(["config", "check"]).assert().success();
}

#[test]
fn videos_filter_by_category() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    callsheet(&dir)
        .args(["videos", "--category", "scouting"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scouting"))
        .stdout(predicate::str::contains("getting-started").not());
}
