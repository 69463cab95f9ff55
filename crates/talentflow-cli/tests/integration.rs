use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn talentflow(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("talentflow").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    talentflow(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("talentflow.yaml"));
    assert!(dir.path().join("talentflow.yaml").exists());

    talentflow(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn job_add_then_list() {
    let dir = TempDir::new().unwrap();

    talentflow(&dir)
        .args(["job", "add", "Frontend Developer", "--tag", "React"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created job #1"));

    talentflow(&dir)
        .args(["job", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frontend Developer"));
}

#[test]
fn job_reorder_moves_first_onto_last() {
    let dir = TempDir::new().unwrap();
    for title in ["Job One", "Job Two", "Job Three"] {
        talentflow(&dir).args(["job", "add", title]).assert().success();
    }

    let output = talentflow(&dir)
        .args(["--json", "job", "reorder", "1", "3"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let jobs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<u64> = jobs
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn job_reorder_unknown_reference_fails() {
    let dir = TempDir::new().unwrap();
    talentflow(&dir).args(["job", "add", "Only Job"]).assert().success();

    talentflow(&dir)
        .args(["job", "reorder", "1", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("job not found"));
}

#[test]
fn seed_populates_then_noops() {
    let dir = TempDir::new().unwrap();

    talentflow(&dir)
        .args(["seed", "--candidates", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seeded 25 jobs, 25 candidates"));

    talentflow(&dir)
        .args(["seed", "--candidates", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn candidate_stage_records_timeline() {
    let dir = TempDir::new().unwrap();
    talentflow(&dir).args(["job", "add", "Backend Engineer"]).assert().success();
    talentflow(&dir)
        .args(["seed", "--candidates", "5"])
        .assert()
        .success();

    talentflow(&dir)
        .args(["candidate", "stage", "1", "screen"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'screen'"));

    talentflow(&dir)
        .args(["candidate", "timeline", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to 'screen' stage."));
}
