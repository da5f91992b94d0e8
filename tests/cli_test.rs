// tests/cli_test.rs
mod common;

use common::{released_monorepo, TestRepo};
use std::fs;
use std::process::{Command, Output};

fn git_mono(dir: &std::path::Path, args: &[&str]) -> Output {
    // An explicit config keeps the run independent of files in the user's config dir.
    let config = dir.join(".git").join("gitmono-test.toml");
    if !config.exists() {
        fs::write(&config, "").expect("Could not write config");
    }

    Command::new(env!("CARGO_BIN_EXE_git-mono"))
        .current_dir(dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to execute git-mono")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_git-mono"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("git-mono"));
    assert!(text.contains("init"));
    assert!(text.contains("next"));
}

#[test]
fn test_current_prints_tag() {
    let (test_repo, _, _) = released_monorepo();
    let output = git_mono(test_repo.path(), &["-p", "api", "current"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "api/v1.2.0\n");
}

#[test]
fn test_next_dry_run() {
    let (test_repo, _, _) = released_monorepo();
    let output = git_mono(test_repo.path(), &["-p", "api", "--dry-run", "next"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "api/v1.3.0\n");
    assert!(test_repo.tag_target("api/v1.3.0").is_none());
}

#[test]
fn test_next_with_several_projects_fails() {
    let (test_repo, _, _) = released_monorepo();
    let output = git_mono(test_repo.path(), &["-p", "api", "-p", "web", "next"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("single project"), "stderr: {}", stderr);
}

#[test]
fn test_init_writes_tags() {
    let test_repo = TestRepo::new();
    let head = test_repo.commit("README.md", "hello\n", "initial commit", 1_000);
    let output = git_mono(test_repo.path(), &["-p", "api", "-p", "web", "init"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "api/v0.1.0\nweb/v0.1.0\n");
    assert_eq!(test_repo.tag_target("web/v0.1.0"), Some(head));
}

#[test]
fn test_diff_lists_project_files() {
    let (test_repo, _, _) = released_monorepo();
    let output = git_mono(
        test_repo.path(),
        &["-p", "api", "diff", "--from", "api/v1.2.0"],
    );

    assert!(output.status.success());
    assert_eq!(stdout(&output), "api/lib.rs\n");
}
