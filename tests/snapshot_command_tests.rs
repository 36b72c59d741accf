use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::*, repository::*};

#[cfg(test)]
mod snapshot_command_tests {
    use super::*;

    fn snapshot_json(host: &TestHost, repo: &TestRepo) -> anyhow::Result<serde_json::Value> {
        let output = host
            .command(repo.path())?
            .args(["snapshot", "--json"])
            .output()?;
        assert!(output.status.success());
        Ok(serde_json::from_slice(&output.stdout)?)
    }

    #[test]
    fn test_clean_repo_shows_all_sections() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;

        host.command(repo.path())?
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains("Branch: main"))
            .stdout(assertions::has_section("Status"))
            .stdout(predicate::str::contains("Working tree clean"))
            .stdout(assertions::has_section("Recent commits"))
            .stdout(predicate::str::contains("Initial commit"))
            .stdout(predicate::str::contains("* main"))
            .stdout(assertions::has_section("Stashes"));

        Ok(())
    }

    #[test]
    fn test_changed_files_are_listed() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "initial.txt", "changed\n")?;
        create_file(&repo.path, "new.txt", "new\n")?;

        host.command(repo.path())?
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains(" M initial.txt"))
            .stdout(predicate::str::contains("?? new.txt"));

        Ok(())
    }

    #[test]
    fn test_status_overflow_marker() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        create_untracked_files(&repo.path, 12)?;

        host.command(repo.path())?
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains("file10.txt"))
            .stdout(predicate::str::contains("file11.txt").not())
            .stdout(predicate::str::contains("... and 2 more"));

        Ok(())
    }

    #[test]
    fn test_json_snapshot_shape() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "new.txt", "new\n")?;
        git(&repo.path, &["branch", "feature"])?;

        let json = snapshot_json(&host, &repo)?;
        assert_eq!(json["current_branch"], "main");
        assert_eq!(json["status"][0]["kind"], "file");
        assert_eq!(json["status"][0]["code"], "??");
        assert_eq!(json["status"][0]["path"], "new.txt");
        assert_eq!(json["summary"]["untracked"], 1);
        assert_eq!(json["commits"][0]["subject"], "Initial commit");
        assert_eq!(json["commits"][0]["short_hash"].as_str().map(str::len), Some(7));
        assert_eq!(json["branches"].as_array().map(Vec::len), Some(2));
        assert!(json["sync"].is_null());
        assert!(json["taken_at"].is_string());

        Ok(())
    }

    #[test]
    fn test_branch_in_other_worktree_has_plain_name() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        let worktrees = tempfile::TempDir::new()?;
        let side = worktrees.path().join("side");
        let side = side.to_string_lossy();
        git(&repo.path, &["worktree", "add", "-b", "side", side.as_ref()])?;

        let json = snapshot_json(&host, &repo)?;
        let names: Vec<&str> = json["branches"]
            .as_array()
            .map(|branches| branches.iter().filter_map(|b| b["name"].as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["main", "side"]);
        assert_eq!(json["branches"][1]["is_current"], false);

        Ok(())
    }

    #[test]
    fn test_stash_and_remote_sections() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        let _remote = add_tracking_remote(&repo)?;
        create_file(&repo.path, "initial.txt", "stashed change\n")?;
        git(&repo.path, &["stash"])?;

        let json = snapshot_json(&host, &repo)?;
        assert_eq!(json["remotes"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["remotes"][0]["name"], "origin");
        assert_eq!(json["stashes"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["status"][0]["kind"], "clean");

        Ok(())
    }

    #[test]
    fn test_sync_counts_against_upstream() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let repo = setup_test_repo_with_initial_commit()?;
        let _remote = add_tracking_remote(&repo)?;

        let json = snapshot_json(&host, &repo)?;
        assert_eq!(json["sync"]["ahead"], 0);
        assert_eq!(json["sync"]["behind"], 0);

        create_file(&repo.path, "second.txt", "second\n")?;
        git_add(&repo.path, "second.txt")?;
        git_commit(&repo.path, "Second commit")?;

        let json = snapshot_json(&host, &repo)?;
        assert_eq!(json["sync"]["ahead"], 1);
        assert_eq!(json["sync"]["behind"], 0);

        Ok(())
    }

    #[test]
    fn test_not_a_repository_is_error_marker() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let dir = setup_plain_dir()?;

        host.command(dir.path())?
            .arg("snapshot")
            .assert()
            .success()
            .stdout(predicate::str::contains("Not a git repository"));

        let json = snapshot_json(&host, &dir)?;
        assert_eq!(json["status"][0]["kind"], "error");
        assert!(json["commits"].as_array().is_some_and(Vec::is_empty));
        assert!(json["current_branch"].is_null());

        Ok(())
    }

    #[test]
    fn test_missing_workspace_fails() -> anyhow::Result<()> {
        let host = TestHost::new()?;
        let missing = host.home.path().join("does-not-exist");

        host.command(&missing)?
            .arg("snapshot")
            .assert()
            .failure()
            .stdout(assertions::no_workspace());

        Ok(())
    }
}
