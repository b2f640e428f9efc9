#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{tempdir, TempDir};

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

/// A throwaway repository driven through the `git` CLI.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// `None` when git is not installed.
    pub fn init() -> Option<Self> {
        if !has_git() {
            return None;
        }
        let repo = Self { dir: tempdir().unwrap() };
        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.email", "you@example.com"]);
        repo.git(&["config", "user.name", "Your Name"]);
        repo.git(&["config", "core.autocrlf", "false"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        Some(repo)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    pub fn git_output(&self, args: &[&str]) -> String {
        let out = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(out.status.success(), "git {args:?} failed");
        String::from_utf8(out.stdout).unwrap().trim().to_string()
    }

    /// Commit with author and committer dates pinned to `date` (ISO 8601).
    pub fn commit(&self, args: &[&str], date: &str) {
        self.commit_dated(args, date, date);
    }

    /// Commit with separate author and committer dates, as a rebase leaves them.
    pub fn commit_dated(&self, args: &[&str], author_date: &str, committer_date: &str) {
        let status = Command::new("git")
            .arg("commit")
            .arg("-q")
            .args(args)
            .env("GIT_AUTHOR_DATE", author_date)
            .env("GIT_COMMITTER_DATE", committer_date)
            .current_dir(self.path())
            .status()
            .unwrap();
        assert!(status.success(), "git commit {args:?} failed");
    }

    pub fn commit_file(&self, name: &str, content: &str, message: &str, date: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self.git(&["add", "-A"]);
        self.commit(&["-m", message], date);
    }

    pub fn commit_as(&self, author: &str, name: &str, content: &str, message: &str, date: &str) {
        fs::write(self.path().join(name), content).unwrap();
        self.git(&["add", "-A"]);
        let author = format!("--author={author} <{}@example.com>", author.to_lowercase().replace(' ', "."));
        self.commit(&["-m", message, &author], date);
    }

    /// main and feat diverge, feat is merged back with a merge commit, and an
    /// orphan branch holds one unrelated commit.
    pub fn with_branches() -> Option<Self> {
        let repo = Self::init()?;
        repo.commit_file("file.txt", "a\n", "initial import", "2024-01-01T10:00:00+00:00");

        repo.git(&["checkout", "-q", "-b", "feat"]);
        repo.commit_file("feat.txt", "f1\nf2\n", "add feature", "2024-01-05T10:00:00+00:00");

        repo.git(&["checkout", "-q", "main"]);
        repo.commit_file("file.txt", "a\nc\n", "fix crash on startup", "2024-02-03T10:00:00+00:00");
        let status = Command::new("git")
            .args(["merge", "-q", "--no-ff", "feat", "-m", "Merge branch 'feat'"])
            .env("GIT_AUTHOR_DATE", "2024-02-10T10:00:00+00:00")
            .env("GIT_COMMITTER_DATE", "2024-02-10T10:00:00+00:00")
            .current_dir(repo.path())
            .status()
            .unwrap();
        assert!(status.success());

        repo.git(&["checkout", "-q", "--orphan", "lonely"]);
        repo.git(&["rm", "-r", "-f", "-q", "."]);
        repo.commit_file("notes.md", "# notes\n", "start notes", "2024-03-01T10:00:00+00:00");
        repo.git(&["checkout", "-q", "main"]);

        Some(repo)
    }
}
