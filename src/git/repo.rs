use crate::error::{GitPulseError, Result};
use crate::model::LineStats;
use chrono::{DateTime, NaiveDateTime};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use similar::{ChangeTag, TextDiff};
use std::collections::HashSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Commit metadata read during the history walk, before line statistics.
#[derive(Debug, Clone)]
pub struct RawCommit {
    pub id: ObjectId,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: NaiveDateTime,
    pub message: String,
    pub parents: Vec<ObjectId>,
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

fn git_err<E: Display>(context: &'static str) -> impl Fn(E) -> GitPulseError {
    move |e| GitPulseError::Git(format!("{context}: {e}"))
}

impl GitRepo {
    /// Open the repository rooted at `path`. Parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GitPulseError::PathNotFound(path.to_path_buf()));
        }

        let repo = gix::open(path).map_err(|e| GitPulseError::InvalidRepository {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits every reference points at, plus HEAD for detached checkouts.
    /// References peeling to trees or blobs are skipped.
    pub fn tips(&self) -> Result<Vec<ObjectId>> {
        let mut tips = Vec::new();

        if let Ok(head) = self.repo.head_id() {
            tips.push(head.detach());
        }

        let platform = self
            .repo
            .references()
            .map_err(git_err("failed to open reference store"))?;
        let references = platform
            .all()
            .map_err(git_err("failed to list references"))?;

        for reference in references {
            let mut reference = reference.map_err(git_err("failed to read reference"))?;
            let Ok(id) = reference.peel_to_id_in_place() else {
                continue;
            };
            let id = id.detach();
            let is_commit = self
                .repo
                .find_object(id)
                .map(|obj| obj.kind == gix::object::Kind::Commit)
                .unwrap_or(false);
            if is_commit {
                tips.push(id);
            }
        }

        Ok(tips)
    }

    /// Walk every commit reachable from any reference, each exactly once.
    /// The order is traversal order, not chronological.
    pub fn walk_commits(&self) -> Result<Vec<RawCommit>> {
        let mut stack = self.tips()?;
        stack.reverse();

        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut commits = Vec::new();

        while let Some(commit_id) = stack.pop() {
            if !seen.insert(commit_id) {
                continue;
            }

            // Shallow clones list parents that are not in the object database.
            let commit = match self.repo.find_commit(commit_id) {
                Ok(commit) => commit,
                Err(e) => {
                    tracing::debug!("skipping unreadable commit {commit_id}: {e}");
                    continue;
                }
            };

            let raw = self.read_commit(&commit)?;
            for pid in raw.parents.iter().rev() {
                if !seen.contains(pid) {
                    stack.push(*pid);
                }
            }
            commits.push(raw);
        }

        Ok(commits)
    }

    fn read_commit(&self, commit: &gix::Commit<'_>) -> Result<RawCommit> {
        let author = commit.author().map_err(git_err("failed to read commit author"))?;
        // Author time on the author's own clock.
        let time = author.time().map_err(git_err("failed to read author time"))?;
        let local_secs = time.seconds + time.offset as i64;
        let timestamp = DateTime::from_timestamp(local_secs, 0)
            .ok_or_else(|| GitPulseError::InvalidDate(format!("Invalid timestamp: {}", time.seconds)))?
            .naive_utc();

        let message = commit
            .message_raw()
            .map_err(git_err("failed to read commit message"))?;

        Ok(RawCommit {
            id: commit.id,
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            timestamp,
            message: message.to_string().trim().to_string(),
            parents: commit.parent_ids().map(|id| id.detach()).collect(),
        })
    }

    /// Aggregate line statistics for one commit.
    ///
    /// Root commits are diffed against the empty tree and single-parent
    /// commits against their parent. Merge commits have no single diff and
    /// yield `Ok(None)`.
    pub fn line_stats(&self, commit: &RawCommit) -> Result<Option<LineStats>> {
        let parent_tree = match commit.parents.as_slice() {
            [] => None,
            [parent] => Some(
                self.repo
                    .find_commit(*parent)
                    .map_err(git_err("failed to find parent commit"))?
                    .tree()
                    .map_err(git_err("failed to read parent tree"))?,
            ),
            _ => return Ok(None),
        };
        let commit_tree = self
            .repo
            .find_commit(commit.id)
            .map_err(git_err("failed to find commit"))?
            .tree()
            .map_err(git_err("failed to read commit tree"))?;

        let changes: Vec<ChangeDetached> = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), no_rewrites())
            .map_err(git_err("failed to diff trees"))?;

        let mut stats = LineStats::default();
        for change in changes {
            let (added, deleted) = self.change_lines(change);
            stats.insertions += added;
            stats.deletions += deleted;
        }

        Ok(Some(stats))
    }

    fn change_lines(&self, change: ChangeDetached) -> (u64, u64) {
        match change {
            ChangeDetached::Addition { id, entry_mode, .. } if !entry_mode.is_tree() => {
                (self.blob_lines(id), 0)
            }
            ChangeDetached::Deletion { id, entry_mode, .. } if !entry_mode.is_tree() => {
                (0, self.blob_lines(id))
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                entry_mode,
                ..
            } if !entry_mode.is_tree() => self.blob_diff(previous_id, id),
            _ => (0, 0),
        }
    }

    fn blob_lines(&self, id: ObjectId) -> u64 {
        match self.repo.find_object(id) {
            Ok(obj) if !is_binary(obj.data.as_slice()) => count_lines(obj.data.as_slice()),
            _ => 0,
        }
    }

    fn blob_diff(&self, old_id: ObjectId, new_id: ObjectId) -> (u64, u64) {
        let (Ok(old_obj), Ok(new_obj)) = (self.repo.find_object(old_id), self.repo.find_object(new_id)) else {
            return (0, 0);
        };
        if is_binary(old_obj.data.as_slice()) || is_binary(new_obj.data.as_slice()) {
            return (0, 0);
        }
        line_diff(old_obj.data.as_slice(), new_obj.data.as_slice())
    }
}

/// Rename and copy tracking off: a moved file counts as a full deletion
/// plus a full addition, whatever `diff.renames` says.
fn no_rewrites() -> gix::diff::Options {
    gix::diff::Options::default().with_rewrites(None)
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(8192).any(|&b| b == 0)
}

fn count_lines(data: &[u8]) -> u64 {
    String::from_utf8_lossy(data).lines().count() as u64
}

/// Inserted and deleted line counts between two texts.
fn line_diff(old: &[u8], new: &[u8]) -> (u64, u64) {
    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(&*old_text, &*new_text);

    let mut added = 0u64;
    let mut deleted = 0u64;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}
