use crate::artifact;
use crate::error::{Degradation, Result};
use crate::git::{GitRepo, RawCommit};
use crate::model::{CommitRecord, LineStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A progress line is logged every this many commits.
pub const PROGRESS_EVERY: usize = 500;

#[derive(Debug, Clone, Default)]
pub struct MiningOptions {
    /// Draw a progress bar on stderr while statistics are computed.
    pub progress: bool,
}

#[derive(Debug, Clone)]
pub struct MiningSummary {
    pub repository: PathBuf,
    pub records: usize,
    /// Commits recorded with zeroed statistics.
    pub degraded: usize,
    /// Where the table was written; `None` when there was nothing to write.
    pub artifact: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Mine the full history of `repo_path` into a commit table at `output`.
///
/// Fails with [`PathNotFound`](crate::error::GitPulseError::PathNotFound) or
/// [`InvalidRepository`](crate::error::GitPulseError::InvalidRepository)
/// before anything is written.
pub fn mine(repo_path: &Path, output: &Path, options: &MiningOptions) -> Result<MiningSummary> {
    let started = Instant::now();
    let repo = GitRepo::open(repo_path)?;
    tracing::info!("Analyzing repository {}", repo.path().display());

    let (records, degraded) = collect_records(&repo, options)?;

    let artifact = if records.is_empty() {
        Degradation::EmptyResult { view: "commit table" }.emit();
        if output.is_file() {
            tracing::warn!("Removing stale commit table {}", output.display());
            fs::remove_file(output)?;
        }
        None
    } else {
        artifact::write_table(output, &records)?;
        tracing::info!("Wrote {} commits to {}", records.len(), output.display());
        Some(output.to_path_buf())
    };

    let elapsed = started.elapsed();
    tracing::info!(
        "Mining finished in {}",
        humantime::format_duration(Duration::from_millis(elapsed.as_millis() as u64))
    );

    Ok(MiningSummary {
        repository: repo.path().to_path_buf(),
        records: records.len(),
        degraded,
        artifact,
        elapsed,
    })
}

/// Build one record per reachable commit. Returns the records in traversal
/// order together with the number of commits whose statistics were zeroed.
pub fn collect_records(repo: &GitRepo, options: &MiningOptions) -> Result<(Vec<CommitRecord>, usize)> {
    let commits = repo.walk_commits()?;
    let total = commits.len();
    tracing::info!("Found {total} commits, extracting statistics");

    let pb = if options.progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Extracting commit statistics...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut records = Vec::with_capacity(total);
    let mut degraded = 0usize;

    for (i, raw) in commits.into_iter().enumerate() {
        if i % PROGRESS_EVERY == 0 {
            tracing::info!("progress: {i}/{total}");
        }

        let stats = match repo.line_stats(&raw) {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                degraded += 1;
                degrade(&raw, "merge commit has no single diff".to_string())
            }
            Err(e) => {
                degraded += 1;
                degrade(&raw, e.to_string())
            }
        };

        records.push(to_record(raw, stats));
        pb.inc(1);
    }

    pb.finish_and_clear();

    if degraded > 0 {
        tracing::warn!("{degraded} of {total} commits have no line statistics; recorded as zero");
    }

    Ok((records, degraded))
}

fn degrade(raw: &RawCommit, reason: String) -> LineStats {
    Degradation::StatisticsUnavailable {
        commit: raw.id.to_string(),
        reason,
    }
    .emit();
    LineStats::default()
}

fn to_record(raw: RawCommit, stats: LineStats) -> CommitRecord {
    CommitRecord {
        id: raw.id.to_string(),
        author_name: raw.author_name,
        author_email: raw.author_email,
        timestamp: raw.timestamp,
        message: raw.message,
        insertions: stats.insertions,
        deletions: stats.deletions,
        lines_changed: stats.lines(),
    }
}
