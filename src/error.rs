use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitPulseError>;

#[derive(Error, Debug)]
pub enum GitPulseError {
    #[error("Repository path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("Not a valid git repository: {}: {source}", .path.display())]
    InvalidRepository {
        path: PathBuf,
        #[source]
        source: Box<gix::open::Error>,
    },
    #[error("Commit table not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),
    #[error("Git error: {0}")]
    Git(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl GitPulseError {
    /// True for the errors that abort the mining stage before anything is written.
    pub fn is_mining_fatal(&self) -> bool {
        matches!(
            self,
            GitPulseError::PathNotFound(_) | GitPulseError::InvalidRepository { .. }
        )
    }
}

/// Non-fatal conditions. These never surface as `Err`; they are reported on
/// the warning channel and the stage carries on with partial output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    EmptyResult { view: &'static str },
    StatisticsUnavailable { commit: String, reason: String },
}

impl Degradation {
    pub fn emit(&self) {
        match self {
            Degradation::EmptyResult { .. } => tracing::warn!("{self}"),
            Degradation::StatisticsUnavailable { .. } => tracing::debug!("{self}"),
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::EmptyResult { view } => write!(f, "view '{view}' has no data"),
            Degradation::StatisticsUnavailable { commit, reason } => {
                write!(f, "no line statistics for {commit}: {reason}")
            }
        }
    }
}
