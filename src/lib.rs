//! Mine a git history into a flat commit table, then derive time-aggregated
//! views of how the project evolved: activity, contributors, churn, size
//! growth, defect fixes and message vocabulary.

pub mod analysis;
pub mod artifact;
pub mod cli;
pub mod error;
pub mod git;
pub mod miner;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod util;

pub use error::{Degradation, GitPulseError, Result};
pub use model::{CommitRecord, Report};
