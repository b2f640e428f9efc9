pub mod repo;

pub use repo::{GitRepo, RawCommit};
