//! Domain logic - pure value types independent of git operations

pub mod commit;
pub mod version;

pub use commit::{breaking_change_footers, CommitType, ConventionalCommit};
pub use version::Version;
