//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the repository
//! queries that version inference and history checking need, allowing for
//! multiple implementations including real Git repositories and mock
//! implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.
//!
//! ```rust
//! # use git_convention::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(head) = repo.head_commit()? {
//!     for item in repo.walk(head, None, None)? {
//!         let info = item?;
//!         println!("{}: {}", info.hash, info.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;
use std::path::Path;

/// Commit information for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message, decoded as text
    pub message: String,
    /// The commit author
    pub author: String,
}

/// A tag name together with the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub target: Oid,
}

/// Abbreviate a commit hash to the seven characters git prints.
pub(crate) fn short_id(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

/// Finite, pull-based iterator over commits, newest first.
///
/// Items are `Result` because reading a commit can fail mid-walk (a git
/// error, or a message that is not valid text). The iterator is not
/// restartable; re-query the repository for another pass.
pub type CommitIter<'a> = Box<dyn Iterator<Item = Result<CommitInfo>> + 'a>;

/// Common git query trait for abstraction
///
/// The repository is read-only from this crate's perspective: the trait
/// exposes ancestry queries, tag enumeration, and commit iteration, and
/// nothing that mutates the repository.
///
/// All implementors must be `Send + Sync`. Methods return
/// [crate::error::Result], mapping underlying failures (like `git2::Error`)
/// to [crate::error::ConventionError] variants.
pub trait Repository: Send + Sync {
    /// Get the commit at HEAD, or `None` when the repository has no
    /// commits yet.
    fn head_commit(&self) -> Result<Option<Oid>>;

    /// Enumerate all tags with the commits they point at.
    ///
    /// Annotated tags are peeled to the tagged commit.
    fn list_tags(&self) -> Result<Vec<TagInfo>>;

    /// Look up a tag by exact name.
    ///
    /// # Returns
    /// * `Ok(Some(oid))` - The commit the tag points at
    /// * `Ok(None)` - No tag with that name exists
    fn find_tag(&self, name: &str) -> Result<Option<Oid>>;

    /// Whether `ancestor` is an ancestor of, or equal to, `descendant`.
    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool>;

    /// Iterate commits in reverse-chronological order starting at `from`.
    ///
    /// # Arguments
    /// * `until` - Excludes this commit and all of its ancestors from the
    ///   walk (an exclusive lower bound)
    /// * `path` - Keeps only commits whose changes touch the given path
    fn walk<'a>(
        &'a self,
        from: Oid,
        until: Option<Oid>,
        path: Option<&'a Path>,
    ) -> Result<CommitIter<'a>>;

    /// Resolve a revision string (hash, tag, `HEAD~2`, ...) to a commit.
    fn rev_parse(&self, spec: &str) -> Result<Oid>;
}
