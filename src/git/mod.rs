//! Git operations abstraction layer
//!
//! Version resolution never talks to git directly. It goes through the
//! collaborator traits defined here, which have two implementations:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! Most code should depend on the traits rather than concrete implementations.
//!
//! ```rust
//! # use git_mono::git::{CommitHashResolver, CommitHistoryReader};
//! # fn example<R: CommitHashResolver + CommitHistoryReader>(repo: &R) -> git_mono::Result<()> {
//! let since = repo.commit_hash_by_revision("api/v1.2.0")?;
//! let commits = repo.log(&since, "HEAD")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::VersionedCommit;
use crate::error::Result;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
}

/// Lists the repository's tag namespace
pub trait TagLister {
    /// All tag names, newest first by the commit they point to
    fn list_tags(&self) -> Result<Vec<String>>;
}

/// Persists versions as tags
pub trait TagWriter {
    /// Create the tag named by [VersionedCommit::tag_name], pointing at the
    /// commit its `commit_id` resolves to.
    ///
    /// Fails if the tag already exists.
    fn write_tag(&self, commit: &VersionedCommit) -> Result<()>;
}

/// Resolves revisions to commit hashes
pub trait CommitHashResolver {
    /// Resolve a tag name or symbolic revision (such as `HEAD`) to a full commit hash
    fn commit_hash_by_revision(&self, revision: &str) -> Result<String>;
}

/// Reads commit history
pub trait CommitHistoryReader {
    /// Commits reachable from `until` but not from `since`, newest first.
    ///
    /// `since` is excluded, `until` is included.
    fn log(&self, since: &str, until: &str) -> Result<Vec<CommitInfo>>;
}

/// Lists files changed between two revisions
pub trait FileDiffer {
    /// Paths (relative to the repository root) that differ between `from` and `to`
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>>;
}

/// Everything version planning needs from a repository
pub trait Repository: TagLister + TagWriter + CommitHashResolver + CommitHistoryReader {}

impl<T> Repository for T where T: TagLister + TagWriter + CommitHashResolver + CommitHistoryReader {}
