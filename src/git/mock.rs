use crate::domain::{VersionedCommit, HEAD};
use crate::error::{GitMonoError, Result};
use crate::git::{
    CommitHashResolver, CommitHistoryReader, CommitInfo, FileDiffer, TagLister, TagWriter,
};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations.
///
/// History is linear: commits are appended oldest first and the last one is HEAD.
/// Tags are kept newest first, so a tag added later is listed before older ones.
#[derive(Debug, Default)]
pub struct MockRepository {
    history: Vec<CommitInfo>,
    tags: RefCell<Vec<(String, String)>>,
    written: RefCell<Vec<String>>,
    failing_tags: HashSet<String>,
    diffs: HashMap<(String, String), Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit; it becomes HEAD
    pub fn add_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.history.push(CommitInfo {
            hash: hash.into(),
            message: message.into(),
        });
    }

    /// Add a tag pointing to a commit. Later tags are listed first.
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.get_mut().insert(0, (name.into(), hash.into()));
    }

    /// Make writing the named tag fail
    pub fn fail_writing(&mut self, tag_name: impl Into<String>) {
        self.failing_tags.insert(tag_name.into());
    }

    /// Set the files reported as changed between two revisions
    pub fn set_changed_files(&mut self, from: &str, to: &str, files: &[&str]) {
        self.diffs.insert(
            (from.to_string(), to.to_string()),
            files.iter().map(|f| f.to_string()).collect(),
        );
    }

    /// Tag names written through [TagWriter], in write order
    pub fn written_tags(&self) -> Vec<String> {
        self.written.borrow().clone()
    }

    fn head(&self) -> Result<&CommitInfo> {
        self.history
            .last()
            .ok_or_else(|| GitMonoError::repository("HEAD does not point to a commit"))
    }

    fn position(&self, hash: &str) -> Result<usize> {
        self.history
            .iter()
            .position(|c| c.hash == hash)
            .ok_or_else(|| GitMonoError::repository(format!("Unknown commit: {}", hash)))
    }
}

impl TagLister for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().iter().map(|(name, _)| name.clone()).collect())
    }
}

impl TagWriter for MockRepository {
    fn write_tag(&self, commit: &VersionedCommit) -> Result<()> {
        let name = commit.tag_name();
        if self.failing_tags.contains(&name) {
            return Err(GitMonoError::repository(format!(
                "Cannot create tag '{}'",
                name
            )));
        }
        if self.tags.borrow().iter().any(|(existing, _)| *existing == name) {
            return Err(GitMonoError::repository(format!(
                "Tag '{}' already exists",
                name
            )));
        }

        let hash = self.commit_hash_by_revision(&commit.commit_id)?;
        self.tags.borrow_mut().insert(0, (name.clone(), hash));
        self.written.borrow_mut().push(name);
        Ok(())
    }
}

impl CommitHashResolver for MockRepository {
    fn commit_hash_by_revision(&self, revision: &str) -> Result<String> {
        if revision == HEAD {
            return Ok(self.head()?.hash.clone());
        }
        if let Some((_, hash)) = self.tags.borrow().iter().find(|(name, _)| name == revision) {
            return Ok(hash.clone());
        }
        let index = self.position(revision)?;
        Ok(self.history[index].hash.clone())
    }
}

impl CommitHistoryReader for MockRepository {
    fn log(&self, since: &str, until: &str) -> Result<Vec<CommitInfo>> {
        let start = self.position(&self.commit_hash_by_revision(since)?)?;
        let end = self.position(&self.commit_hash_by_revision(until)?)?;
        if end <= start {
            return Ok(Vec::new());
        }
        Ok(self.history[start + 1..=end].iter().rev().cloned().collect())
    }
}

impl FileDiffer for MockRepository {
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>> {
        Ok(self
            .diffs
            .get(&(from.to_string(), to.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemanticVersion;

    fn sample() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_commit("c1", "initial");
        repo.add_commit("c2", "feat: second");
        repo.add_commit("c3", "fix: third");
        repo.add_tag("api/v1.0.0", "c1");
        repo.add_tag("web/v0.2.0", "c2");
        repo
    }

    #[test]
    fn test_tags_newest_first() {
        let repo = sample();
        assert_eq!(repo.list_tags().unwrap(), vec!["web/v0.2.0", "api/v1.0.0"]);
    }

    #[test]
    fn test_resolve_revisions() {
        let repo = sample();
        assert_eq!(repo.commit_hash_by_revision("HEAD").unwrap(), "c3");
        assert_eq!(repo.commit_hash_by_revision("api/v1.0.0").unwrap(), "c1");
        assert_eq!(repo.commit_hash_by_revision("c2").unwrap(), "c2");
        assert!(repo.commit_hash_by_revision("nope").is_err());
    }

    #[test]
    fn test_log_excludes_since() {
        let repo = sample();
        let commits = repo.log("c1", "HEAD").unwrap();
        let hashes: Vec<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
        assert_eq!(hashes, vec!["c3", "c2"]);
        assert!(repo.log("c3", "HEAD").unwrap().is_empty());
    }

    #[test]
    fn test_write_tag_records_and_lists() {
        let repo = sample();
        let commit = VersionedCommit::at_head("api", "v", SemanticVersion::new(1, 1, 0));
        repo.write_tag(&commit).unwrap();

        assert_eq!(repo.written_tags(), vec!["api/v1.1.0"]);
        assert_eq!(repo.list_tags().unwrap()[0], "api/v1.1.0");
        assert_eq!(repo.commit_hash_by_revision("api/v1.1.0").unwrap(), "c3");
    }

    #[test]
    fn test_write_existing_tag_fails() {
        let repo = sample();
        let commit = VersionedCommit::at_head("api", "v", SemanticVersion::new(1, 0, 0));
        assert!(repo.write_tag(&commit).is_err());
        assert!(repo.written_tags().is_empty());
    }

    #[test]
    fn test_injected_write_failure() {
        let mut repo = sample();
        repo.fail_writing("web/v0.3.0");
        let commit = VersionedCommit::at_head("web", "v", SemanticVersion::new(0, 3, 0));
        assert!(repo.write_tag(&commit).is_err());
    }

    #[test]
    fn test_changed_files() {
        let mut repo = sample();
        repo.set_changed_files("c1", "c3", &["api/main.rs"]);
        assert_eq!(repo.changed_files("c1", "c3").unwrap(), vec!["api/main.rs"]);
        assert!(repo.changed_files("c2", "c3").unwrap().is_empty());
    }
}
