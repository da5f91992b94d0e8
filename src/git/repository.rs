use crate::domain::{parse_tag, SemanticVersion, VersionedCommit};
use crate::error::{GitMonoError, Result};
use crate::git::{
    CommitHashResolver, CommitHistoryReader, CommitInfo, FileDiffer, TagLister, TagWriter,
};
use git2::{Commit, Oid, Repository as Git2Repo, Sort};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, warn};

/// Wrapper around git2::Repository implementing the collaborator traits
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn find_commit(&self, revision: &str) -> Result<Commit<'_>> {
        let object = self.repo.revparse_single(revision).map_err(|e| {
            GitMonoError::repository(format!("Cannot resolve revision '{}': {}", revision, e))
        })?;
        let commit = object.peel_to_commit().map_err(|e| {
            GitMonoError::repository(format!(
                "Revision '{}' does not point to a commit: {}",
                revision, e
            ))
        })?;
        Ok(commit)
    }

    /// Position of every commit reachable from HEAD, HEAD itself being 0
    fn history_positions(&self) -> Result<HashMap<Oid, usize>> {
        let mut positions = HashMap::new();
        if self.repo.head().is_err() {
            return Ok(positions);
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        for (position, oid_result) in revwalk.enumerate() {
            positions.insert(oid_result?, position);
        }

        Ok(positions)
    }
}

/// Sort key of a tag in newest-first order
struct RankedTag {
    /// Walk position from HEAD; `None` for tags on commits HEAD cannot reach
    position: Option<usize>,
    time: i64,
    version: Option<SemanticVersion>,
    name: String,
}

impl RankedTag {
    fn newest_first(&self, other: &RankedTag) -> Ordering {
        let by_history = match (self.position, other.position) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => other.time.cmp(&self.time),
        };

        by_history
            .then_with(|| other.version.cmp(&self.version))
            .then_with(|| other.name.cmp(&self.name))
    }
}

/// Version in a tag's last segment, whatever prefix precedes the digits
fn tag_version(name: &str) -> Option<SemanticVersion> {
    let (_, segment) = parse_tag(name);
    let digits = segment.trim_start_matches(|c: char| !c.is_ascii_digit());
    SemanticVersion::parse(digits).ok()
}

impl TagLister for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        let positions = self.history_positions()?;

        let mut ranked = Vec::new();
        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            match reference.peel_to_commit() {
                Ok(commit) => ranked.push(RankedTag {
                    position: positions.get(&commit.id()).copied(),
                    time: commit.time().seconds(),
                    version: tag_version(name),
                    name: name.to_string(),
                }),
                // Tags on trees or blobs can never hold a project version.
                Err(e) => warn!(tag = name, error = %e, "skipping tag that does not point to a commit"),
            }
        }

        ranked.sort_by(RankedTag::newest_first);
        debug!(count = ranked.len(), "listed tags");
        Ok(ranked.into_iter().map(|tag| tag.name).collect())
    }
}

impl TagWriter for Git2Repository {
    fn write_tag(&self, commit: &VersionedCommit) -> Result<()> {
        let name = commit.tag_name();
        let target = self.find_commit(&commit.commit_id)?;

        self.repo
            .tag_lightweight(&name, target.as_object(), false)
            .map_err(|e| GitMonoError::repository(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }
}

impl CommitHashResolver for Git2Repository {
    fn commit_hash_by_revision(&self, revision: &str) -> Result<String> {
        Ok(self.find_commit(revision)?.id().to_string())
    }
}

impl CommitHistoryReader for Git2Repository {
    fn log(&self, since: &str, until: &str) -> Result<Vec<CommitInfo>> {
        let since = self.find_commit(since)?.id();
        let until = self.find_commit(until)?.id();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push(until)?;
        revwalk.hide(since)?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            let message = commit.message().unwrap_or("").to_string();

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message,
            });
        }

        Ok(commits)
    }
}

impl FileDiffer for Git2Repository {
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let from_tree = self.find_commit(from)?.tree()?;
        let to_tree = self.find_commit(to)?.tree()?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)?;

        let mut files = BTreeSet::new();
        for delta in diff.deltas() {
            for file in [delta.old_file(), delta.new_file()] {
                if let Some(path) = file.path().and_then(|p| p.to_str()) {
                    files.insert(path.to_string());
                }
            }
        }

        Ok(files.into_iter().collect())
    }
}
