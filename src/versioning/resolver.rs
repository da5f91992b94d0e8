use crate::domain::{parse_tag, project_matches, SemanticVersion, VersionedCommit};
use crate::error::{GitMonoError, Result};
use crate::git::{CommitHashResolver, TagLister};
use std::collections::BTreeSet;
use tracing::debug;

/// Version every project starts at
pub const INITIAL_VERSION: SemanticVersion = SemanticVersion::new(0, 1, 0);

/// Finds the current version of projects from the shared tag namespace
pub struct ProjectVersionResolver<'a, R> {
    repo: &'a R,
    version_prefix: String,
}

impl<'a, R> ProjectVersionResolver<'a, R>
where
    R: TagLister + CommitHashResolver,
{
    /// Create a new resolver reading tags from `repo`
    pub fn new(repo: &'a R, version_prefix: impl Into<String>) -> Self {
        ProjectVersionResolver {
            repo,
            version_prefix: version_prefix.into(),
        }
    }

    /// The newest version tagged for `project`, or `None` if it was never released.
    ///
    /// Tags are scanned newest first; project labels compare case-insensitively.
    /// For the single-project sentinel the newest tag is taken whatever its label.
    ///
    /// # Errors
    /// * Parse error if the matching tag's version segment is not a version
    /// * Repository errors from listing tags or resolving the tag's commit
    pub fn current_version(&self, project: &str) -> Result<Option<VersionedCommit>> {
        let tags = self.repo.list_tags()?;

        for tag in &tags {
            let (tag_project, version_segment) = parse_tag(tag);
            if !project_matches(tag_project, project) {
                continue;
            }

            let version = self.parse_version(version_segment).map_err(|e| {
                GitMonoError::parse(format!("Tag '{}' is not a version tag: {}", tag, e))
            })?;
            let commit_id = self.repo.commit_hash_by_revision(tag)?;
            debug!(project, tag = tag.as_str(), commit = commit_id.as_str(), "found current version");

            return Ok(Some(VersionedCommit {
                project: tag_project.to_string(),
                version_prefix: self.version_prefix.clone(),
                version,
                commit_id,
            }));
        }

        debug!(project, scanned = tags.len(), "no version tag found");
        Ok(None)
    }

    /// Initial versions for every project that no existing tag claims.
    ///
    /// Each candidate is `0.1.0` at HEAD. The result is sorted by project.
    pub fn init_candidates(&self, projects: &[String]) -> Result<Vec<VersionedCommit>> {
        let tags = self.repo.list_tags()?;
        let claimed: Vec<&str> = tags.iter().map(|tag| parse_tag(tag).0).collect();

        let unclaimed: BTreeSet<&str> = projects
            .iter()
            .map(String::as_str)
            .filter(|project| !claimed.iter().any(|owner| project_matches(owner, project)))
            .collect();

        Ok(unclaimed
            .into_iter()
            .map(|project| {
                VersionedCommit::at_head(project, self.version_prefix.clone(), INITIAL_VERSION)
            })
            .collect())
    }

    fn parse_version(&self, segment: &str) -> Result<SemanticVersion> {
        let value = segment
            .strip_prefix(self.version_prefix.as_str())
            .unwrap_or(segment);
        SemanticVersion::parse(value)
    }
}
