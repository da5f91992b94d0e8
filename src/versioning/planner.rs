use crate::analyzer::CommitClassifier;
use crate::config::Config;
use crate::domain::{BumpKind, VersionedCommit, HEAD};
use crate::error::{GitMonoError, Result};
use crate::git::Repository;
use crate::versioning::resolver::ProjectVersionResolver;
use tracing::{debug, info};

/// Plans and records new versions: classify, bump, tag
pub struct VersionPlanner<'a, R> {
    repo: &'a R,
    resolver: ProjectVersionResolver<'a, R>,
    classifier: CommitClassifier,
    projects: Vec<String>,
    dry_run: bool,
}

impl<'a, R: Repository> VersionPlanner<'a, R> {
    /// Create a planner for the configured project set
    ///
    /// # Errors
    /// * Configuration error if the project set is invalid or a marker pattern does not compile
    pub fn new(repo: &'a R, config: &Config) -> Result<Self> {
        config.validate()?;

        Ok(VersionPlanner {
            repo,
            resolver: ProjectVersionResolver::new(repo, config.version_prefix.clone()),
            classifier: CommitClassifier::new(&config.commit_scheme)?,
            projects: config.projects.clone(),
            dry_run: config.dry_run,
        })
    }

    /// Whether persistence is suppressed
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Current version of the only configured project
    pub fn current_version(&self) -> Result<Option<VersionedCommit>> {
        let project = self.single_project()?;
        self.resolver.current_version(project)
    }

    /// Next version of the only configured project
    pub fn next_version(&self) -> Result<Option<VersionedCommit>> {
        let project = self.single_project()?;
        self.next_version_for(project)
    }

    /// Compute, and unless dry-running tag, the next version of `project`.
    ///
    /// Returns `None` when the project has no version yet; initialize it first.
    ///
    /// # Errors
    /// * [GitMonoError::NoNewCommits] if nothing was committed since the current version
    /// * Parse error if the current version cannot be bumped without overflow
    /// * Parse and repository errors from resolving the current version
    pub fn next_version_for(&self, project: &str) -> Result<Option<VersionedCommit>> {
        let Some(current) = self.resolver.current_version(project)? else {
            debug!(project, "project has no version yet");
            return Ok(None);
        };

        let commits = self.repo.log(&current.commit_id, HEAD)?;
        if commits.is_empty() {
            return Err(GitMonoError::NoNewCommits {
                tag: current.tag_name(),
            });
        }

        let bump = self
            .classifier
            .strongest(commits.iter().map(|c| c.message.as_str()))
            .unwrap_or(BumpKind::Patch);
        debug!(project, commits = commits.len(), bump = %bump, "classified new commits");

        let next = VersionedCommit::at_head(
            current.project.clone(),
            current.version_prefix.clone(),
            bump.bump(&current.version)?,
        );
        self.persist(&next)?;

        Ok(Some(next))
    }

    /// Propose, and unless dry-running tag, `0.1.0` for every unversioned project.
    ///
    /// Tags are written one at a time in project order. The first failed write
    /// stops the run and is reported as [GitMonoError::InitAborted], naming the
    /// tags that were already written; those are not rolled back.
    pub fn init_versions(&self) -> Result<Vec<VersionedCommit>> {
        let candidates = self.resolver.init_candidates(&self.projects)?;

        let mut persisted = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if let Err(source) = self.persist(candidate) {
                return Err(GitMonoError::InitAborted {
                    failed: candidate.tag_name(),
                    persisted,
                    source: Box::new(source),
                });
            }
            persisted.push(candidate.tag_name());
        }

        Ok(candidates)
    }

    fn persist(&self, commit: &VersionedCommit) -> Result<()> {
        if self.dry_run {
            info!(tag = commit.tag_name().as_str(), "dry run, not writing tag");
            return Ok(());
        }

        self.repo.write_tag(commit)?;
        info!(tag = commit.tag_name().as_str(), "wrote tag");
        Ok(())
    }

    fn single_project(&self) -> Result<&str> {
        match self.projects.as_slice() {
            [project] => Ok(project.as_str()),
            projects => Err(GitMonoError::config(format!(
                "Expected a single project, found {}",
                projects.len()
            ))),
        }
    }
}
