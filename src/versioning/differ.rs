use crate::domain::SINGLE_PROJECT;
use crate::error::Result;
use crate::git::FileDiffer;
use std::path::Path;

/// Lists changed files that belong to the configured projects
pub struct ProjectDiffer<'a, D> {
    repo: &'a D,
    projects: Vec<String>,
}

impl<'a, D: FileDiffer> ProjectDiffer<'a, D> {
    pub fn new(repo: &'a D, projects: &[String]) -> Self {
        ProjectDiffer {
            repo,
            projects: projects.to_vec(),
        }
    }

    /// Files changed between `from` and `to` that live under a configured
    /// project directory, sorted and without duplicates.
    pub fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let mut files: Vec<String> = self
            .repo
            .changed_files(from, to)?
            .into_iter()
            .filter(|file| self.projects.iter().any(|p| belongs_to(file, p)))
            .collect();

        files.sort();
        files.dedup();
        Ok(files)
    }
}

fn belongs_to(file: &str, project: &str) -> bool {
    project == SINGLE_PROJECT || Path::new(file).starts_with(project)
}
