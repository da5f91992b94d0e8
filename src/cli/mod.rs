//! Command line interface
//!
//! Argument parsing and process wiring: configuration is loaded and
//! overridden here, then handed to the version planner together with a
//! git2-backed repository.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{load_config, Config};
use crate::domain::SchemePreset;
use crate::git::Git2Repository;
use crate::ui;
use crate::versioning::{ProjectDiffer, VersionPlanner};

#[derive(Parser, Debug)]
#[command(
    name = "git-mono",
    version,
    about = "Semantic version tags for the projects of a git monorepo"
)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Path inside the git repository"
    )]
    pub repo: PathBuf,

    #[arg(
        short,
        long = "project",
        global = true,
        help = "Project to operate on; repeat for several"
    )]
    pub projects: Vec<String>,

    #[arg(long, global = true, help = "Version prefix used in tag names")]
    pub prefix: Option<String>,

    #[arg(long, global = true, help = "Commit scheme: conventional or autotag")]
    pub scheme: Option<SchemePreset>,

    #[arg(long, global = true, help = "Compute versions without writing tags")]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the current version tag of the project
    Current,
    /// Tag the next version of the project from commits since its current version
    Next,
    /// Tag 0.1.0 for every configured project that has no version yet
    Init,
    /// List files of the configured projects changed between two revisions
    Diff {
        #[arg(short, long, help = "The starting point of the revision range")]
        from: String,

        #[arg(short, long, default_value = "HEAD", help = "The end of the revision range")]
        to: String,
    },
}

impl Cli {
    /// Configuration file values with command line overrides applied
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config =
            load_config(self.config.as_deref()).context("Failed to load configuration")?;

        if !self.projects.is_empty() {
            config.projects = self.projects.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.version_prefix = prefix.clone();
        }
        if let Some(scheme) = self.scheme {
            config.commit_scheme.preset = scheme;
        }
        if self.dry_run {
            config.dry_run = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;
        let repo = Git2Repository::open(&self.repo).with_context(|| {
            format!("Not in a git repository: {}", self.repo.display())
        })?;

        match &self.command {
            Command::Current => {
                let planner = VersionPlanner::new(&repo, &config)?;
                match planner.current_version()? {
                    Some(current) => ui::display_versioned_commit(&current),
                    None => ui::display_status("No version found; run `git-mono init` first"),
                }
            }
            Command::Next => {
                let planner = VersionPlanner::new(&repo, &config)?;
                let Some(next) = planner.next_version()? else {
                    bail!("Project has no version yet; run `git-mono init` first");
                };
                ui::display_versioned_commits(&[next], planner.is_dry_run());
            }
            Command::Init => {
                let planner = VersionPlanner::new(&repo, &config)?;
                let created = planner.init_versions()?;
                ui::display_versioned_commits(&created, planner.is_dry_run());
            }
            Command::Diff { from, to } => {
                let differ = ProjectDiffer::new(&repo, &config.projects);
                let files = differ
                    .changed_files(from, to)
                    .with_context(|| format!("Failed to diff {}..{}", from, to))?;
                ui::display_files(&files);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_next_with_overrides() {
        let cli = Cli::try_parse_from([
            "git-mono", "next", "-p", "api", "--prefix", "", "--scheme", "autotag", "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::Next);
        assert_eq!(cli.projects, vec!["api"]);
        assert_eq!(cli.prefix.as_deref(), Some(""));
        assert_eq!(cli.scheme, Some(SchemePreset::Autotag));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_parse_repeated_projects() {
        let cli = Cli::try_parse_from(["git-mono", "init", "-p", "api", "-p", "web"]).unwrap();
        assert_eq!(cli.command, Command::Init);
        assert_eq!(cli.projects, vec!["api", "web"]);
    }

    #[test]
    fn test_parse_diff_defaults_to_head() {
        let cli = Cli::try_parse_from(["git-mono", "diff", "--from", "api/v1.0.0"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Diff {
                from: "api/v1.0.0".to_string(),
                to: "HEAD".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(Cli::try_parse_from(["git-mono", "next", "--scheme", "gitmoji"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["git-mono"]).is_err());
    }
}
