//! Terminal output.
//!
//! Results (tag names, file paths) go to stdout one per line so they can be
//! piped; status messages go to stderr.

use crate::domain::VersionedCommit;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print a version as its tag name
pub fn display_versioned_commit(commit: &VersionedCommit) {
    println!("{}", commit.tag_name());
}

/// Print the tags proposed or written by a run
pub fn display_versioned_commits(commits: &[VersionedCommit], dry_run: bool) {
    if commits.is_empty() {
        display_status("All projects already have a version");
        return;
    }

    for commit in commits {
        display_versioned_commit(commit);
    }
    display_success(&summary(commits.len(), dry_run));
}

pub fn display_files(files: &[String]) {
    for file in files {
        println!("{}", file);
    }
}

fn summary(count: usize, dry_run: bool) -> String {
    let noun = if count == 1 { "tag" } else { "tags" };
    if dry_run {
        format!("Dry run: {} {} not written", count, noun)
    } else {
        format!("Wrote {} {}", count, noun)
    }
}
