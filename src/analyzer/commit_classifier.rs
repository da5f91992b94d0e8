use crate::config::CommitSchemeConfig;
use crate::domain::{subject_line, BumpKind, CommitScheme};
use crate::error::{GitMonoError, Result};
use regex::Regex;
use tracing::debug;

/// Maps commit subjects to bump kinds using a configured commit scheme
#[derive(Debug, Clone)]
pub struct CommitClassifier {
    breaking: Vec<Regex>,
    feature: Vec<Regex>,
    fix: Vec<Regex>,
}

impl CommitClassifier {
    /// Create a classifier from scheme configuration
    pub fn new(config: &CommitSchemeConfig) -> Result<Self> {
        Self::from_scheme(&config.resolve())
    }

    /// Compile the marker patterns of a resolved scheme
    pub fn from_scheme(scheme: &CommitScheme) -> Result<Self> {
        Ok(CommitClassifier {
            breaking: compile("breaking", &scheme.breaking)?,
            feature: compile("feature", &scheme.feature)?,
            fix: compile("fix", &scheme.fix)?,
        })
    }

    /// Classify a single commit by its subject line.
    ///
    /// Breaking markers win over feature markers, which win over fix markers.
    /// Returns `None` when the commit does not affect the version.
    pub fn classify(&self, message: &str) -> Option<BumpKind> {
        let subject = subject_line(message);

        if matches_any(&self.breaking, subject) {
            Some(BumpKind::Major)
        } else if matches_any(&self.feature, subject) {
            Some(BumpKind::Minor)
        } else if matches_any(&self.fix, subject) {
            Some(BumpKind::Patch)
        } else {
            None
        }
    }

    /// The strongest bump kind across a sequence of commit messages.
    ///
    /// Stops scanning at the first `Major`, since nothing is stronger.
    pub fn strongest<'a, I>(&self, messages: I) -> Option<BumpKind>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut strongest: Option<BumpKind> = None;

        for message in messages {
            let Some(kind) = self.classify(message) else {
                continue;
            };
            debug!(subject = subject_line(message), bump = %kind, "classified commit");

            let next = strongest.map_or(kind, |current| current.strongest(kind));
            strongest = Some(next);
            if next == BumpKind::Major {
                break;
            }
        }

        strongest
    }
}

fn compile(kind: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| {
                GitMonoError::config(format!(
                    "Invalid {} marker pattern '{}': {}",
                    kind, pattern, e
                ))
            })
        })
        .collect()
}

fn matches_any(patterns: &[Regex], subject: &str) -> bool {
    patterns.iter().any(|re| re.is_match(subject))
}
