use thiserror::Error;

/// Unified error type for git-mono operations
#[derive(Error, Debug)]
pub enum GitMonoError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("No new commits since '{tag}'")]
    NoNewCommits { tag: String },

    #[error("Repository error: {0}")]
    Repository(String),

    #[error(
        "Initialization stopped at tag '{failed}' (already written: {}): {source}",
        written_list(.persisted)
    )]
    InitAborted {
        failed: String,
        persisted: Vec<String>,
        #[source]
        source: Box<GitMonoError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn written_list(tags: &[String]) -> String {
    if tags.is_empty() {
        "none".to_string()
    } else {
        tags.join(", ")
    }
}

/// Convenience type alias for Results in git-mono
pub type Result<T> = std::result::Result<T, GitMonoError>;

impl GitMonoError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitMonoError::Config(msg.into())
    }

    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        GitMonoError::Parse(msg.into())
    }

    /// Create a repository (collaborator) error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        GitMonoError::Repository(msg.into())
    }

    /// Whether the failure came from the repository rather than from version resolution
    pub fn is_collaborator(&self) -> bool {
        match self {
            GitMonoError::Git(_) | GitMonoError::Repository(_) | GitMonoError::Io(_) => true,
            GitMonoError::InitAborted { source, .. } => source.is_collaborator(),
            _ => false,
        }
    }
}
