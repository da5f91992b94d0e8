use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in commit message conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemePreset {
    /// `feat:`, `fix:` and `type!:` subjects (conventionalcommits.org)
    #[default]
    Conventional,
    /// `[major]` / `#minor` style markers anywhere in the subject
    Autotag,
}

impl SchemePreset {
    /// Markers (regular expressions) for breaking changes, features and fixes
    pub fn markers(self) -> CommitScheme {
        match self {
            SchemePreset::Conventional => CommitScheme {
                breaking: vec![
                    r"^[a-zA-Z]+(\([^)]*\))?!:".to_string(),
                    r"^BREAKING[ -]CHANGE:".to_string(),
                ],
                feature: vec![r"^feat(\([^)]*\))?:".to_string()],
                fix: vec![r"^fix(\([^)]*\))?:".to_string()],
            },
            SchemePreset::Autotag => CommitScheme {
                breaking: vec![r"(?i)\[major\]|#major".to_string()],
                feature: vec![r"(?i)\[minor\]|#minor".to_string()],
                fix: vec![r"(?i)\[patch\]|#patch".to_string()],
            },
        }
    }
}

impl fmt::Display for SchemePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemePreset::Conventional => f.write_str("conventional"),
            SchemePreset::Autotag => f.write_str("autotag"),
        }
    }
}

impl FromStr for SchemePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conventional" => Ok(SchemePreset::Conventional),
            "autotag" => Ok(SchemePreset::Autotag),
            other => Err(format!(
                "unknown commit scheme '{}' (expected 'conventional' or 'autotag')",
                other
            )),
        }
    }
}

/// Resolved marker patterns of a commit scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitScheme {
    pub breaking: Vec<String>,
    pub feature: Vec<String>,
    pub fix: Vec<String>,
}

/// First line of a commit message, without surrounding whitespace
pub fn subject_line(message: &str) -> &str {
    message.lines().next().unwrap_or("").trim()
}
