use crate::error::{GitMonoError, Result};
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;

/// Semantic version representation
///
/// Pre-release and build metadata are kept only so that tags carrying them
/// can be read back; every bump drops them.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
    pub build: BuildMetadata,
}

impl SemanticVersion {
    /// Create a new plain version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        }
    }

    /// Parse a semantic version such as "1.2.3", "1.2" or "1-rc.1+build.5".
    ///
    /// Up to three numeric components are accepted; missing minor and patch
    /// components are treated as 0.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_components(input, Some(3))
    }

    /// Parse a version with any number of numeric components ("1.0.0.0").
    ///
    /// Components past the patch number are validated and then ignored.
    pub fn parse_lenient(input: &str) -> Result<Self> {
        Self::parse_components(input, None)
    }

    fn parse_components(input: &str, max_components: Option<usize>) -> Result<Self> {
        let trimmed = input.trim();

        let (rest, build) = match trimmed.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (trimmed, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if let Some(max) = max_components {
            if parts.len() > max {
                return Err(GitMonoError::parse(format!(
                    "Invalid version format: '{}' - expected at most {} components",
                    input, max
                )));
            }
        }

        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(GitMonoError::parse(format!(
                    "Invalid version component '{}' in '{}'",
                    part, input
                )));
            }
            let number = part.parse::<u64>().map_err(|_| {
                GitMonoError::parse(format!("Version component out of range: {}", part))
            })?;
            numbers.push(number);
        }

        let pre = match pre {
            Some("") => {
                return Err(GitMonoError::parse(format!(
                    "Empty pre-release in '{}'",
                    input
                )))
            }
            Some(pre) => Prerelease::new(pre).map_err(|e| {
                GitMonoError::parse(format!("Invalid pre-release '{}': {}", pre, e))
            })?,
            None => Prerelease::EMPTY,
        };
        let build = match build {
            Some("") => {
                return Err(GitMonoError::parse(format!(
                    "Empty build metadata in '{}'",
                    input
                )))
            }
            Some(build) => BuildMetadata::new(build).map_err(|e| {
                GitMonoError::parse(format!("Invalid build metadata '{}': {}", build, e))
            })?,
            None => BuildMetadata::EMPTY,
        };

        Ok(SemanticVersion {
            major: numbers[0],
            minor: numbers.get(1).copied().unwrap_or(0),
            patch: numbers.get(2).copied().unwrap_or(0),
            pre,
            build,
        })
    }

    /// Bump version according to bump kind
    ///
    /// # Errors
    /// * Parse error if the bumped component would overflow
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let bumped = match kind {
            BumpKind::Major => self
                .major
                .checked_add(1)
                .map(|major| SemanticVersion::new(major, 0, 0)),
            BumpKind::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| SemanticVersion::new(self.major, minor, 0)),
            BumpKind::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| SemanticVersion::new(self.major, self.minor, patch)),
        };

        bumped.ok_or_else(|| {
            GitMonoError::parse(format!(
                "Cannot apply {} bump to {}: component overflow",
                kind, self
            ))
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

// Precedence ignores build metadata.
impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

/// Magnitude of a version increment.
///
/// Variants are declared weakest first so the derived ordering is the
/// strength ordering: `Major > Minor > Patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// Apply this bump to an already parsed version
    pub fn bump(self, version: &SemanticVersion) -> Result<SemanticVersion> {
        version.bump(self)
    }

    /// Parse `version` leniently and apply this bump.
    ///
    /// Fails when the input cannot be read as a version, or when the bumped
    /// component is already `u64::MAX`.
    pub fn bump_str(self, version: &str) -> Result<SemanticVersion> {
        let parsed = SemanticVersion::parse_lenient(version)?;
        self.bump(&parsed)
    }

    /// The stronger of two bump kinds
    pub fn strongest(self, other: BumpKind) -> BumpKind {
        self.max(other)
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        };
        f.write_str(name)
    }
}
