//! Domain logic - pure versioning rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{subject_line, CommitScheme, SchemePreset};
pub use tag::{parse_tag, project_matches, render_tag, VersionedCommit, HEAD, SINGLE_PROJECT};
pub use version::{BumpKind, SemanticVersion};
