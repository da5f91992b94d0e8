use crate::domain::version::SemanticVersion;

/// Project identifier meaning "the whole repository is one project"
pub const SINGLE_PROJECT: &str = ".";

/// Symbolic revision for a version that has not been tagged yet
pub const HEAD: &str = "HEAD";

/// A version recorded (or about to be recorded) against a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedCommit {
    pub project: String,
    pub version_prefix: String,
    pub version: SemanticVersion,
    pub commit_id: String,
}

impl VersionedCommit {
    /// Propose a version for `project` at the current HEAD
    pub fn at_head(
        project: impl Into<String>,
        version_prefix: impl Into<String>,
        version: SemanticVersion,
    ) -> Self {
        VersionedCommit {
            project: project.into(),
            version_prefix: version_prefix.into(),
            version,
            commit_id: HEAD.to_string(),
        }
    }

    /// Tag name for this version, e.g. "api/v1.2.0" or "v1.2.0"
    pub fn tag_name(&self) -> String {
        render_tag(&self.project, &self.version_prefix, &self.version)
    }
}

/// Render a tag name: `<project>/<prefix><version>`, or `<prefix><version>`
/// for the single-project sentinel.
pub fn render_tag(project: &str, version_prefix: &str, version: &SemanticVersion) -> String {
    if project == SINGLE_PROJECT {
        format!("{}{}", version_prefix, version)
    } else {
        format!("{}/{}{}", project, version_prefix, version)
    }
}

/// Split a tag name into (project, version segment).
///
/// The project is everything before the last `/`; tags without one belong
/// to the single-project sentinel.
pub fn parse_tag(tag: &str) -> (&str, &str) {
    match tag.rsplit_once('/') {
        Some((project, version)) => (project, version),
        None => (SINGLE_PROJECT, tag),
    }
}

/// Whether a project label found in a tag belongs to the requested project
pub fn project_matches(tag_project: &str, requested: &str) -> bool {
    requested == SINGLE_PROJECT || tag_project.eq_ignore_ascii_case(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_with_project() {
        let commit = VersionedCommit::at_head("api", "v", SemanticVersion::new(1, 2, 0));
        assert_eq!(commit.tag_name(), "api/v1.2.0");
        assert_eq!(commit.commit_id, HEAD);
    }

    #[test]
    fn test_tag_name_single_project() {
        let commit = VersionedCommit::at_head(".", "v", SemanticVersion::new(0, 1, 0));
        assert_eq!(commit.tag_name(), "v0.1.0");
    }

    #[test]
    fn test_tag_name_empty_prefix() {
        let commit = VersionedCommit::at_head("web", "", SemanticVersion::new(3, 0, 1));
        assert_eq!(commit.tag_name(), "web/3.0.1");
    }

    #[test]
    fn test_tag_round_trip() {
        for project in ["api", "services/billing", "Web-UI"] {
            let version = SemanticVersion::parse("2.4.1-rc.2").unwrap();
            let tag = render_tag(project, "v", &version);
            let (parsed_project, parsed_version) = parse_tag(&tag);
            assert_eq!(parsed_project, project);
            assert_eq!(parsed_version, "v2.4.1-rc.2");
        }
    }

    #[test]
    fn test_parse_bare_tag() {
        assert_eq!(parse_tag("v1.0.0"), (".", "v1.0.0"));
    }

    #[test]
    fn test_parse_nested_project_uses_last_slash() {
        assert_eq!(parse_tag("libs/core/v0.3.0"), ("libs/core", "v0.3.0"));
    }

    #[test]
    fn test_project_matches() {
        assert!(project_matches("api", "api"));
        assert!(project_matches("API", "api"));
        assert!(!project_matches("web", "api"));
        assert!(project_matches("web", "."));
        assert!(project_matches(".", "."));
        assert!(!project_matches(".", "api"));
    }
}
