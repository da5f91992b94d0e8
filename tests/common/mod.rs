// Shared git fixtures for integration tests
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A throwaway repository in a temp dir
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `path` and commit it at a fixed time so tag ordering is deterministic
    pub fn commit(&self, path: &str, content: &str, message: &str, time: i64) -> Oid {
        let file = self.dir.path().join(path);
        fs::create_dir_all(file.parent().unwrap()).expect("Could not create dirs");
        fs::write(&file, content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(path))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let signature = Signature::new("Test User", "test@example.com", &Time::new(time, 0))
            .expect("Could not create signature");

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("HEAD is not a commit")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parent_refs,
            )
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn tag_target(&self, name: &str) -> Option<Oid> {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .ok()
            .and_then(|r| r.peel_to_commit().ok())
            .map(|c| c.id())
    }
}

/// Two projects released at the first commit, then one `feat(api)` commit.
///
/// Returns the repository plus the ids of both commits.
pub fn released_monorepo() -> (TestRepo, Oid, Oid) {
    let test_repo = TestRepo::new();
    let first = test_repo.commit("api/lib.rs", "fn api() {}\n", "chore: initial import", 1_000);
    let released = test_repo.commit("web/index.html", "<html></html>\n", "chore: add web", 1_001);
    test_repo.tag("api/v1.2.0", released);
    test_repo.tag("web/v0.3.0", first);
    let feature = test_repo.commit(
        "api/lib.rs",
        "fn api() {}\nfn endpoint() {}\n",
        "feat(api): add endpoint",
        2_000,
    );
    (test_repo, released, feature)
}
