// tests/version_test.rs
//
// End-to-end version resolution against real temporary repositories.

use git2::{Oid, Repository, Signature};
use git_convention::domain::Version;
use git_convention::error::ConventionError;
use git_convention::git::Git2Repository;
use git_convention::resolver::VersionResolver;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    repo: Repository,
}

impl TestRepo {
    fn init() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    fn signature(&self) -> Signature<'static> {
        self.repo.signature().expect("Could not get signature")
    }

    /// Write a file and commit it on HEAD
    fn commit_file(&self, file: &str, content: &str, message: &str) -> Oid {
        let path = self.dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Could not create parent dirs");
        }
        fs::write(&path, content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(file))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent = self.repo.head().ok().map(|h| h.peel_to_commit().unwrap());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let sig = self.signature();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    }

    /// Commit a trivial change on HEAD
    fn commit(&self, message: &str) -> Oid {
        let content = format!("{}\n", message);
        self.commit_file("notes.txt", &content, message)
    }

    /// Create a commit parented on `parent` without moving HEAD, as if it
    /// were made on a sibling branch
    fn commit_detached(&self, parent: Oid, message: &str) -> Oid {
        let parent_commit = self.repo.find_commit(parent).expect("Could not find parent");
        let tree = parent_commit.tree().expect("Could not get tree");
        let sig = self.signature();
        self.repo
            .commit(None, &sig, &sig, message, &tree, &[&parent_commit])
            .expect("Could not create detached commit")
    }

    fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    fn open(&self) -> Git2Repository {
        Git2Repository::open(self.dir.path()).expect("Could not open repository")
    }
}

#[test]
fn test_release_cycle() {
    let t = TestRepo::init();
    let repo = t.open();
    let resolver = VersionResolver::new("v");

    // No commits yet: both versions are at the initial value.
    assert_eq!(resolver.current_version(&repo).unwrap(), Version::INITIAL);
    assert_eq!(resolver.next_version(&repo, None).unwrap(), Version::INITIAL);

    // Pre-1.0 a feature only bumps patch.
    let first = t.commit("feat: add feature");
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(0, 0, 1)
    );

    t.tag("v1.0.0", first);
    assert_eq!(
        resolver.current_version(&repo).unwrap(),
        Version::new(1, 0, 0)
    );
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 0, 0)
    );

    t.commit("fix: fix bug");
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 0, 1)
    );

    t.commit("test: add test");
    t.commit("ci: add CI");
    t.commit("docs: add docs");
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 0, 1)
    );

    t.commit("feat: add another feature");
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 1, 0)
    );

    let last = t.commit("chore!: drop support for the old format");
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(2, 0, 0)
    );

    t.tag("v2.0.0", last);
    assert_eq!(
        resolver.current_version(&repo).unwrap(),
        Version::new(2, 0, 0)
    );
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(2, 0, 0)
    );
}

#[test]
fn test_current_version_ignores_sibling_branch_tags() {
    let t = TestRepo::init();
    let first = t.commit("feat: initial");
    t.tag("v1.0.0", first);

    // v2.0.0 lives on a sibling branch and is not an ancestor of HEAD.
    let side = t.commit_detached(first, "feat!: experimental rewrite");
    t.tag("v2.0.0", side);

    t.commit("fix: on mainline");

    let repo = t.open();
    let resolver = VersionResolver::new("v");
    assert_eq!(
        resolver.current_version(&repo).unwrap(),
        Version::new(1, 0, 0)
    );
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 0, 1)
    );
}

#[test]
fn test_current_version_ignores_non_version_tags() {
    let t = TestRepo::init();
    let first = t.commit("feat: initial");
    t.tag("v1.0.0", first);
    t.tag("release-candidate", first);
    t.tag("v1.x", first);

    let repo = t.open();
    let resolver = VersionResolver::new("v");
    assert_eq!(
        resolver.current_version(&repo).unwrap(),
        Version::new(1, 0, 0)
    );
}

#[test]
fn test_next_version_with_path_filter() {
    let t = TestRepo::init();
    let first = t.commit_file("src/lib.rs", "pub fn a() {}\n", "feat: initial");
    t.tag("v1.0.0", first);
    t.commit_file("src/lib.rs", "pub fn a() {}\npub fn b() {}\n", "feat: core change");
    t.commit_file("README.md", "docs\n", "fix: readme fix");

    let repo = t.open();
    let resolver = VersionResolver::new("v");

    assert_eq!(
        resolver
            .next_version(&repo, Some(Path::new("src")))
            .unwrap(),
        Version::new(1, 1, 0)
    );
    assert_eq!(
        resolver
            .next_version(&repo, Some(Path::new("README.md")))
            .unwrap(),
        Version::new(1, 0, 1)
    );
    // Unfiltered, minor still dominates patch.
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 1, 0)
    );
}

#[test]
fn test_next_version_fails_on_unconventional_commit() {
    let t = TestRepo::init();
    let first = t.commit("feat: initial");
    t.tag("v1.0.0", first);
    t.commit("merged some stuff");

    let repo = t.open();
    let resolver = VersionResolver::new("v");
    let err = resolver.next_version(&repo, None).unwrap_err();
    assert!(
        matches!(err, ConventionError::Commit { .. }),
        "got: {}",
        err
    );
}

#[test]
fn test_custom_tag_prefix() {
    let t = TestRepo::init();
    let first = t.commit("feat: initial");
    t.tag("rel-1.2.0", first);
    t.commit("feat: more");

    let repo = t.open();
    let resolver = VersionResolver::new("rel-");
    assert_eq!(
        resolver.current_version(&repo).unwrap(),
        Version::new(1, 2, 0)
    );
    assert_eq!(
        resolver.next_version(&repo, None).unwrap(),
        Version::new(1, 3, 0)
    );
}
