use crate::error::{ConventionError, Result};
use crate::git::{short_id, CommitInfo, CommitIter, TagInfo};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn commit_info(&self, commit: &git2::Commit<'_>) -> Result<CommitInfo> {
        let message = commit
            .message()
            .ok_or_else(|| ConventionError::NonTextMessage {
                id: short_id(&commit.id().to_string()).to_string(),
            })?
            .to_string();

        let author = commit.author().name().unwrap_or("unknown").to_string();

        Ok(CommitInfo {
            hash: commit.id().to_string(),
            message,
            author,
        })
    }

    /// Whether a commit's changes touch the given path.
    ///
    /// The commit tree is diffed against its first parent (the empty tree
    /// for root commits) under a pathspec.
    fn commit_touches_path(&self, commit: &git2::Commit<'_>, path: &Path) -> Result<bool> {
        let mut opts = git2::DiffOptions::new();
        opts.pathspec(path);

        let tree = commit.tree()?;
        let parent_tree = match commit.parent_count() {
            0 => None,
            _ => Some(commit.parent(0)?.tree()?),
        };

        let diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

        Ok(diff.deltas().count() > 0)
    }
}

impl super::Repository for Git2Repository {
    fn head_commit(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list_tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            // Peel annotated tags down to the tagged commit. Tags pointing
            // at non-commits cannot be ancestors of HEAD and are skipped.
            match reference.peel(git2::ObjectType::Commit) {
                Ok(object) => tags.push(TagInfo {
                    name: name.to_string(),
                    target: object.id(),
                }),
                Err(_) => continue,
            }
        }

        Ok(tags)
    }

    fn find_tag(&self, name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let oid = reference.peel(git2::ObjectType::Commit)?.id();
                Ok(Some(oid))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.repo.graph_descendant_of(descendant, ancestor)?)
    }

    fn walk<'a>(
        &'a self,
        from: Oid,
        until: Option<Oid>,
        path: Option<&'a Path>,
    ) -> Result<CommitIter<'a>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(from)?;
        if let Some(stop) = until {
            revwalk.hide(stop)?;
        }

        let iter = revwalk.filter_map(move |oid_result| -> Option<Result<CommitInfo>> {
            let oid = match oid_result {
                Ok(oid) => oid,
                Err(e) => return Some(Err(e.into())),
            };
            let commit = match self.repo.find_commit(oid) {
                Ok(commit) => commit,
                Err(e) => return Some(Err(e.into())),
            };
            if let Some(path) = path {
                match self.commit_touches_path(&commit, path) {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(self.commit_info(&commit))
        });

        Ok(Box::new(iter))
    }

    fn rev_parse(&self, spec: &str) -> Result<Oid> {
        let object = self
            .repo
            .revparse_single(spec)
            .map_err(|e| ConventionError::revision(format!("'{}': {}", spec, e)))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| ConventionError::revision(format!("'{}' is not a commit", spec)))?;
        Ok(commit.id())
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send. All trait
// methods take &self and libgit2 is thread-safe for read operations.
unsafe impl Sync for Git2Repository {}
