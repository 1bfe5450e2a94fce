use crate::error::Result;
use crate::git::{CommitInfo, CommitIter, Repository, TagInfo};
use git2::Oid;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations.
///
/// Models a single linear history: commits are appended oldest-first and
/// ancestry follows insertion order. That is all the resolver and checker
/// need; branching topologies are covered by the integration tests against
/// real repositories.
pub struct MockRepository {
    commits: Vec<MockCommit>,
    tags: HashMap<String, Oid>,
}

struct MockCommit {
    oid: Oid,
    info: CommitInfo,
    paths: Vec<PathBuf>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
        }
    }

    /// Append a commit on top of the current history
    pub fn commit(&mut self, message: &str) -> Oid {
        self.commit_touching(message, &[])
    }

    /// Append a commit that touches the given paths
    pub fn commit_touching(&mut self, message: &str, paths: &[&str]) -> Oid {
        let n = self.commits.len() as u8 + 1;
        let oid = Oid::from_bytes(&[n; 20]).unwrap();
        self.commits.push(MockCommit {
            oid,
            info: CommitInfo {
                hash: oid.to_string(),
                message: message.to_string(),
                author: "Test Author".to_string(),
            },
            paths: paths.iter().map(PathBuf::from).collect(),
        });
        oid
    }

    /// Create a tag pointing to an existing commit
    pub fn tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    fn position(&self, oid: Oid) -> Option<usize> {
        self.commits.iter().position(|c| c.oid == oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_commit(&self) -> Result<Option<Oid>> {
        Ok(self.commits.last().map(|c| c.oid))
    }

    fn list_tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self
            .tags
            .iter()
            .map(|(name, target)| TagInfo {
                name: name.clone(),
                target: *target,
            })
            .collect())
    }

    fn find_tag(&self, name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.get(name).copied())
    }

    fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        match (self.position(ancestor), self.position(descendant)) {
            (Some(a), Some(d)) => Ok(a <= d),
            _ => Ok(false),
        }
    }

    fn walk<'a>(
        &'a self,
        from: Oid,
        until: Option<Oid>,
        path: Option<&'a Path>,
    ) -> Result<CommitIter<'a>> {
        let from_pos = self
            .position(from)
            .ok_or_else(|| crate::error::ConventionError::revision("unknown commit"))?;
        let lower = match until {
            Some(stop) => self.position(stop).map(|p| p + 1).unwrap_or(0),
            None => 0,
        }
        .min(from_pos + 1);

        let iter = self.commits[lower..=from_pos]
            .iter()
            .rev()
            .filter(move |commit| match path {
                Some(path) => commit.paths.iter().any(|p| p.starts_with(path)),
                None => true,
            })
            .map(|commit| Ok(commit.info.clone()));

        Ok(Box::new(iter))
    }

    fn rev_parse(&self, spec: &str) -> Result<Oid> {
        if let Some(oid) = self.tags.get(spec) {
            return Ok(*oid);
        }
        self.commits
            .iter()
            .find(|c| c.info.hash.starts_with(spec))
            .map(|c| c.oid)
            .ok_or_else(|| {
                crate::error::ConventionError::revision(format!("'{}' not found", spec))
            })
    }
}
