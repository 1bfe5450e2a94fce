use crate::domain::{CommitType, ConventionalCommit, Version};
use crate::error::{ConventionError, Result};
use crate::git::Repository;
use std::path::Path;

/// Resolves current and next semantic versions from repository history
pub struct VersionResolver {
    prefix: String,
}

impl VersionResolver {
    /// Create a resolver for version tags carrying the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        VersionResolver {
            prefix: prefix.into(),
        }
    }

    /// The highest semantic version tag that is an ancestor of HEAD.
    ///
    /// Note that the highest version tag may not be the latest tag: tags
    /// created out of order are ranked numerically, not by creation time.
    /// Tags that do not parse as version tags are ignored; a repository
    /// with no reachable version tags (or no commits at all) is at
    /// `0.0.0`.
    pub fn current_version<R: Repository>(&self, repo: &R) -> Result<Version> {
        let head = match repo.head_commit()? {
            Some(head) => head,
            None => return Ok(Version::INITIAL),
        };

        let mut versions = Vec::new();
        for tag in repo.list_tags()? {
            if !repo.is_ancestor(tag.target, head)? {
                continue;
            }
            // Tags that are not version tags coexist with version tags;
            // skipping them here is expected, not an error.
            if let Ok(version) = Version::parse_tag(&tag.name, &self.prefix) {
                versions.push(version);
            }
        }

        Ok(versions.into_iter().max().unwrap_or(Version::INITIAL))
    }

    /// Infer the next semantic version from the conventional commits since
    /// the commit tagged with the current version.
    ///
    /// With `path` given, only commits touching that path count toward the
    /// bump decision; the current version is always computed over the full
    /// history. Any considered commit whose message is not a valid
    /// conventional commit is a fatal error naming that commit.
    pub fn next_version<R: Repository>(&self, repo: &R, path: Option<&Path>) -> Result<Version> {
        let current = self.current_version(repo)?;

        let head = match repo.head_commit()? {
            Some(head) => head,
            None => return Ok(current),
        };

        // The tag literally named for the current version bounds the walk;
        // without one (still at 0.0.0, say) the walk covers all history.
        let stop = repo.find_tag(&format!("{}{}", self.prefix, current))?;

        let mut bump_minor = false;
        let mut bump_patch = false;
        for item in repo.walk(head, stop, path)? {
            let info = item?;
            let conv_commit = ConventionalCommit::from_message(&info.message)
                .map_err(|e| ConventionError::for_commit(&info.hash, e))?;

            if conv_commit.breaking {
                if current.major >= 1 {
                    return Ok(current.next_major());
                }
                // Pre-1.0: a breaking change bumps minor and dominates any
                // patch bump. Keep walking so the rest of the range is
                // still validated.
                bump_minor = true;
            }
            match conv_commit.r#type {
                CommitType::Feat => {
                    if current.major >= 1 {
                        bump_minor = true;
                    } else {
                        bump_patch = true;
                    }
                }
                CommitType::Fix => bump_patch = true,
                _ => {}
            }
        }

        if bump_minor {
            Ok(current.next_minor())
        } else if bump_patch {
            Ok(current.next_patch())
        } else {
            Ok(current)
        }
    }
}
