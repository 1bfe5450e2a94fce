use thiserror::Error;

/// Unified error type for git-convention operations
#[derive(Error, Debug)]
pub enum ConventionError {
    #[error("empty commit message")]
    EmptyMessage,

    #[error("invalid commit summary format (first line of message): {summary}")]
    InvalidFormat { summary: String },

    #[error("invalid commit type: {found}")]
    InvalidType { found: String },

    #[error(
        "second line of commit message must be empty; \
         separate the body from the summary with a blank line"
    )]
    MissingBlankLine,

    #[error("tag name '{name}' does not start with '{prefix}'")]
    MissingPrefix { name: String, prefix: String },

    #[error("tag name (without prefix) is not a semantic version: {name}")]
    NotSemver { name: String },

    #[error("commit {id} has a non-text message; expected valid UTF-8")]
    NonTextMessage { id: String },

    #[error("commit {id}: {source}")]
    Commit {
        id: String,
        #[source]
        source: Box<ConventionError>,
    },

    #[error("invalid revision: {0}")]
    Revision(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-convention
pub type Result<T> = std::result::Result<T, ConventionError>;

impl ConventionError {
    /// Create an invalid-format error for a summary line
    pub fn invalid_format(summary: impl Into<String>) -> Self {
        ConventionError::InvalidFormat {
            summary: summary.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ConventionError::Config(msg.into())
    }

    /// Create a revision error with context
    pub fn revision(msg: impl Into<String>) -> Self {
        ConventionError::Revision(msg.into())
    }

    /// Attach the offending commit's identity to a parse failure.
    ///
    /// The stored id is shortened to seven characters, matching what git
    /// prints for abbreviated hashes.
    pub fn for_commit(id: &str, source: ConventionError) -> Self {
        let short = if id.len() > 7 { &id[..7] } else { id };
        ConventionError::Commit {
            id: short.to_string(),
            source: Box::new(source),
        }
    }

    /// Whether this is a failure to parse a commit message.
    ///
    /// `InvalidType` and `MissingBlankLine` are refinements of
    /// `InvalidFormat`; callers that only care about coarse-grained
    /// "message is not a conventional commit" handling match on this.
    pub fn is_message_failure(&self) -> bool {
        matches!(
            self,
            ConventionError::EmptyMessage
                | ConventionError::InvalidFormat { .. }
                | ConventionError::InvalidType { .. }
                | ConventionError::MissingBlankLine
        )
    }

    /// Whether this is a failure to parse a tag name as a version tag.
    ///
    /// These are recovered locally during version resolution: non-version
    /// tags coexist with version tags.
    pub fn is_tag_failure(&self) -> bool {
        matches!(
            self,
            ConventionError::MissingPrefix { .. } | ConventionError::NotSemver { .. }
        )
    }
}
