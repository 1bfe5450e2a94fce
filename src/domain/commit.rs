use crate::error::{ConventionError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    /// Summary grammar: `type(scope)!: description`, scope and `!` optional,
    /// exactly one space after the colon, non-empty description.
    static ref SUMMARY_REGEX: Regex = Regex::new(
        r"^(?P<type>\w+)(\((?P<scope>.*)\))?(?P<breaking>!)?: (?P<description>.+)$"
    )
    .unwrap();

    /// A footer starts on a fresh line with a token followed by `": "` or
    /// `" #"`. The token is either the breaking-change literal or a plain
    /// word-characters-and-hyphens token.
    static ref FOOTER_TOKEN_REGEX: Regex =
        Regex::new(r"\n((?:BREAKING[ -]CHANGE)|[\w-]+)(?:(?:: )|(?: #))").unwrap();
}

/// The recognized conventional commit types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Chore,
    Ci,
    Docs,
    Feat,
    Fix,
    Refactor,
    Style,
    Test,
}

impl CommitType {
    /// All recognized types, in the order they are documented
    pub const ALL: [CommitType; 8] = [
        CommitType::Chore,
        CommitType::Ci,
        CommitType::Docs,
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Refactor,
        CommitType::Style,
        CommitType::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
            CommitType::Docs => "docs",
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Refactor => "refactor",
            CommitType::Style => "style",
            CommitType::Test => "test",
        }
    }
}

impl FromStr for CommitType {
    type Err = ConventionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "chore" => Ok(CommitType::Chore),
            "ci" => Ok(CommitType::Ci),
            "docs" => Ok(CommitType::Docs),
            "feat" => Ok(CommitType::Feat),
            "fix" => Ok(CommitType::Fix),
            "refactor" => Ok(CommitType::Refactor),
            "style" => Ok(CommitType::Style),
            "test" => Ok(CommitType::Test),
            other => Err(ConventionError::InvalidType {
                found: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub r#type: CommitType,
    pub breaking: bool,
}

impl ConventionalCommit {
    /// Parse the summary line (first line) of a commit message.
    ///
    /// Fails with `InvalidFormat` when the line does not match the grammar
    /// and with `InvalidType` when the type token is not recognized.
    pub fn from_summary(summary: &str) -> Result<Self> {
        let captures = SUMMARY_REGEX
            .captures(summary)
            .ok_or_else(|| ConventionError::invalid_format(summary))?;

        let r#type = captures["type"].parse::<CommitType>()?;

        Ok(ConventionalCommit {
            r#type,
            breaking: captures.name("breaking").is_some(),
        })
    }

    /// Parse a full commit message.
    ///
    /// The first line must be a valid summary. A multi-line message must
    /// separate body and footers from the summary with a blank second line.
    /// The breaking flag is the OR of the summary's `!` marker and the
    /// presence of a breaking-change footer anywhere in the message.
    pub fn from_message(message: &str) -> Result<Self> {
        if message.is_empty() {
            return Err(ConventionError::EmptyMessage);
        }

        let mut lines = message.lines();
        let summary = lines.next().unwrap_or_default();
        let summary_commit = Self::from_summary(summary)?;

        let second = match lines.next() {
            Some(line) => line,
            None => return Ok(summary_commit),
        };
        if !second.trim().is_empty() {
            return Err(ConventionError::MissingBlankLine);
        }

        Ok(ConventionalCommit {
            r#type: summary_commit.r#type,
            breaking: summary_commit.breaking || !breaking_change_footers(message).is_empty(),
        })
    }
}

/// Extract the literal values of all breaking-change footers in a message.
///
/// The message is split on footer tokens; each footer's value runs until the
/// next footer token or the end of the message, so a value can span multiple
/// paragraphs. A footer-shaped line without an exact `": "` or `" #"`
/// separator does not start a new footer.
pub fn breaking_change_footers(message: &str) -> Vec<&str> {
    let mut values = Vec::new();
    let mut pending: Option<(&str, usize)> = None;

    for captures in FOOTER_TOKEN_REGEX.captures_iter(message) {
        let whole = captures.get(0).unwrap();
        if let Some((token, value_start)) = pending.take() {
            if is_breaking_token(token) {
                values.push(&message[value_start..whole.start()]);
            }
        }
        pending = Some((captures.get(1).unwrap().as_str(), whole.end()));
    }
    if let Some((token, value_start)) = pending {
        if is_breaking_token(token) {
            values.push(&message[value_start..]);
        }
    }

    values
}

fn is_breaking_token(token: &str) -> bool {
    token == "BREAKING CHANGE" || token == "BREAKING-CHANGE"
}
