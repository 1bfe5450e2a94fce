//! Version resolution from tag and commit history

pub mod version_resolver;

pub use version_resolver::VersionResolver;
