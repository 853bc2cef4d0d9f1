//! Loading fixture files from disk.

use crate::config::error::ConfigError;
use crate::config::parser::parse_fixtures;
use crate::types::descriptor::MockResponseList;
use std::fs;
use std::path::PathBuf;

/// Resolve a path or glob pattern to the fixture files it names, sorted by path.
fn fixture_paths(pattern: &str) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<_>, _>>()?;
    if paths.is_empty() {
        return Err(ConfigError::NoMatches(pattern.to_owned()));
    }
    paths.sort();
    Ok(paths)
}

/// Load descriptors from one fixture file or every file matching a glob.
///
/// Files are read in path order and their tables concatenated, so
/// `fixtures/01-auth.yaml` entries come before `fixtures/02-users.yaml` ones.
pub fn load_responses(pattern: &str) -> Result<MockResponseList, ConfigError> {
    let mut responses = MockResponseList::new();
    for path in fixture_paths(pattern)? {
        let content = fs::read_to_string(&path)?;
        responses.extend(parse_fixtures(&content, &path)?);
    }
    Ok(responses)
}

/// Async variant of [`load_responses`], reading files through `tokio::fs`.
pub async fn load_responses_async(pattern: &str) -> Result<MockResponseList, ConfigError> {
    let mut responses = MockResponseList::new();
    for path in fixture_paths(pattern)? {
        let content = tokio::fs::read_to_string(&path).await?;
        responses.extend(parse_fixtures(&content, &path)?);
    }
    Ok(responses)
}
