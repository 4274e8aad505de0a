//! `.env`-style environment file parsing.
//!
//! The file is the single source of API keys; it is read once at startup and
//! never written back.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("Environment file not found: {0}")]
    NotFound(String),

    #[error("Failed to read environment file: {0}")]
    Io(#[from] std::io::Error),
}

/// Read `path` and parse it into a key/value mapping.
///
/// A missing file is an error; everything downstream needs the API keys it
/// carries.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, EnvFileError> {
    if !path.exists() {
        return Err(EnvFileError::NotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path)?;
    Ok(parse_env(&contents))
}

/// Parse `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped, the first `=` splits key from
/// value, both sides are trimmed. No quoting or escaping.
pub fn parse_env(contents: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_pairs() {
        let vars = parse_env("SONARR_API_KEY=abc123\nRADARR_API_KEY=def456\n");
        assert_eq!(vars.get("SONARR_API_KEY").unwrap(), "abc123");
        assert_eq!(vars.get("RADARR_API_KEY").unwrap(), "def456");
    }

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let vars = parse_env("\n# a comment\n\nKEY=value\n  # indented comment\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY").unwrap(), "value");
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let vars = parse_env("URL=http://host:8989/api?x=1\n");
        assert_eq!(vars.get("URL").unwrap(), "http://host:8989/api?x=1");
    }

    #[test]
    fn test_parse_trims_key_and_value() {
        let vars = parse_env("  KEY  =  value  \n");
        assert_eq!(vars.get("KEY").unwrap(), "value");
    }

    #[test]
    fn test_parse_ignores_lines_without_equals() {
        let vars = parse_env("not a pair\nKEY=value\n");
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_parse_empty_value() {
        let vars = parse_env("KEY=\n");
        assert_eq!(vars.get("KEY").unwrap(), "");
    }

    #[test]
    fn test_load_env_file_missing() {
        let result = load_env_file(Path::new("/nonexistent/.env"));
        assert!(matches!(result, Err(EnvFileError::NotFound(_))));
    }

    #[test]
    fn test_load_env_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "# keys\nSONARR_API_KEY=abc").unwrap();

        let vars = load_env_file(temp_file.path()).unwrap();
        assert_eq!(vars.get("SONARR_API_KEY").unwrap(), "abc");
    }
}
