//! Conversation input loading.
//!
//! Decodes a JSON array of `{ "title": ..., "summary": ... }` objects from
//! a file or any reader. Missing or `null` fields become empty text.

use crate::models::ConversationRecord;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading conversation input.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input stream: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid conversation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of conversations, found {0}")]
    NotAnArray(&'static str),
}

/// Load conversations from a JSON file.
pub fn load_from_path(path: &Path) -> Result<Vec<ConversationRecord>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", content.len(), path.display());
    parse_records(&content)
}

/// Load conversations from any reader, typically standard input.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<Vec<ConversationRecord>, LoadError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    debug!("Read {} bytes from input stream", content.len());
    parse_records(&content)
}

/// Decode a JSON document into conversation records.
pub fn parse_records(content: &str) -> Result<Vec<ConversationRecord>, LoadError> {
    let value: Value = serde_json::from_str(content)?;

    if !value.is_array() {
        return Err(LoadError::NotAnArray(json_kind(&value)));
    }

    Ok(serde_json::from_value(value)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_records_defaults_missing_fields() {
        let records = parse_records(
            r#"[
                {"title": "Client proposal", "summary": "automation"},
                {"title": "Only a title"},
                {"summary": null, "messages": 12},
                {}
            ]"#,
        )
        .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].summary, "automation");
        assert_eq!(records[1].summary, "");
        assert_eq!(records[2], ConversationRecord::default());
        assert_eq!(records[3], ConversationRecord::default());
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_records(r#"{"title": "x"}"#).unwrap_err();
        assert!(matches!(err, LoadError::NotAnArray("an object")));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(matches!(
            parse_records("[{\"title\": ").unwrap_err(),
            LoadError::Json(_)
        ));
        assert!(matches!(
            parse_records("[42]").unwrap_err(),
            LoadError::Json(_)
        ));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "GitHub setup", "summary": "codespace"}}]"#).unwrap();

        let records = load_from_path(file.path()).unwrap();
        assert_eq!(records, vec![ConversationRecord::new("GitHub setup", "codespace")]);
    }

    #[test]
    fn test_load_from_missing_path() {
        let err = load_from_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_load_from_reader() {
        let input = br#"[{"title": "a"}, {"title": "b"}]"#;
        let records = load_from_reader(&input[..]).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_fixture() {
        let records = parse_records(include_str!("../../fixtures/conversations.json")).unwrap();
        assert!(!records.is_empty());
    }
}
