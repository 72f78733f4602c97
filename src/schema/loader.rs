//! Load a project schema from exported JSON (string or file).

use crate::error::SchemaError;
use crate::schema::{validate, ProjectSchema};
use std::path::Path;

/// Parse and validate an exported schema. Extra top-level keys (e.g. `WARNING`, `forms`) are ignored.
pub fn load_from_str(json: &str) -> Result<ProjectSchema, SchemaError> {
    let schema: ProjectSchema = serde_json::from_str(json).map_err(|e| SchemaError::Load(e.to_string()))?;
    validate(&schema)?;
    Ok(schema)
}

/// Parse and validate a schema already decoded as JSON, e.g. an API response.
pub fn load_from_value(value: serde_json::Value) -> Result<ProjectSchema, SchemaError> {
    let schema: ProjectSchema = serde_json::from_value(value).map_err(|e| SchemaError::Load(e.to_string()))?;
    validate(&schema)?;
    Ok(schema)
}

/// Read a schema file written by `export-schema`.
pub async fn load_from_path(path: impl AsRef<Path>) -> Result<ProjectSchema, SchemaError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "loading schema file");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SchemaError::Load(format!("{}: {}", path.display(), e)))?;
    load_from_str(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_warning_key() {
        let schema = load_from_str(
            r#"{"WARNING": "generated", "tables": [{"id": "task", "name": "Task", "fields": []}], "views": [], "forms": []}"#,
        )
        .unwrap();
        assert_eq!(schema.tables[0].name, "Task");
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        assert!(matches!(load_from_str("{"), Err(SchemaError::Load(_))));
    }

    #[tokio::test]
    async fn reads_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qore.schema.json");
        std::fs::write(&path, r#"{"tables": [], "views": []}"#).unwrap();
        let schema = load_from_path(&path).await.unwrap();
        assert!(schema.tables.is_empty());
    }
}
