//! Schema validation: id uniqueness and referential integrity.

use crate::error::SchemaError;
use crate::schema::{ActionTask, ColumnDef, FieldKind, ProjectSchema};
use std::collections::HashSet;

fn unique_column_ids<'a, C: ColumnDef + 'a>(
    kind: &'static str,
    owner: &str,
    columns: impl IntoIterator<Item = &'a C>,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for c in columns {
        if !seen.insert(c.id()) {
            return Err(SchemaError::DuplicateId {
                kind,
                owner: owner.to_string(),
                id: c.id().to_string(),
            });
        }
    }
    Ok(())
}

fn check_kind_references(kind: &FieldKind, table_ids: &HashSet<&str>) -> Result<(), SchemaError> {
    match kind {
        FieldKind::Relation { table, .. } if !table_ids.contains(table.as_str()) => {
            Err(SchemaError::MissingReference {
                kind: "relation table",
                id: table.clone(),
            })
        }
        FieldKind::Action { tasks, .. } => {
            for task in tasks {
                if let ActionTask::Insert { table, .. } = task {
                    if !table_ids.contains(table.as_str()) {
                        return Err(SchemaError::MissingReference {
                            kind: "action insert table",
                            id: table.clone(),
                        });
                    }
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn validate(schema: &ProjectSchema) -> Result<(), SchemaError> {
    let mut table_ids: HashSet<&str> = HashSet::new();
    for t in &schema.tables {
        if !table_ids.insert(t.id.as_str()) {
            return Err(SchemaError::DuplicateId {
                kind: "table",
                owner: "project".into(),
                id: t.id.clone(),
            });
        }
    }

    for t in &schema.tables {
        unique_column_ids("field", &format!("table {}", t.id), &t.fields)?;
        for f in &t.fields {
            check_kind_references(&f.kind, &table_ids)?;
        }
    }

    let mut view_ids = HashSet::new();
    for v in &schema.views {
        if !view_ids.insert(v.id.as_str()) {
            return Err(SchemaError::DuplicateId {
                kind: "view",
                owner: "project".into(),
                id: v.id.clone(),
            });
        }
        if !table_ids.contains(v.table_id.as_str()) {
            return Err(SchemaError::MissingReference {
                kind: "table",
                id: v.table_id.clone(),
            });
        }
        unique_column_ids("field", &format!("view {}", v.id), &v.fields)?;
        for f in &v.fields {
            check_kind_references(&f.kind, &table_ids)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> ProjectSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_consistent_schema() {
        let s = schema(json!({
            "tables": [
                {"id": "task", "fields": [{"id": "title", "type": "text"}, {"id": "owner", "type": "relation", "table": "member"}]},
                {"id": "member", "fields": []}
            ],
            "views": [{"id": "allTasks", "tableId": "task", "fields": [{"id": "title", "type": "text"}]}]
        }));
        validate(&s).unwrap();
    }

    #[test]
    fn rejects_view_on_unknown_table() {
        let s = schema(json!({
            "tables": [],
            "views": [{"id": "allTasks", "tableId": "task"}]
        }));
        let err = validate(&s).unwrap_err();
        assert!(matches!(err, SchemaError::MissingReference { kind: "table", ref id } if id == "task"));
    }

    #[test]
    fn rejects_duplicate_field_ids() {
        let s = schema(json!({
            "tables": [{"id": "task", "fields": [{"id": "title", "type": "text"}, {"id": "title", "type": "number"}]}]
        }));
        let err = validate(&s).unwrap_err();
        assert_eq!(err.to_string(), "duplicate field id 'title' in table task");
    }

    #[test]
    fn rejects_relation_to_unknown_table() {
        let s = schema(json!({
            "tables": [{"id": "task", "fields": [{"id": "owner", "type": "relation", "table": "ghost"}]}]
        }));
        assert!(matches!(
            validate(&s),
            Err(SchemaError::MissingReference { kind: "relation table", .. })
        ));
    }

    #[test]
    fn rejects_action_insert_into_unknown_table() {
        let s = schema(json!({
            "tables": [{"id": "task", "fields": [{
                "id": "archive", "type": "action",
                "tasks": [{"type": "insert", "table": "archive", "insert": {}}]
            }]}]
        }));
        assert!(matches!(
            validate(&s),
            Err(SchemaError::MissingReference { kind: "action insert table", .. })
        ));
    }
}
