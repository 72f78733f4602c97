//! Row accessor: raw column values plus per-column capabilities.

use crate::accessor::column::{Cell, Column};
use crate::error::{QoreError, Result};
use crate::paths::ProjectPaths;
use crate::schema::ColumnIndex;
use crate::session::Session;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// One record of a table, reached through the table itself or through one of its views.
#[derive(Clone)]
pub struct Row {
    id: String,
    parent_id: String,
    values: Map<String, Value>,
    columns: Arc<ColumnIndex>,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl Row {
    /// Wrap a raw API node. The node must be an object with a string `id`.
    pub(crate) fn from_node(
        node: Value,
        parent_id: &str,
        columns: Arc<ColumnIndex>,
        session: Session,
        paths: Arc<ProjectPaths>,
    ) -> Result<Self> {
        let Value::Object(values) = node else {
            return Err(QoreError::Decode("row node must be a JSON object".into()));
        };
        let id = values
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| QoreError::Decode("row node has no string id".into()))?
            .to_string();
        Ok(Row {
            id,
            parent_id: parent_id.to_string(),
            values,
            columns,
            session,
            paths,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Id of the table owning this row.
    pub fn parent_id(&self) -> &str {
        &self.parent_id
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn get(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    pub fn get_str(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).and_then(Value::as_str)
    }

    pub fn get_f64(&self, field_id: &str) -> Option<f64> {
        self.get(field_id).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, field_id: &str) -> Option<bool> {
        self.get(field_id).and_then(Value::as_bool)
    }

    /// Date column as UTC. `Ok(None)` when absent or null; error when not RFC 3339.
    pub fn get_date(&self, field_id: &str) -> Result<Option<DateTime<Utc>>> {
        match self.get(field_id) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(|d| Some(d.with_timezone(&Utc)))
                .map_err(|e| QoreError::Decode(format!("{}: {}", field_id, e))),
            Some(other) => Err(QoreError::Decode(format!("{}: expected date string, got {}", field_id, other))),
        }
    }

    /// Capability for `field_id`. Fails with `FieldNotFound` when the table/view has no such field.
    pub fn col(&self, field_id: &str) -> Result<Column> {
        let capability = self.columns.capability(field_id).ok_or_else(|| QoreError::FieldNotFound {
            field_id: field_id.to_string(),
        })?;
        Ok(Column::new(
            capability,
            Cell {
                session: self.session.clone(),
                paths: self.paths.clone(),
                table_id: self.parent_id.clone(),
                row_id: self.id.clone(),
                field_id: field_id.to_string(),
            },
        ))
    }

    /// PATCH several columns at once.
    pub async fn update<B: Serialize>(&self, partial: &B) -> Result<()> {
        let path = self.paths.row(&self.parent_id, Some(&self.id));
        self.session.patch(path, partial).await?;
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        let path = self.paths.row(&self.parent_id, Some(&self.id));
        self.session.delete(path).await?;
        Ok(())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("parent_id", &self.parent_id)
            .field("values", &self.values)
            .finish()
    }
}
