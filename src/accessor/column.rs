//! Column capabilities of one row cell, selected by the field's kind.

use crate::error::Result;
use crate::paths::ProjectPaths;
use crate::schema::Capability;
use crate::session::Session;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Address of one cell: row within its table plus the field id.
#[derive(Clone)]
pub(crate) struct Cell {
    pub(crate) session: Session,
    pub(crate) paths: Arc<ProjectPaths>,
    pub(crate) table_id: String,
    pub(crate) row_id: String,
    pub(crate) field_id: String,
}

/// A column as seen from one row.
#[derive(Clone)]
pub enum Column {
    Scalar(ScalarColumn),
    Relation(RelationColumn),
    Action(ActionColumn),
    ReadOnly(ReadOnlyColumn),
}

impl Column {
    pub(crate) fn new(capability: Capability, cell: Cell) -> Self {
        match capability {
            Capability::Scalar => Column::Scalar(ScalarColumn { cell }),
            Capability::Relation => Column::Relation(RelationColumn { cell }),
            Capability::Action => Column::Action(ActionColumn { cell }),
            Capability::ReadOnly => Column::ReadOnly(ReadOnlyColumn { field_id: cell.field_id }),
        }
    }

    pub fn field_id(&self) -> &str {
        match self {
            Column::Scalar(c) => &c.cell.field_id,
            Column::Relation(c) => &c.cell.field_id,
            Column::Action(c) => &c.cell.field_id,
            Column::ReadOnly(c) => &c.field_id,
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Column::Scalar(_) => Capability::Scalar,
            Column::Relation(_) => Capability::Relation,
            Column::Action(_) => Capability::Action,
            Column::ReadOnly(_) => Capability::ReadOnly,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarColumn> {
        match self {
            Column::Scalar(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&RelationColumn> {
        match self {
            Column::Relation(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&ActionColumn> {
        match self {
            Column::Action(c) => Some(c),
            _ => None,
        }
    }
}

/// text, number, boolean, date, select, file and password columns.
#[derive(Clone)]
pub struct ScalarColumn {
    cell: Cell,
}

impl ScalarColumn {
    /// PATCH the row with `{ <fieldId>: value }`.
    pub async fn update<V: Serialize>(&self, value: V) -> Result<()> {
        let mut body = Map::new();
        body.insert(self.cell.field_id.clone(), crate::session::to_body(&value)?);
        let path = self.cell.paths.row(&self.cell.table_id, Some(&self.cell.row_id));
        self.cell.session.patch(path, &Value::Object(body)).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct RelationColumn {
    cell: Cell,
}

impl RelationColumn {
    /// Link `row_id` (a row of the target table).
    pub async fn add(&self, row_id: &str) -> Result<()> {
        let c = &self.cell;
        let path = c.paths.add_row_relation(&c.table_id, &c.row_id, &c.field_id);
        c.session.post(path, &json!({ "value": row_id })).await?;
        Ok(())
    }

    /// Unlink `row_id`.
    pub async fn remove(&self, row_id: &str) -> Result<()> {
        let c = &self.cell;
        let path = c.paths.remove_row_relation(&c.table_id, &c.row_id, &c.field_id, row_id);
        c.session.delete(path).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ActionColumn {
    cell: Cell,
}

impl ActionColumn {
    /// Run the action on this row with the given parameters. Returns the server payload.
    pub async fn execute<P: Serialize>(&self, params: P) -> Result<Value> {
        let c = &self.cell;
        let path = c.paths.execute_row(&c.table_id, &c.row_id, &c.field_id);
        let body = json!({ "rowId": c.row_id, "params": crate::session::to_body(&params)? });
        c.session.post(path, &body).await
    }
}

/// rollup, lookup, formula and role columns: computed by the server.
#[derive(Clone, Debug)]
pub struct ReadOnlyColumn {
    field_id: String,
}
