//! Table accessor: fields, rows and the table itself.

use crate::accessor::{wrap_row, wrap_rows};
use crate::accessor::Row;
use crate::error::{QoreError, Result};
use crate::paths::ProjectPaths;
use crate::response::created_id;
use crate::schema::{ColumnIndex, Field, NewField, Table};
use crate::session::Session;
use crate::transport::{ApiRequest, Method};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct TableHandle {
    table: Table,
    columns: Arc<ColumnIndex>,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl TableHandle {
    pub(crate) fn new(table: Table, session: Session, paths: Arc<ProjectPaths>) -> Self {
        let columns = Arc::new(ColumnIndex::from_columns(&table.fields));
        TableHandle {
            table,
            columns,
            session,
            paths,
        }
    }

    pub fn id(&self) -> &str {
        &self.table.id
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    /// Table definition as fetched.
    pub fn schema(&self) -> &Table {
        &self.table
    }

    pub async fn add_field(&self, field: &NewField) -> Result<String> {
        let value = self.session.post(self.paths.field(&self.table.id, None), field).await?;
        created_id(value)
    }

    pub fn fields(&self) -> Vec<FieldHandle> {
        self.table
            .fields
            .iter()
            .map(|f| self.field_handle(f.clone()))
            .collect()
    }

    pub fn field(&self, id: &str) -> Result<FieldHandle> {
        let field = self
            .table
            .fields
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| QoreError::FieldNotFound { field_id: id.to_string() })?;
        Ok(self.field_handle(field.clone()))
    }

    fn field_handle(&self, field: Field) -> FieldHandle {
        FieldHandle {
            field,
            table_id: self.table.id.clone(),
            session: self.session.clone(),
            paths: self.paths.clone(),
        }
    }

    pub async fn rows(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<Row>> {
        let request = ApiRequest::new(Method::Get, self.paths.row(&self.table.id, None)).page(limit, offset);
        let value = self.session.send(request).await?;
        wrap_rows(value, &self.table.id, &self.columns, &self.session, &self.paths)
    }

    pub async fn row(&self, row_id: &str) -> Result<Row> {
        let value = self.session.get(self.paths.row(&self.table.id, Some(row_id))).await?;
        wrap_row(value, &self.table.id, &self.columns, &self.session, &self.paths)
    }

    /// Insert a row, optionally with initial column values. Returns the server-assigned id.
    pub async fn add_row(&self, params: Option<&Value>) -> Result<String> {
        let body = params.cloned().unwrap_or_else(|| json!({}));
        let value = self.session.post(self.paths.row(&self.table.id, None), &body).await?;
        created_id(value)
    }

    pub async fn update<B: Serialize>(&self, partial: &B) -> Result<()> {
        self.session.patch(self.paths.table(Some(&self.table.id)), partial).await?;
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        self.session.delete(self.paths.table(Some(&self.table.id))).await?;
        Ok(())
    }
}

/// Field definition of a table with its mutators.
#[derive(Clone)]
pub struct FieldHandle {
    field: Field,
    table_id: String,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl FieldHandle {
    pub fn definition(&self) -> &Field {
        &self.field
    }

    pub fn id(&self) -> &str {
        &self.field.id
    }

    pub async fn update<B: Serialize>(&self, partial: &B) -> Result<()> {
        self.session
            .patch(self.paths.field(&self.table_id, Some(&self.field.id)), partial)
            .await?;
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        self.session
            .delete(self.paths.field(&self.table_id, Some(&self.field.id)))
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for TableHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableHandle")
            .field("table", &self.table)
            .finish()
    }
}
