//! View accessor. Rows are read and written through the view's backing table.

use crate::accessor::{wrap_row, wrap_rows};
use crate::accessor::Row;
use crate::error::Result;
use crate::paths::ProjectPaths;
use crate::response::created_id;
use crate::schema::{ColumnIndex, NewField, Vield, View, ViewDraft};
use crate::session::Session;
use crate::transport::{ApiRequest, Method};
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct ViewHandle {
    view: View,
    columns: Arc<ColumnIndex>,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl ViewHandle {
    pub(crate) fn new(view: View, session: Session, paths: Arc<ProjectPaths>) -> Self {
        let columns = Arc::new(ColumnIndex::from_columns(&view.fields));
        ViewHandle {
            view,
            columns,
            session,
            paths,
        }
    }

    pub fn id(&self) -> &str {
        &self.view.id
    }

    pub fn name(&self) -> &str {
        &self.view.name
    }

    pub fn table_id(&self) -> &str {
        &self.view.table_id
    }

    pub fn schema(&self) -> &View {
        &self.view
    }

    pub async fn add_vield(&self, field: &NewField) -> Result<String> {
        let value = self.session.post(self.paths.vield(&self.view.id, None), field).await?;
        created_id(value)
    }

    pub fn vields(&self) -> Vec<VieldHandle> {
        self.view
            .fields
            .iter()
            .map(|v| VieldHandle {
                vield: v.clone(),
                view_id: self.view.id.clone(),
                session: self.session.clone(),
                paths: self.paths.clone(),
            })
            .collect()
    }

    pub async fn rows(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<Row>> {
        let request = ApiRequest::new(Method::Get, self.paths.row(&self.view.table_id, None)).page(limit, offset);
        let value = self.session.send(request).await?;
        wrap_rows(value, &self.view.table_id, &self.columns, &self.session, &self.paths)
    }

    pub async fn row(&self, row_id: &str) -> Result<Row> {
        let value = self.session.get(self.paths.row(&self.view.table_id, Some(row_id))).await?;
        wrap_row(value, &self.view.table_id, &self.columns, &self.session, &self.paths)
    }

    pub async fn add_row(&self, params: Option<&Value>) -> Result<String> {
        let body = params.cloned().unwrap_or_else(|| json!({}));
        let value = self.session.post(self.paths.row(&self.view.table_id, None), &body).await?;
        created_id(value)
    }

    pub async fn update(&self, draft: &ViewDraft) -> Result<()> {
        self.session.patch(self.paths.view(Some(&self.view.id)), draft).await?;
        Ok(())
    }

    pub async fn delete(&self) -> Result<()> {
        self.session.delete(self.paths.view(Some(&self.view.id))).await?;
        Ok(())
    }
}

/// Field of a view with its visibility toggles.
#[derive(Clone)]
pub struct VieldHandle {
    vield: Vield,
    view_id: String,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl VieldHandle {
    pub fn definition(&self) -> &Vield {
        &self.vield
    }

    pub fn id(&self) -> &str {
        &self.vield.id
    }

    pub async fn hide(&self) -> Result<()> {
        self.session
            .delete(self.paths.vield(&self.view_id, Some(&self.vield.id)))
            .await?;
        Ok(())
    }

    pub async fn show(&self) -> Result<()> {
        let path = self.paths.vield(&self.view_id, Some(&self.vield.id));
        self.session.send(ApiRequest::new(Method::Patch, path)).await?;
        Ok(())
    }
}
