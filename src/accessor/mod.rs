//! Accessors over project entities. Each call is one round trip; nothing is cached locally.

pub mod column;
pub mod member;
pub mod row;
pub mod table;
pub mod view;

pub use column::{ActionColumn, Column, ReadOnlyColumn, RelationColumn, ScalarColumn};
pub use member::{MemberHandle, RoleHandle};
pub use row::Row;
pub use table::{FieldHandle, TableHandle};
pub use view::{VieldHandle, ViewHandle};

use crate::error::Result;
use crate::paths::ProjectPaths;
use crate::response::nodes;
use crate::schema::ColumnIndex;
use crate::session::Session;
use serde_json::Value;
use std::sync::Arc;

fn wrap_row(
    node: Value,
    table_id: &str,
    columns: &Arc<ColumnIndex>,
    session: &Session,
    paths: &Arc<ProjectPaths>,
) -> Result<Row> {
    Row::from_node(node, table_id, columns.clone(), session.clone(), paths.clone())
}

fn wrap_rows(
    list: Value,
    table_id: &str,
    columns: &Arc<ColumnIndex>,
    session: &Session,
    paths: &Arc<ProjectPaths>,
) -> Result<Vec<Row>> {
    nodes::<Value>(list)?
        .into_iter()
        .map(|node| wrap_row(node, table_id, columns, session, paths))
        .collect()
}
