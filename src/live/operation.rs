//! Row operations watched or run by the live client, keyed by a request fingerprint.

use crate::error::QoreError;
use crate::paths::ProjectPaths;
use crate::transport::{ApiRequest, Method};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

/// Where a watched operation gets its data from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkPolicy {
    #[default]
    NetworkOnly,
    NetworkAndCache,
    CacheOnly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperationConfig {
    pub network_policy: NetworkPolicy,
    /// Repeat the fetch this often while subscribed.
    pub poll_interval: Option<Duration>,
}

impl OperationConfig {
    pub fn policy(mut self, policy: NetworkPolicy) -> Self {
        self.network_policy = policy;
        self
    }

    pub fn poll_every(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    ListRows,
    GetRow,
    /// Created rows are read back through `view_id`.
    InsertRow { view_id: String },
    UpdateRow { view_id: String, row_id: String },
    DeleteRow,
    ExecuteAction { row_id: String },
}

#[derive(Clone, Debug)]
pub struct Operation {
    kind: OperationKind,
    paths: ProjectPaths,
    request: ApiRequest,
    config: OperationConfig,
    key: u64,
}

/// Stable hash of method, path, query and body. The token is not part of it.
pub fn fingerprint(request: &ApiRequest) -> u64 {
    let mut hasher = DefaultHasher::new();
    request.method.hash(&mut hasher);
    request.path.hash(&mut hasher);
    request.query.hash(&mut hasher);
    request.body.as_ref().map(Value::to_string).hash(&mut hasher);
    hasher.finish()
}

impl Operation {
    fn new(kind: OperationKind, paths: &ProjectPaths, request: ApiRequest) -> Self {
        let key = fingerprint(&request);
        Operation {
            kind,
            paths: paths.clone(),
            request,
            config: OperationConfig::default(),
            key,
        }
    }

    /// Rows of a view, already projected; `params` become query pairs.
    pub fn list_rows(paths: &ProjectPaths, view_id: &str, params: &[(&str, &str)], limit: Option<u32>, offset: Option<u32>) -> Self {
        let mut request = ApiRequest::new(Method::Get, paths.view_rows(view_id, None)).page(limit, offset);
        for (k, v) in params {
            request = request.query(*k, v);
        }
        Operation::new(OperationKind::ListRows, paths, request)
    }

    /// One row as projected by a view.
    pub fn get_row(paths: &ProjectPaths, view_id: &str, row_id: &str) -> Self {
        Operation::new(
            OperationKind::GetRow,
            paths,
            ApiRequest::new(Method::Get, paths.view_rows(view_id, Some(row_id))),
        )
    }

    pub fn insert_row(paths: &ProjectPaths, view_id: &str, table_id: &str) -> Self {
        Operation::new(
            OperationKind::InsertRow {
                view_id: view_id.to_string(),
            },
            paths,
            ApiRequest::new(Method::Post, paths.row(table_id, None)),
        )
    }

    pub fn update_row(paths: &ProjectPaths, view_id: &str, table_id: &str, row_id: &str) -> Self {
        Operation::new(
            OperationKind::UpdateRow {
                view_id: view_id.to_string(),
                row_id: row_id.to_string(),
            },
            paths,
            ApiRequest::new(Method::Patch, paths.row(table_id, Some(row_id))),
        )
    }

    pub fn delete_row(paths: &ProjectPaths, table_id: &str, row_id: &str) -> Self {
        Operation::new(
            OperationKind::DeleteRow,
            paths,
            ApiRequest::new(Method::Delete, paths.row(table_id, Some(row_id))),
        )
    }

    pub fn execute_action(paths: &ProjectPaths, table_id: &str, row_id: &str, field_id: &str) -> Self {
        Operation::new(
            OperationKind::ExecuteAction { row_id: row_id.to_string() },
            paths,
            ApiRequest::new(Method::Post, paths.execute_row(table_id, row_id, field_id)),
        )
    }

    pub fn with_config(mut self, config: OperationConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a body. Action parameters are wrapped as `{rowId, params}`.
    pub fn with_body(mut self, body: Value) -> Self {
        let body = match &self.kind {
            OperationKind::ExecuteAction { row_id } => json!({ "rowId": row_id, "params": body }),
            _ => body,
        };
        self.request = self.request.body(body);
        self.key = fingerprint(&self.request);
        self
    }

    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    pub fn config(&self) -> &OperationConfig {
        &self.config
    }

    pub fn key(&self) -> u64 {
        self.key
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Outcome shared between every waiter of one fetch.
pub type LiveResult = std::result::Result<Value, Arc<QoreError>>;

/// Snapshot published to subscribers after every transition.
#[derive(Clone, Debug, Default)]
pub struct OperationState {
    pub status: Status,
    pub data: Option<Value>,
    pub error: Option<Arc<QoreError>>,
    /// `data` came from the cache and a refresh has not completed yet.
    pub stale: bool,
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths() -> ProjectPaths {
        ProjectPaths::new("org", "proj")
    }

    #[test]
    fn same_request_same_key() {
        let a = Operation::get_row(&paths(), "allTasks", "1");
        let b = Operation::get_row(&paths(), "allTasks", "1").with_config(OperationConfig::default().poll_every(Duration::from_secs(1)));
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), Operation::get_row(&paths(), "allTasks", "2").key());
        assert_ne!(a.key(), Operation::delete_row(&paths(), "task", "1").key());
    }

    #[test]
    fn query_and_body_change_the_key() {
        let plain = Operation::list_rows(&paths(), "allTasks", &[], Some(10), None);
        let filtered = Operation::list_rows(&paths(), "allTasks", &[("owner", "me")], Some(10), None);
        assert_ne!(plain.key(), filtered.key());
        assert_eq!(filtered.request().query, vec![("limit".to_string(), "10".to_string()), ("owner".into(), "me".into())]);

        let update = Operation::update_row(&paths(), "allTasks", "task", "1");
        assert_ne!(update.key(), update.clone().with_body(json!({"title": "x"})).key());
    }

    #[test]
    fn action_body_is_wrapped() {
        let op = Operation::execute_action(&paths(), "task", "r1", "finish").with_body(json!({"note": "ok"}));
        assert_eq!(op.request().method, Method::Post);
        assert_eq!(op.request().body, Some(json!({"rowId": "r1", "params": {"note": "ok"}})));
        assert!(op.request().path.ends_with("/tables/task/rows/r1/action/finish"));
    }

    #[test]
    fn rows_are_read_through_the_view() {
        let get = Operation::get_row(&paths(), "allTasks", "r1");
        assert_eq!(get.request().method, Method::Get);
        assert_eq!(get.request().path, "/orgs/org/projects/proj/views/allTasks/v2rows/r1");

        let insert = Operation::insert_row(&paths(), "allTasks", "task");
        assert_eq!(insert.request().method, Method::Post);
        assert_eq!(insert.request().path, "/orgs/org/projects/proj/tables/task/rows");
        assert_eq!(insert.kind(), &OperationKind::InsertRow { view_id: "allTasks".into() });

        let update = Operation::update_row(&paths(), "allTasks", "task", "r1");
        assert_eq!(update.request().method, Method::Patch);
        assert_eq!(update.request().path, "/orgs/org/projects/proj/tables/task/rows/r1");
        assert_eq!(Operation::get_row(update.paths(), "allTasks", "r1").key(), get.key());
    }

    #[test]
    fn policy_names_are_kebab_case() {
        assert_eq!(serde_json::to_value(NetworkPolicy::NetworkAndCache).unwrap(), json!("network-and-cache"));
        let p: NetworkPolicy = serde_json::from_value(json!("cache-only")).unwrap();
        assert_eq!(p, NetworkPolicy::CacheOnly);
    }
}
