//! Shared fixtures: a recording mock transport and a sample project schema.
#![allow(dead_code)]

use async_trait::async_trait;
use qore_sdk::error::{QoreError, Result};
use qore_sdk::transport::{ApiRequest, Method, Transport};
use qore_sdk::{Project, ProjectConfig, Session};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records every request and answers from a route table keyed by method and path.
#[derive(Default)]
pub struct RecordingTransport {
    routes: Mutex<HashMap<(Method, String), std::result::Result<Value, (u16, String)>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingTransport::default())
    }

    pub fn respond(&self, method: Method, path: impl Into<String>, value: Value) {
        self.routes.lock().unwrap().insert((method, path.into()), Ok(value));
    }

    pub fn fail(&self, method: Method, path: impl Into<String>, status: u16, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.into()), Err((status, message.to_string())));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests().pop().expect("no request recorded")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        let route = self
            .routes
            .lock()
            .unwrap()
            .get(&(request.method, request.path.clone()))
            .cloned();
        match route {
            Some(Ok(value)) => Ok(value),
            Some(Err((status, message))) => Err(QoreError::transport(Some(status), message)),
            None => Ok(Value::Null),
        }
    }

    fn endpoint(&self) -> String {
        "http://qore.test".into()
    }
}

pub const ORG: &str = "org1";
pub const PROJECT: &str = "proj1";

pub fn project(transport: Arc<RecordingTransport>) -> Project {
    Project::new(
        ProjectConfig {
            organization_id: ORG.into(),
            project_id: PROJECT.into(),
            token: None,
        },
        Session::new(transport),
    )
}

/// `task` table and `allTasks` view covering every column capability.
pub fn task_table() -> Value {
    json!({
        "id": "task",
        "name": "Task",
        "fields": [
            {"id": "title", "name": "Title", "type": "text"},
            {"id": "done", "name": "Done", "type": "boolean"},
            {"id": "due", "name": "Due", "type": "date"},
            {"id": "status", "name": "Status", "type": "select", "select": ["todo", "done"]},
            {"id": "owner", "name": "Owner", "type": "relation", "table": "member"},
            {"id": "points", "name": "Points", "type": "rollup", "aggregate": "sum"},
            {"id": "ownerName", "name": "Owner name", "type": "lookup", "returnType": "text"},
            {"id": "score", "name": "Score", "type": "formula", "returnType": "number", "formula": "1"},
            {"id": "role", "name": "Role", "type": "role"},
            {"id": "finish", "name": "Finish", "type": "action", "parameters": [{"slug": "note", "type": "text"}], "tasks": []}
        ]
    })
}

pub fn all_tasks_view() -> Value {
    json!({
        "id": "allTasks",
        "name": "All tasks",
        "tableId": "task",
        "fields": [
            {"id": "title", "name": "Title", "type": "text"},
            {"id": "finish", "name": "Finish", "type": "action", "parameters": [{"slug": "note", "type": "text"}], "tasks": []}
        ],
        "sorts": [{"by": "title", "order": "ASC"}]
    })
}

pub fn member_table() -> Value {
    json!({"id": "member", "name": "Member", "fields": [{"id": "email", "name": "Email", "type": "text"}]})
}
