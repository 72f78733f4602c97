//! In-process Qore backend for command tests. Records method, path and `Authorization` of each call.

use super::Context;
use crate::args::ProjectArgs;
use crate::config::CliConfig;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const ORG: &str = "org1";
pub const PROJECT: &str = "proj1";
pub const USER_TOKEN: &str = "user-token";

#[derive(Clone, Debug, PartialEq)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

impl Seen {
    pub fn new(method: &str, path: &str, authorization: Option<&str>) -> Self {
        Seen {
            method: method.to_string(),
            path: path.to_string(),
            authorization: authorization.map(str::to_string),
        }
    }
}

#[derive(Clone, Default)]
pub struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    /// Serve on an ephemeral port; returns the backend and its base URL.
    pub async fn start() -> (Backend, String) {
        let backend = Backend::default();
        let app = Router::new().fallback(answer).with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (backend, format!("http://{}", addr))
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

pub fn task_schema() -> Value {
    json!({
        "tables": [{"id": "task", "name": "Task", "fields": [{"id": "title", "name": "Title", "type": "text"}]}],
        "views": [{
            "id": "allTasks", "name": "All tasks", "tableId": "task",
            "fields": [{"id": "title", "name": "Title", "type": "text"}],
            "parameters": [], "sorts": []
        }],
        "roles": []
    })
}

/// Context whose saved defaults live in `dir`, starting empty.
pub fn context(dir: &Path) -> Context {
    Context {
        config_path: dir.join("config.toml"),
        saved: CliConfig::default(),
    }
}

/// Flags selecting the mock project, writing into `out_dir`.
pub fn project_args(url: &str, out_dir: &Path) -> ProjectArgs {
    ProjectArgs {
        project: Some(PROJECT.into()),
        org: Some(ORG.into()),
        token: Some(USER_TOKEN.into()),
        endpoint: Some(url.into()),
        out_dir: out_dir.to_path_buf(),
    }
}

async fn answer(State(backend): State<Backend>, method: Method, uri: Uri, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization,
    });
    let reply = match (method.as_str(), uri.path()) {
        ("POST", "/orgs/org1/projects") => json!({ "id": PROJECT }),
        ("POST", "/orgs/org1/projects/proj1/authenticate") => json!({ "jwtToken": "jwt" }),
        ("GET", "/orgs/org1/projects/proj1/schema") => task_schema(),
        ("GET", "/orgs/org1/projects/proj1/auth-config") => json!({ "password": { "id": "pw-1" } }),
        _ => return (StatusCode::NOT_FOUND, Json(json!({ "message": "no such route" }))),
    };
    (StatusCode::OK, Json(reply))
}
