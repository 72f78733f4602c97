//! Live client: watched queries with caching, polling and per-key request dedup, plus tracked mutations.

use crate::live::operation::{LiveResult, NetworkPolicy, Operation, OperationKind, OperationState, Status};
use crate::response;
use crate::session::Session;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct InFlight {
    generation: u64,
    result: watch::Receiver<Option<LiveResult>>,
}

#[derive(Default)]
struct Shared {
    cache: Mutex<HashMap<u64, Value>>,
    in_flight: Mutex<HashMap<u64, InFlight>>,
    generation: AtomicU64,
}

/// Removes the leader's in-flight entry when its fetch ends or is cancelled.
struct LeaderGuard {
    shared: Arc<Shared>,
    key: u64,
    generation: u64,
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.shared.in_flight);
        if in_flight.get(&self.key).map(|f| f.generation) == Some(self.generation) {
            in_flight.remove(&self.key);
        }
    }
}

enum Role {
    Leader(watch::Sender<Option<LiveResult>>, LeaderGuard),
    Follower(watch::Receiver<Option<LiveResult>>),
}

#[derive(Clone)]
pub struct LiveClient {
    session: Session,
    shared: Arc<Shared>,
}

impl LiveClient {
    pub fn new(session: Session) -> Self {
        LiveClient {
            session,
            shared: Arc::new(Shared::default()),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Last successful payload for an operation key.
    pub fn cached(&self, key: u64) -> Option<Value> {
        lock(&self.shared.cache).get(&key).cloned()
    }

    /// Forget one cached payload. Returns whether an entry was removed.
    pub fn invalidate(&self, key: u64) -> bool {
        lock(&self.shared.cache).remove(&key).is_some()
    }

    /// Drop every cached payload, e.g. after sign-out.
    pub fn clear(&self) {
        lock(&self.shared.cache).clear();
    }

    fn claim(&self, key: u64) -> Role {
        let mut in_flight = lock(&self.shared.in_flight);
        if let Some(f) = in_flight.get(&key) {
            return Role::Follower(f.result.clone());
        }
        let generation = self.shared.generation.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = watch::channel(None);
        in_flight.insert(key, InFlight { generation, result: rx });
        Role::Leader(
            tx,
            LeaderGuard {
                shared: self.shared.clone(),
                key,
                generation,
            },
        )
    }

    /// Fetch over the network. Concurrent calls for one key share the leader's result;
    /// if the leader is dropped before finishing, a waiting follower becomes the new leader.
    pub async fn fetch(&self, op: &Operation) -> LiveResult {
        let key = op.key();
        loop {
            match self.claim(key) {
                Role::Leader(tx, guard) => {
                    let result = self.session.send(op.request().clone()).await.map_err(Arc::new);
                    if let Ok(value) = &result {
                        lock(&self.shared.cache).insert(key, value.clone());
                    }
                    tx.send_replace(Some(result.clone()));
                    drop(guard);
                    return result;
                }
                Role::Follower(mut rx) => {
                    tracing::trace!(key, "joining in-flight request");
                    loop {
                        let ready = rx.borrow_and_update().clone();
                        if let Some(result) = ready {
                            return result;
                        }
                        if rx.changed().await.is_err() {
                            let ready = rx.borrow().clone();
                            if let Some(result) = ready {
                                return result;
                            }
                            tracing::debug!(key, "in-flight leader cancelled, retrying");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Subscribe to an operation's state. Polling (if configured) runs until the subscription is dropped.
    pub fn watch(&self, op: Operation) -> Subscription {
        let policy = op.config().network_policy;
        let cached = self.cached(op.key());
        let initial = match (policy, cached) {
            (NetworkPolicy::CacheOnly, Some(data)) => OperationState {
                status: Status::Success,
                data: Some(data),
                ..OperationState::default()
            },
            (NetworkPolicy::CacheOnly, None) => OperationState::default(),
            (NetworkPolicy::NetworkAndCache, Some(data)) => OperationState {
                status: Status::Loading,
                data: Some(data),
                error: None,
                stale: true,
            },
            (_, _) => OperationState {
                status: Status::Loading,
                ..OperationState::default()
            },
        };
        let (tx, rx) = watch::channel(initial);
        if policy == NetworkPolicy::CacheOnly {
            return Subscription { state: rx, task: None };
        }

        let client = self.clone();
        let task = tokio::spawn(async move {
            loop {
                tx.send_modify(|s| s.status = Status::Loading);
                let result = client.fetch(&op).await;
                tx.send_modify(|s| match result {
                    Ok(data) => {
                        s.status = Status::Success;
                        s.data = Some(data);
                        s.error = None;
                        s.stale = false;
                    }
                    Err(e) => {
                        tracing::warn!(path = %op.request().path, error = %e, "live fetch failed");
                        s.status = Status::Error;
                        s.error = Some(e);
                    }
                });
                match op.config().poll_interval {
                    Some(interval) if !tx.is_closed() => tokio::time::sleep(interval).await,
                    _ => break,
                }
            }
        });
        Subscription {
            state: rx,
            task: Some(task),
        }
    }

    pub fn mutation(&self, op: Operation) -> Mutation {
        let (state, _) = watch::channel(OperationState::default());
        Mutation {
            client: self.clone(),
            op,
            state,
        }
    }
}

/// Handle on a watched operation. Dropping it stops the background fetch.
pub struct Subscription {
    state: watch::Receiver<OperationState>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn state(&self) -> OperationState {
        self.state.borrow().clone()
    }

    /// Wait for the next published state.
    pub async fn changed(&mut self) -> Option<OperationState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Wait until a state satisfies `done`, returning it; `None` once no more states can arrive.
    pub async fn wait_for(&mut self, done: impl Fn(&OperationState) -> bool) -> Option<OperationState> {
        self.state.wait_for(|s| done(s)).await.ok().map(|s| s.clone())
    }

    pub fn receiver(&self) -> watch::Receiver<OperationState> {
        self.state.clone()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// A write operation whose status is observable while it runs.
pub struct Mutation {
    client: LiveClient,
    op: Operation,
    state: watch::Sender<OperationState>,
}

impl Mutation {
    pub fn state(&self) -> OperationState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<OperationState> {
        self.state.subscribe()
    }

    /// Send the operation with `body` (if any).
    ///
    /// Inserts and updates resolve to the row read back through their view, which
    /// is also cached under that row's `get_row` key. Deletes and actions resolve to `true`.
    pub async fn run(&self, body: Option<Value>) -> LiveResult {
        let op = match body {
            Some(body) => self.op.clone().with_body(body),
            None => self.op.clone(),
        };
        self.state.send_modify(|s| {
            s.status = Status::Loading;
            s.error = None;
        });
        let result = self.execute(&op).await;
        self.state.send_modify(|s| match &result {
            Ok(data) => {
                s.status = Status::Success;
                s.data = Some(data.clone());
            }
            Err(e) => {
                s.status = Status::Error;
                s.error = Some(e.clone());
            }
        });
        result
    }

    async fn execute(&self, op: &Operation) -> LiveResult {
        let response = self.client.session.send(op.request().clone()).await.map_err(Arc::new)?;
        let (view_id, row_id) = match op.kind() {
            OperationKind::InsertRow { view_id } => (view_id, response::created_id(response).map_err(Arc::new)?),
            OperationKind::UpdateRow { view_id, row_id } => (view_id, row_id.clone()),
            OperationKind::DeleteRow | OperationKind::ExecuteAction { .. } => return Ok(Value::Bool(true)),
            OperationKind::ListRows | OperationKind::GetRow => return Ok(response),
        };
        self.client.fetch(&Operation::get_row(op.paths(), view_id, &row_id)).await
    }
}
