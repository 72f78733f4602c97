//! Observable row operations for UI bindings: watched queries and tracked mutations.

pub mod client;
pub mod operation;

pub use client::{LiveClient, Mutation, Subscription};
pub use operation::{
    fingerprint, LiveResult, NetworkPolicy, Operation, OperationConfig, OperationKind, OperationState, Status,
};
