//! Qore SDK: typed client for Qore projects, schema model, and TypeScript type generation.

pub mod accessor;
pub mod case;
pub mod codegen;
pub mod error;
pub mod live;
pub mod paths;
pub mod project;
pub mod response;
pub mod schema;
pub mod session;
pub mod transport;

pub use accessor::{Column, FieldHandle, MemberHandle, RoleHandle, Row, TableHandle, VieldHandle, ViewHandle};
pub use codegen::{generate, render, QoreConfigFile};
pub use error::{QoreError, Result, SchemaError};
pub use live::{LiveClient, NetworkPolicy, Operation, OperationConfig};
pub use paths::{parse_row_path, ProjectPaths, RowPath};
pub use project::{Auth, Organization, Project, ProjectConfig};
pub use schema::{load_from_path, load_from_str, FieldKind, FieldType, ProjectSchema};
pub use session::Session;
pub use transport::{ApiRequest, Endpoint, HttpTransport, Method, Transport};
