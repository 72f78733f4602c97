//! Project client: entry point to tables, views, roles, members, schema export and sign-in.

use crate::accessor::{MemberHandle, RoleHandle, TableHandle, ViewHandle};
use crate::error::{QoreError, Result};
use crate::paths::ProjectPaths;
use crate::response::{created_id, decode, nodes};
use crate::schema::{self, Member, NewMember, NewRole, NewTable, ProjectSchema, Role, Table, View, ViewDraft};
use crate::session::Session;
use crate::transport::{ApiRequest, Method};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Identity of a project and an optional pre-issued token.
#[derive(Clone, Debug, Default)]
pub struct ProjectConfig {
    pub organization_id: String,
    pub project_id: String,
    pub token: Option<String>,
}

/// Password credential of a project's authentication config.
#[derive(Clone, Debug, Deserialize)]
pub struct PasswordCredential {
    pub id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub password: Option<PasswordCredential>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    jwt_token: Option<String>,
}

#[derive(Clone)]
pub struct Project {
    paths: Arc<ProjectPaths>,
    session: Session,
}

impl Project {
    pub fn new(config: ProjectConfig, session: Session) -> Self {
        if config.token.is_some() {
            session.set_token(config.token.clone());
        }
        Project {
            paths: Arc::new(ProjectPaths::new(config.organization_id, config.project_id)),
            session,
        }
    }

    /// Project over the default HTTP transport.
    pub fn connect(config: ProjectConfig) -> Self {
        Project::new(config, Session::http())
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> Auth {
        Auth {
            session: self.session.clone(),
            paths: self.paths.clone(),
        }
    }

    pub async fn create_table(&self, table: &NewTable) -> Result<String> {
        created_id(self.session.post(self.paths.table(None), table).await?)
    }

    pub async fn tables(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<TableHandle>> {
        let value = self
            .session
            .send(ApiRequest::new(Method::Get, self.paths.table(None)).page(limit, offset))
            .await?;
        Ok(nodes::<Table>(value)?
            .into_iter()
            .map(|t| TableHandle::new(t, self.session.clone(), self.paths.clone()))
            .collect())
    }

    pub async fn table(&self, id: &str) -> Result<TableHandle> {
        let table: Table = decode(self.session.get(self.paths.table(Some(id))).await?)?;
        Ok(TableHandle::new(table, self.session.clone(), self.paths.clone()))
    }

    pub async fn create_view(&self, view: &ViewDraft) -> Result<String> {
        created_id(self.session.post(self.paths.view(None), view).await?)
    }

    pub async fn views(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<ViewHandle>> {
        let value = self
            .session
            .send(ApiRequest::new(Method::Get, self.paths.view(None)).page(limit, offset))
            .await?;
        Ok(nodes::<View>(value)?
            .into_iter()
            .map(|v| ViewHandle::new(v, self.session.clone(), self.paths.clone()))
            .collect())
    }

    pub async fn view(&self, id: &str) -> Result<ViewHandle> {
        let view: View = decode(self.session.get(self.paths.view(Some(id))).await?)?;
        Ok(ViewHandle::new(view, self.session.clone(), self.paths.clone()))
    }

    pub async fn create_role(&self, role: &NewRole) -> Result<String> {
        created_id(self.session.post(self.paths.role(None), role).await?)
    }

    pub async fn roles(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<RoleHandle>> {
        let value = self
            .session
            .send(ApiRequest::new(Method::Get, self.paths.role(None)).page(limit, offset))
            .await?;
        Ok(nodes::<Role>(value)?
            .into_iter()
            .map(|r| RoleHandle::new(r, self.session.clone(), self.paths.clone()))
            .collect())
    }

    pub async fn role(&self, id: &str) -> Result<RoleHandle> {
        let role: Role = decode(self.session.get(self.paths.role(Some(id))).await?)?;
        Ok(RoleHandle::new(role, self.session.clone(), self.paths.clone()))
    }

    pub async fn create_member(&self, member: &NewMember) -> Result<String> {
        created_id(self.session.post(self.paths.member(None), member).await?)
    }

    pub async fn members(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Vec<MemberHandle>> {
        let value = self
            .session
            .send(ApiRequest::new(Method::Get, self.paths.member(None)).page(limit, offset))
            .await?;
        Ok(nodes::<Member>(value)?
            .into_iter()
            .map(|m| MemberHandle::new(m, self.session.clone(), self.paths.clone()))
            .collect())
    }

    pub async fn member(&self, id: &str) -> Result<MemberHandle> {
        let member: Member = decode(self.session.get(self.paths.member(Some(id))).await?)?;
        Ok(MemberHandle::new(member, self.session.clone(), self.paths.clone()))
    }

    /// Full schema of the project, validated.
    pub async fn export_schema(&self) -> Result<ProjectSchema> {
        let value = self.session.get(self.paths.export_schema()).await?;
        Ok(schema::load_from_value(value)?)
    }

    pub async fn auth_config(&self) -> Result<AuthConfig> {
        decode(self.session.get(self.paths.auth_config()).await?)
    }
}

/// Sign-in state of a project's session.
pub struct Auth {
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl Auth {
    /// Exchange a user token for a project JWT; later calls carry `Bearer <jwt>`.
    pub async fn sign_in_with_user_token(&self, user_token: &str) -> Result<()> {
        let request = ApiRequest::new(Method::Post, self.paths.project_login()).body(json!({ "userToken": user_token }));
        let value = match self.session.send_anonymous(request).await {
            Ok(v) => v,
            Err(QoreError::Transport { status: Some(status @ (401 | 403)), message }) => {
                tracing::warn!(status, "sign-in rejected");
                return Err(QoreError::Unauthorized(message));
            }
            Err(e) => return Err(e),
        };
        let login: LoginResponse = decode(value)?;
        let jwt = login
            .jwt_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| QoreError::Unauthorized("sign-in response carried no token".into()))?;
        self.session.set_token(Some(format!("Bearer {}", jwt)));
        tracing::debug!(project = self.paths.project_id(), "signed in");
        Ok(())
    }

    pub fn sign_out(&self) {
        self.session.set_token(None);
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }
}

/// Organization-level operations, authorized with a user token.
pub struct Organization {
    organization_id: String,
    session: Session,
}

impl Organization {
    pub fn new(organization_id: impl Into<String>, session: Session) -> Self {
        Organization {
            organization_id: organization_id.into(),
            session,
        }
    }

    /// Create an empty project and return its id.
    pub async fn create_project(&self, name: &str) -> Result<String> {
        let path = crate::paths::organization_projects(&self.organization_id);
        created_id(self.session.post(path, &json!({ "name": name })).await?)
    }
}
