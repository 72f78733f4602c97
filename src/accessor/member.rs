//! Member and role accessors.

use crate::error::Result;
use crate::paths::ProjectPaths;
use crate::schema::{Member, Role};
use crate::session::Session;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct MemberHandle {
    member: Member,
    role: RoleHandle,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl MemberHandle {
    pub(crate) fn new(member: Member, session: Session, paths: Arc<ProjectPaths>) -> Self {
        let role = RoleHandle::new(member.role.clone(), session.clone(), paths.clone());
        MemberHandle {
            member,
            role,
            session,
            paths,
        }
    }

    pub fn id(&self) -> &str {
        &self.member.id
    }

    pub fn email(&self) -> &str {
        &self.member.email
    }

    pub fn name(&self) -> &str {
        &self.member.name
    }

    pub fn role(&self) -> &RoleHandle {
        &self.role
    }

    pub async fn delete(&self) -> Result<()> {
        self.session.delete(self.paths.member(Some(&self.member.id))).await?;
        Ok(())
    }

    pub async fn update_role(&self, role_id: &str) -> Result<()> {
        self.session
            .patch(self.paths.member(Some(&self.member.id)), &json!({ "roleId": role_id }))
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct RoleHandle {
    role: Role,
    session: Session,
    paths: Arc<ProjectPaths>,
}

impl RoleHandle {
    pub(crate) fn new(role: Role, session: Session, paths: Arc<ProjectPaths>) -> Self {
        RoleHandle { role, session, paths }
    }

    pub fn id(&self) -> &str {
        &self.role.id
    }

    pub fn name(&self) -> &str {
        &self.role.name
    }

    pub fn permissions(&self) -> &[String] {
        &self.role.permissions
    }

    pub async fn delete(&self) -> Result<()> {
        self.session.delete(self.paths.role(Some(&self.role.id))).await?;
        Ok(())
    }

    pub async fn update<B: Serialize>(&self, partial: &B) -> Result<()> {
        self.session.patch(self.paths.role(Some(&self.role.id)), partial).await?;
        Ok(())
    }
}
