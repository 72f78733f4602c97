pub mod codegen;
pub mod create_project;
pub mod export_schema;
#[cfg(test)]
mod mock;

use crate::config::{pick, CliConfig};
use crate::error::Result;
use crate::args::ProjectArgs;
use qore_sdk::{Endpoint, HttpTransport, Project, ProjectConfig, Session};
use std::path::PathBuf;
use std::sync::Arc;

/// Saved defaults plus where they live.
pub struct Context {
    pub config_path: PathBuf,
    pub saved: CliConfig,
}

impl Context {
    pub fn remember(&mut self, org: &str, project: Option<&str>, token: &str, endpoint: Option<&str>) -> Result<()> {
        self.saved.remember(org, project, token, endpoint);
        self.saved.save(&self.config_path)
    }
}

/// HTTP session with an explicit endpoint, or the SDK's `QORE_SERVER`/default resolution.
pub fn session(endpoint: Option<&str>) -> Session {
    match endpoint {
        Some(url) => Session::new(Arc::new(HttpTransport::new(Endpoint::fixed(url)))),
        None => Session::http(),
    }
}

/// Project selection after applying saved defaults.
pub struct Selected {
    pub org: String,
    pub project: String,
    pub token: String,
    pub endpoint: Option<String>,
}

impl Selected {
    pub fn resolve(args: &ProjectArgs, saved: &CliConfig) -> Result<Self> {
        Ok(Selected {
            org: pick(args.org.clone(), &saved.organization_id, "org", "QORE_ORG")?,
            project: pick(args.project.clone(), &saved.project_id, "project", "QORE_PROJECT")?,
            token: pick(args.token.clone(), &saved.token, "token", "QORE_TOKEN")?,
            endpoint: args.endpoint.clone().or_else(|| saved.endpoint.clone()),
        })
    }

    pub fn project(&self) -> Project {
        Project::new(
            ProjectConfig {
                organization_id: self.org.clone(),
                project_id: self.project.clone(),
                token: Some(self.token.clone()),
            },
            session(self.endpoint.as_deref()),
        )
    }

    pub fn save(&self, ctx: &mut Context) -> Result<()> {
        ctx.remember(&self.org, Some(&self.project), &self.token, self.endpoint.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProjectArgs {
        ProjectArgs {
            project: None,
            org: Some("org-flag".into()),
            token: None,
            endpoint: None,
            out_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn saved_defaults_fill_missing_flags() {
        let saved = CliConfig {
            organization_id: Some("org-saved".into()),
            project_id: Some("proj-saved".into()),
            token: Some("tok".into()),
            endpoint: Some("http://localhost:8080".into()),
        };
        let selected = Selected::resolve(&args(), &saved).unwrap();
        assert_eq!(selected.org, "org-flag");
        assert_eq!(selected.project, "proj-saved");
        assert_eq!(selected.project().session().endpoint(), "http://localhost:8080");
        assert_eq!(selected.project().session().token().as_deref(), Some("tok"));
    }

    #[test]
    fn missing_project_is_reported() {
        let err = Selected::resolve(&args(), &CliConfig::default()).err().unwrap();
        assert_eq!(err.to_string(), "missing --project (or set QORE_PROJECT)");
    }
}
