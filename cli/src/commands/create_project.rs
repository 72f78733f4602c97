use crate::args::CreateProjectArgs;
use crate::commands::{session, Context};
use crate::config::pick;
use crate::error::{CliError, Result};
use crate::templates;
use qore_sdk::{codegen, Organization, Project, ProjectConfig};

/// Validate the template before touching the server, then create, scaffold and configure.
pub async fn run(args: CreateProjectArgs, ctx: &mut Context) -> Result<()> {
    let template = templates::find(&args.template)?;
    let org = pick(args.org.clone(), &ctx.saved.organization_id, "org", "QORE_ORG")?;
    let token = pick(args.token.clone(), &ctx.saved.token, "token", "QORE_TOKEN")?;
    let endpoint = args.endpoint.clone().or_else(|| ctx.saved.endpoint.clone());

    let dir = args.dir.join(&args.name);
    if dir.exists() {
        return Err(CliError::Exists(dir));
    }

    let session = session(endpoint.as_deref()).with_token(token.clone());
    let project_id = Organization::new(org.clone(), session.clone())
        .create_project(&args.name)
        .await?;
    tracing::info!(project = %project_id, "created project {}", args.name);

    template.scaffold(&dir, &args.name).await?;
    let project = Project::new(
        ProjectConfig {
            organization_id: org.clone(),
            project_id: project_id.clone(),
            token: Some(token.clone()),
        },
        session,
    );
    project.auth().sign_in_with_user_token(&token).await?;
    let config = codegen::project_config(&project).await?;
    let path = codegen::write_config(&dir, &config).await?;
    tracing::info!("wrote {}", path.display());

    ctx.remember(&org, Some(&project_id), &token, endpoint.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{self, Backend, Seen};
    use qore_sdk::codegen::{CONFIG_FILE, WARNING_MESSAGE};
    use qore_sdk::QoreError;
    use serde_json::{json, Value};
    use std::path::Path;

    fn args(url: &str, dir: &Path, template: &str) -> CreateProjectArgs {
        CreateProjectArgs {
            name: "todo".into(),
            org: Some(mock::ORG.into()),
            token: Some(mock::USER_TOKEN.into()),
            template: template.into(),
            endpoint: Some(url.into()),
            dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn scaffolds_the_template_and_writes_its_config() {
        let (backend, url) = Backend::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = mock::context(tmp.path());

        run(args(&url, tmp.path(), templates::DEFAULT_TEMPLATE), &mut ctx).await.unwrap();

        let project_dir = tmp.path().join("todo");
        let raw = std::fs::read_to_string(project_dir.join(CONFIG_FILE)).unwrap();
        let config: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            config,
            json!({
                "version": "v1",
                "endpoint": url,
                "projectId": "proj1",
                "organizationId": "org1",
                "authenticationId": "pw-1",
                "WARNING": WARNING_MESSAGE
            })
        );
        assert!(project_dir.join("package.json").exists());
        assert!(project_dir.join("src/index.ts").exists());

        assert_eq!(
            backend.seen(),
            vec![
                Seen::new("POST", "/orgs/org1/projects", Some("user-token")),
                Seen::new("POST", "/orgs/org1/projects/proj1/authenticate", None),
                Seen::new("GET", "/orgs/org1/projects/proj1/auth-config", Some("Bearer jwt")),
            ]
        );
        assert_eq!(ctx.saved.project_id.as_deref(), Some("proj1"));
        assert!(ctx.config_path.exists());
    }

    #[tokio::test]
    async fn unknown_template_fails_before_any_request() {
        let (backend, url) = Backend::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = mock::context(tmp.path());

        let err = run(args(&url, tmp.path(), "some-unknown-template"), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Sdk(QoreError::InvalidTemplate { .. })));
        assert_eq!(
            err.to_string(),
            "\"some-unknown-template\" is not a valid template, please check if it is a qore project or choose from the following available templates: todo-list-typescript"
        );
        assert_eq!(err.exit_code(), 2);
        assert!(backend.seen().is_empty());
        assert!(!tmp.path().join("todo").exists());
        assert!(!ctx.config_path.exists());
    }

    #[tokio::test]
    async fn existing_directory_is_left_alone() {
        let (backend, url) = Backend::start().await;
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("todo")).unwrap();
        let mut ctx = mock::context(tmp.path());

        let err = run(args(&url, tmp.path(), templates::DEFAULT_TEMPLATE), &mut ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Exists(ref p) if p == &tmp.path().join("todo")));
        assert!(backend.seen().is_empty());
    }
}
