use crate::args::ProjectArgs;
use crate::commands::{Context, Selected};
use crate::error::Result;
use qore_sdk::codegen;

pub async fn run(args: ProjectArgs, ctx: &mut Context) -> Result<()> {
    let selected = Selected::resolve(&args, &ctx.saved)?;
    let project = selected.project();
    let written = codegen::write_all(&project, &selected.token, &args.out_dir).await?;
    tracing::info!("wrote {}", written.schema.display());
    tracing::info!("wrote {}", written.types.display());
    tracing::info!("wrote {}", written.config.display());
    selected.save(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{self, project_args, Backend, Seen};
    use qore_sdk::codegen::{read_config, CONFIG_FILE, SCHEMA_FILE, TYPES_FILE};

    #[tokio::test]
    async fn writes_schema_types_and_config() {
        let (backend, url) = Backend::start().await;
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = mock::context(tmp.path());

        run(project_args(&url, tmp.path()), &mut ctx).await.unwrap();

        assert!(tmp.path().join(SCHEMA_FILE).exists());
        let ts = std::fs::read_to_string(tmp.path().join(TYPES_FILE)).unwrap();
        assert!(ts.contains("type AllTasksViewRow = {"));
        assert!(ts.contains("export type QoreProjectSchema"));
        let config = read_config(&tmp.path().join(CONFIG_FILE)).await.unwrap();
        assert_eq!(config.endpoint, url);
        assert_eq!(config.authentication_id.as_deref(), Some("pw-1"));

        assert_eq!(
            backend.seen(),
            vec![
                Seen::new("POST", "/orgs/org1/projects/proj1/authenticate", None),
                Seen::new("GET", "/orgs/org1/projects/proj1/schema", Some("Bearer jwt")),
                Seen::new("GET", "/orgs/org1/projects/proj1/auth-config", Some("Bearer jwt")),
            ]
        );
    }
}
