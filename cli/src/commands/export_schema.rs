use crate::args::ProjectArgs;
use crate::commands::{Context, Selected};
use crate::error::Result;
use qore_sdk::codegen;

pub async fn run(args: ProjectArgs, ctx: &mut Context) -> Result<()> {
    let selected = Selected::resolve(&args, &ctx.saved)?;
    let project = selected.project();
    project.auth().sign_in_with_user_token(&selected.token).await?;
    let schema = project.export_schema().await?;
    let path = codegen::write_schema(&args.out_dir, &schema).await?;
    tracing::info!(
        project = %selected.project,
        tables = schema.tables.len(),
        views = schema.views.len(),
        "exported schema to {}",
        path.display()
    );
    selected.save(ctx)
}
