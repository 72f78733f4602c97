use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Qore CLI: export project schemas, generate TypeScript types and scaffold projects.
#[derive(Parser, Debug)]
#[command(name = "qore")]
#[command(version)]
#[command(about = "Export Qore project schemas and generate TypeScript types", long_about = None)]
pub struct Cli {
    /// Saved defaults file (default: <config dir>/qore/config.toml)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write qore.schema.json for a project
    ExportSchema(ProjectArgs),
    /// Export the schema, then write qore-generated.ts and qore.config.json
    Codegen(ProjectArgs),
    /// Create a project from a template and scaffold it into <dir>/<name>
    CreateProject(CreateProjectArgs),
    /// Show or reset the saved defaults
    Config {
        #[arg(long)]
        reset: bool,
    },
}

/// Project selection shared by export-schema and codegen.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    #[arg(long, env = "QORE_PROJECT")]
    pub project: Option<String>,

    #[arg(long, env = "QORE_ORG")]
    pub org: Option<String>,

    /// User token issued by Qore
    #[arg(long, env = "QORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Backend URL; defaults to QORE_SERVER, then production
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory the artifacts are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CreateProjectArgs {
    pub name: String,

    #[arg(long, env = "QORE_ORG")]
    pub org: Option<String>,

    #[arg(long, env = "QORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, default_value = crate::templates::DEFAULT_TEMPLATE)]
    pub template: String,

    #[arg(long)]
    pub endpoint: Option<String>,

    /// Parent directory of the scaffolded project
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}
