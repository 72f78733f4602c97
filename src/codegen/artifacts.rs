//! Files written by `qore export-schema` and `qore codegen`.

use crate::codegen::{typescript, WARNING_MESSAGE};
use crate::error::Result;
use crate::project::Project;
use crate::schema::ProjectSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCHEMA_FILE: &str = "qore.schema.json";
pub const TYPES_FILE: &str = "qore-generated.ts";
pub const CONFIG_FILE: &str = "qore.config.json";
pub const CONFIG_VERSION: &str = "v1";

/// Exported schema with the generated-file warning as its first key.
#[derive(Serialize)]
struct SchemaDocument<'a> {
    #[serde(rename = "WARNING")]
    warning: &'static str,
    #[serde(flatten)]
    schema: &'a ProjectSchema,
}

/// Contents of `qore.config.json`, read by client applications to connect to the project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QoreConfigFile {
    pub version: String,
    pub endpoint: String,
    pub project_id: String,
    pub organization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_id: Option<String>,
    #[serde(rename = "WARNING")]
    pub warning: String,
}

impl QoreConfigFile {
    pub fn new(
        endpoint: impl Into<String>,
        organization_id: impl Into<String>,
        project_id: impl Into<String>,
        authentication_id: Option<String>,
    ) -> Self {
        QoreConfigFile {
            version: CONFIG_VERSION.to_string(),
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            organization_id: organization_id.into(),
            authentication_id,
            warning: WARNING_MESSAGE.to_string(),
        }
    }
}

/// Paths of everything a codegen run wrote.
#[derive(Clone, Debug)]
pub struct Artifacts {
    pub schema: PathBuf,
    pub types: PathBuf,
    pub config: PathBuf,
}

pub fn schema_document(schema: &ProjectSchema) -> Result<String> {
    let doc = SchemaDocument {
        warning: WARNING_MESSAGE,
        schema,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub async fn write_schema(dir: &Path, schema: &ProjectSchema) -> Result<PathBuf> {
    let path = dir.join(SCHEMA_FILE);
    tokio::fs::write(&path, schema_document(schema)?).await?;
    tracing::debug!(path = %path.display(), "wrote schema");
    Ok(path)
}

pub async fn write_types(dir: &Path, schema: &ProjectSchema) -> Result<PathBuf> {
    let path = dir.join(TYPES_FILE);
    tokio::fs::write(&path, typescript(schema)).await?;
    tracing::debug!(path = %path.display(), "wrote types");
    Ok(path)
}

pub async fn write_config(dir: &Path, config: &QoreConfigFile) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    tokio::fs::write(&path, serde_json::to_string_pretty(config)?).await?;
    tracing::debug!(path = %path.display(), "wrote config");
    Ok(path)
}

pub async fn read_config(path: &Path) -> Result<QoreConfigFile> {
    let json = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&json)?)
}

/// Config for a signed-in project, carrying its password credential id.
pub async fn project_config(project: &Project) -> Result<QoreConfigFile> {
    let auth = project.auth_config().await?;
    Ok(QoreConfigFile::new(
        project.session().endpoint(),
        project.paths().organization_id(),
        project.paths().project_id(),
        auth.password.map(|p| p.id),
    ))
}

/// Sign in with the user token, export the schema, then write all three artifacts into `dir`.
pub async fn write_all(project: &Project, user_token: &str, dir: &Path) -> Result<Artifacts> {
    project.auth().sign_in_with_user_token(user_token).await?;
    let schema = project.export_schema().await?;
    let schema_path = write_schema(dir, &schema).await?;
    let types = write_types(dir, &schema).await?;
    let config = write_config(dir, &project_config(project).await?).await?;
    tracing::info!(
        project = project.paths().project_id(),
        tables = schema.tables.len(),
        views = schema.views.len(),
        "codegen finished"
    );
    Ok(Artifacts {
        schema: schema_path,
        types,
        config,
    })
}
