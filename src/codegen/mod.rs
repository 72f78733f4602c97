//! TypeScript type generation from a project schema.

pub mod artifacts;
pub mod mapping;
pub mod render;
pub mod types;

pub use artifacts::{
    project_config, read_config, schema_document, write_all, write_config, write_schema, write_types, Artifacts,
    QoreConfigFile, CONFIG_FILE, SCHEMA_FILE, TYPES_FILE,
};
pub use mapping::{generate, read_type, write_type, SCHEMA_TYPE_NAME};
pub use render::render;
pub use types::{Property, TsType, TypeDecl, TypeModule};

/// Marker placed at the top of every generated file.
pub const WARNING_MESSAGE: &str =
    "[WARNING] This file is generated by running `$ qore codegen` on your root project, please do not edit";

/// Generate and render in one step.
pub fn typescript(schema: &crate::schema::ProjectSchema) -> String {
    render(&generate(schema))
}
