//! Schema types matching the JSON exported by a Qore project (tables, views, fields, roles, members).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind tag of a field, without its kind-specific attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    Select,
    Relation,
    Rollup,
    Lookup,
    Formula,
    Action,
    File,
    Password,
    Role,
}

impl FieldType {
    pub const ALL: [FieldType; 13] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Select,
        FieldType::Relation,
        FieldType::Rollup,
        FieldType::Lookup,
        FieldType::Formula,
        FieldType::Action,
        FieldType::File,
        FieldType::Password,
        FieldType::Role,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Relation => "relation",
            FieldType::Rollup => "rollup",
            FieldType::Lookup => "lookup",
            FieldType::Formula => "formula",
            FieldType::Action => "action",
            FieldType::File => "file",
            FieldType::Password => "password",
            FieldType::Role => "role",
        }
    }

    /// Kinds whose value a client may write directly.
    pub fn is_writable(self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Number
                | FieldType::Date
                | FieldType::File
                | FieldType::Password
                | FieldType::Select
                | FieldType::Boolean
                | FieldType::Relation
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rollup aggregate. Names this client does not know are kept as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Aggregate {
    Sum,
    Count,
    Min,
    Max,
    Avg,
    Other(String),
}

impl Aggregate {
    pub fn as_str(&self) -> &str {
        match self {
            Aggregate::Sum => "sum",
            Aggregate::Count => "count",
            Aggregate::Min => "min",
            Aggregate::Max => "max",
            Aggregate::Avg => "avg",
            Aggregate::Other(name) => name,
        }
    }
}

impl From<String> for Aggregate {
    fn from(name: String) -> Self {
        match name.as_str() {
            "sum" => Aggregate::Sum,
            "count" => Aggregate::Count,
            "min" => Aggregate::Min,
            "max" => Aggregate::Max,
            "avg" => Aggregate::Avg,
            _ => Aggregate::Other(name),
        }
    }
}

impl From<Aggregate> for String {
    fn from(aggregate: Aggregate) -> Self {
        aggregate.as_str().to_string()
    }
}

/// Type of a view or action parameter. Unknown type names pass through as `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParameterType {
    Text,
    Number,
    Boolean,
    Date,
    Other(String),
}

impl ParameterType {
    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::Text => "text",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Date => "date",
            ParameterType::Other(name) => name,
        }
    }
}

impl From<String> for ParameterType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => ParameterType::Text,
            "number" => ParameterType::Number,
            "boolean" => ParameterType::Boolean,
            "date" => ParameterType::Date,
            _ => ParameterType::Other(name),
        }
    }
}

impl From<ParameterType> for String {
    fn from(ty: ParameterType) -> Self {
        ty.as_str().to_string()
    }
}

/// Declared parameter of a view or an action field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(alias = "alias")]
    pub slug: String,
    #[serde(rename = "type")]
    pub type_: ParameterType,
    #[serde(default)]
    pub required: bool,
}

/// Server-side task run by an action field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionTask {
    /// Update the row the action runs on: field id -> expression.
    Update { update: BTreeMap<String, String> },
    /// Insert a row into another table: field id -> expression.
    Insert {
        table: String,
        insert: BTreeMap<String, String>,
    },
}

fn default_return_type() -> String {
    "text".into()
}

/// Kind of a field together with its kind-specific attributes, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Date,
    File,
    Password,
    Role,
    Select {
        #[serde(default)]
        select: Vec<String>,
    },
    Relation {
        /// Target table id.
        table: String,
        #[serde(default)]
        multiple: bool,
    },
    Rollup {
        #[serde(default)]
        columns: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregate: Option<Aggregate>,
    },
    Lookup {
        #[serde(default)]
        columns: Vec<String>,
        #[serde(rename = "returnType", default = "default_return_type")]
        return_type: String,
    },
    Formula {
        #[serde(rename = "returnType", default = "default_return_type")]
        return_type: String,
        #[serde(default)]
        formula: String,
    },
    Action {
        #[serde(default)]
        parameters: Vec<Parameter>,
        #[serde(default)]
        tasks: Vec<ActionTask>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text => FieldType::Text,
            FieldKind::Number => FieldType::Number,
            FieldKind::Boolean => FieldType::Boolean,
            FieldKind::Date => FieldType::Date,
            FieldKind::File => FieldType::File,
            FieldKind::Password => FieldType::Password,
            FieldKind::Role => FieldType::Role,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Relation { .. } => FieldType::Relation,
            FieldKind::Rollup { .. } => FieldType::Rollup,
            FieldKind::Lookup { .. } => FieldType::Lookup,
            FieldKind::Formula { .. } => FieldType::Formula,
            FieldKind::Action { .. } => FieldType::Action,
        }
    }
}

/// Column definition on a table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

fn default_true() -> bool {
    true
}

/// Field as surfaced through a view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vield {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default = "default_true")]
    pub display: bool,
}

/// Shared read access to fields and vields.
pub trait ColumnDef {
    fn id(&self) -> &str;
    fn kind(&self) -> &FieldKind;

    fn field_type(&self) -> FieldType {
        self.kind().field_type()
    }
}

impl ColumnDef for Field {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

impl ColumnDef for Vield {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> &FieldKind {
        &self.kind
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    #[serde(default)]
    pub by: String,
    #[serde(default)]
    pub order: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub table_id: String,
    #[serde(default, alias = "vields")]
    pub fields: Vec<Vield>,
    #[serde(default)]
    pub filters: Vec<String>,
    #[serde(default)]
    pub sorts: Vec<Sort>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

/// Everything a project export contains that the SDK consumes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSchema {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl ProjectSchema {
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn view(&self, id: &str) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }
}

/// Body of a field creation request.
#[derive(Clone, Debug, Serialize)]
pub struct NewField {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Body of a table creation request.
#[derive(Clone, Debug, Serialize)]
pub struct NewTable {
    pub name: String,
    pub fields: Vec<NewField>,
}

/// Body of a view creation or update request. `vields` lists field ids shown by the view.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDraft {
    pub name: String,
    pub table_id: String,
    pub vields: Vec<String>,
    pub filters: Vec<String>,
    pub sorts: Vec<Sort>,
}

/// Body of a role creation request.
#[derive(Clone, Debug, Serialize)]
pub struct NewRole {
    pub name: String,
    pub permissions: Vec<String>,
}

/// Body of a member creation request.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
}
