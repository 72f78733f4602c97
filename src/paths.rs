//! REST paths for every project resource. Pure functions of the organization/project pair and entity ids.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::sync::OnceLock;

/// Characters escaped inside one path segment; `/` and `%` included so ids cannot break out of their segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn seg(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

fn collection_or_item(base: String, literal: &str, id: Option<&str>) -> String {
    match id {
        None => format!("{}/{}", base, literal),
        Some(id) => format!("{}/{}/{}", base, literal, seg(id)),
    }
}

/// Path builder for one project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectPaths {
    organization_id: String,
    project_id: String,
}

impl ProjectPaths {
    pub fn new(organization_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        ProjectPaths {
            organization_id: organization_id.into(),
            project_id: project_id.into(),
        }
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn project(&self) -> String {
        format!(
            "/orgs/{}/projects/{}",
            seg(&self.organization_id),
            seg(&self.project_id)
        )
    }

    pub fn table(&self, id: Option<&str>) -> String {
        collection_or_item(self.project(), "tables", id)
    }

    pub fn view(&self, id: Option<&str>) -> String {
        collection_or_item(self.project(), "views", id)
    }

    pub fn field(&self, table_id: &str, field_id: Option<&str>) -> String {
        collection_or_item(self.table(Some(table_id)), "fields", field_id)
    }

    pub fn vield(&self, view_id: &str, field_id: Option<&str>) -> String {
        collection_or_item(self.view(Some(view_id)), "fields", field_id)
    }

    pub fn row(&self, table_id: &str, row_id: Option<&str>) -> String {
        collection_or_item(self.table(Some(table_id)), "rows", row_id)
    }

    pub fn add_row_relation(&self, table_id: &str, row_id: &str, field_id: &str) -> String {
        format!("{}/relation/{}", self.row(table_id, Some(row_id)), seg(field_id))
    }

    pub fn remove_row_relation(&self, table_id: &str, row_id: &str, field_id: &str, ref_row_id: &str) -> String {
        format!(
            "{}/{}",
            self.add_row_relation(table_id, row_id, field_id),
            seg(ref_row_id)
        )
    }

    pub fn execute_row(&self, table_id: &str, row_id: &str, field_id: &str) -> String {
        format!("{}/action/{}", self.row(table_id, Some(row_id)), seg(field_id))
    }

    /// Row endpoint scoped to a view; rows come back already projected and filtered.
    pub fn view_rows(&self, view_id: &str, row_id: Option<&str>) -> String {
        collection_or_item(self.view(Some(view_id)), "v2rows", row_id)
    }

    pub fn project_login(&self) -> String {
        format!("{}/authenticate", self.project())
    }

    pub fn auth_config(&self) -> String {
        format!("{}/auth-config", self.project())
    }

    pub fn export_schema(&self) -> String {
        format!("{}/schema", self.project())
    }

    pub fn member(&self, id: Option<&str>) -> String {
        collection_or_item(self.project(), "members", id)
    }

    pub fn role(&self, id: Option<&str>) -> String {
        collection_or_item(self.project(), "roles", id)
    }
}

/// Projects collection of an organization (used when creating a project).
pub fn organization_projects(organization_id: &str) -> String {
    format!("/orgs/{}/projects", seg(organization_id))
}

/// Ids recovered from a row item path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowPath {
    pub organization_id: String,
    pub project_id: String,
    pub table_id: String,
    pub row_id: String,
}

fn row_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^/orgs/([^/]+)/projects/([^/]+)/tables/([^/]+)/rows/([^/]+)$").expect("static row path pattern")
    })
}

fn decode(s: &str) -> Option<String> {
    percent_decode_str(s).decode_utf8().ok().map(|c| c.into_owned())
}

/// Parse `/orgs/{org}/projects/{proj}/tables/{table}/rows/{row}` back into its ids.
pub fn parse_row_path(path: &str) -> Option<RowPath> {
    let caps = row_path_re().captures(path)?;
    Some(RowPath {
        organization_id: decode(&caps[1])?,
        project_id: decode(&caps[2])?,
        table_id: decode(&caps[3])?,
        row_id: decode(&caps[4])?,
    })
}
