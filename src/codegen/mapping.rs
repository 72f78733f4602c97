//! Schema -> TypeScript declarations. Pure and deterministic: same schema, same module.

use crate::case::{table_row_type, view_row_type};
use crate::codegen::types::{Property, TsType, TypeDecl, TypeModule};
use crate::codegen::WARNING_MESSAGE;
use crate::schema::{ColumnDef, FieldKind, FieldType, Parameter, ParameterType, ProjectSchema, Sort, Table, View};

/// Name of the exported aggregate type mapping view ids to view row types.
pub const SCHEMA_TYPE_NAME: &str = "QoreProjectSchema";

/// Synthetic id every row type starts with.
const ID_FIELD: &str = "id";

fn return_type(return_type: &str) -> TsType {
    match return_type {
        "table" => TsType::record_ref(),
        "text" => TsType::string(),
        other => TsType::named(other),
    }
}

/// Type of a column when read.
pub fn read_type(kind: &FieldKind) -> TsType {
    match kind {
        FieldKind::Text | FieldKind::File | FieldKind::Password => TsType::string(),
        FieldKind::Role => TsType::record_ref(),
        FieldKind::Relation { table, multiple } => {
            let row = TsType::named(table_row_type(table));
            if *multiple {
                TsType::Object(vec![Property::required("nodes", TsType::array(row))])
            } else {
                row
            }
        }
        FieldKind::Rollup { .. } => TsType::named("number"),
        FieldKind::Date => TsType::named("Date"),
        FieldKind::Select { select } => TsType::StringUnion(select.clone()),
        FieldKind::Lookup { return_type: rt, .. } | FieldKind::Formula { return_type: rt, .. } => return_type(rt),
        FieldKind::Number | FieldKind::Boolean | FieldKind::Action { .. } => TsType::named(kind.field_type().as_str()),
    }
}

/// Type of a column when written; `None` for kinds clients cannot write.
pub fn write_type(kind: &FieldKind) -> Option<TsType> {
    if !kind.field_type().is_writable() {
        return None;
    }
    Some(match kind {
        FieldKind::Text | FieldKind::File | FieldKind::Password | FieldKind::Role => TsType::string(),
        FieldKind::Relation { .. } => TsType::array(TsType::string()),
        FieldKind::Date => TsType::named("Date"),
        FieldKind::Select { select } => TsType::StringUnion(select.clone()),
        other => TsType::named(other.field_type().as_str()),
    })
}

fn parameter_type(ty: &ParameterType) -> TsType {
    match ty {
        ParameterType::Text => TsType::string(),
        ParameterType::Number => TsType::named("number"),
        ParameterType::Boolean => TsType::named("boolean"),
        ParameterType::Date => TsType::named("Date"),
        ParameterType::Other(name) => TsType::named(name.as_str()),
    }
}

fn parameter_property(p: &Parameter) -> Property {
    Property {
        key: p.slug.clone(),
        optional: !p.required,
        ty: parameter_type(&p.type_),
    }
}

/// Columns shown in a row type: no actions, and no schema column shadowing the synthetic id.
fn row_columns<'a, C: ColumnDef + 'a>(columns: impl IntoIterator<Item = &'a C>) -> impl Iterator<Item = &'a C> {
    columns
        .into_iter()
        .filter(|c| c.field_type() != FieldType::Action && c.id() != ID_FIELD)
}

fn read_object<'a, C: ColumnDef + 'a>(columns: impl IntoIterator<Item = &'a C>) -> TsType {
    let mut props = vec![Property::required(ID_FIELD, TsType::string())];
    props.extend(row_columns(columns).map(|c| Property::required(c.id(), read_type(c.kind()))));
    TsType::Object(props)
}

/// Group sorts by column, keeping first-seen column order and distinct directions per column.
fn sort_groups(sorts: &[Sort]) -> Vec<(&str, Vec<String>)> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    for sort in sorts.iter().filter(|s| !s.by.is_empty() && !s.order.is_empty()) {
        match groups.iter_mut().find(|(by, _)| *by == sort.by) {
            Some((_, orders)) => {
                if !orders.contains(&sort.order) {
                    orders.push(sort.order.clone());
                }
            }
            None => groups.push((sort.by.as_str(), vec![sort.order.clone()])),
        }
    }
    groups
}

pub fn table_row(table: &Table) -> TypeDecl {
    TypeDecl {
        name: table_row_type(&table.id),
        exported: false,
        ty: read_object(&table.fields),
    }
}

pub fn view_row(view: &View) -> TypeDecl {
    let write = view
        .fields
        .iter()
        .filter(|v| v.id != ID_FIELD)
        .filter_map(|v| write_type(&v.kind).map(|ty| Property::required(v.id.clone(), ty)))
        .collect();

    let mut params: Vec<Property> = view.parameters.iter().map(parameter_property).collect();
    params.extend(
        sort_groups(&view.sorts)
            .into_iter()
            .map(|(by, orders)| Property::optional(format!("$by.{}", by), TsType::StringUnion(orders))),
    );

    let actions = view
        .fields
        .iter()
        .filter_map(|v| match &v.kind {
            FieldKind::Action { parameters, .. } => Some(Property::required(
                v.id.clone(),
                TsType::Object(parameters.iter().map(parameter_property).collect()),
            )),
            _ => None,
        })
        .collect();

    TypeDecl {
        name: view_row_type(&view.id),
        exported: false,
        ty: TsType::Object(vec![
            Property::required("read", read_object(&view.fields)),
            Property::required("write", TsType::Object(write)),
            Property::required("params", TsType::Object(params)),
            Property::required("actions", TsType::Object(actions)),
        ]),
    }
}

/// Declarations for a whole project: table rows, view rows, then the exported aggregate.
pub fn generate(schema: &ProjectSchema) -> TypeModule {
    let mut decls: Vec<TypeDecl> = schema.tables.iter().map(table_row).collect();
    decls.extend(schema.views.iter().map(view_row));
    decls.push(TypeDecl {
        name: SCHEMA_TYPE_NAME.to_string(),
        exported: true,
        ty: TsType::Object(
            schema
                .views
                .iter()
                .map(|v| Property::required(v.id.clone(), TsType::named(view_row_type(&v.id))))
                .collect(),
        ),
    });
    TypeModule {
        comments: vec![WARNING_MESSAGE.to_string()],
        decls,
    }
}
