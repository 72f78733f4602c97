//! Column capabilities resolved from a field list, shared by every row of one table or view.

use crate::schema::{ColumnDef, FieldType};
use std::collections::HashMap;

/// What a client can do with a column of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Plain value written with a row PATCH.
    Scalar,
    /// Links to rows of another table.
    Relation,
    /// Runs server-side tasks.
    Action,
    /// Computed or managed by the server.
    ReadOnly,
}

impl Capability {
    pub fn for_type(ty: FieldType) -> Self {
        match ty {
            FieldType::Text
            | FieldType::Number
            | FieldType::Boolean
            | FieldType::Date
            | FieldType::Select
            | FieldType::File
            | FieldType::Password => Capability::Scalar,
            FieldType::Relation => Capability::Relation,
            FieldType::Action => Capability::Action,
            FieldType::Rollup | FieldType::Lookup | FieldType::Formula | FieldType::Role => {
                Capability::ReadOnly
            }
        }
    }
}

/// Field id -> (kind, capability), built once per table/view accessor.
#[derive(Clone, Debug, Default)]
pub struct ColumnIndex {
    by_id: HashMap<String, (FieldType, Capability)>,
}

impl ColumnIndex {
    pub fn from_columns<'a, C: ColumnDef + 'a>(columns: impl IntoIterator<Item = &'a C>) -> Self {
        let by_id = columns
            .into_iter()
            .map(|c| {
                let ty = c.field_type();
                (c.id().to_string(), (ty, Capability::for_type(ty)))
            })
            .collect();
        ColumnIndex { by_id }
    }

    pub fn field_type(&self, field_id: &str) -> Option<FieldType> {
        self.by_id.get(field_id).map(|(ty, _)| *ty)
    }

    pub fn capability(&self, field_id: &str) -> Option<Capability> {
        self.by_id.get(field_id).map(|(_, cap)| *cap)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.by_id.contains_key(field_id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
