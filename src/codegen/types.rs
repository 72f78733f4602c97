//! Intermediate representation of generated TypeScript declarations.

/// A TypeScript type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TsType {
    /// Primitive or declared type name, e.g. `string`, `Date`, `TaskTableRow`.
    Named(String),
    /// Union of string literals in declaration order; `never` when empty.
    StringUnion(Vec<String>),
    Array(Box<TsType>),
    Object(Vec<Property>),
}

impl TsType {
    pub fn named(name: impl Into<String>) -> Self {
        TsType::Named(name.into())
    }

    pub fn string() -> Self {
        TsType::named("string")
    }

    /// `{ id: string; displayField: string }`, the shape of a reference to another record.
    pub fn record_ref() -> Self {
        TsType::Object(vec![
            Property::required("id", TsType::string()),
            Property::required("displayField", TsType::string()),
        ])
    }

    pub fn array(inner: TsType) -> Self {
        TsType::Array(Box::new(inner))
    }

    pub fn properties(&self) -> &[Property] {
        match self {
            TsType::Object(props) => props,
            _ => &[],
        }
    }

    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties().iter().find(|p| p.key == key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub optional: bool,
    pub ty: TsType,
}

impl Property {
    pub fn required(key: impl Into<String>, ty: TsType) -> Self {
        Property {
            key: key.into(),
            optional: false,
            ty,
        }
    }

    pub fn optional(key: impl Into<String>, ty: TsType) -> Self {
        Property {
            key: key.into(),
            optional: true,
            ty,
        }
    }
}

/// `type <name> = <ty>;`, optionally exported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub exported: bool,
    pub ty: TsType,
}

/// A whole generated file: leading comment lines then declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeModule {
    pub comments: Vec<String>,
    pub decls: Vec<TypeDecl>,
}

impl TypeModule {
    pub fn decl(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.iter().find(|d| d.name == name)
    }
}
