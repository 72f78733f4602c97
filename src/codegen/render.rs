//! Deterministic TypeScript formatter for [`TypeModule`].

use crate::case::{property_key, quote};
use crate::codegen::types::{TsType, TypeDecl, TypeModule};

const INDENT: &str = "  ";

fn render_type(ty: &TsType, depth: usize, out: &mut String) {
    match ty {
        TsType::Named(name) => out.push_str(name),
        TsType::StringUnion(values) if values.is_empty() => out.push_str("never"),
        TsType::StringUnion(values) => {
            let parts: Vec<String> = values.iter().map(|v| quote(v)).collect();
            out.push_str(&parts.join(" | "));
        }
        TsType::Array(inner) => {
            let wrap = matches!(inner.as_ref(), TsType::StringUnion(v) if v.len() > 1);
            if wrap {
                out.push('(');
            }
            render_type(inner, depth, out);
            if wrap {
                out.push(')');
            }
            out.push_str("[]");
        }
        TsType::Object(props) if props.is_empty() => out.push_str("{}"),
        TsType::Object(props) => {
            out.push_str("{\n");
            for prop in props {
                out.push_str(&INDENT.repeat(depth + 1));
                out.push_str(&property_key(&prop.key));
                if prop.optional {
                    out.push('?');
                }
                out.push_str(": ");
                render_type(&prop.ty, depth + 1, out);
                out.push_str(";\n");
            }
            out.push_str(&INDENT.repeat(depth));
            out.push('}');
        }
    }
}

pub fn render_decl(decl: &TypeDecl) -> String {
    let mut out = String::new();
    if decl.exported {
        out.push_str("export ");
    }
    out.push_str("type ");
    out.push_str(&decl.name);
    out.push_str(" = ");
    render_type(&decl.ty, 0, &mut out);
    out.push(';');
    out
}

/// Comment lines, a blank line, then declarations separated by blank lines. Ends with a newline.
pub fn render(module: &TypeModule) -> String {
    let mut blocks: Vec<String> = Vec::with_capacity(module.decls.len() + 1);
    if !module.comments.is_empty() {
        blocks.push(
            module
                .comments
                .iter()
                .map(|c| format!("// {}", c))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }
    blocks.extend(module.decls.iter().map(render_decl));
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::types::Property;

    fn decl(ty: TsType) -> TypeDecl {
        TypeDecl {
            name: "T".into(),
            exported: false,
            ty,
        }
    }

    #[test]
    fn renders_nested_objects_with_two_space_indent() {
        let ty = TsType::Object(vec![
            Property::required("id", TsType::string()),
            Property::optional("owner", TsType::record_ref()),
        ]);
        assert_eq!(
            render_decl(&decl(ty)),
            "type T = {\n  id: string;\n  owner?: {\n    id: string;\n    displayField: string;\n  };\n};"
        );
    }

    #[test]
    fn unions_and_arrays() {
        let status = TsType::StringUnion(vec!["todo".into(), "done".into()]);
        assert_eq!(render_decl(&decl(status.clone())), r#"type T = "todo" | "done";"#);
        assert_eq!(render_decl(&decl(TsType::array(status))), r#"type T = ("todo" | "done")[];"#);
        assert_eq!(render_decl(&decl(TsType::array(TsType::string()))), "type T = string[];");
        assert_eq!(render_decl(&decl(TsType::StringUnion(vec![]))), "type T = never;");
    }

    #[test]
    fn empty_object_and_quoted_keys() {
        assert_eq!(render_decl(&decl(TsType::Object(vec![]))), "type T = {};");
        let ty = TsType::Object(vec![Property::optional("$by.title", TsType::StringUnion(vec!["ASC".into()]))]);
        assert_eq!(render_decl(&decl(ty)), "type T = {\n  \"$by.title\"?: \"ASC\";\n};");
    }

    #[test]
    fn module_layout() {
        let module = TypeModule {
            comments: vec!["generated".into()],
            decls: vec![
                decl(TsType::string()),
                TypeDecl {
                    name: "S".into(),
                    exported: true,
                    ty: TsType::Object(vec![]),
                },
            ],
        };
        assert_eq!(render(&module), "// generated\n\ntype T = string;\n\nexport type S = {};\n");
    }
}
