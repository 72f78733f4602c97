//! Identifier helpers for generated TypeScript: type-name casing and property-key quoting.

use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("static identifier pattern"))
}

/// Upper-case the first character and leave the rest untouched.
/// e.g. "allTasks" -> "AllTasks", "task_item" -> "Task_item"
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `s` can be written as a bare TypeScript property name.
pub fn is_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

/// Property key as it appears in an object type: bare when it is an identifier, JSON-quoted otherwise.
/// e.g. "title" -> title, "$by.title" -> "$by.title"
pub fn property_key(s: &str) -> String {
    if is_identifier(s) {
        s.to_string()
    } else {
        quote(s)
    }
}

/// Double-quoted string literal with JSON escaping.
pub fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Generated row type name for a table id, e.g. "task" -> "TaskTableRow".
pub fn table_row_type(table_id: &str) -> String {
    format!("{}TableRow", capitalize(table_id))
}

/// Generated row type name for a view id, e.g. "allTasks" -> "AllTasksViewRow".
pub fn view_row_type(view_id: &str) -> String {
    format!("{}ViewRow", capitalize(view_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_only_touches_first_char() {
        assert_eq!(capitalize("allTasks"), "AllTasks");
        assert_eq!(capitalize("task_item"), "Task_item");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("écrit"), "Écrit");
    }

    #[test]
    fn keys_are_quoted_only_when_needed() {
        assert_eq!(property_key("title"), "title");
        assert_eq!(property_key("$by.title"), "\"$by.title\"");
        assert_eq!(property_key("due-date"), "\"due-date\"");
        assert_eq!(property_key("2nd"), "\"2nd\"");
    }

    #[test]
    fn type_names() {
        assert_eq!(table_row_type("task"), "TaskTableRow");
        assert_eq!(view_row_type("allTasks"), "AllTasksViewRow");
    }
}
