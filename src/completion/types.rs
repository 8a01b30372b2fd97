//! Script model records and completion items

use std::fmt;

use serde::{Deserialize, Serialize};

/// A method declared somewhere in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Bare method name
    pub name: String,
    /// Full declaration text, e.g. `Add(a, b)`
    pub full: String,
    /// Parameter names in declaration order
    pub params: Vec<String>,
    /// Doc comment attached to the declaration
    pub comment: String,
    /// Identifier of the declaring document
    pub doc_id: String,
    /// First line of the method body (0-based)
    pub line: usize,
    /// Last line of the method body (0-based, inclusive)
    pub end_line: usize,
    /// Local variable names declared in the body
    pub variables: Vec<String>,
}

impl MethodRecord {
    /// Check if the method is declared in `doc_id` and spans `line`
    #[must_use]
    pub fn encloses(&self, doc_id: &str, line: usize) -> bool {
        self.doc_id == doc_id && (self.line..=self.end_line).contains(&line)
    }

    /// Call text inserted on completion, e.g. `Add(a, b)` or `Reload()`
    #[must_use]
    pub fn insert_text(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }
}

/// Kind of completion suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionKind {
    Method,
    Variable,
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionKind::Method => write!(f, "method"),
            CompletionKind::Variable => write!(f, "variable"),
        }
    }
}

/// One completion suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    /// Text to insert instead of the label
    pub insert_text: Option<String>,
    /// Extra detail shown next to the label; methods carry their doc comment
    pub detail: Option<String>,
}

impl CompletionItem {
    /// A plain variable suggestion
    #[must_use]
    pub fn variable(name: &str) -> Self {
        Self {
            label: name.to_string(),
            kind: CompletionKind::Variable,
            insert_text: None,
            detail: None,
        }
    }

    /// A method suggestion that inserts a call
    #[must_use]
    pub fn method(record: &MethodRecord) -> Self {
        Self {
            label: record.name.clone(),
            kind: CompletionKind::Method,
            insert_text: Some(record.insert_text()),
            detail: Some(record.comment.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MethodRecord {
        MethodRecord {
            name: "Add".to_string(),
            params: vec!["a".to_string(), "b".to_string()],
            doc_id: "file:///lib.ahk".to_string(),
            line: 10,
            end_line: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_encloses() {
        let method = record();
        assert!(method.encloses("file:///lib.ahk", 10));
        assert!(method.encloses("file:///lib.ahk", 20));
        assert!(!method.encloses("file:///lib.ahk", 21));
        assert!(!method.encloses("file:///other.ahk", 15));
    }

    #[test]
    fn test_insert_text() {
        assert_eq!(record().insert_text(), "Add(a, b)");
        let no_params = MethodRecord {
            name: "Reload".to_string(),
            ..Default::default()
        };
        assert_eq!(no_params.insert_text(), "Reload()");
    }

    #[test]
    fn test_method_item_detail() {
        assert_eq!(CompletionItem::method(&record()).detail.as_deref(), Some(""));
        let documented = MethodRecord {
            comment: "Adds two numbers".to_string(),
            ..record()
        };
        assert_eq!(
            CompletionItem::method(&documented).detail.as_deref(),
            Some("Adds two numbers")
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CompletionKind::Method.to_string(), "method");
        assert_eq!(CompletionKind::Variable.to_string(), "variable");
    }
}
