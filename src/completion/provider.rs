//! Completion item assembly over a script model

use std::collections::HashMap;

use crate::completion::types::{CompletionItem, MethodRecord};

/// Read-only view of the declarations in a workspace
///
/// Implementors own parsing and any caching keyed by document identity and
/// version; the assembler only queries.
pub trait ScriptModel {
    /// All methods known across documents
    fn methods(&self) -> Vec<MethodRecord>;

    /// Top-level variable names of one document
    fn variables(&self, doc_id: &str) -> Vec<String>;
}

/// A script model held fully in memory
#[derive(Debug, Clone, Default)]
pub struct ScriptSnapshot {
    pub methods: Vec<MethodRecord>,
    pub variables: HashMap<String, Vec<String>>,
}

impl ScriptModel for ScriptSnapshot {
    fn methods(&self) -> Vec<MethodRecord> {
        self.methods.clone()
    }

    fn variables(&self, doc_id: &str) -> Vec<String> {
        self.variables.get(doc_id).cloned().unwrap_or_default()
    }
}

/// Build completion items for a cursor in `doc_id` at `line`.
///
/// `preceding_char` is the character left of the cursor; after a `.` the
/// user is completing a member and no suggestions are offered.
pub fn provide_completion_items<M: ScriptModel + ?Sized>(
    model: &M,
    doc_id: &str,
    line: usize,
    preceding_char: Option<char>,
) -> Vec<CompletionItem> {
    if preceding_char == Some('.') {
        return Vec::new();
    }

    let mut items = Vec::new();
    for method in model.methods() {
        items.push(CompletionItem::method(&method));

        if method.encloses(doc_id, line) {
            items.extend(method.params.iter().map(|p| CompletionItem::variable(p)));
            items.extend(method.variables.iter().map(|v| CompletionItem::variable(v)));
        }
    }

    items.extend(
        model
            .variables(doc_id)
            .iter()
            .map(|v| CompletionItem::variable(v)),
    );
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::types::CompletionKind;

    fn mock_method(doc_id: &str, params: &[&str], variables: &[&str]) -> MethodRecord {
        MethodRecord {
            name: "mockName".to_string(),
            full: String::new(),
            params: params.iter().map(ToString::to_string).collect(),
            comment: "mockComment".to_string(),
            doc_id: doc_id.to_string(),
            line: 0,
            end_line: 5,
            variables: variables.iter().map(ToString::to_string).collect(),
        }
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_other_document_no_locals() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("mockUri1", &[], &[])],
            ..Default::default()
        };
        let items = provide_completion_items(&model, "mockUri2", 1, None);
        assert_eq!(
            items,
            vec![CompletionItem {
                label: "mockName".to_string(),
                kind: CompletionKind::Method,
                insert_text: Some("mockName()".to_string()),
                detail: Some("mockComment".to_string()),
            }]
        );
    }

    #[test]
    fn test_other_document_params_not_suggested() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("mockUri1", &["mockParam1", "mockParam2"], &[])],
            ..Default::default()
        };
        let items = provide_completion_items(&model, "mockUri2", 1, None);
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].insert_text.as_deref(),
            Some("mockName(mockParam1, mockParam2)")
        );
    }

    #[test]
    fn test_inside_method_suggests_params_then_locals() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("doc", &["p1"], &["local1"])],
            ..Default::default()
        };
        let items = provide_completion_items(&model, "doc", 3, None);
        assert_eq!(labels(&items), vec!["mockName", "p1", "local1"]);
        assert_eq!(items[1].kind, CompletionKind::Variable);
    }

    #[test]
    fn test_outside_method_range() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("doc", &["p1"], &["local1"])],
            ..Default::default()
        };
        let items = provide_completion_items(&model, "doc", 6, None);
        assert_eq!(labels(&items), vec!["mockName"]);
    }

    #[test]
    fn test_top_level_variables_last() {
        let mut variables = HashMap::new();
        variables.insert("doc".to_string(), vec!["g1".to_string(), "g2".to_string()]);
        variables.insert("other".to_string(), vec!["hidden".to_string()]);
        let model = ScriptSnapshot {
            methods: vec![mock_method("doc", &[], &[])],
            variables,
        };
        let items = provide_completion_items(&model, "doc", 10, None);
        assert_eq!(labels(&items), vec!["mockName", "g1", "g2"]);
    }

    #[test]
    fn test_member_access_suppresses_completion() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("doc", &[], &[])],
            ..Default::default()
        };
        assert!(provide_completion_items(&model, "doc", 1, Some('.')).is_empty());
        assert_eq!(provide_completion_items(&model, "doc", 1, Some('a')).len(), 1);
    }

    #[test]
    fn test_repeated_calls_identical() {
        let model = ScriptSnapshot {
            methods: vec![mock_method("doc", &["p"], &["v"])],
            ..Default::default()
        };
        let first = provide_completion_items(&model, "doc", 2, None);
        let second = provide_completion_items(&model, "doc", 2, None);
        assert_eq!(first, second);
    }
}
