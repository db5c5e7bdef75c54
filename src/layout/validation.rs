// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layout definitions.
//!
//! Unknown tokens and layouts that cannot be closed are fatal. Duplicate keys
//! and naming mismatches are collected as warnings.

use crate::layout::types::{
    fold_case, KeyDescriptor, KeyKind, Layout, LayoutDefinition, LayoutError, ParseResult, Severity,
    ValidationIssue,
};
use std::collections::HashSet;

/// Validates a raw definition and builds the layout from it.
pub fn validate_layout(definition: LayoutDefinition) -> Result<ParseResult<Layout>, LayoutError> {
    let mut issues = Vec::new();

    validate_metadata(&definition, &mut issues);
    let keys = resolve_keys(&definition, &mut issues);
    validate_key_set(&keys, &mut issues);
    validate_break_tokens(&definition, &mut issues);

    let (errors, warnings): (Vec<_>, Vec<_>) = issues
        .into_iter()
        .partition(|issue| issue.severity == Severity::Error);

    if !errors.is_empty() {
        return Err(LayoutError::validation_error(errors));
    }

    for warning in &warnings {
        tracing::warn!("Layout '{}': {}", definition.name, warning);
    }

    let layout = Layout {
        name: definition.name,
        mode: definition.mode,
        keys,
    };
    Ok(ParseResult::with_warnings(layout, warnings))
}

fn validate_metadata(definition: &LayoutDefinition, issues: &mut Vec<ValidationIssue>) {
    if definition.name.is_empty() {
        issues.push(
            ValidationIssue::new(Severity::Warning, "Layout name is empty", "name")
                .with_suggestion("Provide a descriptive name for the layout"),
        );
    } else if definition.name != definition.mode.as_str() {
        issues.push(ValidationIssue::new(
            Severity::Warning,
            format!(
                "Layout name '{}' differs from its mode '{}'",
                definition.name, definition.mode
            ),
            "name",
        ));
    }

    if definition.keys.is_empty() {
        issues.push(
            ValidationIssue::new(Severity::Error, "Layout has no keys", "keys")
                .with_suggestion("List the key tokens in display order"),
        );
    }
}

/// Maps tokens to descriptors, reporting unknown tokens as errors.
fn resolve_keys(
    definition: &LayoutDefinition,
    issues: &mut Vec<ValidationIssue>,
) -> Vec<KeyDescriptor> {
    let mut keys = Vec::with_capacity(definition.keys.len());

    for (i, token) in definition.keys.iter().enumerate() {
        match KeyKind::from_token(token) {
            Some(kind) => {
                let mut key = KeyDescriptor::new(kind);
                if kind == KeyKind::LineBreak || definition.break_after.contains(token) {
                    key = key.with_line_break();
                }
                keys.push(key);
            }
            None if is_unfoldable_letter(token) => issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    format!("Letter '{}' does not change case as a single character", token),
                    format!("keys[{}]", i),
                )
                .with_suggestion("Use a letter whose upper and lower case are one character each"),
            ),
            None => issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    format!("Unknown key token '{}'", token),
                    format!("keys[{}]", i),
                )
                .with_suggestion(
                    "Use a single character or one of: backspace, caps, enter, space, done, br",
                ),
            ),
        }
    }

    keys
}

/// A single letter such as `ß` whose case mapping expands to several characters.
fn is_unfoldable_letter(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic() && fold_case(c, false).is_none(),
        _ => false,
    }
}

fn validate_key_set(keys: &[KeyDescriptor], issues: &mut Vec<ValidationIssue>) {
    if !keys.is_empty() && !keys.iter().any(|key| key.kind == KeyKind::Done) {
        issues.push(
            ValidationIssue::new(Severity::Error, "Layout has no done key", "keys")
                .with_suggestion("Add a \"done\" key so the panel can be closed"),
        );
    }

    let mut seen = HashSet::new();
    for (i, key) in keys.iter().enumerate() {
        if key.kind == KeyKind::LineBreak {
            continue;
        }
        if !seen.insert(key.kind) {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                format!("Key '{}' appears more than once", key.kind.token()),
                format!("keys[{}]", i),
            ));
        }
    }
}

fn validate_break_tokens(definition: &LayoutDefinition, issues: &mut Vec<ValidationIssue>) {
    for (i, token) in definition.break_after.iter().enumerate() {
        if !definition.keys.contains(token) {
            issues.push(ValidationIssue::new(
                Severity::Warning,
                format!("Line break token '{}' matches no key", token),
                format!("break_after[{}]", i),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::LayoutMode;

    fn definition(keys: &[&str], break_after: &[&str]) -> LayoutDefinition {
        LayoutDefinition {
            name: "numeric".to_string(),
            mode: LayoutMode::Numeric,
            keys: keys.iter().map(|s| s.to_string()).collect(),
            break_after: break_after.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Test 1: A well-formed definition validates without warnings
    #[test]
    fn test_valid_definition() {
        let result = validate_layout(definition(&["1", "2", "br", "backspace", "done"], &[]))
            .expect("Should validate");

        assert!(!result.has_warnings());
        assert_eq!(result.layout.keys.len(), 5);
        assert!(result.layout.keys[2].breaks_line, "br always breaks");
        assert!(!result.layout.keys[3].breaks_line);
    }

    /// Test 2: break_after tokens end rows
    #[test]
    fn test_break_after_tokens() {
        let result =
            validate_layout(definition(&["1", "backspace", "done"], &["backspace"])).unwrap();
        assert!(result.layout.keys[1].breaks_line);
        assert_eq!(result.layout.rows().len(), 2);
    }

    /// Test 3: Unknown tokens are fatal
    #[test]
    fn test_unknown_token_is_error() {
        let err = validate_layout(definition(&["1", "shift", "done"], &[])).unwrap_err();
        match err {
            LayoutError::ValidationError { issues, .. } => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].field_path, "keys[1]");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    /// Test 4: A layout without done cannot be closed
    #[test]
    fn test_missing_done_is_error() {
        let err = validate_layout(definition(&["1", "2"], &[])).unwrap_err();
        assert!(err.to_string().contains("no done key"));
    }

    /// Test 5: Empty layouts are rejected
    #[test]
    fn test_empty_layout_is_error() {
        let err = validate_layout(definition(&[], &[])).unwrap_err();
        assert!(err.to_string().contains("no keys"));
    }

    /// Test 6: Duplicates and stray break tokens are warnings
    #[test]
    fn test_duplicates_are_warnings() {
        let result =
            validate_layout(definition(&["1", "1", "br", "br", "done"], &["enter"])).unwrap();
        assert_eq!(result.warning_count(), 2, "duplicate '1' and stray 'enter'");
    }

    /// Test 7: Name and mode mismatch is a warning
    #[test]
    fn test_name_mode_mismatch() {
        let mut def = definition(&["1", "done"], &[]);
        def.name = "phone".to_string();
        let result = validate_layout(def).unwrap();
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.warnings[0].field_path, "name");
    }

    /// Test 8: Letters that expand when case-mapped are rejected
    #[test]
    fn test_expanding_letters_are_errors() {
        let mut def = definition(&["a", "ß", "İ", "caps", "backspace", "done"], &[]);
        def.name = "alphanumeric".to_string();
        def.mode = LayoutMode::Alphanumeric;

        match validate_layout(def).unwrap_err() {
            LayoutError::ValidationError { issues, .. } => {
                let paths: Vec<_> = issues.iter().map(|i| i.field_path.as_str()).collect();
                assert_eq!(paths, vec!["keys[1]", "keys[2]"]);
                assert!(issues[0].message.contains("single character"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
