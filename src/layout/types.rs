// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the key descriptors that make up a layout, the raw
//! JSON layout definition, and the error and validation types produced while
//! loading layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents layout from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while checking a layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "keys[12]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for layout loading operations.
#[derive(Debug)]
pub enum LayoutError {
    /// I/O error occurred while reading a layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// File path that caused the error
        file_path: String,
    },

    /// JSON parsing error
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: usize,
    },

    /// A builtin layout resource is missing from the embedded assets
    MissingResource {
        /// Name of the resource file
        name: String,
    },

    /// Validation errors found in the layout
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },
}

impl LayoutError {
    /// Creates a JSON parsing error, optionally tagged with a file path.
    pub fn json_error(source: serde_json::Error, file_path: Option<&str>) -> Self {
        let line_number = source.line();
        Self::JsonError {
            source,
            file_path: file_path.map(str::to_string),
            line_number,
        }
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }

    /// Attaches a file path to errors that do not carry one yet.
    pub fn with_file_path(self, path: &str) -> Self {
        match self {
            LayoutError::ValidationError {
                issues,
                file_path: None,
            } => LayoutError::ValidationError {
                issues,
                file_path: Some(path.to_string()),
            },
            LayoutError::JsonError {
                source,
                file_path: None,
                line_number,
            } => LayoutError::JsonError {
                source,
                file_path: Some(path.to_string()),
                line_number,
            },
            other => other,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::IoError { source, file_path } => {
                write!(f, "I/O error reading file '{}': {}", file_path, source)?;
                write!(
                    f,
                    "\n  Suggestion: Check that the file exists and you have read permissions"
                )?;
            }
            LayoutError::JsonError {
                source,
                file_path,
                line_number,
            } => {
                write!(f, "JSON parsing error")?;
                if let Some(path) = file_path {
                    write!(f, " in file '{}'", path)?;
                }
                write!(f, " at line {}: {}", line_number, source)?;
                write!(f, "\n  Suggestion: Check the JSON syntax at the indicated line")?;
            }
            LayoutError::MissingResource { name } => {
                write!(f, "Builtin layout resource '{}' is missing", name)?;
            }
            LayoutError::ValidationError { issues, file_path } => {
                write!(f, "Validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for file '{}'", path)?;
                }
                writeln!(f, " with {} issue(s):", issues.len())?;
                for (i, issue) in issues.iter().enumerate() {
                    write!(f, "  {}. {}", i + 1, issue)?;
                    if i < issues.len() - 1 {
                        writeln!(f)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::IoError { source, .. } => Some(source),
            LayoutError::JsonError { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ============================================================================
// ParseResult Type
// ============================================================================

/// Result of successfully parsing a layout with optional warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully parsed layout
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Layout Data Structures
// ============================================================================

/// Which key set the panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Digits, backspace and done only
    Numeric,
    /// Digits, letters, punctuation, caps, enter, space and done
    Alphanumeric,
}

impl LayoutMode {
    /// Name used in layout files and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Numeric => "numeric",
            LayoutMode::Alphanumeric => "alphanumeric",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What pressing a key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// A digit `0`-`9`
    Digit(char),
    /// A letter, case-folded by caps lock when typed
    Letter(char),
    /// Punctuation such as `,` `.` `?`
    Symbol(char),
    /// Removes the last character
    Backspace,
    /// Flips caps lock
    CapsToggle,
    /// Appends a newline
    Enter,
    /// Appends a space
    Space,
    /// Commits the value and closes the panel
    Done,
    /// Row terminator; not a real key
    LineBreak,
}

impl KeyKind {
    /// Parses a layout token such as `"7"`, `"q"`, `"backspace"` or `"br"`.
    ///
    /// Returns `None` for tokens that name no known key.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "backspace" => Some(KeyKind::Backspace),
            "caps" => Some(KeyKind::CapsToggle),
            "enter" => Some(KeyKind::Enter),
            "space" => Some(KeyKind::Space),
            "done" => Some(KeyKind::Done),
            "br" => Some(KeyKind::LineBreak),
            _ => {
                let mut chars = token.chars();
                let c = chars.next()?;
                if chars.next().is_some() || c.is_whitespace() || c.is_control() {
                    return None;
                }
                Some(if c.is_ascii_digit() {
                    KeyKind::Digit(c)
                } else if c.is_alphabetic() {
                    KeyKind::Letter(fold_case(c, false)?)
                } else {
                    KeyKind::Symbol(c)
                })
            }
        }
    }

    /// The layout token for this key.
    pub fn token(&self) -> String {
        match self {
            KeyKind::Digit(c) | KeyKind::Letter(c) | KeyKind::Symbol(c) => c.to_string(),
            KeyKind::Backspace => "backspace".to_string(),
            KeyKind::CapsToggle => "caps".to_string(),
            KeyKind::Enter => "enter".to_string(),
            KeyKind::Space => "space".to_string(),
            KeyKind::Done => "done".to_string(),
            KeyKind::LineBreak => "br".to_string(),
        }
    }

    /// The character a glyph key types, if it is one.
    pub fn character(&self) -> Option<char> {
        match self {
            KeyKind::Digit(c) | KeyKind::Letter(c) | KeyKind::Symbol(c) => Some(*c),
            _ => None,
        }
    }

    /// Icon name shown instead of a text label for control keys.
    pub fn icon(&self) -> Option<&'static str> {
        match self {
            KeyKind::Backspace => Some("backspace"),
            KeyKind::CapsToggle => Some("keyboard_capslock"),
            KeyKind::Enter => Some("keyboard_return"),
            KeyKind::Space => Some("space_bar"),
            KeyKind::Done => Some("check_circle"),
            _ => None,
        }
    }

    /// Lower-cases letter keys so they match the keys on a panel.
    ///
    /// Letters without a single-character lowercase form are returned as-is.
    pub fn normalized(self) -> Self {
        match self {
            KeyKind::Letter(c) => KeyKind::Letter(fold_case(c, false).unwrap_or(c)),
            other => other,
        }
    }

    /// Returns `true` if pressing the key changes the text buffer.
    pub fn edits_text(&self) -> bool {
        matches!(
            self,
            KeyKind::Digit(_)
                | KeyKind::Letter(_)
                | KeyKind::Symbol(_)
                | KeyKind::Backspace
                | KeyKind::Enter
                | KeyKind::Space
        )
    }
}

/// Maps `c` to upper or lower case when the mapping is exactly one character.
///
/// Letters such as `ß` (upper case `SS`) return `None` when either direction
/// expands, so a letter key always types one character in both cases.
pub fn fold_case(c: char, upper: bool) -> Option<char> {
    fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
        let first = mapped.next()?;
        mapped.next().is_none().then_some(first)
    }

    let upper_form = single(c.to_uppercase())?;
    let lower_form = single(c.to_lowercase())?;
    Some(if upper { upper_form } else { lower_form })
}

/// Immutable per-key metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDescriptor {
    /// What the key does
    pub kind: KeyKind,
    /// Whether a new row starts after this key
    pub breaks_line: bool,
}

impl KeyDescriptor {
    /// Creates a descriptor that does not end its row.
    pub fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            breaks_line: false,
        }
    }

    /// Marks the key as the last one in its row.
    pub fn with_line_break(mut self) -> Self {
        self.breaks_line = true;
        self
    }

    /// Text label for glyph keys, cased by the caps state.
    ///
    /// Control keys return their icon name.
    pub fn label(&self, caps_lock: bool) -> String {
        match self.kind {
            KeyKind::Letter(c) if caps_lock => c.to_uppercase().collect(),
            KeyKind::Digit(c) | KeyKind::Letter(c) | KeyKind::Symbol(c) => c.to_string(),
            KeyKind::LineBreak => String::new(),
            kind => kind.icon().unwrap_or_default().to_string(),
        }
    }
}

/// Layout definition as written in JSON.
///
/// ```json
/// {
///     "name": "numeric",
///     "mode": "numeric",
///     "keys": ["7", "8", "9", "br", "0", "backspace", "done"],
///     "break_after": ["backspace", "br"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Layout name
    pub name: String,
    /// Mode the layout serves
    pub mode: LayoutMode,
    /// Key tokens in display order
    pub keys: Vec<String>,
    /// Tokens after which a row ends
    #[serde(default)]
    pub break_after: Vec<String>,
}

/// A validated, ready-to-render layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Layout name
    pub name: String,
    /// Mode the layout serves
    pub mode: LayoutMode,
    /// Keys in display order
    pub keys: Vec<KeyDescriptor>,
}

impl Layout {
    /// Groups the keys into rows, splitting after every line-breaking key.
    pub fn rows(&self) -> Vec<&[KeyDescriptor]> {
        let mut rows = Vec::new();
        let mut start = 0;
        for (i, key) in self.keys.iter().enumerate() {
            if key.breaks_line {
                rows.push(&self.keys[start..=i]);
                start = i + 1;
            }
        }
        if start < self.keys.len() {
            rows.push(&self.keys[start..]);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test 1: Tokens map onto key kinds
    #[test]
    fn test_key_kind_from_token() {
        assert_eq!(KeyKind::from_token("7"), Some(KeyKind::Digit('7')));
        assert_eq!(KeyKind::from_token("q"), Some(KeyKind::Letter('q')));
        assert_eq!(KeyKind::from_token("Q"), Some(KeyKind::Letter('q')));
        assert_eq!(KeyKind::from_token("?"), Some(KeyKind::Symbol('?')));
        assert_eq!(KeyKind::from_token("backspace"), Some(KeyKind::Backspace));
        assert_eq!(KeyKind::from_token("caps"), Some(KeyKind::CapsToggle));
        assert_eq!(KeyKind::from_token("enter"), Some(KeyKind::Enter));
        assert_eq!(KeyKind::from_token("space"), Some(KeyKind::Space));
        assert_eq!(KeyKind::from_token("done"), Some(KeyKind::Done));
        assert_eq!(KeyKind::from_token("br"), Some(KeyKind::LineBreak));
    }

    /// Test 2: Unknown, empty and whitespace tokens are rejected
    #[test]
    fn test_key_kind_rejects_unknown_tokens() {
        assert_eq!(KeyKind::from_token(""), None);
        assert_eq!(KeyKind::from_token(" "), None);
        assert_eq!(KeyKind::from_token("shift"), None);
        assert_eq!(KeyKind::from_token(".com"), None);
    }

    /// Test 3: Token round trip for every named key
    #[test]
    fn test_named_tokens_round_trip() {
        for token in ["backspace", "caps", "enter", "space", "done", "br", "a", "5", ","] {
            let kind = KeyKind::from_token(token).expect("known token");
            assert_eq!(kind.token(), token);
        }
    }

    /// Test 4: Labels follow caps lock for letters only
    #[test]
    fn test_descriptor_labels() {
        let letter = KeyDescriptor::new(KeyKind::Letter('c'));
        assert_eq!(letter.label(false), "c");
        assert_eq!(letter.label(true), "C");

        let digit = KeyDescriptor::new(KeyKind::Digit('4'));
        assert_eq!(digit.label(true), "4");

        let done = KeyDescriptor::new(KeyKind::Done);
        assert_eq!(done.label(false), "check_circle");
        assert_eq!(KeyDescriptor::new(KeyKind::LineBreak).label(false), "");
    }

    /// Test 5: Rows split after line-breaking keys
    #[test]
    fn test_layout_rows() {
        let layout = Layout {
            name: "test".to_string(),
            mode: LayoutMode::Numeric,
            keys: vec![
                KeyDescriptor::new(KeyKind::Digit('1')),
                KeyDescriptor::new(KeyKind::LineBreak).with_line_break(),
                KeyDescriptor::new(KeyKind::Digit('2')),
                KeyDescriptor::new(KeyKind::Done),
            ],
        };

        let rows = layout.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][1].kind, KeyKind::Done);
    }

    /// Test 6: Validation errors list every issue
    #[test]
    fn test_validation_error_display() {
        let err = LayoutError::validation_error(vec![
            ValidationIssue::new(Severity::Error, "Unknown key token 'x1'", "keys[0]")
                .with_suggestion("Use a single character or a named key"),
            ValidationIssue::new(Severity::Error, "Layout has no done key", "keys"),
        ])
        .with_file_path("custom.json");

        let display = err.to_string();
        assert!(display.contains("custom.json"));
        assert!(display.contains("2 issue(s)"));
        assert!(display.contains("[ERROR] keys[0]"));
        assert!(display.contains("Suggestion"));
    }

    /// Test 7: Letters must fold to one character in both cases
    #[test]
    fn test_fold_case_single_character() {
        assert_eq!(fold_case('a', true), Some('A'));
        assert_eq!(fold_case('Ä', false), Some('ä'));
        assert_eq!(fold_case('ß', false), None, "Upper case of ß is SS");
        assert_eq!(fold_case('İ', false), None, "Lower case of İ is two chars");
        assert_eq!(KeyKind::from_token("ß"), None);
        assert_eq!(KeyKind::from_token("İ"), None);
        assert_eq!(KeyKind::Letter('Q').normalized(), KeyKind::Letter('q'));
        assert_eq!(KeyKind::Digit('7').normalized(), KeyKind::Digit('7'));
    }
}
