// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing logic for loading JSON layout definitions.
//!
//! Layouts come from three places: the builtin resources embedded in the
//! binary, files named in the configuration, and in-memory strings.

use crate::layout::types::{
    Layout, LayoutDefinition, LayoutError, LayoutMode, ParseResult, Severity, ValidationIssue,
};
use crate::layout::validation::validate_layout;
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;

/// Builtin layouts shipped with the crate.
#[derive(RustEmbed)]
#[folder = "resources/layouts/"]
struct BuiltinLayouts;

/// Parses a keyboard layout from a JSON file.
///
/// I/O errors (file not found, permission denied) are kept apart from JSON
/// and validation errors, and every error carries the file path.
///
/// # Example
///
/// ```rust,ignore
/// use onscreen_keyboard::layout::parse_layout_file;
///
/// match parse_layout_file("layouts/phone.json") {
///     Ok(result) => println!("Loaded layout: {}", result.layout.name),
///     Err(e) => eprintln!("Failed to parse layout: {}", e),
/// }
/// ```
pub fn parse_layout_file(path: impl AsRef<Path>) -> Result<ParseResult<Layout>, LayoutError> {
    let path = path.as_ref();
    let display_path = path.display().to_string();

    let json_str = fs::read_to_string(path).map_err(|source| LayoutError::IoError {
        source,
        file_path: display_path.clone(),
    })?;

    parse_layout_from_string(&json_str).map_err(|e| e.with_file_path(&display_path))
}

/// Parses a keyboard layout from a JSON string.
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<Layout>, LayoutError> {
    let definition: LayoutDefinition =
        serde_json::from_str(json).map_err(|e| LayoutError::json_error(e, None))?;

    validate_layout(definition)
}

/// Loads the builtin layout for a mode from the embedded resources.
pub fn builtin_layout(mode: LayoutMode) -> Result<Layout, LayoutError> {
    let name = format!("{}.json", mode.as_str());
    let file = BuiltinLayouts::get(&name).ok_or_else(|| LayoutError::MissingResource {
        name: name.clone(),
    })?;

    let definition: LayoutDefinition = serde_json::from_slice(&file.data)
        .map_err(|e| LayoutError::json_error(e, Some(name.as_str())))?;

    validate_layout(definition)
        .map(ParseResult::into_layout)
        .map_err(|e| e.with_file_path(&name))
}

/// Loads the layout for a mode, preferring a custom file when one is given.
///
/// A custom file must declare the same mode it replaces.
pub fn load_layout(mode: LayoutMode, custom: Option<&Path>) -> Result<Layout, LayoutError> {
    let Some(path) = custom else {
        return builtin_layout(mode);
    };

    let result = parse_layout_file(path)?;
    if result.layout.mode != mode {
        return Err(LayoutError::validation_error(vec![ValidationIssue::new(
            Severity::Error,
            format!(
                "Layout declares mode '{}' but is configured for '{}'",
                result.layout.mode, mode
            ),
            "mode",
        )])
        .with_file_path(&path.display().to_string()));
    }

    tracing::info!(
        "Loaded custom {} layout '{}' from {}",
        mode,
        result.layout.name,
        path.display()
    );
    Ok(result.into_layout())
}

// ============================================================================
// Tests
// ============================================================================
