// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layouts.
//!
//! A layout is an ordered list of key tokens plus the tokens after which a
//! row ends. Two layouts ship with the crate:
//!
//! - **numeric**: `7 8 9 / 4 5 6 / 1 2 3 / 0 backspace / done`
//! - **alphanumeric**: a digit row, `q`-`p`, `caps a`-`l enter`,
//!   `z`-`m , . ? done` and a space bar
//!
//! Either can be replaced by a JSON file:
//!
//! ```json
//! {
//!     "name": "numeric",
//!     "mode": "numeric",
//!     "keys": ["1", "2", "3", "br", "0", "backspace", "done"],
//!     "break_after": ["backspace"]
//! }
//! ```
//!
//! Tokens are single characters or one of `backspace`, `caps`, `enter`,
//! `space`, `done` and `br` (an explicit row break).

pub mod parser;
pub mod types;
pub mod validation;

pub use parser::{builtin_layout, load_layout, parse_layout_file, parse_layout_from_string};
pub use types::{
    fold_case, KeyDescriptor, KeyKind, Layout, LayoutDefinition, LayoutError, LayoutMode, ParseResult,
    Severity, ValidationIssue,
};
