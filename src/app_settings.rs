// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application name used in log output.
pub const APP_NAME: &str = "onscreen-keyboard";

/// Delay before the keyboard attaches itself to the page, in milliseconds.
pub const DEFAULT_INIT_DELAY_MS: u64 = 500;

/// Marker class that makes any input use the alphanumeric layout.
pub const DEFAULT_BONUS_CLASS: &str = "p-input--bonus";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "onscreen_keyboard=info";

/// Upper bound of host events handled per call to `process_pending`.
///
/// Host listeners reacting to input notifications may queue further focus
/// events; anything beyond this budget in one turn is dropped.
pub const MAX_EVENTS_PER_TURN: usize = 64;

/// Input `type` attributes that request the numeric layout.
pub const NUMERIC_INPUT_TYPES: &[&str] = &["number"];

/// Input `type` attributes that request the alphanumeric layout.
pub const ALPHANUMERIC_INPUT_TYPES: &[&str] = &["email", "text", "search", "url", "password"];
