// SPDX-License-Identifier: GPL-3.0-only

//! The on-screen keyboard state machine.
//!
//! ```text
//! Closed --(recognized focus)--> Open(layout, buffer, caps = false)
//! Open   --(text key)----------> Open(buffer edited)
//! Open   --(caps)--------------> Open(caps flipped)
//! Open   --(done)--------------> Closed
//! ```
//!
//! There is no cancel: edits are written to the target as they happen, so
//! leaving with done is all the cleanup needed.
//!
//! # Example
//!
//! ```rust,ignore
//! use onscreen_keyboard::config::Config;
//! use onscreen_keyboard::input::{InputElement, TextField};
//! use onscreen_keyboard::keyboard::KeyboardController;
//! use onscreen_keyboard::layout::KeyKind;
//! use std::rc::Rc;
//!
//! let mut keyboard = KeyboardController::new(&Config::default())?;
//! keyboard.on_close(|value| println!("Committed: {}", value));
//!
//! let pin: Rc<dyn InputElement> = Rc::new(TextField::new("pin", "number"));
//! keyboard.focus(&pin);
//! keyboard.press(KeyKind::Digit('7'));
//! keyboard.press(KeyKind::Done);
//! ```

pub mod controller;
pub mod session;

pub use controller::{KeyboardController, ValueCallback};
pub use session::EditSession;

use crate::config::Config;
use crate::layout::LayoutError;
use std::time::Duration;

/// Creates the keyboard after the configured attach delay.
///
/// The delay gives the host page time to finish building its fields.
pub async fn attach(config: &Config) -> Result<KeyboardController, LayoutError> {
    tokio::time::sleep(Duration::from_millis(config.init_delay_ms)).await;
    KeyboardController::new(config)
}
