// SPDX-License-Identifier: GPL-3.0-only

//! The host side of the keyboard.
//!
//! The host page owns its text fields. The keyboard sees them only through
//! the [`InputElement`] trait and learns about focus changes through a
//! [`FocusObserver`] the host calls in its capture step.
//!
//! # Features
//!
//! - **Elements**: [`InputElement`] and the reference [`TextField`]
//! - **Classification**: [`FocusClassifier`] picks numeric or alphanumeric
//!   from the `type` attribute or a marker class
//! - **Deferred events**: [`EventSender`] lets host listeners queue focus
//!   changes and key presses without re-entering the keyboard
//!
//! # Example
//!
//! ```rust,ignore
//! use onscreen_keyboard::input::{FocusClassifier, TextField};
//! use onscreen_keyboard::layout::LayoutMode;
//!
//! let field = TextField::new("pin", "number");
//! let classifier = FocusClassifier::default();
//! assert_eq!(classifier.classify(&field), Some(LayoutMode::Numeric));
//! ```

pub mod classify;
pub mod element;
pub mod events;

pub use classify::{classify_type, FocusClassifier};
pub use element::{FocusObserver, InputElement, InputListener, TextField};
pub use events::{event_channel, EventSender, HostEvent};
