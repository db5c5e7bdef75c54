// SPDX-License-Identifier: GPL-3.0-only

//! State of one open editing session.

use crate::input::InputElement;
use crate::layout::{fold_case, LayoutMode};
use std::fmt;
use std::rc::{Rc, Weak};

/// The text being composed for the active target while the panel is open.
///
/// Created on open with the target's current value and dropped on close, so
/// the buffer and caps lock never outlive the session.
pub struct EditSession {
    target: Weak<dyn InputElement>,
    mode: LayoutMode,
    buffer: String,
    caps_lock: bool,
}

impl EditSession {
    /// Starts a session with the target's value and caps lock off.
    pub fn new(target: Weak<dyn InputElement>, mode: LayoutMode, initial: String) -> Self {
        Self {
            target,
            mode,
            buffer: initial,
            caps_lock: false,
        }
    }

    /// The element being edited, if the host still holds it.
    pub fn target(&self) -> Option<Rc<dyn InputElement>> {
        self.target.upgrade()
    }

    /// Returns `true` if `element` is the active target.
    pub fn targets(&self, element: &Rc<dyn InputElement>) -> bool {
        std::ptr::addr_eq(self.target.as_ptr(), Rc::as_ptr(element))
    }

    /// Layout mode of the session.
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// The composed text.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether caps lock is engaged.
    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// Appends a glyph, upper-cased when caps lock is on and lower-cased
    /// otherwise. Characters without a single-character case form are
    /// appended as-is, so every glyph adds exactly one character.
    pub fn type_char(&mut self, c: char) {
        self.buffer.push(fold_case(c, self.caps_lock).unwrap_or(c));
    }

    /// Appends a character without case folding.
    pub fn push_raw(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Removes the last character. No-op on an empty buffer.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Flips caps lock and returns the new state.
    pub fn toggle_caps(&mut self) -> bool {
        self.caps_lock = !self.caps_lock;
        self.caps_lock
    }

    /// Ends the session, returning the final text.
    pub fn into_buffer(self) -> String {
        self.buffer
    }
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("target", &self.target().map(|t| t.name().to_string()))
            .field("mode", &self.mode)
            .field("buffer", &self.buffer)
            .field("caps_lock", &self.caps_lock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TextField;

    fn session(initial: &str) -> (Rc<dyn InputElement>, EditSession) {
        let field: Rc<dyn InputElement> = Rc::new(TextField::new("f", "text"));
        let session = EditSession::new(
            Rc::downgrade(&field),
            LayoutMode::Alphanumeric,
            initial.to_string(),
        );
        (field, session)
    }

    /// Test 1: Typing follows caps lock
    #[test]
    fn test_type_char_case_folding() {
        let (_field, mut s) = session("ab");
        s.type_char('C');
        assert_eq!(s.buffer(), "abc");
        s.toggle_caps();
        s.type_char('c');
        s.type_char('7');
        assert_eq!(s.buffer(), "abcC7");
    }

    /// Test 2: Backspace removes one character, even multibyte ones
    #[test]
    fn test_backspace() {
        let (_field, mut s) = session("hő");
        s.backspace();
        assert_eq!(s.buffer(), "h");
        s.backspace();
        s.backspace();
        assert_eq!(s.buffer(), "");
    }

    /// Test 3: Caps toggles twice back to off
    #[test]
    fn test_toggle_caps() {
        let (_field, mut s) = session("");
        assert!(!s.caps_lock());
        assert!(s.toggle_caps());
        assert!(!s.toggle_caps());
        assert_eq!(s.buffer(), "");
    }

    /// Test 4: Target identity and liveness
    #[test]
    fn test_target_tracking() {
        let (field, s) = session("");
        let other: Rc<dyn InputElement> = Rc::new(TextField::new("g", "text"));
        assert!(s.targets(&field));
        assert!(!s.targets(&other));

        drop(field);
        assert!(s.target().is_none());
    }

    /// Test 5: Letters that expand when case-mapped are typed unchanged
    #[test]
    fn test_type_char_keeps_expanding_letters() {
        let (_field, mut s) = session("ab");
        s.toggle_caps();
        s.type_char('ß');
        assert_eq!(s.buffer(), "abß");
        s.backspace();
        assert_eq!(s.buffer(), "ab");

        s.toggle_caps();
        s.type_char('İ');
        assert_eq!(s.buffer(), "abİ");
    }
}
