// SPDX-License-Identifier: GPL-3.0-only

//! Text-entry elements owned by the host page.
//!
//! The keyboard never owns an element. It holds a `Weak` reference to the
//! focused one, writes its value and tells the host when the value changed
//! programmatically.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A text-entry field the keyboard can edit.
///
/// Methods take `&self`; implementations use interior mutability since the
/// host and the keyboard share the element.
pub trait InputElement {
    /// Name used in log output.
    fn name(&self) -> &str;

    /// The `type` attribute (`"text"`, `"number"`, ...).
    fn input_type(&self) -> &str;

    /// Returns `true` if the element carries the given marker class.
    fn has_class(&self, class: &str) -> bool;

    /// Current value.
    fn value(&self) -> String;

    /// Replaces the value without notifying anyone.
    fn set_value(&self, value: &str);

    /// Tells host-side listeners the value changed, as if typed natively.
    fn notify_input(&self);
}

/// Listener invoked with the new value after a programmatic change.
pub type InputListener = Box<dyn Fn(&str)>;

/// Reference [`InputElement`] with a value cell and input listeners.
pub struct TextField {
    name: String,
    input_type: String,
    classes: Vec<String>,
    value: RefCell<String>,
    listeners: RefCell<Vec<InputListener>>,
}

impl TextField {
    /// Creates an empty field of the given `type`.
    pub fn new(name: impl Into<String>, input_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            classes: Vec::new(),
            value: RefCell::new(String::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Adds a marker class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets the initial value.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        *self.value.borrow_mut() = value.into();
        self
    }

    /// Registers a listener for programmatic value changes.
    ///
    /// Listeners must not register further listeners on the same field from
    /// inside the callback.
    pub fn add_input_listener(&self, listener: impl Fn(&str) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }
}

impl InputElement for TextField {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        let mut current = self.value.borrow_mut();
        current.clear();
        current.push_str(value);
    }

    fn notify_input(&self) {
        let value = self.value();
        for listener in self.listeners.borrow().iter() {
            listener(&value);
        }
    }
}

impl fmt::Debug for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextField")
            .field("name", &self.name)
            .field("input_type", &self.input_type)
            .field("classes", &self.classes)
            .field("value", &self.value.borrow())
            .finish_non_exhaustive()
    }
}

/// Page-wide observer notified when the user directs focus at an element.
///
/// The host calls it before any element-level handler runs.
pub trait FocusObserver {
    /// Called with the element that received the click or focus.
    fn focus_captured(&mut self, target: &Rc<dyn InputElement>);
}
